use std::fs;
use std::path::Path;

use log::info;

use crate::document;
use crate::error::FixupError;
use crate::normalize::{self, NormalizeReport};

/// Normalize a Swagger document held in memory and return the pretty JSON.
pub fn fixup_str(input: &str) -> Result<(String, NormalizeReport), FixupError> {
    let mut doc = document::from_json(input)?;
    let report = normalize::normalize(&mut doc);
    let output = document::to_json_pretty(&doc)?;
    Ok((output, report))
}

/// Read `raw`, normalize it and write the result to `fixed`.
///
/// `raw` is never modified. Missing parent directories of `fixed` are
/// created.
pub fn fixup_file(raw: &Path, fixed: &Path) -> Result<NormalizeReport, FixupError> {
    let input = fs::read_to_string(raw).map_err(|source| FixupError::Read {
        path: raw.to_path_buf(),
        source,
    })?;

    let (output, report) = fixup_str(&input)?;

    if let Some(parent) = fixed.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| FixupError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(fixed, output).map_err(|source| FixupError::Write {
        path: fixed.to_path_buf(),
        source,
    })?;

    info!(
        "fixed {} -> {} ({} empty paths removed, {} operationIds rewritten)",
        raw.display(),
        fixed.display(),
        report.removed_paths,
        report.renamed_operations
    );
    Ok(report)
}
