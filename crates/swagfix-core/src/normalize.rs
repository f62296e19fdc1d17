use std::borrow::Cow;

use log::debug;

use crate::document::{Operation, SwaggerDocument};

/// Area used for operations without a (non-empty) first tag.
pub const FALLBACK_AREA: &str = "misc";

/// Separates the area prefix from the operation name in an `operationId`.
pub const AREA_SEPARATOR: char = '_';

/// What a normalization pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub removed_paths: usize,
    pub renamed_operations: usize,
}

impl NormalizeReport {
    pub fn is_unchanged(&self) -> bool {
        self.removed_paths == 0 && self.renamed_operations == 0
    }
}

/// Drop empty path items and give every operation an area-qualified
/// `operationId`, in place.
pub fn normalize(document: &mut SwaggerDocument) -> NormalizeReport {
    let mut report = NormalizeReport::default();

    document.paths.retain(|path, item| {
        if item.is_empty() {
            debug!("removing empty path {path}");
            report.removed_paths += 1;
            false
        } else {
            true
        }
    });

    for (path, item) in document.paths.iter_mut() {
        for (method, operation) in item.operations_mut() {
            if let Some(operation_id) = fixed_operation_id(path, method, operation) {
                debug!(
                    "{method} {path}: operationId {:?} -> {operation_id}",
                    operation.operation_id
                );
                operation.operation_id = Some(operation_id);
                report.renamed_operations += 1;
            }
        }
    }

    report
}

/// The replacement `operationId` for an operation, or `None` when the
/// current one already carries its area.
///
/// - `None`/empty id: `<area>_<method><PathAsPascalCase>`
/// - id without area: `<area>_<id>`
pub fn fixed_operation_id(path: &str, method: &str, operation: &Operation) -> Option<String> {
    let area = area(operation);
    match operation.operation_id.as_deref().filter(|id| !id.is_empty()) {
        Some(id) if has_area(id) => None,
        Some(id) => Some(format!("{area}{AREA_SEPARATOR}{id}")),
        None => Some(format!(
            "{area}{AREA_SEPARATOR}{method}{}",
            path_to_operation_name(path)
        )),
    }
}

/// The operation's first tag, or [`FALLBACK_AREA`].
pub fn area(operation: &Operation) -> &str {
    operation.first_tag().unwrap_or(FALLBACK_AREA)
}

/// Whether `operation_id` is already `<area>_<name>`: a non-empty area
/// before the first separator and a non-empty name after it. The area does
/// not have to match the operation's tag.
pub fn has_area(operation_id: &str) -> bool {
    operation_id
        .split_once(AREA_SEPARATOR)
        .is_some_and(|(area, name)| !area.is_empty() && !name.is_empty())
}

/// Turn a URL path into a PascalCase operation name.
///
/// Examples:
/// - `/apps/{app}/devices` → `AppsByAppDevices`
/// - `/v0.1/user_invitations` → `V01UserInvitations`
/// - `/` → empty string
pub fn path_to_operation_name(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(convert_parameter)
        .map(|segment| segment.replace('.', ""))
        .map(|segment| snake_to_pascal_case(&segment))
        .collect()
}

/// `{name}` → `by_name`; other segments unchanged.
fn convert_parameter(segment: &str) -> Cow<'_, str> {
    match segment.strip_prefix('{') {
        Some(name) => {
            let name = name.strip_suffix('}').unwrap_or(name);
            Cow::Owned(format!("by_{name}"))
        }
        None => Cow::Borrowed(segment),
    }
}

/// Uppercase the first character of every `_`-separated piece and join
/// them. The rest of each piece is kept as written.
pub fn snake_to_pascal_case(s: &str) -> String {
    s.split('_')
        .filter(|piece| !piece.is_empty())
        .map(capitalize)
        .collect()
}

fn capitalize(piece: &str) -> String {
    let mut chars = piece.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
