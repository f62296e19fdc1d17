use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use crate::download::Downloader;
use crate::error::ToolError;
use crate::runner::{CommandRunner, ToolCommand, ToolOutput};

/// Records every command and fails the first whose program or arguments
/// contain a configured needle. A successful command matching `creates`
/// leaves a file behind, the way an installer would.
#[derive(Default)]
pub struct RecordingRunner {
    commands: RefCell<Vec<String>>,
    fail_on: Option<(String, i32)>,
    creates: Option<(String, PathBuf)>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(mut self, needle: &str, code: i32) -> Self {
        self.fail_on = Some((needle.to_string(), code));
        self
    }

    pub fn creating(mut self, needle: &str, path: PathBuf) -> Self {
        self.creates = Some((needle.to_string(), path));
        self
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &ToolCommand) -> Result<ToolOutput, ToolError> {
        let line = command.to_string();
        self.commands.borrow_mut().push(line.clone());
        match &self.fail_on {
            Some((needle, code)) if line.contains(needle.as_str()) => Ok(ToolOutput {
                success: false,
                code: Some(*code),
                stdout: String::new(),
                stderr: "boom".to_string(),
            }),
            _ => {
                if let Some((needle, path)) = &self.creates {
                    if line.contains(needle.as_str()) {
                        write_file(path)?;
                    }
                }
                Ok(ToolOutput {
                    success: true,
                    code: Some(0),
                    ..ToolOutput::default()
                })
            }
        }
    }
}

fn write_file(path: &Path) -> Result<(), ToolError> {
    let io_err = |source| ToolError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, b"MZ").map_err(io_err)
}

/// Writes fixed bytes instead of fetching, or fails with a status.
#[derive(Default)]
pub struct FakeDownloader {
    urls: RefCell<Vec<String>>,
    status: Option<u16>,
}

impl FakeDownloader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_with(status: u16) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.borrow().clone()
    }
}

impl Downloader for FakeDownloader {
    fn download(&self, url: &str, dest: &Path) -> Result<u64, ToolError> {
        self.urls.borrow_mut().push(url.to_string());
        if let Some(status) = self.status {
            return Err(ToolError::DownloadStatus {
                url: url.to_string(),
                status,
            });
        }
        fs::write(dest, b"MZ").map_err(|source| ToolError::Io {
            path: dest.to_path_buf(),
            source,
        })?;
        Ok(2)
    }
}
