use std::path::PathBuf;

use swagfix_core::error::FixupError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("failed to download {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("download of {url} returned HTTP {status}")]
    DownloadStatus { url: String, status: u16 },

    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("nuget finished but {} is missing", path.display())]
    MissingTool { path: PathBuf },

    #[error("`{command}` {}", describe_exit(.code))]
    ProcessFailed { command: String, code: Option<i32> },

    #[error(transparent)]
    Fixup(#[from] FixupError),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with code {code}"),
        None => "was terminated by a signal".to_string(),
    }
}
