pub mod download;
pub mod error;
pub mod generate;
pub mod pipeline;
pub mod runner;
pub mod tools;

#[cfg(test)]
mod fakes;

pub use download::{Downloader, HttpDownloader};
pub use error::ToolError;
pub use pipeline::{Pipeline, PipelineReport, Step};
pub use runner::{CommandRunner, ProcessRunner, ToolCommand, ToolOutput};
