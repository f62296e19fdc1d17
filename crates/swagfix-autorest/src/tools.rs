use std::fs;

use log::info;
use swagfix_core::config::ToolchainConfig;

use crate::download::Downloader;
use crate::error::ToolError;
use crate::runner::{self, CommandRunner, ToolCommand};

/// Whether a tool had to be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    AlreadyPresent,
    Fetched,
}

/// Make sure `nuget.exe` is in the tools directory, downloading it if not.
pub fn fetch_nuget(
    downloader: &dyn Downloader,
    toolchain: &ToolchainConfig,
) -> Result<FetchOutcome, ToolError> {
    let nuget = toolchain.nuget_exe();
    if nuget.is_file() {
        return Ok(FetchOutcome::AlreadyPresent);
    }

    if !toolchain.tools_dir.is_dir() {
        fs::create_dir_all(&toolchain.tools_dir).map_err(|source| ToolError::Io {
            path: toolchain.tools_dir.clone(),
            source,
        })?;
    }

    downloader.download(&toolchain.nuget_url, &nuget)?;
    Ok(FetchOutcome::Fetched)
}

/// `nuget.exe install Autorest -Source .. -Version .. -o <packages>`.
pub fn nuget_install_command(toolchain: &ToolchainConfig) -> ToolCommand {
    ToolCommand::dotnet(&toolchain.nuget_exe(), toolchain.clr_host.as_deref())
        .args(["install", "Autorest", "-Source"])
        .arg(&toolchain.package_source)
        .arg("-Version")
        .arg(&toolchain.autorest_version)
        .arg("-o")
        .arg(&toolchain.packages_dir)
}

/// Install the configured AutoRest version with nuget unless it is already
/// unpacked in the packages directory.
pub fn fetch_autorest(
    runner: &dyn CommandRunner,
    toolchain: &ToolchainConfig,
) -> Result<FetchOutcome, ToolError> {
    let exe = toolchain.autorest_exe();
    if exe.is_file() {
        return Ok(FetchOutcome::AlreadyPresent);
    }

    info!(
        "downloading AutoRest {} from {}",
        toolchain.autorest_version, toolchain.package_source
    );
    runner::run_checked(runner, &nuget_install_command(toolchain))?;

    if !exe.is_file() {
        return Err(ToolError::MissingTool { path: exe });
    }
    Ok(FetchOutcome::Fetched)
}

/// Fetch nuget, then AutoRest.
pub fn fetch_tools(
    downloader: &dyn Downloader,
    runner: &dyn CommandRunner,
    toolchain: &ToolchainConfig,
) -> Result<(), ToolError> {
    fetch_nuget(downloader, toolchain)?;
    fetch_autorest(runner, toolchain)?;
    Ok(())
}
