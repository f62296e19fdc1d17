use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// AutoRest release the client is generated with.
pub const DEFAULT_AUTOREST_VERSION: &str = "0.17.0-Nightly20161011";
pub const DEFAULT_NUGET_URL: &str = "https://nuget.org/nuget.exe";
pub const DEFAULT_PACKAGE_SOURCE: &str = "https://www.myget.org/F/autorest/api/v2";

/// Top-level project configuration loaded from `.swagfix.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SwagfixConfig {
    /// Swagger document as published by the service.
    pub input: PathBuf,
    /// Where the normalized document is written before generation.
    pub fixed: PathBuf,
    /// Directory the generated client is written to.
    pub output: PathBuf,
    pub client_name: String,
    pub toolchain: ToolchainConfig,
    pub generator: GeneratorOptions,
}

impl Default for SwagfixConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("swagger/raw.json"),
            fixed: PathBuf::from("swagger/fixed.json"),
            output: PathBuf::from("src/generated"),
            client_name: "ApiClient".to_string(),
            toolchain: ToolchainConfig::default(),
            generator: GeneratorOptions::default(),
        }
    }
}

/// Where the code generator comes from and where it is installed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    pub autorest_version: String,
    pub nuget_url: String,
    /// Package feed AutoRest is installed from.
    pub package_source: String,
    pub tools_dir: PathBuf,
    pub packages_dir: PathBuf,
    /// Runtime used to launch .NET executables. `None` runs them directly.
    pub clr_host: Option<String>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            autorest_version: DEFAULT_AUTOREST_VERSION.to_string(),
            nuget_url: DEFAULT_NUGET_URL.to_string(),
            package_source: DEFAULT_PACKAGE_SOURCE.to_string(),
            tools_dir: PathBuf::from("tools"),
            packages_dir: PathBuf::from("packages"),
            clr_host: default_clr_host(),
        }
    }
}

impl ToolchainConfig {
    pub fn nuget_exe(&self) -> PathBuf {
        self.tools_dir.join("nuget.exe")
    }

    pub fn autorest_exe(&self) -> PathBuf {
        self.packages_dir
            .join(format!("Autorest.{}", self.autorest_version))
            .join("tools")
            .join("AutoRest.exe")
    }
}

fn default_clr_host() -> Option<String> {
    if cfg!(windows) {
        None
    } else {
        Some("mono".to_string())
    }
}

/// Options forwarded to the AutoRest command line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    pub code_generator: String,
    pub add_credentials: bool,
    /// Payload flattening threshold (`-ft`).
    pub flatten_threshold: u32,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            code_generator: "NodeJS".to_string(),
            add_credentials: true,
            flatten_threshold: 3,
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".swagfix.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<SwagfixConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# swagfix configuration
input: swagger/raw.json       # Swagger document as published
fixed: swagger/fixed.json     # normalized copy handed to AutoRest
output: src/generated
client_name: ApiClient

toolchain:
  autorest_version: 0.17.0-Nightly20161011
  nuget_url: https://nuget.org/nuget.exe
  package_source: https://www.myget.org/F/autorest/api/v2
  tools_dir: tools
  packages_dir: packages
  # clr_host: mono            # defaults to mono everywhere but Windows

generator:
  code_generator: NodeJS
  add_credentials: true
  flatten_threshold: 3
"#
}
