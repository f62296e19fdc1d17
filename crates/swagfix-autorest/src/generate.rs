use log::info;
use swagfix_core::config::SwagfixConfig;

use crate::error::ToolError;
use crate::runner::{self, CommandRunner, ToolCommand};

/// The AutoRest command line that turns the fixed Swagger document into a
/// client under `config.output`.
pub fn autorest_command(config: &SwagfixConfig) -> ToolCommand {
    let toolchain = &config.toolchain;
    let options = &config.generator;
    ToolCommand::dotnet(&toolchain.autorest_exe(), toolchain.clr_host.as_deref())
        .args(["-Modeler", "Swagger", "-i"])
        .arg(&config.fixed)
        .arg("-AddCredentials")
        .arg(options.add_credentials.to_string())
        .arg("-ClientName")
        .arg(&config.client_name)
        .arg("-CodeGenerator")
        .arg(&options.code_generator)
        .arg("-OutputDirectory")
        .arg(&config.output)
        .arg("-ft")
        .arg(options.flatten_threshold.to_string())
}

/// Run AutoRest on the fixed document.
pub fn generate_code(runner: &dyn CommandRunner, config: &SwagfixConfig) -> Result<(), ToolError> {
    info!(
        "generating {} client {} into {}",
        config.generator.code_generator,
        config.client_name,
        config.output.display()
    );
    runner::run_checked(runner, &autorest_command(config))?;
    Ok(())
}
