//! Process-level commands.

use tracing::info;

use crate::command::{CommandDescriptor, CommandRegistry, Invocation, RegistryError};
use crate::error::CommandError;

pub(super) fn register(registry: &mut CommandRegistry) -> Result<(), RegistryError> {
    registry.register(
        CommandDescriptor::new("shutdown", "cmd_shutdown", shutdown)
            .help("Disconnect all clients and stop the server.")
            .usage("shutdown"),
    )?;
    registry.register(
        CommandDescriptor::new("reload", "cmd_reload", reload)
            .help("Reload the configuration file. You should restart the proxy instead if possible.")
            .usage("reload"),
    )?;
    Ok(())
}

fn shutdown(inv: &Invocation<'_>) -> Result<String, CommandError> {
    let by = inv.caller.map(|c| c.name()).unwrap_or("console");
    if inv.ctx.shutdown.trigger() {
        info!(by = %by, "shutdown command accepted");
    }
    Ok(String::new())
}

fn reload(inv: &Invocation<'_>) -> Result<String, CommandError> {
    inv.ctx
        .catalog
        .reload()
        .map_err(|e| CommandError::ConfigReloadFailure(e.to_string()))?;
    Ok("Configuration reloaded. You should restart if you encounter any problems.".to_string())
}
