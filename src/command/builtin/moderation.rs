//! Broadcast, kick and ban commands.

use tracing::info;

use crate::command::{CommandDescriptor, CommandRegistry, Invocation, RegistryError};
use crate::error::CommandError;

const KICK_PREFIX: &str = "Kicked by proxy.";

pub(super) fn register(registry: &mut CommandRegistry) -> Result<(), RegistryError> {
    registry.register(
        CommandDescriptor::new("alert", "cmd_alert", alert)
            .help("Send a message to all connected clients regardless of their upstream server.")
            .usage("alert <message>"),
    )?;
    registry.register(
        CommandDescriptor::new("kick", "cmd_kick", kick)
            .help("Disconnect a player with an optional reason.")
            .usage("kick <name> [reason]"),
    )?;
    registry.register(
        CommandDescriptor::new("ban", "cmd_ban", ban)
            .help("Ban a player from using the proxy.")
            .usage("ban <name>"),
    )?;
    registry.register(
        CommandDescriptor::new("unban", "cmd_unban", unban)
            .help("Remove a player from the ban list. Accepts addresses and names.")
            .usage("unban <name | address>"),
    )?;
    Ok(())
}

fn alert(inv: &Invocation<'_>) -> Result<String, CommandError> {
    if inv.args.is_empty() {
        return Err(inv.usage());
    }

    let msg = format!("[ALERT] {}", inv.args.join(" "));
    let delivered = inv.ctx.sessions.broadcast(&msg);
    info!(delivered, "alert sent");
    Ok(String::new())
}

fn kick(inv: &Invocation<'_>) -> Result<String, CommandError> {
    let [name, ref reason @ ..] = *inv.args else {
        return Err(inv.usage());
    };

    let reason = if reason.is_empty() {
        KICK_PREFIX.to_string()
    } else {
        format!("{} {}", KICK_PREFIX, reason.join(" "))
    };

    inv.find_player(name)?.kick(&reason);
    Ok("Player kicked.".to_string())
}

fn ban(inv: &Invocation<'_>) -> Result<String, CommandError> {
    let [name] = *inv.args else {
        return Err(inv.usage());
    };

    inv.find_player(name)?
        .ban()
        .map_err(|e| CommandError::BanFailure(e.to_string()))?;
    Ok("Player banned.".to_string())
}

fn unban(inv: &Invocation<'_>) -> Result<String, CommandError> {
    let [id] = *inv.args else {
        return Err(inv.usage());
    };

    inv.ctx
        .bans
        .unban(id)
        .map_err(|e| CommandError::BanLookupFailure(e.to_string()))?;
    Ok("Player unbanned.".to_string())
}
