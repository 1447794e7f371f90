//! Player lookup and status commands.

use std::collections::BTreeMap;

use crate::command::{CommandDescriptor, CommandRegistry, Invocation, RegistryError};
use crate::error::CommandError;

pub(super) fn register(registry: &mut CommandRegistry) -> Result<(), RegistryError> {
    registry.register(
        CommandDescriptor::new("find", "cmd_find", find)
            .help("Check whether a player is connected and report their upstream server if they are.")
            .usage("find <name>"),
    )?;
    registry.register(
        CommandDescriptor::new("addr", "cmd_addr", addr)
            .help("Find the network address of a player if they're connected.")
            .usage("addr <name>"),
    )?;
    registry.register(
        CommandDescriptor::new("players", "cmd_players", players)
            .help("Show the player list of every server.")
            .usage("players"),
    )?;
    registry.register(
        CommandDescriptor::new("uptime", "cmd_uptime", uptime)
            .help("Show the uptime of the proxy.")
            .usage("uptime"),
    )?;
    Ok(())
}

fn find(inv: &Invocation<'_>) -> Result<String, CommandError> {
    let [name] = *inv.args else {
        return Err(inv.usage());
    };

    let conn = inv.find_player(name)?;
    Ok(format!("{} is connected to {}", conn.name(), conn.server_name()))
}

fn addr(inv: &Invocation<'_>) -> Result<String, CommandError> {
    let [name] = *inv.args else {
        return Err(inv.usage());
    };

    let conn = inv.find_player(name)?;
    Ok(format!("{} is at {}", conn.name(), conn.remote_addr()))
}

fn players(inv: &Invocation<'_>) -> Result<String, CommandError> {
    let mut by_server: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for conn in inv.ctx.sessions.snapshot() {
        by_server
            .entry(conn.server_name())
            .or_default()
            .push(conn.name().to_string());
    }

    if by_server.is_empty() {
        return Ok("No players connected.".to_string());
    }

    let mut lines = Vec::new();
    for (server, mut names) in by_server {
        if server.is_empty() {
            lines.push("--- No server ---".to_string());
        } else {
            lines.push(format!("{}:", server));
        }

        names.sort();
        lines.extend(names.into_iter().map(|name| format!("- {}", name)));
    }

    Ok(lines.join("\n"))
}

fn uptime(inv: &Invocation<'_>) -> Result<String, CommandError> {
    Ok(format!("Uptime: {:.3}s", inv.ctx.uptime().as_secs_f64()))
}
