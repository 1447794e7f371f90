//! Permission inspection commands.

use crate::command::text::list;
use crate::command::{CommandDescriptor, CommandRegistry, Invocation, RegistryError};
use crate::error::CommandError;
use crate::permission::permissions_of;

pub(super) fn register(registry: &mut CommandRegistry) -> Result<(), RegistryError> {
    registry.register(
        CommandDescriptor::new("group", "cmd_group", group)
            .help("Display the group of a player. Display your group if no player name is specified.")
            .usage("group [name]")
            .console_usage("group <name>"),
    )?;
    registry.register(
        CommandDescriptor::new("perms", "cmd_perms", perms)
            .help("Show the permissions of a player. Show your permissions if no player name is specified.")
            .usage("perms [name]")
            .console_usage("perms <name>"),
    )?;
    registry.register(
        CommandDescriptor::new("gperms", "cmd_gperms", gperms)
            .help("Show the permissions of a group. Show the permissions of your group if no group is specified.")
            .usage("gperms [group]")
            .console_usage("gperms <group>"),
    )?;
    Ok(())
}

fn group(inv: &Invocation<'_>) -> Result<String, CommandError> {
    match *inv.args {
        [] => {
            let me = inv.session_or_usage()?;
            Ok(format!("Your group: {}", inv.catalog.user_group(me.name())))
        }
        [name] => Ok(format!("Group: {}", inv.catalog.user_group(name))),
        _ => Err(inv.usage()),
    }
}

fn perms(inv: &Invocation<'_>) -> Result<String, CommandError> {
    match *inv.args {
        [] => {
            let me = inv.session_or_usage()?;
            Ok(format!(
                "Your permissions: {}",
                list(permissions_of(inv.catalog, me.name()))
            ))
        }
        [name] => {
            let conn = inv.find_player(name)?;
            Ok(format!(
                "Player permissions: {}",
                list(permissions_of(inv.catalog, conn.name()))
            ))
        }
        _ => Err(inv.usage()),
    }
}

fn gperms(inv: &Invocation<'_>) -> Result<String, CommandError> {
    let group = match *inv.args {
        [] => inv.catalog.user_group(inv.session_or_usage()?.name()),
        [group] => group,
        _ => return Err(inv.usage()),
    };

    let perms = inv
        .catalog
        .permission_group(group)
        .ok_or(CommandError::UnknownGroup)?;
    Ok(format!("Group permissions: {}", list(perms)))
}
