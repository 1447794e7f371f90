//! Server and group switching commands.

use crate::command::target::failure_notice;
use crate::command::text::list;
use crate::command::{
    run_cohort, select_targets, CommandDescriptor, CommandRegistry, Invocation, RegistryError,
    Step, Target,
};
use crate::error::CommandError;
use crate::session::Connection;

pub(super) fn register(registry: &mut CommandRegistry) -> Result<(), RegistryError> {
    registry.register(
        CommandDescriptor::new("send", "cmd_send", send)
            .help("Send player(s) to a new server. player causes a single player to be redirected, current affects all players that are on your current server and all affects everyone.")
            .usage("send <player <server> <name> | current <server> | all <server>>")
            .console_usage("send <player <server> <name> | all <server>>"),
    )?;
    registry.register(
        CommandDescriptor::new("gsend", "cmd_gsend", gsend)
            .help("Send player(s) to a random server of a group. player causes a single player to be redirected, current affects all players that are on your current server and all affects everyone.")
            .usage("gsend <player <group> <name> | current <group> | all <group>>")
            .console_usage("gsend <player <group> <name> | all <group>>"),
    )?;
    registry.register(
        CommandDescriptor::new("server", "cmd_server", server)
            .help("Display your current upstream server and all other configured servers. If a valid server name is specified, switch to that server.")
            .usage("server [server]")
            .console_usage("server"),
    )?;
    registry.register(
        CommandDescriptor::new("gserver", "cmd_gserver", gserver)
            .help("Display the groups your current upstream server is in and all other configured groups. If a valid group name is specified, switch to a random server of that group.")
            .usage("gserver [group]")
            .console_usage("gserver"),
    )?;
    Ok(())
}

/// Tell a single redirected player that the transport failed mid-switch.
///
/// Other failures leave the client where it was and need no notice.
fn notify(conn: &dyn Connection, err: CommandError) -> CommandError {
    if matches!(err, CommandError::TransportFailure(_)) {
        conn.send_chat_msg(&failure_notice(&err));
    }
    err
}

fn send(inv: &Invocation<'_>) -> Result<String, CommandError> {
    let (target, server) = Target::parse(inv)?;
    if !inv.catalog.has_server(server) {
        return Err(CommandError::UnknownServer);
    }

    let redirector = &inv.ctx.redirector;
    match target {
        Target::Player(name) => {
            let conn = inv.find_player(name)?;
            if conn.server_name() == server {
                return Err(CommandError::AlreadyAtDestination);
            }

            redirector
                .hop(inv.catalog, conn.as_ref(), server)
                .map_err(|e| notify(conn.as_ref(), e))?;
        }
        Target::Current | Target::All => {
            let targets = select_targets(inv, target)?;
            run_cohort("send", targets, |conn| {
                if conn.server_name() == server {
                    return Ok(Step::Skipped);
                }
                redirector
                    .hop(inv.catalog, conn, server)
                    .map(|()| Step::Moved(server.to_string()))
            });
        }
    }

    Ok(String::new())
}

fn gsend(inv: &Invocation<'_>) -> Result<String, CommandError> {
    let (target, group) = Target::parse(inv)?;
    let members = inv
        .catalog
        .group_members(group)
        .ok_or(CommandError::UnknownGroup)?;

    let redirector = &inv.ctx.redirector;
    match target {
        Target::Player(name) => {
            let conn = inv.find_player(name)?;
            redirector
                .hop_group(inv.catalog, conn.as_ref(), group)
                .map_err(|e| notify(conn.as_ref(), e))?;
        }
        Target::Current | Target::All => {
            let targets = select_targets(inv, target)?;
            run_cohort("gsend", targets, |conn| {
                if members.contains(&conn.server_name()) {
                    return Ok(Step::Skipped);
                }
                redirector.hop_group(inv.catalog, conn, group).map(Step::Moved)
            });
        }
    }

    Ok(String::new())
}

fn server(inv: &Invocation<'_>) -> Result<String, CommandError> {
    match (inv.args, inv.caller) {
        (&[], None) => Ok(format!("Servers: {}", list(inv.catalog.server_names()))),
        (&[], Some(me)) => Ok(format!(
            "Connected to: {} | Servers: {}",
            me.server_name(),
            list(inv.catalog.server_names())
        )),
        (&[server], Some(me)) => {
            if me.server_name() == server {
                return Err(CommandError::AlreadyAtDestination);
            }

            inv.ctx.redirector.hop(inv.catalog, me, server)?;
            Ok(String::new())
        }
        _ => Err(inv.usage()),
    }
}

fn gserver(inv: &Invocation<'_>) -> Result<String, CommandError> {
    match (inv.args, inv.caller) {
        (&[], None) => Ok(format!("Groups: {}", list(inv.catalog.group_names()))),
        (&[], Some(me)) => match inv.catalog.server(&me.server_name()) {
            Some(current) => Ok(format!(
                "Connected to: {} | Groups: {}",
                list(&current.groups),
                list(inv.catalog.group_names())
            )),
            None => Ok("Not connected to a server.".to_string()),
        },
        (&[group], Some(me)) => {
            inv.ctx.redirector.hop_group(inv.catalog, me, group)?;
            Ok(String::new())
        }
        _ => Err(inv.usage()),
    }
}
