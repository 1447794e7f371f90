//! Command discovery.

use crate::command::text::{colorize, HELP_COLOR, USAGE_COLOR};
use crate::command::{CommandDescriptor, CommandRegistry, Invocation, RegistryError};
use crate::error::CommandError;

pub(super) fn register(registry: &mut CommandRegistry) -> Result<(), RegistryError> {
    registry.register(
        CommandDescriptor::new("help", "cmd_help", help)
            .help("Show help for a command (all commands if unspecified).")
            .usage("help [command]"),
    )?;
    registry.register(
        CommandDescriptor::new("usage", "cmd_usage", usage)
            .help("Show the usage string of a command (all commands if unspecified).")
            .usage("usage [command]"),
    )?;
    Ok(())
}

fn help(inv: &Invocation<'_>) -> Result<String, CommandError> {
    describe(inv, |cmd| {
        format!("{}{}", colorize(&format!("{}: ", cmd.name()), HELP_COLOR), cmd.help_text())
    })
}

fn usage(inv: &Invocation<'_>) -> Result<String, CommandError> {
    let console = inv.is_console();
    describe(inv, |cmd| {
        format!(
            "{}{}",
            colorize(&format!("{}: ", cmd.name()), USAGE_COLOR),
            cmd.usage_for(console)
        )
    })
}

/// Describe one command, or every command sorted by name.
///
/// Full listings go to an in-session caller as one chat message per
/// command; the console gets them joined into the reply.
fn describe<F>(inv: &Invocation<'_>, line: F) -> Result<String, CommandError>
where
    F: Fn(&CommandDescriptor) -> String,
{
    match *inv.args {
        [name] => inv
            .registry
            .lookup(name)
            .map(&line)
            .ok_or_else(|| CommandError::UnknownCommand(name.to_string())),
        [] => {
            let mut commands: Vec<&CommandDescriptor> = inv.registry.all().collect();
            commands.sort_by(|a, b| a.name().cmp(b.name()));
            let lines = commands.into_iter().map(line);

            match inv.caller {
                Some(caller) => {
                    for text in lines {
                        caller.send_chat_msg(&text);
                    }
                    Ok(String::new())
                }
                None => Ok(lines.collect::<Vec<_>>().join("\n")),
            }
        }
        _ => Err(inv.usage()),
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::harness;
    use super::super::BUILTIN_COMMANDS;
    use crate::command::{colorize, HELP_COLOR, USAGE_COLOR};

    #[test]
    fn test_help_single() {
        let h = harness();
        assert_eq!(
            h.console("help find"),
            format!(
                "{}Check whether a player is connected and report their upstream server if they are.",
                colorize("find: ", HELP_COLOR)
            )
        );
        assert_eq!(h.console("help frobnicate"), "Command not found: frobnicate");
        assert_eq!(h.console("help a b"), "Usage: help [command]");
    }

    #[test]
    fn test_usage_single_depends_on_caller() {
        let h = harness();
        let alice = h.connect("alice", "lobby");

        assert_eq!(
            h.console("usage server"),
            format!("{}server", colorize("server: ", USAGE_COLOR))
        );
        assert_eq!(
            h.run(&alice, "usage server"),
            format!("{}server [server]", colorize("server: ", USAGE_COLOR))
        );
    }

    #[test]
    fn test_help_all_console() {
        let h = harness();
        let reply = h.console("help");
        let lines: Vec<&str> = reply.lines().collect();

        assert_eq!(lines.len(), BUILTIN_COMMANDS.len());
        assert!(lines[0].contains("addr: "));
    }

    #[test]
    fn test_usage_all_session() {
        let h = harness();
        let alice = h.connect("alice", "lobby");

        assert_eq!(h.run(&alice, "usage"), "");
        let messages = alice.messages();
        assert_eq!(messages.len(), BUILTIN_COMMANDS.len());
        assert!(messages.iter().any(|m| m.ends_with("kick <name> [reason]")));
    }
}
