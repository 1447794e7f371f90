//! Built-in commands.
//!
//! Every command is gated by the permission token `cmd_<name>`.

mod admin;
mod info;
mod meta;
mod moderation;
mod perms;
mod routing;

use super::{CommandRegistry, RegistryError};

/// Register every built-in command.
pub fn register_all(registry: &mut CommandRegistry) -> Result<(), RegistryError> {
    admin::register(registry)?;
    info::register(registry)?;
    moderation::register(registry)?;
    perms::register(registry)?;
    routing::register(registry)?;
    meta::register(registry)?;
    Ok(())
}

/// Names of the built-in commands.
pub const BUILTIN_COMMANDS: &[&str] = &[
    "shutdown", "find", "addr", "alert", "send", "gsend", "players", "reload", "group", "perms",
    "gperms", "server", "gserver", "kick", "ban", "unban", "uptime", "help", "usage",
];


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registers_every_builtin() {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry).unwrap();

        assert_eq!(registry.len(), BUILTIN_COMMANDS.len());
        for name in BUILTIN_COMMANDS {
            let cmd = registry.lookup(name).unwrap();
            assert_eq!(cmd.perm(), format!("cmd_{}", name));
            assert!(!cmd.help_text().is_empty(), "{} has no help", name);
        }
    }

    #[test]
    fn test_register_twice_fails() {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry).unwrap();

        assert!(matches!(
            register_all(&mut registry),
            Err(RegistryError::Duplicate(_))
        ));
        assert_eq!(registry.len(), BUILTIN_COMMANDS.len());
    }
}
