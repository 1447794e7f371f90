//! Dispatch integration tests.
//!
//! Full command lines run through the dispatcher against sessions served
//! by the in-process transport.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use proxy_commands::catalog::{Catalog, CatalogStore};
use proxy_commands::command::{CommandContext, CommandDescriptor, CommandRegistry, Dispatcher};
use proxy_commands::config::{Config, ServerEntry};
use proxy_commands::redirect::{RandomSource, Redirector};
use proxy_commands::session::{
    BanList, Connection, LocalConnection, LocalTransport, SessionSet, TransportError,
};
use proxy_commands::shutdown::ShutdownSignal;
use proxy_commands::{CommandError, MAX_GROUP_ATTEMPTS};

/// Always picks the same member, counting draws.
struct Always {
    pick: &'static str,
    draws: AtomicUsize,
}

impl RandomSource for Always {
    fn choose<'a>(&self, candidates: &'a [String]) -> Option<&'a str> {
        self.draws.fetch_add(1, Ordering::SeqCst);
        candidates
            .iter()
            .find(|c| c.as_str() == self.pick)
            .map(String::as_str)
    }
}

struct Proxy {
    dispatcher: Dispatcher,
    transport: LocalTransport,
    next_host: AtomicUsize,
}

impl Proxy {
    fn connect(&self, name: &str, server: &str) -> Arc<LocalConnection> {
        let host = self.next_host.fetch_add(1, Ordering::SeqCst) as u8;
        let addr = SocketAddr::from(([10, 1, 0, host], 40000));
        self.transport.connect(name, addr, server).unwrap()
    }

    fn run(&self, caller: &LocalConnection, line: &str) -> String {
        self.dispatcher.dispatch(Some(caller as &dyn Connection), line)
    }
}

fn config() -> Config {
    let mut config = Config {
        servers: vec![
            ServerEntry::new("lobby", "10.0.0.1:30000"),
            ServerEntry::new("s1", "10.0.0.2:30000").in_group("builders"),
            ServerEntry::new("s2", "10.0.0.3:30000").in_group("builders"),
        ],
        ..Config::default()
    };
    config.permission_groups.insert(
        "default".into(),
        vec!["cmd_find".into(), "cmd_perms".into(), "cmd_help".into()],
    );
    config.permission_groups.insert(
        "admin".into(),
        vec!["cmd_find".into(), "cmd_send".into(), "cmd_gsend".into()],
    );
    config.user_groups.insert("Op".into(), "admin".into());
    config
}

fn proxy_with(redirector: Option<Redirector>) -> Proxy {
    let sessions = Arc::new(SessionSet::new());
    let catalog = Arc::new(CatalogStore::new(Catalog::from_config(&config()).unwrap()));
    let bans = Arc::new(BanList::new());

    let mut ctx = CommandContext::new(
        sessions.clone(),
        catalog.clone(),
        bans.clone(),
        ShutdownSignal::new(),
    );
    if let Some(redirector) = redirector {
        ctx = ctx.with_redirector(redirector);
    }

    Proxy {
        dispatcher: Dispatcher::with_builtins(ctx).unwrap(),
        transport: LocalTransport::new(catalog, sessions, bans),
        next_host: AtomicUsize::new(1),
    }
}

fn proxy() -> Proxy {
    proxy_with(None)
}

#[test]
fn test_find_connected_and_missing_player() {
    let proxy = proxy();
    let caller = proxy.connect("Carol", "lobby");
    proxy.connect("Alice", "lobby");

    let reply = proxy.run(&caller, "find Alice");
    assert!(reply.contains("Alice"));
    assert!(reply.contains("lobby"));

    assert_eq!(proxy.run(&caller, "find Bob"), "Player not connected.");
}

#[test]
fn test_group_hop_gives_up_after_five_draws() {
    let random = Arc::new(Always {
        pick: "s1",
        draws: AtomicUsize::new(0),
    });
    let proxy = proxy_with(Some(Redirector::new(random.clone())));
    let op = proxy.connect("Op", "lobby");
    let builder = proxy.connect("Bea", "s1");

    let result = proxy
        .dispatcher
        .try_dispatch(Some(op.as_ref() as &dyn Connection), "gsend player builders Bea");

    assert_eq!(result, Err(CommandError::RetriesExhausted));
    assert_eq!(random.draws.load(Ordering::SeqCst), MAX_GROUP_ATTEMPTS);
    assert_eq!(builder.server_name(), "s1");
    assert!(builder.messages().is_empty());
}

#[test]
fn test_group_hop_never_lands_on_current_server() {
    let proxy = proxy();
    let op = proxy.connect("Op", "lobby");
    let bea = proxy.connect("Bea", "s1");

    for _ in 0..20 {
        let before = bea.server_name();
        match proxy.run(&op, "gsend player builders Bea").as_str() {
            "" => assert_ne!(bea.server_name(), before),
            reply => assert!(reply.contains("5 attempts"), "unexpected reply: {}", reply),
        }
    }
}

#[test]
fn test_console_shutdown_signals_once() {
    let proxy = proxy();
    let signal = proxy.dispatcher.context().shutdown.clone();

    assert_eq!(proxy.dispatcher.try_dispatch(None, "shutdown"), Ok(String::new()));
    assert!(signal.is_triggered());

    // A second request is accepted but does not fire again.
    assert_eq!(proxy.dispatcher.dispatch(None, "shutdown"), "");
    assert!(!signal.trigger());
}

#[test]
fn test_unknown_command_leaves_registry_unchanged() {
    let proxy = proxy();
    let caller = proxy.connect("Carol", "lobby");
    let before: HashSet<String> = proxy
        .dispatcher
        .registry()
        .all()
        .map(|c| c.name().to_string())
        .collect();

    assert_eq!(
        proxy
            .dispatcher
            .try_dispatch(Some(caller.as_ref() as &dyn Connection), "frobnicate"),
        Err(CommandError::UnknownCommand("frobnicate".into()))
    );
    assert_eq!(proxy.run(&caller, "frobnicate"), "Command not found: frobnicate");

    let after: HashSet<String> = proxy
        .dispatcher
        .registry()
        .all()
        .map(|c| c.name().to_string())
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_permission_denied_for_default_group() {
    let proxy = proxy();
    let carol = proxy.connect("Carol", "lobby");

    assert_eq!(proxy.run(&carol, "send all s1"), "Permission denied.");
    assert_eq!(carol.server_name(), "lobby");
}

#[test]
fn test_unassigned_identity_gets_default_permissions() {
    let proxy = proxy();
    let carol = proxy.connect("Carol", "lobby");

    assert_eq!(
        proxy.run(&carol, "perms"),
        "Your permissions: cmd_find, cmd_perms, cmd_help"
    );
}

#[test]
fn test_cohort_send_is_idempotent() {
    let proxy = proxy();
    let op = proxy.connect("Op", "lobby");
    let alice = proxy.connect("Alice", "lobby");
    let bob = proxy.connect("Bob", "s2");

    assert_eq!(proxy.run(&op, "send current s1"), "");
    assert_eq!(op.server_name(), "s1");
    assert_eq!(alice.server_name(), "s1");
    assert_eq!(bob.server_name(), "s2");

    assert_eq!(
        proxy
            .dispatcher
            .try_dispatch(Some(op.as_ref() as &dyn Connection), "send current s1"),
        Ok(String::new())
    );
    assert_eq!(bob.server_name(), "s2");

    assert_eq!(proxy.run(&op, "send all s1"), "");
    assert_eq!(bob.server_name(), "s1");

    assert_eq!(proxy.run(&op, "send all s1"), "");
    for conn in [&op, &alice, &bob] {
        assert_eq!(conn.server_name(), "s1");
        assert!(conn.messages().is_empty());
    }
}

#[test]
fn test_cohort_group_send_is_idempotent() {
    let proxy = proxy();
    let op = proxy.connect("Op", "lobby");
    let alice = proxy.connect("Alice", "lobby");

    assert_eq!(proxy.run(&op, "gsend all builders"), "");
    let placed = [op.server_name(), alice.server_name()];
    for server in &placed {
        assert!(server == "s1" || server == "s2");
    }

    assert_eq!(proxy.run(&op, "gsend all builders"), "");
    assert_eq!([op.server_name(), alice.server_name()], placed);

    assert_eq!(
        proxy
            .dispatcher
            .try_dispatch(Some(op.as_ref() as &dyn Connection), "gsend current builders"),
        Ok(String::new())
    );
    assert_eq!([op.server_name(), alice.server_name()], placed);
    assert!(op.messages().is_empty());
    assert!(alice.messages().is_empty());
}

/// Reports `lobby` once, then the server it was moved to behind our back.
struct Drifting {
    reads: AtomicUsize,
    messages: Mutex<Vec<String>>,
}

impl Connection for Drifting {
    fn name(&self) -> &str {
        "Drifter"
    }

    fn server_name(&self) -> String {
        match self.reads.fetch_add(1, Ordering::SeqCst) {
            0 => "lobby".into(),
            _ => "s1".into(),
        }
    }

    fn remote_addr(&self) -> SocketAddr {
        SocketAddr::from(([10, 1, 0, 200], 40000))
    }

    fn send_chat_msg(&self, msg: &str) {
        self.messages.lock().unwrap().push(msg.to_string());
    }

    fn hop(&self, _server: &str) -> Result<(), TransportError> {
        Ok(())
    }

    fn kick(&self, _reason: &str) {}

    fn ban(&self) -> Result<(), TransportError> {
        Ok(())
    }
}

#[test]
fn test_cohort_group_send_reports_exhausted_draws() {
    let random = Arc::new(Always {
        pick: "s1",
        draws: AtomicUsize::new(0),
    });
    let proxy = proxy_with(Some(Redirector::new(random.clone())));
    let drifter = Arc::new(Drifting {
        reads: AtomicUsize::new(0),
        messages: Mutex::new(Vec::new()),
    });
    proxy
        .dispatcher
        .context()
        .sessions
        .attach(drifter.clone())
        .unwrap();

    assert_eq!(proxy.dispatcher.dispatch(None, "gsend all builders"), "");
    assert_eq!(random.draws.load(Ordering::SeqCst), MAX_GROUP_ATTEMPTS);

    let notices = drifter.messages.lock().unwrap();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].starts_with("Could not switch servers."));
    assert!(notices[0].contains("5 attempts"));
}

#[test]
fn test_cohort_survives_disconnected_target() {
    let proxy = proxy();
    let alice = proxy.connect("Alice", "lobby");
    let bob = proxy.connect("Bob", "lobby");

    // A listed session the transport can no longer move.
    let ghost: Arc<dyn Connection> = Arc::new(LocalConnection::detached("Ghost", "lobby"));
    proxy.dispatcher.context().sessions.attach(ghost).unwrap();

    assert_eq!(proxy.dispatcher.dispatch(None, "send all s2"), "");
    assert_eq!(alice.server_name(), "s2");
    assert_eq!(bob.server_name(), "s2");
}

#[test]
fn test_duplicate_registration_keeps_original() {
    let mut registry = CommandRegistry::new();
    registry
        .register(CommandDescriptor::new("find", "cmd_find", |_| Ok("original".into())))
        .unwrap();

    assert!(registry
        .register(CommandDescriptor::new("find", "cmd_other", |_| Ok("replacement".into())))
        .is_err());
    assert_eq!(registry.lookup("find").unwrap().perm(), "cmd_find");
}

#[test]
fn test_builtins_are_frozen() {
    let proxy = proxy();
    let count = proxy.dispatcher.registry().len();
    assert!(proxy.dispatcher.registry().is_finalized());
    assert_eq!(count, 19);
}
