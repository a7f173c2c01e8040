use pretty_assertions::assert_eq;

use super::*;
use crate::CallSite;

fn event() -> DiagnosticEvent {
    DiagnosticEvent::new(CallSite::new("tick", "src/world.rs", 10, 5), "Method/Function Failed.")
}

/// Handler that appends its name to a shared log.
fn named(name: &'static str, log: &Arc<Mutex<Vec<&'static str>>>) -> impl ErrorHandler {
    let log = Arc::clone(log);
    move |_: &DiagnosticEvent| log.lock().push(name)
}

fn deliver(registry: &HandlerRegistry, event: &DiagnosticEvent) {
    for handler in registry.snapshot() {
        handler.handle(event);
    }
}

#[test]
fn new_registry_is_empty() {
    let registry = HandlerRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
}

#[test]
fn snapshot_is_newest_first() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry = HandlerRegistry::new();
    let _h1 = registry.register(named("h1", &log));
    let _h2 = registry.register(named("h2", &log));

    deliver(&registry, &event());
    assert_eq!(*log.lock(), vec!["h2", "h1"]);
}

#[test]
fn dropping_token_unregisters() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry = HandlerRegistry::new();
    let h1 = registry.register(named("h1", &log));
    let h2 = registry.register(named("h2", &log));

    deliver(&registry, &event());
    drop(h2);
    deliver(&registry, &event());

    // The first delivery is unaffected by the later removal.
    assert_eq!(*log.lock(), vec!["h2", "h1", "h1"]);
    assert!(registry.contains(h1.id()));
    assert_eq!(registry.len(), 1);
}

#[test]
fn explicit_unregister_by_token() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry = HandlerRegistry::new();
    let token = registry.register(named("h", &log));
    token.unregister();
    assert!(registry.is_empty());
}

#[test]
fn unregister_unknown_id_is_ignored() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry = HandlerRegistry::new();
    let token = registry.register(named("h", &log));
    let id = token.id();
    drop(token);

    assert!(!registry.unregister(id));
    assert!(registry.is_empty());
}

#[test]
fn kept_registration_survives_token() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry = HandlerRegistry::new();
    let id = registry.register(named("h", &log)).keep();

    assert!(registry.contains(id));
    deliver(&registry, &event());
    assert_eq!(*log.lock(), vec!["h"]);

    assert!(registry.unregister(id));
    assert!(registry.is_empty());
}

#[test]
fn token_outliving_registry_is_harmless() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry = HandlerRegistry::new();
    let token = registry.register(named("h", &log));
    drop(registry);
    drop(token);
}

#[test]
fn shared_handler_registered_twice_is_delivered_twice() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry = HandlerRegistry::new();
    let handler: Arc<dyn ErrorHandler> = Arc::new(named("h", &log));
    let a = registry.register_arc(Arc::clone(&handler));
    let b = registry.register_arc(handler);

    assert_ne!(a.id(), b.id());
    deliver(&registry, &event());
    assert_eq!(*log.lock(), vec!["h", "h"]);
}

#[test]
fn snapshot_is_detached_from_later_changes() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry = HandlerRegistry::new();
    let _h1 = registry.register(named("h1", &log));
    let snapshot = registry.snapshot();
    let _h2 = registry.register(named("h2", &log));

    for handler in snapshot {
        handler.handle(&event());
    }
    assert_eq!(*log.lock(), vec!["h1"]);
}

#[test]
fn struct_handler_uses_its_own_state() {
    struct Counter(Mutex<usize>);

    impl ErrorHandler for Counter {
        fn handle(&self, _: &DiagnosticEvent) {
            *self.0.lock() += 1;
        }
    }

    let registry = HandlerRegistry::new();
    let counter = Arc::new(Counter(Mutex::new(0)));
    let _token = registry.register_arc(counter.clone());
    deliver(&registry, &event());
    deliver(&registry, &event());
    assert_eq!(*counter.0.lock(), 2);
}

#[test]
fn registration_is_thread_safe() {
    let registry = HandlerRegistry::new();
    let threads: Vec<_> = (0..8)
        .map(|_| {
            let registry = registry.clone();
            std::thread::spawn(move || {
                for _ in 0..50 {
                    let token = registry.register(|_: &DiagnosticEvent| {});
                    drop(token);
                }
                registry.register(|_: &DiagnosticEvent| {}).keep()
            })
        })
        .collect();

    for thread in threads {
        let id = thread.join().unwrap();
        assert!(registry.contains(id));
    }
    assert_eq!(registry.len(), 8);
}
