use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use pretty_assertions::assert_eq;

use super::*;
use crate::sink::BufferSink;
use crate::{CallSite, Severity};

fn event() -> DiagnosticEvent {
    DiagnosticEvent::new(CallSite::new("spawn", "src/actor.rs", 20, 9), "Method/Function Failed.")
}

fn buffered(policy: MessagePolicy) -> (Reporter, Arc<BufferSink>) {
    let sink = Arc::new(BufferSink::new());
    let reporter = Reporter::builder()
        .sink(Arc::clone(&sink))
        .policy(policy)
        .build();
    (reporter, sink)
}

#[test]
fn report_reaches_handlers_and_sink() {
    let (reporter, sink) = buffered(MessagePolicy::Retain);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let _token = {
        let seen = Arc::clone(&seen);
        reporter.register(move |e: &DiagnosticEvent| seen.lock().push(e.clone()))
    };

    let delivered = reporter.report(event().with_detail("queue full"));

    assert_eq!(delivered, 1);
    let seen = seen.lock();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].detail(), "queue full");
    assert!(!seen[0].fatal);
    assert_eq!(sink.len(), 1);
}

#[test]
fn retain_policy_keeps_detail() {
    let (reporter, _sink) = buffered(MessagePolicy::Retain);
    let detail = reporter.detail(Some(format_args!("value out of range")));
    assert_eq!(detail, "value out of range");
}

#[test]
fn elide_policy_strips_detail_even_from_prebuilt_events() {
    let (reporter, sink) = buffered(MessagePolicy::Elide);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let _token = {
        let seen = Arc::clone(&seen);
        reporter.register(move |e: &DiagnosticEvent| seen.lock().push(e.detail().to_owned()))
    };

    assert_eq!(reporter.detail(Some(format_args!("secret"))), "");
    reporter.report(event().with_detail("secret"));

    assert_eq!(*seen.lock(), vec![String::new()]);
    assert!(!sink.lines()[0].contains("secret"));
}

#[test]
fn elide_policy_keeps_primary_message() {
    let (reporter, sink) = buffered(MessagePolicy::Elide);
    reporter.report(event().with_severity(Severity::Warning));
    assert!(sink.lines()[0].contains("Method/Function Failed."));
}

static ABORTS: AtomicUsize = AtomicUsize::new(0);

struct Aborted;

fn counting_abort() -> ! {
    ABORTS.fetch_add(1, Ordering::SeqCst);
    panic::panic_any(Aborted)
}

#[test]
fn fatal_report_dispatches_then_aborts_once() {
    let sink = Arc::new(BufferSink::new());
    let reporter = Reporter::builder()
        .sink(Arc::clone(&sink))
        .abort_hook(counting_abort)
        .build();
    let order = Arc::new(Mutex::new(Vec::new()));
    let _token = {
        let order = Arc::clone(&order);
        reporter.register(move |e: &DiagnosticEvent| {
            assert!(e.fatal);
            order.lock().push(ABORTS.load(Ordering::SeqCst));
        })
    };

    let result = panic::catch_unwind(AssertUnwindSafe(|| reporter.report_fatal(event())));

    let payload = result.unwrap_err();
    assert!(payload.downcast_ref::<Aborted>().is_some());
    // The handler ran before the abort hook.
    assert_eq!(*order.lock(), vec![0]);
    assert_eq!(ABORTS.load(Ordering::SeqCst), 1);
    assert!(sink.lines()[0].contains("FATAL: spawn"));
}

fn unexpected_abort() -> ! {
    panic!("abort must not be called")
}

#[test]
fn non_fatal_report_never_aborts() {
    let reporter = Reporter::builder()
        .sink(SilentSink)
        .abort_hook(unexpected_abort)
        .build();
    reporter.report(event());
}

#[test]
fn scoped_reporter_overrides_global() {
    let (reporter, sink) = buffered(MessagePolicy::Retain);
    let reporter = Arc::new(reporter);

    with_reporter(&reporter, || {
        assert!(Arc::ptr_eq(&current(), &reporter));
        current().report(event());
    });

    assert_eq!(sink.len(), 1);
    assert!(Arc::ptr_eq(&current(), global()));
}

#[test]
fn scopes_nest_and_restore() {
    let outer = Arc::new(Reporter::builder().sink(SilentSink).build());
    let inner = Arc::new(Reporter::builder().sink(SilentSink).build());

    with_reporter(&outer, || {
        with_reporter(&inner, || assert!(Arc::ptr_eq(&current(), &inner)));
        assert!(Arc::ptr_eq(&current(), &outer));
    });
}

#[test]
fn scope_is_restored_after_unwind() {
    let scoped = Arc::new(Reporter::builder().sink(SilentSink).build());
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        with_reporter(&scoped, || panic!("inside scope"));
    }));
    assert!(result.is_err());
    assert!(!Arc::ptr_eq(&current(), &scoped));
}

#[test]
fn scope_is_per_thread() {
    let scoped = Arc::new(Reporter::builder().sink(SilentSink).build());
    with_reporter(&scoped, || {
        let other = std::thread::spawn(|| Arc::as_ptr(&current()) as usize)
            .join()
            .unwrap();
        assert_ne!(other, Arc::as_ptr(&scoped) as usize);
    });
}

#[test]
fn install_global_after_first_use_is_rejected() {
    let _ = global();
    let rejected = install_global(Reporter::builder().sink(SilentSink).build());
    assert!(rejected.is_err());
}

#[test]
fn global_registration_functions() {
    let token = register(|_: &DiagnosticEvent| {});
    let id = token.id();
    assert!(global().registry().contains(id));
    drop(token);
    assert!(!unregister(id));
}
