use std::sync::{
    Arc, Mutex, OnceLock,
    atomic::{AtomicUsize, Ordering},
};

use microevent::{
    Args, Config, Emittable, Emitter, Error, EventName, FailurePolicy, Granted, Handler,
    MicroEvent, Value, args, grant,
};

#[derive(Default)]
struct Call {
    count: AtomicUsize,
    args: Mutex<Vec<Args>>,
}

impl Call {
    fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    fn last(&self) -> Option<Args> {
        self.args.lock().unwrap().last().cloned()
    }
}

/// Handler that counts its calls and keeps the arguments of each one.
fn tracked<H: 'static>() -> (Arc<Call>, Handler<H, Args>) {
    let call = Arc::new(Call::default());
    let c = call.clone();
    let handler = Handler::new(move |_: &H, args: &Args| {
        c.count.fetch_add(1, Ordering::SeqCst);
        c.args.lock().unwrap().push(args.clone());
        Ok(())
    });
    (call, handler)
}

#[derive(Default, Emittable)]
struct Widget {
    name: String,
    #[emitter]
    events: Emitter<Widget>,
}

#[derive(Emittable)]
struct Meter<T>(Mutex<Vec<T>>, Emitter<Self, T>);

#[test]
fn test_on_registers_a_handler() {
    let events: MicroEvent = MicroEvent::new();
    let (call, handler) = tracked();
    events.on("surprise", handler);
    events.trigger("surprise", args![]).unwrap();
    assert_eq!(call.count(), 1);
}

#[test]
fn test_off_removes_a_registered_handler() {
    let events: MicroEvent = MicroEvent::new();
    let (call, handler) = tracked();
    events.on("surprise", handler.clone());
    events.off("surprise", &handler);
    events.trigger("surprise", args![]).unwrap();
    assert_eq!(call.count(), 0);
}

#[test]
fn test_trigger_calls_every_registered_handler() {
    let events: MicroEvent = MicroEvent::new();
    let (one, h1) = tracked();
    let (two, h2) = tracked();
    events.on("surprise", h1);
    events.on("surprise", h2);
    events.trigger("surprise", args![]).unwrap();
    assert_eq!(one.count(), 1);
    assert_eq!(two.count(), 1);
}

#[test]
fn test_trigger_calls_handler_once_per_call() {
    let events: MicroEvent = MicroEvent::new();
    let (call, handler) = tracked();
    events.on("surprise", handler);
    events.trigger("surprise", args![]).unwrap();
    events.trigger("surprise", args![]).unwrap();
    assert_eq!(call.count(), 2);
}

#[test]
fn test_trigger_passes_arguments_through() {
    let events: MicroEvent = MicroEvent::new();
    let (call, handler) = tracked();
    events.on("surprise", handler);
    events
        .trigger("surprise", args!["one", "two", "three"])
        .unwrap();
    assert_eq!(call.last(), Some(args!["one", "two", "three"]));
}

#[test]
fn test_handlers_may_unbind_themselves_during_trigger() {
    let events: MicroEvent = MicroEvent::new();
    let (a, ha) = tracked();
    let (c, hc) = tracked();

    let b_calls = Arc::new(AtomicUsize::new(0));
    let slot: Arc<OnceLock<Handler<MicroEvent, Args>>> = Arc::default();
    let me = slot.clone();
    let counter = b_calls.clone();
    let hb = Handler::new(move |events: &MicroEvent, _: &Args| {
        if let Some(me) = me.get() {
            events.off("surprise", me);
        }
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    slot.set(hb.clone()).unwrap();

    events.on("surprise", ha);
    events.on("surprise", hb);
    events.on("surprise", hc);

    events.trigger("surprise", args![]).unwrap();
    assert_eq!(a.count(), 1);
    assert_eq!(b_calls.load(Ordering::SeqCst), 1);
    assert_eq!(c.count(), 1);

    events.trigger("surprise", args![]).unwrap();
    assert_eq!(a.count(), 2);
    assert_eq!(b_calls.load(Ordering::SeqCst), 1);
    assert_eq!(c.count(), 2);
}

#[test]
fn test_handler_removed_by_an_earlier_one_still_fires_that_pass() {
    let events: MicroEvent = MicroEvent::new();
    let (b, hb) = tracked();
    let (c, hc) = tracked();

    let target = hc.clone();
    events.on(
        "surprise",
        Handler::new(move |events: &MicroEvent, _: &Args| {
            events.off("surprise", &target);
            Ok(())
        }),
    );
    events.on("surprise", hb);
    events.on("surprise", hc);

    events.trigger("surprise", args![]).unwrap();
    assert_eq!(b.count(), 1);
    assert_eq!(c.count(), 1);

    events.trigger("surprise", args![]).unwrap();
    assert_eq!(b.count(), 2);
    assert_eq!(c.count(), 1);
    assert_eq!(events.listener_count("surprise"), 2);
}

#[test]
fn test_removing_an_unknown_handler_changes_nothing() {
    let events: MicroEvent = MicroEvent::new();
    let (call, handler) = tracked();
    let (_, stranger) = tracked();
    events.on("surprise", handler);

    events.off("surprise", &stranger);
    events.off("elsewhere", &stranger);

    assert_eq!(events.listener_count("surprise"), 1);
    events.trigger("surprise", args![]).unwrap();
    assert_eq!(call.count(), 1);
}

#[test]
fn test_derive_grants_capability_to_every_instance() {
    let first = Widget {
        name: "first".into(),
        ..Default::default()
    };
    let second = Widget {
        name: "second".into(),
        ..Default::default()
    };

    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = {
        let seen = seen.clone();
        Handler::new(move |w: &Widget, _: &Args| {
            seen.lock().unwrap().push(w.name.clone());
            Ok(())
        })
    };

    first.on("click", log.clone());
    second.on("click", log.clone());
    first.trigger("click", args![]).unwrap();
    second.trigger("click", args![]).unwrap();
    assert_eq!(*seen.lock().unwrap(), ["first", "second"]);

    // registries stay per instance
    first.off("click", &log);
    first.trigger("click", args![]).unwrap();
    second.trigger("click", args![]).unwrap();
    assert_eq!(*seen.lock().unwrap(), ["first", "second", "second"]);
}

#[test]
fn test_derive_supports_tuple_structs_and_generics() {
    let meter: Meter<u8> = Meter(Mutex::default(), Emitter::new());
    meter.on(
        "reading",
        Handler::new(|m: &Meter<u8>, v: &u8| {
            m.0.lock().unwrap().push(*v);
            Ok(())
        }),
    );
    meter.trigger("reading", 4).unwrap();
    meter.trigger("reading", 2).unwrap();
    assert_eq!(*meter.0.lock().unwrap(), [4, 2]);
}

#[test]
fn test_grant_attaches_capability_to_one_value() {
    let profile = grant(String::from("ann"));
    let greeting = Arc::new(Mutex::new(String::new()));
    let g = greeting.clone();
    profile.on(
        "greet",
        Handler::new(move |p: &Granted<String>, args: &Args| {
            let punct = args.first().and_then(Value::as_str).unwrap_or("");
            *g.lock().unwrap() = format!("hi {}{}", p.as_str(), punct);
            Ok(())
        }),
    );
    profile.trigger("greet", args!["!"]).unwrap();
    assert_eq!(*greeting.lock().unwrap(), "hi ann!");
    assert_eq!(profile.len(), 3);
}

#[test]
fn test_every_host_uses_the_same_operations() {
    fn fire<E>(host: &E) -> usize
    where
        E: Emittable<Args = Args, Topic = EventName> + 'static,
    {
        let (call, handler) = tracked::<E>();
        host.on("ping", handler.clone());
        host.trigger("ping", args![1]).unwrap();
        host.off("ping", &handler);
        host.trigger("ping", args![2]).unwrap();
        call.count()
    }

    let standalone: MicroEvent = MicroEvent::new();
    assert_eq!(fire(&standalone), 1);
    assert_eq!(fire(&Widget::default()), 1);
    assert_eq!(fire(&grant(42u32)), 1);
}

#[test]
fn test_failing_handler_aborts_the_pass_by_default() {
    let events: MicroEvent = MicroEvent::new();
    let (before, h1) = tracked();
    let (after, h3) = tracked();
    events.on("save", h1);
    events.on(
        "save",
        Handler::new(|_: &MicroEvent, _: &Args| {
            std::fs::read("/definitely/not/here")?;
            Ok(())
        }),
    );
    events.on("save", h3);

    let err = events.trigger("save", args![]).unwrap_err();
    assert!(matches!(err, Error::IOError(_)));
    assert_eq!(before.count(), 1);
    assert_eq!(after.count(), 0);
}

#[test]
fn test_isolate_policy_runs_every_handler() {
    let events: MicroEvent =
        MicroEvent::with_config(Config::default().with_failure_policy(FailurePolicy::Isolate));
    let (after, h2) = tracked();
    events.on(
        "save",
        Handler::new(|_: &MicroEvent, _: &Args| Err(Error::external("disk full"))),
    );
    events.on("save", h2);

    let err = events.trigger("save", args![]).unwrap_err();
    assert_eq!(after.count(), 1);
    assert_eq!(err.isolated_errors().len(), 1);
    assert_eq!(
        err.to_string(),
        "1 handler(s) failed while emitting 'save'"
    );
}

#[test]
fn test_labelled_emitter_under_a_trace_subscriber() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();

    let events: MicroEvent = MicroEvent::with_config(Config::default().with_label("traced"));
    let (call, handler) = tracked();
    events.on("tick", handler.clone());
    events.trigger("tick", args![1]).unwrap();
    events.off("tick", &handler);
    events.off("tick", &handler);
    events.off("tock", &handler);
    events.on("tick", handler.clone());
    events.emitter().clear(&"tick".into());
    events.on("tock", handler);
    events.emitter().clear_all();
    assert!(events.emitter().topics().is_empty());
    assert_eq!(call.count(), 1);
    assert_eq!(events.emitter().config().label.as_deref(), Some("traced"));
}
