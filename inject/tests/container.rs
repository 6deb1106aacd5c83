use std::any::Any;
use std::sync::Arc;
use std::thread;

use inject::{Container, InjectError, Injectable, Instance, Wiring};

#[derive(Debug, PartialEq)]
struct Logger {
    name: String,
}

#[derive(Debug, PartialEq)]
struct Database {
    url: String,
}

trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

struct EnglishGreeter;

impl Greeter for EnglishGreeter {
    fn greet(&self) -> String {
        "hello".into()
    }
}

#[derive(Default)]
struct Handler {
    logger: Option<Arc<Logger>>,
    db: Option<Arc<Database>>,
    retries: u32,
}

impl Injectable for Handler {
    fn wiring() -> Wiring<Self> {
        Wiring::<Self>::new()
            .field("logger", "logger", |target| &mut target.logger)
            .field("db", "db", |target| &mut target.db)
            .skip("retries")
    }
}

fn logger(name: &str) -> Arc<Logger> {
    Arc::new(Logger { name: name.into() })
}

fn database(url: &str) -> Arc<Database> {
    Arc::new(Database { url: url.into() })
}

#[test]
fn test_new_container_is_empty() {
    let container = Container::new();
    assert!(container.is_empty());
    assert_eq!(container.len(), 0);
    assert_eq!(container.keys().count(), 0);
}

#[test]
fn test_register_preserves_identity() {
    let logger = logger("main");
    let db = database("postgres://localhost/app");

    let mut container = Container::new();
    container
        .provide("logger", logger.clone())
        .unwrap()
        .provide("db", db.clone())
        .unwrap();

    let mut handler = Handler::default();
    container.register(&mut handler).unwrap();

    assert!(Arc::ptr_eq(handler.logger.as_ref().unwrap(), &logger));
    assert!(Arc::ptr_eq(handler.db.as_ref().unwrap(), &db));
}

#[test]
fn test_register_shares_instance_between_targets() {
    let logger = logger("shared");
    let mut container = Container::new();
    container.provide("logger", logger.clone()).unwrap();
    container.provide("db", database("sqlite::memory:")).unwrap();

    let mut first = Handler::default();
    let mut second = Handler::default();
    container.register(&mut first).unwrap();
    container.register(&mut second).unwrap();

    assert!(Arc::ptr_eq(
        first.logger.as_ref().unwrap(),
        second.logger.as_ref().unwrap()
    ));
    // Registry, caller and both targets.
    assert_eq!(Arc::strong_count(&logger), 4);
}

#[test]
fn test_provide_last_write_wins() {
    let first = logger("first");
    let second = logger("second");

    let mut container = Container::new();
    container.provide("logger", first.clone()).unwrap();
    container.provide("logger", second.clone()).unwrap();
    container.provide("db", database("db")).unwrap();
    assert_eq!(container.len(), 2);

    let mut handler = Handler::default();
    container.register(&mut handler).unwrap();

    let injected = handler.logger.unwrap();
    assert!(Arc::ptr_eq(&injected, &second));
    assert!(!Arc::ptr_eq(&injected, &first));
    assert_eq!(Arc::strong_count(&first), 1);
}

#[test]
fn test_keys_are_case_sensitive() {
    let mut container = Container::new();
    container.provide("Logger", logger("upper")).unwrap();
    container.provide("db", database("db")).unwrap();

    assert!(container.contains("Logger"));
    assert!(!container.contains("logger"));

    let mut handler = Handler::default();
    let err = container.register(&mut handler).unwrap_err();
    assert_eq!(err.missing_key(), Some("logger"));
}

#[test]
fn test_provide_value_is_rejected() {
    let mut container = Container::new();
    container.provide("logger", logger("kept")).unwrap();

    let err = container
        .provide("logger", Instance::value(Logger { name: "value".into() }))
        .unwrap_err();
    assert!(err.is_type_constraint_violation());
    assert!(!err.is_unresolved_dependency());
    assert_eq!(
        err.to_string(),
        "type constraint violation: instance must be a reference/pointer type"
    );

    // The earlier entry is not replaced.
    assert_eq!(container.len(), 1);
    assert_eq!(container.get::<Logger>("logger").unwrap().name, "kept");

    let err = container.provide("port", Instance::value(5432u16)).unwrap_err();
    assert!(err.is_type_constraint_violation());
    assert!(!container.contains("port"));
}

#[test]
fn test_register_unresolved_dependency() {
    let logger = logger("main");
    let mut container = Container::new();
    container.provide("logger", logger.clone()).unwrap();

    let mut handler = Handler {
        retries: 3,
        ..Default::default()
    };
    let err = container.register(&mut handler).unwrap_err();

    assert!(err.is_unresolved_dependency());
    assert_eq!(err.missing_key(), Some("db"));
    assert_eq!(err.to_string(), "no instance found for db");
    // Fields before the failure stay assigned.
    assert!(Arc::ptr_eq(handler.logger.as_ref().unwrap(), &logger));
    assert!(handler.db.is_none());
    assert_eq!(handler.retries, 3);
}

#[derive(Default)]
struct Scenario {
    a: Option<Arc<Logger>>,
    b: Option<Arc<Logger>>,
    c: Option<Arc<Logger>>,
}

impl Injectable for Scenario {
    fn wiring() -> Wiring<Self> {
        Wiring::<Self>::new()
            .field("a", "logger", |target| &mut target.a)
            .field("b", "cache", |target| &mut target.b)
            .skip("c")
    }
}

#[test]
fn test_register_aborts_on_first_missing_key() {
    let logger = logger("L");
    let mut container = Container::new();
    container.provide("logger", logger.clone()).unwrap();
    container.provide("db", database("D")).unwrap();

    let mut target = Scenario::default();
    let err = container.register(&mut target).unwrap_err();

    assert!(matches!(err, InjectError::UnresolvedDependency { ref key } if key == "cache"));
    assert!(Arc::ptr_eq(target.a.as_ref().unwrap(), &logger));
    assert!(target.b.is_none());
    assert!(target.c.is_none());
}

#[test]
fn test_unannotated_fields_are_untouched() {
    let original = logger("original");
    let mut container = Container::new();
    container.provide("logger", logger("L")).unwrap();
    container.provide("cache", logger("C")).unwrap();
    container.provide("c", logger("c")).unwrap();

    let mut target = Scenario {
        c: Some(original.clone()),
        ..Default::default()
    };
    container.register(&mut target).unwrap();

    assert!(Arc::ptr_eq(target.c.as_ref().unwrap(), &original));
    assert_eq!(target.b.unwrap().name, "C");
}

#[derive(Default)]
struct Pipeline {
    logger: Option<Arc<Logger>>,
    db: Option<Arc<Database>>,
    audit: Option<Arc<Logger>>,
}

impl Injectable for Pipeline {
    fn wiring() -> Wiring<Self> {
        Wiring::<Self>::new()
            .field("logger", "logger", |target| &mut target.logger)
            .field("db", "db", |target| &mut target.db)
            .field("audit", "audit", |target| &mut target.audit)
    }
}

#[test]
fn test_register_type_mismatch() {
    let logger = logger("main");
    let mut container = Container::new();
    container.provide("logger", logger.clone()).unwrap();
    container.provide("db", Arc::new(String::from("not a database"))).unwrap();
    container.provide("audit", self::logger("audit")).unwrap();

    let mut pipeline = Pipeline::default();
    let err = container.register(&mut pipeline).unwrap_err();

    match err {
        InjectError::TypeMismatch {
            key,
            field,
            expected,
            found,
        } => {
            assert_eq!(key, "db");
            assert_eq!(field, "db");
            assert!(expected.contains("Database"));
            assert!(found.contains("String"));
        }
        err => panic!("unexpected error: {err}"),
    }
    assert!(Arc::ptr_eq(pipeline.logger.as_ref().unwrap(), &logger));
    assert!(pipeline.db.is_none());
    // Fields after the mismatch are not reached.
    assert!(pipeline.audit.is_none());
}

struct Service {
    greeter: Arc<dyn Greeter>,
    fallback: Arc<dyn Greeter>,
}

impl Injectable for Service {
    fn wiring() -> Wiring<Self> {
        Wiring::<Self>::new()
            .field("greeter", "greeter", |target| &mut target.greeter)
            .field("fallback", "", |target| &mut target.fallback)
    }
}

struct SilentGreeter;

impl Greeter for SilentGreeter {
    fn greet(&self) -> String {
        String::new()
    }
}

#[test]
fn test_register_trait_objects() {
    let greeter: Arc<dyn Greeter> = Arc::new(EnglishGreeter);
    let mut container = Container::new();
    container.provide("greeter", greeter.clone()).unwrap();

    let mut service = Service {
        greeter: Arc::new(SilentGreeter),
        fallback: Arc::new(SilentGreeter),
    };
    container.register(&mut service).unwrap();

    assert!(Arc::ptr_eq(&service.greeter, &greeter));
    assert_eq!(service.greeter.greet(), "hello");
    // Empty key means no annotation.
    assert_eq!(service.fallback.greet(), "");
}

#[test]
fn test_wiring_fields() {
    let wiring = Scenario::wiring();
    assert_eq!(wiring.len(), 3);
    assert!(!wiring.is_empty());
    assert_eq!(
        wiring.fields().collect::<Vec<_>>(),
        vec![("a", Some("logger")), ("b", Some("cache")), ("c", None)]
    );
    assert_eq!(wiring.keys().collect::<Vec<_>>(), vec!["logger", "cache"]);

    let wiring = Service::wiring();
    assert_eq!(wiring.keys().collect::<Vec<_>>(), vec!["greeter"]);
}

#[test]
fn test_get_and_instance() {
    let db = database("postgres://localhost");
    let mut container = Container::new();
    container.provide("db", db.clone()).unwrap();

    assert!(Arc::ptr_eq(&container.get::<Database>("db").unwrap(), &db));
    assert!(container.get::<Logger>("db").is_none());
    assert!(container.get::<Database>("missing").is_none());

    let instance = container.instance("db").unwrap();
    assert!(instance.is_shared());
    assert!(instance.type_name().contains("Database"));
    assert!(container.instance("missing").is_none());
}

#[test]
fn test_register_any() {
    let mut container = Container::new();
    container.provide("logger", logger("L")).unwrap();
    container.provide("db", database("D")).unwrap();
    assert!(!container.is_wired::<Handler>());
    container.wire::<Handler>();
    assert!(container.is_wired::<Handler>());

    let mut handler = Handler::default();
    container.register_any(&mut handler).unwrap();
    assert_eq!(handler.logger.unwrap().name, "L");
    assert_eq!(handler.db.unwrap().url, "D");
}

#[test]
fn test_register_any_unwired_target() {
    let mut container = Container::new();
    container.provide("logger", logger("L")).unwrap();
    container.wire::<Handler>();

    let mut scenario = Scenario::default();
    let err = container.register_any(&mut scenario).unwrap_err();
    assert!(err.is_type_constraint_violation());
    assert!(scenario.a.is_none());

    let mut number = 42i64;
    let err = container.register_any(&mut number as &mut dyn Any).unwrap_err();
    assert!(err.is_type_constraint_violation());
    assert_eq!(number, 42);
}

#[test]
fn test_register_any_propagates_failures() {
    let mut container = Container::new();
    container.provide("logger", logger("L")).unwrap();
    container.wire::<Scenario>();

    let mut scenario = Scenario::default();
    let err = container.register_any(&mut scenario).unwrap_err();
    assert_eq!(err.missing_key(), Some("cache"));
    assert!(scenario.a.is_some());
}

#[test]
fn test_register_from_threads() {
    let mut container = Container::new();
    container.provide("logger", logger("L")).unwrap();
    container.provide("db", database("D")).unwrap();
    let container = Arc::new(container);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let container = container.clone();
            thread::spawn(move || {
                let mut handler = Handler::default();
                container.register(&mut handler).unwrap();
                handler
            })
        })
        .collect();

    let expected = container.get::<Logger>("logger").unwrap();
    for handle in handles {
        let handler = handle.join().unwrap();
        assert!(Arc::ptr_eq(handler.logger.as_ref().unwrap(), &expected));
    }
}
