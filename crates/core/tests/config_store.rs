//! Behavioural tests for the schema-locked configuration store

use immobot_core::{ConfigError, ConfigStore};
use serde_json::{Value, json};

fn sample() -> ConfigStore {
    ConfigStore::new(json!({
        "foo": "bar",
        "mongo": { "host": "localhost" }
    }))
    .unwrap()
}

fn keys(store: &ConfigStore) -> Vec<String> {
    store.keys().map(str::to_string).collect()
}

#[test]
fn test_mongo_scenario() {
    let mut store = sample();

    assert_eq!(store.get("mongo.host").unwrap(), json!("localhost"));
    assert_eq!(store.get("mongo").unwrap(), json!({ "host": "localhost" }));
    assert!(matches!(
        store.get("mongo.login"),
        Err(ConfigError::UndefinedConfigPath { .. })
    ));

    store.set("foo", json!("fou")).unwrap();
    assert_eq!(store.get("foo").unwrap(), json!("fou"));

    let result = store.set("mongo.login", json!("x"));
    assert!(matches!(
        result,
        Err(ConfigError::UndefinedConfigPath { .. })
    ));
    assert_eq!(store.get("mongo.host").unwrap(), json!("localhost"));
    assert!(!store.isset("mongo.login"));
}

#[test]
fn test_set_nested_store_from_object() {
    let mut store = sample();
    store.set("mongo", json!({ "host": "haha" })).unwrap();
    assert_eq!(store.get("mongo.host").unwrap(), json!("haha"));

    // Nested targets need an object
    let err = store.set("mongo", json!("haha")).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidConfigData { found: "string" }));
    assert_eq!(store.get("mongo.host").unwrap(), json!("haha"));
}

#[test]
fn test_scalars_are_replaced_without_type_check() {
    let mut store = sample();
    store.set("foo", json!([1, 2, 3])).unwrap();
    assert_eq!(store.get("foo").unwrap(), json!([1, 2, 3]));

    store.set("foo", Value::Null).unwrap();
    assert!(store.isset("foo"));
    assert_eq!(store.get("foo").unwrap(), Value::Null);
}

#[test]
fn test_construction_rejects_non_objects() {
    for input in [json!(42), json!("str"), Value::Null, json!(true), json!(["a"])] {
        let result = ConfigStore::new(input.clone());
        assert!(
            matches!(result, Err(ConfigError::InvalidConfigData { .. })),
            "input {input} should be rejected"
        );
    }
}

#[test]
fn test_try_from_value() {
    let store = ConfigStore::try_from(json!({ "a": 1 })).unwrap();
    assert_eq!(store.get("a").unwrap(), json!(1));
    assert!(ConfigStore::try_from(json!(1)).is_err());
}

#[test]
fn test_export_round_trip() {
    let data = json!({
        "foo": "bar",
        "env": "production",
        "verbose": true,
        "ratio": 0.5,
        "empty": {},
        "nothing": null,
        "list": ["a", "b", { "inner": 1 }],
        "mongo": {
            "host": "localhost",
            "replica": { "name": "rs0", "members": [1, 2, 3] }
        }
    });

    let store = ConfigStore::new(data.clone()).unwrap();
    assert_eq!(store.export(), data);
    assert_eq!(Value::from(&store), data);

    // Exporting has no effect on the store
    assert_eq!(store.export(), store.export());
}

#[test]
fn test_arrays_are_opaque() {
    let store = ConfigStore::new(json!({ "list": [{ "a": 1 }] })).unwrap();
    assert!(store.isset("list"));
    assert!(!store.isset("list.0"));
    assert!(matches!(
        store.get_sub("list"),
        Err(ConfigError::NotASubStore { .. })
    ));
}

#[test]
fn test_clone_copies_data() {
    let original = sample();
    let mut copy = original.clone();
    copy.set("mongo.host", json!("elsewhere")).unwrap();

    assert_eq!(original.get("mongo.host").unwrap(), json!("localhost"));
    assert_eq!(copy.get("mongo.host").unwrap(), json!("elsewhere"));
    assert_eq!(keys(&original), keys(&copy));
}

#[test]
fn test_path_traversal_is_associative() {
    let store = ConfigStore::new(json!({
        "a": { "b": { "c": 3, "d": [true] } }
    }))
    .unwrap();

    let sub = store.get_sub("a.b").unwrap();
    assert_eq!(store.get("a.b.c").unwrap(), sub.get("c").unwrap());
    assert_eq!(store.get("a.b.d").unwrap(), sub.get("d").unwrap());

    let a = store.get_sub("a").unwrap();
    assert_eq!(a.get("b.c").unwrap(), store.get("a.b.c").unwrap());
    assert_eq!(a.get_sub("b").unwrap(), sub);
}

#[test]
fn test_isset_matches_get() {
    let store = ConfigStore::new(json!({
        "foo": "bar",
        "mongo": { "host": "localhost", "opts": {} },
        "list": [1]
    }))
    .unwrap();

    for path in [
        "foo",
        "foo.bar",
        "mongo",
        "mongo.host",
        "mongo.opts",
        "mongo.opts.x",
        "mongo.login",
        "list",
        "list.0",
        "",
        ".",
        "mongo.",
        "missing",
        "missing.deeper",
    ] {
        assert_eq!(store.isset(path), store.get(path).is_ok(), "path = {path:?}");
    }
}

#[test]
fn test_get_or_falls_back() {
    let store = sample();

    assert_eq!(store.get_or("foo", json!("other")), json!("bar"));
    assert_eq!(store.get_or("mongo.login", json!("root")), json!("root"));
    assert_eq!(store.get_or("mongo.login", Value::Null), Value::Null);
    assert_eq!(
        store.get_or("mongo", Value::Null),
        json!({ "host": "localhost" })
    );
}

#[test]
fn test_get_as_or() {
    let store = ConfigStore::new(json!({ "port": 27017, "name": "db" })).unwrap();

    assert_eq!(store.get_as_or("port", 0_u16).unwrap(), 27017);
    assert_eq!(store.get_as_or("timeout", 30_u64).unwrap(), 30);
    assert!(matches!(
        store.get_as_or("name", 0_u16),
        Err(ConfigError::InvalidValue { .. })
    ));
}

#[test]
fn test_import_rejects_undeclared_keys() {
    let mut store = sample();
    let before = keys(&store);

    let err = store.import(json!({ "login": "root" })).unwrap_err();
    assert!(matches!(err, ConfigError::SchemaOverrideNotAllowed { ref key } if key == "login"));
    assert_eq!(keys(&store), before);
    assert!(!store.isset("login"));

    let err = store
        .import(json!({ "mongo": { "host": "h", "login": "root" } }))
        .unwrap_err();
    assert!(
        matches!(err, ConfigError::SchemaOverrideNotAllowed { ref key } if key == "mongo.login")
    );
    assert_eq!(keys(store.get_sub("mongo").unwrap()), vec!["host"]);
}

#[test]
fn test_import_rejects_non_objects() {
    let mut store = sample();
    assert!(matches!(
        store.import(json!(42)),
        Err(ConfigError::InvalidConfigData { found: "number" })
    ));
    assert!(matches!(
        store.import(json!({ "mongo": ["localhost"] })),
        Err(ConfigError::InvalidConfigData { found: "array" })
    ));
}

#[test]
fn test_failed_import_leaves_store_unchanged() {
    let mut store = ConfigStore::new(json!({
        "a": 1,
        "b": { "c": 2 },
        "z": 3
    }))
    .unwrap();
    let before = store.export();

    // "a" and "b.c" are valid, "y" is not
    let result = store.import(json!({ "a": 10, "b": { "c": 20 }, "y": 0 }));
    assert!(matches!(
        result,
        Err(ConfigError::SchemaOverrideNotAllowed { .. })
    ));
    assert_eq!(store.export(), before);
}

#[test]
fn test_partial_import_updates_only_given_keys() {
    let mut store = ConfigStore::new(json!({
        "env": "dev",
        "log": { "level": "debug", "dir": "logs" }
    }))
    .unwrap();

    store.import(json!({ "log": { "level": "info" } })).unwrap();

    assert_eq!(
        store.export(),
        json!({
            "env": "dev",
            "log": { "level": "info", "dir": "logs" }
        })
    );
}

#[test]
fn test_undefined_path_error_message() {
    let store = sample();
    let err = store.get("mongo.login").unwrap_err();
    assert_eq!(err.to_string(), "Undefined config login for path mongo.login");
}
