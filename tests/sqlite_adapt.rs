//! Binding adapted values through a real SQLite connection
//!
//! Run with: `cargo test --test sqlite_adapt`

mod common;

use chrono::NaiveDate;
use common::{events_db, init_tracing, Money};
use protoadapt::sql::{adapt_params, bind_named, bind_parameters, prepare_protocol, BindError};
use protoadapt::{AdapterRegistry, RegistryConfig, Value};
use rusqlite::params_from_iter;
use uuid::Uuid;

fn registry_with_defaults() -> AdapterRegistry {
    RegistryConfig::default().build().expect("build registry")
}

#[test]
fn default_adapters_store_iso_text() {
    init_tracing();
    let registry = registry_with_defaults();
    let conn = events_db();

    let at = NaiveDate::from_ymd_opt(2023, 7, 14)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    let tag = Uuid::nil();
    let mut stmt = conn
        .prepare("INSERT INTO events (at, payload, tag) VALUES (?1, ?2, ?3)")
        .unwrap();
    bind_parameters(
        &registry,
        &mut stmt,
        &[
            Value::new(at),
            Value::new(serde_json::json!({"kind": "deploy"})),
            Value::new(tag),
        ],
    )
    .unwrap();
    assert_eq!(stmt.raw_execute().unwrap(), 1);

    let (at, payload, tag): (String, String, String) = conn
        .query_row("SELECT at, payload, tag FROM events", [], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })
        .unwrap();
    assert_eq!(at, "2023-07-14 09:30:00");
    assert_eq!(payload, r#"{"kind":"deploy"}"#);
    assert_eq!(tag, "00000000-0000-0000-0000-000000000000");
}

#[test]
fn conforming_values_bind_through_params_from_iter() {
    init_tracing();
    let registry = AdapterRegistry::new();
    let conn = events_db();

    let values = adapt_params(
        &registry,
        &[Value::new(Money { cents: 1250 }), Value::new("refund")],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO events (payload, tag) VALUES (?1, ?2)",
        params_from_iter(values),
    )
    .unwrap();

    let cents: i64 = conn
        .query_row("SELECT payload FROM events WHERE tag = 'refund'", [], |row| row.get(0))
        .unwrap();
    assert_eq!(cents, 1250);
}

#[test]
fn registered_adapter_beats_conform() {
    init_tracing();
    let registry = AdapterRegistry::new();
    registry
        .register_fn::<Money, _>(prepare_protocol(), |m| {
            Ok(Value::new(format!("${}.{:02}", m.cents / 100, m.cents % 100)))
        })
        .unwrap();
    let conn = events_db();

    let mut stmt = conn.prepare("INSERT INTO events (payload) VALUES (:amount)").unwrap();
    bind_named(&registry, &mut stmt, &[("amount", Value::new(Money { cents: 1205 }))]).unwrap();
    stmt.raw_execute().unwrap();

    let text: String = conn
        .query_row("SELECT payload FROM events", [], |row| row.get(0))
        .unwrap();
    assert_eq!(text, "$12.05");
}

#[test]
fn unadaptable_value_is_rejected_before_execution() {
    init_tracing();

    #[derive(Debug)]
    struct Unbindable;
    impl protoadapt::Adaptable for Unbindable {}

    let registry = registry_with_defaults();
    let conn = events_db();
    let mut stmt = conn
        .prepare("INSERT INTO events (payload, tag) VALUES (?, ?)")
        .unwrap();

    let err = bind_parameters(
        &registry,
        &mut stmt,
        &[Value::new("ok"), Value::new(Unbindable)],
    )
    .unwrap_err();
    assert!(matches!(err, BindError::Unsupported { index: 2, .. }));
    assert!(err.to_string().starts_with("error binding parameter 2"));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn global_registry_serves_concurrent_binders() {
    init_tracing();
    let registry = AdapterRegistry::global();
    registry
        .register_fn::<Money, _>(prepare_protocol(), |m| Ok(Value::new(m.cents)))
        .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let values =
                    adapt_params(AdapterRegistry::global(), &[Value::new(Money { cents: i })])
                        .unwrap();
                assert_eq!(values, vec![rusqlite::types::Value::Integer(i)]);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
