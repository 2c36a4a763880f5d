//! Shared helpers for integration tests

#![allow(dead_code)]

use protoadapt::{Adaptable, Conformance, Protocol};
use rusqlite::Connection;
use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a fmt subscriber that writes through the test harness.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
    });
}

/// In-memory database with an `events` table taking any column affinity.
pub fn events_db() -> Connection {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    conn.execute_batch("CREATE TABLE events (id INTEGER PRIMARY KEY, at, payload, tag);")
        .expect("create events table");
    conn
}

/// A money amount stored as integer cents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Money {
    pub cents: i64,
}

impl Adaptable for Money {
    fn conform(&self, protocol: &Protocol) -> Option<Conformance> {
        if protocol == protoadapt::sql::prepare_protocol() {
            Some(Conformance::adapted(self.cents))
        } else {
            Some(Conformance::NoOpinion)
        }
    }
}
