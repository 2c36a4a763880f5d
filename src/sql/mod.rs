//! SQLite parameter adaptation
//!
//! Values bound as statement parameters are adapted to the prepare
//! protocol before binding. Register converters for it to teach the
//! binder about new types.

mod bind;
mod defaults;
mod error;

pub use bind::{adapt_param, adapt_params, bind_named, bind_parameters, to_sql_value};
pub use defaults::{iso_datetime, register_default_adapters};
pub use error::{BindError, BindResult};

use crate::registry::Protocol;
use std::sync::OnceLock;

static PREPARE_PROTOCOL: OnceLock<Protocol> = OnceLock::new();

/// The protocol for "bindable as an SQLite parameter".
pub fn prepare_protocol() -> &'static Protocol {
    PREPARE_PROTOCOL.get_or_init(|| Protocol::new("PrepareProtocol"))
}
