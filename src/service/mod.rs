//! Service module containing the options translator and its configuration.
//!
//! - `service` - [`Service`] with translation and dispatch logic
//! - `builder` - [`ServiceBuilder`] for configuring a service
//! - `config` - [`ServiceConfig`] and its defaults

pub mod builder;
pub mod config;
pub mod service;

pub use builder::ServiceBuilder;
pub use config::ServiceConfig;
pub use service::{Prepared, Service};
