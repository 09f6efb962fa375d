//! Tracing support for discovery.
//!
//! Discovery emits `tracing` events and spans (`nexus.discover`,
//! `nexus.scan`); any subscriber can consume them. Enable the `subscriber`
//! feature for a ready-made console subscriber:
//!
//! ```toml
//! nexus-plugins = { version = "0.1", features = ["subscriber"] }
//! ```
//!
//! ```rust,ignore
//! nexus_plugins::observability::init_tracing_subscriber("nexus_plugins=debug")?;
//! ```

mod spans;
#[cfg(feature = "subscriber")]
mod subscriber;

pub use spans::{DiscoverySpan, scan_span};
#[cfg(feature = "subscriber")]
pub use subscriber::{SubscriberError, init_tracing_subscriber};
