//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between the emission logic and the
//! outside world (the network and the local filesystem).
//!
//! Implementations live in the `adapters` module.
//!
//! ## Design Principle
//!
//! The emitter depends only on these traits, never on concrete
//! implementations, so tests can swap in sinks that always fail and spools
//! that record what they were given.

mod sink;
mod spool_store;

pub use sink::{AttestationSink, DeliveryError};
pub use spool_store::{SpoolError, SpoolStore};
