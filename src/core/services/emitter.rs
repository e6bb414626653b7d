//! Emission orchestration
//!
//! build -> deliver -> on failure spool. The path is total: every call ends
//! in an [`EmitOutcome`] and nothing is ever raised back to the caller.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use serde::Serialize;

use crate::core::models::{AttestationBuilder, AttestationRecord, EmitOutcome};
use crate::core::ports::{AttestationSink, SpoolStore};

/// Name of threads spawned by [`Emitter::emit_detached`]
///
/// Fixed rather than derived from the request id, which may contain bytes
/// a thread name cannot hold.
pub const EMIT_THREAD_NAME: &str = "poe-emit";

/// Emits attestations through a sink, spooling the ones it rejects
///
/// Holds no mutable state. Share it behind an `Arc` and call it from as many
/// request threads as needed.
#[derive(Debug)]
pub struct Emitter<S, P> {
    builder: AttestationBuilder,
    sink: S,
    spool: P,
}

impl<S: AttestationSink, P: SpoolStore> Emitter<S, P> {
    /// Compose an emitter from its three parts
    #[must_use]
    pub const fn new(builder: AttestationBuilder, sink: S, spool: P) -> Self {
        Self {
            builder,
            sink,
            spool,
        }
    }

    /// The record builder
    #[must_use]
    pub const fn builder(&self) -> &AttestationBuilder {
        &self.builder
    }

    /// Attest one request and block until it is delivered or spooled
    ///
    /// Blocks for at most the sink's timeout plus the spool write.
    pub fn emit<I, O>(&self, req_id: &str, input: &I, output: &O) -> EmitOutcome
    where
        I: Serialize + ?Sized,
        O: Serialize + ?Sized,
    {
        self.dispatch(&self.builder.build(req_id, input, output))
    }

    /// Deliver an already built record, spooling it if delivery fails
    pub fn dispatch(&self, record: &AttestationRecord) -> EmitOutcome {
        let req_id = record.req_id.as_str();
        let delivery = match self.sink.deliver(record) {
            Ok(()) => {
                log::debug!("poe {req_id}: delivered");
                return EmitOutcome::Delivered;
            },
            Err(e) => e,
        };

        match self.spool.write(record) {
            Ok(path) => {
                log::warn!("poe {req_id}: delivery failed ({delivery}), spooled to {}", path.display());
                EmitOutcome::Spooled(path)
            },
            Err(e) => {
                log::error!("poe {req_id}: delivery failed ({delivery}) and spooling failed ({e})");
                EmitOutcome::Lost(format!("delivery: {delivery}; spool: {e}"))
            },
        }
    }
}

impl<S, P> Emitter<S, P>
where
    S: AttestationSink + 'static,
    P: SpoolStore + 'static,
{
    /// Attest one request without blocking the caller
    ///
    /// The record is built on the calling thread, so `input` and `output`
    /// only need to live for the duration of this call. Delivery and
    /// spooling run on a dedicated thread whose handle is returned. If no
    /// thread can be spawned the emission runs inline and `None` is returned.
    pub fn emit_detached<I, O>(
        self: &Arc<Self>,
        req_id: &str,
        input: &I,
        output: &O,
    ) -> Option<JoinHandle<EmitOutcome>>
    where
        I: Serialize + ?Sized,
        O: Serialize + ?Sized,
    {
        let record = self.builder.build(req_id, input, output);
        let emitter = Arc::clone(self);
        let spawned = thread::Builder::new()
            .name(EMIT_THREAD_NAME.to_string())
            .spawn({
                let record = record.clone();
                move || emitter.dispatch(&record)
            });

        match spawned {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::warn!("poe {req_id}: cannot spawn emitter thread ({e}), emitting inline");
                self.dispatch(&record);
                None
            },
        }
    }
}
