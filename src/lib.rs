//! Singlish to Sinhala transliteration engine.
//!
//! Re-exports the conversion core and adds the pieces a long-lived host
//! needs: a background conversion worker and optional trace logging.

pub mod async_worker;
pub mod trace_init;

pub use async_worker::{ConversionWorker, WorkerResult};
pub use singlish_core::*;
pub use trace_init::init_tracing;
