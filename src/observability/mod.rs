//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging through `tracing`; no logger objects are global
//! - Each middleware logs under an injectable span (`with_span`)
//! - Ignored paths log at info, insecure requests at warn

pub mod logging;

pub use logging::init_tracing;
