//! Observability infrastructure: tracing setup and traversal context.
//!
//! Library code logs through `tracing`; hosts that do not install their
//! own subscriber can call [`init_tracing`]. The thread-local context tells
//! diagnostics which component and formula were being processed.
//!
//! ```ignore
//! use measuretree::observability::{current_context, init_tracing};
//!
//! init_tracing();
//! // inside a formula
//! let ctx = current_context();
//! tracing::debug!(component = ?ctx.current_component, "deriving measure");
//! ```

pub mod context;

pub use context::{
    current_context, increment_processed, reset_context, set_current_component,
    set_current_formula, set_phase, start_progress, ContextGuard, ExecutionPhase,
    TraversalContext,
};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a fmt subscriber filtered by `RUST_LOG`.
///
/// Does nothing when a global subscriber is already set, so it is safe to
/// call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .try_init();
}
