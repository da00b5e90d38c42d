//! Thread-local context tracking for diagnostics.
//!
//! Records what the executor is doing on the current thread: the execution
//! phase, the component being processed, the formula being run and how many
//! components of the tree have been closed so far. Formulas and error
//! reporters can read it with [`current_context`].
//!
//! Traversals are single-threaded, so each one only ever touches the
//! context of the thread it runs on. Guards restore the previous value on
//! drop, which keeps nested settings (formula within component) consistent.

use std::cell::RefCell;

thread_local! {
    static CURRENT_CONTEXT: RefCell<TraversalContext> = const { RefCell::new(TraversalContext::new()) };
}

/// Snapshot of what the executor is doing on this thread.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalContext {
    pub phase: Option<ExecutionPhase>,
    /// Key of the component currently being processed
    pub current_component: Option<String>,
    /// Id of the formula currently being run
    pub current_formula: Option<String>,
    /// Components closed so far in the current traversal
    pub components_processed: usize,
    /// Components in the tree being traversed
    pub components_total: usize,
}

impl TraversalContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            current_component: None,
            current_formula: None,
            components_processed: 0,
            components_total: 0,
        }
    }
}

/// Steps of a formula execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionPhase {
    /// Checking the executor configuration
    Validation,
    /// Folding raw file data into fresh counters
    FileAggregation,
    /// Deriving measures from counters
    MeasureCreation,
    /// Merging counters into the parent level
    Propagation,
}

impl std::fmt::Display for ExecutionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::FileAggregation => write!(f, "file_aggregation"),
            Self::MeasureCreation => write!(f, "measure_creation"),
            Self::Propagation => write!(f, "propagation"),
        }
    }
}

/// RAII guard restoring the previous context on drop.
pub struct ContextGuard {
    previous: TraversalContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            let mut ctx = ctx.borrow_mut();
            // progress is monotonic within a traversal and survives guards
            let processed = ctx.components_processed;
            let total = ctx.components_total;
            *ctx = self.previous.clone();
            ctx.components_processed = processed;
            ctx.components_total = total;
        });
    }
}

fn update(f: impl FnOnce(&mut TraversalContext)) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        f(&mut ctx.borrow_mut());
        ContextGuard { previous }
    })
}

/// Set the current phase until the guard drops.
#[must_use]
pub fn set_phase(phase: ExecutionPhase) -> ContextGuard {
    update(|ctx| ctx.phase = Some(phase))
}

/// Set the component being processed until the guard drops.
#[must_use]
pub fn set_current_component(key: impl Into<String>) -> ContextGuard {
    update(|ctx| ctx.current_component = Some(key.into()))
}

/// Set the formula being run until the guard drops.
#[must_use]
pub fn set_current_formula(id: impl Into<String>) -> ContextGuard {
    update(|ctx| ctx.current_formula = Some(id.into()))
}

/// Start progress tracking for a traversal over `total` components.
pub fn start_progress(total: usize) {
    CURRENT_CONTEXT.with(|ctx| {
        let mut ctx = ctx.borrow_mut();
        ctx.components_processed = 0;
        ctx.components_total = total;
    });
}

pub fn increment_processed() {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow_mut().components_processed += 1);
}

/// Context snapshot of the current thread.
#[must_use]
pub fn current_context() -> TraversalContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// Reset the current thread's context to empty.
pub fn reset_context() {
    CURRENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = TraversalContext::new();
    });
}
