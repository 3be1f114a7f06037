//! # Reconciliation
//!
//! Decide-and-apply cycle for one display root: compare the fresh snapshot
//! with what the root currently shows, leave it alone when nothing changed,
//! otherwise replace the rendered content through the visible status phases.
//!
//! - **`controller`**: the phase state machine and the per-root cycle
//! - **`status`**: the optional status indicator
//! - **`controls`**: keeps the category dropdown and the allergen grid in
//!   line with the current vocabulary
//! - **`delay`**: injectable pacing for the status phases

pub mod controller;
pub mod controls;
pub mod delay;
pub mod status;

pub use controller::{CycleReport, Outcome, Phase, ReconcileOptions, StatusPhases, reconcile_root};
pub use delay::{Delay, NoDelay, PhaseTiming, RecordingDelay, ThreadSleep};
pub use status::StatusIndicator;
