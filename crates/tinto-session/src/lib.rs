//! Tinto session — the stateful engine above tinto-core.
//!
//! [`EditSession`] owns the canonical source buffer, the current
//! derived buffer, the live adjustment vector, and a bounded undo
//! history. Slider changes are coalesced through two explicit
//! [`Debounce`] windows so a drag burst produces exactly one recompute
//! and one history entry.

pub mod debounce;
pub mod history;
pub mod session;

pub use debounce::Debounce;
pub use history::{History, Snapshot};
pub use session::{EditSession, TickOutcome};
