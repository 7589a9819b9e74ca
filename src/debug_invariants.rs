//! Invariant checks for the read-only inputs of a detection run.
//!
//! Meshes and drainage polylines are built once and never mutated, so their
//! invariants only need checking at construction. Release builds skip the
//! assertion unless `strict-invariants` or `check-invariants` is enabled.

use crate::bowl_error::BowlError;

/// Structures whose internal consistency can be validated.
pub trait DebugInvariants {
    /// Validate invariants and return the first violation found.
    fn validate_invariants(&self) -> Result<(), BowlError>;

    /// Panic on the first violation when invariant checking is enabled.
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "debug_assert_invariants");
    }
}

/// Run a fallible check and panic with context on error when invariant
/// checking is enabled. A no-op otherwise.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[terrain-bowls invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
