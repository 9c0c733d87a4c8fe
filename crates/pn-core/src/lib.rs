//! pn-core: shared foundation for pipenet.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - ids (1-based pipe identifiers for the fixed network)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{PnError, PnResult};
pub use ids::*;
pub use numeric::*;
