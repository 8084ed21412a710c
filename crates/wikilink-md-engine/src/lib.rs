pub mod convert;
pub mod io;
pub mod workflow;

// Re-export key types for easier usage
pub use convert::convert;
pub use workflow::{Confirmer, Editor, Gate, Outcome, run_conversion};
