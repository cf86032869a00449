pub mod lateness;
pub mod queries;
pub mod types;

pub use lateness::{CheckInWindow, Lateness};
pub use queries::*;
pub use types::*;
