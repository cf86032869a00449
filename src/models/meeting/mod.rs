pub mod filter;
pub mod queries;
pub mod status;
pub mod types;

pub use filter::{filter_options, DateBucket, Filterable, MeetingFilter};
pub use queries::*;
pub use status::{derive_status, effective_status, local_now, MeetingStatus, MeetingWindow};
pub use types::*;
