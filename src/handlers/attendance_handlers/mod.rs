//! Participant-facing pages: the public meeting list and the check-in flow.

pub mod form;
pub mod helpers;
pub mod list;
pub mod submit;
pub mod ws;

pub use form::{done, form};
pub use list::list;
pub use submit::submit;
pub use ws::schedule_ws;
