/// Meeting CRUD handlers, split by operation:
/// - `create.rs`: GET new form, POST create
/// - `read.rs`: GET detail view and its live-update socket
/// - `update.rs`: GET edit form, POST update
/// - `delete.rs`: POST delete
/// - `forms.rs` / `helpers.rs`: shared form types and validation
pub mod create;
pub mod delete;
pub mod forms;
pub mod helpers;
pub mod read;
pub mod update;

pub use create::{create, new_form};
pub use delete::delete;
pub use forms::CsrfOnly;
pub use read::{detail, detail_ws};
pub use update::{edit_form, update};
