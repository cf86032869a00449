// Template context structures for Askama templates, organized by page area.

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::session::{get_display_name, get_user_id, take_flash};
use crate::config::AppConfig;

mod attendance;
mod common;
mod dashboard;
mod meeting;

pub use attendance::*;
pub use common::*;
pub use dashboard::*;
pub use meeting::*;

/// Common context shared by all admin pages.
/// Templates access these as `ctx.username`, `ctx.app_name`, etc.
pub struct PageContext {
    pub username: String,
    pub avatar_initial: String,
    pub flash: Option<String>,
    pub app_name: String,
    pub csrf_token: String,
    pub current_path: String,
}

impl PageContext {
    pub fn build(session: &Session, config: &AppConfig, current_path: &str) -> Self {
        let username = get_display_name(session);
        let avatar_initial = username.chars().next().unwrap_or('?').to_uppercase().to_string();
        Self {
            username,
            avatar_initial,
            flash: take_flash(session),
            app_name: config.app_name.clone(),
            csrf_token: csrf::get_or_create_token(session),
            current_path: current_path.to_string(),
        }
    }

    /// Highlight state for the nav bar.
    pub fn is_active(&self, prefix: &str) -> bool {
        self.current_path.starts_with(prefix)
    }
}

/// Context for participant-facing pages; no login required.
pub struct PublicContext {
    pub app_name: String,
    pub csrf_token: String,
    pub is_admin: bool,
    pub flash: Option<String>,
}

impl PublicContext {
    pub fn build(session: &Session, config: &AppConfig) -> Self {
        Self {
            app_name: config.app_name.clone(),
            csrf_token: csrf::get_or_create_token(session),
            is_admin: get_user_id(session).is_some(),
            flash: take_flash(session),
        }
    }
}
