/// Body of buttons that only carry a CSRF token (delete, logout).
#[derive(Debug, serde::Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}
