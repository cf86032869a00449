//! Freehand signature capture.
//!
//! The browser records pointer events on its drawing surface and posts them as
//! JSON; [`SignaturePad::replay`] runs them through the same state machine the
//! surface follows and produces the PNG data URL that is stored with the
//! attendance record.

pub mod pad;
pub mod raster;

pub use pad::{PadEvent, PadState, Point, SignatureInput, SignaturePad};
pub use raster::Canvas;

use base64::Engine;

pub const MAX_WIDTH: u32 = 1200;
pub const MAX_HEIGHT: u32 = 600;
pub const MAX_EVENTS: usize = 20_000;

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

#[derive(Debug, Clone, PartialEq)]
pub enum SignatureError {
    InvalidDimensions { width: u32, height: u32 },
    TooManyEvents(usize),
    InvalidPoint,
    Malformed(String),
    Encode(String),
}

impl std::fmt::Display for SignatureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignatureError::InvalidDimensions { width, height } => {
                write!(f, "Invalid signature surface size {width}x{height}")
            }
            SignatureError::TooManyEvents(n) => write!(f, "Signature has too many points ({n})"),
            SignatureError::InvalidPoint => write!(f, "Signature contains an invalid point"),
            SignatureError::Malformed(e) => write!(f, "Malformed signature data: {e}"),
            SignatureError::Encode(e) => write!(f, "Signature encoding failed: {e}"),
        }
    }
}

impl std::error::Error for SignatureError {}

/// A serialized signature: a PNG data URL, or empty when nothing was drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature(String);

impl Signature {
    pub fn empty() -> Self {
        Signature(String::new())
    }

    pub fn from_png(png: &[u8]) -> Self {
        let encoded = base64::engine::general_purpose::STANDARD.encode(png);
        Signature(format!("{PNG_DATA_URL_PREFIX}{encoded}"))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the PNG bytes back out of the data URL.
    pub fn png_bytes(&self) -> Option<Vec<u8>> {
        let encoded = self.0.strip_prefix(PNG_DATA_URL_PREFIX)?;
        base64::engine::general_purpose::STANDARD.decode(encoded).ok()
    }
}
