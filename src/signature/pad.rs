use serde::Deserialize;

use super::raster::Canvas;
use super::{Signature, SignatureError, MAX_EVENTS};

/// How far past the surface edge a pointer may report before the input is rejected.
const EDGE_MARGIN: f32 = 32.0;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PadState {
    Idle,
    Drawing { last: Point },
}

/// Pointer/touch input as recorded by the browser.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PadEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
    Leave,
    Clear,
}

/// What a single event asks the caller to report.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Report {
    Nothing,
    Serialize,
    Cleared,
}

/// The signature surface and its idle/drawing state machine.
#[derive(Debug, Clone)]
pub struct SignaturePad {
    canvas: Canvas,
    state: PadState,
}

impl SignaturePad {
    pub fn new(width: u32, height: u32) -> Result<Self, SignatureError> {
        Ok(SignaturePad {
            canvas: Canvas::new(width, height)?,
            state: PadState::Idle,
        })
    }

    pub fn state(&self) -> PadState {
        self.state
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn pointer_down(&mut self, at: Point) -> Result<(), SignatureError> {
        self.step(PadEvent::Down { x: at.x, y: at.y }).map(|_| ())
    }

    pub fn pointer_move(&mut self, to: Point) -> Result<(), SignatureError> {
        self.step(PadEvent::Move { x: to.x, y: to.y }).map(|_| ())
    }

    /// Ends a stroke. Returns the serialized surface, or `None` when no stroke was in progress.
    pub fn pointer_up(&mut self) -> Result<Option<Signature>, SignatureError> {
        self.apply(PadEvent::Up)
    }

    /// Blank the surface; always reports the empty signature.
    pub fn clear(&mut self) -> Signature {
        self.canvas.fill_blank();
        self.state = PadState::Idle;
        Signature::empty()
    }

    pub fn serialize(&self) -> Result<Signature, SignatureError> {
        self.canvas.to_signature()
    }

    /// Feed one event; returns the signature the surface reports, if any.
    pub fn apply(&mut self, event: PadEvent) -> Result<Option<Signature>, SignatureError> {
        match self.step(event)? {
            Report::Nothing => Ok(None),
            Report::Serialize => self.serialize().map(Some),
            Report::Cleared => Ok(Some(Signature::empty())),
        }
    }

    /// Run a recorded event sequence and return the final signature.
    ///
    /// A stroke still in progress at the end is treated as released.
    pub fn replay(width: u32, height: u32, events: &[PadEvent]) -> Result<Signature, SignatureError> {
        if events.len() > MAX_EVENTS {
            return Err(SignatureError::TooManyEvents(events.len()));
        }
        let mut pad = SignaturePad::new(width, height)?;
        for event in events {
            pad.step(*event)?;
        }
        pad.step(PadEvent::Up)?;
        pad.serialize()
    }

    fn step(&mut self, event: PadEvent) -> Result<Report, SignatureError> {
        match event {
            PadEvent::Down { x, y } => {
                let at = self.checked_point(x, y)?;
                self.state = PadState::Drawing { last: at };
                Ok(Report::Nothing)
            }
            PadEvent::Move { x, y } => {
                let to = self.checked_point(x, y)?;
                if let PadState::Drawing { last } = self.state {
                    self.canvas.draw_line(last, to);
                    self.state = PadState::Drawing { last: to };
                }
                Ok(Report::Nothing)
            }
            PadEvent::Up | PadEvent::Leave => match self.state {
                PadState::Idle => Ok(Report::Nothing),
                PadState::Drawing { .. } => {
                    self.state = PadState::Idle;
                    Ok(Report::Serialize)
                }
            },
            PadEvent::Clear => {
                self.clear();
                Ok(Report::Cleared)
            }
        }
    }

    fn checked_point(&self, x: f32, y: f32) -> Result<Point, SignatureError> {
        let max_x = self.canvas.width() as f32 + EDGE_MARGIN;
        let max_y = self.canvas.height() as f32 + EDGE_MARGIN;
        let within = |v: f32, max: f32| v.is_finite() && (-EDGE_MARGIN..=max).contains(&v);
        if within(x, max_x) && within(y, max_y) {
            Ok(Point { x, y })
        } else {
            Err(SignatureError::InvalidPoint)
        }
    }
}

/// Payload posted by the check-in form's signature script.
#[derive(Debug, Clone, Deserialize)]
pub struct SignatureInput {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub events: Vec<PadEvent>,
}

impl SignatureInput {
    pub fn from_json(raw: &str) -> Result<Self, SignatureError> {
        serde_json::from_str(raw).map_err(|e| SignatureError::Malformed(e.to_string()))
    }

    pub fn render(&self) -> Result<Signature, SignatureError> {
        SignaturePad::replay(self.width, self.height, &self.events)
    }
}
