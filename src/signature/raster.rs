use super::{Signature, SignatureError, MAX_HEIGHT, MAX_WIDTH};
use super::pad::Point;

const INK: [u8; 4] = [0, 0, 0, 255];
const PAPER: [u8; 4] = [255, 255, 255, 255];
/// Half of the 2px stroke width.
const BRUSH_RADIUS: f32 = 1.0;

/// White RGBA drawing surface with round-capped black strokes.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    has_ink: bool,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self, SignatureError> {
        if width == 0 || height == 0 || width > MAX_WIDTH || height > MAX_HEIGHT {
            return Err(SignatureError::InvalidDimensions { width, height });
        }
        let mut canvas = Canvas {
            width,
            height,
            pixels: vec![0u8; (width * height * 4) as usize],
            has_ink: false,
        };
        canvas.fill_blank();
        Ok(canvas)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn has_ink(&self) -> bool {
        self.has_ink
    }

    /// Reset every pixel to the paper colour.
    pub fn fill_blank(&mut self) {
        for chunk in self.pixels.chunks_mut(4) {
            chunk.copy_from_slice(&PAPER);
        }
        self.has_ink = false;
    }

    /// RGBA value at (x, y), or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.pixels[i..i + 4]);
        Some(px)
    }

    /// Stroke a segment by stamping the round brush every half pixel.
    ///
    /// The segment is clipped to the surface first, so the work is bounded by
    /// the canvas size rather than the segment length.
    pub fn draw_line(&mut self, from: Point, to: Point) {
        let Some((from, to)) = self.clip(from, to) else {
            return;
        };
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let steps = ((dx.abs().max(dy.abs())) * 2.0).ceil().max(1.0) as u32;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.stamp(from.x + dx * t, from.y + dy * t);
        }
    }

    /// Liang-Barsky clip against the surface grown by the brush radius.
    fn clip(&self, from: Point, to: Point) -> Option<(Point, Point)> {
        let r = f64::from(BRUSH_RADIUS);
        let (x0, y0) = (f64::from(from.x), f64::from(from.y));
        let dx = f64::from(to.x) - x0;
        let dy = f64::from(to.y) - y0;
        let max_x = f64::from(self.width) + r;
        let max_y = f64::from(self.height) + r;

        let mut t0 = 0.0f64;
        let mut t1 = 1.0f64;
        for (p, q) in [(-dx, x0 + r), (dx, max_x - x0), (-dy, y0 + r), (dy, max_y - y0)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / p;
            if (p < 0.0 && t > t1) || (p > 0.0 && t < t0) {
                return None;
            }
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
        }
        let at = |t: f64| Point { x: (x0 + t * dx) as f32, y: (y0 + t * dy) as f32 };
        Some((at(t0), at(t1)))
    }

    fn stamp(&mut self, cx: f32, cy: f32) {
        let min_x = (cx - BRUSH_RADIUS).floor().max(0.0) as i64;
        let min_y = (cy - BRUSH_RADIUS).floor().max(0.0) as i64;
        let max_x = ((cx + BRUSH_RADIUS).ceil() as i64).min(self.width as i64 - 1);
        let max_y = ((cy + BRUSH_RADIUS).ceil() as i64).min(self.height as i64 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5 - cx;
                let py = y as f32 + 0.5 - cy;
                if px * px + py * py <= BRUSH_RADIUS * BRUSH_RADIUS {
                    let i = ((y as u32 * self.width + x as u32) * 4) as usize;
                    self.pixels[i..i + 4].copy_from_slice(&INK);
                    self.has_ink = true;
                }
            }
        }
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, SignatureError> {
        let mut png_data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut png_data, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_compression(png::Compression::Best);

            let mut writer = encoder
                .write_header()
                .map_err(|e| SignatureError::Encode(e.to_string()))?;
            writer
                .write_image_data(&self.pixels)
                .map_err(|e| SignatureError::Encode(e.to_string()))?;
            writer
                .finish()
                .map_err(|e| SignatureError::Encode(e.to_string()))?;
        }
        Ok(png_data)
    }

    /// Serialize to a data URL; a surface without ink yields the empty signature.
    pub fn to_signature(&self) -> Result<Signature, SignatureError> {
        if !self.has_ink {
            return Ok(Signature::empty());
        }
        Ok(Signature::from_png(&self.encode_png()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_canvas_is_blank() {
        let canvas = Canvas::new(10, 5).unwrap();
        assert!(!canvas.has_ink());
        assert_eq!(canvas.pixel(0, 0), Some(PAPER));
        assert_eq!(canvas.pixel(9, 4), Some(PAPER));
        assert_eq!(canvas.pixel(10, 0), None);
    }

    #[test]
    fn rejects_bad_dimensions() {
        assert!(Canvas::new(0, 10).is_err());
        assert!(Canvas::new(MAX_WIDTH + 1, 10).is_err());
        assert!(Canvas::new(10, MAX_HEIGHT + 1).is_err());
    }

    #[test]
    fn horizontal_line_inks_pixels_along_its_path() {
        let mut canvas = Canvas::new(40, 20).unwrap();
        canvas.draw_line(Point { x: 5.0, y: 10.0 }, Point { x: 30.0, y: 10.0 });
        assert!(canvas.has_ink());
        for x in 5..30 {
            assert_eq!(canvas.pixel(x, 10), Some(INK), "x={x}");
        }
        assert_eq!(canvas.pixel(20, 2), Some(PAPER));
        assert_eq!(canvas.pixel(35, 10), Some(PAPER));
    }

    #[test]
    fn strokes_outside_the_surface_are_clipped() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.draw_line(Point { x: -50.0, y: -50.0 }, Point { x: -20.0, y: -20.0 });
        assert!(!canvas.has_ink());
    }

    #[test]
    fn very_long_segments_are_clipped_before_stamping() {
        let mut canvas = Canvas::new(300, 150).unwrap();
        let started = std::time::Instant::now();
        canvas.draw_line(Point { x: -1e9, y: 75.0 }, Point { x: 1e9, y: 75.0 });
        canvas.draw_line(Point { x: -1e9, y: -1e9 }, Point { x: -1e9, y: 1e9 });
        assert!(started.elapsed() < std::time::Duration::from_secs(1));

        assert_eq!(canvas.pixel(0, 75), Some(INK));
        assert_eq!(canvas.pixel(299, 75), Some(INK));
        assert_eq!(canvas.pixel(150, 10), Some(PAPER));
    }

    #[test]
    fn clip_keeps_the_visible_part_of_a_crossing_segment() {
        let canvas = Canvas::new(10, 10).unwrap();
        let (a, b) = canvas
            .clip(Point { x: -20.0, y: 5.0 }, Point { x: 30.0, y: 5.0 })
            .expect("segment crosses the surface");
        assert!((a.x + BRUSH_RADIUS).abs() < 1e-3, "a={a:?}");
        assert!((b.x - 10.0 - BRUSH_RADIUS).abs() < 1e-3, "b={b:?}");
        assert_eq!((a.y, b.y), (5.0, 5.0));
        assert!(canvas.clip(Point { x: 20.0, y: 20.0 }, Point { x: 40.0, y: 20.0 }).is_none());
    }

    #[test]
    fn png_round_trips_dimensions() {
        let mut canvas = Canvas::new(32, 16).unwrap();
        canvas.draw_line(Point { x: 2.0, y: 2.0 }, Point { x: 30.0, y: 14.0 });
        let bytes = canvas.encode_png().unwrap();

        let decoder = png::Decoder::new(bytes.as_slice());
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        assert_eq!((info.width, info.height), (32, 16));
    }

    #[test]
    fn blank_canvas_serializes_to_empty() {
        let canvas = Canvas::new(32, 16).unwrap();
        assert!(canvas.to_signature().unwrap().is_empty());
    }
}
