use crate::foundation::error::{FolioError, FolioResult};

pub use kurbo::{BezPath, Point, Rect, Vec2};

/// Viewport (and surface) dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Create a viewport; both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> FolioResult<Self> {
        if width == 0 || height == 0 {
            return Err(FolioError::validation("viewport dimensions must be > 0"));
        }
        Ok(Self { width, height })
    }
}

/// Straight-alpha RGBA8 colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same colour with alpha taken from an opacity in `[0, 1]`.
    pub fn with_opacity(self, opacity: f64) -> Self {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { a, ..self }
    }

    /// `#rrggbb` for opaque colours, `rgba(r,g,b,a)` otherwise.
    pub fn to_css(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({},{},{},{:.3})",
                self.r,
                self.g,
                self.b,
                f64::from(self.a) / 255.0
            )
        }
    }
}

/// A rendered frame as RGBA8 pixels, tightly packed and row-major.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Flatten a premultiplied frame over an opaque background, yielding opaque straight RGBA8.
    pub fn flatten_over(&self, bg: Rgba8) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            let a = u32::from(px[3]);
            let inv = 255 - a;
            let channel = |src: u8, dst: u8| -> u8 {
                let src = if self.premultiplied {
                    u32::from(src)
                } else {
                    (u32::from(src) * a + 127) / 255
                };
                (src + (u32::from(dst) * inv + 127) / 255).min(255) as u8
            };
            out.extend_from_slice(&[
                channel(px[0], bg.r),
                channel(px[1], bg.g),
                channel(px[2], bg.b),
                255,
            ]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_rejects_zero_dimensions() {
        assert!(Viewport::new(0, 10).is_err());
        assert!(Viewport::new(10, 0).is_err());
        assert_eq!(Viewport::new(10, 20).unwrap().width, 10);
    }

    #[test]
    fn css_formatting() {
        assert_eq!(Rgba8::opaque(255, 0, 16).to_css(), "#ff0010");
        assert_eq!(Rgba8::BLACK.with_opacity(0.5).to_css(), "rgba(0,0,0,0.502)");
    }

    #[test]
    fn flatten_transparent_frame_yields_background() {
        let frame = FrameRGBA {
            width: 2,
            height: 1,
            data: vec![0; 8],
            premultiplied: true,
        };
        let out = frame.flatten_over(Rgba8::opaque(10, 20, 30));
        assert_eq!(out, vec![10, 20, 30, 255, 10, 20, 30, 255]);
    }

    #[test]
    fn flatten_opaque_pixel_wins() {
        let frame = FrameRGBA {
            width: 1,
            height: 1,
            data: vec![255, 255, 255, 255],
            premultiplied: true,
        };
        assert_eq!(frame.flatten_over(Rgba8::BLACK), vec![255, 255, 255, 255]);
    }
}
