use crate::foundation::core::Rect;
use crate::foundation::error::{FolioError, FolioResult};
use crate::render::BlurFilter;

/// Fixed-point one in Q16.
const ONE: u32 = 1 << 16;

/// Pixel rectangle `[x0, x1) × [y0, y1)` on a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRegion {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl PixelRegion {
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x0: 0,
            y0: 0,
            x1: width,
            y1: height,
        }
    }

    /// Smallest region holding every pixel `rect` can touch once antialiased, clipped to the
    /// surface. Non-finite rectangles cover the whole surface.
    pub fn covering(rect: Rect, width: u32, height: u32) -> Self {
        if ![rect.x0, rect.y0, rect.x1, rect.y1]
            .iter()
            .all(|v| v.is_finite())
        {
            return Self::full(width, height);
        }
        let rect = rect.abs();
        let lo = |v: f64, max: u32| (v.floor() - 1.0).clamp(0.0, f64::from(max)) as u32;
        let hi = |v: f64, max: u32| (v.ceil() + 1.0).clamp(0.0, f64::from(max)) as u32;
        Self {
            x0: lo(rect.x0, width),
            y0: lo(rect.y0, height),
            x1: hi(rect.x1, width),
            y1: hi(rect.y1, height),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }

    fn grow(self, by: u32, width: u32, height: u32) -> Self {
        Self {
            x0: self.x0.saturating_sub(by),
            y0: self.y0.saturating_sub(by),
            x1: self.x1.saturating_add(by).min(width),
            y1: self.y1.saturating_add(by).min(height),
        }
    }
}

/// Separable Gaussian blur over premultiplied RGBA8, with its Q16 kernel and intermediate
/// buffer kept between frames.
///
/// Weights are renormalized after quantization so a constant image is left untouched. Edges
/// repeat the outermost surface pixel.
#[derive(Clone, Debug)]
pub struct GaussianBlur {
    filter: BlurFilter,
    kernel: Vec<u32>,
    scratch: Vec<u8>,
}

impl GaussianBlur {
    pub fn new(filter: BlurFilter) -> FolioResult<Self> {
        Ok(Self {
            filter,
            kernel: q16_kernel(filter)?,
            scratch: Vec::new(),
        })
    }

    pub fn filter(&self) -> BlurFilter {
        self.filter
    }

    pub fn radius(&self) -> u32 {
        self.filter.radius_px
    }

    /// Blur `buf` in place. Pixels outside `ink` must be fully transparent; only `ink` grown by
    /// the radius is touched.
    pub fn apply(
        &mut self,
        buf: &mut [u8],
        width: u32,
        height: u32,
        ink: PixelRegion,
    ) -> FolioResult<()> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| FolioError::render("blur buffer size overflow"))?;
        if buf.len() != len {
            return Err(FolioError::render(format!(
                "blur buffer holds {} bytes, {width}x{height} needs {len}",
                buf.len()
            )));
        }
        let area = ink.grow(self.radius(), width, height);
        if self.radius() == 0 || area.is_empty() {
            return Ok(());
        }
        if self.scratch.len() != len {
            self.scratch.resize(len, 0);
        }

        let r = self.radius() as i64;
        let (w, h) = (i64::from(width), i64::from(height));
        let at = |x: i64, y: i64| (y * w + x) as usize * 4;

        // Rows: surface -> scratch, over the grown area only.
        let src: &[u8] = buf;
        for y in i64::from(area.y0)..i64::from(area.y1) {
            for x in i64::from(area.x0)..i64::from(area.x1) {
                let px = convolve(&self.kernel, |tap| {
                    let sx = (x + tap as i64 - r).clamp(0, w - 1);
                    pixel(src, at(sx, y))
                });
                let o = at(x, y);
                self.scratch[o..o + 4].copy_from_slice(&px);
            }
        }

        // Columns: scratch -> surface. Rows outside the area had no ink, so they read as zero.
        let rows = i64::from(area.y0)..i64::from(area.y1);
        for y in rows.clone() {
            for x in i64::from(area.x0)..i64::from(area.x1) {
                let px = convolve(&self.kernel, |tap| {
                    let sy = (y + tap as i64 - r).clamp(0, h - 1);
                    if rows.contains(&sy) {
                        pixel(&self.scratch, at(x, sy))
                    } else {
                        [0; 4]
                    }
                });
                let o = at(x, y);
                buf[o..o + 4].copy_from_slice(&px);
            }
        }
        Ok(())
    }
}

fn pixel(buf: &[u8], i: usize) -> [u8; 4] {
    [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
}

/// Weighted sum of the kernel's taps, rounded back to 8 bits per channel.
fn convolve(kernel: &[u32], tap: impl Fn(usize) -> [u8; 4]) -> [u8; 4] {
    let mut sum = [0u64; 4];
    for (i, &weight) in kernel.iter().enumerate() {
        let src = tap(i);
        for (acc, v) in sum.iter_mut().zip(src) {
            *acc += u64::from(weight) * u64::from(v);
        }
    }
    sum.map(|acc| ((acc + u64::from(ONE / 2)) >> 16).min(255) as u8)
}

/// Symmetric kernel of `2r + 1` Q16 weights summing to exactly [`ONE`].
fn q16_kernel(filter: BlurFilter) -> FolioResult<Vec<u32>> {
    let r = filter.radius_px as usize;
    if r == 0 {
        return Ok(vec![ONE]);
    }
    if !filter.sigma.is_finite() || filter.sigma <= 0.0 {
        return Err(FolioError::validation("blur sigma must be > 0"));
    }

    let two_var = 2.0 * f64::from(filter.sigma).powi(2);
    let half: Vec<f64> = (0..=r)
        .map(|d| (-((d * d) as f64) / two_var).exp())
        .collect();
    let total = half[0] + 2.0 * half[1..].iter().sum::<f64>();

    let mut kernel: Vec<u32> = half[1..]
        .iter()
        .rev()
        .chain(&half)
        .map(|w| (w / total * f64::from(ONE)).round() as u32)
        .collect();
    let quantized: i64 = kernel.iter().map(|&w| i64::from(w)).sum();
    kernel[r] = (i64::from(kernel[r]) + i64::from(ONE) - quantized).max(0) as u32;
    Ok(kernel)
}
