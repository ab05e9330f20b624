use kurbo::Shape as _;

use crate::{
    foundation::core::{BezPath, FrameRGBA, Rect, Rgba8, Viewport},
    foundation::error::{FolioError, FolioResult},
    render::{
        BlurFilter, Painter,
        blur::{GaussianBlur, PixelRegion},
    },
};

/// Stroke flattening tolerance in pixels.
const STROKE_TOLERANCE: f64 = 0.1;

struct PendingStroke {
    outline: vello_cpu::kurbo::BezPath,
    color: Rgba8,
}

/// CPU raster painter backed by `vello_cpu`.
///
/// Strokes are expanded to fill outlines with `kurbo`, rasterized on [`Painter::present`], and
/// the frame's blur filter is applied to the area the strokes cover. The blur kernel survives
/// across frames until the filter changes.
pub struct CpuPainter {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
    filter: BlurFilter,
    blur: Option<GaussianBlur>,
    pending: Vec<PendingStroke>,
    ink: Option<Rect>,
}

impl CpuPainter {
    pub fn new(viewport: Viewport) -> FolioResult<Self> {
        let (width, height) = surface_dims(viewport)?;
        Ok(Self {
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
            filter: BlurFilter::NONE,
            blur: None,
            pending: Vec::new(),
            ink: None,
        })
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: u32::from(self.width),
            height: u32::from(self.height),
        }
    }
}

impl Painter for CpuPainter {
    fn resize(&mut self, viewport: Viewport) -> FolioResult<()> {
        let (width, height) = surface_dims(viewport)?;
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixmap = vello_cpu::Pixmap::new(width, height);
        }
        self.pending.clear();
        self.ink = None;
        Ok(())
    }

    fn clear(&mut self) {
        self.pending.clear();
        self.ink = None;
        self.filter = BlurFilter::NONE;
        clear_pixmap(&mut self.pixmap, [0, 0, 0, 0]);
    }

    fn set_blur(&mut self, filter: BlurFilter) {
        self.filter = filter;
    }

    fn stroke_path(&mut self, path: &BezPath, color: Rgba8, width: f64) -> FolioResult<()> {
        if !width.is_finite() || width <= 0.0 {
            return Err(FolioError::validation("stroke width must be > 0"));
        }
        let outline = kurbo::stroke(
            path.iter(),
            &kurbo::Stroke::new(width),
            &kurbo::StrokeOpts::default(),
            STROKE_TOLERANCE,
        );
        let bounds = outline.bounding_box();
        self.ink = Some(self.ink.map_or(bounds, |ink| ink.union(bounds)));
        self.pending.push(PendingStroke {
            outline: bezpath_to_cpu(&outline),
            color,
        });
        Ok(())
    }

    fn present(&mut self) -> FolioResult<()> {
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        for stroke in self.pending.drain(..) {
            let c = stroke.color;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
            ctx.fill_path(&stroke.outline);
        }
        ctx.flush();
        clear_pixmap(&mut self.pixmap, [0, 0, 0, 0]);
        ctx.render_to_pixmap(&mut self.pixmap);

        let ink = self.ink.take();
        if let Some(ink) = ink.filter(|_| self.filter.radius_px > 0) {
            let (width, height) = (u32::from(self.width), u32::from(self.height));
            let region = PixelRegion::covering(ink, width, height);
            if !matches!(&self.blur, Some(b) if b.filter() == self.filter) {
                self.blur = Some(GaussianBlur::new(self.filter)?);
            }
            if let Some(blur) = self.blur.as_mut() {
                blur.apply(self.pixmap.data_as_u8_slice_mut(), width, height, region)?;
            }
        }
        Ok(())
    }

    fn snapshot(&self) -> Option<FrameRGBA> {
        Some(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn surface_dims(viewport: Viewport) -> FolioResult<(u16, u16)> {
    let width: u16 = viewport
        .width
        .try_into()
        .map_err(|_| FolioError::render("surface width exceeds u16"))?;
    let height: u16 = viewport
        .height
        .try_into()
        .map_err(|_| FolioError::render("surface height exceeds u16"))?;
    if width == 0 || height == 0 {
        return Err(FolioError::render("surface dimensions must be > 0"));
    }
    Ok((width, height))
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
