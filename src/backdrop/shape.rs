use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use kurbo::Shape as _;
use rand::Rng;

use crate::foundation::core::{BezPath, Point, Rgba8, Vec2};
use crate::theme::Theme;

pub const MIN_RADIUS: f64 = 20.0;
pub const MAX_RADIUS: f64 = 60.0;
pub const MAX_SPEED: f64 = 0.15;
pub const MIN_OPACITY: f64 = 0.02;
pub const MAX_OPACITY: f64 = 0.10;

/// Unique within one engine's lifetime; regenerated sets never reuse ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Circle, ShapeKind::Square, ShapeKind::Triangle];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BaseColor {
    Black,
    White,
}

impl BaseColor {
    pub fn rgba(self) -> Rgba8 {
        match self {
            BaseColor::Black => Rgba8::BLACK,
            BaseColor::White => Rgba8::WHITE,
        }
    }

    /// Colour actually drawn under `theme`, so shapes never match the page background.
    pub fn effective(self, theme: Theme) -> BaseColor {
        match (theme, self) {
            (Theme::Dark, BaseColor::Black) => BaseColor::White,
            (Theme::Light, BaseColor::White) => BaseColor::Black,
            (_, base) => base,
        }
    }
}

/// One decorative particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub id: ShapeId,
    pub pos: Point,
    pub radius: f64,
    pub velocity: Vec2,
    pub opacity: f64,
    pub kind: ShapeKind,
    pub base: BaseColor,
}

impl Shape {
    /// Draw a shape that fits entirely inside `width` x `height`.
    ///
    /// `max_radius` must already be clamped to the surface (see [`radius_bounds`]).
    pub fn random(
        rng: &mut impl Rng,
        id: ShapeId,
        width: f64,
        height: f64,
        max_radius: f64,
    ) -> Self {
        let radius = rng.random_range(MIN_RADIUS..=max_radius);
        let pos = Point::new(
            rng.random_range(radius..=width - radius),
            rng.random_range(radius..=height - radius),
        );
        let velocity = Vec2::new(
            rng.random_range(-MAX_SPEED..=MAX_SPEED),
            rng.random_range(-MAX_SPEED..=MAX_SPEED),
        );
        let opacity = rng.random_range(MIN_OPACITY..=MAX_OPACITY);
        let kind = ShapeKind::ALL[rng.random_range(0..ShapeKind::ALL.len())];
        let base = if rng.random_bool(0.5) {
            BaseColor::Black
        } else {
            BaseColor::White
        };

        Self {
            id,
            pos,
            radius,
            velocity,
            opacity,
            kind,
            base,
        }
    }

    /// Advance one frame: velocity plus a deterministic drift keyed on `time` and the shape's
    /// slot `index`, then reflect off the `[radius, dim - radius]` box on each axis.
    pub fn step(&mut self, index: usize, time: f64, amplitude: f64, width: f64, height: f64) {
        let i = index as f64;
        self.pos.x += self.velocity.x + (time + i).sin() * amplitude;
        self.pos.y += self.velocity.y + (time + i * 0.7).cos() * amplitude;

        reflect(&mut self.pos.x, &mut self.velocity.x, self.radius, width);
        reflect(&mut self.pos.y, &mut self.velocity.y, self.radius, height);
    }

    pub fn in_bounds(&self, width: f64, height: f64) -> bool {
        let r = self.radius;
        (r..=width - r).contains(&self.pos.x) && (r..=height - r).contains(&self.pos.y)
    }

    /// Outline inscribed in the shape's bounding circle.
    pub fn outline(&self) -> BezPath {
        match self.kind {
            ShapeKind::Circle => kurbo::Circle::new(self.pos, self.radius).to_path(0.1),
            ShapeKind::Square => polygon(self.pos, self.radius, 4, FRAC_PI_4),
            ShapeKind::Triangle => polygon(self.pos, self.radius, 3, -FRAC_PI_2),
        }
    }

    /// Stroke colour under `theme`, with the shape opacity as alpha.
    pub fn render_color(&self, theme: Theme) -> Rgba8 {
        self.base.effective(theme).rgba().with_opacity(self.opacity)
    }
}

/// `(min, max)` radius for a surface, or `None` when not even a minimum-size shape fits.
pub fn radius_bounds(width: f64, height: f64) -> Option<(f64, f64)> {
    let max = MAX_RADIUS.min(width.min(height) / 2.0);
    (max >= MIN_RADIUS).then_some((MIN_RADIUS, max))
}

fn reflect(pos: &mut f64, vel: &mut f64, radius: f64, dim: f64) {
    let (lo, hi) = (radius, dim - radius);
    if *pos < lo {
        *pos = lo;
        *vel = -*vel;
    } else if *pos > hi {
        *pos = hi;
        *vel = -*vel;
    }
}

fn polygon(center: Point, radius: f64, sides: usize, start_angle: f64) -> BezPath {
    let mut path = BezPath::new();
    for k in 0..sides {
        let a = start_angle + TAU * k as f64 / sides as f64;
        let p = center + Vec2::new(a.cos(), a.sin()) * radius;
        if k == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path.close_path();
    path
}
