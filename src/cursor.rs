//! Custom pointer: a dot, a ring and a trailing particle, each chasing the pointer on its own
//! spring. Hidden on narrow (mobile) viewports.

use std::time::Duration;

use crate::foundation::core::{Point, Rgba8, Vec2, Viewport};
use crate::theme::Theme;

/// Widest viewport treated as a touch device; the cursor is off at or below it.
pub const MOBILE_MAX_WIDTH: u32 = 768;

/// Longest integration step; larger `dt`s are split so stiff springs stay stable.
const MAX_STEP: f64 = 1.0 / 240.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CursorLayer {
    Dot,
    Ring,
    Particle,
}

impl CursorLayer {
    /// Back to front: particle under ring under dot.
    pub const ALL: [CursorLayer; 3] = [CursorLayer::Particle, CursorLayer::Ring, CursorLayer::Dot];

    pub fn spring(self) -> Spring {
        match self {
            CursorLayer::Dot => Spring {
                stiffness: 500.0,
                damping: 28.0,
                mass: 0.5,
            },
            CursorLayer::Ring => Spring {
                stiffness: 150.0,
                damping: 15.0,
                mass: 0.8,
            },
            CursorLayer::Particle => Spring {
                stiffness: 100.0,
                damping: 20.0,
                mass: 1.0,
            },
        }
    }

    pub fn diameter(self) -> f64 {
        match self {
            CursorLayer::Dot => 16.0,
            CursorLayer::Ring => 40.0,
            CursorLayer::Particle => 4.0,
        }
    }

    /// Scale while the pointer is over something interactive.
    pub fn hover_scale(self) -> f64 {
        match self {
            CursorLayer::Dot => 1.5,
            CursorLayer::Ring => 2.0,
            CursorLayer::Particle => 1.0,
        }
    }

    pub fn opacity(self) -> f64 {
        match self {
            CursorLayer::Dot => 1.0,
            CursorLayer::Ring => 0.5,
            CursorLayer::Particle => 0.7,
        }
    }

    fn slot(self) -> usize {
        match self {
            CursorLayer::Particle => 0,
            CursorLayer::Ring => 1,
            CursorLayer::Dot => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Follower {
    pos: Point,
    vel: Vec2,
}

impl Follower {
    fn step(&mut self, target: Point, spring: Spring, h: f64) {
        let m = spring.mass.max(1e-6);
        let accel = ((target - self.pos) * spring.stiffness - self.vel * spring.damping) / m;
        self.vel += accel * h;
        self.pos += self.vel * h;
    }
}

/// One layer as it should be drawn this frame, centred on `center`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorSprite {
    pub layer: CursorLayer,
    pub center: Point,
    pub diameter: f64,
    pub color: Rgba8,
    /// Whether the ring shows its soft fill (only while hovering).
    pub filled: bool,
}

#[derive(Clone, Debug)]
pub struct Cursor {
    enabled: bool,
    pointer: Point,
    hovering: bool,
    followers: [Follower; 3],
}

impl Cursor {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            enabled: viewport.width > MOBILE_MAX_WIDTH,
            pointer: Point::ZERO,
            hovering: false,
            followers: [Follower::default(); 3],
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn position(&self, layer: CursorLayer) -> Point {
        self.followers[layer.slot()].pos
    }

    pub fn on_resize(&mut self, viewport: Viewport) {
        self.enabled = viewport.width > MOBILE_MAX_WIDTH;
        if !self.enabled {
            self.hovering = false;
        }
    }

    pub fn pointer_move(&mut self, to: Point) {
        if self.enabled && to.is_finite() {
            self.pointer = to;
        }
    }

    /// Pointer entered (`true`) or left (`false`) an interactive element.
    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = self.enabled && hovering;
    }

    pub fn step(&mut self, dt: Duration) {
        let dt = dt.as_secs_f64();
        if !self.enabled || dt <= 0.0 {
            return;
        }
        let steps = (dt / MAX_STEP).ceil().max(1.0);
        let h = dt / steps;
        for layer in CursorLayer::ALL {
            let follower = &mut self.followers[layer.slot()];
            for _ in 0..steps as u32 {
                follower.step(self.pointer, layer.spring(), h);
            }
        }
    }

    /// Layers to draw, back to front. Empty when the cursor is off.
    pub fn sprites(&self, theme: Theme) -> Vec<CursorSprite> {
        if !self.enabled {
            return Vec::new();
        }
        let ink = theme.palette().text_primary;
        CursorLayer::ALL
            .into_iter()
            .map(|layer| {
                let scale = if self.hovering { layer.hover_scale() } else { 1.0 };
                CursorSprite {
                    layer,
                    center: self.position(layer),
                    diameter: layer.diameter() * scale,
                    color: ink.with_opacity(layer.opacity()),
                    filled: layer == CursorLayer::Ring && self.hovering,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop() -> Cursor {
        Cursor::new(Viewport::new(1280, 800).unwrap())
    }

    #[test]
    fn off_at_and_below_mobile_width() {
        assert!(!Cursor::new(Viewport::new(768, 1024).unwrap()).is_enabled());
        assert!(Cursor::new(Viewport::new(769, 1024).unwrap()).is_enabled());

        let mut c = desktop();
        c.set_hovering(true);
        c.on_resize(Viewport::new(400, 800).unwrap());
        assert!(!c.is_enabled());
        assert!(!c.is_hovering());
        assert!(c.sprites(Theme::Dark).is_empty());
    }

    #[test]
    fn layers_settle_on_the_pointer() {
        let mut c = desktop();
        c.pointer_move(Point::new(300.0, 200.0));
        for _ in 0..180 {
            c.step(Duration::from_millis(16));
        }
        for layer in CursorLayer::ALL {
            let d = c.position(layer).distance(Point::new(300.0, 200.0));
            assert!(d < 0.5, "{layer:?} is {d}px away");
        }
    }

    #[test]
    fn dot_leads_the_trail() {
        let mut c = desktop();
        c.pointer_move(Point::new(500.0, 0.0));
        c.step(Duration::from_millis(50));
        let dot = c.position(CursorLayer::Dot).x;
        let ring = c.position(CursorLayer::Ring).x;
        let particle = c.position(CursorLayer::Particle).x;
        assert!(dot > ring && ring > particle, "{dot} {ring} {particle}");
    }

    #[test]
    fn hover_grows_dot_and_ring() {
        let mut c = desktop();
        c.set_hovering(true);
        let sprites = c.sprites(Theme::Dark);
        let by = |layer| sprites.iter().find(|s| s.layer == layer).unwrap();
        assert_eq!(by(CursorLayer::Dot).diameter, 24.0);
        assert_eq!(by(CursorLayer::Ring).diameter, 80.0);
        assert!(by(CursorLayer::Ring).filled);
        assert_eq!(by(CursorLayer::Particle).diameter, 4.0);
    }

    #[test]
    fn colour_follows_theme() {
        let c = desktop();
        let dot = |theme| c.sprites(theme)[2];
        assert_eq!(dot(Theme::Dark).color, Rgba8::WHITE);
        assert_eq!(dot(Theme::Light).color, Rgba8::BLACK);
        assert_eq!(c.sprites(Theme::Dark)[1].color.a, 128);
    }
}
