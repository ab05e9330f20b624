use rand::Rng;

use crate::backdrop::shape::{Shape, ShapeId, radius_bounds};
use crate::foundation::core::Viewport;

/// Number of shapes for a viewport width.
pub fn shape_count_for_width(width: u32) -> usize {
    match width {
        0..480 => 4,
        480..768 => 6,
        768..1024 => 8,
        _ => 10,
    }
}

/// The drawable region and the shapes living on it.
#[derive(Clone, Debug)]
pub struct Surface {
    width: u32,
    height: u32,
    shapes: Vec<Shape>,
}

impl Surface {
    /// Size to `viewport` and populate a fresh shape set.
    ///
    /// `next_id` is advanced past every id handed out.
    pub fn populate(viewport: Viewport, rng: &mut impl Rng, next_id: &mut u64) -> Self {
        let (w, h) = (f64::from(viewport.width), f64::from(viewport.height));
        let shapes = match radius_bounds(w, h) {
            Some((_, max_radius)) => (0..shape_count_for_width(viewport.width))
                .map(|_| {
                    let id = ShapeId(*next_id);
                    *next_id += 1;
                    Shape::random(rng, id, w, h, max_radius)
                })
                .collect(),
            None => {
                tracing::debug!(
                    width = viewport.width,
                    height = viewport.height,
                    "surface too small for shapes"
                );
                Vec::new()
            }
        };

        Self {
            width: viewport.width,
            height: viewport.height,
            shapes,
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width,
            height: self.height,
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Advance every shape by one frame at global time `time`.
    pub fn step(&mut self, time: f64, amplitude: f64) {
        let (w, h) = (f64::from(self.width), f64::from(self.height));
        for (index, shape) in self.shapes.iter_mut().enumerate() {
            shape.step(index, time, amplitude, w, h);
        }
    }

    pub fn all_in_bounds(&self) -> bool {
        let (w, h) = (f64::from(self.width), f64::from(self.height));
        self.shapes.iter().all(|s| s.in_bounds(w, h))
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn breakpoints() {
        for (w, n) in [
            (1, 4),
            (320, 4),
            (479, 4),
            (480, 6),
            (767, 6),
            (768, 8),
            (1023, 8),
            (1024, 10),
            (3840, 10),
        ] {
            assert_eq!(shape_count_for_width(w), n, "width {w}");
        }
    }

    #[test]
    fn populate_matches_viewport_and_count() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut next = 0;
        let s = Surface::populate(Viewport::new(800, 600).unwrap(), &mut rng, &mut next);
        assert_eq!(s.viewport(), Viewport::new(800, 600).unwrap());
        assert_eq!(s.shapes().len(), 8);
        assert_eq!(next, 8);
        assert!(s.all_in_bounds());
    }

    #[test]
    fn tiny_surface_has_no_shapes() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut next = 0;
        let s = Surface::populate(Viewport::new(300, 30).unwrap(), &mut rng, &mut next);
        assert!(s.shapes().is_empty());
        assert_eq!(next, 0);
    }

    #[test]
    fn boundary_holds_over_long_runs() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut next = 0;
        // Narrow surface so reflections happen constantly.
        let mut s = Surface::populate(Viewport::new(130, 45).unwrap(), &mut rng, &mut next);
        assert_eq!(s.shapes().len(), 4);
        let mut time = 0.0;
        for _ in 0..20_000 {
            time += 0.01;
            s.step(time, 0.1);
            assert!(s.all_in_bounds());
        }
    }
}
