//! Animated canvas background: a low-opacity field of outlined shapes drifting behind the page.

pub mod engine;
pub mod field;
pub mod shape;

use crate::foundation::error::{FolioError, FolioResult};
use crate::render::BlurFilter;

/// Largest accepted blur radius, in pixels.
pub const MAX_BLUR_RADIUS: u32 = 64;

/// Tunables for the backdrop animation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BackdropSettings {
    /// Peak per-frame offset of the sinusoidal drift, in pixels.
    pub drift_amplitude: f64,
    /// Increment of the global time counter per frame.
    pub time_step: f64,
    pub blur: BlurFilter,
    pub stroke_width: f64,
    /// Fixed seed for a reproducible field; entropy-seeded when `None`.
    pub seed: Option<u64>,
}

impl Default for BackdropSettings {
    fn default() -> Self {
        Self {
            drift_amplitude: 0.1,
            time_step: 0.01,
            blur: BlurFilter::default(),
            stroke_width: 1.0,
            seed: None,
        }
    }
}

impl BackdropSettings {
    /// Reject values that would stall the clock or fail the first frame.
    pub fn validate(&self) -> FolioResult<()> {
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(FolioError::validation(format!(
                "time_step must be > 0 (got {})",
                self.time_step
            )));
        }
        if !self.drift_amplitude.is_finite() || self.drift_amplitude < 0.0 {
            return Err(FolioError::validation(format!(
                "drift_amplitude must be finite and >= 0 (got {})",
                self.drift_amplitude
            )));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(FolioError::validation(format!(
                "stroke_width must be > 0 (got {})",
                self.stroke_width
            )));
        }
        let blur = self.blur;
        if blur.radius_px > MAX_BLUR_RADIUS {
            return Err(FolioError::validation(format!(
                "blur radius_px must be <= {MAX_BLUR_RADIUS} (got {})",
                blur.radius_px
            )));
        }
        if blur.radius_px > 0 && (!blur.sigma.is_finite() || blur.sigma <= 0.0) {
            return Err(FolioError::validation(format!(
                "blur sigma must be > 0 (got {})",
                blur.sigma
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_fill_missing_fields_with_defaults() {
        let s: BackdropSettings = serde_json::from_str(r#"{ "seed": 5 }"#).unwrap();
        assert_eq!(s.seed, Some(5));
        assert_eq!(s.drift_amplitude, 0.1);
        assert_eq!(s.blur, BlurFilter::default());
    }

    #[test]
    fn defaults_are_valid() {
        BackdropSettings::default().validate().unwrap();
        let no_blur = BackdropSettings {
            blur: BlurFilter {
                radius_px: 0,
                sigma: 0.0,
            },
            drift_amplitude: 0.0,
            ..BackdropSettings::default()
        };
        no_blur.validate().unwrap();
    }

    #[test]
    fn rejects_values_that_break_the_loop() {
        let bad = |json: &str| {
            let s: BackdropSettings = serde_json::from_str(json).unwrap();
            s.validate().unwrap_err().to_string()
        };
        assert!(bad(r#"{ "time_step": -0.5 }"#).contains("time_step"));
        assert!(bad(r#"{ "time_step": 0.0 }"#).contains("time_step"));
        assert!(bad(r#"{ "stroke_width": 0.0 }"#).contains("stroke_width"));
        assert!(bad(r#"{ "drift_amplitude": -1.0 }"#).contains("drift_amplitude"));
        assert!(bad(r#"{ "blur": { "radius_px": 2, "sigma": 0.0 } }"#).contains("sigma"));
        assert!(bad(r#"{ "blur": { "radius_px": 500, "sigma": 1.0 } }"#).contains("radius_px"));
    }
}
