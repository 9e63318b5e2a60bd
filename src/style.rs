// Composition of per-element motion into one CSS transform.
//
// Parallax, oscillation and seam drift can all target the same element, so
// each element keeps the latest value of every channel and the transform is
// rebuilt from all of them.
use advaita_core::constants::QUAKE_DEFAULT_STRENGTH;
use advaita_core::{LayerTransform, ShakeTransform};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementMotion {
    pub layer: LayerTransform,
    pub shake: ShakeTransform,
    pub offset_y: f32,
}

impl ElementMotion {
    pub fn to_css(&self) -> String {
        let x_px = self.layer.offset.x;
        let y_px = self.layer.offset.y + self.offset_y;
        let x_pct = self.layer.drift_percent + self.shake.x_percent;
        let y_pct = self.shake.y_percent;
        format!(
            "translate3d(calc({:.2}px + {:.3}%), calc({:.2}px + {:.3}%), 0) rotate({:.3}deg)",
            x_px, x_pct, y_px, y_pct, self.shake.rotation_deg
        )
    }
}

/// `data-shake-strength` value, clamped to [0, 1].
pub fn parse_strength(attr: Option<&str>) -> f32 {
    attr.and_then(|s| s.trim().parse::<f32>().ok())
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 1.0))
        .unwrap_or(QUAKE_DEFAULT_STRENGTH)
}

/// Fraction of a horizontal bar at `client_x`.
pub fn bar_fraction(client_x: f64, left: f64, width: f64) -> f64 {
    if width <= 0.0 {
        return 0.0;
    }
    ((client_x - left) / width).clamp(0.0, 1.0)
}
