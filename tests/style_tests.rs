// Host-side tests for transform composition and attribute parsing.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod style {
    include!("../src/style.rs");
}

use advaita_core::constants::QUAKE_DEFAULT_STRENGTH;
use advaita_core::{LayerTransform, ShakeTransform};
use glam::Vec2;
use style::*;

#[test]
fn resting_motion_is_identity() {
    assert_eq!(
        ElementMotion::default().to_css(),
        "translate3d(calc(0.00px + 0.000%), calc(0.00px + 0.000%), 0) rotate(0.000deg)"
    );
}

#[test]
fn channels_combine_into_one_transform() {
    let motion = ElementMotion {
        layer: LayerTransform {
            offset: Vec2::new(12.0, -4.0),
            drift_percent: -5.0,
        },
        shake: ShakeTransform {
            y_percent: 0.5,
            x_percent: 1.25,
            rotation_deg: 0.04,
        },
        offset_y: -100.0,
    };
    assert_eq!(
        motion.to_css(),
        "translate3d(calc(12.00px + -3.750%), calc(-104.00px + 0.500%), 0) rotate(0.040deg)"
    );
}

#[test]
fn strength_attribute_is_clamped() {
    assert_eq!(parse_strength(Some("0.8")), 0.8);
    assert_eq!(parse_strength(Some(" 0.25 ")), 0.25);
    assert_eq!(parse_strength(Some("3")), 1.0);
    assert_eq!(parse_strength(Some("-1")), 0.0);
}

#[test]
fn strength_attribute_falls_back_to_default() {
    assert_eq!(parse_strength(None), QUAKE_DEFAULT_STRENGTH);
    assert_eq!(parse_strength(Some("")), QUAKE_DEFAULT_STRENGTH);
    assert_eq!(parse_strength(Some("strong")), QUAKE_DEFAULT_STRENGTH);
    assert_eq!(parse_strength(Some("NaN")), QUAKE_DEFAULT_STRENGTH);
}

#[test]
fn bar_fraction_clamps_to_the_bar() {
    assert_eq!(bar_fraction(150.0, 100.0, 200.0), 0.25);
    assert_eq!(bar_fraction(50.0, 100.0, 200.0), 0.0);
    assert_eq!(bar_fraction(400.0, 100.0, 200.0), 1.0);
    assert_eq!(bar_fraction(150.0, 100.0, 0.0), 0.0);
}
