//! Corner zone layout for a given screen size.
//!
//! Used both for the built-in defaults (on a 1920x1080 reference screen)
//! and for `--run-configuration-calculation`, which measures the primary
//! screen instead.

use super::{KeyCode, RawConfig, Rectangle, ZoneConfig, ZONE_SIGIL};

/// Depth of each corner zone, in pixels.
pub const CALCULATION_THRESHOLD: i32 = 2;

/// Screen size the built-in defaults are laid out for.
pub const REFERENCE_SCREEN: (i32, i32) = (1920, 1080);

/// The four corner zones of a `width` x `height` screen with their shortcuts.
///
/// Order: top-left, top-right, bottom-left, bottom-right.
pub fn corner_zones(width: i32, height: i32, threshold: i32) -> Vec<(Rectangle, Vec<KeyCode>)> {
    vec![
        // Window switcher
        (
            Rectangle::new(0, 0, threshold, threshold),
            vec![KeyCode::CONTROL, KeyCode::ALT, KeyCode::TAB],
        ),
        // Action center
        (
            Rectangle::new(width - threshold, 0, width, threshold),
            vec![KeyCode::WINDOWS, KeyCode::A],
        ),
        // Task view
        (
            Rectangle::new(0, height - threshold, threshold, height),
            vec![KeyCode::WINDOWS, KeyCode::TAB],
        ),
        // Show desktop
        (
            Rectangle::new(width - threshold, height - threshold, width, height),
            vec![KeyCode::WINDOWS, KeyCode::D],
        ),
    ]
}

/// Replaces the zones of `base` with corner zones for the given screen.
///
/// Scalar options of `base` are kept.
pub fn calculate(base: &RawConfig, width: i32, height: i32) -> RawConfig {
    let mut config: RawConfig = base
        .iter()
        .filter(|(key, _)| !key.trim().starts_with(ZONE_SIGIL))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    for (area, codes) in corner_zones(width, height, CALCULATION_THRESHOLD) {
        let (p0, p1) = (area.origin(), area.extent());
        if let Err(e) = ZoneConfig::put_codes(&mut config, p0.x, p0.y, p1.x, p1.y, &codes) {
            tracing::error!(%e, %area, "Failed to encode calculated zone");
        }
    }

    tracing::info!(width, height, "Calculated corner zones for screen size");
    config
}
