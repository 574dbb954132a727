//! Heat color mapping.
//!
//! Quantizes a frequency sample, normalized against a ceiling, onto a
//! fixed 100-step diverging palette (cool blue to warm red) and builds
//! the DOT fill/outline attribute string shared by both graph flavors.

pub const HEAT_SIZE: usize = 100;

/// Diverging blue-to-red scale, index 0 coolest, 99 warmest. Immutable;
/// exposed only through the mapping functions below.
pub static HEAT_PALETTE: [&str; HEAT_SIZE] = [
    "#3d50c3", "#4055c8", "#4358cb", "#465ecf", "#4961d2", "#4c66d6", "#4f69d9", "#536edd",
    "#5572df", "#5977e3", "#5b7ae5", "#5f7fe8", "#6282ea", "#6687ed", "#6a8bef", "#6c8ff1",
    "#7093f3", "#7396f5", "#779af7", "#7a9df8", "#7ea1fa", "#81a4fb", "#85a8fc", "#88abfd",
    "#8caffe", "#8fb1fe", "#93b5fe", "#96b7ff", "#9abbff", "#9ebeff", "#a1c0ff", "#a5c3fe",
    "#a7c5fe", "#abc8fd", "#aec9fc", "#b2ccfb", "#b5cdfa", "#b9d0f9", "#bbd1f8", "#bfd3f6",
    "#c1d4f4", "#c5d6f2", "#c7d7f0", "#cbd8ee", "#cedaeb", "#d1dae9", "#d4dbe6", "#d6dce4",
    "#d9dce1", "#dbdcde", "#dedcdb", "#e0dbd8", "#e3d9d3", "#e5d8d1", "#e8d6cc", "#ead5c9",
    "#ecd3c5", "#eed0c0", "#efcebd", "#f1ccb8", "#f2cab5", "#f3c7b1", "#f4c5ad", "#f5c1a9",
    "#f6bfa6", "#f7bca1", "#f7b99e", "#f7b599", "#f7b396", "#f7af91", "#f7ac8e", "#f7a889",
    "#f6a385", "#f5a081", "#f59c7d", "#f4987a", "#f39475", "#f29072", "#f08b6e", "#ef886b",
    "#ed8366", "#ec7f63", "#e97a5f", "#e8765c", "#e57058", "#e36c55", "#e16751", "#de614d",
    "#dc5d4a", "#d85646", "#d65244", "#d24b40", "#d0473d", "#cc403a", "#ca3b37", "#c53334",
    "#c32e31", "#be242e", "#bb1b2c", "#b70d28",
];

/// Palette index for `freq` normalized against `max_freq`, clamped to
/// `[0, 99]`. A ceiling of 0 means nothing in scope ever executed; the
/// index is defined as 0 rather than dividing by zero.
pub fn color_index(freq: u64, max_freq: u64) -> usize {
    if max_freq == 0 {
        return 0;
    }
    let ratio = freq as f64 / max_freq as f64;
    let index = (ratio * (HEAT_SIZE - 1) as f64).round() as usize;
    index.min(HEAT_SIZE - 1)
}

/// Fill color for a node.
pub fn heat_color(freq: u64, max_freq: u64) -> &'static str {
    HEAT_PALETTE[color_index(freq, max_freq)]
}

/// Outline color: the coolest palette endpoint for the cold half, the
/// warmest for the hot half, so filled nodes stay distinguishable from
/// their border at any fill hue.
pub fn contrast_color(freq: u64, max_freq: u64) -> &'static str {
    if color_index(freq, max_freq) < HEAT_SIZE / 2 {
        HEAT_PALETTE[0]
    } else {
        HEAT_PALETTE[HEAT_SIZE - 1]
    }
}

/// Complete DOT node attribute string: full-alpha outline ("ff") and
/// half-alpha fill ("80").
pub fn heat_attributes(freq: u64, max_freq: u64) -> String {
    format!(
        "color=\"{}ff\", style=filled, fillcolor=\"{}80\"",
        contrast_color(freq, max_freq),
        heat_color(freq, max_freq)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_bounds() {
        assert_eq!(color_index(0, 100), 0);
        assert_eq!(color_index(100, 100), HEAT_SIZE - 1);
        for s in 0..=100 {
            let idx = color_index(s, 100);
            assert!(idx < HEAT_SIZE, "sample {} out of range: {}", s, idx);
        }
    }

    #[test]
    fn test_zero_ceiling_is_index_zero() {
        assert_eq!(color_index(0, 0), 0);
        assert_eq!(color_index(42, 0), 0);
        assert_eq!(heat_color(42, 0), HEAT_PALETTE[0]);
    }

    #[test]
    fn test_monotonic_in_sample() {
        let ceiling = 977;
        let mut last = 0;
        for s in 0..=ceiling {
            let idx = color_index(s, ceiling);
            assert!(idx >= last, "index dropped at sample {}", s);
            last = idx;
        }
    }

    #[test]
    fn test_contrast_endpoints() {
        for s in 0..=100u64 {
            let expected = if color_index(s, 100) < 50 {
                HEAT_PALETTE[0]
            } else {
                HEAT_PALETTE[99]
            };
            assert_eq!(contrast_color(s, 100), expected);
        }
    }

    #[test]
    fn test_attribute_string_shape() {
        let attrs = heat_attributes(100, 100);
        assert_eq!(
            attrs,
            "color=\"#b70d28ff\", style=filled, fillcolor=\"#b70d2880\""
        );
        let attrs = heat_attributes(0, 100);
        assert!(attrs.contains("fillcolor=\"#3d50c380\""));
        assert!(attrs.contains("color=\"#3d50c3ff\""));
    }
}
