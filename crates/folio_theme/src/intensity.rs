//! Intensity parameter tables
//!
//! Each [`IntensityLevel`] maps to one fixed table of glass parameters. The
//! tables are `static`, so resolving the same level always yields the same
//! reference and consumers can memoize on the level alone.

use crate::variant::IntensityLevel;

/// Numeric glass parameters for one intensity level
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntensityParameterTable {
    /// Backdrop blur radius in pixels
    pub blur_radius: f32,
    /// Surface fill opacity at rest
    pub base_opacity: f32,
    /// Surface fill opacity at the peak of an effect
    pub peak_opacity: f32,
    /// Alpha of the specular border
    pub border_alpha: f32,
    /// Drop shadow blur in pixels
    pub shadow_depth: f32,
}

impl IntensityParameterTable {
    /// Fill opacity for an effect of the given magnitude (0.0 = rest, 1.0 = peak)
    pub fn opacity_at(&self, magnitude: f32) -> f32 {
        let m = magnitude.clamp(0.0, 1.0);
        self.base_opacity * (1.0 - m) + self.peak_opacity * m
    }
}

static TABLES: [IntensityParameterTable; 5] = [
    // Whisper
    IntensityParameterTable {
        blur_radius: 4.0,
        base_opacity: 0.04,
        peak_opacity: 0.10,
        border_alpha: 0.08,
        shadow_depth: 4.0,
    },
    // Light
    IntensityParameterTable {
        blur_radius: 8.0,
        base_opacity: 0.07,
        peak_opacity: 0.16,
        border_alpha: 0.14,
        shadow_depth: 8.0,
    },
    // Medium
    IntensityParameterTable {
        blur_radius: 12.0,
        base_opacity: 0.10,
        peak_opacity: 0.22,
        border_alpha: 0.20,
        shadow_depth: 12.0,
    },
    // Heavy
    IntensityParameterTable {
        blur_radius: 20.0,
        base_opacity: 0.15,
        peak_opacity: 0.30,
        border_alpha: 0.28,
        shadow_depth: 20.0,
    },
    // Extreme
    IntensityParameterTable {
        blur_radius: 32.0,
        base_opacity: 0.22,
        peak_opacity: 0.40,
        border_alpha: 0.36,
        shadow_depth: 32.0,
    },
];

/// Parameter table for `intensity`
pub fn resolve(intensity: IntensityLevel) -> &'static IntensityParameterTable {
    &TABLES[intensity.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_is_referentially_stable() {
        for level in IntensityLevel::all() {
            assert!(std::ptr::eq(resolve(*level), resolve(*level)));
        }
    }

    #[test]
    fn test_parameters_grow_with_intensity() {
        let tables: Vec<_> = IntensityLevel::all().iter().map(|l| resolve(*l)).collect();
        for pair in tables.windows(2) {
            assert!(pair[0].blur_radius < pair[1].blur_radius);
            assert!(pair[0].base_opacity < pair[1].base_opacity);
            assert!(pair[0].peak_opacity < pair[1].peak_opacity);
            assert!(pair[0].border_alpha < pair[1].border_alpha);
            assert!(pair[0].shadow_depth < pair[1].shadow_depth);
        }
    }

    #[test]
    fn test_peak_exceeds_base_for_every_level() {
        for level in IntensityLevel::all() {
            let table = resolve(*level);
            assert!(table.peak_opacity > table.base_opacity, "{level:?}");
            assert!(table.peak_opacity <= 1.0);
        }
    }

    #[test]
    fn test_opacity_at_clamps_magnitude() {
        let table = resolve(IntensityLevel::Medium);
        assert_eq!(table.opacity_at(0.0), table.base_opacity);
        assert_eq!(table.opacity_at(1.0), table.peak_opacity);
        assert_eq!(table.opacity_at(7.0), table.peak_opacity);
        assert_eq!(table.opacity_at(-1.0), table.base_opacity);
    }
}
