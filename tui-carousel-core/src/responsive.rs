//! Viewport width to carousel config resolution
//!
//! A [`ResponsivePolicy`] is an ordered list of [`Breakpoint`]s plus the
//! settings shared by every band. Resolution walks the breakpoints in order
//! and the first one whose `min_width_px` is strictly exceeded wins; the
//! policy's `base` band applies below all of them.
//!
//! ```
//! use tui_carousel_core::responsive::{resolve, ResponsivePolicy};
//!
//! assert_eq!(resolve(1200.0).slides_to_show, 3);
//! assert_eq!(resolve(900.0).slides_to_show, 2);
//! assert_eq!(resolve(500.0).slides_to_show, 1);
//!
//! let custom = ResponsivePolicy::custom();
//! assert!(custom.resolve(500.0).fade);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{rem, CarouselConfig, SlidesToScroll};
use crate::error::SettingsError;

/// Desktop breakpoint: above this width three slides are shown.
pub const DESKTOP_MIN_PX: f32 = 1024.0;
/// Tablet breakpoint: above this width two slides are shown.
pub const TABLET_MIN_PX: f32 = 768.0;

/// Layout for one width band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub slides_to_show: usize,
    #[serde(default)]
    pub slide_spacing_px: f32,
    #[serde(default)]
    pub fade: bool,
}

/// A band that applies when the viewport is wider than `min_width_px`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub min_width_px: f32,
    #[serde(flatten)]
    pub band: Band,
}

/// Per-variant mapping from viewport width to [`CarouselConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsivePolicy {
    /// Checked in descending `min_width_px` order
    pub breakpoints: Vec<Breakpoint>,
    /// Applies when no breakpoint matches
    pub base: Band,
    #[serde(default, rename = "loop")]
    pub looping: bool,
    #[serde(default)]
    pub slides_to_scroll: SlidesToScroll,
}

impl ResponsivePolicy {
    /// Policy of the default carousel: built-in controls, no loop, flush slides on mobile.
    pub fn standard() -> Self {
        Self {
            breakpoints: desktop_and_tablet(),
            base: Band {
                slides_to_show: 1,
                slide_spacing_px: 0.0,
                fade: false,
            },
            looping: false,
            slides_to_scroll: SlidesToScroll::Auto,
        }
    }

    /// Policy of the custom carousel: looping, tighter spacing and a fade on mobile.
    pub fn custom() -> Self {
        Self {
            breakpoints: desktop_and_tablet(),
            base: Band {
                slides_to_show: 1,
                slide_spacing_px: rem(1.5),
                fade: true,
            },
            looping: true,
            slides_to_scroll: SlidesToScroll::Auto,
        }
    }

    /// Resolve the config for a viewport width.
    ///
    /// Non-finite or negative widths are treated as zero.
    pub fn resolve(&self, viewport_width_px: f32) -> CarouselConfig {
        let width = if viewport_width_px.is_finite() {
            viewport_width_px.max(0.0)
        } else {
            0.0
        };

        let band = self
            .breakpoints
            .iter()
            .find(|bp| width > bp.min_width_px)
            .map(|bp| &bp.band)
            .unwrap_or(&self.base);

        CarouselConfig {
            slides_to_show: band.slides_to_show.max(1),
            slides_to_scroll: self.slides_to_scroll,
            slide_spacing_px: band.slide_spacing_px.max(0.0),
            looping: self.looping,
            fade: band.fade,
        }
    }

    /// Check that the policy can only produce valid configs.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let bands = self
            .breakpoints
            .iter()
            .map(|bp| &bp.band)
            .chain(std::iter::once(&self.base));
        for band in bands {
            if band.slides_to_show == 0 {
                return Err(SettingsError::Invalid(
                    "slides_to_show must be at least 1".into(),
                ));
            }
            if !band.slide_spacing_px.is_finite() || band.slide_spacing_px < 0.0 {
                return Err(SettingsError::Invalid(format!(
                    "slide spacing must be non-negative, got {}",
                    band.slide_spacing_px
                )));
            }
        }
        let descending = self
            .breakpoints
            .windows(2)
            .all(|pair| pair[0].min_width_px > pair[1].min_width_px);
        if !descending {
            return Err(SettingsError::Invalid(
                "breakpoints must be listed widest first".into(),
            ));
        }
        Ok(())
    }

    /// Load and validate a policy from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let policy: Self = serde_json::from_str(&raw)?;
        policy.validate()?;
        Ok(policy)
    }
}

impl Default for ResponsivePolicy {
    fn default() -> Self {
        Self::standard()
    }
}

fn desktop_and_tablet() -> Vec<Breakpoint> {
    vec![
        Breakpoint {
            min_width_px: DESKTOP_MIN_PX,
            band: Band {
                slides_to_show: 3,
                slide_spacing_px: rem(2.0),
                fade: false,
            },
        },
        Breakpoint {
            min_width_px: TABLET_MIN_PX,
            band: Band {
                slides_to_show: 2,
                slide_spacing_px: rem(2.0),
                fade: false,
            },
        },
    ]
}

/// Resolve a width with the standard policy.
pub fn resolve(viewport_width_px: f32) -> CarouselConfig {
    ResponsivePolicy::standard().resolve(viewport_width_px)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_bands() {
        assert_eq!(resolve(1200.0).slides_to_show, 3);
        assert_eq!(resolve(1025.0).slides_to_show, 3);
        assert_eq!(resolve(1024.0).slides_to_show, 2);
        assert_eq!(resolve(900.0).slides_to_show, 2);
        assert_eq!(resolve(769.0).slides_to_show, 2);
        assert_eq!(resolve(768.0).slides_to_show, 1);
        assert_eq!(resolve(500.0).slides_to_show, 1);
        assert_eq!(resolve(0.0).slides_to_show, 1);
    }

    #[test]
    fn test_monotonic_in_width() {
        let mut last = 0;
        for width in (0..2000).step_by(7) {
            let shown = resolve(width as f32).slides_to_show;
            assert!((1..=3).contains(&shown));
            assert!(shown >= last, "slides_to_show dropped at {width}px");
            last = shown;
        }
    }

    #[test]
    fn test_spacing_nonzero_above_tablet() {
        assert_eq!(resolve(1200.0).slide_spacing_px, 32.0);
        assert_eq!(resolve(900.0).slide_spacing_px, 32.0);
        assert_eq!(resolve(500.0).slide_spacing_px, 0.0);
    }

    #[test]
    fn test_custom_policy_mobile_band() {
        let policy = ResponsivePolicy::custom();
        let mobile = policy.resolve(500.0);
        assert_eq!(mobile.slides_to_show, 1);
        assert_eq!(mobile.slide_spacing_px, 24.0);
        assert!(mobile.fade);
        assert!(mobile.looping);

        let desktop = policy.resolve(1200.0);
        assert!(!desktop.fade);
        assert!(desktop.looping);
    }

    #[test]
    fn test_standard_policy_does_not_loop() {
        assert!(!resolve(1200.0).looping);
        assert!(!resolve(500.0).fade);
    }

    #[test]
    fn test_bad_widths_fall_to_base() {
        assert_eq!(resolve(-40.0).slides_to_show, 1);
        assert_eq!(resolve(f32::NAN).slides_to_show, 1);
        assert_eq!(resolve(f32::INFINITY).slides_to_show, 1);
    }

    #[test]
    fn test_policy_roundtrips_through_json() {
        let json = serde_json::to_string(&ResponsivePolicy::custom()).unwrap();
        assert!(json.contains("\"loop\":true"));
        let parsed: ResponsivePolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ResponsivePolicy::custom());
    }

    #[test]
    fn test_validate_rejects_unordered_breakpoints() {
        let mut policy = ResponsivePolicy::standard();
        policy.breakpoints.reverse();
        assert!(matches!(
            policy.validate(),
            Err(SettingsError::Invalid(_))
        ));
        assert!(ResponsivePolicy::standard().validate().is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let err = ResponsivePolicy::load("/nonexistent/policy.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }
}
