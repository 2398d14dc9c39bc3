//! Carousel configuration model
//!
//! A [`CarouselConfig`] is computed as a unit (usually by a
//! [`ResponsivePolicy`](crate::responsive::ResponsivePolicy)) and replaced as a
//! unit whenever the viewport changes. Nothing mutates a config in place.

use serde::{Deserialize, Serialize};

use crate::error::CarouselError;

/// Pixels per `rem`, matching the browser default root font size.
pub const ROOT_FONT_PX: f32 = 16.0;

/// Width of one terminal column in pixels.
///
/// Breakpoints and spacings are expressed in px; terminal geometry is
/// converted with this factor so that a 160-column terminal is 1280 px wide.
pub const CELL_WIDTH_PX: f32 = 8.0;

/// Convert a `rem` length to pixels.
pub fn rem(value: f32) -> f32 {
    value * ROOT_FONT_PX
}

/// Convert a terminal width in columns to a viewport width in pixels.
pub fn columns_to_px(columns: u16) -> f32 {
    f32::from(columns) * CELL_WIDTH_PX
}

/// Convert a pixel length to whole terminal columns (rounded to nearest).
pub fn px_to_columns(px: f32) -> u16 {
    if !px.is_finite() || px <= 0.0 {
        return 0;
    }
    (px / CELL_WIDTH_PX).round().min(f32::from(u16::MAX)) as u16
}

/// How many slides one prev/next step moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlidesToScroll {
    /// Move by however many slides fit in view
    #[default]
    Auto,
    /// Move by a fixed number of slides
    Count(usize),
}

impl SlidesToScroll {
    /// Resolve to a concrete step given the number of slides in view.
    pub fn step(self, slides_in_view: usize) -> usize {
        match self {
            SlidesToScroll::Auto => slides_in_view.max(1),
            SlidesToScroll::Count(n) => n.max(1),
        }
    }
}

/// Layout and behaviour of one carousel at one viewport size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Slides visible at once; each takes `100 / slides_to_show` percent of the track
    pub slides_to_show: usize,
    #[serde(default)]
    pub slides_to_scroll: SlidesToScroll,
    /// Gap between slides in px
    #[serde(default)]
    pub slide_spacing_px: f32,
    /// Wrap from the last snap back to the first and vice versa
    #[serde(default, rename = "loop")]
    pub looping: bool,
    /// Swap slide groups in place instead of translating the track
    #[serde(default)]
    pub fade: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            slides_to_show: 1,
            slides_to_scroll: SlidesToScroll::Auto,
            slide_spacing_px: 0.0,
            looping: false,
            fade: false,
        }
    }
}

impl CarouselConfig {
    /// Check the invariants a config must hold before an engine is built from it.
    pub fn validate(&self) -> Result<(), CarouselError> {
        if self.slides_to_show == 0 {
            return Err(CarouselError::InvalidConfig(
                "slides_to_show must be at least 1".into(),
            ));
        }
        if matches!(self.slides_to_scroll, SlidesToScroll::Count(0)) {
            return Err(CarouselError::InvalidConfig(
                "slides_to_scroll must be at least 1".into(),
            ));
        }
        if !self.slide_spacing_px.is_finite() || self.slide_spacing_px < 0.0 {
            return Err(CarouselError::InvalidConfig(format!(
                "slide spacing must be a non-negative length, got {}",
                self.slide_spacing_px
            )));
        }
        Ok(())
    }

    /// Width share of one slide, in percent of the track.
    pub fn slide_size_percent(&self) -> f32 {
        100.0 / self.slides_to_show.max(1) as f32
    }

    /// Spacing between slides in terminal columns.
    pub fn spacing_columns(&self) -> u16 {
        px_to_columns(self.slide_spacing_px)
    }

    /// The subset of the config the engine itself consumes.
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            slides_to_scroll: self.slides_to_scroll,
            looping: self.looping,
            fade: self.fade,
            slides_in_view: self.slides_to_show.max(1),
        }
    }
}

/// Engine constructor options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    pub slides_to_scroll: SlidesToScroll,
    pub looping: bool,
    pub fade: bool,
    pub slides_in_view: usize,
}
