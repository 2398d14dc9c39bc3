//! tui-carousel: responsive carousels for ratatui apps
//!
//! A carousel engine emits `reInit` and `select` events; the adapter turns
//! them into a [`NavigationState`] that views render from. Views pick their
//! layout from the viewport width through a [`ResponsivePolicy`].
//!
//! # Example
//! ```ignore
//! use tui_carousel::prelude::*;
//!
//! let viewport = Viewport::from_columns(terminal_width);
//! let mut section = SectionCarousel::new(SectionVariant::Custom, &viewport);
//!
//! // On resize
//! viewport.resize_columns(new_width);
//!
//! // In your render function
//! section.render(frame, area, SectionCarouselProps {
//!     section: &state.section,
//!     is_focused: true,
//!     on_change: Action::CarouselDidChange,
//! });
//! ```

// Re-export everything from core
pub use tui_carousel_core::*;

// Re-export the widgets
pub use tui_carousel_components::{
    arrows_width, copy_paragraph, dots_width, fits_one_row, render_arrows, render_dots,
    strip_html, wrapped_height, CarouselContainer, CarouselContainerProps, CarouselView,
    CarouselViewProps, ControlHit, ControlStyle, Controls, ControlsMode, HitAreas, LinkTarget,
    Section, SectionCarousel, SectionCarouselProps, SectionVariant, Slide, SlideButton,
    SlideCard, CTA_LABEL,
};

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use tui_carousel_core::{Action, CarouselEngine, Component, ScrollApi};

    // Carousel model
    pub use tui_carousel_core::{
        resolve, CarouselAdapter, CarouselConfig, CarouselError, EngineHandle, NavigationState,
        ResponsivePolicy, SettingsError, SlidesToScroll, SnapEngine, Unsubscribe, Viewport,
        ViewportSubscription,
    };

    // Event system
    pub use tui_carousel_core::{
        process_raw_event, spawn_event_poller, EventKind, PollerConfig, RawEvent,
    };

    // Store
    pub use tui_carousel_core::{LoggingMiddleware, Middleware, Reducer, Store, StoreWithMiddleware};

    // Widgets
    pub use tui_carousel_components::prelude::*;

    // Ratatui re-exports
    pub use tui_carousel_core::{Color, Frame, Line, Modifier, Rect, Span, Style, Text};
}
