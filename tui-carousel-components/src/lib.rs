//! Carousel widgets for tui-carousel
//!
//! Components implement the `Component<A>` trait and report navigation
//! changes through an action constructor passed in props.
//!
//! # Components
//!
//! - [`SlideCard`] - one slide: image placeholder, title, description, call to action
//! - [`CarouselView`] - slides in a track plus optional arrows and dots
//! - [`CarouselContainer`] - a view that follows the viewport, with built-in or lifted controls
//! - [`SectionCarousel`] - title, copy and a container for one page [`Section`]
//!
//! # Example
//!
//! ```ignore
//! use tui_carousel_components::{SectionCarousel, SectionCarouselProps};
//!
//! let mut carousel = SectionCarousel::for_section(&state.section, &viewport);
//!
//! // In your render function:
//! carousel.render(frame, area, SectionCarouselProps {
//!     section: &state.section,
//!     is_focused: state.focus == 0,
//!     on_change: Action::CarouselDidChange,
//! });
//! ```

mod carousel_view;
mod container;
mod controls;
mod section;
mod slide;
mod text;

pub use carousel_view::{CarouselView, CarouselViewProps};
pub use container::{CarouselContainer, CarouselContainerProps, ControlsMode};
pub use controls::{
    arrows_width, dots_width, fits_one_row, render_arrows, render_dots, ControlHit, ControlStyle,
    Controls, HitAreas,
};
pub use section::{Section, SectionCarousel, SectionCarouselProps, SectionVariant};
pub use slide::{LinkTarget, Slide, SlideButton, SlideCard, CTA_LABEL};
pub use text::{copy_paragraph, strip_html, wrapped_height};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        CarouselContainer, CarouselContainerProps, CarouselView, CarouselViewProps, ControlStyle,
        Controls, ControlsMode, Section, SectionCarousel, SectionCarouselProps, SectionVariant,
        Slide, SlideButton, SlideCard,
    };
}
