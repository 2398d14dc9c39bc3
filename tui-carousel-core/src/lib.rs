//! Core types for tui-carousel
//!
//! This crate holds everything a carousel needs that is not drawing:
//! the engine abstraction, the adapter that turns engine events into
//! declarative navigation state, responsive config resolution and the small
//! store/component plumbing the widgets and apps are written against.
//!
//! # Core Concepts
//!
//! - **ResponsivePolicy**: viewport width in, [`CarouselConfig`] out
//! - **CarouselAdapter**: owns engines, republishes [`NavigationState`]
//! - **Viewport**: shared terminal width with resize subscriptions
//! - **Component**: UI elements that render from props and return actions
//! - **Store**: reducer-based app state
//!
//! # Basic Example
//!
//! ```
//! use tui_carousel_core::prelude::*;
//!
//! let config = resolve(1200.0);
//! assert_eq!(config.slides_to_show, 3);
//!
//! let mut adapter: CarouselAdapter = CarouselAdapter::new();
//! let handle = adapter.initialize(config, 6).unwrap();
//! adapter.next(handle).unwrap();
//!
//! let nav = adapter.state(handle).unwrap();
//! assert_eq!(nav.selected_index, 1);
//! assert!(nav.next_disabled);
//! ```

pub mod action;
pub mod adapter;
pub mod component;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod poller;
pub mod responsive;
pub mod store;
pub mod testing;
pub mod viewport;

// Core trait exports
pub use action::Action;
pub use component::Component;

// Carousel model exports
pub use adapter::{CarouselAdapter, EngineHandle, NavigationState, Unsubscribe};
pub use config::{
    columns_to_px, px_to_columns, rem, CarouselConfig, EngineOptions, SlidesToScroll,
    CELL_WIDTH_PX, ROOT_FONT_PX,
};
pub use engine::{CarouselEngine, EngineEvent, EngineListener, ListenerId, ScrollApi, SnapEngine};
pub use error::{CarouselError, Result, SettingsError};
pub use responsive::{resolve, Band, Breakpoint, ResponsivePolicy, DESKTOP_MIN_PX, TABLET_MIN_PX};
pub use viewport::{Viewport, ViewportSubscription};

// Event exports
pub use event::EventKind;
pub use poller::{process_raw_event, spawn_event_poller, PollerConfig, RawEvent};

// Store exports
pub use store::{LoggingMiddleware, Middleware, Reducer, Store, StoreWithMiddleware};

// Re-export ratatui types for convenience
pub use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    Frame,
};

// Testing exports
pub use testing::{
    buffer_to_string_plain, char_key, click, key, parse_key, NavigationRecorder, RenderHarness,
    TestHarness,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::Action;
    pub use crate::adapter::{CarouselAdapter, EngineHandle, NavigationState, Unsubscribe};
    pub use crate::component::Component;
    pub use crate::config::{CarouselConfig, SlidesToScroll};
    pub use crate::engine::{CarouselEngine, ScrollApi, SnapEngine};
    pub use crate::error::{CarouselError, SettingsError};
    pub use crate::event::EventKind;
    pub use crate::poller::{process_raw_event, spawn_event_poller, PollerConfig, RawEvent};
    pub use crate::responsive::{resolve, ResponsivePolicy};
    pub use crate::store::{LoggingMiddleware, Middleware, Reducer, Store, StoreWithMiddleware};
    pub use crate::viewport::{Viewport, ViewportSubscription};

    // Re-export ratatui types
    pub use ratatui::{
        layout::Rect,
        style::{Color, Modifier, Style},
        text::{Line, Span, Text},
        Frame,
    };
}
