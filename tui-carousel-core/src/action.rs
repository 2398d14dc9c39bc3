//! Action trait for values dispatched to a store

use std::fmt::Debug;

/// Marker trait for actions that can be dispatched to the store
///
/// Carousel components never mutate application state directly. When the
/// navigation state they observe changes they return an action built from a
/// constructor passed in through props, e.g. `on_change: Action::CarouselDidChange`.
///
/// Actions should be:
/// - Clone: they may be logged or sent to several handlers
/// - Debug: for logging
/// - Send + 'static: they travel through channels
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging
    fn name(&self) -> &'static str;
}
