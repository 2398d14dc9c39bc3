//! Component trait for carousel UI elements

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A UI element that renders from props and turns input into actions
///
/// Components follow these rules:
/// 1. Props contain all read-only data needed for rendering
/// 2. `handle_event` returns actions, never mutates application state
/// 3. `render` draws from props plus internal UI state
///
/// Carousel components keep their engine handle as internal UI state, the
/// same way a list keeps its scroll offset. Navigation changes are reported
/// back to the application as actions so it knows to re-render.
///
/// # Example
///
/// ```ignore
/// use tui_carousel::{Component, EventKind, Frame, Rect};
///
/// struct PageCounter;
///
/// struct PageCounterProps<'a> {
///     nav: &'a NavigationState,
/// }
///
/// impl Component<AppAction> for PageCounter {
///     type Props<'a> = PageCounterProps<'a>;
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
///         let text = format!("{}/{}", props.nav.selected_index + 1, props.nav.snap_count());
///         frame.render_widget(Paragraph::new(text), area);
///     }
/// }
/// ```
pub trait Component<A> {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Handle an event and return actions to dispatch
    ///
    /// Returns any type implementing `IntoIterator<Item = A>`:
    /// - `None` - no actions (most common)
    /// - `Some(action)` - single action
    /// - `vec![...]` - several actions
    ///
    /// Default implementation returns no actions (render-only components).
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    /// Render the component to the frame
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
