//! Carousel container: responsive config plus built-in or lifted controls

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use ratatui::{layout::Rect, Frame};
use tui_carousel_core::{
    CarouselConfig, CarouselEngine, Component, EventKind, NavigationState, ResponsivePolicy,
    Result, SnapEngine, Viewport, ViewportSubscription,
};

use crate::carousel_view::{CarouselView, CarouselViewProps};
use crate::controls::Controls;
use crate::slide::Slide;

/// Who draws the arrows and dots.
pub enum ControlsMode {
    /// The view draws its own arrows and dots
    BuiltIn,
    /// The view draws no controls and hands every navigation state to the
    /// handler; the parent draws controls and calls back into the container
    Lifted(Box<dyn FnMut(&NavigationState)>),
}

impl ControlsMode {
    pub fn lifted(handler: impl FnMut(&NavigationState) + 'static) -> Self {
        ControlsMode::Lifted(Box::new(handler))
    }
}

impl fmt::Debug for ControlsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlsMode::BuiltIn => f.write_str("BuiltIn"),
            ControlsMode::Lifted(_) => f.write_str("Lifted(..)"),
        }
    }
}

/// Props for [`CarouselContainer`]
pub struct CarouselContainerProps<'a, A> {
    pub slides: &'a [Slide],
    pub is_focused: bool,
    pub on_change: fn(NavigationState) -> A,
}

/// A [`CarouselView`] that follows the viewport.
///
/// The container resolves its config from a [`ResponsivePolicy`] at the
/// current viewport width and again after each resize. The controls mode is
/// fixed at construction.
pub struct CarouselContainer<E: CarouselEngine = SnapEngine> {
    view: CarouselView<E>,
    policy: Rc<ResponsivePolicy>,
    config: Rc<RefCell<CarouselConfig>>,
    lifted: bool,
    _resize: ViewportSubscription,
}

impl<E: CarouselEngine> fmt::Debug for CarouselContainer<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselContainer")
            .field("config", &*self.config.borrow())
            .field("lifted", &self.lifted)
            .field("view", &self.view)
            .finish()
    }
}

impl<E: CarouselEngine> CarouselContainer<E> {
    pub fn new(policy: ResponsivePolicy, mode: ControlsMode, viewport: &Viewport) -> Self {
        let config = Rc::new(RefCell::new(policy.resolve(viewport.width_px())));
        let policy = Rc::new(policy);

        let resize = {
            let policy = Rc::clone(&policy);
            let config = Rc::clone(&config);
            viewport.subscribe(move |width_px| {
                let resolved = policy.resolve(width_px);
                let mut current = config.borrow_mut();
                if *current != resolved {
                    tracing::debug!(
                        width_px,
                        slides_to_show = resolved.slides_to_show,
                        fade = resolved.fade,
                        "viewport resize changed carousel config"
                    );
                    *current = resolved;
                }
            })
        };

        let mut view = CarouselView::new();
        let lifted = match mode {
            ControlsMode::BuiltIn => false,
            ControlsMode::Lifted(handler) => {
                view.set_listener(handler);
                true
            }
        };

        Self {
            view,
            policy,
            config,
            lifted,
            _resize: resize,
        }
    }

    /// Built-in controls with the standard policy.
    pub fn standard(viewport: &Viewport) -> Self {
        Self::new(ResponsivePolicy::standard(), ControlsMode::BuiltIn, viewport)
    }

    pub fn is_lifted(&self) -> bool {
        self.lifted
    }

    /// Controls the inner view draws.
    pub fn controls(&self) -> Controls {
        if self.lifted {
            Controls::empty()
        } else {
            Controls::ARROWS | Controls::DOTS
        }
    }

    /// Config for the last reported viewport width.
    pub fn config(&self) -> CarouselConfig {
        self.config.borrow().clone()
    }

    pub fn policy(&self) -> &ResponsivePolicy {
        &self.policy
    }

    pub fn view(&self) -> &CarouselView<E> {
        &self.view
    }

    /// Mount, reconfigure or release the engine for `slide_count` slides.
    pub fn sync(&mut self, slide_count: usize) -> Result<()> {
        let config = self.config();
        self.view.sync(slide_count, &config)
    }

    pub fn navigation(&self) -> NavigationState {
        self.view.navigation()
    }

    pub fn prev(&mut self) -> Result<()> {
        self.view.prev()
    }

    pub fn next(&mut self) -> Result<()> {
        self.view.next()
    }

    pub fn goto_index(&mut self, index: usize) -> Result<()> {
        self.view.goto_index(index)
    }

    pub fn unmount(&mut self) {
        self.view.unmount();
    }

    pub(crate) fn track_change(
        &mut self,
        f: impl FnOnce(&mut CarouselView<E>) -> Result<()>,
    ) -> Option<NavigationState> {
        self.view.track_change(f)
    }
}

impl<A, E: CarouselEngine> Component<A> for CarouselContainer<E> {
    type Props<'a> = CarouselContainerProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        let config = self.config();
        let controls = self.controls();
        let action = self
            .view
            .handle_event(
                event,
                CarouselViewProps {
                    slides: props.slides,
                    config: &config,
                    controls,
                    is_focused: props.is_focused,
                    on_change: props.on_change,
                },
            )
            .into_iter()
            .next();
        action
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let config = self.config();
        let controls = self.controls();
        self.view.render(
            frame,
            area,
            CarouselViewProps {
                slides: props.slides,
                config: &config,
                controls,
                is_focused: props.is_focused,
                on_change: props.on_change,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_carousel_core::testing::{key, NavigationRecorder, RenderHarness};
    use tui_carousel_core::{assert_emitted, count_emitted};

    fn slides(n: usize) -> Vec<Slide> {
        (0..n)
            .map(|i| Slide::new(format!("s{i}")).with_title(format!("Slide {}", i + 1)))
            .collect()
    }

    fn render(container: &mut CarouselContainer, slides: &[Slide], width: u16) -> String {
        let mut render = RenderHarness::new(width, 12);
        render.render_to_string_plain(|frame| {
            let props = CarouselContainerProps {
                slides,
                is_focused: true,
                on_change: |_| (),
            };
            container.render(frame, frame.area(), props);
        })
    }

    #[test]
    fn test_config_follows_viewport() {
        let viewport = Viewport::new(1200.0);
        let container: CarouselContainer = CarouselContainer::standard(&viewport);
        assert_eq!(container.config().slides_to_show, 3);

        viewport.resize(900.0);
        assert_eq!(container.config().slides_to_show, 2);
        viewport.resize_columns(60);
        assert_eq!(container.config().slides_to_show, 1);
    }

    #[test]
    fn test_built_in_controls_drawn() {
        let viewport = Viewport::new(500.0);
        let mut container: CarouselContainer = CarouselContainer::standard(&viewport);
        let slides = slides(3);

        let output = render(&mut container, &slides, 40);
        assert!(output.contains("Slide 1"));
        assert!(output.contains("[ → ]"));
        assert!(output.contains("●"));
    }

    #[test]
    fn test_lifted_mode_forwards_state() {
        let viewport = Viewport::new(500.0);
        let recorder = NavigationRecorder::new();
        let mut container: CarouselContainer = CarouselContainer::new(
            ResponsivePolicy::custom(),
            ControlsMode::lifted(recorder.listener()),
            &viewport,
        );
        assert!(container.is_lifted());
        assert!(container.controls().is_empty());

        let slides = slides(3);
        let output = render(&mut container, &slides, 40);
        assert!(!output.contains("[ → ]"));
        assert!(!output.contains("●"));
        assert_eq!(recorder.len(), 1);

        container.next().unwrap();
        container.goto_index(0).unwrap();
        let selected: Vec<_> = recorder.states().iter().map(|s| s.selected_index).collect();
        assert_eq!(selected, vec![0, 1, 0]);
    }

    #[test]
    fn test_resize_reconfigures_on_next_render() {
        let viewport = Viewport::new(1200.0);
        let recorder = NavigationRecorder::new();
        let mut container: CarouselContainer = CarouselContainer::new(
            ResponsivePolicy::standard(),
            ControlsMode::lifted(recorder.listener()),
            &viewport,
        );
        let slides = slides(6);
        render(&mut container, &slides, 150);
        assert_eq!(container.navigation().snap_count(), 2);

        viewport.resize(500.0);
        render(&mut container, &slides, 62);
        assert_eq!(container.navigation().snap_count(), 6);
        assert_eq!(recorder.len(), 2);
    }

    #[test]
    fn test_keys_reach_view() {
        let viewport = Viewport::new(500.0);
        let mut container: CarouselContainer = CarouselContainer::standard(&viewport);
        let slides = slides(3);

        let actions: Vec<NavigationState> = container
            .handle_event(
                &key("l"),
                CarouselContainerProps {
                    slides: &slides,
                    is_focused: true,
                    on_change: |nav| nav,
                },
            )
            .into_iter()
            .collect();
        assert_eq!(count_emitted!(actions, _), 1);
        assert_emitted!(actions, nav if nav.selected_index == 1);
    }

    #[test]
    fn test_drop_detaches_from_viewport() {
        let viewport = Viewport::new(800.0);
        let a: CarouselContainer = CarouselContainer::standard(&viewport);
        let b: CarouselContainer = CarouselContainer::standard(&viewport);
        assert_eq!(viewport.listener_count(), 2);

        drop(a);
        assert_eq!(viewport.listener_count(), 1);
        viewport.resize(1100.0);
        assert_eq!(b.config().slides_to_show, 3);
    }
}
