//! Carousel view: slides in a track plus optional built-in controls

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};
use tui_carousel_core::{
    CarouselAdapter, CarouselConfig, CarouselEngine, Component, EngineHandle, EventKind,
    NavigationState, Result, SnapEngine, Unsubscribe,
};

use crate::controls::{
    arrows_width, fits_one_row, render_arrows, render_dots, ControlHit, ControlStyle, Controls,
    HitAreas,
};
use crate::slide::{Slide, SlideCard};

/// Props for [`CarouselView`]
pub struct CarouselViewProps<'a, A> {
    /// Slides to show, in order
    pub slides: &'a [Slide],
    /// Config for the current viewport
    pub config: &'a CarouselConfig,
    /// Built-in controls to draw; empty when a parent draws its own
    pub controls: Controls,
    /// Whether keyboard input goes to this carousel
    pub is_focused: bool,
    /// Action to emit when navigation changes in response to input
    pub on_change: fn(NavigationState) -> A,
}

type Listener = Box<dyn FnMut(&NavigationState)>;

struct Mount {
    handle: EngineHandle,
    slide_count: usize,
    unsubscribe: Unsubscribe,
}

/// Renders slides from a [`CarouselAdapter`] engine and wires arrows and dots to it.
///
/// The engine is created on the first render or event that carries slides and
/// kept in sync with the props afterwards:
///
/// - a different config reconfigures the engine in place
/// - a different slide count mounts a fresh engine
/// - no slides releases the engine and renders nothing
///
/// Parents can drive it imperatively with [`prev`](Self::prev),
/// [`next`](Self::next) and [`goto_index`](Self::goto_index).
pub struct CarouselView<E: CarouselEngine = SnapEngine> {
    adapter: CarouselAdapter<E>,
    mount: Option<Mount>,
    nav: Rc<RefCell<NavigationState>>,
    listener: Rc<RefCell<Option<Listener>>>,
    hits: HitAreas,
}

impl<E: CarouselEngine> fmt::Debug for CarouselView<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselView")
            .field("handle", &self.handle())
            .field("nav", &*self.nav.borrow())
            .finish()
    }
}

impl<E: CarouselEngine> Default for CarouselView<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: CarouselEngine> CarouselView<E> {
    pub fn new() -> Self {
        Self {
            adapter: CarouselAdapter::new(),
            mount: None,
            nav: Rc::new(RefCell::new(NavigationState::default())),
            listener: Rc::new(RefCell::new(None)),
            hits: HitAreas::default(),
        }
    }

    /// Forward every navigation state to `listener`.
    ///
    /// Replaces any previous listener. If an engine is already mounted the
    /// listener is called once with the current state.
    pub fn set_listener(&mut self, listener: impl FnMut(&NavigationState) + 'static) {
        let mut listener: Listener = Box::new(listener);
        if self.is_mounted() {
            listener(&self.navigation());
        }
        *self.listener.borrow_mut() = Some(listener);
    }

    /// Bring the engine in line with the current slides and config.
    pub fn sync(&mut self, slide_count: usize, config: &CarouselConfig) -> Result<()> {
        if slide_count == 0 {
            self.unmount();
            return Ok(());
        }
        let mounted = self.mount.as_ref().map(|m| (m.handle, m.slide_count));
        match mounted {
            Some((handle, count)) if count == slide_count => {
                self.adapter.reconfigure(handle, config.clone())
            }
            Some(_) => {
                self.unmount();
                self.mount(slide_count, config)
            }
            None => self.mount(slide_count, config),
        }
    }

    fn mount(&mut self, slide_count: usize, config: &CarouselConfig) -> Result<()> {
        let handle = self.adapter.initialize(config.clone(), slide_count)?;
        let nav = Rc::clone(&self.nav);
        let listener = Rc::clone(&self.listener);
        let unsubscribe = self.adapter.subscribe(handle, move |state| {
            *nav.borrow_mut() = state.clone();
            if let Ok(mut listener) = listener.try_borrow_mut() {
                if let Some(listener) = listener.as_mut() {
                    listener(state);
                }
            }
        })?;
        tracing::debug!(%handle, slide_count, "carousel view mounted");
        self.mount = Some(Mount {
            handle,
            slide_count,
            unsubscribe,
        });
        Ok(())
    }

    /// Release the engine. Safe to call when nothing is mounted.
    pub fn unmount(&mut self) {
        if let Some(mount) = self.mount.take() {
            mount.unsubscribe.unsubscribe();
            self.adapter.release(mount.handle);
            *self.nav.borrow_mut() = NavigationState::default();
            self.hits.clear();
            tracing::debug!(handle = %mount.handle, "carousel view unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mount.is_some()
    }

    pub fn handle(&self) -> Option<EngineHandle> {
        self.mount.as_ref().map(|m| m.handle)
    }

    /// Latest navigation state; the pre-init default when nothing is mounted.
    pub fn navigation(&self) -> NavigationState {
        self.nav.borrow().clone()
    }

    pub fn adapter(&self) -> &CarouselAdapter<E> {
        &self.adapter
    }

    /// Slide indices on screen at the selected snap.
    pub fn slides_in_view(&self) -> Vec<usize> {
        self.handle()
            .and_then(|handle| self.adapter.slides_in_view(handle).ok())
            .unwrap_or_default()
    }

    /// Scroll back one step; no-op before mount.
    pub fn prev(&mut self) -> Result<()> {
        match self.handle() {
            Some(handle) => self.adapter.prev(handle),
            None => Ok(()),
        }
    }

    /// Scroll forward one step; no-op before mount.
    pub fn next(&mut self) -> Result<()> {
        match self.handle() {
            Some(handle) => self.adapter.next(handle),
            None => Ok(()),
        }
    }

    /// Jump to a snap; no-op before mount or when out of range.
    pub fn goto_index(&mut self, index: usize) -> Result<()> {
        match self.handle() {
            Some(handle) => self.adapter.goto_index(handle, index),
            None => Ok(()),
        }
    }

    /// Run `f` and return the new state if navigation changed.
    pub(crate) fn track_change(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<()>,
    ) -> Option<NavigationState> {
        let before = self.navigation();
        if let Err(err) = f(self) {
            tracing::warn!(%err, "carousel navigation failed");
            return None;
        }
        let after = self.navigation();
        (after != before).then_some(after)
    }

    fn apply_hit(&mut self, hit: ControlHit) -> Result<()> {
        match hit {
            ControlHit::Prev => self.prev(),
            ControlHit::Next => self.next(),
            ControlHit::Dot(index) => self.goto_index(index),
        }
    }
}

/// Snap index for a digit key `1`..=`9`.
pub(crate) fn digit_index(code: KeyCode) -> Option<usize> {
    match code {
        KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| d as usize - 1),
        _ => None,
    }
}

impl<A, E: CarouselEngine> Component<A> for CarouselView<E> {
    type Props<'a> = CarouselViewProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if let Err(err) = self.sync(props.slides.len(), props.config) {
            tracing::warn!(%err, "carousel sync failed");
            return None;
        }
        if !self.is_mounted() {
            return None;
        }

        let changed = match event {
            EventKind::Key(_) if props.is_focused => match event.pressed_key().map(|k| k.code) {
                Some(KeyCode::Left | KeyCode::Char('h')) => self.track_change(|view| view.prev()),
                Some(KeyCode::Right | KeyCode::Char('l')) => self.track_change(|view| view.next()),
                Some(code) if props.controls.contains(Controls::DOTS) => {
                    match digit_index(code) {
                        Some(index) => self.track_change(|view| view.goto_index(index)),
                        None => None,
                    }
                }
                _ => None,
            },
            EventKind::Mouse(_) => {
                let hit = event
                    .click_position()
                    .and_then(|(column, row)| self.hits.hit(column, row));
                match hit {
                    Some(hit) => self.track_change(|view| view.apply_hit(hit)),
                    None => None,
                }
            }
            _ => None,
        };

        changed.map(props.on_change)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.hits.clear();
        if let Err(err) = self.sync(props.slides.len(), props.config) {
            tracing::warn!(%err, "carousel sync failed");
            return;
        }
        if !self.is_mounted() || area.is_empty() {
            return;
        }

        let nav = self.navigation();
        let arrows = props.controls.contains(Controls::ARROWS);
        let dots = props.controls.contains(Controls::DOTS);
        // Dots wrap below the arrows when both do not fit side by side
        let stacked = arrows && dots && !fits_one_row(area.width, nav.snap_count());
        let control_rows: u16 = match (props.controls.is_empty(), stacked) {
            (true, _) => 0,
            (false, false) => 1,
            (false, true) => 2,
        };
        let (track, controls_area) = if control_rows == 0 || area.height < control_rows + 2 {
            (area, None)
        } else {
            let [track, _, controls] = Layout::vertical([
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(control_rows),
            ])
            .areas(area);
            (track, Some(controls))
        };

        let columns = vec![Constraint::Fill(1); props.config.slides_to_show.max(1)];
        let slots = Layout::horizontal(columns)
            .spacing(props.config.spacing_columns())
            .split(track);
        for (position, (slot, index)) in slots.iter().zip(self.slides_in_view()).enumerate() {
            if let Some(slide) = props.slides.get(index) {
                let card = SlideCard::new(slide).highlighted(props.is_focused && position == 0);
                frame.render_widget(card, *slot);
            }
        }

        let Some(controls) = controls_area else {
            return;
        };
        let buf = frame.buffer_mut();
        let first = Rect { height: 1, ..controls };
        if arrows {
            render_arrows(buf, first, &nav, ControlStyle::Filled, &mut self.hits);
        }
        if dots {
            let dots_area = if stacked {
                Rect {
                    y: controls.y + 1,
                    height: 1,
                    ..controls
                }
            } else if arrows {
                let offset = (arrows_width() + 1).min(first.width);
                Rect {
                    x: first.x + offset,
                    width: first.width - offset,
                    ..first
                }
            } else {
                first
            };
            render_dots(buf, dots_area, &nav, ControlStyle::Filled, &mut self.hits);
        }
    }
}
