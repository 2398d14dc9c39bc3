//! Carousel engine contract and the built-in snap engine
//!
//! The engine owns scroll position and snapping. It is driven imperatively
//! (`scroll_prev`, `scroll_next`, `scroll_to`, `reinit`) and reports changes
//! through listeners registered with [`CarouselEngine::on`]. The adapter in
//! [`crate::adapter`] is the only intended caller.

use std::fmt;

use crate::config::EngineOptions;

/// Events an engine emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineEvent {
    /// The engine was re-initialized with new options or slides
    ReInit,
    /// The selected snap changed
    Select,
}

impl fmt::Display for EngineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineEvent::ReInit => f.write_str("reInit"),
            EngineEvent::Select => f.write_str("select"),
        }
    }
}

/// Identifies a listener registered on an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Read-only view of an engine, handed to listeners while an event is emitted.
pub trait ScrollApi {
    fn can_scroll_prev(&self) -> bool;
    fn can_scroll_next(&self) -> bool;
    /// Index of the selected snap
    fn selected_scroll_snap(&self) -> usize;
    /// Snap positions as scroll progress in `0.0..=1.0`
    fn scroll_snap_list(&self) -> Vec<f32>;
    /// Slide indices visible at the selected snap, in display order
    fn slides_in_view(&self) -> Vec<usize>;
}

/// Callback invoked for each emitted event.
pub type EngineListener = Box<dyn FnMut(&dyn ScrollApi)>;

/// An imperative, event-driven carousel engine.
pub trait CarouselEngine: ScrollApi {
    /// Build an engine for `slide_count` slides.
    fn new(options: EngineOptions, slide_count: usize) -> Self
    where
        Self: Sized;

    fn scroll_prev(&mut self);
    fn scroll_next(&mut self);
    /// Scroll to a snap; out-of-range indices are ignored.
    fn scroll_to(&mut self, index: usize);

    /// Rebuild all derived state from new options and emit [`EngineEvent::ReInit`].
    fn reinit(&mut self, options: EngineOptions, slide_count: usize);

    fn on(&mut self, event: EngineEvent, listener: EngineListener) -> ListenerId;
    /// Remove a listener. Returns `false` if it was not registered.
    fn off(&mut self, id: ListenerId) -> bool;

    /// Drop every listener and stop responding to scroll requests.
    fn destroy(&mut self);
}

struct Listener {
    id: ListenerId,
    event: EngineEvent,
    callback: EngineListener,
}

/// Deterministic engine that snaps to slide groups.
///
/// Snaps are the start slides of each group of `slides_to_scroll` slides.
/// Without looping the last snap is trimmed so the final group ends flush with
/// the last slide. Looping is only active when the slides overflow the view.
pub struct SnapEngine {
    options: EngineOptions,
    slide_count: usize,
    /// First slide index of each snap
    snaps: Vec<usize>,
    selected: usize,
    listeners: Vec<Listener>,
    next_listener: u64,
    destroyed: bool,
}

impl fmt::Debug for SnapEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapEngine")
            .field("options", &self.options)
            .field("slide_count", &self.slide_count)
            .field("snaps", &self.snaps)
            .field("selected", &self.selected)
            .field("listeners", &self.listeners.len())
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

impl SnapEngine {
    /// Number of slides the engine was built with.
    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn loop_active(&self) -> bool {
        self.options.looping && self.slide_count > self.options.slides_in_view
    }

    fn compute_snaps(options: &EngineOptions, slide_count: usize) -> Vec<usize> {
        if slide_count == 0 {
            return Vec::new();
        }
        let in_view = options.slides_in_view.max(1);
        let step = options.slides_to_scroll.step(in_view);

        if options.looping && slide_count > in_view {
            return (0..slide_count).step_by(step).collect();
        }

        let max_start = slide_count.saturating_sub(in_view);
        let mut snaps = Vec::new();
        let mut start = 0;
        loop {
            let snap = start.min(max_start);
            if snaps.last() != Some(&snap) {
                snaps.push(snap);
            }
            if snap >= max_start {
                break;
            }
            start += step;
        }
        snaps
    }

    fn select(&mut self, index: usize) {
        if index == self.selected {
            return;
        }
        self.selected = index;
        self.emit(EngineEvent::Select);
    }

    fn emit(&mut self, event: EngineEvent) {
        tracing::trace!(%event, selected = self.selected, "engine event");
        // Listeners only get `&dyn ScrollApi`, so none can register or remove
        // listeners while this runs.
        let mut listeners = std::mem::take(&mut self.listeners);
        for listener in listeners.iter_mut().filter(|l| l.event == event) {
            (listener.callback)(&*self);
        }
        self.listeners = listeners;
    }
}

impl ScrollApi for SnapEngine {
    fn can_scroll_prev(&self) -> bool {
        !self.destroyed && self.snaps.len() > 1 && (self.loop_active() || self.selected > 0)
    }

    fn can_scroll_next(&self) -> bool {
        !self.destroyed
            && self.snaps.len() > 1
            && (self.loop_active() || self.selected + 1 < self.snaps.len())
    }

    fn selected_scroll_snap(&self) -> usize {
        self.selected
    }

    fn scroll_snap_list(&self) -> Vec<f32> {
        if self.loop_active() {
            let count = self.slide_count as f32;
            return self.snaps.iter().map(|&s| s as f32 / count).collect();
        }
        let max_start = self.snaps.last().copied().unwrap_or(0);
        if max_start == 0 {
            return self.snaps.iter().map(|_| 0.0).collect();
        }
        self.snaps
            .iter()
            .map(|&s| s as f32 / max_start as f32)
            .collect()
    }

    fn slides_in_view(&self) -> Vec<usize> {
        let Some(&start) = self.snaps.get(self.selected) else {
            return Vec::new();
        };
        let in_view = self.options.slides_in_view.max(1);
        if self.loop_active() {
            (0..in_view)
                .map(|offset| (start + offset) % self.slide_count)
                .collect()
        } else {
            (start..(start + in_view).min(self.slide_count)).collect()
        }
    }
}

impl CarouselEngine for SnapEngine {
    fn new(options: EngineOptions, slide_count: usize) -> Self {
        Self {
            snaps: Self::compute_snaps(&options, slide_count),
            options,
            slide_count,
            selected: 0,
            listeners: Vec::new(),
            next_listener: 0,
            destroyed: false,
        }
    }

    fn scroll_prev(&mut self) {
        if !self.can_scroll_prev() {
            return;
        }
        let len = self.snaps.len();
        self.select((self.selected + len - 1) % len);
    }

    fn scroll_next(&mut self) {
        if !self.can_scroll_next() {
            return;
        }
        self.select((self.selected + 1) % self.snaps.len());
    }

    fn scroll_to(&mut self, index: usize) {
        if self.destroyed || index >= self.snaps.len() {
            return;
        }
        self.select(index);
    }

    fn reinit(&mut self, options: EngineOptions, slide_count: usize) {
        if self.destroyed {
            return;
        }
        // Keep the first visible slide in view across the rebuild.
        let anchor = self.snaps.get(self.selected).copied().unwrap_or(0);
        self.options = options;
        self.slide_count = slide_count;
        self.snaps = Self::compute_snaps(&options, slide_count);
        self.selected = self
            .snaps
            .iter()
            .rposition(|&start| start <= anchor)
            .unwrap_or(0);
        self.emit(EngineEvent::ReInit);
    }

    fn on(&mut self, event: EngineEvent, listener: EngineListener) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(Listener {
            id,
            event,
            callback: listener,
        });
        id
    }

    fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    fn destroy(&mut self) {
        self.listeners.clear();
        self.destroyed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SlidesToScroll;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn options(in_view: usize, looping: bool) -> EngineOptions {
        EngineOptions {
            slides_to_scroll: SlidesToScroll::Auto,
            looping,
            fade: false,
            slides_in_view: in_view,
        }
    }

    #[test]
    fn test_snaps_grouped_by_view() {
        let engine = SnapEngine::new(options(3, false), 6);
        assert_eq!(engine.scroll_snap_list(), vec![0.0, 1.0]);
        assert_eq!(engine.slides_in_view(), vec![0, 1, 2]);

        let engine = SnapEngine::new(options(1, false), 6);
        assert_eq!(engine.scroll_snap_list().len(), 6);
    }

    #[test]
    fn test_trailing_snap_is_trimmed() {
        // 5 slides, 2 in view: starts 0, 2, then 3 (flush with the end)
        let mut engine = SnapEngine::new(options(2, false), 5);
        assert_eq!(engine.scroll_snap_list().len(), 3);
        engine.scroll_to(2);
        assert_eq!(engine.slides_in_view(), vec![3, 4]);
    }

    #[test]
    fn test_fixed_step() {
        let opts = EngineOptions {
            slides_to_scroll: SlidesToScroll::Count(1),
            ..options(3, false)
        };
        let engine = SnapEngine::new(opts, 6);
        // starts 0, 1, 2, 3
        assert_eq!(engine.scroll_snap_list().len(), 4);
    }

    #[test]
    fn test_bounds_without_loop() {
        let mut engine = SnapEngine::new(options(3, false), 6);
        assert!(!engine.can_scroll_prev());
        assert!(engine.can_scroll_next());

        engine.scroll_prev();
        assert_eq!(engine.selected_scroll_snap(), 0);

        engine.scroll_next();
        assert_eq!(engine.selected_scroll_snap(), 1);
        assert!(engine.can_scroll_prev());
        assert!(!engine.can_scroll_next());

        engine.scroll_next();
        assert_eq!(engine.selected_scroll_snap(), 1);
    }

    #[test]
    fn test_loop_wraps() {
        let mut engine = SnapEngine::new(options(1, true), 3);
        assert!(engine.can_scroll_prev());
        engine.scroll_prev();
        assert_eq!(engine.selected_scroll_snap(), 2);
        engine.scroll_next();
        assert_eq!(engine.selected_scroll_snap(), 0);
    }

    #[test]
    fn test_loop_inactive_when_content_fits() {
        let engine = SnapEngine::new(options(3, true), 3);
        assert!(!engine.can_scroll_prev());
        assert!(!engine.can_scroll_next());
    }

    #[test]
    fn test_loop_view_wraps_slides() {
        let mut engine = SnapEngine::new(options(2, true), 5);
        // loop snaps: 0, 2, 4
        engine.scroll_to(2);
        assert_eq!(engine.slides_in_view(), vec![4, 0]);
    }

    #[test]
    fn test_events_emitted_in_order() {
        let mut engine = SnapEngine::new(options(1, false), 4);
        let log = Rc::new(RefCell::new(Vec::new()));

        let sink = log.clone();
        engine.on(
            EngineEvent::Select,
            Box::new(move |api: &dyn ScrollApi| {
                sink.borrow_mut().push(("select", api.selected_scroll_snap()))
            }),
        );
        let sink = log.clone();
        engine.on(
            EngineEvent::ReInit,
            Box::new(move |api: &dyn ScrollApi| {
                sink.borrow_mut().push(("reInit", api.selected_scroll_snap()))
            }),
        );

        engine.scroll_next();
        engine.scroll_to(3);
        engine.scroll_to(3); // unchanged, no event
        engine.scroll_to(9); // out of range, no event
        engine.reinit(options(2, false), 4);

        assert_eq!(
            *log.borrow(),
            vec![("select", 1), ("select", 3), ("reInit", 1)]
        );
    }

    #[test]
    fn test_off_and_destroy() {
        let mut engine = SnapEngine::new(options(1, false), 3);
        let hits = Rc::new(RefCell::new(0));
        let sink = hits.clone();
        let id = engine.on(
            EngineEvent::Select,
            Box::new(move |_: &dyn ScrollApi| *sink.borrow_mut() += 1),
        );

        engine.scroll_next();
        assert!(engine.off(id));
        assert!(!engine.off(id));
        engine.scroll_next();
        assert_eq!(*hits.borrow(), 1);

        engine.destroy();
        assert!(engine.is_destroyed());
        assert!(!engine.can_scroll_next());
        assert!(!engine.can_scroll_prev());
        assert_eq!(engine.listener_count(), 0);
    }

    #[test]
    fn test_reinit_keeps_anchor_slide() {
        let mut engine = SnapEngine::new(options(1, false), 6);
        engine.scroll_to(4);
        engine.reinit(options(2, false), 6);
        // snaps 0, 2, 4 -> slide 4 is the start of snap 2
        assert_eq!(engine.selected_scroll_snap(), 2);
        assert_eq!(engine.slides_in_view(), vec![4, 5]);
    }
}
