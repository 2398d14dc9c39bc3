//! Bridge from an imperative carousel engine to declarative navigation state
//!
//! [`CarouselAdapter`] owns engine instances and hands out opaque
//! [`EngineHandle`]s. For each engine it listens to `reInit` and `select`,
//! derives a [`NavigationState`], and republishes it to subscribers.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --initialize--> Active --release--> Released
//!                                 ^  |
//!                                 +--+ reconfigure
//! ```
//!
//! Every operation except [`CarouselAdapter::initialize`] fails with
//! [`CarouselError::StaleHandle`] once a handle is released, apart from
//! [`CarouselAdapter::release`] itself which is idempotent.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use tui_carousel_core::adapter::{CarouselAdapter, NavigationState};
//! use tui_carousel_core::responsive::resolve;
//!
//! let mut adapter: CarouselAdapter = CarouselAdapter::new();
//! let handle = adapter.initialize(resolve(1200.0), 6).unwrap();
//!
//! let seen = Rc::new(RefCell::new(Vec::<NavigationState>::new()));
//! let sink = seen.clone();
//! let unsubscribe = adapter
//!     .subscribe(handle, move |nav| sink.borrow_mut().push(nav.clone()))
//!     .unwrap();
//!
//! adapter.next(handle).unwrap();
//! assert_eq!(seen.borrow().len(), 2);
//! assert_eq!(seen.borrow()[1].selected_index, 1);
//!
//! unsubscribe.unsubscribe();
//! adapter.release(handle);
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::config::CarouselConfig;
use crate::engine::{CarouselEngine, EngineEvent, ListenerId, ScrollApi, SnapEngine};
use crate::error::{CarouselError, Result};

/// Opaque reference to one engine owned by a [`CarouselAdapter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EngineHandle(u64);

impl fmt::Display for EngineHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Navigation state derived from the engine after every `reInit`/`select`.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState {
    pub prev_disabled: bool,
    pub next_disabled: bool,
    pub selected_index: usize,
    pub snap_positions: Vec<f32>,
}

impl Default for NavigationState {
    /// State before an engine exists: nothing to select, both directions disabled.
    fn default() -> Self {
        Self {
            prev_disabled: true,
            next_disabled: true,
            selected_index: 0,
            snap_positions: Vec::new(),
        }
    }
}

impl NavigationState {
    /// Read the current state off an engine.
    pub fn from_engine(engine: &dyn ScrollApi) -> Self {
        Self {
            prev_disabled: !engine.can_scroll_prev(),
            next_disabled: !engine.can_scroll_next(),
            selected_index: engine.selected_scroll_snap(),
            snap_positions: engine.scroll_snap_list(),
        }
    }

    /// Number of snap points (one dot each).
    pub fn snap_count(&self) -> usize {
        self.snap_positions.len()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected_index == index
    }
}

type Callback = Box<dyn FnMut(&NavigationState)>;

struct Subscriber {
    id: u64,
    active: Rc<Cell<bool>>,
    callback: Callback,
}

struct Observers {
    state: NavigationState,
    subscribers: Vec<Subscriber>,
    next_id: u64,
}

impl Observers {
    fn new(state: NavigationState) -> Self {
        Self {
            state,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Store `state` and call every active subscriber with it, in subscription order.
    fn publish(observers: &Rc<RefCell<Observers>>, state: NavigationState) {
        tracing::trace!(
            selected = state.selected_index,
            snaps = state.snap_count(),
            prev_disabled = state.prev_disabled,
            next_disabled = state.next_disabled,
            "publishing navigation state"
        );
        let mut subscribers = {
            let mut inner = observers.borrow_mut();
            inner.state = state.clone();
            std::mem::take(&mut inner.subscribers)
        };

        for subscriber in subscribers.iter_mut() {
            // Checked per call: an earlier subscriber may have unsubscribed this one.
            if subscriber.active.get() {
                (subscriber.callback)(&state);
            }
        }

        let mut inner = observers.borrow_mut();
        subscribers.retain(|s| s.active.get());
        subscribers.append(&mut inner.subscribers);
        inner.subscribers = subscribers;
    }

    fn deactivate_all(&mut self) {
        for subscriber in self.subscribers.drain(..) {
            subscriber.active.set(false);
        }
    }
}

/// Detaches a listener registered with [`CarouselAdapter::subscribe`].
///
/// Dropping this value does not detach the listener; call
/// [`Unsubscribe::unsubscribe`]. Releasing the engine detaches it as well.
#[must_use = "keep the Unsubscribe to detach the listener later"]
pub struct Unsubscribe {
    id: u64,
    active: Rc<Cell<bool>>,
    observers: Weak<RefCell<Observers>>,
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unsubscribe")
            .field("id", &self.id)
            .field("active", &self.active.get())
            .finish()
    }
}

impl Unsubscribe {
    /// Stop further deliveries. Safe to call any number of times.
    pub fn unsubscribe(&self) {
        if !self.active.replace(false) {
            return;
        }
        if let Some(observers) = self.observers.upgrade() {
            // Busy while a publish is running; that publish prunes us instead.
            if let Ok(mut inner) = observers.try_borrow_mut() {
                inner.subscribers.retain(|s| s.id != self.id);
            }
        }
        tracing::debug!(subscriber = self.id, "navigation listener detached");
    }

    /// Whether the listener will still be called.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

struct Slot<E> {
    engine: E,
    config: CarouselConfig,
    slide_count: usize,
    observers: Rc<RefCell<Observers>>,
    engine_listeners: Vec<ListenerId>,
}

impl<E: CarouselEngine> Slot<E> {
    fn build(config: CarouselConfig, slide_count: usize) -> Self {
        let mut engine = E::new(config.engine_options(), slide_count);
        let observers = Rc::new(RefCell::new(Observers::new(NavigationState::from_engine(
            &engine,
        ))));

        let engine_listeners = [EngineEvent::ReInit, EngineEvent::Select]
            .into_iter()
            .map(|event| {
                let weak = Rc::downgrade(&observers);
                engine.on(
                    event,
                    Box::new(move |api: &dyn ScrollApi| {
                        if let Some(observers) = weak.upgrade() {
                            Observers::publish(&observers, NavigationState::from_engine(api));
                        }
                    }),
                )
            })
            .collect();

        Self {
            engine,
            config,
            slide_count,
            observers,
            engine_listeners,
        }
    }

    fn current(&self) -> NavigationState {
        self.observers.borrow().state.clone()
    }

    fn shutdown(mut self) {
        for id in self.engine_listeners.drain(..) {
            self.engine.off(id);
        }
        self.engine.destroy();
        self.observers.borrow_mut().deactivate_all();
    }
}

/// Owns carousel engines and republishes their navigation state.
///
/// Single-threaded: listeners run synchronously on the caller's thread in the
/// order the engine emits events.
pub struct CarouselAdapter<E: CarouselEngine = SnapEngine> {
    slots: HashMap<EngineHandle, Slot<E>>,
    next_handle: u64,
}

impl<E: CarouselEngine> fmt::Debug for CarouselAdapter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselAdapter")
            .field("active", &self.slots.len())
            .field("next_handle", &self.next_handle)
            .finish()
    }
}

impl<E: CarouselEngine> Default for CarouselAdapter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: CarouselEngine> CarouselAdapter<E> {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            next_handle: 0,
        }
    }

    /// Build an engine for `slide_count` slides.
    ///
    /// Zero slides is a caller error: views render nothing instead of
    /// initializing.
    pub fn initialize(
        &mut self,
        config: CarouselConfig,
        slide_count: usize,
    ) -> Result<EngineHandle> {
        if slide_count == 0 {
            tracing::warn!("refusing to initialize a carousel engine without slides");
            return Err(CarouselError::EngineInit { slide_count });
        }
        config.validate()?;

        let handle = EngineHandle(self.next_handle);
        self.next_handle += 1;

        tracing::debug!(
            %handle,
            slide_count,
            slides_to_show = config.slides_to_show,
            looping = config.looping,
            fade = config.fade,
            "carousel engine initialized"
        );
        self.slots.insert(handle, Slot::build(config, slide_count));
        Ok(handle)
    }

    /// Apply a new config to a live engine.
    ///
    /// The engine is re-initialized as a whole and fires `reInit`. An unchanged
    /// config is a no-op.
    pub fn reconfigure(&mut self, handle: EngineHandle, config: CarouselConfig) -> Result<()> {
        let slot = self.slot_mut(handle)?;
        if slot.config == config {
            return Ok(());
        }
        config.validate()?;

        tracing::debug!(
            %handle,
            slides_to_show = config.slides_to_show,
            spacing_px = config.slide_spacing_px,
            fade = config.fade,
            "carousel engine reconfigured"
        );
        slot.engine.reinit(config.engine_options(), slot.slide_count);
        slot.config = config;
        Ok(())
    }

    /// Re-initialize a live engine for a different number of slides.
    pub fn set_slide_count(&mut self, handle: EngineHandle, slide_count: usize) -> Result<()> {
        let slot = self.slot_mut(handle)?;
        if slide_count == 0 {
            return Err(CarouselError::EngineInit { slide_count });
        }
        if slot.slide_count == slide_count {
            return Ok(());
        }
        tracing::debug!(%handle, slide_count, "carousel slides changed");
        slot.slide_count = slide_count;
        slot.engine.reinit(slot.config.engine_options(), slide_count);
        Ok(())
    }

    /// Scroll one step back. No-op while `prev_disabled` is set.
    pub fn prev(&mut self, handle: EngineHandle) -> Result<()> {
        let slot = self.slot_mut(handle)?;
        let disabled = slot.observers.borrow().state.prev_disabled;
        if !disabled {
            slot.engine.scroll_prev();
        }
        Ok(())
    }

    /// Scroll one step forward. No-op while `next_disabled` is set.
    pub fn next(&mut self, handle: EngineHandle) -> Result<()> {
        let slot = self.slot_mut(handle)?;
        let disabled = slot.observers.borrow().state.next_disabled;
        if !disabled {
            slot.engine.scroll_next();
        }
        Ok(())
    }

    /// Scroll straight to a snap. Indices outside the snap list are ignored.
    pub fn goto_index(&mut self, handle: EngineHandle, index: usize) -> Result<()> {
        let slot = self.slot_mut(handle)?;
        let snaps = slot.observers.borrow().state.snap_count();
        if index >= snaps {
            tracing::debug!(%handle, index, snaps, "ignoring out-of-range goto");
            return Ok(());
        }
        slot.engine.scroll_to(index);
        Ok(())
    }

    /// Register a listener for navigation changes.
    ///
    /// The listener is called once right away with the current state, then
    /// once per engine `reInit`/`select` until unsubscribed or released.
    pub fn subscribe<F>(&mut self, handle: EngineHandle, on_change: F) -> Result<Unsubscribe>
    where
        F: FnMut(&NavigationState) + 'static,
    {
        let slot = self.slot(handle)?;
        let mut callback: Callback = Box::new(on_change);
        callback(&slot.current());

        let active = Rc::new(Cell::new(true));
        let mut observers = slot.observers.borrow_mut();
        let id = observers.next_id;
        observers.next_id += 1;
        observers.subscribers.push(Subscriber {
            id,
            active: active.clone(),
            callback,
        });
        tracing::debug!(%handle, subscriber = id, "navigation listener attached");

        Ok(Unsubscribe {
            id,
            active,
            observers: Rc::downgrade(&slot.observers),
        })
    }

    /// Destroy the engine and detach all of its listeners.
    ///
    /// Returns `false` if the handle was already released.
    pub fn release(&mut self, handle: EngineHandle) -> bool {
        match self.slots.remove(&handle) {
            Some(slot) => {
                slot.shutdown();
                tracing::debug!(%handle, "carousel engine released");
                true
            }
            None => false,
        }
    }

    /// Latest published navigation state.
    pub fn state(&self, handle: EngineHandle) -> Result<NavigationState> {
        Ok(self.slot(handle)?.current())
    }

    pub fn config(&self, handle: EngineHandle) -> Result<&CarouselConfig> {
        Ok(&self.slot(handle)?.config)
    }

    pub fn slide_count(&self, handle: EngineHandle) -> Result<usize> {
        Ok(self.slot(handle)?.slide_count)
    }

    /// Slide indices visible at the selected snap.
    pub fn slides_in_view(&self, handle: EngineHandle) -> Result<Vec<usize>> {
        Ok(self.slot(handle)?.engine.slides_in_view())
    }

    pub fn is_active(&self, handle: EngineHandle) -> bool {
        self.slots.contains_key(&handle)
    }

    /// Number of live engines.
    pub fn active_count(&self) -> usize {
        self.slots.len()
    }

    fn slot(&self, handle: EngineHandle) -> Result<&Slot<E>> {
        self.slots
            .get(&handle)
            .ok_or(CarouselError::StaleHandle { handle })
    }

    fn slot_mut(&mut self, handle: EngineHandle) -> Result<&mut Slot<E>> {
        self.slots
            .get_mut(&handle)
            .ok_or(CarouselError::StaleHandle { handle })
    }
}

impl<E: CarouselEngine> Drop for CarouselAdapter<E> {
    fn drop(&mut self) {
        for (_, slot) in self.slots.drain() {
            slot.shutdown();
        }
    }
}
