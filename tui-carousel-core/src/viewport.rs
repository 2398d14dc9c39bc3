//! Shared viewport width with explicit resize subscriptions
//!
//! The terminal is the "window": one [`Viewport`] is created by the app and
//! cloned into every carousel that needs to react to resizes. Carousels
//! subscribe when they activate and drop their [`ViewportSubscription`] when
//! they deactivate, so any number of them can coexist.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::config::columns_to_px;

type ResizeListener = Rc<RefCell<dyn FnMut(f32)>>;

struct ViewportInner {
    width_px: f32,
    listeners: Vec<(u64, ResizeListener)>,
    next_id: u64,
}

/// Cloneable handle to the current viewport width.
#[derive(Clone)]
pub struct Viewport {
    inner: Rc<RefCell<ViewportInner>>,
}

impl fmt::Debug for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Viewport")
            .field("width_px", &inner.width_px)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl Viewport {
    pub fn new(width_px: f32) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ViewportInner {
                width_px,
                listeners: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Viewport for a terminal `columns` wide.
    pub fn from_columns(columns: u16) -> Self {
        Self::new(columns_to_px(columns))
    }

    pub fn width_px(&self) -> f32 {
        self.inner.borrow().width_px
    }

    /// Call `on_resize` with the new width after every [`Viewport::resize`].
    ///
    /// The current width is not replayed; read [`Viewport::width_px`] when
    /// activating.
    pub fn subscribe(&self, on_resize: impl FnMut(f32) + 'static) -> ViewportSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let listener: ResizeListener = Rc::new(RefCell::new(on_resize));
        inner.listeners.push((id, listener));
        tracing::debug!(listener = id, "viewport listener attached");
        ViewportSubscription {
            id,
            viewport: Rc::downgrade(&self.inner),
        }
    }

    /// Record a new width and notify listeners in subscription order.
    pub fn resize(&self, width_px: f32) {
        let listeners: Vec<ResizeListener> = {
            let mut inner = self.inner.borrow_mut();
            inner.width_px = width_px;
            inner.listeners.iter().map(|(_, l)| l.clone()).collect()
        };
        tracing::debug!(width_px, listeners = listeners.len(), "viewport resized");
        for listener in listeners {
            // A listener that resizes the viewport from inside its own callback
            // is skipped for the nested notification.
            if let Ok(mut callback) = listener.try_borrow_mut() {
                (&mut *callback)(width_px);
            }
        }
    }

    /// Resize from a terminal width in columns.
    pub fn resize_columns(&self, columns: u16) {
        self.resize(columns_to_px(columns));
    }

    /// Number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Keeps a resize listener attached; dropping it detaches the listener.
#[must_use = "the listener is detached as soon as the subscription is dropped"]
pub struct ViewportSubscription {
    id: u64,
    viewport: Weak<RefCell<ViewportInner>>,
}

impl fmt::Debug for ViewportSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportSubscription")
            .field("id", &self.id)
            .finish()
    }
}

impl ViewportSubscription {
    /// Detach now instead of at drop.
    pub fn cancel(self) {}
}

impl Drop for ViewportSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.viewport.upgrade() {
            if let Ok(mut inner) = inner.try_borrow_mut() {
                inner.listeners.retain(|(id, _)| *id != self.id);
                tracing::debug!(listener = self.id, "viewport listener detached");
            }
        }
    }
}
