//! Centralized state store with reducer pattern
//!
//! Lifted carousel state lives here: the container forwards every
//! [`NavigationState`](crate::adapter::NavigationState) as an action, the
//! reducer stores it, and the returned `bool` tells the main loop to re-render.
//!
//! Carousels report a navigation state on every engine event, including
//! re-inits that leave the page unchanged, so most dispatches are no-ops.
//! Reducers are expected to compare before storing and return `false` then.

use crate::Action;
use std::marker::PhantomData;

/// A reducer function that handles actions and mutates state
///
/// Returns `true` if the state changed and a re-render is needed.
pub type Reducer<S, A> = fn(&mut S, A) -> bool;

/// State container plus reducer
///
/// # Example
/// ```ignore
/// #[derive(Default)]
/// struct PageState {
///     nav: NavigationState,
/// }
///
/// #[derive(Clone, Debug)]
/// enum PageAction {
///     CarouselDidChange(NavigationState),
/// }
///
/// fn reducer(state: &mut PageState, action: PageAction) -> bool {
///     match action {
///         PageAction::CarouselDidChange(nav) => {
///             let changed = state.nav != nav;
///             state.nav = nav;
///             changed
///         }
///     }
/// }
///
/// let mut store = Store::new(PageState::default(), reducer);
/// let actions = carousel.handle_event(&event, props);
/// if store.dispatch_all(actions) {
///     terminal.draw(...)?;
/// }
/// ```
pub struct Store<S, A: Action> {
    state: S,
    reducer: Reducer<S, A>,
    _marker: PhantomData<A>,
}

impl<S, A: Action> Store<S, A> {
    pub fn new(state: S, reducer: Reducer<S, A>) -> Self {
        Self {
            state,
            reducer,
            _marker: PhantomData,
        }
    }

    /// Run the reducer. Returns `true` if a re-render is needed.
    pub fn dispatch(&mut self, action: A) -> bool {
        (self.reducer)(&mut self.state, action)
    }

    /// Run every action, in order, as returned by a component's `handle_event`.
    ///
    /// Returns `true` if any of them asked for a re-render.
    pub fn dispatch_all(&mut self, actions: impl IntoIterator<Item = A>) -> bool {
        actions
            .into_iter()
            .fold(false, |changed, action| self.dispatch(action) | changed)
    }

    pub fn state(&self) -> &S {
        &self.state
    }
}

/// Store whose dispatches pass through a [`Middleware`]
pub struct StoreWithMiddleware<S, A: Action, M: Middleware<A>> {
    store: Store<S, A>,
    middleware: M,
}

impl<S, A: Action, M: Middleware<A>> StoreWithMiddleware<S, A, M> {
    pub fn new(state: S, reducer: Reducer<S, A>, middleware: M) -> Self {
        Self {
            store: Store::new(state, reducer),
            middleware,
        }
    }

    pub fn dispatch(&mut self, action: A) -> bool {
        self.middleware.before(&action);
        let changed = self.store.dispatch(action.clone());
        self.middleware.after(&action, changed);
        changed
    }

    /// See [`Store::dispatch_all`]; every action passes through the middleware.
    pub fn dispatch_all(&mut self, actions: impl IntoIterator<Item = A>) -> bool {
        actions
            .into_iter()
            .fold(false, |changed, action| self.dispatch(action) | changed)
    }

    pub fn state(&self) -> &S {
        self.store.state()
    }

    pub fn middleware(&self) -> &M {
        &self.middleware
    }
}

/// Hook around each dispatch
pub trait Middleware<A: Action> {
    /// Called before the action reaches the reducer
    fn before(&mut self, action: &A);

    /// Called with the reducer's verdict
    fn after(&mut self, action: &A, state_changed: bool);
}

/// Middleware that logs dispatches through `tracing` and counts redraws.
///
/// Dispatches that change state are logged at debug. No-op dispatches (a
/// carousel re-reporting the page it is already on) go to trace unless the
/// middleware is [`verbose`](Self::verbose).
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    verbose: bool,
    dispatched: usize,
    redraws: usize,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also log no-op dispatches at debug, and every action before it runs.
    pub fn verbose() -> Self {
        Self {
            verbose: true,
            ..Self::default()
        }
    }

    /// Actions seen so far.
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    /// Actions that asked for a re-render.
    pub fn redraws(&self) -> usize {
        self.redraws
    }
}

impl<A: Action> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        self.dispatched += 1;
        if self.verbose {
            tracing::debug!(action = action.name(), "dispatching");
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if state_changed {
            self.redraws += 1;
            tracing::debug!(
                action = action.name(),
                redraws = self.redraws,
                dispatched = self.dispatched,
                "state changed"
            );
        } else if self.verbose {
            tracing::debug!(action = action.name(), "no change");
        } else {
            tracing::trace!(action = action.name(), "no change");
        }
    }
}
