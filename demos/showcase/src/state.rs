//! Showcase state, actions and reducer

use tui_carousel::{Action, NavigationState};

/// What the showcase knows: which section has focus and where each carousel is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub focus: usize,
    /// Last reported navigation state per section
    pub navigation: Vec<NavigationState>,
    pub terminal_size: (u16, u16),
}

impl AppState {
    pub fn new(section_count: usize) -> Self {
        Self {
            focus: 0,
            navigation: vec![NavigationState::default(); section_count],
            terminal_size: (0, 0),
        }
    }

    pub fn section_count(&self) -> usize {
        self.navigation.len()
    }

    pub fn focused_navigation(&self) -> Option<&NavigationState> {
        self.navigation.get(self.focus)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    FocusNext,
    FocusPrev,
    FocusSet(usize),
    /// A carousel changed; tagged with its section index by the main loop
    CarouselDidChange(usize, NavigationState),
    UiTerminalResize(u16, u16),
    Quit,
}

impl Action for AppAction {
    fn name(&self) -> &'static str {
        match self {
            AppAction::FocusNext => "FocusNext",
            AppAction::FocusPrev => "FocusPrev",
            AppAction::FocusSet(_) => "FocusSet",
            AppAction::CarouselDidChange(..) => "CarouselDidChange",
            AppAction::UiTerminalResize(..) => "UiTerminalResize",
            AppAction::Quit => "Quit",
        }
    }
}

/// Returns true when the screen needs a redraw.
pub fn reducer(state: &mut AppState, action: AppAction) -> bool {
    let count = state.section_count();
    match action {
        AppAction::FocusNext => {
            if count == 0 {
                return false;
            }
            state.focus = (state.focus + 1) % count;
            true
        }
        AppAction::FocusPrev => {
            if count == 0 {
                return false;
            }
            state.focus = (state.focus + count - 1) % count;
            true
        }
        AppAction::FocusSet(index) => {
            if index >= count || index == state.focus {
                return false;
            }
            state.focus = index;
            true
        }
        AppAction::CarouselDidChange(index, nav) => match state.navigation.get_mut(index) {
            Some(slot) if *slot != nav => {
                *slot = nav;
                true
            }
            _ => false,
        },
        AppAction::UiTerminalResize(width, height) => {
            state.terminal_size = (width, height);
            true
        }
        AppAction::Quit => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_carousel::{assert_emitted, count_emitted, Store, TestHarness};

    fn nav(selected_index: usize) -> NavigationState {
        NavigationState {
            selected_index,
            snap_positions: vec![0.0, 0.5, 1.0],
            prev_disabled: selected_index == 0,
            next_disabled: selected_index == 2,
        }
    }

    #[test]
    fn test_focus_cycles() {
        let mut store = Store::new(AppState::new(3), reducer);
        assert!(store.dispatch(AppAction::FocusNext));
        assert!(store.dispatch(AppAction::FocusNext));
        assert!(store.dispatch(AppAction::FocusNext));
        assert_eq!(store.state().focus, 0);

        assert!(store.dispatch(AppAction::FocusPrev));
        assert_eq!(store.state().focus, 2);
    }

    #[test]
    fn test_focus_set_ignores_same_or_out_of_range() {
        let mut state = AppState::new(2);
        assert!(!reducer(&mut state, AppAction::FocusSet(0)));
        assert!(!reducer(&mut state, AppAction::FocusSet(5)));
        assert!(reducer(&mut state, AppAction::FocusSet(1)));
        assert_eq!(state.focus, 1);
    }

    #[test]
    fn test_empty_page_has_no_focus_moves() {
        let mut state = AppState::new(0);
        assert!(!reducer(&mut state, AppAction::FocusNext));
        assert!(!reducer(&mut state, AppAction::FocusPrev));
        assert!(state.focused_navigation().is_none());
    }

    #[test]
    fn test_carousel_change_recorded_per_section() {
        let mut state = AppState::new(2);
        assert!(reducer(&mut state, AppAction::CarouselDidChange(1, nav(1))));
        assert!(!reducer(&mut state, AppAction::CarouselDidChange(1, nav(1))));
        assert!(!reducer(&mut state, AppAction::CarouselDidChange(7, nav(1))));

        assert_eq!(state.navigation[0], NavigationState::default());
        assert_eq!(state.navigation[1].selected_index, 1);
    }

    #[test]
    fn test_actions_from_harness() {
        let mut harness = TestHarness::<AppState, AppAction>::new(AppState::new(2));
        harness.emit(AppAction::FocusNext);
        harness.emit(AppAction::UiTerminalResize(120, 40));
        harness.emit(AppAction::Quit);

        let actions = harness.drain_emitted();
        assert_eq!(count_emitted!(actions, AppAction::FocusNext), 1);
        assert_emitted!(actions, AppAction::UiTerminalResize(w, _) if *w == 120);

        let mut redraws = 0;
        for action in actions {
            if reducer(&mut harness.state, action) {
                redraws += 1;
            }
        }
        assert_eq!(redraws, 2);
        assert_eq!(harness.state.focus, 1);
        assert_eq!(harness.state.terminal_size, (120, 40));
    }
}
