//! Navigation state for the results panel.
//!
//! [`NavigationState`] is never mutated in place: every event produces
//! a new state through [`NavigationState::reduce`], which keeps the
//! machine testable without any UI.

use std::sync::Arc;

/// Inputs that move the navigation state.
#[derive(Debug)]
pub enum NavEvent<T> {
    /// The query text became empty
    QueryCleared,
    /// The latest aggregation settled with these results
    ResultsSettled(Vec<T>),
    SelectPrevious,
    SelectNext,
    Focus,
    Blur,
}

/// Coarse phase of the widget, for hosts and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing to show
    Idle,
    /// An aggregation is in flight; the panel keeps its previous look
    Pending,
    /// Results are on screen
    Showing,
    /// Results are cached but the panel is hidden
    Hidden,
}

#[derive(Debug)]
pub struct NavigationState<T> {
    results: Arc<Vec<T>>,
    selected_index: usize,
    results_visible: bool,
}

impl<T> Clone for NavigationState<T> {
    fn clone(&self) -> Self {
        Self {
            results: Arc::clone(&self.results),
            selected_index: self.selected_index,
            results_visible: self.results_visible,
        }
    }
}

impl<T> Default for NavigationState<T> {
    fn default() -> Self {
        Self {
            results: Arc::new(Vec::new()),
            selected_index: 0,
            results_visible: false,
        }
    }
}

impl<T> NavigationState<T> {
    pub fn results(&self) -> &[T] {
        &self.results
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn is_visible(&self) -> bool {
        self.results_visible
    }

    /// The item Enter would act on.
    pub fn selected(&self) -> Option<&T> {
        self.results.get(self.selected_index)
    }

    /// Phase as seen from the state alone. The widget reports
    /// [`Phase::Pending`] on top of this while an aggregation runs.
    pub fn phase(&self) -> Phase {
        if self.results_visible {
            Phase::Showing
        } else if self.results.is_empty() {
            Phase::Idle
        } else {
            Phase::Hidden
        }
    }

    fn showing(&self) -> bool {
        self.results_visible && !self.results.is_empty()
    }

    fn with_selection(&self, selected_index: usize) -> Self {
        Self {
            selected_index,
            ..self.clone()
        }
    }

    fn with_visibility(&self, results_visible: bool) -> Self {
        Self {
            results_visible,
            ..self.clone()
        }
    }

    /// Compute the state that follows `event`.
    pub fn reduce(&self, event: NavEvent<T>) -> Self {
        match event {
            NavEvent::QueryCleared => Self::default(),

            // Empty batches leave the panel as it was.
            NavEvent::ResultsSettled(items) if items.is_empty() => self.clone(),
            NavEvent::ResultsSettled(items) => Self {
                results: Arc::new(items),
                selected_index: 0,
                results_visible: true,
            },

            NavEvent::SelectPrevious if self.showing() && self.selected_index > 0 => {
                self.with_selection(self.selected_index - 1)
            }
            NavEvent::SelectNext
                if self.showing() && self.selected_index + 1 < self.results.len() =>
            {
                self.with_selection(self.selected_index + 1)
            }
            NavEvent::SelectPrevious | NavEvent::SelectNext => self.clone(),

            NavEvent::Focus => self.with_visibility(!self.results.is_empty()),
            NavEvent::Blur => self.with_visibility(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn showing(items: &[&'static str]) -> NavigationState<&'static str> {
        NavigationState::default().reduce(NavEvent::ResultsSettled(items.to_vec()))
    }

    #[test]
    fn test_initial_state_is_idle() {
        let state: NavigationState<u8> = NavigationState::default();
        assert!(state.results().is_empty());
        assert_eq!(state.selected_index(), 0);
        assert!(!state.is_visible());
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.selected().is_none());
    }

    #[test]
    fn test_settled_results_show_panel() {
        let state = showing(&["a", "b", "c"]);
        assert_eq!(state.results(), &["a", "b", "c"]);
        assert_eq!(state.selected_index(), 0);
        assert!(state.is_visible());
        assert_eq!(state.phase(), Phase::Showing);
    }

    #[test]
    fn test_new_results_reset_selection() {
        let state = showing(&["a", "b", "c"])
            .reduce(NavEvent::SelectNext)
            .reduce(NavEvent::SelectNext);
        assert_eq!(state.selected_index(), 2);

        let state = state.reduce(NavEvent::ResultsSettled(vec!["x", "y"]));
        assert_eq!(state.selected_index(), 0);
        assert_eq!(state.selected(), Some(&"x"));
    }

    #[test]
    fn test_empty_settle_changes_nothing() {
        let before = showing(&["a", "b"]).reduce(NavEvent::SelectNext);
        let after = before.reduce(NavEvent::ResultsSettled(Vec::new()));
        assert_eq!(after.results(), before.results());
        assert_eq!(after.selected_index(), 1);
        assert!(after.is_visible());

        let idle: NavigationState<u8> = NavigationState::default();
        let after = idle.reduce(NavEvent::ResultsSettled(Vec::new()));
        assert_eq!(after.phase(), Phase::Idle);
    }

    #[test]
    fn test_up_does_not_wrap() {
        let state = showing(&["a", "b", "c"]).reduce(NavEvent::SelectPrevious);
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn test_down_does_not_wrap() {
        let state = showing(&["a", "b", "c"])
            .reduce(NavEvent::SelectNext)
            .reduce(NavEvent::SelectNext)
            .reduce(NavEvent::SelectNext);
        assert_eq!(state.selected_index(), 2);
        assert_eq!(state.selected(), Some(&"c"));
    }

    #[test]
    fn test_up_and_down_move_selection() {
        let state = showing(&["a", "b", "c"])
            .reduce(NavEvent::SelectNext)
            .reduce(NavEvent::SelectNext)
            .reduce(NavEvent::SelectPrevious);
        assert_eq!(state.selected_index(), 1);
    }

    #[test]
    fn test_navigation_ignored_while_hidden() {
        let state = showing(&["a", "b"])
            .reduce(NavEvent::Blur)
            .reduce(NavEvent::SelectNext);
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn test_navigation_on_empty_results_is_noop() {
        let state: NavigationState<u8> = NavigationState::default()
            .reduce(NavEvent::SelectNext)
            .reduce(NavEvent::SelectPrevious);
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn test_query_cleared_resets_everything() {
        let state = showing(&["a", "b"])
            .reduce(NavEvent::SelectNext)
            .reduce(NavEvent::QueryCleared);
        assert!(state.results().is_empty());
        assert_eq!(state.selected_index(), 0);
        assert!(!state.is_visible());
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn test_blur_keeps_results_and_selection() {
        let state = showing(&["a", "b"])
            .reduce(NavEvent::SelectNext)
            .reduce(NavEvent::Blur);
        assert!(!state.is_visible());
        assert_eq!(state.phase(), Phase::Hidden);
        assert_eq!(state.results(), &["a", "b"]);
        assert_eq!(state.selected_index(), 1);

        let state = state.reduce(NavEvent::Focus);
        assert!(state.is_visible());
        assert_eq!(state.selected(), Some(&"b"));
    }

    #[test]
    fn test_focus_without_results_stays_hidden() {
        let state: NavigationState<u8> = NavigationState::default().reduce(NavEvent::Focus);
        assert!(!state.is_visible());
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn test_reduce_leaves_previous_state_intact() {
        let before = showing(&["a", "b"]);
        let _after = before.reduce(NavEvent::SelectNext);
        assert_eq!(before.selected_index(), 0);
    }
}
