//! Scrolling window over the result list for `max_viewable_results`.
//!
//! Presentation only: the viewport never changes which results exist,
//! it only decides which of them a host should draw.

use super::state::NavigationState;

/// One drawable result row.
#[derive(Debug, PartialEq, Eq)]
pub struct Row<'a, T> {
    pub index: usize,
    pub item: &'a T,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    height: Option<usize>,
    offset: usize,
}

impl Viewport {
    /// `None` shows every row.
    pub fn new(height: Option<usize>) -> Self {
        Self { height, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Scroll as little as possible to keep `selected` in view.
    pub fn follow(self, selected: usize, len: usize) -> Self {
        let Some(height) = self.height.filter(|h| *h > 0) else {
            return Self { offset: 0, ..self };
        };

        let max_offset = len.saturating_sub(height);
        let mut offset = self.offset.min(max_offset);
        if selected < offset {
            offset = selected;
        } else if selected >= offset + height {
            offset = selected + 1 - height;
        }
        Self { offset, ..self }
    }

    /// Rows to draw for `state`; empty while the panel is hidden.
    pub fn rows<'a, T>(&self, state: &'a NavigationState<T>) -> Vec<Row<'a, T>> {
        if !state.is_visible() {
            return Vec::new();
        }
        let take = self.height.unwrap_or(usize::MAX);
        state
            .results()
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(take)
            .map(|(index, item)| Row {
                index,
                item,
                selected: index == state.selected_index(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::NavEvent;

    #[test]
    fn test_unbounded_shows_everything() {
        let state = NavigationState::default().reduce(NavEvent::ResultsSettled(vec![1, 2, 3]));
        let viewport = Viewport::new(None).follow(2, 3);
        let rows = viewport.rows(&state);
        assert_eq!(rows.len(), 3);
        assert!(rows[0].selected);
    }

    #[test]
    fn test_follow_scrolls_down_minimally() {
        let viewport = Viewport::new(Some(3));
        let viewport = viewport.follow(2, 10);
        assert_eq!(viewport.offset(), 0);
        let viewport = viewport.follow(3, 10);
        assert_eq!(viewport.offset(), 1);
        let viewport = viewport.follow(7, 10);
        assert_eq!(viewport.offset(), 5);
    }

    #[test]
    fn test_follow_scrolls_up_minimally() {
        let viewport = Viewport::new(Some(3)).follow(7, 10);
        let viewport = viewport.follow(6, 10);
        assert_eq!(viewport.offset(), 5);
        let viewport = viewport.follow(4, 10);
        assert_eq!(viewport.offset(), 4);
    }

    #[test]
    fn test_follow_clamps_when_results_shrink() {
        let viewport = Viewport::new(Some(3)).follow(9, 10);
        assert_eq!(viewport.offset(), 7);
        let viewport = viewport.follow(0, 2);
        assert_eq!(viewport.offset(), 0);
    }

    #[test]
    fn test_rows_window_and_selection() {
        let state = NavigationState::default()
            .reduce(NavEvent::ResultsSettled(vec!["a", "b", "c", "d", "e"]))
            .reduce(NavEvent::SelectNext)
            .reduce(NavEvent::SelectNext)
            .reduce(NavEvent::SelectNext);
        let viewport = Viewport::new(Some(2)).follow(state.selected_index(), 5);
        let rows = viewport.rows(&state);
        assert_eq!(
            rows,
            vec![
                Row { index: 2, item: &"c", selected: false },
                Row { index: 3, item: &"d", selected: true },
            ]
        );
    }

    #[test]
    fn test_hidden_panel_has_no_rows() {
        let state = NavigationState::default()
            .reduce(NavEvent::ResultsSettled(vec![1]))
            .reduce(NavEvent::Blur);
        assert!(Viewport::new(Some(5)).rows(&state).is_empty());
    }
}
