use crate::orchestrator::{SurfaceUpdate, UiUpdate};
use auton_selector::{CellIndex, Element};
use std::collections::HashSet;

/// Everything the terminal thread draws. Owned by the UI thread only.
#[derive(Debug, Default)]
pub struct UiState {
    pub built: bool,
    pub labels: Vec<Vec<String>>,
    pub trigger: String,
    pub status: String,
    /// Cell holding the selected routine; duplicates of its name stay unmarked.
    pub selected_cell: Option<CellIndex>,
    pub hidden: HashSet<Element>,
    pub cursor: CellIndex,
    pub info: String,
    pub show_help: bool,
    /// Set when the trigger fired; drawn as a short flash.
    pub rumble: Option<String>,
}

impl UiState {
    pub fn apply(&mut self, update: UiUpdate) {
        match update {
            UiUpdate::Info(msg) => self.info = msg,
            UiUpdate::Surface(SurfaceUpdate::Built {
                labels,
                trigger,
                status,
            }) => {
                self.built = true;
                self.labels = labels;
                self.trigger = trigger;
                self.status = status;
                self.selected_cell = None;
                self.hidden.clear();
                self.clamp_cursor();
            }
            UiUpdate::Surface(SurfaceUpdate::Status(text)) => self.status = text,
            UiUpdate::Surface(SurfaceUpdate::SelectedCell(cell)) => self.selected_cell = cell,
            UiUpdate::Surface(SurfaceUpdate::Hidden { element, hidden }) => {
                if hidden {
                    self.hidden.insert(element);
                } else {
                    self.hidden.remove(&element);
                }
            }
            UiUpdate::Surface(SurfaceUpdate::Feedback(pattern)) => {
                self.rumble = Some(pattern);
            }
            UiUpdate::Surface(SurfaceUpdate::TornDown) => {
                self.built = false;
                self.labels.clear();
                self.selected_cell = None;
                self.hidden.clear();
            }
        }
    }

    pub fn rows(&self) -> u16 {
        self.labels.len() as u16
    }

    pub fn cols(&self) -> u16 {
        self.labels.first().map_or(0, |r| r.len() as u16)
    }

    pub fn is_visible(&self, element: Element) -> bool {
        self.built && !self.hidden.contains(&element)
    }

    /// Move the cursor, stopping at the grid edges.
    pub fn move_cursor(&mut self, d_row: i32, d_col: i32) {
        if self.rows() == 0 || self.cols() == 0 {
            return;
        }
        let row = (self.cursor.row as i32 + d_row).clamp(0, self.rows() as i32 - 1);
        let col = (self.cursor.col as i32 + d_col).clamp(0, self.cols() as i32 - 1);
        self.cursor = CellIndex::new(row as u16, col as u16);
    }

    pub fn label_at(&self, at: CellIndex) -> Option<&str> {
        self.labels
            .get(at.row as usize)
            .and_then(|r| r.get(at.col as usize))
            .map(String::as_str)
    }

    fn clamp_cursor(&mut self) {
        self.move_cursor(0, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built(labels: &[&[&str]]) -> UiState {
        let mut state = UiState::default();
        state.apply(UiUpdate::Surface(SurfaceUpdate::Built {
            labels: labels
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
            trigger: "Test Selected Auton".into(),
            status: "Selected: No Auton".into(),
        }));
        state
    }

    #[test]
    fn cursor_stops_at_edges() {
        let mut state = built(&[&["A", "C"], &["B", "No Auton"]]);
        state.move_cursor(-1, -1);
        assert_eq!(state.cursor, CellIndex::new(0, 0));
        state.move_cursor(5, 5);
        assert_eq!(state.cursor, CellIndex::new(1, 1));
        assert_eq!(state.label_at(state.cursor), Some("No Auton"));
    }

    #[test]
    fn cursor_clamped_after_smaller_rebuild() {
        let mut state = built(&[&["A", "B", "C"], &["D", "E", "F"]]);
        state.move_cursor(1, 2);
        state.apply(UiUpdate::Surface(SurfaceUpdate::Built {
            labels: vec![vec!["A".into()]],
            trigger: String::new(),
            status: String::new(),
        }));
        assert_eq!(state.cursor, CellIndex::new(0, 0));
    }

    #[test]
    fn hidden_elements_and_teardown() {
        let mut state = built(&[&["A"]]);
        state.apply(UiUpdate::Surface(SurfaceUpdate::Hidden {
            element: Element::Grid,
            hidden: true,
        }));
        assert!(!state.is_visible(Element::Grid));
        assert!(state.is_visible(Element::StatusLabel));

        state.apply(UiUpdate::Surface(SurfaceUpdate::TornDown));
        assert!(!state.is_visible(Element::StatusLabel));
        assert_eq!(state.rows(), 0);
    }

    #[test]
    fn selected_cell_follows_updates_not_labels() {
        let mut state = built(&[&["Dup", "Dup"]]);
        assert_eq!(state.selected_cell, None);
        state.apply(UiUpdate::Surface(SurfaceUpdate::Status(
            "Selected: Dup".into(),
        )));
        state.apply(UiUpdate::Surface(SurfaceUpdate::SelectedCell(Some(
            CellIndex::new(0, 0),
        ))));
        assert_eq!(state.status, "Selected: Dup");
        assert_eq!(state.selected_cell, Some(CellIndex::new(0, 0)));

        state.apply(UiUpdate::Surface(SurfaceUpdate::TornDown));
        assert_eq!(state.selected_cell, None);
    }
}
