//! The UI surface the selector drives.
//!
//! Rendering and input delivery live behind [`SelectorSurface`]; the selector
//! only tells the surface what to show and receives [`SelectorEvent`]s back.
//!
//! [`SelectorEvent`]: crate::model::SelectorEvent

use crate::grid::GridLayout;
use crate::model::{CellIndex, Element};
use std::collections::HashSet;

pub trait SelectorSurface: Send {
    /// Create the grid, trigger control, trigger label and status label.
    fn build(&mut self, layout: &GridLayout, trigger_text: &str, status_text: &str);

    fn set_status(&mut self, text: &str);

    fn set_hidden(&mut self, element: Element, hidden: bool);

    fn is_hidden(&self, element: Element) -> bool;

    /// Mark the grid cell holding the selected routine, or clear the mark.
    fn set_selected_cell(&mut self, _cell: Option<CellIndex>) {}

    /// Operator feedback when the trigger fires (controller rumble on a robot).
    fn feedback(&mut self, _pattern: &str) {}

    /// Release every element created by [`build`](Self::build).
    fn teardown(&mut self);
}

/// Surface that only records what it was told. Used by non-interactive modes and tests.
#[derive(Debug, Default, Clone)]
pub struct HeadlessSurface {
    built: bool,
    labels: Vec<Vec<String>>,
    trigger_text: String,
    status: String,
    selected_cell: Option<CellIndex>,
    hidden: HashSet<Element>,
    feedback: Vec<String>,
    teardowns: usize,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    pub fn labels(&self) -> &[Vec<String>] {
        &self.labels
    }

    pub fn trigger_text(&self) -> &str {
        &self.trigger_text
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn selected_cell(&self) -> Option<CellIndex> {
        self.selected_cell
    }

    pub fn feedback_log(&self) -> &[String] {
        &self.feedback
    }

    pub fn teardowns(&self) -> usize {
        self.teardowns
    }
}

impl SelectorSurface for HeadlessSurface {
    fn build(&mut self, layout: &GridLayout, trigger_text: &str, status_text: &str) {
        self.built = true;
        self.labels = layout
            .rows()
            .map(|row| row.into_iter().map(str::to_string).collect())
            .collect();
        self.trigger_text = trigger_text.to_string();
        self.status = status_text.to_string();
        self.hidden.clear();
    }

    fn set_status(&mut self, text: &str) {
        self.status = text.to_string();
    }

    fn set_hidden(&mut self, element: Element, hidden: bool) {
        if hidden {
            self.hidden.insert(element);
        } else {
            self.hidden.remove(&element);
        }
    }

    fn is_hidden(&self, element: Element) -> bool {
        self.hidden.contains(&element)
    }

    fn set_selected_cell(&mut self, cell: Option<CellIndex>) {
        self.selected_cell = cell;
    }

    fn feedback(&mut self, pattern: &str) {
        self.feedback.push(pattern.to_string());
    }

    fn teardown(&mut self) {
        self.built = false;
        self.labels.clear();
        self.selected_cell = None;
        self.teardowns += 1;
    }
}
