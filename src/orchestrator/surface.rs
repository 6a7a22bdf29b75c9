//! Surface that forwards drawing instructions to the terminal thread.

use super::UiUpdate;
use auton_selector::{CellIndex, Element, GridLayout, SelectorSurface};
use std::collections::HashSet;
use tokio::sync::mpsc::UnboundedSender;

/// Drawing instructions for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SurfaceUpdate {
    Built {
        labels: Vec<Vec<String>>,
        trigger: String,
        status: String,
    },
    Status(String),
    SelectedCell(Option<CellIndex>),
    Hidden { element: Element, hidden: bool },
    Feedback(String),
    TornDown,
}

/// Mirrors element visibility locally so queries never wait on the UI thread.
pub(crate) struct ChannelSurface {
    tx: UnboundedSender<UiUpdate>,
    hidden: HashSet<Element>,
}

impl ChannelSurface {
    pub fn new(tx: UnboundedSender<UiUpdate>) -> Self {
        Self {
            tx,
            hidden: HashSet::new(),
        }
    }

    fn send(&self, update: SurfaceUpdate) {
        // Receiver is gone once the UI thread exits; nothing left to draw.
        let _ = self.tx.send(UiUpdate::Surface(update));
    }
}

impl SelectorSurface for ChannelSurface {
    fn build(&mut self, layout: &GridLayout, trigger_text: &str, status_text: &str) {
        self.hidden.clear();
        self.send(SurfaceUpdate::Built {
            labels: layout
                .rows()
                .map(|row| row.into_iter().map(str::to_string).collect())
                .collect(),
            trigger: trigger_text.to_string(),
            status: status_text.to_string(),
        });
    }

    fn set_status(&mut self, text: &str) {
        self.send(SurfaceUpdate::Status(text.to_string()));
    }

    fn set_hidden(&mut self, element: Element, hidden: bool) {
        if hidden {
            self.hidden.insert(element);
        } else {
            self.hidden.remove(&element);
        }
        self.send(SurfaceUpdate::Hidden { element, hidden });
    }

    fn is_hidden(&self, element: Element) -> bool {
        self.hidden.contains(&element)
    }

    fn set_selected_cell(&mut self, cell: Option<CellIndex>) {
        self.send(SurfaceUpdate::SelectedCell(cell));
    }

    fn feedback(&mut self, pattern: &str) {
        self.send(SurfaceUpdate::Feedback(pattern.to_string()));
    }

    fn teardown(&mut self) {
        self.hidden.clear();
        self.send(SurfaceUpdate::TornDown);
    }
}
