//! Selection state machine.
//!
//! Holds the operator's current choice and moves it to and from durable
//! storage. Every storage failure is logged and swallowed.

use crate::model::{is_dispatchable, Selection, NO_AUTON_TEXT};
use crate::registry::Registry;
use crate::storage::SelectionStore;

impl Selection {
    /// Resolve persisted or reported text against the registry.
    pub fn parse(text: &str, registry: &Registry) -> Selection {
        if text == NO_AUTON_TEXT {
            return Selection::NoneSelected;
        }
        if !is_dispatchable(text) {
            return Selection::Invalid(text.to_string());
        }
        match registry.find(text) {
            Some((id, routine)) => Selection::Selected {
                id,
                name: routine.name().to_string(),
            },
            None => Selection::Invalid(text.to_string()),
        }
    }
}

#[derive(Debug, Default)]
pub struct SelectionState {
    current: Selection,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current selection with whatever storage holds.
    ///
    /// Absent storage, the sentinel and unknown names all leave `NoneSelected`.
    pub fn load(&mut self, registry: &Registry, store: &dyn SelectionStore) {
        self.current = Selection::NoneSelected;
        let text = match store.read() {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::debug!("no saved selection");
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "saved selection unreadable, starting with none");
                return;
            }
        };
        match Selection::parse(&text, registry) {
            Selection::Invalid(name) => {
                tracing::warn!(%name, "saved selection does not match any routine");
            }
            loaded => {
                tracing::debug!(selected = loaded.name(), "loaded saved selection");
                self.current = loaded;
            }
        }
    }

    /// Persist the current name (or the sentinel). Failures are ignored.
    pub fn save(&self, store: &dyn SelectionStore) {
        if let Err(e) = store.write(self.current.name()) {
            tracing::warn!(error = %e, "failed to persist selection");
        }
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.current = match selection {
            Selection::Invalid(name) => {
                tracing::debug!(%name, "unresolvable selection treated as none");
                Selection::NoneSelected
            }
            other => other,
        };
    }

    pub fn current(&self) -> &Selection {
        &self.current
    }

    pub fn is_selected(&self) -> bool {
        self.current.is_selected()
    }

    pub fn selected_name(&self) -> &str {
        self.current.name()
    }
}
