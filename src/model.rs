use serde::{Deserialize, Serialize};

/// Persisted and displayed text meaning "no routine chosen".
pub const NO_AUTON_TEXT: &str = "No Auton";
/// Grid label for a routine whose name can never be dispatched.
pub const INVALID_AUTON_TEXT: &str = "Invalid Auton";
/// Prefix of the status label.
pub const SELECTED_LABEL_PREFIX: &str = "Selected: ";
/// Text shown on the trigger control.
pub const TRIGGER_TEXT: &str = "Test Selected Auton";
/// Feedback pattern emitted when the trigger fires.
pub const TRIGGER_RUMBLE: &str = "- - -";

pub const DEFAULT_ROWS: u16 = 3;
pub const DEFAULT_COLS: u16 = 3;

/// Whether `name` can be shown, selected and dispatched by name.
///
/// Empty names and the sentinel texts collide with "no selection" and are rejected.
pub fn is_dispatchable(name: &str) -> bool {
    !name.is_empty() && name != NO_AUTON_TEXT && name != INVALID_AUTON_TEXT
}

/// Typed reference to a registered routine (its insertion index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoutineId(pub(crate) usize);

impl RoutineId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The single current choice of routine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    NoneSelected,
    /// A name that does not resolve to any registered routine.
    Invalid(String),
    Selected { id: RoutineId, name: String },
}

impl Selection {
    pub fn is_selected(&self) -> bool {
        matches!(self, Selection::Selected { .. })
    }

    /// Name shown to the operator and written to storage.
    pub fn name(&self) -> &str {
        match self {
            Selection::Selected { name, .. } => name,
            Selection::NoneSelected | Selection::Invalid(_) => NO_AUTON_TEXT,
        }
    }

    pub fn id(&self) -> Option<RoutineId> {
        match self {
            Selection::Selected { id, .. } => Some(*id),
            _ => None,
        }
    }
}

/// Dimensions of the selection grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: u16,
    pub cols: u16,
}

impl GridSize {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }

    pub fn cells(self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

/// Position of a grid cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellIndex {
    pub row: u16,
    pub col: u16,
}

impl CellIndex {
    pub fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }
}

/// The four surface elements that are shown and hidden together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Grid,
    StatusLabel,
    Trigger,
    TriggerLabel,
}

impl Element {
    pub const ALL: [Element; 4] = [
        Element::Grid,
        Element::StatusLabel,
        Element::Trigger,
        Element::TriggerLabel,
    ];
}

/// Interaction reported by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorEvent {
    CellChosen(CellIndex),
    TriggerActivated,
}

pub fn status_text(name: &str) -> String {
    format!("{SELECTED_LABEL_PREFIX}{name}")
}
