//! Grid layout for the selector.
//!
//! Routines fill one column top-to-bottom before moving to the next column.
//! Unused cells are padding; routines past the last cell are not shown.

use crate::model::{
    is_dispatchable, CellIndex, GridSize, RoutineId, INVALID_AUTON_TEXT, NO_AUTON_TEXT,
};
use crate::registry::Registry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCell {
    Routine { id: RoutineId, name: String },
    /// A registered routine whose name cannot be dispatched.
    Invalid(RoutineId),
    Empty,
}

impl GridCell {
    pub fn label(&self) -> &str {
        match self {
            GridCell::Routine { name, .. } => name,
            GridCell::Invalid(_) => INVALID_AUTON_TEXT,
            GridCell::Empty => NO_AUTON_TEXT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GridLayout {
    size: GridSize,
    // row-major storage
    cells: Vec<GridCell>,
    hidden: usize,
}

impl GridLayout {
    pub fn build(registry: &Registry, size: GridSize) -> Self {
        let rows = size.rows as usize;
        let mut cells = vec![GridCell::Empty; size.cells()];
        for (i, routine) in registry.all().iter().take(size.cells()).enumerate() {
            let (col, row) = (i / rows, i % rows);
            let id = RoutineId(i);
            cells[row * size.cols as usize + col] = if is_dispatchable(routine.name()) {
                GridCell::Routine {
                    id,
                    name: routine.name().to_string(),
                }
            } else {
                GridCell::Invalid(id)
            };
        }
        Self {
            size,
            cells,
            hidden: registry.len().saturating_sub(size.cells()),
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn cell(&self, at: CellIndex) -> Option<&GridCell> {
        if at.row >= self.size.rows || at.col >= self.size.cols {
            return None;
        }
        self.cells
            .get(at.row as usize * self.size.cols as usize + at.col as usize)
    }

    /// Where a routine is shown, if it fits.
    pub fn position_of(&self, id: RoutineId) -> Option<CellIndex> {
        let rows = self.size.rows as usize;
        if id.0 >= self.size.cells() {
            return None;
        }
        Some(CellIndex::new((id.0 % rows) as u16, (id.0 / rows) as u16))
    }

    /// Labels row by row.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&str>> {
        self.cells
            .chunks(self.size.cols.max(1) as usize)
            .map(|row| row.iter().map(GridCell::label).collect())
    }

    /// Number of routines that did not fit.
    pub fn hidden(&self) -> usize {
        self.hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(names: &[&str]) -> Registry {
        let mut r = Registry::new();
        for n in names {
            r.register(*n, || {});
        }
        r
    }

    #[test]
    fn fills_columns_first_and_pads() {
        let r = registry(&["A", "B", "C", "D"]);
        let layout = GridLayout::build(&r, GridSize::new(3, 3));
        let rows: Vec<Vec<&str>> = layout.rows().collect();
        assert_eq!(
            rows,
            vec![
                vec!["A", "D", NO_AUTON_TEXT],
                vec!["B", NO_AUTON_TEXT, NO_AUTON_TEXT],
                vec!["C", NO_AUTON_TEXT, NO_AUTON_TEXT],
            ]
        );
        assert_eq!(layout.hidden(), 0);
    }

    #[test]
    fn overflow_is_dropped() {
        let r = registry(&["A", "B", "C", "D", "E"]);
        let layout = GridLayout::build(&r, GridSize::new(2, 2));
        let rows: Vec<Vec<&str>> = layout.rows().collect();
        assert_eq!(rows, vec![vec!["A", "C"], vec!["B", "D"]]);
        assert_eq!(layout.hidden(), 1);
        assert_eq!(layout.position_of(RoutineId(4)), None);
    }

    #[test]
    fn position_matches_cell() {
        let r = registry(&["A", "B", "C", "D", "E"]);
        let layout = GridLayout::build(&r, GridSize::new(3, 2));
        let at = layout.position_of(RoutineId(3)).expect("fits");
        assert_eq!(at, CellIndex::new(0, 1));
        assert_eq!(layout.cell(at).map(GridCell::label), Some("D"));
    }

    #[test]
    fn undispatchable_names_are_marked_invalid() {
        let r = registry(&["", NO_AUTON_TEXT, "Ok"]);
        let layout = GridLayout::build(&r, GridSize::new(3, 1));
        assert_eq!(
            layout.cell(CellIndex::new(0, 0)),
            Some(&GridCell::Invalid(RoutineId(0)))
        );
        assert_eq!(
            layout.cell(CellIndex::new(1, 0)).map(GridCell::label),
            Some(INVALID_AUTON_TEXT)
        );
        assert_eq!(layout.cell(CellIndex::new(2, 0)).map(GridCell::label), Some("Ok"));
    }

    #[test]
    fn out_of_bounds_cell_is_none() {
        let layout = GridLayout::build(&Registry::new(), GridSize::new(3, 3));
        assert!(layout.cell(CellIndex::new(3, 0)).is_none());
        assert!(layout.cell(CellIndex::new(0, 3)).is_none());
        assert_eq!(layout.cell(CellIndex::new(2, 2)), Some(&GridCell::Empty));
    }
}
