//! Register autonomous routines at startup, let an operator pick one, keep the
//! choice across restarts and dispatch it on command.

pub mod controller;
pub mod error;
pub mod grid;
pub mod model;
pub mod registry;
pub mod selection;
pub mod storage;
pub mod surface;

pub use controller::{Selector, SelectorContext};
pub use error::StorageError;
pub use grid::{GridCell, GridLayout};
pub use model::{CellIndex, Element, GridSize, RoutineId, Selection, SelectorEvent};
pub use registry::{Registry, Routine};
pub use selection::SelectionState;
pub use storage::{FileStore, MemoryStore, SelectionStore};
pub use surface::{HeadlessSurface, SelectorSurface};
