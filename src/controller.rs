//! Selector controller and its owning context.
//!
//! A [`SelectorContext`] is built once at startup and owns at most one live
//! [`Selector`]. The selector drives a [`SelectorSurface`], forwards operator
//! choices into the selection state and dispatches routines by name.

use crate::grid::{GridCell, GridLayout};
use crate::model::{
    is_dispatchable, status_text, Element, GridSize, RoutineId, Selection, SelectorEvent,
    TRIGGER_RUMBLE, TRIGGER_TEXT,
};
use crate::registry::Registry;
use crate::selection::SelectionState;
use crate::storage::SelectionStore;
use crate::surface::SelectorSurface;
use std::sync::Arc;

type SurfaceFactory = Box<dyn FnMut() -> Box<dyn SelectorSurface> + Send>;

pub struct SelectorContext {
    registry: Arc<Registry>,
    store: Arc<dyn SelectionStore>,
    grid: GridSize,
    make_surface: SurfaceFactory,
    instance: Option<Selector>,
}

impl SelectorContext {
    pub fn new<F>(
        registry: Registry,
        store: Arc<dyn SelectionStore>,
        grid: GridSize,
        make_surface: F,
    ) -> Self
    where
        F: FnMut() -> Box<dyn SelectorSurface> + Send + 'static,
    {
        Self {
            registry: Arc::new(registry),
            store,
            grid,
            make_surface: Box::new(make_surface),
            instance: None,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// The live selector, constructed (and loaded from storage) on first use.
    pub fn get(&mut self) -> &mut Selector {
        let Self {
            registry,
            store,
            grid,
            make_surface,
            instance,
        } = self;
        instance.get_or_insert_with(|| {
            Selector::new(registry.clone(), store.clone(), *grid, make_surface())
        })
    }

    pub fn is_live(&self) -> bool {
        self.instance.is_some()
    }

    /// Drop the live selector. The next [`get`](Self::get) starts from storage again.
    pub fn destroy(&mut self) {
        if self.instance.take().is_some() {
            tracing::debug!("selector destroyed");
        }
    }
}

pub struct Selector {
    registry: Arc<Registry>,
    store: Arc<dyn SelectionStore>,
    grid: GridSize,
    state: SelectionState,
    surface: Box<dyn SelectorSurface>,
    layout: Option<GridLayout>,
}

impl Selector {
    pub fn new(
        registry: Arc<Registry>,
        store: Arc<dyn SelectionStore>,
        grid: GridSize,
        surface: Box<dyn SelectorSurface>,
    ) -> Self {
        let mut state = SelectionState::new();
        state.load(&registry, store.as_ref());
        Self {
            registry,
            store,
            grid,
            state,
            surface,
            layout: None,
        }
    }

    /// Build the grid, trigger and status label on the surface.
    pub fn create(&mut self) {
        if self.layout.is_some() {
            self.surface.teardown();
        }
        let layout = GridLayout::build(&self.registry, self.grid);
        if layout.hidden() > 0 {
            tracing::warn!(
                hidden = layout.hidden(),
                rows = self.grid.rows,
                cols = self.grid.cols,
                "more routines than grid cells; extra routines are not shown"
            );
        }
        self.surface.build(
            &layout,
            TRIGGER_TEXT,
            &status_text(self.state.selected_name()),
        );
        self.layout = Some(layout);
        self.refresh_selected_cell();
    }

    pub fn is_created(&self) -> bool {
        self.layout.is_some()
    }

    pub fn layout(&self) -> Option<&GridLayout> {
        self.layout.as_ref()
    }

    /// Run the selected routine. Returns whether anything ran.
    pub fn run_selected_auton(&self) -> bool {
        match self.state.current() {
            Selection::Selected { name, .. } => self.run_auton(name),
            _ => {
                tracing::debug!("no routine selected; nothing to run");
                false
            }
        }
    }

    /// Run the first routine named `name`. Unknown names and the sentinels do nothing.
    pub fn run_auton(&self, name: &str) -> bool {
        if !is_dispatchable(name) {
            tracing::debug!(routine = name, "name cannot be dispatched");
            return false;
        }
        match self.registry.find(name) {
            Some((id, routine)) => {
                tracing::debug!(routine = name, index = id.index(), "running routine");
                routine.run();
                true
            }
            None => {
                tracing::debug!(routine = name, "no routine with that name");
                false
            }
        }
    }

    /// Show or hide all four surface elements together.
    pub fn set_visibility(&mut self, visible: bool) {
        if !self.is_created() {
            tracing::debug!("selector not created; visibility unchanged");
            return;
        }
        for element in Element::ALL {
            self.surface.set_hidden(element, !visible);
        }
    }

    pub fn is_visible(&self) -> bool {
        self.is_created() && Element::ALL.iter().all(|e| !self.surface.is_hidden(*e))
    }

    pub fn is_auton_selected(&self) -> bool {
        self.state.is_selected()
    }

    pub fn selected_auton_name(&self) -> &str {
        self.state.selected_name()
    }

    pub fn selection(&self) -> &Selection {
        self.state.current()
    }

    /// Select a registered routine, refresh the status label and persist.
    pub fn select_routine(&mut self, id: RoutineId) {
        let selection = match self.registry.get(id) {
            Some(routine) => Selection::parse(routine.name(), &self.registry),
            None => Selection::NoneSelected,
        };
        self.apply_selection(selection);
    }

    /// Entry point for interaction reported by the surface.
    pub fn handle_event(&mut self, event: SelectorEvent) {
        match event {
            SelectorEvent::TriggerActivated => {
                self.surface.feedback(TRIGGER_RUMBLE);
                self.run_selected_auton();
            }
            SelectorEvent::CellChosen(at) => {
                let Some(layout) = self.layout.as_ref() else {
                    tracing::debug!(?at, "cell event before create; ignored");
                    return;
                };
                let selection = match layout.cell(at) {
                    // Duplicate names resolve to the first registration, as dispatch does.
                    Some(GridCell::Routine { name, .. }) => Selection::parse(name, &self.registry),
                    Some(GridCell::Invalid(_)) | Some(GridCell::Empty) => Selection::NoneSelected,
                    None => {
                        tracing::debug!(?at, "cell outside grid; ignored");
                        return;
                    }
                };
                self.apply_selection(selection);
            }
        }
    }

    fn apply_selection(&mut self, selection: Selection) {
        self.state.set_selection(selection);
        let name = self.state.selected_name().to_string();
        tracing::debug!(selected = %name, "selection changed");
        if self.is_created() {
            self.surface.set_status(&status_text(&name));
            self.refresh_selected_cell();
        }
        self.state.save(self.store.as_ref());
    }

    fn refresh_selected_cell(&mut self) {
        let cell = match (self.layout.as_ref(), self.state.current().id()) {
            (Some(layout), Some(id)) => layout.position_of(id),
            _ => None,
        };
        self.surface.set_selected_cell(cell);
    }
}

impl Drop for Selector {
    fn drop(&mut self) {
        if self.layout.take().is_some() {
            self.surface.teardown();
        }
    }
}
