//! Append-only collection of autonomous routines.
//!
//! The registry is filled once at startup and shared read-only afterwards.
//! Name lookups are exact, case-sensitive and return the first registered match.

use crate::model::RoutineId;
use std::fmt;

type Action = Box<dyn Fn() + Send + Sync>;

/// A named autonomous action.
pub struct Routine {
    name: String,
    action: Action,
}

impl Routine {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the routine synchronously on the calling thread.
    pub fn run(&self) {
        (self.action)()
    }
}

impl fmt::Debug for Routine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Routine").field("name", &self.name).finish()
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    routines: Vec<Routine>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a routine. Duplicate names are accepted; lookups pick the first.
    pub fn register<F>(&mut self, name: impl Into<String>, action: F) -> RoutineId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = RoutineId(self.routines.len());
        self.routines.push(Routine {
            name: name.into(),
            action: Box::new(action),
        });
        id
    }

    /// All routines in registration order.
    pub fn all(&self) -> &[Routine] {
        &self.routines
    }

    pub fn get(&self, id: RoutineId) -> Option<&Routine> {
        self.routines.get(id.0)
    }

    pub fn find(&self, name: &str) -> Option<(RoutineId, &Routine)> {
        self.iter().find(|(_, r)| r.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RoutineId, &Routine)> {
        self.routines
            .iter()
            .enumerate()
            .map(|(i, r)| (RoutineId(i), r))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routines.iter().map(|r| r.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.routines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routines.is_empty()
    }
}

/// Register a routine named after an identifier.
///
/// ```
/// use auton_selector::{auton, Registry};
///
/// fn skills() {}
///
/// let mut registry = Registry::new();
/// auton!(registry, BlueLeft, {
///     let _ = 1 + 1;
/// });
/// auton!(registry, Skills => skills);
/// assert_eq!(registry.names().collect::<Vec<_>>(), ["BlueLeft", "Skills"]);
/// ```
#[macro_export]
macro_rules! auton {
    ($registry:expr, $name:ident => $action:expr) => {
        $registry.register(stringify!($name), $action)
    };
    ($registry:expr, $name:ident, $body:block) => {
        $registry.register(stringify!($name), move || $body)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn keeps_registration_order() {
        let mut registry = Registry::new();
        registry.register("BlueLeft", || {});
        registry.register("BlueRight", || {});
        registry.register("RedLeft", || {});

        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, ["BlueLeft", "BlueRight", "RedLeft"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn find_returns_first_duplicate() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let mut registry = Registry::new();
        let f = first.clone();
        registry.register("Dup", move || {
            f.fetch_add(1, Ordering::SeqCst);
        });
        let s = second.clone();
        registry.register("Dup", move || {
            s.fetch_add(1, Ordering::SeqCst);
        });

        let (id, routine) = registry.find("Dup").expect("registered");
        assert_eq!(id.index(), 0);
        routine.run();
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn find_is_case_sensitive() {
        let mut registry = Registry::new();
        registry.register("RedLeft", || {});
        assert!(registry.find("redleft").is_none());
        assert!(registry.find("RedLeft").is_some());
    }

    #[test]
    fn empty_registry_misses() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert!(registry.find("Anything").is_none());
        assert!(registry.get(RoutineId(0)).is_none());
    }

    #[test]
    fn macro_uses_identifier_as_name() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut registry = Registry::new();
        let h = hits.clone();
        let id = auton!(registry, RedRight, {
            h.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(registry.get(id).map(Routine::name), Some("RedRight"));
        registry.all()[0].run();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
