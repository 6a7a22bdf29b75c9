//! Routines compiled into the operator console.
//!
//! On a robot these would drive motors; here each step is logged so a run is visible.

use auton_selector::{auton, Registry};

fn step(routine: &str, action: &str) {
    tracing::info!(routine, action, "auton step");
}

fn skills() {
    for lap in 1..=3 {
        tracing::info!(routine = "Skills", lap, "scoring lap");
    }
}

/// Register every routine, in grid order.
pub fn register_all(registry: &mut Registry) {
    auton!(registry, BlueLeft, {
        step("BlueLeft", "drive forward 24in");
        step("BlueLeft", "turn left 90deg");
        step("BlueLeft", "score preload");
    });
    auton!(registry, BlueRight, {
        step("BlueRight", "drive forward 24in");
        step("BlueRight", "turn right 90deg");
        step("BlueRight", "score preload");
    });
    auton!(registry, RedLeft, {
        step("RedLeft", "drive forward 36in");
        step("RedLeft", "touch ladder");
    });
    auton!(registry, RedRight, {
        step("RedRight", "drive forward 36in");
        step("RedRight", "clear corner");
    });
    auton!(registry, Skills => skills);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_in_grid_order() {
        let mut registry = Registry::new();
        register_all(&mut registry);
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, ["BlueLeft", "BlueRight", "RedLeft", "RedRight", "Skills"]);
    }
}
