#![cfg(test)]

use crate::config::DEFAULT_MODULE;
use crate::registry::Registry;
use crate::units::UnitDef;

// Helper function to assert floating point equality with tolerance
pub fn assert_float_eq(a: f64, b: f64, tolerance: f64) {
    assert!(
        (a - b).abs() < tolerance,
        "Expected {} to be approximately equal to {} (tolerance: {})",
        a,
        b,
        tolerance
    );
}

/// A single-component unit named after its kind, owned by the default module.
pub fn unit(name: &str) -> UnitDef {
    UnitDef::new(name, DEFAULT_MODULE)
}

/// A registry whose default module declares each `(name, formula)` pair.
pub fn registry_with_units(units: &[(&str, &str)]) -> Registry {
    let mut registry = Registry::new();
    let module = registry.main_module_mut();
    for (name, formula) in units {
        module
            .define_unit(name, formula)
            .unwrap_or_else(|e| panic!("failed to define '{}': {}", name, e));
    }
    registry
}
