//! Expansion of user-declared units into the elementary vocabulary.
//!
//! A component whose kind is not elementary is looked up as a variable in the
//! owning module, and that variable's own unit definition is expanded in turn.
//! The names currently being expanded are tracked on an explicit visited set,
//! so `A = B`, `B = A` is reported as a cycle while `A * A` is not.

use std::collections::HashSet;

use log::debug;

use crate::registry::UnitContext;
use crate::units::{BaseUnit, UnitDef, UnitElement, UnitError};
use crate::utils::float_equals;

impl UnitDef {
    /// Returns an equivalent definition in which every component kind is
    /// elementary. The receiver's name is kept.
    ///
    /// Like terms are merged and components whose exponents cancel to zero
    /// are dropped, so `meter * meter` and `A * A` with `A = meter` both
    /// canonicalize to `meter^2`.
    pub fn get_canonical<C: UnitContext + ?Sized>(&self, ctx: &C) -> Result<UnitDef, UnitError> {
        let mut visited = HashSet::new();
        self.get_canonical_with(ctx, &mut visited)
    }

    /// Like [`get_canonical`](Self::get_canonical), with the set of names
    /// already being expanded on the current path. Names are added before
    /// descending into a definition and removed once it is finished.
    pub fn get_canonical_with<C: UnitContext + ?Sized>(
        &self,
        ctx: &C,
        visited: &mut HashSet<String>,
    ) -> Result<UnitDef, UnitError> {
        let mut components: Vec<UnitElement> = Vec::with_capacity(self.num_unit_elements());
        for el in self.unit_elements() {
            if el.is_canonical() {
                push_merged(&mut components, el.clone());
                continue;
            }
            let expanded = self.expand_element(el, ctx, visited)?;
            for sub in expanded.into_components() {
                push_merged(&mut components, sub);
            }
        }
        // (m * 10^s * kind)^0 is 1 whatever the multiplier.
        components.retain(|el| !float_equals(el.exponent, 0.0));

        let mut canonical = self.clone();
        canonical.set_components(components);
        Ok(canonical)
    }

    fn expand_element<C: UnitContext + ?Sized>(
        &self,
        el: &UnitElement,
        ctx: &C,
        visited: &mut HashSet<String>,
    ) -> Result<UnitDef, UnitError> {
        let subname = &el.kind;
        if visited.contains(subname) {
            return Err(UnitError::CyclicUnitDefinition(subname.clone()));
        }

        let module = ctx
            .module(self.module())
            .ok_or_else(|| UnitError::UnknownModule(self.module().to_string()))?;
        let definition = module
            .variable_named(subname)
            .and_then(|var| var.unit_def())
            .ok_or_else(|| UnitError::UndefinedUnit(subname.clone()))?;

        debug!(
            "expanding '{}' in module '{}' as '{}'",
            subname,
            self.module(),
            definition
        );

        visited.insert(subname.clone());
        let result = definition.get_canonical_with(ctx, visited);
        visited.remove(subname);
        let mut expanded = result?;

        let factor = el.multiplier * 10f64.powi(el.scale);
        if factor != 1.0 {
            if expanded.is_empty() {
                expanded.add_unit_element(
                    UnitElement::new(BaseUnit::Dimensionless.as_str()).with_multiplier(factor),
                );
            } else {
                expanded.multiply_by(factor)?;
            }
        }
        expanded.raise_to(el.exponent);
        Ok(expanded)
    }

    /// True if the definition is nothing more than its own name as a bare
    /// elementary kind, such as `second` or `mole`. Definitions that fail to
    /// canonicalize are never bare.
    pub fn is_only_canonical_kind<C: UnitContext + ?Sized>(&self, ctx: &C) -> bool {
        match self.get_canonical(ctx) {
            Ok(canonical) => canonical.is_bare_kind(&self.name_delimited_by(ctx.name_delimiter())),
            Err(_) => false,
        }
    }

    /// True if the definition is exactly one plain elementary `name`.
    pub(crate) fn is_bare_kind(&self, name: &str) -> bool {
        let [el] = self.unit_elements() else {
            return false;
        };
        el.exponent == 1.0
            && el.multiplier == 1.0
            && el.scale == 0
            && el.is_canonical()
            && el.kind == name
    }
}

/// Adds `el` to the accumulated product, folding it into an existing
/// component of the same kind, multiplier, and scale.
fn push_merged(components: &mut Vec<UnitElement>, el: UnitElement) {
    let existing = components.iter_mut().find(|c| {
        c.kind == el.kind && c.scale == el.scale && float_equals(c.multiplier, el.multiplier)
    });
    match existing {
        Some(c) => c.exponent += el.exponent,
        None => components.push(el),
    }
}
