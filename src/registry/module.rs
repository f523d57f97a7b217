use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::registry::Variable;
use crate::units::{BaseUnit, UnitDef, UnitElement, UnitError};

/// A namespace of variables. Unit names in a definition are resolved against
/// the module that owns the definition.
///
/// Variables keep their declaration order, which is also the order in which
/// units are written to output documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    name: String,
    variables: Vec<Variable>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Module {
            name: name.into(),
            variables: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a variable, replacing any existing variable with the same name.
    /// The replaced variable is returned.
    pub fn add_variable(&mut self, variable: Variable) -> Option<Variable> {
        match self.position(variable.name()) {
            Some(index) => Some(std::mem::replace(&mut self.variables[index], variable)),
            None => {
                self.variables.push(variable);
                None
            }
        }
    }

    pub fn variable(&self, name: &[String]) -> Option<&Variable> {
        self.variables.iter().find(|var| var.name() == name)
    }

    /// Looks up a variable with a single-segment name.
    pub fn variable_named(&self, name: &str) -> Option<&Variable> {
        self.variables
            .iter()
            .find(|var| matches!(var.name(), [only] if only == name))
    }

    pub fn variable_mut(&mut self, name: &[String]) -> Option<&mut Variable> {
        self.variables.iter_mut().find(|var| var.name() == name)
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    /// Unit declarations, in declaration order.
    pub fn unit_variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter().filter(|var| var.is_unit())
    }

    /// Declares `name` as the unit described by `formula`.
    pub fn define_unit(&mut self, name: &str, formula: &str) -> Result<&Variable, UnitError> {
        let mut definition = UnitDef::new(name, self.name.as_str());
        definition.set_from_formula(formula)?;
        debug!("{}: unit {} = {}", self.name, name, definition);
        Ok(self.insert(Variable::unit(vec![name.to_string()], definition)))
    }

    /// Declares `alias` as another name for `target`.
    pub fn define_alias(&mut self, alias: &str, target: &str) -> &Variable {
        let mut definition = UnitDef::new(alias, self.name.as_str());
        definition.clear_components();
        definition.add_unit_element(UnitElement::new(target));
        self.insert(Variable::unit(vec![alias.to_string()], definition))
    }

    /// Declares a unit with no formula. Only elementary kinds can stand on
    /// their own; anything else is reported as undefined.
    pub fn define_primary_unit(&mut self, name: &str) -> Result<&Variable, UnitError> {
        if !BaseUnit::is_canonical(name) {
            warn!(
                "{}: unit '{}' has no definition and is not an elementary unit",
                self.name, name
            );
            return Err(UnitError::UndefinedUnit(name.to_string()));
        }
        let definition = UnitDef::new(name, self.name.as_str());
        Ok(self.insert(Variable::unit(vec![name.to_string()], definition)))
    }

    /// Removes a variable. Unit definitions that referred to it are emptied,
    /// since they can no longer be resolved.
    pub fn remove_variable(&mut self, name: &[String]) -> Option<Variable> {
        let index = self.position(name)?;
        let removed = self.variables.remove(index);
        for var in &mut self.variables {
            let Some(definition) = var.unit_def_mut() else {
                continue;
            };
            if definition.clear_references_to(name) {
                debug!(
                    "{}: cleared unit of '{}' after removing '{}'",
                    self.name,
                    var.name().join("."),
                    name.join(".")
                );
            }
        }
        Some(removed)
    }

    fn position(&self, name: &[String]) -> Option<usize> {
        self.variables.iter().position(|var| var.name() == name)
    }

    fn insert(&mut self, variable: Variable) -> &Variable {
        let index = match self.position(variable.name()) {
            Some(index) => {
                self.variables[index] = variable;
                index
            }
            None => {
                self.variables.push(variable);
                self.variables.len() - 1
            }
        };
        &self.variables[index]
    }
}
