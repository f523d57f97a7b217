//! Modules, variables, and the registry that owns them.
//!
//! Unit algebra needs to look up user-declared units by name. That lookup
//! goes through [`UnitContext`], which [`Registry`] implements; tests and
//! embedders can supply their own context instead.

pub mod module;
pub mod variable;

use std::collections::BTreeMap;

use log::warn;

pub use module::Module;
pub use variable::{VarKind, Variable};

use crate::config::EngineConfig;
use crate::units::{UnitDef, UnitError};
use crate::xml::ModelDocument;

/// Name resolution for canonicalization and document output.
pub trait UnitContext {
    fn module(&self, name: &str) -> Option<&Module>;

    /// Joins the segments of qualified names.
    fn name_delimiter(&self) -> &str;
}

/// Owns every module, the engine configuration, and the most recent error
/// message.
#[derive(Debug, Clone)]
pub struct Registry {
    config: EngineConfig,
    modules: BTreeMap<String, Module>,
    last_error: Option<String>,
}

impl Default for Registry {
    fn default() -> Self {
        Registry::with_config(EngineConfig::default())
    }
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Creates a registry holding the configured default module.
    pub fn with_config(config: EngineConfig) -> Self {
        let mut modules = BTreeMap::new();
        modules.insert(
            config.default_module.clone(),
            Module::new(config.default_module.clone()),
        );
        Registry {
            config,
            modules,
            last_error: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the module called `name`, creating it if needed.
    pub fn add_module(&mut self, name: &str) -> &mut Module {
        self.modules
            .entry(name.to_string())
            .or_insert_with(|| Module::new(name))
    }

    pub fn module_mut(&mut self, name: &str) -> Option<&mut Module> {
        self.modules.get_mut(name)
    }

    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    pub fn main_module(&self) -> Option<&Module> {
        self.modules.get(&self.config.default_module)
    }

    pub fn main_module_mut(&mut self) -> &mut Module {
        let name = self.config.default_module.clone();
        self.add_module(&name)
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.last_error = Some(message);
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Passes a value through, or records the error message and returns
    /// `None`.
    pub fn report<T>(&mut self, result: Result<T, UnitError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.set_error(err.to_string());
                None
            }
        }
    }

    /// Canonical form of the unit declared as `name` in `module`.
    pub fn canonical_unit(&self, module: &str, name: &str) -> Result<UnitDef, UnitError> {
        let definition = self
            .module(module)
            .ok_or_else(|| UnitError::UnknownModule(module.to_string()))?
            .variable_named(name)
            .and_then(Variable::unit_def)
            .ok_or_else(|| UnitError::UndefinedUnit(name.to_string()))?;
        definition.get_canonical(self)
    }

    /// Writes every unit declared in `module` to a new document.
    ///
    /// A unit that cannot be resolved is left out and its error recorded as
    /// the last error; the remaining units are still written.
    pub fn build_document(&mut self, module: &str) -> Result<ModelDocument, UnitError> {
        let ctx: &Registry = self;
        let source = ctx
            .module(module)
            .ok_or_else(|| UnitError::UnknownModule(module.to_string()))?;

        let mut doc = ModelDocument::new(module);
        let mut failures = Vec::new();
        for var in source.unit_variables() {
            let Some(definition) = var.unit_def() else {
                continue;
            };
            let id = var.name().join(ctx.name_delimiter());
            if let Err(err) = definition.add_to_document(ctx, &mut doc, &id, &id) {
                failures.push(err);
            }
        }

        for err in failures {
            self.set_error(err.to_string());
        }
        Ok(doc)
    }
}

impl UnitContext for Registry {
    fn module(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    fn name_delimiter(&self) -> &str {
        &self.config.name_delimiter
    }
}
