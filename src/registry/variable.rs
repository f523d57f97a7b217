use serde::{Deserialize, Serialize};

use crate::units::UnitDef;

/// What a variable declares.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarKind {
    /// A unit declaration such as `unit mM = mole / litre`.
    Unit,
    /// Any other model quantity, which may carry units of its own.
    Quantity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    name: Vec<String>,
    kind: VarKind,
    unit_def: Option<UnitDef>,
}

impl Variable {
    pub fn unit(name: Vec<String>, definition: UnitDef) -> Self {
        Variable {
            name,
            kind: VarKind::Unit,
            unit_def: Some(definition),
        }
    }

    pub fn quantity(name: Vec<String>, units: Option<UnitDef>) -> Self {
        Variable {
            name,
            kind: VarKind::Quantity,
            unit_def: units,
        }
    }

    pub fn name(&self) -> &[String] {
        &self.name
    }

    pub fn kind(&self) -> VarKind {
        self.kind
    }

    pub fn is_unit(&self) -> bool {
        self.kind == VarKind::Unit
    }

    pub fn unit_def(&self) -> Option<&UnitDef> {
        self.unit_def.as_ref()
    }

    pub fn unit_def_mut(&mut self) -> Option<&mut UnitDef> {
        self.unit_def.as_mut()
    }

    pub fn set_unit_def(&mut self, definition: UnitDef) {
        self.unit_def = Some(definition);
    }
}
