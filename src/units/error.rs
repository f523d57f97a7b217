use thiserror::Error;

/// Errors raised while building, combining, or canonicalizing unit definitions.
///
/// Each failure aborts the resolution of the unit it occurred in. Independent
/// units in the same module are unaffected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    /// The formula is not a unit expression.
    ///
    /// Examples: `meter + second`, `meter ^ x`, `2 * 3`, `sin(meter)`
    #[error(
        "Unable to set a unit definition using the formula '{formula}'.  Only multiplication, division, and raising a value to a numerical power are allowed, and no 'bare' dimensions are allowed (use 'dimensionless' explicitly)."
    )]
    InvalidUnitExpression { formula: String },

    /// A component refers to a unit with no definition in the owning module.
    #[error("Undefined unit definition '{0}'.")]
    UndefinedUnit(String),

    /// Expansion reached a unit that is already being expanded on the same path.
    #[error("Loop detected in unit definitions with '{0}'.")]
    CyclicUnitDefinition(String),

    /// The module owning a unit definition is not known to the registry.
    #[error("Unknown module '{0}'.")]
    UnknownModule(String),

    /// A numeric factor was applied to a unit definition with no components.
    #[error("Cannot scale the empty unit definition '{0}'.")]
    EmptyUnitDefinition(String),

    /// A negative factor was applied to a component whose exponent has no
    /// real root for it, such as `-2 * meter^2`.
    #[error("Cannot scale a unit with exponent {exponent} by the negative factor {factor}.")]
    NegativeScale { factor: f64, exponent: f64 },

    /// A unit name was given with no segments.
    #[error("Unit names must have at least one segment.")]
    EmptyName,
}
