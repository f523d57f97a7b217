use std::fmt;

use serde::{Deserialize, Serialize};

use crate::units::BaseUnit;
use crate::utils::{float_equals, format_number};

/// One term of a unit expression: `(multiplier * 10^scale * kind)^exponent`.
///
/// The kind is either an elementary unit or the name of a user-declared unit
/// that has to be looked up during canonicalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitElement {
    pub kind: String,
    pub exponent: f64,
    pub multiplier: f64,
    pub scale: i32,
}

impl UnitElement {
    pub fn new(kind: impl Into<String>) -> Self {
        UnitElement {
            kind: kind.into(),
            exponent: 1.0,
            multiplier: 1.0,
            scale: 0,
        }
    }

    pub fn with_exponent(mut self, exponent: f64) -> Self {
        self.exponent = exponent;
        self
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn with_scale(mut self, scale: i32) -> Self {
        self.scale = scale;
        self
    }

    /// Negates the exponent.
    pub fn invert(&mut self) {
        self.exponent = -self.exponent;
    }

    /// Composes `factor` into the multiplier. The exponent is left untouched,
    /// so callers wanting a net factor `k` pass `k^(1/exponent)`.
    pub fn multiply_by(&mut self, factor: f64) {
        self.multiplier *= factor;
    }

    pub fn is_canonical(&self) -> bool {
        BaseUnit::is_canonical(&self.kind)
    }

    /// Structural equality: same kind, exponent, multiplier, and scale.
    pub fn matches(&self, other: &UnitElement) -> bool {
        self.kind == other.kind
            && self.scale == other.scale
            && float_equals(self.exponent, other.exponent)
            && float_equals(self.multiplier, other.multiplier)
    }

    /// True if multiplying the two elements together leaves nothing behind.
    pub fn cancels(&self, other: &UnitElement) -> bool {
        self.kind == other.kind
            && self.scale == other.scale
            && float_equals(self.exponent, -other.exponent)
            && float_equals(self.multiplier, other.multiplier)
    }

    /// Renders the element as it appears in a denominator, with the sign of
    /// the exponent dropped.
    pub fn to_inv_string(&self) -> String {
        self.render(-self.exponent)
    }

    fn render(&self, exponent: f64) -> String {
        let mut out = if self.multiplier == 1.0 && self.scale == 0 {
            self.kind.clone()
        } else if self.scale == 0 {
            format!("({} {})", format_number(self.multiplier), self.kind)
        } else {
            format!(
                "({}e{} {})",
                format_number(self.multiplier),
                self.scale,
                self.kind
            )
        };
        if exponent != 1.0 {
            out.push('^');
            out.push_str(&format_number(exponent));
        }
        out
    }
}

impl fmt::Display for UnitElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(self.exponent))
    }
}
