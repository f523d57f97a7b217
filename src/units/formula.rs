//! Interpretation of formula trees as unit definitions.
//!
//! Only products, quotients, and powers with a literal exponent carry unit
//! meaning. A bare numeral is a scalar: it may scale a unit inside a product
//! or quotient but never stands on its own.

use log::debug;

use crate::equation::{UnitExpr, parse_formula};
use crate::units::{UnitDef, UnitError};

enum Operand {
    Unit(UnitDef),
    Scalar(f64),
}

impl UnitDef {
    /// Builds a definition from a parsed formula. The result carries the
    /// auto-generated name of the algebra that produced it.
    pub fn from_expression(expr: &UnitExpr, module: &str) -> Result<UnitDef, UnitError> {
        resolve(expr, module).ok_or_else(|| UnitError::InvalidUnitExpression {
            formula: expr.to_string(),
        })
    }

    /// Parses `formula` into an unnamed definition owned by `module`.
    pub fn from_formula(formula: &str, module: &str) -> Result<UnitDef, UnitError> {
        let mut ud = UnitDef::unnamed(module);
        ud.set_from_formula(formula)?;
        Ok(ud)
    }

    /// Replaces the components with those of `formula`.
    ///
    /// A receiver that already has a name keeps it; otherwise it takes the
    /// auto-generated name of the formula.
    pub fn set_from_formula(&mut self, formula: &str) -> Result<(), UnitError> {
        let invalid = || UnitError::InvalidUnitExpression {
            formula: formula.to_string(),
        };
        let expr = parse_formula(formula).map_err(|e| {
            debug!("{}", e);
            invalid()
        })?;
        let resolved = resolve(&expr, self.module()).ok_or_else(invalid)?;

        if !self.has_name() {
            self.set_auto_name(resolved.flat_name());
        }
        self.set_components(resolved.into_components());
        Ok(())
    }
}

fn resolve(expr: &UnitExpr, module: &str) -> Option<UnitDef> {
    match operand(expr, module)? {
        Operand::Unit(ud) => Some(ud),
        Operand::Scalar(value) => {
            debug!("bare number {} has no unit meaning", value);
            None
        }
    }
}

fn operand(expr: &UnitExpr, module: &str) -> Option<Operand> {
    match expr {
        UnitExpr::Name(name) => Some(Operand::Unit(UnitDef::new(name.clone(), module))),
        UnitExpr::Number { value, units: None } => Some(Operand::Scalar(*value)),
        UnitExpr::Number {
            value,
            units: Some(units),
        } => {
            let mut ud = UnitDef::new(units.clone(), module);
            ud.multiply_by(*value).ok()?;
            Some(Operand::Unit(ud))
        }
        UnitExpr::Negate(inner) => match operand(inner, module)? {
            Operand::Scalar(value) => Some(Operand::Scalar(-value)),
            Operand::Unit(_) => None,
        },
        UnitExpr::Times(children) => product(children, module),
        UnitExpr::Divide(children) => quotient(children, module),
        UnitExpr::Power(children) => power(children, module),
        UnitExpr::Plus(_) | UnitExpr::Minus(_) | UnitExpr::Call { .. } => None,
    }
}

/// Folds the factors left to right.
fn product(children: &[UnitExpr], module: &str) -> Option<Operand> {
    let (first, rest) = children.split_first()?;
    rest.iter()
        .try_fold(operand(first, module)?, |acc, child| {
            match (acc, operand(child, module)?) {
                (Operand::Unit(mut lhs), Operand::Unit(rhs)) => {
                    lhs.multiply_unit_def(rhs);
                    Some(Operand::Unit(lhs))
                }
                // A numeral scales by its value on either side; a right-hand
                // numeral is never taken as its reciprocal.
                (Operand::Unit(ud), Operand::Scalar(k)) | (Operand::Scalar(k), Operand::Unit(ud)) => {
                    let mut ud = ud;
                    ud.multiply_by(k).ok()?;
                    Some(Operand::Unit(ud))
                }
                (Operand::Scalar(_), Operand::Scalar(_)) => None,
            }
        })
}

fn quotient(children: &[UnitExpr], module: &str) -> Option<Operand> {
    let [numerator, denominator] = children else {
        return None;
    };
    match (operand(numerator, module)?, operand(denominator, module)?) {
        (Operand::Unit(mut num), Operand::Unit(den)) => {
            num.divide_unit_def(den);
            Some(Operand::Unit(num))
        }
        (Operand::Unit(mut num), Operand::Scalar(k)) if k != 0.0 => {
            num.multiply_by(1.0 / k).ok()?;
            Some(Operand::Unit(num))
        }
        (Operand::Scalar(k), Operand::Unit(mut den)) => {
            den.invert();
            den.multiply_by(k).ok()?;
            Some(Operand::Unit(den))
        }
        _ => None,
    }
}

fn power(children: &[UnitExpr], module: &str) -> Option<Operand> {
    let [base, exponent] = children else {
        return None;
    };
    let Operand::Unit(mut base) = operand(base, module)? else {
        return None;
    };
    base.raise_to(exponent.bare_number()?);
    Some(Operand::Unit(base))
}
