use std::fmt;

use itertools::Itertools;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::units::{UnitElement, UnitError};
use crate::utils::format_number;

/// Delimiter used to flatten multi-segment names into auto-generated names.
pub const AUTO_NAME_DELIMITER: &str = "_";

/// A named unit expression: an ordered product of [`UnitElement`]s.
///
/// The algebra mutates the receiver in place and returns it so calls can be
/// chained. Operands are taken by value. Every operation replaces the name
/// with an auto-generated one, which a later explicit name may overwrite.
///
/// ```rust
/// use unitdef::units::UnitDef;
///
/// let mut speed = UnitDef::new("meter", "__main");
/// speed.divide_unit_def(UnitDef::new("second", "__main"));
///
/// assert_eq!(speed.to_string(), "meter / second");
/// assert_eq!(speed.name_delimited_by("."), "meter_per_second");
/// assert!(speed.name_autogenerated());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDef {
    name: Vec<String>,
    name_autogenerated: bool,
    components: Vec<UnitElement>,
    module: String,
}

impl UnitDef {
    /// Wraps a single unit name. The definition has one component whose kind
    /// is the name itself.
    pub fn new(name: impl Into<String>, module: impl Into<String>) -> Self {
        let name = name.into();
        UnitDef {
            components: vec![UnitElement::new(name.clone())],
            name: vec![name],
            name_autogenerated: false,
            module: module.into(),
        }
    }

    /// Wraps a qualified unit name. The last segment becomes the kind.
    pub fn from_segments(name: Vec<String>, module: impl Into<String>) -> Result<Self, UnitError> {
        let kind = name.last().ok_or(UnitError::EmptyName)?.clone();
        Ok(UnitDef {
            components: vec![UnitElement::new(kind)],
            name,
            name_autogenerated: false,
            module: module.into(),
        })
    }

    /// A definition with no name and no components (dimensionless).
    pub fn unnamed(module: impl Into<String>) -> Self {
        UnitDef {
            name: Vec::new(),
            name_autogenerated: false,
            components: Vec::new(),
            module: module.into(),
        }
    }

    pub fn name(&self) -> &[String] {
        &self.name
    }

    pub fn name_delimited_by(&self, cc: &str) -> String {
        self.name.join(cc)
    }

    /// Sets an explicit name, which algebra results never inherit.
    pub fn set_name(&mut self, name: Vec<String>) {
        self.name = name;
        self.name_autogenerated = false;
    }

    pub fn has_name(&self) -> bool {
        self.name.iter().any(|segment| !segment.is_empty())
    }

    pub fn name_autogenerated(&self) -> bool {
        self.name_autogenerated
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn unit_elements(&self) -> &[UnitElement] {
        &self.components
    }

    pub fn unit_element(&self, n: usize) -> Option<&UnitElement> {
        self.components.get(n)
    }

    pub fn num_unit_elements(&self) -> usize {
        self.components.len()
    }

    pub fn add_unit_element(&mut self, element: UnitElement) {
        self.components.push(element);
    }

    pub fn clear_components(&mut self) {
        self.components.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub(crate) fn set_components(&mut self, components: Vec<UnitElement>) {
        self.components = components;
    }

    pub(crate) fn into_components(self) -> Vec<UnitElement> {
        self.components
    }

    pub(crate) fn set_auto_name(&mut self, name: String) {
        self.name = vec![name];
        self.name_autogenerated = true;
    }

    pub(crate) fn flat_name(&self) -> String {
        self.name_delimited_by(AUTO_NAME_DELIMITER)
    }

    /// Appends `other`'s components. No reduction is performed.
    pub fn multiply_unit_def(&mut self, other: UnitDef) -> &mut Self {
        self.set_auto_name(format!("{}_{}", self.flat_name(), other.flat_name()));
        self.components.extend(other.components);
        self
    }

    /// Appends `other`'s components with their exponents negated.
    pub fn divide_unit_def(&mut self, other: UnitDef) -> &mut Self {
        self.set_auto_name(format!("{}_per_{}", self.flat_name(), other.flat_name()));
        self.components.extend(other.components.into_iter().map(|mut el| {
            el.invert();
            el
        }));
        self
    }

    /// Multiplies every exponent by `power`. Fractional powers are allowed.
    pub fn raise_to(&mut self, power: f64) -> &mut Self {
        self.set_auto_name(format!("{}{}", self.flat_name(), format_number(power)));
        for el in &mut self.components {
            el.exponent *= power;
        }
        self
    }

    /// Folds a dimensionless factor into the definition.
    ///
    /// The factor lands in the multiplier of the first component with a
    /// non-zero exponent as `factor^(1/exponent)`, so that raising the element
    /// back to its exponent contributes exactly `factor`.
    ///
    /// When every exponent is zero the factor is folded into the first
    /// component, which still contributes `(multiplier)^0 = 1`; the factor is
    /// then lost and canonicalization drops the component altogether.
    ///
    /// A negative factor only has a real root for odd integer exponents.
    /// Even or fractional exponents yield [`UnitError::NegativeScale`].
    pub fn multiply_by(&mut self, factor: f64) -> Result<&mut Self, UnitError> {
        let label = self.flat_name();
        let target = match self.components.iter().position(|el| el.exponent != 0.0) {
            Some(index) => index,
            None if self.components.is_empty() => {
                return Err(UnitError::EmptyUnitDefinition(label));
            }
            None => 0,
        };
        let exponent = self.components[target].exponent;
        let root = if exponent == 0.0 {
            factor
        } else {
            real_root(factor, exponent).ok_or_else(|| UnitError::NegativeScale {
                factor,
                exponent,
            })?
        };
        self.set_auto_name(format!("_{}_{}", format_number(factor), label));
        self.components[target].multiply_by(root);
        Ok(self)
    }

    /// Inverts every exponent.
    pub fn invert(&mut self) -> &mut Self {
        self.set_auto_name(format!("inv_{}", self.flat_name()));
        for el in &mut self.components {
            el.invert();
        }
        self
    }

    /// Removes pairs of exactly inverse components.
    ///
    /// Definitions with two or fewer components are left alone, so a lone
    /// cancelling pair never collapses into an empty unit.
    pub fn reduce(&mut self) -> &mut Self {
        while self.components.len() > 2 {
            let pair = self
                .components
                .iter()
                .enumerate()
                .tuple_combinations()
                .find(|((_, a), (_, b))| a.cancels(b))
                .map(|((i, _), (j, _))| (i, j));
            let Some((i, j)) = pair else { break };
            trace!(
                "reduce: cancelling '{}' against '{}'",
                self.components[i], self.components[j]
            );
            self.components.remove(j);
            self.components.remove(i);
        }
        self
    }

    /// Empties the definition if any component refers to `deleted`.
    ///
    /// Returns true when the definition was cleared.
    pub fn clear_references_to(&mut self, deleted: &[String]) -> bool {
        let Some(kind) = deleted.last() else {
            return false;
        };
        if self.components.iter().any(|el| &el.kind == kind) {
            self.clear_components();
            return true;
        }
        false
    }
}

/// `factor^(1/exponent)` over the reals, or `None` when no real root exists.
fn real_root(factor: f64, exponent: f64) -> Option<f64> {
    if factor >= 0.0 {
        return Some(factor.powf(1.0 / exponent));
    }
    let odd = exponent.fract() == 0.0 && exponent % 2.0 != 0.0;
    odd.then(|| -(-factor).powf(1.0 / exponent))
}

impl fmt::Display for UnitDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (tops, bottoms): (Vec<&UnitElement>, Vec<&UnitElement>) =
            self.components.iter().partition(|el| el.exponent > 0.0);

        if tops.is_empty() {
            write!(f, "1")?;
        } else {
            write!(f, "{}", tops.iter().join(" * "))?;
        }

        match bottoms.len() {
            0 => Ok(()),
            1 => write!(f, " / {}", bottoms[0].to_inv_string()),
            _ => write!(
                f,
                " / ({})",
                bottoms.iter().map(|el| el.to_inv_string()).join(" * ")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_float_eq, unit};

    #[test]
    fn test_new_wraps_name() {
        let ud = unit("mole");
        assert_eq!(ud.name(), ["mole".to_string()]);
        assert!(!ud.name_autogenerated());
        assert_eq!(ud.num_unit_elements(), 1);
        assert_eq!(ud.unit_element(0), Some(&UnitElement::new("mole")));
        assert_eq!(ud.unit_element(1), None);
    }

    #[test]
    fn test_from_segments_uses_last_segment() {
        let ud = UnitDef::from_segments(vec!["cell".into(), "volume".into()], "__main").unwrap();
        assert_eq!(ud.unit_elements()[0].kind, "volume");
        assert_eq!(ud.name_delimited_by("."), "cell.volume");
        assert_eq!(
            UnitDef::from_segments(vec![], "__main"),
            Err(UnitError::EmptyName)
        );
    }

    #[test]
    fn test_multiply_and_divide_names() {
        let mut ud = unit("meter");
        ud.multiply_unit_def(unit("meter"));
        assert_eq!(ud.name_delimited_by("."), "meter_meter");
        assert!(ud.name_autogenerated());

        ud.divide_unit_def(unit("second"));
        assert_eq!(ud.name_delimited_by("."), "meter_meter_per_second");
        assert_eq!(ud.num_unit_elements(), 3);
        assert_eq!(ud.unit_elements()[2].exponent, -1.0);
    }

    #[test]
    fn test_multiply_does_not_reduce() {
        let mut ud = unit("meter");
        ud.divide_unit_def(unit("meter"));
        assert_eq!(ud.num_unit_elements(), 2);
    }

    #[test]
    fn test_raise_to() {
        let mut ud = unit("meter");
        ud.divide_unit_def(unit("second"));
        ud.raise_to(0.5);
        assert_eq!(ud.name_delimited_by("."), "meter_per_second0.5");
        assert_eq!(ud.unit_elements()[0].exponent, 0.5);
        assert_eq!(ud.unit_elements()[1].exponent, -0.5);

        ud.raise_to(0.0);
        assert!(ud.unit_elements().iter().all(|el| el.exponent == 0.0));
    }

    #[test]
    fn test_multiply_by_takes_root_of_first_exponent() {
        let mut ud = unit("meter");
        ud.raise_to(2.0);
        ud.multiply_by(9.0).unwrap();
        assert_float_eq(ud.unit_elements()[0].multiplier, 3.0, 1e-12);
        assert_eq!(ud.name_delimited_by("."), "_9_meter2");
    }

    #[test]
    fn test_multiply_by_empty_is_an_error() {
        let mut ud = UnitDef::unnamed("__main");
        assert!(matches!(
            ud.multiply_by(2.0),
            Err(UnitError::EmptyUnitDefinition(_))
        ));
    }

    #[test]
    fn test_multiply_by_skips_zero_exponents() {
        let mut ud = unit("meter");
        ud.raise_to(0.0);
        ud.multiply_unit_def(unit("second"));
        ud.multiply_by(4.0).unwrap();
        assert_eq!(ud.unit_elements()[0].multiplier, 1.0);
        assert_eq!(ud.unit_elements()[1].multiplier, 4.0);
    }

    #[test]
    fn test_multiply_by_with_only_zero_exponents_is_lost() {
        let mut ud = unit("meter");
        ud.raise_to(0.0);
        ud.multiply_by(5.0).unwrap();
        let el = &ud.unit_elements()[0];
        assert_eq!(el.multiplier, 5.0);
        assert_eq!(el.multiplier.powf(el.exponent), 1.0);
    }

    #[test]
    fn test_multiply_by_negative_factor() {
        let mut ud = unit("meter");
        ud.multiply_by(-2.0).unwrap();
        assert_eq!(ud.unit_elements()[0].multiplier, -2.0);

        let mut cubed = unit("meter");
        cubed.raise_to(3.0);
        cubed.multiply_by(-8.0).unwrap();
        let el = &cubed.unit_elements()[0];
        assert_float_eq(el.multiplier, -2.0, 1e-12);
        assert_float_eq(el.multiplier.powf(el.exponent), -8.0, 1e-9);

        let mut per_second = unit("second");
        per_second.invert();
        per_second.multiply_by(-4.0).unwrap();
        assert_float_eq(per_second.unit_elements()[0].multiplier, -0.25, 1e-12);
    }

    #[test]
    fn test_multiply_by_negative_factor_without_real_root() {
        for power in [2.0, -2.0, 0.5] {
            let mut ud = unit("meter");
            ud.raise_to(power);
            let before = ud.clone();
            assert_eq!(
                ud.multiply_by(-2.0).unwrap_err(),
                UnitError::NegativeScale {
                    factor: -2.0,
                    exponent: power,
                }
            );
            assert_eq!(ud, before);
            assert!(ud.unit_elements()[0].multiplier.is_finite());
        }
    }

    #[test]
    fn test_invert() {
        let mut ud = unit("meter");
        ud.divide_unit_def(unit("second"));
        ud.invert();
        assert_eq!(ud.name_delimited_by("."), "inv_meter_per_second");
        assert_eq!(ud.unit_elements()[0].exponent, -1.0);
        assert_eq!(ud.unit_elements()[1].exponent, 1.0);
    }

    #[test]
    fn test_reduce_removes_inverse_pairs() {
        let mut ud = unit("meter");
        ud.multiply_unit_def(unit("second"));
        ud.divide_unit_def(unit("meter"));
        ud.reduce();
        assert_eq!(ud.unit_elements(), [UnitElement::new("second")]);
    }

    #[test]
    fn test_reduce_leaves_two_components_alone() {
        let mut ud = unit("meter");
        ud.divide_unit_def(unit("meter"));
        ud.reduce();
        assert_eq!(ud.num_unit_elements(), 2);
    }

    #[test]
    fn test_reduce_stops_at_two_components() {
        let mut ud = unit("meter");
        ud.multiply_unit_def(unit("second"));
        ud.divide_unit_def(unit("second"));
        ud.divide_unit_def(unit("meter"));
        ud.reduce();
        assert_eq!(ud.num_unit_elements(), 2);
    }

    #[test]
    fn test_reduce_ignores_different_scales() {
        let mut ud = unit("litre");
        ud.multiply_unit_def(unit("second"));
        let mut ml = unit("litre");
        ml.clear_components();
        ml.add_unit_element(UnitElement::new("litre").with_scale(-3));
        ud.divide_unit_def(ml);
        ud.reduce();
        assert_eq!(ud.num_unit_elements(), 3);
    }

    #[test]
    fn test_display() {
        let mut ud = unit("meter");
        assert_eq!(ud.to_string(), "meter");

        ud.divide_unit_def(unit("second"));
        assert_eq!(ud.to_string(), "meter / second");

        ud.divide_unit_def(unit("kilogram"));
        assert_eq!(ud.to_string(), "meter / (second * kilogram)");

        let mut per_second = unit("second");
        per_second.invert();
        assert_eq!(per_second.to_string(), "1 / second");

        let mut squared = unit("meter");
        squared.raise_to(2.0);
        squared.multiply_unit_def(unit("mole"));
        assert_eq!(squared.to_string(), "meter^2 * mole");

        assert_eq!(UnitDef::unnamed("__main").to_string(), "1");
    }

    #[test]
    fn test_set_name_is_explicit() {
        let mut ud = unit("meter");
        ud.divide_unit_def(unit("second"));
        ud.set_name(vec!["speed".to_string()]);
        assert!(!ud.name_autogenerated());
        assert!(ud.has_name());
        assert!(!UnitDef::unnamed("__main").has_name());
    }

    #[test]
    fn test_clear_references_to() {
        let mut ud = unit("mM");
        ud.divide_unit_def(unit("second"));
        assert!(!ud.clear_references_to(&["volume".to_string()]));
        assert!(ud.clear_references_to(&["cell".to_string(), "mM".to_string()]));
        assert!(ud.is_empty());
    }
}
