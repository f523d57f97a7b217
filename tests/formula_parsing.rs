//! Unit formulas from text to definitions.

use pretty_assertions::assert_eq;
use unitdef::equation::{FormulaError, UnitExpr, parse_formula};
use unitdef::{UnitDef, UnitElement, UnitError};

#[test]
fn test_parse_and_interpret() -> anyhow::Result<()> {
    let expr = parse_formula("mole / (litre * second)")?;
    assert_eq!(
        expr,
        UnitExpr::divide(
            UnitExpr::name("mole"),
            UnitExpr::times(vec![UnitExpr::name("litre"), UnitExpr::name("second")]),
        )
    );

    let ud = UnitDef::from_expression(&expr, "__main")?;
    assert_eq!(
        ud.unit_elements(),
        [
            UnitElement::new("mole"),
            UnitElement::new("litre").with_exponent(-1.0),
            UnitElement::new("second").with_exponent(-1.0),
        ]
    );
    assert_eq!(ud.to_string(), "mole / (litre * second)");
    Ok(())
}

#[test]
fn test_fractional_and_negative_powers() -> anyhow::Result<()> {
    let ud = UnitDef::from_formula("meter^0.5 * second^-1", "__main")?;
    assert_eq!(ud.unit_elements()[0].exponent, 0.5);
    assert_eq!(ud.unit_elements()[1].exponent, -1.0);
    Ok(())
}

#[test]
fn test_bare_dimension_message() {
    let err = UnitDef::from_formula("3", "__main").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unable to set a unit definition using the formula '3'.  Only multiplication, \
         division, and raising a value to a numerical power are allowed, and no 'bare' \
         dimensions are allowed (use 'dimensionless' explicitly)."
    );
}

#[test]
fn test_syntax_errors() {
    assert!(matches!(
        parse_formula("meter )"),
        Err(FormulaError::TrailingInput { .. })
    ));
    assert!(matches!(
        UnitDef::from_formula("meter )", "__main"),
        Err(UnitError::InvalidUnitExpression { .. })
    ));
}

#[test]
fn test_explicit_name_survives_formula() -> anyhow::Result<()> {
    let mut ud = UnitDef::new("per_min", "__main");
    ud.set_from_formula("1 / (60 second)")?;
    assert_eq!(ud.name_delimited_by("_"), "per_min");
    assert!(!ud.name_autogenerated());
    let el = &ud.unit_elements()[0];
    assert_eq!(el.kind, "second");
    assert_eq!(el.exponent, -1.0);
    Ok(())
}
