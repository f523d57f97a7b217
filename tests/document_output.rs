//! Writing declared units to an output document.

use pretty_assertions::assert_eq;
use unitdef::xml::{ModelDocument, UnitRecord};
use unitdef::{BaseUnit, EngineConfig, ModelUnits, Registry};

const DECLARATIONS: &str = r#"
<model_units>
    <unit name="second"/>
    <unit name="time_unit">
        <eqn>60 second</eqn>
    </unit>
    <unit name="mM">
        <eqn>mole / litre</eqn>
        <alias>millimolar</alias>
    </unit>
    <unit name="mL">
        <eqn>litre / 1000</eqn>
    </unit>
    <unit name="speed">
        <eqn>meter / second</eqn>
    </unit>
    <unit name="wobble">
        <eqn>wibble</eqn>
    </unit>
</model_units>
"#;

fn load(registry: &mut Registry) -> anyhow::Result<()> {
    let units = ModelUnits::from_xml(DECLARATIONS)?;
    let failures = units.apply_to(registry.main_module_mut());
    assert!(failures.is_empty(), "unexpected failures: {:?}", failures);
    Ok(())
}

#[test]
fn test_build_document() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut registry = Registry::new();
    load(&mut registry)?;

    let doc = registry.build_document("__main")?;
    let ids: Vec<&str> = doc
        .unit_definitions
        .iter()
        .map(|record| record.id.as_str())
        .collect();
    assert_eq!(ids, ["time", "mM", "millimolar", "mL", "speed"]);
    assert_eq!(
        registry.last_error(),
        Some("Undefined unit definition 'wibble'.")
    );

    let time = doc.unit_definition("time").ok_or_else(|| anyhow::anyhow!("no time"))?;
    assert_eq!(time.name, "time_unit");

    let speed = doc.unit_definition("speed").ok_or_else(|| anyhow::anyhow!("no speed"))?;
    assert_eq!(
        speed.units,
        [
            UnitRecord {
                kind: BaseUnit::Metre,
                exponent: 1.0,
                scale: 0,
                multiplier: 1.0,
            },
            UnitRecord {
                kind: BaseUnit::Second,
                exponent: -1.0,
                scale: 0,
                multiplier: 1.0,
            },
        ]
    );
    Ok(())
}

#[test]
fn test_document_xml() -> anyhow::Result<()> {
    let mut registry = Registry::new();
    load(&mut registry)?;
    let xml = registry.build_document("__main")?.to_xml()?;

    assert!(xml.contains(r#"<unitDefinition id="time" name="time_unit">"#));
    assert!(xml.contains(r#"<unit kind="second" exponent="1" scale="0" multiplier="60"/>"#));
    assert!(xml.contains(r#"<unit kind="metre" exponent="1" scale="0" multiplier="1"/>"#));
    assert!(xml.contains(r#"<unit kind="litre" exponent="1" scale="0" multiplier="0.001"/>"#));
    assert!(!xml.contains(r#"id="second""#));
    assert!(!xml.contains("wobble"));
    Ok(())
}

#[test]
fn test_qualified_names_use_configured_delimiter() -> anyhow::Result<()> {
    let config = EngineConfig::from_xml(r#"<unitdef name_delimiter="__"/>"#)?;
    let mut registry = Registry::with_config(config);
    let mut conc = unitdef::UnitDef::from_segments(
        vec!["cell".to_string(), "conc".to_string()],
        "__main",
    )?;
    conc.set_from_formula("mole / litre")?;
    registry.main_module_mut().add_variable(unitdef::Variable::unit(
        vec!["cell".to_string(), "conc".to_string()],
        conc,
    ));

    let doc = registry.build_document("__main")?;
    assert!(doc.unit_definition("cell__conc").is_some());
    Ok(())
}

#[test]
fn test_empty_module_document() -> anyhow::Result<()> {
    let mut registry = Registry::new();
    let doc = registry.build_document("__main")?;
    assert_eq!(doc, ModelDocument::new("__main"));
    assert!(registry.last_error().is_none());
    Ok(())
}
