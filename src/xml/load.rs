// Unit declarations are read from a <model_units> block:
// <model_units>
//    <unit name="mM">
//      <eqn>mole / litre</eqn>
//    </unit>
//    <unit name="Rabbits">
//      <alias>Rabbit</alias>
//    </unit>
//    <unit name="per_year">
//      <eqn>1 / year</eqn>
//      <alias>pa</alias>
//    </unit>
//    <unit name="Joules" disabled="true">
//      <alias>J</alias>
//    </unit>
// </model_units>
// A disabled unit is ignored entirely, aliases included.

use std::io::BufRead;

use log::{debug, warn};
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::registry::Module;
use crate::units::UnitError;
use crate::xml::DeserializeError;
use crate::xml::quick::{Attrs, read_text_content, skip_element};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelUnits {
    pub units: Vec<UnitDeclaration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnitDeclaration {
    pub name: String,
    /// The formula defining the unit. Units without one must be elementary.
    pub eqn: Option<String>,
    pub aliases: Vec<String>,
    /// Disabled units are skipped along with their aliases.
    pub disabled: bool,
}

impl ModelUnits {
    /// Reads the first `<model_units>` element found in `xml`.
    pub fn from_xml(xml: &str) -> Result<Self, DeserializeError> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);
        let mut buf = Vec::new();
        read_model_units(&mut reader, &mut buf)
    }

    /// Declares every enabled unit and its aliases in `module`.
    ///
    /// A declaration that fails does not stop the others; the failures are
    /// returned in declaration order.
    pub fn apply_to(&self, module: &mut Module) -> Vec<UnitError> {
        let mut failures = Vec::new();
        for decl in &self.units {
            if decl.disabled {
                debug!("skipping disabled unit '{}'", decl.name);
                continue;
            }
            let declared = match &decl.eqn {
                Some(eqn) => module.define_unit(&decl.name, eqn).map(|_| ()),
                None => module.define_primary_unit(&decl.name).map(|_| ()),
            };
            if let Err(err) = declared {
                warn!("{}", err);
                failures.push(err);
            }
            for alias in &decl.aliases {
                module.define_alias(alias, &decl.name);
            }
        }
        failures
    }
}

/// Scans forward to a `<model_units>` element and reads it.
pub fn read_model_units<R: BufRead>(
    reader: &mut Reader<R>,
    buf: &mut Vec<u8>,
) -> Result<ModelUnits, DeserializeError> {
    loop {
        buf.clear();
        match reader.read_event_into(buf)? {
            Event::Start(e) if e.name().as_ref() == b"model_units" => {
                return read_model_units_impl(reader, buf);
            }
            Event::Empty(e) if e.name().as_ref() == b"model_units" => {
                return Ok(ModelUnits::default());
            }
            Event::Eof => return Err(DeserializeError::MissingField("model_units".to_string())),
            _ => {}
        }
    }
}

fn read_model_units_impl<R: BufRead>(
    reader: &mut Reader<R>,
    buf: &mut Vec<u8>,
) -> Result<ModelUnits, DeserializeError> {
    let mut units = Vec::new();

    loop {
        buf.clear();
        match reader.read_event_into(buf)? {
            Event::Start(e) if e.name().as_ref() == b"unit" => {
                let attrs = Attrs::from_start(&e, reader)?;
                units.push(read_unit_declaration(reader, buf, &attrs)?);
            }
            Event::Empty(e) if e.name().as_ref() == b"unit" => {
                let attrs = Attrs::from_start(&e, reader)?;
                units.push(UnitDeclaration {
                    name: attrs.get_req("name")?.to_string(),
                    eqn: None,
                    aliases: Vec::new(),
                    disabled: attrs.get_bool_or("disabled", false)?,
                });
            }
            Event::Start(e) => {
                let element_name = e.name().as_ref().to_vec();
                skip_element(reader, buf, &element_name)?;
            }
            Event::End(e) if e.name().as_ref() == b"model_units" => break,
            Event::Eof => return Err(DeserializeError::UnexpectedEof),
            _ => {}
        }
    }

    Ok(ModelUnits { units })
}

/// Reads the body of a `<unit>` whose start tag has been consumed.
fn read_unit_declaration<R: BufRead>(
    reader: &mut Reader<R>,
    buf: &mut Vec<u8>,
    attrs: &Attrs,
) -> Result<UnitDeclaration, DeserializeError> {
    let name = attrs.get_req("name")?.to_string();
    let disabled = attrs.get_bool_or("disabled", false)?;

    let mut eqn: Option<String> = None;
    let mut aliases = Vec::new();

    loop {
        buf.clear();
        match reader.read_event_into(buf)? {
            Event::Start(e) => {
                let element_name = e.name().as_ref().to_vec();
                match element_name.as_slice() {
                    b"eqn" => {
                        let text = read_text_content(reader, buf)?;
                        eqn = (!text.is_empty()).then_some(text);
                    }
                    b"alias" => {
                        aliases.push(read_text_content(reader, buf)?);
                    }
                    _ => skip_element(reader, buf, &element_name)?,
                }
            }
            Event::End(e) if e.name().as_ref() == b"unit" => break,
            Event::Eof => return Err(DeserializeError::UnexpectedEof),
            _ => {}
        }
    }

    Ok(UnitDeclaration {
        name,
        eqn,
        aliases,
        disabled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const UNITS: &str = r#"
        <model_units>
            <unit name="mM">
                <eqn>mole / litre</eqn>
            </unit>
            <unit name="second">
                <alias>sec</alias>
                <alias>s</alias>
            </unit>
            <unit name="Joules" disabled="true">
                <alias>J</alias>
            </unit>
            <unit name="rate">
                <eqn>mM / s</eqn>
                <doc>ignored</doc>
            </unit>
            <unit name="empty"/>
        </model_units>
    "#;

    #[test]
    fn test_read_declarations() {
        let units = ModelUnits::from_xml(UNITS).unwrap();
        assert_eq!(units.units.len(), 5);
        assert_eq!(
            units.units[0],
            UnitDeclaration {
                name: "mM".to_string(),
                eqn: Some("mole / litre".to_string()),
                aliases: vec![],
                disabled: false,
            }
        );
        assert_eq!(units.units[1].aliases, ["sec", "s"]);
        assert!(units.units[2].disabled);
        assert_eq!(units.units[3].eqn.as_deref(), Some("mM / s"));
        assert_eq!(units.units[4].name, "empty");
    }

    #[test]
    fn test_missing_block() {
        let err = ModelUnits::from_xml("<model/>").unwrap_err();
        assert!(matches!(err, DeserializeError::MissingField(_)));
    }

    #[test]
    fn test_missing_name() {
        let err = ModelUnits::from_xml("<model_units><unit><eqn>meter</eqn></unit></model_units>")
            .unwrap_err();
        assert!(err.to_string().contains("unit@name"));
    }

    #[test]
    fn test_apply_to_module() {
        let units = ModelUnits::from_xml(UNITS).unwrap();
        let mut module = Module::new("__main");
        let failures = units.apply_to(&mut module);

        assert_eq!(failures, [UnitError::UndefinedUnit("empty".to_string())]);
        assert!(module.variable_named("mM").is_some());
        assert!(module.variable_named("sec").is_some());
        assert!(module.variable_named("s").is_some());
        assert!(module.variable_named("Joules").is_none());
        assert!(module.variable_named("J").is_none());
        assert!(module.variable_named("rate").is_some());
    }
}
