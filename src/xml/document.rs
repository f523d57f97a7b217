//! Output documents listing unit definitions in canonical form.
//!
//! A document holds one record per exported unit. Each record lists the
//! elementary kinds the unit expands to:
//!
//! ```xml
//! <model id="__main">
//!   <listOfUnitDefinitions>
//!     <unitDefinition id="speed" name="speed">
//!       <listOfUnits>
//!         <unit kind="metre" exponent="1" scale="0" multiplier="1"/>
//!         <unit kind="second" exponent="-1" scale="0" multiplier="1"/>
//!       </listOfUnits>
//!     </unitDefinition>
//!   </listOfUnitDefinitions>
//! </model>
//! ```

use quick_xml::Writer;
use serde::{Deserialize, Serialize};

use crate::registry::UnitContext;
use crate::units::{BaseUnit, UnitDef, UnitError};
use crate::xml::SerializeError;
use crate::xml::quick::{AttrList, XmlEmitter};

/// Ids that are renamed when written, because the target format reserves
/// the plain name for a built-in unit.
const RESERVED_ID_RENAMES: &[(&str, &str)] = &[("time_unit", "time")];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRecord {
    pub kind: BaseUnit,
    pub exponent: f64,
    pub scale: i32,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDefinitionRecord {
    pub id: String,
    pub name: String,
    pub units: Vec<UnitRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelDocument {
    pub id: String,
    pub unit_definitions: Vec<UnitDefinitionRecord>,
}

impl ModelDocument {
    pub fn new(id: impl Into<String>) -> Self {
        ModelDocument {
            id: id.into(),
            unit_definitions: Vec::new(),
        }
    }

    pub fn unit_definition(&self, id: &str) -> Option<&UnitDefinitionRecord> {
        self.unit_definitions.iter().find(|record| record.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.unit_definitions.is_empty()
    }

    pub fn to_xml(&self) -> Result<String, SerializeError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        let mut emit = XmlEmitter::new(&mut writer);
        emit.xml_decl()?;

        let mut model_attrs = AttrList::new();
        model_attrs.add("id", &self.id);
        emit.start_elem("model", &model_attrs)?;

        if !self.unit_definitions.is_empty() {
            emit.open("listOfUnitDefinitions")?;
            for record in &self.unit_definitions {
                write_unit_definition(&mut emit, record)?;
            }
            emit.end_elem("listOfUnitDefinitions")?;
        }

        emit.end_elem("model")?;
        Ok(String::from_utf8(writer.into_inner())?)
    }
}

fn write_unit_definition<W: std::io::Write>(
    emit: &mut XmlEmitter<'_, W>,
    record: &UnitDefinitionRecord,
) -> Result<(), SerializeError> {
    let mut attrs = AttrList::new();
    attrs.add("id", &record.id).add("name", &record.name);
    emit.start_elem("unitDefinition", &attrs)?;
    emit.open("listOfUnits")?;
    for unit in &record.units {
        let mut attrs = AttrList::new();
        attrs
            .add("kind", unit.kind.as_str())
            .add_f64("exponent", unit.exponent)
            .add_i32("scale", unit.scale)
            .add_f64("multiplier", unit.multiplier);
        emit.empty_elem_with_attrs("unit", &attrs)?;
    }
    emit.end_elem("listOfUnits")?;
    emit.end_elem("unitDefinition")?;
    Ok(())
}

impl UnitDef {
    /// Appends this definition to `doc` in canonical form.
    ///
    /// Bare elementary units such as `second` are built into the target
    /// format and are not written; `Ok(None)` is returned for them.
    pub fn add_to_document<'d, C: UnitContext + ?Sized>(
        &self,
        ctx: &C,
        doc: &'d mut ModelDocument,
        id: &str,
        name: &str,
    ) -> Result<Option<&'d UnitDefinitionRecord>, UnitError> {
        let canonical = self.get_canonical(ctx)?;
        if canonical.is_bare_kind(&self.name_delimited_by(ctx.name_delimiter())) {
            return Ok(None);
        }

        let units = canonical
            .unit_elements()
            .iter()
            .map(|el| {
                let kind: BaseUnit = el
                    .kind
                    .parse()
                    .map_err(|_| UnitError::UndefinedUnit(el.kind.clone()))?;
                Ok(UnitRecord {
                    kind: kind.document_spelling(),
                    exponent: el.exponent,
                    scale: el.scale,
                    multiplier: el.multiplier,
                })
            })
            .collect::<Result<Vec<_>, UnitError>>()?;

        let id = RESERVED_ID_RENAMES
            .iter()
            .find(|(reserved, _)| *reserved == id)
            .map_or(id, |(_, renamed)| *renamed);

        doc.unit_definitions.push(UnitDefinitionRecord {
            id: id.to_string(),
            name: name.to_string(),
            units,
        });
        Ok(doc.unit_definitions.last())
    }
}
