//! # Elementary Unit Vocabulary
//!
//! Canonicalization terminates in a fixed, closed set of base unit kinds.
//! Every user-declared unit is eventually rewritten as a product of powers of
//! these kinds, each optionally carrying a multiplier and a power-of-ten scale.
//!
//! | Kind            | Kind          | Kind          | Kind        |
//! |-----------------|---------------|---------------|-------------|
//! | `ampere`        | `farad`       | `katal`       | `newton`    |
//! | `avogadro`      | `gram`        | `kelvin`      | `ohm`       |
//! | `becquerel`     | `gray`        | `kilogram`    | `pascal`    |
//! | `candela`       | `henry`       | `liter`       | `radian`    |
//! | `celsius`       | `hertz`       | `litre`       | `second`    |
//! | `coulomb`       | `item`        | `lumen`       | `siemens`   |
//! | `dimensionless` | `joule`       | `lux`         | `sievert`   |
//! | `meter`         | `metre`       | `mole`        | `steradian` |
//! | `tesla`         | `volt`        | `watt`        | `weber`     |
//!
//! Both spellings of `meter`/`metre` and `liter`/`litre` are accepted as
//! input. Output documents always use `metre`.
//!
//! ## Examples
//!
//! ```rust
//! use unitdef::units::BaseUnit;
//!
//! let kind: BaseUnit = "meter".parse().unwrap();
//! assert_eq!(kind, BaseUnit::Meter);
//! assert_eq!(kind.document_spelling(), BaseUnit::Metre);
//!
//! assert!(BaseUnit::is_canonical("mole"));
//! assert!(!BaseUnit::is_canonical("molar"));
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A kind that is not part of the elementary vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not an elementary unit kind")]
pub struct UnknownBaseUnit(pub String);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseUnit {
    Ampere,
    Avogadro,
    Becquerel,
    Candela,
    Celsius,
    Coulomb,
    Dimensionless,
    Farad,
    Gram,
    Gray,
    Henry,
    Hertz,
    Item,
    Joule,
    Katal,
    Kelvin,
    Kilogram,
    Liter,
    Litre,
    Lumen,
    Lux,
    Meter,
    Metre,
    Mole,
    Newton,
    Ohm,
    Pascal,
    Radian,
    Second,
    Siemens,
    Sievert,
    Steradian,
    Tesla,
    Volt,
    Watt,
    Weber,
}

impl BaseUnit {
    pub const ALL: [BaseUnit; 36] = [
        BaseUnit::Ampere,
        BaseUnit::Avogadro,
        BaseUnit::Becquerel,
        BaseUnit::Candela,
        BaseUnit::Celsius,
        BaseUnit::Coulomb,
        BaseUnit::Dimensionless,
        BaseUnit::Farad,
        BaseUnit::Gram,
        BaseUnit::Gray,
        BaseUnit::Henry,
        BaseUnit::Hertz,
        BaseUnit::Item,
        BaseUnit::Joule,
        BaseUnit::Katal,
        BaseUnit::Kelvin,
        BaseUnit::Kilogram,
        BaseUnit::Liter,
        BaseUnit::Litre,
        BaseUnit::Lumen,
        BaseUnit::Lux,
        BaseUnit::Meter,
        BaseUnit::Metre,
        BaseUnit::Mole,
        BaseUnit::Newton,
        BaseUnit::Ohm,
        BaseUnit::Pascal,
        BaseUnit::Radian,
        BaseUnit::Second,
        BaseUnit::Siemens,
        BaseUnit::Sievert,
        BaseUnit::Steradian,
        BaseUnit::Tesla,
        BaseUnit::Volt,
        BaseUnit::Watt,
        BaseUnit::Weber,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BaseUnit::Ampere => "ampere",
            BaseUnit::Avogadro => "avogadro",
            BaseUnit::Becquerel => "becquerel",
            BaseUnit::Candela => "candela",
            BaseUnit::Celsius => "celsius",
            BaseUnit::Coulomb => "coulomb",
            BaseUnit::Dimensionless => "dimensionless",
            BaseUnit::Farad => "farad",
            BaseUnit::Gram => "gram",
            BaseUnit::Gray => "gray",
            BaseUnit::Henry => "henry",
            BaseUnit::Hertz => "hertz",
            BaseUnit::Item => "item",
            BaseUnit::Joule => "joule",
            BaseUnit::Katal => "katal",
            BaseUnit::Kelvin => "kelvin",
            BaseUnit::Kilogram => "kilogram",
            BaseUnit::Liter => "liter",
            BaseUnit::Litre => "litre",
            BaseUnit::Lumen => "lumen",
            BaseUnit::Lux => "lux",
            BaseUnit::Meter => "meter",
            BaseUnit::Metre => "metre",
            BaseUnit::Mole => "mole",
            BaseUnit::Newton => "newton",
            BaseUnit::Ohm => "ohm",
            BaseUnit::Pascal => "pascal",
            BaseUnit::Radian => "radian",
            BaseUnit::Second => "second",
            BaseUnit::Siemens => "siemens",
            BaseUnit::Sievert => "sievert",
            BaseUnit::Steradian => "steradian",
            BaseUnit::Tesla => "tesla",
            BaseUnit::Volt => "volt",
            BaseUnit::Watt => "watt",
            BaseUnit::Weber => "weber",
        }
    }

    /// Returns true if `kind` names an elementary unit.
    ///
    /// The comparison is exact: unit kinds are case-sensitive.
    pub fn is_canonical(kind: &str) -> bool {
        kind.parse::<BaseUnit>().is_ok()
    }

    /// The spelling used when the kind is written to an output document.
    pub fn document_spelling(self) -> BaseUnit {
        match self {
            BaseUnit::Meter => BaseUnit::Metre,
            other => other,
        }
    }
}

impl FromStr for BaseUnit {
    type Err = UnknownBaseUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BaseUnit::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownBaseUnit(s.to_string()))
    }
}

impl fmt::Display for BaseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
