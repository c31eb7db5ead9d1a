//! Field inclusion strategies

use crate::error::ConversionError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Policy deciding which fields of a compound value are emitted by default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StrategyName {
    /// Only fields explicitly listed in the directive's `fields` are emitted.
    Defined,
    /// The value collapses to one field (or its href).
    Single,
    /// Every scalar field is emitted; compound fields only when listed.
    #[default]
    Scalars,
    /// A collection becomes the bare list of its converted elements.
    List,
    /// Every field is emitted unless disabled.
    All,
}

impl StrategyName {
    pub const ALL_NAMES: [&'static str; 5] = ["DEFINED", "SINGLE", "SCALARS", "LIST", "ALL"];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyName::Defined => "DEFINED",
            StrategyName::Single => "SINGLE",
            StrategyName::Scalars => "SCALARS",
            StrategyName::List => "LIST",
            StrategyName::All => "ALL",
        }
    }

    /// Look up a strategy by name, ignoring case and surrounding whitespace
    pub fn from_name(name: &str) -> Result<Self, ConversionError> {
        match name.trim().to_uppercase().as_str() {
            "DEFINED" => Ok(StrategyName::Defined),
            "SINGLE" => Ok(StrategyName::Single),
            "SCALARS" => Ok(StrategyName::Scalars),
            "LIST" => Ok(StrategyName::List),
            "ALL" => Ok(StrategyName::All),
            other => Err(ConversionError::invalid_directive(
                "strategy",
                format!(
                    "unknown strategy '{}'. Use one of {}",
                    other,
                    Self::ALL_NAMES.join(", ")
                ),
            )),
        }
    }
}

impl FromStr for StrategyName {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for StrategyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StrategyName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StrategyName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::from_name(&name).map_err(serde::de::Error::custom)
    }
}
