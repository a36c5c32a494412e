//! Container and ownership types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Error returned when parsing an unknown container type code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid container type {code:?}: expected 20DC, 40DC or 40HC")]
pub struct InvalidContainerType {
    code: String,
}

/// Error returned when parsing an unknown ownership mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid ownership {code:?}: expected COC or SOC")]
pub struct InvalidOwnership {
    code: String,
}

/// ISO-style container type code.
///
/// # Examples
///
/// ```
/// use quote_server::domain::ContainerType;
///
/// let ct: ContainerType = "20dc".parse().unwrap();
/// assert_eq!(ct, ContainerType::Dc20);
/// assert_eq!(ct.as_str(), "20DC");
/// assert!(ct.is_twenty_foot());
///
/// assert!("45HC".parse::<ContainerType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ContainerType {
    /// 20' dry container
    #[serde(rename = "20DC")]
    Dc20,
    /// 40' dry container
    #[serde(rename = "40DC")]
    Dc40,
    /// 40' high cube
    #[serde(rename = "40HC")]
    Hc40,
}

impl ContainerType {
    /// Returns the code as it appears in rate sheets.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerType::Dc20 => "20DC",
            ContainerType::Dc40 => "40DC",
            ContainerType::Hc40 => "40HC",
        }
    }

    /// Rail and drop-off tables only distinguish 20' from 40' equipment.
    pub fn is_twenty_foot(&self) -> bool {
        matches!(self, ContainerType::Dc20)
    }
}

impl FromStr for ContainerType {
    type Err = InvalidContainerType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "20DC" | "20GP" => Ok(ContainerType::Dc20),
            "40DC" | "40GP" => Ok(ContainerType::Dc40),
            "40HC" | "40HQ" => Ok(ContainerType::Hc40),
            _ => Err(InvalidContainerType { code: s.to_string() }),
        }
    }
}

/// Sheets and clients write codes loosely ("20gp", " 40HQ"), so decoding
/// goes through [`FromStr`].
impl<'de> Deserialize<'de> for ContainerType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for ContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who owns the container, which selects the sea table and drop-off rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Ownership {
    /// Carrier-owned container
    Coc,
    /// Shipper-owned container
    Soc,
}

impl Ownership {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ownership::Coc => "COC",
            Ownership::Soc => "SOC",
        }
    }
}

impl FromStr for Ownership {
    type Err = InvalidOwnership;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "COC" => Ok(Ownership::Coc),
            "SOC" => Ok(Ownership::Soc),
            _ => Err(InvalidOwnership { code: s.to_string() }),
        }
    }
}

impl<'de> Deserialize<'de> for Ownership {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gross weight band for 20' rail tariffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightTier {
    /// Up to 24 tonnes gross
    Under24t,
    /// Up to 28 tonnes gross
    Under28t,
}

impl fmt::Display for WeightTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightTier::Under24t => f.write_str("<24t"),
            WeightTier::Under28t => f.write_str("<28t"),
        }
    }
}
