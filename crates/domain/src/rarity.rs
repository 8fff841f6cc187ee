use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Prize rarity tier, ordered from most to least common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    SuperRare,
    UltraRare,
}

impl Rarity {
    pub fn display_name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::SuperRare => "Super Rare",
            Rarity::UltraRare => "Ultra Rare",
        }
    }

    /// Short tier code as written in catalog files.
    pub fn code(&self) -> &'static str {
        match self {
            Rarity::Common => "N",
            Rarity::Rare => "R",
            Rarity::SuperRare => "SR",
            Rarity::UltraRare => "SSR",
        }
    }

    /// Returns all tiers in ascending order.
    pub fn all() -> [Rarity; 4] {
        [
            Rarity::Common,
            Rarity::Rare,
            Rarity::SuperRare,
            Rarity::UltraRare,
        ]
    }
}

impl FromStr for Rarity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "N" | "C" | "COMMON" | "NORMAL" => Ok(Rarity::Common),
            "R" | "RARE" => Ok(Rarity::Rare),
            "SR" | "SUPER RARE" | "SUPER_RARE" | "SUPERRARE" => Ok(Rarity::SuperRare),
            "SSR" | "ULTRA RARE" | "ULTRA_RARE" | "ULTRARARE" => Ok(Rarity::UltraRare),
            _ => Err(DomainError::parse(format!("Unknown rarity tier: {s}"))),
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
