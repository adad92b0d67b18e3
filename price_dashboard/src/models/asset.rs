use std::fmt;

use serde::{Deserialize, Serialize};

/// Category tag of a selectable asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    #[default]
    Stock,
    Crypto,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Stock => f.write_str("stock"),
            AssetKind::Crypto => f.write_str("crypto"),
        }
    }
}

/// An entry in the static list of assets the dashboard can display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Asset {
    /// Ticker symbol, unique within a list (e.g., "AAPL").
    pub symbol: String,
    /// Human-readable name shown in the selector.
    pub name: String,
    /// Category tag.
    #[serde(default, rename = "type")]
    pub kind: AssetKind,
}

impl Asset {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, kind: AssetKind) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            kind,
        }
    }

    pub fn stock(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(symbol, name, AssetKind::Stock)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.symbol)
    }
}

/// The assets offered when no configuration overrides them.
pub fn default_assets() -> Vec<Asset> {
    vec![
        Asset::stock("AAPL", "Apple Inc."),
        Asset::stock("GOOGL", "Alphabet Inc."),
        Asset::stock("MSFT", "Microsoft Corporation"),
    ]
}
