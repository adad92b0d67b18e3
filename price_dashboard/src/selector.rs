//! The static list of selectable assets and the current selection.

use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

use crate::models::asset::{default_assets, Asset};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The symbol is not in the configured asset list.
    #[error("unknown asset symbol '{0}'")]
    UnknownSymbol(String),

    #[error("the asset list is empty")]
    EmptyAssetList,

    #[error("asset symbol '{0}' is listed more than once")]
    DuplicateSymbol(String),
}

/// Ordered registry of assets keyed by symbol, plus the selected one.
///
/// Selecting an unknown symbol is an error and leaves the current selection
/// untouched, so there is always a valid selected asset.
#[derive(Debug, Clone)]
pub struct AssetSelector {
    assets: IndexMap<String, Asset>,
    selected: usize,
}

impl AssetSelector {
    /// Builds a selector over `assets`, selecting the first one.
    pub fn new(assets: Vec<Asset>) -> Result<Self, SelectionError> {
        if assets.is_empty() {
            return Err(SelectionError::EmptyAssetList);
        }
        let mut by_symbol = IndexMap::with_capacity(assets.len());
        for mut asset in assets {
            // The stored symbol is what goes on the wire, so it must match the key.
            asset.symbol = asset.symbol.trim().to_string();
            if by_symbol.contains_key(&asset.symbol) {
                return Err(SelectionError::DuplicateSymbol(asset.symbol));
            }
            by_symbol.insert(asset.symbol.clone(), asset);
        }
        Ok(Self {
            assets: by_symbol,
            selected: 0,
        })
    }

    /// Assets in the order they were configured.
    pub fn assets(&self) -> impl ExactSizeIterator<Item = &Asset> {
        self.assets.values()
    }

    pub fn selected(&self) -> &Asset {
        // `new` rejects empty lists and `select` only stores valid indices.
        &self.assets[self.selected]
    }

    pub fn get(&self, symbol: &str) -> Option<&Asset> {
        self.assets.get(symbol.trim())
    }

    /// Makes `symbol` the current selection.
    pub fn select(&mut self, symbol: &str) -> Result<&Asset, SelectionError> {
        let symbol = symbol.trim();
        let index = self
            .assets
            .get_index_of(symbol)
            .ok_or_else(|| SelectionError::UnknownSymbol(symbol.to_string()))?;
        self.selected = index;
        debug!(symbol, "asset selected");
        Ok(&self.assets[index])
    }
}

impl Default for AssetSelector {
    fn default() -> Self {
        Self {
            assets: default_assets()
                .into_iter()
                .map(|a| (a.symbol.clone(), a))
                .collect(),
            selected: 0,
        }
    }
}
