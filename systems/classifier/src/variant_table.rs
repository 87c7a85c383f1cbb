//! Binding between tile variants and host-provided assets.

use road_placer_core::Variant;
use thiserror::Error;

/// Host assets indexed by [`Variant::asset_index`].
///
/// The table is validated once on construction so lookups can never miss.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariantTable<T> {
    entries: Vec<T>,
}

impl<T> VariantTable<T> {
    /// Builds a table from assets listed in variant asset order.
    pub fn new(entries: Vec<T>) -> Result<Self, VariantTableError> {
        if entries.len() != Variant::ALL.len() {
            return Err(VariantTableError::Misconfigured {
                expected: Variant::ALL.len(),
                found: entries.len(),
            });
        }
        Ok(Self { entries })
    }

    /// Asset bound to the provided variant.
    #[must_use]
    pub fn get(&self, variant: Variant) -> &T {
        &self.entries[variant.asset_index()]
    }

    /// Iterates over every variant alongside its asset.
    pub fn iter(&self) -> impl Iterator<Item = (Variant, &T)> {
        Variant::ALL.into_iter().zip(self.entries.iter())
    }
}

/// Errors raised while building a [`VariantTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum VariantTableError {
    /// The number of supplied assets does not match the number of variants.
    #[error("variant table expects {expected} entries, found {found}")]
    Misconfigured {
        /// Number of variants that require an asset.
        expected: usize,
        /// Number of assets supplied.
        found: usize,
    },
}
