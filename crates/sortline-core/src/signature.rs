//! # Signature Table
//!
//! Mapping from material name to infrared sensor signature.
//!
//! The table keeps insertion order: reverse lookup (`material_for`) is a
//! linear scan in that order and the first exact match wins. Signatures are
//! unique by construction, so the order only matters for determinism of
//! iteration, never for which material a reading resolves to.
//!
//! Reverse lookup of any value not present verbatim resolves to `"unknown"`.
//! Duplicate signatures are rejected when a table is built, so a colliding
//! addition fails at startup instead of shadowing an existing material.

use crate::primitives::STANDARD_SIGNATURES;
use crate::{Material, Signature, SortlineError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One `material = signature` pair of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignatureEntry {
    pub material: Material,
    pub signature: Signature,
}

impl SignatureEntry {
    #[must_use]
    pub fn new(material: impl Into<Material>, signature: u32) -> Self {
        Self {
            material: material.into(),
            signature: Signature::new(signature),
        }
    }
}

/// Immutable, validated material ↔ signature mapping.
///
/// Invariants (checked by [`SignatureTable::from_entries`]):
/// - material names are unique
/// - signatures are unique
/// - exactly one entry is `"unknown"` and it maps to 0
/// - no known material maps to 0
/// - at least one known material exists
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureTable {
    entries: Vec<SignatureEntry>,
    #[serde(skip)]
    unknown: Material,
}

impl Default for SignatureTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl SignatureTable {
    /// The built-in table: organic, plastic, paper, metal, unknown.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            entries: STANDARD_SIGNATURES
                .iter()
                .map(|&(material, signature)| SignatureEntry::new(material, signature))
                .collect(),
            unknown: Material::unknown(),
        }
    }

    /// Build a table from configuration entries, keeping their order.
    pub fn from_entries(entries: Vec<SignatureEntry>) -> Result<Self, SortlineError> {
        validate_entries(&entries)?;
        Ok(Self {
            entries,
            unknown: Material::unknown(),
        })
    }

    /// Signature of `material`, if the table contains it.
    #[must_use]
    pub fn signature_for(&self, material: &str) -> Option<Signature> {
        self.entries
            .iter()
            .find(|e| e.material.as_str() == material)
            .map(|e| e.signature)
    }

    /// Material that reads as `signature`, or `"unknown"` if none does.
    #[must_use]
    pub fn material_for(&self, signature: Signature) -> &Material {
        self.entries
            .iter()
            .find(|e| e.signature == signature)
            .map(|e| &e.material)
            .unwrap_or(&self.unknown)
    }

    /// Check whether `material` has an entry.
    #[must_use]
    pub fn contains(&self, material: &Material) -> bool {
        self.entries.iter().any(|e| &e.material == material)
    }

    /// All entries in lookup order, including `"unknown"`.
    pub fn iter(&self) -> impl Iterator<Item = &SignatureEntry> {
        self.entries.iter()
    }

    /// Entries other than `"unknown"`, in lookup order.
    pub fn known(&self) -> impl Iterator<Item = &SignatureEntry> {
        self.entries.iter().filter(|e| !e.material.is_unknown())
    }

    /// Signatures of the known materials, in lookup order.
    #[must_use]
    pub fn known_signatures(&self) -> Vec<Signature> {
        self.known().map(|e| e.signature).collect()
    }

    /// Number of entries, including `"unknown"`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a validated table; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate_entries(entries: &[SignatureEntry]) -> Result<(), SortlineError> {
    let mut materials = BTreeSet::new();
    let mut owners: BTreeMap<Signature, &Material> = BTreeMap::new();
    let mut has_unknown = false;

    for entry in entries {
        if !materials.insert(&entry.material) {
            return Err(SortlineError::DuplicateMaterial(entry.material.clone()));
        }

        if entry.material.is_unknown() {
            if !entry.signature.is_unknown() {
                return Err(SortlineError::UnknownSignatureNotZero(entry.signature));
            }
            has_unknown = true;
        } else if entry.signature.is_unknown() {
            return Err(SortlineError::ZeroSignature(entry.material.clone()));
        }

        if let Some(first) = owners.insert(entry.signature, &entry.material) {
            return Err(SortlineError::DuplicateSignature(
                entry.signature,
                first.clone(),
                entry.material.clone(),
            ));
        }
    }

    if !has_unknown {
        return Err(SortlineError::MissingUnknown);
    }
    // "unknown" is unique, so any second entry is a known material.
    if entries.len() < 2 {
        return Err(SortlineError::NoKnownMaterials);
    }

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
