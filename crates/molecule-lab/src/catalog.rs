//! Target molecule catalog.
//!
//! The ordered list of molecules the lab recognizes. Order matters: it drives
//! challenge progression. Loaded from embedded JSON and validated against the
//! element registry once at startup.

use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

use crate::bonding::BondCategory;
use crate::periodic_table::ElementRegistry;

/// Embed the molecule catalog at compile time.
const MOLECULES_JSON: &str = include_str!("../data/molecules.json");

/// Raw JSON molecule row.
#[derive(Debug, Deserialize)]
pub struct RawMolecule {
    pub formula: String,
    pub name: String,
    pub atoms: HashMap<String, u32>,
    pub bond: String,
}

/// Root structure of the embedded JSON document.
#[derive(Debug, Deserialize)]
pub struct MoleculeCatalogJson {
    pub molecules: Vec<RawMolecule>,
}

/// Catalog-load failures, reported at startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse molecule catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{formula}: unknown element symbol {symbol:?}")]
    UnknownElement { formula: String, symbol: String },

    #[error("{formula}: empty composition")]
    EmptyComposition { formula: String },

    #[error("{formula}: atom count for {symbol} must be at least 1")]
    ZeroCount { formula: String, symbol: String },

    #[error("duplicate formula: {0}")]
    DuplicateFormula(String),

    #[error("{formula}: unknown bond category tag {tag:?}")]
    BadBondTag { formula: String, tag: String },
}

/// A recognizable target molecule.
#[derive(Debug, Clone)]
pub struct MoleculeTemplate {
    pub formula: String,
    pub name: String,
    /// Exact multiset of element symbols the scene must contain.
    pub composition: HashMap<String, u32>,
    /// Shown next to the formula; completion matching never looks at it.
    pub expected_category: BondCategory,
}

impl MoleculeTemplate {
    /// Total number of atoms the template requires.
    pub fn atom_count(&self) -> u32 {
        self.composition.values().sum()
    }
}

/// Fixed, ordered sequence of target molecules.
#[derive(Debug)]
pub struct MoleculeCatalog {
    templates: Vec<MoleculeTemplate>,
}

impl MoleculeCatalog {
    /// Load the catalog from the embedded JSON, validating every entry
    /// against the element registry.
    pub fn load(registry: &ElementRegistry) -> Result<Self, CatalogError> {
        Self::from_json(MOLECULES_JSON, registry)
    }

    /// Parse and validate a catalog from a JSON string.
    pub fn from_json(json: &str, registry: &ElementRegistry) -> Result<Self, CatalogError> {
        let raw: MoleculeCatalogJson = serde_json::from_str(json)?;
        let mut templates: Vec<MoleculeTemplate> = Vec::with_capacity(raw.molecules.len());

        for raw_mol in raw.molecules {
            if raw_mol.atoms.is_empty() {
                return Err(CatalogError::EmptyComposition {
                    formula: raw_mol.formula,
                });
            }
            for (symbol, count) in &raw_mol.atoms {
                if registry.get_by_symbol(symbol).is_none() {
                    return Err(CatalogError::UnknownElement {
                        formula: raw_mol.formula,
                        symbol: symbol.clone(),
                    });
                }
                if *count == 0 {
                    return Err(CatalogError::ZeroCount {
                        formula: raw_mol.formula,
                        symbol: symbol.clone(),
                    });
                }
            }
            if templates.iter().any(|t| t.formula == raw_mol.formula) {
                return Err(CatalogError::DuplicateFormula(raw_mol.formula));
            }
            let expected_category =
                BondCategory::from_tag(&raw_mol.bond).ok_or_else(|| CatalogError::BadBondTag {
                    formula: raw_mol.formula.clone(),
                    tag: raw_mol.bond.clone(),
                })?;

            templates.push(MoleculeTemplate {
                formula: raw_mol.formula,
                name: raw_mol.name,
                composition: raw_mol.atoms,
                expected_category,
            });
        }

        log::debug!("molecule catalog loaded: {} targets", templates.len());
        Ok(Self { templates })
    }

    /// Get a template by catalog position.
    pub fn get(&self, idx: usize) -> Option<&MoleculeTemplate> {
        self.templates.get(idx)
    }

    /// Find a template by formula label.
    pub fn find(&self, formula: &str) -> Option<&MoleculeTemplate> {
        self.templates.iter().find(|t| t.formula == formula)
    }

    /// Iterate over templates in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &MoleculeTemplate> {
        self.templates.iter()
    }

    /// Number of cataloged molecules.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
