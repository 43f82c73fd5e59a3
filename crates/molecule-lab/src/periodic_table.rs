//! Periodic table data structures and registry.
//!
//! Element data is embedded as JSON, parsed and validated once at startup.
//! The registry is immutable afterwards; everything else in the crate reads
//! element facts through it.

use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

/// Embed the element catalog at compile time.
const PERIODIC_TABLE_JSON: &str = include_str!("../data/periodic-table.json");

/// Scale factor converting covalent radii (pm) to world units.
/// Carbon (76 pm) becomes ~23 world units, which renders nicely.
const PM_TO_WORLD: f32 = 0.30;

/// Raw JSON element row.
#[derive(Debug, Deserialize)]
pub struct RawElement {
    pub number: u32,
    pub symbol: String,
    pub name: String,
    pub category: String,
    pub period: u32,
    pub group: Option<u32>,
    pub shells: Vec<u32>,
    pub electronegativity: f64,
    #[serde(rename = "cpk-hex")]
    pub cpk_hex: Option<String>,
    pub covalent_radius_pm: u16,
}

/// Root structure of the embedded JSON document.
#[derive(Debug, Deserialize)]
pub struct PeriodicTableJson {
    pub elements: Vec<RawElement>,
}

/// Element category for display grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementCategory {
    AlkaliMetal,
    AlkalineEarthMetal,
    TransitionMetal,
    PostTransitionMetal,
    Metalloid,
    NonMetal,
    NobleGas,
    Lanthanide,
    Actinide,
    Unknown,
}

impl ElementCategory {
    /// Parse a category string from the JSON catalog.
    pub fn from_tag(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "alkali metal" => Self::AlkaliMetal,
            "alkaline earth metal" => Self::AlkalineEarthMetal,
            "transition metal" => Self::TransitionMetal,
            "post-transition metal" => Self::PostTransitionMetal,
            "metalloid" => Self::Metalloid,
            "diatomic nonmetal" | "polyatomic nonmetal" => Self::NonMetal,
            "noble gas" => Self::NobleGas,
            "lanthanide" => Self::Lanthanide,
            "actinide" => Self::Actinide,
            _ => Self::Unknown,
        }
    }
}

/// Opaque display color for an element sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Fallback color for elements without CPK data.
const FALLBACK_COLOR: Rgb = Rgb::new(0.7, 0.7, 0.7);

/// Catalog-load failures. All of these are reported at startup, never
/// mid-evaluation.
#[derive(Debug, Error)]
pub enum ElementTableError {
    #[error("failed to parse element catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate element symbol: {0}")]
    DuplicateSymbol(String),

    #[error("duplicate atomic number: {0}")]
    DuplicateNumber(u32),

    #[error("{symbol}: shell occupancies sum to {actual}, expected {expected}")]
    ShellMismatch {
        symbol: String,
        expected: u32,
        actual: u32,
    },

    #[error("{symbol}: electronegativity must be non-negative, got {value}")]
    NegativeElectronegativity { symbol: String, value: f64 },

    #[error("{symbol}: covalent radius must be positive")]
    ZeroRadius { symbol: String },

    #[error("{symbol}: invalid CPK hex color {hex:?}")]
    BadColor { symbol: String, hex: String },
}

/// Processed element data for runtime use.
#[derive(Debug, Clone)]
pub struct ElementData {
    pub atomic_number: u32,
    pub symbol: String,
    pub name: String,
    pub category: ElementCategory,
    pub period: u32,
    pub group: Option<u32>,
    /// Electron occupancy per shell, innermost first. Sums to the atomic number.
    pub shells: Vec<u32>,
    /// Pauling electronegativity; 0.0 marks a noble gas / non-reactive element.
    pub electronegativity: f64,
    /// Electrons in the outermost shell.
    pub valence_electrons: u32,
    /// Single-bond covalent radius in picometers.
    pub covalent_radius_pm: u16,
    /// Display radius in world units.
    pub radius: f32,
    /// CPK display color.
    pub color: Rgb,
}

/// Parse a CPK hex string like `"ff0d0d"`.
fn parse_cpk_color(symbol: &str, hex: Option<&str>) -> Result<Rgb, ElementTableError> {
    let Some(hex) = hex else {
        return Ok(FALLBACK_COLOR);
    };
    let bad = || ElementTableError::BadColor {
        symbol: symbol.to_string(),
        hex: hex.to_string(),
    };
    if hex.len() != 6 {
        return Err(bad());
    }
    let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| bad())?;
    let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| bad())?;
    let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| bad())?;
    Ok(Rgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
    ))
}

/// Element registry with O(1) lookup by atomic number or symbol.
#[derive(Debug)]
pub struct ElementRegistry {
    elements: HashMap<u32, ElementData>,
    by_symbol: HashMap<String, u32>,
}

impl ElementRegistry {
    /// Load the registry from the embedded JSON catalog.
    pub fn load() -> Result<Self, ElementTableError> {
        Self::from_json(PERIODIC_TABLE_JSON)
    }

    /// Parse and validate a registry from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ElementTableError> {
        let raw: PeriodicTableJson = serde_json::from_str(json)?;
        let mut elements = HashMap::new();
        let mut by_symbol = HashMap::new();

        for raw_elem in raw.elements {
            let shell_sum: u32 = raw_elem.shells.iter().sum();
            if shell_sum != raw_elem.number {
                return Err(ElementTableError::ShellMismatch {
                    symbol: raw_elem.symbol,
                    expected: raw_elem.number,
                    actual: shell_sum,
                });
            }
            if raw_elem.electronegativity < 0.0 {
                return Err(ElementTableError::NegativeElectronegativity {
                    symbol: raw_elem.symbol,
                    value: raw_elem.electronegativity,
                });
            }
            if raw_elem.covalent_radius_pm == 0 {
                return Err(ElementTableError::ZeroRadius {
                    symbol: raw_elem.symbol,
                });
            }
            let color = parse_cpk_color(&raw_elem.symbol, raw_elem.cpk_hex.as_deref())?;

            let data = ElementData {
                atomic_number: raw_elem.number,
                symbol: raw_elem.symbol.clone(),
                name: raw_elem.name,
                category: ElementCategory::from_tag(&raw_elem.category),
                period: raw_elem.period,
                group: raw_elem.group,
                valence_electrons: raw_elem.shells.last().copied().unwrap_or(0),
                shells: raw_elem.shells,
                electronegativity: raw_elem.electronegativity,
                covalent_radius_pm: raw_elem.covalent_radius_pm,
                radius: raw_elem.covalent_radius_pm as f32 * PM_TO_WORLD,
                color,
            };

            if by_symbol.insert(raw_elem.symbol.clone(), raw_elem.number).is_some() {
                return Err(ElementTableError::DuplicateSymbol(raw_elem.symbol));
            }
            if elements.insert(raw_elem.number, data).is_some() {
                return Err(ElementTableError::DuplicateNumber(raw_elem.number));
            }
        }

        log::debug!("element registry loaded: {} elements", elements.len());
        Ok(Self { elements, by_symbol })
    }

    /// Get element by atomic number.
    pub fn get(&self, atomic_number: u32) -> Option<&ElementData> {
        self.elements.get(&atomic_number)
    }

    /// Get element by symbol.
    pub fn get_by_symbol(&self, symbol: &str) -> Option<&ElementData> {
        self.by_symbol.get(symbol).and_then(|n| self.elements.get(n))
    }

    /// Iterate over all elements (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &ElementData> {
        self.elements.values()
    }

    /// Number of elements in the registry.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
