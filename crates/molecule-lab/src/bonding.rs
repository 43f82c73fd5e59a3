//! Pairwise bonding rules - eligibility, bond classification, bond capacity.
//!
//! This is classroom chemistry, not valence theory: membership allow-lists
//! plus an electronegativity fallback. All rule data lives in `const` tables
//! so growing the element catalog does not grow the code.

use std::fmt;

use crate::periodic_table::ElementData;

/// Electronegativity difference above which a bond is classified ionic.
const IONIC_THRESHOLD: f64 = 1.7;

/// Largest electronegativity difference the fallback eligibility rule accepts.
const MAX_FALLBACK_DIFF: f64 = 3.0;

/// Elements that never bond.
const NOBLE_GASES: &[&str] = &["He", "Ne", "Ar", "Kr", "Xe", "Rn", "Og"];

/// Partners hydrogen readily bonds with, besides another hydrogen.
const HYDROGEN_PARTNERS: &[&str] = &["C", "N", "O", "F", "S", "Cl", "Br", "I"];

/// Partners carbon readily bonds with.
const CARBON_PARTNERS: &[&str] = &["C", "N", "O", "F", "S", "Cl", "Br", "I", "Si", "P"];

/// Elements that pair with themselves as diatomic gases.
const DIATOMIC_ELEMENTS: &[&str] = &["H", "O", "N", "F", "Cl", "Br", "I"];

/// Metal side of the metal + nonmetal rule.
const METALS: &[&str] = &[
    "Li", "Be", "Na", "Mg", "Al", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni",
    "Cu", "Zn", "Ga", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd",
    "In", "Sn", "Cs", "Ba", "W", "Pt", "Au", "Hg", "Pb", "Bi", "Ra", "U",
];

/// Nonmetal side of the metal + nonmetal rule.
const NONMETALS: &[&str] = &["H", "C", "N", "O", "F", "P", "S", "Cl", "Se", "Br", "I"];

/// Additional nonmetal pairs that bond covalently.
const COVALENT_PAIRS: &[(&str, &str)] = &[
    ("N", "O"),
    ("N", "F"),
    ("N", "Cl"),
    ("P", "O"),
    ("P", "F"),
    ("P", "Cl"),
    ("S", "O"),
    ("S", "F"),
    ("S", "Cl"),
    ("Si", "O"),
    ("Si", "F"),
    ("Si", "Cl"),
    ("B", "H"),
    ("B", "F"),
    ("B", "O"),
    ("Se", "O"),
];

/// Per-element maximum simultaneous bond count. An authoritative table, not
/// derived from electron configuration.
const MAX_BONDS: &[(&str, u8)] = &[
    ("H", 1),
    ("He", 0),
    ("Li", 1),
    ("Be", 2),
    ("B", 3),
    ("C", 4),
    ("N", 3),
    ("O", 2),
    ("F", 1),
    ("Ne", 0),
    ("Na", 1),
    ("Mg", 2),
    ("Al", 3),
    ("Si", 4),
    ("P", 5),
    ("S", 6),
    ("Cl", 1),
    ("Ar", 0),
    ("K", 1),
    ("Ca", 2),
    ("Sc", 3),
    ("Ti", 4),
    ("V", 5),
    ("Cr", 3),
    ("Mn", 4),
    ("Fe", 3),
    ("Co", 3),
    ("Ni", 2),
    ("Cu", 2),
    ("Zn", 2),
    ("Ga", 3),
    ("Ge", 4),
    ("As", 3),
    ("Se", 2),
    ("Br", 1),
    ("Kr", 0),
    ("Rb", 1),
    ("Sr", 2),
    ("Y", 3),
    ("Zr", 4),
    ("Nb", 5),
    ("Mo", 6),
    ("Tc", 4),
    ("Ru", 4),
    ("Rh", 3),
    ("Pd", 2),
    ("Ag", 1),
    ("Cd", 2),
    ("In", 3),
    ("Sn", 4),
    ("Sb", 3),
    ("Te", 2),
    ("I", 1),
    ("Xe", 0),
    ("Cs", 1),
    ("Ba", 2),
    ("W", 6),
    ("Pt", 2),
    ("Au", 1),
    ("Hg", 2),
    ("Pb", 2),
    ("Bi", 3),
    ("Rn", 0),
    ("Ra", 2),
    ("U", 4),
    ("Og", 0),
];

/// Bond capacity for symbols missing from [`MAX_BONDS`].
const DEFAULT_MAX_BONDS: u8 = 1;

/// Ionic or covalent classification, derived from electronegativity difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondCategory {
    Ionic,
    Covalent,
}

impl BondCategory {
    /// Parse a lowercase catalog tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "ionic" => Some(Self::Ionic),
            "covalent" => Some(Self::Covalent),
            _ => None,
        }
    }
}

impl fmt::Display for BondCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ionic => write!(f, "ionic"),
            Self::Covalent => write!(f, "covalent"),
        }
    }
}

fn in_list(list: &[&str], symbol: &str) -> bool {
    list.contains(&symbol)
}

fn pair_in_list(list: &[(&str, &str)], a: &str, b: &str) -> bool {
    list.iter().any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
}

/// Classify the bond two elements would form.
///
/// Symmetric in its arguments and defined for every element pair. Noble-gas
/// pairs classify too, but eligibility rejects them before the category is
/// ever used.
pub fn bond_category(a: &ElementData, b: &ElementData) -> BondCategory {
    let diff = (a.electronegativity - b.electronegativity).abs();
    if diff > IONIC_THRESHOLD {
        BondCategory::Ionic
    } else {
        BondCategory::Covalent
    }
}

/// Whether two elements may bond at all.
///
/// Layered rule cascade in fixed precedence order; symmetric in its arguments.
/// A pair that falls through one layer may still be accepted by a later one.
pub fn can_bond(a: &ElementData, b: &ElementData) -> bool {
    let (sa, sb) = (a.symbol.as_str(), b.symbol.as_str());

    // Noble gases never bond, regardless of partner.
    if in_list(NOBLE_GASES, sa) || in_list(NOBLE_GASES, sb) {
        return false;
    }

    // Hydrogen with itself or a common hydrogen partner.
    if (sa == "H" && (sb == "H" || in_list(HYDROGEN_PARTNERS, sb)))
        || (sb == "H" && in_list(HYDROGEN_PARTNERS, sa))
    {
        return true;
    }

    // Carbon with a common carbon partner.
    if (sa == "C" && in_list(CARBON_PARTNERS, sb)) || (sb == "C" && in_list(CARBON_PARTNERS, sa)) {
        return true;
    }

    // Homonuclear diatomics.
    if sa == sb && in_list(DIATOMIC_ELEMENTS, sa) {
        return true;
    }

    // Metal + nonmetal (ionic bonding).
    if (in_list(METALS, sa) && in_list(NONMETALS, sb))
        || (in_list(METALS, sb) && in_list(NONMETALS, sa))
    {
        return true;
    }

    // Known covalent nonmetal pairs.
    if pair_in_list(COVALENT_PAIRS, sa, sb) {
        return true;
    }

    // Fallback: both reactive, and not wildly mismatched.
    a.electronegativity > 0.0
        && b.electronegativity > 0.0
        && (a.electronegativity - b.electronegativity).abs() <= MAX_FALLBACK_DIFF
}

/// Maximum simultaneous bonds for an element symbol.
///
/// Unknown symbols default to 1.
pub fn max_bonds(symbol: &str) -> u8 {
    MAX_BONDS
        .iter()
        .find(|(s, _)| *s == symbol)
        .map(|&(_, n)| n)
        .unwrap_or(DEFAULT_MAX_BONDS)
}

/// Remaining bond slots for an element with `current_bonds` existing bonds.
/// Never negative.
pub fn available_bonds(symbol: &str, current_bonds: u8) -> u8 {
    max_bonds(symbol).saturating_sub(current_bonds)
}
