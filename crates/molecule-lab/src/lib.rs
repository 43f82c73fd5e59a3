//! Deterministic chemistry core for an educational molecule-building lab.
//!
//! Players place atoms in a 3-D scene, connect them under simplified bonding
//! rules, and get credit when the scene matches a cataloged target molecule.
//! This crate is the rule evaluator behind that loop: the element and molecule
//! tables, pairwise bond eligibility, per-atom bond capacity, the bond-creation
//! protocol, and molecule-completion checking. Rendering, input, and camera
//! code belong to the embedding application, which owns the event loop and
//! calls in with snapshots.

pub mod bonding;
pub mod catalog;
pub mod completion;
pub mod periodic_table;
pub mod scene;
pub mod session;

// Re-export key types at crate root for convenience
pub use bonding::{available_bonds, bond_category, can_bond, max_bonds, BondCategory};
pub use catalog::{CatalogError, MoleculeCatalog, MoleculeTemplate};
pub use completion::check_completion;
pub use periodic_table::{ElementData, ElementRegistry, ElementTableError, Rgb};
pub use scene::{AtomId, BondId, BondRejection, MolecularBond, PlacedAtom, Scene};
pub use session::{BondOutcome, LabError, LabMode, LabSession};
