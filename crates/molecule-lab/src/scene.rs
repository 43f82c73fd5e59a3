//! Scene state: placed atoms, bonds, and the commands that mutate them.
//!
//! The pointer-handler mutation of a typical builder UI is abstracted here as
//! explicit command functions, so the bonding rules can be exercised without
//! a rendering harness.

use glam::Vec3;
use thiserror::Error;

use crate::bonding::{self, BondCategory};
use crate::periodic_table::ElementRegistry;

/// Default maximum distance (world units) at which a bond may be formed.
/// Interaction-layer policy, not a chemistry rule.
pub const DEFAULT_BOND_REACH: f32 = 150.0;

/// Identifier of a placed atom, unique within a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AtomId(pub u32);

/// Identifier of a bond, unique within a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BondId(pub u32);

/// A user-placed instance of an element.
#[derive(Debug, Clone)]
pub struct PlacedAtom {
    pub id: AtomId,
    /// Atomic number of the element this atom instantiates.
    pub element: u32,
    /// World position; only used for the bond-reach check.
    pub position: Vec3,
}

/// A bond between two placed atoms. Endpoints are an unordered pair.
#[derive(Debug, Clone)]
pub struct MolecularBond {
    pub id: BondId,
    pub atom_a: AtomId,
    pub atom_b: AtomId,
    /// Classified from electronegativity difference at creation time.
    pub category: BondCategory,
    /// Rendering multiplicity; correctness checks ignore it.
    pub strength: u8,
}

impl MolecularBond {
    /// Whether this bond connects the given atoms, in either order.
    pub fn connects(&self, a: AtomId, b: AtomId) -> bool {
        (self.atom_a == a && self.atom_b == b) || (self.atom_a == b && self.atom_b == a)
    }

    /// Whether this bond has the given atom as an endpoint.
    pub fn touches(&self, id: AtomId) -> bool {
        self.atom_a == id || self.atom_b == id
    }
}

/// Why a bond attempt was refused. Every variant is an expected outcome the
/// caller can surface to the user, not an error condition.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BondRejection {
    #[error("an atom cannot bond to itself")]
    SameAtom,

    #[error("no such atom in the scene")]
    UnknownAtom,

    #[error("element data missing for an atom")]
    UnknownElement,

    #[error("these atoms are already bonded")]
    DuplicateBond,

    #[error("atom cannot bond further")]
    Saturated { atom: AtomId },

    #[error("these elements are incompatible")]
    Incompatible,

    #[error("atoms are too far apart ({distance:.0} > {reach:.0})")]
    TooFar { distance: f32, reach: f32 },
}

/// The working scene: live atom and bond collections plus id generation.
pub struct Scene {
    atoms: Vec<PlacedAtom>,
    bonds: Vec<MolecularBond>,
    bond_reach: f32,
    next_atom_id: u32,
    next_bond_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_bond_reach(DEFAULT_BOND_REACH)
    }

    /// Create a scene with a custom bond-reach threshold.
    pub fn with_bond_reach(bond_reach: f32) -> Self {
        Self {
            atoms: Vec::new(),
            bonds: Vec::new(),
            bond_reach,
            next_atom_id: 1,
            next_bond_id: 1,
        }
    }

    /// Place a new atom. Returns `None` if the element is not in the registry.
    pub fn add_atom(
        &mut self,
        registry: &ElementRegistry,
        atomic_number: u32,
        position: Vec3,
    ) -> Option<AtomId> {
        registry.get(atomic_number)?;

        let id = AtomId(self.next_atom_id);
        self.next_atom_id += 1;
        self.atoms.push(PlacedAtom {
            id,
            element: atomic_number,
            position,
        });
        log::debug!("atom {:?} placed (element {atomic_number})", id);
        Some(id)
    }

    /// Try to bond two atoms.
    ///
    /// Checks run in a fixed order so each refusal carries the most specific
    /// reason: self-bond, unknown atom, duplicate pair, saturation on either
    /// side, chemical incompatibility, and finally reach.
    pub fn create_bond(
        &mut self,
        registry: &ElementRegistry,
        a: AtomId,
        b: AtomId,
    ) -> Result<BondId, BondRejection> {
        if a == b {
            return Err(BondRejection::SameAtom);
        }
        let (element_a, pos_a) = {
            let atom = self.atom(a).ok_or(BondRejection::UnknownAtom)?;
            (atom.element, atom.position)
        };
        let (element_b, pos_b) = {
            let atom = self.atom(b).ok_or(BondRejection::UnknownAtom)?;
            (atom.element, atom.position)
        };
        if self.has_bond_between(a, b) {
            return Err(BondRejection::DuplicateBond);
        }

        let elem_a = registry.get(element_a).ok_or(BondRejection::UnknownElement)?;
        let elem_b = registry.get(element_b).ok_or(BondRejection::UnknownElement)?;

        if bonding::available_bonds(&elem_a.symbol, self.bond_count_for(a)) == 0 {
            return Err(BondRejection::Saturated { atom: a });
        }
        if bonding::available_bonds(&elem_b.symbol, self.bond_count_for(b)) == 0 {
            return Err(BondRejection::Saturated { atom: b });
        }
        if !bonding::can_bond(elem_a, elem_b) {
            return Err(BondRejection::Incompatible);
        }
        let distance = pos_a.distance(pos_b);
        if distance > self.bond_reach {
            return Err(BondRejection::TooFar {
                distance,
                reach: self.bond_reach,
            });
        }

        let category = bonding::bond_category(elem_a, elem_b);
        let id = BondId(self.next_bond_id);
        self.next_bond_id += 1;
        self.bonds.push(MolecularBond {
            id,
            atom_a: a,
            atom_b: b,
            category,
            strength: 1,
        });
        log::debug!(
            "bond {:?} created: {}-{} ({category})",
            id,
            elem_a.symbol,
            elem_b.symbol
        );
        Ok(id)
    }

    /// Remove a bond. Returns whether it existed.
    pub fn remove_bond(&mut self, id: BondId) -> bool {
        let before = self.bonds.len();
        self.bonds.retain(|b| b.id != id);
        self.bonds.len() != before
    }

    /// Delete an atom, cascading to every bond that references it.
    /// Returns whether the atom existed.
    pub fn delete_atom(&mut self, id: AtomId) -> bool {
        let before = self.atoms.len();
        self.atoms.retain(|a| a.id != id);
        if self.atoms.len() == before {
            return false;
        }
        let bonds_before = self.bonds.len();
        self.bonds.retain(|b| !b.touches(id));
        log::debug!(
            "atom {:?} deleted, {} bond(s) cascaded",
            id,
            bonds_before - self.bonds.len()
        );
        true
    }

    /// Move an atom. Returns whether it existed.
    pub fn move_atom(&mut self, id: AtomId, position: Vec3) -> bool {
        match self.atoms.iter_mut().find(|a| a.id == id) {
            Some(atom) => {
                atom.position = position;
                true
            }
            None => false,
        }
    }

    /// Remove all atoms and bonds.
    pub fn clear(&mut self) {
        self.atoms.clear();
        self.bonds.clear();
    }

    /// Look up an atom by id.
    pub fn atom(&self, id: AtomId) -> Option<&PlacedAtom> {
        self.atoms.iter().find(|a| a.id == id)
    }

    /// All placed atoms.
    pub fn atoms(&self) -> &[PlacedAtom] {
        &self.atoms
    }

    /// All bonds.
    pub fn bonds(&self) -> &[MolecularBond] {
        &self.bonds
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Number of bonds the given atom participates in.
    pub fn bond_count_for(&self, id: AtomId) -> u8 {
        let count = self.bonds.iter().filter(|b| b.touches(id)).count();
        count.min(u8::MAX as usize) as u8
    }

    /// Remaining bond slots for a placed atom. Recomputed from the live bond
    /// list on every call, so it always reflects the latest mutation.
    pub fn available_bonds(&self, registry: &ElementRegistry, id: AtomId) -> Option<u8> {
        let atom = self.atom(id)?;
        let elem = registry.get(atom.element)?;
        Some(bonding::available_bonds(&elem.symbol, self.bond_count_for(id)))
    }

    /// Whether a bond exists between the given atoms, in either order.
    pub fn has_bond_between(&self, a: AtomId, b: AtomId) -> bool {
        self.bonds.iter().any(|bond| bond.connects(a, b))
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::periodic_table::ElementRegistry;

    const H: u32 = 1;
    const HE: u32 = 2;
    const C: u32 = 6;
    const O: u32 = 8;

    fn registry() -> ElementRegistry {
        ElementRegistry::load().expect("embedded catalog should load")
    }

    fn near(i: u32) -> Vec3 {
        Vec3::new(i as f32 * 50.0, 0.0, 0.0)
    }

    #[test]
    fn add_atom_assigns_unique_ids() {
        let registry = registry();
        let mut scene = Scene::new();
        let a = scene.add_atom(&registry, H, near(0)).unwrap();
        let b = scene.add_atom(&registry, H, near(1)).unwrap();
        assert_ne!(a, b);
        assert_eq!(scene.atom_count(), 2);
    }

    #[test]
    fn unknown_element_is_not_placed() {
        let registry = registry();
        let mut scene = Scene::new();
        assert!(scene.add_atom(&registry, 999, near(0)).is_none());
        assert_eq!(scene.atom_count(), 0);
    }

    #[test]
    fn bond_two_hydrogens() {
        let registry = registry();
        let mut scene = Scene::new();
        let a = scene.add_atom(&registry, H, near(0)).unwrap();
        let b = scene.add_atom(&registry, H, near(1)).unwrap();

        let bond = scene.create_bond(&registry, a, b).unwrap();
        assert_eq!(scene.bond_count(), 1);
        assert_eq!(scene.bonds()[0].id, bond);
        assert_eq!(scene.bonds()[0].category, BondCategory::Covalent);
        assert_eq!(scene.bonds()[0].strength, 1);
    }

    #[test]
    fn self_bond_is_rejected() {
        let registry = registry();
        let mut scene = Scene::new();
        let a = scene.add_atom(&registry, H, near(0)).unwrap();
        assert_eq!(
            scene.create_bond(&registry, a, a),
            Err(BondRejection::SameAtom)
        );
    }

    #[test]
    fn duplicate_bond_is_rejected_in_either_order() {
        let registry = registry();
        let mut scene = Scene::new();
        let a = scene.add_atom(&registry, H, near(0)).unwrap();
        let b = scene.add_atom(&registry, O, near(1)).unwrap();
        scene.create_bond(&registry, a, b).unwrap();

        assert_eq!(
            scene.create_bond(&registry, a, b),
            Err(BondRejection::DuplicateBond)
        );
        assert_eq!(
            scene.create_bond(&registry, b, a),
            Err(BondRejection::DuplicateBond)
        );
        assert_eq!(scene.bond_count(), 1);
    }

    #[test]
    fn saturated_atom_is_rejected() {
        let registry = registry();
        let mut scene = Scene::new();
        // Hydrogen holds a single bond.
        let a = scene.add_atom(&registry, H, near(0)).unwrap();
        let b = scene.add_atom(&registry, H, near(1)).unwrap();
        let c = scene.add_atom(&registry, H, near(2)).unwrap();
        scene.create_bond(&registry, a, b).unwrap();

        assert_eq!(
            scene.create_bond(&registry, a, c),
            Err(BondRejection::Saturated { atom: a })
        );
    }

    #[test]
    fn incompatible_elements_are_rejected() {
        let registry = registry();
        let mut scene = Scene::new();
        let a = scene.add_atom(&registry, H, near(0)).unwrap();
        let b = scene.add_atom(&registry, HE, near(1)).unwrap();
        assert_eq!(
            scene.create_bond(&registry, a, b),
            Err(BondRejection::Incompatible)
        );
    }

    #[test]
    fn distant_atoms_are_rejected_even_when_otherwise_eligible() {
        let registry = registry();
        let mut scene = Scene::new();
        let a = scene.add_atom(&registry, H, Vec3::ZERO).unwrap();
        let b = scene
            .add_atom(&registry, O, Vec3::new(DEFAULT_BOND_REACH * 2.0, 0.0, 0.0))
            .unwrap();
        assert!(matches!(
            scene.create_bond(&registry, a, b),
            Err(BondRejection::TooFar { .. })
        ));

        // Bring them together and the same pair bonds.
        scene.move_atom(b, Vec3::new(50.0, 0.0, 0.0));
        assert!(scene.create_bond(&registry, a, b).is_ok());
    }

    #[test]
    fn delete_atom_cascades_to_bonds() {
        let registry = registry();
        let mut scene = Scene::new();
        let o = scene.add_atom(&registry, O, near(0)).unwrap();
        let h1 = scene.add_atom(&registry, H, near(1)).unwrap();
        let h2 = scene.add_atom(&registry, H, near(2)).unwrap();
        scene.create_bond(&registry, o, h1).unwrap();
        scene.create_bond(&registry, o, h2).unwrap();
        assert_eq!(scene.available_bonds(&registry, h1), Some(0));

        assert!(scene.delete_atom(o));
        assert_eq!(scene.bond_count(), 0);
        // Hydrogen slots free up once the shared bond is gone.
        assert_eq!(scene.available_bonds(&registry, h1), Some(1));
        assert_eq!(scene.available_bonds(&registry, h2), Some(1));
    }

    #[test]
    fn remove_bond_restores_availability() {
        let registry = registry();
        let mut scene = Scene::new();
        let a = scene.add_atom(&registry, H, near(0)).unwrap();
        let b = scene.add_atom(&registry, H, near(1)).unwrap();
        let bond = scene.create_bond(&registry, a, b).unwrap();
        assert_eq!(scene.available_bonds(&registry, a), Some(0));

        assert!(scene.remove_bond(bond));
        assert_eq!(scene.available_bonds(&registry, a), Some(1));
        assert!(!scene.remove_bond(bond));
    }

    #[test]
    fn carbon_takes_four_bonds() {
        let registry = registry();
        let mut scene = Scene::new();
        let c = scene.add_atom(&registry, C, Vec3::ZERO).unwrap();
        let spots = [
            Vec3::new(50.0, 0.0, 0.0),
            Vec3::new(-50.0, 0.0, 0.0),
            Vec3::new(0.0, 50.0, 0.0),
            Vec3::new(0.0, -50.0, 0.0),
            Vec3::new(0.0, 0.0, 50.0),
        ];
        let hs: Vec<AtomId> = spots
            .iter()
            .map(|&p| scene.add_atom(&registry, H, p).unwrap())
            .collect();

        for h in &hs[..4] {
            scene.create_bond(&registry, c, *h).unwrap();
        }
        assert_eq!(scene.available_bonds(&registry, c), Some(0));
        assert_eq!(
            scene.create_bond(&registry, c, hs[4]),
            Err(BondRejection::Saturated { atom: c })
        );
    }

    #[test]
    fn clear_resets_state() {
        let registry = registry();
        let mut scene = Scene::new();
        let a = scene.add_atom(&registry, H, near(0)).unwrap();
        let b = scene.add_atom(&registry, H, near(1)).unwrap();
        scene.create_bond(&registry, a, b).unwrap();

        scene.clear();
        assert_eq!(scene.atom_count(), 0);
        assert_eq!(scene.bond_count(), 0);
    }

    #[test]
    fn rejection_messages_are_distinct() {
        let messages = [
            BondRejection::SameAtom.to_string(),
            BondRejection::DuplicateBond.to_string(),
            BondRejection::Saturated { atom: AtomId(1) }.to_string(),
            BondRejection::Incompatible.to_string(),
            BondRejection::TooFar {
                distance: 300.0,
                reach: 150.0,
            }
            .to_string(),
        ];
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
