//! Molecule-completion checking.
//!
//! Decides whether the scene, as a whole, currently IS one of the cataloged
//! molecules: exact composition plus a simplified bond-count condition.

use std::collections::{HashMap, HashSet};

use crate::catalog::{MoleculeCatalog, MoleculeTemplate};
use crate::periodic_table::ElementRegistry;
use crate::scene::Scene;

/// Multiset of element symbols currently placed in the scene.
fn scene_composition(scene: &Scene, registry: &ElementRegistry) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for atom in scene.atoms() {
        if let Some(elem) = registry.get(atom.element) {
            *counts.entry(elem.symbol.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// Water gets a real structural check; everything else uses the tree rule.
fn is_water(template: &MoleculeTemplate) -> bool {
    template.composition.len() == 2
        && template.composition.get("H") == Some(&2)
        && template.composition.get("O") == Some(&1)
}

/// Both hydrogens present and the oxygen carrying exactly two bonds.
fn water_bonds_satisfied(scene: &Scene, registry: &ElementRegistry) -> bool {
    let mut hydrogens = 0usize;
    let mut oxygen_bonds = None;
    for atom in scene.atoms() {
        match registry.get(atom.element).map(|e| e.symbol.as_str()) {
            Some("H") => hydrogens += 1,
            Some("O") => oxygen_bonds = Some(scene.bond_count_for(atom.id)),
            _ => {}
        }
    }
    hydrogens == 2 && oxygen_bonds == Some(2)
}

/// Find every catalog molecule the scene newly satisfies.
///
/// A template completes when the scene composition equals the template
/// composition exactly (same symbols, same counts, nothing extra) and the
/// bond condition holds: for water, the oxygen must carry exactly two bonds;
/// for everything else, total bond count must equal atom count minus one.
/// The atoms-minus-one rule assumes molecules are bond trees; it holds for
/// every cataloged target but would not survive rings.
///
/// Templates listed in `already_completed` (keyed by formula) are never
/// returned again. Pure over its snapshot inputs; the caller persists the
/// updated completion set and any score effects.
pub fn check_completion<'a>(
    scene: &Scene,
    registry: &ElementRegistry,
    catalog: &'a MoleculeCatalog,
    already_completed: &HashSet<String>,
) -> Vec<&'a MoleculeTemplate> {
    let actual = scene_composition(scene, registry);
    let mut newly = Vec::new();

    for template in catalog.iter() {
        if already_completed.contains(&template.formula) {
            continue;
        }
        if template.composition != actual {
            continue;
        }
        let bonds_ok = if is_water(template) {
            water_bonds_satisfied(scene, registry)
        } else {
            scene.bond_count() as u32 == template.atom_count().saturating_sub(1)
        };
        if bonds_ok {
            newly.push(template);
        }
    }
    newly
}
