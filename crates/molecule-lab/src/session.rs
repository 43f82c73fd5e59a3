//! Lab session: interaction-layer policy over the pure core.
//!
//! Owns the static tables, the working scene, and the progression state a UI
//! would otherwise keep in ambient globals: selected element, completed
//! molecules, challenge cursor, score.

use std::collections::HashSet;

use glam::Vec3;
use thiserror::Error;

use crate::catalog::{CatalogError, MoleculeCatalog, MoleculeTemplate};
use crate::completion::check_completion;
use crate::periodic_table::{ElementRegistry, ElementTableError};
use crate::scene::{AtomId, BondId, BondRejection, Scene};

/// Points awarded per atom of a completed challenge molecule.
const POINTS_PER_ATOM: u32 = 10;

/// Element selected when a session starts.
const DEFAULT_ELEMENT: u32 = 6; // Carbon

/// Static-table loading failed; the session cannot start.
#[derive(Debug, Error)]
pub enum LabError {
    #[error(transparent)]
    ElementTable(#[from] ElementTableError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// How the session scores and guides the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabMode {
    /// Guided walk through the catalog from the first entry.
    Tutorial,
    /// Sandbox; completions are recognized but not scored.
    FreePlay,
    /// Goal-driven; completions score points and advance the challenge.
    Challenge,
}

/// Outcome of a successful connect: the new bond plus anything it completed.
#[derive(Debug, Clone, PartialEq)]
pub struct BondOutcome {
    pub bond: BondId,
    /// Formulas newly completed by this bond, in catalog order.
    pub completed: Vec<String>,
}

/// One user's play session.
pub struct LabSession {
    registry: ElementRegistry,
    catalog: MoleculeCatalog,
    scene: Scene,
    mode: LabMode,
    selected_element: u32,
    completed: HashSet<String>,
    challenge_index: usize,
    score: u32,
}

impl LabSession {
    /// Start a session, loading and validating both static tables.
    pub fn new(mode: LabMode) -> Result<Self, LabError> {
        let registry = ElementRegistry::load()?;
        let catalog = MoleculeCatalog::load(&registry)?;
        log::info!(
            "lab session ready: {} elements, {} target molecules, mode {:?}",
            registry.len(),
            catalog.len(),
            mode
        );
        Ok(Self {
            registry,
            catalog,
            scene: Scene::new(),
            mode,
            selected_element: DEFAULT_ELEMENT,
            completed: HashSet::new(),
            challenge_index: 0,
            score: 0,
        })
    }

    /// Select the element used by subsequent [`LabSession::place_atom`] calls.
    /// Unknown atomic numbers leave the selection unchanged.
    pub fn select_element(&mut self, atomic_number: u32) {
        if self.registry.get(atomic_number).is_some() {
            self.selected_element = atomic_number;
        }
    }

    /// Place an atom of the selected element.
    pub fn place_atom(&mut self, position: Vec3) -> Option<AtomId> {
        self.scene.add_atom(&self.registry, self.selected_element, position)
    }

    /// Try to bond two placed atoms. On success, runs the completion checker
    /// and applies the progression policy: record completions, score them in
    /// challenge mode, and advance the challenge cursor past anything built.
    pub fn connect(&mut self, a: AtomId, b: AtomId) -> Result<BondOutcome, BondRejection> {
        let bond = self.scene.create_bond(&self.registry, a, b)?;

        let newly = check_completion(&self.scene, &self.registry, &self.catalog, &self.completed);
        let mut completed = Vec::with_capacity(newly.len());
        let mut points = 0u32;
        for template in newly {
            log::info!("molecule completed: {} ({})", template.name, template.formula);
            completed.push(template.formula.clone());
            points += template.atom_count() * POINTS_PER_ATOM;
        }
        for formula in &completed {
            self.completed.insert(formula.clone());
        }
        if self.mode == LabMode::Challenge {
            self.score += points;
        }
        self.advance_challenge();

        Ok(BondOutcome { bond, completed })
    }

    /// Remove a bond.
    pub fn disconnect(&mut self, bond: BondId) -> bool {
        self.scene.remove_bond(bond)
    }

    /// Delete an atom and every bond attached to it.
    pub fn remove_atom(&mut self, atom: AtomId) -> bool {
        self.scene.delete_atom(atom)
    }

    /// Clear the scene. Recorded completions and score are kept; a molecule
    /// built once stays counted.
    pub fn reset(&mut self) {
        self.scene.clear();
    }

    /// Skip the cursor past every already-built catalog entry.
    fn advance_challenge(&mut self) {
        while let Some(template) = self.catalog.get(self.challenge_index) {
            if !self.completed.contains(&template.formula) {
                break;
            }
            self.challenge_index += 1;
        }
    }

    /// The catalog entry the user is currently asked to build, or `None`
    /// once everything is built.
    pub fn current_challenge(&self) -> Option<&MoleculeTemplate> {
        self.catalog.get(self.challenge_index)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &MoleculeCatalog {
        &self.catalog
    }

    pub fn mode(&self) -> LabMode {
        self.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn selected_element(&self) -> u32 {
        self.selected_element
    }

    /// Formulas completed so far.
    pub fn completed(&self) -> &HashSet<String> {
        &self.completed
    }
}
