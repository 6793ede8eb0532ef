//! Relationship engine: descendant/ancestor charts and kinship queries.
//!
//! All queries are read-only walks over a built [`Store`]. Walks use explicit
//! stacks or queues instead of call recursion and stop with
//! [`GedtreeError::GenerationLimit`](crate::error::GedtreeError::GenerationLimit)
//! when they go deeper than the configured generation limit.

mod ancestors;
mod common_ancestor;
mod descendants;
mod relationship;

pub use relationship::Relationship;

use serde::Serialize;

use crate::error::{GedtreeError, Result};
use crate::store::Store;

/// Default for `graph.max_generations`
pub const DEFAULT_MAX_GENERATIONS: usize = 512;

/// Whether a descendant-chart line is a descendant or the spouse they married
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineRole {
    Person,
    Spouse,
}

/// One line of a descendant chart, in pre-order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescendantLine {
    /// Generations below the queried person
    pub depth: usize,
    pub role: LineRole,
    pub individual: String,
    /// Family that links this line to the one above it (None for the root)
    pub family: Option<String>,
}

/// One line of an ancestor chart, ancestors before the people they precede.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AncestorLine {
    /// Generations above the queried person
    pub generation: usize,
    pub individual: String,
}

/// Nearest ancestor shared by two people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommonAncestor {
    pub ancestor: String,
    /// Generations from the first person up to `ancestor`
    pub distance_a: usize,
    /// Generations from the second person up to `ancestor`
    pub distance_b: usize,
    pub relationship: Relationship,
}

/// Query entry points over one store.
#[derive(Debug, Clone, Copy)]
pub struct RelationshipEngine<'a> {
    store: &'a Store,
    max_generations: usize,
}

impl<'a> RelationshipEngine<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self {
            store,
            max_generations: DEFAULT_MAX_GENERATIONS,
        }
    }

    pub fn with_max_generations(mut self, max_generations: usize) -> Self {
        self.max_generations = max_generations;
        self
    }

    pub fn store(&self) -> &'a Store {
        self.store
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_generations {
            Err(GedtreeError::GenerationLimit(self.max_generations))
        } else {
            Ok(())
        }
    }
}
