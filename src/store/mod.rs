//! Entity store: individuals and families keyed by GEDCOM id.
//!
//! Entities point at each other by id only; every relation is resolved
//! through the store, and an id with no entry means the relation is absent.

mod event;
mod family;
mod individual;
mod integrity;

pub use event::{Event, EventKind};
pub use family::Family;
pub use individual::{split_name, Individual};
pub use integrity::{AmbiguousParentage, DanglingReference, IntegrityReport, LinkKind};

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{GedtreeError, Result};

/// Id-sorted maps of every individual and family in a file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Store {
    individuals: BTreeMap<String, Individual>,
    families: BTreeMap<String, Family>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an individual, returning the replaced one
    pub fn insert_individual(&mut self, individual: Individual) -> Option<Individual> {
        self.individuals.insert(individual.id.clone(), individual)
    }

    /// Insert or replace a family, returning the replaced one
    pub fn insert_family(&mut self, family: Family) -> Option<Family> {
        self.families.insert(family.id.clone(), family)
    }

    pub fn individual(&self, id: &str) -> Option<&Individual> {
        self.individuals.get(id)
    }

    pub(crate) fn individual_mut(&mut self, id: &str) -> Option<&mut Individual> {
        self.individuals.get_mut(id)
    }

    pub fn family(&self, id: &str) -> Option<&Family> {
        self.families.get(id)
    }

    /// Like [`Store::individual`] but an unknown id is an error
    pub fn require_individual(&self, id: &str) -> Result<&Individual> {
        self.individual(id)
            .ok_or_else(|| GedtreeError::UnknownIndividual(id.to_string()))
    }

    pub fn contains_individual(&self, id: &str) -> bool {
        self.individuals.contains_key(id)
    }

    /// All individuals sorted by id
    pub fn individuals(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.values()
    }

    /// All families sorted by id
    pub fn families(&self) -> impl Iterator<Item = &Family> {
        self.families.values()
    }

    pub fn individual_count(&self) -> usize {
        self.individuals.len()
    }

    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    /// Resolved canonical parent family of `id`
    pub fn parent_family_of(&self, id: &str) -> Option<&Family> {
        self.individual(id)
            .and_then(Individual::parent_family)
            .and_then(|family_id| self.family(family_id))
    }

    /// Resolved spousal families of `individual`, skipping dangling ids
    pub fn spousal_families<'a>(
        &'a self,
        individual: &'a Individual,
    ) -> impl Iterator<Item = &'a Family> + 'a {
        individual
            .spouse_of
            .iter()
            .filter_map(move |family_id| self.family(family_id))
    }

    /// Check every cross-reference and collect what does not resolve
    pub fn integrity_report(&self) -> IntegrityReport {
        let mut report = IntegrityReport::default();

        for person in self.individuals() {
            for family_id in &person.spouse_of {
                if !self.families.contains_key(family_id) {
                    report.push_dangling(&person.id, family_id, LinkKind::SpouseOf);
                }
            }
            for family_id in &person.child_of {
                if !self.families.contains_key(family_id) {
                    report.push_dangling(&person.id, family_id, LinkKind::ChildOf);
                }
            }
            if person.has_ambiguous_parentage() {
                report.ambiguous_parentage.push(AmbiguousParentage {
                    individual: person.id.clone(),
                    families: person.child_of.clone(),
                });
            }
        }

        for family in self.families() {
            let links = family
                .husband
                .iter()
                .map(|id| (id, LinkKind::Husband))
                .chain(family.wife.iter().map(|id| (id, LinkKind::Wife)))
                .chain(family.children.iter().map(|id| (id, LinkKind::Child)));
            for (person_id, kind) in links {
                if !self.individuals.contains_key(person_id) {
                    report.push_dangling(&family.id, person_id, kind);
                }
            }
        }

        report
    }
}
