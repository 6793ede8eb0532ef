//! Ancestor chart and ancestor distance map.

use std::collections::{HashMap, VecDeque};

use super::{AncestorLine, RelationshipEngine};
use crate::error::Result;

impl<'a> RelationshipEngine<'a> {
    /// Parents of `id` through its canonical parent family that exist in the store
    fn parents_of(&self, id: &str) -> Vec<&'a str> {
        let store = self.store;
        store
            .parent_family_of(id)
            .map(|family| {
                family
                    .parents()
                    .filter(|parent| store.contains_individual(parent))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Ancestor chart of `root`, post-order: the husband's line, then the
    /// wife's line, then the person, each labelled with its generation.
    pub fn ancestor_chart(&self, root: &str) -> Result<Vec<AncestorLine>> {
        self.store.require_individual(root)?;

        let mut lines = Vec::new();
        // (id, generation, parents already queued)
        let mut stack: Vec<(String, usize, bool)> = vec![(root.to_string(), 0, false)];

        while let Some((id, generation, expanded)) = stack.pop() {
            if expanded {
                lines.push(AncestorLine {
                    generation,
                    individual: id,
                });
                continue;
            }

            self.check_depth(generation)?;
            let parents = self.parents_of(&id);
            stack.push((id, generation, true));
            for parent in parents.into_iter().rev() {
                stack.push((parent.to_string(), generation + 1, false));
            }
        }

        Ok(lines)
    }

    /// Every ancestor of `id` (including `id` at 0) mapped to its generation
    /// distance. Both parents are followed at each step; an ancestor reached
    /// along several lines keeps its smallest distance.
    pub fn ancestor_distances(&self, id: &str) -> Result<HashMap<String, usize>> {
        self.store.require_individual(id)?;

        let mut distances = HashMap::new();
        let mut queue = VecDeque::new();
        distances.insert(id.to_string(), 0);
        queue.push_back((id.to_string(), 0usize));

        while let Some((current, distance)) = queue.pop_front() {
            for parent in self.parents_of(&current) {
                if distances.contains_key(parent) {
                    continue;
                }
                self.check_depth(distance + 1)?;
                distances.insert(parent.to_string(), distance + 1);
                queue.push_back((parent.to_string(), distance + 1));
            }
        }

        Ok(distances)
    }
}
