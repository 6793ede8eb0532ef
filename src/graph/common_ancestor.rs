//! Closest common ancestor and relationship classification.

use super::{CommonAncestor, Relationship, RelationshipEngine};
use crate::error::Result;

impl<'a> RelationshipEngine<'a> {
    /// Nearest ancestor shared by `a` and `b`, or None when their ancestor
    /// sets do not intersect.
    ///
    /// Among shared ancestors the one with the lowest combined distance wins;
    /// equal combined distances fall back to the smallest id, so the answer
    /// does not depend on argument order.
    pub fn closest_common_ancestor(&self, a: &str, b: &str) -> Result<Option<CommonAncestor>> {
        let from_a = self.ancestor_distances(a)?;
        let from_b = self.ancestor_distances(b)?;

        let closest = from_a
            .iter()
            .filter_map(|(id, &distance_a)| {
                from_b
                    .get(id)
                    .map(|&distance_b| (id.as_str(), distance_a, distance_b))
            })
            .min_by_key(|&(id, distance_a, distance_b)| (distance_a + distance_b, id));

        let Some((ancestor, distance_a, distance_b)) = closest else {
            log::debug!("{} and {} share no ancestors", a, b);
            return Ok(None);
        };

        let relationship = Relationship::classify(distance_a, distance_b);
        log::debug!(
            "{} and {}: closest common ancestor {} at ({}, {}) -> {}",
            a,
            b,
            ancestor,
            distance_a,
            distance_b,
            relationship
        );

        Ok(Some(CommonAncestor {
            ancestor: ancestor.to_string(),
            distance_a,
            distance_b,
            relationship,
        }))
    }
}
