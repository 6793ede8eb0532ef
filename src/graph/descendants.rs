//! Descendant chart and descendant test.

use super::{DescendantLine, LineRole, RelationshipEngine};
use crate::error::Result;

/// Pending work for the pre-order walk
enum Step {
    Person {
        id: String,
        depth: usize,
        family: Option<String>,
    },
    Spouse {
        id: String,
        depth: usize,
        family: String,
    },
}

impl<'a> RelationshipEngine<'a> {
    /// Pre-order descendant chart rooted at `root`.
    ///
    /// Each person is followed, per spousal family in file order, by the other
    /// spouse and then by that family's children one level deeper.
    pub fn descendant_chart(&self, root: &str) -> Result<Vec<DescendantLine>> {
        self.store.require_individual(root)?;

        let mut lines = Vec::new();
        let mut stack = vec![Step::Person {
            id: root.to_string(),
            depth: 0,
            family: None,
        }];

        while let Some(step) = stack.pop() {
            match step {
                Step::Spouse { id, depth, family } => lines.push(DescendantLine {
                    depth,
                    role: LineRole::Spouse,
                    individual: id,
                    family: Some(family),
                }),
                Step::Person { id, depth, family } => {
                    self.check_depth(depth)?;
                    let Some(person) = self.store.individual(&id) else {
                        continue;
                    };

                    let mut next = Vec::new();
                    for spousal in self.store.spousal_families(person) {
                        if let Some(spouse) = spousal.other_spouse(&id) {
                            if self.store.contains_individual(spouse) {
                                next.push(Step::Spouse {
                                    id: spouse.to_string(),
                                    depth,
                                    family: spousal.id.clone(),
                                });
                            }
                        }
                        for child in &spousal.children {
                            next.push(Step::Person {
                                id: child.clone(),
                                depth: depth + 1,
                                family: Some(spousal.id.clone()),
                            });
                        }
                    }
                    stack.extend(next.into_iter().rev());

                    lines.push(DescendantLine {
                        depth,
                        role: LineRole::Person,
                        individual: id,
                        family,
                    });
                }
            }
        }

        Ok(lines)
    }

    /// True if `other` is `ancestor` or descends from them through any
    /// spousal family.
    pub fn is_descendant(&self, ancestor: &str, other: &str) -> Result<bool> {
        self.store.require_individual(ancestor)?;
        self.store.require_individual(other)?;

        let mut stack = vec![(ancestor, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            if id == other {
                return Ok(true);
            }
            self.check_depth(depth)?;
            let Some(person) = self.store.individual(id) else {
                continue;
            };
            let families: Vec<_> = self.store.spousal_families(person).collect();
            for spousal in families.into_iter().rev() {
                for child in spousal.children.iter().rev() {
                    stack.push((child.as_str(), depth + 1));
                }
            }
        }

        Ok(false)
    }
}
