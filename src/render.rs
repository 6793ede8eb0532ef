//! Text rendering for entities, listings and charts.

use std::fmt;

use crate::graph::{AncestorLine, CommonAncestor, DescendantLine, LineRole};
use crate::store::{Event, Family, Individual, Store};

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.marker())?;
        for part in [&self.date, &self.place].into_iter().flatten() {
            write!(f, " {}", part)?;
        }
        Ok(())
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())?;
        for event in &self.events {
            write!(f, " {}", event)?;
        }
        Ok(())
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(husband) = &self.husband {
            parts.push(format!("Husband: {}", husband));
        }
        if let Some(wife) = &self.wife {
            parts.push(format!("Wife: {}", wife));
        }
        if !self.children.is_empty() {
            parts.push(format!("Children: {}", self.children.join(", ")));
        }
        f.write_str(&parts.join(" "))
    }
}

/// Individual text, or the bare id if it does not resolve
fn person(store: &Store, id: &str) -> String {
    store
        .individual(id)
        .map(ToString::to_string)
        .unwrap_or_else(|| id.to_string())
}

/// `ID: entity` for every individual, then every family, sorted by id
pub fn render_listing(store: &Store) -> String {
    let mut out = String::new();
    for individual in store.individuals() {
        out.push_str(&format!("{}: {}\n", individual.id, individual));
    }
    for family in store.families() {
        out.push_str(&format!("{}: {}\n", family.id, family));
    }
    out
}

/// Indented descendant tree; spouses are marked with `+`
pub fn render_descendants(store: &Store, lines: &[DescendantLine]) -> String {
    let mut out = String::new();
    for line in lines {
        let prefix = match (line.role, line.depth) {
            (LineRole::Person, 0) => String::new(),
            (LineRole::Person, depth) => format!("{}|--", "|  ".repeat(depth - 1)),
            (LineRole::Spouse, depth) => format!("{}+", "|  ".repeat(depth)),
        };
        out.push_str(&format!("{}{}\n", prefix, person(store, &line.individual)));
    }
    out
}

/// Ancestor tree: one leading space per generation, then the generation number
pub fn render_ancestors(store: &Store, lines: &[AncestorLine]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&format!(
            "{}{} {}\n",
            " ".repeat(line.generation),
            line.generation,
            person(store, &line.individual)
        ));
    }
    out
}

/// Outcome of a closest-common-ancestor query for people `a` and `b`
pub fn render_common_ancestor(
    store: &Store,
    a: &str,
    b: &str,
    found: Option<&CommonAncestor>,
) -> String {
    let Some(found) = found else {
        return format!("No common ancestors between {} and {}\n", a, b);
    };

    let relationship = if found.relationship.is_directional() {
        format!("{} is the {} of {}", a, found.relationship, b)
    } else {
        format!("{} and {}: {}", a, b, found.relationship)
    };

    format!(
        "Closest common ancestor: {} {} ({} / {} generations up)\nRelationship: {}\n",
        found.ancestor,
        person(store, &found.ancestor),
        found.distance_a,
        found.distance_b,
        relationship
    )
}
