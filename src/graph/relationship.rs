use std::fmt;

use serde::Serialize;

/// Kinship label derived from the generation distances of two people to
/// their closest common ancestor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    ParentChild,
    Siblings,
    GrandparentGrandchild,
    /// First person is the aunt/uncle of the second
    AuntUncle,
    /// First person is the niece/nephew of the second
    NieceNephew,
    Cousins,
    SecondCousins,
    GrandAuntUncle,
    GrandNieceNephew,
    FirstCousinsOnceRemoved,
    FirstCousinsTwiceRemoved,
    Unknown,
}

impl Relationship {
    /// Look up `(distance from A, distance from B)` in the relationship table
    pub fn classify(distance_a: usize, distance_b: usize) -> Self {
        match (distance_a, distance_b) {
            (1, 0) | (0, 1) => Relationship::ParentChild,
            (1, 1) => Relationship::Siblings,
            (0, 2) | (2, 0) => Relationship::GrandparentGrandchild,
            (1, 2) => Relationship::AuntUncle,
            (2, 1) => Relationship::NieceNephew,
            (2, 2) => Relationship::Cousins,
            (3, 3) => Relationship::SecondCousins,
            (1, 3) => Relationship::GrandAuntUncle,
            (3, 1) => Relationship::GrandNieceNephew,
            (2, 3) | (3, 2) => Relationship::FirstCousinsOnceRemoved,
            (2, 4) | (4, 2) => Relationship::FirstCousinsTwiceRemoved,
            _ => Relationship::Unknown,
        }
    }

    /// The same relationship seen from the other person
    pub fn mirrored(self) -> Self {
        match self {
            Relationship::AuntUncle => Relationship::NieceNephew,
            Relationship::NieceNephew => Relationship::AuntUncle,
            Relationship::GrandAuntUncle => Relationship::GrandNieceNephew,
            Relationship::GrandNieceNephew => Relationship::GrandAuntUncle,
            other => other,
        }
    }

    /// Label reads "A is the <label> of B" rather than "A and B are <label>"
    pub fn is_directional(self) -> bool {
        matches!(
            self,
            Relationship::AuntUncle
                | Relationship::NieceNephew
                | Relationship::GrandAuntUncle
                | Relationship::GrandNieceNephew
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Relationship::ParentChild => "child/parent",
            Relationship::Siblings => "siblings",
            Relationship::GrandparentGrandchild => "grandparent/grandchild",
            Relationship::AuntUncle => "aunt/uncle",
            Relationship::NieceNephew => "niece/nephew",
            Relationship::Cousins => "cousins",
            Relationship::SecondCousins => "second cousins",
            Relationship::GrandAuntUncle => "grandaunt/granduncle",
            Relationship::GrandNieceNephew => "grandniece/grandnephew",
            Relationship::FirstCousinsOnceRemoved => "1st cousins once removed",
            Relationship::FirstCousinsTwiceRemoved => "1st cousins twice removed",
            Relationship::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_entries() {
        assert_eq!(Relationship::classify(1, 0), Relationship::ParentChild);
        assert_eq!(Relationship::classify(0, 1), Relationship::ParentChild);
        assert_eq!(Relationship::classify(1, 1), Relationship::Siblings);
        assert_eq!(Relationship::classify(2, 0), Relationship::GrandparentGrandchild);
        assert_eq!(Relationship::classify(1, 2), Relationship::AuntUncle);
        assert_eq!(Relationship::classify(2, 1), Relationship::NieceNephew);
        assert_eq!(Relationship::classify(2, 2), Relationship::Cousins);
        assert_eq!(Relationship::classify(3, 3), Relationship::SecondCousins);
        assert_eq!(Relationship::classify(1, 3), Relationship::GrandAuntUncle);
        assert_eq!(Relationship::classify(3, 1), Relationship::GrandNieceNephew);
        assert_eq!(Relationship::classify(3, 2), Relationship::FirstCousinsOnceRemoved);
        assert_eq!(Relationship::classify(2, 4), Relationship::FirstCousinsTwiceRemoved);
    }

    #[test]
    fn test_outside_table_is_unknown() {
        assert_eq!(Relationship::classify(0, 0), Relationship::Unknown);
        assert_eq!(Relationship::classify(0, 3), Relationship::Unknown);
        assert_eq!(Relationship::classify(4, 4), Relationship::Unknown);
    }

    #[test]
    fn test_classify_swapped_is_mirrored() {
        for a in 0..6 {
            for b in 0..6 {
                assert_eq!(
                    Relationship::classify(b, a),
                    Relationship::classify(a, b).mirrored(),
                    "({a}, {b})"
                );
            }
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Relationship::Siblings.to_string(), "siblings");
        assert_eq!(
            Relationship::FirstCousinsOnceRemoved.to_string(),
            "1st cousins once removed"
        );
        assert!(Relationship::AuntUncle.is_directional());
        assert!(!Relationship::Cousins.is_directional());
    }
}
