//! Post-build cross-reference checks.

use serde::Serialize;

/// Which field a reference came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    SpouseOf,
    ChildOf,
    Husband,
    Wife,
    Child,
}

impl LinkKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LinkKind::SpouseOf => "FAMS",
            LinkKind::ChildOf => "FAMC",
            LinkKind::Husband => "HUSB",
            LinkKind::Wife => "WIFE",
            LinkKind::Child => "CHIL",
        }
    }
}

/// `from` names `to` through `kind`, but `to` was never defined
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    pub from: String,
    pub to: String,
    pub kind: LinkKind,
}

/// An individual claimed as a child by more than one family
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmbiguousParentage {
    pub individual: String,
    /// All claims in file order; the first is the one queries follow
    pub families: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    pub dangling: Vec<DanglingReference>,
    pub ambiguous_parentage: Vec<AmbiguousParentage>,
}

impl IntegrityReport {
    pub(crate) fn push_dangling(&mut self, from: &str, to: &str, kind: LinkKind) {
        self.dangling.push(DanglingReference {
            from: from.to_string(),
            to: to.to_string(),
            kind,
        });
    }

    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty() && self.ambiguous_parentage.is_empty()
    }

    /// Emit one warning per issue
    pub fn log_warnings(&self) {
        for d in &self.dangling {
            log::warn!("{} {} -> {} does not resolve", d.from, d.kind.as_str(), d.to);
        }
        for a in &self.ambiguous_parentage {
            log::warn!(
                "{} is claimed as a child by {} families ({}); using {}",
                a.individual,
                a.families.len(),
                a.families.join(", "),
                a.families.first().map(String::as_str).unwrap_or("none")
            );
        }
    }
}
