use serde::Serialize;

/// A family unit from a `FAM` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Family {
    pub id: String,
    pub husband: Option<String>,
    pub wife: Option<String>,
    /// Child ids in file order, duplicates kept
    pub children: Vec<String>,
}

impl Family {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            husband: None,
            wife: None,
            children: Vec::new(),
        }
    }

    pub fn set_husband(&mut self, id: impl Into<String>) {
        self.husband = Some(id.into());
    }

    pub fn set_wife(&mut self, id: impl Into<String>) {
        self.wife = Some(id.into());
    }

    pub fn add_child(&mut self, id: impl Into<String>) {
        self.children.push(id.into());
    }

    /// Husband then wife, whichever are present
    pub fn parents(&self) -> impl Iterator<Item = &str> {
        self.husband.as_deref().into_iter().chain(self.wife.as_deref())
    }

    /// The spouse that is not `id`
    pub fn other_spouse(&self, id: &str) -> Option<&str> {
        if self.husband.as_deref() == Some(id) {
            self.wife.as_deref()
        } else {
            self.husband.as_deref()
        }
    }

    /// Who carries a marriage event recorded on this family: husband, else wife
    pub fn marriage_holder(&self) -> Option<&str> {
        self.husband.as_deref().or(self.wife.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn couple() -> Family {
        let mut family = Family::new("F1");
        family.set_husband("I1");
        family.set_wife("I2");
        family
    }

    #[test]
    fn test_other_spouse() {
        let family = couple();
        assert_eq!(family.other_spouse("I1"), Some("I2"));
        assert_eq!(family.other_spouse("I2"), Some("I1"));
    }

    #[test]
    fn test_other_spouse_single_parent() {
        let mut family = Family::new("F2");
        family.set_wife("I2");
        assert_eq!(family.other_spouse("I2"), None);
    }

    #[test]
    fn test_parents_order() {
        let family = couple();
        assert_eq!(family.parents().collect::<Vec<_>>(), vec!["I1", "I2"]);

        let mut only_wife = Family::new("F3");
        only_wife.set_wife("I5");
        assert_eq!(only_wife.parents().collect::<Vec<_>>(), vec!["I5"]);
    }

    #[test]
    fn test_marriage_holder_prefers_husband() {
        assert_eq!(couple().marriage_holder(), Some("I1"));

        let mut family = Family::new("F4");
        assert_eq!(family.marriage_holder(), None);
        family.set_wife("I8");
        assert_eq!(family.marriage_holder(), Some("I8"));
    }

    #[test]
    fn test_children_keep_duplicates() {
        let mut family = couple();
        family.add_child("I3");
        family.add_child("I4");
        family.add_child("I3");
        assert_eq!(family.children, vec!["I3", "I4", "I3"]);
    }
}
