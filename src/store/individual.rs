use serde::Serialize;

use super::Event;

/// A person from an `INDI` block.
///
/// Relations are family ids resolved through the [`Store`](super::Store).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Individual {
    pub id: String,
    pub given: String,
    /// Stored as written; upper-cased only when rendered.
    pub surname: String,
    pub suffix: String,
    pub events: Vec<Event>,
    /// Families in which this person is husband or wife, in file order.
    pub spouse_of: Vec<String>,
    /// Every parent-family claim in file order; the first one is canonical.
    pub child_of: Vec<String>,
}

impl Individual {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            given: String::new(),
            surname: String::new(),
            suffix: String::new(),
            events: Vec::new(),
            spouse_of: Vec::new(),
            child_of: Vec::new(),
        }
    }

    pub fn set_name(&mut self, given: String, surname: String, suffix: String) {
        self.given = given;
        self.surname = surname;
        self.suffix = suffix;
    }

    pub fn add_spouse_family(&mut self, family_id: impl Into<String>) {
        self.spouse_of.push(family_id.into());
    }

    pub fn add_child_family(&mut self, family_id: impl Into<String>) {
        self.child_of.push(family_id.into());
    }

    pub fn add_event(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Canonical parent family (first `FAMC` claim)
    pub fn parent_family(&self) -> Option<&str> {
        self.child_of.first().map(String::as_str)
    }

    /// More than one `FAMC` claim was recorded
    pub fn has_ambiguous_parentage(&self) -> bool {
        self.child_of.len() > 1
    }

    /// `Given SURNAME Suffix` with empty parts left out
    pub fn display_name(&self) -> String {
        let surname = self.surname.trim().to_uppercase();
        [self.given.as_str(), surname.as_str(), self.suffix.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Split a `NAME` value on its `/` delimiters into (given, surname, suffix).
///
/// Returns None unless there are exactly two delimiters. Given and suffix are
/// trimmed; the surname is returned verbatim.
pub fn split_name(raw: &str) -> Option<(String, String, String)> {
    let parts: Vec<&str> = raw.split('/').collect();
    match parts.as_slice() {
        [given, surname, suffix] => Some((
            given.trim().to_string(),
            surname.to_string(),
            suffix.trim().to_string(),
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_name_three_parts() {
        let (given, surname, suffix) = split_name("Joseph Patrick /Kennedy/ Jr").unwrap();
        assert_eq!(given, "Joseph Patrick");
        assert_eq!(surname, "Kennedy");
        assert_eq!(suffix, "Jr");
    }

    #[test]
    fn test_split_name_empty_parts() {
        let (given, surname, suffix) = split_name("/Bouvier/").unwrap();
        assert_eq!(given, "");
        assert_eq!(surname, "Bouvier");
        assert_eq!(suffix, "");
    }

    #[test]
    fn test_split_name_wrong_delimiter_count() {
        assert!(split_name("John Kennedy").is_none());
        assert!(split_name("John /Kennedy").is_none());
        assert!(split_name("John /Fitz/ger/ald").is_none());
    }

    #[test]
    fn test_display_name_uppercases_surname() {
        let mut person = Individual::new("I1");
        person.set_name("John Fitzgerald".into(), "Kennedy".into(), String::new());
        assert_eq!(person.display_name(), "John Fitzgerald KENNEDY");

        person.suffix = "Jr".into();
        assert_eq!(person.display_name(), "John Fitzgerald KENNEDY Jr");
    }

    #[test]
    fn test_parent_family_first_claim_is_canonical() {
        let mut person = Individual::new("I9");
        assert!(person.parent_family().is_none());
        person.add_child_family("F2");
        person.add_child_family("F7");
        assert_eq!(person.parent_family(), Some("F2"));
        assert!(person.has_ambiguous_parentage());
    }
}
