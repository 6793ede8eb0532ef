//! Builds the entity store from scanned records.

use std::io::BufRead;

use super::{Record, RecordScanner, Tag};
use crate::error::{GedtreeError, Result};
use crate::store::{split_name, Event, EventKind, Family, Individual, Store};

/// A family `MARR` waiting for its spouse to exist in the store
struct PendingMarriage {
    family_id: String,
    holder: String,
    event: Event,
}

/// Single-pass builder: one scanner in, one [`Store`] out.
pub struct GraphBuilder<R> {
    scanner: RecordScanner<R>,
    store: Store,
    pending_marriages: Vec<PendingMarriage>,
    skipped_blocks: usize,
}

impl<R: BufRead> GraphBuilder<R> {
    pub fn new(scanner: RecordScanner<R>) -> Self {
        Self {
            scanner,
            store: Store::new(),
            pending_marriages: Vec::new(),
            skipped_blocks: 0,
        }
    }

    /// Consume the whole input and return the populated store
    pub fn build(mut self) -> Result<Store> {
        while let Some(record) = self.scanner.next_record()? {
            if !record.is_top_level() {
                log::debug!("line {}: sub-record outside any entity ignored", record.line);
                continue;
            }

            match (&record.tag, record.pointer) {
                (Tag::Individual, Some(id)) => self.read_individual(id)?,
                (Tag::Family, Some(id)) => self.read_family(id)?,
                _ => {
                    self.scanner.skip_block()?;
                    self.skipped_blocks += 1;
                }
            }
        }

        self.attach_marriages();

        log::info!(
            "Parsed {} lines: {} individuals, {} families ({} other blocks skipped)",
            self.scanner.lines_read(),
            self.store.individual_count(),
            self.store.family_count(),
            self.skipped_blocks
        );
        self.store.integrity_report().log_warnings();

        Ok(self.store)
    }

    /// Next record of the current entity block, None at the next level-0 record
    fn next_in_block(&mut self) -> Result<Option<Record>> {
        if self.scanner.at_block_end()? {
            Ok(None)
        } else {
            self.scanner.next_record()
        }
    }

    fn read_individual(&mut self, id: String) -> Result<()> {
        let mut person = Individual::new(id);

        while let Some(record) = self.next_in_block()? {
            if record.level != 1 {
                continue;
            }
            match record.tag {
                Tag::Name => {
                    let (given, surname, suffix) = split_name(record.text()).ok_or_else(|| {
                        GedtreeError::malformed(
                            record.line,
                            format!("NAME needs exactly two '/' delimiters: {:?}", record.text()),
                        )
                    })?;
                    person.set_name(given, surname, suffix);
                }
                Tag::SpouseFamily => person.add_spouse_family(record.require_pointer()?),
                Tag::ChildFamily => person.add_child_family(record.require_pointer()?),
                Tag::Birth => person.add_event(self.read_event(&record, EventKind::Birth)?),
                Tag::Death => person.add_event(self.read_event(&record, EventKind::Death)?),
                Tag::Marriage => person.add_event(self.read_event(&record, EventKind::Marriage)?),
                _ => {}
            }
        }

        log::debug!("INDI {} ({})", person.id, person.display_name());
        if let Some(previous) = self.store.insert_individual(person) {
            log::warn!("INDI {} defined more than once; keeping the later record", previous.id);
        }
        Ok(())
    }

    fn read_family(&mut self, id: String) -> Result<()> {
        let mut family = Family::new(id);

        while let Some(record) = self.next_in_block()? {
            if record.level != 1 {
                continue;
            }
            match record.tag {
                Tag::Husband => family.set_husband(record.require_pointer()?),
                Tag::Wife => family.set_wife(record.require_pointer()?),
                Tag::Child => family.add_child(record.require_pointer()?),
                Tag::Marriage => {
                    let event = self.read_event(&record, EventKind::Marriage)?;
                    match family.marriage_holder() {
                        Some(holder) => self.pending_marriages.push(PendingMarriage {
                            family_id: family.id.clone(),
                            holder: holder.to_string(),
                            event,
                        }),
                        None => log::warn!(
                            "line {}: MARR in FAM {} before any HUSB/WIFE; event dropped",
                            record.line,
                            family.id
                        ),
                    }
                }
                _ => {}
            }
        }

        log::debug!("FAM {} ({} children)", family.id, family.children.len());
        if let Some(previous) = self.store.insert_family(family) {
            log::warn!("FAM {} defined more than once; keeping the later record", previous.id);
        }
        Ok(())
    }

    /// Event header plus its optional `DATE` then optional `PLAC` sub-records
    fn read_event(&mut self, header: &Record, kind: EventKind) -> Result<Event> {
        let mut event = Event::new(kind);
        if let Some(date) = self.scanner.next_if_child(header.level, &Tag::Date)? {
            event.date = date.value.map(|v| v.trim().to_string());
        }
        if let Some(place) = self.scanner.next_if_child(header.level, &Tag::Place)? {
            event.place = place.value.map(|v| v.trim().to_string());
        }
        Ok(event)
    }

    fn attach_marriages(&mut self) {
        for pending in self.pending_marriages.drain(..) {
            match self.store.individual_mut(&pending.holder) {
                Some(person) => person.add_event(pending.event),
                None => log::warn!(
                    "MARR of FAM {}: spouse {} not found; event dropped",
                    pending.family_id,
                    pending.holder
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::gedcom::parse_str;
    use crate::error::GedtreeError;
    use crate::store::EventKind;
    use crate::store::LinkKind;

    const KENNEDY: &str = "\
0 HEAD
1 SOUR test
2 VERS 1.0
0 @I1@ INDI
1 NAME Joseph Patrick /Kennedy/ Sr
1 SEX M
1 BIRT
2 DATE 6 SEP 1888
2 PLAC Boston, MA
1 DEAT
2 PLAC Hyannis Port, MA
1 FAMS @F1@
0 @I2@ INDI
1 NAME Rose Elizabeth /Fitzgerald/
1 BIRT
2 DATE 22 JUL 1890
1 FAMS @F1@
0 @I3@ INDI
1 NAME John Fitzgerald /Kennedy/
1 FAMC @F1@
0 @F1@ FAM
1 HUSB @I1@
1 WIFE @I2@
1 MARR
2 DATE 7 OCT 1914
2 PLAC Boston, MA
1 CHIL @I3@
0 TRLR
";

    #[test]
    fn test_individual_fields() {
        let store = parse_str(KENNEDY).unwrap();
        assert_eq!(store.individual_count(), 3);
        assert_eq!(store.family_count(), 1);

        let joe = store.individual("I1").unwrap();
        assert_eq!(joe.given, "Joseph Patrick");
        assert_eq!(joe.surname, "Kennedy");
        assert_eq!(joe.suffix, "Sr");
        assert_eq!(joe.spouse_of, vec!["F1"]);
        assert!(joe.child_of.is_empty());

        let jack = store.individual("I3").unwrap();
        assert_eq!(jack.parent_family(), Some("F1"));
    }

    #[test]
    fn test_event_date_and_place_independent() {
        let store = parse_str(KENNEDY).unwrap();
        let joe = store.individual("I1").unwrap();

        let birth = &joe.events[0];
        assert_eq!(birth.kind, EventKind::Birth);
        assert_eq!(birth.date.as_deref(), Some("6 SEP 1888"));
        assert_eq!(birth.place.as_deref(), Some("Boston, MA"));

        // DEAT with a place but no date
        let death = &joe.events[1];
        assert_eq!(death.kind, EventKind::Death);
        assert!(death.date.is_none());
        assert_eq!(death.place.as_deref(), Some("Hyannis Port, MA"));

        // BIRT with a date but no place; the FAMS after it is not swallowed
        let rose = store.individual("I2").unwrap();
        assert_eq!(rose.events[0].date.as_deref(), Some("22 JUL 1890"));
        assert!(rose.events[0].place.is_none());
        assert_eq!(rose.spouse_of, vec!["F1"]);
    }

    #[test]
    fn test_family_marriage_goes_to_husband() {
        let store = parse_str(KENNEDY).unwrap();
        let family = store.family("F1").unwrap();
        assert_eq!(family.husband.as_deref(), Some("I1"));
        assert_eq!(family.wife.as_deref(), Some("I2"));
        assert_eq!(family.children, vec!["I3"]);

        let joe = store.individual("I1").unwrap();
        let marriage = joe.events.last().unwrap();
        assert_eq!(marriage.kind, EventKind::Marriage);
        assert_eq!(marriage.date.as_deref(), Some("7 OCT 1914"));

        let rose = store.individual("I2").unwrap();
        assert!(rose.events.iter().all(|e| e.kind != EventKind::Marriage));
    }

    #[test]
    fn test_marriage_falls_back_to_wife() {
        let text = "0 @I2@ INDI\n1 NAME Ann /Lee/\n0 @F1@ FAM\n1 WIFE @I2@\n1 MARR\n2 DATE 1950\n";
        let store = parse_str(text).unwrap();
        let ann = store.individual("I2").unwrap();
        assert_eq!(ann.events.len(), 1);
        assert_eq!(ann.events[0].kind, EventKind::Marriage);
    }

    #[test]
    fn test_marriage_before_spouses_is_dropped() {
        let text = "0 @I1@ INDI\n1 NAME Al /Poe/\n0 @F1@ FAM\n1 MARR\n2 DATE 1950\n1 HUSB @I1@\n";
        let store = parse_str(text).unwrap();
        assert!(store.individual("I1").unwrap().events.is_empty());
        assert_eq!(store.family("F1").unwrap().husband.as_deref(), Some("I1"));
    }

    #[test]
    fn test_forward_references_resolve() {
        // Family first, individuals afterwards
        let text = "\
0 @F1@ FAM
1 HUSB @I1@
1 MARR
2 PLAC Paris
1 CHIL @I2@
0 @I1@ INDI
1 NAME Louis /Martin/
1 FAMS @F1@
0 @I2@ INDI
1 NAME Therese /Martin/
1 FAMC @F1@
";
        let store = parse_str(text).unwrap();
        let louis = store.individual("I1").unwrap();
        assert_eq!(louis.events.len(), 1);
        assert_eq!(louis.events[0].place.as_deref(), Some("Paris"));
        assert_eq!(store.parent_family_of("I2").unwrap().id, "F1");
        assert!(store.integrity_report().is_clean());
    }

    #[test]
    fn test_repeated_famc_keeps_all_claims() {
        let text = "0 @I1@ INDI\n1 NAME A /B/\n1 FAMC @F1@\n1 FAMC @F2@\n";
        let store = parse_str(text).unwrap();
        let person = store.individual("I1").unwrap();
        assert_eq!(person.child_of, vec!["F1", "F2"]);
        assert_eq!(person.parent_family(), Some("F1"));
    }

    #[test]
    fn test_malformed_name_fails_fast() {
        let text = "0 @I1@ INDI\n1 NAME Nobody Special\n";
        let err = parse_str(text).unwrap_err();
        match err {
            GedtreeError::MalformedRecord { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("NAME"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_link_without_pointer_fails_fast() {
        let text = "0 @F1@ FAM\n1 HUSB\n";
        assert!(matches!(
            parse_str(text),
            Err(GedtreeError::MalformedRecord { line: 2, .. })
        ));
    }

    #[test]
    fn test_spouse_and_child_family_links_need_pointers() {
        for text in [
            "0 @I1@ INDI\n1 NAME A /B/\n1 FAMS\n",
            "0 @I1@ INDI\n1 NAME A /B/\n1 FAMC F1\n",
        ] {
            match parse_str(text) {
                Err(GedtreeError::MalformedRecord { line, .. }) => assert_eq!(line, 3),
                other => panic!("expected malformed record, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_marriage_for_undefined_spouse_is_dropped() {
        // I7 is named as husband but never gets an INDI block
        let text = "\
0 @F1@ FAM
1 HUSB @I7@
1 WIFE @I1@
1 MARR
2 DATE 1950
0 @I1@ INDI
1 NAME Ann /Lee/
1 FAMS @F1@
";
        let store = parse_str(text).unwrap();
        assert!(store.individual("I7").is_none());
        assert!(store.individual("I1").unwrap().events.is_empty());

        let report = store.integrity_report();
        assert_eq!(report.dangling.len(), 1);
        assert_eq!(report.dangling[0].from, "F1");
        assert_eq!(report.dangling[0].to, "I7");
        assert_eq!(report.dangling[0].kind, LinkKind::Husband);
    }

    #[test]
    fn test_nested_records_not_dispatched() {
        // A NAME under a SOUR citation must not be read as the person's name
        let text = "0 @I1@ INDI\n1 NAME Real /Name/\n1 SOUR @S1@\n2 NAME citation text\n";
        let store = parse_str(text).unwrap();
        assert_eq!(store.individual("I1").unwrap().given, "Real");
    }

    #[test]
    fn test_unknown_top_level_blocks_skipped() {
        let text = "0 @S1@ SOUR\n1 TITL Census\n1 CHIL @I9@\n0 @I1@ INDI\n1 NAME X /Y/\n0 TRLR\n";
        let store = parse_str(text).unwrap();
        assert_eq!(store.individual_count(), 1);
        assert_eq!(store.family_count(), 0);
    }

    #[test]
    fn test_empty_input_builds_empty_store() {
        let store = parse_str("").unwrap();
        assert_eq!(store.individual_count(), 0);
        assert_eq!(store.family_count(), 0);
    }
}
