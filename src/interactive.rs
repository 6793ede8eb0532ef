//! Prompt-driven query session over a loaded store.
//!
//! Each round asks for a person and prints their descendant chart, checks
//! whether a second person descends from them, prints the second person's
//! ancestor chart, then resolves the closest common ancestor of a pair.

use std::io::{self, BufRead, Write};

use crate::error::Result;
use crate::graph::RelationshipEngine;
use crate::render;

pub struct Session<'a, R, W> {
    engine: RelationshipEngine<'a>,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(engine: RelationshipEngine<'a>, input: R, output: W) -> Self {
        Self {
            engine,
            input,
            output,
        }
    }

    /// Run rounds until the user answers `n` or input ends
    pub fn run(&mut self) -> Result<()> {
        loop {
            if !self.round()? {
                return Ok(());
            }
            let Some(again) = self.ask_yes_no("Would you like to enter more people? y or n: ")? else {
                return Ok(());
            };
            if !again {
                return Ok(());
            }
        }
    }

    /// One full round of queries; false if input ended midway
    fn round(&mut self) -> Result<bool> {
        let store = self.engine.store();

        let Some(person) = self.ask_id("Enter person ID for descendants chart: ")? else {
            return Ok(false);
        };
        let chart = self.engine.descendant_chart(&person)?;
        self.output
            .write_all(render::render_descendants(store, &chart).as_bytes())?;

        let Some(other) = self.ask_id(&format!(
            "Enter another person ID to check whether they descend from {}: ",
            person
        ))?
        else {
            return Ok(false);
        };
        let descends = self.engine.is_descendant(&person, &other)?;
        writeln!(self.output, "{} is a descendant of {}: {}", other, person, descends)?;

        writeln!(self.output, "Ancestor chart of {}:", other)?;
        let chart = self.engine.ancestor_chart(&other)?;
        self.output
            .write_all(render::render_ancestors(store, &chart).as_bytes())?;

        let Some(a) = self.ask_id("Closest common ancestor. First person: ")? else {
            return Ok(false);
        };
        let Some(b) = self.ask_id("Second person: ")? else {
            return Ok(false);
        };
        let found = self.engine.closest_common_ancestor(&a, &b)?;
        self.output.write_all(
            render::render_common_ancestor(store, &a, &b, found.as_ref()).as_bytes(),
        )?;

        Ok(true)
    }

    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask until the answer names an individual in the store
    fn ask_id(&mut self, question: &str) -> io::Result<Option<String>> {
        let mut answer = self.ask(question)?;
        while let Some(id) = answer {
            if self.engine.store().contains_individual(&id) {
                return Ok(Some(id));
            }
            answer = self.ask("Please enter a VALID person ID: ")?;
        }
        Ok(None)
    }

    fn ask_yes_no(&mut self, question: &str) -> io::Result<Option<bool>> {
        let mut answer = self.ask(question)?;
        while let Some(text) = answer {
            match text.as_str() {
                "y" => return Ok(Some(true)),
                "n" => return Ok(Some(false)),
                _ => answer = self.ask(question)?,
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gedcom::parse_str;

    const FAMILY: &str = "\
0 @I1@ INDI
1 NAME Joseph /Kennedy/
1 FAMS @F1@
0 @I2@ INDI
1 NAME Rose /Fitzgerald/
1 FAMS @F1@
0 @I3@ INDI
1 NAME John /Kennedy/
1 FAMC @F1@
0 @I4@ INDI
1 NAME Robert /Kennedy/
1 FAMC @F1@
0 @F1@ FAM
1 HUSB @I1@
1 WIFE @I2@
1 CHIL @I3@
1 CHIL @I4@
";

    fn run(input: &str) -> String {
        let store = parse_str(FAMILY).unwrap();
        let mut output = Vec::new();
        Session::new(RelationshipEngine::new(&store), input.as_bytes(), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_full_round() {
        let out = run("I1\nI4\nI3\nI4\nn\n");
        assert!(out.contains("Joseph KENNEDY\n+Rose FITZGERALD\n|--John KENNEDY\n|--Robert KENNEDY\n"));
        assert!(out.contains("I4 is a descendant of I1: true"));
        assert!(out.contains(" 1 Joseph KENNEDY\n 1 Rose FITZGERALD\n0 Robert KENNEDY\n"));
        assert!(out.contains("Relationship: I3 and I4: siblings"));
    }

    #[test]
    fn test_invalid_id_reprompts() {
        let out = run("I99\nI3\nI1\nI3\nI1\nn\n");
        assert!(out.contains("Please enter a VALID person ID"));
        assert!(out.contains("I1 is a descendant of I3: false"));
    }

    #[test]
    fn test_end_of_input_stops_cleanly() {
        let out = run("I1\n");
        assert!(out.contains("Joseph KENNEDY"));
        assert!(!out.contains("Ancestor chart"));
    }

    #[test]
    fn test_yes_starts_another_round() {
        let out = run("I3\nI3\nI3\nI4\ny\nI4\nI4\nI1\nI2\nn\n");
        assert_eq!(out.matches("Enter person ID for descendants chart").count(), 2);
        assert!(out.contains("No common ancestors between I1 and I2"));
    }
}
