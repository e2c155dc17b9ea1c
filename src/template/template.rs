//! A parsed template: mutable text plus its top-level placeholder nodes

use std::fmt;

use tracing::debug;

use crate::parser::{parse_template, ALPHA};
use crate::template::{Assignments, Node};
use crate::text::Text;

/// Text annotated with the placeholders found inside it.
///
/// The slice invariant of [`Node`] holds at the top level too, except
/// that a child's text may extend past its slice of the template text by
/// its trailing inferred terminators, which the source never contained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Template {
    pub text: Text,
    pub children: Vec<Node>,
}

impl Template {
    /// Executes the assignments on a clone, leaving `self` untouched.
    ///
    /// Returns the resolved text along with the clone.
    pub fn execute(&self, assignments: &mut Assignments) -> (String, Template) {
        let mut clone = self.clone();
        clone.execute_in_place(assignments);
        (clone.text.to_string(), clone)
    }

    /// Substitutes until a fixpoint: each round executes the placeholder
    /// trees, splices their changes into the template text, then re-parses
    /// that text from scratch, because splicing can create placeholder
    /// boundaries the original tree never had. Unresolved placeholders
    /// keep their markers.
    ///
    /// A cyclic assignment set iterates without bound.
    pub fn execute_in_place(&mut self, assignments: &mut Assignments) -> bool {
        let mut any_change = false;
        loop {
            if !self.execute_round(assignments) {
                break;
            }
            any_change = true;
            debug!(text = %self.text, "template round complete, re-parsing");
            *self = parse_template(&self.text.to_string());
            if self.children.is_empty() {
                break;
            }
        }
        self.verify();
        any_change
    }

    fn execute_round(&mut self, assignments: &mut Assignments) -> bool {
        let mut round_change = false;
        let mut offset = 0isize;
        let mut index = 0;
        while index < self.children.len() {
            if !self.children[index].execute_in_place(assignments) {
                index += 1;
                continue;
            }
            round_change = true;
            let keep = self.children[index].text.contains(ALPHA);
            {
                let child = &mut self.children[index];
                child.start = (child.start as isize + offset) as usize;
                child.end = (child.end as isize + offset) as usize;
            }
            let (start, end, resolved) = {
                let child = &self.children[index];
                (child.start, child.end, child.text.clone())
            };
            self.text.splice(start, end, &resolved);
            offset += resolved.len() as isize - (end as isize - start as isize);
            if keep {
                index += 1;
            } else {
                self.children.remove(index);
            }
        }
        round_change
    }

    /// Checks the slice invariant for every placeholder, allowing a
    /// child's trailing inferred terminators past the template slice.
    pub fn verify(&self) {
        for child in &self.children {
            let slice = self.text.slice(child.start, child.end);
            if slice != child.text && !child.text.starts_with(&slice) {
                panic!(
                    "verify template: {} :: {} => {}",
                    self.text,
                    child.annotated(),
                    slice
                );
            }
            child.verify();
        }
    }

    /// Position-annotated listing of the template and its placeholders.
    pub fn annotated(&self) -> String {
        let children: String = self
            .children
            .iter()
            .map(|child| format!("\n\t{}", child.annotated()))
            .collect();
        format!("Template:\n\t{}\nVariables:{}\n", self.text, children)
    }

    /// Graphviz description of the template and its placeholders.
    pub fn dot(&self) -> String {
        format!("digraph g {{\n{}}}\n", self.dot_body("tmpl root"))
    }

    pub(crate) fn dot_body(&self, root: &str) -> String {
        let mut out = format!("\t\"{}\" [label=\"{}\", shape=diamond]\n", root, self.text);
        for child in &self.children {
            out.push_str(&format!(
                "\n\t\"{}\" -> \"{}\" [label = \"[{}, {}]\"]\n",
                root, child.text, child.start, child.end
            ));
            child.dot_edges(&mut out);
        }
        out
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Template:\n\t{}\nVariables:", self.text)?;
        for child in &self.children {
            write!(f, "\n\t{child}")?;
        }
        writeln!(f)
    }
}
