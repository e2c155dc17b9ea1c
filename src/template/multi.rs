//! Named template collections resolved against shared assignments

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::template::{Assignments, Template};

/// Name of the template whose resolved text is the collection's result.
pub const ROOT_TEMPLATE: &str = ".";

/// Templates that may reference each other by name.
///
/// Resolution is an unordered iterative fixpoint over the
/// mutual-reference graph: no dependency order is computed, convergence
/// relies on every pass making progress. Names iterate in sorted order,
/// so passes are deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiTemplate {
    pub templates: BTreeMap<String, Template>,
}

impl MultiTemplate {
    /// Executes the assignments on a clone, leaving `self` untouched.
    ///
    /// Returns the resolved text of the `"."` template (empty if the
    /// collection has none) along with the clone.
    pub fn execute(&self, assignments: &mut Assignments) -> (String, MultiTemplate) {
        let mut clone = self.clone();
        clone.execute_in_place(assignments);
        let result = clone
            .templates
            .get(ROOT_TEMPLATE)
            .map(|template| template.text.to_string())
            .unwrap_or_default();
        (result, clone)
    }

    /// Repeats whole passes until one changes nothing. Every pass first
    /// seeds each template's current text into the shared assignments
    /// under its own name, so templates can reference each other before
    /// they resolve; resolved text is written back as templates change.
    ///
    /// A cyclic reference chain iterates without bound.
    pub fn execute_in_place(&mut self, assignments: &mut Assignments) -> bool {
        let mut any_change = false;
        loop {
            for (name, template) in &self.templates {
                assignments.assign(name.as_str(), template.text.to_string());
            }

            let mut pass_change = false;
            for (name, template) in self.templates.iter_mut() {
                if template.execute_in_place(assignments) {
                    assignments.assign(name.as_str(), template.text.to_string());
                    pass_change = true;
                }
            }
            debug!(changed = pass_change, "multi-template pass");
            if !pass_change {
                break;
            }
            any_change = true;
        }
        any_change
    }

    /// Position-annotated listing of every template, in name order.
    pub fn annotated(&self) -> String {
        self.sections(Template::annotated)
    }

    /// Graphviz description of every template, in name order.
    pub fn dot(&self) -> String {
        let mut body = String::new();
        for (index, (name, template)) in self.templates.iter().enumerate() {
            body.push_str(&format!(
                "\n\t\"{name}\" [shape=rect]\n\t\"{name}\" -> \"tmpl root {index}\" [color=red]\n"
            ));
            body.push_str(&template.dot_body(&format!("tmpl root {index}")));
        }
        format!("digraph g {{\n{body}}}\n")
    }

    fn sections(&self, render: impl Fn(&Template) -> String) -> String {
        let mut out = String::new();
        for (index, (name, template)) in self.templates.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(name);
            out.push_str(":\n");
            for line in render(template).lines() {
                if !line.is_empty() {
                    out.push('\t');
                    out.push_str(line);
                }
                out.push('\n');
            }
        }
        out
    }
}

impl fmt::Display for MultiTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sections(|template| template.to_string()))
    }
}
