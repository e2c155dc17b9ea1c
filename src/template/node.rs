//! Position-tracked placeholder nodes

use std::fmt;

use tracing::trace;

use crate::parser::{ALPHA, OMEGA};
use crate::template::Assignments;
use crate::text::Text;

/// One placeholder occurrence, possibly containing nested placeholders.
///
/// `start` and `end` are character offsets into the parent's text
/// (absolute for top-level nodes). `text` holds the node's current form
/// and reflects substitutions as they happen; each parent splices a
/// changed child's text back into its own, so the slice invariant
/// `parent.text[child.start..child.end] == child.text` holds between
/// mutations (checked by [`Node::verify`]).
///
/// For a top-level node, `end` excludes terminators that were inferred
/// rather than read: the template's own text never contained them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub start: usize,
    pub end: usize,
    pub text: Text,
    pub children: Vec<Node>,
}

impl Node {
    pub(crate) fn at(start: usize) -> Self {
        Node {
            start,
            end: start,
            ..Node::default()
        }
    }

    /// Appends one read character, extending the covered range.
    pub(crate) fn push(&mut self, ch: char) {
        self.text.push(ch);
        self.end += 1;
    }

    /// Appends the terminator. An inferred terminator extends the covered
    /// range only for nested nodes, whose parents carry the character in
    /// their own text; a top-level node's source never contained it.
    pub(crate) fn close(&mut self, explicit: bool, nested: bool) {
        self.text.push(OMEGA);
        if explicit || nested {
            self.end += 1;
        }
    }

    /// Takes over a finished child's text. `uncounted` is the number of
    /// the child's characters that must not extend the covered range
    /// (inferred terminators, when this node is top-level).
    pub(crate) fn absorb(&mut self, child: &Node, uncounted: usize) {
        self.text.extend(&child.text);
        self.end += child.text.len() - uncounted;
    }

    /// The candidate assignment name: the node's text with one leading
    /// placeholder-start and one trailing terminator stripped.
    fn name(&self) -> String {
        let chars = self.text.chars();
        let mut from = 0;
        let mut to = chars.len();
        if chars.first() == Some(&ALPHA) {
            from = 1;
        }
        if to > from && chars.last() == Some(&OMEGA) {
            to -= 1;
        }
        chars[from..to].iter().collect()
    }

    /// Executes the assignments on a clone, leaving `self` untouched.
    ///
    /// Returns the resolved text along with the clone.
    pub fn execute(&self, assignments: &mut Assignments) -> (String, Node) {
        let mut clone = self.clone();
        clone.execute_in_place(assignments);
        (clone.text.to_string(), clone)
    }

    /// Performs substitution rounds on this node until nothing changes.
    ///
    /// To pick how `@_` evaluates, bind the empty name first:
    /// `assignments.assign("", "_")` is the default.
    ///
    /// A cyclic assignment set (a value that transitively reproduces its
    /// own name) recurses without bound.
    pub fn execute_in_place(&mut self, assignments: &mut Assignments) -> bool {
        if !assignments.contains("") {
            assignments.assign("", OMEGA.to_string());
        }

        if self.children.is_empty() {
            let name = self.name();
            return match assignments.get(&name) {
                Some(value) => {
                    trace!(%name, %value, "resolved leaf");
                    self.text = Text::from(value);
                    true
                }
                None => false,
            };
        }

        let any_change = self.execute_children(assignments);
        let result = if any_change {
            // freshly spliced pieces may now read as a single new name
            self.execute_in_place(assignments) || any_change
        } else {
            any_change
        };
        self.verify();
        result
    }

    fn execute_children(&mut self, assignments: &mut Assignments) -> bool {
        let mut any_change = false;
        let mut offset = 0isize;
        let mut index = 0;
        while index < self.children.len() {
            if !self.children[index].execute_in_place(assignments) {
                index += 1;
                continue;
            }
            any_change = true;
            let (start, end, resolved) = {
                let child = &self.children[index];
                (child.start, child.end, child.text.clone())
            };
            let from = (start as isize + offset) as usize;
            let to = (end as isize + offset) as usize;
            self.text.splice(from, to, &resolved);
            offset += start as isize + resolved.len() as isize - end as isize;
            self.children[index].end = start + resolved.len();
            if resolved.contains(ALPHA) {
                index += 1;
            } else {
                // fully resolved, nothing left to substitute under it
                self.children.remove(index);
            }
        }
        any_change
    }

    /// Checks that every child's text is the slice of this node's text its
    /// offsets claim, recursively. A mismatch is a bug in the splice
    /// bookkeeping, not a recoverable condition.
    pub fn verify(&self) {
        for child in &self.children {
            let slice = self.text.slice(child.start, child.end);
            if slice != child.text {
                panic!(
                    "verify node: {} :: {} => {}",
                    self.text,
                    child.annotated(),
                    slice
                );
            }
            child.verify();
        }
    }

    /// Position-annotated listing of the node and its children.
    pub fn annotated(&self) -> String {
        let children: String = self.children.iter().map(Node::annotated).collect();
        format!("{{'{}'[{},{}]{}}}", self.text, self.start, self.end, children)
    }

    /// Graphviz description of the node and its children.
    pub fn dot(&self) -> String {
        let mut out = String::from("digraph g {\n");
        out.push_str(&format!("\t\"{}\"\n", self.text));
        self.dot_edges(&mut out);
        out.push_str("}\n");
        out
    }

    pub(crate) fn dot_edges(&self, out: &mut String) {
        for child in &self.children {
            out.push_str(&format!(
                "\t\"{}\" -> \"{}\" [label = \"[{}, {}]\"]\n",
                self.text, child.text, child.start, child.end
            ));
            child.dot_edges(out);
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}", self.text)?;
        for child in &self.children {
            write!(f, "{child}")?;
        }
        write!(f, "}}")
    }
}
