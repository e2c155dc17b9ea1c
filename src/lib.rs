//! Sigil - a nested-variable template engine
//!
//! This library resolves placeholder names embedded in arbitrary text.
//! A placeholder starts with `@` and ends with `_` (or implicitly at
//! whitespace, an unrecognized character, or end of input). Placeholder
//! names may themselves contain further placeholders, and a resolved
//! value may itself be, or contain, another placeholder name requiring
//! further resolution.
//!
//! # Example
//!
//! ```rust
//! use sigil::{parse_template, Assignments};
//!
//! let template = parse_template("Hello, @Who!");
//! let mut vars = Assignments::new();
//! vars.assign("Who", "World");
//! let (resolved, _) = template.execute(&mut vars);
//! assert_eq!(resolved, "Hello, World!");
//! ```
//!
//! Nesting composes names: the children of `@@Fn_@Axis__` resolve first,
//! and the text they splice together is itself looked up as a name.
//!
//! ```rust
//! use sigil::Assignments;
//!
//! let mut vars = Assignments::new();
//! vars.assign("Fn", "Rotate");
//! vars.assign("Axis", "X");
//! vars.assign("RotateX", "glam::Mat3::from_rotation_x");
//! let out = sigil::expand("@@Fn_@Axis__(angle)", &mut vars);
//! assert_eq!(out, "glam::Mat3::from_rotation_x(angle)");
//! ```
//!
//! The one escape form is `@_`, which resolves to `_` (the empty name is
//! bound to `"_"` by default and can be rebound).
//!
//! Execution never fails: an unresolved placeholder keeps its markers in
//! the output. Resolution of a cyclic assignment set, however, does not
//! terminate.

pub mod error;
pub mod parser;
pub mod template;
pub mod text;

pub use error::ParseError;
pub use parser::{parse_node, parse_template, parse_templates};
pub use template::{Assignments, MultiTemplate, Node, Template, ROOT_TEMPLATE};
pub use text::Text;

/// Parses `source` and executes it against `assignments` in one call.
///
/// # Example
///
/// ```rust
/// use sigil::Assignments;
///
/// let mut vars = Assignments::new();
/// vars.assign("Greet", "o@_o");
/// assert_eq!(sigil::expand("@Greet says hi", &mut vars), "o_o says hi");
/// ```
pub fn expand(source: &str, assignments: &mut Assignments) -> String {
    parse_template(source).execute(assignments).0
}
