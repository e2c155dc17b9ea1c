//! Position-tracked template trees and their execution
//!
//! A [`Template`] is a mutable text buffer plus the placeholder [`Node`]s
//! found inside it; a [`MultiTemplate`] is a named collection of templates
//! that may reference each other. Execution substitutes [`Assignments`]
//! values into the trees, splicing resolved text back into each parent
//! and iterating until nothing changes.
//!
//! # Example
//!
//! ```text
//! // Compose an identifier from axis values, then use it as a lookup key:
//! //   "@@Fn_@Axis__"  with  Fn=Rotate, Axis=X, RotateX=<target>
//! // resolves the children to the literal `RotateX`, which is itself a
//! // bound name, and finally to `<target>`.
//! ```

mod assignments;
mod multi;
mod node;
mod template;

pub use assignments::Assignments;
pub use multi::{MultiTemplate, ROOT_TEMPLATE};
pub use node::Node;
pub use template::Template;
