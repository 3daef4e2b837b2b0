//! In-memory tree of notes grouped by topic.
//!
//! [`TreeBuilder`] walks a directory on disk and produces an [`Entry`] per
//! directory level, holding the matching [`Note`] files of that level and
//! one child entry per non-hidden subdirectory.

mod builder;
mod identity;
mod tree;

pub use builder::{BuildError, TreeBuilder};
pub use identity::{FileIdentity, IdentityError};
pub use tree::{Entry, Note, Topic};
