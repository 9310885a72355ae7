//! Domain types and pure logic shared by the Slidecraft crates.
//!
//! Nothing in this crate performs I/O. The database and HTTP layers depend
//! on it for identifiers, the slide vocabulary, validation rules and the
//! slide ordering model.

pub mod error;
pub mod ordering;
pub mod presentation;
pub mod slide;
pub mod theme;
pub mod types;
