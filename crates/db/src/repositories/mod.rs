//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod presentation_repo;
pub mod slide_repo;

pub use presentation_repo::PresentationRepo;
pub use slide_repo::SlideRepo;
