//! Domain models.

pub mod claims;

pub use claims::Claims;
