//! Third-party crate isolation.

pub mod avian;
