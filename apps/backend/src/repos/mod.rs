//! Repository traits for domain layer.

pub mod rounds;

pub use rounds::{RoundStore, SecretSource};
