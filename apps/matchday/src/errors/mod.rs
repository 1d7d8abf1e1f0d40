//! Error handling for the matchday engine.

pub mod domain;

pub use domain::DomainError;
