//! Domain layer for Assets

pub mod entities;
pub mod errors;
