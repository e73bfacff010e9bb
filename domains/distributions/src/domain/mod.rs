//! Domain layer for the Distributions domain

pub mod entities;
pub mod errors;
pub mod state;
