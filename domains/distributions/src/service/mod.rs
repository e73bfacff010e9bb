//! Application services of the Distributions domain

pub mod options;
pub mod upload;
