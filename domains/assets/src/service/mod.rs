//! Application services of the Assets domain

pub mod deletion;
