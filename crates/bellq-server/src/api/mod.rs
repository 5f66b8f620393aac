//! API endpoint handlers.

pub mod circuit;
