//! Fundamental cluster data types.

pub mod feed;
pub mod reference;
