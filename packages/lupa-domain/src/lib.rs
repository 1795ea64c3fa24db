//! Pure text handling and catalog data types. Nothing in this crate performs I/O.

pub mod accents;
pub mod catalog;
pub mod query;
pub mod reference;
pub mod text;
