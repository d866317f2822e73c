//! CSV ingestion for the business table and the three platform exports.
//! Everything is read once into an immutable [`DataContext`].

pub mod context;
pub mod parse;

pub use context::DataContext;
