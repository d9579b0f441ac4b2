//! Rename module - The project rename pipeline
//!
//! - rules: ordered pattern rules and path renames
//! - select: file selection policy and tree traversal
//! - fsops: move and text read/write primitives
//! - renamer: the three-step pipeline

pub mod fsops;
pub mod renamer;
pub mod rules;
pub mod select;
