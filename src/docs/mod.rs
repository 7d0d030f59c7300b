//! Docs module - Loading and scanning Markdown documents
//!
//! Documents are the `*.md` files of one directory, read once per run.

pub mod corpus;
pub mod markdown;
pub mod workspace;
