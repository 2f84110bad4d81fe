//! Schema loading and the documentation renderer for gqldoc.
//!
//! The render pipeline is classify → register anchors → compose fragments →
//! assemble, all synchronous and driven by [`assembler::render`].

pub mod anchors;
pub mod assembler;
pub mod classify;
pub mod context;
pub mod fragments;
pub mod schema;
pub mod toc;

#[cfg(test)]
mod testing;

pub use assembler::{format_markdown, render, render_with};
pub use schema::{ParsedSchema, format_graphql, parse_files, parse_sources};
