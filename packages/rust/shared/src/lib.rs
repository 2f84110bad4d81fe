//! Shared types, error model, and configuration for gqldoc.
//!
//! This crate is the foundation depended on by all other gqldoc crates.
//! It provides:
//! - [`GqlDocError`], the unified error type
//! - The schema entity graph ([`Schema`], [`Entity`], [`Field`], [`Argument`])
//! - Configuration ([`AppConfig`], [`RenderConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, RenderConfig, WrapWidths, config_dir, config_file_path, init_config, load_config,
    load_config_from,
};
pub use error::{GqlDocError, Result};
pub use types::{
    Argument, DEFAULT_MUTATION_TYPE, DEFAULT_QUERY_TYPE, DEFAULT_SUBSCRIPTION_TYPE, Directive,
    Entity, EntityKind, EnumDef, EnumValue, Field, InputDef, InterfaceDef, ObjectDef, RootNames,
    ScalarDef, Schema, Toc, TocEntry, TypeRef, UnionDef,
};
