#![forbid(unsafe_code)]
#![deny(unused_must_use, dead_code, missing_debug_implementations)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! OpenAPI to React Query hooks generator.
//!
//! This crate turns a parsed OpenAPI 3 document into two TypeScript modules:
//! - a schema module with one type alias per component
//! - a hooks module with a typed axios accessor and a React Query hook family
//!   (query with cache helpers, mutation, or infinite query) per operation
//!
//! Everything is synchronous and scoped to one document; per-document state
//! lives in [`DocumentContext`].

pub mod document;
pub mod error;
pub mod ir;
pub mod options;
pub mod params;
pub mod prelude;
pub mod registry;
pub mod resolve;
pub mod route;
pub mod schemas;
pub mod spec;
pub mod synth;

pub use document::{GeneratedDocument, ModuleNames, generate_document};
pub use error::{GenError, Result};
pub use options::{GeneratorOptions, HookKind, Override};
pub use registry::DocumentContext;
pub use resolve::TypeResolver;
pub use spec::{DocumentFormat, OpenApiSpec};
pub use synth::{GeneratedHook, HookSynthesizer, OperationInput, ParamShape, Unsupported};
