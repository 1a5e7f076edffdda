//! TypeScript syntax tree and its text emission.
//!
//! Resolution and hook synthesis build `types` trees; `emit` is the only
//! place where they become text.
//!
//! ## Module Structure
//!
//! - `types`: TypeScript AST (TsType, TsExpr, TsStmt, TsFunction, TsModule)
//! - `emit`: TypeScript AST -> code strings (via Emit trait)
//! - `utils`: naming, quoting and doc-comment helpers

pub mod emit;
pub mod types;
pub mod utils;

pub use emit::Emit;
pub use types::{
    BinOp, ObjectEntry, TemplatePart, TsExpr, TsFunction, TsImport, TsItem, TsLiteral, TsModule,
    TsParam, TsPrimitive, TsProp, TsStmt, TsType, TsTypeDef,
};
