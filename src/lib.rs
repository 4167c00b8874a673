//! refmark: Markdown API reference generator.
//!
//! Takes the structure document produced by an external static-analysis
//! tool — classes, interfaces, methods, properties, constants, docblock
//! tags — and generates one cross-linked Markdown reference page per type,
//! plus a namespace index.
//!
//! # Architecture
//!
//! - `input`: serde types mirroring the analyzer's JSON export
//! - `parse`: parse pass, document → initial model (declared members only)
//! - `expand`: inheritance expansion across the `extends`/`implements` graph
//! - `model`: the resolved documentation model
//! - `links`: type-name expressions → Markdown hyperlinks
//! - `render`: Markdown page and index construction
//! - `output`: page writing
//! - `cli`: pipeline orchestration for the binary

pub mod cli;
pub mod docblock;
pub mod error;
pub mod expand;
pub mod input;
pub mod links;
pub mod model;
pub mod output;
pub mod parse;
pub mod render;

pub use cli::{run_generate, GenerateOptions, GenerateSummary};
pub use error::{ErrorCode, RefmarkError};
pub use expand::{expand_model, ExpandError};
pub use links::LinkFormatter;
pub use model::{Model, TypeKind, TypeRecord, Visibility};
pub use parse::build_model;
