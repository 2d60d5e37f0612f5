//! Narrow untyped JSON and string fields of a generated Prisma client declaration
//! file to user-declared TypeScript types.
//!
//! The core is [`classify`]: a pure function from a field's type signature and
//! its context to a [`RewriteDecision`]. [`walker`] and [`generate`] drive it over
//! a whole `.d.ts` file; [`namespace`] emits the helper types the rewritten
//! signatures refer to.
pub mod catalog;
pub mod classify;
pub mod cli;
pub mod diagnostics;
pub mod error;
pub mod generate;
pub mod logging;
pub mod namespace;
pub mod naming;
pub mod replace;
pub mod signature;
pub mod walker;

pub use catalog::ModelCatalog;
pub use classify::{classify, rewrite, FieldContext, RewriteDecision};
pub use diagnostics::{CollectingSink, DiagnosticSink, TracingSink};
pub use error::{NarrowError, Result};
pub use generate::{generate, GenerateOutput};
pub use namespace::create_namespace;
pub use replace::{ReplacementSpan, Replacements};
pub use signature::TypeSignature;
pub use walker::WalkOptions;
