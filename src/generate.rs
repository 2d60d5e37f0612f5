//! One generation pass over a declaration file.
use std::path::Path;

use crate::catalog::ModelCatalog;
use crate::diagnostics::DiagnosticSink;
use crate::error::{NarrowError, Result};
use crate::namespace::create_namespace;
use crate::walker::{walk_declarations, WalkOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutput {
    pub content: String,
    pub replaced: usize,
    pub skipped: usize,
    pub unrecognized: usize,
}

/// Rewrite `source` and append the utility type block.
pub fn generate(
    source: &str,
    catalog: &ModelCatalog,
    options: &WalkOptions,
    sink: &dyn DiagnosticSink,
) -> Result<GenerateOutput> {
    let outcome = walk_declarations(source, catalog, options, sink)?;
    let mut content = outcome.replacements.apply(source)?;
    content.push_str("\n\n");
    content.push_str(&create_namespace(&options.namespace));
    content.push('\n');
    tracing::info!(
        replaced = outcome.replaced,
        skipped = outcome.skipped,
        unrecognized = outcome.unrecognized,
        "narrowed declarations"
    );
    Ok(GenerateOutput {
        content,
        replaced: outcome.replaced,
        skipped: outcome.skipped,
        unrecognized: outcome.unrecognized,
    })
}

pub fn generate_file(
    declarations: &Path,
    catalog: &ModelCatalog,
    options: &WalkOptions,
    sink: &dyn DiagnosticSink,
) -> Result<GenerateOutput> {
    let source = std::fs::read_to_string(declarations).map_err(|source| NarrowError::Io {
        path: declarations.to_path_buf(),
        source,
    })?;
    generate(&source, catalog, options, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Model, TypedField};
    use crate::diagnostics::CollectingSink;

    #[test]
    fn appends_block_after_patched_source() {
        let catalog = ModelCatalog::new([Model {
            name: "User".to_string(),
            fields: vec![TypedField { name: "meta".to_string(), type_name: "Meta".to_string() }],
        }]);
        let sink = CollectingSink::new();
        let out = generate(
            "export type User = { meta: JsonValue }",
            &catalog,
            &WalkOptions::default(),
            &sink,
        )
        .unwrap();
        assert!(out.content.starts_with("export type User = { meta: PrismaJson.Meta }\n\ndeclare global {"));
        assert_eq!(out.replaced, 1);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let sink = CollectingSink::new();
        let err = generate_file(
            Path::new("/definitely/not/here/index.d.ts"),
            &ModelCatalog::default(),
            &WalkOptions::default(),
            &sink,
        )
        .unwrap_err();
        assert!(matches!(err, NarrowError::Io { .. }));
    }
}
