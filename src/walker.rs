//! Declaration walker: finds typed fields in a generated `.d.ts` and classifies them.
//!
//! Extraction is a sequential tree walk; classification of the extracted fields
//! runs per top-level declaration on the rayon pool. Each declaration buffers its
//! own spans; they are merged afterwards and only applied by
//! [`Replacements::apply`], never while classification is still running.
use rayon::prelude::*;
use tree_sitter::{Node, Parser, Tree};

use crate::catalog::{Model, ModelCatalog};
use crate::classify::{rewrite, FieldContext, RewriteDecision};
use crate::diagnostics::DiagnosticSink;
use crate::error::{NarrowError, Result};
use crate::naming::{is_narrowable_declaration, is_update_one, resolve_model};
use crate::replace::Replacements;
use crate::signature::TypeSignature;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone)]
pub struct WalkOptions {
    pub namespace: String,
    pub use_type: Option<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            namespace: "PrismaJson".to_string(),
            use_type: None,
        }
    }
}

/// A generated declaration that belongs to a catalog model.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub name: String,
    pub model_name: String,
    pub fields: Vec<DeclaredField>,
}

#[derive(Debug, Clone)]
pub struct DeclaredField {
    pub name: String,
    pub type_name: String,
    pub signature: TypeSignature,
}

#[derive(Debug, Clone, Default)]
pub struct WalkOutcome {
    pub replacements: Replacements,
    pub replaced: usize,
    pub skipped: usize,
    pub unrecognized: usize,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

pub fn parse_declarations(source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
        .map_err(|e| NarrowError::Parser(e.to_string()))?;
    parser
        .parse(source, None)
        .ok_or_else(|| NarrowError::Parser("parser returned no tree".to_string()))
}

/// Every declaration in `source` that resolves to a model with typed fields.
pub fn extract_declarations(tree: &Tree, source: &str, catalog: &ModelCatalog) -> Vec<Declaration> {
    let mut out = Vec::new();
    visit_top_level(tree.root_node(), source, catalog, &mut out);
    out
}

pub fn walk_declarations(
    source: &str,
    catalog: &ModelCatalog,
    options: &WalkOptions,
    sink: &dyn DiagnosticSink,
) -> Result<WalkOutcome> {
    let tree = parse_declarations(source)?;
    if tree.root_node().has_error() {
        tracing::warn!("declaration file has syntax errors; walking the recoverable parts");
    }
    let declarations = extract_declarations(&tree, source, catalog);
    tracing::debug!(declarations = declarations.len(), "extracted candidate declarations");

    let partials = declarations
        .par_iter()
        .map(|declaration| classify_declaration(declaration, options, sink))
        .collect::<Vec<_>>();

    let mut outcome = WalkOutcome::default();
    for partial in partials {
        outcome.replacements.extend(partial.replacements.sorted());
        outcome.replaced += partial.replaced;
        outcome.skipped += partial.skipped;
        outcome.unrecognized += partial.unrecognized;
    }
    Ok(outcome)
}

fn classify_declaration(
    declaration: &Declaration,
    options: &WalkOptions,
    sink: &dyn DiagnosticSink,
) -> WalkOutcome {
    let is_update_variant = is_update_one(&declaration.name);
    let mut outcome = WalkOutcome::default();
    for field in &declaration.fields {
        let context = FieldContext {
            declaration_name: declaration.name.clone(),
            model_name: declaration.model_name.clone(),
            field_name: field.name.clone(),
            type_alias_name: field.type_name.clone(),
            namespace_name: options.namespace.clone(),
            use_type: options.use_type.clone(),
            is_update_variant,
        };
        let replacements = &mut outcome.replacements;
        let decision = rewrite(&field.signature, &context, sink, |start, end, text| {
            replacements.push(start, end, text)
        });
        match decision {
            RewriteDecision::Replace(_) => outcome.replaced += 1,
            RewriteDecision::Skip => outcome.skipped += 1,
            RewriteDecision::Unrecognized => outcome.unrecognized += 1,
        }
    }
    outcome
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

fn text<'s>(node: Node, source: &'s str) -> &'s str {
    &source[node.byte_range()]
}

/// Type aliases and interfaces, directly or inside namespace/module blocks.
fn visit_top_level(node: Node, source: &str, catalog: &ModelCatalog, out: &mut Vec<Declaration>) {
    match node.kind() {
        "type_alias_declaration" => {
            if let Some(value) = node.child_by_field_name("value") {
                visit_declaration(node, value, source, catalog, out);
            }
        }
        "interface_declaration" => {
            if let Some(body) = node.child_by_field_name("body") {
                visit_declaration(node, body, source, catalog, out);
            }
        }
        "internal_module" | "module" => {
            if let Some(body) = node.child_by_field_name("body") {
                for child in named_children(body) {
                    visit_top_level(child, source, catalog, out);
                }
            }
        }
        "program" | "export_statement" | "ambient_declaration" | "expression_statement" => {
            for child in named_children(node) {
                visit_top_level(child, source, catalog, out);
            }
        }
        _ => {}
    }
}

fn visit_declaration(
    node: Node,
    body: Node,
    source: &str,
    catalog: &ModelCatalog,
    out: &mut Vec<Declaration>,
) {
    let Some(name) = node.child_by_field_name("name").map(|n| text(n, source)) else {
        return;
    };
    let Some(model) = resolve_model(name, catalog) else {
        return;
    };
    if model.fields.is_empty() || !is_narrowable_declaration(name, &model.name) {
        return;
    }
    let mut fields = Vec::new();
    collect_fields(body, source, model, &mut fields);
    if fields.is_empty() {
        return;
    }
    tracing::trace!(declaration = name, model = %model.name, fields = fields.len(), "found typed fields");
    out.push(Declaration {
        name: name.to_string(),
        model_name: model.name.clone(),
        fields,
    });
}

/// Property signatures anywhere under `node`; typed fields are not descended into.
fn collect_fields(node: Node, source: &str, model: &Model, out: &mut Vec<DeclaredField>) {
    if node.kind() == "property_signature" {
        let field = node
            .child_by_field_name("name")
            .map(|n| text(n, source).trim_matches(|c| c == '"' || c == '\''))
            .and_then(|name| model.typed_field(name));
        let signature = node
            .child_by_field_name("type")
            .and_then(|annotation| annotation.named_child(0));
        if let (Some(field), Some(signature)) = (field, signature) {
            out.push(DeclaredField {
                name: field.name.clone(),
                type_name: field.type_name.clone(),
                signature: TypeSignature::from_node(&signature, source),
            });
            return;
        }
    }
    for child in named_children(node) {
        collect_fields(child, source, model, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TypedField;
    use crate::diagnostics::CollectingSink;

    fn catalog() -> ModelCatalog {
        ModelCatalog::new([
            Model {
                name: "User".to_string(),
                fields: vec![
                    TypedField { name: "meta".to_string(), type_name: "UserMeta".to_string() },
                    TypedField { name: "role".to_string(), type_name: "Role".to_string() },
                ],
            },
            Model { name: "Post".to_string(), fields: Vec::new() },
        ])
    }

    const SOURCE: &str = r#"
export type User = {
  id: number
  meta: Prisma.JsonValue
  role: string
}

export namespace Prisma {
  export type UserWhereInput = {
    meta?: JsonFilter<"User">
    role?: StringFilter<"User"> | string
  }

  export type UserUpdateInput = {
    meta?: JsonNullValueInput | InputJsonValue
    role?: StringFieldUpdateOperationsInput | string
  }

  export type PostCreateInput = {
    meta: InputJsonValue
  }
}
"#;

    #[test]
    fn finds_fields_in_top_level_and_namespace_aliases() {
        let tree = parse_declarations(SOURCE).unwrap();
        let declarations = extract_declarations(&tree, SOURCE, &catalog());
        let names = declarations.iter().map(|d| d.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["User", "UserWhereInput", "UserUpdateInput"]);
        let user = &declarations[0];
        assert_eq!(user.fields.len(), 2);
        assert_eq!(user.fields[0].signature.text(), "Prisma.JsonValue");
        assert_eq!(user.fields[1].signature.text(), "string");
    }

    #[test]
    fn walk_classifies_and_sorts_spans() {
        let sink = CollectingSink::new();
        let outcome = walk_declarations(SOURCE, &catalog(), &WalkOptions::default(), &sink).unwrap();
        assert_eq!(outcome.replaced, 5);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.unrecognized, 0);
        assert!(sink.is_empty());
        let spans = outcome.replacements.sorted();
        let texts = spans.iter().map(|s| s.text.as_str()).collect::<Vec<_>>();
        assert_eq!(
            texts,
            vec![
                "PrismaJson.UserMeta",
                "PrismaJson.Role",
                "TypedStringFilter<PrismaJson.Role> | PrismaJson.Role",
                "UpdateInput<PrismaJson.UserMeta>",
                "TypedStringFieldUpdateOperationsInput<UpdateInput<PrismaJson.Role>> | UpdateInput<PrismaJson.Role>",
            ]
        );
        assert!(spans.windows(2).all(|w| w[0].end <= w[1].start));
    }

    #[test]
    fn unknown_signature_goes_to_the_sink() {
        let source = "export type UserCreateInput = { meta: SomethingNew<\"User\"> }";
        let sink = CollectingSink::new();
        let outcome = walk_declarations(source, &catalog(), &WalkOptions::default(), &sink).unwrap();
        assert_eq!(outcome.unrecognized, 1);
        assert!(outcome.replacements.is_empty());
        let reports = sink.reports();
        assert_eq!(reports[0].declaration, "UserCreateInput");
        assert_eq!(reports[0].signature, "SomethingNew<\"User\">");
    }

    #[test]
    fn select_order_and_count_shapes_are_not_classified() {
        let source = r#"
export namespace Prisma {
  export type UserSelect = {
    meta?: boolean
  }
  export type UserOrderByWithRelationInput = {
    meta?: SortOrderInput | SortOrder
  }
  export type UserCountAggregateOutputType = {
    meta: number
  }
  export type UserCountAggregateInputType = {
    meta?: true
  }
  interface UserFieldRefs {
    readonly meta: FieldRef<"User", 'Json'>
  }
  export type UserWhereInput = {
    meta?: JsonFilter<"User">
  }
}
"#;
        let sink = CollectingSink::new();
        let outcome = walk_declarations(source, &catalog(), &WalkOptions::default(), &sink).unwrap();
        assert_eq!(outcome.replaced, 0);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.unrecognized, 0);
        assert!(sink.is_empty(), "{:?}", sink.reports());
    }

    #[test]
    fn nested_object_types_are_searched() {
        let source = r#"
export type $UserPayload = {
  scalars: $Extensions.GetPayloadResult<{
    id: number
    meta: Prisma.JsonValue | null
  }, ExtArgs["result"]["user"]>
}
"#;
        let sink = CollectingSink::new();
        let outcome = walk_declarations(source, &catalog(), &WalkOptions::default(), &sink).unwrap();
        assert_eq!(outcome.replaced, 1);
        assert_eq!(outcome.replacements.sorted()[0].text, "PrismaJson.UserMeta | null");
    }
}
