//! Naming conventions of the generated client.
use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::{Model, ModelCatalog};

/// Single-record update inputs: `UserUpdateInput`, `UserUncheckedUpdateInput`,
/// `UserUpdateOneWithoutPostsInput`, `UserUpdateWithoutPostsInput`, ...
static UPDATE_ONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:Unchecked)?Update(?:One)?(?:Without\w+?)?Input$").unwrap());

/// What may follow the model name in a declaration whose fields carry column
/// signatures. `Select`, `Include`, `OrderBy*`, `Count*`, `*AggregateInputType`
/// and `FieldRefs` only hold flags, sort orders or counts and are left out.
static NARROWABLE_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:",
        r"|Payload",
        r"|(?:Unchecked)?(?:Create|Update|Upsert)\w*Input",
        r"|(?:Scalar)?Where(?:Unique)?(?:WithAggregates)?Input",
        r"|GroupByOutputType",
        r"|(?:Min|Max)AggregateOutputType",
        r")$"
    ))
    .unwrap()
});

pub fn is_update_one(declaration: &str) -> bool {
    UPDATE_ONE_RE.is_match(declaration) && !declaration.contains("UpdateMany")
}

/// Whether `declaration` (already resolved to `model`) is one of the generated
/// shapes whose fields mirror the model's columns.
pub fn is_narrowable_declaration(declaration: &str, model: &str) -> bool {
    let name = declaration.strip_prefix('$').unwrap_or(declaration);
    name.strip_prefix(model)
        .is_some_and(|suffix| NARROWABLE_SUFFIX_RE.is_match(suffix))
}

/// Model a generated declaration belongs to: the longest model name that is the
/// declaration itself or prefixes it at a word boundary (`UserCreateInput`).
pub fn resolve_model<'a>(declaration: &str, catalog: &'a ModelCatalog) -> Option<&'a Model> {
    let name = declaration.strip_prefix('$').unwrap_or(declaration);
    catalog
        .models()
        .filter(|model| {
            name.strip_prefix(model.name.as_str()).is_some_and(|rest| {
                rest.chars().next().is_none_or(|c| c.is_ascii_uppercase())
            })
        })
        .max_by_key(|model| model.name.len())
}
