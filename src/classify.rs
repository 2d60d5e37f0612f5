//! Signature classification: normalized signature text + field context → rewrite decision.
//!
//! The generated client only ever emits a small vocabulary of signature shapes
//! for JSON and string columns, so dispatch is an exact-text lookup over a
//! static rule table. Patterns and replacements are templates over three
//! placeholders:
//!
//! - `{model}`: the model name (`User`)
//! - `{field}`: the field name as written in the schema (`tags`)
//! - `{name}`:  the narrowed type reference (`PrismaJson.Tags`, possibly
//!   wrapped in `UpdateInput<..>`)
use crate::diagnostics::DiagnosticSink;
use crate::replace::ReplacementSpan;
use crate::signature::{normalize, TypeSignature};

// ------------------------------- Context --------------------------------- //

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldContext {
    /// Generated declaration that owns the field (`UserUpdateInput`).
    pub declaration_name: String,
    pub model_name: String,
    pub field_name: String,
    /// User-supplied concrete type (`Metadata` for `/// [Metadata]`).
    pub type_alias_name: String,
    pub namespace_name: String,
    pub use_type: Option<String>,
    pub is_update_variant: bool,
}

impl FieldContext {
    /// The type reference substituted for `{name}`.
    pub fn narrowed_name(&self) -> String {
        let name = match self.use_type.as_deref() {
            Some(use_type) => format!(
                "{}.{}[\"{}\"]",
                self.namespace_name, use_type, self.type_alias_name
            ),
            None => format!("{}.{}", self.namespace_name, self.type_alias_name),
        };
        // single-record updates leave every nested property optional
        if self.is_update_variant {
            format!("UpdateInput<{name}>")
        } else {
            name
        }
    }
}

// ------------------------------ Rule table -------------------------------- //

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Replace the signature with the rendered template.
    Replace(&'static str),
    /// Known shape, left alone: narrowing it would drop filter functionality.
    Skip,
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub patterns: &'static [&'static str],
    pub action: Action,
}

static RULES: &[Rule] = &[
    // ---- json ----
    Rule {
        patterns: &[
            "JsonValue",
            "Prisma.JsonValue",
            "InputJsonValue",
            "InputJsonValue | InputJsonValue",
            "JsonNullValueInput | InputJsonValue",
        ],
        action: Action::Replace("{name}"),
    },
    Rule {
        patterns: &[
            "JsonWithAggregatesFilter",
            "JsonWithAggregatesFilter<\"{model}\">",
            "JsonNullableWithAggregatesFilter",
            "JsonNullableWithAggregatesFilter<\"{model}\">",
        ],
        action: Action::Skip,
    },
    Rule {
        patterns: &[
            "JsonFilter",
            "JsonFilter<\"{model}\">",
            "JsonNullableFilter",
            "JsonNullableFilter<\"{model}\">",
        ],
        action: Action::Skip,
    },
    Rule {
        patterns: &["JsonValue | null", "Prisma.JsonValue | null"],
        action: Action::Replace("{name} | null"),
    },
    // column null vs json null
    Rule {
        patterns: &["NullableJsonNullValueInput | InputJsonValue"],
        action: Action::Replace("{name} | NullableJsonNullValueInput"),
    },
    // ---- json[] ----
    Rule {
        patterns: &["JsonValue[]", "Prisma.JsonValue[]"],
        action: Action::Replace("{name}[]"),
    },
    Rule {
        patterns: &["Enumerable<InputJsonValue>", "InputJsonValue[]"],
        action: Action::Replace("Enumerable<{name}>"),
    },
    Rule {
        patterns: &["JsonNullableListFilter", "JsonNullableListFilter<\"{model}\">"],
        action: Action::Replace("NullableListFilter<{name}>"),
    },
    Rule {
        patterns: &[
            "{model}Update{field}Input | Enumerable<InputJsonValue>",
            "{model}Update{field}Input | InputJsonValue[]",
        ],
        action: Action::Replace("UpdateManyInput<{name}>"),
    },
    Rule {
        patterns: &[
            "{model}Create{field}Input | Enumerable<InputJsonValue>",
            "{model}Create{field}Input | InputJsonValue[]",
        ],
        action: Action::Replace("CreateManyInput<{name}>"),
    },
    // ---- string ----
    Rule {
        patterns: &["string", "string | null"],
        action: Action::Replace("{name}"),
    },
    Rule {
        patterns: &["string[]"],
        action: Action::Replace("({name})[]"),
    },
    Rule {
        patterns: &["StringFilter | string", "StringFilter<\"{model}\"> | string"],
        action: Action::Replace("TypedStringFilter<{name}> | {name}"),
    },
    Rule {
        patterns: &[
            "StringNullableFilter | string | null",
            "StringNullableFilter<\"{model}\"> | string | null",
        ],
        action: Action::Replace("TypedStringNullableFilter<{name}> | {name} | null"),
    },
    Rule {
        patterns: &[
            "StringNullableListFilter",
            "StringNullableListFilter<\"{model}\">",
        ],
        action: Action::Replace("TypedStringNullableListFilter<{name}>"),
    },
    Rule {
        patterns: &[
            "StringWithAggregatesFilter | string",
            "StringWithAggregatesFilter<\"{model}\"> | string",
        ],
        action: Action::Replace("TypedStringWithAggregatesFilter<{name}> | {name}"),
    },
    Rule {
        patterns: &[
            "StringNullableWithAggregatesFilter | string | null",
            "StringNullableWithAggregatesFilter<\"{model}\"> | string | null",
        ],
        action: Action::Replace("TypedStringNullableWithAggregatesFilter<{name}> | {name}"),
    },
    Rule {
        patterns: &["StringFieldUpdateOperationsInput | string"],
        action: Action::Replace("TypedStringFieldUpdateOperationsInput<{name}> | {name}"),
    },
    Rule {
        patterns: &["NullableStringFieldUpdateOperationsInput | string | null"],
        action: Action::Replace(
            "TypedNullableStringFieldUpdateOperationsInput<{name}> | {name} | null",
        ),
    },
    Rule {
        patterns: &[
            "{model}Create{field}Input | Enumerable<string>",
            "{model}Create{field}Input | string[]",
            "{model}Update{field}Input | Enumerable<string>",
            "{model}Update{field}Input | string[]",
        ],
        action: Action::Replace("CreateStringArrayInput<{name}> | Enumerable<{name}>"),
    },
];

pub fn rules() -> &'static [Rule] {
    RULES
}

// ------------------------------ Interpreter ------------------------------- //

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteDecision {
    Replace(ReplacementSpan),
    Skip,
    Unrecognized,
}

/// Substitute `{model}`, `{field}` and `{name}`; unknown placeholders are kept verbatim.
fn render(template: &str, model: &str, field: &str, name: &str) -> String {
    let mut out = String::with_capacity(template.len() + name.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let Some(close) = tail.find('}') else {
            out.push_str(tail);
            return out;
        };
        match &tail[1..close] {
            "model" => out.push_str(model),
            "field" => out.push_str(field),
            "name" => out.push_str(name),
            _ => out.push_str(&tail[..=close]),
        }
        rest = &tail[close + 1..];
    }
    out.push_str(rest);
    out
}

/// First rule whose rendered pattern equals the normalized signature.
pub fn find_rule(signature_text: &str, context: &FieldContext) -> Option<&'static Rule> {
    RULES.iter().find(|rule| {
        rule.patterns.iter().any(|pattern| {
            render(pattern, &context.model_name, &context.field_name, "") == signature_text
        })
    })
}

pub fn classify(signature: &TypeSignature, context: &FieldContext) -> RewriteDecision {
    let key = normalize(signature);
    match find_rule(key, context).map(|rule| rule.action) {
        Some(Action::Replace(template)) => {
            let name = context.narrowed_name();
            let text = render(template, &context.model_name, &context.field_name, &name);
            RewriteDecision::Replace(ReplacementSpan::new(signature.start(), signature.end(), text))
        }
        Some(Action::Skip) => RewriteDecision::Skip,
        None => RewriteDecision::Unrecognized,
    }
}

/// Callback-shaped entry point: `replace` is called at most once, and only for
/// `Replace`; unrecognized signatures are reported to `sink` and left untouched.
pub fn rewrite(
    signature: &TypeSignature,
    context: &FieldContext,
    sink: &dyn DiagnosticSink,
    mut replace: impl FnMut(usize, usize, &str),
) -> RewriteDecision {
    let decision = classify(signature, context);
    match &decision {
        RewriteDecision::Replace(span) => {
            tracing::debug!(
                declaration = %context.declaration_name,
                field = %context.field_name,
                from = signature.text(),
                to = %span.text,
                "narrowing signature"
            );
            replace(span.start, span.end, &span.text);
        }
        RewriteDecision::Skip => {
            tracing::trace!(
                declaration = %context.declaration_name,
                field = %context.field_name,
                signature = signature.text(),
                "leaving filter signature untouched"
            );
        }
        RewriteDecision::Unrecognized => {
            sink.report(&context.declaration_name, &context.field_name, signature.text());
        }
    }
    decision
}
