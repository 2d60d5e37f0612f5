//! Type-signature nodes as the classifier sees them.
//!
//! Matching is purely textual: a signature is its trimmed source slice plus the
//! byte span that slice occupies in the declaration file.

use tree_sitter::Node;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSignature {
    start: usize,
    end: usize,
    text: String,
}

impl TypeSignature {
    /// Build a signature from a slice that starts at byte `start`.
    /// Surrounding whitespace is excluded from both the text and the span.
    pub fn new(start: usize, raw: &str) -> Self {
        let leading = raw.len() - raw.trim_start().len();
        let text = raw.trim();
        let start = start + leading;
        Self {
            start,
            end: start + text.len(),
            text: text.to_string(),
        }
    }

    pub fn from_node(node: &Node, source: &str) -> Self {
        Self::new(node.start_byte(), &source[node.start_byte()..node.end_byte()])
    }

    pub fn start(&self) -> usize { self.start }
    pub fn end(&self) -> usize { self.end }
    pub fn text(&self) -> &str { &self.text }
}

/// Dispatch key for the rule table.
pub fn normalize(signature: &TypeSignature) -> &str {
    signature.text.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_text_and_narrows_span() {
        let source = "metadata:  JsonValue | null ;";
        let sig = TypeSignature::new(9, &source[9..27]);
        assert_eq!(normalize(&sig), "JsonValue | null");
        assert_eq!(&source[sig.start()..sig.end()], "JsonValue | null");
    }

    #[test]
    fn inner_whitespace_is_kept_verbatim() {
        let sig = TypeSignature::new(0, "JsonValue|null");
        assert_eq!(normalize(&sig), "JsonValue|null");
        assert_ne!(normalize(&sig), "JsonValue | null");
    }

    #[test]
    fn from_node_reads_the_annotation_type() {
        let source = "type A = { meta: Prisma.JsonValue }";
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            .unwrap();
        let tree = parser.parse(source, None).unwrap();
        let start = source.find("Prisma").unwrap();
        let node = tree
            .root_node()
            .descendant_for_byte_range(start, start + "Prisma.JsonValue".len())
            .unwrap();
        let sig = TypeSignature::from_node(&node, source);
        assert_eq!(sig.text(), "Prisma.JsonValue");
        assert_eq!(sig.start(), start);
    }
}
