//! Vertex attribute discovery.
//!
//! [`collect_attribs`] scans GLSL ES 1.00 style vertex source for
//! `attribute <type> <name>;` declarations and binds each declared name to
//! a [`VertexAttributeSemantic`]. Names from the engine's naming convention
//! (`vertex_position`, `vertex_texCoord0`, ...) get their fixed semantic;
//! anything else gets the next generic `ATTR<n>` slot.
//!
//! The scan is textual, not a GLSL lexer. A keyword directly preceded by
//! `/` is treated as commented out; other comment forms (block comments,
//! `// attribute` with a space) are still picked up.

use std::fmt;

use crate::mesh::VertexAttributeSemantic;

const ATTRIBUTE_KEYWORD: &str = "attribute";

/// Errors produced while scanning attribute declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeParseError {
    /// A declaration has no terminating `;`.
    MissingTerminator { offset: usize },
    /// The declared name is empty or not a GLSL identifier.
    InvalidName { offset: usize, name: String },
    /// More generic attributes than slots available.
    TooManyAttributes,
}

impl fmt::Display for AttributeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTerminator { offset } => {
                write!(f, "attribute declaration at offset {offset} has no terminating ';'")
            }
            Self::InvalidName { offset, name } => {
                write!(f, "invalid attribute name '{name}' at offset {offset}")
            }
            Self::TooManyAttributes => write!(f, "too many generic vertex attributes"),
        }
    }
}

impl std::error::Error for AttributeParseError {}

/// Attribute name to semantic bindings, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttributeBindings {
    entries: Vec<(String, VertexAttributeSemantic)>,
}

impl AttributeBindings {
    /// Semantic bound to `name`.
    pub fn get(&self, name: &str) -> Option<VertexAttributeSemantic> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, semantic)| *semantic)
    }

    /// Iterate `(name, semantic)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, VertexAttributeSemantic)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), *s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }
}

/// Fixed semantic for an engine-convention attribute name.
pub fn known_semantic(name: &str) -> Option<VertexAttributeSemantic> {
    use VertexAttributeSemantic as S;
    Some(match name {
        "vertex_position" => S::Position,
        "vertex_normal" => S::Normal,
        "vertex_tangent" => S::Tangent,
        "vertex_texCoord0" => S::TexCoord0,
        "vertex_texCoord1" => S::TexCoord1,
        "vertex_texCoord2" => S::TexCoord2,
        "vertex_texCoord3" => S::TexCoord3,
        "vertex_texCoord4" => S::TexCoord4,
        "vertex_texCoord5" => S::TexCoord5,
        "vertex_texCoord6" => S::TexCoord6,
        "vertex_texCoord7" => S::TexCoord7,
        "vertex_color" => S::Color,
        "vertex_boneIndices" => S::BlendIndices,
        "vertex_boneWeights" => S::BlendWeight,
        _ => return None,
    })
}

/// Bind every attribute declared in `vs_source` to a semantic.
///
/// Generic slots are numbered from `ATTR0` in order of first declaration.
/// A name declared twice keeps its first binding.
pub fn collect_attribs(vs_source: &str) -> Result<AttributeBindings, AttributeParseError> {
    let bytes = vs_source.as_bytes();
    let mut bindings = AttributeBindings::default();
    let mut next_generic: u8 = 0;
    let mut search_from = 0;

    while let Some(pos) = vs_source[search_from..].find(ATTRIBUTE_KEYWORD) {
        let found = search_from + pos;
        let after = found + ATTRIBUTE_KEYWORD.len();
        search_from = after;

        // `//attribute` counts as commented out
        if found > 0 && bytes[found - 1] == b'/' {
            continue;
        }
        // Part of a longer identifier (`attributeScale`, `my_attribute`)
        if found > 0 && is_ident_byte(bytes[found - 1]) {
            continue;
        }
        if !bytes.get(after).is_some_and(|b| b.is_ascii_whitespace()) {
            continue;
        }

        let end = vs_source[found..]
            .find(';')
            .map(|p| found + p)
            .ok_or(AttributeParseError::MissingTerminator { offset: found })?;

        let statement = vs_source[found..end].trim_end();
        let name = match statement.rfind(|c: char| c.is_ascii_whitespace()) {
            Some(ws) if ws >= ATTRIBUTE_KEYWORD.len() => &statement[ws + 1..],
            _ => "",
        };
        if !is_identifier(name) {
            return Err(AttributeParseError::InvalidName {
                offset: found,
                name: name.to_string(),
            });
        }

        if bindings.contains(name) {
            continue;
        }

        let semantic = match known_semantic(name) {
            Some(semantic) => semantic,
            None => {
                let slot = VertexAttributeSemantic::Attr(next_generic);
                next_generic = next_generic
                    .checked_add(1)
                    .ok_or(AttributeParseError::TooManyAttributes)?;
                slot
            }
        };
        bindings.entries.push((name.to_string(), semantic));
    }

    Ok(bindings)
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.bytes();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == b'_' => chars.all(is_ident_byte),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use VertexAttributeSemantic as S;

    #[test]
    fn test_known_names() {
        let vs = "attribute vec3 vertex_position;\nattribute vec4 vertex_color;\nvoid main() {}";
        let attribs = collect_attribs(vs).unwrap();
        assert_eq!(attribs.len(), 2);
        assert_eq!(attribs.get("vertex_position"), Some(S::Position));
        assert_eq!(attribs.get("vertex_color"), Some(S::Color));
    }

    #[test]
    fn test_generic_slots_in_first_seen_order() {
        let vs = "attribute vec2 aUv;\n\
                  attribute vec3 vertex_normal;\n\
                  attribute float aWeight;\n\
                  attribute vec4 aExtra;\n";
        let attribs = collect_attribs(vs).unwrap();
        let order: Vec<_> = attribs.iter().collect();
        assert_eq!(
            order,
            vec![
                ("aUv", S::Attr(0)),
                ("vertex_normal", S::Normal),
                ("aWeight", S::Attr(1)),
                ("aExtra", S::Attr(2)),
            ]
        );
    }

    #[test]
    fn test_duplicate_keeps_first_slot() {
        let vs = "attribute vec2 a;\nattribute vec2 b;\nattribute vec2 a;\n";
        let attribs = collect_attribs(vs).unwrap();
        assert_eq!(attribs.len(), 2);
        assert_eq!(attribs.get("a"), Some(S::Attr(0)));
        assert_eq!(attribs.get("b"), Some(S::Attr(1)));
    }

    #[test]
    fn test_slash_prefixed_keyword_skipped() {
        let vs = "//attribute vec3 ignored;\nattribute vec3 vertex_position;\n";
        let attribs = collect_attribs(vs).unwrap();
        assert_eq!(attribs.len(), 1);
        assert!(attribs.get("ignored").is_none());
    }

    #[test]
    fn test_spaced_line_comment_is_not_filtered() {
        // Only a '/' immediately before the keyword is recognised.
        let vs = "// attribute vec3 stale;\nattribute vec3 vertex_position;\n";
        let attribs = collect_attribs(vs).unwrap();
        assert_eq!(attribs.get("stale"), Some(S::Attr(0)));
    }

    #[test]
    fn test_keyword_inside_identifier_ignored() {
        let vs = "uniform float attributeScale;\nattribute vec3 vertex_position;\n";
        let attribs = collect_attribs(vs).unwrap();
        assert_eq!(attribs.len(), 1);
    }

    #[test]
    fn test_precision_qualifier_and_trailing_space() {
        let vs = "attribute highp vec3 vertex_position ;\n";
        let attribs = collect_attribs(vs).unwrap();
        assert_eq!(attribs.get("vertex_position"), Some(S::Position));
    }

    #[test]
    fn test_missing_terminator() {
        let vs = "void main() {}\nattribute vec3 vertex_position\n";
        assert_eq!(
            collect_attribs(vs),
            Err(AttributeParseError::MissingTerminator { offset: 15 })
        );
    }

    #[rstest]
    #[case::array("attribute vec4 weights[2];")]
    #[case::no_name("attribute ;")]
    #[case::numeric("attribute vec4 1abc;")]
    fn test_invalid_names(#[case] vs: &str) {
        assert!(matches!(
            collect_attribs(vs),
            Err(AttributeParseError::InvalidName { offset: 0, .. })
        ));
    }

    #[rstest]
    #[case("vertex_texCoord0", S::TexCoord0)]
    #[case("vertex_texCoord7", S::TexCoord7)]
    #[case("vertex_tangent", S::Tangent)]
    #[case("vertex_boneIndices", S::BlendIndices)]
    #[case("vertex_boneWeights", S::BlendWeight)]
    fn test_known_table(#[case] name: &str, #[case] semantic: S) {
        assert_eq!(known_semantic(name), Some(semantic));
    }

    #[test]
    fn test_no_attributes() {
        assert!(collect_attribs("void main() {}").unwrap().is_empty());
    }
}
