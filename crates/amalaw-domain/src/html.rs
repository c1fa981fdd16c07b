//! HTML entity unescaping for comment bodies.
//!
//! The HN API serves comment text with a small fixed set of entity
//! references. Only those are decoded; anything else passes through.

/// Entities decoded before `&amp;`.
const ENTITIES: [(&str, &str); 8] = [
    ("&quot;", "\""),
    ("&apos;", "'"),
    ("&#x27;", "'"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&#x2F;", "/"),
    ("&#x60;", "`"),
    ("&#x3D;", "="),
];

/// Replace known HTML entity references with their literal characters.
///
/// `&amp;` is unescaped last: a literal `&amp;lt;` in the source must decode
/// to `&lt;`, not `<`.
pub fn unescape(text: &str) -> String {
    let mut out = text.to_string();
    for (entity, literal) in ENTITIES {
        if out.contains(entity) {
            out = out.replace(entity, literal);
        }
    }
    out.replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_quotes_and_ampersand() {
        assert_eq!(
            unescape("&quot;Hello&quot; &amp; goodbye"),
            "\"Hello\" & goodbye"
        );
    }

    #[test]
    fn test_unescape_all_entities() {
        assert_eq!(
            unescape("&apos;&#x27;&lt;&gt;&#x2F;&#x60;&#x3D;"),
            "''<>/`="
        );
    }

    #[test]
    fn test_amp_unescaped_last() {
        // A double-encoded entity decodes one level, not two.
        assert_eq!(unescape("&amp;lt;"), "&lt;");
        assert_eq!(unescape("&amp;amp;"), "&amp;");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(unescape("no entities here"), "no entities here");
    }

    #[test]
    fn test_empty() {
        assert_eq!(unescape(""), "");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn identity_on_entity_free_text(s in "[a-zA-Z0-9 .,!?'\"<>/=-]*") {
                prop_assert_eq!(unescape(&s), s.clone());
            }

            #[test]
            fn never_panics(s in ".*") {
                let _ = unescape(&s);
            }
        }
    }
}
