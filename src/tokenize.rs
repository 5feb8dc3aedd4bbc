//! Parsing of pre-segmented, pre-tagged corpus lines.

const TOKEN_DELIMITER: &str = "  ";
const TAG_SEPARATOR: char = '/';

/// Extract the ordered surface words from one tagged corpus line.
///
/// Tokens are separated by a two-space delimiter and carry a `/TAG` suffix;
/// `[` and `]` mark multi-word named-entity spans and are stripped. A token
/// without a tag separator is discarded without affecting its neighbors.
pub fn surface_words(line: &str) -> Vec<String> {
    let line = line.trim();
    if line.is_empty() {
        return Vec::new();
    }
    line.split(TOKEN_DELIMITER).filter_map(surface_of).collect()
}

fn surface_of(token: &str) -> Option<String> {
    if token.is_empty() {
        return None;
    }
    let (surface, _tag) = token.split_once(TAG_SEPARATOR)?;
    Some(surface.replace(['[', ']'], ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_double_space_and_strips_tags() {
        assert_eq!(surface_words("中国/ns  人民/n"), vec!["中国", "人民"]);
    }

    #[test]
    fn strips_entity_span_brackets() {
        assert_eq!(
            surface_words("[北京]/ns  天安门/n  广场/n"),
            vec!["北京", "天安门", "广场"]
        );
    }

    #[test]
    fn drops_tokens_without_a_tag_separator() {
        assert_eq!(
            surface_words("中国/ns  badtoken  人民/n"),
            vec!["中国", "人民"]
        );
    }

    #[test]
    fn blank_lines_have_no_tokens() {
        assert!(surface_words("").is_empty());
        assert!(surface_words("   \t").is_empty());
    }

    #[test]
    fn keeps_a_word_with_an_empty_tag() {
        assert_eq!(surface_words("中国/"), vec!["中国"]);
    }

    #[test]
    fn bracket_only_token_yields_an_empty_surface() {
        // the empty word still counts as an occurrence; every validity check
        // rejects it downstream
        assert_eq!(surface_words("[/w"), vec![""]);
    }
}
