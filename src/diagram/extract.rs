// src/diagram/extract.rs
// =============================================================================
// Pulls the diagram code out of whatever the LLM wrapped it in.
//
// Models are told to answer with raw Mermaid, but often add a markdown
// fence anyway. In order of preference:
// 1. a ```mermaid fenced block       -> its content (tag must end there,
//                                       so ```mermaidjs is not one)
// 2. any other ``` fenced block      -> the first one's content (minus tag)
// 3. no fence at all                 -> the whole text
// Whatever we return is trimmed.
// =============================================================================

const FENCE: &str = "```";
const MERMAID_FENCE: &str = "```mermaid";

pub fn extract_diagram(text: &str) -> String {
    if let Some(body) = mermaid_body(text) {
        let body = body.find(FENCE).map_or(body, |end| &body[..end]);
        return body.trim().to_string();
    }

    if let Some(start) = text.find(FENCE) {
        let body = &text[start + FENCE.len()..];
        let body = body.find(FENCE).map_or(body, |end| &body[..end]);
        return strip_language_tag(body).trim().to_string();
    }

    text.trim().to_string()
}

/// Text right after the first ```mermaid tag that ends at whitespace or EOF
fn mermaid_body(text: &str) -> Option<&str> {
    text.match_indices(MERMAID_FENCE)
        .map(|(start, _)| &text[start + MERMAID_FENCE.len()..])
        .find(|rest| rest.chars().next().map_or(true, char::is_whitespace))
}

/// Drops an info string like "text" or "mmd" right after the opening fence
///
/// Only a single word followed by a newline counts; content that starts on
/// the fence line itself (e.g. ```graph TD) is left alone.
fn strip_language_tag(body: &str) -> &str {
    match body.split_once('\n') {
        Some((first, rest))
            if !first.trim().is_empty()
                && first
                    .trim()
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') =>
        {
            rest
        }
        _ => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_mermaid_fence() {
        let text = "Here you go:\n```mermaid\ngraph TD\n  A --> B\n```\nEnjoy!";
        let diagram = extract_diagram(text);
        assert_eq!(diagram, "graph TD\n  A --> B");
        assert!(!diagram.contains("```"));
        assert!(!diagram.contains("mermaid"));
    }

    #[test]
    fn test_mermaid_fence_preferred_over_earlier_fence() {
        let text = "```bash\nls\n```\n```mermaid\ngraph TD\nA-->B\n```";
        assert_eq!(extract_diagram(text), "graph TD\nA-->B");
    }

    #[test]
    fn test_extract_plain_fence() {
        let text = "```\ngraph TD\n  A --> B\n```";
        assert_eq!(extract_diagram(text), "graph TD\n  A --> B");
    }

    #[test]
    fn test_extract_plain_fence_with_other_tag() {
        let text = "```text\ngraph TD\n  A --> B\n```";
        assert_eq!(extract_diagram(text), "graph TD\n  A --> B");
    }

    #[test]
    fn test_longer_tag_is_not_a_mermaid_fence() {
        let text = "```mermaidjs\ngraph TD\n  A --> B\n```";
        assert_eq!(extract_diagram(text), "graph TD\n  A --> B");
    }

    #[test]
    fn test_mermaid_fence_after_longer_tag() {
        let text = "```mermaidjs\nold\n```\n```mermaid\ngraph TD\n```";
        assert_eq!(extract_diagram(text), "graph TD");
    }

    #[test]
    fn test_unterminated_fence_takes_rest() {
        let text = "```mermaid\ngraph TD\n  A --> B\n";
        assert_eq!(extract_diagram(text), "graph TD\n  A --> B");
    }

    #[test]
    fn test_no_fence_is_trimmed() {
        let text = "\n\n  graph TD\n  A --> B  \n";
        assert_eq!(extract_diagram(text), "graph TD\n  A --> B");
    }
}
