//! Ingredient search phrases
//!
//! Splits `tomato garlic "olive oil"` into `["tomato", "garlic", "olive oil"]`.
//! Quotes (`"` or `'`) group words; the other quote character is literal
//! inside a quoted run.

/// Parse a search phrase into lowercase query terms, in typing order
pub fn parse_query(input: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut current = String::new();
    let mut in_quote: Option<char> = None;

    for ch in input.trim().chars() {
        match in_quote {
            Some(quote) if ch == quote => {
                flush(&mut current, &mut terms);
                in_quote = None;
            }
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                flush(&mut current, &mut terms);
                in_quote = Some(ch);
            }
            None if ch == ' ' => flush(&mut current, &mut terms),
            None => current.push(ch),
        }
    }
    flush(&mut current, &mut terms);

    terms
}

fn flush(current: &mut String, terms: &mut Vec<String>) {
    let term = current.trim().to_lowercase();
    if !term.is_empty() {
        terms.push(term);
    }
    current.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_phrase() {
        assert_eq!(
            parse_query(r#"tomato garlic "olive oil""#),
            vec!["tomato", "garlic", "olive oil"]
        );
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(parse_query(r#"soup "cream"#), vec!["soup", "cream"]);
    }

    #[test]
    fn test_mismatched_quote_is_literal() {
        assert_eq!(
            parse_query(r#""chef's knife" salt"#),
            vec!["chef's knife", "salt"]
        );
    }

    #[test]
    fn test_quote_flushes_pending_word() {
        assert_eq!(parse_query("basil'sweet pea'"), vec!["basil", "sweet pea"]);
    }

    #[test]
    fn test_lowercases_and_keeps_duplicates() {
        assert_eq!(parse_query("  Salt  SALT "), vec!["salt", "salt"]);
    }

    #[test]
    fn test_blank_input() {
        assert!(parse_query("").is_empty());
        assert!(parse_query("   ").is_empty());
        assert!(parse_query(r#""  ""#).is_empty());
    }

    #[test]
    fn test_tabs_are_not_separators() {
        // Only spaces split; the tab stays inside the term and survives trim
        assert_eq!(parse_query("a\tb c"), vec!["a\tb", "c"]);
    }
}
