use pantry::core::completion::{apply_completion, compute_context};
use pantry::core::lexer::{TokenKind, tokenize};
use pantry::core::names::NameSet;
use pantry::core::query::parse_query;
use proptest::prelude::*;

/// Strings dense in Cooklang markup characters
const MARKUP: &str = "[a-z @#~{}%:>\\[\\]\\-\n\r]{0,80}";

proptest! {
    #[test]
    fn tokens_cover_all(input in ".*") {
        let tokens = tokenize(&input);
        let joined: String = tokens.iter().map(|t| t.text).collect();
        prop_assert_eq!(&joined, &input);
        if let (Some(first), Some(last)) = (tokens.first(), tokens.last()) {
            prop_assert_eq!(first.start, 0);
            prop_assert_eq!(last.end(), input.len());
        }
        for w in tokens.windows(2) {
            prop_assert_eq!(w[0].end(), w[1].start);
        }
    }

    #[test]
    fn markup_tokens_cover_all(input in MARKUP) {
        let tokens = tokenize(&input);
        let joined: String = tokens.iter().map(|t| t.text).collect();
        prop_assert_eq!(&joined, &input);
        for token in &tokens {
            prop_assert_eq!(&input[token.start..token.end()], token.text);
            match token.kind {
                TokenKind::Ingredient => prop_assert!(token.text.starts_with('@')),
                TokenKind::Cookware => prop_assert!(token.text.starts_with('#')),
                TokenKind::Timer => prop_assert!(token.text.starts_with('~')),
                TokenKind::MetadataKey => prop_assert!(token.text.starts_with(">>")),
                _ => {}
            }
        }
    }

    #[test]
    fn extracted_names_are_clean(input in MARKUP) {
        let names = NameSet::extract(&input);
        for name in names.ingredients.iter().chain(&names.cookware) {
            prop_assert!(!name.is_empty());
            prop_assert_eq!(name.trim(), name.as_str());
            let has_brace = name.contains('{');
            prop_assert!(!has_brace, "name {:?} contains a brace", name);
            prop_assert!(!name.contains('\n'));
        }
    }

    #[test]
    fn context_is_total(input in MARKUP, cursor in 0usize..100) {
        if let Some(ctx) = compute_context(&input, cursor) {
            let cursor = cursor.min(input.len());
            prop_assert!(ctx.trigger_index < cursor);
            prop_assert!(input[ctx.trigger_index..].starts_with(ctx.trigger.as_char()));
            let has_brace = ctx.query.contains('{');
            prop_assert!(!has_brace, "query {:?} contains a brace", ctx.query);
            prop_assert!(!ctx.query.contains('\n'));
        }
    }

    #[test]
    fn completion_keeps_surroundings(
        prefix in "[a-z ]{0,10}",
        query in "[a-z]{0,6}",
        suffix in "[a-z .,]{0,10}",
        chosen in "[a-z]{1,8}( [a-z]{1,8})?",
    ) {
        let text = format!("{} @{}", prefix, query);
        let cursor = text.len();
        let text = format!("{}{}", text, suffix);
        let ctx = compute_context(&text, cursor);
        prop_assert!(ctx.is_some());
        let Some(ctx) = ctx else { return Ok(()) };

        let (new_text, new_cursor) = apply_completion(&text, cursor, &ctx, &chosen);
        prop_assert!(new_text.starts_with(&text[..ctx.trigger_index]));
        prop_assert!(new_text.ends_with(&text[cursor..]));
        prop_assert!(new_text[..new_cursor].ends_with(&chosen));
        prop_assert_eq!(new_text[new_cursor..].starts_with("{}"), chosen.contains(' '));
    }

    #[test]
    fn query_terms_are_trimmed(input in ".*") {
        for term in parse_query(&input) {
            prop_assert!(!term.is_empty());
            prop_assert_eq!(term.trim(), term.as_str());
        }
    }
}
