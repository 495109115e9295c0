//! Search term derivation.
//!
//! Turns the trimmed user query into the text handed to the PostgreSQL text-search
//! constructor selected by [`SearchMode`]. The term is always bound as a parameter.

use super::SearchMode;

pub(super) fn derive_search_term(mode: SearchMode, raw: &str) -> String {
    let trimmed = raw.trim();
    match mode {
        SearchMode::Prefix => prefix_term(trimmed),
        SearchMode::WebSearch | SearchMode::Plain => trimmed.to_string(),
    }
}

/// Build a `to_tsquery` expression that ANDs every lexeme and lets the last one match
/// as a prefix: `"red ca"` becomes `"red & ca:*"`.
///
/// Anything that is not alphanumeric separates lexemes, so tsquery operators in user
/// input (`&`, `|`, `!`, `:`, parentheses, quotes) never reach the parser.
fn prefix_term(input: &str) -> String {
    let lexemes: Vec<&str> = input
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect();

    let Some((last, rest)) = lexemes.split_last() else {
        return String::new();
    };

    let mut out = String::with_capacity(input.len() + 2 + rest.len() * 3);
    for lexeme in rest {
        out.push_str(lexeme);
        out.push_str(" & ");
    }
    out.push_str(last);
    out.push_str(":*");
    out
}
