/// Keywords that flag a message when they appear as standalone words.
pub const SPOILER_KEYWORDS: &[&str] = &[
    "spoiler",
    "spoilers",
    "ending",
    "reveal",
    "twist",
    "surprise ending",
];

/// Markup tags members already use to flag their own spoilers.
pub const SPOILER_TAGS: &[&str] = &["[spoiler]", "#spoiler"];

/// Lexical spoiler check over lowercased text.
///
/// Multi-word keywords and tags match as substrings; single words must match
/// a whole token (with edge punctuation stripped) so that "revealing" does
/// not trip the "reveal" keyword.
pub fn classify(text: &str) -> bool {
    let lowered = text.to_lowercase();

    if SPOILER_TAGS.iter().any(|tag| lowered.contains(tag)) {
        return true;
    }

    SPOILER_KEYWORDS.iter().any(|keyword| {
        if keyword.contains(' ') {
            lowered.contains(keyword)
        } else {
            lowered
                .split_whitespace()
                .map(strip_edge_punctuation)
                .any(|token| token == *keyword)
        }
    })
}

fn strip_edge_punctuation(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric())
}
