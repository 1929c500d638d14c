//! SAN helpers: movetext extraction and lenient move comparison.

use regex::Regex;
use std::sync::LazyLock;

static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[^}]*\}").unwrap());
static VARIATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").unwrap());
static MOVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"O-O-O[+#]?|O-O[+#]?|[KQRBN]?[a-h]?[1-8]?x?[a-h][1-8](?:=[QRBN])?[+#]?").unwrap()
});

/// Extract SAN moves from movetext such as `"1. e4 e5 2. Nf3 {book} Nc6 (2... d6) 1-0"`.
/// Comments and parenthesised side lines are dropped.
pub fn extract_moves(movetext: &str) -> Vec<String> {
    let no_comments = COMMENT_RE.replace_all(movetext, "");
    let no_variations = VARIATION_RE.replace_all(&no_comments, "");

    MOVE_RE
        .find_iter(&no_variations)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Canonical comparison form: trimmed, lowercase, no check/mate/annotation marks.
pub fn normalize_san(san: &str) -> String {
    san.trim()
        .trim_end_matches(['+', '#', '!', '?'])
        .to_ascii_lowercase()
}

/// Whether a played SAN answers the expected one.
pub fn san_matches(played: &str, expected: &str) -> bool {
    let expected = normalize_san(expected);
    !expected.is_empty() && normalize_san(played) == expected
}

/// Format a line as numbered movetext: `1. e4 e5 2. Nf3`.
pub fn format_line(moves: &[String]) -> String {
    let mut out = String::new();
    for (i, san) in moves.iter().enumerate() {
        if i % 2 == 0 {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&format!("{}. {}", i / 2 + 1, san));
        } else {
            out.push(' ');
            out.push_str(san);
        }
    }
    out
}
