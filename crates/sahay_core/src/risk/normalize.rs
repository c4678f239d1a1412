//! Input normalization for indicator matching.
//!
//! Matching operates on a canonical form of the message:
//! - Unicode lowercase.
//! - Common Latin diacritics folded to their ASCII base (`é` -> `e`), so
//!   accented transliterations match the plain phrase lists.
//! - Apostrophes dropped entirely (`can't` -> `cant`).
//! - Whitespace and punctuation runs collapsed to a single space; leading
//!   and trailing separators removed.
//!
//! Non-Latin text (e.g. Devanagari, including its combining vowel signs)
//! passes through unchanged. Normalization is pure and deterministic;
//! indicator phrases are stored pre-normalized so a phrase can be matched
//! by `str::find` against this form directly.

/// Produce the canonical matching form of a message.
///
/// Whitespace-only and punctuation-only inputs normalize to the empty
/// string.
pub fn normalize_message(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;
    for ch in input.chars() {
        for lower in ch.to_lowercase() {
            if is_apostrophe(lower) {
                continue;
            }
            if is_separator(lower) {
                pending_space = true;
                continue;
            }
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(fold_diacritic(lower));
        }
    }
    out
}

fn is_apostrophe(ch: char) -> bool {
    matches!(ch, '\'' | '`' | '\u{2018}' | '\u{2019}')
}

/// Separators collapse to a single space. Anything not listed here is
/// kept verbatim, which preserves combining marks in Devanagari text.
fn is_separator(ch: char) -> bool {
    ch.is_whitespace()
        || ch.is_ascii_punctuation()
        || matches!(
            ch,
            '\u{0964}' | '\u{0965}' | '—' | '–' | '…' | '“' | '”' | '„' | '«' | '»' | '¿' | '¡'
        )
}

/// Fold common Latin diacritics to their ASCII base letter.
///
/// Deliberately a fixed table rather than full Unicode decomposition: the
/// domain mixes English, Hindi, and Hinglish, and the phrase lists only
/// need accent-insensitivity over the Latin range.
fn fold_diacritic(ch: char) -> char {
    match ch {
        'à' | 'á' | 'â' | 'ä' | 'ã' | 'å' | 'ā' | 'ă' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' => 'e',
        'ì' | 'í' | 'î' | 'ï' | 'ī' => 'i',
        'ñ' | 'ń' => 'n',
        'ò' | 'ó' | 'ô' | 'ö' | 'õ' | 'ø' | 'ō' => 'o',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' => 'u',
        'ý' | 'ÿ' => 'y',
        'š' | 'ś' => 's',
        'ž' | 'ź' | 'ż' => 'z',
        other => other,
    }
}
