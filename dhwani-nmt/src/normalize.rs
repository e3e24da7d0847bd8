//! Text normalization for the seq2seq translator.
//!
//! Canonicalizes raw input into the tokenizable form the model was trained
//! on: accent-stripped, lowercased, punctuation split into its own tokens,
//! everything outside the allowed character set replaced by whitespace, and
//! the whole sentence wrapped in `<start>`/`<end>` markers.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Start-of-sequence marker.
pub const START_TOKEN: &str = "<start>";

/// End-of-sequence marker.
pub const END_TOKEN: &str = "<end>";

/// Punctuation kept as standalone tokens.
const PUNCTUATION: [char; 5] = ['?', '.', '!', ',', '¿'];

/// Devanagari spacing signs (category Mc): visarga and the spacing vowel
/// signs. Combining marks, but not accents, and the model vocabulary
/// contains words spelled with them.
fn is_spacing_sign(c: char) -> bool {
    matches!(
        c,
        '\u{0903}' | '\u{093b}' | '\u{093e}'..='\u{0940}' | '\u{0949}'..='\u{094c}' | '\u{094e}'..='\u{094f}'
    )
}

/// Strip accents by NFD decomposition, discarding non-spacing marks.
fn strip_accents(text: &str) -> String {
    text.nfd()
        .filter(|&c| !is_combining_mark(c) || is_spacing_sign(c))
        .collect()
}

/// Characters that survive normalization: Latin letters, the Devanagari
/// block, and the punctuation set.
fn is_allowed(c: char) -> bool {
    c.is_ascii_alphabetic() || ('\u{0900}'..='\u{097f}').contains(&c) || PUNCTUATION.contains(&c)
}

/// Normalize raw text into a tokenizable, marker-wrapped sentence.
///
/// Infallible; empty input yields `"<start>  <end>"`.
pub fn normalize(text: &str) -> String {
    let lowered = strip_accents(&text.to_lowercase());

    let mut spaced = String::with_capacity(lowered.len() + 16);
    for c in lowered.trim().chars() {
        if PUNCTUATION.contains(&c) {
            spaced.push(' ');
            spaced.push(c);
            spaced.push(' ');
        } else if is_allowed(c) {
            spaced.push(c);
        } else {
            // Anything disallowed, whitespace included, collapses below
            spaced.push(' ');
        }
    }

    let collapsed = spaced.split_whitespace().collect::<Vec<_>>().join(" ");

    format!("{START_TOKEN} {collapsed} {END_TOKEN}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_with_markers() {
        let out = normalize("hello there");
        assert!(out.starts_with("<start> "));
        assert!(out.ends_with(" <end>"));
        assert_eq!(out, "<start> hello there <end>");
    }

    #[test]
    fn empty_input_yields_bare_markers() {
        assert_eq!(normalize(""), "<start>  <end>");
        assert_eq!(normalize("   "), "<start>  <end>");
    }

    #[test]
    fn strips_accents_and_lowercases() {
        assert_eq!(normalize("¿Cómo Estás?"), "<start> ¿ como estas ? <end>");
    }

    #[test]
    fn spaces_punctuation() {
        assert_eq!(normalize("wait,now!"), "<start> wait , now ! <end>");
    }

    #[test]
    fn replaces_disallowed_characters_with_space() {
        assert_eq!(normalize("hello123world"), "<start> hello world <end>");
        assert_eq!(normalize("a\tb\nc"), "<start> a b c <end>");
    }

    #[test]
    fn keeps_devanagari_letters() {
        assert_eq!(normalize("घर चल"), "<start> घर चल <end>");
    }

    #[test]
    fn keeps_devanagari_vowel_signs() {
        assert_eq!(normalize("जा"), "<start> जा <end>");
        // U+0947 is non-spacing and goes, U+094B and U+093E are spacing and stay
        assert_eq!(normalize("मेरो नाम"), "<start> मरो नाम <end>");
    }

    #[test]
    fn drops_nonspacing_marks() {
        // The nukta and the u-matra decompose to non-spacing marks
        assert_eq!(normalize("ज़"), "<start> ज <end>");
        assert_eq!(normalize("सुन"), "<start> सन <end>");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(normalize("a    b"), "<start> a b <end>");
    }
}
