#![forbid(unsafe_code)]

//! Display-width aware wrapping and truncation.
//!
//! Step descriptions contain `÷` and `×` and the prompts contain `→`, so byte
//! length is not the column count. Widths come from `unicode-width`, iteration is by grapheme.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Terminal column width of `text`.
#[inline]
#[must_use]
pub fn display_width(text: &str) -> usize {
    if text.is_ascii() && text.bytes().all(|b| (0x20..0x7f).contains(&b)) {
        return text.len();
    }
    text.width()
}

/// Word-wrap `text` to `width` columns. Words longer than a line are broken
/// at grapheme boundaries.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = display_width(word);
        let gap = usize::from(!current.is_empty());

        if current_width + gap + word_width <= width {
            if gap == 1 {
                current.push(' ');
            }
            current.push_str(word);
            current_width += gap + word_width;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width <= width {
            current.push_str(word);
            current_width = word_width;
            continue;
        }

        for grapheme in word.graphemes(true) {
            let grapheme_width = display_width(grapheme);
            if current_width + grapheme_width > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push_str(grapheme);
            current_width += grapheme_width;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Cut `text` so it fits in `max_width` columns.
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for grapheme in text.graphemes(true) {
        let grapheme_width = display_width(grapheme);
        if current_width + grapheme_width > max_width {
            break;
        }
        result.push_str(grapheme);
        current_width += grapheme_width;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_one_column_wide() {
        assert_eq!(display_width("84 ÷ 4"), 6);
        assert_eq!(display_width("2 × 4 = 8"), 9);
        assert_eq!(display_width("Press →"), 7);
    }

    #[test]
    fn wrap_keeps_short_text_on_one_line() {
        assert_eq!(wrap("Write 2 in the quotient", 40), vec!["Write 2 in the quotient"]);
    }

    #[test]
    fn wrap_breaks_between_words() {
        assert_eq!(
            wrap("How many times does 4 go into 8? Answer: 2", 20),
            vec!["How many times does", "4 go into 8? Answer:", "2"]
        );
    }

    #[test]
    fn wrap_measures_columns_not_bytes() {
        let lines = wrap("Multiply: 2 × 4 = 8", 12);
        assert_eq!(lines, vec!["Multiply: 2", "× 4 = 8"]);
        assert!(lines.iter().all(|l| display_width(l) <= 12));
    }

    #[test]
    fn wrap_splits_overlong_words() {
        assert_eq!(wrap("123456789", 4), vec!["1234", "5678", "9"]);
    }

    #[test]
    fn wrap_of_empty_text_is_one_empty_line() {
        assert_eq!(wrap("", 10), vec![String::new()]);
    }

    #[test]
    fn truncate_respects_width() {
        assert_eq!(truncate_to_width("84 ÷ 4", 4), "84 ÷");
        assert_eq!(truncate_to_width("abc", 10), "abc");
        assert_eq!(truncate_to_width("abc", 0), "");
    }
}
