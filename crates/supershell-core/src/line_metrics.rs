#![forbid(unsafe_code)]

//! Row and column measurement for text printed at a given terminal width.
//!
//! All measurements ignore SGR colors and cursor-movement sequences: text is
//! stripped before its display width is taken, so a colored line occupies
//! exactly as many rows as its plain rendering.

use unicode_width::UnicodeWidthStr;

/// Remove color and cursor-movement escape sequences from `text`.
///
/// Line feeds are preserved; other control characters are dropped.
#[must_use]
pub fn strip_escapes(text: &str) -> String {
    if !text.contains('\x1b') && !text.contains('\r') {
        return text.to_owned();
    }
    strip_ansi_escapes::strip_str(text)
}

/// Display width of `text` in cells, after stripping escape sequences.
#[inline]
#[must_use]
pub fn display_width(text: &str) -> usize {
    strip_escapes(text).width()
}

/// Number of terminal rows `text` occupies at `width` columns.
///
/// Each `\n`-separated piece of display width `w > 0` wraps onto
/// `ceil(w / width)` rows. A carriage return rewrites its piece from column
/// 0, so only the text after the last `\r` of a piece is measured. Empty
/// pieces contribute no rows, so a freshly started line that has not printed
/// anything yet costs nothing. A width of 0 (unknown terminal size) yields 0.
#[must_use]
pub fn line_count(text: &str, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    text.split('\n')
        .map(|piece| {
            let visible = piece.rsplit('\r').next().unwrap_or(piece);
            display_width(visible).div_ceil(width)
        })
        .sum()
}

/// Height and trailing column of the cursor after printing `text`.
///
/// Only the part after the last carriage return or line feed matters, since
/// either one sends the cursor back to column 0. Returns `(rows, column)`
/// where `column` is the cursor position on the final row, or `(0, 0)` when
/// nothing visible was printed or the width is unknown.
#[must_use]
pub fn line_height_and_width(text: &str, width: usize) -> (usize, usize) {
    if width == 0 {
        return (0, 0);
    }
    let tail = text.rsplit(['\r', '\n']).next().unwrap_or(text);
    let position = display_width(tail);
    if position == 0 {
        return (0, 0);
    }
    let height = position.div_ceil(width);
    (height, position - (height - 1) * width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_escapes_removes_sgr() {
        assert_eq!(strip_escapes("\x1b[31mred\x1b[0m"), "red");
    }

    #[test]
    fn strip_escapes_removes_cursor_moves() {
        assert_eq!(strip_escapes("\x1b[2K\x1b[1Gdone"), "done");
    }

    #[test]
    fn strip_escapes_plain_text_untouched() {
        assert_eq!(strip_escapes("plain text"), "plain text");
    }

    #[test]
    fn line_count_short_line_is_one_row() {
        assert_eq!(line_count("hello", 80), 1);
    }

    #[test]
    fn line_count_empty_is_zero() {
        assert_eq!(line_count("", 80), 0);
    }

    #[test]
    fn line_count_wraps_long_line() {
        let text = "x".repeat(81);
        assert_eq!(line_count(&text, 80), 2);
        assert_eq!(line_count(&"x".repeat(80), 80), 1);
    }

    #[test]
    fn line_count_sums_embedded_newlines() {
        assert_eq!(line_count("ab\ncd\n", 10), 2);
        assert_eq!(line_count("ab\n\ncd", 10), 2);
    }

    #[test]
    fn line_count_ignores_colors() {
        let colored = format!("\x1b[32m{}\x1b[0m", "y".repeat(10));
        assert_eq!(line_count(&colored, 10), 1);
    }

    #[test]
    fn line_count_counts_wide_chars_double() {
        // Each CJK glyph is two cells wide.
        assert_eq!(line_count("日本語", 4), 2);
    }

    #[test]
    fn line_count_measures_text_after_carriage_return() {
        assert_eq!(line_count("50%\r60%", 3), 1);
        assert_eq!(line_count("downloading 10%\r\x1b[32mdone\x1b[0m", 10), 1);
        assert_eq!(line_count("abc\rde\nfghij\r", 4), 1);
    }

    #[test]
    fn line_count_unknown_width() {
        assert_eq!(line_count("hello", 0), 0);
    }

    #[test]
    fn height_and_width_of_prompt() {
        assert_eq!(line_height_and_width("> ", 80), (1, 2));
    }

    #[test]
    fn height_and_width_of_empty_line() {
        assert_eq!(line_height_and_width("", 80), (0, 0));
    }

    #[test]
    fn height_and_width_exact_fit() {
        let text = "z".repeat(80);
        assert_eq!(line_height_and_width(&text, 80), (1, 80));
    }

    #[test]
    fn height_and_width_wrapped_line() {
        let text = "z".repeat(85);
        assert_eq!(line_height_and_width(&text, 80), (2, 5));
    }

    #[test]
    fn height_and_width_uses_text_after_last_return() {
        assert_eq!(line_height_and_width("first line\nab", 80), (1, 2));
        assert_eq!(line_height_and_width("overwritten\rabc", 80), (1, 3));
    }
}
