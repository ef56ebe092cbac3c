//! Property-based invariant tests for row metrics.
//!
//! 1. A single piece occupies `ceil(width / columns)` rows.
//! 2. Row counts are additive across `\n`-separated pieces.
//! 3. SGR colors never change row counts or cursor positions.
//! 4. The cursor column lies in `1..=columns` and, with the height,
//!    reproduces the display width.
//! 5. Unknown width (0) measures nothing.

use proptest::prelude::*;
use supershell_core::line_metrics::{display_width, line_count, line_height_and_width};

fn colored(text: &str) -> String {
    format!("\x1b[1;32m{text}\x1b[0m")
}

proptest! {
    #[test]
    fn single_piece_rows(text in "[a-z ]{0,200}", columns in 1usize..120) {
        prop_assert_eq!(line_count(&text, columns), text.len().div_ceil(columns));
    }

    #[test]
    fn rows_add_across_pieces(
        pieces in prop::collection::vec("[a-z ]{0,90}", 1..8),
        columns in 1usize..120,
    ) {
        let joined = pieces.join("\n");
        let sum: usize = pieces.iter().map(|p| line_count(p, columns)).sum();
        prop_assert_eq!(line_count(&joined, columns), sum);
    }

    #[test]
    fn colors_are_invisible(text in "[a-z> ]{0,150}", columns in 1usize..120) {
        prop_assert_eq!(line_count(&colored(&text), columns), line_count(&text, columns));
        prop_assert_eq!(
            line_height_and_width(&colored(&text), columns),
            line_height_and_width(&text, columns)
        );
    }

    #[test]
    fn cursor_position_reproduces_width(
        prefix in "[a-z\n]{0,40}",
        tail in "[a-z ]{0,200}",
        columns in 1usize..120,
    ) {
        let text = format!("{prefix}\r{tail}");
        let (height, column) = line_height_and_width(&text, columns);
        let width = display_width(&tail);
        if width == 0 {
            prop_assert_eq!((height, column), (0, 0));
        } else {
            prop_assert!((1..=columns).contains(&column));
            prop_assert_eq!((height - 1) * columns + column, width);
        }
    }

    #[test]
    fn unknown_width_measures_nothing(text in "[a-z \n]{0,80}") {
        prop_assert_eq!(line_count(&text, 0), 0);
        prop_assert_eq!(line_height_and_width(&text, 0), (0, 0));
    }
}
