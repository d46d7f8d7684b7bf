//! Line-wrap layout of styled words onto a fixed-width surface.
//!
//! Greedy word wrap with per-style measured widths. A word is measured as a
//! whole (all its runs plus one trailing space) and wraps *before* being
//! placed, so no word's runs ever split across two lines. No bidi, no
//! justification.

use crate::defaults;
use crate::overlay::highlight::{Style, StyledRun};

/// Measures rendered text for layout.
///
/// Implemented by the rendering surface's font handling; tests use
/// [`FixedWidthMeasure`].
pub trait TextMeasure {
    /// Width of `text` rendered in `style`.
    fn width(&self, style: Style, text: &str) -> f32;

    /// Vertical distance between two baselines of normal-style text,
    /// excluding the layout's extra padding.
    fn line_spacing(&self) -> f32;

    /// Width of one normal-style space.
    fn space_width(&self) -> f32 {
        self.width(Style::Normal, " ")
    }
}

/// Fixed-advance measure: every character is `advance` wide.
///
/// Matches a monospace terminal and keeps layout tests exact.
#[derive(Debug, Clone, Copy)]
pub struct FixedWidthMeasure {
    pub advance: f32,
    pub line: f32,
}

impl Default for FixedWidthMeasure {
    fn default() -> Self {
        Self {
            advance: 1.0,
            line: 1.0,
        }
    }
}

impl TextMeasure for FixedWidthMeasure {
    fn width(&self, _style: Style, text: &str) -> f32 {
        text.chars().count() as f32 * self.advance
    }

    fn line_spacing(&self) -> f32 {
        self.line
    }
}

/// One run placed at a horizontal offset within its line.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRun {
    pub run: StyledRun,
    pub x: f32,
}

/// One wrapped line: a y offset plus its placed runs in reading order.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutLine {
    pub y: f32,
    pub runs: Vec<PlacedRun>,
}

/// Lays out styled words starting at `(x0, y0)` within `max_width`.
///
/// Line height is the measure's line spacing plus the fixed padding
/// constant. Words wider than `max_width` still occupy a line of their own
/// starting at `x0` rather than being split.
pub fn layout_words(
    words: &[Vec<StyledRun>],
    x0: f32,
    y0: f32,
    max_width: f32,
    measure: &dyn TextMeasure,
) -> Vec<LaidOutLine> {
    let line_height = measure.line_spacing() + defaults::LINE_PADDING;
    let space = measure.space_width();

    let mut lines: Vec<LaidOutLine> = Vec::new();
    let mut current = LaidOutLine {
        y: y0,
        runs: Vec::new(),
    };
    let mut x = x0;

    for word in words {
        let word_width: f32 = word
            .iter()
            .map(|run| measure.width(run.style, &run.text))
            .sum::<f32>()
            + space;

        // Wrap before placing, so the word lands whole on the next line
        if x + word_width > x0 + max_width {
            let y = current.y;
            if !current.runs.is_empty() {
                lines.push(current);
            }
            current = LaidOutLine {
                y: y + line_height,
                runs: Vec::new(),
            };
            x = x0;
        }

        for run in word {
            let run_width = measure.width(run.style, &run.text);
            current.runs.push(PlacedRun {
                run: run.clone(),
                x,
            });
            x += run_width;
        }
        x += space;
    }

    if !current.runs.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::highlight::StyledRun;

    fn word(text: &str) -> Vec<StyledRun> {
        vec![StyledRun::normal(text)]
    }

    fn measure() -> FixedWidthMeasure {
        FixedWidthMeasure {
            advance: 1.0,
            line: 10.0,
        }
    }

    #[test]
    fn test_words_flow_left_to_right() {
        // "ab cd": widths 2+1 space, second word starts at x=3
        let lines = layout_words(&[word("ab"), word("cd")], 0.0, 0.0, 100.0, &measure());

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].runs[0].x, 0.0);
        assert_eq!(lines[0].runs[1].x, 3.0);
    }

    #[test]
    fn test_wrap_starts_word_at_x0_on_new_line() {
        // max_width 8: "abc " (4) + "def " (4) fills the line; "ghi" wraps
        let words = vec![word("abc"), word("def"), word("ghi")];
        let lines = layout_words(&words, 5.0, 2.0, 8.0, &measure());

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].runs[0].x, 5.0, "wrapped word starts at x0");
        assert_eq!(lines[1].runs[0].run.text, "ghi");
    }

    #[test]
    fn test_line_height_is_spacing_plus_padding() {
        let words = vec![word("abcdef"), word("ghijkl")];
        let lines = layout_words(&words, 0.0, 0.0, 7.0, &measure());

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].y - lines[0].y, 10.0 + crate::defaults::LINE_PADDING);
    }

    #[test]
    fn test_word_runs_never_split_across_lines() {
        // A three-run highlighted word near the wrap point stays together
        let highlighted = vec![
            StyledRun::normal("al"),
            StyledRun::emphasized("or"),
            StyledRun::normal("s"),
        ];
        let words = vec![word("aaaa"), highlighted.clone(), word("bb")];
        let lines = layout_words(&words, 0.0, 0.0, 8.0, &measure());

        for line in &lines {
            let texts: Vec<&str> = line.runs.iter().map(|r| r.run.text.as_str()).collect();
            if texts.contains(&"or") {
                // All three runs of the highlighted word share the line
                assert!(texts.contains(&"al"));
                assert!(texts.contains(&"s"));
            }
        }
    }

    #[test]
    fn test_oversized_word_occupies_own_line_unsplit() {
        let words = vec![word("ab"), word("enormousword"), word("cd")];
        let lines = layout_words(&words, 0.0, 0.0, 6.0, &measure());

        let long_line = lines
            .iter()
            .find(|l| l.runs.iter().any(|r| r.run.text == "enormousword"))
            .unwrap();
        assert_eq!(long_line.runs.len(), 1);
        assert_eq!(long_line.runs[0].x, 0.0);
    }

    #[test]
    fn test_oversized_first_word_wraps_before_placement() {
        // The wrap test runs even for the first word: it lands at x0, one
        // line height down, and is never split.
        let lines = layout_words(&[word("enormousword")], 1.0, 3.0, 4.0, &measure());

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].y, 3.0 + 10.0 + crate::defaults::LINE_PADDING);
        assert_eq!(lines[0].runs[0].x, 1.0);
    }

    #[test]
    fn test_empty_input_yields_no_lines() {
        let lines = layout_words(&[], 0.0, 0.0, 10.0, &measure());
        assert!(lines.is_empty());
    }

    #[test]
    fn test_emphasized_width_uses_style() {
        // A measure that renders emphasized text double-width must push the
        // following run further right.
        struct BoldWide;
        impl TextMeasure for BoldWide {
            fn width(&self, style: Style, text: &str) -> f32 {
                let base = text.chars().count() as f32;
                match style {
                    Style::Normal => base,
                    Style::Emphasized => base * 2.0,
                }
            }
            fn line_spacing(&self) -> f32 {
                10.0
            }
        }

        let highlighted = vec![StyledRun::emphasized("or"), StyledRun::normal("s")];
        let lines = layout_words(&[highlighted], 0.0, 0.0, 100.0, &BoldWide);
        assert_eq!(lines[0].runs[1].x, 4.0);
    }
}
