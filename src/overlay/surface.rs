//! Rendering surface abstraction and the terminal implementation.

use crate::error::Result;
use crate::overlay::highlight::Style;
use crate::overlay::layout::{FixedWidthMeasure, LaidOutLine, TextMeasure};
use owo_colors::OwoColorize;
use std::io::Write;

/// Accepts draw requests for laid-out text runs.
///
/// Geometry changes are picked up through `max_text_width()`: the view
/// re-queries it before every layout, so a resized surface gets a full
/// re-layout on the next frame.
pub trait RenderSurface {
    /// Maximum line width available for text, in measure units.
    fn max_text_width(&self) -> f32;

    /// The measure matching this surface's fonts.
    fn measure(&self) -> &dyn TextMeasure;

    /// Clears the previous frame.
    fn clear(&mut self) -> Result<()>;

    /// Draws one run at the given position.
    fn draw_run(&mut self, text: &str, x: f32, y: f32, style: Style) -> Result<()>;

    /// Flushes the frame to the output.
    fn present(&mut self) -> Result<()>;
}

/// Draws a set of laid-out lines as one frame.
pub fn draw_lines(surface: &mut dyn RenderSurface, lines: &[LaidOutLine]) -> Result<()> {
    surface.clear()?;
    for line in lines {
        for placed in &line.runs {
            surface.draw_run(&placed.run.text, placed.x, line.y, placed.run.style)?;
        }
    }
    surface.present()
}

/// Terminal transcript renderer.
///
/// Stands in for the chroma-key overlay window: one monospace cell per
/// measure unit, emphasized runs in bold red. Each frame rewrites the block
/// of rows printed by the previous frame using ANSI cursor movement.
pub struct TermSurface {
    columns: usize,
    measure: FixedWidthMeasure,
    /// Rows of the frame being built, as (column, text, style) cells.
    pending: Vec<(usize, usize, String, Style)>,
    previous_rows: usize,
    out: Box<dyn Write + Send>,
}

impl std::fmt::Debug for TermSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TermSurface")
            .field("columns", &self.columns)
            .field("previous_rows", &self.previous_rows)
            .finish()
    }
}

impl TermSurface {
    /// Creates a surface writing to stdout.
    pub fn stdout(columns: usize) -> Self {
        Self::with_writer(columns, Box::new(std::io::stdout()))
    }

    /// Creates a surface writing to an arbitrary writer (tests).
    pub fn with_writer(columns: usize, out: Box<dyn Write + Send>) -> Self {
        Self {
            columns,
            measure: FixedWidthMeasure {
                advance: 1.0,
                // The layout's padding constant is sized for pixel fonts;
                // terminal rows swallow it by using a large enough spacing
                // that each wrapped line lands on its own row.
                line: 1.0,
            },
            pending: Vec::new(),
            previous_rows: 0,
            out,
        }
    }

    /// Updates the width after a terminal resize.
    pub fn set_columns(&mut self, columns: usize) {
        self.columns = columns;
    }

    /// Converts a layout y offset to a terminal row.
    fn row_of(&self, y: f32) -> usize {
        let line_height = self.measure.line_spacing() + crate::defaults::LINE_PADDING;
        (y / line_height).round() as usize
    }
}

impl RenderSurface for TermSurface {
    fn max_text_width(&self) -> f32 {
        self.columns as f32
    }

    fn measure(&self) -> &dyn TextMeasure {
        &self.measure
    }

    fn clear(&mut self) -> Result<()> {
        self.pending.clear();
        Ok(())
    }

    fn draw_run(&mut self, text: &str, x: f32, y: f32, style: Style) -> Result<()> {
        let row = self.row_of(y);
        self.pending.push((row, x as usize, text.to_string(), style));
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        // Rewind over the previous frame's rows
        if self.previous_rows > 0 {
            write!(self.out, "\x1b[{}A\x1b[J", self.previous_rows)?;
        }

        let rows = self.pending.iter().map(|(r, ..)| r + 1).max().unwrap_or(0);
        let mut pending = std::mem::take(&mut self.pending);
        pending.sort_by_key(|(row, col, ..)| (*row, *col));

        let mut cursor_row = 0;
        let mut cursor_col = 0;
        for (row, col, text, style) in pending {
            while cursor_row < row {
                writeln!(self.out)?;
                cursor_row += 1;
                cursor_col = 0;
            }
            if col > cursor_col {
                write!(self.out, "{}", " ".repeat(col - cursor_col))?;
                cursor_col = col;
            }
            match style {
                Style::Normal => write!(self.out, "{}", text)?,
                Style::Emphasized => write!(self.out, "{}", text.red().bold())?,
            }
            cursor_col += text.chars().count();
        }
        if rows > 0 {
            writeln!(self.out)?;
        }
        self.out.flush()?;

        self.previous_rows = rows;
        Ok(())
    }
}
