//! Live transcript view: highlight, lay out, draw.

use crate::error::Result;
use crate::overlay::highlight::highlight_transcript;
use crate::overlay::layout::layout_words;
use crate::overlay::surface::{RenderSurface, draw_lines};
use crate::trigger::matcher::TriggerMatcher;

/// Owns the current transcript and redraws it on a surface.
///
/// The maximum text width is re-read from the surface before every layout,
/// so a resize is a full re-layout on the next frame with no extra
/// bookkeeping.
pub struct TranscriptView<S: RenderSurface> {
    surface: S,
    matcher: TriggerMatcher,
    pad_x: f32,
    pad_y: f32,
    text: String,
}

impl<S: RenderSurface> TranscriptView<S> {
    /// Creates a view with the given padding from the surface origin.
    pub fn new(surface: S, matcher: TriggerMatcher, pad_x: f32, pad_y: f32) -> Self {
        Self {
            surface,
            matcher,
            pad_x,
            pad_y,
            text: String::new(),
        }
    }

    /// The transcript currently displayed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the transcript and redraws.
    pub fn set_text(&mut self, text: &str) -> Result<()> {
        self.text = text.to_string();
        self.redraw()
    }

    /// Re-highlights, re-lays-out, and redraws the current transcript.
    pub fn redraw(&mut self) -> Result<()> {
        let words = highlight_transcript(&self.text, &self.matcher);
        let max_width = self.surface.max_text_width() - 2.0 * self.pad_x;
        let lines = layout_words(
            &words,
            self.pad_x,
            self.pad_y,
            max_width,
            self.surface.measure(),
        );
        draw_lines(&mut self.surface, &lines)
    }

    /// Access to the underlying surface (e.g. to apply a resize).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
