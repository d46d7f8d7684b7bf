//! Transcript overlay: word highlighting, line-wrap layout, rendering.

pub mod highlight;
pub mod layout;
pub mod surface;
pub mod view;

pub use highlight::{Style, StyledRun, highlight_transcript, highlight_word};
pub use layout::{FixedWidthMeasure, LaidOutLine, PlacedRun, TextMeasure, layout_words};
pub use surface::{RenderSurface, TermSurface};
pub use view::TranscriptView;
