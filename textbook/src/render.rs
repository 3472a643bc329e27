//! Renderer contract
//!
//! The core hands renderers typed data only: a block, or a book plus the
//! navigation state to display. Implementations must match every
//! [`ContentBlock`] variant and keep sections and blocks in authored order,
//! so rendering the same input twice yields the same output.

use crate::content_model::{Book, ContentBlock};
use crate::navigator::NavState;

/// Maps content to a textual output format
pub trait Renderer {
    /// Render one content block
    fn render_block(&self, block: &ContentBlock) -> String;

    /// Render the full page for a navigation state (cover or chapter)
    fn render_chapter(&self, book: &Book, state: &NavState) -> String;
}
