//! The single flow traversal behind both painting and measuring.

use super::policy::ElementPolicy;
use super::RenderContext;
use crate::dom::{is_skipped_tag, Document, Node, NodeId, NodeKind};
use crate::paint::PaintSink;
use crate::style::{Rgb, StyleConfig};
use crate::text::{clean_text, wrap_text, TextCache, TextMeasure};

/// Elements whose flattened text is at least this long are recursed into
/// instead of drawn as one block.
pub const MAX_BLOCK_TEXT_CHARS: usize = 1000;
/// Vertical gap of `<hr>`, before zoom.
pub const RULE_GAP: f32 = 20.0;
/// Horizontal offset of list item content from its prefix, before zoom.
pub const LIST_CONTENT_INDENT: f32 = 30.0;
/// Vertical gap after each list item, before zoom.
pub const LIST_ITEM_GAP: f32 = 5.0;
/// Lines of a block further than this many line heights below the viewport
/// are not offered to the sink.
pub const CULL_OVERSCAN_LINES: f32 = 10.0;

const BULLET_PREFIX: &str = "  • ";

/// What a traversal does with the lines it lays out.
pub(crate) enum Surface<'s> {
    /// Advance the cursor only.
    Measure,
    /// Advance the cursor and hand visible lines to the sink.
    Paint(&'s mut dyn PaintSink),
}

pub(crate) struct Flow<'a, 's> {
    pub doc: &'a Document,
    pub style: &'a StyleConfig,
    pub metrics: &'a dyn TextMeasure,
    pub cache: &'a mut TextCache,
    pub ctx: &'a RenderContext,
    pub surface: Surface<'s>,
}

impl<'a, 's> Flow<'a, 's> {
    /// Lay out the children of `id` top to bottom, returning the cursor.
    pub fn layout_children(&mut self, id: NodeId, x: f32, y: f32) -> f32 {
        let doc = self.doc;
        let mut cursor = y;

        for &child in doc.children(id) {
            match &doc.node(child).kind {
                NodeKind::Element { tag } => {
                    if !is_skipped_tag(tag) {
                        cursor = self.layout_element(child, tag, x, cursor);
                    }
                }
                NodeKind::Text { text } => {
                    let text = clean_text(text);
                    let parent_skipped = doc
                        .parent(child)
                        .and_then(Node::tag)
                        .is_some_and(is_skipped_tag);
                    if !text.is_empty() && !parent_skipped {
                        cursor = self.layout_text(
                            &text,
                            x,
                            cursor,
                            self.style.base_size,
                            self.style.text_color,
                        );
                    }
                }
                NodeKind::Document | NodeKind::Comment => {}
            }
        }

        cursor
    }

    fn layout_element(&mut self, id: NodeId, tag: &str, x: f32, y: f32) -> f32 {
        let style = self.style;
        let zoom = self.ctx.zoom;

        match ElementPolicy::for_tag(tag) {
            ElementPolicy::Heading(level) => {
                let content = self.cache.get_or_extract(self.doc, id);
                if content.is_empty() {
                    return self.layout_children(id, x, y);
                }
                let heading = style.heading(level);
                let y = y + heading.margin_top * zoom;
                let y = self.layout_text(&content, x, y, heading.scale, style.heading_color);
                y + heading.margin_bottom * zoom
            }

            ElementPolicy::Paragraph => {
                let content = self.cache.get_or_extract(self.doc, id);
                let y = if content.is_empty() {
                    self.layout_children(id, x, y)
                } else {
                    self.layout_text(&content, x, y, style.base_size, style.text_color)
                };
                y + style.paragraph_spacing * zoom
            }

            ElementPolicy::Division => {
                self.layout_children(id, x, y) + (style.paragraph_spacing / 2.0) * zoom
            }

            ElementPolicy::Inline { link } => {
                let color = if link { style.link_color } else { style.text_color };
                self.text_or_children(id, x, y, style.base_size, color)
            }

            ElementPolicy::Small => {
                self.text_or_children(id, x, y, style.small_size, style.text_color)
            }

            ElementPolicy::LineBreak => y + self.line_height(1.0),

            ElementPolicy::Rule => y + RULE_GAP * zoom,

            ElementPolicy::List { ordered } => self.layout_list(id, x, y, ordered),

            ElementPolicy::ListItem => self.layout_children(id, x, y),

            ElementPolicy::Blockquote => {
                let y = self.layout_children(id, x + style.indent_size * zoom, y);
                y + style.paragraph_spacing * zoom
            }

            ElementPolicy::Skip => y,

            ElementPolicy::Other => {
                let content = self.cache.get_or_extract(self.doc, id);
                if !content.is_empty() && content.chars().count() < MAX_BLOCK_TEXT_CHARS {
                    self.layout_text(&content, x, y, style.base_size, style.text_color)
                } else {
                    self.layout_children(id, x, y)
                }
            }
        }
    }

    fn text_or_children(&mut self, id: NodeId, x: f32, y: f32, scale: f32, color: Rgb) -> f32 {
        let content = self.cache.get_or_extract(self.doc, id);
        if content.is_empty() {
            self.layout_children(id, x, y)
        } else {
            self.layout_text(&content, x, y, scale, color)
        }
    }

    /// Direct `li` children only. Each item's content starts one line
    /// height back up, on the line of its prefix.
    fn layout_list(&mut self, id: NodeId, x: f32, y: f32, ordered: bool) -> f32 {
        let doc = self.doc;
        let style = self.style;
        let zoom = self.ctx.zoom;
        let prefix_line = self.line_height(style.base_size);

        let mut cursor = y;
        let mut number = 1usize;

        for &item in doc.children(id) {
            if doc.node(item).tag() != Some("li") {
                continue;
            }

            let prefix = if ordered {
                let p = format!("  {}. ", number);
                number += 1;
                p
            } else {
                BULLET_PREFIX.to_string()
            };

            cursor = self.layout_text(&prefix, x, cursor, style.base_size, style.text_color);
            cursor = self.layout_children(item, x + LIST_CONTENT_INDENT * zoom, cursor - prefix_line);
            cursor += LIST_ITEM_GAP * zoom;
        }

        cursor + style.paragraph_spacing * zoom
    }

    /// Line height for text at `scale` under the current zoom.
    fn line_height(&self, scale: f32) -> f32 {
        self.metrics.line_height(scale * self.ctx.zoom) * self.style.line_spacing
    }

    /// Wrap `text` against the width left of `x` and advance past every
    /// line. When painting, only lines near the viewport reach the sink.
    fn layout_text(&mut self, text: &str, x: f32, y: f32, scale: f32, color: Rgb) -> f32 {
        if text.is_empty() {
            return y;
        }

        let effective_scale = scale * self.ctx.zoom;
        let lines = wrap_text(text, self.ctx.width - x, effective_scale, self.metrics);
        let line_height = self.line_height(scale);
        let end_y = y + lines.len() as f32 * line_height;

        if let Surface::Paint(sink) = &mut self.surface {
            let scroll = self.ctx.scroll_offset;
            let viewport = self.ctx.height;
            let mut line_y = y;

            for line in &lines {
                let screen_y = line_y + scroll;
                if screen_y >= -line_height && screen_y <= viewport + line_height {
                    sink.draw(line, x, screen_y, effective_scale, color);
                }
                line_y += line_height;

                if line_y + scroll > viewport + line_height * CULL_OVERSCAN_LINES {
                    break;
                }
            }
        }

        end_y
    }
}
