//! The HTML flow renderer.
//!
//! One traversal serves both painting and measuring, so the content height
//! reported for scrolling always matches where the painted content ends.

mod flow;
mod policy;

pub use flow::{
    CULL_OVERSCAN_LINES, LIST_CONTENT_INDENT, LIST_ITEM_GAP, MAX_BLOCK_TEXT_CHARS, RULE_GAP,
};
pub use policy::ElementPolicy;

use crate::dom::{parse_html, Document, NodeId, ParseMode};
use crate::error::{ParseError, RenderError};
use crate::paint::PaintSink;
use crate::style::{Rgb, StyleConfig};
use crate::text::{GlyphMetrics, TextCache, TextMeasure};
use flow::{Flow, Surface};
use std::rc::Rc;

/// Geometry for one render or measure call. Built fresh by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderContext {
    /// Anchor of the content area.
    pub x: f32,
    pub y: f32,
    /// Width text wraps against, measured from the left edge of the window.
    pub width: f32,
    /// Viewport height used for culling.
    pub height: f32,
    /// Added to every painted y. Negative when scrolled down.
    pub scroll_offset: f32,
    pub zoom: f32,
}

impl RenderContext {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
            scroll_offset: 0.0,
            zoom: 1.0,
        }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn scrolled(mut self, offset: f32) -> Self {
        self.scroll_offset = offset;
        self
    }
}

enum ParseState {
    Pending,
    /// The source was empty; there is nothing to lay out.
    Empty,
    Ready { doc: Document, root: NodeId },
    Failed(ParseError),
}

/// Renderer for one loaded page. Replaced wholesale when a new page loads.
pub struct HtmlRenderer {
    source: String,
    mode: ParseMode,
    state: ParseState,
    style: StyleConfig,
    metrics: Box<dyn TextMeasure>,
    cache: TextCache,
}

impl HtmlRenderer {
    /// Content height reported when the page cannot be parsed.
    pub const PARSE_ERROR_HEIGHT: f32 = 100.0;

    pub fn new(html: impl Into<String>) -> Self {
        Self {
            source: html.into(),
            mode: ParseMode::default(),
            state: ParseState::Pending,
            style: StyleConfig::default(),
            metrics: Box::new(GlyphMetrics::default()),
            cache: TextCache::new(),
        }
    }

    /// Has no effect once the document has been parsed.
    pub fn with_parse_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_metrics(mut self, metrics: impl TextMeasure + 'static) -> Self {
        self.metrics = Box::new(metrics);
        self
    }

    pub fn set_style(&mut self, style: StyleConfig) {
        self.style = style;
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_parsed(&self) -> bool {
        !matches!(self.state, ParseState::Pending)
    }

    /// Parse the source if that has not been attempted yet. The parser runs
    /// at most once per renderer: a failure is kept and returned again.
    pub fn ensure_parsed(&mut self) -> Result<(), ParseError> {
        match &self.state {
            ParseState::Pending => {}
            ParseState::Failed(err) => return Err(err.clone()),
            ParseState::Empty | ParseState::Ready { .. } => return Ok(()),
        }

        if self.source.is_empty() {
            self.state = ParseState::Empty;
            return Ok(());
        }

        match parse_html(&self.source, self.mode) {
            Ok(doc) => {
                let root = match doc.find_first("body") {
                    Some(body) => body,
                    None => {
                        log::debug!("no <body> element, laying out from the document root");
                        doc.root()
                    }
                };
                self.state = ParseState::Ready { doc, root };
                Ok(())
            }
            Err(err) => {
                log::warn!("failed to parse page: {}", err);
                self.state = ParseState::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// The parsed document, if parsing has happened and succeeded.
    pub fn document(&self) -> Option<&Document> {
        match &self.state {
            ParseState::Ready { doc, .. } => Some(doc),
            _ => None,
        }
    }

    /// The node layout starts from: `body`, or the document root without one.
    pub fn layout_root(&self) -> Option<NodeId> {
        match &self.state {
            ParseState::Ready { root, .. } => Some(*root),
            _ => None,
        }
    }

    /// Flattened text of `id`, memoized. `None` before a successful parse.
    pub fn cached_text(&mut self, id: NodeId) -> Option<Rc<str>> {
        match &self.state {
            ParseState::Ready { doc, .. } => Some(self.cache.get_or_extract(doc, id)),
            _ => None,
        }
    }

    pub fn text_cache(&self) -> &TextCache {
        &self.cache
    }

    /// Paint the page into `sink` and return the height of the laid out
    /// content, the same value [`Self::calculate_content_height`] reports.
    ///
    /// A parse failure is drawn as a single red line at the anchor and
    /// returned.
    pub fn render(
        &mut self,
        ctx: &RenderContext,
        sink: &mut dyn PaintSink,
    ) -> Result<f32, RenderError> {
        if let Err(err) = self.ensure_parsed() {
            let err = RenderError::from(err);
            sink.draw(&err.to_string(), ctx.x, ctx.y, ctx.zoom, Rgb::RED);
            return Err(err);
        }

        let end_y = self.flow(ctx, Surface::Paint(sink));
        Ok(end_y - ctx.y)
    }

    /// Total height of the laid out content without painting anything.
    pub fn calculate_content_height(&mut self, ctx: &RenderContext) -> f32 {
        if self.ensure_parsed().is_err() {
            return Self::PARSE_ERROR_HEIGHT;
        }

        let end_y = self.flow(ctx, Surface::Measure);
        end_y - ctx.y
    }

    fn flow(&mut self, ctx: &RenderContext, surface: Surface<'_>) -> f32 {
        let ParseState::Ready { doc, root } = &self.state else {
            return ctx.y;
        };

        let mut flow = Flow {
            doc,
            style: &self.style,
            metrics: self.metrics.as_ref(),
            cache: &mut self.cache,
            ctx,
            surface,
        };
        flow.layout_children(*root, ctx.x, ctx.y)
    }
}
