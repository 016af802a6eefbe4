//! View state around the current page: zoom, scroll, viewport and loading.
//!
//! A `Viewer` is the single owner of the page's [`HtmlRenderer`]; loading a
//! page swaps the renderer out wholesale.

use crate::dom::ParseMode;
use crate::error::RenderError;
use crate::paint::PaintSink;
use crate::render::{HtmlRenderer, RenderContext};
use crate::style::StyleConfig;

/// Configuration for a viewer window.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Height reserved above the content for the address bar.
    pub address_bar_height: f32,
    /// Scroll distance of one wheel step.
    pub scroll_step: f32,
    /// Scroll distance of one arrow-key press.
    pub line_step: f32,
    /// Share of the viewport height one page-up/page-down moves.
    pub page_fraction: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub parse_mode: ParseMode,
    pub style: StyleConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,
            address_bar_height: 40.0,
            scroll_step: 25.0,
            line_step: 50.0,
            page_fraction: 0.8,
            min_zoom: 0.1,
            max_zoom: 5.0,
            parse_mode: ParseMode::Lenient,
            style: StyleConfig::default(),
        }
    }
}

pub struct Viewer {
    config: ViewerConfig,
    renderer: Option<HtmlRenderer>,
    url: Option<String>,
    zoom: f32,
    scroll_offset: f32,
    content_height: f32,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            renderer: None,
            url: None,
            zoom: 1.0,
            scroll_offset: 0.0,
            content_height: 0.0,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn renderer(&self) -> Option<&HtmlRenderer> {
        self.renderer.as_ref()
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Replace the current page with `html`. The page has no URL until
    /// [`Self::navigate`] gives it one.
    pub fn load_html(&mut self, html: impl Into<String>) {
        let mut renderer = HtmlRenderer::new(html).with_parse_mode(self.config.parse_mode);
        renderer.set_style(self.config.style.clone());
        log::info!("loaded page ({} bytes)", renderer.source().len());

        self.renderer = Some(renderer);
        self.url = None;
        self.scroll_offset = 0.0;
        self.refresh_content_height();
    }

    /// Fetch `url` and load it. A failed fetch loads an error page instead
    /// and hands the error back for the caller to report.
    #[cfg(feature = "fetch")]
    pub fn navigate(
        &mut self,
        url: &str,
        fetch_config: &crate::fetch::FetchConfig,
    ) -> Result<(), crate::error::FetchError> {
        let result = match crate::fetch::fetch_html(url, fetch_config) {
            Ok(html) => {
                self.load_html(html);
                Ok(())
            }
            Err(err) => {
                log::warn!("failed to load {}: {}", url, err);
                self.load_html(error_page(&err.to_string()));
                Err(err)
            }
        };
        self.url = Some(url.to_string());
        result
    }

    /// Fetch the current URL again. Pages loaded from a string have nothing
    /// to reload.
    #[cfg(feature = "fetch")]
    pub fn reload(
        &mut self,
        fetch_config: &crate::fetch::FetchConfig,
    ) -> Result<(), crate::error::FetchError> {
        match self.url.clone() {
            Some(url) => self.navigate(&url, fetch_config),
            None => Ok(()),
        }
    }

    /// Swap in a new style and re-measure.
    pub fn set_style(&mut self, style: StyleConfig) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.set_style(style.clone());
        }
        self.config.style = style;
        self.refresh_content_height();
        self.clamp_scroll();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        self.refresh_content_height();
        self.clamp_scroll();
    }

    /// Scroll by wheel steps; positive moves towards the top of the page.
    pub fn scroll_by(&mut self, steps: f32) {
        self.scroll_pixels(steps * self.config.scroll_step);
    }

    pub fn line_up(&mut self) {
        self.scroll_pixels(self.config.line_step);
    }

    pub fn line_down(&mut self) {
        self.scroll_pixels(-self.config.line_step);
    }

    pub fn page_up(&mut self) {
        self.scroll_pixels(self.page_step());
    }

    pub fn page_down(&mut self) {
        self.scroll_pixels(-self.page_step());
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0.0;
    }

    /// Scroll as far down as clamping allows.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.min_scroll_offset();
    }

    /// Change zoom by `delta`, clamped to the configured bounds. A change
    /// resets scrolling to the top.
    pub fn zoom_by(&mut self, delta: f32) {
        let zoom = (self.zoom + delta).clamp(self.config.min_zoom, self.config.max_zoom);
        if zoom != self.zoom {
            self.zoom = zoom;
            self.scroll_offset = 0.0;
            self.refresh_content_height();
        }
    }

    /// Back to 100% zoom at the top of the page.
    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
        self.scroll_offset = 0.0;
        self.refresh_content_height();
    }

    /// Height available to page content below the address bar.
    pub fn available_height(&self) -> f32 {
        self.config.viewport_height - self.config.address_bar_height - 20.0
    }

    /// Geometry of the content area for the current zoom and scroll.
    pub fn content_context(&self) -> RenderContext {
        RenderContext {
            x: 10.0 * self.zoom,
            y: self.config.address_bar_height + 15.0 * self.zoom,
            width: self.config.viewport_width - 20.0 * self.zoom,
            height: self.available_height(),
            scroll_offset: self.scroll_offset,
            zoom: self.zoom,
        }
    }

    /// Paint the current page. Does nothing before a page is loaded.
    pub fn render(&mut self, sink: &mut dyn PaintSink) -> Result<(), RenderError> {
        let ctx = self.content_context();
        match self.renderer.as_mut() {
            Some(renderer) => renderer.render(&ctx, sink).map(|_| ()),
            None => Ok(()),
        }
    }

    fn refresh_content_height(&mut self) {
        let ctx = self.content_context();
        self.content_height = match self.renderer.as_mut() {
            Some(renderer) => renderer.calculate_content_height(&ctx),
            None => 0.0,
        };
    }

    fn scroll_pixels(&mut self, delta: f32) {
        self.scroll_offset += delta;
        self.clamp_scroll();
    }

    fn page_step(&self) -> f32 {
        self.config.viewport_height * self.config.page_fraction
    }

    /// Lowest offset: the end of the content sits at 90% of the viewport.
    fn min_scroll_offset(&self) -> f32 {
        (-(self.content_height - self.available_height() * 0.9)).min(0.0)
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.clamp(self.min_scroll_offset(), 0.0);
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

/// The page shown in place of one that could not be fetched.
pub fn error_page(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Error</title></head>
<body>
<h1>Failed to load page</h1>
<p>Error: {}</p>
<p>Please check your internet connection and try again.</p>
</body>
</html>"#,
        escape_html(message)
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
