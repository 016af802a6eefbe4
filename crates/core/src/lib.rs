pub mod dom;
pub mod error;
pub mod paint;
pub mod render;
pub mod style;
pub mod text;
pub mod viewer;
#[cfg(feature = "fetch")]
pub mod fetch;

pub use error::{ParseError, RenderError};
pub use paint::{DisplayList, PaintSink};
pub use render::{HtmlRenderer, RenderContext};
pub use style::StyleConfig;

/// Lay out `html` into a viewport of the given size and record the paint
/// calls. Returns the display list and the content height.
///
/// Parse failures are recorded in the display list as a single error line.
pub fn render_to_display_list(
    html: &str,
    ctx: &RenderContext,
    style: StyleConfig,
) -> (DisplayList, f32) {
    let mut renderer = HtmlRenderer::new(html);
    renderer.set_style(style);
    let mut list = DisplayList::new();
    let height = renderer
        .render(ctx, &mut list)
        .unwrap_or(HtmlRenderer::PARSE_ERROR_HEIGHT);
    (list, height)
}
