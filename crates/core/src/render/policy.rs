/// The closed set of layout behaviors an element can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementPolicy {
    /// `h1`..`h6`.
    Heading(u8),
    Paragraph,
    Division,
    /// `span`, `a`, `strong`/`b`, `em`/`i`. Only links get their own color.
    Inline { link: bool },
    Small,
    LineBreak,
    Rule,
    List { ordered: bool },
    /// A `li` met outside a list handler.
    ListItem,
    Blockquote,
    Skip,
    /// Anything else: short text is drawn as a block, long text is recursed into.
    Other,
}

impl ElementPolicy {
    pub fn for_tag(tag: &str) -> Self {
        match tag {
            "h1" => Self::Heading(1),
            "h2" => Self::Heading(2),
            "h3" => Self::Heading(3),
            "h4" => Self::Heading(4),
            "h5" => Self::Heading(5),
            "h6" => Self::Heading(6),
            "p" => Self::Paragraph,
            "div" => Self::Division,
            "a" => Self::Inline { link: true },
            "span" | "strong" | "b" | "em" | "i" => Self::Inline { link: false },
            "small" => Self::Small,
            "br" => Self::LineBreak,
            "hr" => Self::Rule,
            "ul" => Self::List { ordered: false },
            "ol" => Self::List { ordered: true },
            "li" => Self::ListItem,
            "blockquote" => Self::Blockquote,
            tag if crate::dom::is_skipped_tag(tag) => Self::Skip,
            _ => Self::Other,
        }
    }
}
