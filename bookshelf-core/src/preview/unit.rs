//! The preview unit: one book rendered as a self-contained, clickable card

use std::fmt;
use std::str::FromStr;
use tracing::trace;

use super::signal::{SelectionBus, SelectionSignal};
use super::style::{ScopedStyle, StyleScope, StyleTarget, ROOT_CLASS};
use crate::catalog::BookRecord;

/// Cover shown when a unit has no image
pub const DEFAULT_IMAGE: &str = "https://images-na.ssl-images-amazon.com/images/S/compressed.photo.goodreads.com/books/1348471955i/120009.jpg";
pub const DEFAULT_TITLE: &str = "Unknown Title";
pub const DEFAULT_AUTHOR: &str = "Unknown Author";
pub const DEFAULT_PREVIEW_ID: &str = "unknown-id";

/// Observed attributes; changing any of them re-renders the unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreviewAttribute {
    Image,
    Title,
    Author,
    PreviewId,
}

impl PreviewAttribute {
    pub const ALL: [PreviewAttribute; 4] = [
        PreviewAttribute::Image,
        PreviewAttribute::Title,
        PreviewAttribute::Author,
        PreviewAttribute::PreviewId,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PreviewAttribute::Image => "image",
            PreviewAttribute::Title => "title",
            PreviewAttribute::Author => "author",
            PreviewAttribute::PreviewId => "previewId",
        }
    }

    fn default_value(&self) -> &'static str {
        match self {
            PreviewAttribute::Image => DEFAULT_IMAGE,
            PreviewAttribute::Title => DEFAULT_TITLE,
            PreviewAttribute::Author => DEFAULT_AUTHOR,
            PreviewAttribute::PreviewId => DEFAULT_PREVIEW_ID,
        }
    }
}

impl fmt::Display for PreviewAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PreviewAttribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PreviewAttribute::ALL
            .into_iter()
            .find(|attr| attr.name() == s)
            .ok_or_else(|| format!("Unknown preview attribute: {s}"))
    }
}

/// Raw attribute values as set by the host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PreviewFields {
    image: Option<String>,
    title: Option<String>,
    author: Option<String>,
    preview_id: Option<String>,
}

impl PreviewFields {
    fn slot(&mut self, attr: PreviewAttribute) -> &mut Option<String> {
        match attr {
            PreviewAttribute::Image => &mut self.image,
            PreviewAttribute::Title => &mut self.title,
            PreviewAttribute::Author => &mut self.author,
            PreviewAttribute::PreviewId => &mut self.preview_id,
        }
    }

    fn get(&self, attr: PreviewAttribute) -> Option<&str> {
        match attr {
            PreviewAttribute::Image => self.image.as_deref(),
            PreviewAttribute::Title => self.title.as_deref(),
            PreviewAttribute::Author => self.author.as_deref(),
            PreviewAttribute::PreviewId => self.preview_id.as_deref(),
        }
    }

    /// Value used for rendering; empty counts as unset
    fn resolve(&self, attr: PreviewAttribute) -> String {
        self.get(attr)
            .filter(|value| !value.is_empty())
            .unwrap_or(attr.default_value())
            .to_string()
    }
}

/// Output of one render pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedUnit {
    pub scope: String,
    pub image: String,
    pub title: String,
    pub author: String,
    pub preview_id: String,
    /// Stylesheet confined to this unit
    pub css: String,
    pub markup: String,
}

impl RenderedUnit {
    /// Style block followed by the markup, ready to embed in a page
    pub fn to_html(&self) -> String {
        format!("<style>\n{}</style>\n{}", self.css, self.markup)
    }
}

/// Click handler installed by a render; emits the id it was rendered with
#[derive(Debug)]
struct ClickListener {
    preview_id: String,
    bus: SelectionBus,
}

impl ClickListener {
    fn fire(&self) {
        self.bus.emit(SelectionSignal::new(self.preview_id.clone()));
    }
}

/// One book rendered as an isolated, attribute-driven card.
///
/// Every attribute change rebuilds the whole unit. A rebuild swaps out the
/// click listener, so there is never more than one.
#[derive(Debug)]
pub struct PreviewUnit {
    fields: PreviewFields,
    style: ScopedStyle,
    bus: SelectionBus,
    rendered: RenderedUnit,
    listener: Option<ClickListener>,
    render_count: u64,
}

impl PreviewUnit {
    /// A unit showing only defaults, signalling on `bus`
    pub fn new(bus: SelectionBus) -> Self {
        Self::with_fields(PreviewFields::default(), bus)
    }

    /// A unit for `book`, showing `author_name` as the byline
    pub fn for_book(book: &BookRecord, author_name: Option<&str>, bus: SelectionBus) -> Self {
        let fields = PreviewFields {
            image: Some(book.image.clone()),
            title: Some(book.title.clone()),
            author: author_name.map(str::to_string),
            preview_id: Some(book.id.clone()),
        };
        Self::with_fields(fields, bus)
    }

    fn with_fields(fields: PreviewFields, bus: SelectionBus) -> Self {
        let style = ScopedStyle::preview_default(StyleScope::unique());
        let mut unit = Self {
            fields,
            rendered: empty_render(&style),
            style,
            bus,
            listener: None,
            render_count: 0,
        };
        unit.render();
        unit
    }

    pub fn attribute(&self, attr: PreviewAttribute) -> Option<&str> {
        self.fields.get(attr)
    }

    pub fn set_attribute(&mut self, attr: PreviewAttribute, value: impl Into<String>) {
        *self.fields.slot(attr) = Some(value.into());
        self.render();
    }

    pub fn remove_attribute(&mut self, attr: PreviewAttribute) {
        *self.fields.slot(attr) = None;
        self.render();
    }

    pub fn set_image(&mut self, image: impl Into<String>) {
        self.set_attribute(PreviewAttribute::Image, image);
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.set_attribute(PreviewAttribute::Title, title);
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.set_attribute(PreviewAttribute::Author, author);
    }

    pub fn set_preview_id(&mut self, preview_id: impl Into<String>) {
        self.set_attribute(PreviewAttribute::PreviewId, preview_id);
    }

    /// Change this unit's own style and re-render
    pub fn set_style(&mut self, target: StyleTarget, property: &str, value: &str) {
        self.style.set(target, property, value);
        self.render();
    }

    pub fn style(&self) -> &ScopedStyle {
        &self.style
    }

    /// Rebuild the unit from its current attributes
    pub fn render(&mut self) {
        let image = self.fields.resolve(PreviewAttribute::Image);
        let title = self.fields.resolve(PreviewAttribute::Title);
        let author = self.fields.resolve(PreviewAttribute::Author);
        let preview_id = self.fields.resolve(PreviewAttribute::PreviewId);
        let scope = self.style.scope().attribute();

        let markup = format!(
            "<div class=\"{ROOT_CLASS}\" data-scope=\"{scope}\" data-preview=\"{id}\">\n  <img src=\"{src}\" alt=\"{alt}\" />\n  <h3>{heading}</h3>\n  <p>{byline}</p>\n</div>\n",
            id = escape_html(&preview_id),
            src = escape_html(&image),
            alt = escape_html(&title),
            heading = escape_html(&title),
            byline = escape_html(&author),
        );

        self.rendered = RenderedUnit {
            scope,
            css: self.style.to_css(),
            markup,
            image,
            title,
            author,
            preview_id: preview_id.clone(),
        };
        // Replaces, never stacks, the previous render's listener
        self.listener = Some(ClickListener {
            preview_id,
            bus: self.bus.clone(),
        });
        self.render_count += 1;

        trace!(
            preview = %self.rendered.preview_id,
            renders = self.render_count,
            "Rendered preview unit"
        );
    }

    pub fn rendered(&self) -> &RenderedUnit {
        &self.rendered
    }

    /// Id carried by the selection signal
    pub fn preview_id(&self) -> &str {
        &self.rendered.preview_id
    }

    /// Simulate a user click. Emits exactly one selection signal.
    pub fn click(&self) -> bool {
        match &self.listener {
            Some(listener) => {
                listener.fire();
                true
            }
            None => false,
        }
    }

    pub fn listener_count(&self) -> usize {
        usize::from(self.listener.is_some())
    }

    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    pub fn bus(&self) -> &SelectionBus {
        &self.bus
    }
}

fn empty_render(style: &ScopedStyle) -> RenderedUnit {
    RenderedUnit {
        scope: style.scope().attribute(),
        image: String::new(),
        title: String::new(),
        author: String::new(),
        preview_id: String::new(),
        css: String::new(),
        markup: String::new(),
    }
}

/// Escape text for use in HTML content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_render() {
        let unit = PreviewUnit::new(SelectionBus::new());
        let rendered = unit.rendered();

        assert_eq!(rendered.image, DEFAULT_IMAGE);
        assert_eq!(rendered.title, "Unknown Title");
        assert_eq!(rendered.author, "Unknown Author");
        assert_eq!(rendered.preview_id, "unknown-id");
        assert_eq!(unit.render_count(), 1);
        assert_eq!(unit.listener_count(), 1);
    }

    #[test]
    fn test_setter_triggers_render() {
        let mut unit = PreviewUnit::new(SelectionBus::new());
        unit.set_title("Alpha");

        assert_eq!(unit.render_count(), 2);
        assert_eq!(unit.rendered().title, "Alpha");
        assert!(unit.rendered().markup.contains("<h3>Alpha</h3>"));
    }

    #[test]
    fn test_empty_and_removed_fall_back_to_default() {
        let mut unit = PreviewUnit::new(SelectionBus::new());
        unit.set_author("");
        assert_eq!(unit.rendered().author, DEFAULT_AUTHOR);
        assert_eq!(unit.attribute(PreviewAttribute::Author), Some(""));

        unit.set_author("Ann");
        unit.remove_attribute(PreviewAttribute::Author);
        assert_eq!(unit.rendered().author, DEFAULT_AUTHOR);
        assert_eq!(unit.attribute(PreviewAttribute::Author), None);
    }

    #[test]
    fn test_rerender_is_idempotent() {
        let bus = SelectionBus::new();
        let book = BookRecord::new("1", "Alpha", "a1", "https://x/a.jpg", ["g1"]);
        let mut unit = PreviewUnit::for_book(&book, Some("Ann"), bus.clone());
        assert_eq!(unit.render_count(), 1);
        let before = unit.rendered().clone();

        unit.render();
        unit.set_title("Alpha");

        assert_eq!(unit.rendered(), &before);
        assert_eq!(unit.listener_count(), 1);

        assert!(unit.click());
        assert_eq!(bus.drain(), vec![SelectionSignal::new("1")]);
    }

    #[test]
    fn test_click_carries_latest_id() {
        let bus = SelectionBus::new();
        let mut unit = PreviewUnit::new(bus.clone());
        unit.click();
        unit.set_preview_id("42");
        unit.click();

        let details: Vec<String> = bus.drain().into_iter().map(|s| s.detail).collect();
        assert_eq!(details, vec!["unknown-id", "42"]);
    }

    #[test]
    fn test_markup_escapes_text() {
        let mut unit = PreviewUnit::new(SelectionBus::new());
        unit.set_title("Tom & Jerry <3");

        let markup = &unit.rendered().markup;
        assert!(markup.contains("<h3>Tom &amp; Jerry &lt;3</h3>"));
        assert!(markup.contains("alt=\"Tom &amp; Jerry &lt;3\""));
    }

    #[test]
    fn test_style_change_stays_local() {
        let bus = SelectionBus::new();
        let mut first = PreviewUnit::new(bus.clone());
        let second = PreviewUnit::new(bus);
        let sibling_css = second.rendered().css.clone();

        first.set_style(StyleTarget::Root, "border", "none");

        assert!(first.rendered().css.contains("border: none;"));
        assert_eq!(second.rendered().css, sibling_css);
        assert_ne!(first.rendered().scope, second.rendered().scope);
        assert!(first
            .rendered()
            .markup
            .contains(&format!("data-scope=\"{}\"", first.rendered().scope)));
    }

    #[test]
    fn test_attribute_names() {
        assert_eq!("previewId".parse::<PreviewAttribute>(), Ok(PreviewAttribute::PreviewId));
        assert_eq!(PreviewAttribute::Image.to_string(), "image");
        assert!("data-image".parse::<PreviewAttribute>().is_err());
    }
}
