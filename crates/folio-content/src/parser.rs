//! Markdown to content tree conversion.

use pulldown_cmark::{Alignment, BlockQuoteKind, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::node::{ContentTree, Element, Node};
use crate::toc::HeadingIds;
use crate::util::{heading_level_to_num, parse_fence_info, resolve_link};

/// Markdown parser producing a [`ContentTree`].
///
/// Headings receive unique `id` attributes (explicit `{#id}` attributes win),
/// fenced code blocks become `pre > code.language-*`, and relative `.md` links
/// are rewritten to page URLs when a link base is configured.
#[derive(Debug, Clone)]
pub struct MarkdownParser {
    gfm: bool,
    link_base: Option<LinkBase>,
}

#[derive(Debug, Clone)]
struct LinkBase {
    dir: String,
    prefix: String,
}

impl MarkdownParser {
    /// Create a parser with GFM enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gfm: true,
            link_base: None,
        }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    /// - Alerts (`> [!NOTE]`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Rewrite relative `.md` links.
    ///
    /// `dir` is the directory of the page being parsed (relative to the docs
    /// root) and `prefix` the URL prefix of all pages, e.g. `/Axis/docs`.
    #[must_use]
    pub fn with_link_base(mut self, dir: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.link_base = Some(LinkBase {
            dir: dir.into(),
            prefix: prefix.into(),
        });
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        let base = Options::ENABLE_HEADING_ATTRIBUTES;
        if self.gfm {
            base | Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            base
        }
    }

    /// Parse markdown text into a content tree.
    #[must_use]
    pub fn parse(&self, markdown: &str) -> ContentTree {
        self.parse_events(Parser::new_ext(markdown, self.parser_options()))
    }

    /// Build a content tree from pulldown-cmark events.
    pub fn parse_events<'a, I>(&self, events: I) -> ContentTree
    where
        I: Iterator<Item = Event<'a>>,
    {
        let mut builder = TreeBuilder::new(self.link_base.as_ref());
        for event in events {
            builder.process_event(event);
        }
        builder.finish()
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Event-driven tree construction state.
struct TreeBuilder<'p> {
    root: Vec<Node>,
    stack: Vec<Element>,
    ids: HeadingIds,
    table: TableState,
    link_base: Option<&'p LinkBase>,
}

#[derive(Default)]
struct TableState {
    alignments: Vec<Alignment>,
    in_head: bool,
    cell_index: usize,
}

impl TableState {
    fn current_alignment_style(&self) -> Option<&'static str> {
        match self.alignments.get(self.cell_index) {
            Some(Alignment::Left) => Some("text-align:left"),
            Some(Alignment::Center) => Some("text-align:center"),
            Some(Alignment::Right) => Some("text-align:right"),
            Some(Alignment::None) | None => None,
        }
    }
}

impl<'p> TreeBuilder<'p> {
    fn new(link_base: Option<&'p LinkBase>) -> Self {
        Self {
            root: Vec::new(),
            stack: Vec::new(),
            ids: HeadingIds::new(),
            table: TableState::default(),
            link_base,
        }
    }

    fn finish(mut self) -> ContentTree {
        // Close anything left open by truncated event streams
        while !self.stack.is_empty() {
            self.close();
        }
        ContentTree::from_nodes(self.root)
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => self.push_node(Element::new("code").with_text(&*code)),
            Event::Html(html) | Event::InlineHtml(html) => {
                self.push_node(Node::Raw(html.into_string()));
            }
            Event::SoftBreak => self.push_text("\n"),
            Event::HardBreak => self.push_node(Element::new("br")),
            Event::Rule => self.push_node(Element::new("hr")),
            Event::TaskListMarker(checked) => {
                let mut input = Element::new("input").with_attr("type", "checkbox");
                if checked {
                    input.set_attr("checked", "");
                }
                input.set_attr("disabled", "");
                self.push_node(input);
            }
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.open(Element::new("p")),
            Tag::Heading { level, id, .. } => {
                let mut heading = Element::new(format!("h{}", heading_level_to_num(level)));
                if let Some(id) = id {
                    self.ids.reserve(&id);
                    heading.set_attr("id", &*id);
                }
                self.open(heading);
            }
            Tag::BlockQuote(kind) => {
                let mut quote = Element::new("blockquote");
                if let Some(kind) = kind {
                    quote.set_attr("class", format!("alert alert-{}", alert_class(kind)));
                }
                self.open(quote);
            }
            Tag::CodeBlock(kind) => {
                let (lang, title) = match kind {
                    CodeBlockKind::Fenced(ref info) if !info.is_empty() => parse_fence_info(info),
                    _ => (None, None),
                };
                let mut pre = Element::new("pre");
                if let Some(title) = title {
                    pre.set_attr("data-title", title);
                }
                let mut code = Element::new("code");
                if let Some(lang) = lang {
                    code.set_attr("class", format!("language-{lang}"));
                }
                self.open(pre);
                self.open(code);
            }
            Tag::List(start) => {
                let list = match start {
                    Some(1) => Element::new("ol"),
                    Some(n) => Element::new("ol").with_attr("start", n.to_string()),
                    None => Element::new("ul"),
                };
                self.open(list);
            }
            Tag::Item => self.open(Element::new("li")),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
            Tag::DefinitionList => self.open(Element::new("dl")),
            Tag::DefinitionListTitle => self.open(Element::new("dt")),
            Tag::DefinitionListDefinition => self.open(Element::new("dd")),
            Tag::Table(alignments) => {
                self.table = TableState {
                    alignments,
                    ..TableState::default()
                };
                self.open(Element::new("table"));
            }
            Tag::TableHead => {
                self.table.in_head = true;
                self.table.cell_index = 0;
                self.open(Element::new("thead"));
                self.open(Element::new("tr"));
            }
            Tag::TableRow => {
                self.table.cell_index = 0;
                self.open(Element::new("tr"));
            }
            Tag::TableCell => {
                let mut cell = Element::new(if self.table.in_head { "th" } else { "td" });
                if let Some(style) = self.table.current_alignment_style() {
                    cell.set_attr("style", style);
                }
                self.open(cell);
            }
            Tag::Emphasis => self.open(Element::new("em")),
            Tag::Strong => self.open(Element::new("strong")),
            Tag::Strikethrough => self.open(Element::new("s")),
            Tag::Superscript => self.open(Element::new("sup")),
            Tag::Subscript => self.open(Element::new("sub")),
            Tag::Link {
                dest_url, title, ..
            } => {
                let href = match self.link_base {
                    Some(base) => resolve_link(&dest_url, &base.dir, &base.prefix),
                    None => dest_url.into_string(),
                };
                let mut link = Element::new("a").with_attr("href", href);
                if !title.is_empty() {
                    link.set_attr("title", &*title);
                }
                self.open(link);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Alt text is collected as children and moved into `alt` on close
                let mut image = Element::new("img").with_attr("src", &*dest_url);
                if !title.is_empty() {
                    image.set_attr("title", &*title);
                }
                self.open(image);
            }
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::Heading(_) => self.close_heading(),
            TagEnd::Image => self.close_image(),
            TagEnd::CodeBlock => {
                self.close();
                self.close();
            }
            TagEnd::TableHead => {
                self.close();
                self.close();
                self.table.in_head = false;
                self.open(Element::new("tbody"));
            }
            TagEnd::TableCell => {
                self.close();
                self.table.cell_index += 1;
            }
            TagEnd::Table => {
                if self.stack.last().is_some_and(|e| e.tag == "tbody") {
                    self.close();
                }
                self.close();
            }
            TagEnd::Paragraph
            | TagEnd::BlockQuote(_)
            | TagEnd::List(_)
            | TagEnd::Item
            | TagEnd::DefinitionList
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition
            | TagEnd::TableRow
            | TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Strikethrough
            | TagEnd::Superscript
            | TagEnd::Subscript
            | TagEnd::Link => self.close(),
        }
    }

    fn close_heading(&mut self) {
        let Some(mut heading) = self.stack.pop() else {
            return;
        };
        if heading.attr("id").is_none() {
            let id = self.ids.generate(&heading.text());
            heading.set_attr("id", id);
        }
        self.push_node(heading);
    }

    fn close_image(&mut self) {
        let Some(mut image) = self.stack.pop() else {
            return;
        };
        let alt = image.text();
        image.children.clear();
        image.set_attr("alt", alt);
        self.push_node(image);
    }

    fn open(&mut self, element: Element) {
        self.stack.push(element);
    }

    fn close(&mut self) {
        if let Some(element) = self.stack.pop() {
            self.push_node(element);
        }
    }

    fn children_mut(&mut self) -> &mut Vec<Node> {
        match self.stack.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.root,
        }
    }

    fn push_node(&mut self, node: impl Into<Node>) {
        self.children_mut().push(node.into());
    }

    /// Append text, merging with a preceding text node.
    fn push_text(&mut self, text: &str) {
        let children = self.children_mut();
        if let Some(Node::Text(last)) = children.last_mut() {
            last.push_str(text);
        } else {
            children.push(Node::Text(text.to_owned()));
        }
    }
}

fn alert_class(kind: BlockQuoteKind) -> &'static str {
    match kind {
        BlockQuoteKind::Note => "note",
        BlockQuoteKind::Tip => "tip",
        BlockQuoteKind::Important => "important",
        BlockQuoteKind::Warning => "warning",
        BlockQuoteKind::Caution => "caution",
    }
}
