//! HTML serialization of rendered nodes.

use crate::context::PageContext;
use crate::dispatcher::RenderedPage;
use crate::vdom::VNode;
use std::collections::BTreeMap;

/// Options for HTML output
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

impl HtmlOptions {
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Self::default()
        }
    }
}

struct Context<'o> {
    options: &'o HtmlOptions,
    depth: usize,
    buffer: String,
}

impl<'o> Context<'o> {
    fn new(options: &'o HtmlOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Serialize nodes to an HTML fragment
pub fn to_html(nodes: &[VNode], options: &HtmlOptions) -> String {
    let mut ctx = Context::new(options);
    for node in nodes {
        write_node(node, &mut ctx);
    }
    ctx.get_output()
}

/// Serialize a rendered page to a standalone HTML document
pub fn to_html_document(page: &RenderedPage, page_ctx: &PageContext, options: &HtmlOptions) -> String {
    let mut ctx = Context::new(options);
    let title = if page_ctx.site_name.is_empty() {
        "Page"
    } else {
        page_ctx.site_name.as_str()
    };

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html lang=\"en\">");
    ctx.indent();

    ctx.add_line("<head>");
    ctx.indent();
    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!("<title>{}</title>", escape_html(title)));
    ctx.dedent();
    ctx.add_line("</head>");

    ctx.add_line("<body>");
    ctx.indent();
    ctx.add_line("<main class=\"page\">");
    ctx.indent();
    for node in &page.nodes {
        write_node(node, &mut ctx);
    }
    ctx.dedent();
    ctx.add_line("</main>");
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    ctx.get_output()
}

fn write_node(node: &VNode, ctx: &mut Context) {
    match node {
        VNode::Text { content } => ctx.add_line(&escape_html(content)),
        VNode::Comment { content } => {
            ctx.add_line(&format!("<!-- {} -->", content.replace("--", "- -")));
        }
        VNode::Element {
            tag,
            attributes,
            children,
            key,
        } => {
            let open = open_tag(tag, attributes, key.as_deref());

            if children.is_empty() && is_self_closing(tag) {
                ctx.add_line(&format!("{} />", open));
            } else if children.iter().all(|c| matches!(c, VNode::Text { .. })) {
                let text: String = children
                    .iter()
                    .map(|c| escape_html(&c.text_content()))
                    .collect();
                ctx.add_line(&format!("{}>{}</{}>", open, text, tag));
            } else {
                ctx.add_line(&format!("{}>", open));
                ctx.indent();
                for child in children {
                    write_node(child, ctx);
                }
                ctx.dedent();
                ctx.add_line(&format!("</{}>", tag));
            }
        }
    }
}

fn open_tag(tag: &str, attributes: &BTreeMap<String, String>, key: Option<&str>) -> String {
    let mut open = format!("<{}", tag);
    for (name, value) in attributes {
        open.push(' ');
        open.push_str(name);
        if !value.is_empty() {
            open.push_str("=\"");
            open.push_str(&escape_html(value));
            open.push('"');
        }
    }
    if let Some(key) = key {
        open.push_str(" data-key=\"");
        open.push_str(&escape_html(key));
        open.push('"');
    }
    open
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "img"
            | "input"
            | "br"
            | "hr"
            | "meta"
            | "link"
            | "area"
            | "base"
            | "col"
            | "embed"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}
