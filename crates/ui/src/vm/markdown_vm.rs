use std::collections::{HashMap, HashSet};

#[must_use]
pub fn markdown_to_html(input: &str) -> String {
    let mut options = pulldown_cmark::Options::empty();
    options.insert(pulldown_cmark::Options::ENABLE_STRIKETHROUGH);
    options.insert(pulldown_cmark::Options::ENABLE_TABLES);

    let normalized = hard_breaks(input);
    let parser = pulldown_cmark::Parser::new_ext(&normalized, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_html(&html)
}

/// Model output uses bare newlines between the answer and its translation;
/// keep them as line breaks instead of letting Markdown fold them.
fn hard_breaks(input: &str) -> String {
    let normalized = input.replace("\r\n", "\n").replace('\r', "\n");
    let mut out = String::with_capacity(normalized.len());
    let mut in_fence = false;
    let mut lines = normalized.split('\n').peekable();
    while let Some(line) = lines.next() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
        }
        let text = if in_fence {
            line
        } else {
            line.trim_end_matches([' ', '\t'])
        };
        out.push_str(text);
        let Some(next) = lines.peek() else {
            break;
        };
        if !in_fence
            && !text.trim().is_empty()
            && !next.trim().is_empty()
            && !starts_block(text)
            && !starts_block(next)
        {
            out.push('\\');
        }
        out.push('\n');
    }
    out
}

fn starts_block(line: &str) -> bool {
    let line = line.trim_start();
    if ["#", ">", "|", "```", "- ", "* ", "+ "]
        .iter()
        .any(|marker| line.starts_with(marker))
    {
        return true;
    }
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    digits > 0 && matches!(line[digits..].chars().next(), Some('.' | ')'))
}

#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "div", "span", "br", "em", "strong", "b", "i", "del", "code", "pre", "blockquote",
        "ul", "ol", "li", "table", "thead", "tbody", "tr", "th", "td", "sup", "sub",
    ]
    .into_iter()
    .collect();

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(HashMap::new())
        .clean(html)
        .to_string()
}
