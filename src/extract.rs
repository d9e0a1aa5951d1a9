use scraper::{ElementRef, Html, Selector};

/// Content roots, tried in order. The first that matches wins.
const ROOT_SELECTORS: &[&str] = &["main", "[role='main']", "body"];

/// Page chrome and non-text elements dropped from the dump.
const SKIP_TAGS: &[&str] = &["script", "style", "noscript", "nav", "header", "footer"];

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "br", "li", "tr", "section", "article", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// Visible text of a page's main content area, one block per line.
pub fn main_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut text = String::new();
    for selector_str in ROOT_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        let mut roots = document.select(&selector).peekable();
        if roots.peek().is_none() {
            continue;
        }
        for root in roots {
            push_element_text(&root, &mut text);
            text.push('\n');
        }
        break;
    }

    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn push_element_text(element: &ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(el) = child.value().as_element() {
            let tag = el.name();
            if SKIP_TAGS.contains(&tag) {
                continue;
            }
            if let Some(child_ref) = ElementRef::wrap(child) {
                push_element_text(&child_ref, out);
                if BLOCK_TAGS.contains(&tag) {
                    out.push('\n');
                }
            }
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
        }
    }
}
