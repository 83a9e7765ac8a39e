use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static BLOCK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p, h3, li, img, option").expect("valid selector"));

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("valid selector"));

/// Flattens rendered markup into terminal lines.
///
/// Paragraphs, headings, list items and options each become one line; images
/// and links are shown with their targets. Markup without any of those is
/// returned as a single line of text.
pub fn lines(html: &str) -> Vec<String> {
    let doc = Html::parse_fragment(html);

    let lines: Vec<String> = doc
        .select(&BLOCK_SELECTOR)
        .filter_map(|element| block_line(&element))
        .collect();

    if !lines.is_empty() {
        return lines;
    }

    let text = collapse(doc.root_element().text());
    if text.is_empty() { Vec::new() } else { vec![text] }
}

fn block_line(element: &ElementRef) -> Option<String> {
    match element.value().name() {
        "img" => {
            let src = element.value().attr("src")?;
            let alt = element.value().attr("alt").unwrap_or("image");
            Some(format!("[{}] {}", alt, src))
        }
        "h3" => Some(format!("== {} ==", collapse(element.text()))),
        "li" => {
            let links: Vec<String> = element
                .select(&LINK_SELECTOR)
                .filter_map(|a| {
                    let href = a.value().attr("href")?;
                    Some(format!("{} <{}>", collapse(a.text()), href))
                })
                .collect();
            if links.is_empty() {
                Some(format!("- {}", collapse(element.text())))
            } else {
                Some(format!("- {}", links.join("  ")))
            }
        }
        _ => Some(collapse(element.text())),
    }
}

/// Joins text nodes and normalizes whitespace
fn collapse<'a>(text: impl Iterator<Item = &'a str>) -> String {
    text.collect::<Vec<_>>()
        .join("")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
