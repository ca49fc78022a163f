//! Index page rendering.
//!
//! Every visitor field is client-controlled and is escaped before it
//! reaches the page.

use std::fmt::Write;

use honeypot_core::VisitorEvent;

const INDEX_TEMPLATE: &str = include_str!("../assets/index.html");

/// robots.txt body. Lists the routes well-behaved crawlers must skip.
pub const ROBOTS_TXT: &str = include_str!("../assets/robots.txt");

/// Render the index page with the visitor table.
pub fn index_page(visitors: &[VisitorEvent]) -> String {
    INDEX_TEMPLATE
        .replace("{{visitor_count}}", &visitors.len().to_string())
        .replace("{{visitor_rows}}", &visitor_rows(visitors))
}

fn visitor_rows(visitors: &[VisitorEvent]) -> String {
    if visitors.is_empty() {
        return "            <tr><td colspan=\"5\" class=\"muted\">No visitors caught yet.</td></tr>"
            .to_string();
    }

    let mut rows = String::new();
    for v in visitors {
        let _ = writeln!(
            rows,
            concat!(
                "            <tr><td>{}</td><td>{}</td><td class=\"ua\">{}</td>",
                "<td class=\"path\">{}</td><td class=\"category\">{}</td></tr>",
            ),
            v.observed_at().format("%Y-%m-%d %H:%M:%S"),
            escape_html(v.source_address()),
            escape_html(v.user_agent()),
            escape_html(v.request_path()),
            v.category(),
        );
    }
    rows
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
