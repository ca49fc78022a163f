//! Test fixtures.

/// A user agent typical of a scraper that ignores robots.txt.
pub const SCRAPER_UA: &str = "Mozilla/5.0 (compatible; BadBot/3.1; +http://bad.example/bot)";

/// Client address used by the fixtures, sent via X-Forwarded-For.
pub const CLIENT_IP: &str = "203.0.113.77";

/// The three trap routes with the category each records.
pub fn trap_routes() -> [(&'static str, &'static str); 3] {
    [
        ("/forbidden-scan", "forbidden"),
        ("/javascript-trap", "javascript"),
        ("/secret-page", "secret"),
    ]
}

/// A user agent long enough to blow through a small byte budget.
pub fn oversized_user_agent(len: usize) -> String {
    format!("HugeBot/{}", "x".repeat(len))
}
