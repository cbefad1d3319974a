pub mod campaigns;
pub mod planets;

pub use campaigns::decode_campaigns;
pub use planets::decode_planets;

/// Empty, whitespace-only or literal `null` documents decode to nothing.
fn is_blank(json: &str) -> bool {
    let trimmed = json.trim();
    trimmed.is_empty() || trimmed == "null"
}
