//! Domain model for planets and campaigns
//!
//! Dimension entities (`Biome`, `Environment`) compare by full value, so two
//! planets carrying the same biome produce equal, hash-identical values and
//! collapse to a single row during normalization.

use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Biome {
    /// Natural key, always in canonical form (see [`canonical_slug`])
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Environment {
    /// Natural key
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Planet {
    /// Natural key, unique across the dataset
    pub index: i64,
    pub name: String,
    /// Sector name, resolved to `sectors.id` at load time
    pub sector: Option<String>,
    pub biome: Option<Biome>,
    pub environments: Vec<Environment>,
}

/// Reference-only planet stub carried by a campaign until it is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlanetRef {
    pub index: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Campaign {
    pub planet: Option<PlanetRef>,
    pub faction: String,
    pub players: i64,
    pub health: f64,
    pub max_health: f64,
    /// Exact decimal, never routed through `f64`
    pub percentage: Decimal,
    pub defense: bool,
    pub major_order: bool,
    /// Epoch seconds, `None` when the source omits it
    pub expire_date_time: Option<i64>,
}

/// Upper-case the first character of a slug, leaving the rest untouched.
pub fn canonical_slug(slug: &str) -> String {
    let mut chars = slug.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
