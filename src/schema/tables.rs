//! Table definitions for the planets database
//!
//! Dimension tables come first, then facts, then the junction; `ALL_TABLES`
//! is already in dependency order.

use super::types::*;
use crate::config::Dataset;

// =============================================================================
// Dimension Tables
// =============================================================================

pub static ENVIRONMENTS: TableSchema = TableSchema {
    name: "environments",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::required("name", ColumnType::Text).unique(),
        Column::new("description", ColumnType::Text),
    ],
    foreign_keys: &[],
};

pub static BIOMES: TableSchema = TableSchema {
    name: "biomes",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::required("slug", ColumnType::Text).unique(),
        Column::new("description", ColumnType::Text),
    ],
    foreign_keys: &[],
};

pub static SECTORS: TableSchema = TableSchema {
    name: "sectors",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::required("name", ColumnType::Text).unique(),
    ],
    foreign_keys: &[],
};

// =============================================================================
// Fact Tables
// =============================================================================

pub static PLANETS: TableSchema = TableSchema {
    name: "planets",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::required("index", ColumnType::Integer).unique(),
        Column::required("name", ColumnType::Text),
        Column::new("sector", ColumnType::Integer),
        Column::new("biome", ColumnType::Integer),
    ],
    foreign_keys: &[
        ForeignKey::new("sector", "sectors"),
        ForeignKey::new("biome", "biomes"),
    ],
};

pub static CAMPAIGNS: TableSchema = TableSchema {
    name: "campaigns",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::required("faction", ColumnType::Text),
        Column::required("players", ColumnType::Integer),
        Column::required("health", ColumnType::Real),
        Column::required("maxHealth", ColumnType::Real),
        Column::required("percentage", ColumnType::Decimal),
        Column::required("defense", ColumnType::Boolean),
        Column::required("majorOrder", ColumnType::Boolean),
        Column::new("expireDateTime", ColumnType::Integer),
        Column::new("planetId", ColumnType::Integer),
    ],
    foreign_keys: &[ForeignKey::new("planetId", "planets")],
};

// =============================================================================
// Junction Tables
// =============================================================================

pub static ENVIRONMENTS_MAPPING: TableSchema = TableSchema {
    name: "environmentsMapping",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::required("planet", ColumnType::Integer),
        Column::required("env", ColumnType::Integer),
    ],
    foreign_keys: &[
        ForeignKey::new("planet", "planets"),
        ForeignKey::new("env", "environments"),
    ],
};

// =============================================================================
// Lookup
// =============================================================================

pub static ALL_TABLES: &[&TableSchema] = &[
    &ENVIRONMENTS,
    &BIOMES,
    &SECTORS,
    &PLANETS,
    &ENVIRONMENTS_MAPPING,
    &CAMPAIGNS,
];

/// Tables created for a dataset variant, in creation order
pub fn tables_for(dataset: Dataset) -> Vec<&'static TableSchema> {
    ALL_TABLES
        .iter()
        .copied()
        .filter(|t| dataset.includes_campaigns() || t.name != CAMPAIGNS.name)
        .collect()
}

pub fn table_names() -> Vec<&'static str> {
    ALL_TABLES.iter().map(|t| t.name).collect()
}
