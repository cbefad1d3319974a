//! Transactional loading of dimension, fact and junction rows.
//!
//! Each phase runs in its own transaction and returns the natural-key to
//! surrogate-id map that later phases resolve against. A failed phase rolls
//! back (the transaction is dropped uncommitted) and nothing after it runs.

use rusqlite::params;
use std::collections::{HashMap, HashSet};

use super::schema_gen::generate_insert;
use super::sqlite::SqliteWriter;
use crate::error::{insert_error, Error, Result};
use crate::model::{Campaign, Planet};
use crate::normalize::Dimensions;
use crate::schema::tables::{BIOMES, CAMPAIGNS, ENVIRONMENTS, ENVIRONMENTS_MAPPING, PLANETS, SECTORS};
use crate::ui::Ui;

/// Surrogate ids of the dimension rows, keyed by natural key
#[derive(Debug, Clone, Default)]
pub struct DimensionIds {
    pub environments: HashMap<String, i64>,
    pub biomes: HashMap<String, i64>,
    pub sectors: HashMap<String, i64>,
}

/// Surrogate ids of planet rows, keyed by planet index
pub type PlanetIds = HashMap<i64, i64>;

/// Outcome of the campaign phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CampaignLoad {
    pub rows: u64,
    /// Campaigns stored without a planet relation
    pub unresolved: u64,
}

impl SqliteWriter {
    /// Phase 1: environments, then biomes, then sectors
    pub fn load_dimensions(&mut self, dims: &Dimensions, ui: &mut impl Ui) -> Result<DimensionIds> {
        let mut ids = DimensionIds::default();
        let tx = self.conn.transaction()?;
        {
            let total = dims.environments.len() as u64;
            let mut stmt = tx.prepare_cached(&generate_insert(&ENVIRONMENTS))?;
            for (i, env) in dims.environments.iter().enumerate() {
                stmt.execute(params![env.name, env.description])
                    .map_err(insert_error(ENVIRONMENTS.name, &env.name))?;
                ids.environments.insert(env.name.clone(), tx.last_insert_rowid());
                ui.set_progress(i as u64 + 1, total, ENVIRONMENTS.name);
            }

            let total = dims.biomes.len() as u64;
            let mut stmt = tx.prepare_cached(&generate_insert(&BIOMES))?;
            for (i, biome) in dims.biomes.iter().enumerate() {
                stmt.execute(params![biome.slug, biome.description])
                    .map_err(insert_error(BIOMES.name, &biome.slug))?;
                ids.biomes.insert(biome.slug.clone(), tx.last_insert_rowid());
                ui.set_progress(i as u64 + 1, total, BIOMES.name);
            }

            let total = dims.sectors.len() as u64;
            let mut stmt = tx.prepare_cached(&generate_insert(&SECTORS))?;
            for (i, sector) in dims.sectors.iter().enumerate() {
                stmt.execute(params![sector])
                    .map_err(insert_error(SECTORS.name, sector))?;
                ids.sectors.insert(sector.clone(), tx.last_insert_rowid());
                ui.set_progress(i as u64 + 1, total, SECTORS.name);
            }
        }
        tx.commit()?;

        log::info!(
            "Loaded {} environments, {} biomes, {} sectors",
            ids.environments.len(),
            ids.biomes.len(),
            ids.sectors.len()
        );
        Ok(ids)
    }

    /// Phase 2: planet rows with their sector and biome resolved
    pub fn load_planets(
        &mut self,
        planets: &[Planet],
        dims: &DimensionIds,
        ui: &mut impl Ui,
    ) -> Result<PlanetIds> {
        let mut ids = PlanetIds::with_capacity(planets.len());
        let total = planets.len() as u64;
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(&generate_insert(&PLANETS))?;
            for (i, planet) in planets.iter().enumerate() {
                let sector_id = match &planet.sector {
                    Some(name) => Some(*dims.sectors.get(name).ok_or_else(|| {
                        Error::unresolved(PLANETS.name, planet.index, format!("unknown sector '{}'", name))
                    })?),
                    None => None,
                };
                let biome_id = match &planet.biome {
                    Some(biome) => Some(*dims.biomes.get(&biome.slug).ok_or_else(|| {
                        Error::unresolved(PLANETS.name, planet.index, format!("unknown biome '{}'", biome.slug))
                    })?),
                    None => None,
                };

                stmt.execute(params![planet.index, planet.name, sector_id, biome_id])
                    .map_err(insert_error(PLANETS.name, planet.index))?;
                ids.insert(planet.index, tx.last_insert_rowid());
                ui.set_progress(i as u64 + 1, total, PLANETS.name);
            }
        }
        tx.commit()?;

        log::info!("Loaded {} planets", ids.len());
        Ok(ids)
    }

    /// Phase 3: one junction row per planet/environment pair
    pub fn load_environment_mappings(
        &mut self,
        planets: &[Planet],
        planet_ids: &PlanetIds,
        dims: &DimensionIds,
        ui: &mut impl Ui,
    ) -> Result<u64> {
        let total = planets.len() as u64;
        let mut count: u64 = 0;
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(&generate_insert(&ENVIRONMENTS_MAPPING))?;
            for (i, planet) in planets.iter().enumerate() {
                ui.set_progress(i as u64 + 1, total, ENVIRONMENTS_MAPPING.name);
                if planet.environments.is_empty() {
                    continue;
                }

                let planet_id = *planet_ids.get(&planet.index).ok_or_else(|| {
                    Error::unresolved(ENVIRONMENTS_MAPPING.name, planet.index, "planet was not loaded")
                })?;

                // a repeated environment on one planet maps once
                let mut seen = HashSet::with_capacity(planet.environments.len());
                for env in &planet.environments {
                    let env_id = *dims.environments.get(&env.name).ok_or_else(|| {
                        Error::unresolved(
                            ENVIRONMENTS_MAPPING.name,
                            planet.index,
                            format!("unknown environment '{}'", env.name),
                        )
                    })?;
                    if !seen.insert(env_id) {
                        continue;
                    }
                    stmt.execute(params![planet_id, env_id])
                        .map_err(insert_error(ENVIRONMENTS_MAPPING.name, planet.index))?;
                    count += 1;
                }
            }
        }
        tx.commit()?;

        log::info!("Loaded {} environment mappings", count);
        Ok(count)
    }

    /// Phase 4: campaigns, with the planet stored as NULL when it cannot be resolved
    pub fn load_campaigns(
        &mut self,
        campaigns: &[Campaign],
        planet_ids: &PlanetIds,
        ui: &mut impl Ui,
    ) -> Result<CampaignLoad> {
        let mut load = CampaignLoad::default();
        let total = campaigns.len() as u64;
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(&generate_insert(&CAMPAIGNS))?;
            for (i, campaign) in campaigns.iter().enumerate() {
                let planet_id = campaign
                    .planet
                    .and_then(|planet| planet_ids.get(&planet.index).copied());

                if planet_id.is_none() {
                    load.unresolved += 1;
                    match campaign.planet {
                        Some(planet) => log::warn!(
                            "Campaign #{} references unknown planet {}",
                            i,
                            planet.index
                        ),
                        None => log::debug!("Campaign #{} has no planet", i),
                    }
                }

                stmt.execute(params![
                    campaign.faction,
                    campaign.players,
                    campaign.health,
                    campaign.max_health,
                    campaign.percentage.normalize().to_string(),
                    campaign.defense,
                    campaign.major_order,
                    campaign.expire_date_time,
                    planet_id,
                ])
                .map_err(insert_error(CAMPAIGNS.name, format!("#{}", i)))?;
                load.rows += 1;
                ui.set_progress(i as u64 + 1, total, CAMPAIGNS.name);
            }
        }
        tx.commit()?;

        log::info!(
            "Loaded {} campaigns ({} without a planet)",
            load.rows,
            load.unresolved
        );
        Ok(load)
    }
}
