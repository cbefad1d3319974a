//! Fetch → decode → normalize → create schema → load, as one fail-fast run.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::Dataset;
use crate::download::Source;
use crate::error::{Error, Result};
use crate::model::{Campaign, Planet};
use crate::normalize::Dimensions;
use crate::parser::{decode_campaigns, decode_planets};
use crate::schema::tables_for;
use crate::ui::{Phase, Ui};
use crate::writer::SqliteWriter;

/// Row counts and timing of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub planets: u64,
    pub environments: u64,
    pub biomes: u64,
    pub sectors: u64,
    pub environment_mappings: u64,
    pub campaigns: u64,
    pub unresolved_campaigns: u64,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn total_rows(&self) -> u64 {
        self.planets
            + self.environments
            + self.biomes
            + self.sectors
            + self.environment_mappings
            + self.campaigns
    }
}

/// Raw documents as fetched
struct Fetched {
    planets: String,
    campaigns: Option<String>,
}

/// One run against one database file.
///
/// The run consumes the pipeline; nothing is carried over between runs.
pub struct Pipeline<S: Source> {
    source: S,
    db_path: PathBuf,
    dataset: Dataset,
    phase: Phase,
}

impl<S: Source> Pipeline<S> {
    pub fn new(source: S, db_path: impl AsRef<Path>, dataset: Dataset) -> Self {
        Self {
            source,
            db_path: db_path.as_ref().to_path_buf(),
            dataset,
            phase: Phase::Idle,
        }
    }

    /// Execute every step, stopping at the first failure.
    ///
    /// `ui` receives `started()` on leaving Idle and `completed(elapsed)`
    /// only when every phase succeeded. A failed run leaves whatever was
    /// already committed in the database file.
    pub fn run(mut self, ui: &mut impl Ui) -> Result<RunSummary> {
        ui.started();
        let start = Instant::now();

        match self.execute(ui) {
            Ok(mut summary) => {
                summary.elapsed = start.elapsed();
                self.enter(Phase::Done, ui);
                ui.clear_progress();
                ui.completed(summary.elapsed);
                Ok(summary)
            }
            Err(err) => {
                log::error!("Failed during {}: {}", self.phase, err);
                self.enter(Phase::Failed, ui);
                Err(err)
            }
        }
    }

    fn enter(&mut self, phase: Phase, ui: &mut impl Ui) {
        log::debug!("{:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        ui.set_phase(phase);
    }

    fn execute(&mut self, ui: &mut impl Ui) -> Result<RunSummary> {
        self.enter(Phase::Fetching, ui);
        let fetched = self.fetch(ui)?;

        self.enter(Phase::Decoding, ui);
        let (planets, campaigns) = self.decode(&fetched, ui)?;

        self.enter(Phase::Normalizing, ui);
        let dims = Dimensions::from_planets(&planets);
        ui.log(format!(
            "Unique environments: {}, biomes: {}, sectors: {}",
            dims.environments.len(),
            dims.biomes.len(),
            dims.sectors.len()
        ));

        self.enter(Phase::SchemaInit, ui);
        let mut writer = SqliteWriter::open(&self.db_path)?;
        writer.create_schema(&tables_for(self.dataset))?;

        self.enter(Phase::Loading, ui);
        let dim_ids = writer.load_dimensions(&dims, ui)?;
        let planet_ids = writer.load_planets(&planets, &dim_ids, ui)?;
        let environment_mappings =
            writer.load_environment_mappings(&planets, &planet_ids, &dim_ids, ui)?;
        let campaign_load = match campaigns {
            Some(campaigns) => Some(writer.load_campaigns(&campaigns, &planet_ids, ui)?),
            None => None,
        };
        writer.finalize()?;

        let (campaigns, unresolved_campaigns) = campaign_load
            .map(|c| (c.rows, c.unresolved))
            .unwrap_or_default();
        Ok(RunSummary {
            planets: planet_ids.len() as u64,
            environments: dim_ids.environments.len() as u64,
            biomes: dim_ids.biomes.len() as u64,
            sectors: dim_ids.sectors.len() as u64,
            environment_mappings,
            campaigns,
            unresolved_campaigns,
            elapsed: Duration::ZERO,
        })
    }

    fn fetch(&self, ui: &mut impl Ui) -> Result<Fetched> {
        ui.log(format!("Fetching planets from {}", self.source.describe()));
        let planets = self.source.fetch_planets()?;

        let campaigns = if self.dataset.includes_campaigns() {
            ui.log("Fetching campaigns");
            Some(self.source.fetch_campaigns()?)
        } else {
            None
        };

        Ok(Fetched { planets, campaigns })
    }

    fn decode(&self, fetched: &Fetched, ui: &mut impl Ui) -> Result<(Vec<Planet>, Option<Vec<Campaign>>)> {
        let planets = decode_planets(&fetched.planets)?;
        ui.log(format!("Planets received: {}", planets.len()));

        let campaigns = match &fetched.campaigns {
            Some(json) => {
                let campaigns = decode_campaigns(json)?;
                ui.log(format!("Campaigns received: {}", campaigns.len()));
                Some(campaigns)
            }
            None => None,
        };

        if planets.is_empty() {
            return Err(Error::EmptyDataset);
        }
        Ok((planets, campaigns))
    }
}
