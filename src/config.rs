//! Run configuration: endpoints, dataset variant and default paths

pub const PLANETS_URL: &str = "https://helldiverstrainingmanual.com/api/v1/planets";
pub const CAMPAIGNS_URL: &str = "https://helldiverstrainingmanual.com/api/v1/war/campaign";

/// Default output database, relative to the working directory
pub const DEFAULT_DB_FILE: &str = "planets.db";

/// File names used for downloaded documents
pub const PLANETS_FILE: &str = "planets.json";
pub const CAMPAIGNS_FILE: &str = "campaigns.json";

/// Remote endpoints serving the raw JSON documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub planets: String,
    pub campaigns: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            planets: PLANETS_URL.to_string(),
            campaigns: CAMPAIGNS_URL.to_string(),
        }
    }
}

/// Which variant of the dataset a run ingests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dataset {
    PlanetsOnly,
    #[default]
    WithCampaigns,
}

impl Dataset {
    pub fn from_skip_campaigns(skip: bool) -> Self {
        if skip {
            Dataset::PlanetsOnly
        } else {
            Dataset::WithCampaigns
        }
    }

    pub fn includes_campaigns(self) -> bool {
        self == Dataset::WithCampaigns
    }
}
