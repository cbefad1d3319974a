use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Dataset, Endpoints, CAMPAIGNS_URL, DEFAULT_DB_FILE, PLANETS_URL};

#[derive(Parser, Debug)]
#[command(name = "hd2-planets-to-sqlite")]
#[command(version, about = "Load Helldivers 2 planet and campaign data into SQLite")]
pub struct Cli {
    /// Show progress in a full-screen terminal UI instead of log lines
    #[arg(long, global = true)]
    pub tui: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download from the API and build the database
    Sync {
        /// Output SQLite database path (replaced if it exists)
        #[arg(default_value = DEFAULT_DB_FILE)]
        output_db: PathBuf,

        #[command(flatten)]
        endpoints: EndpointArgs,

        /// Only load planets and their dimensions
        #[arg(long)]
        no_campaigns: bool,
    },

    /// Download the raw JSON documents without building a database
    Download {
        /// Output directory (defaults to the cache directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        endpoints: EndpointArgs,

        /// Skip the campaigns endpoint
        #[arg(long)]
        no_campaigns: bool,
    },

    /// Build the database from previously downloaded JSON files
    Convert {
        /// Directory containing planets.json and campaigns.json
        #[arg(short, long)]
        input_dir: Option<PathBuf>,

        /// Output SQLite database path (replaced if it exists)
        #[arg(default_value = DEFAULT_DB_FILE)]
        output_db: PathBuf,

        /// Only load planets and their dimensions
        #[arg(long)]
        no_campaigns: bool,
    },

    /// List all table names
    ListTables,
}

#[derive(Args, Debug, Clone)]
pub struct EndpointArgs {
    /// Planets endpoint
    #[arg(long, env = "HD2_PLANETS_URL", default_value = PLANETS_URL)]
    pub planets_url: String,

    /// Campaigns endpoint
    #[arg(long, env = "HD2_CAMPAIGNS_URL", default_value = CAMPAIGNS_URL)]
    pub campaigns_url: String,
}

impl From<EndpointArgs> for Endpoints {
    fn from(args: EndpointArgs) -> Self {
        Endpoints {
            planets: args.planets_url,
            campaigns: args.campaigns_url,
        }
    }
}

impl Commands {
    pub fn dataset(&self) -> Dataset {
        match self {
            Commands::Sync { no_campaigns, .. }
            | Commands::Download { no_campaigns, .. }
            | Commands::Convert { no_campaigns, .. } => Dataset::from_skip_campaigns(*no_campaigns),
            Commands::ListTables => Dataset::WithCampaigns,
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_defaults() {
        let cli = Cli::try_parse_from(["hd2-planets-to-sqlite", "sync"]).unwrap();
        assert!(!cli.tui);
        assert_eq!(cli.command.dataset(), Dataset::WithCampaigns);
        match cli.command {
            Commands::Sync {
                output_db,
                endpoints,
                no_campaigns,
            } => {
                assert_eq!(output_db, PathBuf::from(DEFAULT_DB_FILE));
                assert!(!no_campaigns);
                assert_eq!(Endpoints::from(endpoints), Endpoints::default());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_convert_planets_only() {
        let cli = Cli::try_parse_from([
            "hd2-planets-to-sqlite",
            "--tui",
            "convert",
            "-i",
            "/tmp/cache",
            "out.db",
            "--no-campaigns",
        ])
        .unwrap();
        assert!(cli.tui);
        assert_eq!(cli.command.dataset(), Dataset::PlanetsOnly);
        match cli.command {
            Commands::Convert { input_dir, output_db, .. } => {
                assert_eq!(input_dir, Some(PathBuf::from("/tmp/cache")));
                assert_eq!(output_db, PathBuf::from("out.db"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_endpoint_override() {
        let cli = Cli::try_parse_from([
            "hd2-planets-to-sqlite",
            "sync",
            "--planets-url",
            "http://localhost:8080/planets",
        ])
        .unwrap();
        match cli.command {
            Commands::Sync { endpoints, .. } => {
                assert_eq!(endpoints.planets_url, "http://localhost:8080/planets")
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
