use anyhow::{Context, Result};
use hd2_planets_to_sqlite::{
    cli::{Cli, Commands},
    config::Dataset,
    download::{format_bytes, ApiClient, CacheManager, LocalSource, Source},
    schema::table_names,
    ui::format_duration,
    ConsoleUi, Pipeline, RunSummary, UiApp,
};
use std::fs;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // The TUI owns the terminal; log lines would tear through it
    if !cli.tui {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let dataset = cli.command.dataset();

    match cli.command {
        Commands::Sync {
            output_db,
            endpoints,
            ..
        } => {
            let client = ApiClient::new(endpoints.into())?;
            build(client, &output_db, dataset, cli.tui)?;
        }

        Commands::Download {
            output, endpoints, ..
        } => {
            let client = ApiClient::new(endpoints.into())?;
            let cache = CacheManager::new(output)?;

            let planets = client.fetch_planets()?;
            let path = cache.store_planets(&planets)?;
            println!("Planets ({}) saved to {:?}", format_bytes(planets.len() as u64), path);

            if dataset.includes_campaigns() {
                let campaigns = client.fetch_campaigns()?;
                let path = cache.store_campaigns(&campaigns)?;
                println!("Campaigns ({}) saved to {:?}", format_bytes(campaigns.len() as u64), path);
            }
        }

        Commands::Convert {
            input_dir,
            output_db,
            ..
        } => {
            let input_dir = match input_dir {
                Some(dir) => dir,
                None => {
                    let cache = CacheManager::new(None)?;
                    if !cache.has_planets() {
                        anyhow::bail!(
                            "No downloaded data in {:?}. Run 'download' first or pass --input-dir",
                            cache.cache_dir()
                        );
                    }
                    cache.cache_dir().to_path_buf()
                }
            };
            build(LocalSource::new(input_dir), &output_db, dataset, cli.tui)?;
        }

        Commands::ListTables => {
            println!("Available tables:\n");
            for name in table_names() {
                println!("  {}", name);
            }
        }
    }

    Ok(())
}

/// Replace `output_db` with a freshly built database
fn build<S: Source>(source: S, output_db: &Path, dataset: Dataset, tui: bool) -> Result<()> {
    remove_database(output_db)?;
    let pipeline = Pipeline::new(source, output_db, dataset);

    if tui {
        let mut ui = UiApp::new()?;
        match pipeline.run(&mut ui) {
            Ok(summary) => ui.finish(&summary_line(output_db, &summary)),
            Err(err) => {
                ui.finish(&format!("Failed: {}", err))?;
                Err(err.into())
            }
        }
    } else {
        let summary = pipeline
            .run(&mut ConsoleUi::new())
            .with_context(|| format!("Failed to build {:?}", output_db))?;
        println!("\n{}", summary_line(output_db, &summary));
        Ok(())
    }
}

fn summary_line(output_db: &Path, summary: &RunSummary) -> String {
    format!(
        "Created {:?} ({} planets, {} campaigns, {} rows total) in {}",
        output_db,
        summary.planets,
        summary.campaigns,
        summary.total_rows(),
        format_duration(summary.elapsed)
    )
}

/// Remove a previous database along with its WAL side files
fn remove_database(path: &Path) -> Result<()> {
    let mut targets = vec![path.to_path_buf()];
    for suffix in ["-wal", "-shm"] {
        let mut name = path.as_os_str().to_owned();
        name.push(suffix);
        targets.push(PathBuf::from(name));
    }

    for target in targets {
        if target.exists() {
            fs::remove_file(&target)
                .with_context(|| format!("Failed to remove existing database file {:?}", target))?;
        }
    }
    Ok(())
}
