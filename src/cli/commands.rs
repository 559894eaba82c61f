use std::fs;
use std::path::{Path, PathBuf};

use postgres::Client;
use tracing::error;
use validator::Validate;

use crate::cli::args::{Cli, Commands};
use crate::config::{AppConfig, RetryPolicy};
use crate::db::{connect_with_retry, schema, LoadReport, ObservationLoader, StationLoader};
use crate::error::{LoadError, Result};
use crate::utils::{default_stations_path, is_observation_file, logging, ProgressReporter};

pub fn run(cli: Cli) -> Result<()> {
    let Cli {
        command,
        verbose,
        log_file,
    } = cli;

    let mut config = AppConfig::from_env()?;
    if let Some(log_file) = log_file {
        config.log_file = log_file;
    }

    let outcome = match command {
        Commands::Observations {
            input_dir,
            batch_size,
        } => {
            if let Some(input_dir) = input_dir {
                config.data_dir = input_dir;
            }
            if let Some(batch_size) = batch_size {
                config.batch_size = batch_size;
            }
            config.validate()?;
            logging::init(&config.log_file, verbose)?;
            run_observations(&config)
        }

        Commands::Stations { input_file } => {
            config.validate()?;
            logging::init(&config.log_file, verbose)?;
            let input_file =
                input_file.unwrap_or_else(|| default_stations_path(&config.data_dir));
            run_stations(&config, &input_file)
        }
    };

    // Fatal failures reach the log file as well as the console.
    if let Err(err) = &outcome {
        error!("{}", err);
    }
    outcome
}

fn run_observations(config: &AppConfig) -> Result<()> {
    println!("Loading observations from {}", config.data_dir.display());

    let mut client = connect_with_retry(config, &RetryPolicy::default())?;
    let outcome = load_observation_files(&mut client, config);

    // One connection per run, closed on every path out.
    if let Err(err) = client.close() {
        error!("closing database connection failed: {}", err);
    }
    println!("Database connection closed.");

    let totals = outcome?;
    println!("\n{}", totals.summary());
    Ok(())
}

fn load_observation_files(client: &mut Client, config: &AppConfig) -> Result<LoadReport> {
    schema::ensure_observations_table(client)?;

    if !config.data_dir.is_dir() {
        return Err(LoadError::MissingInputDir(config.data_dir.clone()));
    }
    let files = observation_files(&config.data_dir)?;
    if files.is_empty() {
        println!("No observation files found");
        return Ok(LoadReport::default());
    }
    println!("Found {} observation files", files.len());

    let loader = ObservationLoader::new(config.batch_size);
    let progress = ProgressReporter::new(files.len() as u64, "Loading observation files", false);
    let mut totals = LoadReport::default();

    for file in &files {
        progress.println(&format!("Loading data from {}", file.display()));
        let report = loader.load_file(client, file, Some(&progress))?;
        progress.increment(1);
        totals.merge(&report);
    }

    progress.finish_with_message(&format!("Loaded {} files", files.len()));
    Ok(totals)
}

fn run_stations(config: &AppConfig, input_file: &Path) -> Result<()> {
    println!("Loading station metadata from {}", input_file.display());

    let mut client = connect_with_retry(config, &RetryPolicy::default())?;
    let outcome = load_station_file(&mut client, config, input_file);

    if let Err(err) = client.close() {
        error!("closing database connection failed: {}", err);
    }
    println!("Database connection closed.");

    let report = outcome?;
    println!("\n{}", report.summary());
    Ok(())
}

fn load_station_file(
    client: &mut Client,
    config: &AppConfig,
    input_file: &Path,
) -> Result<LoadReport> {
    schema::ensure_stations_table(client)?;

    if !input_file.is_file() {
        return Err(LoadError::MissingInputFile(input_file.to_path_buf()));
    }

    let loader = StationLoader::new(config.batch_size);
    let progress = ProgressReporter::new_spinner("Loading stations...", false);
    let report = loader.load_file(client, input_file, Some(&progress))?;
    progress.finish_with_message(&format!("Loaded {} stations", report.committed));
    Ok(report)
}

/// Every `.csv.gz` file directly inside the directory, in sorted order so a
/// run visits files deterministically.
fn observation_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if is_observation_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
