use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ghcn-loader")]
#[command(about = "Batched PostgreSQL loader for GHCN daily weather observations")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path [default: $WEATHER_LOG_FILE]")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load every compressed observation file from a directory
    Observations {
        #[arg(
            short,
            long,
            help = "Directory of .csv.gz observation files [default: $WEATHER_DATA_DIR]"
        )]
        input_dir: Option<PathBuf>,

        #[arg(
            short,
            long,
            help = "Rows per upsert batch [default: $WEATHER_BATCH_SIZE or 1000]"
        )]
        batch_size: Option<usize>,
    },

    /// Load station metadata from the fixed-width stations file
    Stations {
        #[arg(
            short,
            long,
            help = "Stations file [default: ghcnd-stations.txt in the data directory]"
        )]
        input_file: Option<PathBuf>,
    },
}
