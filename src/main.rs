//! WGAN for synthetic tabular data
//!
//! CLI entry point providing:
//! - Training on a numeric CSV dataset
//! - Sampling synthetic records from a trained generator

use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tch::Kind;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use tabwgan::{Config, TabularDataset, Trainer, Wgan};

/// Train a WGAN on tabular data and sample synthetic records
#[derive(Parser)]
#[command(name = "tabwgan")]
#[command(version = "0.1.0")]
#[command(about = "Wasserstein GAN for synthetic tabular data")]
struct Cli {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train on a numeric CSV dataset
    Train {
        /// Path to training data CSV
        #[arg(short, long)]
        data: String,

        /// Number of training epochs
        #[arg(short, long)]
        epochs: Option<usize>,

        /// Checkpoint file prefix
        #[arg(long)]
        cache_prefix: Option<String>,

        /// Checkpoint directory
        #[arg(long)]
        cache_dir: Option<String>,
    },
    /// Generate synthetic records from a trained generator
    Generate {
        /// Directory holding generator weight snapshots
        #[arg(short, long)]
        model_dir: String,

        /// Number of records to generate
        #[arg(short, long, default_value = "100")]
        num_samples: i64,

        /// Output CSV path
        #[arg(short, long, default_value = "synthetic.csv")]
        output: String,
    },
    /// Write a default configuration file
    Init {
        /// Destination path (.toml or .json)
        #[arg(short, long, default_value = "config.toml")]
        path: String,
    },
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Train {
            data,
            epochs,
            cache_prefix,
            cache_dir,
        } => train(config, &data, epochs, cache_prefix, cache_dir),
        Commands::Generate {
            model_dir,
            num_samples,
            output,
        } => generate(config, &model_dir, num_samples, &output),
        Commands::Init { path } => init_config(&path),
    }
}

fn init_config(path: &str) -> Result<()> {
    let config = Config::default();
    if path.ends_with(".toml") {
        config.save_toml(path)?;
    } else {
        config.save_json(path)?;
    }
    info!("Wrote default configuration to {}", path);
    Ok(())
}

fn load_config(path: Option<&str>) -> Result<Config> {
    match path {
        Some(p) if p.ends_with(".toml") => Config::from_toml(p),
        Some(p) => Config::from_json(p),
        None => Ok(Config::default()),
    }
}

fn train(
    mut config: Config,
    data_path: &str,
    epochs: Option<usize>,
    cache_prefix: Option<String>,
    cache_dir: Option<String>,
) -> Result<()> {
    if let Some(epochs) = epochs {
        config.train.epochs = epochs;
    }
    if let Some(prefix) = cache_prefix {
        config.train.cache_prefix = prefix;
    }

    let dataset = TabularDataset::load_csv(data_path)?;
    config.model.data_dim = dataset.data_dim() as i64;
    config.validate()?;

    let device = config.get_device();
    info!(
        "Training on {} records of width {} ({:?})",
        dataset.len(),
        dataset.data_dim(),
        device
    );

    let mut model = Wgan::new(config.model.clone(), config.n_critic, device)?;
    let mut trainer = Trainer::new(config.train.clone());
    if let Some(dir) = cache_dir {
        trainer = trainer.with_cache_dir(dir);
    }
    trainer.train(&mut model, &dataset)?;

    let metrics = trainer.metrics();
    info!(
        "Training complete. Final critic_loss: {:.4}, gen_loss: {:.4}",
        metrics.latest_critic_loss().unwrap_or(0.0),
        metrics.latest_gen_loss().unwrap_or(0.0)
    );

    Ok(())
}

fn generate(config: Config, model_dir: &str, num_samples: i64, output: &str) -> Result<()> {
    config.validate()?;

    let device = config.get_device();
    let mut model = Wgan::new(config.model.clone(), config.n_critic, device)?;
    model.load(Path::new(model_dir))?;
    info!("Loaded generator from {}", model_dir);

    let samples = model.generate(num_samples);
    let values: Vec<f64> = samples.to_kind(Kind::Double).flatten(0, -1).try_into()?;
    let data_dim = config.model.data_dim as usize;

    let mut writer = csv::Writer::from_path(output)?;
    let header: Vec<String> = (0..data_dim).map(|i| format!("col_{i}")).collect();
    writer.write_record(&header)?;
    for row in values.chunks(data_dim) {
        writer.write_record(row.iter().map(f64::to_string))?;
    }
    writer.flush()?;

    info!("Wrote {} synthetic records to {}", num_samples, output);
    Ok(())
}
