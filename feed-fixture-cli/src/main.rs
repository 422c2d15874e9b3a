use std::convert::TryFrom;
use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::{thread_rng, SeedableRng};

use feed_fixture::generator::{FixtureGenerator, RowCount, DEFAULT_ROW_COUNT};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Number of product rows to generate
    #[clap(short = 'n', long, default_value_t = DEFAULT_ROW_COUNT as i64, allow_hyphen_values = true)]
    pub(crate) rows: i64,
    /// Where to write the fixture, replacing any existing file
    #[clap(short, long, default_value = "data/performance-test.csv")]
    pub(crate) output: PathBuf,
    /// Seed for reproducible output
    #[clap(long)]
    pub(crate) seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let row_count = RowCount::try_from(cli.rows)?;

    let generator = FixtureGenerator::default();
    let written = match cli.seed {
        Some(seed) => {
            info!("Using seed {}", seed);
            generator.generate(&cli.output, row_count, &mut StdRng::seed_from_u64(seed))?
        }
        None => generator.generate(&cli.output, row_count, &mut thread_rng())?,
    };

    println!("Generated {} with {} rows", cli.output.display(), written);

    Ok(())
}
