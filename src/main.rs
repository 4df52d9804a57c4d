use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use plasma_langevin::constants::{DEFAULT_RESOLUTION, DEFAULT_SEED};
use plasma_langevin::output::{RunSetup, RunSummary, SeriesFormat, save_series, save_summary};
use plasma_langevin::{
    BeamConditions, EnsembleConfig, PlasmaParameters, Sherlock, TemperatureRelaxation,
    speed_ensemble, temperature_ensemble,
};
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Ensemble-averaged beam speed
    Speed,
    /// Ion-electron temperature equilibration
    Temperature,
}

#[derive(Parser, Debug)]
#[command(about = "Langevin relaxation of a test ion in a plasma background")]
struct Args {
    #[arg(value_enum, default_value_t = Mode::Speed)]
    mode: Mode,

    /// Number of particles in the ensemble
    #[arg(short = 'n', long, default_value_t = 100)]
    particles: usize,

    /// Time step as a fraction of the characteristic time
    #[arg(short, long, default_value_t = DEFAULT_RESOLUTION)]
    resolution: f64,

    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Output file (default: <mode>_solution_data.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the run parameters as YAML
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = EnsembleConfig::new(args.particles, args.resolution).with_seed(args.seed);
    let plasma = PlasmaParameters::default();
    let beam = BeamConditions::default();
    let relaxation = TemperatureRelaxation::default();

    let (series, setup, default_name) = match args.mode {
        Mode::Speed => (
            speed_ensemble(&config, &Sherlock, &plasma, &beam)?,
            RunSetup::Speed {
                plasma: &plasma,
                coefficients: plasma.coefficients(),
                beam: &beam,
            },
            "speed_solution_data.csv",
        ),
        Mode::Temperature => (
            temperature_ensemble(&config, &relaxation)?,
            RunSetup::Temperature(&relaxation),
            "temperature_solution_data.csv",
        ),
    };

    // 결과 파일 저장
    let path = args.output.unwrap_or_else(|| PathBuf::from(default_name));
    save_series(&path, &series, &SeriesFormat::default())
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!("wrote {} samples to {}", series.len(), path.display());

    if let Some(summary_path) = &args.summary {
        let summary = RunSummary::new(&config, setup, &series);
        save_summary(summary_path, &summary)
            .with_context(|| format!("failed to write {}", summary_path.display()))?;
        info!("wrote run summary to {}", summary_path.display());
    }
    Ok(())
}
