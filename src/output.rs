//! Delimited text output for a [`Series`], and a YAML summary of the
//! parameters that produced it.
//!
//! One `time<delimiter>value` line per sample, no header; the default
//! delimiter is a single space.

use crate::physics::parameters::{CoefficientSet, PlasmaParameters};
use crate::run::{EnsembleConfig, Series};
use crate::simulation::temperature::TemperatureRelaxation;
use crate::simulation::trajectory::BeamConditions;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Clone, Debug)]
pub struct SeriesFormat {
    pub delimiter: char,
    /// `None` writes the shortest round-trip representation.
    pub precision: Option<usize>,
}

impl Default for SeriesFormat {
    fn default() -> Self {
        Self {
            delimiter: ' ',
            precision: None,
        }
    }
}

impl SeriesFormat {
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }
}

pub fn write_series<W: Write>(mut out: W, series: &Series, format: &SeriesFormat) -> io::Result<()> {
    for (t, value) in series.rows() {
        match format.precision {
            Some(p) => writeln!(out, "{t:.p$}{}{value:.p$e}", format.delimiter)?,
            None => writeln!(out, "{t}{}{value}", format.delimiter)?,
        }
    }
    out.flush()
}

pub fn save_series(path: impl AsRef<Path>, series: &Series, format: &SeriesFormat) -> io::Result<()> {
    let file = File::create(path)?;
    write_series(BufWriter::new(file), series, format)
}

/// Physical setup of a run, tagged by observable.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "observable", rename_all = "snake_case")]
pub enum RunSetup<'a> {
    Speed {
        plasma: &'a PlasmaParameters,
        coefficients: CoefficientSet,
        beam: &'a BeamConditions,
    },
    Temperature(&'a TemperatureRelaxation),
}

/// Everything needed to reproduce a written series.
#[derive(Clone, Debug, Serialize)]
pub struct RunSummary<'a> {
    pub config: &'a EnsembleConfig,
    pub setup: RunSetup<'a>,
    pub samples: usize,
    pub final_value: Option<f64>,
}

impl<'a> RunSummary<'a> {
    pub fn new(config: &'a EnsembleConfig, setup: RunSetup<'a>, series: &Series) -> Self {
        Self {
            config,
            setup,
            samples: series.len(),
            final_value: series.values.last().copied(),
        }
    }
}

pub fn write_summary<W: Write>(mut out: W, summary: &RunSummary<'_>) -> io::Result<()> {
    serde_yaml::to_writer(&mut out, summary).map_err(io::Error::other)?;
    out.flush()
}

pub fn save_summary(path: impl AsRef<Path>, summary: &RunSummary<'_>) -> io::Result<()> {
    let file = File::create(path)?;
    write_summary(BufWriter::new(file), summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Series {
        Series {
            time: vec![0.0, 0.5],
            values: vec![1.0, 0.25],
        }
    }

    #[test]
    fn writes_one_line_per_sample() {
        let mut buf = Vec::new();
        write_series(&mut buf, &sample(), &SeriesFormat::default()).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "0 1\n0.5 0.25\n");
    }

    #[test]
    fn honours_delimiter_and_precision() {
        let mut buf = Vec::new();
        let format = SeriesFormat::default().delimiter(',').precision(2);
        write_series(&mut buf, &sample(), &format).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "0.00,1.00e0\n0.50,2.50e-1\n");
    }

    #[test]
    fn speed_summary_lists_config_plasma_and_beam() {
        let config = EnsembleConfig::new(10, 0.05).with_seed(7);
        let plasma = PlasmaParameters::default();
        let beam = BeamConditions::default();
        let setup = RunSetup::Speed {
            plasma: &plasma,
            coefficients: plasma.coefficients(),
            beam: &beam,
        };
        let summary = RunSummary::new(&config, setup, &sample());

        let mut buf = Vec::new();
        write_summary(&mut buf, &summary).unwrap();
        let yaml = String::from_utf8(buf).unwrap();

        for key in [
            "particles: 10",
            "resolution: 0.05",
            "seed: 7",
            "observable: speed",
            "coulomb_log: 17",
            "thermal_speed:",
            "particle_velocity:",
            "samples: 2",
            "final_value: 0.25",
        ] {
            assert!(yaml.contains(key), "missing {key:?} in\n{yaml}");
        }
    }

    #[test]
    fn temperature_summary_names_both_ions() {
        let config = EnsembleConfig::new(1, 0.1);
        let model = TemperatureRelaxation::default();
        let summary = RunSummary::new(&config, RunSetup::Temperature(&model), &sample());

        let mut buf = Vec::new();
        write_summary(&mut buf, &summary).unwrap();
        let yaml = String::from_utf8(buf).unwrap();

        assert!(yaml.contains("observable: temperature"));
        assert!(yaml.contains("collision_ion:"));
        assert!(yaml.contains("thermal_ion_mass_number: 23"));
    }
}
