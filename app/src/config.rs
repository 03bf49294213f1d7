//! Command-line surface and the run configuration built from it.
//!
//! Every flag can also come from a `CROPGRID_*` environment variable, and a
//! `.env` file is loaded before parsing so those variables can live on disk.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueEnum};
use image_processor::border::{DEFAULT_RUN_LENGTH, DEFAULT_THRESHOLD};
use image_processor::{DetectorOptions, PurityMode, ScanMode};

use crate::paths::expand_home_path;

/// Default number of images per grid row.
pub const DEFAULT_COLUMNS: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PurityArg {
    /// Equal red, green and blue (any gray shade) counts as border.
    Gray,
    /// Only pure black counts as border.
    Black,
}

impl From<PurityArg> for PurityMode {
    fn from(arg: PurityArg) -> Self {
        match arg {
            PurityArg::Gray => PurityMode::Gray,
            PurityArg::Black => PurityMode::Black,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScanArg {
    /// Find the top border, then scan down for the bottom one.
    Forward,
    /// Scan from the top and from the bottom independently.
    Bidirectional,
}

impl From<ScanArg> for ScanMode {
    fn from(arg: ScanArg) -> Self {
        match arg {
            ScanArg::Forward => ScanMode::Forward,
            ScanArg::Bidirectional => ScanMode::Bidirectional,
        }
    }
}

/// Crop uniform borders from scanned images and tile them into one grid.
#[derive(Debug, Parser)]
#[command(name = "cropgrid", version)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .multiple(true)
        .args(["input", "input_dir"])
))]
pub struct Cli {
    /// Comma-separated list of image files.
    #[arg(long, env = "CROPGRID_INPUT", value_name = "FILES")]
    pub input: Option<String>,

    /// Directory searched recursively for gif/png/jpg/jpeg/bmp files.
    #[arg(long = "input-dir", env = "CROPGRID_INPUT_DIR", value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long, short, env = "CROPGRID_OUTPUT", value_name = "FILE")]
    pub output: PathBuf,

    /// Images per grid row; non-positive values mean one column.
    #[arg(
        long = "col",
        env = "CROPGRID_COL",
        default_value_t = DEFAULT_COLUMNS,
        allow_negative_numbers = true
    )]
    pub columns: i32,

    /// Which pixels count as border background.
    #[arg(long, value_enum, env = "CROPGRID_PURITY", default_value_t = PurityArg::Gray)]
    pub purity: PurityArg,

    /// Border scan policy.
    #[arg(long, value_enum, env = "CROPGRID_SCAN", default_value_t = ScanArg::Forward)]
    pub scan: ScanArg,

    /// Impure/pure ratio above which a row counts as content.
    #[arg(
        long,
        env = "CROPGRID_THRESHOLD",
        default_value_t = DEFAULT_THRESHOLD,
        value_parser = parse_threshold
    )]
    pub threshold: f64,

    /// Consecutive rows that must agree before a border edge is declared.
    #[arg(
        long = "run-length",
        env = "CROPGRID_RUN_LENGTH",
        default_value_t = DEFAULT_RUN_LENGTH,
        value_parser = parse_run_length
    )]
    pub run_length: usize,

    /// Do not stamp sequence numbers onto the tiles.
    #[arg(long = "no-label", env = "CROPGRID_NO_LABEL")]
    pub no_label: bool,

    /// TTF/OTF font for the sequence labels instead of the built-in digits.
    #[arg(long = "label-font", env = "CROPGRID_LABEL_FONT", value_name = "FILE")]
    pub label_font: Option<PathBuf>,

    /// Worker threads for decoding and border detection (default: all cores).
    #[arg(long, env = "CROPGRID_THREADS")]
    pub threads: Option<usize>,

    /// Write a JSON report of the detected crop regions.
    #[arg(long, env = "CROPGRID_REPORT", value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Only log warnings and errors.
    #[arg(long, short)]
    pub quiet: bool,
}

fn parse_threshold(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|e| format!("invalid threshold '{raw}': {e}"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("threshold must be a positive number, got {raw}"))
    }
}

fn parse_run_length(raw: &str) -> Result<usize, String> {
    let value: usize = raw
        .parse()
        .map_err(|e| format!("invalid run length '{raw}': {e}"))?;
    if value >= 1 {
        Ok(value)
    } else {
        Err("run length must be at least 1".to_string())
    }
}

/// Everything a run needs, with paths already expanded.
#[derive(Debug, Clone)]
pub struct Config {
    pub input_list: Option<String>,
    pub input_dir: Option<PathBuf>,
    pub output: PathBuf,
    pub columns: i32,
    pub detector: DetectorOptions,
    pub label: bool,
    pub label_font: Option<PathBuf>,
    pub threads: Option<usize>,
    pub report: Option<PathBuf>,
}

impl Config {
    /// A configuration with default tunables for the given inputs and output.
    pub fn new(input_list: Option<String>, input_dir: Option<PathBuf>, output: PathBuf) -> Self {
        Self {
            input_list,
            input_dir,
            output,
            columns: DEFAULT_COLUMNS,
            detector: DetectorOptions::default(),
            label: true,
            label_font: None,
            threads: None,
            report: None,
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            input_list: cli.input,
            input_dir: cli.input_dir.as_deref().map(expand_home_path),
            output: expand_home_path(&cli.output),
            columns: cli.columns,
            detector: DetectorOptions {
                purity: cli.purity.into(),
                scan: cli.scan.into(),
                threshold: cli.threshold,
                run_length: cli.run_length,
            },
            label: !cli.no_label,
            label_font: cli.label_font.as_deref().map(expand_home_path),
            threads: cli.threads,
            report: cli.report.as_deref().map(expand_home_path),
        }
    }
}

/// Load `.env` from the first candidate path that exists.
///
/// Returns the path that was loaded so the caller can log it once logging
/// is configured.
pub fn load_dotenv() -> Option<&'static str> {
    let candidates = [".env", "../.env"];
    candidates
        .into_iter()
        .find(|path| dotenvy::from_filename(path).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("cropgrid").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_match_documented_values() {
        let cli = parse(&["--input", "a.png", "--output", "out.png"]).unwrap();
        let config = Config::from(cli);
        assert_eq!(config.columns, 2);
        assert_eq!(config.detector, DetectorOptions::default());
        assert!(config.label);
        assert_eq!(config.input_list.as_deref(), Some("a.png"));
    }

    #[test]
    fn some_input_is_required() {
        assert!(parse(&["--output", "out.png"]).is_err());
        assert!(parse(&["--input-dir", "scans"]).is_err());
        assert!(parse(&["--input-dir", "scans", "-o", "out.png"]).is_ok());
    }

    #[test]
    fn negative_columns_are_accepted() {
        let cli = parse(&["--input", "a.png", "-o", "o.png", "--col", "-3"]).unwrap();
        assert_eq!(cli.columns, -3);
    }

    #[test]
    fn detector_flags_are_mapped() {
        let cli = parse(&[
            "--input",
            "a.png",
            "-o",
            "o.png",
            "--purity",
            "black",
            "--scan",
            "bidirectional",
            "--threshold",
            "0.2",
            "--run-length",
            "20",
            "--no-label",
        ])
        .unwrap();
        let config = Config::from(cli);
        assert_eq!(config.detector.purity, PurityMode::Black);
        assert_eq!(config.detector.scan, ScanMode::Bidirectional);
        assert_eq!(config.detector.threshold, 0.2);
        assert_eq!(config.detector.run_length, 20);
        assert!(!config.label);
    }

    #[test]
    fn invalid_tunables_are_rejected() {
        assert!(parse(&["--input", "a", "-o", "o", "--threshold", "0"]).is_err());
        assert!(parse(&["--input", "a", "-o", "o", "--threshold", "-1"]).is_err());
        assert!(parse(&["--input", "a", "-o", "o", "--threshold", "nan"]).is_err());
        assert!(parse(&["--input", "a", "-o", "o", "--run-length", "0"]).is_err());
    }

    #[test]
    fn home_relative_paths_are_expanded() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let cli = parse(&["--input-dir", "~/scans", "-o", "~/grid.png"]).unwrap();
        let config = Config::from(cli);
        assert_eq!(config.input_dir, Some(home.join("scans")));
        assert_eq!(config.output, home.join("grid.png"));
    }
}
