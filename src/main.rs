//! Magnetization time series of a periodic 1D Ising chain across a grid of
//! external fields at one temperature.
//
//  Run:  `cargo run --release -- 1.5`

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use ising1d::config::{self, Config};
use ising1d::output;
use ising1d::scan::{run_scan, ScanEvent};
use std::path::PathBuf;

/// Metropolis field scan of a periodic 1D Ising chain
#[derive(Parser)]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// Temperature (k_B = 1), β = 1/T
    temperature: f64,

    /// Number of spins in the chain
    #[arg(long, default_value_t = config::NUM_SPIN)]
    num_spin: usize,

    /// Sweeps per field value
    #[arg(long, default_value_t = config::NUM_SWEEP as i64)]
    sweeps: i64,

    /// Number of field values between field-min and field-max
    #[arg(long, default_value_t = config::NUM_FIELD)]
    num_field: usize,

    #[arg(long, default_value_t = -2.0)]
    field_min: f64,

    #[arg(long, default_value_t = 2.0)]
    field_max: f64,

    /// Coupling constant J (negative for antiferromagnetic)
    #[arg(long, default_value_t = 1.0)]
    coupling: f64,

    /// Base seed; drawn from OS entropy when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory
    #[arg(long, default_value = "data")]
    output_dir: PathBuf,

    /// Print per-run setup and progress lines
    #[arg(long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Result<Config, ising1d::IsingError> {
        let cfg = Config {
            temperature: self.temperature,
            num_spin: self.num_spin,
            num_sweeps: config::sweep_count(self.sweeps)?,
            num_field: self.num_field,
            field_min: self.field_min,
            field_max: self.field_max,
            coupling: self.coupling,
            seed: self.seed,
            output_dir: self.output_dir,
            verbose: self.verbose,
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Cli::parse().into_config()?;
    println!("Configuration:\n{cfg:#?}");

    let fields = cfg.field_values();
    let bar = ProgressBar::new(fields.len() as u64);
    bar.set_style(ProgressStyle::with_template(
        " {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}]",
    )?);

    let result = run_scan(&cfg, |event| match event {
        ScanEvent::Setup {
            field_index,
            num_spin,
            params,
        } if cfg.verbose => {
            bar.println(format!(
                "[h #{field_index}] num_spin = {num_spin}, beta = {}, ising_h = {}, ising_j = {}",
                output::format_banner_value(params.beta),
                output::format_banner_value(params.field),
                output::format_banner_value(params.coupling),
            ));
        }
        ScanEvent::Progress {
            field_index,
            percent,
        } if cfg.verbose => {
            bar.println(format!("[h #{field_index}] MC progress: {percent:8.4}%"));
        }
        ScanEvent::FieldDone { .. } => bar.inc(1),
        _ => {}
    })?;
    bar.finish();

    let (rows, cols) = result.shape();
    println!("Seed: {}", result.seed);
    println!("Collected {rows} × {cols} magnetization samples");

    let path = output::save_scan(&cfg.output_dir, &result)?;
    println!("Scan complete → {}", path.display());
    Ok(())
}
