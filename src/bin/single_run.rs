// Single Metropolis run at one (T, h): acceptance rate, mean magnetization
// and the final chain, for checking the kernel by eye.

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use ising1d::config;
use ising1d::output::format_banner_value;
use ising1d::scan::field_rng;
use ising1d::sweep::ProgressThrottle;
use ising1d::{ModelParams, SpinChain, SweepEngine};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

#[derive(Parser)]
#[command(allow_negative_numbers = true)]
struct Cli {
    temperature: f64,

    #[arg(long, default_value_t = 0.0)]
    field: f64,

    #[arg(long, default_value_t = 1.0)]
    coupling: f64,

    #[arg(long, default_value_t = config::NUM_SPIN)]
    num_spin: usize,

    #[arg(long, default_value_t = 2_000)]
    sweeps: i64,

    /// Sweeps discarded before averaging
    #[arg(long, default_value_t = 200)]
    discard: usize,

    #[arg(long)]
    seed: Option<u64>,

    /// Start fully polarised instead of half flipped
    #[arg(long)]
    all_up: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();
    let beta = config::inverse_temperature(args.temperature)?;
    let sweeps = config::sweep_count(args.sweeps)?;
    let seed = args
        .seed
        .unwrap_or_else(|| ChaCha20Rng::from_entropy().next_u64());

    let mut rng = field_rng(seed, 0);
    let mut chain = if args.all_up {
        SpinChain::all_up(args.num_spin)?
    } else {
        SpinChain::half_flipped_with(&mut rng, args.num_spin)?
    };

    let params = ModelParams {
        field: args.field,
        coupling: args.coupling,
        beta,
    };
    println!("\nSetting up Ising model.");
    println!("num_spin = {}", chain.len());
    println!("beta     = {}", format_banner_value(beta));
    println!("ising_h  = {}", format_banner_value(args.field));
    println!("ising_j  = {}", format_banner_value(args.coupling));
    println!("seed     = {seed}");

    let bar = ProgressBar::new(sweeps as u64);
    bar.set_style(ProgressStyle::with_template(
        " {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}]",
    )?);
    let mut throttle = ProgressThrottle::deciles(sweeps);
    let summary = SweepEngine::new(params).run_detailed(&mut chain, sweeps, &mut rng, |p| {
        if throttle.should_report(p.completed) {
            bar.set_position(p.completed as u64);
        }
    });
    bar.finish();

    let kept = summary.magnetization.get(args.discard..).unwrap_or(&[]);
    println!("\nAcceptance rate: {:.4}", summary.acceptance_rate());
    if kept.is_empty() {
        println!("No samples left after discarding {} sweeps", args.discard);
    } else {
        let mean = kept.iter().sum::<f64>() / kept.len() as f64;
        println!("<M> over last {} sweeps: {mean:.4}", kept.len());
        println!("<M>/N: {:.4}", mean / chain.len() as f64);
    }

    let picture: String = chain
        .spins()
        .iter()
        .map(|&s| if s > 0 { '+' } else { '-' })
        .collect();
    println!("Final chain: {picture}");
    Ok(())
}
