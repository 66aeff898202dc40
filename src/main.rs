// SPDX-License-Identifier: Apache-2.0

//! `multfuzz`: writes one randomized `n x n` bit unsigned multiplier as a
//! binary AIGER file.
//!
//! Exit status:
//!   0  – circuit written.
//!   11 – invalid command line.
//!   21 – the circuit could not be serialized or written.
//!   31 – a column was empty at the final stage.
//!   32 – a column was over-full at the final stage.
//!   41 – `--check` found an input the circuit multiplies incorrectly.

use std::path::PathBuf;
use std::process::exit;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;

use xlsynth_multfuzz::aig_serdes::emit_aiger_binary::{EmitOptions, emit_aiger_binary};
use xlsynth_multfuzz::error::{EXIT_INVALID_ARGUMENT, MultGenError};
use xlsynth_multfuzz::multgen::sampler::SeededSampler;
use xlsynth_multfuzz::multgen::verify::{MAX_EXHAUSTIVE_CHECK_WIDTH, check_product_exhaustive};
use xlsynth_multfuzz::multgen::{MultGenOptions, MultGenResult, generate_multiplier};

/// Generation-based AIG fuzzer for unsigned multipliers.
#[derive(Parser, Debug)]
#[command(name = "multfuzz", author, version, about, long_about = None)]
struct Args {
    /// Bit width of each operand.
    #[arg(short = 'i', long = "width", value_name = "N",
          value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Output file (binary AIGER).
    output: PathBuf,

    /// Disable carry-lookahead blocks in the final stage (also `-cl`).
    #[arg(long)]
    no_cla: bool,

    /// Drop unreachable gates and renumber before writing.
    #[arg(short = 'r', long)]
    reencode: bool,

    /// Seed for the random generator; defaults to the current time.
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Log verbosity from 0 (errors only) to 3 (every decision); also
    /// `-v0`..`-v3`.
    #[arg(long, value_name = "LEVEL", default_value_t = 1,
          value_parser = clap::value_parser!(u8).range(0..=3))]
    verbosity: u8,

    /// Exhaustively simulate the circuit before writing it (widths up to 8).
    #[arg(long)]
    check: bool,
}

/// Maps the single-dash multi-letter spellings onto long options clap
/// understands.
fn rewrite_legacy_args<I: IntoIterator<Item = String>>(args: I) -> Vec<String> {
    args.into_iter()
        .map(|arg| match arg.as_str() {
            "-cl" => "--no-cla".to_string(),
            "-v0" | "-v1" | "-v2" | "-v3" => format!("--verbosity={}", &arg[2..]),
            _ => arg,
        })
        .collect()
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let _ = env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

fn default_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn run(args: &Args, seed: u64) -> Result<MultGenResult, MultGenError> {
    let width = args.width as usize;
    let options = MultGenOptions {
        width,
        use_cla: !args.no_cla,
    };
    let mut rng = SeededSampler::from_seed(seed);
    let result = generate_multiplier(&options, &mut rng)?;

    if args.check {
        if width <= MAX_EXHAUSTIVE_CHECK_WIDTH {
            log::info!("Checking all {} operand pairs", 1u64 << (2 * width));
            check_product_exhaustive(&result.gate_fn, width)?;
            log::info!("Check passed");
        } else {
            log::warn!(
                "--check skipped: width {} exceeds {}",
                width,
                MAX_EXHAUSTIVE_CHECK_WIDTH
            );
        }
    }

    let bytes = emit_aiger_binary(
        &result.gate_fn,
        EmitOptions {
            reencode: args.reencode,
            ..EmitOptions::default()
        },
    )
    .map_err(MultGenError::Emit)?;
    std::fs::write(&args.output, bytes).map_err(|source| MultGenError::Write {
        path: args.output.clone(),
        source,
    })?;
    Ok(result)
}

fn main() {
    let args = match Args::try_parse_from(rewrite_legacy_args(std::env::args())) {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() {
                EXIT_INVALID_ARGUMENT
            } else {
                0
            };
            let _ = e.print();
            exit(code);
        }
    };
    init_logging(args.verbosity);

    if let Err(e) = ctrlc::set_handler(|| {
        log::error!("caught signal, aborting");
        exit(130);
    }) {
        log::warn!("could not install signal handler: {}", e);
    }

    let seed = args.seed.unwrap_or_else(default_seed);
    log::info!("multfuzz {}", env!("CARGO_PKG_VERSION"));
    log::info!(
        "width {} seed {} cla {} reencode {} output '{}'",
        args.width,
        seed,
        !args.no_cla,
        args.reencode,
        args.output.display()
    );

    let start = Instant::now();
    match run(&args, seed) {
        Ok(result) => {
            result.stats.log_summary();
            log::info!("  elapsed:              {:.3?}", start.elapsed());
            log::info!("wrote '{}'", args.output.display());
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("multfuzz: error: {}", e);
            exit(e.exit_code());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(rewrite_legacy_args(args.iter().map(|s| s.to_string())))
    }

    #[test]
    fn test_legacy_flags() {
        let args = parse(&["multfuzz", "-i", "4", "out.aig", "-cl", "-r", "-v3", "-s", "9"]).unwrap();
        assert_eq!(args.width, 4);
        assert_eq!(args.output, PathBuf::from("out.aig"));
        assert!(args.no_cla);
        assert!(args.reencode);
        assert_eq!(args.verbosity, 3);
        assert_eq!(args.seed, Some(9));
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["multfuzz", "-i", "2", "out.aig"]).unwrap();
        assert!(!args.no_cla);
        assert!(!args.reencode);
        assert!(!args.check);
        assert_eq!(args.verbosity, 1);
        assert_eq!(args.seed, None);
    }

    #[test]
    fn test_usage_errors() {
        for bad in [
            vec!["multfuzz", "out.aig"],
            vec!["multfuzz", "-i", "x", "out.aig"],
            vec!["multfuzz", "-i", "0", "out.aig"],
            vec!["multfuzz", "-i", "3"],
            vec!["multfuzz", "-i", "3", "out.aig", "-v4"],
        ] {
            let err = parse(&bad).unwrap_err();
            assert!(err.use_stderr(), "{:?}", bad);
        }
        let help = parse(&["multfuzz", "-h"]).unwrap_err();
        assert!(!help.use_stderr());
    }
}
