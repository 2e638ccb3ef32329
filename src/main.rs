//! CLI entrypoint for `hcctl`.
//!
//! Configures a controller from command-line arguments, runs one hashcat job
//! (unless `--report-only` or `--benchmark` is given), queries the potfile for
//! cracked and uncracked entries, prints a terminal summary, and optionally
//! writes CSV/TXT exports when an output directory is provided.
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use hashcat_controller::{
    controller::{DEFAULT_BINARY, HashcatController},
    export::{save_cracked_csv, save_left_txt},
    job::AttackPayload,
    logs::{FileObserver, create_logs_dir},
    modes::{AttackStrategy, Catalog, HashAlgorithm},
    pot::parse_records,
    report::render_summary,
};
use log::{LevelFilter, error, info};

#[derive(Parser, Debug)]
#[command(name = "hcctl", version, about = "Run hashcat jobs and collect the results")]
struct Args {
    /// Path to the hashcat binary
    #[arg(long = "binary", default_value = DEFAULT_BINARY)]
    binary: PathBuf,

    /// Hash type: numeric code (e.g. 0) or name (e.g. md5, sha2-256)
    #[arg(short = 'm', long = "hash-type")]
    hash_type: Option<String>,

    /// Attack mode: numeric code (0, 3) or name (straight, brute-force)
    #[arg(short = 'a', long = "attack-mode")]
    attack_mode: Option<String>,

    /// Path to the file with the hashes to crack
    #[arg(short = 't', long = "target-list")]
    target_list: Option<PathBuf>,

    /// Wordlist for a straight attack
    #[arg(short = 'w', long = "wordlist")]
    wordlist: Option<PathBuf>,

    /// Mask for a brute-force attack
    #[arg(long = "mask")]
    mask: Option<String>,

    /// Extra hashcat flag, as FLAG or FLAG=VALUE (repeatable)
    #[arg(long = "arg", allow_hyphen_values = true)]
    extra: Vec<String>,

    /// Give up waiting after this many seconds (hashcat keeps running)
    #[arg(long = "timeout")]
    timeout: Option<u64>,

    /// Benchmark the hash type instead of running a job
    #[arg(long = "benchmark")]
    benchmark: bool,

    /// Skip the run and only query the potfile
    #[arg(long = "report-only")]
    report_only: bool,

    /// Path to the output directory
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Directory for controller.log (a numeric suffix is added if it exists)
    #[arg(long = "logs-dir")]
    logs_dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Control color output (auto, always, never)
    #[arg(long = "color", value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Suppress summary output (still writes exports if -o is provided)
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .try_init();
}

fn verify_inputs(args: &Args) -> Result<()> {
    let Some(hash_type) = &args.hash_type else {
        bail!("no hash type provided (-m/--hash-type)");
    };
    if hash_type.trim().is_empty() {
        bail!("empty hash type");
    }
    if args.benchmark {
        return Ok(());
    }
    if args.attack_mode.is_none() {
        bail!("no attack mode provided (-a/--attack-mode)");
    }
    match &args.target_list {
        None => bail!("no target list provided (-t/--target-list)"),
        Some(p) if !p.exists() => bail!("target list not found: {}", p.display()),
        Some(_) => {}
    }
    Ok(())
}

fn build_controller(args: &Args) -> Result<HashcatController> {
    let mut hc = HashcatController::new(&args.binary)?;
    if let Some(dir) = &args.logs_dir {
        let dir = create_logs_dir(dir)
            .with_context(|| format!("failed to create logs directory {}", dir.display()))?;
        hc.add_observer(Box::new(FileObserver::create(&dir)?));
        info!("logging controller events to {}", dir.display());
    }
    Ok(hc)
}

fn configure(hc: &mut HashcatController, args: &Args) -> Result<()> {
    if let Some(target) = &args.target_list {
        hc.set_target_list(target)?;
    }
    if let Some(hash) = &args.hash_type {
        hc.set_hash_algorithm(HashAlgorithm::parse_value(hash))?;
    }
    if let Some(attack) = &args.attack_mode {
        let payload = AttackPayload {
            wordlist: args.wordlist.clone(),
            mask: args.mask.clone(),
        };
        hc.set_attack_strategy(AttackStrategy::parse_value(attack), payload)?;
    }
    for raw in &args.extra {
        match raw.split_once('=') {
            Some((flag, value)) => hc.add_argument(flag, Some(value))?,
            None => hc.add_argument(raw, None)?,
        }
    }
    Ok(())
}

fn run_job(hc: &mut HashcatController, timeout: Option<Duration>) -> Result<()> {
    let command = hc.command()?;
    info!("full command: {:?}", command);
    let pid = hc.run()?;
    info!("running with pid {}", pid);
    let output = hc.wait(timeout)?;
    info!("hashcat finished with {}", output.status);
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);
    // Configure color policy
    match args.color {
        ColorChoice::Always => {
            colored::control::set_override(true);
        }
        ColorChoice::Never => {
            colored::control::set_override(false);
        }
        ColorChoice::Auto => {}
    }
    if let Err(e) = verify_inputs(&args) {
        error!("{}", e);
        std::process::exit(2);
    }
    let mut hc = match build_controller(&args) {
        Ok(hc) => hc,
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(3);
        }
    };

    if args.benchmark {
        let hash = args.hash_type.as_deref().unwrap_or_default();
        match hc.benchmark(HashAlgorithm::parse_value(hash)) {
            Ok(speed) => {
                if !args.quiet {
                    println!("{}: {} H/s", hash.bold(), speed);
                }
                return;
            }
            Err(e) => {
                error!("benchmark failed: {}", e);
                std::process::exit(4);
            }
        }
    }

    if let Err(e) = configure(&mut hc, &args) {
        error!("invalid job configuration: {:#}", e);
        std::process::exit(4);
    }

    if !args.report_only {
        if let Err(e) = run_job(&mut hc, args.timeout.map(Duration::from_secs)) {
            error!("job failed: {:#}", e);
            std::process::exit(5);
        }
    }

    let (cracked, left) = match (hc.show(), hc.left()) {
        (Ok(cracked), Ok(left)) => (cracked, left),
        (Err(e), _) | (_, Err(e)) => {
            error!("failed to query results: {}", e);
            std::process::exit(6);
        }
    };

    if !args.quiet {
        println!("{}", render_summary(&cracked, &left));
    }

    if let Some(outdir) = args.output {
        if let Err(e) = fs::create_dir_all(&outdir) {
            error!(
                "failed to create output directory {}: {}",
                outdir.display(),
                e
            );
            std::process::exit(7);
        }
        let ts = chrono::Local::now().format("%Y.%m.%d_%H.%M.%S");
        let csv = outdir.join(format!("hcctl_cracked_{}.csv", ts));
        let txt = outdir.join(format!("hcctl_left_{}.txt", ts));
        if let Err(e) = save_cracked_csv(&parse_records(&cracked), &csv) {
            error!("failed to write {}: {}", csv.display(), e);
            std::process::exit(8);
        }
        if let Err(e) = save_left_txt(&left, &txt) {
            error!("failed to write {}: {}", txt.display(), e);
            std::process::exit(9);
        }
    }
}
