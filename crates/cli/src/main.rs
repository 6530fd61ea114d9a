//! Scheduling simulator CLI.
//!
//! This binary is a thin front-end over `memsched-core`. It performs:
//! 1. **Batch run:** Submit processes given on the command line, advance until the
//!    machine drains (or a tick limit), and print each snapshot plus statistics.
//! 2. **Interactive session:** Add processes, step, auto-run and reset from a prompt.

mod render;
mod repl;
mod request;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fs, process, thread};

use clap::{Parser, Subcommand, ValueEnum};
use memsched_core::config::{AdmissionPolicy, Config};
use memsched_core::{SimError, Simulator};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::render::render;
use crate::repl::Session;
use crate::request::ProcessRequest;

/// Safety limit for batch runs without `--ticks`.
const DEFAULT_TICK_LIMIT: u64 = 10_000;

#[derive(Parser, Debug)]
#[command(
    name = "memsched",
    author,
    version,
    about = "Single-CPU FIFO scheduling simulator with a fixed memory budget",
    long_about = "Simulate processes competing for one CPU and a fixed pool of memory.\n\nExamples:\n  memsched run -c 500 -p editor:400:3 -p compiler:300:2\n  memsched run --config machine.json -p :128:5 --json\n  memsched repl -c 1024"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` wins if set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug)]
struct MachineArgs {
    /// JSON configuration file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Memory capacity in MB.
    #[arg(short, long)]
    capacity: Option<u64>,

    /// Wait-queue admission policy.
    #[arg(long, value_enum)]
    admission: Option<PolicyArg>,

    /// Milliseconds between ticks when pacing.
    #[arg(long)]
    interval_ms: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Submit processes and run the machine until it drains.
    Run {
        #[command(flatten)]
        machine: MachineArgs,

        /// Process to submit, as name:memory_mb:duration. Repeatable.
        #[arg(short = 'p', long = "proc")]
        procs: Vec<ProcessRequest>,

        /// Stop after this many ticks even if work remains.
        #[arg(short, long)]
        ticks: Option<u64>,

        /// Print snapshots as JSON lines instead of panels.
        #[arg(long)]
        json: bool,

        /// Sleep the configured interval between ticks.
        #[arg(long)]
        realtime: bool,
    },

    /// Start an interactive session.
    Repl {
        #[command(flatten)]
        machine: MachineArgs,

        /// Sleep the configured interval between ticks of `run`.
        #[arg(long)]
        realtime: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PolicyArg {
    /// Stop at the first waiting process that does not fit.
    HeadOfLine,
    /// Admit every waiting process that fits.
    FirstFit,
}

impl From<PolicyArg> for AdmissionPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::HeadOfLine => Self::HeadOfLine,
            PolicyArg::FirstFit => Self::FirstFit,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            machine,
            procs,
            ticks,
            json,
            realtime,
        } => build_simulator(&machine).and_then(|sim| cmd_run(sim, &procs, ticks, json, realtime)),
        Commands::Repl { machine, realtime } => build_simulator(&machine).and_then(|sim| {
            let stdout = io::stdout();
            let mut session = Session::new(sim, stdout.lock(), realtime);
            session
                .run(io::stdin().lock())
                .map_err(|e| format!("session ended: {e}"))
        }),
    };

    if let Err(msg) = result {
        eprintln!("[!] {msg}");
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: &Path) -> Result<Config, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read config {}: {e}", path.display()))?;
    Config::from_json(&text).map_err(|e| format!("{}: {e}", path.display()))
}

/// Resolves the configuration (file, then flags) and builds the simulator.
fn build_simulator(machine: &MachineArgs) -> Result<Simulator, String> {
    let mut config = match &machine.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    if let Some(capacity) = machine.capacity {
        config.capacity_mb = capacity;
    }
    if let Some(policy) = machine.admission {
        config.admission = policy.into();
    }
    if let Some(ms) = machine.interval_ms {
        config.tick_interval_ms = ms;
    }
    info!(
        capacity_mb = config.capacity_mb,
        admission = %config.admission,
        "machine configured"
    );
    Simulator::new(config).map_err(|e| e.to_string())
}

/// Submits `procs`, then ticks until drained or `ticks` elapse, printing every snapshot.
///
/// Rejected submissions are reported and skipped. An engine fault ends the run
/// with a non-zero exit, after dumping the last consistent snapshot.
fn cmd_run(
    mut sim: Simulator,
    procs: &[ProcessRequest],
    ticks: Option<u64>,
    json: bool,
    realtime: bool,
) -> Result<(), String> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = submit_all(&mut sim, procs, &mut io::stderr()) {
        return Err(fatal(&mut out, &sim, &e));
    }

    let limit = ticks.unwrap_or(DEFAULT_TICK_LIMIT);
    let interval = Duration::from_millis(sim.config().tick_interval_ms);

    emit(&mut out, &sim, json)?;
    let mut advanced = 0;
    while advanced < limit && (ticks.is_some() || !sim.is_drained()) {
        if let Err(e) = sim.advance_tick() {
            return Err(fatal(&mut out, &sim, &e));
        }
        advanced += 1;
        emit(&mut out, &sim, json)?;
        if realtime {
            thread::sleep(interval);
        }
    }

    if !sim.is_drained() && ticks.is_none() {
        warn!(limit, "tick limit reached with work remaining");
    }
    if !json {
        write!(out, "{}", sim.stats().report()).map_err(|e| e.to_string())?;
    }
    out.flush().map_err(|e| e.to_string())
}

/// Submits every request in order. Invalid requests are reported to `errors`
/// and skipped; any other failure is an engine fault and stops submission.
fn submit_all(
    sim: &mut Simulator,
    procs: &[ProcessRequest],
    errors: &mut impl Write,
) -> Result<(), SimError> {
    for req in procs {
        match sim.submit(&req.name, req.memory_mb, req.duration) {
            Ok(pid) => info!(%pid, name = %req.name, "submitted"),
            Err(e) if e.is_validation() => {
                let _ = writeln!(errors, "[!] rejected '{}': {e}", req.name);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

fn emit(out: &mut impl Write, sim: &Simulator, json: bool) -> Result<(), String> {
    let snap = sim.snapshot();
    let text = if json {
        snap.to_json().map_err(|e| e.to_string())?
    } else {
        render(sim, &snap)
    };
    writeln!(out, "{text}").map_err(|e| e.to_string())
}

fn fatal(out: &mut impl Write, sim: &Simulator, err: &SimError) -> String {
    let _ = writeln!(out, "\n[!] FATAL ENGINE FAULT: {err}");
    let _ = writeln!(out, "{}", render(sim, &sim.snapshot()));
    format!("engine fault at tick {}: {err}", sim.tick())
}
