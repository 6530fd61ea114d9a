//! Interactive session.
//!
//! Mirrors the controls of a desktop front-end: add a process, step one tick,
//! auto-run, reset. Every command goes through the public simulator API and
//! the panel is redrawn from a fresh snapshot afterwards.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use memsched_core::{SimError, Simulator};
use thiserror::Error;
use tracing::info;

use crate::render::render;

const HELP: &str = "\
commands:
  add <memory_mb> <duration> [name...]   submit a process (blank name allowed)
  step [n]                               advance n ticks (default 1)
  run [max]                              auto-advance until drained (default max 1000)
  show                                   redraw the panel
  json                                   print the snapshot as JSON
  stats                                  print statistics
  reset [capacity_mb]                    start over, optionally with a new capacity
  help                                   this text
  quit                                   leave";

const DEFAULT_RUN_LIMIT: u64 = 1000;

/// Failures that end the session.
#[derive(Debug, Error)]
pub enum ReplError {
    /// Reading commands or writing output failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// The engine reported a broken invariant.
    #[error("engine fault: {0}")]
    Engine(#[from] SimError),
}

enum Flow {
    Continue,
    Quit,
}

/// Interactive session state.
pub struct Session<W: Write> {
    sim: Simulator,
    out: W,
    pace: bool,
}

impl<W: Write> Session<W> {
    /// Wraps a simulator. With `pace` set, `run` sleeps the configured tick
    /// interval between ticks.
    pub const fn new(sim: Simulator, out: W, pace: bool) -> Self {
        Self { sim, out, pace }
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<(), ReplError> {
        writeln!(self.out, "{}", render(&self.sim, &self.sim.snapshot()))?;
        write!(self.out, "> ")?;
        self.out.flush()?;
        for line in input.lines() {
            if let Flow::Quit = self.execute(&line?)? {
                break;
            }
            write!(self.out, "> ")?;
            self.out.flush()?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn execute(&mut self, line: &str) -> Result<Flow, ReplError> {
        let mut words = line.split_whitespace();
        let Some(cmd) = words.next() else {
            return Ok(Flow::Continue);
        };
        let args: Vec<&str> = words.collect();
        match cmd {
            "add" => self.add(&args)?,
            "step" => {
                let n = match parse_count(args.first(), 1) {
                    Ok(n) => n,
                    Err(msg) => return self.complain(&msg),
                };
                for _ in 0..n {
                    let _ = self.sim.advance_tick()?;
                }
                self.show()?;
            }
            "run" => {
                let max = match parse_count(args.first(), DEFAULT_RUN_LIMIT) {
                    Ok(n) => n,
                    Err(msg) => return self.complain(&msg),
                };
                self.auto_run(max)?;
            }
            "show" => self.show()?,
            "json" => {
                let json = serde_json::to_string_pretty(&self.sim.snapshot())
                    .map_err(io::Error::other)?;
                writeln!(self.out, "{json}")?;
            }
            "stats" => write!(self.out, "{}", self.sim.stats().report())?,
            "reset" => {
                if let Some(arg) = args.first() {
                    let capacity = match arg.parse::<u64>() {
                        Ok(c) => c,
                        Err(_) => return self.complain(&format!("bad capacity '{arg}'")),
                    };
                    let mut config = self.sim.config().clone();
                    config.capacity_mb = capacity;
                    match Simulator::new(config) {
                        Ok(sim) => self.sim = sim,
                        Err(e) => return self.complain(&e.to_string()),
                    }
                } else {
                    self.sim.reset();
                }
                info!(capacity_mb = self.sim.config().capacity_mb, "session reset");
                self.show()?;
            }
            "help" | "?" => writeln!(self.out, "{HELP}")?,
            "quit" | "exit" | "q" => return Ok(Flow::Quit),
            other => return self.complain(&format!("unknown command '{other}' (try 'help')")),
        }
        Ok(Flow::Continue)
    }

    fn add(&mut self, args: &[&str]) -> Result<(), ReplError> {
        let (Some(memory), Some(duration)) = (args.first(), args.get(1)) else {
            let _ = self.complain("usage: add <memory_mb> <duration> [name...]")?;
            return Ok(());
        };
        let (Ok(memory), Ok(duration)) = (memory.parse::<i64>(), duration.parse::<i64>()) else {
            let _ = self.complain("memory and duration must be integers")?;
            return Ok(());
        };
        let name = args[2..].join(" ");
        match self.sim.submit(&name, memory, duration) {
            Ok(pid) => {
                writeln!(self.out, "submitted pid {pid}")?;
                self.show()
            }
            Err(e) if e.is_validation() => {
                let _ = self.complain(&e.to_string())?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn auto_run(&mut self, max: u64) -> Result<(), ReplError> {
        let interval = Duration::from_millis(self.sim.config().tick_interval_ms);
        let mut advanced = 0;
        while !self.sim.is_drained() && advanced < max {
            let _ = self.sim.advance_tick()?;
            advanced += 1;
            self.show()?;
            if self.pace {
                thread::sleep(interval);
            }
        }
        if !self.sim.is_drained() {
            writeln!(self.out, "stopped after {advanced} ticks with work remaining")?;
        }
        Ok(())
    }

    fn show(&mut self) -> Result<(), ReplError> {
        writeln!(self.out, "{}", render(&self.sim, &self.sim.snapshot()))?;
        Ok(())
    }

    fn complain(&mut self, msg: &str) -> Result<Flow, ReplError> {
        writeln!(self.out, "error: {msg}")?;
        Ok(Flow::Continue)
    }
}

fn parse_count(arg: Option<&&str>, default: u64) -> Result<u64, String> {
    arg.map_or(Ok(default), |s| {
        s.parse().map_err(|_| format!("expected a tick count, got '{s}'"))
    })
}
