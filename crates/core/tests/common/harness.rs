use std::collections::HashSet;

use memsched_core::config::{AdmissionPolicy, Config};
use memsched_core::core::ProcessState;
use memsched_core::sim::TickReport;
use memsched_core::{Pid, Simulator};

pub struct TestContext {
    pub sim: Simulator,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_capacity(capacity_mb: u64) -> Self {
        Self::with_config(Config::with_capacity(capacity_mb))
    }

    pub fn with_config(config: Config) -> Self {
        init_tracing();
        let sim = Simulator::new(config).expect("test config is valid");
        Self { sim }
    }

    /// Rebuilds the simulator with a different admission policy.
    pub fn with_policy(self, policy: AdmissionPolicy) -> Self {
        let config = Config {
            admission: policy,
            ..self.sim.config().clone()
        };
        Self::with_config(config)
    }

    pub fn submit(&mut self, name: &str, memory_mb: i64, duration: i64) -> Pid {
        let pid = self
            .sim
            .submit(name, memory_mb, duration)
            .expect("well-formed submission");
        self.assert_invariants();
        pid
    }

    pub fn tick(&mut self) -> TickReport {
        let report = self.sim.advance_tick().expect("engine invariant held");
        self.assert_invariants();
        report
    }

    pub fn tick_n(&mut self, n: usize) -> Vec<TickReport> {
        (0..n).map(|_| self.tick()).collect()
    }

    pub fn state(&self, pid: Pid) -> ProcessState {
        self.sim.process(pid).expect("known pid").state()
    }

    pub fn remaining(&self, pid: Pid) -> u64 {
        self.sim.process(pid).expect("known pid").remaining()
    }

    pub fn ready(&self) -> Vec<Pid> {
        self.sim.scheduler().ready().iter().copied().collect()
    }

    pub fn waiting(&self) -> Vec<Pid> {
        self.sim.scheduler().waiting().iter().copied().collect()
    }

    /// Checks memory accounting and exclusive placement of every process.
    pub fn assert_invariants(&self) {
        let sim = &self.sim;

        let reserved: u64 = sim
            .table()
            .iter()
            .filter(|p| p.state().holds_memory())
            .map(|p| p.memory_mb())
            .sum();
        assert_eq!(sim.memory().used(), reserved, "memory accounting drifted");
        assert!(sim.memory().used() <= sim.memory().capacity());

        let mut seen = HashSet::new();
        for &pid in sim.scheduler().ready() {
            assert!(seen.insert(pid), "{pid} placed twice");
            assert_eq!(self.state(pid), ProcessState::Ready);
        }
        for &pid in sim.scheduler().waiting() {
            assert!(seen.insert(pid), "{pid} placed twice");
            assert_eq!(self.state(pid), ProcessState::WaitingForMemory);
        }
        if let Some(pid) = sim.cpu().current() {
            assert!(seen.insert(pid), "{pid} placed twice");
            assert_eq!(self.state(pid), ProcessState::Running);
        }
        for &pid in sim.finished() {
            assert!(seen.insert(pid), "{pid} placed twice");
            assert_eq!(self.state(pid), ProcessState::Finished);
        }
        assert_eq!(seen.len(), sim.table().len(), "a process has no holder");

        for p in sim.table().iter() {
            assert!(p.remaining() <= p.duration());
        }
    }
}
