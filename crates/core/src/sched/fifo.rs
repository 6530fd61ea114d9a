//! FIFO scheduler.
//!
//! Owns the ready queue and the memory-wait queue. Both are strict FIFOs of
//! pids: insertion order is service order, and a pid is never in both.
//!
//! # Lifecycle per tick
//!
//! 1. [`FifoScheduler::submit`] routes a `NEW` process to one of the queues.
//! 2. [`FifoScheduler::promote`] moves waiting processes to the ready queue
//!    once memory frees up, following the configured [`AdmissionPolicy`].
//! 3. [`FifoScheduler::dispatch`] hands the ready head to an idle CPU.

use std::collections::VecDeque;

use tracing::{debug, warn};

use super::policy::AdmissionPolicy;
use crate::common::{Pid, SchedulerError, SimError, Ticks};
use crate::core::{Cpu, MemoryPool, ProcessState, ProcessTable};

/// Where a submitted process ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Memory was reserved; the process is in the ready queue.
    Ready,
    /// Not enough memory; the process is in the wait queue.
    Waiting,
}

/// FIFO scheduler state.
#[derive(Debug, Clone, Default)]
pub struct FifoScheduler {
    ready: VecDeque<Pid>,
    waiting: VecDeque<Pid>,
    policy: AdmissionPolicy,
}

impl FifoScheduler {
    /// Creates a scheduler with empty queues.
    pub const fn new(policy: AdmissionPolicy) -> Self {
        Self {
            ready: VecDeque::new(),
            waiting: VecDeque::new(),
            policy,
        }
    }

    /// Active admission policy.
    pub const fn policy(&self) -> AdmissionPolicy {
        self.policy
    }

    /// Ready queue, head first.
    pub const fn ready(&self) -> &VecDeque<Pid> {
        &self.ready
    }

    /// Memory-wait queue, head first.
    pub const fn waiting(&self) -> &VecDeque<Pid> {
        &self.waiting
    }

    /// Returns `true` when both queues are empty.
    pub fn is_empty(&self) -> bool {
        self.ready.is_empty() && self.waiting.is_empty()
    }

    /// Admits a `NEW` process or parks it in the wait queue.
    ///
    /// Running out of memory is not an error here: the allocation failure is
    /// absorbed and the process waits instead.
    pub fn submit(
        &mut self,
        pid: Pid,
        table: &mut ProcessTable,
        memory: &mut MemoryPool,
        now: Ticks,
    ) -> Result<Placement, SimError> {
        let process = table.get_mut(pid).ok_or(SchedulerError::UnknownPid(pid))?;
        if process.state() != ProcessState::New {
            return Err(SchedulerError::NotNew {
                pid,
                state: process.state(),
            }
            .into());
        }
        let amount = process.memory_mb();
        if memory.reserve(amount).is_ok() {
            process.mark_ready(now);
            self.ready.push_back(pid);
            debug!(%pid, amount, "admitted on submit");
            return Ok(Placement::Ready);
        }
        if amount > memory.capacity() {
            warn!(
                %pid,
                amount,
                capacity = memory.capacity(),
                "process needs more memory than the pool holds and will never be admitted"
            );
        }
        process.mark_waiting();
        self.waiting.push_back(pid);
        debug!(%pid, amount, available = memory.available(), "waiting for memory");
        Ok(Placement::Waiting)
    }

    /// Moves waiting processes into the ready queue as memory allows.
    ///
    /// Returns the promoted pids in admission order.
    pub fn promote(
        &mut self,
        table: &mut ProcessTable,
        memory: &mut MemoryPool,
        now: Ticks,
    ) -> Result<Vec<Pid>, SimError> {
        let mut promoted = Vec::new();
        match self.policy {
            AdmissionPolicy::HeadOfLine => {
                while let Some(&pid) = self.waiting.front() {
                    if !Self::fits(pid, table, memory)? {
                        break;
                    }
                    let _ = self.waiting.pop_front();
                    self.admit(pid, table, memory, now)?;
                    promoted.push(pid);
                }
            }
            AdmissionPolicy::FirstFit => {
                let pending = std::mem::take(&mut self.waiting);
                for pid in pending {
                    if Self::fits(pid, table, memory)? {
                        self.admit(pid, table, memory, now)?;
                        promoted.push(pid);
                    } else {
                        self.waiting.push_back(pid);
                    }
                }
            }
        }
        Ok(promoted)
    }

    /// Pops the ready head if the CPU is free to take it.
    ///
    /// The returned process is still `READY`; the CPU marks it `RUNNING` on
    /// assignment.
    pub fn dispatch(&mut self, cpu: &Cpu) -> Option<Pid> {
        if !cpu.is_idle() {
            return None;
        }
        self.ready.pop_front()
    }

    fn fits(pid: Pid, table: &ProcessTable, memory: &MemoryPool) -> Result<bool, SchedulerError> {
        let process = table.get(pid).ok_or(SchedulerError::UnknownPid(pid))?;
        Ok(memory.fits(process.memory_mb()))
    }

    fn admit(
        &mut self,
        pid: Pid,
        table: &mut ProcessTable,
        memory: &mut MemoryPool,
        now: Ticks,
    ) -> Result<(), SimError> {
        let process = table.get_mut(pid).ok_or(SchedulerError::UnknownPid(pid))?;
        memory.reserve(process.memory_mb())?;
        process.mark_ready(now);
        self.ready.push_back(pid);
        debug!(%pid, amount = process.memory_mb(), "promoted from wait queue");
        Ok(())
    }
}
