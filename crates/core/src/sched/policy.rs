//! Wait-queue admission policies.
//!
//! Both policies serve the wait queue in arrival order and append admitted
//! processes to the ready queue's tail. They differ only in what happens when a
//! waiting process does not fit:
//!
//! - **Head-of-line:** Admission stops. A later, smaller process never overtakes
//!   the head, so a waiting process is only ever blocked by the one in front.
//! - **First-fit:** The process is skipped and the scan continues; every process
//!   that fits in the remaining memory is admitted.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Wait-queue admission policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionPolicy {
    /// Stop at the first waiting process that does not fit.
    #[default]
    #[serde(alias = "HeadOfLine", alias = "fifo")]
    HeadOfLine,
    /// Admit every waiting process that fits, in arrival order.
    #[serde(alias = "FirstFit")]
    FirstFit,
}

impl fmt::Display for AdmissionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeadOfLine => f.write_str("head_of_line"),
            Self::FirstFit => f.write_str("first_fit"),
        }
    }
}
