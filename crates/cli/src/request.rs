//! Process request parsing.
//!
//! Requests arrive as `name:memory:duration` on the command line. Only the
//! shape is checked here; positivity is left to the engine so the rejection
//! path is the same one an interactive user hits.

use std::str::FromStr;

/// A process the user asked to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRequest {
    /// Display name; may be blank.
    pub name: String,
    /// Requested memory in MB.
    pub memory_mb: i64,
    /// Requested CPU time in ticks.
    pub duration: i64,
}

impl FromStr for ProcessRequest {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.rsplitn(3, ':');
        let (Some(duration), Some(memory), Some(name)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(format!("expected name:memory:duration, got '{s}'"));
        };
        let memory_mb = memory
            .trim()
            .parse()
            .map_err(|_| format!("memory must be an integer, got '{memory}'"))?;
        let duration = duration
            .trim()
            .parse()
            .map_err(|_| format!("duration must be an integer, got '{duration}'"))?;
        Ok(Self {
            name: name.to_string(),
            memory_mb,
            duration,
        })
    }
}
