// stats.rs - Per-solver counters and the race summary

use std::fmt;

use chrono::{DateTime, Utc};
use maze_race_solver::{Race, RacePhase, SolverSnapshot};
use serde::{Deserialize, Serialize};

use crate::error_handling::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverStats {
    pub name: String,
    /// Iterations performed so far.
    pub steps: u32,
    /// Cells discovered so far.
    pub explored: usize,
    /// Cells on the published path, both endpoints included. Zero until solved.
    pub path_length: usize,
    pub finished: bool,
}

impl From<&SolverSnapshot> for SolverStats {
    fn from(snapshot: &SolverSnapshot) -> Self {
        Self {
            name: snapshot.name.clone(),
            steps: snapshot.steps,
            explored: snapshot.explored(),
            path_length: snapshot.path.len(),
            finished: snapshot.finished,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceStats {
    pub classic: SolverStats,
    pub quantum: SolverStats,
    pub ticks: u64,
    pub phase: RacePhase,
    pub width: usize,
    pub height: usize,
    /// Breadth-first distance from start to end, if the end is reachable.
    pub shortest_distance: Option<u32>,
    /// Classic steps per quantum step, once both have finished.
    pub step_ratio: Option<f64>,
    /// Name of the solver that needed fewer steps; `None` on a tie or mid-race.
    pub leader: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl RaceStats {
    pub fn collect(race: &Race) -> Self {
        let grid = race.grid();
        let classic = SolverStats::from(race.classic());
        let quantum = SolverStats::from(race.quantum());

        let both_done = classic.finished && quantum.finished;
        let step_ratio = (both_done && quantum.steps > 0)
            .then(|| classic.steps as f64 / quantum.steps as f64);
        let leader = if !both_done || classic.steps == quantum.steps {
            None
        } else if quantum.steps < classic.steps {
            Some(quantum.name.clone())
        } else {
            Some(classic.name.clone())
        };

        Self {
            ticks: race.ticks(),
            phase: race.phase(),
            width: grid.width(),
            height: grid.height(),
            shortest_distance: grid.shortest_distance(grid.start(), grid.end()),
            step_ratio,
            leader,
            classic,
            quantum,
            recorded_at: Utc::now(),
        }
    }

    /// True once the wavefront path has exactly `shortest_distance + 1` cells.
    pub fn quantum_path_is_shortest(&self) -> bool {
        match self.shortest_distance {
            Some(distance) if self.quantum.finished => {
                self.quantum.path_length == distance as usize + 1
            }
            _ => false,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for SolverStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<8} iterations {:>6}  explored {:>6}",
            self.name, self.steps, self.explored
        )?;
        if self.finished {
            write!(f, "  path {:>5}", self.path_length)?;
        }
        Ok(())
    }
}

impl fmt::Display for RaceStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}x{} maze, {} ticks, {:?}",
            self.width, self.height, self.ticks, self.phase
        )?;
        writeln!(f, "  {}", self.classic)?;
        writeln!(f, "  {}", self.quantum)?;
        match self.shortest_distance {
            Some(distance) => write!(f, "  shortest distance {distance}")?,
            None => write!(f, "  end unreachable")?,
        }
        if let Some(ratio) = self.step_ratio {
            write!(f, ", step ratio {ratio:.2}")?;
        }
        if let Some(leader) = &self.leader {
            write!(f, ", {leader} leads")?;
        }
        Ok(())
    }
}
