//! Trail-based constructive search (ant colony optimization).
//!
//! Instead of perturbing existing candidates, the trail variant builds
//! every candidate from scratch each cycle, one discrete component at a
//! time, guided by two signals: a shared [`PheromoneMatrix`] of learned
//! trail strengths and a problem-supplied greedy heuristic. After the
//! offspring are evaluated, the trail update evaporates every strength
//! and reinforces the components of the generation's best solution, so
//! good building blocks become more likely in later cycles while the
//! configured floor keeps every option reachable.
//!
//! Users implement [`TrailProblem`] (feasible extensions + heuristic) and
//! drive the [`Acs`] facade, which owns the matrix and wires the engine.
//!
//! # References
//!
//! - Dorigo & Gambardella (1997), "Ant Colony System: A Cooperative
//!   Learning Approach to the Traveling Salesman Problem"
//! - Stützle & Hoos (2000), "MAX-MIN Ant System"

mod acs;
mod pheromone;

pub use acs::{Acs, AcsConfig, TrailGenerator, TrailProblem, TrailUpdater, TrailVariator};
pub use pheromone::PheromoneMatrix;
