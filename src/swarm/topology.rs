//! Neighborhood topologies for particle swarms.
//!
//! A topology determines which particles see each other's personal bests.
//! Membership is derived structurally from the population's current order
//! and recomputed every cycle — it is never stored per particle.

/// Swarm neighborhood structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Topology {
    /// Every particle neighbors every other (global best).
    Star,
    /// Each particle neighbors a window of `neighborhood_size` particles
    /// centered on it, wrapping around the population.
    Ring {
        /// Window width, including the particle itself.
        neighborhood_size: usize,
    },
}

impl Default for Topology {
    fn default() -> Self {
        Topology::Star
    }
}

impl Topology {
    /// A ring with the conventional window of three.
    pub fn ring() -> Self {
        Topology::Ring { neighborhood_size: 3 }
    }

    /// Computes the neighbor index lists for a population of `len`
    /// particles in their current order.
    pub fn neighborhoods(&self, len: usize) -> Vec<Vec<usize>> {
        match *self {
            Topology::Star => {
                let all: Vec<usize> = (0..len).collect();
                vec![all; len]
            }
            Topology::Ring { neighborhood_size } => {
                if len == 0 {
                    return Vec::new();
                }
                let size = neighborhood_size.max(1);
                let half = size / 2;
                (0..len)
                    .map(|i| {
                        let start = (i + len - half % len) % len;
                        (0..size).map(|offset| (start + offset) % len).collect()
                    })
                    .collect()
            }
        }
    }
}
