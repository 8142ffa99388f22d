//! Migration between concurrently-running populations.
//!
//! The engine sees one population at a time and provides no locking; a
//! migrator that shares state across engines owns all cross-population
//! synchronization.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use rand::Rng;
use rand::RngCore;

use crate::args::Args;

use super::pipeline::Migrator;
use super::types::{Fitness, Individual};

/// No migration (the engine default).
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMigrator;

impl<C, F: Fitness> Migrator<C, F> for DefaultMigrator {
    fn migrate(
        &mut self,
        population: Vec<Individual<C, F>>,
        _rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Individual<C, F>> {
        population
    }
}

/// Exchanges individuals through a bounded in-process buffer.
///
/// Island engines sharing a clone of the same migrator trade individuals
/// one per generation: a random individual emigrates into the buffer (if
/// there is room) and, when the buffer has an immigrant available, that
/// immigrant takes the emigrant's slot. Buffered entries are added and
/// consumed at roughly the same rate, so a smaller buffer keeps migrants
/// fresher.
///
/// ```
/// use evoflow::ec::SharedBufferMigrator;
///
/// let migrator: SharedBufferMigrator<Vec<f64>, f64> = SharedBufferMigrator::new(4);
/// let for_island_b = migrator.clone(); // same buffer, second engine
/// # let _ = for_island_b;
/// ```
pub struct SharedBufferMigrator<C, F> {
    buffer: Arc<Mutex<VecDeque<Individual<C, F>>>>,
    max_migrants: usize,
}

impl<C, F> Clone for SharedBufferMigrator<C, F> {
    fn clone(&self) -> Self {
        Self { buffer: Arc::clone(&self.buffer), max_migrants: self.max_migrants }
    }
}

impl<C, F> SharedBufferMigrator<C, F> {
    /// Creates a migrator with a fresh buffer holding up to `max_migrants`.
    pub fn new(max_migrants: usize) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(VecDeque::new())),
            max_migrants: max_migrants.max(1),
        }
    }

    /// Number of individuals currently waiting in the buffer.
    pub fn pending(&self) -> usize {
        self.buffer.lock().expect("migration buffer poisoned").len()
    }
}

impl<C: Clone, F: Fitness> Migrator<C, F> for SharedBufferMigrator<C, F> {
    fn migrate(
        &mut self,
        mut population: Vec<Individual<C, F>>,
        rng: &mut dyn RngCore,
        _args: &Args,
    ) -> Vec<Individual<C, F>> {
        if population.is_empty() {
            return population;
        }
        let mut buffer = self.buffer.lock().expect("migration buffer poisoned");
        let slot = rng.random_range(0..population.len());
        let emigrant = population[slot].clone();
        if let Some(immigrant) = buffer.pop_front() {
            population[slot] = immigrant;
        }
        if buffer.len() < self.max_migrants {
            buffer.push_back(emigrant);
        }
        population
    }
}
