//! Observers: per-generation reporting hooks.
//!
//! Observers are side-effecting only; the engine discards their results.
//! Anything beyond the basics here (plotting, notification, custom
//! telemetry) belongs in a user-supplied observer — the engine itself has
//! no reporting responsibility.

use std::io::Write;

use log::info;

use crate::analysis::fitness_statistics;
use crate::args::Args;

use super::pipeline::Observer;
use super::types::{best_of, Fitness, Individual};

/// Logs the best individual each generation at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestObserver;

impl<C: std::fmt::Debug, F: Fitness> Observer<C, F> for BestObserver {
    fn observe(
        &mut self,
        population: &[Individual<C, F>],
        num_generations: usize,
        num_evaluations: usize,
        _args: &Args,
    ) {
        if let Some(best) = best_of(population) {
            info!(
                "generation {num_generations} ({num_evaluations} evaluations): best {:?} : {:?}",
                best.candidate,
                best.fitness()
            );
        }
    }
}

/// Logs population fitness statistics each generation at `info` level.
///
/// Requires scalar fitness; populations without a scalar projection are
/// skipped silently.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsObserver;

impl<C, F: Fitness> Observer<C, F> for StatsObserver {
    fn observe(
        &mut self,
        population: &[Individual<C, F>],
        num_generations: usize,
        num_evaluations: usize,
        _args: &Args,
    ) {
        if let Some(stats) = fitness_statistics(population) {
            info!(
                "generation {num_generations}: evaluations {num_evaluations}, \
                 best {:.6}, worst {:.6}, mean {:.6}, median {:.6}, std {:.6}",
                stats.best, stats.worst, stats.mean, stats.median, stats.std_dev
            );
        }
    }
}

/// Writes one CSV row of fitness statistics per generation.
///
/// Row format: `generation, population size, worst, best, median, mean,
/// standard deviation`.
pub struct FileObserver<W: Write> {
    writer: W,
}

impl<W: Write> FileObserver<W> {
    /// Observes into `writer`, flushing after every generation.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the observer, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<C, F: Fitness, W: Write> Observer<C, F> for FileObserver<W> {
    fn observe(
        &mut self,
        population: &[Individual<C, F>],
        num_generations: usize,
        _num_evaluations: usize,
        _args: &Args,
    ) {
        let Some(stats) = fitness_statistics(population) else {
            return;
        };
        writeln!(
            self.writer,
            "{}, {}, {}, {}, {}, {}, {}",
            num_generations,
            population.len(),
            stats.worst,
            stats.best,
            stats.median,
            stats.mean,
            stats.std_dev
        )
        .expect("failed to write statistics row");
        self.writer.flush().expect("failed to flush statistics");
    }
}
