//! Criterion benchmarks for the evoflow engine.
//!
//! Uses synthetic problems (sphere function, a two-objective front) to
//! measure pure pipeline overhead independent of any domain.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, RngCore};

use evoflow::args::Args;
use evoflow::ec::replacers::GenerationalReplacer;
use evoflow::ec::selectors::TournamentSelector;
use evoflow::ec::terminators::GenerationTerminator;
use evoflow::ec::variators::{BlendCrossover, GaussianMutation};
use evoflow::ec::{Bounds, Direction, EcConfig, Engine};
use evoflow::emo::{non_dominated_sort, nsga2_engine, Pareto};

// ===========================================================================
// Sphere function: minimize sum(x_i^2)
// ===========================================================================

fn bench_ga_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_sphere");
    for dim in [4usize, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(dim), &dim, |b, &dim| {
            b.iter(|| {
                let mut generator = move |rng: &mut dyn RngCore, _: &Args| {
                    (0..dim).map(|_| rng.random_range(-5.0..5.0)).collect::<Vec<f64>>()
                };
                let mut evaluator = |candidates: &[Vec<f64>], _: &Args| {
                    candidates
                        .iter()
                        .map(|c| c.iter().map(|x| x * x).sum::<f64>())
                        .collect::<Vec<f64>>()
                };

                let mut engine = Engine::new()
                    .with_selector(TournamentSelector {
                        num_selected: None,
                        tournament_size: 2,
                    })
                    .with_variator(BlendCrossover::default())
                    .with_variator(GaussianMutation {
                        mutation_rate: 0.2,
                        mean: 0.0,
                        stdev: 0.5,
                    })
                    .with_replacer(GenerationalReplacer { num_elites: 1 })
                    .with_bounder(Bounds::uniform(-5.0, 5.0))
                    .with_terminator(GenerationTerminator::new(50));

                let config = EcConfig::default()
                    .with_pop_size(50)
                    .with_direction(Direction::Minimize)
                    .with_seed(42);
                let outcome = engine
                    .evolve(&mut generator, &mut evaluator, &config, &Args::new())
                    .expect("run completes");
                black_box(outcome.population.num_evaluations)
            });
        });
    }
    group.finish();
}

// ===========================================================================
// Two-objective front: maximize (x, 1 - x)
// ===========================================================================

fn bench_nsga2_front(c: &mut Criterion) {
    c.bench_function("nsga2_front", |b| {
        b.iter(|| {
            let mut generator =
                |rng: &mut dyn RngCore, _: &Args| vec![rng.random_range(0.0..1.0)];
            let mut evaluator = |candidates: &[Vec<f64>], _: &Args| {
                candidates
                    .iter()
                    .map(|c| Pareto::new(vec![c[0], 1.0 - c[0]]))
                    .collect::<Vec<_>>()
            };

            let mut engine = nsga2_engine::<Vec<f64>>()
                .with_variator(GaussianMutation {
                    mutation_rate: 0.5,
                    mean: 0.0,
                    stdev: 0.1,
                })
                .with_bounder(Bounds::uniform(0.0, 1.0))
                .with_terminator(GenerationTerminator::new(20));

            let config = EcConfig::default().with_pop_size(40).with_seed(7);
            let outcome = engine
                .evolve(&mut generator, &mut evaluator, &config, &Args::new())
                .expect("run completes");
            black_box(outcome.archive.len())
        });
    });
}

// ===========================================================================
// Nondominated sorting in isolation
// ===========================================================================

fn bench_non_dominated_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("non_dominated_sort");
    for n in [50usize, 200] {
        let mut rng = evoflow::random::create_rng(1);
        let objectives: Vec<Pareto> = (0..n)
            .map(|_| {
                Pareto::new(vec![
                    rng.random_range(0.0..1.0),
                    rng.random_range(0.0..1.0),
                    rng.random_range(0.0..1.0),
                ])
            })
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &objectives, |b, objs| {
            b.iter(|| black_box(non_dominated_sort(objs).fronts.len()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_ga_sphere, bench_nsga2_front, bench_non_dominated_sort);
criterion_main!(benches);
