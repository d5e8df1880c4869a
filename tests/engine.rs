use std::sync::atomic::{AtomicBool, Ordering};

use rand::rngs::SmallRng;
use rand::SeedableRng;

use seating::engine::STAGNATION_LIMIT;
use seating::fitness;
use seating::generate::random_instance;
use seating::{Partition, ProblemInstance, SearchConfig, SearchEngine, Termination};

fn config(population_size: usize, mutation_rate: f64, seed: u64) -> SearchConfig {
    SearchConfig { population_size, mutation_rate, seed: Some(seed) }
}

fn run_logged(engine: &mut SearchEngine) -> (Partition, Vec<(usize, f64)>) {
    let mut history = Vec::new();
    let best = engine.run(|generation, mean| history.push((generation, mean))).unwrap();
    (best, history)
}

#[test]
fn uniform_affinity_converges_immediately() {
    let instance = ProblemInstance::new(4, 2, vec![vec![1.0; 4]; 4]).unwrap();
    let mut engine = SearchEngine::new(instance.clone(), config(10, 0.1, 42)).unwrap();
    let (best, history) = run_logged(&mut engine);

    assert_eq!(history.len(), STAGNATION_LIMIT + 1);
    assert!(history.iter().enumerate().all(|(i, &(generation, mean))| generation == i && mean == 0.0));
    assert_eq!(best.score(), Some(0.0));
    assert!(best.is_valid(&instance));
    assert_eq!(best.tables().count(), 2);
}

#[test]
fn single_table_keeps_initial_score() {
    let instance = random_instance(7, 1, &mut SmallRng::seed_from_u64(3)).unwrap();
    let everyone = Partition::from_tables(vec![(0..7).collect()], &instance).unwrap();
    let initial = fitness::score(&everyone, &instance);

    let mut engine = SearchEngine::new(instance.clone(), config(30, 0.5, 11)).unwrap();
    let outcome = engine.run_until(|_, _| {}, &AtomicBool::new(false)).unwrap();

    assert_eq!(outcome.termination, Termination::Converged);
    assert_eq!(outcome.generation, STAGNATION_LIMIT);
    assert_eq!(outcome.best.score(), Some(initial));
    assert!(outcome.best.is_valid(&instance));
}

#[test]
fn single_seat_tables_use_uniform_selection() {
    let instance = ProblemInstance::new(5, 5, vec![vec![0.5; 5]; 5]).unwrap();
    let mut engine = SearchEngine::new(instance.clone(), config(8, 0.3, 5)).unwrap();
    let (best, history) = run_logged(&mut engine);

    assert_eq!(history.len(), STAGNATION_LIMIT + 1);
    assert!(history.iter().all(|&(_, mean)| mean == 1.0));
    assert_eq!(best.score(), Some(1.0));
    assert!(best.is_valid(&instance));
}

#[test]
fn finds_planted_cliques() {
    let rows = (0..6)
        .map(|a| (0..6).map(|b| if a / 3 == b / 3 { 1.0 } else { 0.0 }).collect::<Vec<f64>>())
        .collect();
    let instance = ProblemInstance::new(6, 2, rows).unwrap();
    let mut engine = SearchEngine::new(instance.clone(), config(200, 0.2, 42)).unwrap();
    let (best, _) = run_logged(&mut engine);

    assert_eq!(best.score(), Some(0.0));
    for table in best.tables() {
        assert!(table.iter().all(|&id| id / 3 == table[0] / 3));
    }
}

#[test]
fn mean_score_never_increases() {
    let instance = random_instance(12, 3, &mut SmallRng::seed_from_u64(8)).unwrap();
    let mut engine = SearchEngine::new(instance, config(40, 0.2, 8)).unwrap();
    let (best, history) = run_logged(&mut engine);

    for window in history.windows(2) {
        assert!(window[1].1 <= window[0].1 + 1e-12);
    }
    let last_mean = history.last().map(|&(_, mean)| mean).unwrap();
    assert!(best.score().unwrap() <= last_mean + 1e-12);
}

#[test]
fn seeded_runs_are_reproducible() {
    let instance = random_instance(10, 2, &mut SmallRng::seed_from_u64(21)).unwrap();
    let mut first = SearchEngine::new(instance.clone(), config(30, 0.3, 99)).unwrap();
    let mut second = SearchEngine::new(instance, config(30, 0.3, 99)).unwrap();
    let (first_best, first_history) = run_logged(&mut first);
    let (second_best, second_history) = run_logged(&mut second);

    assert_eq!(first_history, second_history);
    assert_eq!(first_best, second_best);
}

// There is no generation cap: a run whose mean keeps changing only stops
// through cancellation.
#[test]
fn cancellation_stops_after_current_generation() {
    let instance = random_instance(20, 4, &mut SmallRng::seed_from_u64(1)).unwrap();
    let mut engine = SearchEngine::new(instance.clone(), config(20, 0.2, 1)).unwrap();
    let cancel = AtomicBool::new(false);
    let mut reported = 0;
    let outcome = engine.run_until(
        |generation, _| {
            reported += 1;
            if generation == 5 {
                cancel.store(true, Ordering::Relaxed);
            }
        },
        &cancel,
    )
    .unwrap();

    assert_eq!(outcome.termination, Termination::Cancelled);
    assert_eq!(outcome.generation, 5);
    assert_eq!(reported, 6);
    assert!(outcome.best.is_valid(&instance));
    assert!(outcome.best.score().is_some());
}
