use std::process::ExitCode;

use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use seating::cli::{Cli, Command, GenerateArgs, SolveArgs};
use seating::generate::random_instance;
use seating::io::{self, ProgressLog};
use seating::{Error, SearchEngine};

const REPORT_EVERY: usize = 100;

fn solve(args: SolveArgs) -> Result<(), Error> {
    let instance = io::load_instance(&args.data)?;
    let config = args.search_config();
    info!(
        people = instance.person_count(),
        tables = instance.table_count(),
        population = config.population_size,
        mutation_rate = config.mutation_rate,
        "starting search"
    );
    let mut engine = SearchEngine::new(instance, config)?;
    let mut log = ProgressLog::default();
    let best = engine.run(|generation, mean_score| {
        log.record(generation, mean_score);
        debug!(generation, mean_score, "generation done");
        if generation % REPORT_EVERY == 0 {
            info!(generation, mean_score, "progress");
        }
    })?;
    info!(generations = log.len(), score = ?best.score(), "search converged");

    io::save_result(&args.result, &best)?;
    info!(path = %args.result.display(), "result written");
    if let Some(path) = &args.scores {
        io::save_scores(path, &log)?;
        info!(path = %path.display(), "mean scores written");
    }
    Ok(())
}

fn generate(args: GenerateArgs) -> Result<(), Error> {
    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let instance = random_instance(args.people, args.tables, &mut rng)?;
    io::save_instance(&args.output, &instance)?;
    info!(path = %args.output.display(), people = args.people, tables = args.tables, "data written");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Solve(args) => solve(args),
        Command::Generate(args) => generate(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
