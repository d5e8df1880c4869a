use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::engine::SearchConfig;

/// Seats guests at equal tables so that the least satisfied table is as
/// happy as possible, using a genetic algorithm.
#[derive(Parser, Debug, Clone)]
#[command(name = "seating")]
#[command(author, version, about, long_about)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search for a seating of the people described in a data file
    Solve(SolveArgs),
    /// Write a random data file for testing
    Generate(GenerateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    /// JSON data file with person_count, table_count and affinity
    #[arg(short, long, value_name = "FILE")]
    pub data: PathBuf,
    /// Population size, at least 2
    #[arg(short, long, default_value_t = 1000)]
    pub population: usize,
    /// Mutation probability in [0, 1]
    #[arg(short, long, default_value_t = 0.1)]
    pub mutation: f64,
    /// Where to write the best seating
    #[arg(short, long, value_name = "FILE", default_value = "result.json")]
    pub result: PathBuf,
    /// Where to write the mean score of every generation, as CSV
    #[arg(short, long, value_name = "FILE")]
    pub scores: Option<PathBuf>,
    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,
}

impl SolveArgs {
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            population_size: self.population,
            mutation_rate: self.mutation,
            seed: self.seed,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Number of people
    #[arg(short = 'n', long)]
    pub people: usize,
    /// Number of tables
    #[arg(short = 'm', long)]
    pub tables: usize,
    /// Where to write the data file
    #[arg(short, long, value_name = "FILE", default_value = "data.json")]
    pub output: PathBuf,
    /// Seed for a reproducible instance
    #[arg(long)]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_defaults() {
        let cli = Cli::try_parse_from(["seating", "solve", "-d", "data.json"]).unwrap();
        let Command::Solve(args) = cli.command else { panic!("expected solve") };
        assert_eq!(args.data, PathBuf::from("data.json"));
        assert_eq!(args.result, PathBuf::from("result.json"));
        assert_eq!(args.scores, None);
        assert_eq!(args.search_config(), SearchConfig::default());
    }

    #[test]
    fn test_solve_flags() {
        let cli = Cli::try_parse_from([
            "seating", "solve", "-d", "in.json", "-p", "50", "-m", "0.25", "-s", "scores.csv", "--seed", "9",
        ])
        .unwrap();
        let Command::Solve(args) = cli.command else { panic!("expected solve") };
        assert_eq!(
            args.search_config(),
            SearchConfig { population_size: 50, mutation_rate: 0.25, seed: Some(9) }
        );
        assert_eq!(args.scores, Some(PathBuf::from("scores.csv")));
    }

    #[test]
    fn test_generate_flags() {
        let cli = Cli::try_parse_from(["seating", "generate", "-n", "12", "-m", "3"]).unwrap();
        let Command::Generate(args) = cli.command else { panic!("expected generate") };
        assert_eq!((args.people, args.tables), (12, 3));
        assert_eq!(args.output, PathBuf::from("data.json"));
    }

    #[test]
    fn test_data_file_is_required() {
        assert!(Cli::try_parse_from(["seating", "solve"]).is_err());
    }
}
