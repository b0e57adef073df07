//! Minimize a DFA given in the JSON exchange format.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use dfaminimizer::dfa::StateRecord;
use dfaminimizer::{Algorithm, MinimizationReport, Totality};
use log::{debug, error, info, LevelFilter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Selection {
    TableFilling,
    Moore,
    Hopcroft,
    /// Run the three algorithms and check that they agree.
    All,
}

/// Defines the arguments of the minimizer.
#[derive(Debug, Parser)]
#[clap(name = "dfa-minimize", version)]
struct Arguments {
    /// The algorithm computing the equivalence classes.
    #[clap(long, value_enum, default_value_t = Selection::Hopcroft)]
    algorithm: Selection,

    /// Keep the block rejecting everything, so that the minimized automaton stays total.
    #[clap(long)]
    total: bool,

    /// Where to write the minimized automaton, the standard output if not given.
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// If given, enables more verbose logging.
    #[clap(long)]
    debug: bool,

    /// The JSON file holding the state records of the automaton.
    #[clap(name = "INPUT")]
    input: PathBuf,
}

fn main() {
    let args = Arguments::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();
    debug!("{} v{}", env!("CARGO_BIN_NAME"), env!("CARGO_PKG_VERSION"));

    let json = match fs::read_to_string(&args.input) {
        Ok(json) => json,
        Err(err) => {
            error!("Failed to read '{}': {err}", args.input.display());
            std::process::exit(1);
        }
    };
    let records: Vec<StateRecord> = match serde_json::from_str(&json) {
        Ok(records) => records,
        Err(err) => {
            error!("Failed to parse '{}': {err}", args.input.display());
            std::process::exit(1);
        }
    };
    debug!("Loaded {} state records.", records.len());

    let totality = if args.total {
        Totality::Total
    } else {
        Totality::Partial
    };
    let reports: Result<Vec<MinimizationReport>, _> = match args.algorithm {
        Selection::All => dfaminimizer::compare_with(&records, totality),
        Selection::TableFilling => {
            dfaminimizer::minimize_with(&records, Algorithm::TableFilling, totality).map(|r| vec![r])
        }
        Selection::Moore => {
            dfaminimizer::minimize_with(&records, Algorithm::Moore, totality).map(|r| vec![r])
        }
        Selection::Hopcroft => {
            dfaminimizer::minimize_with(&records, Algorithm::Hopcroft, totality).map(|r| vec![r])
        }
    };
    let reports = match reports {
        Ok(reports) => reports,
        Err(err) => {
            error!("Failed to minimize '{}': {err}", args.input.display());
            std::process::exit(if err.is_server_error() { 2 } else { 1 });
        }
    };

    for report in &reports {
        info!(
            "{:<14} {:>8} -> {:<8} states in {:.3} ms",
            report.get_algorithm().as_str(),
            report.get_number_of_states(),
            report.get_number_of_minimized_states(),
            report.get_elapsed().as_secs_f64() * 1000.0
        );
    }

    let Some(report) = reports.first() else {
        return;
    };
    let json = match report.get_automaton().to_json() {
        Ok(json) => json,
        Err(err) => {
            error!("Failed to serialize the minimized automaton: {err}");
            std::process::exit(2);
        }
    };
    match &args.output {
        Some(path) => {
            if let Err(err) = fs::write(path, json + "\n") {
                error!("Failed to write '{}': {err}", path.display());
                std::process::exit(1);
            }
            debug!("Wrote the minimized automaton to '{}'.", path.display());
        }
        None => println!("{json}"),
    }
}
