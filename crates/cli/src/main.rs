//! Demand-paging simulator CLI.
//!
//! This binary is the external driver for the simulation engine. It performs:
//! 1. **Run:** Step through a reference sequence, printing every hit, fault and eviction.
//! 2. **Compare:** Replay the same input under FIFO, Optimal, Clock and LRU.
//! 3. **Locality:** Report average, temporal and spatial locality of the input.
//!
//! Input comes from flags (`--sequence`, `--frames`, ...) or a JSON config file (`--config`).

use std::collections::BTreeMap;
use std::{fs, process};

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use pagesim_core::analytics::{self, Locality, WorkingSet};
use pagesim_core::common::{PageId, ProcessId};
use pagesim_core::config::{self, Algorithm, AllocationMode, Distribution, SimConfig, defaults};
use pagesim_core::sim::StepEvent;
use pagesim_core::stats::Summary;
use pagesim_core::{Simulation, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "pagesim",
    version,
    about = "Demand-paging simulator: FIFO, LRU, Clock and Optimal page replacement",
    long_about = "Step through a page reference sequence under a replacement policy, compare policies, \
                  or measure locality.\n\nExamples:\n  \
                  pagesim run -s 1,2,3,4,1,2,5,1,2,3,4,5 -f 3 -a fifo\n  \
                  pagesim run -s 1:1,2:1,1:2,2:3 -f 4 --mode local --distribution equal\n  \
                  pagesim compare -s 7,0,1,2,0,3,0,4 -f 3\n  \
                  pagesim run --config run.json --json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Step through the whole sequence and print each event and the final statistics.
    Run {
        #[command(flatten)]
        input: InputArgs,

        /// Emit the event log and summaries as JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Statistics sections to print (summary, processes, policy). Default: all.
        #[arg(long, value_delimiter = ',')]
        stats: Vec<String>,

        /// Trailing window for the working-set check.
        #[arg(short, long, default_value_t = defaults::WINDOW)]
        window: usize,
    },

    /// Run the sequence under every algorithm and compare fault rates.
    Compare {
        #[command(flatten)]
        input: InputArgs,

        /// Emit the comparison as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Report locality of the reference sequence.
    Locality {
        #[command(flatten)]
        input: InputArgs,

        /// Averaging window.
        #[arg(short, long, default_value_t = defaults::WINDOW)]
        window: usize,

        /// Emit the result as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// JSON configuration file. Other input flags are ignored when given.
    #[arg(short, long)]
    config: Option<String>,

    /// Reference sequence: page ids or process:page pairs, comma or space separated.
    #[arg(short, long)]
    sequence: Option<String>,

    /// Number of physical frames.
    #[arg(short, long, default_value_t = defaults::NUM_FRAMES)]
    frames: usize,

    /// Replacement algorithm (fifo, optimal, clock, lru).
    #[arg(short, long, default_value = "fifo")]
    algorithm: Algorithm,

    /// Allocation mode (global, local).
    #[arg(short, long, default_value = "global")]
    mode: AllocationMode,

    /// Processes bare page ids are spread over in local mode.
    #[arg(short, long, default_value_t = defaults::NUM_PROCESSES)]
    processes: usize,

    /// Local frame distribution (equal, proportional, custom).
    #[arg(short, long, default_value = "equal")]
    distribution: Distribution,

    /// Custom frame counts per process, in process-id order (e.g. 2,1).
    #[arg(long, value_delimiter = ',')]
    custom: Vec<usize>,
}

impl InputArgs {
    /// Builds the run configuration from the file or the flags.
    fn load(&self) -> Result<SimConfig, String> {
        if let Some(path) = &self.config {
            let text = fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
            return SimConfig::from_json(&text).map_err(|e| format!("{path}: {e}"));
        }

        let text = self
            .sequence
            .as_deref()
            .ok_or("specify --sequence <pages> or --config <file>")?;
        let sequence = config::parse_sequence(text).map_err(|e| e.to_string())?;
        Ok(SimConfig {
            sequence,
            num_frames: self.frames,
            algorithm: self.algorithm,
            mode: self.mode,
            num_processes: self.processes,
            distribution: self.distribution,
            custom_frames: self.custom.clone(),
        })
    }
}

#[derive(Serialize)]
struct RunReport<'a> {
    config: &'a SimConfig,
    events: &'a [StepEvent],
    summary: Summary,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    processes: BTreeMap<ProcessId, Summary>,
    working_set: WorkingSet,
    locality: Locality,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run {
            input,
            json,
            stats,
            window,
        } => cmd_run(&input, json, &stats, window),
        Commands::Compare { input, json } => cmd_compare(&input, json),
        Commands::Locality {
            input,
            window,
            json,
        } => cmd_locality(&input, window, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Runs every step immediately, printing each event, then the statistics and analyses.
fn cmd_run(
    input: &InputArgs,
    json: bool,
    sections: &[String],
    window: usize,
) -> Result<(), String> {
    let config = input.load()?;
    let mut simulator = Simulator::new();
    let run = simulator.start(config).map_err(|e| e.to_string())?;

    if !json {
        print_header(run);
    }

    while let Ok(event) = simulator.step() {
        if !json {
            println!("{event}");
        }
    }

    let run = simulator.simulation().ok_or("simulation vanished")?;
    let working_set = analytics::working_set(run, window);
    let locality = analytics::locality(&pages_of(run));
    if analytics::fault_rate_thrashing(&run.stats().global) {
        tracing::warn!(
            fault_rate = run.stats().global.fault_rate(),
            "fault rate indicates thrashing"
        );
    }

    if json {
        let report = RunReport {
            config: run.config(),
            events: run.log(),
            summary: run.summary(),
            processes: run.process_summaries(),
            working_set,
            locality,
        };
        let text = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{text}");
        return Ok(());
    }

    println!("\nFinal frames: {}", format_frames(run));
    run.stats().print_sections(sections);
    println!(
        "working_set              {} pages {:?} over last {} refs{}",
        working_set.size,
        working_set.pages,
        window,
        if working_set.thrashing { " (THRASHING)" } else { "" }
    );
    println!(
        "locality                 avg {:.2}%  temporal {:.2}%  spatial {:.2}%",
        locality.average, locality.temporal, locality.spatial
    );
    Ok(())
}

fn cmd_compare(input: &InputArgs, json: bool) -> Result<(), String> {
    let config = input.load()?;
    let comparison = analytics::compare_algorithms(&config).map_err(|e| e.to_string())?;
    if json {
        let text = serde_json::to_string_pretty(&comparison).map_err(|e| e.to_string())?;
        println!("{text}");
    } else {
        comparison.print();
        if let Some(best) = comparison.best() {
            println!("fewest faults: {best}");
        }
    }
    Ok(())
}

fn cmd_locality(input: &InputArgs, window: usize, json: bool) -> Result<(), String> {
    let config = input.load()?;
    let run = Simulation::new(config).map_err(|e| e.to_string())?;
    let locality = analytics::locality_with_window(&pages_of(&run), window);
    if json {
        let text = serde_json::to_string_pretty(&locality).map_err(|e| e.to_string())?;
        println!("{text}");
    } else {
        println!("average                  {:.2}%", locality.average);
        println!("temporal                 {:.2}%", locality.temporal);
        println!("spatial                  {:.2}%", locality.spatial);
    }
    Ok(())
}

fn print_header(run: &Simulation) {
    let config = run.config();
    println!(
        "Configuration: algorithm={} mode={} frames={} references={}",
        config.algorithm,
        config.mode,
        config.num_frames,
        run.references().len()
    );
    if config.mode == AllocationMode::Local {
        println!("  distribution={}", config.distribution);
        for (process, frames) in run.allocation().partitions() {
            println!("  P{process}: frames {frames:?}");
        }
        if !run.allocation().unassigned().is_empty() {
            println!("  unassigned: {:?}", run.allocation().unassigned());
        }
    }
    println!();
}

fn format_frames(run: &Simulation) -> String {
    run.frames()
        .slots()
        .iter()
        .map(|slot| slot.map_or_else(|| "-".to_string(), |r| r.page.to_string()))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn pages_of(run: &Simulation) -> Vec<PageId> {
    run.references().iter().map(|r| r.page).collect()
}
