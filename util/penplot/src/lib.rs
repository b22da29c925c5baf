//! Post-processing for pen plotter G-code: groups the program into strokes,
//! drops duplicated strokes, reorders them to cut down pen-up travel, removes
//! pen lifts that barely move and normalizes feed rates.

use command::Command;
use config::PlotterConfiguration;
use error::Result;
use serde::Serialize;
use tracing::{debug, info};

pub mod assemble;
pub mod clean;
pub mod command;
pub mod config;
pub mod coordinates;
pub mod dedupe;
pub mod error;
pub mod group;
pub mod output;
pub mod parse;
pub mod prune;
pub mod stroke;
pub mod tour;

pub use error::PlotterError;

/// Which stages of [`optimize_gcode_file`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    pub dedupe: bool,
    pub reorder: bool,
    /// Index of the stroke the reordered tour starts with.
    pub start_index: usize,
    pub prune: bool,
    pub clean: bool,
}
impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            dedupe: true,
            reorder: true,
            start_index: 0,
            prune: true,
            clean: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationReport {
    pub strokes: usize,
    pub unique_strokes: usize,
    pub penup_travel_before: f64,
    pub penup_travel_after: f64,
    pub total_travel_after: f64,
    pub lines_in: usize,
    pub lines_out: usize,
}

/// Runs the whole pipeline over a program and returns the rewritten program.
///
/// Commands before the first stroke and after the last one keep their place;
/// the strokes in between are replaced by the optimized stream.
pub fn optimize_gcode_file(
    config: &PlotterConfiguration,
    options: &PipelineOptions,
    input: &str,
) -> Result<(String, OptimizationReport)> {
    let commands: Vec<Command> = input.lines().map(|line| Command::classify(config, line)).collect();
    let lines_in = commands.len();
    let document = group::group_strokes(commands)?;
    let strokes = document.strokes.len();
    debug!("grouped {} strokes ({} preamble, {} postamble lines)", strokes, document.preamble.len(), document.postamble.len());

    let unique: Vec<_> = if options.dedupe {
        dedupe::dedupe(document.strokes).collect()
    } else {
        document.strokes
    };
    let unique_strokes = unique.len();
    debug!("{} strokes left after removing duplicates", unique_strokes);

    let penup_travel_before = assemble::total_penup_travel(&tour::document_order(unique.iter().cloned()));
    let tour = if options.reorder {
        tour::reorder_greedy(unique, options.start_index)?
    } else {
        tour::document_order(unique)
    };
    let penup_travel_after = assemble::total_penup_travel(&tour);
    let total_travel_after = assemble::total_travel(&tour)?;

    let assembled = assemble::assemble(config, &tour);
    let mut body: Box<dyn Iterator<Item = Result<Command>> + '_> = if tour.is_empty() {
        Box::new(std::iter::empty())
    } else if options.prune {
        Box::new(prune::prune_short_penups(config, assembled)?)
    } else {
        Box::new(assembled.map(Ok))
    };
    if options.clean {
        body = Box::new(clean::clean_commands(config, body));
    }

    let mut result = String::new();
    let mut lines_out = 0;
    for command in document.preamble.into_iter().map(Ok).chain(body).chain(document.postamble.into_iter().map(Ok)) {
        result.push_str(command?.text());
        result.push('\n');
        lines_out += 1;
    }

    let report = OptimizationReport {
        strokes,
        unique_strokes,
        penup_travel_before,
        penup_travel_after,
        total_travel_after,
        lines_in,
        lines_out,
    };
    info!(
        "{} strokes ({} unique), pen-up travel {:.1}mm -> {:.1}mm, {} -> {} lines",
        strokes, unique_strokes, penup_travel_before, penup_travel_after, lines_in, lines_out
    );
    Ok((result, report))
}
