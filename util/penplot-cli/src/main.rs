use std::{fs::write, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use clap_stdin::FileOrStdin;
use penplot::{config::PlotterConfiguration, optimize_gcode_file, PipelineOptions};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(author, version, about = "Reorder and clean up pen plotter G-code to cut down pen-up travel.", long_about = None)]
struct Args {
    /// The file to process, or '-' to read from stdin.
    #[arg(default_value = "-")]
    input: FileOrStdin,

    /// Where to write the result; defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// A JSON object overriding any of the plotter configuration fields, e.g. '{"pen_up": "G0 Z5"}'.
    #[arg(long)]
    config: Option<String>,

    /// Pen lifts travelling at most this many millimeters are removed.
    #[arg(long)]
    min_penup_travel: Option<f64>,

    /// Feed rate written on the first drawn move of every stroke.
    #[arg(long)]
    feedrate: Option<f64>,

    /// Index of the stroke the reordered program starts with.
    #[arg(long, default_value_t = 0)]
    start_index: usize,

    /// Keep repeated strokes.
    #[arg(long)]
    no_dedupe: bool,

    /// Keep the original stroke order.
    #[arg(long)]
    no_reorder: bool,

    /// Keep short pen lifts.
    #[arg(long)]
    no_prune: bool,

    /// Leave feed rates and zero-length moves alone.
    #[arg(long)]
    no_clean: bool,

    /// Print a JSON summary of the optimization to stderr.
    #[arg(long)]
    report: bool,

    /// More logging; repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn configuration(json: Option<&str>, min_penup_travel: Option<f64>, feedrate: Option<f64>) -> anyhow::Result<PlotterConfiguration> {
    let mut config = match json {
        Some(json) => serde_json::from_str::<PlotterConfiguration>(json).context("Failed while parsing configuration JSON")?,
        None => PlotterConfiguration::standard(),
    };
    if let Some(min_penup_travel) = min_penup_travel {
        config.min_penup_travel = min_penup_travel;
    }
    if let Some(feedrate) = feedrate {
        config.feedrate = feedrate;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = configuration(args.config.as_deref(), args.min_penup_travel, args.feedrate)?;
    let options = PipelineOptions {
        dedupe: !args.no_dedupe,
        reorder: !args.no_reorder,
        start_index: args.start_index,
        prune: !args.no_prune,
        clean: !args.no_clean,
    };
    let (result, report) = optimize_gcode_file(&config, &options, &args.input)
        .context("Failed to optimize the program")?;

    match &args.output {
        Some(path) => write(path, result).with_context(|| format!("Failed to write {:?}", path))?,
        None => print!("{}", result),
    }
    if args.report {
        eprintln!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_arguments() {
        Args::command().debug_assert();
    }
    #[test]
    fn test_flags_override_json() {
        let config = configuration(Some(r#"{"min_penup_travel": 3.0, "feedrate": 20.0}"#), None, Some(45.0)).unwrap();
        assert_eq!(config.min_penup_travel, 3.0);
        assert_eq!(config.feedrate, 45.0);
        assert_eq!(config.pen_down, "G0 F500.000 Z160.000");
    }
    #[test]
    fn test_bad_json() {
        assert!(configuration(Some("{not json"), None, None).is_err());
    }
}
