#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # pcgrade
//!
//! Parses the output of the "Export Detailed Progress" button on the Physics
//! Classroom class page, totals concept-builder points per Canvas
//! assignment, validates them against the assignment rubric, and writes an
//! updated copy of the exported Canvas gradebook ready for re-import. Also
//! prints final grades computed from a merged gradebook.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bpaf::*;
use chrono::Local;
use colored::Colorize;
use pcgrade::{
    accumulate::accumulate,
    config::{GradeConfig, Rubric},
    final_grades::grade_report,
    io, merge,
};
use self_update::cargo_crate_version;
use tabled::{Table, settings::Style};
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Updates binary based on github releases
fn update() -> Result<()> {
    self_update::backends::github::Update::configure()
        .repo_owner("pcgrade")
        .repo_name("pcgrade")
        .bin_name("pcgrade")
        .no_confirm(true)
        .show_download_progress(true)
        .show_output(false)
        .current_version(cargo_crate_version!())
        .build()?
        .update()?;

    eprintln!("Update done!");
    Ok(())
}

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Merge a progress export into the Canvas gradebook
    Merge {
        /// Rubric file overriding the bundled one
        assignments: Option<PathBuf>,
        /// Output filename override
        output:      Option<PathBuf>,
        /// Where to dump accumulated points as JSON, if anywhere
        dump_points: Option<PathBuf>,
        /// The Physics Classroom export
        progress:    PathBuf,
        /// The Canvas gradebook export
        gradebook:   PathBuf,
    },
    /// Print final grades from a merged gradebook
    FinalGrades {
        /// Cutoff config overriding the bundled one
        config:    Option<PathBuf>,
        /// The Canvas gradebook export
        gradebook: PathBuf,
    },
    /// Update the command
    Update,
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    let merge = {
        let assignments = short('a')
            .long("assignments-file")
            .help(
                "Custom config file assigning Physics Classroom tasks to Canvas assignments. See \
                 `src/configs/assignments.toml` in this repo for an example",
            )
            .argument::<PathBuf>("FILE")
            .optional();
        let output = short('o')
            .long("output")
            .help("Output filename. Defaults to `physics_classroom_grades_<timestamp>.csv`")
            .argument::<PathBuf>("FILE")
            .optional();
        let dump_points = long("dump-points")
            .help("Also write the accumulated assignment/student points as JSON")
            .argument::<PathBuf>("FILE")
            .optional();
        let progress = positional::<PathBuf>("PROGRESS_FILE")
            .help("Detailed Progress export from Physics Classroom (.xlsx, or .csv)");
        let gradebook =
            positional::<PathBuf>("CANVAS_FILE").help("Exported .csv gradebook from Canvas");

        construct!(Cmd::Merge {
            assignments,
            output,
            dump_points,
            progress,
            gradebook
        })
        .to_options()
        .command("merge")
        .help("Parse output from Physics Classroom and merge it into the Canvas gradebook")
    };

    let final_grades = {
        let config = short('c')
            .long("config-file")
            .help(
                "Custom config file setting grade cutoffs and units to use in final grade \
                 calculation",
            )
            .argument::<PathBuf>("FILE")
            .optional();
        let gradebook =
            positional::<PathBuf>("CANVAS_FILE").help("Exported .csv gradebook from Canvas");

        construct!(Cmd::FinalGrades { config, gradebook })
            .to_options()
            .command("final-grades")
            .help("Print final grades parsed from the gradebook")
    };

    let update = pure(Cmd::Update)
        .to_options()
        .command("update")
        .help("Update the pcgrade command");

    let cmd = construct!([merge, final_grades, update]);

    cmd.to_options()
        .descr("Formats Physics Classroom grades for the Canvas gradebook")
        .run()
}

/// Default output filename for the merge subcommand, timestamped so repeated
/// runs never clobber each other.
fn default_output_name() -> PathBuf {
    PathBuf::from(format!(
        "physics_classroom_grades_{}.csv",
        Local::now().format("%Y_%m_%d-%H_%M_%S")
    ))
}

/// Runs the merge subcommand.
fn run_merge(
    assignments: Option<PathBuf>,
    output: Option<PathBuf>,
    dump_points: Option<PathBuf>,
    progress: PathBuf,
    gradebook: PathBuf,
) -> Result<()> {
    let rubric = match assignments {
        Some(path) => Rubric::load(&path)?,
        None => Rubric::bundled()?,
    };

    let progress_rows = io::load_progress(&progress)?;
    let init_grades = io::load_gradebook(&gradebook)?;

    let earned = accumulate(&progress_rows, &rubric)?;

    if let Some(path) = dump_points {
        let json = serde_json::to_string_pretty(&earned)
            .context("Could not serialize accumulated points")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Could not write {}", path.display()))?;
    }

    let updated = merge::merge(&earned, init_grades, &rubric)?;

    let output = output.unwrap_or_else(default_output_name);
    io::write_gradebook(&updated, &output)?;
    println!("Formatted grades written to {}", output.display());

    Ok(())
}

/// Runs the final-grades subcommand.
fn run_final_grades(config: Option<PathBuf>, gradebook: PathBuf) -> Result<()> {
    let config = match config {
        Some(path) => GradeConfig::load(&path)?,
        None => GradeConfig::bundled()?,
    };

    let gradebook = io::load_gradebook(&gradebook)?;
    let report = grade_report(&gradebook, &config)?;

    println!("{}", Table::new(&report).with(Style::modern()));

    Ok(())
}

fn main() {
    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false);
    let filter_layer = LevelFilter::from_level(Level::INFO);
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    let result = match options() {
        Cmd::Merge {
            assignments,
            output,
            dump_points,
            progress,
            gradebook,
        } => run_merge(assignments, output, dump_points, progress, gradebook),
        Cmd::FinalGrades { config, gradebook } => run_final_grades(config, gradebook),
        Cmd::Update => update(),
    };

    if let Err(e) = result {
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
