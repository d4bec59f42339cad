//! mane CLI entry point.
//!
//! Copies files and directories, or rewrites them where they are, replacing
//! text in every case style.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod args;
mod output;
mod progress;

use std::env;
use std::io::{self, IsTerminal, Read, Write};

use clap::Parser;

use args::{Args, Mode};
use mane_config::{RulesFile, load_rules_file, merge_rules};
use mane_git::locate_ignore_files;
use mane_operations::{
    CopyOptions, OperationError, execute_plan, plan_copy, rewrite_in_place, rewrite_to_string,
};
use mane_replace::RuleSet;
use progress::ProgressManager;

fn main() {
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        // SAFETY: We're setting this before any other threads are spawned
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    pretty_env_logger::init();

    if let Err(e) = run(&args) {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Main application logic.
fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let file = match &args.rules_file {
        Some(path) => load_rules_file(path)?,
        None => RulesFile::default(),
    };
    let rules = merge_rules(&file, &args.rule_pairs())?;
    let in_place = args.in_place || file.in_place;
    let include_ignored = args.include_git_ignore || file.include_git_ignore;

    let mode = args.mode(in_place, io::stdin().is_terminal());
    log::debug!("Running in {mode:?} mode with {} rules", rules.len());

    if mode != Mode::Copy && rules.is_empty() {
        return Err("No replacement rules specified. Use -r/--replace FROM TO".into());
    }
    if args.dry_run && mode != Mode::Copy {
        output::print_warning("--dry-run only applies to --copy");
    }

    match mode {
        Mode::Copy => run_copy(
            args,
            &rules,
            CopyOptions {
                in_place,
                include_ignored,
            },
        ),
        Mode::InPlace => run_in_place(args, &rules, include_ignored),
        Mode::Files => run_files(args, &rules),
        Mode::Stdin => run_stdin(&rules),
        Mode::None => Err("No action specified. Use --help for more information.".into()),
    }
}

/// Copy `--copy` sources to the target.
fn run_copy(
    args: &Args,
    rules: &RuleSet,
    options: CopyOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let job = args
        .copy_job()
        .ok_or("The -c/--copy option requires at least one SOURCE and one TARGET")?;

    let plan = plan_copy(&job, rules, options, &locate_ignore_files);

    if args.dry_run {
        output::print_plan(&plan);
        return finish(&plan.errors);
    }

    let progress_mgr = ProgressManager::new(args.should_show_progress());
    let bar = progress_mgr.create_file_bar("Copying", plan.file_count());

    let report = execute_plan(plan, rules, |entry, progress| {
        if args.verbose {
            progress_mgr.println(&output::format_entry(&entry.source, &entry.target));
        }
        if let Some(current) = &progress.current_file {
            bar.set_message(current.clone());
        }
        bar.set_position(progress.files_copied);
    });

    bar.finish_and_clear();
    progress_mgr.clear();

    output::print_copy_summary(&report);
    finish(&report.errors)
}

/// Rewrite contents and names of the positional paths.
fn run_in_place(
    args: &Args,
    rules: &RuleSet,
    include_ignored: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.files.is_empty() {
        return Err("In-place mode requires at least one FILE or directory".into());
    }

    let report = rewrite_in_place(&args.files, rules, include_ignored, &locate_ignore_files);

    output::print_rewrite_summary(&report);
    finish(&report.errors)
}

/// Print the rewritten content of each positional file.
fn run_files(args: &Args, rules: &RuleSet) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = io::stdout().lock();
    let mut errors = Vec::new();

    for path in &args.files {
        if path.is_dir() {
            output::print_warning(&format!("Skipping directory: {}", path.display()));
            continue;
        }

        match rewrite_to_string(path, rules) {
            Ok(Some(text)) => stdout.write_all(text.as_bytes())?,
            Ok(None) => {
                output::print_warning(&format!("Skipping binary file: {}", path.display()));
            }
            Err(e) => errors.push(e),
        }
    }

    stdout.flush()?;
    finish(&errors)
}

/// Rewrite standard input to standard output.
fn run_stdin(rules: &RuleSet) -> Result<(), Box<dyn std::error::Error>> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;

    if input.is_empty() {
        return Err("No input provided for replacement".into());
    }

    let replaced = rules.apply(&input);
    let mut stdout = io::stdout().lock();
    stdout.write_all(replaced.as_bytes())?;
    stdout.flush()?;

    if replaced == input {
        output::print_warning(
            "No replacements were made. Check if the pattern exists in the input.",
        );
    }

    Ok(())
}

/// Report per-entry errors and turn them into a failing result.
fn finish(errors: &[OperationError]) -> Result<(), Box<dyn std::error::Error>> {
    if errors.is_empty() {
        return Ok(());
    }

    output::print_entry_errors(errors);
    Err(format!(
        "{} {} could not be processed",
        errors.len(),
        if errors.len() == 1 { "entry" } else { "entries" }
    )
    .into())
}
