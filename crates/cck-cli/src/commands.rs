//! Command execution
//!
//! Results go to `out`, per-file failures that do not abort the command
//! go to `err`.

use anyhow::Result;
use cck_core::{
    collect_documents, decode_all, discover, find_matches, find_matches_par, format_match, list_paths,
    load_targets, CckConfig, Document, FsSource,
};
use clap::ArgMatches;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// How a command finished, when it did not fail outright
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Everything was processed
    Success,
    /// Some inputs were reported as failed
    Partial,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => Self::SUCCESS,
            Outcome::Partial => Self::FAILURE,
        }
    }
}

/// `findref` arguments
#[derive(Debug, Clone, Default)]
pub struct FindRef {
    /// Resources (or their `.meta` files) to search for
    pub resources: Vec<String>,
    /// Files, directories or globs to search in
    pub scopes: Vec<String>,
    /// Skip undecodable documents
    pub keep_going: bool,
}

/// `lsnode` arguments
#[derive(Debug, Clone, Default)]
pub struct ListNodes {
    /// Documents to list
    pub files: Vec<String>,
    /// Leading levels to drop from every path
    pub cut_head: usize,
}

/// Dispatch parsed arguments
///
/// # Errors
/// Configuration errors, and any error that aborts the selected command.
pub fn run(matches: &ArgMatches, out: &mut dyn Write, err: &mut dyn Write) -> Result<Outcome> {
    let config = resolve_config(matches)?;

    match matches.subcommand() {
        Some(("findref", args)) => {
            let mut config = config;
            config.scan.exclude.extend(strings(args, "exclude"));
            let request = FindRef {
                resources: strings(args, "resources"),
                scopes: strings(args, "scope"),
                keep_going: args.get_flag("keep-going"),
            };
            findref(&request, &config, out)
        }
        Some(("lsnode", args)) => {
            let request = ListNodes {
                files: strings(args, "files"),
                cut_head: args.get_one::<usize>("cut-head").copied().unwrap_or(1),
            };
            lsnode(&request, &config, out, err)
        }
        Some((other, _)) => anyhow::bail!("unknown command '{other}'"),
        None => anyhow::bail!("no command given"),
    }
}

/// Print every node referencing one of the resources
///
/// Any failure to load a target, discover documents or (without
/// `keep_going`) decode a document aborts the command.
///
/// # Errors
/// The first aborting failure.
pub fn findref(request: &FindRef, config: &CckConfig, out: &mut dyn Write) -> Result<Outcome> {
    let source = FsSource;
    let targets = load_targets(&request.resources, &source)?;
    if targets.is_empty() {
        return Ok(Outcome::Success);
    }

    let files = discover(&request.scopes, &config.scan)?;
    tracing::info!(targets = targets.len(), documents = files.len(), "searching");

    let decoded = decode_all(&files, &source, &config.decode, config.parallel);
    let documents = collect_documents(decoded, request.keep_going)?;

    let found = if config.parallel {
        find_matches_par(&targets, &documents)
    } else {
        find_matches(&targets, &documents)
    };

    let single_target = targets.len() == 1;
    for m in &found {
        writeln!(out, "{}", format_match(m, single_target))?;
    }
    Ok(Outcome::Success)
}

/// Print the root-to-leaf node paths of each document
///
/// Documents that cannot be read, decoded or walked are reported on
/// `err` and the remaining documents are still listed.
///
/// # Errors
/// Only if writing to `out` or `err` fails.
pub fn lsnode(
    request: &ListNodes,
    config: &CckConfig,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<Outcome> {
    let files: Vec<PathBuf> = request.files.iter().map(PathBuf::from).collect();
    let decoded = decode_all(&files, &FsSource, &config.decode, config.parallel);

    let mut failures = 0usize;
    for (name, entry) in request.files.iter().zip(decoded) {
        let listed = entry.result.and_then(|graph| {
            let document = Document {
                path: entry.path,
                graph,
            };
            list_paths(&document, &config.decode.root_type, request.cut_head)
        });

        match listed {
            Ok(paths) => {
                for path in paths {
                    writeln!(out, "{name}: {path}")?;
                }
            }
            Err(e) => {
                failures += 1;
                writeln!(err, "cckit: {e}")?;
            }
        }
    }

    if failures > 0 {
        tracing::warn!(failures, "some documents could not be listed");
        Ok(Outcome::Partial)
    } else {
        Ok(Outcome::Success)
    }
}

fn resolve_config(matches: &ArgMatches) -> Result<CckConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => CckConfig::load(path)?,
        None => CckConfig::default(),
    };
    if let Some(root_type) = matches.get_one::<String>("root-type") {
        config.decode.root_type.clone_from(root_type);
    }
    if matches.get_flag("sequential") {
        config.parallel = false;
    }
    Ok(config)
}

fn strings(args: &ArgMatches, id: &str) -> Vec<String> {
    args.get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}
