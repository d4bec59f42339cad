//! Copy planning: resolve roots, walk sources, compute destinations.
//!
//! Planning never touches the destination, so a plan can be printed for a dry
//! run and then handed to [`crate::execute_plan`].

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::{BTreeMap, HashSet};
use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path, PathBuf, is_separator};

use mane_git::GitError;
use mane_glob::IgnoreFile;
use mane_replace::RuleSet;

use crate::error::OperationError;
use crate::walk::{EntryKind, build_matcher, walk_tree};

/// Sources to copy and where to put them.
#[derive(Debug, Clone)]
pub struct CopyJob {
    /// Source paths in command-line order.
    pub sources: Vec<PathBuf>,
    /// Destination path (directory, or new root for a single source).
    pub destination: PathBuf,
}

/// Options that change how a copy is planned.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyOptions {
    /// Rewrite file and directory names as well as contents.
    pub in_place: bool,
    /// Copy entries even when ignore rules exclude them.
    pub include_ignored: bool,
}

/// One entry that will be materialized.
#[derive(Debug, Clone)]
pub struct PlannedEntry {
    /// Path to read from.
    pub source: PathBuf,
    /// Path to write to.
    pub target: PathBuf,
    /// Entry kind.
    pub kind: EntryKind,
}

/// Everything a copy will do, in execution order, plus the problems found
/// while planning.
#[derive(Debug, Default)]
pub struct CopyPlan {
    /// Entries in traversal order; directories precede their contents.
    pub entries: Vec<PlannedEntry>,
    /// Per-entry problems. These entries are not in `entries`.
    pub errors: Vec<OperationError>,
}

impl CopyPlan {
    /// Number of non-directory entries (the progress total).
    #[must_use]
    pub fn file_count(&self) -> u64 {
        self.entries
            .iter()
            .filter(|entry| entry.kind != EntryKind::Directory)
            .count() as u64
    }
}

/// Plan a copy without touching the destination.
///
/// # Arguments
///
/// * `job` - Sources and destination
/// * `rules` - Used to rewrite names when `options.in_place` is set
/// * `options` - Renaming and ignore behaviour
/// * `locate` - Collects the ignore files that apply to a source directory
#[must_use]
pub fn plan_copy<L>(job: &CopyJob, rules: &RuleSet, options: CopyOptions, locate: &L) -> CopyPlan
where
    L: Fn(&Path) -> Result<Vec<IgnoreFile>, GitError>,
{
    let mut plan = CopyPlan::default();
    let mut taken: HashSet<PathBuf> = HashSet::new();

    for (source, target_root) in resolve_roots(job, rules, options, &mut plan.errors) {
        let Some(kind) = EntryKind::of(&source) else {
            plan.errors.push(OperationError::SourceNotFound { path: source });
            continue;
        };

        if kind != EntryKind::Directory {
            taken.insert(target_root.clone());
            plan.entries.push(PlannedEntry {
                source,
                target: target_root,
                kind,
            });
            continue;
        }

        let matcher = match build_matcher(&source, options.include_ignored, locate) {
            Ok(matcher) => matcher,
            Err(e) => {
                log::warn!("Skipping {}: {e}", source.display());
                plan.errors.push(e);
                continue;
            }
        };

        taken.insert(target_root.clone());
        plan.entries.push(PlannedEntry {
            source: source.clone(),
            target: target_root.clone(),
            kind,
        });

        let (walked, walk_errors) = walk_tree(&source, &matcher);
        plan.errors.extend(walk_errors);

        let mut skipped_dirs: Vec<PathBuf> = Vec::new();

        for entry in walked {
            if skipped_dirs.iter().any(|dir| entry.relative.starts_with(dir)) {
                continue;
            }

            let target = match rewrite_relative(&entry.relative, rules, options.in_place) {
                Ok(relative) => target_root.join(relative),
                Err(name) => {
                    plan.errors.push(OperationError::InvalidName {
                        path: entry.path,
                        name,
                    });
                    if entry.kind == EntryKind::Directory {
                        skipped_dirs.push(entry.relative);
                    }
                    continue;
                }
            };

            if !taken.insert(target.clone()) {
                log::debug!(
                    "{} collides with an earlier entry at {}",
                    entry.path.display(),
                    target.display()
                );
                plan.errors.push(OperationError::DestinationCollision {
                    source_path: entry.path,
                    target,
                });
                if entry.kind == EntryKind::Directory {
                    skipped_dirs.push(entry.relative);
                }
                continue;
            }

            plan.entries.push(PlannedEntry {
                source: entry.path,
                target,
                kind: entry.kind,
            });
        }
    }

    log::debug!(
        "Planned {} entries with {} errors",
        plan.entries.len(),
        plan.errors.len()
    );

    plan
}

/// Pair each source with the path its copy is rooted at.
///
/// Missing sources never claim a root. Sources whose roots collide are
/// reported and dropped.
fn resolve_roots(
    job: &CopyJob,
    rules: &RuleSet,
    options: CopyOptions,
    errors: &mut Vec<OperationError>,
) -> Vec<(PathBuf, PathBuf)> {
    if job.sources.len() == 1 && !is_directory_like(&job.destination) {
        log::debug!(
            "Destination {} is not a directory, copying onto it directly",
            job.destination.display()
        );
        return vec![(job.sources[0].clone(), job.destination.clone())];
    }

    let mut by_target: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    let mut order = Vec::new();

    for source in &job.sources {
        if EntryKind::of(source).is_none() {
            errors.push(OperationError::SourceNotFound {
                path: source.clone(),
            });
            continue;
        }

        let Some(name) = source_name(source) else {
            errors.push(OperationError::InvalidName {
                path: source.clone(),
                name: String::new(),
            });
            continue;
        };

        let name = if options.in_place {
            match rewrite_name(&name, rules) {
                Ok(name) => name,
                Err(rewritten) => {
                    errors.push(OperationError::InvalidName {
                        path: source.clone(),
                        name: rewritten,
                    });
                    continue;
                }
            }
        } else {
            name.to_string_lossy().into_owned()
        };

        let target = job.destination.join(name);
        let claims = by_target.entry(target.clone()).or_default();
        if claims.is_empty() {
            order.push(target);
        }
        claims.push(source.clone());
    }

    let mut roots = Vec::with_capacity(order.len());
    for target in order {
        let Some(mut sources) = by_target.remove(&target) else {
            continue;
        };
        if sources.len() == 1 {
            if let Some(source) = sources.pop() {
                roots.push((source, target));
            }
        } else {
            log::warn!(
                "{} sources would be copied to {}",
                sources.len(),
                target.display()
            );
            errors.extend(sources.into_iter().map(|source| {
                OperationError::DestinationCollision {
                    source_path: source,
                    target: target.clone(),
                }
            }));
        }
    }

    roots
}

/// Whether the destination should be treated as a parent directory.
fn is_directory_like(destination: &Path) -> bool {
    destination.is_dir()
        || destination
            .to_str()
            .and_then(|s| s.chars().last())
            .is_some_and(is_separator)
}

/// The final component of a source, resolving `.` and `..`.
fn source_name(source: &Path) -> Option<std::ffi::OsString> {
    match source.components().next_back() {
        Some(Component::Normal(name)) => Some(name.to_os_string()),
        _ => fs::canonicalize(source)
            .ok()
            .and_then(|path| path.file_name().map(OsStr::to_os_string)),
    }
}

/// Rewrite one name, rejecting results that are not a single component.
fn rewrite_name(name: &OsStr, rules: &RuleSet) -> Result<String, String> {
    let Some(name) = name.to_str() else {
        log::debug!("Not rewriting non-UTF-8 name {}", name.to_string_lossy());
        return Ok(name.to_string_lossy().into_owned());
    };

    let rewritten = rules.apply_to_name(name);
    if rewritten.is_empty() || rewritten.contains(is_separator) || rewritten == "." || rewritten == ".." {
        return Err(rewritten);
    }
    Ok(rewritten)
}

/// Rewrite every component of a relative path.
fn rewrite_relative(relative: &Path, rules: &RuleSet, in_place: bool) -> Result<PathBuf, String> {
    if !in_place {
        return Ok(relative.to_path_buf());
    }

    let mut out = PathBuf::new();
    for component in relative.components() {
        match component {
            Component::Normal(name) => out.push(rewrite_name(name, rules)?),
            other => out.push(other.as_os_str()),
        }
    }
    Ok(out)
}
