//! Best-effort collection of staged changes, one file at a time.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use super::executor::GitExecutor;
use super::status::{ChangeType, parse_name_status};

/// Staged diff and classification for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    pub diff: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ChangeType>,
}

/// Result of collecting a single path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The path has a staged diff.
    Collected(ChangeRecord),
    /// git answered, but nothing is staged for the path.
    Unchanged,
    /// The diff query failed; the path is left out of the results.
    Skipped { reason: String },
}

/// Ordered mapping from path to [`ChangeRecord`].
///
/// Keeps insertion order. Inserting a path that is already present replaces
/// its record without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChangeSet {
    entries: IndexMap<String, ChangeRecord>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, record: ChangeRecord) {
        self.entries.insert(path.into(), record);
    }

    pub fn get(&self, path: &str) -> Option<&ChangeRecord> {
        self.entries.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChangeRecord)> {
        self.entries.iter().map(|(p, r)| (p.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a set from per-file outcomes, dropping everything not collected.
    pub fn from_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = (String, FileOutcome)>,
    {
        let entries = outcomes
            .into_iter()
            .filter_map(|(path, outcome)| match outcome {
                FileOutcome::Collected(record) => Some((path, record)),
                _ => None,
            })
            .collect();
        Self { entries }
    }
}

/// Collect the staged change for one path.
///
/// The name-status query only runs when a diff exists. If it fails, the diff
/// is kept without a classification.
pub async fn collect_file<E>(executor: &E, path: &str) -> FileOutcome
where
    E: GitExecutor + ?Sized,
{
    let diff = match executor.staged_diff(path).await {
        Ok(diff) => diff,
        Err(e) => {
            warn!(%path, "Skipping file, staged diff query failed: {e}");
            return FileOutcome::Skipped {
                reason: e.to_string(),
            };
        }
    };

    if diff.is_empty() {
        debug!(%path, "No staged changes");
        return FileOutcome::Unchanged;
    }

    let status = match executor.staged_name_status(path).await {
        Ok(output) => parse_name_status(&output),
        Err(e) => {
            warn!(%path, "Name-status query failed, keeping diff without status: {e}");
            None
        }
    };

    debug!(%path, ?status, diff_len = diff.len(), "Collected staged change");
    FileOutcome::Collected(ChangeRecord { diff, status })
}

/// Collect outcomes for every path, sequentially and in order.
pub async fn collect_outcomes<E>(executor: &E, paths: &[String]) -> Vec<(String, FileOutcome)>
where
    E: GitExecutor + ?Sized,
{
    let mut outcomes = Vec::with_capacity(paths.len());
    for path in paths {
        let outcome = collect_file(executor, path).await;
        outcomes.push((path.clone(), outcome));
    }
    outcomes
}

/// Collect staged changes for `paths` into a [`ChangeSet`].
///
/// Files with no staged diff and files whose query failed are left out.
pub async fn collect_changes<E>(executor: &E, paths: &[String]) -> ChangeSet
where
    E: GitExecutor + ?Sized,
{
    let outcomes = collect_outcomes(executor, paths).await;
    let skipped = outcomes
        .iter()
        .filter(|(_, o)| matches!(o, FileOutcome::Skipped { .. }))
        .count();

    let set = ChangeSet::from_outcomes(outcomes);
    debug!(
        requested = paths.len(),
        collected = set.len(),
        skipped,
        "Collection finished"
    );
    set
}
