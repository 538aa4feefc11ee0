//! Staged change collection from git.

pub mod changes;
pub mod executor;
pub mod status;

pub use changes::{
    ChangeRecord, ChangeSet, FileOutcome, collect_changes, collect_file, collect_outcomes,
};
pub use executor::{
    DefaultGitExecutor, GitExecutor, check_git_installed, ensure_repository, locate_repository,
};
pub use status::{ChangeType, parse_name_status};
