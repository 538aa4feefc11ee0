//! Change classification from `git diff --name-status` codes.

use std::fmt;

use serde::Serialize;

/// How a staged file changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChangeType {
    Added,
    Modified,
    Deleted,
    #[serde(rename = "Type Changed")]
    TypeChanged,
    Renamed,
    Copied,
    #[serde(rename = "Unmerged Conflict")]
    Unmerged,
    Unknown,
}

impl ChangeType {
    /// Map a name-status code to a change type.
    ///
    /// Rename and copy codes carry a similarity score (`R100`, `C075`), so
    /// they match on prefix. Everything else must be an exact single letter.
    pub fn from_code(code: &str) -> Self {
        if code.starts_with('R') {
            return ChangeType::Renamed;
        }
        if code.starts_with('C') {
            return ChangeType::Copied;
        }

        match code {
            "A" => ChangeType::Added,
            "M" => ChangeType::Modified,
            "D" => ChangeType::Deleted,
            "T" => ChangeType::TypeChanged,
            "U" => ChangeType::Unmerged,
            _ => ChangeType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Added => "Added",
            ChangeType::Modified => "Modified",
            ChangeType::Deleted => "Deleted",
            ChangeType::TypeChanged => "Type Changed",
            ChangeType::Renamed => "Renamed",
            ChangeType::Copied => "Copied",
            ChangeType::Unmerged => "Unmerged Conflict",
            ChangeType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse the output of `git diff --cached --name-status -- <path>`.
///
/// The code is everything before the first tab. Empty output means git had
/// nothing to report and yields `None`.
pub fn parse_name_status(output: &str) -> Option<ChangeType> {
    if output.is_empty() {
        return None;
    }

    let code = output.split('\t').next().unwrap_or_default();
    Some(ChangeType::from_code(code))
}
