//! Model input construction from collected diffs.

use crate::collect::ChangeSet;

/// Header label for a record whose classification is unavailable.
///
/// Spelled differently from `ChangeType::Unknown` ("Unknown"); downstream
/// prompts may rely on the exact text.
pub const MISSING_STATUS_LABEL: &str = "UnKnown";

/// Whether a diff line carries information worth sending to the model.
///
/// Keeps hunk headers and added/removed lines with visible content. Drops
/// context lines, file headers (`+++`/`---`) and other diff metadata.
pub fn is_significant_line(line: &str) -> bool {
    if line.starts_with("@@") {
        return true;
    }

    (line.starts_with('+') || line.starts_with('-'))
        && !line.starts_with("+++")
        && !line.starts_with("---")
        && !line.trim().is_empty()
}

/// Significant lines of a diff, in order.
pub fn filter_diff_lines(diff: &str) -> Vec<&str> {
    diff.lines().filter(|line| is_significant_line(line)).collect()
}

/// Build the model input from collected changes.
///
/// One `File: <path> (<type>)` header per file, followed by its significant
/// lines and a blank line when any survived. Output is trimmed.
pub fn build_input(changes: &ChangeSet) -> String {
    let mut input = String::new();

    for (path, record) in changes.iter() {
        let change_type = record
            .status
            .map(|s| s.as_str())
            .unwrap_or(MISSING_STATUS_LABEL);

        input.push_str(&format!("File: {} ({})\n", path, change_type));

        let kept = filter_diff_lines(&record.diff);
        if !kept.is_empty() {
            input.push_str(&kept.join("\n"));
            input.push_str("\n\n");
        }
    }

    input.trim().to_string()
}
