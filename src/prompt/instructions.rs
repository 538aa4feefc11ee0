//! Instruction prompt loading.

use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::error::PromptError;

/// Read the instruction prompt that steers the model.
///
/// A missing file is reported with the path that was expected.
pub fn load_instructions(path: &Path) -> Result<String, PromptError> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            debug!(path = %path.display(), len = text.len(), "Loaded instruction prompt");
            Ok(text)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Err(PromptError::NotFound {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(PromptError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_existing_prompt_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompt.txt");
        std::fs::write(&path, "Summarize the diff.\n한국어로 작성하세요.\n").unwrap();

        let text = load_instructions(&path).unwrap();
        assert_eq!(text, "Summarize the diff.\n한국어로 작성하세요.\n");
    }

    #[test]
    fn test_missing_prompt_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scripts").join("prompt.txt");

        let err = load_instructions(&path).unwrap_err();
        assert!(matches!(err, PromptError::NotFound { .. }));
        assert!(err.to_string().contains("prompt.txt"));
        assert!(err.to_string().contains("scripts"));
    }

    #[test]
    fn test_directory_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_instructions(dir.path()).unwrap_err();
        assert!(matches!(err, PromptError::Read { .. }));
    }
}
