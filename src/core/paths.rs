//! Path utilities
//!
//! Report keys and referenced paths always use '/' as separator.

use std::path::{Path, PathBuf};

/// Join a '/'-separated relative path onto a base directory
pub fn join_normalized(base: &Path, relative: &str) -> PathBuf {
    base.join(relative.replace('/', std::path::MAIN_SEPARATOR_STR))
}

/// Check if a path is hidden (starts with '.')
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Check if a path is a Markdown document
pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}

/// Resolve `path` against `base` unless it is already absolute
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_hidden() {
        assert!(is_hidden(Path::new(".draft.md")));
        assert!(is_hidden(Path::new("docs/.notes.md")));
        assert!(!is_hidden(Path::new("intro.md")));
        assert!(!is_hidden(Path::new("/")));
    }

    #[test]
    fn test_is_markdown() {
        assert!(is_markdown(Path::new("intro.md")));
        assert!(!is_markdown(Path::new("intro.mdx")));
        assert!(!is_markdown(Path::new("README")));
    }

    #[test]
    fn test_join_normalized() {
        let result = join_normalized(Path::new("/project"), "src/main.py");
        assert!(result.ends_with("main.py"));
        assert!(result.to_string_lossy().contains("src"));
    }

    #[test]
    fn test_resolve() {
        assert_eq!(
            resolve(Path::new("/project"), Path::new("docs")),
            PathBuf::from("/project/docs")
        );
        assert_eq!(
            resolve(Path::new("/project"), Path::new("/elsewhere/docs")),
            PathBuf::from("/elsewhere/docs")
        );
    }
}
