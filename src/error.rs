use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while cataloging a project or writing its notes
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ConfigValidation(String),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Syntax error in {path}: {message}")]
    Syntax { path: PathBuf, message: String },

    #[error("{file} is not an analyzed file of {root}")]
    UnknownFile { file: PathBuf, root: PathBuf },

    #[error("Note template error: {0}")]
    Template(#[from] tera::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid exclude pattern: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("Cannot walk project directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Python grammar unavailable: {0}")]
    Parser(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config_validation(msg: impl Into<String>) -> Self {
        Error::ConfigValidation(msg.into())
    }

    /// A source file that Python would refuse to compile
    pub fn syntax(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Syntax {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn parser(msg: impl Into<String>) -> Self {
        Error::Parser(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_project_root() {
        let err = Error::PathNotFound(PathBuf::from("/work/bots"));
        assert_eq!(err.to_string(), "Path not found: /work/bots");
    }

    #[test]
    fn test_root_is_a_file() {
        let err = Error::NotADirectory(PathBuf::from("/work/bots/main.py"));
        assert_eq!(err.to_string(), "Not a directory: /work/bots/main.py");
    }

    #[test]
    fn test_syntax_error_names_file_and_line() {
        let err = Error::syntax("base/logistics.py", "invalid syntax at line 3, column 9");
        let text = err.to_string();
        assert!(text.starts_with("Syntax error in base/logistics.py"));
        assert!(text.ends_with("line 3, column 9"));
    }

    #[test]
    fn test_unknown_file() {
        let err = Error::UnknownFile {
            file: PathBuf::from("bots/missing.py"),
            root: PathBuf::from("/work/bots"),
        };
        assert_eq!(err.to_string(), "bots/missing.py is not an analyzed file of /work/bots");
    }

    #[test]
    fn test_bad_exclude_pattern() {
        let err: Error = glob::Pattern::new("scripts/[").unwrap_err().into();
        assert!(err.to_string().starts_with("Invalid exclude pattern"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
