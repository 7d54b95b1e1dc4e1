//! Errors raised while materializing the record table.

use std::fmt;
use std::path::PathBuf;

/// Error loading the processed restaurant table.
///
/// Every variant is fatal for the request that triggered the load; there is
/// no cached fallback to recover with.
#[derive(Debug)]
pub enum TableError {
    /// The data file could not be opened or read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A row could not be decoded into a record (bad number, missing column).
    Parse {
        path: PathBuf,
        line: Option<u64>,
        message: String,
    },

    /// A row decoded fine but breaks a table invariant.
    Invalid {
        path: PathBuf,
        line: Option<u64>,
        message: String,
    },
}

impl TableError {
    pub(crate) fn from_csv(path: PathBuf, err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line());
        match err.into_kind() {
            csv::ErrorKind::Io(source) => TableError::Io { path, source },
            kind => TableError::Parse {
                path,
                line,
                message: describe_csv_kind(kind),
            },
        }
    }

    /// Format error in Cargo-style format.
    pub fn format_cargo_style(&self) -> String {
        match self {
            TableError::Io { path, source } => {
                format!(
                    "error: cannot read data file\n  --> {}\n  |\n  = {}\n",
                    path.display(),
                    source
                )
            }
            TableError::Parse {
                path,
                line,
                message,
            }
            | TableError::Invalid {
                path,
                line,
                message,
            } => {
                let location = match line {
                    Some(l) => format!("{}:{}", path.display(), l),
                    None => format!("{}", path.display()),
                };
                format!("error: {}\n  --> {}\n  |\n", message, location)
            }
        }
    }
}

fn describe_csv_kind(kind: csv::ErrorKind) -> String {
    match kind {
        csv::ErrorKind::Utf8 { err, .. } => format!("invalid UTF-8 in row: {}", err),
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!(
            "row has {} fields but the header declares {}",
            len, expected_len
        ),
        csv::ErrorKind::Deserialize { err, .. } => format!("malformed row: {}", err),
        other => format!("{:?}", other),
    }
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_cargo_style())
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TableError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_error_includes_line() {
        let err = TableError::Invalid {
            path: PathBuf::from("data.csv"),
            line: Some(7),
            message: "aggregate_rating 6.1 is outside 0..=5".into(),
        };
        let display = err.to_string();
        assert!(display.contains("data.csv:7"));
        assert!(display.contains("outside 0..=5"));
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error;

        let err = TableError::Io {
            path: PathBuf::from("/missing.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("cannot read data file"));
    }
}
