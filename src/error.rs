use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading the input dataset.
///
/// Any of these ends the current page render: the shell shows the message
/// and draws nothing else.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("{} not found", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a valid ';'-delimited dataset: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

impl DatasetError {
    /// Short message for the UI, telling the user what to do next.
    pub fn user_message(&self) -> String {
        match self {
            DatasetError::NotFound { path } => format!(
                "{} not found. Place it next to the application, pass its path as the first \
                 argument, or use File → Open…",
                path.display()
            ),
            other => other.to_string(),
        }
    }
}
