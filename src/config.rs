use crate::error::MergeError;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_NAME: &str = "merged_markdown.md";

#[derive(Debug, Clone)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub output_name: Option<String>,
    pub quiet: bool,
}

impl Config {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: None,
            output_name: None,
            quiet: false,
        }
    }

    pub fn output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(&self.input_dir)
    }

    pub fn output_name(&self) -> &str {
        self.output_name.as_deref().unwrap_or(DEFAULT_OUTPUT_NAME)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir().join(self.output_name())
    }

    /// Checks the parts of the configuration that do not touch the filesystem.
    pub fn validate(&self) -> Result<(), MergeError> {
        if self.input_dir.as_os_str().is_empty() {
            return Err(MergeError::MissingInput);
        }

        let name = self.output_name();
        let is_plain = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\']);
        if !is_plain {
            return Err(MergeError::InvalidOutputName(name.to_string()));
        }
        Ok(())
    }
}
