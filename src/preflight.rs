use crate::config::Config;
use crate::error::MergeError;
use std::fs;
use std::path::{Path, PathBuf};

/// Validated locations for one merge run.
#[derive(Debug, Clone)]
pub struct MergePlan {
    pub input_dir: PathBuf,
    pub output_path: PathBuf,
}

/// Validates the configuration against the filesystem. Creates the output
/// directory when missing, but never touches the output file itself.
pub fn prepare(config: &Config) -> Result<MergePlan, MergeError> {
    config.validate()?;

    let input_dir = &config.input_dir;
    if !input_dir.exists() {
        return Err(MergeError::InputNotFound(input_dir.clone()));
    }
    if !input_dir.is_dir() {
        return Err(MergeError::InputNotDirectory(input_dir.clone()));
    }

    let output_dir = config.output_dir();
    if !output_dir.exists() {
        tracing::debug!(dir = %output_dir.display(), "creating output directory");
        fs::create_dir_all(output_dir).map_err(|source| MergeError::CreateOutputDir {
            path: output_dir.to_path_buf(),
            source,
        })?;
    }

    let output_path = config.output_path();
    let output_exists = output_path.symlink_metadata().is_ok();
    if output_exists
        && (same_dir(input_dir, output_dir) || resolves_into(&output_path, input_dir))
    {
        return Err(MergeError::OutputInsideInput(output_path));
    }

    Ok(MergePlan {
        input_dir: input_dir.clone(),
        output_path,
    })
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(ca), Ok(cb)) => ca == cb,
        _ => a == b,
    }
}

/// True when `path` is, once symlinks are followed, an entry of `dir`.
fn resolves_into(path: &Path, dir: &Path) -> bool {
    match (fs::canonicalize(path), fs::canonicalize(dir)) {
        (Ok(resolved), Ok(dir)) => resolved.parent() == Some(dir.as_path()),
        _ => false,
    }
}
