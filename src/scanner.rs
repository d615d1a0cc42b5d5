use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const MARKDOWN_EXT: &str = "md";

/// A directory entry whose name carries the markdown suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    /// False for directories, symlinks and special files named `*.md`.
    pub regular: bool,
}

/// Lists the `*.md` entries directly inside `input`, sorted by file name.
pub fn collect_candidates(input: &Path) -> Result<Vec<Candidate>> {
    let walker = WalkDir::new(input)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    let mut candidates = Vec::new();
    for entry in walker {
        let entry = entry.with_context(|| format!("Falha ao ler diretório {:?}", input))?;
        if !has_markdown_ext(entry.path()) {
            continue;
        }
        candidates.push(Candidate {
            path: entry.path().to_path_buf(),
            regular: entry.file_type().is_file(),
        });
    }

    tracing::debug!(count = candidates.len(), dir = %input.display(), "candidates collected");
    Ok(candidates)
}

fn has_markdown_ext(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(MARKDOWN_EXT)
}

pub fn same_file(a: &Path, b: &Path) -> bool {
    let ca = fs::canonicalize(a).unwrap_or_else(|_| a.to_path_buf());
    let cb = fs::canonicalize(b).unwrap_or_else(|_| b.to_path_buf());
    ca == cb
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn lists_markdown_entries_sorted_and_shallow() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir_all(&nested).unwrap();
        File::create(dir.path().join("b.md")).unwrap();
        File::create(dir.path().join("a.md")).unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();
        File::create(dir.path().join("upper.MD")).unwrap();
        File::create(nested.join("deep.md")).unwrap();

        let found = collect_candidates(dir.path()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|c| c.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.md", "b.md"]);
        assert!(found.iter().all(|c| c.regular));
    }

    #[test]
    fn flags_directories_named_like_markdown() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("chapter.md")).unwrap();
        File::create(dir.path().join("intro.md")).unwrap();

        let found = collect_candidates(dir.path()).unwrap();
        assert_eq!(
            found,
            vec![
                Candidate {
                    path: dir.path().join("chapter.md"),
                    regular: false,
                },
                Candidate {
                    path: dir.path().join("intro.md"),
                    regular: true,
                },
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_not_regular() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("real.txt");
        fs::write(&target, "x").unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("link.md")).unwrap();

        let found = collect_candidates(dir.path()).unwrap();
        assert_eq!(found.len(), 1);
        assert!(!found[0].regular);
    }

    #[test]
    fn same_file_resolves_relative_spellings() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.md");
        File::create(&file).unwrap();
        assert!(same_file(&file, &dir.path().join(".").join("a.md")));
        assert!(!same_file(&file, &dir.path().join("b.md")));
    }
}
