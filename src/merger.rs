use crate::error::MergeError;
use crate::preflight::MergePlan;
use crate::progress::ProgressSink;
use crate::scanner::{self, Candidate};
use anyhow::Result;
use std::fs::File;
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

const COPY_BUFFER_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    pub output: PathBuf,
    pub files: Vec<PathBuf>,
    pub bytes_written: u64,
}

/// Truncates the output file and appends every qualifying input to it.
///
/// The output is created before the input directory is listed, so it may
/// show up among the candidates when both live in the same directory; it is
/// skipped by path identity.
pub fn merge_files(
    plan: &MergePlan,
    progress: &mut dyn ProgressSink,
    cancel: &AtomicBool,
) -> Result<MergeSummary> {
    let output = &plan.output_path;
    let out_file = File::create(output).map_err(|source| MergeError::CreateOutput {
        path: output.clone(),
        source,
    })?;
    let mut writer = BufWriter::new(out_file);

    let candidates: Vec<Candidate> = scanner::collect_candidates(&plan.input_dir)?
        .into_iter()
        .filter(|c| {
            let is_output = scanner::same_file(&c.path, output);
            if is_output {
                tracing::debug!(path = %c.path.display(), "skipping output file");
            }
            !is_output
        })
        .collect();
    let mergeable = candidates.iter().filter(|c| c.regular).count();
    progress.start(mergeable);

    let mut files = Vec::with_capacity(mergeable);
    let mut bytes_written = 0u64;

    for Candidate { path, regular } in candidates {
        if !regular {
            progress.file_skipped(&path, "não é um arquivo regular");
            continue;
        }
        if cancel.load(Ordering::Relaxed) {
            return Err(MergeError::Interrupted.into());
        }

        let appended = append_file(&path, output, &mut writer)?;
        bytes_written += appended;
        progress.file_appended(&path, appended);
        files.push(path);
    }

    writer.flush().map_err(|source| MergeError::Write {
        path: output.clone(),
        source,
    })?;

    let summary = MergeSummary {
        output: output.clone(),
        files,
        bytes_written,
    };
    progress.finish(&summary);
    Ok(summary)
}

/// Copies `path` into `writer` and terminates it with a blank line. Returns
/// the number of bytes written, separators included.
fn append_file<W: Write>(path: &Path, output: &Path, writer: &mut W) -> Result<u64, MergeError> {
    let read_err = |source| MergeError::Read {
        path: path.to_path_buf(),
        source,
    };
    let write_err = |source| MergeError::Write {
        path: output.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(read_err)?;
    let mut buf = vec![0u8; COPY_BUFFER_SIZE];
    let mut copied = 0u64;
    let mut last_byte = None;

    loop {
        let n = match file.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(read_err(err)),
        };
        writer.write_all(&buf[..n]).map_err(write_err)?;
        copied += n as u64;
        last_byte = Some(buf[n - 1]);
    }

    let separator: &[u8] = match last_byte {
        Some(b'\n') | None => b"\n",
        Some(_) => b"\n\n",
    };
    writer.write_all(separator).map_err(write_err)?;

    Ok(copied + separator.len() as u64)
}
