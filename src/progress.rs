use crate::merger::MergeSummary;
use std::path::Path;

pub trait ProgressSink {
    fn start(&mut self, _total_files: usize) {}
    fn file_appended(&mut self, _path: &Path, _bytes: u64) {}
    fn file_skipped(&mut self, _path: &Path, _reason: &str) {}
    fn finish(&mut self, _summary: &MergeSummary) {}
}

pub struct ProgressReporter {
    enabled: bool,
    total_files: usize,
    processed_files: usize,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            total_files: 0,
            processed_files: 0,
        }
    }
}

impl ProgressSink for ProgressReporter {
    fn start(&mut self, total_files: usize) {
        self.total_files = total_files;
        self.processed_files = 0;
        if !self.enabled {
            return;
        }
        if total_files == 0 {
            eprintln!("Nenhum arquivo .md encontrado; a saída ficará vazia.");
        } else {
            eprintln!("Mesclando {} arquivo(s) markdown", total_files);
        }
    }

    fn file_appended(&mut self, path: &Path, bytes: u64) {
        self.processed_files += 1;
        if !self.enabled {
            return;
        }
        eprintln!(
            "[{}/{}] Adicionado {} ({} bytes)",
            self.processed_files,
            self.total_files.max(1),
            path.display(),
            bytes
        );
    }

    fn file_skipped(&mut self, path: &Path, reason: &str) {
        if !self.enabled {
            return;
        }
        eprintln!("Ignorado {}: {}", path.display(), reason);
    }

    fn finish(&mut self, summary: &MergeSummary) {
        if !self.enabled {
            return;
        }
        eprintln!(
            "Processamento finalizado. Arquivos mesclados: {}. Bytes escritos: {}. Resultado salvo em {}",
            summary.files.len(),
            summary.bytes_written,
            summary.output.display()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn counts_files_even_when_quiet() {
        let mut reporter = ProgressReporter::new(false);
        reporter.start(2);
        reporter.file_appended(Path::new("a.md"), 5);
        reporter.file_skipped(Path::new("dir.md"), "não é um arquivo regular");
        reporter.file_appended(Path::new("b.md"), 5);
        assert_eq!(reporter.processed_files, 2);

        reporter.finish(&MergeSummary {
            output: PathBuf::from("merged_markdown.md"),
            files: vec![PathBuf::from("a.md"), PathBuf::from("b.md")],
            bytes_written: 14,
        });
    }
}
