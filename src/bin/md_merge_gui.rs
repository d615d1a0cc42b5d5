use eframe::egui;
use md_merge::progress::ProgressSink;
use md_merge::{Config, MergeSummary, DEFAULT_OUTPUT_NAME};
use poll_promise::Promise;
use rfd::FileDialog;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Markdown Merge",
        options,
        Box::new(|_cc| Box::new(MergeGui::default())),
    )
}

struct MergeGui {
    input_dir: String,
    output_dir: String,
    output_name: String,
    quiet: bool,
    status: String,
    logs: Vec<String>,
    processing: bool,
    receiver: Option<Receiver<WorkerMessage>>,
    cancel: Option<Arc<AtomicBool>>,
    input_dialog: Option<Promise<Option<PathBuf>>>,
    output_dialog: Option<Promise<Option<PathBuf>>>,
}

impl Default for MergeGui {
    fn default() -> Self {
        Self {
            input_dir: String::new(),
            output_dir: String::new(),
            output_name: DEFAULT_OUTPUT_NAME.into(),
            quiet: false,
            status: "Pronto.".into(),
            logs: Vec::new(),
            processing: false,
            receiver: None,
            cancel: None,
            input_dialog: None,
            output_dialog: None,
        }
    }
}

enum WorkerMessage {
    Log(String),
    Finished(Result<MergeSummary, String>),
}

impl MergeGui {
    fn poll_worker(&mut self) {
        let mut disconnect = false;
        if let Some(rx) = &self.receiver {
            loop {
                match rx.try_recv() {
                    Ok(msg) => match msg {
                        WorkerMessage::Log(line) => {
                            self.logs.push(line);
                            const MAX_LOGS: usize = 500;
                            if self.logs.len() > MAX_LOGS {
                                let drain = self.logs.len() - MAX_LOGS;
                                self.logs.drain(0..drain);
                            }
                        }
                        WorkerMessage::Finished(result) => {
                            self.processing = false;
                            self.status = match result {
                                Ok(summary) => format!(
                                    "Concluído: {} arquivo(s) mesclado(s) em {}.",
                                    summary.files.len(),
                                    summary.output.display()
                                ),
                                Err(err) => format!("Erro: {err}"),
                            };
                            disconnect = true;
                            break;
                        }
                    },
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        disconnect = true;
                        self.processing = false;
                        self.status = "Canal finalizado inesperadamente.".into();
                        break;
                    }
                }
            }
        }

        if disconnect {
            self.receiver = None;
            self.cancel = None;
        }
    }

    fn poll_dialogs(&mut self) {
        if let Some(Some(path)) = ready_result(&mut self.input_dialog) {
            self.input_dir = path.display().to_string();
        }

        if let Some(Some(path)) = ready_result(&mut self.output_dialog) {
            self.output_dir = path.display().to_string();
        }
    }

    fn build_config(&self) -> Result<Config, String> {
        let input_dir = self.input_dir.trim();
        if input_dir.is_empty() {
            return Err("Informe o diretório de entrada.".into());
        }

        Ok(Config {
            input_dir: PathBuf::from(input_dir),
            output_dir: non_empty(&self.output_dir).map(PathBuf::from),
            output_name: non_empty(&self.output_name).map(str::to_string),
            quiet: self.quiet,
        })
    }

    fn start_processing(&mut self) {
        if self.processing {
            self.status = "Já existe um processamento em andamento.".into();
            return;
        }

        let config = match self.build_config() {
            Ok(cfg) => cfg,
            Err(err) => {
                self.status = err;
                return;
            }
        };

        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        self.receiver = Some(rx);
        self.cancel = Some(Arc::clone(&cancel));
        self.logs.clear();
        self.status = "Processando...".into();
        self.processing = true;

        thread::spawn(move || {
            let mut progress = GuiProgress::new(tx.clone(), !config.quiet);
            let result = md_merge::run_with_progress(&config, &mut progress, &cancel)
                .map_err(|err| format!("{err:#}"));
            let _ = tx.send(WorkerMessage::Finished(result));
        });
    }

    fn request_cancel(&mut self) {
        if let Some(cancel) = &self.cancel {
            cancel.store(true, Ordering::Relaxed);
            self.status = "Cancelando...".into();
        }
    }
}

impl eframe::App for MergeGui {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_worker();
        self.poll_dialogs();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Markdown Merge");
            ui.label("Escolha o diretório com os arquivos .md e o destino da mescla.");

            ui.separator();
            ui.horizontal(|ui| {
                ui.label("Entrada:");
                ui.text_edit_singleline(&mut self.input_dir);
                if ui.button("Escolher...").clicked() {
                    self.input_dialog = Some(spawn_folder_dialog(&self.input_dir));
                }
            });

            ui.horizontal(|ui| {
                ui.label("Saída:");
                ui.text_edit_singleline(&mut self.output_dir);
                if ui.button("Escolher...").clicked() {
                    let start = non_empty(&self.output_dir).unwrap_or(self.input_dir.as_str());
                    self.output_dialog = Some(spawn_folder_dialog(start));
                }
            });

            ui.horizontal(|ui| {
                ui.label("Nome do arquivo:");
                ui.text_edit_singleline(&mut self.output_name);
            });

            ui.checkbox(&mut self.quiet, "Modo silencioso");

            ui.separator();
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!self.processing, egui::Button::new("Mesclar"))
                    .clicked()
                {
                    self.start_processing();
                }
                if ui
                    .add_enabled(self.processing, egui::Button::new("Cancelar"))
                    .clicked()
                {
                    self.request_cancel();
                }
                if ui.button("Limpar logs").clicked() {
                    self.logs.clear();
                }
            });

            ui.separator();
            ui.label(format!("Status: {}", self.status));

            egui::CollapsingHeader::new("Logs")
                .default_open(true)
                .show(ui, |ui| {
                    egui::ScrollArea::vertical()
                        .max_height(200.0)
                        .show(ui, |ui| {
                            for line in &self.logs {
                                ui.label(line);
                            }
                        });
                });
        });

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn ready_result<T: Clone + Send + 'static>(slot: &mut Option<Promise<T>>) -> Option<T> {
    let ready = slot.as_ref().and_then(|promise| promise.ready().cloned());
    if ready.is_some() {
        *slot = None;
    }
    ready
}

fn spawn_folder_dialog(start: &str) -> Promise<Option<PathBuf>> {
    let start = non_empty(start).map(PathBuf::from);
    Promise::spawn_thread("pick_folder_dialog", move || {
        let mut dialog = FileDialog::new();
        if let Some(dir) = start.filter(|dir| dir.is_dir()) {
            dialog = dialog.set_directory(dir);
        } else if let Ok(current_dir) = std::env::current_dir() {
            dialog = dialog.set_directory(current_dir);
        }
        dialog.pick_folder()
    })
}

struct GuiProgress {
    tx: Sender<WorkerMessage>,
    verbose: bool,
}

impl GuiProgress {
    fn new(tx: Sender<WorkerMessage>, verbose: bool) -> Self {
        Self { tx, verbose }
    }

    fn log(&self, msg: impl Into<String>) {
        if self.verbose {
            let _ = self.tx.send(WorkerMessage::Log(msg.into()));
        }
    }
}

impl ProgressSink for GuiProgress {
    fn start(&mut self, total_files: usize) {
        self.log(format!("Mesclando {} arquivo(s) markdown", total_files));
    }

    fn file_appended(&mut self, path: &Path, bytes: u64) {
        self.log(format!("Adicionado {} ({} bytes)", path.display(), bytes));
    }

    fn file_skipped(&mut self, path: &Path, reason: &str) {
        self.log(format!("Ignorado {}: {}", path.display(), reason));
    }

    fn finish(&mut self, summary: &MergeSummary) {
        self.log(format!("Resultado salvo em {}", summary.output.display()));
    }
}
