use std::path::PathBuf;
use thiserror::Error;

pub const EXIT_IO: u8 = 1;
pub const EXIT_USAGE: u8 = 2;
pub const EXIT_INPUT: u8 = 3;
pub const EXIT_ANTI_LOOP: u8 = 4;
pub const EXIT_INTERRUPTED: u8 = 130;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("Nenhum diretório de entrada informado")]
    MissingInput,

    #[error("Nome de arquivo de saída inválido: {0:?}")]
    InvalidOutputName(String),

    #[error("Diretório de entrada não encontrado: {0:?}")]
    InputNotFound(PathBuf),

    #[error("O caminho de entrada não é um diretório: {0:?}")]
    InputNotDirectory(PathBuf),

    #[error(
        "O arquivo de saída {0:?} já existe dentro do diretório de entrada. \
         Mesclar novamente incluiria o resultado anterior na própria saída; \
         remova o arquivo ou escolha outro destino com -o/-n."
    )]
    OutputInsideInput(PathBuf),

    #[error("Não foi possível criar diretório de saída {path:?}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Não foi possível criar arquivo de saída {path:?}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Falha ao ler arquivo {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Falha ao escrever no arquivo de saída {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Processamento interrompido")]
    Interrupted,
}

impl MergeError {
    pub fn exit_code(&self) -> u8 {
        match self {
            MergeError::MissingInput | MergeError::InvalidOutputName(_) => EXIT_USAGE,
            MergeError::InputNotFound(_) | MergeError::InputNotDirectory(_) => EXIT_INPUT,
            MergeError::OutputInsideInput(_) => EXIT_ANTI_LOOP,
            MergeError::CreateOutputDir { .. }
            | MergeError::CreateOutput { .. }
            | MergeError::Read { .. }
            | MergeError::Write { .. } => EXIT_IO,
            MergeError::Interrupted => EXIT_INTERRUPTED,
        }
    }
}

/// Exit code for an error chain produced by [`crate::run`]. Errors that did
/// not originate in the merger are treated as I/O failures.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<MergeError>())
        .map(MergeError::exit_code)
        .unwrap_or(EXIT_IO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn maps_each_class_to_its_exit_code() {
        assert_eq!(MergeError::MissingInput.exit_code(), EXIT_USAGE);
        assert_eq!(
            MergeError::InputNotFound(PathBuf::from("x")).exit_code(),
            EXIT_INPUT
        );
        assert_eq!(
            MergeError::OutputInsideInput(PathBuf::from("x")).exit_code(),
            EXIT_ANTI_LOOP
        );
        assert_eq!(MergeError::Interrupted.exit_code(), EXIT_INTERRUPTED);

        let io = || std::io::Error::new(std::io::ErrorKind::Other, "falha");
        for err in [
            MergeError::Read {
                path: PathBuf::from("a.md"),
                source: io(),
            },
            MergeError::Write {
                path: PathBuf::from("merged_markdown.md"),
                source: io(),
            },
            MergeError::CreateOutputDir {
                path: PathBuf::from("out"),
                source: io(),
            },
        ] {
            assert_eq!(err.exit_code(), EXIT_IO, "{err:?}");
        }
    }

    #[test]
    fn finds_merge_error_below_context() {
        let err = Err::<(), _>(MergeError::InputNotDirectory(PathBuf::from("a.md")))
            .context("Falha ao validar configuração")
            .unwrap_err();
        assert_eq!(exit_code_for(&err), EXIT_INPUT);

        let other = anyhow::anyhow!("algo deu errado");
        assert_eq!(exit_code_for(&other), EXIT_IO);
    }
}
