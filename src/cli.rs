use clap::Parser;
use md_merge::Config;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "md-merge",
    version,
    about = "Mescla os arquivos markdown de um diretório em um único arquivo.",
    arg_required_else_help = true
)]
pub struct Cli {
    #[arg(
        short,
        long,
        value_name = "DIR",
        help = "Diretório com os arquivos .md a serem mesclados"
    )]
    pub input: PathBuf,

    #[arg(
        short,
        long,
        value_name = "DIR",
        help = "Diretório de saída (padrão: o diretório de entrada)"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        short = 'n',
        long = "name",
        value_name = "ARQUIVO",
        help = "Nome do arquivo de saída (padrão: merged_markdown.md)"
    )]
    pub name: Option<String>,

    #[arg(
        short,
        long,
        help = "Suprime mensagens de progresso",
        action = clap::ArgAction::SetTrue
    )]
    pub quiet: bool,

    #[arg(
        short,
        long,
        help = "Exibe mensagens de diagnóstico",
        action = clap::ArgAction::SetTrue
    )]
    pub verbose: bool,
}

impl Cli {
    pub fn into_config(self) -> Config {
        Config {
            input_dir: self.input,
            output_dir: self.output,
            output_name: self.name,
            quiet: self.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_flags() {
        let cli = Cli::try_parse_from(["md-merge", "-i", "docs", "-o", "out", "-n", "all.md", "-q"])
            .unwrap();
        let config = cli.into_config();
        assert_eq!(config.input_dir, PathBuf::from("docs"));
        assert_eq!(config.output_path(), PathBuf::from("out").join("all.md"));
        assert!(config.quiet);
    }

    #[test]
    fn input_is_required() {
        let err = Cli::try_parse_from(["md-merge", "-o", "out"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
