use anyhow::{Context, Result};
use log::debug;
use markmode_config::Config;
use markmode_engine::{Markdown, Options, Tokenizer, classify, outline, preview};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::{env, fs, io, process};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Html,
    Tokens,
    Outline,
    Preview,
}

impl Command {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "html" => Some(Command::Html),
            "tokens" => Some(Command::Tokens),
            "outline" => Some(Command::Outline),
            "preview" => Some(Command::Preview),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    command: Command,
    /// `None` reads standard input.
    input: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [--config <path>] <html|tokens|outline|preview> [file]\n\
         Reads standard input when no file (or `-`) is given."
    )
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut command = None;
    let mut input = None;
    let mut config = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().ok_or("--config needs a path")?;
                config = Some(PathBuf::from(path));
            }
            "-" if command.is_some() && input.is_none() => {}
            other if other.starts_with("--") => return Err(format!("Unknown option '{other}'")),
            other if command.is_none() => {
                command = Some(Command::parse(other).ok_or(format!("Unknown command '{other}'"))?);
            }
            other if input.is_none() => input = Some(PathBuf::from(other)),
            other => return Err(format!("Unexpected argument '{other}'")),
        }
    }

    let command = command.ok_or("No command given")?;
    Ok(Args {
        command,
        input,
        config,
    })
}

/// Options from `--config`, else the default config file, else defaults.
fn load_options(config: Option<&Path>) -> Result<Options> {
    let (path, explicit) = match config {
        Some(path) => (Config::expand_path(path).unwrap_or_else(|| path.to_path_buf()), true),
        None => (Config::config_path(), false),
    };
    match Config::load_from_path(&path)
        .with_context(|| format!("Failed to load config from '{}'", path.display()))?
    {
        Some(config) => {
            debug!("Loaded options from {}", path.display());
            Ok(config.options)
        }
        None if explicit => anyhow::bail!("Config file '{}' does not exist", path.display()),
        None => Ok(Options::default()),
    }
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read standard input")?;
            Ok(text)
        }
    }
}

fn tokens_report(tokenizer: &Tokenizer, text: &str) -> String {
    let mut out = String::new();
    for token in tokenizer.parse_paragraph(text, 0) {
        let snippet = token.span.slice(text).unwrap_or_default();
        out.push_str(&format!(
            "{}\t{}\t{:?}\n",
            token.span,
            classify::classification_name(token.kind),
            snippet
        ));
    }
    out
}

fn outline_report(tokenizer: &Tokenizer, text: &str) -> String {
    let mut out = String::new();
    for section in outline::sections_with(tokenizer, text) {
        out.push_str(&format!(
            "{}\t{}{}\n",
            section.extent,
            "-".repeat(usize::from(section.level) - 1),
            section.title()
        ));
    }
    out
}

fn run(args: &Args) -> Result<String> {
    let options = load_options(args.config.as_deref())?;
    let input = args.input.as_deref();
    let output = match args.command {
        Command::Html => match input {
            Some(path) => Markdown::new(options)
                .transform_file(path)
                .with_context(|| format!("Failed to render '{}'", path.display()))?,
            None => Markdown::new(options).transform(&read_input(None)?),
        },
        Command::Tokens => tokens_report(&Tokenizer::new(options), &read_input(input)?),
        Command::Outline => outline_report(&Tokenizer::new(options), &read_input(input)?),
        Command::Preview => {
            let text = read_input(input)?;
            let title = input
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().into_owned());
            let body = Markdown::new(options).transform_with_path(&text, input);
            preview::document_titled(title.as_deref(), &body)
        }
    };
    Ok(output)
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("markmode", String::as_str);
    let parsed = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{}", usage(program));
            process::exit(1);
        }
    };

    let output = run(&parsed)?;
    io::stdout()
        .write_all(output.as_bytes())
        .context("Failed to write output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_command_file_and_config() {
        let parsed = parse_args(&args(&["--config", "c.toml", "html", "doc.md"])).unwrap();
        assert_eq!(
            parsed,
            Args {
                command: Command::Html,
                input: Some(PathBuf::from("doc.md")),
                config: Some(PathBuf::from("c.toml")),
            }
        );
    }

    #[test]
    fn dash_means_stdin() {
        let parsed = parse_args(&args(&["tokens", "-"])).unwrap();
        assert_eq!(parsed.input, None);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["render"])).is_err());
        assert!(parse_args(&args(&["html", "a.md", "b.md"])).is_err());
        assert!(parse_args(&args(&["html", "--config"])).is_err());
    }

    #[test]
    fn run_html_with_config() {
        let dir = TempDir::new().unwrap();
        let doc = dir.path().join("doc.md");
        let config = dir.path().join("config.toml");
        fs::write(&doc, "---\n").unwrap();
        fs::write(&config, "[options]\nempty_element_suffix = \">\"\n").unwrap();

        let output = run(&Args {
            command: Command::Html,
            input: Some(doc),
            config: Some(config),
        })
        .unwrap();

        assert_eq!(output, "<hr>\n");
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("none.toml");
        assert!(load_options(Some(missing.as_path())).is_err());
    }

    #[test]
    fn reports() {
        let tokenizer = Tokenizer::default();
        assert_eq!(
            tokens_report(&tokenizer, "# Hi\n"),
            "0..4\tmarkdown.header.h1\t\"# Hi\"\n"
        );
        assert_eq!(
            outline_report(&tokenizer, "# A\n## B\n"),
            "0..9\tA\n4..9\t-B\n"
        );
    }
}
