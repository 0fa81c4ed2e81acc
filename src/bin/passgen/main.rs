use std::path::PathBuf;
use std::process;

use clap::Parser;

use passgen::password_generation::{parse_length, GenerationError};

mod clipboard;
mod commands;
mod config;
mod interactive;
mod render;
mod table;

#[derive(Parser)]
#[command(version, about = "Generate random passwords and score their strength.")]
struct Args {
    /// YAML file with default options [default: ~/.config/passgen/config.yaml]
    #[arg(long, global = true, env = "PASSGEN_CONFIG")]
    config: Option<PathBuf>,
    /// Log what is going on to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Generate passwords (the default).
    #[command(alias = "gen")]
    Generate(GenerateArgs),
    /// Rate the strength of an existing password.
    Score {
        /// The password to score. Prompted for (without echo) when omitted.
        password: Option<String>,
    },
    /// Pick the character types and length through prompts.
    #[command(alias = "i")]
    Interactive,
}

#[derive(clap::Args, Default)]
pub(crate) struct GenerateArgs {
    /// Number of characters in each password.
    #[arg(short = 'L', long, value_parser = parse_length)]
    length: Option<usize>,
    /// Include uppercase letters.
    #[arg(short, long)]
    uppercase: bool,
    /// Include lowercase letters.
    #[arg(short, long)]
    lowercase: bool,
    /// Include digits.
    #[arg(short, long)]
    digits: bool,
    /// Include symbols.
    #[arg(short, long)]
    symbols: bool,
    /// How many passwords to generate.
    #[arg(short = 'n', long, value_parser = parse_count)]
    count: Option<usize>,
    /// Copy the result to the clipboard.
    #[arg(short, long)]
    copy: bool,
    /// Print JSON, including the strength assessment.
    #[arg(long, conflicts_with = "quiet")]
    json: bool,
    /// Print only the passwords.
    #[arg(short, long)]
    quiet: bool,
}

fn parse_count(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(format!("expected a whole number greater than 0, got {raw:?}")),
    }
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

fn run() -> Result<(), ProgError> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = config::Config::load(args.config.as_deref())?;

    match args.command {
        None => commands::generate(GenerateArgs::default(), &config)?,
        Some(Command::Generate(generate_args)) => commands::generate(generate_args, &config)?,
        Some(Command::Score { password }) => commands::score(password)?,
        Some(Command::Interactive) => interactive::run(&config)?,
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{} {err}", console::style("error:").red().bold());
        if let ProgError::Other(err) = &err {
            for cause in err.chain().skip(1) {
                eprintln!("  caused by: {cause}");
            }
        }
        process::exit(1);
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ProgError {
    #[error("{0}")]
    Generation(GenerationError),
    #[error("Selection cancelled; exiting.")]
    PromptCancelled,
    #[error("The configuration file {0:?} does not exist.")]
    ConfigNotFound(PathBuf),
    #[error("Failed to parse the configuration file {0:?}: {1}")]
    ConfigInvalid(PathBuf, #[source] serde_yaml::Error),
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<anyhow::Error> for ProgError {
    fn from(err: anyhow::Error) -> ProgError {
        ProgError::Other(err)
    }
}

impl From<GenerationError> for ProgError {
    fn from(err: GenerationError) -> ProgError {
        ProgError::Generation(err)
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_generate() {
        let args = Args::try_parse_from(["passgen"]).unwrap();
        assert!(args.command.is_none());
    }

    #[test]
    fn parses_generate_flags() {
        let args = Args::try_parse_from(["passgen", "generate", "-L", "24", "-ud", "-n", "3"])
            .unwrap();
        let Some(Command::Generate(generate)) = args.command else {
            panic!("expected the generate command");
        };
        assert_eq!(generate.length, Some(24));
        assert_eq!(generate.count, Some(3));
        assert!(generate.uppercase && generate.digits);
        assert!(!generate.lowercase && !generate.symbols);
    }

    #[test]
    fn rejects_bad_lengths() {
        for bad in ["0", "-1", "ten"] {
            assert!(Args::try_parse_from(["passgen", "generate", "--length", bad]).is_err());
        }
        assert!(Args::try_parse_from(["passgen", "generate", "--count", "0"]).is_err());
    }

    #[test]
    fn json_and_quiet_conflict() {
        assert!(Args::try_parse_from(["passgen", "generate", "--json", "--quiet"]).is_err());
    }
}
