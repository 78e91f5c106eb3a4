//! `tfmaint`: run Terraform `init`/`plan`/`apply`/`destroy` or a custom
//! subcommand against the directory and variables file named in `config.yaml`.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{error, warn};

use tfmaint::core::action::{Action, ActionError, usage};
use tfmaint::dispatch::Dispatcher;
use tfmaint::exit_codes;
use tfmaint::io::config::{DEFAULT_CONFIG_PATH, load_config};
use tfmaint::io::confirm::{AssumeYes, TerminalConfirmer};
use tfmaint::io::runner::ProcessRunner;
use tfmaint::logging;

const PROGRAM: &str = "tfmaint";

/// Wrapper options. Only tokens up to and including the action are parsed
/// here; everything after the action is collected raw by [`parse_argv`].
#[derive(Debug, Parser)]
#[command(
    name = "tfmaint",
    version,
    about = "Thin wrapper for routine Terraform maintenance",
    after_help = "Arguments after the action are not interpreted by tfmaint; \
                  `custom` forwards them verbatim to terraform."
)]
struct Cli {
    /// YAML config with `terraform.dir`, `terraform.vars_file` and `environment`.
    #[arg(long, env = "TFMAINT_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Answer "yes" to the apply/destroy confirmation prompt.
    #[arg(short, long)]
    yes: bool,

    /// One of: init, plan, apply, destroy, custom.
    action: Option<String>,
}

/// Parse wrapper options and return them with the raw tokens after the action.
fn parse_argv<I, T>(argv: I) -> Result<(Cli, Vec<String>), clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let (head, rest) = split_at_action(argv.into_iter().map(Into::into).collect());
    let cli = Cli::try_parse_from(head)?;
    Ok((cli, rest))
}

/// Split argv after the first token that is not a wrapper option.
///
/// `--config` consumes the following token as its value; `--` forces the next
/// token to be the action.
fn split_at_action(argv: Vec<String>) -> (Vec<String>, Vec<String>) {
    let mut head = Vec::new();
    let mut tokens = argv.into_iter();
    head.extend(tokens.next());

    while let Some(token) = tokens.next() {
        if token == "--" {
            head.push(token);
            head.extend(tokens.next());
            break;
        }
        let is_option = token.starts_with('-') && token != "-";
        let takes_value = token == "--config";
        head.push(token);
        if takes_value {
            head.extend(tokens.next());
        } else if !is_option {
            break;
        }
    }

    (head, tokens.collect())
}

fn main() {
    logging::init();

    let argv = std::env::args_os().map(|arg| arg.to_string_lossy().into_owned());
    let (cli, args) = match parse_argv(argv) {
        Ok(parsed) => parsed,
        Err(err) if err.use_stderr() => {
            let _ = err.print();
            std::process::exit(exit_codes::INVALID);
        }
        Err(err) => err.exit(),
    };

    let code = match run(&cli, args) {
        Ok(code) => code,
        Err(err) => {
            error!("{:#}", err);
            exit_code_for(&err)
        }
    };
    std::process::exit(code);
}

/// Returns the process exit code; errors are mapped by [`exit_code_for`].
fn run(cli: &Cli, args: Vec<String>) -> Result<i32> {
    let Some(name) = cli.action.as_deref() else {
        print_usage();
        return Ok(exit_codes::INVALID);
    };

    let ignored = args.clone();
    let action = Action::parse(name, args)?;
    if !matches!(action, Action::Custom(_)) && !ignored.is_empty() {
        warn!(?ignored, "extra arguments are only forwarded by `custom`");
    }

    let config = load_config(&cli.config)?;
    let runner = ProcessRunner;
    let outcome = if cli.yes {
        Dispatcher::new(&config, &runner, &AssumeYes).dispatch(&action)?
    } else {
        let confirmer = TerminalConfirmer::stdio();
        Dispatcher::new(&config, &runner, &confirmer).dispatch(&action)?
    };
    Ok(outcome.exit_code())
}

/// Usage goes straight to stderr so it survives `RUST_LOG=off`.
fn print_usage() {
    let text = usage(PROGRAM);
    eprintln!("{text}");
    error!("{text}");
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ActionError>() {
        Some(ActionError::Unsupported(_)) => exit_codes::UNSUPPORTED,
        Some(ActionError::MissingCustomArgs) => {
            print_usage();
            exit_codes::INVALID
        }
        None => exit_codes::INVALID,
    }
}
