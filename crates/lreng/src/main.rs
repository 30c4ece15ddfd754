//! lreng command-line driver

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use lreng::error::EXIT_USAGE;
use lreng::{parse, to_postfix, tokenize, EvalContext, LrengError, Program};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Source file to run
    file: Option<PathBuf>,

    /// Run this source text instead of a file
    #[arg(short, long, value_name = "SOURCE", conflicts_with = "file")]
    code: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    debug: bool,

    /// Print a pipeline stage as JSON on stderr before running
    #[arg(long, value_enum)]
    dump: Option<Stage>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Stage {
    Tokens,
    Postfix,
    Tree,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = if err.use_stderr() {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::SUCCESS
            };
            // Nothing useful to do if stderr is gone
            let _ = err.print();
            return code;
        }
    };
    init_tracing(args.debug);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<LrengError>() {
            Some(error) => {
                eprintln!("{}", error);
                ExitCode::from(error.exit_code())
            }
            None => {
                eprintln!("error: {:#}", err);
                ExitCode::from(EXIT_USAGE)
            }
        },
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let source = load_source(args)?;
    if let Some(stage) = args.dump {
        dump(stage, &source)?;
    }

    let program = Program::compile(&source)?;
    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    let mut ctx = EvalContext::new(&mut input, &mut output);
    program.run(&mut ctx).map_err(LrengError::from)?;
    Ok(())
}

fn load_source(args: &Args) -> anyhow::Result<String> {
    match (&args.file, &args.code) {
        (Some(path), None) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        (None, Some(code)) => Ok(code.clone()),
        _ => bail!("expected a source file or --code <SOURCE>"),
    }
}

fn dump(stage: Stage, source: &str) -> anyhow::Result<()> {
    let tokens = tokenize(source).map_err(LrengError::from)?;
    let json = match stage {
        Stage::Tokens => serde_json::to_string_pretty(&tokens)?,
        Stage::Postfix if tokens.is_empty() => "[]".to_string(),
        Stage::Postfix => {
            let postfix = to_postfix(tokens).map_err(LrengError::from)?;
            serde_json::to_string_pretty(&postfix)?
        }
        Stage::Tree if tokens.is_empty() => "null".to_string(),
        Stage::Tree => {
            let tree = parse(tokens).map_err(LrengError::from)?;
            serde_json::to_string_pretty(&tree)?
        }
    };
    eprintln!("{}", json);
    Ok(())
}

/// Install the stderr subscriber when `RUST_LOG` is set or `--debug` is
/// given.
fn init_tracing(debug: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if debug {
        EnvFilter::new("lreng=debug")
    } else {
        return;
    };
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .init();
}
