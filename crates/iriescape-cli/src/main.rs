use std::{
    io::{self, BufRead, Write},
    process::ExitCode,
};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use iriescape::{Component, Policy, escape_str, unescape_str};

/// Percent-escape and unescape URI and IRI components.
#[derive(Debug, Parser)]
#[command(name = "iriescape", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Escape literal text so it is valid inside a component.
    Escape(CodecArgs),
    /// Decode percent-encoded text wherever the result stays valid.
    Unescape(CodecArgs),
    /// List the component names accepted by `--component`.
    Components,
}

#[derive(Debug, Args)]
struct CodecArgs {
    /// Component whose reserved set applies.
    #[arg(short, long, default_value_t = Component::AbsoluteUri, conflicts_with = "all")]
    component: Component,

    /// Run every component and print `name<TAB>output` lines.
    #[arg(long)]
    all: bool,

    /// Also keep the delimiter that introduces the component (`?` for a
    /// query, `#` for a fragment).
    #[arg(short, long)]
    keep_delimiter: bool,

    /// Inputs to convert; standard input is read line by line when empty.
    text: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Escape,
    Unescape,
}

impl Direction {
    fn apply(self, text: &str, component: Component, keep_delimiter: bool) -> String {
        let policy = if keep_delimiter {
            component.keep_delimiter()
        } else {
            Policy::from(component)
        };
        match self {
            Self::Escape => escape_str(text, policy),
            Self::Unescape => unescape_str(text, policy),
        }
    }
}

fn convert(
    direction: Direction,
    args: &CodecArgs,
    text: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if args.all {
        for component in Component::ALL {
            let converted = direction.apply(text, component, args.keep_delimiter);
            writeln!(out, "{component}\t{converted}")?;
        }
    } else {
        writeln!(out, "{}", direction.apply(text, args.component, args.keep_delimiter))?;
    }
    Ok(())
}

fn run_codec(direction: Direction, args: &CodecArgs) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.text.is_empty() {
        log::debug!("no TEXT arguments, reading standard input");
        for (n, line) in io::stdin().lock().lines().enumerate() {
            let line = line.with_context(|| format!("failed to read input line {}", n + 1))?;
            convert(direction, args, &line, &mut out)?;
        }
    } else {
        for text in &args.text {
            convert(direction, args, text, &mut out)?;
        }
    }

    out.flush().context("failed to flush standard output")
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Escape(args) => run_codec(Direction::Escape, &args),
        Command::Unescape(args) => run_codec(Direction::Unescape, &args),
        Command::Components => {
            let mut out = io::stdout().lock();
            for component in Component::ALL {
                writeln!(out, "{component}")?;
            }
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
