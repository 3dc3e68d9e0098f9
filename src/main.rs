use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    process::ExitCode,
    rc::Rc,
};

use anyhow::{Context, Result};
use clap::Parser;
use tiny::{
    analyzer::analyzer::analyze, codegen::codegen::generate, display_error,
    lexer::lexer::tokenize, parser::parser::parse, vm::vm::Machine,
};
use tracing::Level;
use tracing_subscriber::{filter::Targets, layer::SubscriberExt, util::SubscriberInitExt};

/// Compiler for the TINY language.
#[derive(Parser, Debug)]
#[command(name = "tiny", version)]
struct Cli {
    /// Source file; `.tny` is appended when it has no extension
    file: PathBuf,

    /// Echo the numbered source before compiling
    #[arg(long)]
    echo_source: bool,
    /// Log every token the scanner produces
    #[arg(long)]
    trace_scan: bool,
    /// Log parsed statements and print the syntax tree
    #[arg(long)]
    trace_parse: bool,
    /// Log symbol resolution and print the symbol table
    #[arg(long)]
    trace_analyze: bool,
    /// Log emitted instructions, backpatches and machine steps
    #[arg(long)]
    trace_code: bool,

    /// Where to write the listing (defaults to `<stem>.tm`)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Stop after analysis without writing code
    #[arg(long)]
    no_code: bool,
    /// Execute the program, reading integers from stdin
    #[arg(long)]
    run: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli);

    let path = source_path(&cli.file);
    let source = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = Rc::new(
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
    );

    println!("\nTINY COMPILATION: {}", path.display());
    if cli.echo_source {
        for (index, line) in source.lines().enumerate() {
            println!("{:4}: {}", index + 1, line);
        }
    }

    let tokens = match tokenize(source.clone(), Some(file_name.to_string())) {
        Ok(tokens) => tokens,
        Err(error) => {
            display_error(&error, &source);
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut ast = match parse(tokens, Rc::clone(&file_name)) {
        Ok(ast) => ast,
        Err(error) => {
            display_error(&error, &source);
            return Ok(ExitCode::FAILURE);
        }
    };

    if cli.trace_parse {
        println!("\nSyntax tree:");
        print!("{}", ast);
    }

    let analysis = analyze(&mut ast, file_name);
    if cli.trace_analyze {
        println!("\nSymbol table:\n");
        print!("{}", analysis.symbols);
    }

    let symbols = match analysis.into_symbols() {
        Ok(symbols) => symbols,
        Err(diagnostics) => {
            for error in &diagnostics {
                display_error(error, &source);
            }
            return Ok(ExitCode::FAILURE);
        }
    };

    if cli.no_code {
        return Ok(ExitCode::SUCCESS);
    }

    let program = generate(&ast, &symbols)?;

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| path.with_extension("tm"));
    fs::write(&output, program.to_string())
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("\nCode written to {}", output.display());

    if cli.run {
        let inputs = read_inputs()?;
        let outputs = Machine::new(program).run(&inputs)?;
        for value in outputs {
            println!("{}", value);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn init_logging(cli: &Cli) {
    let mut targets = Targets::new().with_default(Level::WARN);
    for (enabled, target) in [
        (cli.trace_scan, "tiny::lexer"),
        (cli.trace_parse, "tiny::parser"),
        (cli.trace_analyze, "tiny::analyzer"),
        (cli.trace_code, "tiny::codegen"),
        (cli.trace_code, "tiny::vm"),
    ] {
        if enabled {
            targets = targets.with_target(target, Level::TRACE);
        }
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(targets)
        .init();
}

fn source_path(file: &Path) -> PathBuf {
    if file.extension().is_none() {
        file.with_extension("tny")
    } else {
        file.to_path_buf()
    }
}

fn read_inputs() -> Result<Vec<i32>> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read program input")?;

    input
        .split_whitespace()
        .map(|word| {
            word.parse::<i32>()
                .with_context(|| format!("input {:?} is not an integer", word))
        })
        .collect()
}
