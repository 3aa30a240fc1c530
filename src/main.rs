use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use clap::{Parser, ValueEnum};
use stlcpp_syntax::{
    ast::{ast::Stmt, dump::to_sexpr},
    display_error,
    lexer::lexer::tokenize,
    parse_source_with_options,
    parser::parser::ParseOptions,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// One span-free s-expression per statement
    Sexpr,
    /// The full tree with spans
    Json,
    /// Canonical source text
    Source,
    /// The raw token stream
    Tokens,
}

#[derive(Parser)]
#[command(name = "stlcpp")]
#[command(about = "Parse a source file and print its syntax tree")]
struct Args {
    /// Path to the source file
    file: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Sexpr)]
    format: Format,

    /// Stop after consuming this many tokens
    #[arg(long)]
    token_budget: Option<usize>,

    /// Print phase timings
    #[arg(long)]
    timings: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let file_name = args
        .file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("unknown")
        .to_string();

    let source = match read_to_string(&args.file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: failed to read {}: {}", args.file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();

    if let Format::Tokens = args.format {
        return match tokenize(&source, Some(file_name.clone())) {
            Ok(tokens) => {
                if args.timings {
                    println!("Tokenized in {:?}", start.elapsed());
                }
                for token in tokens {
                    println!("{}", token.debug());
                }
                ExitCode::SUCCESS
            }
            Err(error) => {
                display_error(&error, &source, &file_name);
                ExitCode::FAILURE
            }
        };
    }

    let options = ParseOptions {
        token_budget: args.token_budget,
    };
    let output = parse_source_with_options(&source, Some(file_name.clone()), options);

    if args.timings {
        println!("Parsed in {:?}", start.elapsed());
    }

    match args.format {
        Format::Sexpr => {
            for stmt in output.module.iter() {
                println!("{}", to_sexpr(&stmt.to_json()));
            }
        }
        Format::Json => match serde_json::to_string_pretty(&output.module.to_json()) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: failed to serialise tree: {}", e);
                return ExitCode::FAILURE;
            }
        },
        Format::Source => print!("{}", output.module.to_source()),
        Format::Tokens => {}
    }

    for error in &output.errors {
        display_error(error, &source, &file_name);
    }

    if output.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
