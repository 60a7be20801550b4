use std::{fs, process::ExitCode};

use clap::Parser;
use hulk::{Kompiler, interpreter::value::core::Kind};
use log::LevelFilter;
use simple_logger::SimpleLogger;

/// hulk runs programs written in a small expression-oriented language, one
/// line at a time.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells hulk to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Prints the value of every instruction that produces one.
    #[arg(short, long)]
    echo: bool,

    /// Lists the declared functions once the script has run.
    #[arg(short = 'l', long)]
    functions: bool,

    contents: String,
}

fn main() -> ExitCode {
    if let Err(e) = SimpleLogger::new().with_level(LevelFilter::Error).env().init() {
        eprintln!("Failed to initialize logging: {e}");
    }

    let args = Args::parse();

    let script = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(script) => script,
            Err(_) => {
                eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                          &args.contents);
                return ExitCode::FAILURE;
            },
        }
    } else {
        args.contents
    };

    let mut kompiler = Kompiler::new(|text| println!("{text}"));
    let mut failed = false;

    for line in script.lines() {
        for result in kompiler.compile(line) {
            match result {
                Ok(value) if args.echo && value.kind() != Kind::Void => println!("{value}"),
                Ok(_) => {},
                Err(_) => failed = true,
            }
        }
    }

    if args.functions {
        for (name, parameters) in kompiler.functions() {
            println!("{name}({})", parameters.join(", "));
        }
    }

    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}
