use std::{fs, process::ExitCode};

use clap::Parser;
use simplec::cli::Args;
use simplec::error::{CompileError, ErrorReporter};
use simplec::ir::{Generator, to_string};
use simplec::parser::parse;
use simplec::types::Type;

fn run(args: &Args, source: &str) -> Result<String, CompileError> {
    let program = parse(source)?;

    let mut generator = Generator::new(Type::int_bottom())?;
    generator.graph.disable_peephole = args.disable_peephole;
    let result = generator.generate(&program)?;

    if args.show_graph {
        println!("{}", simplec::ir::visualize(&generator));
    }
    if args.verbose {
        eprintln!(
            "compiled {} ({} live outputs on Start)",
            args.input.display(),
            generator.graph.outputs(generator.graph.start).len()
        );
    }

    Ok(to_string(&generator.graph, result))
}

fn main() -> ExitCode {
    let args = Args::parse();
    let source = match fs::read_to_string(&args.input) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: cannot read {}: {e}", args.input.display());
            return ExitCode::FAILURE;
        }
    };

    match run(&args, &source) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            ErrorReporter::new(&source).report(&error);
            ExitCode::FAILURE
        }
    }
}
