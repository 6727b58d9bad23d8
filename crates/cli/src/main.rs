//! Command line entry point: parse arguments, run the generator, and write
//! the SVG output.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use mazegen_core::{Error as GeneratorError, Generator};

use mazegen::args::{Args, SvgUnit, SvgZeroPoint};
use mazegen::report::ConsoleReport;
use mazegen::seed::SeedChoice;
use mazegen::svg::{self, SvgOptions};

const EXIT_INVALID_INPUT: u8 = 1;
const EXIT_GENERATION_FAILED: u8 = 2;

struct Failure {
    error: anyhow::Error,
    exit: u8,
}

fn invalid_input(error: anyhow::Error) -> Failure {
    Failure { error, exit: EXIT_INVALID_INPUT }
}

fn generator_failure(error: GeneratorError) -> Failure {
    let exit = if error.is_invalid_input() { EXIT_INVALID_INPUT } else { EXIT_GENERATION_FAILED };
    Failure { error: error.into(), exit }
}

fn main() -> ExitCode {
    simple_logger::SimpleLogger::new().with_level(LevelFilter::Warn).env().init().ok();
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(error) => {
            // Help and version end up here as well; only real parse
            // problems count as invalid input.
            let exit =
                if error.use_stderr() { ExitCode::from(EXIT_INVALID_INPUT) } else { ExitCode::SUCCESS };
            let _ = error.print();
            return exit;
        }
    };
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            eprintln!("error: {:#}", failure.error);
            ExitCode::from(failure.exit)
        }
    }
}

fn run(args: &Args) -> Result<(), Failure> {
    let mut config = args.build_config().map_err(invalid_input)?;
    let seed = SeedChoice::resolve(args.seed);
    config.seed = Some(seed.value());

    let options = SvgOptions {
        canvas_width: config.width,
        canvas_height: config.height,
        wall_thickness: config.wall_thickness,
        px_unit: args.svg_unit == SvgUnit::Px,
        dpi: args.svg_dpi,
        zero_at_center: args.svg_zero_point == SvgZeroPoint::Center,
        background: args.background_color().map_err(invalid_input)?,
        wall_color: args.wall_color().map_err(invalid_input)?,
        endpoint_colors: args.endpoint_colors().map_err(invalid_input)?,
        marks: !args.no_marks,
    };

    if !config.silent {
        println!("Seed: {}", seed.value());
    }
    let generator = Generator::new(config.clone()).map_err(generator_failure)?;
    let mut report = ConsoleReport::new(config.silent);
    let maze = generator.generate(&mut report).map_err(generator_failure)?;

    let document = svg::render(&maze, &options);
    std::fs::write(&args.output, document)
        .with_context(|| format!("failed to write '{}'", args.output.display()))
        .map_err(|error| Failure { error, exit: EXIT_GENERATION_FAILED })?;
    if !config.silent {
        println!("Saved maze to '{}'.", args.output.display());
    }
    Ok(())
}
