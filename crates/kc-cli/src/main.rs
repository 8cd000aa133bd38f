mod cli_args;
mod source_loader;

use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli_args::{Cli, Command, TargetArgs};
use kc_core::{CreationSummary, ExtractFlags, KcodeError, ValidationRecord};
use source_loader::{read_creation, resolve_targets};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.command.target().verbose);

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    };
    std::process::exit(exit_code);
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<i32, KcodeError> {
    match cli.command {
        Command::Blocks(args) => run_extract(&args, ExtractFlags::blocks_only()),
        Command::Spells(args) => run_extract(&args, ExtractFlags::spells_only()),
        Command::Parts(args) => run_extract(
            &args,
            ExtractFlags {
                parts: true,
                ..ExtractFlags::default()
            },
        ),
        Command::Scene(args) => run_extract(
            &args,
            ExtractFlags {
                scene: true,
                ..ExtractFlags::default()
            },
        ),
        Command::Validate(args) => run_validate(&args),
    }
}

fn run_extract(args: &TargetArgs, flags: ExtractFlags) -> Result<i32, KcodeError> {
    for path in resolve_targets(&args.path)? {
        let data = read_creation(&path)?;
        let summary = kc_api::process_creation(&data, flags)?;
        render_summary(&path, &summary, flags);
    }
    Ok(0)
}

fn render_summary(path: &Path, summary: &CreationSummary, flags: ExtractFlags) {
    println!("--- {} ---", path.display());
    if flags.blocks {
        for (index, block) in summary.blocks.iter().enumerate() {
            println!("block {}: {}", index + 1, block);
        }
    }
    if flags.spells {
        for (index, spell) in summary.spells.iter().enumerate() {
            println!("spell {}: {}", index + 1, spell);
        }
    }
    if flags.parts {
        for (index, part) in summary.parts.iter().enumerate() {
            println!("part {}: {}", index + 1, part);
        }
    }
    if flags.scene {
        println!("scene: {}", summary.scene);
    }
}

fn run_validate(args: &TargetArgs) -> Result<i32, KcodeError> {
    let mut failures = 0;
    for path in resolve_targets(&args.path)? {
        let data = read_creation(&path)?;
        let record = kc_api::validate_creation(&data)?;
        render_record(&path, &record);
        if !record.valid {
            failures += 1;
        }
    }
    Ok(if failures == 0 { 0 } else { 1 })
}

fn render_record(path: &Path, record: &ValidationRecord) {
    if record.valid {
        println!("SUCCEEDED in validating '{}'", path.display());
    } else {
        println!("FAILED to validate '{}'", path.display());
    }
    println!(
        "expected {} blocks and found {}",
        record.blocks.expected, record.blocks.found
    );
    println!(
        "expected {} spells and found {}",
        record.spells.expected, record.spells.found
    );
    println!(
        "expected {} parts and found {}",
        record.parts.expected, record.parts.found
    );
    println!(
        "expected {} scene markers and found scene of length {}",
        record.scene.expected, record.scene.found
    );
}

fn emit_error(error: KcodeError) -> i32 {
    eprintln!("ERROR_CODE:{}", error.code);
    eprintln!("ERROR_MSG:{}", error.message);
    1
}
