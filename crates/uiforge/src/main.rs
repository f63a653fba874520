//! uiforge command-line interface.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use uiforge::{
    GenerateError, GenerateOptions, Generator, IrSource, OutputMode, OutputSpec, TargetRegistry,
};

/// Generate web, React and Flutter projects from a UI intermediate representation.
#[derive(Parser, Debug)]
#[command(name = "uiforge", version)]
struct Cli {
    /// Log more (-v info, -vv debug). UIFORGE_LOG overrides this.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one project per target
    Generate(GenerateArgs),
    /// List the supported targets
    ListTargets {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Validate an IR document without generating anything
    Validate(ValidateArgs),
    /// Print the IR JSON Schema (version 1)
    Schema,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// IR document path, or '-' for stdin
    #[arg(long)]
    ir: String,

    /// Target identifier; repeat for several targets
    #[arg(long, short, required = true, num_args = 1..)]
    target: Vec<String>,

    /// Output directory, created if missing
    #[arg(long, short)]
    out: PathBuf,

    /// Write an unpacked directory instead of a zip archive
    #[arg(long)]
    dir: bool,

    /// Replace existing output
    #[arg(long)]
    force: bool,

    /// Deflate level; 0 stores entries uncompressed
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u8).range(0..=9))]
    compression_level: u8,

    /// Skip the render-twice determinism check
    #[arg(long)]
    no_verify: bool,

    /// Reject unrecognized element kinds during validation
    #[arg(long)]
    strict: bool,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// IR document path, or '-' for stdin
    #[arg(long)]
    ir: String,

    /// Reject unrecognized element kinds
    #[arg(long)]
    strict: bool,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("UIFORGE_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn source(ir: &str) -> Result<IrSource> {
    if ir == "-" {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("failed to read IR from stdin")?;
        Ok(IrSource::Bytes(bytes))
    } else {
        Ok(IrSource::Path(PathBuf::from(ir)))
    }
}

fn generate(args: GenerateArgs) -> Result<()> {
    let mut options = GenerateOptions::new()
        .compression_level(args.compression_level)
        .verify_determinism(!args.no_verify);
    if args.strict {
        options = options.strict();
    }

    let mode = if args.dir {
        OutputMode::Directory
    } else {
        OutputMode::Archive
    };
    let out = OutputSpec {
        dir: args.out,
        mode,
        overwrite: args.force,
    };

    let source = source(&args.ir)?;
    let generator = Generator::with_defaults(options);
    let targets: Vec<&str> = args.target.iter().map(String::as_str).collect();
    let reports = generator.generate_many(&source, &targets, &out)?;

    let mut stdout = std::io::stdout().lock();
    for report in reports {
        writeln!(
            stdout,
            "{}: wrote {} ({} files)",
            report.target,
            report.path.display(),
            report.files
        )?;
    }
    Ok(())
}

fn list_targets(json: bool) -> Result<()> {
    let registry = TargetRegistry::with_defaults();
    let mut stdout = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &registry.describe())?;
        writeln!(stdout)?;
    } else {
        for target in registry.describe() {
            writeln!(
                stdout,
                "{:<8} {:<20} {}",
                target.name, target.framework, target.tooling
            )?;
        }
    }
    Ok(())
}

fn validate(args: ValidateArgs) -> Result<()> {
    let mut options = GenerateOptions::new();
    if args.strict {
        options = options.strict();
    }
    let generator = Generator::with_defaults(options);
    let model = generator.load(&source(&args.ir)?)?;
    println!(
        "ok: screen '{}', {} element(s), schema {}",
        model.screen_name(),
        model.walk().count(),
        model.schema_version()
    );
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Generate(args) => generate(args),
        Command::ListTargets { json } => list_targets(json),
        Command::Validate(args) => validate(args),
        Command::Schema => {
            print!("{}", uiforge_ir::schema::SCHEMA_V1);
            Ok(())
        }
    }
}

fn report(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<GenerateError>() {
        Some(GenerateError::Validation(validation)) => {
            eprintln!(
                "error: invalid IR document ({} violation(s))",
                validation.violations.len()
            );
            for violation in &validation.violations {
                eprintln!("  {}", violation);
            }
            2
        }
        Some(generate_err) => {
            eprintln!("error: {:#}", err);
            generate_err.exit_code()
        }
        None => {
            eprintln!("error: {:#}", err);
            1
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => ExitCode::from(report(&err)),
    }
}
