//! bytevm command-line driver.
//!
//! This binary loads an assembly source and drives the machine. It performs:
//! 1. **Run:** Execute a program to completion (or a step budget), then dump state and statistics.
//! 2. **List:** Parse a program and print it back in canonical form.
//! 3. **Step:** Execute one instruction per Enter key press, dumping state after each.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use bytevm_core::VmError;
use bytevm_core::config::Config;
use bytevm_core::core::RunOutcome;
use bytevm_core::sim::loader;

#[derive(Parser, Debug)]
#[command(
    name = "bytevm",
    author,
    version,
    about = "Byte-addressable x86-like virtual machine",
    long_about = "Run, list or single-step programs written in a small x86-like assembly dialect.\n\nExamples:\n  bytevm run demos/sign_extend.asm\n  bytevm run prog.asm --config vm.json --max-steps 100\n  bytevm list prog.asm\n  bytevm --trace step prog.asm"
)]
struct Cli {
    /// Log every executed instruction (overridden by RUST_LOG).
    #[arg(long, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Execute a program and dump the final state.
    Run {
        /// Assembly source file.
        file: PathBuf,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Stop after this many instructions.
        #[arg(long)]
        max_steps: Option<u64>,

        /// Skip the statistics report.
        #[arg(short, long)]
        quiet: bool,
    },

    /// Parse a program and print it.
    List {
        /// Assembly source file.
        file: PathBuf,
    },

    /// Execute a program one instruction at a time.
    Step {
        /// Assembly source file.
        file: PathBuf,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.trace);

    let result = match cli.command {
        Commands::Run {
            file,
            config,
            max_steps,
            quiet,
        } => cmd_run(&file, config.as_deref(), max_steps, cli.trace, quiet),
        Commands::List { file } => cmd_list(&file),
        Commands::Step { file, config } => cmd_step(&file, config.as_deref(), cli.trace),
    };

    if let Err(e) = result {
        eprintln!("\n[!] FATAL: {e}");
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            eprintln!("    caused by: {cause}");
            source = cause.source();
        }
        process::exit(1);
    }
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `--trace`.
fn init_tracing(trace: bool) {
    let fallback = if trace {
        "warn,bytevm_core=trace"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Loads the config file (or defaults) and applies command-line overrides.
fn load_config(path: Option<&Path>, trace: bool, max_steps: Option<u64>) -> Result<Config, VmError> {
    let mut config = match path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.general.trace_instructions |= trace;
    if max_steps.is_some() {
        config.general.max_steps = max_steps;
    }
    debug!(?config, "effective configuration");
    Ok(config)
}

/// Runs a program to completion, then prints the final state and statistics.
///
/// On an execution error the state at the faulting instruction is dumped before returning.
fn cmd_run(
    file: &Path,
    config: Option<&Path>,
    max_steps: Option<u64>,
    trace: bool,
    quiet: bool,
) -> Result<(), VmError> {
    let config = load_config(config, trace, max_steps)?;
    let mut machine = loader::load_machine(file, &config)?;

    println!(
        "[*] Running {} ({} instruction(s), {} variable(s))",
        file.display(),
        machine.program().len(),
        machine.program().variables.len()
    );

    let outcome = machine.run();
    match &outcome {
        Ok(RunOutcome::Halted { steps }) => println!("[*] Halted after {steps} step(s)"),
        Ok(RunOutcome::StepLimit { steps }) => {
            println!("[*] Step limit reached after {steps} step(s)");
        }
        Err(_) => {
            if let Some(inst) = machine.current() {
                eprintln!("[!] Faulting instruction {}: {inst}", machine.ip());
            }
        }
    }

    print!("\n{}", machine.dump_state());
    if !quiet {
        machine.stats().print();
    }
    let _ = io::stdout().flush();
    outcome.map(|_| ())
}

/// Prints the parsed program in canonical form.
fn cmd_list(file: &Path) -> Result<(), VmError> {
    let program = loader::load_program(file)?;
    print!("{program}");
    Ok(())
}

/// Interactive single-stepping: Enter executes one instruction, `q` quits.
fn cmd_step(file: &Path, config: Option<&Path>, trace: bool) -> Result<(), VmError> {
    let config = load_config(config, trace, None)?;
    let mut machine = loader::load_machine(file, &config)?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    print!("{}", machine.dump_state());
    loop {
        let Some(inst) = machine.current() else {
            println!("[*] Halted");
            return Ok(());
        };
        print!("{:>4}: {inst}  [Enter=step, q=quit] ", machine.ip());
        let _ = io::stdout().flush();

        match lines.next() {
            None => return Ok(()),
            Some(Err(source)) => {
                return Err(VmError::Io {
                    path: PathBuf::from("<stdin>"),
                    source,
                });
            }
            Some(Ok(answer)) if answer.trim().eq_ignore_ascii_case("q") => return Ok(()),
            Some(Ok(_)) => {}
        }

        machine.step()?;
        print!("{}", machine.dump_state());
    }
}
