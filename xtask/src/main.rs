use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::process::{Command, Stdio};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development automation for yac8")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format check, clippy and the full test suite
    Ci {
        #[arg(long)]
        verbose: bool,
    },
    /// Run tests, optionally only one module's unit tests
    Test {
        /// Module filter: config, display, emulator, input, machine, platform
        #[arg(long)]
        module: Option<String>,
    },
    /// Run the tick benchmarks
    Bench,
    /// Open the emulator window
    Run {
        #[arg(long)]
        release: bool,
        /// Passed through to the emulator (e.g. --scale 10 --pause-key P)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

const MODULES: [&str; 6] = ["config", "display", "emulator", "input", "machine", "platform"];

fn main() -> Result<()> {
    match Cli::parse().command {
        Commands::Ci { verbose } => run_ci(verbose),
        Commands::Test { module } => run_test(module.as_deref()),
        Commands::Bench => cargo(&["bench"]),
        Commands::Run { release, args } => run_emulator(release, &args),
    }
}

fn run_ci(verbose: bool) -> Result<()> {
    println!("{}", "=== yac8 CI ===".bold().blue());
    let start = Instant::now();

    let steps: [(&str, &[&str]); 3] = [
        ("Format Check", &["fmt", "--all", "--", "--check"]),
        ("Clippy", &["clippy", "--all-targets", "--", "-D", "warnings"]),
        ("Test", &["test", "--all-targets"]),
    ];

    for (name, args) in steps {
        print!("{} {} ... ", "→".blue(), name);
        let step_start = Instant::now();
        match cargo(args) {
            Ok(()) if verbose => println!(
                "{} ({:.2}s)",
                "✓".green().bold(),
                step_start.elapsed().as_secs_f64()
            ),
            Ok(()) => println!("{}", "✓".green().bold()),
            Err(e) => {
                println!("{}", "✗".red().bold());
                return Err(e);
            }
        }
    }

    println!(
        "\n{} {}",
        "✓ CI passed in".green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );
    Ok(())
}

fn run_test(module: Option<&str>) -> Result<()> {
    let Some(module) = module else {
        return cargo(&["test", "--all-targets"]);
    };

    if !MODULES.contains(&module) {
        bail!(
            "Unknown module '{}', expected one of: {}",
            module,
            MODULES.join(", ")
        );
    }

    println!("{} Running {} tests...", "→".blue(), module.bold());
    cargo(&["test", "--lib", module])
}

fn run_emulator(release: bool, args: &[String]) -> Result<()> {
    let mut cargo_args = vec!["run"];
    if release {
        cargo_args.push("--release");
    }
    cargo_args.push("--");
    cargo_args.extend(args.iter().map(String::as_str));

    let start = Instant::now();
    cargo(&cargo_args)?;
    println!(
        "{} Session lasted {:.2}s",
        "✓".green().bold(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn cargo(args: &[&str]) -> Result<()> {
    let status = Command::new("cargo")
        .args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        bail!("cargo {} failed with {}", args.join(" "), status);
    }
    Ok(())
}
