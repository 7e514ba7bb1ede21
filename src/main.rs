use std::{io::Write, path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::{Parser, error::ErrorKind};
use env_logger::Builder;
use rr_model::{EXIT_INVALID_ARGUMENT, Quantum, Report, sim::LoadError};

/// Round-robin CPU scheduling simulator.
///
/// Reports the average waiting time and average response time of the
/// processes in WORKLOAD when scheduled with the given time quantum.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Workload file: a process count followed by `pid arrival burst` triples
    workload: PathBuf,

    /// Time quantum in ticks, as a positive decimal integer
    #[arg(value_parser = parse_quantum)]
    quantum: Quantum,

    /// Also print a per-process timing table
    #[arg(long)]
    per_process: bool,
}

fn parse_quantum(arg: &str) -> Result<Quantum, String> {
    if arg.is_empty() || !arg.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("`{arg}` is not a decimal integer"));
    }
    let ticks: u64 = arg
        .parse()
        .map_err(|_| format!("`{arg}` is too large for a quantum"))?;
    Quantum::new(ticks).ok_or_else(|| "quantum must be at least one tick".to_string())
}

fn run(cli: &Cli) -> anyhow::Result<Report> {
    let workload = rr_model::sim::load_workload(&cli.workload)
        .with_context(|| format!("cannot simulate {}", cli.workload.display()))?;
    Ok(rr_model::simulate(workload, cli.quantum))
}

fn main() -> ExitCode {
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(EXIT_INVALID_ARGUMENT),
            };
        }
    };

    match run(&cli) {
        Ok(report) => {
            println!("{report}");
            if cli.per_process {
                println!("{}", report.process_table());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            let code = err
                .downcast_ref::<LoadError>()
                .map_or(1, LoadError::exit_code);
            ExitCode::from(code)
        }
    }
}
