use std::{
    fs::File,
    io::{self, BufWriter},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use drone_routing::{input, output, Mode, Problem, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Find routes for drones according to mode. Valid modes are 'MST', 'FASTTSP', and 'OPTTSP'.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opt {
    /// A path to a location list, else reads from stdin
    file: Option<PathBuf>,

    /// Routing algorithm to run
    #[arg(short, long, value_enum)]
    mode: Mode,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: output::Format,

    /// Output file path (overwrites old files), else writes to stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("drone_routing=warn")),
        )
        .with_writer(io::stderr)
        .init();
    let opt = Opt::parse();

    match run(&opt) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(opt: &Opt) -> Result<()> {
    let locations = match &opt.file {
        Some(path) => input::read_locations(File::open(path)?)?,
        None => {
            info!("Reading from stdin");
            input::read_locations(io::stdin().lock())?
        }
    };

    let problem = Problem::new(locations);
    let solution = problem.solve(opt.mode)?;

    match &opt.out {
        Some(path) => output::write_solution(
            &solution,
            opt.format,
            BufWriter::new(File::create(path)?),
        ),
        None => output::write_solution(&solution, opt.format, io::stdout().lock()),
    }
}
