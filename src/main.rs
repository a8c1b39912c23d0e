use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use connect_four_mpi::{
    config::SearchConfig,
    input::read_board,
    node::state::GameState,
    process::{local::run_local, master::Decision},
};
use env_logger::Env;
use log::{debug, info};
use std::{path::PathBuf, thread, time::Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Coordinator and workers as threads of this process.
    Threads,
    /// One rank per MPI process; rank 0 coordinates.
    #[cfg(feature = "mpi")]
    Mpi,
}

#[derive(Parser, Debug)]
#[command(version, about = "Picks the computer's next Connect Four move with a distributed tree search")]
struct Cli {
    /// Board description: `height width` followed by the rows, top row first.
    input: PathBuf,

    #[arg(long)]
    max_depth: u8,

    /// Depth of the tree the coordinator expands before splitting work.
    #[arg(long)]
    scheduling_depth: Option<u8>,

    /// Total ranks for the thread backend, coordinator included.
    #[arg(long)]
    processes: Option<usize>,

    #[arg(long, value_enum, default_value_t = Backend::Threads)]
    backend: Backend,

    /// Print the decision as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.backend {
        Backend::Threads => {
            let processes = match cli.processes {
                Some(processes) => processes,
                None => thread::available_parallelism().map_or(1, |n| n.get()),
            };

            let (initial, config) = prepare(&cli, processes)?;
            let start = Instant::now();
            let decision = run_local(initial, config)?;
            info!("Elapsed time: {:#?}", start.elapsed());

            report(&decision, cli.json)
        }
        #[cfg(feature = "mpi")]
        Backend::Mpi => run_mpi(&cli),
    }
}

fn prepare(cli: &Cli, processes: usize) -> Result<(GameState, SearchConfig)> {
    let board = read_board(&cli.input)
        .with_context(|| format!("loading board from {}", cli.input.display()))?;

    debug!("initial position:\n{}", board);

    let config = SearchConfig::new(cli.max_depth, cli.scheduling_depth, processes, board.width())?;
    info!("{:?}", config);

    return Ok((GameState::root(board, config.max_depth), config));
}

fn report(decision: &Decision, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(decision)?);
    } else {
        println!("Best move: {}", decision.column);
        println!("Utility: {}", decision.utility);
    }

    return Ok(());
}

#[cfg(feature = "mpi")]
fn run_mpi(cli: &Cli) -> Result<()> {
    use anyhow::anyhow;
    use connect_four_mpi::process::{
        master::Master,
        mpi::MpiTransport,
        transport::{Transport, MASTER_RANK},
        worker::Worker,
    };
    use log::error;
    use mpi::traits::*;

    let universe = mpi::initialize().ok_or_else(|| anyhow!("MPI is already initialised"))?;
    let world = universe.world();
    let transport = MpiTransport::new(world);

    if transport.rank() != MASTER_RANK {
        let mut worker = Worker::new(transport, MASTER_RANK);
        if let Err(e) = worker.run() {
            error!("worker {}: {}", world.rank(), e);
            world.abort(1);
        }

        return Ok(());
    }

    // A failed coordinator must take the blocked workers down with it.
    let outcome = prepare(cli, world.size() as usize).and_then(|(initial, config)| {
        let start = Instant::now();
        let decision = Master::new(transport, config).run(initial)?;
        info!("Elapsed time: {:#?}", start.elapsed());

        Ok(decision)
    });

    match outcome {
        Ok(decision) => report(&decision, cli.json),
        Err(e) => {
            error!("{:#}", e);
            world.abort(1)
        }
    }
}
