use super::{
    channel::ChannelTransport,
    master::{Decision, Master},
    transport::MASTER_RANK,
    worker::Worker,
};
use crate::{
    config::SearchConfig,
    error::{Error, Result},
    node::state::GameState,
};

use log::debug;
use std::thread;

/// Runs the coordinator on the calling thread and one worker thread per
/// remaining rank, all connected through in-process channels.
pub fn run_local(initial: GameState, config: SearchConfig) -> Result<Decision> {
    let mut mesh = ChannelTransport::mesh(config.processes).into_iter();
    let Some(master_transport) = mesh.next() else {
        return Err(Error::Configuration(
            "at least one process is required".to_string(),
        ));
    };

    return thread::scope(|scope| {
        let handles: Vec<_> = mesh
            .map(|transport| scope.spawn(move || Worker::new(transport, MASTER_RANK).run()))
            .collect();

        // The master's endpoints drop before the join, which unblocks any
        // worker left waiting after a coordinator failure.
        let decision = {
            let mut master = Master::new(master_transport, config);
            master.run(initial)
        };

        let mut worker_error: Option<Error> = None;
        for (i, handle) in handles.into_iter().enumerate() {
            match handle.join() {
                Ok(Ok(completed)) => debug!("worker {} completed {} tasks", i + 1, completed),
                Ok(Err(e)) => {
                    worker_error.get_or_insert(e);
                }
                Err(_) => {
                    worker_error.get_or_insert(Error::Transport(format!(
                        "worker {} panicked",
                        i + 1
                    )));
                }
            }
        }

        let decision = decision?;
        if let Some(e) = worker_error {
            return Err(e);
        }

        return Ok(decision);
    });
}
