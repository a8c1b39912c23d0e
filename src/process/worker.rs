use super::tag::Tag;
use super::transport::{Rank, Transport};
use crate::error::{Error, Result};
use crate::node::utility::compute_utility;
use crate::wire;
use log::{debug, trace};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WorkerState {
    AwaitingTask,
    Terminated,
}

pub struct Worker<T: Transport> {
    transport: T,
    master_rank: Rank,
    state: WorkerState,
    completed: usize,
}

impl<T: Transport> Worker<T> {
    pub fn new(transport: T, master_rank: Rank) -> Self {
        return Self {
            transport,
            master_rank,
            state: WorkerState::AwaitingTask,
            completed: 0,
        };
    }

    pub fn state(self: &Self) -> WorkerState {
        return self.state;
    }

    /// Serves tasks until the end signal arrives and returns how many were
    /// computed.
    pub fn run(self: &mut Self) -> Result<usize> {
        while self.state == WorkerState::AwaitingTask {
            self.state = self.step()?;
        }

        debug!(
            "worker {} terminated after {} tasks",
            self.transport.rank(),
            self.completed
        );

        return Ok(self.completed);
    }

    /// Handles exactly one message from the coordinator.
    pub fn step(self: &mut Self) -> Result<WorkerState> {
        match self.transport.probe(self.master_rank)? {
            Tag::End => {
                self.transport.receive(self.master_rank)?;

                return Ok(WorkerState::Terminated);
            }
            Tag::Task => {
                let message = self.transport.receive(self.master_rank)?;
                let (state, consumed) = wire::decode_state(&message.payload)?;

                if consumed != message.payload.len() {
                    return Err(Error::ProtocolViolation(format!(
                        "task payload has {} trailing bytes",
                        message.payload.len() - consumed
                    )));
                }

                let utility = compute_utility(&state);
                trace!(
                    "worker {} computed {} for column {}",
                    self.transport.rank(),
                    utility,
                    state.last_move_column
                );

                self.transport.send(
                    self.master_rank,
                    Tag::Utility,
                    &wire::encode_utility(utility),
                )?;
                self.completed += 1;

                return Ok(WorkerState::AwaitingTask);
            }
            Tag::Utility => {
                return Err(Error::ProtocolViolation(
                    "worker received a utility message".to_string(),
                ));
            }
        }
    }
}
