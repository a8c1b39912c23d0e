use super::{
    assignment::Assignment,
    tag::Tag,
    task::Task,
    transport::{Rank, Transport},
};
use crate::{
    config::SearchConfig,
    error::{Error, Result},
    node::{node::TreeNode, state::GameState, utility::compute_utility},
    wire,
};

use log::{debug, info};
use serde::Serialize;
use std::collections::VecDeque;

/// The coordinator's answer: `column` is 1-indexed, `utility` belongs to the
/// root position and `move_utility` to the chosen child.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    pub column: usize,
    pub utility: f64,
    pub move_utility: f64,
}

pub struct Master<T: Transport> {
    transport: T,
    config: SearchConfig,
}

impl<T: Transport> Master<T> {
    pub fn new(transport: T, config: SearchConfig) -> Self {
        return Self { transport, config };
    }

    pub fn run(self: &mut Self, initial: GameState) -> Result<Decision> {
        let mut root: TreeNode = TreeNode::new(initial);
        root.build_scheduling_tree(self.config.scheduling_depth, self.config.max_depth);

        let mut tasks: VecDeque<Task> = root.collect_tasks().into();

        info!(
            "scheduling tree of depth {} has {} leaves and {} open tasks for {} workers",
            self.config.scheduling_depth,
            root.frontier_len(),
            tasks.len(),
            self.workers().len()
        );

        self.distribute(&mut root, &mut tasks)?;
        self.notify_finished()?;

        root.merge_utilities();

        let Some(best) = root.best_child() else {
            return Err(Error::NoLegalMove);
        };

        info!(
            "{}",
            root.children
                .iter()
                .map(|child| format!("{}: {:.4}", child.state.last_move_column + 1, child.state.utility))
                .collect::<Vec<String>>()
                .join(", ")
        );

        return Ok(Decision {
            column: best.state.last_move_column as usize + 1,
            utility: root.state.utility,
            move_utility: best.state.utility,
        });
    }

    fn workers(self: &Self) -> Vec<Rank> {
        let own_rank = self.transport.rank();

        return (0..self.transport.size())
            .filter(|rank| *rank != own_rank)
            .collect();
    }

    /// Feeds one task to every worker, computes one locally, then waits for
    /// each dispatched worker before starting the next round.
    fn distribute(self: &mut Self, root: &mut TreeNode, tasks: &mut VecDeque<Task>) -> Result<()> {
        let workers = self.workers();
        let mut round: usize = 0;

        while !tasks.is_empty() {
            let mut assignments: Vec<Assignment> = vec![];

            for worker in workers.iter() {
                let Some(task) = tasks.pop_front() else {
                    break;
                };

                self.transport
                    .send(*worker, Tag::Task, &wire::encode_state(&task.state))?;
                assignments.push(Assignment::new(*worker, task.path));
            }

            let local = tasks.pop_front();
            if let Some(task) = local.as_ref() {
                let utility = compute_utility(&task.state);
                set_utility(root, &task.path, utility)?;
            }

            debug!(
                "round {}: {} tasks dispatched, {} computed locally, {} remaining",
                round,
                assignments.len(),
                local.map_or(0, |_| 1),
                tasks.len()
            );

            for assignment in assignments {
                let message = self.transport.receive(assignment.worker)?;

                if message.tag != Tag::Utility {
                    return Err(Error::ProtocolViolation(format!(
                        "expected a utility from rank {}, got {:?}",
                        assignment.worker, message.tag
                    )));
                }

                let utility = wire::decode_utility(&message.payload)?;
                debug!("rank {} returned {}", assignment.worker, utility);

                set_utility(root, &assignment.path, utility)?;
            }

            round += 1;
        }

        return Ok(());
    }

    fn notify_finished(self: &mut Self) -> Result<()> {
        for worker in self.workers() {
            self.transport.send(worker, Tag::End, &[])?;
        }

        return Ok(());
    }
}

fn set_utility(root: &mut TreeNode, path: &[usize], utility: f64) -> Result<()> {
    let Some(node) = root.node_at_mut(path) else {
        return Err(Error::ProtocolViolation(format!(
            "no scheduling tree node at {:?}",
            path
        )));
    };

    node.state.utility = utility;

    return Ok(());
}
