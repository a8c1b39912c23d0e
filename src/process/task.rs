use crate::node::state::GameState;

/// A frontier state detached from the scheduling tree. `path` holds the child
/// indices leading from the root to the node that receives the result.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub path: Vec<usize>,
    pub state: GameState,
}

impl Task {
    pub fn new(path: Vec<usize>, state: GameState) -> Task {
        return Self { path, state };
    }
}
