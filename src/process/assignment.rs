use super::transport::Rank;

/// Records which tree node a worker is computing during one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub worker: Rank,
    pub path: Vec<usize>,
}

impl Assignment {
    pub fn new(worker: Rank, path: Vec<usize>) -> Assignment {
        return Self { worker, path };
    }
}
