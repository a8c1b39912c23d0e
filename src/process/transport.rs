use super::tag::Tag;
use crate::error::Result;

pub type Rank = usize;

pub const MASTER_RANK: Rank = 0;

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub tag: Tag,
    pub payload: Vec<u8>,
}

impl Message {
    pub fn new(tag: Tag, payload: Vec<u8>) -> Message {
        return Self { tag, payload };
    }
}

/// Point-to-point, blocking message passing between ranks. Receives name the
/// source rank, so replies are matched by sender rather than arrival order.
pub trait Transport {
    fn rank(&self) -> Rank;

    fn size(&self) -> usize;

    fn send(&mut self, dest: Rank, tag: Tag, payload: &[u8]) -> Result<()>;

    /// Blocks until a message from `source` is available and returns its tag
    /// without consuming it.
    fn probe(&mut self, source: Rank) -> Result<Tag>;

    fn receive(&mut self, source: Rank) -> Result<Message>;
}
