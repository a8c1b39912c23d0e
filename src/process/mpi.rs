use super::tag::Tag;
use super::transport::{Message, Rank, Transport};
use crate::error::{Error, Result};
use mpi::{topology::SystemCommunicator, traits::*};

/// Transport over the MPI world communicator. MPI aborts the job on a failed
/// primitive, so only rank validation surfaces as an error here.
pub struct MpiTransport {
    world: SystemCommunicator,
}

impl MpiTransport {
    pub fn new(world: SystemCommunicator) -> Self {
        return Self { world };
    }

    fn peer(self: &Self, rank: Rank) -> Result<i32> {
        if rank >= self.size() {
            return Err(Error::Transport(format!(
                "rank {} is outside of a world of size {}",
                rank,
                self.size()
            )));
        }

        return Ok(rank as i32);
    }
}

impl Transport for MpiTransport {
    fn rank(&self) -> Rank {
        return self.world.rank() as Rank;
    }

    fn size(&self) -> usize {
        return self.world.size() as usize;
    }

    fn send(&mut self, dest: Rank, tag: Tag, payload: &[u8]) -> Result<()> {
        let dest = self.peer(dest)?;

        self.world
            .process_at_rank(dest)
            .send_with_tag(payload, tag as i32);

        return Ok(());
    }

    fn probe(&mut self, source: Rank) -> Result<Tag> {
        let source = self.peer(source)?;
        let status = self.world.process_at_rank(source).probe();

        return Tag::try_from(status.tag());
    }

    fn receive(&mut self, source: Rank) -> Result<Message> {
        let source = self.peer(source)?;
        let (payload, status) = self.world.process_at_rank(source).receive_vec::<u8>();

        return Ok(Message::new(Tag::try_from(status.tag())?, payload));
    }
}
