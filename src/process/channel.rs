use super::tag::Tag;
use super::transport::{Message, Rank, Transport};
use crate::error::{Error, Result};
use crossbeam_channel::{unbounded, Receiver, Sender};

/// In-process transport: one unbounded channel per ordered pair of ranks.
pub struct ChannelTransport {
    rank: Rank,
    outgoing: Vec<Sender<Message>>,
    incoming: Vec<Receiver<Message>>,
    pending: Vec<Option<Message>>,
}

impl ChannelTransport {
    /// Builds a fully connected set of `size` endpoints, indexed by rank.
    pub fn mesh(size: usize) -> Vec<ChannelTransport> {
        let mut senders: Vec<Vec<Sender<Message>>> = (0..size).map(|_| vec![]).collect();
        let mut receivers: Vec<Vec<Receiver<Message>>> = (0..size).map(|_| vec![]).collect();

        // senders[src][dst] pairs with receivers[dst][src]
        for src in 0..size {
            for dst in 0..size {
                let (tx, rx) = unbounded();
                senders[src].push(tx);
                receivers[dst].push(rx);
            }
        }

        return senders
            .into_iter()
            .zip(receivers)
            .enumerate()
            .map(|(rank, (outgoing, incoming))| ChannelTransport {
                rank,
                outgoing,
                incoming,
                pending: (0..size).map(|_| None).collect(),
            })
            .collect();
    }

    fn check_peer(self: &Self, peer: Rank) -> Result<()> {
        if peer >= self.outgoing.len() {
            return Err(Error::Transport(format!(
                "rank {} is outside of a world of size {}",
                peer,
                self.outgoing.len()
            )));
        }

        return Ok(());
    }

    fn next_message(self: &mut Self, source: Rank) -> Result<Message> {
        self.check_peer(source)?;

        if let Some(message) = self.pending[source].take() {
            return Ok(message);
        }

        return self.incoming[source].recv().map_err(|_| {
            Error::Transport(format!("rank {} disconnected from rank {}", source, self.rank))
        });
    }
}

impl Transport for ChannelTransport {
    fn rank(&self) -> Rank {
        return self.rank;
    }

    fn size(&self) -> usize {
        return self.outgoing.len();
    }

    fn send(&mut self, dest: Rank, tag: Tag, payload: &[u8]) -> Result<()> {
        self.check_peer(dest)?;

        return self.outgoing[dest]
            .send(Message::new(tag, payload.to_vec()))
            .map_err(|_| {
                Error::Transport(format!("rank {} disconnected from rank {}", dest, self.rank))
            });
    }

    fn probe(&mut self, source: Rank) -> Result<Tag> {
        let message = self.next_message(source)?;
        let tag = message.tag;
        self.pending[source] = Some(message);

        return Ok(tag);
    }

    fn receive(&mut self, source: Rank) -> Result<Message> {
        return self.next_message(source);
    }
}
