pub mod assignment;
pub mod channel;
pub mod local;
pub mod master;
#[cfg(feature = "mpi")]
pub mod mpi;
pub mod tag;
pub mod task;
pub mod transport;
pub mod worker;
