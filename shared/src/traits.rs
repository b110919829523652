//! Interfaces to the collaborators the tracker core does not own.

use std::error::Error;
use std::fmt::Debug;

use async_trait::async_trait;

use crate::events::TrackerEvent;

pub type SnapshotIoError = Box<dyn Error + Send + Sync>;

/// Raw durable storage for the roster snapshot.
///
/// The whole document is read and replaced wholesale; implementations must
/// make `write_all` atomic so a crash never leaves a half-written snapshot.
#[async_trait]
pub trait SnapshotIo: Send + Sync + Debug {
    /// `None` when no snapshot exists yet.
    async fn read_all(&self) -> Result<Option<Vec<u8>>, SnapshotIoError>;

    async fn write_all(&self, bytes: Vec<u8>) -> Result<(), SnapshotIoError>;
}

/// Destination for tracker events.
///
/// Delivery failures are the implementation's problem (log and move on);
/// `notify` never reports them back so a broken sink cannot stall a poll
/// cycle.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn notify(&self, event: &TrackerEvent);
}
