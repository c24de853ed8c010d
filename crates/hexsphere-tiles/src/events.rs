//! Tile interaction events delivered to any number of subscribers.

use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::tile::TileId;

/// Something that happened to a tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TileEvent {
    /// The tile was clicked.
    Clicked(TileId),
    /// The pointer moved onto the tile.
    PointerEntered(TileId),
    /// The pointer left the tile.
    PointerExited(TileId),
    /// The tile's extrusion changed.
    Extruded {
        /// Edited tile.
        tile: TileId,
        /// Cumulative height after the edit.
        height: f32,
    },
    /// The tile became walkable or blocked.
    NavigabilityChanged {
        /// Edited tile.
        tile: TileId,
        /// New state.
        navigable: bool,
    },
}

impl TileEvent {
    /// The tile this event refers to.
    #[must_use]
    pub fn tile(&self) -> TileId {
        match *self {
            Self::Clicked(tile) | Self::PointerEntered(tile) | Self::PointerExited(tile) => tile,
            Self::Extruded { tile, .. } | Self::NavigabilityChanged { tile, .. } => tile,
        }
    }
}

/// Fan-out of [`TileEvent`]s over channels.
///
/// Each subscriber gets its own unbounded receiver. Subscribers that have
/// dropped their receiver are pruned on the next publish.
#[derive(Debug, Default)]
pub struct TileEventBus {
    subscribers: Vec<Sender<TileEvent>>,
}

impl TileEventBus {
    /// Creates a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber.
    pub fn subscribe(&mut self) -> Receiver<TileEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Sends `event` to every live subscriber. Returns how many received it.
    pub fn publish(&mut self, event: TileEvent) -> usize {
        self.subscribers.retain(|tx| tx.send(event).is_ok());
        self.subscribers.len()
    }

    /// Number of subscribers as of the last publish.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
