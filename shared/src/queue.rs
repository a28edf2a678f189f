use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct QueueItem {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CurrentTrack {
    pub title: String,
}

/// Full playback and queue state as returned by the queue poll endpoint.
///
/// A snapshot replaces whatever the page showed before; nothing is diffed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct QueueSnapshot {
    #[serde(default)]
    pub is_connected: bool,
    #[serde(default)]
    pub is_playing: bool,
    #[serde(default)]
    pub is_paused: bool,
    #[serde(default)]
    pub current_track: Option<CurrentTrack>,
    /// `None` when the server sent no queue; the page keeps its list then.
    #[serde(default)]
    pub queue: Option<Vec<QueueItem>>,
}

impl QueueSnapshot {
    pub fn from_json(body: &str) -> serde_json::Result<QueueSnapshot> {
        serde_json::from_str(body)
    }

    pub fn status(&self) -> BotStatus {
        BotStatus::from_snapshot(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotStatus {
    Playing,
    Paused,
    Connected,
    Disconnected,
}

impl BotStatus {
    pub fn from_snapshot(snapshot: &QueueSnapshot) -> BotStatus {
        match (snapshot.is_connected, snapshot.is_playing, snapshot.is_paused) {
            (false, _, _) => BotStatus::Disconnected,
            (true, true, _) => BotStatus::Playing,
            (true, false, true) => BotStatus::Paused,
            (true, false, false) => BotStatus::Connected,
        }
    }

    /// Id of the indicator element that represents this status.
    pub fn element_id(&self) -> &'static str {
        match self {
            BotStatus::Playing => "status-playing",
            BotStatus::Paused => "status-paused",
            BotStatus::Connected => "status-connected",
            BotStatus::Disconnected => "status-disconnected",
        }
    }
}

/// Where a moved element lands relative to the element it was dropped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
}

/// Ordered list model backing the queue list. The DOM is a projection of it.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueOrder<T> {
    items: Vec<T>,
}

impl<T> QueueOrder<T> {
    pub fn new(items: Vec<T>) -> QueueOrder<T> {
        QueueOrder { items }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn position<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().position(predicate)
    }

    /// Shifts the item at `from` so that it ends up at `to`.
    ///
    /// Returns `None` without touching the order when the indices are equal or
    /// out of range. Otherwise returns where the item goes relative to the
    /// item that was at `to` before the move.
    pub fn move_item(&mut self, from: usize, to: usize) -> Option<Placement> {
        if from == to || from >= self.items.len() || to >= self.items.len() {
            return None;
        }

        let item = self.items.remove(from);
        self.items.insert(to, item);

        if to < from {
            Some(Placement::Before)
        } else {
            Some(Placement::After)
        }
    }
}

#[cfg(test)]
impl<T> QueueOrder<T> {
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}
