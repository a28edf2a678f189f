use crate::queue::{BotStatus, CurrentTrack, QueueItem, QueueSnapshot};

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn current_track_html(track: &CurrentTrack) -> String {
    format!(
        r#"<div class="d-flex align-items-center"><div class="me-2"><i class="fas fa-play-circle text-success"></i></div><div><h6 class="mb-0">Now Playing:</h6><p class="mb-0">{}</p></div></div>"#,
        escape_html(&track.title)
    )
}

/// Markup for the whole queue list, with 1-based position badges.
pub fn queue_list_html(items: &[QueueItem]) -> String {
    let mut html = String::new();
    for (index, item) in items.iter().enumerate() {
        html.push_str(&format!(
            r#"<div class="list-group-item bg-dark text-light border-secondary queue-item" data-id="{id}" draggable="true"><div class="d-flex w-100 justify-content-between align-items-start"><div><div class="drag-handle me-2 d-inline-block"><i class="fas fa-grip-vertical text-muted"></i></div><h6 class="mb-1 d-inline-block">{title}</h6></div><span class="badge bg-secondary">{position}</span></div></div>"#,
            id = escape_html(&item.id),
            title = escape_html(&item.title),
            position = index + 1,
        ));
    }
    html
}

pub fn last_refreshed_label(local_time: &str) -> String {
    format!("Last updated: {}", local_time)
}

/// Desired visibility of an element. `Keep` leaves it as it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Show,
    Hide,
    Keep,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackPanel {
    Playing { html: String, paused: bool },
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueuePanel {
    Items(String),
    Empty,
    /// The snapshot carried no queue; the list is left as it is.
    Unchanged,
}

/// Everything the dashboard shows for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub status: BotStatus,
    pub track: TrackPanel,
    pub controls: Visibility,
    pub queue: QueuePanel,
}

impl DashboardView {
    pub fn from_snapshot(snapshot: &QueueSnapshot) -> DashboardView {
        let (track, controls) = match &snapshot.current_track {
            Some(track) => (
                TrackPanel::Playing {
                    html: current_track_html(track),
                    paused: snapshot.is_paused,
                },
                Visibility::Show,
            ),
            None if snapshot.is_connected => (TrackPanel::Hidden, Visibility::Keep),
            None => (TrackPanel::Hidden, Visibility::Hide),
        };

        let queue = match &snapshot.queue {
            None => QueuePanel::Unchanged,
            Some(items) if items.is_empty() => QueuePanel::Empty,
            Some(items) => QueuePanel::Items(queue_list_html(items)),
        };

        DashboardView {
            status: snapshot.status(),
            track,
            controls,
            queue,
        }
    }
}
