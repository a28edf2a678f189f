use std::rc::Rc;

use web_sys::Document;

use shared::render::{last_refreshed_label, DashboardView, QueuePanel, TrackPanel, Visibility};
use shared::{BotStatus, QueueSnapshot};

use crate::dom::{self, by_id, set_visible};
use crate::drag::{DragReorderController, ReorderSink, QUEUE_LIST_ID};
use crate::error::Result;

pub const STATUS_INDICATOR_SELECTOR: &str = ".bot-status-indicator";
pub const CURRENT_TRACK_ID: &str = "current-track";
pub const QUEUE_EMPTY_ID: &str = "queue-empty";
pub const BOT_CONTROLS_ID: &str = "bot-controls";
pub const PAUSE_BUTTON_ID: &str = "pause-button";
pub const RESUME_BUTTON_ID: &str = "resume-button";
pub const LAST_REFRESHED_ID: &str = "last-refreshed";

/// What happened to the queue list during a render.
pub enum QueueBinding {
    /// The list was replaced. The controller, if any, replaces the previous
    /// one: the old queue elements are gone.
    Rebound(Option<DragReorderController>),
    /// The snapshot had no queue, so the list and its handlers were kept.
    Unchanged,
}

/// Projects `snapshot` onto the page and binds drag handlers to the freshly
/// rendered queue items. Elements missing from the page are skipped.
pub fn render(
    document: &Document,
    snapshot: &QueueSnapshot,
    sink: Rc<dyn ReorderSink>,
) -> Result<QueueBinding> {
    let view = DashboardView::from_snapshot(snapshot);

    render_status(document, view.status)?;
    render_track(document, &view.track, view.controls)?;
    let binding = render_queue(document, &view.queue, sink)?;

    if let Some(label) = by_id(document, LAST_REFRESHED_ID) {
        label.set_text_content(Some(&last_refreshed_label(&local_time())));
    }

    Ok(binding)
}

fn render_status(document: &Document, status: BotStatus) -> Result<()> {
    for indicator in dom::query_all(document, STATUS_INDICATOR_SELECTOR) {
        set_visible(&indicator, false)?;
    }
    if let Some(indicator) = by_id(document, status.element_id()) {
        set_visible(&indicator, true)?;
    }
    Ok(())
}

fn render_track(document: &Document, track: &TrackPanel, controls: Visibility) -> Result<()> {
    let panel = match by_id(document, CURRENT_TRACK_ID) {
        Some(panel) => panel,
        None => return Ok(()),
    };
    let bot_controls = by_id(document, BOT_CONTROLS_ID);

    match track {
        TrackPanel::Playing { html, paused } => {
            panel.set_inner_html(html);
            set_visible(&panel, true)?;

            if bot_controls.is_some() {
                let pause = by_id(document, PAUSE_BUTTON_ID);
                let resume = by_id(document, RESUME_BUTTON_ID);
                if let (Some(pause), Some(resume)) = (pause, resume) {
                    set_visible(&pause, !paused)?;
                    set_visible(&resume, *paused)?;
                }
            }
        }
        TrackPanel::Hidden => set_visible(&panel, false)?,
    }

    match (bot_controls, controls) {
        (Some(bot_controls), Visibility::Show) => set_visible(&bot_controls, true),
        (Some(bot_controls), Visibility::Hide) => set_visible(&bot_controls, false),
        _ => Ok(()),
    }
}

fn render_queue(
    document: &Document,
    queue: &QueuePanel,
    sink: Rc<dyn ReorderSink>,
) -> Result<QueueBinding> {
    let list = match by_id(document, QUEUE_LIST_ID) {
        Some(list) => list,
        None => return Ok(QueueBinding::Rebound(None)),
    };
    let empty = by_id(document, QUEUE_EMPTY_ID);

    match queue {
        QueuePanel::Items(html) => {
            list.set_inner_html(html);
            set_visible(&list, true)?;
            if let Some(empty) = empty {
                set_visible(&empty, false)?;
            }
            Ok(QueueBinding::Rebound(Some(DragReorderController::attach_to(
                &list, sink,
            ))))
        }
        QueuePanel::Empty => {
            list.set_inner_html("");
            if let Some(empty) = empty {
                set_visible(&empty, true)?;
            }
            Ok(QueueBinding::Rebound(None))
        }
        QueuePanel::Unchanged => Ok(QueueBinding::Unchanged),
    }
}

fn local_time() -> String {
    js_sys::Date::new_0()
        .to_locale_time_string("default")
        .into()
}
