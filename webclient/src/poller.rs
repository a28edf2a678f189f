use std::cell::RefCell;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use gloo::events::EventListener;
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, Request, RequestInit, RequestMode, Response};

use shared::routes;
use shared::QueueSnapshot;

use crate::drag::{DragReorderController, ReorderSink};
use crate::error::{DashboardError, Result};
use crate::page::PageConfig;
use crate::render::QueueBinding;
use crate::{csrf, dom, render};

/// Delay between a control click and the refresh it triggers, giving the bot
/// time to act on the command.
pub const REFRESH_DELAY_MS: u32 = 500;
pub const CONTROL_SELECTOR: &str = ".playback-control, .join-button, #leave-button";

/// Where queue snapshots come from.
pub trait SnapshotSource {
    fn fetch(&self, document: &Document) -> LocalBoxFuture<'static, Result<QueueSnapshot>>;
}

/// Fetches snapshots from the queue poll endpoint of one guild and channel.
#[derive(Debug, Clone)]
pub struct HttpSnapshotSource {
    page: PageConfig,
}

impl HttpSnapshotSource {
    pub fn new(page: PageConfig) -> HttpSnapshotSource {
        HttpSnapshotSource { page }
    }
}

impl SnapshotSource for HttpSnapshotSource {
    fn fetch(&self, document: &Document) -> LocalBoxFuture<'static, Result<QueueSnapshot>> {
        let document = document.clone();
        let page = self.page.clone();
        async move { fetch_snapshot(&document, &page).await }.boxed_local()
    }
}

/// Keeps the dashboard in sync with the bot by fetching queue snapshots.
///
/// Requests are never cancelled or coalesced, so whichever response arrives
/// last is what the page shows.
pub struct QueuePoller {
    source: Rc<dyn SnapshotSource>,
    sink: Rc<dyn ReorderSink>,
    drag: RefCell<Option<DragReorderController>>,
    controls: RefCell<Vec<EventListener>>,
}

impl QueuePoller {
    pub fn new(source: Rc<dyn SnapshotSource>, sink: Rc<dyn ReorderSink>) -> Rc<QueuePoller> {
        Rc::new(QueuePoller {
            source,
            sink,
            drag: RefCell::new(None),
            controls: RefCell::new(vec![]),
        })
    }

    /// Takes ownership of the handlers bound to the server-rendered list so the
    /// next render can replace them.
    pub fn adopt(&self, controller: Option<DragReorderController>) {
        *self.drag.borrow_mut() = controller;
    }

    pub fn start(self: &Rc<Self>, document: &Document) {
        let listeners = dom::query_all(document, CONTROL_SELECTOR)
            .iter()
            .map(|button| {
                let poller = self.clone();
                EventListener::new(button, "click", move |_| {
                    poller.refresh_after(REFRESH_DELAY_MS);
                })
            })
            .collect();
        *self.controls.borrow_mut() = listeners;

        self.refresh();
    }

    pub fn refresh(self: &Rc<Self>) {
        let poller = self.clone();
        spawn_local(async move { poller.poll().await });
    }

    pub fn refresh_after(self: &Rc<Self>, delay_ms: u32) {
        let poller = self.clone();
        spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            poller.poll().await;
        });
    }

    async fn poll(&self) {
        let result = async {
            let document = dom::document()?;
            let snapshot = self.source.fetch(&document).await?;
            self.render(&document, &snapshot)
        }
        .await;

        if let Err(e) = result {
            log::error!("Error refreshing queue: {}", e);
        }
    }

    pub fn render(&self, document: &Document, snapshot: &QueueSnapshot) -> Result<()> {
        match render::render(document, snapshot, self.sink.clone())? {
            QueueBinding::Rebound(controller) => *self.drag.borrow_mut() = controller,
            QueueBinding::Unchanged => log::debug!("Snapshot without queue, keeping list"),
        }
        Ok(())
    }
}

pub async fn fetch_snapshot(document: &Document, page: &PageConfig) -> Result<QueueSnapshot> {
    let url = routes::queue_ajax_url(&page.guild_id, &page.channel_id);

    let init = RequestInit::new();
    init.set_method("GET");
    init.set_mode(RequestMode::SameOrigin);
    let request = Request::new_with_str_and_init(&url, &init)?;
    csrf::attach_header(document, &request.headers())?;

    let response: Response = JsFuture::from(dom::window()?.fetch_with_request(&request))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Err(DashboardError::Status(response.status()));
    }

    let body = JsFuture::from(response.text()?).await?;
    let body = body.as_string().unwrap_or_default();
    log::debug!("Fetched queue snapshot for guild {}", page.guild_id);

    Ok(QueueSnapshot::from_json(&body)?)
}
