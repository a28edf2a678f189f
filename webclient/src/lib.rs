use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use log::Level;
use wasm_bindgen::prelude::*;
use web_sys::Document;

pub mod csrf;
pub mod dom;
pub mod drag;
pub mod error;
pub mod page;
pub mod playlist;
pub mod poller;
pub mod render;
#[cfg(all(test, target_arch = "wasm32"))]
mod test_util;

use drag::{DragReorderController, FormReorderSink, ReorderSink};
use page::PageConfig;
use playlist::PlaylistSelection;
use poller::{HttpSnapshotSource, QueuePoller};

#[cfg(all(test, target_arch = "wasm32"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

thread_local! {
    // Lives as long as the page.
    static POLLER: RefCell<Option<Rc<QueuePoller>>> = RefCell::new(None);
}

fn alert(message: &str) {
    match dom::window() {
        Ok(window) => {
            if let Err(e) = window.alert_with_message(message) {
                log::error!("Could not show alert: {:?}", e);
            }
        }
        Err(e) => log::error!("{}", e),
    }
}

fn init(document: &Document) {
    let page = PageConfig::from_document(document);
    let sink: Rc<dyn ReorderSink> = Rc::new(FormReorderSink::new(page.clone()));

    let drag = DragReorderController::attach(document, sink.clone());

    if let Some(selection) = PlaylistSelection::attach(document, Rc::new(alert)) {
        selection.forget();
    }

    match page {
        Some(page) => {
            log::debug!("Dashboard for guild {} channel {}", page.guild_id, page.channel_id);
            let poller = QueuePoller::new(Rc::new(HttpSnapshotSource::new(page)), sink);
            poller.adopt(drag);
            poller.start(document);
            POLLER.with(|x| *x.borrow_mut() = Some(poller));
        }
        None => {
            if let Some(drag) = drag {
                drag.forget();
            }
        }
    }

    if let Some(listener) = page::bind_search_shortcut(document) {
        listener.forget();
    }

    for listener in page::bind_post_links(document) {
        listener.forget();
    }
}

#[cfg_attr(not(test), wasm_bindgen(start))]
pub fn start() {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        Level::Debug
    } else {
        Level::Info
    };
    if console_log::init_with_level(level).is_err() {
        web_sys::console::warn_1(&"Logger was already initialised".into());
    }

    let document = match dom::document() {
        Ok(document) => document,
        Err(e) => {
            log::error!("Dashboard not started: {}", e);
            return;
        }
    };

    if document.ready_state() == "loading" {
        let target = document.clone();
        EventListener::once(&target, "DOMContentLoaded", move |_| init(&document)).forget();
    } else {
        init(&document);
    }
}
