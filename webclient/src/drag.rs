use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, DragEvent, Element, Node};

use shared::drag::DragSession;
use shared::form::ReorderRequest;
use shared::{Placement, QueueOrder};

use crate::page::PageConfig;
use crate::{csrf, dom};

pub const QUEUE_LIST_ID: &str = "queue-list";
pub const QUEUE_ITEM_SELECTOR: &str = ".queue-item";

const DRAGGING: &str = "dragging";
const DRAG_OVER: &str = "dragover";

/// Receives the indices of every completed move.
pub trait ReorderSink {
    fn reorder(&self, old_index: usize, new_index: usize);
}

/// Posts each move to the reorder endpoint as a full page form submission.
#[derive(Debug, Clone)]
pub struct FormReorderSink {
    page: Option<PageConfig>,
}

impl FormReorderSink {
    pub fn new(page: Option<PageConfig>) -> FormReorderSink {
        FormReorderSink { page }
    }
}

impl ReorderSink for FormReorderSink {
    fn reorder(&self, old_index: usize, new_index: usize) {
        let page = match &self.page {
            Some(page) => page,
            None => {
                log::debug!("No guild or channel on page, not sending reorder");
                return;
            }
        };

        let request = ReorderRequest {
            channel_id: page.channel_id.clone(),
            old_index,
            new_index,
        };

        let result = dom::document().and_then(|document| {
            let form = request.into_form(&page.guild_id, &csrf::csrf_token(&document)?);
            csrf::submit(&document, &form)
        });

        if let Err(e) = result {
            log::error!("Could not send queue reorder: {}", e);
        }
    }
}

struct DragState {
    list: Element,
    order: QueueOrder<Element>,
    session: DragSession,
}

/// Drag and drop handlers bound to the items of one rendered queue list.
///
/// Dropping the controller unbinds every handler.
pub struct DragReorderController {
    _listeners: Vec<EventListener>,
}

impl DragReorderController {
    pub fn attach(document: &Document, sink: Rc<dyn ReorderSink>) -> Option<DragReorderController> {
        let list = dom::by_id(document, QUEUE_LIST_ID)?;
        Some(DragReorderController::attach_to(&list, sink))
    }

    pub fn attach_to(list: &Element, sink: Rc<dyn ReorderSink>) -> DragReorderController {
        let items = dom::query_all_in(list, QUEUE_ITEM_SELECTOR);
        let state = Rc::new(RefCell::new(DragState {
            list: list.clone(),
            order: QueueOrder::new(items.clone()),
            session: DragSession::new(),
        }));

        let mut listeners = Vec::with_capacity(items.len() * 5);
        for item in &items {
            listeners.push(on_drag_start(item, &state));
            listeners.push(on_drag_end(item, &state));
            listeners.push(on_drag_over(item));
            listeners.push(on_drag_leave(item));
            listeners.push(on_drop(item, &state, &sink));
        }

        log::debug!("Drag and drop attached to {} queue items", items.len());

        DragReorderController {
            _listeners: listeners,
        }
    }

    pub fn forget(self) {
        for listener in self._listeners {
            listener.forget();
        }
    }
}

fn set_class(element: &Element, class: &str, on: bool) {
    let classes = element.class_list();
    let result = if on {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
    if let Err(e) = result {
        log::debug!("Could not toggle {} class: {:?}", class, e);
    }
}

fn on_drag_start(item: &Element, state: &Rc<RefCell<DragState>>) -> EventListener {
    let element = item.clone();
    let state = state.clone();

    EventListener::new(item, "dragstart", move |event| {
        let mut state = state.borrow_mut();
        let index = match state.order.position(|x| x == &element) {
            Some(index) => index,
            None => return,
        };
        let item_id = element.get_attribute("data-id").unwrap_or_default();

        if let Some(transfer) = event.dyn_ref::<DragEvent>().and_then(DragEvent::data_transfer) {
            if let Err(e) = transfer.set_data("text/plain", &item_id) {
                log::debug!("Could not set drag data: {:?}", e);
            }
            transfer.set_effect_allowed("move");
        }

        state.session.start(index, item_id);

        // Styled on the next tick so the drag image is captured unstyled.
        let element = element.clone();
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            set_class(&element, DRAGGING, true);
        });
    })
}

fn on_drag_end(item: &Element, state: &Rc<RefCell<DragState>>) -> EventListener {
    let element = item.clone();
    let state = state.clone();

    EventListener::new(item, "dragend", move |_| {
        set_class(&element, DRAGGING, false);
        state.borrow_mut().session.end();
    })
}

fn on_drag_over(item: &Element) -> EventListener {
    let element = item.clone();

    EventListener::new_with_options(
        item,
        "dragover",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            if let Some(transfer) = event.dyn_ref::<DragEvent>().and_then(DragEvent::data_transfer) {
                transfer.set_drop_effect("move");
            }
            set_class(&element, DRAG_OVER, true);
        },
    )
}

fn on_drag_leave(item: &Element) -> EventListener {
    let element = item.clone();

    EventListener::new(item, "dragleave", move |_| {
        set_class(&element, DRAG_OVER, false);
    })
}

fn on_drop(item: &Element, state: &Rc<RefCell<DragState>>, sink: &Rc<dyn ReorderSink>) -> EventListener {
    let target = item.clone();
    let state = state.clone();
    let sink = sink.clone();

    EventListener::new_with_options(
        item,
        "drop",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            set_class(&target, DRAG_OVER, false);

            let outcome = {
                let mut state = state.borrow_mut();
                let DragState {
                    list,
                    order,
                    session,
                } = &mut *state;

                let target_index = match order.position(|x| x == &target) {
                    Some(index) => index,
                    None => return,
                };
                let outcome = match session.drop_on(order, target_index) {
                    Some(outcome) => outcome,
                    None => return,
                };

                if let Some(dragged) = order.get(outcome.new_index) {
                    let reference: Option<Node> = match outcome.placement {
                        Placement::Before => Some(target.clone().into()),
                        Placement::After => target.next_sibling(),
                    };
                    if let Err(e) = list.insert_before(dragged, reference.as_ref()) {
                        log::error!("Could not move queue item: {:?}", e);
                    }
                }

                outcome
            };

            log::debug!(
                "Queue item {} moved from {} to {}",
                outcome.item_id,
                outcome.old_index,
                outcome.new_index
            );
            sink.reorder(outcome.old_index, outcome.new_index);
        },
    )
}
