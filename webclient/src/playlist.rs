use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlInputElement};

use shared::form::{validate_selection, VIDEO_IDS_FIELD};

use crate::dom;
use crate::{csrf, error::Result};

pub const FORM_ID: &str = "add-multiple-form";
pub const CHECKBOX_SELECTOR: &str = ".video-checkbox";
pub const SELECTED_COUNT_ID: &str = "selected-count";
pub const SUBMIT_BUTTON_ID: &str = "add-selected-button";
pub const SELECT_ALL_ID: &str = "select-all-videos";
pub const DESELECT_ALL_ID: &str = "deselect-all-videos";

/// Shows a message to the user, `window.alert` outside of tests.
pub type Notify = Rc<dyn Fn(&str)>;

/// The multi-select "add videos to queue" form of the playlist page.
pub struct PlaylistSelection {
    _listeners: Vec<EventListener>,
}

impl PlaylistSelection {
    pub fn attach(document: &Document, notify: Notify) -> Option<PlaylistSelection> {
        let form = dom::by_id(document, FORM_ID)?;
        let mut listeners = vec![];

        for checkbox in dom::query_all(document, CHECKBOX_SELECTOR) {
            let document = document.clone();
            let form = form.clone();
            listeners.push(EventListener::new(&checkbox, "change", move |_| {
                resync(&document, &form);
            }));
        }

        for (id, checked) in [(SELECT_ALL_ID, true), (DESELECT_ALL_ID, false)].iter().copied() {
            if let Some(button) = dom::by_id(document, id) {
                let document = document.clone();
                let form = form.clone();
                listeners.push(EventListener::new_with_options(
                    &button,
                    "click",
                    EventListenerOptions::enable_prevent_default(),
                    move |event| {
                        event.prevent_default();
                        for checkbox in checkboxes(&document) {
                            checkbox.set_checked(checked);
                        }
                        resync(&document, &form);
                    },
                ));
            }
        }

        listeners.push(on_submit(document, &form, notify));
        resync(document, &form);

        Some(PlaylistSelection {
            _listeners: listeners,
        })
    }

    pub fn forget(self) {
        for listener in self._listeners {
            listener.forget();
        }
    }
}

fn checkboxes(document: &Document) -> Vec<HtmlInputElement> {
    dom::query_all(document, CHECKBOX_SELECTOR)
        .into_iter()
        .filter_map(|x| x.dyn_into::<HtmlInputElement>().ok())
        .collect()
}

fn selected_ids(document: &Document) -> Vec<String> {
    checkboxes(document)
        .iter()
        .filter(|x| x.checked())
        .filter_map(|x| x.get_attribute("data-video-id"))
        .collect()
}

fn video_inputs(form: &Element) -> Vec<Element> {
    dom::query_all_in(form, &format!(r#"input[name="{}"]"#, VIDEO_IDS_FIELD))
}

fn resync(document: &Document, form: &Element) {
    if let Err(e) = sync_selection(document, form) {
        log::error!("Could not update video selection: {}", e);
    }
}

/// Rebuilds the hidden `video_ids` inputs of the form from the checked boxes.
pub fn sync_selection(document: &Document, form: &Element) -> Result<usize> {
    for input in video_inputs(form) {
        input.remove();
    }

    let ids = selected_ids(document);
    for id in &ids {
        csrf::append_hidden(document, form, VIDEO_IDS_FIELD, id)?;
    }

    if let Some(count) = dom::by_id(document, SELECTED_COUNT_ID) {
        count.set_text_content(Some(&ids.len().to_string()));
    }
    if let Some(button) = dom::by_id(document, SUBMIT_BUTTON_ID)
        .and_then(|x| x.dyn_into::<HtmlButtonElement>().ok())
    {
        button.set_disabled(ids.is_empty());
    }

    Ok(ids.len())
}

fn on_submit(document: &Document, form: &Element, notify: Notify) -> EventListener {
    let document = document.clone();
    let target = form.clone();

    EventListener::new_with_options(
        form,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| match validate_selection(video_inputs(&target).len()) {
            Err(e) => {
                event.prevent_default();
                notify(&e.to_string());
            }
            Ok(count) => {
                if let Err(e) = csrf::ensure_token_field(&document, &target) {
                    event.prevent_default();
                    log::error!("Not submitting video selection: {}", e);
                    return;
                }
                log::info!("Submitting form with {} selected videos", count);
            }
        },
    )
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::test_util::{dispatch, Fixture};
    use std::cell::RefCell;
    use wasm_bindgen_test::*;

    const PAGE: &str = r#"
        <meta name="csrf-token" content="tok">
        <input type="checkbox" class="video-checkbox" data-video-id="v1">
        <input type="checkbox" class="video-checkbox" data-video-id="v2">
        <input type="checkbox" class="video-checkbox" data-video-id="v3">
        <button id="select-all-videos">All</button>
        <button id="deselect-all-videos">None</button>
        <span id="selected-count"></span>
        <form id="add-multiple-form" action="/server/1/playlist/add" method="POST">
            <button id="add-selected-button" type="submit">Add</button>
        </form>
    "#;

    fn setup() -> (Fixture, Rc<RefCell<Vec<String>>>, PlaylistSelection) {
        let fixture = Fixture::new(PAGE);
        let messages = Rc::new(RefCell::new(vec![]));
        let sink = messages.clone();
        let selection = PlaylistSelection::attach(
            &fixture.document,
            Rc::new(move |message: &str| sink.borrow_mut().push(message.to_string())),
        )
        .unwrap();
        (fixture, messages, selection)
    }

    fn check(fixture: &Fixture, index: usize) {
        let checkbox = checkboxes(&fixture.document).remove(index);
        checkbox.set_checked(true);
        dispatch(&checkbox, "change");
    }

    fn field_count(fixture: &Fixture, name: &str) -> usize {
        dom::query_all_in(&fixture.by_id(FORM_ID), &format!(r#"input[name="{}"]"#, name)).len()
    }

    #[wasm_bindgen_test]
    fn test_empty_selection_blocks_submit() {
        let (fixture, messages, _selection) = setup();

        let event = dispatch(&fixture.by_id(FORM_ID), "submit");

        assert!(event.default_prevented());
        assert_eq!(
            *messages.borrow(),
            vec!["Please select at least one video to add to the queue."]
        );
        assert_eq!(field_count(&fixture, "csrf_token"), 0);
        assert!(fixture
            .by_id(SUBMIT_BUTTON_ID)
            .unchecked_into::<HtmlButtonElement>()
            .disabled());
    }

    #[wasm_bindgen_test]
    fn test_selected_submit_adds_token_once() {
        let (fixture, messages, _selection) = setup();
        check(&fixture, 1);

        let form = fixture.by_id(FORM_ID);
        let first = dispatch(&form, "submit");
        let second = dispatch(&form, "submit");

        assert!(!first.default_prevented());
        assert!(!second.default_prevented());
        assert!(messages.borrow().is_empty());
        assert_eq!(field_count(&fixture, "csrf_token"), 1);
        assert_eq!(field_count(&fixture, "video_ids"), 1);
    }

    #[wasm_bindgen_test]
    fn test_selection_tracks_checkboxes() {
        let (fixture, _messages, _selection) = setup();

        check(&fixture, 0);
        check(&fixture, 2);

        let values = dom::query_all_in(&fixture.by_id(FORM_ID), r#"input[name="video_ids"]"#)
            .into_iter()
            .map(|x| x.unchecked_into::<HtmlInputElement>().value())
            .collect::<Vec<_>>();
        assert_eq!(values, vec!["v1", "v3"]);
        assert_eq!(
            fixture.by_id(SELECTED_COUNT_ID).text_content(),
            Some("2".to_string())
        );
    }

    #[wasm_bindgen_test]
    fn test_select_all_and_none() {
        let (fixture, _messages, _selection) = setup();

        dispatch(&fixture.by_id(SELECT_ALL_ID), "click");
        assert_eq!(field_count(&fixture, "video_ids"), 3);

        dispatch(&fixture.by_id(DESELECT_ALL_ID), "click");
        assert_eq!(field_count(&fixture, "video_ids"), 0);
        assert_eq!(
            fixture.by_id(SELECTED_COUNT_ID).text_content(),
            Some("0".to_string())
        );
    }
}
