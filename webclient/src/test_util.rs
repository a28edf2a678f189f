use web_sys::{Document, Element, Event, EventInit};

use crate::dom;

/// Markup mounted into the test page, removed again when dropped.
pub struct Fixture {
    pub document: Document,
    pub root: Element,
}

impl Fixture {
    pub fn new(html: &str) -> Fixture {
        let document = dom::document().unwrap();
        let root = document.create_element("div").unwrap();
        root.set_inner_html(html);
        document.body().unwrap().append_child(&root).unwrap();

        Fixture { document, root }
    }

    pub fn by_id(&self, id: &str) -> Element {
        dom::by_id(&self.document, id).unwrap_or_else(|| panic!("no #{} in fixture", id))
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        self.root.remove();
    }
}

pub fn dispatch(target: &Element, kind: &str) -> Event {
    let init = EventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);

    let event = Event::new_with_event_init_dict(kind, &init).unwrap();
    target.dispatch_event(&event).unwrap();
    event
}

pub fn data_ids(list: &Element) -> Vec<String> {
    dom::query_all_in(list, ".queue-item")
        .iter()
        .filter_map(|x| x.get_attribute("data-id"))
        .collect()
}

pub fn is_visible(element: &Element) -> bool {
    !element.class_list().contains(dom::HIDDEN)
}
