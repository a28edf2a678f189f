use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent};

use shared::form::post_link_fields;

use crate::{csrf, dom};

pub const SEARCH_FIELD_ID: &str = "searchQuery";
pub const POST_LINK_SELECTOR: &str = r#"a[data-method="post"]"#;

/// Identifiers the server renders into the dashboard container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageConfig {
    pub guild_id: String,
    pub channel_id: String,
}

impl PageConfig {
    pub fn from_document(document: &Document) -> Option<PageConfig> {
        let guild_id = data_attribute(document, "data-guild-id")?;
        let channel_id = data_attribute(document, "data-channel-id")?;

        Some(PageConfig {
            guild_id,
            channel_id,
        })
    }
}

fn data_attribute(document: &Document, name: &str) -> Option<String> {
    dom::query(document, &format!(".container-fluid[{}]", name))
        .or_else(|| dom::query(document, &format!("[{}]", name)))
        .and_then(|x| x.get_attribute(name))
        .filter(|x| !x.is_empty())
}

/// Ctrl+/ (Cmd+/ on macOS) focuses the search field.
pub fn bind_search_shortcut(document: &Document) -> Option<EventListener> {
    let field: HtmlElement = dom::by_id(document, SEARCH_FIELD_ID)?.dyn_into().ok()?;

    Some(EventListener::new_with_options(
        document,
        "keydown",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let event = match event.dyn_ref::<KeyboardEvent>() {
                Some(event) => event,
                None => return,
            };

            if (event.ctrl_key() || event.meta_key()) && event.key() == "/" {
                event.prevent_default();
                if let Err(e) = field.focus() {
                    log::debug!("Could not focus search field: {:?}", e);
                }
            }
        },
    ))
}

/// Turns every `a[data-method="post"]` into a CSRF-protected form POST.
pub fn bind_post_links(document: &Document) -> Vec<EventListener> {
    dom::query_all(document, POST_LINK_SELECTOR)
        .into_iter()
        .map(|link| {
            let target = link.clone();
            EventListener::new_with_options(
                &target,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    if let Err(e) = submit_post_link(&link) {
                        log::error!("Could not submit POST link: {}", e);
                    }
                },
            )
        })
        .collect()
}

fn submit_post_link(link: &Element) -> crate::error::Result<()> {
    let document = dom::document()?;
    let action = link.get_attribute("href").unwrap_or_default();
    let attributes = attribute_pairs(link);
    let fields = post_link_fields(attributes.iter().map(|(n, v)| (n.as_str(), v.as_str())));

    csrf::post(&document, &action, fields)
}

fn attribute_pairs(element: &Element) -> Vec<(String, String)> {
    element
        .get_attribute_names()
        .iter()
        .filter_map(|name| name.as_string())
        .filter_map(|name| {
            let value = element.get_attribute(&name)?;
            Some((name, value))
        })
        .collect()
}
