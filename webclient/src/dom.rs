use wasm_bindgen::JsCast;
use web_sys::{Document, Element, NodeList, Window};

use crate::error::{DashboardError, Result};

/// Bootstrap utility class that hides an element.
pub const HIDDEN: &str = "d-none";

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(DashboardError::MissingElement("window"))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or(DashboardError::MissingElement("document"))
}

pub fn by_id(document: &Document, id: &str) -> Option<Element> {
    document.get_element_by_id(id)
}

pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    document
        .query_selector_all(selector)
        .map(elements)
        .unwrap_or_default()
}

pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(elements)
        .unwrap_or_default()
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn set_visible(element: &Element, visible: bool) -> Result<()> {
    if visible {
        element.class_list().remove_1(HIDDEN)?;
    } else {
        element.class_list().add_1(HIDDEN)?;
    }
    Ok(())
}
