use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Headers, HtmlFormElement, HtmlInputElement};

use shared::form::{CsrfForm, CSRF_FIELD};
use shared::routes::CSRF_HEADER;

use crate::dom;
use crate::error::{DashboardError, Result};

/// Reads the token from `meta[name="csrf-token"]`. Not cached: the server may
/// rotate it between page renders.
pub fn csrf_token(document: &Document) -> Result<String> {
    dom::query(document, r#"meta[name="csrf-token"]"#)
        .and_then(|meta| meta.get_attribute("content"))
        .ok_or(DashboardError::MissingCsrfToken)
}

pub fn attach_header(document: &Document, headers: &Headers) -> Result<()> {
    headers.set(CSRF_HEADER, &csrf_token(document)?)?;
    Ok(())
}

/// Builds a hidden POST form with `fields` and the current token, then submits
/// it. The page navigates away.
pub fn post<I, K, V>(document: &Document, action: &str, fields: I) -> Result<()>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let form = fields
        .into_iter()
        .fold(CsrfForm::new(action, &csrf_token(document)?), |form, (name, value)| {
            form.field(name, value)
        });

    submit(document, &form)
}

pub fn submit(document: &Document, form: &CsrfForm) -> Result<()> {
    let element = build_form(document, form)?;
    document
        .body()
        .ok_or(DashboardError::MissingElement("body"))?
        .append_child(&element)?;

    log::debug!("Submitting form to {}", form.action);
    element.submit()?;
    Ok(())
}

pub fn build_form(document: &Document, form: &CsrfForm) -> Result<HtmlFormElement> {
    let element: HtmlFormElement = document.create_element("form")?.unchecked_into();
    element.set_method("POST");
    element.set_action(&form.action);
    element.style().set_property("display", "none")?;

    for (name, value) in form.fields() {
        append_hidden(document, &element, name, value)?;
    }

    Ok(element)
}

pub fn append_hidden(
    document: &Document,
    parent: &Element,
    name: &str,
    value: &str,
) -> Result<HtmlInputElement> {
    let input: HtmlInputElement = document.create_element("input")?.unchecked_into();
    input.set_type("hidden");
    input.set_name(name);
    input.set_value(value);
    parent.append_child(&input)?;
    Ok(input)
}

/// Adds the token field to a server-rendered form unless it already has one.
/// Returns whether a field was added.
pub fn ensure_token_field(document: &Document, form: &Element) -> Result<bool> {
    let selector = format!(r#"input[name="{}"]"#, CSRF_FIELD);
    if form.query_selector(&selector)?.is_some() {
        return Ok(false);
    }

    append_hidden(document, form, CSRF_FIELD, &csrf_token(document)?)?;
    Ok(true)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::test_util::Fixture;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_missing_token() {
        let document = dom::document().unwrap();

        assert!(matches!(
            csrf_token(&document),
            Err(DashboardError::MissingCsrfToken)
        ));
    }

    #[wasm_bindgen_test]
    fn test_token_read_from_meta() {
        let fixture = Fixture::new(r#"<meta name="csrf-token" content="abc123">"#);

        assert_eq!(csrf_token(&fixture.document).unwrap(), "abc123");
    }

    #[wasm_bindgen_test]
    fn test_build_form() {
        let fixture = Fixture::new("");
        let form = CsrfForm::new("/server/1/queue/reorder", "tok").field("channel_id", "9");

        let element = build_form(&fixture.document, &form).unwrap();
        let inputs = dom::query_all_in(&element, "input");

        assert_eq!(element.method().to_lowercase(), "post");
        assert!(element.action().ends_with("/server/1/queue/reorder"));
        assert_eq!(
            inputs
                .iter()
                .map(|x| (
                    x.get_attribute("type").unwrap(),
                    x.get_attribute("name").unwrap(),
                    x.clone().unchecked_into::<HtmlInputElement>().value()
                ))
                .collect::<Vec<_>>(),
            vec![
                ("hidden".to_string(), "csrf_token".to_string(), "tok".to_string()),
                ("hidden".to_string(), "channel_id".to_string(), "9".to_string()),
            ]
        );
    }

    #[wasm_bindgen_test]
    fn test_ensure_token_field_once() {
        let fixture = Fixture::new(
            r#"<meta name="csrf-token" content="tok"><form id="plain-form"></form>"#,
        );
        let form = dom::by_id(&fixture.document, "plain-form").unwrap();

        assert!(ensure_token_field(&fixture.document, &form).unwrap());
        assert!(!ensure_token_field(&fixture.document, &form).unwrap());
        assert_eq!(dom::query_all_in(&form, r#"input[name="csrf_token"]"#).len(), 1);
    }

    #[wasm_bindgen_test]
    fn test_attach_header() {
        let fixture = Fixture::new(r#"<meta name="csrf-token" content="tok">"#);
        let headers = Headers::new().unwrap();

        attach_header(&fixture.document, &headers).unwrap();

        assert_eq!(headers.get(CSRF_HEADER).unwrap(), Some("tok".to_string()));
    }
}
