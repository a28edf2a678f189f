use thiserror::Error;

use crate::routes;

pub const CSRF_FIELD: &str = "csrf_token";
pub const VIDEO_IDS_FIELD: &str = "video_ids";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Please select at least one video to add to the queue.")]
    EmptySelection,
}

/// Request to move a queue entry, sent once per successful drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderRequest {
    pub channel_id: String,
    pub old_index: usize,
    pub new_index: usize,
}

impl ReorderRequest {
    pub fn into_form(self, guild_id: &str, csrf_token: &str) -> CsrfForm {
        CsrfForm::new(routes::reorder_url(guild_id), csrf_token)
            .field("channel_id", self.channel_id)
            .field("old_index", self.old_index.to_string())
            .field("new_index", self.new_index.to_string())
    }
}

/// A POST form that always carries exactly one CSRF token field, first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfForm {
    pub action: String,
    fields: Vec<(String, String)>,
}

impl CsrfForm {
    pub fn new(action: impl Into<String>, csrf_token: &str) -> CsrfForm {
        CsrfForm {
            action: action.into(),
            fields: vec![(CSRF_FIELD.to_string(), csrf_token.to_string())],
        }
    }

    /// Adds a field. A caller-supplied token field is ignored.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> CsrfForm {
        let name = name.into();
        if name != CSRF_FIELD {
            self.fields.push((name, value.into()));
        }
        self
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

/// Converts a `data-*` attribute name to the key the browser exposes in
/// `dataset`, e.g. `data-video-id` becomes `videoId`.
pub fn dataset_key(attribute: &str) -> Option<String> {
    let rest = attribute.strip_prefix("data-")?;
    if rest.is_empty() {
        return None;
    }

    let mut key = String::with_capacity(rest.len());
    let mut upper_next = false;
    for c in rest.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next && c.is_ascii_lowercase() {
            key.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            if upper_next {
                key.push('-');
                upper_next = false;
            }
            key.push(c);
        }
    }
    if upper_next {
        key.push('-');
    }

    Some(key)
}

/// Fields for a POST link: every data attribute except `data-method`.
pub fn post_link_fields<'a, I>(attributes: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    attributes
        .into_iter()
        .filter_map(|(name, value)| dataset_key(name).map(|key| (key, value.to_string())))
        .filter(|(key, _)| key != "method")
        .collect()
}

pub fn validate_selection(selected: usize) -> Result<usize, FormError> {
    if selected == 0 {
        Err(FormError::EmptySelection)
    } else {
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reorder_form() {
        let form = ReorderRequest {
            channel_id: "42".into(),
            old_index: 3,
            new_index: 0,
        }
        .into_form("7", "tok");

        assert_eq!(form.action, "/server/7/queue/reorder");
        assert_eq!(
            form.fields(),
            &[
                ("csrf_token".to_string(), "tok".to_string()),
                ("channel_id".to_string(), "42".to_string()),
                ("old_index".to_string(), "3".to_string()),
                ("new_index".to_string(), "0".to_string()),
            ]
        );
    }

    #[test]
    fn test_token_field_not_duplicated() {
        let form = CsrfForm::new("/x", "real").field("csrf_token", "forged");

        assert_eq!(
            form.fields()
                .iter()
                .filter(|(name, _)| name == CSRF_FIELD)
                .map(|(_, value)| value.as_str())
                .collect::<Vec<_>>(),
            vec!["real"]
        );
    }

    #[test]
    fn test_dataset_key() {
        assert_eq!(dataset_key("data-video-id"), Some("videoId".to_string()));
        assert_eq!(dataset_key("data-method"), Some("method".to_string()));
        assert_eq!(dataset_key("data-channel-id"), Some("channelId".to_string()));
        assert_eq!(dataset_key("data-a-1"), Some("a-1".to_string()));
        assert_eq!(dataset_key("href"), None);
        assert_eq!(dataset_key("data-"), None);
    }

    #[test]
    fn test_post_link_fields() {
        let fields = post_link_fields(vec![
            ("href", "/server/1/leave"),
            ("data-method", "post"),
            ("data-channel-id", "9"),
            ("class", "btn"),
        ]);

        assert_eq!(fields, vec![("channelId".to_string(), "9".to_string())]);
    }

    #[test]
    fn test_validate_selection() {
        assert_eq!(validate_selection(0), Err(FormError::EmptySelection));
        assert_eq!(validate_selection(2), Ok(2));
        assert_eq!(
            FormError::EmptySelection.to_string(),
            "Please select at least one video to add to the queue."
        );
    }
}
