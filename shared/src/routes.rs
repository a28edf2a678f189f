use url::form_urlencoded;

pub const CSRF_HEADER: &str = "X-CSRF-Token";

pub fn reorder_url(guild_id: &str) -> String {
    format!("/server/{}/queue/reorder", guild_id)
}

pub fn queue_ajax_url(guild_id: &str, channel_id: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("channel_id", channel_id)
        .finish();

    format!("/server/{}/queue/ajax?{}", guild_id, query)
}
