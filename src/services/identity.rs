//! Reviewer identity and page links.
//!
//! The acting user is carried in the `id` query parameter of the page
//! location. Nothing here touches the network.

/// Query parameter holding the acting user's id.
pub const USER_ID_PARAM: &str = "id";

/// Pages that carry the acting user's id in their links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Profile,
    Feed,
    Matches,
}

impl Page {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Profile => "profile.html",
            Self::Feed => "feed.html",
            Self::Matches => "matches.html",
        }
    }
}

/// Extract the acting user's id from a page location.
///
/// Accepts a full URL, a relative page path, or a bare query string.
/// Returns `None` when the parameter is missing or empty; callers skip any
/// work that needs a reviewer instead of failing.
pub fn current_user_id(location: &str) -> Option<String> {
    query_param(location, USER_ID_PARAM).filter(|id| !id.is_empty())
}

/// First value of `name` in the query part of `location`, decoded.
fn query_param(location: &str, name: &str) -> Option<String> {
    let without_fragment = location.split('#').next().unwrap_or("");
    let query = match without_fragment.split_once('?') {
        Some((_, query)) => query,
        // A bare query string like `id=u1`
        None if without_fragment.contains('=') => without_fragment,
        None => return None,
    };

    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| decode_component(key) == name)
        .map(|(_, value)| decode_component(value))
}

/// Decode a form-encoded query component (`+` is a space).
fn decode_component(component: &str) -> String {
    let spaced = component.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Link to `page` for the acting user; the bare page when there is none.
pub fn page_link(page: Page, user_id: Option<&str>) -> String {
    match user_id {
        Some(id) if !id.is_empty() => {
            format!("{}?{}={}", page.path(), USER_ID_PARAM, urlencoding::encode(id))
        }
        _ => page.path().to_string(),
    }
}
