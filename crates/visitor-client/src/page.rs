use crate::cache::{QueryCache, VisitorCountKey};
use crate::form::MessageForm;
use crate::list;

pub const TITLE: &str = "VisitorBook Cloud Edition";
pub const TAGLINE: &str = "A DevOps journey from frontend to cloud deployment";

/// "Visitor Count: N", showing 0 until the count is known.
pub fn visitor_badge(cache: &QueryCache) -> String {
    let count = cache.get::<VisitorCountKey>().map(|v| v.count).unwrap_or(0);
    format!("Visitor Count: {}", count)
}

/// Header, badge, and message list as one screen of text.
pub fn render(cache: &QueryCache, form: &MessageForm) -> String {
    format!(
        "{}\n{}\n{}\n\nLeave a Message  [{}]\n\n{}\n",
        TITLE,
        TAGLINE,
        visitor_badge(cache),
        form.submit_label(),
        list::render(&list::view(cache))
    )
}
