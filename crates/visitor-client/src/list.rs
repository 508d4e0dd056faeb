use chrono::Local;

use visitor_types::models::Message;

use crate::cache::{MessagesKey, QueryCache, QueryStatus};

pub const LOADING: &str = "Loading messages...";
pub const LOAD_FAILED: &str = "Error loading messages";
pub const EMPTY: &str = "No messages yet. Be the first to leave a message!";

/// The three mutually exclusive things the list can show; `Empty` is the
/// success state with nothing in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Loading,
    Error,
    Empty,
    Messages(Vec<Message>),
}

pub fn view(cache: &QueryCache) -> ListView {
    match cache.status::<MessagesKey>() {
        QueryStatus::Loading => ListView::Loading,
        QueryStatus::Error(_) => ListView::Error,
        QueryStatus::Ready(messages) if messages.is_empty() => ListView::Empty,
        QueryStatus::Ready(messages) => ListView::Messages(messages),
    }
}

pub fn render(view: &ListView) -> String {
    match view {
        ListView::Loading => LOADING.to_string(),
        ListView::Error => LOAD_FAILED.to_string(),
        ListView::Empty => format!("Recent Messages\n\n{}", EMPTY),
        ListView::Messages(messages) => {
            let items: Vec<String> = messages.iter().map(render_item).collect();
            format!("Recent Messages\n\n{}", items.join("\n\n"))
        }
    }
}

fn render_item(message: &Message) -> String {
    let local = message.timestamp.with_timezone(&Local);
    format!(
        "{}  [{}]\n  {}",
        message.name,
        local.format("%Y-%m-%d %H:%M:%S"),
        message.content
    )
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::cache::QueryKey;

    #[test]
    fn view_follows_query_status() {
        let cache = QueryCache::new();
        assert_eq!(view(&cache), ListView::Loading);

        let ticket = cache.begin_fetch::<MessagesKey>();
        assert!(cache.finish_fetch(ticket, Err("offline".into())));
        assert_eq!(view(&cache), ListView::Error);

        let ticket = cache.begin_fetch::<MessagesKey>();
        assert!(cache.finish_fetch(ticket, Ok(vec![])));
        assert_eq!(view(&cache), ListView::Empty);
    }

    #[test]
    fn renders_each_state() {
        assert_eq!(render(&ListView::Loading), LOADING);
        assert_eq!(render(&ListView::Error), LOAD_FAILED);
        assert!(render(&ListView::Empty).ends_with(EMPTY));
    }

    #[test]
    fn renders_messages_in_cache_order() {
        let cache = QueryCache::new();
        let older = Message {
            id: 1,
            name: "Alice".into(),
            content: "first".into(),
            timestamp: Utc::now(),
        };
        let newer = Message {
            id: 2,
            name: "Bob".into(),
            content: "second".into(),
            timestamp: Utc::now(),
        };
        cache.set::<MessagesKey>(vec![newer, older]);

        let text = render(&view(&cache));

        let bob = text.find("Bob").unwrap();
        let alice = text.find("Alice").unwrap();
        assert!(bob < alice);
        assert!(text.contains("  second"));
        assert_eq!(MessagesKey::NAME, "messages");
    }
}
