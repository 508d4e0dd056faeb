use std::future::Future;
use std::sync::Arc;

use tracing::{debug, warn};

use visitor_types::api::{CreateMessageRequest, Message, VisitorCount};

use crate::cache::{MessagesKey, QueryCache, QueryKey, VisitorCountKey};
use crate::client::ApiClient;
use crate::error::ClientError;

/// A server write and the cache patch that follows a successful response.
pub trait Mutation {
    type Key: QueryKey;
    type Output: Clone;

    /// Fold the response into the current entry.
    fn patch(
        output: Self::Output,
        current: Option<<Self::Key as QueryKey>::Value>,
    ) -> <Self::Key as QueryKey>::Value;
}

/// Overwrites `visitorCount` with the post-increment value.
pub struct IncrementVisitorCount;

impl Mutation for IncrementVisitorCount {
    type Key = VisitorCountKey;
    type Output = VisitorCount;

    fn patch(output: VisitorCount, _current: Option<VisitorCount>) -> VisitorCount {
        output
    }
}

/// Prepends the created message to `messages`; it is always the newest.
pub struct CreateMessage;

impl Mutation for CreateMessage {
    type Key = MessagesKey;
    type Output = Message;

    fn patch(output: Message, current: Option<Vec<Message>>) -> Vec<Message> {
        let mut messages = current.unwrap_or_default();
        messages.insert(0, output);
        messages
    }
}

/// Queries and mutations bound to a shared cache.
#[derive(Clone)]
pub struct VisitorBook {
    api: ApiClient,
    cache: Arc<QueryCache>,
}

impl VisitorBook {
    pub fn new(api: ApiClient) -> Self {
        Self::with_cache(api, Arc::new(QueryCache::new()))
    }

    pub fn with_cache(api: ApiClient, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    // -- Queries --

    pub async fn fetch_visitor_count(&self) -> Result<VisitorCount, ClientError> {
        self.query::<VisitorCountKey, _>(self.api.visitor_count()).await
    }

    pub async fn fetch_messages(&self) -> Result<Vec<Message>, ClientError> {
        self.query::<MessagesKey, _>(self.api.messages()).await
    }

    // -- Mutations --

    pub async fn increment_visitor_count(&self) -> Result<VisitorCount, ClientError> {
        self.mutate::<IncrementVisitorCount, _>(self.api.increment_visitor_count())
            .await
    }

    pub async fn create_message(&self, req: &CreateMessageRequest) -> Result<Message, ClientError> {
        self.mutate::<CreateMessage, _>(self.api.create_message(req)).await
    }

    async fn query<K, F>(&self, call: F) -> Result<K::Value, ClientError>
    where
        K: QueryKey,
        F: Future<Output = Result<K::Value, ClientError>>,
    {
        let ticket = self.cache.begin_fetch::<K>();
        let result = call.await;

        let settled = match &result {
            Ok(value) => self.cache.finish_fetch(ticket, Ok(value.clone())),
            Err(e) => {
                warn!("Query {} failed: {}", K::NAME, e);
                self.cache.finish_fetch(ticket, Err(e.to_string()))
            }
        };
        if !settled {
            debug!("Discarded superseded {} result", K::NAME);
        }

        result
    }

    async fn mutate<M, F>(&self, call: F) -> Result<M::Output, ClientError>
    where
        M: Mutation,
        F: Future<Output = Result<M::Output, ClientError>>,
    {
        let output = call.await?;

        let patch = output.clone();
        self.cache.update::<M::Key>(move |current| M::patch(patch, current));
        debug!("Patched {} from mutation response", <M::Key as QueryKey>::NAME);

        Ok(output)
    }
}
