//! Client-side query cache: key-addressed results with single-flight
//! requests, prefix invalidation and stale-response protection, plus the
//! Leptos hooks that bind it to components.

mod cache;
mod hooks;
mod key;

pub(crate) use cache::{DehydratedQuery, DehydratedState, QueryCache, RetryPolicy, SleepFn};
pub(crate) use hooks::{
    prefetch_query, provide_query_client, use_create_note, use_query, use_query_client,
    QueryOptions, QueryPhase,
};
pub(crate) use key::{QueryData, QueryKey};

use crate::api::{ApiClient, ApiResult};
use futures::FutureExt;
use leptos::logging::warn;
use std::rc::Rc;

pub(crate) type QueryClient = QueryCache<QueryData, crate::api::ApiError>;

/// Application client: default retry policy, browser timers for backoff.
pub(crate) fn new_query_client() -> QueryClient {
    let sleep: SleepFn = Rc::new(|d| gloo_timers::future::sleep(d).boxed_local());
    QueryCache::new(RetryPolicy::default(), sleep)
}

/// Resolves a key against the API.
pub(crate) async fn fetch_query(api: ApiClient, key: QueryKey) -> ApiResult<QueryData> {
    match key {
        QueryKey::Notes { page, search, tag } => api
            .fetch_notes(page, &search, &tag)
            .await
            .map(QueryData::from),
        QueryKey::Note { id } => api.fetch_note_by_id(&id).await.map(QueryData::from),
    }
}

/// Marks every cached note list stale; mounted lists refetch.
pub(crate) fn invalidate_notes(client: &QueryClient) -> usize {
    client.invalidate(QueryKey::NOTES)
}

/// Seeds the cache from a prefetching host's JSON. Entries whose data does
/// not match their key are skipped; the rest are stored as fresh.
pub(crate) fn hydrate_from_json(client: &QueryClient, json: &str) -> serde_json::Result<usize> {
    let raw: DehydratedState<serde_json::Value> = serde_json::from_str(json)?;
    let mut queries = Vec::with_capacity(raw.queries.len());
    for q in raw.queries {
        match QueryData::decode(&q.key, q.data) {
            Ok(data) => queries.push(DehydratedQuery { key: q.key, data }),
            Err(e) => warn!("[query] skipping prefetched {:?}: {e}", q.key),
        }
    }
    Ok(client.hydrate(DehydratedState { queries }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::models::{Note, NoteTag, NotesPage};
    use futures::executor::block_on;
    use futures::future::ready;
    use std::cell::Cell;

    fn test_client() -> QueryClient {
        let sleep: SleepFn = Rc::new(|_| ready(()).boxed_local());
        QueryCache::new(RetryPolicy::none(), sleep)
    }

    fn note(id: &str, title: &str) -> Note {
        Note {
            id: id.to_string(),
            title: title.to_string(),
            content: String::new(),
            tag: NoteTag::Todo,
            created_at: "2025-01-01T00:00:00Z".to_string(),
            updated_at: None,
        }
    }

    fn page(notes: Vec<Note>) -> QueryData {
        QueryData::NotesPage(NotesPage {
            notes,
            total_pages: 1,
        })
    }

    #[test]
    fn test_created_note_appears_after_invalidation_refetch() {
        let client = test_client();
        let list_key = QueryKey::notes(1, "", "");
        client.seed(&list_key, page(vec![note("1", "old")]));

        let wakes = Rc::new(Cell::new(0));
        let _sub = {
            let wakes = Rc::clone(&wakes);
            client.subscribe(&list_key, Rc::new(move || wakes.set(wakes.get() + 1)))
        };

        // Details entries are untouched by a list invalidation.
        client.seed(&QueryKey::note("1"), QueryData::Note(note("1", "old")));

        assert_eq!(invalidate_notes(&client), 1);
        assert_eq!(wakes.get(), 1);
        assert!(client.snapshot(&list_key).is_some_and(|s| s.stale));
        assert!(client
            .snapshot(&QueryKey::note("1"))
            .is_some_and(|s| s.is_fresh()));

        let refreshed = page(vec![note("2", "new"), note("1", "old")]);
        let server = refreshed.clone();
        let r = block_on(client.fetch(&list_key, move || {
            ready(Ok::<_, ApiError>(server.clone()))
        }));
        assert!(r.is_ok());

        let data = client.get_data(&list_key).expect("list cached");
        let notes = NotesPage::try_from(data).expect("list data").notes;
        assert_eq!(notes[0].title, "new");
        assert!(client.snapshot(&list_key).is_some_and(|s| s.is_fresh()));
    }

    #[test]
    fn test_hydrate_from_json() {
        let client = test_client();
        let json = r#"{
            "queries": [
                {
                    "key": {"resource": "notes", "page": 1, "search": "", "tag": "Work"},
                    "data": {"notes": [], "totalPages": 2}
                }
            ]
        }"#;
        assert_eq!(hydrate_from_json(&client, json).expect("valid state"), 1);
        let snap = client
            .snapshot(&QueryKey::notes(1, "", "Work"))
            .expect("seeded");
        assert!(snap.is_fresh());
    }

    #[test]
    fn test_hydrate_skips_data_that_does_not_fit_its_key() {
        let client = test_client();
        let json = r#"{
            "queries": [
                {
                    "key": {"resource": "note", "id": "x"},
                    "data": {"id": "x", "title": "abc", "tag": "Hobby", "createdAt": ""}
                },
                {
                    "key": {"resource": "note", "id": "y"},
                    "data": {"id": "y", "title": "abc", "tag": "Todo", "createdAt": ""}
                }
            ]
        }"#;
        assert_eq!(hydrate_from_json(&client, json).expect("valid state"), 1);
        assert!(client.snapshot(&QueryKey::note("x")).is_none());
        let y = client.get_data(&QueryKey::note("y")).expect("seeded");
        assert!(Note::try_from(y).is_ok());
    }

    #[test]
    fn test_hydrate_rejects_malformed_json() {
        let client = test_client();
        assert!(hydrate_from_json(&client, "{\"queries\": 3}").is_err());
    }
}
