use super::cache::{EntrySnapshot, Subscription};
use super::key::{QueryData, QueryKey};
use super::{fetch_query, invalidate_notes, QueryClient};
use crate::api::ApiError;
use crate::models::{NewNote, Note};
use crate::state::AppContext;
use leptos::logging::{error, log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

/// Context handle for the application's [`QueryClient`].
///
/// The client is `Rc`-based, so it lives in local arena storage; the handle
/// itself is `Copy` and can be captured by view closures.
#[derive(Clone, Copy)]
pub(crate) struct QueryClientContext(StoredValue<QueryClient, LocalStorage>);

impl QueryClientContext {
    pub fn new(client: QueryClient) -> Self {
        Self(StoredValue::new_local(client))
    }

    pub fn client(&self) -> QueryClient {
        self.0.get_value()
    }
}

pub(crate) fn provide_query_client(client: QueryClient) {
    provide_context(QueryClientContext::new(client));
}

pub(crate) fn use_query_client() -> QueryClientContext {
    expect_context::<QueryClientContext>()
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct QueryOptions {
    /// Keep showing the previous key's data until the new key resolves.
    pub keep_previous_data: bool,
}

/// Where a query stands, as far as rendering is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum QueryPhase {
    /// Nothing to show yet and a result is still coming.
    Loading,
    /// The last settled fetch failed.
    Failed,
    Ready,
    /// Settled with neither data nor error.
    Missing,
}

pub(crate) fn query_phase(has_data: bool, has_error: bool, settled: bool) -> QueryPhase {
    if has_error {
        QueryPhase::Failed
    } else if has_data {
        QueryPhase::Ready
    } else if settled {
        QueryPhase::Missing
    } else {
        QueryPhase::Loading
    }
}

/// Whether the hook should start a request for the entry it just observed.
/// Fresh data is reused on key changes; an invalidated entry is refetched.
pub(crate) fn needs_fetch<V, E>(snapshot: Option<&EntrySnapshot<V, E>>, key_changed: bool) -> bool {
    match snapshot {
        None => true,
        Some(s) if s.is_fetching() => false,
        Some(s) if key_changed => !s.is_fresh(),
        Some(s) => s.stale,
    }
}

/// Reactive view of one query, as seen by a component.
pub(crate) struct QueryState<V: Send + Sync + 'static> {
    pub data: RwSignal<Option<V>>,
    pub error: RwSignal<Option<ApiError>>,
    pub is_fetching: RwSignal<bool>,
    pub is_placeholder: RwSignal<bool>,
    /// The entry exists, is not fetching and no fetch is about to start.
    pub settled: RwSignal<bool>,
}

impl<V: Send + Sync + 'static> Clone for QueryState<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V: Send + Sync + 'static> Copy for QueryState<V> {}

impl<V: Send + Sync + 'static> QueryState<V> {
    fn new() -> Self {
        Self {
            data: RwSignal::new(None),
            error: RwSignal::new(None),
            is_fetching: RwSignal::new(false),
            is_placeholder: RwSignal::new(false),
            settled: RwSignal::new(false),
        }
    }

    pub fn phase(&self) -> QueryPhase {
        query_phase(
            self.data.with(|d| d.is_some()),
            self.error.with(|e| e.is_some()),
            self.settled.get(),
        )
    }
}

/// What a component should display for its current key.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Displayed<V> {
    pub data: Option<V>,
    pub placeholder: bool,
}

pub(crate) fn resolve_display<V>(
    previous: Option<V>,
    current: Option<V>,
    errored: bool,
    keep_previous: bool,
) -> Displayed<V> {
    match current {
        Some(data) => Displayed {
            data: Some(data),
            placeholder: false,
        },
        None if errored => Displayed {
            data: None,
            placeholder: false,
        },
        None if keep_previous && previous.is_some() => Displayed {
            data: previous,
            placeholder: true,
        },
        None => Displayed {
            data: None,
            placeholder: false,
        },
    }
}

/// Subscribes the calling component to the query addressed by `key`.
///
/// A fetch is started when the key changes to an entry without fresh data,
/// or when the current entry is invalidated. Mounting on fresh data does not
/// fetch. Only the entry for the current key is ever observed, so results
/// for keys the component has moved away from are never displayed.
pub(crate) fn use_query<V>(
    key: impl Fn() -> QueryKey + 'static,
    options: QueryOptions,
) -> QueryState<V>
where
    V: TryFrom<QueryData> + Clone + Send + Sync + 'static,
{
    let ctx = use_query_client();
    let app_state = expect_context::<AppContext>();
    let state = QueryState::<V>::new();
    let version = RwSignal::new(0u64);
    let current: StoredValue<Option<Subscription<QueryData, ApiError>>, LocalStorage> =
        StoredValue::new_local(None);

    on_cleanup(move || {
        let _ = current.try_update_value(|c| *c = None);
    });

    Effect::new(move |_| {
        let key = key();
        version.track();
        let client = ctx.client();

        let key_changed = current.with_value(|c| c.as_ref().map_or(true, |s| s.key() != &key));
        if key_changed {
            let listener = Rc::new(move || {
                let _ = version.try_update(|v| *v = v.wrapping_add(1));
            });
            current.set_value(Some(client.subscribe(&key, listener)));
        }

        let snapshot = client.snapshot(&key);
        let (current_data, errored, fetching) = match &snapshot {
            Some(s) => (
                s.data.clone().and_then(|d| V::try_from(d).ok()),
                s.error.is_some() && s.data.is_none(),
                s.is_fetching(),
            ),
            None => (None, false, false),
        };

        let shown = resolve_display(
            state.data.get_untracked(),
            current_data,
            errored,
            options.keep_previous_data,
        );
        state.data.set(shown.data);
        state.is_placeholder.set(shown.placeholder);
        state
            .error
            .set(snapshot.as_ref().and_then(|s| s.error.clone()));
        state.is_fetching.set(fetching);

        let should_fetch = needs_fetch(snapshot.as_ref(), key_changed);
        state
            .settled
            .set(snapshot.is_some() && !fetching && !should_fetch);
        if should_fetch {
            let api = app_state.0.api_client.get_untracked();
            let fetch_key = key.clone();
            let fut = client.fetch(&key, move || fetch_query(api.clone(), fetch_key.clone()));
            spawn_local(async move {
                if let Err(e) = fut.await {
                    warn!("[query] {:?} failed: {e}", key);
                }
            });
        }
    });

    state
}

/// Starts loading `key` unless fresh data is already cached.
pub(crate) fn prefetch_query(ctx: QueryClientContext, app_state: AppContext, key: QueryKey) {
    let client = ctx.client();
    let api = app_state.0.api_client.get_untracked();
    let fetch_key = key.clone();
    let fut = client.ensure(&key, move || fetch_query(api.clone(), fetch_key.clone()));
    spawn_local(async move {
        if let Err(e) = fut.await {
            warn!("[query] prefetch {:?} failed: {e}", key);
        }
    });
}

/// Note creation mutation. Success invalidates every `notes` query.
#[derive(Clone, Copy)]
pub(crate) struct CreateNoteMutation {
    pub pending: RwSignal<bool>,
    pub error: RwSignal<Option<ApiError>>,
    ctx: QueryClientContext,
    app_state: AppContext,
}

pub(crate) fn use_create_note() -> CreateNoteMutation {
    CreateNoteMutation {
        pending: RwSignal::new(false),
        error: RwSignal::new(None),
        ctx: use_query_client(),
        app_state: expect_context::<AppContext>(),
    }
}

impl CreateNoteMutation {
    /// Sends `note`; returns false when a previous submission is still pending.
    pub fn mutate(&self, note: NewNote, on_success: impl FnOnce(Note) + 'static) -> bool {
        if self.pending.get_untracked() {
            return false;
        }
        self.pending.set(true);
        self.error.set(None);

        let api = self.app_state.0.api_client.get_untracked();
        let client = self.ctx.client();
        let pending = self.pending;
        let error_signal = self.error;

        spawn_local(async move {
            match api.create_note(&note).await {
                Ok(created) => {
                    let stale = invalidate_notes(&client);
                    log!("[notes] created {}; {stale} cached list(s) invalidated", created.id);
                    let _ = pending.try_set(false);
                    on_success(created);
                }
                Err(e) => {
                    error!("[notes] create failed: {e}");
                    let _ = error_signal.try_set(Some(e));
                    let _ = pending.try_set(false);
                }
            }
        });
        true
    }
}
