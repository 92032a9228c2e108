//! Provider views and the selector that mounts them.
//!
//! A view owns the fetch it started: dropping the view (for instance by
//! navigating elsewhere) aborts a request that is still in flight.

use std::{collections::HashMap, sync::Arc};

use tokio::{sync::watch, task::JoinHandle};

use crate::{
    Config,
    model::{Coordinates, NormalizedObservation},
    provider::{ProviderId, WeatherProvider, provider_from_config},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Provider(ProviderId),
}

impl Route {
    /// Accepts a route path (`/tomorrowapi`, `/`) or a provider name.
    pub fn parse(target: &str) -> anyhow::Result<Self> {
        let target = target.trim();
        if target.is_empty() || target == "/" || target.eq_ignore_ascii_case("home") {
            return Ok(Route::Home);
        }

        let name = target.strip_prefix('/').unwrap_or(target);
        ProviderId::try_from(name).map(Route::Provider)
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Provider(id) => id.route(),
        }
    }
}

/// What a provider view currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Ready(NormalizedObservation),
}

/// A mounted provider card.
///
/// Starts in [`ViewState::Loading`]. It moves to [`ViewState::Ready`] once the
/// fetch succeeds; a failed fetch is logged and the view keeps loading.
#[derive(Debug)]
pub struct ProviderView {
    id: ProviderId,
    state: watch::Receiver<ViewState>,
    task: JoinHandle<()>,
}

impl ProviderView {
    /// Spawns the view's single fetch. Must be called within a tokio runtime.
    pub fn mount(provider: Arc<dyn WeatherProvider>, coords: Coordinates) -> Self {
        let id = provider.id();
        let (tx, rx) = watch::channel(ViewState::Loading);

        let task = tokio::spawn(async move {
            match provider.current(&coords).await {
                Ok(observation) => {
                    tx.send_replace(ViewState::Ready(observation));
                }
                Err(err) => {
                    tracing::error!(provider = %id, "{} fetch failed: {err}", id.display_name());
                }
            }
        });

        Self { id, state: rx, task }
    }

    pub fn id(&self) -> ProviderId {
        self.id
    }

    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        matches!(*self.state.borrow(), ViewState::Loading)
    }

    /// Waits for the fetch to end and returns the state it left behind.
    pub async fn settled(&mut self) -> ViewState {
        // The sender is dropped when the task ends, record or not, so this
        // cannot wait forever on a failed fetch.
        let _ = self.state.wait_for(|state| matches!(state, ViewState::Ready(_))).await;
        self.state()
    }
}

impl Drop for ProviderView {
    fn drop(&mut self) {
        if !self.task.is_finished() {
            tracing::debug!(provider = %self.id, "view dropped, aborting in-flight fetch");
        }
        self.task.abort();
    }
}

/// Home index plus at most one active provider view.
#[derive(Debug)]
pub struct ViewSelector {
    providers: HashMap<ProviderId, Arc<dyn WeatherProvider>>,
    coords: Coordinates,
    route: Route,
    active: Option<ProviderView>,
}

impl ViewSelector {
    /// One adapter per provider, each with its key from `config`.
    pub fn from_config(config: &Config, coords: Coordinates) -> Self {
        Self::with_providers(
            ProviderId::all()
                .iter()
                .map(|id| Arc::from(provider_from_config(*id, config))),
            coords,
        )
    }

    pub fn with_providers<I>(providers: I, coords: Coordinates) -> Self
    where
        I: IntoIterator<Item = Arc<dyn WeatherProvider>>,
    {
        let providers = providers.into_iter().map(|p| (p.id(), p)).collect();
        Self {
            providers,
            coords,
            route: Route::Home,
            active: None,
        }
    }

    /// Providers listed on the home view, in display order.
    pub fn entries(&self) -> &'static [ProviderId] {
        ProviderId::all()
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Leaves the current view and mounts the one for `route`.
    ///
    /// Returns `None` for the home route, or when no adapter is registered for
    /// the requested provider.
    pub fn navigate(&mut self, route: Route) -> Option<&mut ProviderView> {
        self.active = None;
        self.route = route;

        if let Route::Provider(id) = route {
            match self.providers.get(&id) {
                Some(provider) => {
                    tracing::debug!(provider = %id, route = route.path(), "mounting view");
                    self.active = Some(ProviderView::mount(Arc::clone(provider), self.coords));
                }
                None => tracing::warn!(provider = %id, "no adapter registered for route"),
            }
        }

        self.active.as_mut()
    }

    pub fn active(&mut self) -> Option<&mut ProviderView> {
        self.active.as_mut()
    }
}
