use crate::{
    core::config::PipelineOptions,
    geocoding::{cache::GeocodeCache, resolver::GeocodeResolver, GeoBackend},
    itinerary::Activity,
    placement::placer::ActivityPlacer,
    rendering::{renderer::MapRenderer, scene::MapScene},
};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, MutexGuard,
};

/// What a map view currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    /// Placement for `day` is in flight
    Loading { day: u32 },
    Ready(MapScene),
}

/// The map of one itinerary day, rebuilt whenever the day's activities change.
///
/// Every [`MapView::update`] is tagged with a generation number; a run that
/// finishes after a newer one has started is dropped before it touches the
/// renderer, so it neither overwrites the newer state nor moves the viewport.
pub struct MapView {
    placer: ActivityPlacer,
    renderer: Mutex<MapRenderer>,
    generation: AtomicU64,
    state: Mutex<ViewState>,
}

impl MapView {
    pub fn new(placer: ActivityPlacer, renderer: MapRenderer) -> Self {
        Self {
            placer,
            renderer: Mutex::new(renderer),
            generation: AtomicU64::new(0),
            state: Mutex::new(ViewState::Idle),
        }
    }

    /// Wires a resolver, placer and renderer from `options`
    pub fn from_options(
        backend: Arc<dyn GeoBackend>,
        cache: GeocodeCache,
        options: &PipelineOptions,
    ) -> Self {
        let resolver = GeocodeResolver::new(backend, cache, &options.geocoder);
        let placer = ActivityPlacer::new(resolver, &options.placement);
        Self::new(placer, MapRenderer::new(options.render.clone()))
    }

    pub fn placer(&self) -> &ActivityPlacer {
        &self.placer
    }

    pub fn state(&self) -> ViewState {
        lock(&self.state).clone()
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Places and renders `activities` for `day`.
    ///
    /// Returns `None` when a newer update started before this one finished;
    /// the published state then belongs to the newer run.
    pub async fn update(
        &self,
        activities: &[Activity],
        day: u32,
        destination: &str,
    ) -> Option<MapScene> {
        let generation = {
            let mut state = lock(&self.state);
            *state = ViewState::Loading { day };
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };

        let outcome = self.placer.place(activities, destination).await;

        // Newer runs bump the generation under the state lock, so a run that
        // passes this check renders and publishes before any of them starts.
        let mut state = lock(&self.state);
        if self.generation() != generation {
            log::debug!("dropping stale map update #{} for day {}", generation, day);
            return None;
        }

        let mut scene = lock(&self.renderer).render(&outcome);
        scene.day = Some(day);
        *state = ViewState::Ready(scene.clone());

        Some(scene)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
