//! Image display state
//!
//! [`ImageState`] is the caller-owned model behind the image widget. It
//! tracks three independent concerns:
//!
//! * the visibility gate, which defers loading of lazy images until
//!   their region first intersects the viewport, then stays open
//! * the load lifecycle, from pending through loaded or failed, keyed
//!   by source identity so stale results from a replaced source are
//!   dropped
//! * overlay visibility, toggled by pointer crossings when the trigger
//!   is hover
//!
//! The state emits [`LoadRequest`]s and consumes keyed load results,
//! leaving scheduling of the actual fetch to the application.

use serde::{Deserialize, Serialize};

use crate::config::{image_config, resolve_source_url};
use crate::event::Event;
use crate::image::ImageHandle;
use crate::layout::Bounds;
use crate::loader::{LoadRequest, ResourceLoader};
use crate::observer::{Intersection, ObservationId, ViewportObserver};
use crate::source::{Source, SourceKey};

/// When the overlay slot is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OverlayTrigger {
    /// Overlay is always shown
    #[default]
    Always,
    /// Overlay visibility flips on each pointer enter and leave
    Hover,
}

/// What the widget should currently show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPhase {
    /// Gated, only the reserved box is drawn
    Placeholder,
    /// Load underway, box plus loading affordance
    Loading,
    /// Pixels available
    Ready,
    /// Load failed, box plus error affordance
    Failed,
}

/// Caller-owned state for one displayed image
#[derive(Debug, Clone)]
pub struct ImageState {
    source: Source,
    lazy: bool,
    overlay_trigger: OverlayTrigger,
    referrer_policy: Option<String>,

    should_load: bool,
    requested: bool,
    loaded: bool,
    errored: bool,
    handle: Option<ImageHandle>,

    overlay_visible: bool,
    pointer_inside: bool,
    observation: Option<ObservationId>,
}

impl ImageState {
    /// Create state for a source
    ///
    /// Lazy states start gated and load nothing until their region
    /// becomes visible. The overlay starts hidden only for the hover
    /// trigger.
    pub fn new(source: impl Into<Source>, lazy: bool, overlay_trigger: OverlayTrigger) -> Self {
        Self {
            source: source.into(),
            lazy,
            overlay_trigger,
            referrer_policy: None,
            should_load: !lazy,
            requested: false,
            loaded: false,
            errored: false,
            handle: None,
            overlay_visible: overlay_trigger != OverlayTrigger::Hover,
            pointer_inside: false,
            observation: None,
        }
    }

    /// Set the referrer policy attached to load requests
    pub fn with_referrer_policy(mut self, policy: impl Into<String>) -> Self {
        self.referrer_policy = Some(policy.into());
        self
    }

    /// Current source
    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Identity of the current source
    pub fn source_key(&self) -> SourceKey {
        self.source.key()
    }

    /// Whether the visibility gate is open
    pub fn should_load(&self) -> bool {
        self.should_load
    }

    /// Whether the current source finished loading
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Whether the current source failed
    pub fn has_error(&self) -> bool {
        self.errored
    }

    /// Whether the overlay slot should be drawn
    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    /// Decoded pixels for the current source, once loaded
    pub fn handle(&self) -> Option<&ImageHandle> {
        self.handle.as_ref()
    }

    /// What the widget should currently show
    pub fn phase(&self) -> DisplayPhase {
        if self.errored {
            DisplayPhase::Failed
        } else if !self.should_load {
            DisplayPhase::Placeholder
        } else if !self.loaded {
            DisplayPhase::Loading
        } else {
            DisplayPhase::Ready
        }
    }

    /// Replace the source, resetting load results
    ///
    /// An equal source is a no-op. The visibility gate and any viewport
    /// observation survive the swap, so an already revealed widget
    /// reloads immediately instead of waiting to be seen again.
    pub fn sync_source(&mut self, source: impl Into<Source>) -> bool {
        let source = source.into();
        if source == self.source {
            return false;
        }
        log::debug!("Image source changed to {}", source.url());
        self.source = source;
        self.requested = false;
        self.loaded = false;
        self.errored = false;
        self.handle = None;
        true
    }

    /// Register this state's region for visibility tracking
    ///
    /// Only gated lazy states observe. Calling again while already
    /// observing does nothing, use [`update_region`] to move the region.
    ///
    /// [`update_region`]: ImageState::update_region
    pub fn attach(&mut self, observer: &mut ViewportObserver, region: Bounds) {
        if self.lazy && !self.should_load && self.observation.is_none() {
            self.observation = Some(observer.observe(region, 0.0));
        }
    }

    /// Move this state's observed region after a relayout
    pub fn update_region(&self, observer: &mut ViewportObserver, region: Bounds) {
        if let Some(id) = self.observation {
            observer.update_region(id, region);
        }
    }

    /// Withdraw from visibility tracking
    pub fn detach(&mut self, observer: &mut ViewportObserver) {
        if let Some(id) = self.observation.take() {
            observer.unobserve(id);
        }
    }

    /// Consume a visibility transition, opening the gate on first entry
    ///
    /// The observation is dropped once the gate opens. Returns whether
    /// the transition belonged to this state and opened the gate.
    pub fn handle_intersection(
        &mut self,
        observer: &mut ViewportObserver,
        intersection: &Intersection,
    ) -> bool {
        if self.observation != Some(intersection.id) || !intersection.is_intersecting {
            return false;
        }
        self.should_load = true;
        self.observation = None;
        observer.unobserve(intersection.id);
        log::debug!("Deferred source {} entered the viewport", self.source.url());
        true
    }

    /// Synthesize a completion for an eagerly shown, already cached source
    ///
    /// Lazy states skip this and go through the gate as usual. Returns
    /// the event to route into the widget, and marks the request slot
    /// used so no duplicate fetch is issued.
    pub fn cached_completion(&mut self, loader: &dyn ResourceLoader) -> Option<Event> {
        if self.lazy || !self.should_load || self.loaded || self.errored || self.source.is_empty()
        {
            return None;
        }
        let key = self.source.key();
        let handle = loader.cached(&key)?;
        self.requested = true;
        Some(Event::SourceLoaded { key, handle })
    }

    /// The fetch this state wants issued, at most once per source
    ///
    /// Gated, already requested, settled and empty sources return
    /// nothing. Plain sources go through the configured URL rewrite;
    /// the key always reflects the source as given.
    pub fn take_load_request(&mut self) -> Option<LoadRequest> {
        if !self.should_load
            || self.requested
            || self.loaded
            || self.errored
            || self.source.is_empty()
        {
            return None;
        }
        self.requested = true;

        let key = self.source.key();
        let mut source = self.source.clone();
        source.url = resolve_source_url(&self.source, image_config());

        Some(LoadRequest {
            key,
            source,
            referrer_policy: self.referrer_policy.clone(),
        })
    }

    /// Accept decoded pixels for `key`
    ///
    /// Results for a replaced source or an already settled state are
    /// dropped. Returns whether the state moved to loaded.
    pub fn finish_load(&mut self, key: SourceKey, handle: ImageHandle) -> bool {
        if key != self.source.key() || self.loaded || self.errored {
            return false;
        }
        self.loaded = true;
        self.handle = Some(handle);
        true
    }

    /// Record a failure for `key`
    ///
    /// Stale and already settled results are dropped. Returns whether
    /// the state moved to failed.
    pub fn fail_load(&mut self, key: SourceKey) -> bool {
        if key != self.source.key() || self.loaded || self.errored {
            return false;
        }
        self.errored = true;
        true
    }

    /// Track a pointer crossing of the widget bounds
    ///
    /// Each enter and leave flips the overlay under the hover trigger.
    /// Returns whether overlay visibility changed.
    pub fn set_pointer_inside(&mut self, inside: bool) -> bool {
        if inside == self.pointer_inside {
            return false;
        }
        self.pointer_inside = inside;
        self.toggle_overlay()
    }

    /// Flip overlay visibility, honored only by the hover trigger
    pub fn toggle_overlay(&mut self) -> bool {
        if self.overlay_trigger == OverlayTrigger::Hover {
            self.overlay_visible = !self.overlay_visible;
            true
        } else {
            false
        }
    }
}
