use tracing::debug;

use crate::error::CoreError;
use crate::record::ViewerItem;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Zoom change per zoom-in/zoom-out step.
pub const ZOOM_STEP: f32 = 0.15;
/// Lower zoom clamp.
pub const MIN_ZOOM: f32 = 0.3;
/// Upper zoom clamp.
pub const MAX_ZOOM: f32 = 3.0;
/// Exponential smoothing factor applied per pan easing step.
pub const PAN_SMOOTHING: f32 = 0.2;
/// Gap (in surface units) below which an eased pan snaps to its target.
pub const PAN_SETTLE_EPSILON: f32 = 0.5;

/// Duration of the opening fade/scale animation.
pub const OPEN_FADE_SECS: f32 = 0.20;
/// Duration of the closing fade/scale animation.
pub const CLOSE_FADE_SECS: f32 = 0.30;
/// Duration of the cross-fade when navigating to a sibling image.
pub const SWAP_FADE_SECS: f32 = 0.15;

/// Content scale at the start of the opening animation (fades up to 1.0).
const OPENING_SCALE: f32 = 0.95;

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

/// A 2D offset on the viewing surface, in surface units (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Direction of a single zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Pointer affordance for the image surface, derived purely from state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    /// Zoomed out; a click/scroll will zoom in.
    ZoomIn,
    /// Zoomed in and idle; the image can be grabbed.
    Grab,
    /// A pan drag is in progress.
    Grabbing,
}

/// Lifecycle of the viewer overlay.
///
/// `Opening` and `Closing` are transient animated states advanced by
/// [`ViewerSession::advance`]; while they run, input other than the close
/// trigger is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewerPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

// ---------------------------------------------------------------------------
// Viewer session
// ---------------------------------------------------------------------------

/// State of the image viewer overlay: one image at a time from a navigable
/// scoped list, with continuous zoom and eased pan.
///
/// The session owns no rendering resources. The UI layer feeds it pointer
/// positions and frame deltas and reads back zoom, offsets, and animation
/// alphas, which keeps every transition testable without a surface.
#[derive(Debug, Default)]
pub struct ViewerSession {
    items: Vec<ViewerItem>,
    /// Index into `items`; `None` when closed or in caption-only mode.
    current: Option<usize>,
    /// Item displayed when opened without a navigable list.
    solo: Option<ViewerItem>,

    phase: ViewerPhase,
    /// Seconds elapsed inside the current transient phase.
    phase_t: f32,
    /// Cross-fade progress after a navigation, `None` when not swapping.
    swap_t: Option<f32>,

    zoom: f32,
    pan: Offset,
    pan_target: Offset,
    panning: bool,
    /// Pointer position minus pan target at drag start, so dragging resumes
    /// without a jump even while the eased offset is still catching up.
    pan_anchor: Offset,
}

impl ViewerSession {
    pub fn new() -> Self {
        Self {
            zoom: 1.0,
            ..Self::default()
        }
    }

    // -- Opening and closing -------------------------------------------------

    /// Open the viewer on `items`, starting at `start_index`.
    ///
    /// The list is the *scoped* collection the user entered from (one topic
    /// bucket or one event's images); navigation never leaves it. Zoom and
    /// pan are reset. An empty list behaves like [`open_caption_only`]
    /// without an item.
    ///
    /// [`open_caption_only`]: Self::open_caption_only
    pub fn open_scoped(
        &mut self,
        items: Vec<ViewerItem>,
        start_index: usize,
    ) -> crate::Result<()> {
        if !items.is_empty() && start_index >= items.len() {
            return Err(CoreError::IndexOutOfRange {
                index: start_index,
                len: items.len(),
            });
        }
        self.current = if items.is_empty() {
            None
        } else {
            Some(start_index)
        };
        self.items = items;
        self.solo = None;
        self.begin_open();
        Ok(())
    }

    /// Open the viewer on a single item with no navigation list.
    pub fn open_caption_only(&mut self, item: ViewerItem) {
        self.items.clear();
        self.current = None;
        self.solo = Some(item);
        self.begin_open();
    }

    fn begin_open(&mut self) {
        debug!(items = self.items.len(), index = ?self.current, "viewer open");
        self.reset_view();
        self.panning = false;
        self.swap_t = None;
        if self.phase != ViewerPhase::Open {
            self.phase = ViewerPhase::Opening;
            self.phase_t = 0.0;
        }
    }

    /// Start the closing animation. A no-op when already closed or closing.
    ///
    /// The list and index are cleared only once the animation finishes, in
    /// [`advance`](Self::advance).
    pub fn close(&mut self) {
        match self.phase {
            ViewerPhase::Closed | ViewerPhase::Closing => {}
            ViewerPhase::Opening | ViewerPhase::Open => {
                self.phase = ViewerPhase::Closing;
                self.phase_t = 0.0;
                self.panning = false;
            }
        }
    }

    // -- Animation ----------------------------------------------------------

    /// Advance animations by `dt` seconds of wall-clock time.
    pub fn advance(&mut self, dt: f32) {
        match self.phase {
            ViewerPhase::Opening => {
                self.phase_t += dt;
                if self.phase_t >= OPEN_FADE_SECS {
                    self.phase = ViewerPhase::Open;
                    self.phase_t = 0.0;
                }
            }
            ViewerPhase::Closing => {
                self.phase_t += dt;
                if self.phase_t >= CLOSE_FADE_SECS {
                    self.phase = ViewerPhase::Closed;
                    self.phase_t = 0.0;
                    self.items.clear();
                    self.current = None;
                    self.solo = None;
                    self.reset_view();
                }
            }
            ViewerPhase::Open => {
                if let Some(t) = self.swap_t.as_mut() {
                    *t += dt;
                    if *t >= SWAP_FADE_SECS {
                        self.swap_t = None;
                    }
                }
            }
            ViewerPhase::Closed => {}
        }
    }

    /// Whether anything is animating and the frame loop should keep running.
    pub fn animating(&self) -> bool {
        matches!(self.phase, ViewerPhase::Opening | ViewerPhase::Closing)
            || self.swap_t.is_some()
    }

    /// Overlay opacity in `[0, 1]` across the open/close fade.
    pub fn overlay_alpha(&self) -> f32 {
        match self.phase {
            ViewerPhase::Closed => 0.0,
            ViewerPhase::Open => 1.0,
            ViewerPhase::Opening => (self.phase_t / OPEN_FADE_SECS).clamp(0.0, 1.0),
            ViewerPhase::Closing => 1.0 - (self.phase_t / CLOSE_FADE_SECS).clamp(0.0, 1.0),
        }
    }

    /// Scale applied to the overlay content during the open/close animation.
    pub fn content_scale(&self) -> f32 {
        OPENING_SCALE + (1.0 - OPENING_SCALE) * self.overlay_alpha()
    }

    /// Opacity of the displayed image, ramping up during a navigation swap.
    pub fn image_alpha(&self) -> f32 {
        match self.swap_t {
            Some(t) => (t / SWAP_FADE_SECS).clamp(0.0, 1.0),
            None => 1.0,
        }
    }

    // -- Introspection ------------------------------------------------------

    /// `true` from the moment the viewer opens until the close animation has
    /// finished; the UI suppresses background scrolling while this holds.
    pub fn is_visible(&self) -> bool {
        self.phase != ViewerPhase::Closed
    }

    pub fn phase(&self) -> ViewerPhase {
        self.phase
    }

    /// The item currently displayed, if any.
    pub fn current_item(&self) -> Option<&ViewerItem> {
        match self.current {
            Some(i) => self.items.get(i),
            None => self.solo.as_ref(),
        }
    }

    /// Index of the displayed item within the scoped list; `None` in
    /// caption-only mode or when closed.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn list_len(&self) -> usize {
        self.items.len()
    }

    pub fn can_go_prev(&self) -> bool {
        matches!(self.current, Some(i) if i > 0)
    }

    pub fn can_go_next(&self) -> bool {
        matches!(self.current, Some(i) if i + 1 < self.items.len())
    }

    pub fn zoom_level(&self) -> f32 {
        self.zoom
    }

    pub fn pan_offset(&self) -> Offset {
        self.pan
    }

    pub fn pan_target(&self) -> Offset {
        self.pan_target
    }

    /// Pointer affordance for the image surface.
    pub fn cursor(&self) -> CursorHint {
        if self.panning {
            CursorHint::Grabbing
        } else if self.zoom > 1.0 {
            CursorHint::Grab
        } else {
            CursorHint::ZoomIn
        }
    }

    // -- Navigation ---------------------------------------------------------

    /// Move the current index by `delta`, clamped to the scoped list.
    ///
    /// Attempting to move past either end is a no-op; there is no wraparound.
    /// On success the displayed asset cross-fades and zoom/pan reset.
    /// Returns whether the index changed.
    pub fn navigate(&mut self, delta: i32) -> bool {
        if self.phase != ViewerPhase::Open {
            return false;
        }
        let Some(current) = self.current else {
            return false;
        };
        let target = current as i64 + delta as i64;
        if target < 0 || target >= self.items.len() as i64 {
            return false;
        }
        self.current = Some(target as usize);
        self.swap_t = Some(0.0);
        self.reset_view();
        true
    }

    // -- Zoom and pan -------------------------------------------------------

    /// Step the zoom level by [`ZOOM_STEP`] toward `direction`.
    ///
    /// The result is clamped to `[MIN_ZOOM, MAX_ZOOM]` and rounded to two
    /// decimal places so repeated steps never accumulate floating drift.
    /// Crossing back to `<= 1.0` from above snaps the pan offset home.
    pub fn zoom(&mut self, direction: ZoomDirection) {
        if self.phase != ViewerPhase::Open {
            return;
        }
        let old = self.zoom;
        let stepped = match direction {
            ZoomDirection::In => (old + ZOOM_STEP).min(MAX_ZOOM),
            ZoomDirection::Out => (old - ZOOM_STEP).max(MIN_ZOOM),
        };
        self.zoom = (stepped * 100.0).round() / 100.0;
        if self.zoom <= 1.0 && old > 1.0 {
            self.pan = Offset::ZERO;
            self.pan_target = Offset::ZERO;
        }
    }

    /// Reset zoom to 1.0 and pan to the origin unconditionally.
    pub fn reset_view(&mut self) {
        self.zoom = 1.0;
        self.pan = Offset::ZERO;
        self.pan_target = Offset::ZERO;
    }

    /// Begin a pan drag at `pointer`. Only permitted while zoomed past 1.0.
    /// Returns whether a drag actually started.
    pub fn begin_pan(&mut self, pointer: Offset) -> bool {
        if self.phase != ViewerPhase::Open || self.zoom <= 1.0 {
            return false;
        }
        self.panning = true;
        // Anchor against the target, not the eased offset, so a new drag
        // continues from where the previous one was heading.
        self.pan_anchor = Offset::new(pointer.x - self.pan_target.x, pointer.y - self.pan_target.y);
        true
    }

    /// Update the pan *target* from the current pointer position. The eased
    /// offset catches up in [`step_pan`](Self::step_pan).
    pub fn move_pan(&mut self, pointer: Offset) {
        if self.panning {
            self.pan_target =
                Offset::new(pointer.x - self.pan_anchor.x, pointer.y - self.pan_anchor.y);
        }
    }

    /// End the pan drag. The eased offset keeps converging until settled.
    pub fn end_pan(&mut self) {
        self.panning = false;
    }

    pub fn is_panning(&self) -> bool {
        self.panning
    }

    /// Whether the per-frame easing step still needs to run: either a drag is
    /// active or the eased offset has not yet reached its target.
    pub fn pan_active(&self) -> bool {
        self.panning || !self.pan_settled()
    }

    /// Whether the eased offset has converged onto the target.
    pub fn pan_settled(&self) -> bool {
        (self.pan.x - self.pan_target.x).abs() < PAN_SETTLE_EPSILON
            && (self.pan.y - self.pan_target.y).abs() < PAN_SETTLE_EPSILON
    }

    /// Run one easing step, moving the rendered offset toward the target.
    /// Snaps exactly onto the target once within [`PAN_SETTLE_EPSILON`].
    pub fn step_pan(&mut self) {
        self.pan.x = ease_toward(self.pan.x, self.pan_target.x, PAN_SMOOTHING);
        self.pan.y = ease_toward(self.pan.y, self.pan_target.y, PAN_SMOOTHING);
        if !self.panning && self.pan_settled() {
            self.pan = self.pan_target;
        }
    }
}

/// One exponential smoothing step: move `current` a fixed fraction of the
/// remaining distance toward `target`.
#[inline]
pub fn ease_toward(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}
