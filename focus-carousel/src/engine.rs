//! The carousel engine.
//!
//! [`CarouselEngine`] owns the scroll state, the attached-child set and the
//! running animation. The host drives it through callbacks: layout passes,
//! drag deltas, scroll phase changes, attach/detach and animation frames.
//! Every callback runs to completion on the caller's thread.

use rustc_hash::FxHashSet;
use tracing::{debug, trace, warn};

use crate::{
    animation::{AnimationToken, FrameStatus, ScrollAnimation, TokenSource},
    config::{CarouselArgs, validate_gap},
    error::{CarouselError, LayoutError},
    geometry::{GridGeometry, GridSpec, ScrollOffset},
    host::CarouselHost,
    placement::{ScaleCache, VisualTransform, focus_scale, focus_tint, plan_cells},
    px::{PxRect, PxSize},
    scroll::{Axis, ScrollPhase, ScrollState},
    viewport,
};

/// Outcome of a scroll-to-position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollRequest {
    /// The target does not exist, nothing is measured yet, or the engine is
    /// detached.
    Ignored,
    /// The target was already centered; selection and the completion
    /// callback ran immediately.
    Completed,
    /// An animation started. Deliver frames with this token.
    Animating(AnimationToken),
}

impl ScrollRequest {
    /// The animation token, if an animation started.
    pub fn token(self) -> Option<AnimationToken> {
        match self {
            ScrollRequest::Animating(token) => Some(token),
            _ => None,
        }
    }
}

/// A focus-scaling grid carousel driven by a [`CarouselHost`].
pub struct CarouselEngine<H: CarouselHost> {
    args: CarouselArgs,
    geometry: GridGeometry,
    scroll: ScrollState,
    attached: Vec<(usize, H::Child)>,
    scales: ScaleCache<H::Child>,
    animation: Option<ScrollAnimation>,
    tokens: TokenSource,
    pending_initial_center: bool,
    remeasure_items: bool,
    is_attached: bool,
    last_selected_position: Option<usize>,
    on_item_selected: Option<Box<dyn FnMut(usize)>>,
}

impl<H: CarouselHost> CarouselEngine<H> {
    /// Creates a detached engine with no items.
    pub fn new(args: CarouselArgs) -> Result<Self, CarouselError> {
        args.validate()?;
        let geometry = GridGeometry::new(GridSpec::new(args.span_count)?, args.item_gap);
        debug!(
            span_count = args.span_count,
            item_gap = args.item_gap,
            "carousel engine created"
        );
        Ok(Self {
            pending_initial_center: args.init_layout_center,
            args,
            geometry,
            scroll: ScrollState::default(),
            attached: Vec::new(),
            scales: ScaleCache::default(),
            animation: None,
            tokens: TokenSource::default(),
            remeasure_items: false,
            is_attached: false,
            last_selected_position: None,
            on_item_selected: None,
        })
    }

    /// Registers the listener fired when the selected position changes.
    pub fn set_on_item_selected(&mut self, listener: impl FnMut(usize) + 'static) {
        self.on_item_selected = Some(Box::new(listener));
    }

    /// The arguments the engine runs with.
    pub fn args(&self) -> &CarouselArgs {
        &self.args
    }

    /// Updates the item count and clamps the offsets into the new bounds.
    ///
    /// The host should follow up with a layout pass. That pass measures a
    /// representative child again, since the new data may lay out at a
    /// different size.
    pub fn set_item_count(&mut self, item_count: usize) {
        if item_count == self.geometry.grid().item_count() {
            return;
        }
        self.geometry.configure(item_count);
        self.remeasure_items = true;
        self.scroll.clamp_to(&self.geometry);
        let target_removed = self
            .animation
            .as_ref()
            .is_some_and(|animation| animation.target_position() >= item_count);
        if target_removed {
            self.cancel_animation("target removed");
        }
        debug!(
            item_count,
            row_count = self.geometry.grid().row_count(),
            "item count changed"
        );
    }

    /// Replaces the item gap and re-lays out.
    ///
    /// Offsets are rescaled so the same fractional cell stays at the focal
    /// center, and a running animation restarts toward its target. The
    /// restarted animation runs under a new token, returned here; frames
    /// carrying the old token report [`FrameStatus::Stale`].
    pub fn set_item_gap(
        &mut self,
        gap: f32,
        host: &mut H,
    ) -> Result<Option<AnimationToken>, CarouselError> {
        validate_gap(gap)?;
        if gap == self.geometry.gap() {
            return Ok(None);
        }
        let resumed = self.animation.take();
        let old_extent = (
            self.geometry.horizontal_extent(),
            self.geometry.vertical_extent(),
        );
        self.geometry.set_gap(gap);
        self.args.item_gap = gap;

        let offset = self.scroll.offset();
        let rescaled = ScrollOffset::new(
            rescale(offset.horizontal, old_extent.0, self.geometry.horizontal_extent()),
            rescale(offset.vertical, old_extent.1, self.geometry.vertical_extent()),
        );
        self.scroll.set_offset(rescaled, &self.geometry);
        debug!(gap, "item gap changed");
        self.on_layout_children(host);

        let Some(mut animation) = resumed else {
            return Ok(None);
        };
        let on_done = animation.take_on_finished();
        Ok(self
            .start_scroll(animation.target_position(), on_done)
            .token())
    }

    /// The host attached the carousel to its window.
    pub fn on_attached(&mut self) {
        self.is_attached = true;
        debug!("carousel attached");
    }

    /// The host detached the carousel: cancels any animation and releases
    /// every held child.
    pub fn on_detached(&mut self, host: &mut H) {
        self.cancel_animation("detached");
        self.recycle_all(host);
        self.is_attached = false;
        debug!("carousel detached");
    }

    /// Returns `true` between [`on_attached`](Self::on_attached) and
    /// [`on_detached`](Self::on_detached).
    pub fn is_attached(&self) -> bool {
        self.is_attached
    }

    /// Runs a full layout pass.
    ///
    /// Host contract violations degrade the pass to "no visible items": every
    /// held child is recycled and the next trigger tries again.
    #[tracing::instrument(level = "trace", skip_all, fields(item_count = self.geometry.grid().item_count()))]
    pub fn on_layout_children(&mut self, host: &mut H) {
        if self.geometry.grid().item_count() == 0 {
            self.recycle_all(host);
            return;
        }
        if let Err(err) = self.layout_pass(host) {
            warn!(%err, "layout pass degraded to no visible items");
            self.recycle_all(host);
        }
    }

    fn layout_pass(&mut self, host: &mut H) -> Result<(), LayoutError> {
        let container = host.container_size();
        if container.is_empty() {
            return Err(LayoutError::EmptyViewport(container));
        }
        if !self.geometry.is_measured() || self.remeasure_items {
            self.measure_item(host)?;
            self.remeasure_items = false;
        }
        if self.pending_initial_center {
            self.pending_initial_center = false;
            self.apply_initial_center();
        }
        self.scroll.clamp_to(&self.geometry);

        let offset = self.scroll.offset();
        let window = viewport::resolve(&self.geometry, offset, container);
        let focus = self.geometry.focus_position(offset);
        let plan = plan_cells(
            &self.geometry,
            &window,
            container,
            host.trailing_padding(),
            focus,
        );

        // Release leavers before asking for anything new.
        let planned: FxHashSet<usize> = plan.iter().map(|cell| cell.position).collect();
        let mut kept = FxHashSet::default();
        let scales = &mut self.scales;
        self.attached.retain(|&(position, child)| {
            if planned.contains(&position) && kept.insert(position) {
                true
            } else {
                host.recycle(child);
                scales.remove(&child);
                false
            }
        });

        let min_scale = self.args.min_scale;
        let mut emitted = FxHashSet::default();
        for cell in &plan {
            if !emitted.insert(cell.position) {
                continue;
            }
            let child = match self
                .attached
                .iter()
                .find(|(position, _)| *position == cell.position)
            {
                Some(&(_, child)) => child,
                None => {
                    let child = host
                        .obtain(cell.position)
                        .ok_or(LayoutError::ChildUnavailable(cell.position))?;
                    self.attached.push((cell.position, child));
                    child
                }
            };
            let size = match host.measured_size(child) {
                Some(size) => size,
                None => host.measure(child).unwrap_or(PxSize::ZERO),
            };
            if size.is_empty() {
                return Err(LayoutError::EmptyItem {
                    position: cell.position,
                    size,
                });
            }

            host.stack(child, cell.z_order);
            let rect = PxRect::from_origin_size(cell.origin.x, cell.origin.y, size);
            host.layout(child, rect);

            let scale = focus_scale(&rect, container, min_scale);
            if self.scales.update(child, scale) {
                let tint = self.args.auto_change_item_color.then(|| {
                    focus_tint(
                        self.args.unselected_background_color,
                        self.args.selected_background_color,
                        scale,
                        min_scale,
                    )
                });
                host.apply_transform(child, VisualTransform { scale, tint });
            }
        }

        trace!(
            horizontal = offset.horizontal,
            vertical = offset.vertical,
            first_position = window.first_position,
            attached = self.attached.len(),
            "layout pass complete"
        );
        Ok(())
    }

    /// Measures one representative child and caches its size for the grid.
    ///
    /// When a previously measured size changes, offsets are rescaled to keep
    /// the focused cell centered and a running animation is cancelled.
    fn measure_item(&mut self, host: &mut H) -> Result<(), LayoutError> {
        let (position, child, borrowed) = match self.attached.first() {
            Some(&(position, child)) => (position, child, false),
            None => {
                let child = host.obtain(0).ok_or(LayoutError::ChildUnavailable(0))?;
                (0, child, true)
            }
        };
        let size = host.measure(child).unwrap_or(PxSize::ZERO);
        if borrowed {
            host.recycle(child);
        }
        if size.is_empty() {
            return Err(LayoutError::EmptyItem { position, size });
        }
        let previous = self.geometry.is_measured().then(|| {
            (
                self.geometry.item_size(),
                self.geometry.horizontal_extent(),
                self.geometry.vertical_extent(),
            )
        });
        self.geometry.set_item_size(size);
        debug!(
            width = size.width.raw(),
            height = size.height.raw(),
            "item size measured"
        );

        let resized = previous.filter(|(old_size, ..)| *old_size != size);
        if let Some((_, old_horizontal, old_vertical)) = resized {
            let offset = self.scroll.offset();
            let rescaled = ScrollOffset::new(
                rescale(offset.horizontal, old_horizontal, self.geometry.horizontal_extent()),
                rescale(offset.vertical, old_vertical, self.geometry.vertical_extent()),
            );
            self.scroll.set_offset(rescaled, &self.geometry);
            self.cancel_animation("item size changed");
        }
        Ok(())
    }

    fn apply_initial_center(&mut self) {
        let grid = *self.geometry.grid();
        let start = match self.args.start_position {
            Some(position) if grid.contains(position) => Some(position),
            Some(position) => {
                warn!(
                    position,
                    item_count = grid.item_count(),
                    "start position out of range, focusing the grid middle"
                );
                grid.center_position()
            }
            None => grid.center_position(),
        };
        let Some(start) = start else {
            return;
        };
        if let Some(offset) = self.geometry.offset_for_position(start) {
            self.scroll.set_offset(offset, &self.geometry);
        }
        debug!(position = start, "initial layout centered");
        self.select(start);
    }

    /// Applies a horizontal drag delta and returns the delta consumed.
    pub fn scroll_horizontally_by(&mut self, delta: f32, host: &mut H) -> f32 {
        self.scroll_axis_by(Axis::Horizontal, delta, host)
    }

    /// Applies a vertical drag delta and returns the delta consumed.
    pub fn scroll_vertically_by(&mut self, delta: f32, host: &mut H) -> f32 {
        self.scroll_axis_by(Axis::Vertical, delta, host)
    }

    fn scroll_axis_by(&mut self, axis: Axis, delta: f32, host: &mut H) -> f32 {
        if self.geometry.grid().item_count() == 0 {
            return 0.0;
        }
        let before = self.scroll.offset();
        let consumed = self.scroll.scroll_by(axis, delta, &self.geometry);
        trace!(?axis, delta, consumed, "drag applied");
        if self.scroll.offset() != before {
            self.on_layout_children(host);
        }
        consumed
    }

    /// Whether horizontal drags are accepted in the current gesture.
    pub fn can_scroll_horizontally(&self) -> bool {
        self.scroll.can_scroll(Axis::Horizontal)
    }

    /// Whether vertical drags are accepted in the current gesture.
    pub fn can_scroll_vertically(&self) -> bool {
        self.scroll.can_scroll(Axis::Vertical)
    }

    /// The host's gesture tracking changed phase.
    ///
    /// Starting a drag cancels any animation. Settling back to idle snaps the
    /// closest cell to the center when `auto_select` is on.
    pub fn on_scroll_state_changed(&mut self, phase: ScrollPhase) {
        let previous = self.scroll.set_phase(phase);
        if previous == phase {
            return;
        }
        trace!(?previous, ?phase, "scroll phase changed");
        match phase {
            ScrollPhase::Dragging => self.cancel_animation("drag started"),
            ScrollPhase::Idle if self.args.auto_select && self.animation.is_none() => {
                if let Some(position) = self.closest_position() {
                    debug!(position, "snapping to closest item");
                    self.start_scroll(position, None);
                }
            }
            _ => {}
        }
    }

    /// The current scroll phase.
    pub fn phase(&self) -> ScrollPhase {
        self.scroll.phase()
    }

    /// Animates `position` to the focal center.
    pub fn scroll_to_position(&mut self, position: usize) -> ScrollRequest {
        self.start_scroll(position, None)
    }

    /// Like [`scroll_to_position`](Self::scroll_to_position), then runs
    /// `on_done` once the target is reached. A cancelled animation never
    /// runs it.
    pub fn scroll_to_position_then(
        &mut self,
        position: usize,
        on_done: impl FnOnce(usize) + 'static,
    ) -> ScrollRequest {
        self.start_scroll(position, Some(Box::new(on_done)))
    }

    /// Animates the middle of the grid to the focal center.
    pub fn smooth_scroll_to_center(&mut self) -> ScrollRequest {
        match self.geometry.grid().center_position() {
            Some(center) => self.scroll_to_position(center),
            None => ScrollRequest::Ignored,
        }
    }

    fn start_scroll(
        &mut self,
        position: usize,
        on_done: Option<Box<dyn FnOnce(usize)>>,
    ) -> ScrollRequest {
        if !self.is_attached {
            debug!(position, "ignoring scroll request while detached");
            return ScrollRequest::Ignored;
        }
        let Some(target) = self.geometry.offset_for_position(position) else {
            debug!(
                position,
                item_count = self.geometry.grid().item_count(),
                "ignoring scroll request"
            );
            return ScrollRequest::Ignored;
        };
        self.cancel_animation("superseded");

        let start = self.scroll.offset();
        if start == target {
            self.select(position);
            if let Some(on_done) = on_done {
                on_done(position);
            }
            return ScrollRequest::Completed;
        }

        let unit = ScrollOffset::new(
            self.geometry.horizontal_extent(),
            self.geometry.vertical_extent(),
        );
        let token = self.tokens.next();
        let mut animation = ScrollAnimation::new(token, position, start, target, unit);
        if let Some(on_done) = on_done {
            animation = animation.with_on_finished(on_done);
        }
        debug!(
            position,
            generation = token.generation(),
            duration_ms = animation.duration().as_millis() as u64,
            "scroll animation started"
        );
        self.animation = Some(animation);
        ScrollRequest::Animating(token)
    }

    /// Advances the running animation to `frame_nanos`.
    ///
    /// Frames carrying a token other than the running animation's are
    /// ignored, so a callback that fires after cancellation is harmless.
    pub fn on_animation_frame(
        &mut self,
        token: AnimationToken,
        frame_nanos: u64,
        host: &mut H,
    ) -> FrameStatus {
        let (offset, done) = match self.animation.as_mut() {
            Some(animation) if animation.token() == token => animation.sample(frame_nanos),
            _ => {
                trace!(generation = token.generation(), "stale animation frame");
                return FrameStatus::Stale;
            }
        };
        self.scroll.set_offset(offset, &self.geometry);
        let finished = if done { self.animation.take() } else { None };
        self.on_layout_children(host);

        match finished {
            Some(mut animation) => {
                let position = animation.target_position();
                debug!(position, "scroll animation finished");
                self.select(position);
                if let Some(on_done) = animation.take_on_finished() {
                    on_done(position);
                }
                FrameStatus::Finished
            }
            None => FrameStatus::Running,
        }
    }

    /// Returns `true` while a scroll-to-position animation is running.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Token of the running animation, for hosts that start their frame
    /// clock after a snap.
    pub fn animation_token(&self) -> Option<AnimationToken> {
        self.animation.as_ref().map(ScrollAnimation::token)
    }

    fn cancel_animation(&mut self, reason: &str) {
        if let Some(animation) = self.animation.take() {
            debug!(
                position = animation.target_position(),
                reason, "scroll animation cancelled"
            );
        }
    }

    fn select(&mut self, position: usize) {
        if self.last_selected_position == Some(position) {
            return;
        }
        self.last_selected_position = Some(position);
        debug!(position, "item selected");
        if let Some(listener) = self.on_item_selected.as_mut() {
            listener(position);
        }
    }

    fn recycle_all(&mut self, host: &mut H) {
        for (_, child) in self.attached.drain(..) {
            host.recycle(child);
        }
        self.scales.clear();
    }

    /// Current scroll offsets.
    pub fn offset(&self) -> ScrollOffset {
        self.scroll.offset()
    }

    /// Offsets that center `position`, once an item has been measured.
    pub fn offset_for_position(&self, position: usize) -> Option<ScrollOffset> {
        self.geometry.offset_for_position(position)
    }

    /// Signed per-axis distance from the current offsets to those that center
    /// `position`.
    pub fn distance_to_position(&self, position: usize) -> Option<ScrollOffset> {
        let target = self.geometry.offset_for_position(position)?;
        let current = self.scroll.offset();
        Some(ScrollOffset::new(
            target.horizontal - current.horizontal,
            target.vertical - current.vertical,
        ))
    }

    /// The position nearest the focal center.
    pub fn closest_position(&self) -> Option<usize> {
        self.geometry.closest_position(self.scroll.offset())
    }

    /// The last position reported to the selection listener.
    pub fn last_selected_position(&self) -> Option<usize> {
        self.last_selected_position
    }

    /// Number of items.
    pub fn item_count(&self) -> usize {
        self.geometry.grid().item_count()
    }

    /// Number of columns.
    pub fn span_count(&self) -> usize {
        self.geometry.grid().span_count()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.geometry.grid().row_count()
    }

    /// Measured item size, zero before the first successful layout pass.
    pub fn item_size(&self) -> PxSize {
        self.geometry.item_size()
    }

    /// Number of children currently held.
    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }
}

fn rescale(offset: f32, old_extent: f32, new_extent: f32) -> f32 {
    if old_extent <= f32::EPSILON {
        return offset;
    }
    offset * new_extent / old_extent
}
