//! focus-carousel is a layout engine for bounded, two-dimensionally scrolling
//! grids whose focal cell sits at the center of the viewport.
//!
//! Cells scale down, and optionally fade between two background colors, as
//! they move away from the center. Releasing a drag snaps the nearest cell
//! into focus, and any cell can be animated to the center on request.
//!
//! # Hosts
//!
//! The engine owns no children. A host, usually a virtualized list, creates,
//! measures and pools them, and implements [`CarouselHost`] so the engine can
//! borrow children for a layout pass and hand them back:
//!
//! ```
//! # #[cfg(feature = "testing")]
//! # {
//! use focus_carousel::{CarouselArgs, CarouselEngine, testing::RecordingHost};
//!
//! let mut host = RecordingHost::new([300, 300], [100, 100]);
//! let mut engine = CarouselEngine::new(CarouselArgs::default()).unwrap();
//! engine.set_item_count(10);
//! engine.on_attached();
//! engine.on_layout_children(&mut host);
//!
//! // Span 3, 10 items: the middle of the grid is focused first.
//! assert_eq!(engine.last_selected_position(), Some(7));
//! # }
//! ```
//!
//! # Driving animations
//!
//! [`CarouselEngine::scroll_to_position`] returns
//! [`ScrollRequest::Animating`] with an [`AnimationToken`] when an animation
//! starts. The host then calls
//! [`CarouselEngine::on_animation_frame`] with that token and a monotonic
//! frame timestamp in nanoseconds until it reports
//! [`FrameStatus::Finished`]. Starting a drag or another request invalidates
//! the token, and later frames report [`FrameStatus::Stale`].
//!
//! # Logging
//!
//! Diagnostics go through `tracing`. Lifecycle events log at `debug`, per-frame
//! work at `trace`, and degraded layout passes at `warn`.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod animation;
pub mod color;
mod config;
mod engine;
pub mod error;
pub mod geometry;
mod host;
pub mod placement;
pub mod px;
pub mod scroll;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod viewport;

pub use crate::{
    animation::{AnimationToken, FrameStatus},
    color::Color,
    config::CarouselArgs,
    engine::{CarouselEngine, ScrollRequest},
    error::{CarouselError, LayoutError},
    geometry::ScrollOffset,
    host::CarouselHost,
    placement::{VisualTransform, ZOrder},
    px::{Px, PxPosition, PxRect, PxSize},
    scroll::{Axis, ScrollPhase},
};
