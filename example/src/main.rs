//! Headless carousel session against a recording host.
//!
//! Run with `RUST_LOG=focus_carousel=debug` to see the engine's lifecycle
//! events, or `trace` for every layout pass and frame.

use focus_carousel::{
    AnimationToken, CarouselArgs, CarouselEngine, Color, FrameStatus, ScrollPhase,
    testing::RecordingHost,
};
use tracing::{info, warn};

const FRAME_NANOS: u64 = 16_666_667;

type Engine = CarouselEngine<RecordingHost>;

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            match tracing_subscriber::EnvFilter::try_new("error,focus_carousel=info,example=info") {
                Ok(filter) => filter,
                Err(_) => tracing_subscriber::EnvFilter::new("error"),
            }
        }
    };

    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .try_init();
}

/// Feeds frames at 60 Hz until the animation settles, returning the clock.
fn run_frames(
    engine: &mut Engine,
    host: &mut RecordingHost,
    token: AnimationToken,
    mut clock: u64,
) -> u64 {
    loop {
        clock += FRAME_NANOS;
        match engine.on_animation_frame(token, clock, host) {
            FrameStatus::Running => {}
            FrameStatus::Finished => return clock,
            FrameStatus::Stale => {
                warn!(generation = token.generation(), "animation was superseded");
                return clock;
            }
        }
    }
}

fn drag(engine: &mut Engine, host: &mut RecordingHost, deltas: &[(f32, f32)]) {
    engine.on_scroll_state_changed(ScrollPhase::Dragging);
    for &(dx, dy) in deltas {
        let consumed_x = engine.scroll_horizontally_by(dx, host);
        let consumed_y = engine.scroll_vertically_by(dy, host);
        if (dx != 0.0 && consumed_x == 0.0) || (dy != 0.0 && consumed_y == 0.0) {
            info!(dx, dy, "drag rejected by axis lock or edge");
        }
    }
    engine.on_scroll_state_changed(ScrollPhase::Settling);
    engine.on_scroll_state_changed(ScrollPhase::Idle);
}

fn main() {
    init_tracing();

    let args = CarouselArgs::default()
        .span_count(5)
        .item_gap(24.0)
        .auto_change_item_color(true)
        .selected_background_color(Color::from_argb(0xFFFF_C107))
        .unselected_background_color(Color::from_argb(0xFF37_474F));
    let mut engine = match Engine::new(args) {
        Ok(engine) => engine,
        Err(err) => {
            warn!(%err, "invalid carousel arguments");
            return;
        }
    };
    engine.set_on_item_selected(|position| info!(position, "selected"));

    let mut host = RecordingHost::new([1080, 1920], [320, 320]);
    engine.set_item_count(42);
    engine.on_attached();
    engine.on_layout_children(&mut host);
    info!(
        rows = engine.row_count(),
        attached = engine.attached_count(),
        "initial layout"
    );

    // A vertical swipe; the horizontal deltas lose to the axis lock.
    drag(
        &mut engine,
        &mut host,
        &[(0.0, -60.0), (15.0, -90.0), (10.0, -120.0), (0.0, -45.0)],
    );
    let mut clock = 0;
    if let Some(token) = engine.animation_token() {
        clock = run_frames(&mut engine, &mut host, token, clock);
    }
    info!(offset = ?engine.offset(), "snapped after release");

    if let Some(token) = engine
        .scroll_to_position_then(0, |position| info!(position, "reached the first item"))
        .token()
    {
        clock = run_frames(&mut engine, &mut host, token, clock);
    }

    // Change the gap mid-scroll; the move restarts under a new token.
    if let Some(token) = engine.smooth_scroll_to_center().token() {
        clock += FRAME_NANOS;
        engine.on_animation_frame(token, clock, &mut host);
        match engine.set_item_gap(8.0, &mut host) {
            Ok(Some(restarted)) => {
                run_frames(&mut engine, &mut host, restarted, clock);
            }
            Ok(None) => {}
            Err(err) => warn!(%err, "gap rejected"),
        }
    }

    // A data reset with larger cells: the next pass re-measures.
    host.set_item_size([400, 400]);
    engine.set_item_count(36);
    engine.on_layout_children(&mut host);
    info!(
        item_size = ?engine.item_size(),
        offset = ?engine.offset(),
        "relaid out after data reset"
    );

    info!(
        selected = ?engine.last_selected_position(),
        live_children = host.live_children(),
        host_calls = host.calls().len(),
        "session finished"
    );
    engine.on_detached(&mut host);
}
