//! Drag-to-seek on the progress bar
//!
//! A drag session lives from pointer-down over the bar until pointer-up
//! anywhere. While it lives, the session owns the position: every pointer
//! move seeks the media immediately and native notifications are ignored.

use std::time::Duration;

use super::capture::{CaptureGuard, PointerCapture};
use super::media::MediaHandle;
use super::state::PlaybackState;
use super::status::{Transition, TransitionError};

/// Horizontal geometry of the progress bar, captured when a gesture starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub left: f32,
    pub width: f32,
}

impl BarGeometry {
    pub fn new(left: f32, width: f32) -> Self {
        Self { left, width }
    }

    /// Fraction of the bar left of `pointer_x`, clamped to `0.0..=1.0`
    ///
    /// Degenerate geometry (zero, negative or non-finite width) yields 0.
    pub fn fraction(&self, pointer_x: f32) -> f64 {
        if !(self.width.is_finite() && self.left.is_finite() && pointer_x.is_finite())
            || self.width <= 0.0
        {
            return 0.0;
        }
        let fraction = f64::from(pointer_x - self.left) / f64::from(self.width);
        fraction.clamp(0.0, 1.0)
    }
}

/// Seek target for a pointer position; zero when the duration is unknown
pub fn seek_target(pointer_x: f32, bar: BarGeometry, duration: Duration) -> Duration {
    if duration.is_zero() {
        return Duration::ZERO;
    }
    duration.mul_f64(bar.fraction(pointer_x)).min(duration)
}

/// One pointer-down .. pointer-up gesture
#[derive(Debug)]
pub struct DragSession {
    bar: BarGeometry,
    pointer_x: f32,
    moved: bool,
    _capture: CaptureGuard,
}

impl DragSession {
    pub fn bar(&self) -> BarGeometry {
        self.bar
    }

    pub fn pointer_x(&self) -> f32 {
        self.pointer_x
    }
}

/// Owns the drag session and the global pointer listeners
#[derive(Debug, Default)]
pub struct DragSeekController {
    capture: PointerCapture,
    session: Option<DragSession>,
}

impl DragSeekController {
    pub fn new(capture: PointerCapture) -> Self {
        Self {
            capture,
            session: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn capture(&self) -> &PointerCapture {
        &self.capture
    }

    /// Pointer pressed over the bar
    pub fn begin(
        &mut self,
        state: &mut PlaybackState,
        pointer_x: f32,
        bar: BarGeometry,
    ) -> Result<(), TransitionError> {
        if self.session.is_some() {
            tracing::debug!("Ignoring pointer-down: drag session already active");
            return Ok(());
        }

        state.transition(Transition::BeginSeek)?;
        self.session = Some(DragSession {
            bar,
            pointer_x,
            moved: false,
            _capture: self.capture.acquire(),
        });
        Ok(())
    }

    /// Pointer moved anywhere while the session is active
    pub fn update(&mut self, state: &mut PlaybackState, media: &mut impl MediaHandle, pointer_x: f32) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.pointer_x = pointer_x;
        session.moved = true;
        let target = seek_target(pointer_x, session.bar, state.duration);
        apply_seek(state, media, target);
    }

    /// Pointer released anywhere
    ///
    /// A press without any move in between is a click and seeks once to the
    /// pressed coordinate; after a drag the last move's value stands.
    pub fn end(&mut self, state: &mut PlaybackState, media: &mut impl MediaHandle) {
        let Some(session) = self.session.take() else {
            return;
        };

        if !session.moved {
            let target = seek_target(session.pointer_x, session.bar, state.duration);
            apply_seek(state, media, target);
        }

        if let Err(e) = state.transition(Transition::EndSeek) {
            tracing::warn!("Drag session ended in unexpected status: {}", e);
        }
        // Dropping the session detaches the global listeners
        drop(session);
    }

    /// Abandon the session without seeking (source replaced, widget closed)
    pub fn cancel(&mut self) {
        if self.session.take().is_some() {
            tracing::debug!("Drag session cancelled");
        }
    }
}

fn apply_seek(state: &mut PlaybackState, media: &mut impl MediaHandle, target: Duration) {
    tracing::trace!("Seek to {:?}", target);
    state.position = target;
    media.set_position(target);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::media::testing::FakeMedia;
    use crate::player::media::{Generation, SourceId};
    use crate::player::status::PlayerStatus;

    const BAR: BarGeometry = BarGeometry {
        left: 100.0,
        width: 200.0,
    };

    fn ready(duration_secs: u64) -> PlaybackState {
        let mut state =
            PlaybackState::new(SourceId::from("track.flac"), Generation::new(1), 1.0, false);
        state.duration = Duration::from_secs(duration_secs);
        state.status = PlayerStatus::Ready;
        state
    }

    #[test]
    fn test_seek_target_inside_bar() {
        let duration = Duration::from_secs(120);
        assert_eq!(seek_target(100.0, BAR, duration), Duration::ZERO);
        assert_eq!(seek_target(200.0, BAR, duration), Duration::from_secs(60));
        assert_eq!(seek_target(300.0, BAR, duration), duration);
        for x in (100..=300).step_by(7) {
            let target = seek_target(x as f32, BAR, duration);
            assert!(target <= duration);
        }
    }

    #[test]
    fn test_seek_target_clamps_outside_bar() {
        let duration = Duration::from_secs(90);
        assert_eq!(seek_target(-40.0, BAR, duration), Duration::ZERO);
        assert_eq!(seek_target(99.0, BAR, duration), Duration::ZERO);
        assert_eq!(seek_target(301.0, BAR, duration), duration);
        assert_eq!(seek_target(5000.0, BAR, duration), duration);
    }

    #[test]
    fn test_zero_duration_targets_zero() {
        assert_eq!(seek_target(250.0, BAR, Duration::ZERO), Duration::ZERO);
    }

    #[test]
    fn test_degenerate_bar_targets_zero() {
        let duration = Duration::from_secs(60);
        let flat = BarGeometry::new(100.0, 0.0);
        assert_eq!(seek_target(150.0, flat, duration), Duration::ZERO);
        let inverted = BarGeometry::new(100.0, -20.0);
        assert_eq!(seek_target(150.0, inverted, duration), Duration::ZERO);
        let broken = BarGeometry::new(f32::NAN, 100.0);
        assert_eq!(seek_target(150.0, broken, duration), Duration::ZERO);
    }

    #[test]
    fn test_drag_seeks_live_and_not_on_release() {
        let mut state = ready(100);
        let mut media = FakeMedia::new();
        let mut controller = DragSeekController::default();

        controller.begin(&mut state, 120.0, BAR).unwrap();
        assert!(state.is_dragging());
        assert!(media.seeks().is_empty());

        controller.update(&mut state, &mut media, 150.0);
        assert_eq!(state.position(), Duration::from_secs(25));
        controller.update(&mut state, &mut media, 400.0);
        assert_eq!(state.position(), Duration::from_secs(100));

        controller.end(&mut state, &mut media);
        assert_eq!(
            media.seeks(),
            vec![Duration::from_secs(25), Duration::from_secs(100)]
        );
        assert_eq!(state.status(), &PlayerStatus::Paused);
    }

    #[test]
    fn test_click_seeks_exactly_once() {
        let mut state = ready(80);
        let mut media = FakeMedia::new();
        let mut controller = DragSeekController::default();

        controller.begin(&mut state, 150.0, BAR).unwrap();
        controller.end(&mut state, &mut media);

        assert_eq!(media.seeks(), vec![Duration::from_secs(20)]);
        assert_eq!(state.position(), Duration::from_secs(20));
    }

    #[test]
    fn test_capture_released_on_end_and_cancel() {
        let mut state = ready(10);
        let mut media = FakeMedia::new();
        let capture = PointerCapture::new();
        let mut controller = DragSeekController::new(capture.clone());

        controller.begin(&mut state, 110.0, BAR).unwrap();
        assert_eq!(capture.active(), 1);
        controller.end(&mut state, &mut media);
        assert_eq!(capture.active(), 0);

        controller.begin(&mut state, 110.0, BAR).unwrap();
        controller.cancel();
        assert_eq!(capture.active(), 0);
        assert!(!controller.is_active());
    }

    #[test]
    fn test_second_press_keeps_first_session() {
        let mut state = ready(10);
        let capture = PointerCapture::new();
        let mut controller = DragSeekController::new(capture.clone());

        controller.begin(&mut state, 110.0, BAR).unwrap();
        controller.begin(&mut state, 250.0, BAR).unwrap();
        assert_eq!(capture.active(), 1);
        assert_eq!(controller.session().map(|s| s.pointer_x()), Some(110.0));
    }

    #[test]
    fn test_begin_rejected_while_loading() {
        let mut state =
            PlaybackState::new(SourceId::from("track.flac"), Generation::new(1), 1.0, false);
        let capture = PointerCapture::new();
        let mut controller = DragSeekController::new(capture.clone());

        assert!(controller.begin(&mut state, 150.0, BAR).is_err());
        assert!(!controller.is_active());
        assert_eq!(capture.active(), 0);
    }
}
