#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationMode {
    Running,
    Paused,
}

impl AnimationMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Running => Self::Paused,
            Self::Paused => Self::Running,
        }
    }
}

/// Ticker speed in cells per second.
pub const TICKER_SPEED: f64 = 4.0;
const TICKER_MAX_FRAME_DELTA: f64 = 0.25;

/// Advance the ticker scroll offset and wrap it at `wrap_width`, the width of
/// one ticker sequence.
///
/// Returns the new offset and the tick to pass back on the next call. Gaps
/// between frames are clamped so a stalled frame never jumps the ticker.
pub fn advance_ticker_offset(
    offset: f64,
    last_tick: Option<f64>,
    now_seconds: f64,
    mode: AnimationMode,
    wrap_width: f64,
) -> (f64, Option<f64>) {
    if wrap_width <= 0.0 {
        return (0.0, Some(now_seconds));
    }

    let delta = last_tick
        .map(|last| (now_seconds - last).max(0.0).min(TICKER_MAX_FRAME_DELTA))
        .unwrap_or(0.0);

    let next_offset = match mode {
        AnimationMode::Running => (offset + delta * TICKER_SPEED).rem_euclid(wrap_width),
        AnimationMode::Paused => offset.rem_euclid(wrap_width),
    };

    (next_offset, Some(now_seconds))
}

#[cfg(test)]
mod tests {
    use super::{advance_ticker_offset, AnimationMode, TICKER_SPEED};

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(
            diff < 1e-9,
            "expected {expected}, got {actual}, diff {diff}"
        );
    }

    #[test]
    fn first_tick_initializes_time_without_advancing() {
        let (offset, last_tick) =
            advance_ticker_offset(3.0, None, 10.0, AnimationMode::Running, 40.0);

        assert_close(offset, 3.0);
        assert_eq!(last_tick, Some(10.0));
    }

    #[test]
    fn running_mode_advances_and_wraps_at_one_sequence() {
        let (offset, last_tick) =
            advance_ticker_offset(39.5, Some(4.0), 4.2, AnimationMode::Running, 40.0);

        let expected = (39.5 + 0.2 * TICKER_SPEED).rem_euclid(40.0);
        assert_close(offset, expected);
        assert!(offset < 40.0);
        assert_eq!(last_tick, Some(4.2));
    }

    #[test]
    fn paused_mode_keeps_offset_but_updates_clock() {
        let (offset, last_tick) =
            advance_ticker_offset(12.25, Some(1.0), 1.2, AnimationMode::Paused, 40.0);

        assert_close(offset, 12.25);
        assert_eq!(last_tick, Some(1.2));
    }

    #[test]
    fn large_frame_gap_is_clamped() {
        let (offset, _) = advance_ticker_offset(0.0, Some(3.0), 30.0, AnimationMode::Running, 400.0);

        assert_close(offset, 0.25 * TICKER_SPEED);
    }

    #[test]
    fn backwards_time_does_not_reverse_the_ticker() {
        let (offset, last_tick) =
            advance_ticker_offset(3.5, Some(10.0), 9.0, AnimationMode::Running, 40.0);

        assert_close(offset, 3.5);
        assert_eq!(last_tick, Some(9.0));
    }

    #[test]
    fn shrinking_track_rewraps_offset() {
        let (offset, _) = advance_ticker_offset(50.0, Some(1.0), 1.0, AnimationMode::Paused, 20.0);
        assert_close(offset, 10.0);

        let (empty, _) = advance_ticker_offset(50.0, Some(1.0), 2.0, AnimationMode::Running, 0.0);
        assert_close(empty, 0.0);
    }

    #[test]
    fn toggling_mode() {
        assert_eq!(AnimationMode::Running.toggled(), AnimationMode::Paused);
        assert_eq!(AnimationMode::Paused.toggled(), AnimationMode::Running);
    }
}
