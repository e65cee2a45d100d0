//! Real-time playback of a frame schedule.
//!
//! The renderer drives a [`FramePlayback`] from its own loop: each call to
//! [`FramePlayback::update`] checks the wall clock and moves to the next frame once the frame
//! duration has elapsed, wrapping back to the first frame after the last one.

#![expect(
    clippy::module_name_repetitions,
    reason = "Playback names read better unqualified at call sites."
)]

use std::{
    fmt::Debug,
    time::{Duration, Instant},
};

use log::debug;

use crate::schedule::{FrameSchedule, ScheduledCell};

/// Playback state over a [`FrameSchedule`].
///
/// This structure owns the schedule being played together with the timing state needed to walk
/// its frames at the configured speed.
#[derive(Clone, Debug)]
pub struct FramePlayback<C> {
    /// Schedule being played.
    schedule: FrameSchedule<C>,
    /// Time each frame stays on screen.
    frame_duration: Duration,
    /// Frame currently shown.
    current_frame: usize,
    /// Time at which the current frame was entered.
    last_update_time: Instant,
}

impl<C: Copy + Eq + Debug> FramePlayback<C> {
    /// Starts playing `schedule` from its first frame.
    ///
    /// The frame duration is read from the schedule once. The clock starts immediately, so the
    /// first call to [`FramePlayback::update`] waits a full frame before advancing.
    pub fn new(schedule: FrameSchedule<C>) -> Self {
        let frame_duration = Duration::from_millis(schedule.frame_duration_ms());

        Self {
            schedule,
            frame_duration,
            current_frame: 0,
            last_update_time: Instant::now(),
        }
    }

    /// Rewinds to the first frame.
    ///
    /// The clock restarts as well, so the first frame is shown for its full duration again.
    pub fn reset(&mut self) {
        self.current_frame = 0;
        self.last_update_time = Instant::now();
    }

    /// Moves to the next frame if the current one has been shown long enough.
    ///
    /// Returns whether the frame changed. At most one frame is advanced per call, so a renderer
    /// that falls behind slows the animation down instead of skipping frames.
    pub fn update(&mut self) -> bool {
        if self.last_update_time.elapsed() < self.frame_duration {
            return false;
        }

        self.last_update_time = Instant::now();
        self.tick();
        true
    }

    /// Moves to the next frame regardless of timing, wrapping after the last frame.
    ///
    /// An empty schedule stays on frame zero.
    pub fn tick(&mut self) {
        let next = self.current_frame + 1;
        if next < self.schedule.total_frames() {
            self.current_frame = next;
        } else {
            debug!("Playback looped after {} frames", self.schedule.total_frames());
            self.current_frame = 0;
        }
    }

    /// Returns the entries active at the current frame.
    ///
    /// This is what a renderer draws on top of the static walls for the frame being shown.
    pub fn visible(&self) -> Vec<&ScheduledCell<C>> {
        self.schedule.active_at(self.current_frame)
    }

    /// Returns the index of the frame currently shown.
    pub const fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Returns the schedule being played.
    pub const fn schedule(&self) -> &FrameSchedule<C> {
        &self.schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        pathfinding::ExplorationTrace,
        schedule::{Role, ScheduleOptions},
    };

    /// Builds a playback over a three-frame exploration, a four-cell path and a short pause.
    fn playback(frame_duration_ms: u64) -> FramePlayback<usize> {
        let trace = ExplorationTrace {
            exploration_order: vec![10, 11, 12],
            path: vec![0, 10, 11, 99],
        };
        let schedule = FrameSchedule::assemble(
            &trace,
            0,
            99,
            ScheduleOptions {
                pause_frames: 3,
                frame_duration_ms,
            },
        )
        .expect("small schedule");

        FramePlayback::new(schedule)
    }

    #[test]
    fn test_tick_wraps_after_last_frame() {
        let mut playback = playback(60);
        let total = playback.schedule().total_frames();

        for _ in 1..total {
            playback.tick();
        }
        assert_eq!(playback.current_frame(), total - 1, "reached the last frame");

        playback.tick();
        assert_eq!(playback.current_frame(), 0, "looped back to the start");
    }

    #[test]
    fn test_update_waits_for_frame_duration() {
        let mut playback = playback(60_000);

        assert!(!playback.update(), "a minute has not passed yet");
        assert_eq!(playback.current_frame(), 0, "still on the first frame");
    }

    #[test]
    fn test_update_advances_without_delay() {
        let mut playback = playback(0);

        assert!(playback.update(), "zero-length frames advance immediately");
        assert_eq!(playback.current_frame(), 1, "moved to the second frame");
    }

    #[test]
    fn test_visible_follows_schedule() {
        let mut playback = playback(60);

        let first: Vec<_> = playback.visible().iter().map(|entry| entry.cell).collect();
        assert_eq!(first, vec![0, 99, 10], "anchors and the first explored cell");

        playback.tick();
        playback.tick();
        let third: Vec<_> = playback.visible().iter().map(|entry| entry.cell).collect();
        assert_eq!(third, vec![0, 99, 10, 11, 12], "all explored cells by frame two");

        playback.reset();
        assert_eq!(playback.current_frame(), 0, "reset rewinds");
        assert!(
            playback
                .visible()
                .iter()
                .all(|entry| entry.role != Role::Path),
            "no path on the first frame"
        );
    }
}
