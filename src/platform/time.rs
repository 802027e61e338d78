//! Frame timing
//!
//! Turns the frame driver's millisecond timestamps (e.g. from
//! `requestAnimationFrame`) into the `dt` handed to the simulation.

use crate::consts::{MAX_FRAME_DT, NOMINAL_DT};

/// Number of frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;

#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    frames_seen: usize,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DT)
    }
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            frames_seen: 0,
        }
    }

    /// Seconds since the previous frame, clamped to `[0, max_dt]`
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => NOMINAL_DT,
        };
        self.last_ms = Some(now_ms);

        self.frame_times[self.frame_index] = now_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.frames_seen += 1;

        // Long stalls (hidden tab) would let the ball tunnel through the paddle
        dt.clamp(0.0, self.max_dt)
    }

    /// Frames per second over the last window, once a full window is recorded
    pub fn fps(&self) -> Option<u32> {
        if self.frames_seen < FPS_WINDOW {
            return None;
        }
        // Oldest entry is the next one to be overwritten
        let oldest = self.frame_times[self.frame_index];
        let newest = self.frame_times[(self.frame_index + FPS_WINDOW - 1) % FPS_WINDOW];
        let elapsed = newest - oldest;
        if elapsed <= 0.0 {
            return None;
        }
        Some((((FPS_WINDOW - 1) as f64) * 1000.0 / elapsed).round() as u32)
    }

    /// Forget the last timestamp, so the next frame uses the nominal dt
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_nominal() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.tick(12_345.0), NOMINAL_DT);
    }

    #[test]
    fn test_measures_and_clamps() {
        let mut clock = FrameClock::default();
        clock.tick(1000.0);
        assert!((clock.tick(1020.0) - 0.02).abs() < 1e-6);

        // Tab was hidden for 5 seconds
        assert_eq!(clock.tick(6020.0), MAX_FRAME_DT);

        // Clock went backwards
        assert_eq!(clock.tick(6000.0), 0.0);
    }

    #[test]
    fn test_reset_restarts_timing() {
        let mut clock = FrameClock::default();
        clock.tick(0.0);
        clock.reset();
        assert_eq!(clock.tick(90_000.0), NOMINAL_DT);
    }

    #[test]
    fn test_fps_over_window() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.fps(), None);
        for i in 0..120 {
            clock.tick(i as f64 * 1000.0 / 60.0);
        }
        assert_eq!(clock.fps(), Some(60));
    }
}
