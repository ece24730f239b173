//! Transport state for a single audio source.
//!
//! The component owns one `PlaybackState` per mounted source and feeds it the
//! media element's `timeupdate`, `loadedmetadata` and `ended` events. Every
//! method here is total: NaN, infinite or negative inputs collapse to safe
//! defaults instead of leaking into the rendered position.

/// What the component should ask the media element to do after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCommand {
    Play,
    Pause,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub current_time: f64,
    /// `None` until metadata has loaded (or when the source reports no finite length).
    pub duration: Option<f64>,
    pub volume: f64,
    pub is_muted: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_playing: false,
            current_time: 0.0,
            duration: None,
            volume: 1.0,
            is_muted: false,
        }
    }
}

impl PlaybackState {
    /// Reset the transport when the player is handed a new source. Volume and mute
    /// are player preferences and carry over.
    pub fn load_source(&mut self) {
        self.is_playing = false;
        self.current_time = 0.0;
        self.duration = None;
    }

    /// Optimistically flip the play state and report which command to issue.
    pub fn toggle_play(&mut self) -> TransportCommand {
        let command = if self.is_playing {
            TransportCommand::Pause
        } else {
            TransportCommand::Play
        };
        self.is_playing = !self.is_playing;
        command
    }

    /// The platform refused to start playback (autoplay policy, decode failure).
    pub fn play_rejected(&mut self) {
        self.is_playing = false;
    }

    /// Seek to `fraction` of the track width. Returns the new position in seconds.
    pub fn seek(&mut self, fraction: f64) -> f64 {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let target = match self.duration {
            Some(duration) => fraction * duration,
            None => 0.0,
        };
        self.current_time = target;
        target
    }

    pub fn set_volume(&mut self, volume: f64) {
        if !volume.is_finite() {
            return;
        }
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn toggle_mute(&mut self) {
        self.is_muted = !self.is_muted;
    }

    /// Volume the media element should actually play at.
    pub fn effective_volume(&self) -> f64 {
        if self.is_muted {
            0.0
        } else {
            self.volume
        }
    }

    pub fn on_time_update(&mut self, time: f64) {
        if !time.is_finite() {
            return;
        }
        let time = time.max(0.0);
        self.current_time = match self.duration {
            Some(duration) => time.min(duration),
            None => time,
        };
    }

    pub fn on_metadata(&mut self, duration: f64) {
        self.duration = (duration.is_finite() && duration > 0.0).then_some(duration);
        if let Some(duration) = self.duration {
            self.current_time = self.current_time.min(duration);
        }
    }

    pub fn on_ended(&mut self) {
        self.is_playing = false;
        self.current_time = 0.0;
    }

    /// Width of the progress fill, 0..=100.
    pub fn progress_percent(&self) -> f64 {
        match self.duration {
            Some(duration) => (self.current_time / duration * 100.0).clamp(0.0, 100.0),
            None => 0.0,
        }
    }

    pub fn elapsed_label(&self) -> String {
        format_time(self.current_time)
    }

    pub fn duration_label(&self) -> String {
        self.duration
            .map(format_time)
            .unwrap_or_else(|| "--:--".to_string())
    }
}

/// `M:SS` with unpadded minutes. Negative or non-finite input renders as `0:00`.
pub fn format_time(seconds: f64) -> String {
    let whole = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let mins = whole / 60;
    let secs = whole % 60;
    format!("{}:{:02}", mins, secs)
}

/// Horizontal click position as a fraction of a left-to-right track.
/// A collapsed track yields 0.
pub fn track_fraction(click_x: f64, track_left: f64, track_width: f64) -> f64 {
    if !(track_width.is_finite() && track_width > 0.0) {
        return 0.0;
    }
    ((click_x - track_left) / track_width).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::{format_time, track_fraction, PlaybackState, TransportCommand};

    fn loaded(duration: f64) -> PlaybackState {
        let mut state = PlaybackState::default();
        state.on_metadata(duration);
        state
    }

    #[test]
    fn format_time_pads_seconds_only() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(5.0), "0:05");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(65.9), "1:05");
        assert_eq!(format_time(3599.0), "59:59");
        assert_eq!(format_time(3600.0), "60:00");
    }

    #[test]
    fn format_time_treats_garbage_as_zero() {
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(-12.0), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
    }

    #[test]
    fn toggle_play_alternates_commands() {
        let mut state = PlaybackState::default();
        assert_eq!(state.toggle_play(), TransportCommand::Play);
        assert!(state.is_playing);
        assert_eq!(state.toggle_play(), TransportCommand::Pause);
        assert!(!state.is_playing);
    }

    #[test]
    fn rejected_play_reconciles_state() {
        let mut state = PlaybackState::default();
        state.toggle_play();
        state.play_rejected();
        assert!(!state.is_playing);
        assert_eq!(state.toggle_play(), TransportCommand::Play);
    }

    #[test]
    fn seek_scales_by_duration() {
        let mut state = loaded(200.0);
        assert_eq!(state.seek(0.25), 50.0);
        assert_eq!(state.current_time, 50.0);
        assert_eq!(state.seek(1.5), 200.0);
        assert_eq!(state.seek(-0.5), 0.0);
    }

    #[test]
    fn seek_without_duration_lands_on_zero() {
        let mut state = PlaybackState::default();
        state.on_metadata(f64::NAN);
        assert_eq!(state.duration, None);
        assert_eq!(state.seek(0.7), 0.0);

        state.on_metadata(0.0);
        let position = state.seek(f64::NAN);
        assert_eq!(position, 0.0);
        assert!(!state.current_time.is_nan());
        assert_eq!(state.progress_percent(), 0.0);
    }

    #[test]
    fn unmute_restores_previous_volume() {
        let mut state = PlaybackState::default();
        state.set_volume(0.35);
        state.toggle_mute();
        assert_eq!(state.effective_volume(), 0.0);
        assert_eq!(state.volume, 0.35);
        state.toggle_mute();
        assert_eq!(state.effective_volume(), 0.35);
    }

    #[test]
    fn volume_is_clamped_and_ignores_nan() {
        let mut state = PlaybackState::default();
        state.set_volume(3.0);
        assert_eq!(state.volume, 1.0);
        state.set_volume(f64::NAN);
        assert_eq!(state.volume, 1.0);
        state.set_volume(-1.0);
        assert_eq!(state.volume, 0.0);
    }

    #[test]
    fn ended_resets_regardless_of_prior_state() {
        let mut state = loaded(90.0);
        state.toggle_play();
        state.on_time_update(88.0);
        state.on_ended();
        assert!(!state.is_playing);
        assert_eq!(state.current_time, 0.0);

        let mut idle = PlaybackState::default();
        idle.on_ended();
        assert!(!idle.is_playing);
        assert_eq!(idle.current_time, 0.0);
    }

    #[test]
    fn time_updates_stay_within_duration() {
        let mut state = loaded(30.0);
        state.on_time_update(45.0);
        assert_eq!(state.current_time, 30.0);
        state.on_time_update(-3.0);
        assert_eq!(state.current_time, 0.0);
        state.on_time_update(15.0);
        assert_eq!(state.progress_percent(), 50.0);
    }

    #[test]
    fn duration_label_waits_for_metadata() {
        let mut state = PlaybackState::default();
        assert_eq!(state.duration_label(), "--:--");
        state.on_metadata(125.0);
        assert_eq!(state.duration_label(), "2:05");
    }

    #[test]
    fn load_source_keeps_volume_preferences() {
        let mut state = loaded(60.0);
        state.set_volume(0.5);
        state.toggle_mute();
        state.toggle_play();
        state.on_time_update(20.0);
        state.load_source();
        assert_eq!(state.duration, None);
        assert_eq!(state.current_time, 0.0);
        assert!(!state.is_playing);
        assert!(state.is_muted);
        assert_eq!(state.volume, 0.5);
    }

    #[test]
    fn click_position_maps_to_seek_target() {
        let mut state = loaded(200.0);
        let fraction = track_fraction(130.0, 100.0, 300.0);
        assert_eq!(fraction, 0.1);
        assert_eq!(state.seek(fraction), 20.0);
        assert_eq!(state.progress_percent(), 10.0);
    }

    #[test]
    fn clicks_outside_or_on_collapsed_track_stay_in_range() {
        assert_eq!(track_fraction(50.0, 100.0, 300.0), 0.0);
        assert_eq!(track_fraction(500.0, 100.0, 300.0), 1.0);
        assert_eq!(track_fraction(120.0, 100.0, 0.0), 0.0);
        assert_eq!(track_fraction(120.0, 100.0, f64::NAN), 0.0);
    }
}
