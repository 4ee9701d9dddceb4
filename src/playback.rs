//! Global playback coordinator
//!
//! Single authority over what is playing, whether playback is active, and
//! whether the full Watch surface or the floating miniplayer owns the media
//! binding. Views never talk to each other about playback; they read and
//! mutate this state between frames.

#![allow(dead_code)]

use std::collections::HashMap;

/// Saved positions below this are not worth a resume prompt.
pub const RESUME_THRESHOLD_SECS: f64 = 10.0;

/// Lifecycle of one playback session. A session is created by
/// `set_active_content` and ends in `Closed`; switching content re-enters
/// `Loading` for the new id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Loading,
    Playing,
    Paused,
    Closed,
}

/// How a video URL is handed to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Plain file URL, fed to the surface directly.
    Direct,
    /// Adaptive-streaming manifest, handled by the streaming path.
    Adaptive,
}

/// Pick the playback path from the URL shape.
pub fn resolve_source(url: &str) -> SourceKind {
    if url.contains(".m3u8") {
        SourceKind::Adaptive
    } else {
        SourceKind::Direct
    }
}

/// Which surface may bind the media element this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceOwner {
    None,
    Watch,
    Miniplayer,
}

pub struct PlaybackCoordinator {
    active_content_id: Option<String>,
    playing: bool,
    miniplayer_active: bool,
    state: SessionState,
    seek_serial: u64,
    seek_delta: f64,
}

impl PlaybackCoordinator {
    pub fn new() -> Self {
        Self {
            active_content_id: None,
            playing: false,
            miniplayer_active: false,
            state: SessionState::Idle,
            seek_serial: 0,
            seek_delta: 0.0,
        }
    }

    pub fn active_content_id(&self) -> Option<&str> {
        self.active_content_id.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_miniplayer_active(&self) -> bool {
        self.miniplayer_active
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Point the session at a content id. Does not start playback; the
    /// owning view decides that. Re-setting the current id is a no-op so a
    /// re-rendered view does not restart a healthy session.
    pub fn set_active_content(&mut self, id: &str) {
        if self.active_content_id.as_deref() == Some(id) {
            return;
        }
        self.active_content_id = Some(id.to_string());
        self.state = SessionState::Loading;
    }

    /// The bound surface finished source resolution and is ready to render.
    pub fn note_source_ready(&mut self) {
        if self.state == SessionState::Loading {
            self.state = if self.playing {
                SessionState::Playing
            } else {
                SessionState::Paused
            };
        }
    }

    /// Flip the play/pause intent. Surfaces react on their own element and
    /// surface a rejected play as an error state instead of crashing.
    pub fn set_playing(&mut self, playing: bool) {
        if self.active_content_id.is_none() {
            return;
        }
        self.playing = playing;
        match self.state {
            SessionState::Playing if !playing => self.state = SessionState::Paused,
            SessionState::Paused if playing => self.state = SessionState::Playing,
            _ => {}
        }
    }

    /// Activate or deactivate the floating player. Activation is always the
    /// Watch view's call (directly or via `leave_watch`); deactivation
    /// unmounts any floating surface on the next frame.
    pub fn set_miniplayer_active(&mut self, active: bool) {
        self.miniplayer_active = active;
    }

    /// Broadcast a relative seek. The serial is monotonic so any number of
    /// future frames of the bound surface can observe "a seek of this
    /// magnitude was requested" without a shared element reference.
    pub fn trigger_seek(&mut self, delta_secs: f64) {
        self.seek_serial += 1;
        self.seek_delta = delta_secs;
    }

    pub fn seek_serial(&self) -> u64 {
        self.seek_serial
    }

    pub fn seek_delta(&self) -> f64 {
        self.seek_delta
    }

    /// The Watch route takes over rendering: the miniplayer must release the
    /// binding before the Watch surface claims it.
    pub fn open_watch(&mut self, id: &str) {
        self.miniplayer_active = false;
        self.set_active_content(id);
        self.playing = true;
    }

    /// Called by the Watch view before navigating away. The session only
    /// survives the route change as a miniplayer; `auto_miniplayer` is the
    /// user preference read at navigation time.
    pub fn leave_watch(&mut self, auto_miniplayer: bool) {
        if self.active_content_id.is_none() {
            return;
        }
        if auto_miniplayer && self.playing {
            self.miniplayer_active = true;
        }
        if !self.miniplayer_active {
            self.close();
        }
    }

    /// End the session. Terminal: a new `set_active_content` starts fresh.
    pub fn close(&mut self) {
        self.active_content_id = None;
        self.playing = false;
        self.miniplayer_active = false;
        self.state = SessionState::Closed;
    }

    /// Route/flag gating that keeps the two surfaces mutually exclusive.
    /// At most one caller per frame gets a non-`None` answer.
    pub fn renderer(&self, on_watch_route: bool) -> SurfaceOwner {
        if self.active_content_id.is_none() {
            return SurfaceOwner::None;
        }
        if on_watch_route {
            SurfaceOwner::Watch
        } else if self.miniplayer_active {
            SurfaceOwner::Miniplayer
        } else {
            SurfaceOwner::None
        }
    }
}

/// Last-known playback position per content id. Written synchronously when
/// a Watch session tears down or switches content; entries are never
/// expired automatically.
pub struct ProgressStore {
    positions: HashMap<String, f64>,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self {
            positions: HashMap::new(),
        }
    }

    /// Restore from the persisted JSON blob; corrupt data means an empty
    /// store, never an error.
    pub fn from_json(json: &str) -> Self {
        let positions = if json.is_empty() {
            HashMap::new()
        } else {
            serde_json::from_str(json).unwrap_or_default()
        };
        Self { positions }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.positions).unwrap_or_default()
    }

    pub fn record(&mut self, id: &str, seconds: f64) {
        self.positions.insert(id.to_string(), seconds.max(0.0));
    }

    pub fn get(&self, id: &str) -> Option<f64> {
        self.positions.get(id).copied()
    }

    pub fn clear(&mut self, id: &str) {
        self.positions.remove(id);
    }

    /// Position to offer in the resume prompt, if it is worth prompting.
    pub fn resume_point(&self, id: &str) -> Option<f64> {
        self.get(id).filter(|&secs| secs > RESUME_THRESHOLD_SECS)
    }
}

/// Format seconds as MM:SS for the player chrome and the resume prompt.
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}
