//! Tests for the global playback coordinator and progress store

#[cfg(test)]
mod tests {
    use crate::playback::*;

    #[test]
    fn test_new_session_is_idle() {
        let coordinator = PlaybackCoordinator::new();
        assert_eq!(coordinator.state(), SessionState::Idle);
        assert_eq!(coordinator.active_content_id(), None);
        assert!(!coordinator.is_playing());
        assert!(!coordinator.is_miniplayer_active());
    }

    #[test]
    fn test_set_active_content_enters_loading() {
        let mut coordinator = PlaybackCoordinator::new();
        coordinator.set_active_content("t1");
        assert_eq!(coordinator.active_content_id(), Some("t1"));
        assert_eq!(coordinator.state(), SessionState::Loading);
        // setActiveContent alone does not start playback
        assert!(!coordinator.is_playing());
    }

    #[test]
    fn test_repeat_set_active_content_is_noop() {
        let mut coordinator = PlaybackCoordinator::new();
        coordinator.open_watch("t1");
        coordinator.note_source_ready();
        assert_eq!(coordinator.state(), SessionState::Playing);
        // Re-rendering the same content must not restart the session
        coordinator.set_active_content("t1");
        assert_eq!(coordinator.state(), SessionState::Playing);
    }

    #[test]
    fn test_play_pause_transitions() {
        let mut coordinator = PlaybackCoordinator::new();
        coordinator.open_watch("t1");
        coordinator.note_source_ready();
        assert_eq!(coordinator.state(), SessionState::Playing);

        coordinator.set_playing(false);
        assert_eq!(coordinator.state(), SessionState::Paused);
        coordinator.set_playing(true);
        assert_eq!(coordinator.state(), SessionState::Playing);
    }

    #[test]
    fn test_set_playing_without_session_is_noop() {
        let mut coordinator = PlaybackCoordinator::new();
        coordinator.set_playing(true);
        assert!(!coordinator.is_playing());
        assert_eq!(coordinator.state(), SessionState::Idle);
    }

    #[test]
    fn test_source_ready_respects_intent() {
        let mut coordinator = PlaybackCoordinator::new();
        coordinator.set_active_content("t1");
        // No play intent yet: ready lands in Paused
        coordinator.note_source_ready();
        assert_eq!(coordinator.state(), SessionState::Paused);
    }

    #[test]
    fn test_switching_content_reenters_loading() {
        let mut coordinator = PlaybackCoordinator::new();
        coordinator.open_watch("t1");
        coordinator.note_source_ready();
        assert_eq!(coordinator.state(), SessionState::Playing);

        coordinator.open_watch("t2");
        assert_eq!(coordinator.active_content_id(), Some("t2"));
        assert_eq!(coordinator.state(), SessionState::Loading);
    }

    #[test]
    fn test_close_is_terminal() {
        let mut coordinator = PlaybackCoordinator::new();
        coordinator.open_watch("t1");
        coordinator.close();
        assert_eq!(coordinator.state(), SessionState::Closed);
        assert_eq!(coordinator.active_content_id(), None);
        assert!(!coordinator.is_playing());
        assert!(!coordinator.is_miniplayer_active());

        // A fresh session starts over from Loading
        coordinator.set_active_content("t2");
        assert_eq!(coordinator.state(), SessionState::Loading);
    }

    #[test]
    fn test_open_watch_deactivates_miniplayer() {
        let mut coordinator = PlaybackCoordinator::new();
        coordinator.open_watch("t1");
        coordinator.note_source_ready();
        coordinator.leave_watch(true);
        assert!(coordinator.is_miniplayer_active());
        assert_eq!(coordinator.renderer(false), SurfaceOwner::Miniplayer);

        // Navigating back to the watch route: the miniplayer must release
        // the binding before the Watch surface takes over.
        coordinator.open_watch("t1");
        assert!(!coordinator.is_miniplayer_active());
        assert_eq!(coordinator.renderer(true), SurfaceOwner::Watch);
        assert_eq!(coordinator.renderer(false), SurfaceOwner::None);
    }

    #[test]
    fn test_renderer_is_mutually_exclusive() {
        let mut coordinator = PlaybackCoordinator::new();
        assert_eq!(coordinator.renderer(false), SurfaceOwner::None);
        assert_eq!(coordinator.renderer(true), SurfaceOwner::None);

        coordinator.open_watch("t1");
        coordinator.set_miniplayer_active(true);
        // Even with the flag up, the watch route always wins
        assert_eq!(coordinator.renderer(true), SurfaceOwner::Watch);
        assert_eq!(coordinator.renderer(false), SurfaceOwner::Miniplayer);
    }

    #[test]
    fn test_leave_watch_auto_activates_while_playing() {
        let mut coordinator = PlaybackCoordinator::new();
        coordinator.open_watch("t1");
        coordinator.note_source_ready();

        coordinator.leave_watch(true);
        assert!(coordinator.is_miniplayer_active());
        assert_eq!(coordinator.active_content_id(), Some("t1"));
    }

    #[test]
    fn test_leave_watch_without_miniplayer_closes_session() {
        let mut coordinator = PlaybackCoordinator::new();
        coordinator.open_watch("t1");
        coordinator.leave_watch(false);
        assert_eq!(coordinator.active_content_id(), None);
        assert_eq!(coordinator.state(), SessionState::Closed);
    }

    #[test]
    fn test_leave_watch_paused_does_not_auto_activate() {
        let mut coordinator = PlaybackCoordinator::new();
        coordinator.open_watch("t1");
        coordinator.note_source_ready();
        coordinator.set_playing(false);

        coordinator.leave_watch(true);
        assert!(!coordinator.is_miniplayer_active());
        assert_eq!(coordinator.active_content_id(), None);
    }

    #[test]
    fn test_seek_broadcast_is_monotonic() {
        let mut coordinator = PlaybackCoordinator::new();
        coordinator.open_watch("t1");
        let initial = coordinator.seek_serial();

        coordinator.trigger_seek(-10.0);
        assert_eq!(coordinator.seek_serial(), initial + 1);
        assert_eq!(coordinator.seek_delta(), -10.0);

        coordinator.trigger_seek(10.0);
        assert_eq!(coordinator.seek_serial(), initial + 2);
        assert_eq!(coordinator.seek_delta(), 10.0);
    }

    #[test]
    fn test_resolve_source_by_manifest_suffix() {
        assert_eq!(
            resolve_source("https://cdn.example.com/live/master.m3u8"),
            SourceKind::Adaptive
        );
        assert_eq!(
            resolve_source("https://cdn.example.com/live/master.m3u8?token=abc"),
            SourceKind::Adaptive
        );
        assert_eq!(
            resolve_source("https://www.w3schools.com/html/movie.mp4"),
            SourceKind::Direct
        );
        assert_eq!(resolve_source(""), SourceKind::Direct);
    }

    #[test]
    fn test_progress_round_trip() {
        let mut store = ProgressStore::new();
        store.record("t1", 42.5);
        store.record("m1", 7.0);

        let json = store.to_json();
        let restored = ProgressStore::from_json(&json);
        assert_eq!(restored.get("t1"), Some(42.5));
        assert_eq!(restored.get("m1"), Some(7.0));
    }

    #[test]
    fn test_progress_corrupt_json_is_empty() {
        let store = ProgressStore::from_json("{not json");
        assert_eq!(store.get("t1"), None);
        let store = ProgressStore::from_json("");
        assert_eq!(store.get("t1"), None);
    }

    #[test]
    fn test_progress_negative_clamps_to_zero() {
        let mut store = ProgressStore::new();
        store.record("t1", -3.0);
        assert_eq!(store.get("t1"), Some(0.0));
    }

    #[test]
    fn test_resume_point_threshold() {
        let mut store = ProgressStore::new();
        store.record("short", 7.0);
        store.record("edge", 10.0);
        store.record("long", 42.5);

        // Positions at or below 10 seconds are not worth prompting for
        assert_eq!(store.resume_point("short"), None);
        assert_eq!(store.resume_point("edge"), None);
        assert_eq!(store.resume_point("long"), Some(42.5));
        assert_eq!(store.resume_point("missing"), None);
    }

    #[test]
    fn test_clear_removes_resume_point() {
        let mut store = ProgressStore::new();
        store.record("t1", 42.5);
        store.clear("t1");
        assert_eq!(store.get("t1"), None);
        assert_eq!(store.resume_point("t1"), None);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(42.5), "00:42");
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(125.0), "02:05");
        assert_eq!(format_time(3599.9), "59:59");
        assert_eq!(format_time(-3.0), "00:00");
    }
}
