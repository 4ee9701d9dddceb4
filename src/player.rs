// Embedded video surface backed by ffmpeg-next
// Requires FFmpeg libraries: libavcodec, libavformat, libavutil, libswscale
//
// To install FFmpeg development libraries:
// - Ubuntu/Debian: sudo apt install libavcodec-dev libavformat-dev libavutil-dev libswscale-dev
// - Fedora: sudo dnf install ffmpeg-devel
// - macOS: brew install ffmpeg
// - Windows: Download from https://ffmpeg.org and set FFMPEG_DIR environment variable

use crate::playback::SourceKind;

#[cfg(feature = "internal-player")]
mod surface_impl {
    use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
    use std::sync::{Arc, Mutex};
    use std::thread;
    use std::time::{Duration, Instant};

    use crate::playback::SourceKind;

    extern crate ffmpeg_next as ffmpeg;
    use ffmpeg::format::Pixel;
    use ffmpeg::media::Type;
    use ffmpeg::software::scaling::{context::Context as ScalingContext, flag::Flags};
    use ffmpeg::util::frame::video::Video as VideoFrame;

    /// Surface state
    #[derive(Debug, Clone, PartialEq)]
    pub enum PlayerState {
        Stopped,
        Loading,
        Playing,
        Paused,
        Error(String),
    }

    /// Decoded video frame for rendering
    pub struct DecodedFrame {
        pub width: u32,
        pub height: u32,
        pub data: Vec<u8>, // RGB24 data
    }

    /// Commands to send to the decode thread
    enum PipelineCommand {
        Stop,
        Pause,
        Resume,
        SeekBy(f64),
        SeekTo(f64),
    }

    /// Messages from the decode thread
    pub enum PipelineMessage {
        StateChanged(PlayerState),
        Error(String),
        Finished,
    }

    #[derive(Default)]
    struct Timing {
        position: f64,
        duration: f64,
    }

    /// Decode pipeline feeding the surface. One pipeline per source; the
    /// previous one is destroyed before a new source is bound.
    pub struct DecodePipeline {
        state: Arc<Mutex<PlayerState>>,
        command_sender: Option<Sender<PipelineCommand>>,
        message_receiver: Option<Receiver<PipelineMessage>>,
        current_frame: Arc<Mutex<Option<DecodedFrame>>>,
        timing: Arc<Mutex<Timing>>,
        title: String,
    }

    impl DecodePipeline {
        pub fn new() -> Self {
            ffmpeg::init().ok();

            Self {
                state: Arc::new(Mutex::new(PlayerState::Stopped)),
                command_sender: None,
                message_receiver: None,
                current_frame: Arc::new(Mutex::new(None)),
                timing: Arc::new(Mutex::new(Timing::default())),
                title: String::new(),
            }
        }

        pub fn state(&self) -> PlayerState {
            self.state.lock().unwrap().clone()
        }

        pub fn title(&self) -> &str {
            &self.title
        }

        pub fn position(&self) -> f64 {
            self.timing.lock().unwrap().position
        }

        pub fn duration(&self) -> f64 {
            self.timing.lock().unwrap().duration
        }

        pub fn take_frame(&self) -> Option<DecodedFrame> {
            self.current_frame.lock().unwrap().take()
        }

        pub fn poll_messages(&mut self) -> Vec<PipelineMessage> {
            let mut messages = Vec::new();
            if let Some(ref receiver) = self.message_receiver {
                loop {
                    match receiver.try_recv() {
                        Ok(msg) => messages.push(msg),
                        Err(TryRecvError::Empty) => break,
                        Err(TryRecvError::Disconnected) => {
                            self.message_receiver = None;
                            break;
                        }
                    }
                }
            }
            messages
        }

        /// Bind a new source. Any previous pipeline is destroyed first so
        /// decoder resources never leak across rebinds.
        pub fn load(&mut self, title: &str, url: &str, kind: SourceKind, start_at: Option<f64>) {
            self.destroy();
            self.title = title.to_string();

            *self.state.lock().unwrap() = PlayerState::Loading;
            *self.timing.lock().unwrap() = Timing::default();

            let (cmd_tx, cmd_rx) = channel();
            let (msg_tx, msg_rx) = channel();

            self.command_sender = Some(cmd_tx);
            self.message_receiver = Some(msg_rx);

            let url = url.to_string();
            let state = Arc::clone(&self.state);
            let current_frame = Arc::clone(&self.current_frame);
            let timing = Arc::clone(&self.timing);

            thread::spawn(move || {
                Self::decode_thread(url, kind, start_at, state, current_frame, timing, cmd_rx, msg_tx);
            });
        }

        #[allow(clippy::too_many_arguments)]
        fn decode_thread(
            url: String,
            kind: SourceKind,
            start_at: Option<f64>,
            state: Arc<Mutex<PlayerState>>,
            current_frame: Arc<Mutex<Option<DecodedFrame>>>,
            timing: Arc<Mutex<Timing>>,
            cmd_rx: Receiver<PipelineCommand>,
            msg_tx: Sender<PipelineMessage>,
        ) {
            let mut options = ffmpeg::Dictionary::new();
            match kind {
                SourceKind::Adaptive => {
                    // Manifest playback: keep connections alive and start at
                    // the live edge when the playlist is a live one.
                    options.set("http_persistent", "1");
                    options.set("live_start_index", "-1");
                }
                SourceKind::Direct => {
                    options.set("reconnect", "1");
                    options.set("reconnect_streamed", "1");
                    options.set("reconnect_delay_max", "5");
                }
            }
            options.set("timeout", "5000000"); // 5 second timeout

            let mut ictx = match ffmpeg::format::input_with_dictionary(&url, options) {
                Ok(ctx) => ctx,
                Err(e) => {
                    *state.lock().unwrap() = PlayerState::Error(e.to_string());
                    let _ = msg_tx.send(PipelineMessage::Error(format!("Failed to open source: {}", e)));
                    return;
                }
            };

            let (video_stream_index, time_base) = match ictx.streams().best(Type::Video) {
                Some(stream) => (stream.index(), f64::from(stream.time_base())),
                None => {
                    *state.lock().unwrap() = PlayerState::Error("No video stream found".to_string());
                    let _ = msg_tx.send(PipelineMessage::Error("No video stream found".to_string()));
                    return;
                }
            };

            if ictx.duration() > 0 {
                timing.lock().unwrap().duration =
                    ictx.duration() as f64 / f64::from(ffmpeg::ffi::AV_TIME_BASE);
            }

            let video_stream = ictx.stream(video_stream_index).unwrap();
            let context_decoder =
                match ffmpeg::codec::context::Context::from_parameters(video_stream.parameters()) {
                    Ok(ctx) => ctx,
                    Err(e) => {
                        *state.lock().unwrap() = PlayerState::Error(e.to_string());
                        let _ = msg_tx.send(PipelineMessage::Error(format!("Decoder setup failed: {}", e)));
                        return;
                    }
                };

            let mut decoder = match context_decoder.decoder().video() {
                Ok(d) => d,
                Err(e) => {
                    *state.lock().unwrap() = PlayerState::Error(e.to_string());
                    let _ = msg_tx.send(PipelineMessage::Error(format!("Failed to create decoder: {}", e)));
                    return;
                }
            };

            let width = decoder.width();
            let height = decoder.height();

            // Scale down oversized sources; the UI never renders above 720p
            let (target_width, target_height) = if width > 1280 || height > 720 {
                let scale = f64::min(1280.0 / width as f64, 720.0 / height as f64);
                ((width as f64 * scale) as u32, (height as f64 * scale) as u32)
            } else {
                (width, height)
            };

            let mut scaler = match ScalingContext::get(
                decoder.format(),
                width,
                height,
                Pixel::RGB24,
                target_width,
                target_height,
                Flags::BILINEAR,
            ) {
                Ok(s) => s,
                Err(e) => {
                    *state.lock().unwrap() = PlayerState::Error(e.to_string());
                    let _ = msg_tx.send(PipelineMessage::Error(format!("Failed to create scaler: {}", e)));
                    return;
                }
            };

            *state.lock().unwrap() = PlayerState::Playing;
            let _ = msg_tx.send(PipelineMessage::StateChanged(PlayerState::Playing));

            let mut paused = false;
            let mut pending_seek = start_at;
            let frame_duration = Duration::from_secs_f64(1.0 / 30.0); // Target 30fps display
            let mut last_frame_time = Instant::now();

            loop {
                match cmd_rx.try_recv() {
                    Ok(PipelineCommand::Stop) => break,
                    Ok(PipelineCommand::Pause) => {
                        paused = true;
                        *state.lock().unwrap() = PlayerState::Paused;
                        let _ = msg_tx.send(PipelineMessage::StateChanged(PlayerState::Paused));
                    }
                    Ok(PipelineCommand::Resume) => {
                        paused = false;
                        *state.lock().unwrap() = PlayerState::Playing;
                        let _ = msg_tx.send(PipelineMessage::StateChanged(PlayerState::Playing));
                    }
                    Ok(PipelineCommand::SeekBy(delta)) => {
                        let current = timing.lock().unwrap().position;
                        pending_seek = Some((current + delta).max(0.0));
                    }
                    Ok(PipelineCommand::SeekTo(secs)) => {
                        pending_seek = Some(secs.max(0.0));
                    }
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => break,
                }

                if let Some(target) = pending_seek.take() {
                    let ts = (target * f64::from(ffmpeg::ffi::AV_TIME_BASE)) as i64;
                    if ictx.seek(ts, ..ts).is_ok() {
                        decoder.flush();
                        timing.lock().unwrap().position = target;
                    }
                }

                if paused {
                    thread::sleep(Duration::from_millis(50));
                    continue;
                }

                let (stream_index, packet) = match ictx.packets().next() {
                    Some((stream, packet)) => (stream.index(), packet),
                    None => break,
                };

                if stream_index != video_stream_index {
                    continue;
                }

                if decoder.send_packet(&packet).is_err() {
                    continue;
                }

                let mut decoded = VideoFrame::empty();
                while decoder.receive_frame(&mut decoded).is_ok() {
                    if let Some(pts) = decoded.pts() {
                        timing.lock().unwrap().position = pts as f64 * time_base;
                    }

                    let mut rgb_frame = VideoFrame::empty();
                    if scaler.run(&decoded, &mut rgb_frame).is_ok() {
                        let data = rgb_frame.data(0);
                        let stride = rgb_frame.stride(0);

                        // Copy frame data (handling stride)
                        let mut frame_data =
                            Vec::with_capacity((target_width * target_height * 3) as usize);
                        for y in 0..target_height as usize {
                            let row_start = y * stride;
                            let row_end = row_start + (target_width as usize * 3);
                            frame_data.extend_from_slice(&data[row_start..row_end]);
                        }

                        *current_frame.lock().unwrap() = Some(DecodedFrame {
                            width: target_width,
                            height: target_height,
                            data: frame_data,
                        });

                        // Rate limiting to avoid overwhelming the UI
                        let elapsed = last_frame_time.elapsed();
                        if elapsed < frame_duration {
                            thread::sleep(frame_duration - elapsed);
                        }
                        last_frame_time = Instant::now();
                    }
                }
            }

            *state.lock().unwrap() = PlayerState::Stopped;
            let _ = msg_tx.send(PipelineMessage::Finished);
        }

        /// Tear the pipeline down and drop the decode thread.
        pub fn destroy(&mut self) {
            if let Some(ref sender) = self.command_sender {
                let _ = sender.send(PipelineCommand::Stop);
            }
            self.command_sender = None;
            self.message_receiver = None;
            *self.state.lock().unwrap() = PlayerState::Stopped;
            *self.current_frame.lock().unwrap() = None;
            *self.timing.lock().unwrap() = Timing::default();
        }

        pub fn set_paused(&mut self, paused: bool) {
            if let Some(ref sender) = self.command_sender {
                let cmd = if paused {
                    PipelineCommand::Pause
                } else {
                    PipelineCommand::Resume
                };
                let _ = sender.send(cmd);
            }
        }

        pub fn seek_by(&mut self, delta_secs: f64) {
            if let Some(ref sender) = self.command_sender {
                let _ = sender.send(PipelineCommand::SeekBy(delta_secs));
            }
        }

        pub fn seek_to(&mut self, secs: f64) {
            if let Some(ref sender) = self.command_sender {
                let _ = sender.send(PipelineCommand::SeekTo(secs));
            }
        }
    }

    impl Drop for DecodePipeline {
        fn drop(&mut self) {
            self.destroy();
        }
    }
}

// Stub implementation when the internal-player feature is disabled
#[cfg(not(feature = "internal-player"))]
mod surface_impl {
    use crate::playback::SourceKind;

    #[derive(Debug, Clone, PartialEq)]
    pub enum PlayerState {
        Stopped,
        Loading,
        Playing,
        Paused,
        Error(String),
    }

    pub struct DecodedFrame {
        pub width: u32,
        pub height: u32,
        pub data: Vec<u8>,
    }

    pub enum PipelineMessage {
        StateChanged(PlayerState),
        Error(String),
        Finished,
    }

    pub struct DecodePipeline {
        state: PlayerState,
        title: String,
    }

    impl DecodePipeline {
        pub fn new() -> Self {
            Self {
                state: PlayerState::Stopped,
                title: String::new(),
            }
        }

        pub fn state(&self) -> PlayerState {
            self.state.clone()
        }

        pub fn title(&self) -> &str {
            &self.title
        }

        pub fn position(&self) -> f64 {
            0.0
        }

        pub fn duration(&self) -> f64 {
            0.0
        }

        pub fn take_frame(&self) -> Option<DecodedFrame> {
            None
        }

        pub fn poll_messages(&mut self) -> Vec<PipelineMessage> {
            Vec::new()
        }

        pub fn load(&mut self, title: &str, _url: &str, _kind: SourceKind, _start_at: Option<f64>) {
            self.title = title.to_string();
            self.state = PlayerState::Error(
                "Internal player not enabled. Build with --features internal-player".to_string(),
            );
        }

        pub fn destroy(&mut self) {
            self.state = PlayerState::Stopped;
        }

        pub fn set_paused(&mut self, _paused: bool) {}
        pub fn seek_by(&mut self, _delta_secs: f64) {}
        pub fn seek_to(&mut self, _secs: f64) {}
    }
}

// Re-export
pub use surface_impl::*;

/// The one media surface the app owns. Whichever view the coordinator names
/// as renderer draws it; nobody else touches it.
pub struct VideoSurface {
    pipeline: DecodePipeline,
    texture: Option<egui::TextureHandle>,
    last_error: Option<String>,
}

impl VideoSurface {
    pub fn new() -> Self {
        Self {
            pipeline: DecodePipeline::new(),
            texture: None,
            last_error: None,
        }
    }

    /// Bind a source, replacing whatever was bound before.
    pub fn load(&mut self, title: &str, url: &str, kind: SourceKind, start_at: Option<f64>) {
        self.last_error = None;
        self.texture = None;
        self.pipeline.load(title, url, kind, start_at);
    }

    /// Unbind and release decoder resources.
    pub fn destroy(&mut self) {
        self.pipeline.destroy();
        self.texture = None;
        self.last_error = None;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.pipeline.set_paused(paused);
    }

    pub fn seek_by(&mut self, delta_secs: f64) {
        self.pipeline.seek_by(delta_secs);
    }

    pub fn seek_to(&mut self, secs: f64) {
        self.pipeline.seek_to(secs);
    }

    pub fn position(&self) -> f64 {
        self.pipeline.position()
    }

    pub fn duration(&self) -> f64 {
        self.pipeline.duration()
    }

    pub fn state(&self) -> PlayerState {
        self.pipeline.state()
    }

    pub fn title(&self) -> &str {
        self.pipeline.title()
    }

    pub fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Drain pipeline messages and refresh the frame texture. Called once
    /// per frame by whichever view renders the surface.
    pub fn poll(&mut self, ctx: &egui::Context) {
        for msg in self.pipeline.poll_messages() {
            match msg {
                PipelineMessage::Error(e) => self.last_error = Some(e),
                PipelineMessage::StateChanged(_) | PipelineMessage::Finished => {}
            }
        }

        if let Some(frame) = self.pipeline.take_frame() {
            let image = egui::ColorImage::from_rgb(
                [frame.width as usize, frame.height as usize],
                &frame.data,
            );
            self.texture = Some(ctx.load_texture("video_frame", image, egui::TextureOptions::LINEAR));
        }
    }

    pub fn texture(&self) -> Option<&egui::TextureHandle> {
        self.texture.as_ref()
    }

    pub fn is_live(&self) -> bool {
        matches!(self.state(), PlayerState::Playing | PlayerState::Loading)
    }
}
