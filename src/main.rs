//! StreamMore Desktop - Rust Edition
//! Cross-platform client for the StreamMore streaming service

// Hide console window on Windows release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// Use mimalloc for faster memory allocation (Linux, macOS)
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use eframe::egui;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

mod ai;
mod catalog;
mod config;
mod miniplayer;
mod models;
mod playback;
mod player;

#[cfg(test)]
mod ai_tests;
#[cfg(test)]
mod miniplayer_tests;
#[cfg(test)]
mod playback_tests;

use ai::{GeminiBackend, Recommender};
use catalog::{CatalogStore, CATEGORIES};
use config::AppConfig;
use miniplayer::MiniplayerPosition;
use models::*;
use playback::{
    format_time, resolve_source, PlaybackCoordinator, ProgressStore, SessionState, SurfaceOwner,
};
use player::{PlayerState, VideoSurface};

const SPLASH_DURATION: Duration = Duration::from_millis(1000);
const HERO_ADVANCE_INTERVAL: Duration = Duration::from_secs(5);
const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);
const CONTROLS_HIDE_AFTER: Duration = Duration::from_secs(5);

/// Get current time as HH:MM:SS (local)
fn timestamp_now() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Load application icon - gradient tile with a play glyph
fn load_icon() -> egui::IconData {
    let size: usize = 64;
    let mut rgba = vec![0u8; size * size * 4];

    for y in 0..size {
        for x in 0..size {
            let idx = (y * size + x) * 4;

            let nx = x as f32 / size as f32;
            let ny = y as f32 / size as f32;

            // Rounded corners
            let corner_radius = 0.14;
            let in_rounded_rect = {
                let dx = if nx < corner_radius {
                    corner_radius - nx
                } else if nx > 1.0 - corner_radius {
                    nx - (1.0 - corner_radius)
                } else {
                    0.0
                };
                let dy = if ny < corner_radius {
                    corner_radius - ny
                } else if ny > 1.0 - corner_radius {
                    ny - (1.0 - corner_radius)
                } else {
                    0.0
                };
                dx * dx + dy * dy <= corner_radius * corner_radius
            };

            if !in_rounded_rect {
                continue;
            }

            // Blue-to-cyan gradient (#2563eb to #06b6d4)
            let t = nx * 0.5 + ny * 0.5;
            let r = (37.0 + (6.0 - 37.0) * t) as u8;
            let g = (99.0 + (182.0 - 99.0) * t) as u8;
            let b = (235.0 + (212.0 - 235.0) * t) as u8;

            // Play triangle in the middle
            let px = nx - 0.40;
            let py = ny - 0.50;
            let in_play = px >= 0.0 && px <= 0.26 && py.abs() <= (0.26 - px) * 0.75;

            if in_play {
                rgba[idx] = 255;
                rgba[idx + 1] = 255;
                rgba[idx + 2] = 255;
                rgba[idx + 3] = 255;
            } else {
                rgba[idx] = r;
                rgba[idx + 1] = g;
                rgba[idx + 2] = b;
                rgba[idx + 3] = 255;
            }
        }
    }

    egui::IconData {
        rgba,
        width: size as u32,
        height: size as u32,
    }
}

/// Background task messages
enum TaskResult {
    RecommendationsLoaded {
        content_id: String,
        items: Vec<Content>,
    },
    ChatReply(String),
}

/// Admin console sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdminSection {
    Dashboard,
    Content,
    AppControl,
    Console,
}

/// Top-level navigation target
#[derive(Debug, Clone, PartialEq)]
enum Route {
    Splash,
    Auth,
    Home,
    Search,
    Watch(String),
    Downloads,
    Watchlist,
    Settings,
    Admin(AdminSection),
}

fn main() -> Result<(), eframe::Error> {
    // Force X11 backend on Linux before any windowing code runs
    #[cfg(target_os = "linux")]
    {
        std::env::set_var("WINIT_UNIX_BACKEND", "x11");
        std::env::remove_var("WAYLAND_DISPLAY");
    }

    let icon = load_icon();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1180.0, 720.0])
            .with_min_inner_size([640.0, 480.0])
            .with_icon(icon),
        vsync: true,
        hardware_acceleration: eframe::HardwareAcceleration::Preferred,
        ..Default::default()
    };

    eframe::run_native(
        "StreamMore",
        options,
        Box::new(|cc| {
            // Add emoji font support
            let mut fonts = egui::FontDefinitions::default();

            #[cfg(target_os = "windows")]
            let emoji_paths: &[&str] = &["C:\\Windows\\Fonts\\seguiemj.ttf"];

            #[cfg(target_os = "linux")]
            let emoji_paths: &[&str] = &[
                "/usr/share/fonts/truetype/noto/NotoColorEmoji.ttf",
                "/usr/share/fonts/noto-emoji/NotoColorEmoji.ttf",
                "/usr/share/fonts/google-noto-emoji/NotoColorEmoji.ttf",
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            ];

            #[cfg(target_os = "macos")]
            let emoji_paths: &[&str] = &["/System/Library/Fonts/Apple Color Emoji.ttc"];

            for path in emoji_paths {
                if let Ok(font_data) = std::fs::read(path) {
                    fonts.font_data.insert(
                        "emoji".to_owned(),
                        egui::FontData::from_owned(font_data).into(),
                    );
                    fonts
                        .families
                        .entry(egui::FontFamily::Proportional)
                        .or_default()
                        .push("emoji".to_owned());
                    break;
                }
            }

            cc.egui_ctx.set_fonts(fonts);
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(StreamMoreApp::new()))
        }),
    )
}

struct StreamMoreApp {
    // Session
    user: Option<User>,
    route: Route,
    splash_since: Instant,

    // Auth form
    login_username: String,
    login_email: String,

    // Stores
    catalog: CatalogStore,
    config: AppConfig,
    watchlist: Vec<String>,
    downloads: Vec<String>,
    progress: ProgressStore,

    // Playback
    coordinator: PlaybackCoordinator,
    surface: VideoSurface,
    seen_seek_serial: u64,
    mini_pos: Option<MiniplayerPosition>,

    // Watch view state
    controls_visible: bool,
    last_interaction: Instant,
    watch_error: bool,
    watch_fullscreen: bool,
    show_resume_prompt: bool,
    resume_at: f64,

    // Recommendations
    recommender: Arc<Recommender>,
    recommendations: Vec<Content>,
    recs_loading: bool,

    // Background task channel
    task_receiver: Receiver<TaskResult>,
    task_sender: Sender<TaskResult>,

    // Home
    hero_index: usize,
    hero_last_advance: Instant,

    // Search
    search_input: String,
    search_committed: String,
    search_deadline: Option<Instant>,
    search_type_filter: Option<ContentType>,

    // StreamBuddy chat
    chat_open: bool,
    chat_messages: Vec<ChatMessage>,
    chat_input: String,
    chat_waiting: bool,

    // Admin content editor
    edit_id: Option<String>,
    edit_title: String,
    edit_description: String,
    edit_category: String,
    edit_video_url: String,
    edit_thumbnail: String,
    edit_type: ContentType,
    edit_rating: f32,
    edit_year: i32,
    edit_featured: bool,
    edit_trending: bool,

    // Console log
    console_log: Vec<String>,
    status_message: String,
}

impl Default for StreamMoreApp {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamMoreApp {
    fn new() -> Self {
        let config = AppConfig::load();
        let (task_sender, task_receiver) = channel();

        // Load downloads from JSON
        let downloads: Vec<String> = if !config.downloads_json.is_empty() {
            serde_json::from_str(&config.downloads_json).unwrap_or_default()
        } else {
            Vec::new()
        };

        let progress = ProgressStore::from_json(&config.progress_json);

        let backend = GeminiBackend::from_env();
        let ai_online = backend.is_some();
        let recommender = Arc::new(Recommender::new(
            backend.map(|b| Box::new(b) as Box<dyn ai::GenerativeBackend>),
        ));

        let mut console_log = vec![format!("[{}] [INFO] StreamMore started", timestamp_now())];
        if !ai_online {
            console_log.push(format!(
                "[{}] [WARN] GEMINI_API_KEY not set - StreamBuddy runs offline",
                timestamp_now()
            ));
        }

        Self {
            user: None,
            route: Route::Splash,
            splash_since: Instant::now(),
            login_username: String::new(),
            login_email: String::new(),
            catalog: CatalogStore::new(),
            config,
            watchlist: Vec::new(),
            downloads,
            progress,
            coordinator: PlaybackCoordinator::new(),
            surface: VideoSurface::new(),
            seen_seek_serial: 0,
            mini_pos: None,
            controls_visible: true,
            last_interaction: Instant::now(),
            watch_error: false,
            watch_fullscreen: false,
            show_resume_prompt: false,
            resume_at: 0.0,
            recommender,
            recommendations: Vec::new(),
            recs_loading: false,
            task_receiver,
            task_sender,
            hero_index: 0,
            hero_last_advance: Instant::now(),
            search_input: String::new(),
            search_committed: String::new(),
            search_deadline: None,
            search_type_filter: None,
            chat_open: false,
            chat_messages: vec![ChatMessage {
                role: ChatRole::Bot,
                text: "Namaste! I'm StreamBuddy, your dedicated entertainment guide. \
                       Tell me your vibe and I'll find something to watch!"
                    .to_string(),
            }],
            chat_input: String::new(),
            chat_waiting: false,
            edit_id: None,
            edit_title: String::new(),
            edit_description: String::new(),
            edit_category: "Drama".to_string(),
            edit_video_url: String::new(),
            edit_thumbnail: String::new(),
            edit_type: ContentType::Movie,
            edit_rating: 7.0,
            edit_year: 2024,
            edit_featured: false,
            edit_trending: false,
            console_log,
            status_message: "Ready".to_string(),
        }
    }

    fn log(&mut self, message: &str) {
        let timestamp = timestamp_now();
        self.console_log.push(format!("[{}] {}", timestamp, message));
        // Keep last 500 lines
        if self.console_log.len() > 500 {
            self.console_log.remove(0);
        }
    }

    /// Flush persisted state (downloads, progress, flags, theme) to disk.
    fn save_config(&mut self) {
        self.config.downloads_json = serde_json::to_string(&self.downloads).unwrap_or_default();
        self.config.progress_json = self.progress.to_json();
        self.config.save();
    }

    // === Navigation ===

    fn navigate(&mut self, route: Route) {
        if self.route == route {
            return;
        }

        // The Watch view persists progress and hands the session over (to
        // the miniplayer or to nothing) before the route changes.
        if matches!(self.route, Route::Watch(_)) {
            self.teardown_watch();
        }

        if let Route::Watch(id) = &route {
            let id = id.clone();
            self.route = route.clone();
            self.open_watch(&id);
            return;
        }

        self.route = route;
    }

    fn open_watch(&mut self, id: &str) {
        let Some(item) = self.catalog.find(id).cloned() else {
            self.log(&format!("[WARN] Unknown content id '{}'", id));
            self.route = Route::Home;
            return;
        };

        let rebind = self.coordinator.active_content_id() != Some(id);
        // Claiming the Watch surface deactivates any floating player first
        self.coordinator.open_watch(id);

        if rebind {
            let kind = resolve_source(&item.video_url);
            self.surface.load(&item.title, &item.video_url, kind, None);
            self.log(&format!("[PLAY] {} ({:?})", item.title, kind));
        }

        self.watch_error = false;
        self.watch_fullscreen = false;
        self.controls_visible = true;
        self.last_interaction = Instant::now();
        self.resume_at = self.progress.resume_point(id).unwrap_or(0.0);
        self.show_resume_prompt = rebind && self.resume_at > 0.0;

        self.request_recommendations(&item);
    }

    /// Synchronously persist the observed position, then decide whether the
    /// session survives as a miniplayer.
    fn teardown_watch(&mut self) {
        if let Some(id) = self.coordinator.active_content_id().map(str::to_string) {
            let position = self.surface.position();
            if position > 0.0 {
                self.progress.record(&id, position);
            }
        }

        self.coordinator.leave_watch(self.config.auto_miniplayer);
        if self.coordinator.active_content_id().is_none() {
            self.surface.destroy();
        }

        self.watch_error = false;
        self.show_resume_prompt = false;
        self.watch_fullscreen = false;
        self.save_config();
    }

    fn close_session(&mut self) {
        self.coordinator.close();
        self.surface.destroy();
    }

    // === Background work ===

    fn request_recommendations(&mut self, item: &Content) {
        self.recommendations.clear();
        if !self.config.ui.watch.show_recommendations {
            self.recs_loading = false;
            return;
        }

        self.recs_loading = true;
        let recommender = Arc::clone(&self.recommender);
        let current = item.clone();
        let library = self.catalog.items().to_vec();
        let sender = self.task_sender.clone();

        thread::spawn(move || {
            let items = recommender.recommendations(&current, &library);
            let _ = sender.send(TaskResult::RecommendationsLoaded {
                content_id: current.id,
                items,
            });
        });
    }

    fn send_chat(&mut self) {
        let message = self.chat_input.trim().to_string();
        if message.is_empty() || self.chat_waiting {
            return;
        }
        self.chat_input.clear();
        self.chat_messages.push(ChatMessage {
            role: ChatRole::User,
            text: message.clone(),
        });
        self.chat_waiting = true;

        let recommender = Arc::clone(&self.recommender);
        let library = self.catalog.items().to_vec();
        let sender = self.task_sender.clone();

        thread::spawn(move || {
            let reply = recommender.chat(&message, &library);
            let _ = sender.send(TaskResult::ChatReply(reply));
        });
    }

    // === User data ===

    fn toggle_watchlist(&mut self, id: &str) {
        if let Some(pos) = self.watchlist.iter().position(|w| w == id) {
            self.watchlist.remove(pos);
        } else {
            self.watchlist.push(id.to_string());
        }
    }

    fn toggle_download(&mut self, id: &str) {
        if let Some(pos) = self.downloads.iter().position(|d| d == id) {
            self.downloads.remove(pos);
        } else {
            self.downloads.push(id.to_string());
        }
        self.save_config();
    }

    fn sign_in(&mut self) {
        let username = self.login_username.trim().to_string();
        if username.is_empty() {
            self.status_message = "Enter a username to sign in".to_string();
            return;
        }
        let is_admin = username.to_lowercase().contains("admin");
        self.user = Some(User {
            username: username.clone(),
            email: self.login_email.trim().to_string(),
            is_premium: false,
            is_admin,
        });
        self.log(&format!(
            "[INFO] Signed in as '{}'{}",
            username,
            if is_admin { " (admin)" } else { "" }
        ));
        self.status_message = format!("Welcome, {}", username);
        self.navigate(Route::Home);
    }

    fn sign_out(&mut self) {
        self.close_session();
        self.user = None;
        self.watchlist.clear();
        self.chat_open = false;
        self.log("[INFO] Signed out");
        self.status_message = "Signed out".to_string();
        self.navigate(Route::Auth);
    }

    // === Admin editor ===

    fn edit_content(&mut self, item: &Content) {
        self.edit_id = Some(item.id.clone());
        self.edit_title = item.title.clone();
        self.edit_description = item.description.clone();
        self.edit_category = item.category.clone();
        self.edit_video_url = item.video_url.clone();
        self.edit_thumbnail = item.thumbnail.clone();
        self.edit_type = item.content_type;
        self.edit_rating = item.rating;
        self.edit_year = item.release_year;
        self.edit_featured = item.is_featured;
        self.edit_trending = item.is_trending;
    }

    fn clear_editor(&mut self) {
        self.edit_id = None;
        self.edit_title.clear();
        self.edit_description.clear();
        self.edit_category = "Drama".to_string();
        self.edit_video_url.clear();
        self.edit_thumbnail.clear();
        self.edit_type = ContentType::Movie;
        self.edit_rating = 7.0;
        self.edit_year = 2024;
        self.edit_featured = false;
        self.edit_trending = false;
    }

    fn save_editor(&mut self) {
        if self.edit_title.trim().is_empty() || self.edit_video_url.trim().is_empty() {
            self.status_message = "Title and video URL are required".to_string();
            return;
        }

        let id = match &self.edit_id {
            Some(id) => id.clone(),
            None => {
                // Fresh id that is not already taken
                let mut n = self.catalog.len() + 1;
                loop {
                    let candidate = format!("c{}", n);
                    if self.catalog.find(&candidate).is_none() {
                        break candidate;
                    }
                    n += 1;
                }
            }
        };

        let item = Content {
            id: id.clone(),
            title: self.edit_title.trim().to_string(),
            description: self.edit_description.trim().to_string(),
            thumbnail: self.edit_thumbnail.trim().to_string(),
            video_url: self.edit_video_url.trim().to_string(),
            content_type: self.edit_type,
            category: self.edit_category.clone(),
            rating: self.edit_rating,
            release_year: self.edit_year,
            is_featured: self.edit_featured,
            is_trending: self.edit_trending,
        };

        self.catalog.upsert(item);
        self.log(&format!("[ADMIN] Saved content '{}'", id));
        self.status_message = format!("Saved '{}'", self.edit_title.trim());
        self.clear_editor();
    }

    // === Frame logic ===

    fn handle_tasks(&mut self) {
        while let Ok(result) = self.task_receiver.try_recv() {
            match result {
                TaskResult::RecommendationsLoaded { content_id, items } => {
                    self.log(&format!(
                        "[INFO] {} suggestions for '{}'",
                        items.len(),
                        content_id
                    ));
                    // Only apply if the user is still on that content
                    if self.coordinator.active_content_id() == Some(content_id.as_str()) {
                        self.recommendations = items;
                    }
                    self.recs_loading = false;
                }
                TaskResult::ChatReply(reply) => {
                    self.chat_messages.push(ChatMessage {
                        role: ChatRole::Bot,
                        text: reply,
                    });
                    self.chat_waiting = false;
                }
            }
        }
    }

    fn handle_timers(&mut self, ctx: &egui::Context) {
        // Splash hand-off
        if self.route == Route::Splash && self.splash_since.elapsed() >= SPLASH_DURATION {
            self.route = if self.user.is_some() {
                Route::Home
            } else {
                Route::Auth
            };
        }

        // Hero carousel auto-advance, only while the banner is on screen
        if self.route == Route::Home && self.config.ui.home.show_hero_banner {
            let hero_count = self.catalog.hero_items().len();
            if hero_count > 1 && self.hero_last_advance.elapsed() >= HERO_ADVANCE_INTERVAL {
                self.hero_index = (self.hero_index + 1) % hero_count;
                self.hero_last_advance = Instant::now();
            }
            ctx.request_repaint_after(Duration::from_millis(500));
        }

        // Debounced search commit
        if let Some(deadline) = self.search_deadline {
            if Instant::now() >= deadline {
                self.search_committed = self.search_input.trim().to_string();
                self.search_deadline = None;
            } else {
                ctx.request_repaint_after(Duration::from_millis(100));
            }
        }

        // Controls auto-hide while playing
        if self.controls_visible
            && self.coordinator.is_playing()
            && self.last_interaction.elapsed() >= CONTROLS_HIDE_AFTER
        {
            self.controls_visible = false;
        }
    }

    fn handle_playback(&mut self, ctx: &egui::Context) {
        let on_watch_route = matches!(self.route, Route::Watch(_));
        let owner = self.coordinator.renderer(on_watch_route);

        // Apply broadcast seeks to whichever surface is bound. The serial is
        // consumed even with no renderer so stale seeks never replay later.
        if self.coordinator.seek_serial() != self.seen_seek_serial {
            let delta = self.coordinator.seek_delta();
            self.seen_seek_serial = self.coordinator.seek_serial();
            if owner != SurfaceOwner::None {
                self.surface.seek_by(delta);
            }
        }

        if owner != SurfaceOwner::None {
            self.surface.poll(ctx);

            match self.surface.state() {
                PlayerState::Playing | PlayerState::Paused => {
                    if self.coordinator.state() == SessionState::Loading {
                        self.coordinator.note_source_ready();
                    }
                }
                PlayerState::Error(_) => {
                    self.watch_error = true;
                }
                _ => {}
            }
            if self.surface.error().is_some() {
                self.watch_error = true;
            }

            if self.surface.is_live() {
                ctx.request_repaint();
            }
        }
    }

    fn retry_playback(&mut self) {
        let Some(id) = self.coordinator.active_content_id().map(str::to_string) else {
            return;
        };
        let Some(item) = self.catalog.find(&id).cloned() else {
            return;
        };
        self.surface.clear_error();
        self.watch_error = false;
        let kind = resolve_source(&item.video_url);
        self.surface.load(&item.title, &item.video_url, kind, None);
        self.coordinator.set_playing(true);
        self.log(&format!("[PLAY] Retrying {}", item.title));
    }

    fn is_downloaded(&self, id: &str) -> bool {
        self.downloads.iter().any(|d| d == id)
    }

    fn is_watchlisted(&self, id: &str) -> bool {
        self.watchlist.iter().any(|w| w == id)
    }
}

impl eframe::App for StreamMoreApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_tasks();
        self.handle_timers(ctx);
        self.handle_playback(ctx);

        // Apply theme
        if self.config.is_dark() {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        let route = self.route.clone();

        match route {
            Route::Splash => {
                egui::CentralPanel::default().show(ctx, |ui| self.show_splash(ui));
                ctx.request_repaint_after(Duration::from_millis(100));
                return;
            }
            Route::Auth => {
                egui::CentralPanel::default().show(ctx, |ui| self.show_auth(ui));
                return;
            }
            _ => {}
        }

        let immersive = matches!(route, Route::Watch(_)) && self.watch_fullscreen;

        if !immersive {
            egui::SidePanel::left("nav_panel")
                .exact_width(180.0)
                .show(ctx, |ui| self.show_nav(ui));

            egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(&self.status_message);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if let Some(id) = self.coordinator.active_content_id() {
                            if let Some(item) = self.catalog.find(id) {
                                let state = if self.coordinator.is_playing() {
                                    "▶"
                                } else {
                                    "⏸"
                                };
                                ui.label(
                                    egui::RichText::new(format!("{} {}", state, item.title))
                                        .weak(),
                                );
                            }
                        }
                    });
                });
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| match &route {
            Route::Home => self.show_home(ui),
            Route::Search => self.show_search(ui),
            Route::Watch(id) => {
                let id = id.clone();
                self.show_watch(ui, &id);
            }
            Route::Downloads => self.show_downloads(ui),
            Route::Watchlist => self.show_watchlist(ui),
            Route::Settings => self.show_settings(ui),
            Route::Admin(section) => {
                let section = *section;
                self.show_admin(ui, section);
            }
            _ => {}
        });

        // Floating miniplayer on every non-Watch route while active
        let on_watch_route = matches!(self.route, Route::Watch(_));
        if self.coordinator.renderer(on_watch_route) == SurfaceOwner::Miniplayer {
            self.show_miniplayer(ctx);
        }

        // StreamBuddy widget rides on top of user-facing routes
        if self.user.is_some()
            && self.config.ui.global.show_ai_assistant
            && !matches!(self.route, Route::Admin(_))
        {
            self.show_chat_widget(ctx);
        }
    }
}

// === Views ===

impl StreamMoreApp {
    fn show_splash(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.35);
            ui.label(egui::RichText::new("▶ StreamMore").size(40.0).strong());
            ui.add_space(12.0);
            ui.spinner();
        });
    }

    fn show_auth(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.25);
            ui.label(egui::RichText::new("▶ StreamMore").size(32.0).strong());
            ui.add_space(4.0);
            ui.label(egui::RichText::new("Sign in to continue").weak());
            ui.add_space(20.0);

            ui.scope(|ui| {
                ui.set_max_width(280.0);
                ui.add(egui::TextEdit::singleline(&mut self.login_username).hint_text("Username"));
                ui.add_space(8.0);
                ui.add(
                    egui::TextEdit::singleline(&mut self.login_email).hint_text("Email (optional)"),
                );
                ui.add_space(16.0);
                if ui
                    .add_sized([280.0, 32.0], egui::Button::new("Sign In"))
                    .clicked()
                {
                    self.sign_in();
                }
            });

            ui.add_space(12.0);
            ui.label(
                egui::RichText::new(
                    "Demo build: any credentials work. A username containing \
                     'admin' unlocks the admin console.",
                )
                .small()
                .weak(),
            );
        });
    }

    fn show_nav(&mut self, ui: &mut egui::Ui) {
        ui.add_space(10.0);
        ui.label(egui::RichText::new("▶ StreamMore").size(20.0).strong());
        ui.add_space(16.0);

        let mut target: Option<Route> = None;

        if ui
            .selectable_label(self.route == Route::Home, "🏠 Home")
            .clicked()
        {
            target = Some(Route::Home);
        }
        if self.config.ui.navigation.show_search
            && ui
                .selectable_label(self.route == Route::Search, "🔍 Search")
                .clicked()
        {
            target = Some(Route::Search);
        }
        if self.config.ui.navigation.show_downloads
            && ui
                .selectable_label(self.route == Route::Downloads, "📥 Downloads")
                .clicked()
        {
            target = Some(Route::Downloads);
        }
        if self.config.ui.navigation.show_watchlist
            && ui
                .selectable_label(self.route == Route::Watchlist, "⭐ Watchlist")
                .clicked()
        {
            target = Some(Route::Watchlist);
        }
        if ui
            .selectable_label(self.route == Route::Settings, "⚙ Settings")
            .clicked()
        {
            target = Some(Route::Settings);
        }

        if self.user.as_ref().is_some_and(|u| u.is_admin) {
            ui.add_space(8.0);
            ui.separator();
            if ui
                .selectable_label(matches!(self.route, Route::Admin(_)), "🛠 Admin Console")
                .clicked()
            {
                target = Some(Route::Admin(AdminSection::Dashboard));
            }
        }

        if let Some(route) = target {
            self.navigate(route);
        }

        ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
            ui.add_space(10.0);
            if ui.button("🚪 Sign out").clicked() {
                self.sign_out();
            }
            if let Some(user) = &self.user {
                ui.label(egui::RichText::new(&user.username).strong());
            }
            ui.add_space(4.0);
        });
    }

    fn show_home(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            if self.config.ui.home.show_hero_banner {
                self.show_hero(ui);
                ui.add_space(16.0);
            }

            if self.config.ui.home.show_trending_row {
                let trending = self.catalog.trending();
                if !trending.is_empty() {
                    ui.label(egui::RichText::new("🔥 Trending Now").size(16.0).strong());
                    ui.add_space(6.0);
                    egui::ScrollArea::horizontal()
                        .id_salt("trending_row")
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                for item in &trending {
                                    self.content_card(ui, item);
                                }
                            });
                        });
                    ui.add_space(16.0);
                }
            }

            if self.config.ui.home.show_genre_explorer {
                ui.label(egui::RichText::new("Browse by genre").size(16.0).strong());
                ui.add_space(6.0);
                ui.horizontal_wrapped(|ui| {
                    for category in CATEGORIES.iter().skip(1) {
                        if ui.button(*category).clicked() {
                            self.search_input = category.to_string();
                            self.search_committed = category.to_string();
                            self.search_deadline = None;
                            self.navigate(Route::Search);
                        }
                    }
                });
                ui.add_space(16.0);
            }

            if self.config.ui.home.show_grid {
                ui.label(egui::RichText::new("All titles").size(16.0).strong());
                ui.add_space(6.0);
                let items = self.catalog.items().to_vec();
                ui.horizontal_wrapped(|ui| {
                    for item in &items {
                        self.content_card(ui, item);
                    }
                });
            }
        });
    }

    fn show_hero(&mut self, ui: &mut egui::Ui) {
        let heroes = self.catalog.hero_items();
        if heroes.is_empty() {
            return;
        }
        if self.hero_index >= heroes.len() {
            self.hero_index = 0;
        }
        let hero = heroes[self.hero_index].clone();

        let width = ui.available_width();
        let height = 200.0;
        let (rect, _) = ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::hover());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            painter.rect_filled(rect, 12.0, category_color(&hero.category));
            painter.rect_filled(rect, 12.0, egui::Color32::from_black_alpha(120));
            painter.text(
                rect.left_top() + egui::vec2(20.0, 20.0),
                egui::Align2::LEFT_TOP,
                format!(
                    "⭐ {:.1}  ·  {}  ·  {}",
                    hero.rating, hero.release_year, hero.category
                ),
                egui::FontId::proportional(12.0),
                egui::Color32::from_gray(200),
            );
            painter.text(
                rect.left_top() + egui::vec2(20.0, 48.0),
                egui::Align2::LEFT_TOP,
                &hero.title,
                egui::FontId::proportional(28.0),
                egui::Color32::WHITE,
            );
            painter.text(
                rect.left_top() + egui::vec2(20.0, 92.0),
                egui::Align2::LEFT_TOP,
                &hero.description,
                egui::FontId::proportional(13.0),
                egui::Color32::from_gray(210),
            );
        }

        // Controls under the banner; manual advance resets the auto timer
        ui.horizontal(|ui| {
            if ui.button("◀").clicked() {
                self.hero_index = (self.hero_index + heroes.len() - 1) % heroes.len();
                self.hero_last_advance = Instant::now();
            }
            if ui.button("▶ Watch Now").clicked() {
                self.navigate(Route::Watch(hero.id.clone()));
                return;
            }
            if ui.button("▶").clicked() {
                self.hero_index = (self.hero_index + 1) % heroes.len();
                self.hero_last_advance = Instant::now();
            }
            for i in 0..heroes.len() {
                let dot = if i == self.hero_index { "●" } else { "○" };
                ui.label(egui::RichText::new(dot).small());
            }
        });
    }

    fn show_search(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.search_input)
                    .hint_text("Search live sports or movies...")
                    .desired_width(300.0),
            );
            if response.changed() {
                self.search_deadline = Some(Instant::now() + SEARCH_DEBOUNCE);
            }

            egui::ComboBox::from_id_salt("type_filter")
                .selected_text(match self.search_type_filter {
                    None => "All types",
                    Some(ContentType::Movie) => "Movies",
                    Some(ContentType::Series) => "Series",
                })
                .show_ui(ui, |ui| {
                    if ui
                        .selectable_label(self.search_type_filter.is_none(), "All types")
                        .clicked()
                    {
                        self.search_type_filter = None;
                    }
                    if ui
                        .selectable_label(
                            self.search_type_filter == Some(ContentType::Movie),
                            "Movies",
                        )
                        .clicked()
                    {
                        self.search_type_filter = Some(ContentType::Movie);
                    }
                    if ui
                        .selectable_label(
                            self.search_type_filter == Some(ContentType::Series),
                            "Series",
                        )
                        .clicked()
                    {
                        self.search_type_filter = Some(ContentType::Series);
                    }
                });

            if ui.button("Clear").clicked() {
                self.search_input.clear();
                self.search_committed.clear();
                self.search_deadline = None;
                self.search_type_filter = None;
            }
        });
        ui.add_space(10.0);

        let results = self
            .catalog
            .search(&self.search_committed, self.search_type_filter);

        if results.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.label(egui::RichText::new("No results").size(18.0).weak());
                ui.label(egui::RichText::new("Try a different title, genre or keyword.").weak());
            });
            return;
        }

        ui.label(
            egui::RichText::new(format!("{} result(s)", results.len()))
                .small()
                .weak(),
        );
        ui.add_space(6.0);

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for item in &results {
                    self.content_card(ui, item);
                }
            });
        });
    }

    fn show_watch(&mut self, ui: &mut egui::Ui, id: &str) {
        let Some(item) = self.catalog.find(id).cloned() else {
            ui.label("This title is no longer available.");
            if ui.button("Back to Home").clicked() {
                self.navigate(Route::Home);
            }
            return;
        };

        if !self.watch_fullscreen {
            ui.horizontal(|ui| {
                if ui.button("← Back").clicked() {
                    self.navigate(Route::Home);
                }
            });
        }

        self.show_video_area(ui, &item);

        if self.watch_fullscreen {
            return;
        }

        ui.add_space(10.0);
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&item.title).size(22.0).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.config.ui.watch.show_watchlist {
                        let starred = self.is_watchlisted(&item.id);
                        let label = if starred { "⭐ Saved" } else { "☆ Watchlist" };
                        if ui.button(label).clicked() {
                            self.toggle_watchlist(&item.id);
                        }
                    }
                    if self.config.ui.watch.show_downloads {
                        let downloaded = self.is_downloaded(&item.id);
                        let label = if downloaded {
                            "✔ Downloaded"
                        } else {
                            "📥 Download"
                        };
                        if ui.button(label).clicked() {
                            self.toggle_download(&item.id);
                        }
                    }
                });
            });

            ui.label(
                egui::RichText::new(format!(
                    "⭐ {:.1}  ·  {}  ·  {}  ·  {}",
                    item.rating,
                    item.release_year,
                    item.category,
                    item.content_type.label()
                ))
                .small()
                .weak(),
            );
            ui.add_space(6.0);
            ui.label(&item.description);
            ui.add_space(14.0);

            if self.config.ui.watch.show_recommendations {
                ui.label(egui::RichText::new("Suggested For You").size(14.0).strong());
                ui.add_space(6.0);
                if self.recs_loading {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(egui::RichText::new("Finding similar titles...").weak());
                    });
                } else if self.recommendations.is_empty() {
                    ui.label(egui::RichText::new("Nothing to suggest right now.").weak());
                } else {
                    let recs = self.recommendations.clone();
                    ui.horizontal_wrapped(|ui| {
                        for rec in &recs {
                            self.content_card(ui, rec);
                        }
                    });
                }
            }
        });

        // Resume prompt rides over the watch view until answered
        if self.show_resume_prompt {
            let resume_at = self.resume_at;
            egui::Window::new("⏯ Resume playback?")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ui.ctx(), |ui| {
                    ui.label(format!(
                        "You stopped watching at {}. Pick up where you left off?",
                        format_time(resume_at)
                    ));
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        if ui
                            .button(format!("▶ Resume from {}", format_time(resume_at)))
                            .clicked()
                        {
                            self.surface.seek_to(resume_at);
                            self.show_resume_prompt = false;
                        }
                        if ui.button("⏮ Start Over").clicked() {
                            self.progress.clear(&item.id);
                            self.save_config();
                            self.show_resume_prompt = false;
                        }
                    });
                });
        }
    }

    fn show_video_area(&mut self, ui: &mut egui::Ui, item: &Content) {
        let width = ui.available_width();
        let height = if self.watch_fullscreen {
            ui.available_height() - 40.0
        } else {
            (width * 9.0 / 16.0).min(ui.available_height() * 0.55)
        };

        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            painter.rect_filled(rect, 4.0, egui::Color32::BLACK);

            if let Some(texture) = self.surface.texture() {
                let tex_size = texture.size_vec2();
                let aspect = tex_size.x / tex_size.y;
                let (w, h) = if rect.width() / rect.height() > aspect {
                    (rect.height() * aspect, rect.height())
                } else {
                    (rect.width(), rect.width() / aspect)
                };
                let image_rect = egui::Rect::from_center_size(rect.center(), egui::vec2(w, h));
                painter.image(
                    texture.id(),
                    image_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            } else {
                let message = match self.surface.state() {
                    PlayerState::Loading => "Connecting to stream...".to_string(),
                    PlayerState::Error(e) => format!("⚠ {}", e),
                    _ => item.title.clone(),
                };
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    message,
                    egui::FontId::proportional(16.0),
                    egui::Color32::from_gray(180),
                );
            }
        }

        if response.clicked() {
            self.controls_visible = !self.controls_visible;
            self.last_interaction = Instant::now();
        }

        if self.watch_error {
            ui.horizontal(|ui| {
                ui.colored_label(
                    egui::Color32::from_rgb(220, 80, 80),
                    "Playback failed. The source could not be loaded.",
                );
                if ui.button("🔄 Retry").clicked() {
                    self.retry_playback();
                }
            });
        }

        if self.controls_visible {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.button("⏪ -10s").clicked() {
                    self.surface.seek_by(-10.0);
                    self.last_interaction = Instant::now();
                }

                let playing = self.coordinator.is_playing();
                let play_label = if playing { "⏸ Pause" } else { "▶ Play" };
                if ui.button(play_label).clicked() {
                    self.coordinator.set_playing(!playing);
                    self.surface.set_paused(playing);
                    self.last_interaction = Instant::now();
                }

                if ui.button("⏩ +10s").clicked() {
                    self.surface.seek_by(10.0);
                    self.last_interaction = Instant::now();
                }

                let position = self.surface.position();
                let duration = self.surface.duration();
                ui.label(format_time(position));
                let fraction = if duration > 0.0 {
                    (position / duration) as f32
                } else {
                    0.0
                };
                ui.add(
                    egui::ProgressBar::new(fraction.clamp(0.0, 1.0))
                        .desired_width((ui.available_width() - 140.0).max(60.0)),
                );
                ui.label(format_time(duration));

                let fs_label = if self.watch_fullscreen {
                    "🗗 Exit Full"
                } else {
                    "⛶ Fullscreen"
                };
                if ui.button(fs_label).clicked() {
                    self.watch_fullscreen = !self.watch_fullscreen;
                    self.last_interaction = Instant::now();
                }
            });
        }
    }

    fn show_miniplayer(&mut self, ctx: &egui::Context) {
        let viewport = ctx.screen_rect().size();
        let size = miniplayer::player_size(viewport);

        if self.mini_pos.is_none() {
            self.mini_pos = Some(MiniplayerPosition::new(viewport));
        }
        // Viewport may have changed since last frame
        if let Some(engine) = self.mini_pos.as_mut() {
            if !engine.is_dragging() {
                engine.reclamp(viewport);
            }
        }
        let pos = self
            .mini_pos
            .as_ref()
            .map(|e| e.pos())
            .unwrap_or(egui::pos2(0.0, 0.0));

        let active = self
            .coordinator
            .active_content_id()
            .and_then(|id| self.catalog.find(id))
            .cloned();
        let Some(item) = active else {
            return;
        };

        egui::Area::new(egui::Id::new("miniplayer"))
            .order(egui::Order::Foreground)
            .fixed_pos(pos)
            .show(ctx, |ui| {
                egui::Frame::window(ui.style())
                    .inner_margin(4.0)
                    .show(ui, |ui| {
                        let video_size = egui::vec2(size.x, size.y - 28.0);
                        let (rect, response) =
                            ui.allocate_exact_size(video_size, egui::Sense::click_and_drag());

                        if ui.is_rect_visible(rect) {
                            let painter = ui.painter();
                            painter.rect_filled(rect, 4.0, egui::Color32::BLACK);
                            if let Some(texture) = self.surface.texture() {
                                painter.image(
                                    texture.id(),
                                    rect,
                                    egui::Rect::from_min_max(
                                        egui::pos2(0.0, 0.0),
                                        egui::pos2(1.0, 1.0),
                                    ),
                                    egui::Color32::WHITE,
                                );
                            } else {
                                painter.text(
                                    rect.center(),
                                    egui::Align2::CENTER_CENTER,
                                    &item.title,
                                    egui::FontId::proportional(12.0),
                                    egui::Color32::from_gray(180),
                                );
                            }
                        }

                        // Drag anywhere on the video to move the player
                        if response.drag_started() {
                            if let (Some(pointer), Some(engine)) =
                                (response.interact_pointer_pos(), self.mini_pos.as_mut())
                            {
                                engine.begin_drag(pointer);
                            }
                        } else if response.dragged() {
                            if let (Some(pointer), Some(engine)) =
                                (response.interact_pointer_pos(), self.mini_pos.as_mut())
                            {
                                engine.update_drag(pointer, viewport);
                            }
                        }
                        if response.drag_stopped() {
                            if let Some(engine) = self.mini_pos.as_mut() {
                                engine.end_drag();
                            }
                        }

                        ui.horizontal(|ui| {
                            if ui.button("⛶").on_hover_text("Return to full view").clicked() {
                                // The Watch route claims the binding; the
                                // miniplayer deactivates as part of open_watch.
                                self.navigate(Route::Watch(item.id.clone()));
                                return;
                            }
                            if ui.button("⏪").clicked() {
                                self.coordinator.trigger_seek(-10.0);
                            }
                            let playing = self.coordinator.is_playing();
                            if ui.button(if playing { "⏸" } else { "▶" }).clicked() {
                                self.coordinator.set_playing(!playing);
                                self.surface.set_paused(playing);
                            }
                            if ui.button("⏩").clicked() {
                                self.coordinator.trigger_seek(10.0);
                            }
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui.button("✖").on_hover_text("Close miniplayer").clicked()
                                    {
                                        self.close_session();
                                    }
                                    if ui.button("⚙").clicked() {
                                        self.navigate(Route::Settings);
                                    }
                                },
                            );
                        });
                    });
            });
    }

    fn show_downloads(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        ui.label(egui::RichText::new("Offline Library").size(22.0).strong());
        ui.label(
            egui::RichText::new("Movies and series available to watch without internet.").weak(),
        );
        ui.add_space(10.0);

        let items: Vec<Content> = self
            .catalog
            .items()
            .iter()
            .filter(|c| self.downloads.iter().any(|d| d == &c.id))
            .cloned()
            .collect();

        // Mock storage meter: flat 1.2 GB per downloaded title out of 64 GB
        let total_gb = 64.0;
        let used_gb = items.len() as f32 * 1.2;
        ui.horizontal(|ui| {
            ui.label("💾");
            ui.add(
                egui::ProgressBar::new((used_gb / total_gb).clamp(0.0, 1.0))
                    .desired_width(260.0)
                    .text(format!("{:.1} GB used of {} GB", used_gb, total_gb)),
            );
            ui.label(
                egui::RichText::new(format!("{} items offline", items.len()))
                    .small()
                    .weak(),
            );
            if !items.is_empty() && ui.button("🗑 Clear All").clicked() {
                self.downloads.clear();
                self.save_config();
                self.status_message = "Cleared all downloads".to_string();
            }
        });
        ui.add_space(12.0);

        if items.is_empty() {
            ui.label(egui::RichText::new("Nothing downloaded yet.").weak());
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for item in &items {
                    self.content_card(ui, item);
                }
            });
        });
    }

    fn show_watchlist(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        ui.label(egui::RichText::new("My Watchlist").size(22.0).strong());
        ui.add_space(10.0);

        let items: Vec<Content> = self
            .catalog
            .items()
            .iter()
            .filter(|c| self.watchlist.iter().any(|w| w == &c.id))
            .cloned()
            .collect();

        if items.is_empty() {
            ui.label(
                egui::RichText::new("Your watchlist is empty. Save titles from their watch page.")
                    .weak(),
            );
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for item in &items {
                    self.content_card(ui, item);
                }
            });
        });
    }

    fn show_settings(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        ui.label(egui::RichText::new("Settings").size(22.0).strong());
        ui.add_space(12.0);

        let mut changed = false;

        if self.config.ui.global.enable_theme_toggle {
            let mut dark = self.config.is_dark();
            if ui.checkbox(&mut dark, "🌙 Dark mode").changed() {
                self.config.theme = if dark { "dark" } else { "light" }.to_string();
                changed = true;
            }
        }

        changed |= ui
            .checkbox(&mut self.config.auto_miniplayer, "Auto activate Miniplayer")
            .on_hover_text(
                "When enabled, leaving the watch page during playback keeps the video \
                 in a floating miniplayer.",
            )
            .changed();

        changed |= ui
            .checkbox(
                &mut self.config.ui.global.show_ai_assistant,
                "🤖 Show StreamBuddy assistant",
            )
            .changed();

        if changed {
            self.save_config();
        }

        ui.add_space(16.0);
        ui.separator();
        ui.add_space(8.0);

        if !self.recommender.has_backend() {
            ui.label(
                egui::RichText::new(
                    "StreamBuddy is offline: set GEMINI_API_KEY before launching to enable \
                     AI recommendations.",
                )
                .small()
                .weak(),
            );
        }
    }

    fn show_admin(&mut self, ui: &mut egui::Ui, section: AdminSection) {
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("🛠 Admin Console").size(20.0).strong());
            ui.separator();
            if ui
                .selectable_label(section == AdminSection::Dashboard, "Dashboard")
                .clicked()
            {
                self.navigate(Route::Admin(AdminSection::Dashboard));
            }
            if ui
                .selectable_label(section == AdminSection::Content, "Content")
                .clicked()
            {
                self.navigate(Route::Admin(AdminSection::Content));
            }
            if ui
                .selectable_label(section == AdminSection::AppControl, "App Control")
                .clicked()
            {
                self.navigate(Route::Admin(AdminSection::AppControl));
            }
            if ui
                .selectable_label(section == AdminSection::Console, "Console")
                .clicked()
            {
                self.navigate(Route::Admin(AdminSection::Console));
            }
        });
        ui.separator();
        ui.add_space(8.0);

        match section {
            AdminSection::Dashboard => self.show_admin_dashboard(ui),
            AdminSection::Content => self.show_admin_content(ui),
            AdminSection::AppControl => self.show_admin_app_control(ui),
            AdminSection::Console => self.show_admin_console(ui),
        }
    }

    fn show_admin_dashboard(&mut self, ui: &mut egui::Ui) {
        let items = self.catalog.items();
        let movies = items
            .iter()
            .filter(|c| c.content_type == ContentType::Movie)
            .count();
        let series = items.len() - movies;
        let featured = items.iter().filter(|c| c.is_featured).count();
        let trending = items.iter().filter(|c| c.is_trending).count();

        egui::Grid::new("dashboard_grid")
            .num_columns(2)
            .spacing([30.0, 8.0])
            .show(ui, |ui| {
                ui.label("Total titles");
                ui.label(egui::RichText::new(items.len().to_string()).strong());
                ui.end_row();
                ui.label("Movies / Series");
                ui.label(egui::RichText::new(format!("{} / {}", movies, series)).strong());
                ui.end_row();
                ui.label("Featured");
                ui.label(egui::RichText::new(featured.to_string()).strong());
                ui.end_row();
                ui.label("Trending");
                ui.label(egui::RichText::new(trending.to_string()).strong());
                ui.end_row();
                ui.label("Downloads on this device");
                ui.label(egui::RichText::new(self.downloads.len().to_string()).strong());
                ui.end_row();
                ui.label("StreamBuddy backend");
                ui.label(if self.recommender.has_backend() {
                    egui::RichText::new("online").color(egui::Color32::from_rgb(80, 180, 80))
                } else {
                    egui::RichText::new("offline").color(egui::Color32::from_rgb(200, 140, 60))
                });
                ui.end_row();
            });
    }

    fn show_admin_content(&mut self, ui: &mut egui::Ui) {
        let editing_title = match &self.edit_id {
            Some(id) => format!("Editing '{}'", id),
            None => "Add new title".to_string(),
        };
        ui.label(egui::RichText::new(editing_title).strong());
        ui.add_space(4.0);

        egui::Grid::new("content_editor")
            .num_columns(2)
            .spacing([10.0, 6.0])
            .show(ui, |ui| {
                ui.label("Title");
                ui.add(egui::TextEdit::singleline(&mut self.edit_title).desired_width(300.0));
                ui.end_row();

                ui.label("Description");
                ui.add(
                    egui::TextEdit::singleline(&mut self.edit_description).desired_width(300.0),
                );
                ui.end_row();

                ui.label("Video URL");
                ui.add(
                    egui::TextEdit::singleline(&mut self.edit_video_url)
                        .hint_text("https://.../movie.mp4 or .../master.m3u8")
                        .desired_width(300.0),
                );
                ui.end_row();

                ui.label("Thumbnail URL");
                ui.add(egui::TextEdit::singleline(&mut self.edit_thumbnail).desired_width(300.0));
                ui.end_row();

                ui.label("Type");
                egui::ComboBox::from_id_salt("edit_type")
                    .selected_text(self.edit_type.label())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.edit_type, ContentType::Movie, "Movie");
                        ui.selectable_value(&mut self.edit_type, ContentType::Series, "Series");
                    });
                ui.end_row();

                ui.label("Category");
                egui::ComboBox::from_id_salt("edit_category")
                    .selected_text(self.edit_category.clone())
                    .show_ui(ui, |ui| {
                        for category in CATEGORIES.iter().skip(1) {
                            if ui
                                .selectable_label(self.edit_category == *category, *category)
                                .clicked()
                            {
                                self.edit_category = category.to_string();
                            }
                        }
                    });
                ui.end_row();

                ui.label("Rating");
                ui.add(egui::Slider::new(&mut self.edit_rating, 0.0..=10.0).text("/ 10"));
                ui.end_row();

                ui.label("Release year");
                ui.add(egui::DragValue::new(&mut self.edit_year).range(1950..=2030));
                ui.end_row();

                ui.label("Flags");
                ui.horizontal(|ui| {
                    ui.checkbox(&mut self.edit_featured, "Featured");
                    ui.checkbox(&mut self.edit_trending, "Trending");
                });
                ui.end_row();
            });

        ui.horizontal(|ui| {
            if ui.button("💾 Save").clicked() {
                self.save_editor();
            }
            if ui.button("Clear").clicked() {
                self.clear_editor();
            }
        });

        ui.add_space(12.0);
        ui.separator();
        ui.add_space(6.0);

        let items = self.catalog.items().to_vec();
        egui::ScrollArea::vertical().show(ui, |ui| {
            for item in &items {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&item.title).strong());
                    ui.label(
                        egui::RichText::new(format!(
                            "{} · {} · ⭐ {:.1}",
                            item.content_type.label(),
                            item.category,
                            item.rating
                        ))
                        .small()
                        .weak(),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("🗑").on_hover_text("Delete").clicked() {
                            // Deleting what is currently playing ends the session
                            if self.coordinator.active_content_id() == Some(item.id.as_str()) {
                                self.close_session();
                            }
                            self.catalog.remove(&item.id);
                            self.log(&format!("[ADMIN] Deleted content '{}'", item.id));
                        }
                        if ui.button("✏").on_hover_text("Edit").clicked() {
                            self.edit_content(item);
                        }
                    });
                });
                ui.separator();
            }
        });
    }

    fn show_admin_app_control(&mut self, ui: &mut egui::Ui) {
        let mut changed = false;

        ui.label(egui::RichText::new("Navigation").strong());
        changed |= ui
            .checkbox(&mut self.config.ui.navigation.show_search, "Search")
            .changed();
        changed |= ui
            .checkbox(&mut self.config.ui.navigation.show_downloads, "Downloads")
            .changed();
        changed |= ui
            .checkbox(&mut self.config.ui.navigation.show_watchlist, "Watchlist")
            .changed();

        ui.add_space(8.0);
        ui.label(egui::RichText::new("Home page").strong());
        changed |= ui
            .checkbox(&mut self.config.ui.home.show_hero_banner, "Hero banner")
            .changed();
        changed |= ui
            .checkbox(&mut self.config.ui.home.show_trending_row, "Trending row")
            .changed();
        changed |= ui
            .checkbox(&mut self.config.ui.home.show_genre_explorer, "Genre explorer")
            .changed();
        changed |= ui
            .checkbox(&mut self.config.ui.home.show_grid, "Title grid")
            .changed();

        ui.add_space(8.0);
        ui.label(egui::RichText::new("Watch page").strong());
        changed |= ui
            .checkbox(&mut self.config.ui.watch.show_downloads, "Download button")
            .changed();
        changed |= ui
            .checkbox(&mut self.config.ui.watch.show_watchlist, "Watchlist button")
            .changed();
        changed |= ui
            .checkbox(
                &mut self.config.ui.watch.show_recommendations,
                "AI recommendations",
            )
            .changed();

        ui.add_space(8.0);
        ui.label(egui::RichText::new("Global").strong());
        changed |= ui
            .checkbox(
                &mut self.config.ui.global.show_ai_assistant,
                "StreamBuddy assistant",
            )
            .changed();
        changed |= ui
            .checkbox(
                &mut self.config.ui.global.enable_theme_toggle,
                "Theme toggle in settings",
            )
            .changed();

        if changed {
            self.save_config();
            self.status_message = "App configuration saved".to_string();
        }
    }

    fn show_admin_console(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(format!("{} log lines", self.console_log.len()))
                    .small()
                    .weak(),
            );
            if ui.button("Clear").clicked() {
                self.console_log.clear();
            }
        });
        ui.add_space(4.0);

        egui::ScrollArea::vertical()
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for line in &self.console_log {
                    ui.label(egui::RichText::new(line).monospace().small());
                }
            });
    }

    fn show_chat_widget(&mut self, ctx: &egui::Context) {
        let screen = ctx.screen_rect();
        let button_pos = egui::pos2(screen.right() - 60.0, screen.bottom() - 80.0);

        egui::Area::new(egui::Id::new("chat_button"))
            .order(egui::Order::Foreground)
            .fixed_pos(button_pos)
            .show(ctx, |ui| {
                let label = if self.chat_open { "✖" } else { "🤖" };
                if ui
                    .add_sized(
                        [40.0, 40.0],
                        egui::Button::new(egui::RichText::new(label).size(18.0)),
                    )
                    .clicked()
                {
                    self.chat_open = !self.chat_open;
                }
            });

        if !self.chat_open {
            return;
        }

        egui::Window::new("🤖 StreamBuddy AI")
            .collapsible(false)
            .resizable(false)
            .fixed_size([340.0, 400.0])
            .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -130.0])
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .max_height(300.0)
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for message in &self.chat_messages {
                            match message.role {
                                ChatRole::User => {
                                    ui.with_layout(
                                        egui::Layout::right_to_left(egui::Align::Min),
                                        |ui| {
                                            ui.label(
                                                egui::RichText::new(&message.text)
                                                    .color(egui::Color32::from_rgb(120, 170, 255)),
                                            );
                                        },
                                    );
                                }
                                ChatRole::Bot => {
                                    ui.label(&message.text);
                                }
                            }
                            ui.add_space(6.0);
                        }
                        if self.chat_waiting {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.label(egui::RichText::new("StreamBuddy is typing...").weak());
                            });
                        }
                    });

                ui.separator();
                ui.horizontal(|ui| {
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.chat_input)
                            .hint_text("Suggest something epic...")
                            .desired_width(250.0),
                    );
                    let submitted =
                        response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if (ui.button("➤").clicked() || submitted) && !self.chat_waiting {
                        self.send_chat();
                        response.request_focus();
                    }
                });
            });
    }

    /// Clickable catalog tile. No image pipeline; the thumbnail is a flat
    /// category-colored placeholder.
    fn content_card(&mut self, ui: &mut egui::Ui, item: &Content) {
        let size = egui::vec2(172.0, 120.0);
        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let fill = if response.hovered() {
                category_color(&item.category)
            } else {
                category_color(&item.category).gamma_multiply(0.7)
            };
            painter.rect_filled(rect, 8.0, fill);
            painter.text(
                rect.center() - egui::vec2(0.0, 16.0),
                egui::Align2::CENTER_CENTER,
                "▶",
                egui::FontId::proportional(24.0),
                egui::Color32::from_white_alpha(200),
            );
            painter.text(
                rect.center() + egui::vec2(0.0, 18.0),
                egui::Align2::CENTER_CENTER,
                truncate(&item.title, 22),
                egui::FontId::proportional(13.0),
                egui::Color32::WHITE,
            );
            painter.text(
                rect.center() + egui::vec2(0.0, 38.0),
                egui::Align2::CENTER_CENTER,
                format!("⭐ {:.1} · {}", item.rating, item.category),
                egui::FontId::proportional(10.0),
                egui::Color32::from_gray(220),
            );
        }

        if response.on_hover_text(&item.description).clicked() {
            self.navigate(Route::Watch(item.id.clone()));
        }
    }
}

/// Stable placeholder color per category label.
fn category_color(category: &str) -> egui::Color32 {
    let mut hash: u32 = 2166136261;
    for byte in category.bytes() {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(16777619);
    }
    let hue = (hash % 360) as f32;
    let (r, g, b) = hue_to_rgb(hue);
    egui::Color32::from_rgb(r, g, b)
}

fn hue_to_rgb(hue: f32) -> (u8, u8, u8) {
    // Fixed saturation/value so every tile stays readable under white text
    let c = 0.45;
    let x = c * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let m = 0.18;
    let (r, g, b) = match hue as u32 / 60 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    (
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    )
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
