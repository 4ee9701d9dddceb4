//! Data models for the StreamMore client

use serde::{Deserialize, Serialize};

/// Catalog entry type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Movie,
    Series,
}

impl ContentType {
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::Series => "Series",
        }
    }
}

/// A single catalog entry. Owned by the catalog store; only admin flows
/// mutate these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub video_url: String,
    pub content_type: ContentType,
    pub category: String,
    pub rating: f32,
    pub release_year: i32,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_trending: bool,
}

/// Signed-in account (mock - no real authentication)
#[derive(Debug, Clone, Default)]
pub struct User {
    pub username: String,
    pub email: String,
    pub is_premium: bool,
    pub is_admin: bool,
}

/// Navigation feature flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationFlags {
    #[serde(default = "default_true")]
    pub show_downloads: bool,
    #[serde(default = "default_true")]
    pub show_search: bool,
    #[serde(default = "default_true")]
    pub show_watchlist: bool,
}

/// Home page feature flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeFlags {
    #[serde(default = "default_true")]
    pub show_hero_banner: bool,
    #[serde(default = "default_true")]
    pub show_trending_row: bool,
    #[serde(default = "default_true")]
    pub show_genre_explorer: bool,
    #[serde(default = "default_true")]
    pub show_grid: bool,
}

/// Watch page feature flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchFlags {
    #[serde(default = "default_true")]
    pub show_downloads: bool,
    #[serde(default = "default_true")]
    pub show_watchlist: bool,
    #[serde(default = "default_true")]
    pub show_recommendations: bool,
}

/// App-wide feature flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalFlags {
    #[serde(default = "default_true")]
    pub show_ai_assistant: bool,
    #[serde(default = "default_true")]
    pub enable_theme_toggle: bool,
}

/// UI feature-flag configuration, editable from the admin App Control
/// screen and persisted with the rest of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub navigation: NavigationFlags,
    #[serde(default)]
    pub home: HomeFlags,
    #[serde(default)]
    pub watch: WatchFlags,
    #[serde(default)]
    pub global: GlobalFlags,
}

fn default_true() -> bool {
    true
}

impl Default for NavigationFlags {
    fn default() -> Self {
        Self {
            show_downloads: true,
            show_search: true,
            show_watchlist: true,
        }
    }
}

impl Default for HomeFlags {
    fn default() -> Self {
        Self {
            show_hero_banner: true,
            show_trending_row: true,
            show_genre_explorer: true,
            show_grid: true,
        }
    }
}

impl Default for WatchFlags {
    fn default() -> Self {
        Self {
            show_downloads: true,
            show_watchlist: true,
            show_recommendations: true,
        }
    }
}

impl Default for GlobalFlags {
    fn default() -> Self {
        Self {
            show_ai_assistant: true,
            enable_theme_toggle: true,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            navigation: NavigationFlags::default(),
            home: HomeFlags::default(),
            watch: WatchFlags::default(),
            global: GlobalFlags::default(),
        }
    }
}

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Bot,
}

/// One entry in the StreamBuddy conversation
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}
