//! In-memory content catalog
//!
//! Source of truth for every view. The library is seeded with the demo
//! catalog; admin flows mutate it in place for the lifetime of the session.

#![allow(dead_code)]

use crate::models::{Content, ContentType};

/// Genre labels offered by the category explorer and the admin editor.
pub const CATEGORIES: &[&str] = &[
    "All", "Action", "Comedy", "Drama", "Horror", "Sci-Fi", "Thriller", "Animation", "Crime",
    "Anime", "Western", "Kids", "Education", "Hindi", "Tamil", "Telugu", "Asian", "Indian", "LIVE",
];

pub struct CatalogStore {
    items: Vec<Content>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            items: seed_catalog(),
        }
    }

    pub fn items(&self) -> &[Content] {
        &self.items
    }

    pub fn find(&self, id: &str) -> Option<&Content> {
        self.items.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Featured/trending items for the hero carousel, capped at six.
    pub fn hero_items(&self) -> Vec<Content> {
        self.items
            .iter()
            .filter(|c| c.is_featured || c.is_trending)
            .take(6)
            .cloned()
            .collect()
    }

    pub fn trending(&self) -> Vec<Content> {
        self.items.iter().filter(|c| c.is_trending).cloned().collect()
    }

    /// Insert or replace by id. Admin content editor entry point.
    pub fn upsert(&mut self, content: Content) {
        if let Some(existing) = self.items.iter_mut().find(|c| c.id == content.id) {
            *existing = content;
        } else {
            self.items.push(content);
        }
    }

    /// Remove by id; returns whether anything was deleted.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|c| c.id != id);
        self.items.len() != before
    }

    /// Case-insensitive search over title, description and category, with
    /// an optional type filter.
    pub fn search(&self, query: &str, type_filter: Option<ContentType>) -> Vec<Content> {
        let query = query.trim();
        self.items
            .iter()
            .filter(|c| {
                if let Some(t) = type_filter {
                    if c.content_type != t {
                        return false;
                    }
                }
                if query.is_empty() {
                    return true;
                }
                contains_ignore_case(&c.title, query)
                    || contains_ignore_case(&c.description, query)
                    || contains_ignore_case(&c.category, query)
            })
            .cloned()
            .collect()
    }

    pub fn by_category(&self, category: &str) -> Vec<Content> {
        if category == "All" {
            return self.items.clone();
        }
        self.items
            .iter()
            .filter(|c| c.category.eq_ignore_ascii_case(category))
            .cloned()
            .collect()
    }
}

/// Case-insensitive substring check without allocation
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    if needle.len() > haystack.len() {
        return false;
    }

    haystack
        .as_bytes()
        .windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

fn entry(
    id: &str,
    title: &str,
    description: &str,
    thumbnail: &str,
    video_url: &str,
    content_type: ContentType,
    category: &str,
    rating: f32,
    release_year: i32,
    is_featured: bool,
    is_trending: bool,
) -> Content {
    Content {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        thumbnail: thumbnail.to_string(),
        video_url: video_url.to_string(),
        content_type,
        category: category.to_string(),
        rating,
        release_year,
        is_featured,
        is_trending,
    }
}

/// Demo library shipped with the client.
fn seed_catalog() -> Vec<Content> {
    vec![
        entry(
            "t1",
            "Taskaree: The Smuggler",
            "A gripping crime drama following the intricate web of smuggling operations.",
            "https://images.unsplash.com/photo-1536440136628-849c177e76a1?q=80&w=800",
            "https://www.w3schools.com/html/mov_bbb.mp4",
            ContentType::Series,
            "Drama",
            8.7,
            2024,
            true,
            true,
        ),
        entry(
            "m1",
            "Pehla Pyaar",
            "A romantic story of first love and its complications.",
            "https://images.unsplash.com/photo-1517604931442-7e0c8ed0963c?q=80&w=800",
            "https://www.w3schools.com/html/movie.mp4",
            ContentType::Movie,
            "Hindi",
            7.2,
            2024,
            false,
            true,
        ),
        entry(
            "s1",
            "Panchayat",
            "An engineering graduate takes up a job as a secretary of a Panchayat office.",
            "https://images.unsplash.com/photo-1524748969064-cf36abd7b801?q=80&w=800",
            "https://www.w3schools.com/html/movie.mp4",
            ContentType::Series,
            "Comedy",
            8.9,
            2024,
            true,
            false,
        ),
        entry(
            "k1",
            "Bheem Boy",
            "Adventures of a small boy with super strength.",
            "https://images.unsplash.com/photo-1534447677768-be436bb09401?q=80&w=800",
            "https://www.w3schools.com/html/movie.mp4",
            ContentType::Series,
            "Kids",
            9.2,
            2023,
            false,
            false,
        ),
        entry(
            "k2",
            "Space Explorers",
            "Kids learning about the galaxy.",
            "https://images.unsplash.com/photo-1451187580459-43490279c0fa?q=80&w=800",
            "https://www.w3schools.com/html/movie.mp4",
            ContentType::Movie,
            "Kids",
            8.5,
            2024,
            false,
            false,
        ),
        entry(
            "k3",
            "Magic Forest",
            "A magical journey for the little ones.",
            "https://images.unsplash.com/photo-1518709268805-4e9042af9f23?q=80&w=800",
            "https://www.w3schools.com/html/movie.mp4",
            ContentType::Movie,
            "Kids",
            7.8,
            2022,
            false,
            false,
        ),
        entry(
            "l1",
            "India vs Australia",
            "Live cricket final.",
            "https://images.unsplash.com/photo-1531415074968-036ba1b575da?q=80&w=800",
            "https://stream.example.com/live/cricket/master.m3u8",
            ContentType::Movie,
            "LIVE",
            9.9,
            2024,
            false,
            false,
        ),
        entry(
            "a1",
            "Solo Leveling",
            "Epic anime adventure.",
            "https://images.unsplash.com/photo-1578632738908-4521c726eebf?q=80&w=800",
            "https://www.w3schools.com/html/movie.mp4",
            ContentType::Series,
            "Anime",
            9.1,
            2024,
            false,
            false,
        ),
        entry(
            "e1",
            "Coding for All",
            "Learn to code in 30 days.",
            "https://images.unsplash.com/photo-1461749280684-dccba630e2f6?q=80&w=800",
            "https://www.w3schools.com/html/movie.mp4",
            ContentType::Series,
            "Education",
            8.4,
            2024,
            false,
            false,
        ),
        entry(
            "h1",
            "Pathaan 2",
            "Action thriller.",
            "https://images.unsplash.com/photo-1485846234645-a62644f84728?q=80&w=800",
            "https://www.w3schools.com/html/movie.mp4",
            ContentType::Movie,
            "Hindi",
            7.5,
            2025,
            false,
            false,
        ),
    ]
}
