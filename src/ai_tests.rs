//! Tests for the AI recommendation client: caching, single-flight, retry

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc::{channel, Receiver};
    use std::sync::{Arc, Mutex};
    use std::thread;
    use std::time::{Duration, Instant};

    use crate::ai::*;
    use crate::models::{Content, ContentType};

    fn item(id: &str, title: &str, category: &str) -> Content {
        Content {
            id: id.to_string(),
            title: title.to_string(),
            description: format!("{} description", title),
            thumbnail: String::new(),
            video_url: "https://example.com/video.mp4".to_string(),
            content_type: ContentType::Movie,
            category: category.to_string(),
            rating: 8.0,
            release_year: 2024,
            is_featured: false,
            is_trending: false,
        }
    }

    fn library() -> Vec<Content> {
        vec![
            item("a", "Alpha", "Drama"),
            item("b", "Beta", "Comedy"),
            item("c", "Gamma", "Drama"),
            item("d", "Delta", "Anime"),
            item("e", "Epsilon", "Kids"),
        ]
    }

    /// Backend that always answers the same ids and counts invocations.
    struct CountingBackend {
        calls: Arc<AtomicUsize>,
        ids: Vec<String>,
    }

    impl GenerativeBackend for CountingBackend {
        fn generate_text(&self, _prompt: &str) -> Result<String, AiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("Try Beta!".to_string())
        }

        fn generate_ids(&self, _prompt: &str) -> Result<Vec<String>, AiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.ids.clone())
        }
    }

    fn counting_backend(ids: &[&str]) -> (Box<dyn GenerativeBackend>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let backend = CountingBackend {
            calls: Arc::clone(&calls),
            ids: ids.iter().map(|s| s.to_string()).collect(),
        };
        (Box::new(backend), calls)
    }

    /// Backend that blocks inside the request until the test releases it.
    struct BlockingBackend {
        calls: Arc<AtomicUsize>,
        release: Mutex<Receiver<()>>,
    }

    impl GenerativeBackend for BlockingBackend {
        fn generate_text(&self, _prompt: &str) -> Result<String, AiError> {
            Ok(String::new())
        }

        fn generate_ids(&self, _prompt: &str) -> Result<Vec<String>, AiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let _ = self.release.lock().unwrap().recv();
            Ok(vec!["b".to_string()])
        }
    }

    #[test]
    fn test_cache_idempotence() {
        let (backend, calls) = counting_backend(&["b", "c"]);
        let recommender = Recommender::detached(Some(backend), HashMap::new());
        let library = library();
        let current = &library[0];

        let first = recommender.recommendations(current, &library);
        let second = recommender.recommendations(current, &library);

        let first_ids: Vec<&str> = first.iter().map(|c| c.id.as_str()).collect();
        let second_ids: Vec<&str> = second.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(first_ids, vec!["b", "c"]);
        assert_eq!(first_ids, second_ids);
        // The second call is served from the cache, no second request
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_single_flight_concurrent_caller_gets_fallback() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (release_tx, release_rx) = channel();
        let backend = BlockingBackend {
            calls: Arc::clone(&calls),
            release: Mutex::new(release_rx),
        };
        let recommender = Arc::new(Recommender::detached(Some(Box::new(backend)), HashMap::new()));
        let library = library();

        // First caller parks inside the external request
        let first = {
            let recommender = Arc::clone(&recommender);
            let library = library.clone();
            thread::spawn(move || recommender.recommendations(&library[0], &library))
        };

        // Give the first request time to take the in-flight slot
        while calls.load(Ordering::SeqCst) == 0 {
            thread::sleep(Duration::from_millis(5));
        }

        // A concurrent caller, even for a different item, gets the naive
        // fallback instead of a second request
        let concurrent = recommender.recommendations(&library[3], &library);
        let concurrent_ids: Vec<&str> = concurrent.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(concurrent_ids, vec!["a", "b", "c"]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        release_tx.send(()).unwrap();
        let first = first.join().unwrap();
        let first_ids: Vec<&str> = first.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(first_ids, vec!["b"]);

        // The slot is free again afterwards
        let after = recommender.recommendations(&library[0], &library);
        assert!(!after.is_empty());
    }

    #[test]
    fn test_retry_backoff_shape() {
        let policy = RetryPolicy {
            retries: 3,
            base_delay: Duration::from_millis(40),
            max_jitter: Duration::ZERO,
        };
        let attempts = Mutex::new(Vec::new());

        let result = fetch_with_retry(
            || {
                let mut attempts = attempts.lock().unwrap();
                attempts.push(Instant::now());
                if attempts.len() < 3 {
                    Err(AiError::with_status(429, "rate limited"))
                } else {
                    Ok(7)
                }
            },
            &policy,
        );

        assert_eq!(result.unwrap(), 7);
        let attempts = attempts.lock().unwrap();
        assert_eq!(attempts.len(), 3);

        let first_gap = attempts[1] - attempts[0];
        let second_gap = attempts[2] - attempts[1];
        assert!(first_gap >= Duration::from_millis(35), "first gap {:?}", first_gap);
        // Exponential: the second wait is double the first
        assert!(
            second_gap >= first_gap.mul_f64(1.8),
            "second gap {:?} vs first {:?}",
            second_gap,
            first_gap
        );
    }

    #[test]
    fn test_non_rate_limit_short_circuits() {
        let policy = RetryPolicy {
            retries: 3,
            base_delay: Duration::from_millis(40),
            max_jitter: Duration::ZERO,
        };
        let calls = AtomicUsize::new(0);
        let started = Instant::now();

        let result: Result<(), AiError> = fetch_with_retry(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(AiError::new("connection refused"))
            },
            &policy,
        );

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        // No backoff sleeps happened
        assert!(started.elapsed() < Duration::from_millis(35));
    }

    #[test]
    fn test_retry_budget_exhausts() {
        let policy = RetryPolicy {
            retries: 2,
            base_delay: Duration::from_millis(1),
            max_jitter: Duration::ZERO,
        };
        let calls = AtomicUsize::new(0);

        let result: Result<(), AiError> = fetch_with_retry(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(AiError::with_status(429, "quota exceeded"))
            },
            &policy,
        );

        assert!(result.is_err());
        // Initial attempt plus two retries
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_rate_limit_detection() {
        assert!(AiError::with_status(429, "too many requests").is_rate_limit());
        assert!(AiError::new("Resource quota exceeded").is_rate_limit());
        assert!(AiError::new("rate LIMIT hit").is_rate_limit());
        assert!(!AiError::new("connection refused").is_rate_limit());
        assert!(!AiError::with_status(500, "internal error").is_rate_limit());
    }

    #[test]
    fn test_stale_ids_filtered_from_cache() {
        let mut cache = HashMap::new();
        cache.insert(
            "a".to_string(),
            vec!["b".to_string(), "gone".to_string(), "c".to_string()],
        );
        // No backend: a cache hit must not need one
        let recommender = Recommender::detached(None, cache);
        let library = library();

        let result = recommender.recommendations(&library[0], &library);
        let ids: Vec<&str> = result.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_fully_stale_cache_falls_through() {
        let mut cache = HashMap::new();
        cache.insert("a".to_string(), vec!["gone1".to_string(), "gone2".to_string()]);
        let recommender = Recommender::detached(None, cache);
        let library = library();

        // Every cached id is stale; with no backend the naive fallback wins
        let result = recommender.recommendations(&library[0], &library);
        let ids: Vec<&str> = result.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "d"]);
    }

    #[test]
    fn test_fallback_is_first_three_others() {
        let library = library();
        let result = Recommender::fallback(&library[1], &library);
        let ids: Vec<&str> = result.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_empty_model_output_falls_back_uncached() {
        let (backend, calls) = counting_backend(&[]);
        let recommender = Recommender::detached(Some(backend), HashMap::new());
        let library = library();

        let result = recommender.recommendations(&library[0], &library);
        let ids: Vec<&str> = result.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "d"]);

        // Nothing was cached, so the next call asks again
        recommender.recommendations(&library[0], &library);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_backend_error_falls_back() {
        struct FailingBackend;
        impl GenerativeBackend for FailingBackend {
            fn generate_text(&self, _prompt: &str) -> Result<String, AiError> {
                Err(AiError::new("boom"))
            }
            fn generate_ids(&self, _prompt: &str) -> Result<Vec<String>, AiError> {
                Err(AiError::new("boom"))
            }
        }

        let recommender = Recommender::detached(Some(Box::new(FailingBackend)), HashMap::new());
        let library = library();
        let result = recommender.recommendations(&library[0], &library);
        let ids: Vec<&str> = result.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "d"]);

        // A failed request never wedges the in-flight slot
        let again = recommender.recommendations(&library[0], &library);
        assert_eq!(again.len(), 3);
    }

    #[test]
    fn test_offline_recommendations_and_chat() {
        let recommender = Recommender::detached(None, HashMap::new());
        let library = library();

        let result = recommender.recommendations(&library[0], &library);
        assert_eq!(result.len(), 3);

        // Chat never attempts the network without a credential
        assert_eq!(recommender.chat("anything good?", &library), OFFLINE_REPLY);
    }

    #[test]
    fn test_chat_error_degrades_to_apology() {
        struct FailingBackend;
        impl GenerativeBackend for FailingBackend {
            fn generate_text(&self, _prompt: &str) -> Result<String, AiError> {
                Err(AiError::new("boom"))
            }
            fn generate_ids(&self, _prompt: &str) -> Result<Vec<String>, AiError> {
                Err(AiError::new("boom"))
            }
        }

        let recommender = Recommender::detached(Some(Box::new(FailingBackend)), HashMap::new());
        assert_eq!(recommender.chat("hello", &library()), APOLOGY_REPLY);
    }

    #[test]
    fn test_chat_empty_reply_gets_default() {
        struct EmptyBackend;
        impl GenerativeBackend for EmptyBackend {
            fn generate_text(&self, _prompt: &str) -> Result<String, AiError> {
                Ok("   ".to_string())
            }
            fn generate_ids(&self, _prompt: &str) -> Result<Vec<String>, AiError> {
                Ok(Vec::new())
            }
        }

        let recommender = Recommender::detached(Some(Box::new(EmptyBackend)), HashMap::new());
        assert_eq!(
            recommender.chat("hello", &library()),
            "Check out our trending section!"
        );
    }

    #[test]
    fn test_parse_id_array_validates_untrusted_payload() {
        assert_eq!(parse_id_array(r#"["a","b","c"]"#), vec!["a", "b", "c"]);
        assert_eq!(parse_id_array("[]"), Vec::<String>::new());
        // Non-array shapes are treated as empty
        assert_eq!(parse_id_array(r#"{"ids":["a"]}"#), Vec::<String>::new());
        assert_eq!(parse_id_array(r#""just a string""#), Vec::<String>::new());
        // Mixed element types are treated as empty, not partially accepted
        assert_eq!(parse_id_array(r#"["a", 2, "c"]"#), Vec::<String>::new());
        assert_eq!(parse_id_array("not json at all"), Vec::<String>::new());
    }
}
