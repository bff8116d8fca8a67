#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use chrono::Utc;
use serde_json::json;
use shortlink::application::services::{GenerationLimits, LinkService};
use shortlink::domain::entities::{Link, NewLink};
use shortlink::domain::repositories::LinkRepository;
use shortlink::error::AppError;
use shortlink::infrastructure::cache::NullCache;
use shortlink::routes::router;
use shortlink::state::AppState;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const BASE_URL: &str = "https://s.example.com";

/// In-memory link store with the same guarantees as the PostgreSQL one:
/// inserts check and claim the code under a single lock.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: Mutex<HashMap<String, Link>>,
    next_id: AtomicUsize,
    /// Number of upcoming `exists` calls that report a collision.
    forced_collisions: AtomicUsize,
    pub exists_calls: AtomicUsize,
    pub insert_calls: AtomicUsize,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `n` existence checks report a taken code.
    pub fn force_collisions(&self, n: usize) {
        self.forced_collisions.store(n, Ordering::SeqCst);
    }

    pub fn codes(&self) -> Vec<String> {
        self.links.lock().unwrap().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.links.lock().unwrap().len()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn find_code_for(&self, long_url: &str) -> Result<Option<String>, AppError> {
        let links = self.links.lock().unwrap();
        Ok(links
            .values()
            .filter(|link| link.long_url == long_url)
            .min_by_key(|link| link.id)
            .map(|link| link.code.clone()))
    }

    async fn find_url_for(&self, code: &str) -> Result<Option<String>, AppError> {
        let links = self.links.lock().unwrap();
        Ok(links.get(code).map(|link| link.long_url.clone()))
    }

    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);

        let forced = self
            .forced_collisions
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if forced {
            return Ok(true);
        }

        Ok(self.links.lock().unwrap().contains_key(code))
    }

    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);

        let mut links = self.links.lock().unwrap();
        if links.contains_key(&new_link.code) {
            return Err(AppError::conflict(
                "Short code already exists",
                json!({ "code": new_link.code }),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        let link = Link::new(id, new_link.code, new_link.long_url, 0, Utc::now());
        links.insert(link.code.clone(), link.clone());

        Ok(link)
    }

    async fn increment_visits(&self, code: &str) -> Result<bool, AppError> {
        let mut links = self.links.lock().unwrap();
        match links.get_mut(code) {
            Some(link) => {
                link.visit_count += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn visit_count(&self, code: &str) -> Result<Option<i64>, AppError> {
        let links = self.links.lock().unwrap();
        Ok(links.get(code).map(|link| link.visit_count))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.links.lock().unwrap().len() as i64)
    }
}

pub fn create_test_service(repo: Arc<InMemoryLinkRepository>) -> Arc<LinkService> {
    Arc::new(LinkService::new(repo, Arc::new(NullCache::new())))
}

pub fn create_test_state(repo: Arc<InMemoryLinkRepository>) -> AppState {
    let cache = Arc::new(NullCache::new());
    let link_service = Arc::new(LinkService::new(repo, cache.clone()));

    AppState::new(link_service, cache, BASE_URL)
}

/// Builds the application routes (without rate limiting) over `repo`.
pub fn create_test_server(repo: Arc<InMemoryLinkRepository>) -> TestServer {
    let app = router(create_test_state(repo), None);
    TestServer::new(app).unwrap()
}

pub fn create_test_router(repo: Arc<InMemoryLinkRepository>, limits: GenerationLimits) -> Router {
    let cache = Arc::new(NullCache::new());
    let link_service = Arc::new(LinkService::new(repo, cache.clone()).with_limits(limits));
    let state = AppState::new(link_service, cache, BASE_URL);

    Router::new()
        .route(
            "/api/shorten",
            axum::routing::post(shortlink::api::handlers::shorten_handler),
        )
        .with_state(state)
}

pub async fn create_test_link(pool: &PgPool, code: &str, url: &str) {
    sqlx::query("INSERT INTO links (code, long_url) VALUES ($1, $2)")
        .bind(code)
        .bind(url)
        .execute(pool)
        .await
        .unwrap();
}
