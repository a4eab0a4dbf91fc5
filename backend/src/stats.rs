use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Request, Response};
use shared::models::HealthStatus;

#[derive(Debug)]
pub struct ServiceStats {
    started: Instant,
    processed: AtomicU64,
    errors: AtomicU64,
}

impl Default for ServiceStats {
    fn default() -> Self {
        Self {
            started: Instant::now(),
            processed: AtomicU64::new(0),
            errors: AtomicU64::new(0),
        }
    }
}

impl ServiceStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, status: u16) {
        match status {
            200..=299 => self.processed.fetch_add(1, Ordering::Relaxed),
            400..=599 => self.errors.fetch_add(1, Ordering::Relaxed),
            _ => return,
        };
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            uptime: self.started.elapsed().as_secs(),
            users_processed: self.processed.load(Ordering::Relaxed),
            errors_encountered: self.errors.load(Ordering::Relaxed),
        }
    }
}

/// Feeds response statuses into the managed [`ServiceStats`].
pub struct RequestStats;

#[rocket::async_trait]
impl Fairing for RequestStats {
    fn info(&self) -> Info {
        Info {
            name: "Request stats",
            kind: Kind::Response
        }
    }

    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut Response<'r>) {
        let path = req.uri().path().as_str();
        if path == "/voters/health" || req.method() == rocket::http::Method::Options {
            return;
        }

        let status = res.status().code;
        // only voter routes count as processed; stray paths still count as errors
        if status < 400 && !path.starts_with("/voters") {
            return;
        }

        if let Some(stats) = req.rocket().state::<ServiceStats>() {
            stats.record(status);
        }
    }
}
