//! middleware/rate_limit.rs
//! Límite de peticiones por IP con ventana fija.

use std::future::{ready, Future, Ready};
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue},
    http::StatusCode,
    Error, HttpResponse,
};
use dashmap::DashMap;
use serde::Serialize;

use crate::config::app_config::RateLimitSettings;

const CLEANUP_INTERVAL: Duration = Duration::from_secs(300);
const EXEMPT_PATHS: [&str; 1] = ["/health"];

struct Bucket {
    tokens: u32,
    window_start: Instant,
}

impl Bucket {
    fn new(max_tokens: u32) -> Self {
        Bucket {
            tokens: max_tokens,
            window_start: Instant::now(),
        }
    }

    fn try_consume(&mut self, max_tokens: u32, window: Duration) -> bool {
        let now = Instant::now();
        if now.duration_since(self.window_start) >= window {
            self.tokens = max_tokens;
            self.window_start = now;
        }
        if self.tokens > 0 {
            self.tokens -= 1;
            true
        } else {
            false
        }
    }

    fn retry_after(&self, window: Duration) -> u64 {
        let left = window.saturating_sub(self.window_start.elapsed());
        left.as_secs().max(1)
    }
}

/// Resultado de consultar el bucket de una IP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub allowed: bool,
    pub remaining: u32,
    pub retry_after: u64,
}

pub struct RateLimiterState {
    buckets: DashMap<String, Bucket>,
    settings: RateLimitSettings,
}

impl RateLimiterState {
    pub fn new(settings: RateLimitSettings) -> Self {
        RateLimiterState {
            buckets: DashMap::new(),
            settings,
        }
    }

    pub fn check(&self, key: &str) -> Decision {
        let max = self.settings.max_requests;
        if !self.settings.enabled {
            return Decision {
                allowed: true,
                remaining: max,
                retry_after: 0,
            };
        }

        let mut bucket = self
            .buckets
            .entry(key.to_string())
            .or_insert_with(|| Bucket::new(max));
        let allowed = bucket.try_consume(max, self.settings.window);
        Decision {
            allowed,
            remaining: bucket.tokens,
            retry_after: if allowed {
                0
            } else {
                bucket.retry_after(self.settings.window)
            },
        }
    }

    /// Borra buckets sin actividad en las últimas dos ventanas.
    pub fn cleanup(&self) {
        let max_age = self.settings.window * 2;
        self.buckets
            .retain(|_, bucket| bucket.window_start.elapsed() < max_age);
    }

    pub fn tracked_clients(&self) -> usize {
        self.buckets.len()
    }
}

#[derive(Clone)]
pub struct RateLimiter {
    state: Arc<RateLimiterState>,
}

impl RateLimiter {
    pub fn new(settings: RateLimitSettings) -> Self {
        RateLimiter {
            state: Arc::new(RateLimiterState::new(settings)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.settings.enabled
    }

    /// Tarea de limpieza periódica. Requiere un runtime de tokio activo.
    pub fn start_cleanup_task(&self) -> tokio::task::JoinHandle<()> {
        let state = self.state.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
            loop {
                interval.tick().await;
                state.cleanup();
                log::debug!(
                    "Limpieza del rate limiter: {} clientes",
                    state.tracked_clients()
                );
            }
        })
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimiterMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimiterMiddleware {
            service,
            state: self.state.clone(),
        }))
    }
}

pub struct RateLimiterMiddleware<S> {
    service: S,
    state: Arc<RateLimiterState>,
}

#[derive(Serialize)]
struct RateLimitExceeded {
    detail: String,
    retry_after: u64,
}

impl<S, B> Service<ServiceRequest> for RateLimiterMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if !self.state.settings.enabled || EXEMPT_PATHS.contains(&req.path()) {
            let fut = self.service.call(req);
            return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
        }

        let client_ip = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();
        let decision = self.state.check(&client_ip);
        let limit = self.state.settings.max_requests;

        if !decision.allowed {
            log::warn!("Rate limit excedido para {}", client_ip);
            let response = HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
                .insert_header(("X-RateLimit-Limit", limit.to_string()))
                .insert_header(("X-RateLimit-Remaining", "0"))
                .insert_header(("Retry-After", decision.retry_after.to_string()))
                .json(RateLimitExceeded {
                    detail: "Too many requests. Please try again later.".to_string(),
                    retry_after: decision.retry_after,
                });
            return Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) });
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?;
            let headers = res.headers_mut();
            headers.insert(
                HeaderName::from_static("x-ratelimit-limit"),
                HeaderValue::from(limit),
            );
            headers.insert(
                HeaderName::from_static("x-ratelimit-remaining"),
                HeaderValue::from(decision.remaining),
            );
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(max_requests: u32, enabled: bool) -> RateLimitSettings {
        RateLimitSettings {
            enabled,
            max_requests,
            window: Duration::from_secs(60),
        }
    }

    #[test]
    fn allows_up_to_the_limit_then_rejects() {
        let state = RateLimiterState::new(settings(3, true));
        for expected_remaining in [2, 1, 0] {
            let d = state.check("10.0.0.1");
            assert!(d.allowed);
            assert_eq!(d.remaining, expected_remaining);
        }
        let d = state.check("10.0.0.1");
        assert!(!d.allowed);
        assert!(d.retry_after >= 1 && d.retry_after <= 60);
    }

    #[test]
    fn clients_have_separate_buckets() {
        let state = RateLimiterState::new(settings(1, true));
        assert!(state.check("a").allowed);
        assert!(!state.check("a").allowed);
        assert!(state.check("b").allowed);
    }

    #[test]
    fn disabled_never_rejects() {
        let state = RateLimiterState::new(settings(1, false));
        for _ in 0..10 {
            assert!(state.check("a").allowed);
        }
        assert_eq!(state.tracked_clients(), 0);
    }

    #[test]
    fn window_reset_refills_tokens() {
        let state = RateLimiterState::new(RateLimitSettings {
            enabled: true,
            max_requests: 1,
            window: Duration::from_millis(20),
        });
        assert!(state.check("a").allowed);
        assert!(!state.check("a").allowed);
        std::thread::sleep(Duration::from_millis(30));
        assert!(state.check("a").allowed);
    }

    #[test]
    fn cleanup_drops_idle_buckets() {
        let state = RateLimiterState::new(RateLimitSettings {
            enabled: true,
            max_requests: 5,
            window: Duration::from_millis(10),
        });
        state.check("a");
        std::thread::sleep(Duration::from_millis(25));
        state.cleanup();
        assert_eq!(state.tracked_clients(), 0);
    }
}
