//! HTTP Interceptor interfaces
//!
//! Interceptors observe the request lifecycle: request interceptors run
//! before every network attempt, response interceptors after every attempt
//! that produced a response (success or HTTP error). They are for
//! side-effecting observation such as logging or auth-expiry detection and
//! cannot change the outcome of a call.
//!
//! Registration returns an [`InterceptorHandle`] that removes the handler
//! again. Handlers run in registration order.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use reqwest::Method;
use reqwest::header::HeaderMap;

use super::transport::ApiResponse;

/// Description of an outgoing attempt.
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub method: Method,
    pub url: String,
    /// 0-based attempt index
    pub attempt: u32,
    pub headers: HeaderMap,
}

/// Called before each network attempt.
pub trait RequestInterceptor: Send + Sync {
    fn on_request(&self, ctx: &RequestContext);
}

impl<F> RequestInterceptor for F
where
    F: Fn(&RequestContext) + Send + Sync,
{
    fn on_request(&self, ctx: &RequestContext) {
        self(ctx)
    }
}

/// Called after each attempt that received a response.
pub trait ResponseInterceptor: Send + Sync {
    fn on_response(&self, response: &ApiResponse, url: &str);
}

impl<F> ResponseInterceptor for F
where
    F: Fn(&ApiResponse, &str) + Send + Sync,
{
    fn on_response(&self, response: &ApiResponse, url: &str) {
        self(response, url)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterceptorKind {
    Request,
    Response,
}

#[derive(Default)]
struct Slots {
    request: Vec<(u64, Arc<dyn RequestInterceptor>)>,
    response: Vec<(u64, Arc<dyn ResponseInterceptor>)>,
}

impl Slots {
    fn remove(&mut self, kind: InterceptorKind, id: u64) -> bool {
        match kind {
            InterceptorKind::Request => {
                let before = self.request.len();
                self.request.retain(|(slot, _)| *slot != id);
                before != self.request.len()
            }
            InterceptorKind::Response => {
                let before = self.response.len();
                self.response.retain(|(slot, _)| *slot != id);
                before != self.response.len()
            }
        }
    }
}

/// Ordered request and response interceptor lists.
///
/// Clones share the same lists.
#[derive(Clone, Default)]
pub struct InterceptorRegistry {
    slots: Arc<RwLock<Slots>>,
    next_id: Arc<AtomicU64>,
}

impl InterceptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_request_interceptor(
        &self,
        interceptor: impl RequestInterceptor + 'static,
    ) -> InterceptorHandle {
        self.add_request_arc(Arc::new(interceptor))
    }

    pub fn add_request_arc(&self, interceptor: Arc<dyn RequestInterceptor>) -> InterceptorHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.write().request.push((id, interceptor));
        self.handle(id, InterceptorKind::Request)
    }

    pub fn add_response_interceptor(
        &self,
        interceptor: impl ResponseInterceptor + 'static,
    ) -> InterceptorHandle {
        self.add_response_arc(Arc::new(interceptor))
    }

    pub fn add_response_arc(&self, interceptor: Arc<dyn ResponseInterceptor>) -> InterceptorHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.write().response.push((id, interceptor));
        self.handle(id, InterceptorKind::Response)
    }

    /// Deregister; returns false if the handler was already removed.
    pub fn remove(&self, handle: &InterceptorHandle) -> bool {
        self.write().remove(handle.kind, handle.id)
    }

    pub fn request_len(&self) -> usize {
        self.read().request.len()
    }

    pub fn response_len(&self) -> usize {
        self.read().response.len()
    }

    /// Invoke request interceptors in registration order.
    pub fn notify_request(&self, ctx: &RequestContext) {
        // Snapshot first so handlers may (de)register without deadlocking.
        let snapshot: Vec<_> = self.read().request.iter().map(|(_, i)| i.clone()).collect();
        for interceptor in snapshot {
            interceptor.on_request(ctx);
        }
    }

    /// Invoke response interceptors in registration order.
    pub fn notify_response(&self, response: &ApiResponse, url: &str) {
        let snapshot: Vec<_> = self.read().response.iter().map(|(_, i)| i.clone()).collect();
        for interceptor in snapshot {
            interceptor.on_response(response, url);
        }
    }

    fn handle(&self, id: u64, kind: InterceptorKind) -> InterceptorHandle {
        InterceptorHandle {
            id,
            kind,
            slots: Arc::downgrade(&self.slots),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Slots> {
        self.slots.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Slots> {
        self.slots.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for InterceptorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorRegistry")
            .field("request", &self.request_len())
            .field("response", &self.response_len())
            .finish()
    }
}

/// Deregistration handle returned by the registry.
pub struct InterceptorHandle {
    id: u64,
    kind: InterceptorKind,
    slots: Weak<RwLock<Slots>>,
}

impl InterceptorHandle {
    pub fn kind(&self) -> InterceptorKind {
        self.kind
    }

    /// Remove the handler from the registry it was added to.
    pub fn remove(&self) -> bool {
        match self.slots.upgrade() {
            Some(slots) => slots
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(self.kind, self.id),
            None => false,
        }
    }
}

impl fmt::Debug for InterceptorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorHandle")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Logs every completed response via `tracing`.
#[derive(Clone, Debug, Default)]
pub struct LoggingInterceptor;

impl ResponseInterceptor for LoggingInterceptor {
    fn on_response(&self, response: &ApiResponse, url: &str) {
        if response.is_success() {
            tracing::info!(target: "vidcast_admin::http", status = response.status(), url = %url, "response ok");
        } else {
            tracing::warn!(target: "vidcast_admin::http", status = response.status(), url = %url, "response failed");
        }
    }
}

/// Flags HTTP 401 responses. Observational only; nothing is refreshed.
#[derive(Clone, Debug, Default)]
pub struct AuthExpiryInterceptor {
    expired: Arc<AtomicBool>,
}

impl AuthExpiryInterceptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// A 401 has been observed since creation or the last `reset`.
    pub fn is_expired(&self) -> bool {
        self.expired.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.expired.store(false, Ordering::SeqCst);
    }
}

impl ResponseInterceptor for AuthExpiryInterceptor {
    fn on_response(&self, response: &ApiResponse, url: &str) {
        if response.status() == 401 {
            self.expired.store(true, Ordering::SeqCst);
            tracing::warn!(target: "vidcast_admin::http", url = %url, "session token expired or invalid");
        }
    }
}
