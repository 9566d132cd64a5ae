//! Request context for propagating request metadata and cancellation
//!
//! Every tool invocation carries a `RequestContext`. It is created by the
//! process entry point (one per incoming call) and passed down through the
//! dispatcher to the gateway port, where the cancellation token interrupts
//! both the rate-gate wait and the in-flight HTTP request.
//!
//! # Examples
//!
//! ```
//! use application::RequestContext;
//!
//! let ctx = RequestContext::new();
//! assert!(!ctx.request_id().is_nil());
//! assert!(!ctx.is_cancelled());
//! ```

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Context for a single tool invocation
///
/// - `request_id`: A unique identifier for tracing/logging
/// - `cancel`: Token that aborts the invocation when triggered
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: Uuid,
    cancel: CancellationToken,
}

impl RequestContext {
    /// Create a new request context with a fresh token
    #[must_use]
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            cancel: CancellationToken::new(),
        }
    }

    /// Create a request context canceled together with `parent`
    ///
    /// Canceling the parent cancels this context; canceling this context
    /// leaves the parent untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use application::RequestContext;
    /// use tokio_util::sync::CancellationToken;
    ///
    /// let shutdown = CancellationToken::new();
    /// let ctx = RequestContext::child_of(&shutdown);
    /// shutdown.cancel();
    /// assert!(ctx.is_cancelled());
    /// ```
    #[must_use]
    pub fn child_of(parent: &CancellationToken) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            cancel: parent.child_token(),
        }
    }

    /// The request ID
    #[must_use]
    pub const fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// The cancellation token for this request
    #[must_use]
    pub const fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Cancel this request
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether this request has been canceled
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
