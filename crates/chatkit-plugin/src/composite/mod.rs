//! Composites presenting an ordered group of listeners as one listener.
//!
//! Every composite follows the same dispatch rules:
//!
//! - Hooks run sequentially in registration order on the caller's task.
//!   Each hook is awaited to completion before the next listener is entered.
//! - Notification hooks are invoked on every listener.
//! - Precondition hooks are invoked on every listener, even after one has
//!   failed. The aggregate is the first failure in registration order, or
//!   success when all succeeded (including the empty composite).
//! - A listener that panics or exceeds the hook timeout is logged and, under
//!   [`FaultPolicy::Isolate`], does not stop the remaining listeners. For a
//!   precondition hook such a fault counts as that listener's failure.
//!
//! Composites carry no state between invocations.

pub mod query_channels;
pub mod thread_query;
pub mod typing;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use tracing::{debug, error, warn};

use chatkit_core::config::plugin::{FaultPolicy, PluginConfig};
use chatkit_core::{ChatError, ChatResult, fold_results};

use crate::listeners::Listener;

pub use query_channels::QueryChannelsListenerComposite;
pub use thread_query::ThreadQueryListenerComposite;
pub use typing::TypingEventListenerComposite;

/// How a composite guards individual hook invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchPolicy {
    /// Upper bound for a single hook invocation.
    pub timeout: Option<Duration>,
    /// What happens when a listener panics.
    pub fault_policy: FaultPolicy,
}

impl DispatchPolicy {
    /// Builds the policy from plugin configuration.
    pub fn from_config(config: &PluginConfig) -> Self {
        Self {
            timeout: config.hook_timeout(),
            fault_policy: config.fault_policy,
        }
    }
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self::from_config(&PluginConfig::default())
    }
}

/// Ordered fan-out over listeners of one capability.
pub(crate) struct FanOut<L: ?Sized> {
    listeners: Vec<Arc<L>>,
    policy: DispatchPolicy,
}

impl<L: Listener + ?Sized> FanOut<L> {
    pub(crate) fn new(listeners: Vec<Arc<L>>, policy: DispatchPolicy) -> Self {
        Self { listeners, policy }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    /// Invokes a notification hook on every listener in order.
    pub(crate) async fn notify<'a, F>(&'a self, hook: &'static str, call: F)
    where
        F: Fn(&'a L) -> BoxFuture<'a, ()>,
    {
        if self.listeners.is_empty() {
            return;
        }

        debug!(hook, listener_count = self.listeners.len(), "Dispatching notification");

        for listener in &self.listeners {
            let listener: &'a L = listener.as_ref();
            // Faults are already logged by `guard`.
            let _ = self.guard(hook, listener.name(), call(listener)).await;
        }
    }

    /// Invokes a precondition hook on every listener in order and folds the
    /// outcomes.
    pub(crate) async fn precondition<'a, F>(&'a self, hook: &'static str, call: F) -> ChatResult<()>
    where
        F: Fn(&'a L) -> BoxFuture<'a, ChatResult<()>>,
    {
        if self.listeners.is_empty() {
            return Ok(());
        }

        debug!(hook, listener_count = self.listeners.len(), "Checking precondition");

        let mut results = Vec::with_capacity(self.listeners.len());
        for listener in &self.listeners {
            let listener: &'a L = listener.as_ref();
            let result = self
                .guard(hook, listener.name(), call(listener))
                .await
                .and_then(std::convert::identity);

            if let Err(err) = &result {
                debug!(
                    hook,
                    listener = listener.name(),
                    error = %err,
                    "Listener rejected precondition"
                );
            }
            results.push(result);
        }

        fold_results(results)
    }

    /// Awaits one hook invocation, converting panics and timeouts into
    /// errors.
    async fn guard<T>(&self, hook: &'static str, listener: &str, call: BoxFuture<'_, T>) -> ChatResult<T> {
        let call = AssertUnwindSafe(call).catch_unwind();

        let outcome = match self.policy.timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    warn!(
                        hook,
                        listener,
                        timeout_ms = limit.as_millis() as u64,
                        "Listener hook timed out"
                    );
                    return Err(ChatError::timeout(format!(
                        "listener '{listener}' timed out in {hook}"
                    )));
                }
            },
            None => call.await,
        };

        outcome.map_err(|panic| {
            error!(hook, listener, "Listener hook panicked");
            if self.policy.fault_policy == FaultPolicy::Propagate {
                std::panic::resume_unwind(panic);
            }
            ChatError::listener(format!("listener '{listener}' panicked in {hook}"))
        })
    }
}

impl<L: Listener + ?Sized> fmt::Debug for FanOut<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FanOut")
            .field(
                "listeners",
                &self.listeners.iter().map(|l| l.name()).collect::<Vec<_>>(),
            )
            .field("policy", &self.policy)
            .finish()
    }
}
