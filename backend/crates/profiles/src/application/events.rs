//! Account Events
//!
//! In-process notification of account lifecycle changes. Handlers are
//! registered once at startup and run synchronously, in registration order,
//! when an event is published.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entity::Account;
use crate::domain::value_object::AccountId;

#[derive(Debug, Clone)]
pub enum AccountEvent {
    /// An account has been durably created
    Created(Account),
}

impl AccountEvent {
    pub fn account_id(&self) -> AccountId {
        match self {
            AccountEvent::Created(account) => account.account_id,
        }
    }
}

/// Failure reported by one handler for one event
#[derive(Debug, Clone, thiserror::Error)]
#[error("{handler} failed for account {account_id}: {detail}")]
pub struct HandlerError {
    pub handler: &'static str,
    pub account_id: AccountId,
    pub detail: String,
}

/// Subscriber to account events.
///
/// A handler logs its own failures; the bus only records them.
#[async_trait]
pub trait AccountEventHandler: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    async fn handle(&self, event: &AccountEvent) -> Result<(), HandlerError>;
}

/// Outcome of one [`AccountEventBus::publish`] call
#[derive(Debug, Default)]
pub struct PublishReport {
    /// Handlers that completed successfully
    pub delivered: usize,
    pub failures: Vec<HandlerError>,
}

impl PublishReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Clone, Default)]
pub struct AccountEventBus {
    handlers: Vec<Arc<dyn AccountEventHandler>>,
}

impl AccountEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: Arc<dyn AccountEventHandler>) {
        tracing::debug!(handler = handler.name(), "Account event handler subscribed");
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Run every handler for `event`.
    ///
    /// Never fails: each handler error is collected in the report and the
    /// remaining handlers still run.
    pub async fn publish(&self, event: &AccountEvent) -> PublishReport {
        let mut report = PublishReport::default();

        for handler in &self.handlers {
            match handler.handle(event).await {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    tracing::debug!(
                        account_id = %e.account_id,
                        handler = e.handler,
                        "Account event handler failed, continuing"
                    );
                    report.failures.push(e);
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::account_metadata::AccountMetadata;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting(AtomicUsize);

    #[async_trait]
    impl AccountEventHandler for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn handle(&self, _event: &AccountEvent) -> Result<(), HandlerError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct Failing;

    #[async_trait]
    impl AccountEventHandler for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn handle(&self, event: &AccountEvent) -> Result<(), HandlerError> {
            Err(HandlerError {
                handler: self.name(),
                account_id: event.account_id(),
                detail: "boom".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_later_handlers() {
        let counting = Arc::new(Counting(AtomicUsize::new(0)));
        let mut bus = AccountEventBus::new();
        bus.subscribe(Arc::new(Failing));
        bus.subscribe(counting.clone());

        let account = Account::new(None, AccountMetadata::new());
        let report = bus.publish(&AccountEvent::Created(account.clone())).await;

        assert_eq!(report.delivered, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].account_id, account.account_id);
        assert!(!report.is_clean());
        assert_eq!(counting.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_publish_without_handlers() {
        let bus = AccountEventBus::new();
        let account = Account::new(None, AccountMetadata::new());
        let report = bus.publish(&AccountEvent::Created(account)).await;
        assert!(report.is_clean());
        assert_eq!(report.delivered, 0);
    }
}
