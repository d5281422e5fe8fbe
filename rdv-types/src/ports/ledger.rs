//! Transaction ledger port.
//!
//! The persistence collaborator: successful authorizations are recorded
//! here, and refunds are logged against an existing transaction identifier.

use crate::domain::{Payment, Refund, TransactionId};
use crate::error::StoreError;

/// Port trait for the transaction ledger.
#[async_trait::async_trait]
pub trait TransactionLedger: Send + Sync + 'static {
    /// Records a freshly authorized payment.
    async fn record_payment(&self, payment: Payment) -> Result<(), StoreError>;

    /// Logs a refund against a prior transaction.
    ///
    /// The transaction identifier is not required to be known to the
    /// ledger; implementations decide how to treat unknown identifiers.
    async fn record_refund(&self, refund: Refund) -> Result<(), StoreError>;

    /// Gets a recorded payment by its transaction identifier.
    async fn get_payment(&self, id: &TransactionId) -> Result<Option<Payment>, StoreError>;

    /// Lists all recorded payments, most recent first.
    async fn list_payments(&self) -> Result<Vec<Payment>, StoreError>;
}
