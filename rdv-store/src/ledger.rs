//! In-memory transaction ledger.

use std::sync::Mutex;

use dashmap::DashMap;

use rdv_types::{Payment, PaymentStatus, Refund, StoreError, TransactionId, TransactionLedger};

/// Ledger backed by a concurrent map, suitable for a single process.
///
/// Refunds against identifiers the ledger has never seen are logged and
/// kept: the identifier may have been issued by an external processor
/// before this process started.
#[derive(Default)]
pub struct MemoryLedger {
    payments: DashMap<TransactionId, Payment>,
    refunds: Mutex<Vec<Refund>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all refunds logged against a transaction.
    pub fn refunds_for(&self, id: &TransactionId) -> Vec<Refund> {
        self.refunds
            .lock()
            .expect("refund log poisoned")
            .iter()
            .filter(|r| &r.transaction_id == id)
            .cloned()
            .collect()
    }
}

#[async_trait::async_trait]
impl TransactionLedger for MemoryLedger {
    async fn record_payment(&self, payment: Payment) -> Result<(), StoreError> {
        if self.payments.contains_key(&payment.transaction_id) {
            return Err(StoreError::Conflict(format!(
                "Transaction already recorded: {}",
                payment.transaction_id
            )));
        }
        self.payments.insert(payment.transaction_id.clone(), payment);
        Ok(())
    }

    async fn record_refund(&self, refund: Refund) -> Result<(), StoreError> {
        match self.payments.get_mut(&refund.transaction_id) {
            Some(mut payment) => {
                payment.status = if refund.is_full() {
                    PaymentStatus::Refunded
                } else {
                    PaymentStatus::PartiallyRefunded
                };
            }
            None => {
                tracing::warn!(
                    transaction_id = %refund.transaction_id,
                    "refund logged against a transaction unknown to the ledger"
                );
            }
        }

        self.refunds
            .lock()
            .expect("refund log poisoned")
            .push(refund);
        Ok(())
    }

    async fn get_payment(&self, id: &TransactionId) -> Result<Option<Payment>, StoreError> {
        Ok(self.payments.get(id).map(|p| p.value().clone()))
    }

    async fn list_payments(&self) -> Result<Vec<Payment>, StoreError> {
        let mut payments: Vec<Payment> =
            self.payments.iter().map(|entry| entry.value().clone()).collect();
        payments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(payments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdv_types::{Currency, Money, PaymentMethodKind};

    fn sample_payment(id: &str) -> Payment {
        Payment::authorized(
            id.parse().unwrap(),
            Money::new(10000, Currency::EUR).unwrap(),
            PaymentMethodKind::Card,
            Some("Booking deposit".into()),
        )
    }

    #[tokio::test]
    async fn test_record_and_get_payment() {
        let ledger = MemoryLedger::new();
        ledger.record_payment(sample_payment("txn_a")).await.unwrap();

        let payment = ledger
            .get_payment(&"txn_a".parse().unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(payment.status, PaymentStatus::Authorized);
        assert_eq!(payment.amount.amount(), 10000);
    }

    #[tokio::test]
    async fn test_duplicate_payment_conflicts() {
        let ledger = MemoryLedger::new();
        ledger.record_payment(sample_payment("txn_a")).await.unwrap();

        let result = ledger.record_payment(sample_payment("txn_a")).await;
        assert!(matches!(result, Err(StoreError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_full_refund_marks_payment_refunded() {
        let ledger = MemoryLedger::new();
        ledger.record_payment(sample_payment("txn_a")).await.unwrap();

        let id: TransactionId = "txn_a".parse().unwrap();
        ledger.record_refund(Refund::new(id.clone(), None)).await.unwrap();

        let payment = ledger.get_payment(&id).await.unwrap().unwrap();
        assert_eq!(payment.status, PaymentStatus::Refunded);
        assert_eq!(ledger.refunds_for(&id).len(), 1);
    }

    #[tokio::test]
    async fn test_partial_refund_marks_payment_partially_refunded() {
        let ledger = MemoryLedger::new();
        ledger.record_payment(sample_payment("txn_a")).await.unwrap();

        let id: TransactionId = "txn_a".parse().unwrap();
        ledger
            .record_refund(Refund::new(id.clone(), Some(2500)))
            .await
            .unwrap();

        let payment = ledger.get_payment(&id).await.unwrap().unwrap();
        assert_eq!(payment.status, PaymentStatus::PartiallyRefunded);
    }

    #[tokio::test]
    async fn test_refund_for_unknown_transaction_is_kept() {
        let ledger = MemoryLedger::new();

        let id: TransactionId = "txn_elsewhere".parse().unwrap();
        ledger.record_refund(Refund::new(id.clone(), Some(50))).await.unwrap();

        assert_eq!(ledger.refunds_for(&id).len(), 1);
        assert!(ledger.get_payment(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_payments_most_recent_first() {
        let ledger = MemoryLedger::new();
        ledger.record_payment(sample_payment("txn_a")).await.unwrap();
        ledger.record_payment(sample_payment("txn_b")).await.unwrap();

        let payments = ledger.list_payments().await.unwrap();
        assert_eq!(payments.len(), 2);
        assert!(payments[0].created_at >= payments[1].created_at);
    }
}
