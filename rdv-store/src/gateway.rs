//! Simulated payment gateway.
//!
//! Stands in for a real processor integration: every authorization and
//! refund succeeds. Validation has already happened upstream, so the only
//! work left is minting a transaction identifier.

use rdv_types::{GatewayError, Money, PaymentGateway, PaymentMethod, TransactionId};

/// Gateway adapter that unconditionally approves.
#[derive(Debug, Default, Clone)]
pub struct SimulatedGateway;

impl SimulatedGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn authorize(
        &self,
        amount: Money,
        method: &PaymentMethod,
    ) -> Result<TransactionId, GatewayError> {
        let transaction_id = TransactionId::generate();
        tracing::debug!(
            %transaction_id,
            method = %method.kind(),
            amount = amount.amount(),
            currency = %amount.currency(),
            "simulated authorization approved"
        );
        Ok(transaction_id)
    }

    async fn refund(
        &self,
        transaction_id: &TransactionId,
        amount: Option<i64>,
    ) -> Result<(), GatewayError> {
        tracing::debug!(%transaction_id, ?amount, "simulated refund approved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdv_types::{Currency, WalletProvider};

    #[tokio::test]
    async fn test_authorize_mints_transaction_id() {
        let gateway = SimulatedGateway::new();
        let amount = Money::new(10000, Currency::EUR).unwrap();
        let method = PaymentMethod::Wallet {
            provider: WalletProvider::GooglePay,
            token: "tok_abc".into(),
        };

        let id = gateway.authorize(amount, &method).await.unwrap();
        assert!(id.as_str().starts_with("txn_"));
    }

    #[tokio::test]
    async fn test_refund_always_succeeds() {
        let gateway = SimulatedGateway::new();
        let id: TransactionId = "txn_123456".parse().unwrap();

        assert!(gateway.refund(&id, Some(50)).await.is_ok());
        assert!(gateway.refund(&id, None).await.is_ok());
    }
}
