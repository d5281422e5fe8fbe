//! Payment gateway port.
//!
//! The seam where a real processor integration would plug in. The gateway
//! is always an explicitly constructed, injected capability - never a
//! process-wide singleton.

use crate::domain::{Money, PaymentMethod, TransactionId};
use crate::error::GatewayError;

/// Port trait for payment gateways.
///
/// Validation happens *before* this port is reached: implementations may
/// assume the method details are well-formed and the amount positive.
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync + 'static {
    /// Authorizes a payment and returns the gateway's transaction identifier.
    async fn authorize(
        &self,
        amount: Money,
        method: &PaymentMethod,
    ) -> Result<TransactionId, GatewayError>;

    /// Refunds a prior transaction, fully (`amount` absent) or partially.
    async fn refund(
        &self,
        transaction_id: &TransactionId,
        amount: Option<i64>,
    ) -> Result<(), GatewayError>;
}
