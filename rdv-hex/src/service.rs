//! Payment Application Service
//!
//! Orchestrates the validate-then-authorize flow through the gateway and
//! ledger ports. Contains NO infrastructure logic - pure business
//! orchestration.

use chrono::{Datelike, Utc};

use rdv_types::{
    AppError, CardExpiry, CardNumber, Cvv, Money, Payment, PaymentError, PaymentGateway,
    PaymentMethod, PaymentMethodDto, PaymentRequest, PaymentResponse, PaymentStatus, PhoneNumber,
    Refund, RefundError, RefundRequest, RefundResponse, TransactionId, TransactionLedger,
};

/// Application service for payment operations.
///
/// Generic over the gateway and ledger ports - the adapters are injected
/// at construction time. This enables:
/// - Swapping the simulated gateway for a real integration without code changes
/// - Testing with mock adapters
/// - Compile-time checks for port implementation
pub struct PaymentService<G: PaymentGateway, L: TransactionLedger> {
    gateway: G,
    ledger: L,
}

impl<G: PaymentGateway, L: TransactionLedger> PaymentService<G, L> {
    /// Creates a new payment service with the given gateway and ledger.
    pub fn new(gateway: G, ledger: L) -> Self {
        Self { gateway, ledger }
    }

    /// Returns a reference to the underlying ledger.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Returns a reference to the underlying gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Payments
    // ─────────────────────────────────────────────────────────────────────────

    /// Validates and authorizes a payment.
    ///
    /// No [`PaymentResponse`] is ever produced for invalid input: the call
    /// fails before the gateway is reached. A rejected card is a final
    /// answer for that request, not a transient fault.
    pub async fn process_payment(&self, req: PaymentRequest) -> Result<PaymentResponse, AppError> {
        let amount = Money::new(req.amount, req.currency).map_err(AppError::from)?;

        let now = Utc::now();
        let method = validate_method(&req.method, now.year() as u16, now.month() as u8)?;

        let transaction_id = self
            .gateway
            .authorize(amount, &method)
            .await
            .map_err(PaymentError::from)?;

        let payment = Payment::authorized(
            transaction_id.clone(),
            amount,
            method.kind(),
            req.description,
        );
        self.ledger.record_payment(payment).await?;

        tracing::info!(%transaction_id, amount = %amount, "payment authorized");

        Ok(PaymentResponse {
            transaction_id,
            status: PaymentStatus::Authorized,
            amount: amount.amount(),
            currency: amount.currency(),
        })
    }

    /// Gets a recorded payment by transaction identifier.
    pub async fn get_payment(&self, id: &str) -> Result<Payment, AppError> {
        let id: TransactionId = id.parse().map_err(AppError::from)?;
        self.ledger
            .get_payment(&id)
            .await
            .map_err(Into::into)
            .and_then(|opt| opt.ok_or_else(|| AppError::NotFound(format!("Transaction {}", id))))
    }

    /// Lists all recorded payments.
    pub async fn list_payments(&self) -> Result<Vec<Payment>, AppError> {
        self.ledger.list_payments().await.map_err(Into::into)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Refunds
    // ─────────────────────────────────────────────────────────────────────────

    /// Refunds a prior transaction, fully or partially.
    ///
    /// An absent amount means a full refund of the original transaction.
    /// The transaction identifier is treated as opaque: it is not required
    /// to exist in the local ledger (it may have been issued before this
    /// process started). The gateway decides whether it is refundable.
    pub async fn process_refund(&self, req: RefundRequest) -> Result<RefundResponse, AppError> {
        let id: TransactionId = req.transaction_id.parse().map_err(AppError::from)?;

        if let Some(amount) = req.amount {
            if amount <= 0 {
                return Err(RefundError::InvalidAmount.into());
            }
        }

        self.gateway
            .refund(&id, req.amount)
            .await
            .map_err(RefundError::from)?;

        self.ledger
            .record_refund(Refund::new(id.clone(), req.amount))
            .await?;

        tracing::info!(transaction_id = %id, amount = ?req.amount, "refund processed");

        Ok(RefundResponse {
            transaction_id: id,
            success: true,
            amount: req.amount,
        })
    }
}

/// Validates wire-format payment method details into a domain method.
///
/// The reference (year, month) is the current month for the expiry check;
/// it is a parameter so the clock stays testable.
pub fn validate_method(
    dto: &PaymentMethodDto,
    year: u16,
    month: u8,
) -> Result<PaymentMethod, PaymentError> {
    match dto {
        PaymentMethodDto::Card {
            card_number,
            expiry,
            cvv,
        } => {
            let number = CardNumber::parse(card_number)?;
            let expiry: CardExpiry = expiry.parse()?;
            if expiry.is_expired_as_of(year, month) {
                return Err(rdv_types::CardError::Expired.into());
            }
            let cvv = Cvv::parse(cvv)?;
            Ok(PaymentMethod::Card {
                number,
                expiry,
                cvv,
            })
        }
        PaymentMethodDto::MobileMoney { phone, operator } => Ok(PaymentMethod::MobileMoney {
            phone: PhoneNumber::parse(phone)?,
            operator: operator.parse()?,
        }),
        PaymentMethodDto::ApplePay { token } => {
            wallet_method(rdv_types::WalletProvider::ApplePay, token)
        }
        PaymentMethodDto::GooglePay { token } => {
            wallet_method(rdv_types::WalletProvider::GooglePay, token)
        }
    }
}

fn wallet_method(
    provider: rdv_types::WalletProvider,
    token: &str,
) -> Result<PaymentMethod, PaymentError> {
    if token.trim().is_empty() {
        return Err(PaymentError::InvalidWalletToken);
    }
    Ok(PaymentMethod::Wallet {
        provider,
        token: token.to_string(),
    })
}
