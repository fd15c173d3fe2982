//! Simulated payment bridge.
//!
//! No real payment processor is integrated. Checkout produces a fake but
//! well-formed client secret and a hosted-checkout URL; in demo mode the
//! success redirect carries a `demo=true` flag so the frontend can label
//! the order as simulated.
//!
//! The status contract is deliberately small: `Pending -> Succeeded` or
//! `Pending -> Failed`, terminal states are final. Nothing here drives
//! `Failed` - that transition exists for a future real integration.

use rand::distr::{Alphanumeric, SampleString};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use voltlane_core::Email;

/// Payment session status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentState {
    #[default]
    Pending,
    Succeeded,
    Failed,
}

impl PaymentState {
    /// Whether a transition from `self` to `next` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Succeeded) | (Self::Pending, Self::Failed)
        )
    }
}

/// Error building a checkout session.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The configured checkout URL is not a valid base URL.
    #[error("invalid checkout URL: {0}")]
    InvalidCheckoutUrl(#[from] url::ParseError),
    /// A transition violating the status contract was requested.
    #[error("illegal payment transition: {from:?} -> {to:?}")]
    IllegalTransition {
        from: PaymentState,
        to: PaymentState,
    },
}

/// What checkout needs to hand to the payment page.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub amount: Decimal,
    pub currency: String,
    pub customer_email: Email,
    pub customer_name: String,
}

/// A created (simulated) payment session.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSession {
    /// Fake client secret, shaped like `pi_<id>_secret_<nonce>`.
    pub client_secret: String,
    /// Hosted checkout page URL with the payment parameters attached.
    pub checkout_url: String,
    /// Whether this session is simulated.
    pub demo: bool,
    pub state: PaymentState,
}

impl CheckoutSession {
    /// Advance the session state, enforcing the transition contract.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::IllegalTransition`] for anything other than
    /// `Pending -> Succeeded` or `Pending -> Failed`.
    pub fn transition(&mut self, next: PaymentState) -> Result<(), PaymentError> {
        if !self.state.can_transition_to(next) {
            return Err(PaymentError::IllegalTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }
}

/// Builder for simulated checkout sessions.
#[derive(Debug, Clone)]
pub struct PaymentBridge {
    checkout_url: Url,
    base_url: String,
    demo_mode: bool,
}

impl PaymentBridge {
    /// Create a bridge.
    ///
    /// # Arguments
    ///
    /// * `checkout_url` - the hosted checkout page (a local static page in demo mode)
    /// * `base_url` - public storefront URL, used for success/cancel redirects
    /// * `demo_mode` - marks sessions (and the success redirect) as simulated
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::InvalidCheckoutUrl`] if `checkout_url` does not parse.
    pub fn new(checkout_url: &str, base_url: &str, demo_mode: bool) -> Result<Self, PaymentError> {
        Ok(Self {
            checkout_url: Url::parse(checkout_url)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            demo_mode,
        })
    }

    /// Whether sessions from this bridge are simulated.
    #[must_use]
    pub const fn demo_mode(&self) -> bool {
        self.demo_mode
    }

    /// Create a payment session for an order total.
    ///
    /// The returned URL carries `amount`, `currency`, `customer_email`,
    /// `customer_name`, `success_url`, and `cancel_url` query parameters.
    #[must_use]
    pub fn create_session(&self, request: &CheckoutRequest) -> CheckoutSession {
        let mut success_url = format!("{}/checkout/success", self.base_url);
        if self.demo_mode {
            success_url.push_str("?demo=true");
        }
        let cancel_url = format!("{}/checkout/cancel", self.base_url);

        let mut url = self.checkout_url.clone();
        url.query_pairs_mut()
            .append_pair("amount", &request.amount.to_string())
            .append_pair("currency", &request.currency)
            .append_pair("customer_email", request.customer_email.as_str())
            .append_pair("customer_name", &request.customer_name)
            .append_pair("success_url", &success_url)
            .append_pair("cancel_url", &cancel_url);

        CheckoutSession {
            client_secret: fake_client_secret(),
            checkout_url: url.to_string(),
            demo: self.demo_mode,
            state: PaymentState::Pending,
        }
    }
}

/// Generate a fake client secret shaped like a real processor's.
fn fake_client_secret() -> String {
    let mut rng = rand::rng();
    let intent = Alphanumeric.sample_string(&mut rng, 16);
    let nonce = Alphanumeric.sample_string(&mut rng, 24);
    format!("pi_{intent}_secret_{nonce}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn bridge(demo: bool) -> PaymentBridge {
        PaymentBridge::new(
            "https://pay.voltlane.dev/checkout",
            "https://voltlane.dev/",
            demo,
        )
        .unwrap()
    }

    fn request() -> CheckoutRequest {
        CheckoutRequest {
            amount: Decimal::new(9640, 2), // 96.40
            currency: "usd".to_string(),
            customer_email: Email::parse("shopper@example.com").unwrap(),
            customer_name: "Pat Shopper".to_string(),
        }
    }

    #[test]
    fn test_client_secret_shape() {
        let secret = fake_client_secret();
        let mut parts = secret.split("_secret_");
        let prefix = parts.next().unwrap();
        let nonce = parts.next().unwrap();

        assert!(prefix.starts_with("pi_"));
        assert_eq!(prefix.len(), 3 + 16);
        assert_eq!(nonce.len(), 24);
        assert_ne!(secret, fake_client_secret());
    }

    #[test]
    fn test_session_url_carries_payment_parameters() {
        let session = bridge(false).create_session(&request());
        let url = Url::parse(&session.checkout_url).unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert!(pairs.contains(&("amount".to_string(), "96.40".to_string())));
        assert!(pairs.contains(&("currency".to_string(), "usd".to_string())));
        assert!(pairs.contains(&(
            "customer_email".to_string(),
            "shopper@example.com".to_string()
        )));
        assert!(pairs.contains(&("customer_name".to_string(), "Pat Shopper".to_string())));
        assert!(pairs.iter().any(|(k, v)| k == "success_url"
            && v == "https://voltlane.dev/checkout/success"));
        assert!(pairs.iter().any(|(k, v)| k == "cancel_url"
            && v == "https://voltlane.dev/checkout/cancel"));
        assert!(!session.demo);
    }

    #[test]
    fn test_demo_mode_flags_success_redirect() {
        let session = bridge(true).create_session(&request());
        let url = Url::parse(&session.checkout_url).unwrap();
        let success_url = url
            .query_pairs()
            .find(|(k, _)| k == "success_url")
            .map(|(_, v)| v.into_owned())
            .unwrap();

        assert!(session.demo);
        assert!(success_url.ends_with("/checkout/success?demo=true"));
    }

    #[test]
    fn test_state_contract() {
        assert!(PaymentState::Pending.can_transition_to(PaymentState::Succeeded));
        assert!(PaymentState::Pending.can_transition_to(PaymentState::Failed));
        assert!(!PaymentState::Succeeded.can_transition_to(PaymentState::Pending));
        assert!(!PaymentState::Failed.can_transition_to(PaymentState::Succeeded));
    }

    #[test]
    fn test_transition_enforced_on_session() {
        let mut session = bridge(true).create_session(&request());
        session.transition(PaymentState::Succeeded).unwrap();

        let err = session.transition(PaymentState::Failed).unwrap_err();
        assert!(matches!(err, PaymentError::IllegalTransition { .. }));
    }

    #[test]
    fn test_invalid_checkout_url_rejected() {
        let result = PaymentBridge::new("not a url", "https://voltlane.dev", true);
        assert!(matches!(result, Err(PaymentError::InvalidCheckoutUrl(_))));
    }
}
