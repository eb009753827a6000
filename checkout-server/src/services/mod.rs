//! External Services
//!
//! Hosted payment sessions and outbound notifications.

pub mod email;
pub mod payment;

pub use email::{LogNotifier, NotificationSender};
pub use payment::{CheckoutSession, HttpPaymentProvider, PaymentSessionProvider};
