//! Promo Code Policy
//!
//! Pure eligibility and discount rules. No storage access; usage is
//! recorded by the settlement coordinator after payment confirms.

pub mod policy;

pub use policy::{PromoApproval, PromoRejection, evaluate};
