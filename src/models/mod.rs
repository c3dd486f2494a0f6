//! Data models for cached dashboard records.
//!
//! Two record kinds flow through the dashboard:
//!
//! - `Beneficiary`: a person the call center serves
//! - `FollowUp`: a logged follow-up call for a beneficiary
//!
//! Both are lossless: fields the models don't name are kept in a
//! flattened map, so records round-trip through the persisted snapshot
//! exactly as the backend delivered them.

pub mod beneficiary;
pub mod followup;

pub use self::beneficiary::Beneficiary;
pub use self::followup::FollowUp;
