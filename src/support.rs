//! Supporting utilities used by models.
//!
//! These modules are public because they're useful to callers composing
//! their own sizing problems, but their APIs are not stable.

pub mod atmosphere;
pub mod catalogue;
pub mod constraint;
pub mod scenario;
pub mod units;
pub mod variables;
