//! Execute handlers for the CL8Y optimistic outbox.
//!
//! This module contains all execute message handlers, organized by category:
//! - `claim` - Claim and Challenge, plus the record-authenticity helpers
//! - `verify` - ValidateSnapshot (optimistic path) and ResolveDisputedClaim
//! - `withdraw` - stake payouts and shutdown escape hatches
//! - `relay` - SendMessage and its delivery reply

mod claim;
mod relay;
mod verify;
mod withdraw;

pub use claim::*;
pub use relay::*;
pub use verify::*;
pub use withdraw::*;
