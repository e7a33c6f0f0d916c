//! Identity registry for RELIEF.
//!
//! Each beneficiary mints one or more identity records committing to
//! off-chain content. Admins drive the verification lifecycle
//! (`pending → active → revoked`); owners control metadata and disclosure.
//! Records are permanently non-transferable.

pub mod error;
pub mod record;
pub mod registry;

pub use error::IdentityError;
pub use record::{IdentityDetails, IdentityRecord};
pub use registry::IdentityRegistry;
