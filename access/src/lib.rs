//! Access control for the RELIEF ledger.
//!
//! One owner (transferable), an admin set, and a single designated
//! distributor. Every privileged operation in the other crates delegates its
//! authorization decision to [`AccessRegistry::require`], which checks a
//! [`Capability`] instead of scattering ad hoc equality tests.

pub mod error;
pub mod registry;
pub mod role;

pub use error::AccessError;
pub use registry::AccessRegistry;
pub use role::{Capability, Role};
