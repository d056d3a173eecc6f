//! [`Command`] definition.

pub mod save_partner;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::save_partner::SavePartner;
