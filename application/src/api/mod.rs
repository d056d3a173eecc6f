//! GraphQL API definitions.

mod mutation;
pub mod partner;
mod query;

use juniper::EmptySubscription;

use crate::{define_error, Context};

pub use self::{mutation::Mutation, partner::Partner, query::Query};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

define_error! {
    enum PartnerError {
        #[code = "PARTNER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Partner` with the provided ID does not exist"]
        NotExists,

        #[code = "PARTNER_TYPE_NOT_EXISTS"]
        #[status = BAD_REQUEST]
        #[message = "`PartnerType` with the provided ID does not exist"]
        TypeNotExists,
    }
}
