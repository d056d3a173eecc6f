//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{query, Query as _};

use crate::{api, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns all the `Partner`s in the order they were created, along with
    /// their ordered products and discounted totals.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "partners",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn partners(ctx: &Context) -> Result<Vec<api::Partner>, Error> {
        ctx.service()
            .execute(query::partners::Overview)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|list| list.into_iter().map(Into::into).collect())
    }

    /// Returns all the `PartnerType`s ordered by name.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "partnerTypes",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn partner_types(
        ctx: &Context,
    ) -> Result<Vec<api::partner::PartnerType>, Error> {
        ctx.service()
            .execute(query::partner_types::All::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|list| list.into_iter().map(Into::into).collect())
    }

    /// Returns the edit form of the `Partner` with the specified ID, prefilled
    /// with its current values.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PARTNER_NOT_EXISTS` - the `Partner` with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "partnerForm",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn partner_form(
        id: api::partner::Id,
        ctx: &Context,
    ) -> Result<api::partner::Form, Error> {
        ctx.service()
            .execute(query::partner::Form {
                partner_id: id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| api::PartnerError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }
}
