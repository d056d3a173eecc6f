//! GraphQL [`Mutation`]s definitions.

use itertools::Itertools as _;
use juniper::graphql_object;
use service::{command, Command as _};

use crate::{api, AsError, Context, Error};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Saves the submitted `PartnerInput`.
    ///
    /// Creates a new `Partner` if no `id` is provided, or updates the
    /// `Partner` with the specified `id` otherwise.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PARTNER_FORM` - the first invalid field of the form, named
    ///                            in the `field` extension;
    /// - `PARTNER_CONSTRAINTS_VIOLATED` - some values are too long to be
    ///                                    stored;
    /// - `PARTNER_NOT_EXISTS` - the `Partner` with the specified `id` does
    ///                          not exist;
    /// - `PARTNER_TYPE_NOT_EXISTS` - the selected `PartnerType` does not
    ///                               exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "savePartner",
            id = ?id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn save_partner(
        id: Option<api::partner::Id>,
        input: api::partner::Input,
        ctx: &Context,
    ) -> Result<api::partner::Id, Error> {
        ctx.service()
            .execute(command::SavePartner {
                partner_id: id.map(Into::into),
                form: input.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|p| p.id.into())
    }
}

impl AsError for command::save_partner::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use command::save_partner::ExecutionError as E;

        match self {
            E::Db(e) => e.try_as_error(),
            E::Invalid(e) => Some(Error::invalid_input(
                "INVALID_PARTNER_FORM",
                e.field(),
                e,
            )),
            E::Violations(e) => Some(Error::invalid_input(
                "PARTNER_CONSTRAINTS_VIOLATED",
                e.as_slice().iter().map(|v| v.field).join(","),
                e,
            )),
            E::PartnerNotExists(_) => {
                Some(api::PartnerError::NotExists.into())
            }
            E::TypeNotExists(_) => {
                Some(api::PartnerError::TypeNotExists.into())
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use service::{
        command::save_partner::ExecutionError,
        domain::partner::{self, form::ValidationError},
    };

    use crate::AsError as _;

    #[test]
    fn reports_invalid_field() {
        let err =
            ExecutionError::Invalid(ValidationError::InvalidInn).as_error();

        assert_eq!(err.code, "INVALID_PARTNER_FORM");
        assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
        assert_eq!(err.field.as_deref(), Some("inn"));
        assert_eq!(err.message, "INN must contain 10 or 12 digits");
    }

    #[test]
    fn reports_missing_partner() {
        let err =
            ExecutionError::PartnerNotExists(partner::Id::new()).as_error();

        assert_eq!(err.code, "PARTNER_NOT_EXISTS");
        assert_eq!(err.status_code, http::StatusCode::NOT_FOUND);
        assert_eq!(err.field, None);
    }
}
