//! [`Partner`]-related definitions.

use common::Money;
use derive_more::{Display, From, Into};
use juniper::{
    graphql_object, GraphQLInputObject, GraphQLObject, GraphQLScalar,
};
use service::{domain, read::partner::display};
use uuid::Uuid;

use crate::{api, Context};

/// A partner along with its ordered products.
#[derive(Clone, Debug, From, Into)]
pub struct Partner(display::Display);

/// A partner along with its ordered products.
#[graphql_object(context = Context)]
impl Partner {
    /// Unique identifier of this `Partner`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Partner.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.partner_id.into()
    }

    /// Name of this `Partner`'s type.
    pub fn kind(&self) -> &str {
        &self.0.kind
    }

    /// Name of this `Partner`.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Given name of this `Partner`'s director.
    pub fn director(&self) -> &str {
        &self.0.director
    }

    /// Legal address of this `Partner`.
    pub fn address(&self) -> String {
        self.0.address.to_string()
    }

    /// Phone of this `Partner`.
    pub fn phone(&self) -> String {
        self.0.phone.to_string()
    }

    /// Rate of this `Partner`.
    pub fn rate(&self) -> i32 {
        self.0.rate.into()
    }

    /// Discounted cost of all the products ordered by this `Partner`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Partner.totalCost",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn total_cost(&self) -> Money {
        self.0.total_cost
    }

    /// Products ordered by this `Partner`.
    pub fn products(&self) -> Vec<ProductLine> {
        self.0.products.iter().cloned().map(Into::into).collect()
    }
}

/// Product ordered by a [`Partner`].
#[derive(Clone, Debug, From, Into)]
pub struct ProductLine(display::ProductLine);

/// Product ordered by a `Partner`.
#[graphql_object(name = "PartnerProductLine", context = Context)]
impl ProductLine {
    /// Name of the ordered product.
    pub fn name(&self) -> String {
        self.0.name.to_string()
    }

    /// Ordered amount of the product.
    pub fn amount(&self) -> i32 {
        self.0.amount.into()
    }

    /// Discounted cost of the ordered amount.
    pub fn cost(&self) -> Money {
        self.0.cost
    }
}

/// Type of a partner organization.
#[derive(Clone, Debug, From, Into)]
pub struct PartnerType(domain::PartnerType);

/// Type of a partner organization.
#[graphql_object(context = Context)]
impl PartnerType {
    /// Unique identifier of this `PartnerType`.
    pub fn id(&self) -> TypeId {
        self.0.id.into()
    }

    /// Name of this `PartnerType`.
    pub fn name(&self) -> String {
        self.0.name.to_string()
    }
}

/// Unique identifier of a `Partner`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::partner::Id)]
#[into(domain::partner::Id)]
#[graphql(name = "PartnerId", transparent)]
pub struct Id(Uuid);

/// Unique identifier of a `PartnerType`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::partner::kind::Id)]
#[into(domain::partner::kind::Id)]
#[graphql(name = "PartnerTypeId", transparent)]
pub struct TypeId(Uuid);

/// Values of a `Partner` edit form, as they were typed.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "PartnerForm")]
pub struct Form {
    /// Selected `PartnerType`, if any.
    pub type_id: Option<TypeId>,

    /// Name of the partner organization.
    pub name: String,

    /// Family name of the director.
    pub director_family_name: String,

    /// Given name of the director.
    pub director_name: String,

    /// Patronymic of the director.
    pub director_patronymic: String,

    /// Legal address.
    pub address: String,

    /// Rate.
    pub rate: String,

    /// Phone number.
    pub phone: String,

    /// Email address, empty if none.
    pub email: String,

    /// Tax identification number.
    pub inn: String,
}

impl From<domain::partner::Form> for Form {
    fn from(form: domain::partner::Form) -> Self {
        let domain::partner::Form {
            type_id,
            name,
            director_family_name,
            director_name,
            director_patronymic,
            address,
            rate,
            phone,
            email,
            inn,
        } = form;
        Self {
            type_id: type_id.map(Into::into),
            name,
            director_family_name,
            director_name,
            director_patronymic,
            address,
            rate,
            phone,
            email,
            inn,
        }
    }
}

/// Submitted values of a `Partner` edit form.
///
/// Values are validated on submission, so any text is accepted here.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "PartnerInput")]
pub struct Input {
    /// Selected `PartnerType`, if any.
    pub type_id: Option<TypeId>,

    /// Name of the partner organization.
    pub name: String,

    /// Family name of the director.
    pub director_family_name: String,

    /// Given name of the director.
    pub director_name: String,

    /// Patronymic of the director.
    pub director_patronymic: String,

    /// Legal address.
    pub address: String,

    /// Rate, a non-negative integer.
    pub rate: String,

    /// Phone number.
    pub phone: String,

    /// Email address, if any.
    pub email: Option<String>,

    /// Tax identification number of 10 or 12 digits.
    pub inn: String,
}

impl From<Input> for domain::partner::Form {
    fn from(input: Input) -> Self {
        let Input {
            type_id,
            name,
            director_family_name,
            director_name,
            director_patronymic,
            address,
            rate,
            phone,
            email,
            inn,
        } = input;
        Self {
            type_id: type_id.map(Into::into),
            name,
            director_family_name,
            director_name,
            director_patronymic,
            address,
            rate,
            phone,
            email: email.unwrap_or_default(),
            inn,
        }
    }
}

#[cfg(test)]
mod spec {
    use service::domain::partner::{self, kind};

    use super::{Form, Input};

    fn input() -> Input {
        Input {
            type_id: Some(kind::Id::new().into()),
            name: "Stroy LLC".into(),
            director_family_name: "Ivanov".into(),
            director_name: "Ivan".into(),
            director_patronymic: "Ivanovich".into(),
            address: "Moscow".into(),
            rate: "10".into(),
            phone: "+7 495 000 00 00".into(),
            email: None,
            inn: "1234567890".into(),
        }
    }

    #[test]
    fn missing_email_is_blank() {
        let form = partner::Form::from(input());

        assert_eq!(form.email, "");
        assert!(form.validate().unwrap().email.is_none());
    }

    #[test]
    fn keeps_form_values() {
        let input = input();
        let type_id = input.type_id.map(kind::Id::from);

        let form = Form::from(partner::Form::from(input));

        assert_eq!(form.type_id.map(kind::Id::from), type_id);
        assert_eq!(form.name, "Stroy LLC");
        assert_eq!(form.rate, "10");
        assert_eq!(form.inn, "1234567890");
    }
}
