//! [`Command`] for saving a [`Partner`] from its edit [`Form`].

use common::operations::{
    By, Commit, Insert, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        director,
        partner::{
            self,
            form::{ValidationError, Violations},
            kind, name, Form,
        },
        Director, Partner, PartnerName, PartnerType,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for saving a [`Partner`] from its edit [`Form`].
///
/// Creates a new [`Partner`] if no [`partner::Id`] is provided, or updates
/// the existing one otherwise.
#[derive(Clone, Debug)]
pub struct SavePartner {
    /// ID of the [`Partner`] being edited, if any.
    pub partner_id: Option<partner::Id>,

    /// Submitted [`Form`].
    pub form: Form,
}

impl<Db> Command<SavePartner> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<PartnerType>, kind::Id>>,
            Ok = Option<PartnerType>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Partner, partner::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Partner>, partner::Id>>,
            Ok = Option<Partner>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Director>, director::Id>>,
            Ok = Option<Director>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<PartnerName>, name::Id>>,
            Ok = Option<PartnerName>,
            Err = Traced<database::Error>,
        > + Database<Insert<Director>, Ok = (), Err = Traced<database::Error>>
        + Database<Update<Director>, Ok = (), Err = Traced<database::Error>>
        + Database<Insert<PartnerName>, Ok = (), Err = Traced<database::Error>>
        + Database<Update<PartnerName>, Ok = (), Err = Traced<database::Error>>
        + Database<Insert<Partner>, Ok = (), Err = Traced<database::Error>>
        + Database<Update<Partner>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Partner;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SavePartner) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SavePartner { partner_id, form } = cmd;

        let draft = form
            .validate()
            .map_err(E::Invalid)
            .map_err(tracerr::wrap!())?;
        draft
            .check_constraints()
            .map_err(E::Violations)
            .map_err(tracerr::wrap!())?;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Select(By::<Option<PartnerType>, _>::new(draft.type_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::TypeNotExists(draft.type_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        // IDs of the already stored rows, if any.
        let (id, director_id, name_id) = if let Some(id) = partner_id {
            // Avoid concurrent edits of the same `Partner`.
            tx.execute(Lock(By::new(id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;

            let existing = tx
                .execute(Select(By::<Option<Partner>, _>::new(id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::PartnerNotExists(id))
                .map_err(tracerr::wrap!())?;
            let director = tx
                .execute(Select(By::<Option<Director>, _>::new(
                    existing.director_id,
                )))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            let name = tx
                .execute(Select(By::<Option<PartnerName>, _>::new(
                    existing.name_id,
                )))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            (id, director.map(|d| d.id), name.map(|n| n.id))
        } else {
            (partner::Id::new(), None, None)
        };

        let director = Director {
            id: director_id.unwrap_or_else(director::Id::new),
            family_name: draft.director_family_name,
            name: draft.director_name,
            patronymic: draft.director_patronymic,
        };
        if director_id.is_some() {
            tx.execute(Update(director.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
        } else {
            tx.execute(Insert(director.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
        }

        let name = PartnerName {
            id: name_id.unwrap_or_else(name::Id::new),
            name: draft.name,
        };
        if name_id.is_some() {
            tx.execute(Update(name.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
        } else {
            tx.execute(Insert(name.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
        }

        let partner = Partner {
            id,
            name_id: name.id,
            type_id: draft.type_id,
            director_id: director.id,
            address: draft.address,
            phone: draft.phone,
            email: draft.email,
            inn: draft.inn,
            rate: draft.rate,
        };
        if partner_id.is_some() {
            tx.execute(Update(partner.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
        } else {
            tx.execute(Insert(partner.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
        }

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tracing::debug!(
            partner.id = %partner.id,
            created = partner_id.is_none(),
            "`Partner` saved",
        );

        Ok(partner)
    }
}

/// Error of [`SavePartner`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Submitted [`Form`] is invalid.
    #[display("{_0}")]
    Invalid(ValidationError),

    /// Validated [`Form`] violates storage constraints.
    #[display("{_0}")]
    Violations(Violations),

    /// Edited [`Partner`] doesn't exist.
    #[display("`Partner(id: {_0})` does not exist")]
    #[from(ignore)]
    PartnerNotExists(#[error(not(source))] partner::Id),

    /// Selected [`PartnerType`] doesn't exist.
    #[display("`PartnerType(id: {_0})` does not exist")]
    #[from(ignore)]
    TypeNotExists(#[error(not(source))] kind::Id),
}
