//! [`Tx`] client definitions.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard};
use tokio_postgres::{types::ToSql, Row};
use tracerr::Traced;

use crate::infra::database::{
    self,
    postgres::{connection, Connection},
};

use super::NonTx;

/// Transactional Postgres database client.
///
/// The transaction is started on the first statement, on a dedicated
/// [`connection::NonTx`], so concurrent [`Tx`] clients never share one.
/// Dropping the last clone of a [`Tx`] without [`Tx::commit()`] rolls the
/// transaction back.
#[derive(Clone, Debug)]
pub struct Tx {
    /// [`NonTx`] client to borrow the dedicated [`Connection`] from.
    non_tx: NonTx,

    /// Lazily started [`connection::Tx`].
    tx: Arc<RwLock<Option<connection::Tx>>>,
}

impl Tx {
    /// Creates a new [`Tx`] client on top of the provided [`NonTx`] client.
    ///
    /// No [`Connection`] is borrowed until the first statement.
    #[must_use]
    pub fn begin(client: &NonTx) -> Self {
        Self {
            non_tx: client.clone(),
            tx: Arc::default(),
        }
    }

    /// Returns the started [`connection::Tx`], starting it if necessary.
    async fn connection(
        &self,
    ) -> Result<RwLockReadGuard<'_, connection::Tx>, Traced<database::Error>> {
        let guard = self.tx.read().await;
        let guard = if guard.is_some() {
            guard
        } else {
            drop(guard);

            let mut tx = self.tx.write().await;
            if tx.is_none() {
                let conn =
                    self.non_tx.connection().await.map_err(tracerr::wrap!())?;
                *tx = Some(
                    connection::Tx::from_non_tx(conn)
                        .await
                        .map_err(tracerr::wrap!())?,
                );
                tracing::debug!("Postgres transaction started");
            }
            tx.downgrade()
        };

        Ok(RwLockReadGuard::map(guard, |tx| {
            tx.as_ref()
                .expect("transaction cannot be taken while guard is alive")
        }))
    }

    /// Commits this [`Tx`] client.
    ///
    /// Does nothing if no statement has been executed yet.
    ///
    /// # Errors
    ///
    /// If failed to commit transaction of this [`Tx`] client.
    pub async fn commit(&self) -> Result<(), Traced<database::Error>> {
        let Some(tx) = self.tx.write().await.take() else {
            return Ok(());
        };
        tx.commit().await.map_err(tracerr::wrap!())?;
        tracing::debug!("Postgres transaction committed");
        Ok(())
    }
}

impl Connection for Tx {
    async fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<Row>, Traced<database::Error>> {
        self.connection()
            .await
            .map_err(tracerr::wrap!())?
            .query(sql, params)
            .await
            .map_err(tracerr::wrap!())
    }

    async fn query_opt(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Option<Row>, Traced<database::Error>> {
        self.connection()
            .await
            .map_err(tracerr::wrap!())?
            .query_opt(sql, params)
            .await
            .map_err(tracerr::wrap!())
    }

    async fn exec(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<u64, Traced<database::Error>> {
        self.connection()
            .await
            .map_err(tracerr::wrap!())?
            .exec(sql, params)
            .await
            .map_err(tracerr::wrap!())
    }
}
