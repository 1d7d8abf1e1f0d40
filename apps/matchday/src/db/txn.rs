use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseTransaction, TransactionTrait};

use super::txn_policy;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Boxed future returned by closures handed to [`with_txn`].
pub type TxnFuture<'c, R> = Pin<Box<dyn Future<Output = Result<R, AppError>> + Send + 'c>>;

/// Execute a function within a database transaction.
///
/// Begins a transaction, runs the closure, applies the process txn policy on
/// `Ok` and rolls back on `Err`.
pub async fn with_txn<R, F>(state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> TxnFuture<'c, R>,
{
    let txn = state.db.begin().await?;
    let out = f(&txn).await;

    match out {
        Ok(val) => match txn_policy::current() {
            txn_policy::TxnPolicy::CommitOnOk => {
                txn.commit().await?;
                Ok(val)
            }
            txn_policy::TxnPolicy::RollbackOnOk => {
                txn.rollback().await?;
                Ok(val)
            }
        },
        Err(err) => {
            // Best-effort rollback; preserve original error
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}
