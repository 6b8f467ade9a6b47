use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use rocket::Request;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite, SqliteConnection, Transaction};
use tracing::{error, info, instrument};

use crate::error::AppError;

/// Shared handle to the relational store. Cheap to clone.
#[derive(Clone, Debug)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    /// Opens a pool against `database_url`. Foreign keys are declared in the
    /// schema but not enforced, so dangling references are accepted.
    #[instrument]
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        info!("Connecting to SQLite database");
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    #[instrument(skip(self))]
    pub async fn migrate(&self) -> Result<(), AppError> {
        info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Migrations completed successfully");
        Ok(())
    }

    pub async fn begin(&self) -> Result<UnitOfWork, AppError> {
        let tx = self.pool.begin().await?;
        Ok(UnitOfWork { tx })
    }
}

/// One request's transaction. Dropping it without `commit` rolls back and
/// returns the connection to the pool.
pub struct UnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

impl UnitOfWork {
    pub async fn commit(self) -> Result<(), AppError> {
        self.tx.commit().await?;
        Ok(())
    }

    /// Explicit rollback. Handlers rely on drop instead; this surfaces the
    /// rollback's own error to callers that need it.
    pub async fn rollback(self) -> Result<(), AppError> {
        self.tx.rollback().await?;
        Ok(())
    }
}

impl Deref for UnitOfWork {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.tx
    }
}

impl DerefMut for UnitOfWork {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.tx
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for UnitOfWork {
    type Error = AppError;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let storage = match request.rocket().state::<Storage>() {
            Some(storage) => storage,
            _ => {
                error!("Storage not found in managed state");
                return Outcome::Error((
                    Status::InternalServerError,
                    AppError::Internal("Storage not configured".to_string()),
                ));
            }
        };

        match storage.begin().await {
            Ok(uow) => Outcome::Success(uow),
            Err(err) => {
                err.log_and_record("Acquiring unit of work");
                Outcome::Error((err.status_code(), err))
            }
        }
    }
}
