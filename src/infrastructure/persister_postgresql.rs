use log::info;
use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{ContactError, ContactMessage, ContactMessagePersister, ContactResult, StdResult};

/// A persister that stores contact messages in a PostgreSQL database.
pub struct PostgresSqlPersister {
    pool: PgPool,
}

impl PostgresSqlPersister {
    /// Creates a new `PostgresSqlPersister` instance.
    pub async fn try_new(connection_string: &str) -> StdResult<Self> {
        Ok(Self {
            pool: PgPoolOptions::new()
                .max_connections(1)
                .connect(connection_string)
                .await?,
        })
    }
}

#[async_trait::async_trait]
impl ContactMessagePersister for PostgresSqlPersister {
    async fn persist(&self, message: &ContactMessage) -> ContactResult<i64> {
        let row: (i64,) = sqlx::query_as(
            r#"
INSERT INTO contact_messages (name, email, message)
VALUES ($1, $2, $3)
RETURNING id;
            "#,
        )
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ContactError::Storage(e.to_string()))?;
        info!("Inserted contact message #{} from {}", row.0, message.email);

        Ok(row.0)
    }
}
