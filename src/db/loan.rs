use sqlx::sqlite::SqlitePool;

#[derive(Clone)]
pub struct LoanStore {
    pool: SqlitePool,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Loan {
    /// Public object identifier (UUIDv4), used in /loans/{id}.
    pub uuid: String,
    /// Email of the requesting borrower.
    pub email: String,
    pub amount: f64,
    pub purpose: Option<String>,
    pub status: String,
    pub created_at: String,
}

#[derive(sqlx::FromRow)]
struct LoanRow {
    uuid: String,
    email: String,
    amount: f64,
    purpose: Option<String>,
    status: String,
    created_at: String,
}

impl From<LoanRow> for Loan {
    fn from(row: LoanRow) -> Self {
        Self {
            uuid: row.uuid,
            email: row.email,
            amount: row.amount,
            purpose: row.purpose,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

impl LoanStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new loan with status 'pending'. Returns the row ID.
    pub async fn create(
        &self,
        uuid: &str,
        email: &str,
        amount: f64,
        purpose: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO loans (uuid, email, amount, purpose) VALUES (?, ?, ?, ?)")
            .bind(uuid)
            .bind(email)
            .bind(amount)
            .bind(purpose)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Get a loan by its public identifier.
    pub async fn get_by_uuid(&self, uuid: &str) -> Result<Option<Loan>, sqlx::Error> {
        let row: Option<LoanRow> = sqlx::query_as(
            "SELECT uuid, email, amount, purpose, status, created_at FROM loans WHERE uuid = ?",
        )
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Loan::from))
    }

    /// List all loans.
    pub async fn list(&self) -> Result<Vec<Loan>, sqlx::Error> {
        let rows: Vec<LoanRow> = sqlx::query_as(
            "SELECT uuid, email, amount, purpose, status, created_at FROM loans ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Loan::from).collect())
    }
}
