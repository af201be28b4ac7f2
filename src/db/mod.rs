mod loan;
mod user;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

pub use loan::{Loan, LoanStore};
pub use user::{Role, User, UserStore};

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open or create a database at the given path.
    /// Use ":memory:" for an in-memory database.
    pub async fn open(path: &str) -> Result<Self, sqlx::Error> {
        let url = if path == ":memory:" {
            "sqlite::memory:".to_string()
        } else {
            format!("sqlite:{}?mode=rwc", path)
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Get the current schema version.
    async fn get_version(&self) -> Result<i32, sqlx::Error> {
        let result: Option<(i32,)> = sqlx::query_as("SELECT version FROM schema_version LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;
        Ok(result.map(|r| r.0).unwrap_or(0))
    }

    /// Set the schema version within a transaction.
    async fn set_version(
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        version: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM schema_version")
            .execute(&mut **tx)
            .await?;
        sqlx::query("INSERT INTO schema_version (version) VALUES (?)")
            .bind(version)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Run database migrations.
    async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::query("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL)")
            .execute(&self.pool)
            .await?;

        let version = self.get_version().await?;

        if version < 1 {
            self.migrate_v1().await?;
        }

        Ok(())
    }

    /// Execute a list of queries in a transaction, then set the version.
    async fn run_migration(
        &self,
        version: i32,
        queries: &[&'static str],
    ) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        for query in queries {
            sqlx::query(*query).execute(&mut *tx).await?;
        }
        Self::set_version(&mut tx, version).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn migrate_v1(&self) -> Result<(), sqlx::Error> {
        self.run_migration(
            1,
            &[
                // Users table. Email matching is exact and case-sensitive,
                // so no COLLATE NOCASE here.
                "CREATE TABLE users (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    email TEXT UNIQUE NOT NULL,
                    name TEXT,
                    role TEXT NOT NULL DEFAULT 'borrower',
                    created_at TEXT NOT NULL DEFAULT (datetime('now'))
                )",
                "CREATE INDEX idx_users_email ON users(email)",
                // Loans table. The uuid column is the public object
                // identifier exposed in /loans/{id}.
                "CREATE TABLE loans (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    uuid TEXT UNIQUE NOT NULL,
                    email TEXT NOT NULL,
                    amount REAL NOT NULL,
                    purpose TEXT,
                    status TEXT NOT NULL DEFAULT 'pending',
                    created_at TEXT NOT NULL DEFAULT (datetime('now'))
                )",
                "CREATE INDEX idx_loans_uuid ON loans(uuid)",
                "CREATE INDEX idx_loans_email ON loans(email)",
            ],
        )
        .await
    }

    /// Get the user store.
    pub fn users(&self) -> UserStore {
        UserStore::new(self.pool.clone())
    }

    /// Get the loan store.
    pub fn loans(&self) -> LoanStore {
        LoanStore::new(self.pool.clone())
    }

    /// Get the underlying connection pool (for tests that need raw SQL access).
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get_user() {
        let db = Database::open(":memory:").await.unwrap();

        let id = db
            .users()
            .create("alice@example.com", Some("Alice"), Role::Lender)
            .await
            .unwrap();

        let user = db
            .users()
            .get_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.name.as_deref(), Some("Alice"));
        assert_eq!(user.role, Role::Lender);
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_sensitive() {
        let db = Database::open(":memory:").await.unwrap();

        db.users()
            .create("alice@example.com", None, Role::Borrower)
            .await
            .unwrap();

        let user = db.users().get_by_email("Alice@example.com").await.unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_fails() {
        let db = Database::open(":memory:").await.unwrap();

        db.users()
            .create("alice@example.com", None, Role::Borrower)
            .await
            .unwrap();
        let result = db
            .users()
            .create("alice@example.com", None, Role::Admin)
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_email_exists() {
        let db = Database::open(":memory:").await.unwrap();

        assert!(!db.users().email_exists("alice@example.com").await.unwrap());

        db.users()
            .create("alice@example.com", None, Role::Borrower)
            .await
            .unwrap();
        assert!(db.users().email_exists("alice@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_users() {
        let db = Database::open(":memory:").await.unwrap();

        db.users()
            .create("alice@example.com", None, Role::Borrower)
            .await
            .unwrap();
        db.users()
            .create("bob@example.com", None, Role::Lender)
            .await
            .unwrap();

        let users = db.users().list().await.unwrap();
        assert_eq!(users.len(), 2);
    }

    #[tokio::test]
    async fn test_create_and_get_loan() {
        let db = Database::open(":memory:").await.unwrap();

        let uuid = uuid::Uuid::new_v4().to_string();
        db.loans()
            .create(&uuid, "alice@example.com", 2500.0, Some("car repair"))
            .await
            .unwrap();

        let loan = db.loans().get_by_uuid(&uuid).await.unwrap().unwrap();
        assert_eq!(loan.uuid, uuid);
        assert_eq!(loan.email, "alice@example.com");
        assert_eq!(loan.amount, 2500.0);
        assert_eq!(loan.purpose.as_deref(), Some("car repair"));
        assert_eq!(loan.status, "pending");
    }

    #[tokio::test]
    async fn test_get_absent_loan() {
        let db = Database::open(":memory:").await.unwrap();

        let uuid = uuid::Uuid::new_v4().to_string();
        let loan = db.loans().get_by_uuid(&uuid).await.unwrap();
        assert!(loan.is_none());
    }

    #[tokio::test]
    async fn test_list_loans() {
        let db = Database::open(":memory:").await.unwrap();

        let uuid1 = uuid::Uuid::new_v4().to_string();
        let uuid2 = uuid::Uuid::new_v4().to_string();
        db.loans()
            .create(&uuid1, "alice@example.com", 100.0, None)
            .await
            .unwrap();
        db.loans()
            .create(&uuid2, "bob@example.com", 200.0, None)
            .await
            .unwrap();

        let loans = db.loans().list().await.unwrap();
        assert_eq!(loans.len(), 2);
    }
}
