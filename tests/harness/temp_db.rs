use std::path::{Path, PathBuf};
use std::sync::Arc;

use diesel::prelude::*;
use noteorder::adapter::outbound::sqlite::{create_pool, run_migrations, DbPool, SqliteOrderLedger};
use tempfile::TempDir;

/// Temporary file-backed SQLite ledger for integration tests.
///
/// The database file lives in its own temp directory, removed on drop.
pub struct TempDb {
    pool: DbPool,
    path: PathBuf,
    _dir: TempDir,
}

impl TempDb {
    pub fn create() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("ledger.db");

        let pool = create_pool(&path.display().to_string()).expect("create sqlite pool");
        run_migrations(&pool).expect("run migrations");

        // WAL mode improves concurrent writer behavior in tests.
        {
            let mut conn = pool.get().expect("get sqlite connection");
            diesel::sql_query("PRAGMA journal_mode=WAL")
                .execute(&mut conn)
                .expect("enable WAL mode");
        }

        Self {
            pool,
            path,
            _dir: dir,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ledger(&self) -> Arc<SqliteOrderLedger> {
        Arc::new(SqliteOrderLedger::new(self.pool.clone()))
    }
}
