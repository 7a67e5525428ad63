#[macro_use]
extern crate diesel;

use anyhow::Result as Fallible;
use cmw_core::{
    notify::{ChangeNotifier, ChangeSubscription, StoreEvent},
    repositories::Key,
    usecases as uc,
};
use diesel::{r2d2, sqlite::SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::{
    cell::{RefCell, RefMut},
    collections::HashMap,
    sync::Arc,
};

mod kv_store;
mod models;
mod schema;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

type Connection = SqliteConnection;

type ConnectionManager = r2d2::ConnectionManager<Connection>;
type ConnectionPool = r2d2::Pool<ConnectionManager>;
type PooledConnection = r2d2::PooledConnection<ConnectionManager>;

type SharedConnectionPool = Arc<RwLock<ConnectionPool>>;

/// Revision of each key that has been written at least once.
pub type Revisions = HashMap<Key, i64>;

pub struct DbReadOnly<'a> {
    _locked_pool: RwLockReadGuard<'a, ConnectionPool>,
    conn: RefCell<PooledConnection>,
}

impl<'a> DbReadOnly<'a> {
    fn try_new(pool: &'a SharedConnectionPool) -> Fallible<Self> {
        let locked_pool = pool.read();
        let conn = locked_pool.get().inspect_err(|err| {
            log::error!("Failed to obtain pooled database connection for read-only access: {err}");
        })?;
        Ok(Self {
            _locked_pool: locked_pool,
            conn: RefCell::new(conn),
        })
    }
}

pub struct DbReadWrite<'a> {
    _locked_pool: RwLockWriteGuard<'a, ConnectionPool>,
    conn: RefCell<PooledConnection>,
    notifier: &'a ChangeNotifier,
}

/// Connection within a transaction.
///
/// Records the keys that have been written until the
/// transaction is committed.
pub struct DbConnection<'a> {
    conn: RefCell<&'a mut SqliteConnection>,
    written_keys: RefCell<Vec<Key>>,
}

impl<'a> DbConnection<'a> {
    fn new(conn: &'a mut SqliteConnection) -> Self {
        Self {
            conn: RefCell::new(conn),
            written_keys: Default::default(),
        }
    }

    fn into_written_keys(self) -> Vec<Key> {
        self.written_keys.into_inner()
    }
}

impl<'a> DbReadWrite<'a> {
    fn try_new(pool: &'a SharedConnectionPool, notifier: &'a ChangeNotifier) -> Fallible<Self> {
        let locked_pool = pool.write();
        let conn = locked_pool.get().inspect_err(|err| {
            log::error!("Failed to obtain pooled database connection for read/write access: {err}");
        })?;
        Ok(Self {
            _locked_pool: locked_pool,
            conn: RefCell::new(conn),
            notifier,
        })
    }

    /// Run `f` within a single transaction.
    ///
    /// All writes are either committed together or not at all.
    /// Subscribers are notified about the written keys after
    /// the commit succeeded.
    pub fn transaction<T, F, E>(&mut self, f: F) -> Result<T, uc::Error>
    where
        F: FnOnce(&DbConnection) -> Result<T, E>,
        E: Into<uc::Error>,
    {
        let mut usecase_error = None;
        let mut written_keys = vec![];
        use diesel::Connection;
        let result = self
            .conn
            .borrow_mut()
            .transaction(|conn| {
                let db = DbConnection::new(conn);
                match f(&db) {
                    Ok(res) => {
                        written_keys = db.into_written_keys();
                        Ok(res)
                    }
                    Err(err) => {
                        usecase_error = Some(err.into());
                        Err(diesel::result::Error::RollbackTransaction)
                    }
                }
            })
            .map_err(|err| {
                if let Some(usecase_error) = usecase_error {
                    debug_assert!(matches!(err, diesel::result::Error::RollbackTransaction));
                    usecase_error
                } else {
                    uc::Error::Repo(kv_store::from_diesel_err(err))
                }
            })?;
        self.notifier.publish(StoreEvent::new(written_keys));
        Ok(result)
    }

    fn sqlite_conn(&self) -> RefMut<PooledConnection> {
        self.conn.borrow_mut()
    }
}

#[derive(Clone)]
pub struct Connections {
    // Only a single connection with write access will be
    // handed out at a time from the pool. Multiple read
    // connections can be accessed concurrently. This locking
    // pattern around the connection pool prevents SQLITE_LOCKED
    // ("database is locked") errors.
    pool: SharedConnectionPool,
    notifier: ChangeNotifier,
}

/// Configure the database engine
///
/// Some values like the text encoding can only be changed once after the
/// database has initially been created.
pub fn initialize_database(connection: &mut SqliteConnection) -> Fallible<()> {
    use diesel::connection::SimpleConnection as _;
    connection.batch_execute(
        r#"
PRAGMA journal_mode = WAL;        -- better write-concurrency
PRAGMA synchronous = NORMAL;      -- fsync only in critical moments, safe for journal_mode = WAL
PRAGMA wal_autocheckpoint = 1000; -- write WAL changes back every 1000 pages (default)
PRAGMA wal_checkpoint(TRUNCATE);  -- free some space by truncating possibly massive WAL files from the last run
PRAGMA secure_delete = 0;         -- avoid some disk I/O
PRAGMA encoding = 'UTF-8';
"#,
    )?;
    Ok(())
}

impl Connections {
    pub fn init(url: &str, pool_size: u32) -> Fallible<Self> {
        // Establish a test connection before creating the connection pool to fail early.
        // If the given file is inaccessible r2d2 seems to do multiple retries
        // and logs errors instead of simply failing and returning and error immediately.
        use diesel::Connection as _;
        let _ = diesel::SqliteConnection::establish(url)?;
        let manager = ConnectionManager::new(url);
        let pool = ConnectionPool::builder()
            .max_size(pool_size)
            .build(manager)?;
        initialize_database(&mut *pool.get()?)?;
        Ok(Self::new(pool))
    }

    fn new(pool: ConnectionPool) -> Self {
        Self {
            pool: Arc::new(RwLock::new(pool)),
            notifier: ChangeNotifier::default(),
        }
    }

    pub fn shared(&self) -> Fallible<DbReadOnly> {
        DbReadOnly::try_new(&self.pool)
    }

    pub fn exclusive(&self) -> Fallible<DbReadWrite> {
        DbReadWrite::try_new(&self.pool, &self.notifier)
    }

    /// Receive an event after each committed transaction.
    pub fn subscribe(&self) -> ChangeSubscription {
        self.notifier.subscribe()
    }

    pub fn load_revisions(&self) -> Fallible<Revisions> {
        let db = self.shared()?;
        let revisions = kv_store::load_revisions(&mut db.conn.borrow_mut())?;
        Ok(revisions.into_iter().collect())
    }

    /// Publish all keys with a revision that differs from `seen`
    /// and remember the current revisions.
    ///
    /// Detects commits of other processes that share the same
    /// database file. Keys written by this process have already
    /// been published after their commit and are published again.
    pub fn publish_external_changes(&self, seen: &mut Revisions) -> Fallible<Vec<Key>> {
        let current = self.load_revisions()?;
        let mut changed: Vec<_> = current
            .iter()
            .filter(|(key, revision)| seen.get(*key) != Some(*revision))
            .map(|(key, _)| *key)
            .collect();
        changed.sort_unstable();
        *seen = current;
        if !changed.is_empty() {
            log::debug!("Detected changes of {changed:?}");
            self.notifier.publish(StoreEvent::new(changed.clone()));
        }
        Ok(changed)
    }
}

pub fn run_embedded_database_migrations(conn: DbReadWrite<'_>) -> Fallible<()> {
    log::info!("Running embedded database migrations");
    let mut sqlite_conn = conn.sqlite_conn();
    let applied = sqlite_conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| anyhow::anyhow!("Failed to run database migrations: {err}"))?;
    log::debug!("Applied {} migration(s)", applied.len());
    Ok(())
}
