//! SQLite-backed document store.
//!
//! Layout: the store URL is a directory, each logical database is the file
//! `<url>/<database>.sqlite3`, and each collection is a table holding one
//! JSON document per row. Rows keep insertion order through `seq`.
//!
//! Every gateway call opens its own connection and drops it on return.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{params, params_from_iter, Connection, OptionalExtension, TransactionBehavior};
use serde_json::Value;

use super::gateway::{overlay, validate_name, Filter, Gateway};
use super::GatewayError;
use crate::models::Record;

/// File extension for logical database files.
pub const DATABASE_EXTENSION: &str = "sqlite3";

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Construction parameters for a gateway.
#[derive(Debug, Clone)]
pub struct GatewayParams {
    pub url: PathBuf,
    pub database: String,
    pub collection: String,
}

/// Path of the file backing `database` under the store directory `url`.
pub fn database_path(url: &Path, database: &str) -> PathBuf {
    url.join(format!("{database}.{DATABASE_EXTENSION}"))
}

pub struct SqliteGateway<T> {
    db_path: PathBuf,
    collection: String,
    _record: PhantomData<fn() -> T>,
}

impl<T> std::fmt::Debug for SqliteGateway<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteGateway")
            .field("db_path", &self.db_path)
            .field("collection", &self.collection)
            .finish()
    }
}

impl<T: Record> SqliteGateway<T> {
    pub fn new(params: GatewayParams) -> Result<Self, GatewayError> {
        validate_name("database", &params.database)?;
        validate_name("collection", &params.collection)?;
        Ok(Self {
            db_path: database_path(&params.url, &params.database),
            collection: params.collection,
            _record: PhantomData,
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open a fresh connection and make sure the collection table exists.
    fn connect(&self) -> Result<Connection, GatewayError> {
        let connect_err = |source| GatewayError::Connect {
            path: self.db_path.clone(),
            source,
        };
        let conn = Connection::open(&self.db_path).map_err(connect_err)?;
        conn.busy_timeout(BUSY_TIMEOUT).map_err(connect_err)?;
        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS \"{}\" (
                 seq INTEGER PRIMARY KEY AUTOINCREMENT,
                 body TEXT NOT NULL
             );",
            self.collection
        ))
        .map_err(connect_err)?;
        Ok(conn)
    }

    /// Compile `filter` into a WHERE clause and its bound values.
    fn where_clause(filter: &Filter) -> Result<(String, Vec<&str>), GatewayError> {
        if filter.is_empty() {
            return Ok((String::new(), Vec::new()));
        }
        let mut conditions = Vec::with_capacity(filter.clauses().len());
        let mut values = Vec::with_capacity(filter.clauses().len());
        for (i, (field, value)) in filter.clauses().iter().enumerate() {
            validate_name("field", field)?;
            conditions.push(format!("json_extract(body, '$.{field}') = ?{}", i + 1));
            values.push(value.as_str());
        }
        Ok((format!(" WHERE {}", conditions.join(" AND ")), values))
    }

    fn decode(&self, body: &str) -> Result<T, GatewayError> {
        serde_json::from_str(body).map_err(|source| GatewayError::Decode {
            collection: self.collection.clone(),
            source,
        })
    }
}

impl<T: Record> Gateway<T> for SqliteGateway<T> {
    fn find_one(&self, filter: &Filter) -> Result<T, GatewayError> {
        let (clause, values) = Self::where_clause(filter)?;
        let conn = self.connect()?;
        let body: Option<String> = conn
            .query_row(
                &format!(
                    "SELECT body FROM \"{}\"{clause} ORDER BY seq LIMIT 1",
                    self.collection
                ),
                params_from_iter(values),
                |row| row.get(0),
            )
            .optional()?;

        match body {
            Some(body) => self.decode(&body),
            None => Err(GatewayError::NotFound {
                collection: self.collection.clone(),
            }),
        }
    }

    fn find(&self, filter: &Filter) -> Result<Vec<T>, GatewayError> {
        let (clause, values) = Self::where_clause(filter)?;
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT body FROM \"{}\"{clause} ORDER BY seq",
            self.collection
        ))?;
        let rows = stmt.query_map(params_from_iter(values), |row| row.get::<_, String>(0))?;

        let mut records = Vec::new();
        for body in rows {
            records.push(self.decode(&body?)?);
        }
        Ok(records)
    }

    fn upsert(&self, filter: &Filter, value: &T) -> Result<(), GatewayError> {
        let (clause, values) = Self::where_clause(filter)?;
        let update = serde_json::to_value(value).map_err(|source| GatewayError::Encode {
            collection: self.collection.clone(),
            source,
        })?;

        let mut conn = self.connect()?;
        // Take the write lock up front so concurrent upserts wait on the
        // busy timeout instead of failing on lock upgrade.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let existing: Option<(i64, String)> = tx
            .query_row(
                &format!(
                    "SELECT seq, body FROM \"{}\"{clause} ORDER BY seq LIMIT 1",
                    self.collection
                ),
                params_from_iter(values),
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        match existing {
            Some((seq, body)) => {
                let mut document: Value =
                    serde_json::from_str(&body).map_err(|source| GatewayError::Decode {
                        collection: self.collection.clone(),
                        source,
                    })?;
                if !overlay(&mut document, update) {
                    return Err(GatewayError::NotADocument {
                        collection: self.collection.clone(),
                    });
                }
                tx.execute(
                    &format!("UPDATE \"{}\" SET body = ?1 WHERE seq = ?2", self.collection),
                    params![document.to_string(), seq],
                )?;
            }
            None => {
                let mut document = filter.to_document();
                if !overlay(&mut document, update) {
                    return Err(GatewayError::NotADocument {
                        collection: self.collection.clone(),
                    });
                }
                tx.execute(
                    &format!("INSERT INTO \"{}\" (body) VALUES (?1)", self.collection),
                    params![document.to_string()],
                )?;
                tracing::debug!(collection = %self.collection, "Document inserted");
            }
        }

        tx.commit()?;
        Ok(())
    }

    fn delete_one(&self, filter: &Filter) -> Result<(), GatewayError> {
        let (clause, values) = Self::where_clause(filter)?;
        let conn = self.connect()?;
        let removed = conn.execute(
            &format!(
                "DELETE FROM \"{0}\" WHERE seq = (SELECT seq FROM \"{0}\"{clause} ORDER BY seq LIMIT 1)",
                self.collection
            ),
            params_from_iter(values),
        )?;
        if removed == 0 {
            tracing::debug!(collection = %self.collection, "Delete matched no document");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Practice, Task};

    fn test_gateway<T: Record>(dir: &Path, collection: &str) -> SqliteGateway<T> {
        SqliteGateway::new(GatewayParams {
            url: dir.to_path_buf(),
            database: "ply".into(),
            collection: collection.into(),
        })
        .unwrap()
    }

    fn task(id: &str, practice_id: &str, message: &str) -> Task {
        Task {
            task_id: id.into(),
            practice_id: practice_id.into(),
            message: message.into(),
            status: "Pending".into(),
        }
    }

    #[test]
    fn upsert_inserts_then_find_one_returns_it() {
        let tmp = tempfile::tempdir().unwrap();
        let gateway = test_gateway::<Task>(tmp.path(), "tasks");

        let t = task("T1", "P1", "Call payer");
        gateway.upsert(&Filter::eq("taskId", "T1"), &t).unwrap();

        let found = gateway.find_one(&Filter::eq("taskId", "T1")).unwrap();
        assert_eq!(found, t);
        assert!(gateway.db_path().ends_with("ply.sqlite3"));
    }

    #[test]
    fn find_one_missing_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let gateway = test_gateway::<Task>(tmp.path(), "tasks");

        let err = gateway.find_one(&Filter::eq("taskId", "nope")).unwrap_err();
        assert!(err.is_not_found(), "expected NotFound, got {err}");
    }

    #[test]
    fn upsert_overlays_fields_and_preserves_absent_ones() {
        let tmp = tempfile::tempdir().unwrap();
        let gateway = test_gateway::<Task>(tmp.path(), "tasks");
        gateway
            .upsert(&Filter::eq("taskId", "T1"), &task("T1", "P1", "Call payer"))
            .unwrap();

        // Only id and status carried: message and practiceId must survive.
        let partial = Task {
            task_id: "T1".into(),
            status: "Done".into(),
            ..Default::default()
        };
        gateway.upsert(&Filter::eq("taskId", "T1"), &partial).unwrap();

        let stored = gateway.find_one(&Filter::eq("taskId", "T1")).unwrap();
        assert_eq!(stored.status, "Done");
        assert_eq!(stored.message, "Call payer");
        assert_eq!(stored.practice_id, "P1");
        assert_eq!(gateway.find(&Filter::all()).unwrap().len(), 1);
    }

    #[test]
    fn upsert_without_match_seeds_from_filter() {
        let tmp = tempfile::tempdir().unwrap();
        let gateway = test_gateway::<Task>(tmp.path(), "tasks");

        let no_id = Task {
            message: "Seeded".into(),
            ..Default::default()
        };
        gateway.upsert(&Filter::eq("taskId", "T9"), &no_id).unwrap();

        let stored = gateway.find_one(&Filter::eq("taskId", "T9")).unwrap();
        assert_eq!(stored.task_id, "T9");
        assert_eq!(stored.message, "Seeded");
    }

    #[test]
    fn find_filters_and_keeps_insertion_order() {
        let tmp = tempfile::tempdir().unwrap();
        let gateway = test_gateway::<Task>(tmp.path(), "tasks");
        for (id, practice) in [("T1", "P1"), ("T2", "P2"), ("T3", "P1")] {
            gateway
                .upsert(&Filter::eq("taskId", id), &task(id, practice, "m"))
                .unwrap();
        }

        let ids: Vec<String> = gateway
            .find(&Filter::eq("practiceId", "P1"))
            .unwrap()
            .into_iter()
            .map(|t| t.task_id)
            .collect();
        assert_eq!(ids, vec!["T1", "T3"]);

        assert!(gateway.find(&Filter::eq("practiceId", "P404")).unwrap().is_empty());
        assert_eq!(gateway.find(&Filter::all()).unwrap().len(), 3);
    }

    #[test]
    fn delete_one_removes_single_match_and_tolerates_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let gateway = test_gateway::<Task>(tmp.path(), "tasks");
        gateway
            .upsert(&Filter::eq("taskId", "T1"), &task("T1", "P1", "m"))
            .unwrap();
        gateway
            .upsert(&Filter::eq("taskId", "T2"), &task("T2", "P1", "m"))
            .unwrap();

        gateway.delete_one(&Filter::eq("practiceId", "P1")).unwrap();
        let left = gateway.find(&Filter::all()).unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].task_id, "T2");

        gateway.delete_one(&Filter::eq("taskId", "T1")).unwrap();
        gateway.delete_one(&Filter::eq("taskId", "T1")).unwrap();
    }

    #[test]
    fn concurrent_upserts_wait_for_the_lock() {
        let tmp = tempfile::tempdir().unwrap();
        let gateway = std::sync::Arc::new(test_gateway::<Task>(tmp.path(), "tasks"));
        // Create the table before the writers race.
        assert!(gateway.find(&Filter::all()).unwrap().is_empty());

        let workers: Vec<_> = (0..8)
            .map(|worker| {
                let gateway = gateway.clone();
                std::thread::spawn(move || {
                    for n in 0..50 {
                        let id = format!("T{worker}-{n}");
                        // Two writes per id: insert, then overlay.
                        gateway
                            .upsert(&Filter::eq("taskId", id.as_str()), &task(&id, "P1", "first"))
                            .unwrap();
                        gateway
                            .upsert(&Filter::eq("taskId", id.as_str()), &task(&id, "P1", "second"))
                            .unwrap();
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let stored = gateway.find(&Filter::all()).unwrap();
        assert_eq!(stored.len(), 400);
        assert!(stored.iter().all(|t| t.message == "second"));
    }

    #[test]
    fn collections_are_isolated() {
        let tmp = tempfile::tempdir().unwrap();
        let tasks = test_gateway::<Task>(tmp.path(), "tasks");
        let practices = test_gateway::<Practice>(tmp.path(), "practices");
        tasks
            .upsert(&Filter::eq("taskId", "T1"), &task("T1", "P1", "m"))
            .unwrap();

        assert!(practices.find(&Filter::all()).unwrap().is_empty());
    }

    #[test]
    fn mismatched_shape_is_decode_error() {
        let tmp = tempfile::tempdir().unwrap();
        let gateway = test_gateway::<Task>(tmp.path(), "tasks");
        // Create the table through the gateway, then plant a foreign shape.
        assert!(gateway.find(&Filter::all()).unwrap().is_empty());
        let conn = Connection::open(gateway.db_path()).unwrap();
        conn.execute(
            "INSERT INTO tasks (body) VALUES (?1)",
            params![r#"{"taskId":"T1","message":42}"#],
        )
        .unwrap();

        let err = gateway.find_one(&Filter::eq("taskId", "T1")).unwrap_err();
        assert!(matches!(err, GatewayError::Decode { .. }), "got {err}");
    }

    #[test]
    fn unreachable_store_is_recoverable_connect_error() {
        let tmp = tempfile::tempdir().unwrap();
        let not_a_dir = tmp.path().join("plain-file");
        std::fs::write(&not_a_dir, b"x").unwrap();
        let gateway = test_gateway::<Task>(&not_a_dir, "tasks");

        let err = gateway.find(&Filter::all()).unwrap_err();
        assert!(matches!(err, GatewayError::Connect { .. }), "got {err}");
    }

    #[test]
    fn invalid_names_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let err = SqliteGateway::<Task>::new(GatewayParams {
            url: tmp.path().to_path_buf(),
            database: "ply".into(),
            collection: "tasks\"; --".into(),
        })
        .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidName { kind: "collection", .. }));

        let gateway = test_gateway::<Task>(tmp.path(), "tasks");
        let err = gateway.find(&Filter::eq("bad field", "x")).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidName { kind: "field", .. }));
    }
}
