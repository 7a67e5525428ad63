use diesel::{prelude::*, result::Error as DieselError, upsert::excluded};

use cmw_core::repositories::{self as repo, Key, KeyValueStore};

use super::{models, schema, DbConnection, DbReadOnly};

type Result<T> = std::result::Result<T, repo::Error>;

pub fn from_diesel_err(err: DieselError) -> repo::Error {
    match err {
        DieselError::NotFound => repo::Error::NotFound,
        _ => repo::Error::Other(err.into()),
    }
}

fn load_value(conn: &mut SqliteConnection, key: Key) -> Result<Option<String>> {
    use schema::kv_store::dsl;
    schema::kv_store::table
        .select(dsl::value)
        .filter(dsl::key.eq(key.as_str()))
        .first::<String>(conn)
        .optional()
        .map_err(from_diesel_err)
}

fn store_value(conn: &mut SqliteConnection, key: Key, value: &str) -> Result<()> {
    use schema::kv_store::dsl;
    let new_value = models::NewKeyValue {
        key: key.as_str(),
        value,
        revision: 1,
    };
    diesel::insert_into(schema::kv_store::table)
        .values(&new_value)
        .on_conflict(dsl::key)
        .do_update()
        .set((
            dsl::value.eq(excluded(dsl::value)),
            dsl::revision.eq(dsl::revision + 1),
        ))
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

pub fn load_revisions(conn: &mut SqliteConnection) -> Result<Vec<(Key, i64)>> {
    use schema::kv_store::dsl;
    let rows = schema::kv_store::table
        .select((dsl::key, dsl::revision))
        .load::<(String, i64)>(conn)
        .map_err(from_diesel_err)?;
    Ok(rows
        .into_iter()
        .filter_map(|(key, revision)| {
            let Some(key) = Key::parse(&key) else {
                log::debug!("Ignoring unknown key '{key}'");
                return None;
            };
            Some((key, revision))
        })
        .collect())
}

impl KeyValueStore for DbConnection<'_> {
    fn load_value(&self, key: Key) -> Result<Option<String>> {
        load_value(&mut self.conn.borrow_mut(), key)
    }

    fn store_value(&self, key: Key, value: String) -> Result<()> {
        store_value(&mut self.conn.borrow_mut(), key, &value)?;
        self.written_keys.borrow_mut().push(key);
        Ok(())
    }
}

impl KeyValueStore for DbReadOnly<'_> {
    fn load_value(&self, key: Key) -> Result<Option<String>> {
        load_value(&mut self.conn.borrow_mut(), key)
    }

    fn store_value(&self, key: Key, _value: String) -> Result<()> {
        log::warn!("Rejecting write access to '{key}' on a read-only connection");
        Err(repo::Error::ReadOnly)
    }
}
