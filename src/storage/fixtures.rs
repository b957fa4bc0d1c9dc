//! USERS table schema and demo rows.

use rusqlite::Connection;

use super::StorageError;

pub const CREATE_USERS_TABLE: &str = "CREATE TABLE USERS(\
    ID INT PRIMARY KEY     NOT NULL,\
    NAME           TEXT    NOT NULL,\
    PASSWORD       TEXT    NOT NULL);";

/// (id, name, password) rows inserted by [`seed_users`].
pub const FIXTURE_USERS: [(i64, &str, &str); 4] = [
    (1, "Fred", "Flinstone"),
    (2, "Barney", "Rubble"),
    (3, "Wilma", "Flinstone"),
    (4, "Betty", "Rubble"),
];

/// Create the USERS table and insert the fixture rows.
///
/// This runs directly on the connection: the gateway itself only ever reads.
pub fn seed_users(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(CREATE_USERS_TABLE)?;
    log::info!("USERS table created.");

    let mut insert = conn.prepare("INSERT INTO USERS (ID, NAME, PASSWORD) VALUES (?1, ?2, ?3)")?;
    for (id, name, password) in FIXTURE_USERS {
        insert.execute(rusqlite::params![id, name, password])?;
    }
    log::debug!("Inserted {} fixture users", FIXTURE_USERS.len());
    Ok(())
}
