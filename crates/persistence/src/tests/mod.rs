// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.


use crate::SqlitePersistence;

pub fn memory_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().expect("in-memory database")
}

#[test]
fn schema_initialization_is_idempotent() {
    let persistence = memory_persistence();
    // Re-running the schema script against the same connection must
    // not fail or duplicate anything.
    crate::schema::initialize_schema(&persistence.conn).expect("second initialization");
    let users: i64 = persistence
        .conn
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .expect("count users");
    assert_eq!(users, 3);
}

#[test]
fn foreign_keys_are_enforced() {
    let persistence = memory_persistence();
    crate::schema::verify_foreign_key_enforcement(&persistence.conn).expect("FK pragma on");
}
