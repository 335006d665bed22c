//! In-process document store.
//!
//! All collections live behind a single [`RwLock`]. Any number of
//! read-only connections may be used concurrently while write access
//! is exclusive. Writes happen inside a [`DbReadWrite::transaction`]
//! that restores the previous state if the closure fails.

use std::{cell::RefCell, sync::Arc};

use gatherly_core::{repositories as repo, usecases as uc};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

mod collections;
mod repo_impl;

pub use self::collections::Collections;

type SharedCollections = Arc<RwLock<Collections>>;

type Result<T> = std::result::Result<T, repo::Error>;

enum Access<'a> {
    Shared(RwLockReadGuard<'a, Collections>),
    Exclusive(RefCell<&'a mut Collections>),
}

/// A connection with either read-only or read/write access.
///
/// Write operations on a read-only connection fail with
/// [`repo::Error::ReadOnly`].
pub struct DbConnection<'a> {
    access: Access<'a>,
}

impl<'a> DbConnection<'a> {
    fn read<T>(&self, f: impl FnOnce(&Collections) -> T) -> T {
        match &self.access {
            Access::Shared(data) => f(data),
            Access::Exclusive(data) => f(&data.borrow()),
        }
    }

    fn write<T>(&self, f: impl FnOnce(&mut Collections) -> Result<T>) -> Result<T> {
        match &self.access {
            Access::Shared(_) => Err(repo::Error::ReadOnly),
            Access::Exclusive(data) => {
                let mut data = data.borrow_mut();
                f(&mut data)
            }
        }
    }
}

pub struct DbReadWrite<'a> {
    locked: RwLockWriteGuard<'a, Collections>,
}

impl DbReadWrite<'_> {
    /// Runs `f` with write access.
    ///
    /// All modifications are discarded if `f` returns an error.
    pub fn transaction<T, F, E>(&mut self, f: F) -> std::result::Result<T, uc::Error>
    where
        F: FnOnce(&DbConnection) -> std::result::Result<T, E>,
        E: Into<uc::Error>,
    {
        let snapshot = Collections::clone(&self.locked);
        let result = {
            let conn = DbConnection {
                access: Access::Exclusive(RefCell::new(&mut *self.locked)),
            };
            f(&conn).map_err(Into::into)
        };
        if let Err(err) = &result {
            log::debug!("Rolling back transaction: {err}");
            *self.locked = snapshot;
        }
        result
    }
}

#[derive(Clone, Default)]
pub struct Connections {
    // Only a single writer is admitted at a time. Readers
    // are blocked while a transaction is in progress.
    collections: SharedCollections,
}

impl Connections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Must not be called while the same thread holds
    /// an exclusive connection.
    pub fn shared(&self) -> anyhow::Result<DbConnection<'_>> {
        Ok(DbConnection {
            access: Access::Shared(self.collections.read()),
        })
    }

    pub fn exclusive(&self) -> anyhow::Result<DbReadWrite<'_>> {
        Ok(DbReadWrite {
            locked: self.collections.write(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatherly_core::{entities::*, repositories::*};
    use gatherly_entities::builders::*;

    #[test]
    fn rollback_on_error() {
        let connections = Connections::new();
        let user = User::build().finish();
        let res: std::result::Result<(), uc::Error> = connections.exclusive().unwrap().transaction(|conn| {
            conn.create_user(&user)?;
            Err(uc::Error::UserExists)
        });
        assert!(matches!(res, Err(uc::Error::UserExists)));
        let db = connections.shared().unwrap();
        assert_eq!(db.count_users().unwrap(), 0);
    }

    #[test]
    fn commit_on_success() {
        let connections = Connections::new();
        let user = User::build().finish();
        connections
            .exclusive()
            .unwrap()
            .transaction(|conn| conn.create_user(&user))
            .unwrap();
        let db = connections.shared().unwrap();
        assert_eq!(db.get_user(&user.id).unwrap(), user);
    }

    #[test]
    fn shared_connections_are_read_only() {
        let connections = Connections::new();
        let db = connections.shared().unwrap();
        assert!(matches!(
            db.create_user(&User::build().finish()),
            Err(repo::Error::ReadOnly)
        ));
        // concurrent readers
        let other = connections.shared().unwrap();
        assert_eq!(other.count_users().unwrap(), 0);
    }
}
