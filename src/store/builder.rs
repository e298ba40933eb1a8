use super::ReadingStore;
use fjall::TxKeyspace;
use std::path::Path;

/// Builder for [`ReadingStore`].
pub struct Builder {
    cache_size_mib: u64,
}

impl Builder {
    pub(crate) fn new() -> Self {
        Self { cache_size_mib: 64 }
    }

    /// Sets the cache size in MiB.
    ///
    /// Default = 64 MiB
    #[must_use]
    pub fn cache_size_mib(mut self, mib: u64) -> Self {
        self.cache_size_mib = mib;
        self
    }

    /// Opens or recovers a reading store.
    ///
    /// If you have a keyspace already in your application, you may
    /// want to use `open_in_keyspace` instead.
    ///
    /// # Errors
    ///
    /// Returns error if an I/O error occurred.
    pub fn open<P: AsRef<Path>>(self, path: P) -> crate::Result<ReadingStore> {
        log::debug!("opening reading store at {:?}", path.as_ref());

        let keyspace = fjall::Config::new(path)
            .cache_size(self.cache_size_mib * 1_024 * 1_024)
            .open_transactional()?;

        ReadingStore::from_keyspace(keyspace)
    }

    /// Uses an existing `fjall` keyspace to open a reading store.
    ///
    /// Partitions are prefixed with `_glucostat#` to avoid name clashes with other applications.
    ///
    /// # Errors
    ///
    /// Returns error if an I/O error occurred.
    pub fn open_in_keyspace(self, keyspace: TxKeyspace) -> crate::Result<ReadingStore> {
        ReadingStore::from_keyspace(keyspace)
    }
}
