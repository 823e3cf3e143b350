use std::collections::HashMap;
use std::io::Write;

use tracing::{debug, warn};

use crate::channel::{Channel, ChannelHandle};
use crate::error::{Result, StreamError};
use crate::specifier::PoolKey;

/// Deduplicating registry of open channels.
///
/// Holds at most one channel per [`PoolKey`] for its whole lifetime. The pool has no
/// internal locking and its handles are `!Send`; callers that parallelize around it
/// must serialize access themselves.
///
/// [`teardown`](ChannelPool::teardown) consumes the pool, so using it afterwards does
/// not compile. A pool dropped without teardown still flushes and releases its channels.
#[derive(Debug, Default)]
pub struct ChannelPool {
    entries: HashMap<PoolKey, ChannelHandle>,
}

impl ChannelPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the channel held under `key`, opening it with `factory` on first use.
    ///
    /// A failing factory leaves the pool unchanged.
    pub fn get_or_create<F>(&mut self, key: PoolKey, factory: F) -> Result<ChannelHandle>
    where
        F: FnOnce() -> Result<Channel>,
    {
        if let Some(handle) = self.entries.get(&key) {
            debug!(%key, "reusing pooled channel");
            return Ok(handle.clone());
        }

        let handle = ChannelHandle::new(factory()?);
        debug!(%key, "pooled new channel");
        self.entries.insert(key, handle.clone());
        Ok(handle)
    }

    /// Look up a pooled channel without opening anything.
    pub fn get(&self, key: &PoolKey) -> Option<ChannelHandle> {
        self.entries.get(key).cloned()
    }

    pub fn contains(&self, key: &PoolKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flush and release every pooled channel.
    ///
    /// Every channel is flushed even if an earlier one fails; the first failure is returned.
    /// Outstanding handles keep their channel alive until they are dropped too.
    pub fn teardown(mut self) -> Result<()> {
        let mut first_err: Option<StreamError> = None;
        for (key, mut handle) in self.entries.drain() {
            if let Err(err) = handle.flush() {
                warn!(%key, error = %err, "flush failed during teardown");
                first_err.get_or_insert(StreamError::Io(err));
            }
            debug!(%key, "released channel");
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Drop for ChannelPool {
    fn drop(&mut self) {
        // Empty after teardown.
        for (key, mut handle) in self.entries.drain() {
            if let Err(err) = handle.flush() {
                warn!(%key, error = %err, "flush failed while dropping pool");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::io::{self, Cursor, Read};
    use std::rc::Rc;

    use super::*;
    use crate::specifier::Direction;

    fn file_key(path: &str) -> PoolKey {
        PoolKey::File {
            direction: Direction::Output,
            path: path.to_string(),
        }
    }

    fn mem_channel() -> Result<Channel> {
        Ok(Channel::from_stream("mem", Cursor::new(Vec::new())))
    }

    /// Counts flushes so teardown behaviour is observable.
    struct FlushCounter {
        flushes: Rc<Cell<usize>>,
        fail: bool,
    }

    impl Read for FlushCounter {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Ok(0)
        }
    }

    impl Write for FlushCounter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushes.set(self.flushes.get() + 1);
            if self.fail {
                Err(io::Error::other("disk full"))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn same_key_returns_same_channel() {
        let mut pool = ChannelPool::new();
        let a = pool.get_or_create(file_key("a.bin"), mem_channel).unwrap();
        let b = pool
            .get_or_create(file_key("a.bin"), || panic!("factory must not run twice"))
            .unwrap();
        assert!(a.ptr_eq(&b));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn distinct_keys_get_distinct_channels() {
        let mut pool = ChannelPool::new();
        let a = pool.get_or_create(file_key("a.bin"), mem_channel).unwrap();
        let b = pool.get_or_create(file_key("b.bin"), mem_channel).unwrap();
        assert!(!a.ptr_eq(&b));
        assert_eq!(pool.len(), 2);
        assert!(pool.contains(&file_key("b.bin")));
    }

    #[test]
    fn failing_factory_leaves_pool_unchanged() {
        let mut pool = ChannelPool::new();
        let err = pool
            .get_or_create(file_key("a.bin"), || {
                Err(StreamError::Io(io::Error::other("boom")))
            })
            .unwrap_err();
        assert!(matches!(err, StreamError::Io(_)));
        assert!(pool.is_empty());
    }

    #[test]
    fn teardown_flushes_every_channel() {
        let flushes = Rc::new(Cell::new(0));
        let mut pool = ChannelPool::new();
        for name in ["a", "b", "c"] {
            let counter = FlushCounter {
                flushes: flushes.clone(),
                fail: false,
            };
            pool.get_or_create(file_key(name), || Ok(Channel::from_stream(name, counter)))
                .unwrap();
        }
        pool.teardown().unwrap();
        assert_eq!(flushes.get(), 3);
    }

    #[test]
    fn teardown_reports_flush_failure_after_flushing_all() {
        let flushes = Rc::new(Cell::new(0));
        let mut pool = ChannelPool::new();
        for (name, fail) in [("a", true), ("b", false)] {
            let counter = FlushCounter {
                flushes: flushes.clone(),
                fail,
            };
            pool.get_or_create(file_key(name), || Ok(Channel::from_stream(name, counter)))
                .unwrap();
        }
        assert!(matches!(pool.teardown(), Err(StreamError::Io(_))));
        assert_eq!(flushes.get(), 2);
    }

    #[test]
    fn drop_without_teardown_flushes() {
        let flushes = Rc::new(Cell::new(0));
        {
            let mut pool = ChannelPool::new();
            let counter = FlushCounter {
                flushes: flushes.clone(),
                fail: false,
            };
            pool.get_or_create(file_key("a"), || Ok(Channel::from_stream("a", counter)))
                .unwrap();
        }
        assert_eq!(flushes.get(), 1);
    }
}
