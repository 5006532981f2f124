//! Virtual-connection bookkeeping.
//!
//! A cast channel multiplexes logical connections over one TLS transport:
//! one to the platform (`receiver-0`) and one per launched application
//! transport. Every key must see a CONNECT before any other traffic and a
//! CLOSE on teardown. This module only tracks the key set; the CONNECT and
//! CLOSE frames are written by the channel under its writer lock so the
//! ordering guarantee holds on the wire.

use std::collections::HashSet;

#[derive(Debug, Default)]
pub(crate) struct VirtualConnections {
    keys: HashSet<(String, String)>,
}

impl VirtualConnections {
    /// Mark `(source, destination)` open. Returns true when the key was
    /// not open before, in which case the caller must write CONNECT before
    /// any other message to that destination.
    pub fn open(&mut self, source: &str, destination: &str) -> bool {
        self.keys
            .insert((source.to_owned(), destination.to_owned()))
    }

    /// Mark `(source, destination)` closed. Returns true when the key was
    /// open. Idempotent.
    pub fn close(&mut self, source: &str, destination: &str) -> bool {
        self.keys
            .remove(&(source.to_owned(), destination.to_owned()))
    }

    pub fn is_open(&self, source: &str, destination: &str) -> bool {
        self.keys
            .contains(&(source.to_owned(), destination.to_owned()))
    }

    /// Take every open key for teardown.
    pub fn drain(&mut self) -> Vec<(String, String)> {
        self.keys.drain().collect()
    }
}
