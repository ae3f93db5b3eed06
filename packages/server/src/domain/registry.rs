//! Connection registry: the set of live connections eligible for fan-out.
//!
//! The registry is a plain data structure. It is generic over the handle type
//! so it has no knowledge of the transport nor of message content; callers
//! wrap it in a lock to make add/remove atomic with respect to a broadcast pass.

use std::collections::HashMap;

use super::{error::RegistryError, value_object::ConnectionId};

/// What to do with the connection just visited by [`ConnectionRegistry::for_each`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Keep,
    Deregister,
}

#[derive(Debug)]
pub struct ConnectionRegistry<C> {
    connections: HashMap<ConnectionId, C>,
}

impl<C> ConnectionRegistry<C> {
    pub fn new() -> Self {
        Self {
            connections: HashMap::new(),
        }
    }

    /// Add a connection. A second registration of the same id is rejected.
    pub fn register(&mut self, id: ConnectionId, handle: C) -> Result<(), RegistryError> {
        if self.connections.contains_key(&id) {
            return Err(RegistryError::DuplicateConnection(id.into_string()));
        }
        self.connections.insert(id, handle);
        Ok(())
    }

    /// Remove a connection, returning its handle. Absent ids are a no-op.
    pub fn deregister(&mut self, id: &ConnectionId) -> Option<C> {
        self.connections.remove(id)
    }

    /// Visit every registered connection exactly once, in unspecified order.
    ///
    /// The visitor may ask for the current connection to be deregistered; the
    /// removed ids are returned.
    pub fn for_each<F>(&mut self, mut visitor: F) -> Vec<ConnectionId>
    where
        F: FnMut(&ConnectionId, &C) -> Visit,
    {
        let mut removed = Vec::new();
        self.connections.retain(|id, handle| match visitor(id, handle) {
            Visit::Keep => true,
            Visit::Deregister => {
                removed.push(id.clone());
                false
            }
        });
        removed
    }

    pub fn get(&self, id: &ConnectionId) -> Option<&C> {
        self.connections.get(id)
    }

    /// Advisory count; races with concurrent join/leave
    pub fn size(&self) -> usize {
        self.connections.len()
    }

    /// Drop every connection, returning how many were registered
    pub fn clear(&mut self) -> usize {
        let count = self.connections.len();
        self.connections.clear();
        count
    }
}

impl<C> Default for ConnectionRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}
