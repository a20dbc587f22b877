//! Session-scoped waypoint storage.
//!
//! [`WaypointStore`] owns every [`Waypoint`] for a session and is the only
//! authority that issues [`WaypointId`] values. Mutations take `&mut self`, so
//! writers are serialised by the borrow checker; wrap the store in a
//! [`Mutex`](std::sync::Mutex) to share it between threads.

use log::debug;

use crate::{NewWaypoint, Waypoint, WaypointError, WaypointId};

/// Ordered collection of waypoints with unique identifiers.
///
/// # Examples
/// ```
/// use optiroute_core::{NewWaypoint, WaypointStore};
///
/// let mut store = WaypointStore::new();
/// let first = store.add(NewWaypoint::new("A", 0.0, 0.0))?;
/// let second = store.add(NewWaypoint::new("B", 0.0, 1.0))?;
///
/// assert!(store.remove(first));
/// assert!(!store.remove(first));
/// assert_eq!(store.snapshot().len(), 1);
/// assert_eq!(store.snapshot()[0].id, second);
/// # Ok::<(), optiroute_core::WaypointError>(())
/// ```
#[derive(Debug)]
pub struct WaypointStore {
    waypoints: Vec<Waypoint>,
    next_id: u64,
    exhausted: bool,
}

impl Default for WaypointStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WaypointStore {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            waypoints: Vec::new(),
            next_id: 1,
            exhausted: false,
        }
    }

    /// Validate `draft`, assign it an identifier and append it.
    ///
    /// When `draft.id` is `None` the store issues the next value of its
    /// monotonic counter. A supplied identifier must not already be present;
    /// the counter is advanced past it so generated ids never collide.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError::InvalidLatitude`] or
    /// [`WaypointError::InvalidLongitude`] for malformed coordinates and
    /// [`WaypointError::DuplicateId`] when the supplied id is taken.
    /// Returns [`WaypointError::IdSpaceExhausted`] when no fresh id can be
    /// generated because `u64::MAX` has already been used.
    pub fn add(&mut self, draft: NewWaypoint) -> Result<WaypointId, WaypointError> {
        draft.validate()?;
        let id = match draft.id {
            Some(id) if self.contains(id) => return Err(WaypointError::DuplicateId { id }),
            Some(id) => id,
            None => self.issue_id()?,
        };
        self.next_id = self.next_id.max(id.get().saturating_add(1));
        self.exhausted |= id.get() == u64::MAX;
        let waypoint = draft.into_waypoint(id);
        debug!("added waypoint {id} ({})", waypoint.name);
        self.waypoints.push(waypoint);
        Ok(id)
    }

    /// Remove the waypoint with `id`, keeping the order of the rest.
    ///
    /// Returns `false`, leaving the store untouched, when no waypoint matches.
    pub fn remove(&mut self, id: WaypointId) -> bool {
        let Some(index) = self.waypoints.iter().position(|wp| wp.id == id) else {
            return false;
        };
        self.waypoints.remove(index);
        debug!("removed waypoint {id}");
        true
    }

    /// Remove every waypoint. Identifiers are not reused afterwards.
    pub fn clear(&mut self) {
        debug!("cleared {} waypoints", self.waypoints.len());
        self.waypoints.clear();
    }

    /// Return an owned copy of the waypoints in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Waypoint> {
        self.waypoints.clone()
    }

    /// Look up a waypoint by identifier.
    #[must_use]
    pub fn get(&self, id: WaypointId) -> Option<&Waypoint> {
        self.waypoints.iter().find(|wp| wp.id == id)
    }

    /// Iterate over the waypoints in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Waypoint> {
        self.waypoints.iter()
    }

    /// Number of stored waypoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    fn contains(&self, id: WaypointId) -> bool {
        self.get(id).is_some()
    }

    const fn issue_id(&self) -> Result<WaypointId, WaypointError> {
        if self.exhausted {
            return Err(WaypointError::IdSpaceExhausted);
        }
        Ok(WaypointId::new(self.next_id))
    }
}
