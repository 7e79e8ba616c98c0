use slotmap::{Key, KeyData, SecondaryMap, new_key_type};

new_key_type! {
    /// Opaque stable identifier for one animated agent.
    ///
    /// Handles are minted by [`MotionSystem::register`](crate::motion::MotionSystem::register)
    /// and stay valid until [`clear`](crate::motion::MotionSystem::clear) evicts
    /// the entity. Hosts that store plain integers can round-trip a handle
    /// through [`EntityHandle::to_raw`] / [`EntityHandle::from_raw`].
    pub struct EntityHandle;
}

impl EntityHandle {
    /// Packs the handle into a stable `u64` for storage outside the crate.
    #[must_use]
    pub fn to_raw(self) -> u64 {
        self.data().as_ffi()
    }

    /// Reconstructs a handle previously produced by [`Self::to_raw`].
    #[must_use]
    pub fn from_raw(raw: u64) -> Self {
        KeyData::from_ffi(raw).into()
    }
}

/// Per-entity slot storage for one motion aspect.
///
/// One instance per engine; each engine is the sole mutator of its own
/// aspect records. Slots are index-keyed (`slotmap::SecondaryMap`), created lazily on first
/// access and evicted explicitly on entity removal, never dropped
/// implicitly.
#[derive(Debug, Default)]
pub struct AspectStore<T> {
    slots: SecondaryMap<EntityHandle, T>,
}

impl<T> AspectStore<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: SecondaryMap::new(),
        }
    }

    /// Returns the record for `entity`, creating it with `init` on first
    /// access. Returns `None` only for the null handle; missing state is
    /// never an error.
    pub fn slot_with(&mut self, entity: EntityHandle, init: impl FnOnce() -> T) -> Option<&mut T> {
        Some(self.slots.entry(entity)?.or_insert_with(init))
    }

    /// Read-only access without creating a record.
    #[must_use]
    pub fn get(&self, entity: EntityHandle) -> Option<&T> {
        self.slots.get(entity)
    }

    /// Evicts the record for `entity`. Returns whether one existed.
    pub fn evict(&mut self, entity: EntityHandle) -> bool {
        self.slots.remove(entity).is_some()
    }

    /// Evicts every record.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<T: Default> AspectStore<T> {
    /// Returns the record for `entity`, default-initializing it on first
    /// access.
    pub fn slot(&mut self, entity: EntityHandle) -> Option<&mut T> {
        self.slot_with(entity, T::default)
    }
}
