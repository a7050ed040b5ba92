//! OrderingService: the only component that decides Z values
//!
//! Every create, update and delete runs inside one `StoreWriter` section.
//! The cascade, the removal of an updated widget's old record and the final
//! put are therefore a single critical section: no reader or other writer
//! sees the store between the steps.

use std::sync::Arc;

use tracing::{debug, info, warn};
use zstack_core::{Error, Result, Widget, WidgetDraft, WidgetId, ZOrdered, ZOrderedMut, Z};
use zstack_storage::{OrderedStore, StoreSnapshot, StoreWriter};

use crate::cascade::{make_space_for_z, ShiftPolicy};
use crate::config::EngineConfig;
use crate::ids::{IdGenerator, RandomIds};
use crate::metrics::ServiceMetrics;

/// Z-ordering engine over a shared `OrderedStore`
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use zstack_core::WidgetDraft;
/// use zstack_engine::OrderingService;
/// use zstack_storage::OrderedStore;
///
/// let service = OrderingService::new(Arc::new(OrderedStore::new()));
/// let a = service.create(WidgetDraft::at(10, 10, 1)).unwrap();
/// let b = service.create(WidgetDraft::at(10, 10, 1)).unwrap();
///
/// assert_eq!(b.z, 1);
/// assert_eq!(service.get(&a.id).unwrap().z, 2);
/// ```
#[derive(Debug)]
pub struct OrderingService {
    store: Arc<OrderedStore>,
    ids: Box<dyn IdGenerator>,
    policy: ShiftPolicy,
    verify_invariants: bool,
    metrics: ServiceMetrics,
}

impl OrderingService {
    /// Service with the default policy and random ids
    pub fn new(store: Arc<OrderedStore>) -> Self {
        Self {
            store,
            ids: Box::new(RandomIds),
            policy: ShiftPolicy::default(),
            verify_invariants: false,
            metrics: ServiceMetrics::new(),
        }
    }

    /// Service configured from an `EngineConfig`
    ///
    /// # Errors
    ///
    /// Returns `Config` if the config names an unknown policy or id strategy.
    pub fn with_config(store: Arc<OrderedStore>, config: &EngineConfig) -> Result<Self> {
        let policy = config.shift_policy()?;
        let ids = config.id_strategy()?.generator();
        debug!(
            target: "zstack::ordering",
            policy = %policy,
            id_strategy = %config.id_strategy,
            verify_invariants = config.verify_invariants,
            "ordering service configured"
        );
        Ok(Self {
            store,
            ids,
            policy,
            verify_invariants: config.verify_invariants,
            metrics: ServiceMetrics::new(),
        })
    }

    /// Replace the id generator
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Replace the shift policy
    pub fn with_shift_policy(mut self, policy: ShiftPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enable or disable the full consistency check after each mutation
    pub fn with_invariant_checks(mut self, enabled: bool) -> Self {
        self.verify_invariants = enabled;
        self
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<OrderedStore> {
        &self.store
    }

    /// Active shift policy
    pub fn shift_policy(&self) -> ShiftPolicy {
        self.policy
    }

    /// Operation counters
    pub fn metrics(&self) -> &ServiceMetrics {
        &self.metrics
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Widget by id, if stored
    pub fn find(&self, id: &WidgetId) -> Option<Widget> {
        self.store.get_by_id(id)
    }

    /// Widget by id
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no widget has this id.
    pub fn get(&self, id: &WidgetId) -> Result<Widget> {
        self.find(id).ok_or(Error::NotFound(*id))
    }

    /// Every widget, ascending by Z
    pub fn list(&self) -> Vec<Widget> {
        self.store.all_ordered_by_z()
    }

    /// Highest occupied Z
    pub fn max_z(&self) -> Option<Z> {
        self.store.max_z()
    }

    /// Widget with the lowest Z at or above `z`
    pub fn ceiling(&self, z: Z) -> Option<Widget> {
        self.store.ceiling_by_z(z)
    }

    /// Number of stored widgets
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// True if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Consistent copy of the whole store
    pub fn snapshot(&self) -> StoreSnapshot {
        self.store.snapshot()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Store a new widget, shifting occupants of its Z upward
    ///
    /// A draft without Z lands one above the current maximum (1 in an empty
    /// store). The returned widget carries the assigned id and final Z.
    ///
    /// # Errors
    ///
    /// Returns `ZOverflow` if the placement would need a Z above `Z::MAX`.
    /// The store is unchanged in that case.
    pub fn create(&self, draft: WidgetDraft) -> Result<Widget> {
        let mut writer = self.store.write();
        let result = self.create_locked(&mut writer, draft);
        self.verify(&writer);
        drop(writer);

        match result {
            Ok((widget, shifted)) => {
                self.metrics.record_create(shifted);
                self.log_applied("create", &widget, shifted);
                Ok(widget)
            }
            Err(e) => Err(self.reject("create", e)),
        }
    }

    /// Replace a stored widget with `desired`
    ///
    /// `previous` identifies the widget; the move is computed against the
    /// record currently stored under that id, so a stale `previous` cannot
    /// corrupt the store. A changed Z frees the target first, with the
    /// widget's old record already out of the way.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `desired.id != previous.id`
    /// - `NotFound` if the widget is no longer stored
    /// - `ZOverflow` if the cascade cannot move; the store is unchanged
    pub fn update(&self, previous: Widget, desired: Widget) -> Result<Widget> {
        if desired.id != previous.id {
            return Err(self.reject(
                "update",
                Error::invalid_input(format!(
                    "cannot change widget id from {} to {}",
                    previous.id, desired.id
                )),
            ));
        }

        let mut writer = self.store.write();
        let result = writer
            .get_by_id(&previous.id)
            .ok_or(Error::NotFound(previous.id))
            .and_then(|current| self.update_locked(&mut writer, current, desired));
        self.verify(&writer);
        drop(writer);

        self.finish_update(result)
    }

    /// Read-modify-write of one widget under a single write section
    ///
    /// `f` receives the stored record and returns the desired one. It must
    /// keep the id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is not stored, any error returned by `f`,
    /// and the errors of [`update`](Self::update).
    pub fn modify<F>(&self, id: &WidgetId, f: F) -> Result<Widget>
    where
        F: FnOnce(&Widget) -> Result<Widget>,
    {
        let mut writer = self.store.write();
        let result = writer
            .get_by_id(id)
            .ok_or(Error::NotFound(*id))
            .and_then(|current| {
                let desired = f(&current)?;
                if desired.id != current.id {
                    return Err(Error::invalid_input(format!(
                        "cannot change widget id from {} to {}",
                        current.id, desired.id
                    )));
                }
                self.update_locked(&mut writer, current, desired)
            });
        self.verify(&writer);
        drop(writer);

        self.finish_update(result)
    }

    /// Remove a widget; a missing id is a silent no-op
    pub fn delete(&self, id: &WidgetId) -> Option<Widget> {
        let mut writer = self.store.write();
        let removed = writer.remove_by_id(id);
        self.verify(&writer);
        drop(writer);

        match &removed {
            Some(widget) => {
                self.metrics.record_delete();
                debug!(target: "zstack::ordering", id = %widget.id, z = widget.z, "deleted");
            }
            None => debug!(target: "zstack::ordering", id = %id, "delete of absent widget"),
        }
        removed
    }

    // ========================================================================
    // Internals (caller holds the writer)
    // ========================================================================

    fn create_locked(
        &self,
        writer: &mut StoreWriter<'_>,
        draft: WidgetDraft,
    ) -> Result<(Widget, usize)> {
        let (z, shifted) = match draft.z {
            Some(z) => (z, make_space_for_z(writer, z, self.policy)?),
            None => (next_top_z(&*writer)?, 0),
        };

        let id = self.ids.next_id();
        debug_assert!(writer.get_by_id(&id).is_none(), "id {} reused", id);

        let widget = writer.put(draft.into_widget(id, z));
        Ok((widget, shifted))
    }

    fn update_locked(
        &self,
        writer: &mut StoreWriter<'_>,
        current: Widget,
        desired: Widget,
    ) -> Result<(Widget, usize)> {
        if desired.z == current.z {
            return Ok((writer.put(desired), 0));
        }

        // Out first, so the widget never collides with itself in the shift range
        writer.remove_by_id(&current.id);
        let shifted = match make_space_for_z(writer, desired.z, self.policy) {
            Ok(n) => n,
            Err(e) => {
                // make_space_for_z fails before moving anything
                writer.put(current);
                return Err(e);
            }
        };
        Ok((writer.put(desired), shifted))
    }

    fn finish_update(&self, result: Result<(Widget, usize)>) -> Result<Widget> {
        match result {
            Ok((widget, shifted)) => {
                self.metrics.record_update(shifted);
                self.log_applied("update", &widget, shifted);
                Ok(widget)
            }
            Err(e) => Err(self.reject("update", e)),
        }
    }

    fn verify(&self, writer: &StoreWriter<'_>) {
        if self.verify_invariants {
            if let Err(e) = writer.check_invariants() {
                panic!("{}", e);
            }
        }
    }

    fn log_applied(&self, op: &'static str, widget: &Widget, shifted: usize) {
        if shifted > 0 {
            info!(
                target: "zstack::ordering",
                op,
                id = %widget.id,
                z = widget.z,
                shifted,
                policy = %self.policy,
                "cascade applied"
            );
        } else {
            debug!(target: "zstack::ordering", op, id = %widget.id, z = widget.z, "applied");
        }
    }

    fn reject(&self, op: &'static str, error: Error) -> Error {
        self.metrics.record_rejected();
        warn!(target: "zstack::ordering", op, error = %error, "rejected");
        error
    }
}

/// Z for a widget placed above everything else
fn next_top_z<S: ZOrdered + ?Sized>(store: &S) -> Result<Z> {
    match store.max_z() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or(Error::ZOverflow { z: max }),
    }
}
