//! Task registration metadata for the external scheduler.
//!
//! Each task variant registers once, during a deterministic initialization
//! phase, with a stable numeric identifier, a processor-capability constraint,
//! and a leaf flag. The registry is explicit and ordered; nothing registers
//! through load-time side effects. The metadata is consumed by the scheduler
//! for placement and is never evaluated by core logic.

use crate::piece_error::MeshPiecesError;
use std::collections::HashSet;
use std::fmt;

/// Stable numeric task identifier shared with the scheduler.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct TaskId(pub u32);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Processor capability a task variant requires.
#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ProcessorKind {
    /// General-purpose core.
    Cpu,
    /// Vector/SIMD unit.
    Vector,
    /// Accelerator device.
    Accelerator,
}

/// Registration record for one task variant. Serializable so run manifests
/// can record the task table.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TaskDesc {
    /// Stable identifier.
    pub id: TaskId,
    /// Human-readable task name, for diagnostics.
    pub name: &'static str,
    /// Processor constraint for placement.
    pub processor: ProcessorKind,
    /// Whether the task performs no further dispatch.
    pub leaf: bool,
}

impl TaskDesc {
    /// Describe a task variant.
    pub fn new(id: TaskId, name: &'static str, processor: ProcessorKind, leaf: bool) -> Self {
        Self {
            id,
            name,
            processor,
            leaf,
        }
    }
}

/// Explicit, insertion-ordered task registry.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: Vec<TaskDesc>,
    ids: HashSet<TaskId>,
}

impl TaskRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task variant.
    ///
    /// # Errors
    /// [`MeshPiecesError::DuplicateTaskId`] if the id was already registered;
    /// ids must be unique across the whole run.
    pub fn register(&mut self, desc: TaskDesc) -> Result<(), MeshPiecesError> {
        if !self.ids.insert(desc.id) {
            return Err(MeshPiecesError::DuplicateTaskId(desc.id));
        }
        log::debug!("registered task {} ({})", desc.id, desc.name);
        self.tasks.push(desc);
        Ok(())
    }

    /// Look up a registered task by id.
    pub fn get(&self, id: TaskId) -> Option<&TaskDesc> {
        self.tasks.iter().find(|d| d.id == id)
    }

    /// Registered tasks in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TaskDesc> {
        self.tasks.iter()
    }

    /// Number of registered tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_preserves_order() {
        let mut reg = TaskRegistry::new();
        reg.register(TaskDesc::new(TaskId(2), "b", ProcessorKind::Cpu, true))
            .unwrap();
        reg.register(TaskDesc::new(TaskId(1), "a", ProcessorKind::Accelerator, false))
            .unwrap();
        let ids: Vec<_> = reg.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![TaskId(2), TaskId(1)]);
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut reg = TaskRegistry::new();
        reg.register(TaskDesc::new(TaskId(5), "x", ProcessorKind::Cpu, true))
            .unwrap();
        let err = reg
            .register(TaskDesc::new(TaskId(5), "y", ProcessorKind::Vector, true))
            .unwrap_err();
        assert_eq!(err, MeshPiecesError::DuplicateTaskId(TaskId(5)));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn desc_serializes_for_run_manifests() {
        let desc = TaskDesc::new(TaskId(6600), "apply_fixed_bc", ProcessorKind::Cpu, true);
        let json = serde_json::to_value(&desc).unwrap();
        assert_eq!(json["id"], 6600);
        assert_eq!(json["name"], "apply_fixed_bc");
        assert_eq!(json["processor"], "Cpu");
        assert_eq!(json["leaf"], true);
    }

    #[test]
    fn lookup_by_id() {
        let mut reg = TaskRegistry::new();
        reg.register(TaskDesc::new(TaskId(9), "leaf", ProcessorKind::Cpu, true))
            .unwrap();
        let desc = reg.get(TaskId(9)).unwrap();
        assert_eq!(desc.name, "leaf");
        assert!(desc.leaf);
        assert!(reg.get(TaskId(10)).is_none());
    }
}
