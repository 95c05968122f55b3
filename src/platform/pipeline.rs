//! Render pipeline selection for skinned mesh instances.
//!
//! Pipelines themselves are built by platform modules; here they are opaque
//! handles. The table is populated once at subsystem start, one factory call
//! per platform, and read-only afterwards.

use crate::object::Atomic;
use crate::platform::Platform;

/// Opaque handle to a render pipeline owned by a platform module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineHandle(u32);

impl PipelineHandle {
    /// Pipeline that renders nothing special; the default for platforms
    /// without a skinning pipeline.
    pub const NO_OP: PipelineHandle = PipelineHandle(0);

    /// Create a handle from a platform module's pipeline id.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The underlying pipeline id.
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Per-platform skinning pipelines.
///
/// Every platform starts with [`PipelineHandle::NO_OP`]; platform modules fill
/// their slot via [`with_factory`](Self::with_factory) at subsystem start.
#[derive(Debug, Clone)]
pub struct PipelineTable {
    entries: [PipelineHandle; Platform::COUNT],
}

impl PipelineTable {
    /// Table with every platform mapped to the no-op pipeline.
    pub fn new() -> Self {
        Self {
            entries: [PipelineHandle::NO_OP; Platform::COUNT],
        }
    }

    /// Populate one platform's slot by invoking its pipeline factory.
    pub fn with_factory(
        mut self,
        platform: Platform,
        factory: impl FnOnce() -> PipelineHandle,
    ) -> Self {
        self.entries[platform.index()] = factory();
        self
    }

    /// The pipeline for a platform.
    #[inline]
    pub fn get(&self, platform: Platform) -> PipelineHandle {
        self.entries[platform.index()]
    }
}

impl Default for PipelineTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Overwrite an instance's active pipeline with the skinning pipeline for the
/// current target platform.
pub fn set_pipeline(atomic: &mut Atomic, table: &PipelineTable, target: Platform) {
    atomic.pipeline = table.get(target);
}

/// Bind the skinning pipeline to every instance whose geometry carries skin
/// data. Must run whenever skin data becomes associated with instances, e.g.
/// right after a successful stream read of a skinned geometry.
pub fn bind_skinned_instances(atomics: &mut [Atomic], table: &PipelineTable, target: Platform) {
    for atomic in atomics {
        if atomic.geometry.skin().is_some() {
            set_pipeline(atomic, table, target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Geometry;
    use crate::skin::Skin;
    use std::sync::Arc;

    #[test]
    fn test_table_defaults_to_no_op() {
        let table = PipelineTable::new();
        for platform in Platform::ALL {
            assert_eq!(table.get(platform), PipelineHandle::NO_OP);
        }
    }

    #[test]
    fn test_factory_populates_slot() {
        let table = PipelineTable::new()
            .with_factory(Platform::Gl3, || PipelineHandle::new(3))
            .with_factory(Platform::D3d9, || PipelineHandle::new(9));
        assert_eq!(table.get(Platform::Gl3), PipelineHandle::new(3));
        assert_eq!(table.get(Platform::D3d9), PipelineHandle::new(9));
        assert_eq!(table.get(Platform::Ps2), PipelineHandle::NO_OP);
    }

    #[test]
    fn test_set_pipeline_uses_target_platform() {
        let table = PipelineTable::new().with_factory(Platform::Gl3, || PipelineHandle::new(3));
        let mut atomic = Atomic::new(Arc::new(Geometry::new(0)));
        set_pipeline(&mut atomic, &table, Platform::Gl3);
        assert_eq!(atomic.pipeline, PipelineHandle::new(3));
    }

    #[test]
    fn test_bind_only_skinned_instances() {
        let table = PipelineTable::new().with_factory(Platform::Gl3, || PipelineHandle::new(3));

        let mut skinned = Geometry::new(1);
        skinned.set_skin(Skin::new(1, 1, 1));
        let plain = Geometry::new(1);

        let mut atomics = vec![
            Atomic::new(Arc::new(skinned)),
            Atomic::new(Arc::new(plain)),
        ];
        bind_skinned_instances(&mut atomics, &table, Platform::Gl3);

        assert_eq!(atomics[0].pipeline, PipelineHandle::new(3));
        assert_eq!(atomics[1].pipeline, PipelineHandle::NO_OP);
    }
}
