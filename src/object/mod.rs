//! Mesh objects the skin extension attaches to.
//!
//! These are the minimal collaborator surfaces the codec consumes: a geometry
//! with a skin extension slot and an optional native instanced representation,
//! and a mesh instance with a mutable active pipeline.

use std::any::Any;
use std::sync::Arc;

use crate::platform::{PipelineHandle, Platform};
use crate::skin::Skin;
use crate::util::{Error, Result};

/// Platform-native instanced mesh data. Opaque to the generic codec, which
/// only inspects the platform tag to dispatch; the payload is owned and
/// serialized by the platform module.
pub struct NativeInstance {
    platform: Platform,
    payload: Option<Box<dyn Any>>,
}

impl NativeInstance {
    /// Tag a geometry as natively instanced for a platform.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            payload: None,
        }
    }

    /// The platform this data was instanced for.
    #[inline]
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// The platform module's payload, if it stored one.
    pub fn payload(&self) -> Option<&dyn Any> {
        self.payload.as_deref()
    }

    /// Store the platform module's payload.
    pub fn set_payload(&mut self, payload: Box<dyn Any>) {
        self.payload = Some(payload);
    }
}

/// Mesh geometry with a skin extension slot.
///
/// The slot starts empty and is populated by a stream read or an explicit
/// setup call. Skin data and a native instanced representation are mutually
/// exclusive in practice: when `native` is set, the generic arrays are never
/// populated and serialization is delegated to the platform module.
#[derive(Default)]
pub struct Geometry {
    num_vertices: u32,
    native: Option<NativeInstance>,
    skin: Option<Skin>,
}

impl Geometry {
    /// Geometry with the given vertex count and an empty skin slot.
    pub fn new(num_vertices: u32) -> Self {
        Self {
            num_vertices,
            native: None,
            skin: None,
        }
    }

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> u32 {
        self.num_vertices
    }

    /// The native instanced representation, if any.
    pub fn native(&self) -> Option<&NativeInstance> {
        self.native.as_ref()
    }

    /// Mutable access to the native instanced representation.
    pub fn native_mut(&mut self) -> Option<&mut NativeInstance> {
        self.native.as_mut()
    }

    /// Mark this geometry as natively instanced.
    pub fn set_native(&mut self, native: NativeInstance) {
        self.native = Some(native);
    }

    /// The attached skin, if any.
    pub fn skin(&self) -> Option<&Skin> {
        self.skin.as_ref()
    }

    /// Mutable access to the attached skin.
    pub fn skin_mut(&mut self) -> Option<&mut Skin> {
        self.skin.as_mut()
    }

    /// Attach skin data to this geometry.
    pub fn set_skin(&mut self, skin: Skin) {
        self.skin = Some(skin);
    }

    /// Detach and return the skin data.
    pub fn take_skin(&mut self) -> Option<Skin> {
        self.skin.take()
    }

    /// Deep-copy this geometry, including any attached skin.
    ///
    /// A geometry carrying a native instanced representation cannot be
    /// duplicated generically; that is an explicit error, never a silent
    /// shallow copy.
    pub fn duplicate(&self) -> Result<Geometry> {
        if self.native.is_some() {
            return Err(Error::UnsupportedDuplicate);
        }
        Ok(Geometry {
            num_vertices: self.num_vertices,
            native: None,
            skin: self.skin.as_ref().map(Skin::duplicate),
        })
    }
}

/// A mesh instance referencing a geometry.
///
/// Instances carry the active render pipeline; skinned geometry requires the
/// skinning pipeline for the target platform (see
/// [`bind_skinned_instances`](crate::platform::bind_skinned_instances)).
pub struct Atomic {
    /// The geometry this instance renders. Shared between instances.
    pub geometry: Arc<Geometry>,
    /// Active render pipeline.
    pub pipeline: PipelineHandle,
}

impl Atomic {
    /// Instance of a geometry with the no-op pipeline.
    pub fn new(geometry: Arc<Geometry>) -> Self {
        Self {
            geometry,
            pipeline: PipelineHandle::NO_OP,
        }
    }
}
