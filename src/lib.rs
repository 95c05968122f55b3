//! # rwskin
//!
//! Vertex skinning data for RenderWare-family binary mesh streams.
//!
//! A skin attaches bone indices and blend weights to a mesh geometry and is
//! serialized as a chunk payload inside the enclosing container. Two on-disk
//! layouts exist: streams older than container version `0x34000` store no
//! skin metadata (it is reconstructed from the vertex data on read), newer
//! streams store it explicitly. Geometry that was instanced for a specific
//! platform delegates serialization to that platform's native codec.
//!
//! ## Modules
//!
//! - [`util`] - Errors and math helpers
//! - [`stream`] - Chunk payload I/O wrappers
//! - [`object`] - Geometry and mesh-instance collaborator types
//! - [`platform`] - Platform tags, native codec dispatch, pipeline binding
//! - [`skin`] - Skin data, metadata derivation, and the binary codec
//!
//! ## Example
//!
//! ```ignore
//! use rwskin::prelude::*;
//!
//! let natives = NativeCodecs::new();
//! let codec = SkinCodec::new(FormatVersion::new(0x36003), &natives);
//!
//! let mut geometry = Geometry::new(num_vertices);
//! codec.read(&mut reader, chunk_len, &mut geometry)?;
//! ```

pub mod object;
pub mod platform;
pub mod skin;
pub mod stream;
pub mod util;

// Re-export commonly used types
pub use object::{Atomic, Geometry, NativeInstance};
pub use platform::{
    bind_skinned_instances, set_pipeline, NativeCodecs, NativeSkinCodec, PipelineHandle,
    PipelineTable, Platform,
};
pub use skin::{FormatVersion, Skin, SkinCodec, SkinSize};
pub use util::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::object::{Atomic, Geometry, NativeInstance};
    pub use crate::platform::{
        bind_skinned_instances, set_pipeline, NativeCodecs, NativeSkinCodec, PipelineHandle,
        PipelineTable, Platform,
    };
    pub use crate::skin::{FormatVersion, Skin, SkinCodec, SkinSize};
    pub use crate::util::{Error, Result};
}
