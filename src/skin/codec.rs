//! Binary codec for the skin chunk payload.
//!
//! Two on-disk layouts share the 4-byte header; a zero in the second header
//! byte marks the old layout, which stores no skin metadata and carries a
//! filler word before each matrix. See the `format` module for the layout
//! constants and the version threshold.

use std::io::{Read, Write};

use tracing::{debug, trace};

use super::format::*;
use super::Skin;
use crate::object::Geometry;
use crate::platform::{NativeCodecs, Platform};
use crate::stream::{IStream, OStream};
use crate::util::{Error, Result};

/// Result of a skin size query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkinSize {
    /// The geometry has no skin attached; nothing will be streamed.
    Absent,
    /// The size cannot be precomputed; the payload must be streamed to find
    /// out. Defined result for D3D8/D3D9 native data, not an error.
    Unknown,
    /// Exact payload size in bytes.
    Bytes(u32),
}

/// Reads, writes and sizes skin chunk payloads.
///
/// Carries the container format version and the registered native codecs as
/// explicit configuration; construct one per stream operation or share one
/// across a load.
pub struct SkinCodec<'a> {
    version: FormatVersion,
    natives: &'a NativeCodecs,
}

impl<'a> SkinCodec<'a> {
    /// Codec for the given container version and native codec registry.
    pub fn new(version: FormatVersion, natives: &'a NativeCodecs) -> Self {
        Self { version, natives }
    }

    /// Read a skin payload and attach it to the geometry.
    ///
    /// Natively instanced geometry is delegated whole to the platform codec.
    /// `len` is the payload length recorded by the enclosing container,
    /// forwarded to native codecs. On any error nothing is attached.
    pub fn read<R: Read>(&self, reader: &mut R, len: u32, geometry: &mut Geometry) -> Result<()> {
        if let Some(platform) = geometry.native().map(|n| n.platform()) {
            debug!(%platform, len, "delegating skin read to native codec");
            return self
                .natives
                .codec_for(platform)?
                .read_native(reader, len, geometry);
        }

        let mut stream = IStream::new(reader);
        let mut header = [0u8; HEADER_SIZE];
        stream.read_bytes(&mut header)?;
        let num_bones = header[0];
        // The second header byte is zero in streams that predate skin
        // metadata; those need the metadata derived after reading.
        let old_format = header[1] == 0;
        trace!(
            num_bones,
            num_used_bones = header[1],
            num_weights = header[2],
            old_format,
            "skin header"
        );

        if !old_format {
            if header[1] > num_bones {
                return Err(Error::invalid(format!(
                    "used bone count {} exceeds bone count {}",
                    header[1], num_bones
                )));
            }
            if header[2] as usize > MAX_WEIGHTS_PER_VERTEX || header[2] == 0 {
                return Err(Error::invalid(format!(
                    "weight count {} outside [1, {}]",
                    header[2], MAX_WEIGHTS_PER_VERTEX
                )));
            }
        }

        // Old format: reserve one used-bone slot per bone, an upper bound for
        // the list derived below.
        let num_used_bones = if old_format { num_bones } else { header[1] };
        let mut skin = Skin::new(num_bones, num_used_bones, geometry.num_vertices());
        skin.set_num_weights(header[2]);

        if !old_format {
            stream.read_bytes(skin.used_bones_mut())?;
        }
        if geometry.num_vertices() > 0 {
            stream.read_bytes(bytemuck::cast_slice_mut(skin.indices_mut()))?;
            stream.read_f32s(bytemuck::cast_slice_mut(skin.weights_mut()))?;
        }
        for bone in 0..num_bones as usize {
            if old_format {
                stream.skip(OLD_FORMAT_FILLER_SIZE as u64)?;
            }
            stream.read_f32s(&mut skin.inverse_matrices_mut()[bone * 16..bone * 16 + 16])?;
        }

        if old_format {
            skin.find_num_weights();
            skin.find_used_bones();
        } else {
            stream.skip(NEW_FORMAT_TRAILER_SIZE as u64)?;
        }

        geometry.set_skin(skin);
        Ok(())
    }

    /// Write the geometry's skin payload.
    ///
    /// The layout follows the codec's format version, not anything stored in
    /// the record. Natively instanced geometry is delegated whole to the
    /// platform codec.
    pub fn write<W: Write>(&self, writer: &mut W, len: u32, geometry: &Geometry) -> Result<()> {
        if let Some(platform) = geometry.native().map(|n| n.platform()) {
            debug!(%platform, len, "delegating skin write to native codec");
            return self
                .natives
                .codec_for(platform)?
                .write_native(writer, len, geometry);
        }

        let skin = geometry
            .skin()
            .ok_or_else(|| Error::invalid("geometry has no skin to write"))?;
        let old_format = self.version.is_old_format();

        let mut stream = OStream::new(writer);
        let header = if old_format {
            [skin.num_bones(), 0, 0, 0]
        } else {
            [
                skin.num_bones(),
                skin.num_used_bones(),
                skin.num_weights(),
                0,
            ]
        };
        stream.write_bytes(&header)?;

        if !old_format {
            stream.write_bytes(skin.used_bones())?;
        }
        stream.write_bytes(bytemuck::cast_slice(skin.indices()))?;
        stream.write_f32s(bytemuck::cast_slice(skin.weights()))?;
        for bone in 0..skin.num_bones() as usize {
            if old_format {
                stream.write_u32(OLD_FORMAT_FILLER)?;
            }
            stream.write_f32s(&skin.inverse_matrices()[bone * 16..bone * 16 + 16])?;
        }

        if !old_format {
            stream.write_bytes(&[0u8; NEW_FORMAT_TRAILER_SIZE])?;
        }
        Ok(())
    }

    /// Size of the geometry's skin payload as it would be written.
    pub fn size(&self, geometry: &Geometry) -> Result<SkinSize> {
        if let Some(platform) = geometry.native().map(|n| n.platform()) {
            return match platform {
                Platform::Ps2 | Platform::Xbox | Platform::Wdgl => self
                    .natives
                    .codec_for(platform)?
                    .size_native(geometry)
                    .map(SkinSize::Bytes),
                // These natives interleave skin data with the instanced
                // vertex buffers; the payload must be streamed to be sized.
                Platform::D3d8 | Platform::D3d9 => Ok(SkinSize::Unknown),
                other => Err(Error::UnsupportedNativePlatform(other)),
            };
        }

        let Some(skin) = geometry.skin() else {
            return Ok(SkinSize::Absent);
        };

        let mut size = HEADER_SIZE as u32
            + geometry.num_vertices() * (VERTEX_INDICES_SIZE + VERTEX_WEIGHTS_SIZE) as u32
            + skin.num_bones() as u32 * MATRIX_SIZE as u32;
        if self.version.is_old_format() {
            size += skin.num_bones() as u32 * OLD_FORMAT_FILLER_SIZE as u32;
        } else {
            size += skin.num_used_bones() as u32 + NEW_FORMAT_TRAILER_SIZE as u32;
        }
        Ok(SkinSize::Bytes(size))
    }
}
