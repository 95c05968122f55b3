//! Platform tags and dispatch to platform-native skin codecs.
//!
//! A geometry that was instanced for a specific platform carries its skin in
//! a native encoding owned by that platform's module. The generic codec only
//! dispatches: PS2, Xbox and WDGL data is handed to a registered
//! [`NativeSkinCodec`], anything else is an explicit
//! [`Error::UnsupportedNativePlatform`].

mod pipeline;

pub use pipeline::*;

use std::fmt;
use std::io::{Read, Write};

use crate::object::Geometry;
use crate::util::{Error, Result};

/// Target platform of a native instanced representation, or of the running
/// engine when selecting render pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// No platform (default pipelines).
    Null,
    /// PlayStation 2.
    Ps2,
    /// Xbox.
    Xbox,
    /// Direct3D 8.
    D3d8,
    /// Direct3D 9.
    D3d9,
    /// WarDrum OpenGL.
    Wdgl,
    /// OpenGL 3.
    Gl3,
    /// Platform-independent instancing.
    Generic,
}

impl Platform {
    /// All platforms, in table order.
    pub const ALL: [Platform; 8] = [
        Platform::Null,
        Platform::Ps2,
        Platform::Xbox,
        Platform::D3d8,
        Platform::D3d9,
        Platform::Wdgl,
        Platform::Gl3,
        Platform::Generic,
    ];

    /// Number of platforms.
    pub const COUNT: usize = Self::ALL.len();

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Null => "null",
            Platform::Ps2 => "PS2",
            Platform::Xbox => "Xbox",
            Platform::D3d8 => "D3D8",
            Platform::D3d9 => "D3D9",
            Platform::Wdgl => "WDGL",
            Platform::Gl3 => "GL3",
            Platform::Generic => "generic",
        };
        f.write_str(name)
    }
}

/// Codec for a platform-native skin encoding.
///
/// Implemented by platform modules; same `(stream, length, object)` contract
/// as the generic codec. `len` is the payload length recorded by the
/// enclosing container.
pub trait NativeSkinCodec {
    /// Read a native skin payload and attach it to the geometry.
    fn read_native(&self, stream: &mut dyn Read, len: u32, geometry: &mut Geometry) -> Result<()>;

    /// Write the geometry's native skin payload.
    fn write_native(&self, stream: &mut dyn Write, len: u32, geometry: &Geometry) -> Result<()>;

    /// Size of the native skin payload in bytes.
    fn size_native(&self, geometry: &Geometry) -> Result<u32>;
}

/// Registry of native skin codecs, one per platform that has a native skin
/// encoding. Built once before loading begins and passed by reference.
#[derive(Default)]
pub struct NativeCodecs {
    ps2: Option<Box<dyn NativeSkinCodec>>,
    xbox: Option<Box<dyn NativeSkinCodec>>,
    wdgl: Option<Box<dyn NativeSkinCodec>>,
}

impl NativeCodecs {
    /// Empty registry; every native platform is unsupported.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the PS2 native codec.
    pub fn with_ps2(mut self, codec: impl NativeSkinCodec + 'static) -> Self {
        self.ps2 = Some(Box::new(codec));
        self
    }

    /// Register the Xbox native codec.
    pub fn with_xbox(mut self, codec: impl NativeSkinCodec + 'static) -> Self {
        self.xbox = Some(Box::new(codec));
        self
    }

    /// Register the WDGL native codec.
    pub fn with_wdgl(mut self, codec: impl NativeSkinCodec + 'static) -> Self {
        self.wdgl = Some(Box::new(codec));
        self
    }

    /// Look up the codec for a platform's native skin encoding.
    ///
    /// Only PS2, Xbox and WDGL have one; any other tag, or a supported tag
    /// whose platform module was never registered, is an error.
    pub fn codec_for(&self, platform: Platform) -> Result<&dyn NativeSkinCodec> {
        let slot = match platform {
            Platform::Ps2 => self.ps2.as_deref(),
            Platform::Xbox => self.xbox.as_deref(),
            Platform::Wdgl => self.wdgl.as_deref(),
            Platform::Null
            | Platform::D3d8
            | Platform::D3d9
            | Platform::Gl3
            | Platform::Generic => None,
        };
        slot.ok_or(Error::UnsupportedNativePlatform(platform))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NopCodec;

    impl NativeSkinCodec for NopCodec {
        fn read_native(&self, _: &mut dyn Read, _: u32, _: &mut Geometry) -> Result<()> {
            Ok(())
        }
        fn write_native(&self, _: &mut dyn Write, _: u32, _: &Geometry) -> Result<()> {
            Ok(())
        }
        fn size_native(&self, _: &Geometry) -> Result<u32> {
            Ok(0)
        }
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Platform::Ps2.to_string(), "PS2");
        assert_eq!(Platform::Wdgl.to_string(), "WDGL");
        assert_eq!(Platform::Null.to_string(), "null");
    }

    #[test]
    fn test_registered_lookup() {
        let codecs = NativeCodecs::new().with_ps2(NopCodec);
        assert!(codecs.codec_for(Platform::Ps2).is_ok());
    }

    #[test]
    fn test_unregistered_is_unsupported() {
        let codecs = NativeCodecs::new();
        assert!(matches!(
            codecs.codec_for(Platform::Ps2),
            Err(Error::UnsupportedNativePlatform(Platform::Ps2))
        ));
    }

    #[test]
    fn test_unknown_tag_is_unsupported() {
        let codecs = NativeCodecs::new().with_ps2(NopCodec).with_xbox(NopCodec);
        for platform in [Platform::Gl3, Platform::D3d8, Platform::Generic] {
            assert!(matches!(
                codecs.codec_for(platform),
                Err(Error::UnsupportedNativePlatform(p)) if p == platform
            ));
        }
    }
}
