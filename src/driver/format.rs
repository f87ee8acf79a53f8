//! Pixel format metadata.

use ash::vk;

const DEPTH_STENCIL: vk::ImageAspectFlags = vk::ImageAspectFlags::from_raw(
    vk::ImageAspectFlags::DEPTH.as_raw() | vk::ImageAspectFlags::STENCIL.as_raw(),
);
const PLANES_2: vk::ImageAspectFlags = vk::ImageAspectFlags::from_raw(
    vk::ImageAspectFlags::PLANE_0.as_raw() | vk::ImageAspectFlags::PLANE_1.as_raw(),
);
const PLANES_3: vk::ImageAspectFlags =
    vk::ImageAspectFlags::from_raw(PLANES_2.as_raw() | vk::ImageAspectFlags::PLANE_2.as_raw());

/// Properties of a pixel format which are fixed by the Vulkan specification.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct FormatInfo {
    /// The aspects an image of this format is composed of.
    pub aspect_mask: vk::ImageAspectFlags,

    /// Width and height of a texel block; `(1, 1)` for uncompressed formats.
    pub block_extent: (u32, u32),

    /// Size of a texel block, in bytes.
    pub block_size: u32,

    /// The number of memory planes; greater than one for Y′CbCr formats.
    pub plane_count: u32,
}

impl FormatInfo {
    const fn color(block_size: u32) -> Self {
        Self {
            aspect_mask: vk::ImageAspectFlags::COLOR,
            block_extent: (1, 1),
            block_size,
            plane_count: 1,
        }
    }

    const fn compressed(block_size: u32) -> Self {
        Self {
            aspect_mask: vk::ImageAspectFlags::COLOR,
            block_extent: (4, 4),
            block_size,
            plane_count: 1,
        }
    }

    const fn depth_stencil(aspect_mask: vk::ImageAspectFlags, block_size: u32) -> Self {
        Self {
            aspect_mask,
            block_extent: (1, 1),
            block_size,
            plane_count: 1,
        }
    }

    const fn planar(aspect_mask: vk::ImageAspectFlags, plane_count: u32) -> Self {
        Self {
            aspect_mask,
            block_extent: (1, 1),
            block_size: 0,
            plane_count,
        }
    }
}

/// Looks up the metadata of a pixel format.
///
/// This is a pure table lookup with no failure mode; formats not listed below
/// are treated as single-plane color formats of unknown block size.
pub const fn format_info(fmt: vk::Format) -> FormatInfo {
    match fmt {
        vk::Format::R8_UNORM | vk::Format::R8_SNORM | vk::Format::R8_UINT | vk::Format::R8_SINT => {
            FormatInfo::color(1)
        }
        vk::Format::R8G8_UNORM | vk::Format::R8G8_SNORM | vk::Format::R16_SFLOAT => {
            FormatInfo::color(2)
        }
        vk::Format::R8G8B8A8_UNORM
        | vk::Format::R8G8B8A8_SRGB
        | vk::Format::B8G8R8A8_UNORM
        | vk::Format::B8G8R8A8_SRGB
        | vk::Format::A2B10G10R10_UNORM_PACK32
        | vk::Format::B10G11R11_UFLOAT_PACK32
        | vk::Format::R16G16_SFLOAT
        | vk::Format::R32_UINT
        | vk::Format::R32_SFLOAT => FormatInfo::color(4),
        vk::Format::R16G16B16A16_UNORM
        | vk::Format::R16G16B16A16_SFLOAT
        | vk::Format::R32G32_SFLOAT => FormatInfo::color(8),
        vk::Format::R32G32B32A32_UINT | vk::Format::R32G32B32A32_SFLOAT => FormatInfo::color(16),
        vk::Format::BC1_RGB_UNORM_BLOCK
        | vk::Format::BC1_RGB_SRGB_BLOCK
        | vk::Format::BC1_RGBA_UNORM_BLOCK
        | vk::Format::BC1_RGBA_SRGB_BLOCK
        | vk::Format::BC4_UNORM_BLOCK
        | vk::Format::BC4_SNORM_BLOCK => FormatInfo::compressed(8),
        vk::Format::BC2_UNORM_BLOCK
        | vk::Format::BC2_SRGB_BLOCK
        | vk::Format::BC3_UNORM_BLOCK
        | vk::Format::BC3_SRGB_BLOCK
        | vk::Format::BC5_UNORM_BLOCK
        | vk::Format::BC5_SNORM_BLOCK
        | vk::Format::BC6H_UFLOAT_BLOCK
        | vk::Format::BC6H_SFLOAT_BLOCK
        | vk::Format::BC7_UNORM_BLOCK
        | vk::Format::BC7_SRGB_BLOCK => FormatInfo::compressed(16),
        vk::Format::D16_UNORM => FormatInfo::depth_stencil(vk::ImageAspectFlags::DEPTH, 2),
        vk::Format::X8_D24_UNORM_PACK32 | vk::Format::D32_SFLOAT => {
            FormatInfo::depth_stencil(vk::ImageAspectFlags::DEPTH, 4)
        }
        vk::Format::S8_UINT => FormatInfo::depth_stencil(vk::ImageAspectFlags::STENCIL, 1),
        vk::Format::D16_UNORM_S8_UINT | vk::Format::D24_UNORM_S8_UINT => {
            FormatInfo::depth_stencil(DEPTH_STENCIL, 4)
        }
        vk::Format::D32_SFLOAT_S8_UINT => FormatInfo::depth_stencil(DEPTH_STENCIL, 8),
        vk::Format::G8_B8R8_2PLANE_420_UNORM | vk::Format::G8_B8R8_2PLANE_422_UNORM => {
            FormatInfo::planar(PLANES_2, 2)
        }
        vk::Format::G8_B8_R8_3PLANE_420_UNORM | vk::Format::G8_B8_R8_3PLANE_422_UNORM => {
            FormatInfo::planar(PLANES_3, 3)
        }
        _ => FormatInfo::color(0),
    }
}

/// Returns the full aspect mask of the given format.
pub const fn format_aspect_mask(fmt: vk::Format) -> vk::ImageAspectFlags {
    format_info(fmt).aspect_mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_formats() {
        let info = format_info(vk::Format::R8G8B8A8_UNORM);

        assert_eq!(info.aspect_mask, vk::ImageAspectFlags::COLOR);
        assert_eq!(info.block_extent, (1, 1));
        assert_eq!(info.block_size, 4);
        assert_eq!(info.plane_count, 1);
    }

    #[test]
    fn depth_stencil_formats() {
        assert_eq!(
            format_aspect_mask(vk::Format::D32_SFLOAT),
            vk::ImageAspectFlags::DEPTH
        );
        assert_eq!(
            format_aspect_mask(vk::Format::S8_UINT),
            vk::ImageAspectFlags::STENCIL
        );
        assert_eq!(
            format_aspect_mask(vk::Format::D24_UNORM_S8_UINT),
            vk::ImageAspectFlags::DEPTH | vk::ImageAspectFlags::STENCIL
        );
        assert_eq!(format_info(vk::Format::D32_SFLOAT_S8_UINT).block_size, 8);
    }

    #[test]
    fn compressed_formats() {
        let info = format_info(vk::Format::BC1_RGBA_UNORM_BLOCK);

        assert_eq!(info.block_extent, (4, 4));
        assert_eq!(info.block_size, 8);
        assert_eq!(format_info(vk::Format::BC7_SRGB_BLOCK).block_size, 16);
    }

    #[test]
    fn planar_formats() {
        assert_eq!(format_info(vk::Format::G8_B8R8_2PLANE_420_UNORM).plane_count, 2);
        assert_eq!(format_info(vk::Format::G8_B8_R8_3PLANE_420_UNORM).plane_count, 3);
    }
}
