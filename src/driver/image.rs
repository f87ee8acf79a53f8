//! Image resource types

use {
    super::{device::Device, format, DriverError},
    ash::vk,
    derive_builder::{Builder, UninitializedFieldError},
    gpu_allocator::{
        vulkan::{Allocation, AllocationCreateDesc, AllocationScheme},
        MemoryLocation,
    },
    log::{trace, warn},
    std::{
        fmt::{Debug, Formatter},
        ops::Deref,
        ptr::NonNull,
        sync::Arc,
        thread::panicking,
    },
};

fn memory_location(mem_flags: vk::MemoryPropertyFlags) -> MemoryLocation {
    if mem_flags.contains(vk::MemoryPropertyFlags::HOST_VISIBLE) {
        if mem_flags.contains(vk::MemoryPropertyFlags::HOST_CACHED) {
            MemoryLocation::GpuToCpu
        } else {
            MemoryLocation::CpuToGpu
        }
    } else {
        MemoryLocation::GpuOnly
    }
}

/// Smart pointer handle to an [image] object.
///
/// Also contains information about the object.
///
/// ## `Deref` behavior
///
/// `Image` automatically dereferences to [`vk::Image`] (via the [`Deref`] trait), so you can
/// call `vk::Image`'s methods on a value of type `Image`. To avoid name clashes with `vk::Image`'s
/// methods, the methods of `Image` itself are associated functions, called using
/// [fully qualified syntax]:
///
/// ```no_run
/// # use std::sync::Arc;
/// # use ash::vk;
/// # use vexel::driver::{Device, DeviceInfo, DriverError, Image, ImageInfo};
/// # fn main() -> Result<(), DriverError> {
/// # let device = Arc::new(Device::create_headless(DeviceInfo::default())?);
/// # let info = ImageInfo::image_1d(1, vk::Format::R8_UINT, vk::ImageUsageFlags::STORAGE);
/// # let my_image = Image::create(&device, info, vk::MemoryPropertyFlags::DEVICE_LOCAL)?;
/// let ptr = Image::mapped_ptr(&my_image, 0);
/// # Ok(()) }
/// ```
///
/// [image]: https://registry.khronos.org/vulkan/specs/1.3-extensions/man/html/VkImage.html
/// [deref]: core::ops::Deref
/// [fully qualified syntax]: https://doc.rust-lang.org/book/ch19-03-advanced-traits.html#fully-qualified-syntax-for-disambiguation-calling-methods-with-the-same-name
pub struct Image {
    allocation: Option<Allocation>, // None when we don't own the image (imported handles)
    pub(super) device: Arc<Device>,
    image: vk::Image,

    /// Information used to create this object.
    pub info: ImageInfo,

    /// The memory property flags this image was allocated with.
    ///
    /// Empty for imported images; use this to determine whether the image is mapped into host
    /// memory.
    pub mem_flags: vk::MemoryPropertyFlags,

    /// A name for debugging purposes.
    pub name: Option<String>,
}

impl Image {
    /// Creates a new image on the given device and binds freshly allocated device memory to it.
    ///
    /// The memory type is chosen to satisfy `mem_flags`; pass
    /// [`vk::MemoryPropertyFlags::HOST_VISIBLE`] to create an image which can be accessed with
    /// [`Image::mapped_ptr`].
    ///
    /// # Examples
    ///
    /// Basic usage:
    ///
    /// ```no_run
    /// # use std::sync::Arc;
    /// # use ash::vk;
    /// # use vexel::driver::{Device, DeviceInfo, DriverError, Image, ImageInfo};
    /// # fn main() -> Result<(), DriverError> {
    /// # let device = Arc::new(Device::create_headless(DeviceInfo::default())?);
    /// let info = ImageInfo::image_2d(32, 32, vk::Format::R8G8B8A8_UNORM, vk::ImageUsageFlags::SAMPLED);
    /// let image = Image::create(&device, info, vk::MemoryPropertyFlags::DEVICE_LOCAL)?;
    ///
    /// assert_ne!(*image, vk::Image::null());
    /// assert_eq!(image.info.width, 32);
    /// assert_eq!(image.info.height, 32);
    /// # Ok(()) }
    /// ```
    #[profiling::function]
    pub fn create(
        device: &Arc<Device>,
        info: impl Into<ImageInfo>,
        mem_flags: vk::MemoryPropertyFlags,
    ) -> Result<Self, DriverError> {
        let info: ImageInfo = info.into();

        trace!("create");

        assert!(
            !info.usage.is_empty(),
            "Unspecified image usage {:?}",
            info.usage
        );
        assert!(
            info.mip_level_count <= info.max_mip_level_count(),
            "Mip level count {} exceeds the {} levels supported by a {}x{}x{} extent",
            info.mip_level_count,
            info.max_mip_level_count(),
            info.width,
            info.height,
            info.depth,
        );

        let device = Arc::clone(device);
        let mut flags = info.flags;

        if !info.view_fmts.is_empty() {
            flags |= vk::ImageCreateFlags::MUTABLE_FORMAT;
        }

        let mut format_list_info =
            vk::ImageFormatListCreateInfo::default().view_formats(&info.view_fmts);
        let mut create_info = vk::ImageCreateInfo::default()
            .flags(flags)
            .image_type(info.ty)
            .format(info.fmt)
            .extent(vk::Extent3D {
                width: info.width,
                height: info.height,
                depth: info.depth,
            })
            .mip_levels(info.mip_level_count)
            .array_layers(info.array_layer_count)
            .samples(info.sample_count.into())
            .tiling(info.tiling)
            .usage(info.usage)
            .sharing_mode(vk::SharingMode::EXCLUSIVE)
            .initial_layout(vk::ImageLayout::UNDEFINED);

        if !info.view_fmts.is_empty() {
            create_info = create_info.push_next(&mut format_list_info);
        }

        let image = unsafe {
            device.create_image(&create_info, None).map_err(|err| {
                warn!("unable to create image: {err}");

                DriverError::Device(err)
            })?
        };
        let requirements = unsafe { device.get_image_memory_requirements(image) };
        let allocation = {
            profiling::scope!("allocate");

            #[cfg_attr(not(feature = "parking_lot"), allow(unused_mut))]
            let mut allocator = device.allocator.lock();

            #[cfg(not(feature = "parking_lot"))]
            let mut allocator = allocator.unwrap();

            allocator
                .allocate(&AllocationCreateDesc {
                    name: "image",
                    requirements,
                    location: memory_location(mem_flags),
                    linear: info.tiling == vk::ImageTiling::LINEAR,
                    allocation_scheme: AllocationScheme::GpuAllocatorManaged,
                })
                .map_err(|err| {
                    warn!("unable to allocate image memory: {err}");

                    unsafe {
                        device.destroy_image(image, None);
                    }

                    DriverError::Allocation
                })
                .and_then(|allocation| {
                    if let Err(err) = unsafe {
                        device.bind_image_memory(image, allocation.memory(), allocation.offset())
                    } {
                        warn!("unable to bind image memory: {err}");

                        if let Err(err) = allocator.free(allocation) {
                            warn!("unable to free image allocation: {err}")
                        }

                        unsafe {
                            device.destroy_image(image, None);
                        }

                        Err(DriverError::Device(err))
                    } else {
                        Ok(allocation)
                    }
                })
        }?;

        debug_assert_ne!(image, vk::Image::null());

        Ok(Self {
            allocation: Some(allocation),
            device,
            image,
            info,
            mem_flags,
            name: None,
        })
    }

    /// Wraps a Vulkan image created by some other library.
    ///
    /// Make sure to provide the correct image properties, since otherwise some image operations
    /// may fail. The image is not destroyed automatically on drop, unlike images created through
    /// the [`Image::create`] function.
    #[profiling::function]
    pub fn from_raw(device: &Arc<Device>, image: vk::Image, info: impl Into<ImageInfo>) -> Self {
        let device = Arc::clone(device);
        let info = info.into();

        Self {
            allocation: None,
            device,
            image,
            info,
            mem_flags: vk::MemoryPropertyFlags::empty(),
            name: None,
        }
    }

    /// Returns a pointer into the mapped memory region of this image at the given byte offset.
    ///
    /// Returns `None` unless the image owns its allocation and was created with
    /// [`vk::MemoryPropertyFlags::HOST_VISIBLE`]; this never aliases memory of any other
    /// resource.
    pub fn mapped_ptr(this: &Self, offset: usize) -> Option<NonNull<u8>> {
        if !this.mem_flags.contains(vk::MemoryPropertyFlags::HOST_VISIBLE) {
            warn!("mapped_ptr called on a non host-visible image");

            return None;
        }

        let allocation = this.allocation.as_ref()?;

        debug_assert!((offset as u64) < allocation.size());

        let ptr = allocation.mapped_ptr()?;

        NonNull::new(unsafe { ptr.as_ptr().cast::<u8>().add(offset) })
    }

    /// Queries the memory layout of a subresource.
    ///
    /// Can be used to retrieve the exact offset and pitches of a subresource of a mapped image
    /// with [`vk::ImageTiling::LINEAR`]; for any other tiling the result is driver-defined.
    pub fn subresource_layout(
        this: &Self,
        subresource: vk::ImageSubresource,
    ) -> vk::SubresourceLayout {
        unsafe {
            this.device
                .get_image_subresource_layout(this.image, subresource)
        }
    }

    #[profiling::function]
    fn drop_allocation(this: &Self, allocation: Allocation) {
        unsafe {
            this.device.destroy_image(this.image, None);
        }

        {
            profiling::scope!("deallocate");

            #[cfg_attr(not(feature = "parking_lot"), allow(unused_mut))]
            let mut allocator = this.device.allocator.lock();

            #[cfg(not(feature = "parking_lot"))]
            let mut allocator = allocator.unwrap();

            allocator.free(allocation)
        }
        .unwrap_or_else(|err| warn!("unable to free image allocation: {err}"));
    }
}

impl Debug for Image {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{} ({:?})", name, self.image)
        } else {
            write!(f, "{:?}", self.image)
        }
    }
}

impl Deref for Image {
    type Target = vk::Image;

    fn deref(&self) -> &Self::Target {
        &self.image
    }
}

impl Drop for Image {
    // This function is not profiled because drop_allocation is
    fn drop(&mut self) {
        if panicking() {
            return;
        }

        // When our allocation is some we allocated ourself; otherwise somebody else owns this
        // image and we must not destroy it
        if let Some(allocation) = self.allocation.take() {
            Self::drop_allocation(self, allocation);
        }
    }
}

/// Information used to create an [`Image`] instance.
#[derive(Builder, Clone, Debug, Eq, Hash, PartialEq)]
#[builder(
    build_fn(private, name = "fallible_build", error = "ImageInfoBuilderError"),
    derive(Clone, Debug),
    pattern = "owned"
)]
#[non_exhaustive]
pub struct ImageInfo {
    /// The access patterns the image contents may be subject to.
    #[builder(default)]
    pub access_mask: vk::AccessFlags,

    /// The number of layers in the image.
    #[builder(default = "1")]
    pub array_layer_count: u32,

    /// Image extent of the Z axis, when describing a three dimensional image.
    pub depth: u32,

    /// A bitmask describing additional parameters of the image.
    #[builder(default)]
    pub flags: vk::ImageCreateFlags,

    /// The format and type of the texel blocks that will be contained in the image.
    pub fmt: vk::Format,

    /// Image extent of the Y axis, when describing a two or three dimensional image.
    pub height: u32,

    /// The layout the image is expected to be in between operations.
    ///
    /// An image declared as [`vk::ImageLayout::GENERAL`] is usable under any access pattern
    /// without layout transitions; see [`ImageInfo::pick_layout`].
    #[builder(default)]
    pub layout: vk::ImageLayout,

    /// The number of levels of detail available for minified sampling of the image.
    #[builder(default = "1")]
    pub mip_level_count: u32,

    /// Specifies the number of [samples per texel].
    ///
    /// [samples per texel]: https://registry.khronos.org/vulkan/specs/1.3-extensions/html/vkspec.html#primsrast-multisampling
    #[builder(default = "SampleCount::Type1")]
    pub sample_count: SampleCount,

    /// The pipeline stages that may access the contents of the image.
    #[builder(default)]
    pub stage_mask: vk::PipelineStageFlags,

    /// Specifies the tiling arrangement of the texel blocks in memory.
    ///
    /// The default value is [`vk::ImageTiling::OPTIMAL`].
    #[builder(default = "vk::ImageTiling::OPTIMAL")]
    pub tiling: vk::ImageTiling,

    /// The basic dimensionality of the image.
    ///
    /// Layers in array textures do not count as a dimension for the purposes of the image type.
    pub ty: vk::ImageType,

    /// A bitmask describing the intended usage of the image.
    #[builder(default)]
    pub usage: vk::ImageUsageFlags,

    /// Formats the image may additionally be viewed as.
    ///
    /// When non-empty the image is created with [`vk::ImageCreateFlags::MUTABLE_FORMAT`]
    /// semantics and the list is passed to the driver via `VkImageFormatListCreateInfo`.
    #[builder(default)]
    pub view_fmts: Vec<vk::Format>,

    /// Image extent of the X axis.
    pub width: u32,
}

impl ImageInfo {
    /// Specifies a cube image.
    #[inline(always)]
    pub const fn cube(size: u32, fmt: vk::Format, usage: vk::ImageUsageFlags) -> ImageInfo {
        let mut res = Self::new(vk::ImageType::TYPE_2D, size, size, 1, 6, fmt, usage);
        res.flags = vk::ImageCreateFlags::from_raw(
            vk::ImageCreateFlags::CUBE_COMPATIBLE.as_raw() | res.flags.as_raw(),
        );

        res
    }

    /// Specifies a one-dimensional image.
    #[inline(always)]
    pub const fn image_1d(size: u32, fmt: vk::Format, usage: vk::ImageUsageFlags) -> ImageInfo {
        Self::new(vk::ImageType::TYPE_1D, size, 1, 1, 1, fmt, usage)
    }

    /// Specifies a two-dimensional image.
    #[inline(always)]
    pub const fn image_2d(
        width: u32,
        height: u32,
        fmt: vk::Format,
        usage: vk::ImageUsageFlags,
    ) -> ImageInfo {
        Self::new(vk::ImageType::TYPE_2D, width, height, 1, 1, fmt, usage)
    }

    /// Specifies a two-dimensional image array.
    #[inline(always)]
    pub const fn image_2d_array(
        width: u32,
        height: u32,
        array_layer_count: u32,
        fmt: vk::Format,
        usage: vk::ImageUsageFlags,
    ) -> ImageInfo {
        Self::new(
            vk::ImageType::TYPE_2D,
            width,
            height,
            1,
            array_layer_count,
            fmt,
            usage,
        )
    }

    /// Specifies a three-dimensional image.
    #[inline(always)]
    pub const fn image_3d(
        width: u32,
        height: u32,
        depth: u32,
        fmt: vk::Format,
        usage: vk::ImageUsageFlags,
    ) -> ImageInfo {
        Self::new(vk::ImageType::TYPE_3D, width, height, depth, 1, fmt, usage)
    }

    #[inline(always)]
    const fn new(
        ty: vk::ImageType,
        width: u32,
        height: u32,
        depth: u32,
        array_layer_count: u32,
        fmt: vk::Format,
        usage: vk::ImageUsageFlags,
    ) -> Self {
        Self {
            ty,
            width,
            height,
            depth,
            array_layer_count,
            fmt,
            usage,
            access_mask: vk::AccessFlags::empty(),
            flags: vk::ImageCreateFlags::empty(),
            layout: vk::ImageLayout::UNDEFINED,
            mip_level_count: 1,
            sample_count: SampleCount::Type1,
            stage_mask: vk::PipelineStageFlags::empty(),
            tiling: vk::ImageTiling::OPTIMAL,
            view_fmts: Vec::new(),
        }
    }

    /// Provides an `ImageViewInfo` for this format, type, aspect, array layers, and mip levels.
    pub fn default_view_info(&self) -> super::ImageViewInfo {
        self.into()
    }

    /// Looks up the metadata of this image's format.
    pub const fn format_info(&self) -> super::FormatInfo {
        format::format_info(self.fmt)
    }

    /// Returns `true` if this image is an array.
    pub fn is_array(&self) -> bool {
        self.array_layer_count > 1
    }

    /// Returns `true` if this image is a cube or cube array.
    pub fn is_cube(&self) -> bool {
        self.ty == vk::ImageType::TYPE_2D
            && self.width == self.height
            && self.depth == 1
            && self.array_layer_count >= 6
            && self.flags.contains(vk::ImageCreateFlags::CUBE_COMPATIBLE)
    }

    /// Returns `true` if this image is a cube array.
    pub fn is_cube_array(&self) -> bool {
        self.is_cube() && self.array_layer_count > 6
    }

    /// Checks whether the given subresource is entirely covered by the given extent.
    ///
    /// This can be used to determine whether a write may treat the prior contents of a
    /// subresource as discardable instead of preserving them.
    pub fn is_full_subresource(
        &self,
        subresource: vk::ImageSubresourceLayers,
        extent: vk::Extent3D,
    ) -> bool {
        let level_extent = self.mip_level_extent(subresource.mip_level);

        subresource.aspect_mask == self.format_info().aspect_mask
            && extent.width == level_extent.width
            && extent.height == level_extent.height
            && extent.depth == level_extent.depth
    }

    /// Returns the highest number of mip levels an image of this extent may be created with.
    pub fn max_mip_level_count(&self) -> u32 {
        32 - self.width.max(self.height).max(self.depth).leading_zeros()
    }

    /// Returns the extent of the given mip level.
    ///
    /// Each axis is halved per level and clamps at one texel.
    pub fn mip_level_extent(&self, level: u32) -> vk::Extent3D {
        vk::Extent3D {
            width: self.width.checked_shr(level).unwrap_or(0).max(1),
            height: self.height.checked_shr(level).unwrap_or(0).max(1),
            depth: self.depth.checked_shr(level).unwrap_or(0).max(1),
        }
    }

    /// Picks a compatible layout for an operation which requests `layout`.
    ///
    /// An image declared layout-agnostic via [`vk::ImageLayout::GENERAL`] must never transition
    /// to a specific layout; callers that created it that way rely on it staying usable under any
    /// access pattern.
    pub fn pick_layout(&self, layout: vk::ImageLayout) -> vk::ImageLayout {
        if self.layout == vk::ImageLayout::GENERAL {
            vk::ImageLayout::GENERAL
        } else {
            layout
        }
    }

    /// Converts an `ImageInfo` into an `ImageInfoBuilder`.
    #[inline(always)]
    pub fn to_builder(self) -> ImageInfoBuilder {
        ImageInfoBuilder {
            access_mask: Some(self.access_mask),
            array_layer_count: Some(self.array_layer_count),
            depth: Some(self.depth),
            flags: Some(self.flags),
            fmt: Some(self.fmt),
            height: Some(self.height),
            layout: Some(self.layout),
            mip_level_count: Some(self.mip_level_count),
            sample_count: Some(self.sample_count),
            stage_mask: Some(self.stage_mask),
            tiling: Some(self.tiling),
            ty: Some(self.ty),
            usage: Some(self.usage),
            view_fmts: Some(self.view_fmts),
            width: Some(self.width),
        }
    }
}

impl From<ImageInfoBuilder> for ImageInfo {
    fn from(info: ImageInfoBuilder) -> Self {
        info.build()
    }
}

impl ImageInfoBuilder {
    /// Builds a new `ImageInfo`.
    ///
    /// # Panics
    ///
    /// If any of the following functions have not been called this function will panic:
    ///
    /// * `ty`
    /// * `fmt`
    /// * `width`
    /// * `height`
    /// * `depth`
    #[inline(always)]
    pub fn build(self) -> ImageInfo {
        match self.fallible_build() {
            Err(ImageInfoBuilderError(err)) => panic!("{err}"),
            Ok(info) => info,
        }
    }
}

#[derive(Debug)]
struct ImageInfoBuilderError(UninitializedFieldError);

impl From<UninitializedFieldError> for ImageInfoBuilderError {
    fn from(err: UninitializedFieldError) -> Self {
        Self(err)
    }
}

/// Specifies sample counts supported for an image used for storage operations.
///
/// Values must not exceed the device limits.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SampleCount {
    /// Single image sample. This is the usual mode.
    Type1,

    /// Multiple image samples.
    Type2,

    /// Multiple image samples.
    Type4,

    /// Multiple image samples.
    Type8,

    /// Multiple image samples.
    Type16,

    /// Multiple image samples.
    Type32,

    /// Multiple image samples.
    Type64,
}

impl SampleCount {
    /// Returns `true` when the value represents a single sample mode.
    pub fn is_single(self) -> bool {
        matches!(self, Self::Type1)
    }

    /// Returns `true` when the value represents a multiple sample mode.
    pub fn is_multiple(self) -> bool {
        !self.is_single()
    }
}

impl Default for SampleCount {
    fn default() -> Self {
        Self::Type1
    }
}

impl From<SampleCount> for vk::SampleCountFlags {
    fn from(sample_count: SampleCount) -> Self {
        match sample_count {
            SampleCount::Type1 => Self::TYPE_1,
            SampleCount::Type2 => Self::TYPE_2,
            SampleCount::Type4 => Self::TYPE_4,
            SampleCount::Type8 => Self::TYPE_8,
            SampleCount::Type16 => Self::TYPE_16,
            SampleCount::Type32 => Self::TYPE_32,
            SampleCount::Type64 => Self::TYPE_64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mip_level_extent_halves_and_clamps() {
        let info = ImageInfo::image_2d(
            37,
            19,
            vk::Format::R8G8B8A8_UNORM,
            vk::ImageUsageFlags::SAMPLED,
        );
        let extent = info.mip_level_extent(2);

        assert_eq!(extent.width, 9);
        assert_eq!(extent.height, 4);
        assert_eq!(extent.depth, 1);

        let extent = info.mip_level_extent(6);

        assert_eq!((extent.width, extent.height, extent.depth), (1, 1, 1));

        // Shifts past the word width still clamp at one texel
        let extent = info.mip_level_extent(40);

        assert_eq!((extent.width, extent.height, extent.depth), (1, 1, 1));
    }

    #[test]
    fn max_mip_level_count() {
        let image_2d = |width, height| {
            ImageInfo::image_2d(
                width,
                height,
                vk::Format::R8G8B8A8_UNORM,
                vk::ImageUsageFlags::SAMPLED,
            )
        };

        assert_eq!(image_2d(37, 19).max_mip_level_count(), 6);
        assert_eq!(image_2d(1, 1).max_mip_level_count(), 1);
        assert_eq!(image_2d(64, 64).max_mip_level_count(), 7);
        assert_eq!(image_2d(65, 1).max_mip_level_count(), 7);
    }

    #[test]
    fn pick_layout_honors_general_images() {
        let mut info = ImageInfo::image_2d(
            8,
            8,
            vk::Format::R8G8B8A8_UNORM,
            vk::ImageUsageFlags::STORAGE,
        );
        info.layout = vk::ImageLayout::GENERAL;

        assert_eq!(
            info.pick_layout(vk::ImageLayout::TRANSFER_DST_OPTIMAL),
            vk::ImageLayout::GENERAL
        );
        assert_eq!(
            info.pick_layout(vk::ImageLayout::SHADER_READ_ONLY_OPTIMAL),
            vk::ImageLayout::GENERAL
        );
    }

    #[test]
    fn pick_layout_passes_through_otherwise() {
        let mut info = ImageInfo::image_2d(
            8,
            8,
            vk::Format::R8G8B8A8_UNORM,
            vk::ImageUsageFlags::SAMPLED,
        );
        info.layout = vk::ImageLayout::SHADER_READ_ONLY_OPTIMAL;

        assert_eq!(
            info.pick_layout(vk::ImageLayout::TRANSFER_SRC_OPTIMAL),
            vk::ImageLayout::TRANSFER_SRC_OPTIMAL
        );
    }

    #[test]
    fn full_subresource_requires_full_aspect_and_extent() {
        let info = ImageInfo::image_2d(
            64,
            32,
            vk::Format::D24_UNORM_S8_UINT,
            vk::ImageUsageFlags::DEPTH_STENCIL_ATTACHMENT,
        );
        let subresource = |aspect_mask, mip_level| vk::ImageSubresourceLayers {
            aspect_mask,
            mip_level,
            base_array_layer: 0,
            layer_count: 1,
        };
        let full_aspect = vk::ImageAspectFlags::DEPTH | vk::ImageAspectFlags::STENCIL;
        let extent = |width, height| vk::Extent3D {
            width,
            height,
            depth: 1,
        };

        assert!(info.is_full_subresource(subresource(full_aspect, 0), extent(64, 32)));
        assert!(info.is_full_subresource(subresource(full_aspect, 1), extent(32, 16)));

        // Narrower aspect mask
        assert!(!info.is_full_subresource(
            subresource(vk::ImageAspectFlags::DEPTH, 0),
            extent(64, 32)
        ));

        // Extent mismatch
        assert!(!info.is_full_subresource(subresource(full_aspect, 0), extent(32, 32)));
        assert!(!info.is_full_subresource(subresource(full_aspect, 1), extent(64, 32)));
    }

    #[test]
    fn cube_images() {
        let info = ImageInfo::cube(
            16,
            vk::Format::R8G8B8A8_UNORM,
            vk::ImageUsageFlags::SAMPLED,
        );

        assert_eq!(info.array_layer_count, 6);
        assert!(info.flags.contains(vk::ImageCreateFlags::CUBE_COMPATIBLE));
        assert!(info.is_cube());
        assert!(!info.is_cube_array());

        let info = ImageInfo::image_2d_array(
            16,
            16,
            12,
            vk::Format::R8G8B8A8_UNORM,
            vk::ImageUsageFlags::SAMPLED,
        )
        .to_builder()
        .flags(vk::ImageCreateFlags::CUBE_COMPATIBLE)
        .build();

        assert!(info.is_cube_array());
    }

    #[test]
    fn builder_defaults() {
        let info = ImageInfoBuilder::default()
            .ty(vk::ImageType::TYPE_2D)
            .fmt(vk::Format::R8G8B8A8_UNORM)
            .width(8)
            .height(8)
            .depth(1)
            .build();

        assert_eq!(info.mip_level_count, 1);
        assert_eq!(info.array_layer_count, 1);
        assert_eq!(info.sample_count, SampleCount::Type1);
        assert_eq!(info.tiling, vk::ImageTiling::OPTIMAL);
        assert_eq!(info.layout, vk::ImageLayout::UNDEFINED);
        assert!(info.view_fmts.is_empty());
    }
}
