//! Image view resource types

use {
    super::{device::Device, format::format_aspect_mask, image::Image, DriverError, ImageInfo},
    ash::vk,
    derive_builder::{Builder, UninitializedFieldError},
    log::{trace, warn},
    std::{
        fmt::{Debug, Formatter},
        ops::Deref,
        sync::Arc,
        thread::panicking,
    },
};

#[cfg(feature = "parking_lot")]
use parking_lot::Mutex;

#[cfg(not(feature = "parking_lot"))]
use std::sync::Mutex;

/// Number of view dimensionalities defined by Vulkan; the handle table has one slot per
/// [`vk::ImageViewType`].
const VIEW_TYPE_COUNT: usize = vk::ImageViewType::CUBE_ARRAY.as_raw() as usize + 1;

/// A render target bound in this many consecutive frames is considered stable enough for
/// background pipeline compilation.
const RT_BINDING_WARM_FRAME_COUNT: u32 = 5;

fn view_type_index(ty: vk::ImageViewType) -> usize {
    let idx = ty.as_raw() as usize;

    debug_assert!(idx < VIEW_TYPE_COUNT);

    idx
}

/// Returns the layer count each view type should be created with, or `None` for view types which
/// are structurally incompatible with the image.
///
/// The requested view type determines the family of types materialized; array variants cover the
/// view's full layer range while non-array variants cover the first layer only. Cube variants
/// additionally require [`vk::ImageCreateFlags::CUBE_COMPATIBLE`] and a layer count divisible
/// into whole cubes; two-dimensional views of a three-dimensional image require
/// [`vk::ImageCreateFlags::TYPE_2D_ARRAY_COMPATIBLE`] and a single-level view.
fn compatible_layer_counts(
    image_info: &ImageInfo,
    info: &ImageViewInfo,
) -> [Option<u32>; VIEW_TYPE_COUNT] {
    use vk::ImageViewType as T;

    let mut plan = [None; VIEW_TYPE_COUNT];

    match info.ty {
        T::TYPE_1D | T::TYPE_1D_ARRAY if image_info.ty == vk::ImageType::TYPE_1D => {
            plan[view_type_index(T::TYPE_1D)] = Some(1);
            plan[view_type_index(T::TYPE_1D_ARRAY)] = Some(info.array_layer_count);
        }
        T::TYPE_2D | T::TYPE_2D_ARRAY if image_info.ty == vk::ImageType::TYPE_2D => {
            plan[view_type_index(T::TYPE_2D)] = Some(1);
            plan[view_type_index(T::TYPE_2D_ARRAY)] = Some(info.array_layer_count);
        }
        T::CUBE | T::CUBE_ARRAY if image_info.ty == vk::ImageType::TYPE_2D => {
            plan[view_type_index(T::TYPE_2D)] = Some(1);
            plan[view_type_index(T::TYPE_2D_ARRAY)] = Some(info.array_layer_count);

            if image_info
                .flags
                .contains(vk::ImageCreateFlags::CUBE_COMPATIBLE)
            {
                let cube_count = info.array_layer_count / 6;

                if cube_count > 0 {
                    plan[view_type_index(T::CUBE)] = Some(6);

                    if cube_count > 1 || info.ty == T::CUBE_ARRAY {
                        plan[view_type_index(T::CUBE_ARRAY)] = Some(cube_count * 6);
                    }
                }
            }
        }
        T::TYPE_3D if image_info.ty == vk::ImageType::TYPE_3D => {
            plan[view_type_index(T::TYPE_3D)] = Some(info.array_layer_count);

            if image_info
                .flags
                .contains(vk::ImageCreateFlags::TYPE_2D_ARRAY_COMPATIBLE)
                && info.mip_level_count == 1
            {
                plan[view_type_index(T::TYPE_2D)] = Some(1);
                plan[view_type_index(T::TYPE_2D_ARRAY)] =
                    Some(image_info.mip_level_extent(info.base_mip_level).depth);
            }
        }
        _ => (),
    }

    plan
}

/// Resolves the `REMAINING_*` sentinel counts against the image and checks the view's aspect
/// mask and subresource ranges, without touching the driver.
fn resolve_info(
    image_info: &ImageInfo,
    mut info: ImageViewInfo,
) -> Result<ImageViewInfo, DriverError> {
    if info.mip_level_count == vk::REMAINING_MIP_LEVELS {
        info.mip_level_count = image_info
            .mip_level_count
            .saturating_sub(info.base_mip_level);
    }

    if info.array_layer_count == vk::REMAINING_ARRAY_LAYERS {
        info.array_layer_count = image_info
            .array_layer_count
            .saturating_sub(info.base_array_layer);
    }

    let image_aspect_mask = format_aspect_mask(image_info.fmt);

    if info.aspect_mask.is_empty() || !image_aspect_mask.contains(info.aspect_mask) {
        warn!(
            "view aspect mask {:?} not contained in image aspect mask {:?}",
            info.aspect_mask, image_aspect_mask
        );

        return Err(DriverError::Configuration);
    }

    if info.mip_level_count == 0
        || info.base_mip_level >= image_info.mip_level_count
        || info.mip_level_count > image_info.mip_level_count - info.base_mip_level
    {
        warn!(
            "view mip levels {}..{} out of bounds for an image with {} levels",
            info.base_mip_level,
            info.base_mip_level as u64 + info.mip_level_count as u64,
            image_info.mip_level_count
        );

        return Err(DriverError::Configuration);
    }

    if info.array_layer_count == 0
        || info.base_array_layer >= image_info.array_layer_count
        || info.array_layer_count > image_info.array_layer_count - info.base_array_layer
    {
        warn!(
            "view layers {}..{} out of bounds for an image with {} layers",
            info.base_array_layer,
            info.base_array_layer as u64 + info.array_layer_count as u64,
            image_info.array_layer_count
        );

        return Err(DriverError::Configuration);
    }

    Ok(info)
}

#[derive(Clone, Copy, Debug, Default)]
struct RtBinding {
    frame_count: u32,
    frame_id: u32,
}

impl RtBinding {
    fn record(&mut self, frame_id: u32) {
        if frame_id == self.frame_id {
            return;
        }

        if frame_id == self.frame_id.wrapping_add(1) {
            self.frame_count += 1;
        } else {
            self.frame_count = 0;
        }

        self.frame_id = frame_id;
    }

    fn async_compilation_compat(&self) -> bool {
        self.frame_count >= RT_BINDING_WARM_FRAME_COUNT
    }
}

/// Smart pointer handle to an [image view] object.
///
/// Every view type structurally compatible with the underlying image is created eagerly, so a
/// later lookup by a dynamically-chosen [`vk::ImageViewType`] is a branch-free table read
/// instead of a conditional re-creation.
///
/// An `ImageView` keeps its [`Image`] alive but the image knows nothing of its views; views may
/// be dropped independently and in any order.
///
/// ## `Deref` behavior
///
/// `ImageView` automatically dereferences to the [`vk::ImageView`] handle of its default view
/// type; the methods of `ImageView` itself are associated functions, called using
/// [fully qualified syntax].
///
/// [image view]: https://registry.khronos.org/vulkan/specs/1.3-extensions/man/html/VkImageView.html
/// [fully qualified syntax]: https://doc.rust-lang.org/book/ch19-03-advanced-traits.html#fully-qualified-syntax-for-disambiguation-calling-methods-with-the-same-name
pub struct ImageView {
    device: Arc<Device>,
    image: Arc<Image>,

    /// Information used to create this object, with `REMAINING_*` counts resolved.
    pub info: ImageViewInfo,

    rt_binding: Mutex<RtBinding>,
    views: [vk::ImageView; VIEW_TYPE_COUNT],
}

impl ImageView {
    /// Creates a new image view over the given image.
    ///
    /// Fails with [`DriverError::Configuration`] before any native handle is created when the
    /// requested aspect mask, mip range, or layer range does not fit the image, or when the
    /// requested view type is structurally incompatible with it.
    ///
    /// # Examples
    ///
    /// Basic usage:
    ///
    /// ```no_run
    /// # use std::sync::Arc;
    /// # use ash::vk;
    /// # use vexel::driver::{Device, DeviceInfo, DriverError, Image, ImageInfo, ImageView};
    /// # fn main() -> Result<(), DriverError> {
    /// # let device = Arc::new(Device::create_headless(DeviceInfo::default())?);
    /// # let info = ImageInfo::cube(64, vk::Format::R8G8B8A8_UNORM, vk::ImageUsageFlags::SAMPLED);
    /// # let image = Arc::new(Image::create(&device, info.clone(), vk::MemoryPropertyFlags::DEVICE_LOCAL)?);
    /// let view = ImageView::create(&image, info.default_view_info())?;
    ///
    /// assert_ne!(ImageView::handle(&view), vk::ImageView::null());
    /// # Ok(()) }
    /// ```
    #[profiling::function]
    pub fn create(
        image: &Arc<Image>,
        info: impl Into<ImageViewInfo>,
    ) -> Result<Self, DriverError> {
        let info = resolve_info(&image.info, info.into())?;

        trace!("create");

        let plan = compatible_layer_counts(&image.info, &info);

        if plan[view_type_index(info.ty)].is_none() {
            warn!(
                "view type {:?} is incompatible with a {:?} image with flags {:?}",
                info.ty, image.info.ty, image.info.flags
            );

            return Err(DriverError::Configuration);
        }

        let device = Arc::clone(&image.device);
        let image = Arc::clone(image);
        let mut views = [vk::ImageView::null(); VIEW_TYPE_COUNT];

        for (idx, layer_count) in plan.into_iter().enumerate() {
            let Some(layer_count) = layer_count else {
                continue;
            };

            match Self::create_handle(
                &device,
                **image,
                &info,
                vk::ImageViewType::from_raw(idx as _),
                layer_count,
            ) {
                Ok(view) => views[idx] = view,
                Err(err) => {
                    // Construction is atomic: unwind whatever was already created
                    for view in views {
                        if view != vk::ImageView::null() {
                            unsafe {
                                device.destroy_image_view(view, None);
                            }
                        }
                    }

                    return Err(err);
                }
            }
        }

        Ok(Self {
            device,
            image,
            info,
            rt_binding: Mutex::new(RtBinding::default()),
            views,
        })
    }

    fn create_handle(
        device: &Device,
        image: vk::Image,
        info: &ImageViewInfo,
        ty: vk::ImageViewType,
        layer_count: u32,
    ) -> Result<vk::ImageView, DriverError> {
        let mut usage_info = vk::ImageViewUsageCreateInfo::default().usage(info.usage);
        let mut create_info = vk::ImageViewCreateInfo::default()
            .view_type(ty)
            .format(info.fmt)
            .components(info.components)
            .image(image)
            .subresource_range(vk::ImageSubresourceRange {
                aspect_mask: info.aspect_mask,
                base_array_layer: info.base_array_layer,
                base_mip_level: info.base_mip_level,
                level_count: info.mip_level_count,
                layer_count,
            });

        if !info.usage.is_empty() {
            create_info = create_info.push_next(&mut usage_info);
        }

        unsafe { device.create_image_view(&create_info, None) }.map_err(|err| {
            warn!("unable to create image view: {err}");

            DriverError::Device(err)
        })
    }

    /// Returns the handle for the view's own default view type.
    ///
    /// The default view type is always materialized, so this never returns the null handle.
    pub fn handle(this: &Self) -> vk::ImageView {
        this.views[view_type_index(this.info.ty)]
    }

    /// Returns the handle for the given view type.
    ///
    /// Returns [`vk::ImageView::null`] if that view type was not structurally compatible with
    /// the image at creation time.
    pub fn handle_ty(this: &Self, ty: vk::ImageViewType) -> vk::ImageView {
        this.views[view_type_index(ty)]
    }

    /// Returns the image this view was created over.
    pub fn image(this: &Self) -> &Arc<Image> {
        &this.image
    }

    /// Returns the extent of the given mip level, relative to the first level of the view.
    pub fn mip_level_extent(this: &Self, level: u32) -> vk::Extent3D {
        this.image
            .info
            .mip_level_extent(level + this.info.base_mip_level)
    }

    /// Picks a compatible layout for an operation which requests `layout`.
    ///
    /// See [`ImageInfo::pick_layout`].
    pub fn pick_layout(this: &Self, layout: vk::ImageLayout) -> vk::ImageLayout {
        this.image.info.pick_layout(layout)
    }

    /// Returns the subresource range covered by this view.
    pub fn subresource_range(this: &Self) -> vk::ImageSubresourceRange {
        this.info.into()
    }

    /// Records that this view was bound as a render target during the given frame.
    ///
    /// Repeat calls with the same frame number are idempotent. This state feeds
    /// [`ImageView::rt_binding_async_compilation_compat`] and must be externally serialized to a
    /// single caller, typically the render loop.
    pub fn set_rt_binding_frame_id(this: &Self, frame_id: u32) {
        #[cfg_attr(not(feature = "parking_lot"), allow(unused_mut))]
        let mut rt_binding = this.rt_binding.lock();

        #[cfg(not(feature = "parking_lot"))]
        let mut rt_binding = rt_binding.unwrap();

        rt_binding.record(frame_id);
    }

    /// Checks for async pipeline compilation compatibility.
    ///
    /// A render target drawn to in five or more consecutive frames is unlikely to change format
    /// or sample count again soon, so a pipeline bound to it may be compiled on a background
    /// task without risking a visible stall.
    pub fn rt_binding_async_compilation_compat(this: &Self) -> bool {
        let rt_binding = this.rt_binding.lock();

        #[cfg(not(feature = "parking_lot"))]
        let rt_binding = rt_binding.unwrap();

        rt_binding.async_compilation_compat()
    }
}

impl Debug for ImageView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} ({:?})", Self::handle(self), self.image)
    }
}

impl Deref for ImageView {
    type Target = vk::ImageView;

    fn deref(&self) -> &Self::Target {
        &self.views[view_type_index(self.info.ty)]
    }
}

impl Drop for ImageView {
    #[profiling::function]
    fn drop(&mut self) {
        if panicking() {
            return;
        }

        for view in self.views {
            if view != vk::ImageView::null() {
                unsafe {
                    self.device.destroy_image_view(view, None);
                }
            }
        }
    }
}

/// Information used to create an [`ImageView`] instance.
#[derive(Builder, Clone, Copy, Debug)]
#[builder(
    build_fn(private, name = "fallible_build", error = "ImageViewInfoBuilderError"),
    derive(Clone, Copy, Debug),
    pattern = "owned"
)]
#[non_exhaustive]
pub struct ImageViewInfo {
    /// The number of layers that will be contained in the view.
    ///
    /// The default value is [`vk::REMAINING_ARRAY_LAYERS`], which is resolved against the image
    /// when the view is created.
    #[builder(default = "vk::REMAINING_ARRAY_LAYERS")]
    pub array_layer_count: u32,

    /// The portion of the image that will be contained in the view.
    pub aspect_mask: vk::ImageAspectFlags,

    /// The first array layer that will be contained in the view.
    #[builder(default)]
    pub base_array_layer: u32,

    /// The first mip level that will be contained in the view.
    #[builder(default)]
    pub base_mip_level: u32,

    /// Remaps the color components read through the view.
    ///
    /// The default value is the identity mapping on all four channels.
    #[builder(default)]
    pub components: vk::ComponentMapping,

    /// The format and type of the texel blocks that will be contained in the view.
    pub fmt: vk::Format,

    /// The number of mip levels that will be contained in the view.
    ///
    /// The default value is [`vk::REMAINING_MIP_LEVELS`], which is resolved against the image
    /// when the view is created.
    #[builder(default = "vk::REMAINING_MIP_LEVELS")]
    pub mip_level_count: u32,

    /// The basic dimensionality of the view.
    pub ty: vk::ImageViewType,

    /// A bitmask describing the intended usage of the view.
    ///
    /// When empty the view inherits the image's usage.
    #[builder(default)]
    pub usage: vk::ImageUsageFlags,
}

impl ImageViewInfo {
    /// Specifies a default view with the given `fmt` and `ty` values.
    ///
    /// # Note
    ///
    /// Automatically sets [`aspect_mask`](Self::aspect_mask) to a suggested value.
    #[inline(always)]
    pub const fn new(fmt: vk::Format, ty: vk::ImageViewType) -> ImageViewInfo {
        Self {
            array_layer_count: vk::REMAINING_ARRAY_LAYERS,
            aspect_mask: format_aspect_mask(fmt),
            base_array_layer: 0,
            base_mip_level: 0,
            components: vk::ComponentMapping {
                r: vk::ComponentSwizzle::IDENTITY,
                g: vk::ComponentSwizzle::IDENTITY,
                b: vk::ComponentSwizzle::IDENTITY,
                a: vk::ComponentSwizzle::IDENTITY,
            },
            fmt,
            mip_level_count: vk::REMAINING_MIP_LEVELS,
            ty,
            usage: vk::ImageUsageFlags::empty(),
        }
    }

    /// Converts an `ImageViewInfo` into an `ImageViewInfoBuilder`.
    #[inline(always)]
    pub fn to_builder(self) -> ImageViewInfoBuilder {
        ImageViewInfoBuilder {
            array_layer_count: Some(self.array_layer_count),
            aspect_mask: Some(self.aspect_mask),
            base_array_layer: Some(self.base_array_layer),
            base_mip_level: Some(self.base_mip_level),
            components: Some(self.components),
            fmt: Some(self.fmt),
            mip_level_count: Some(self.mip_level_count),
            ty: Some(self.ty),
            usage: Some(self.usage),
        }
    }

    /// Takes this instance and returns it with a newly specified `ImageViewType`.
    pub fn with_type(mut self, ty: vk::ImageViewType) -> Self {
        self.ty = ty;
        self
    }
}

impl From<&ImageInfo> for ImageViewInfo {
    fn from(info: &ImageInfo) -> Self {
        Self {
            array_layer_count: info.array_layer_count,
            aspect_mask: format_aspect_mask(info.fmt),
            base_array_layer: 0,
            base_mip_level: 0,
            components: vk::ComponentMapping::default(),
            fmt: info.fmt,
            mip_level_count: info.mip_level_count,
            ty: match (info.ty, info.array_layer_count) {
                (vk::ImageType::TYPE_1D, 1) => vk::ImageViewType::TYPE_1D,
                (vk::ImageType::TYPE_1D, _) => vk::ImageViewType::TYPE_1D_ARRAY,
                (vk::ImageType::TYPE_2D, 1) => vk::ImageViewType::TYPE_2D,
                (vk::ImageType::TYPE_2D, 6)
                    if info.flags.contains(vk::ImageCreateFlags::CUBE_COMPATIBLE) =>
                {
                    vk::ImageViewType::CUBE
                }
                (vk::ImageType::TYPE_2D, _)
                    if info.flags.contains(vk::ImageCreateFlags::CUBE_COMPATIBLE)
                        && info.array_layer_count > 6 =>
                {
                    vk::ImageViewType::CUBE_ARRAY
                }
                (vk::ImageType::TYPE_2D, _) => vk::ImageViewType::TYPE_2D_ARRAY,
                (vk::ImageType::TYPE_3D, _) => vk::ImageViewType::TYPE_3D,
                _ => unimplemented!(),
            },
            usage: info.usage,
        }
    }
}

impl From<ImageInfo> for ImageViewInfo {
    fn from(info: ImageInfo) -> Self {
        (&info).into()
    }
}

impl From<ImageViewInfoBuilder> for ImageViewInfo {
    fn from(info: ImageViewInfoBuilder) -> Self {
        info.build()
    }
}

impl From<ImageViewInfo> for vk::ImageSubresourceRange {
    fn from(info: ImageViewInfo) -> Self {
        Self {
            aspect_mask: info.aspect_mask,
            base_mip_level: info.base_mip_level,
            base_array_layer: info.base_array_layer,
            layer_count: info.array_layer_count,
            level_count: info.mip_level_count,
        }
    }
}

impl ImageViewInfoBuilder {
    /// Builds a new `ImageViewInfo`.
    ///
    /// # Panics
    ///
    /// If any of the following values have not been set this function will panic:
    ///
    /// * `ty`
    /// * `fmt`
    /// * `aspect_mask`
    #[inline(always)]
    pub fn build(self) -> ImageViewInfo {
        match self.fallible_build() {
            Err(ImageViewInfoBuilderError(err)) => panic!("{err}"),
            Ok(info) => info,
        }
    }
}

#[derive(Debug)]
struct ImageViewInfoBuilderError(UninitializedFieldError);

impl From<UninitializedFieldError> for ImageViewInfoBuilderError {
    fn from(err: UninitializedFieldError) -> Self {
        Self(err)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::driver::SampleCount};

    fn image_2d_array(array_layer_count: u32, mip_level_count: u32) -> ImageInfo {
        ImageInfo::image_2d_array(
            64,
            64,
            array_layer_count,
            vk::Format::R8G8B8A8_UNORM,
            vk::ImageUsageFlags::SAMPLED,
        )
        .to_builder()
        .mip_level_count(mip_level_count)
        .build()
    }

    #[test]
    fn rt_binding_warms_after_five_consecutive_frames() {
        let mut rt_binding = RtBinding::default();

        for frame_id in [100, 101, 102, 103, 104] {
            rt_binding.record(frame_id);

            assert!(!rt_binding.async_compilation_compat());
        }

        rt_binding.record(105);

        assert!(rt_binding.async_compilation_compat());
    }

    #[test]
    fn rt_binding_resets_on_frame_gap() {
        let mut rt_binding = RtBinding::default();

        rt_binding.record(100);
        rt_binding.record(101);
        rt_binding.record(103);

        assert!(!rt_binding.async_compilation_compat());
        assert_eq!(rt_binding.frame_count, 0);

        // A rewind also resets
        for frame_id in 103..=109 {
            rt_binding.record(frame_id);
        }

        assert!(rt_binding.async_compilation_compat());

        rt_binding.record(90);

        assert!(!rt_binding.async_compilation_compat());
    }

    #[test]
    fn rt_binding_repeat_frame_is_idempotent() {
        let mut rt_binding = RtBinding::default();

        rt_binding.record(100);

        let before = rt_binding.frame_count;

        rt_binding.record(100);
        rt_binding.record(100);

        assert_eq!(rt_binding.frame_count, before);
        assert_eq!(rt_binding.frame_id, 100);

        // Re-binding within the warm state keeps it warm
        for frame_id in 100..=106 {
            rt_binding.record(frame_id);
        }

        rt_binding.record(106);

        assert!(rt_binding.async_compilation_compat());
    }

    #[test]
    fn resolve_rejects_out_of_bounds_mip_range() {
        let image_info = image_2d_array(1, 4);
        let info = ImageViewInfo::new(image_info.fmt, vk::ImageViewType::TYPE_2D)
            .to_builder()
            .base_mip_level(2)
            .mip_level_count(3)
            .build();

        assert!(matches!(
            resolve_info(&image_info, info),
            Err(DriverError::Configuration)
        ));
    }

    #[test]
    fn resolve_rejects_out_of_bounds_layer_range() {
        let image_info = image_2d_array(4, 1);
        let info = ImageViewInfo::new(image_info.fmt, vk::ImageViewType::TYPE_2D_ARRAY)
            .to_builder()
            .base_array_layer(4)
            .array_layer_count(1)
            .build();

        assert!(matches!(
            resolve_info(&image_info, info),
            Err(DriverError::Configuration)
        ));
    }

    #[test]
    fn resolve_rejects_foreign_aspects() {
        let image_info = image_2d_array(1, 1);
        let info = ImageViewInfo::new(image_info.fmt, vk::ImageViewType::TYPE_2D)
            .to_builder()
            .aspect_mask(vk::ImageAspectFlags::DEPTH)
            .build();

        assert!(matches!(
            resolve_info(&image_info, info),
            Err(DriverError::Configuration)
        ));
    }

    #[test]
    fn resolve_replaces_remaining_sentinels() {
        let image_info = image_2d_array(8, 5);
        let info = ImageViewInfo::new(image_info.fmt, vk::ImageViewType::TYPE_2D_ARRAY)
            .to_builder()
            .base_mip_level(1)
            .base_array_layer(2)
            .build();
        let info = resolve_info(&image_info, info).unwrap();

        assert_eq!(info.mip_level_count, 4);
        assert_eq!(info.array_layer_count, 6);
    }

    #[test]
    fn subresource_range_round_trips_view_info() {
        let info = ImageViewInfo::new(vk::Format::R8G8B8A8_UNORM, vk::ImageViewType::TYPE_2D)
            .to_builder()
            .base_mip_level(1)
            .mip_level_count(2)
            .base_array_layer(3)
            .array_layer_count(4)
            .build();
        let range: vk::ImageSubresourceRange = info.into();

        assert_eq!(range.aspect_mask, vk::ImageAspectFlags::COLOR);
        assert_eq!(range.base_mip_level, 1);
        assert_eq!(range.level_count, 2);
        assert_eq!(range.base_array_layer, 3);
        assert_eq!(range.layer_count, 4);
    }

    #[test]
    fn plan_2d_materializes_both_2d_kinds_only() {
        let image_info = image_2d_array(4, 1);
        let info = ImageViewInfo::new(image_info.fmt, vk::ImageViewType::TYPE_2D_ARRAY);
        let info = resolve_info(&image_info, info).unwrap();
        let plan = compatible_layer_counts(&image_info, &info);

        assert_eq!(plan[view_type_index(vk::ImageViewType::TYPE_2D)], Some(1));
        assert_eq!(
            plan[view_type_index(vk::ImageViewType::TYPE_2D_ARRAY)],
            Some(4)
        );
        assert_eq!(plan[view_type_index(vk::ImageViewType::TYPE_1D)], None);
        assert_eq!(plan[view_type_index(vk::ImageViewType::CUBE)], None);
        assert_eq!(plan[view_type_index(vk::ImageViewType::CUBE_ARRAY)], None);
        assert_eq!(plan[view_type_index(vk::ImageViewType::TYPE_3D)], None);
    }

    #[test]
    fn plan_cube_requires_cube_compatible_flag() {
        let image_info = image_2d_array(6, 1);
        let info = ImageViewInfo::new(image_info.fmt, vk::ImageViewType::CUBE);
        let info = resolve_info(&image_info, info).unwrap();

        // No flag: the requested type itself is unavailable
        let plan = compatible_layer_counts(&image_info, &info);

        assert_eq!(plan[view_type_index(vk::ImageViewType::CUBE)], None);

        let image_info = image_info
            .to_builder()
            .flags(vk::ImageCreateFlags::CUBE_COMPATIBLE)
            .build();
        let plan = compatible_layer_counts(&image_info, &info);

        assert_eq!(plan[view_type_index(vk::ImageViewType::CUBE)], Some(6));
        assert_eq!(plan[view_type_index(vk::ImageViewType::TYPE_2D)], Some(1));
        assert_eq!(
            plan[view_type_index(vk::ImageViewType::TYPE_2D_ARRAY)],
            Some(6)
        );

        // A single whole cube does not imply a cube array
        assert_eq!(plan[view_type_index(vk::ImageViewType::CUBE_ARRAY)], None);
    }

    #[test]
    fn plan_cube_array_follows_whole_cube_count() {
        let image_info = image_2d_array(12, 1)
            .to_builder()
            .flags(vk::ImageCreateFlags::CUBE_COMPATIBLE)
            .build();
        let info = ImageViewInfo::new(image_info.fmt, vk::ImageViewType::CUBE_ARRAY);
        let info = resolve_info(&image_info, info).unwrap();
        let plan = compatible_layer_counts(&image_info, &info);

        assert_eq!(plan[view_type_index(vk::ImageViewType::CUBE)], Some(6));
        assert_eq!(
            plan[view_type_index(vk::ImageViewType::CUBE_ARRAY)],
            Some(12)
        );
    }

    #[test]
    fn plan_3d_requires_flag_for_2d_slices() {
        let image_info = ImageInfo::image_3d(
            32,
            32,
            8,
            vk::Format::R8G8B8A8_UNORM,
            vk::ImageUsageFlags::STORAGE,
        );
        let info = ImageViewInfo::new(image_info.fmt, vk::ImageViewType::TYPE_3D);
        let info = resolve_info(&image_info, info).unwrap();
        let plan = compatible_layer_counts(&image_info, &info);

        assert_eq!(plan[view_type_index(vk::ImageViewType::TYPE_3D)], Some(1));
        assert_eq!(plan[view_type_index(vk::ImageViewType::TYPE_2D)], None);
        assert_eq!(plan[view_type_index(vk::ImageViewType::TYPE_2D_ARRAY)], None);

        let image_info = image_info
            .to_builder()
            .flags(vk::ImageCreateFlags::TYPE_2D_ARRAY_COMPATIBLE)
            .build();
        let plan = compatible_layer_counts(&image_info, &info);

        assert_eq!(plan[view_type_index(vk::ImageViewType::TYPE_2D)], Some(1));
        assert_eq!(
            plan[view_type_index(vk::ImageViewType::TYPE_2D_ARRAY)],
            Some(8)
        );
    }

    #[test]
    fn plan_rejects_mismatched_dimensionality() {
        let image_info = image_2d_array(1, 1);
        let info = ImageViewInfo::new(image_info.fmt, vk::ImageViewType::TYPE_1D);
        let info = resolve_info(&image_info, info).unwrap();
        let plan = compatible_layer_counts(&image_info, &info);

        assert!(plan.iter().all(Option::is_none));
    }

    #[test]
    fn default_view_info_matches_image_shape() {
        let image_info = ImageInfo::cube(
            64,
            vk::Format::R8G8B8A8_UNORM,
            vk::ImageUsageFlags::SAMPLED,
        );
        let info = image_info.default_view_info();

        assert_eq!(info.ty, vk::ImageViewType::CUBE);
        assert_eq!(info.array_layer_count, 6);
        assert_eq!(info.aspect_mask, vk::ImageAspectFlags::COLOR);
        assert_eq!(info.usage, image_info.usage);

        let image_info = image_2d_array(12, 3)
            .to_builder()
            .flags(vk::ImageCreateFlags::CUBE_COMPATIBLE)
            .build();

        assert_eq!(
            image_info.default_view_info().ty,
            vk::ImageViewType::CUBE_ARRAY
        );

        let image_info = image_2d_array(1, 1).to_builder().sample_count(SampleCount::Type4).build();

        assert_eq!(image_info.default_view_info().ty, vk::ImageViewType::TYPE_2D);
    }
}
