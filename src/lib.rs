//! Device-resident image resources and their views, on top of [`ash`].
//!
//! This crate wraps `VkImage` and `VkImageView` in smart-pointer types which own their native
//! handles and their backing memory, and which answer the questions render-loop code asks of an
//! image without touching the driver: mip chain arithmetic, subresource coverage, layout
//! selection, and render target binding history.
//!
//! # Quick start
//!
//! ```no_run
//! use {
//!     ash::vk,
//!     std::sync::Arc,
//!     vexel::driver::{Device, DeviceInfo, Image, ImageInfo, ImageView},
//! };
//!
//! fn main() -> Result<(), vexel::driver::DriverError> {
//!     let device = Arc::new(Device::create_headless(DeviceInfo::default())?);
//!     let info = ImageInfo::image_2d(
//!         1024,
//!         768,
//!         vk::Format::R8G8B8A8_UNORM,
//!         vk::ImageUsageFlags::SAMPLED | vk::ImageUsageFlags::TRANSFER_DST,
//!     );
//!     let image = Arc::new(Image::create(&device, info.clone(), vk::MemoryPropertyFlags::DEVICE_LOCAL)?);
//!     let view = ImageView::create(&image, info.default_view_info())?;
//!
//!     assert_ne!(ImageView::handle(&view), vk::ImageView::null());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod driver;
