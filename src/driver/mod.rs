//! Native Vulkan resource types and driver plumbing.

mod device;
mod format;
mod image;
mod image_view;
mod instance;
mod physical_device;

pub use {
    self::{
        device::{Device, DeviceInfo, DeviceInfoBuilder},
        format::{format_aspect_mask, format_info, FormatInfo},
        image::{Image, ImageInfo, ImageInfoBuilder, SampleCount},
        image_view::{ImageView, ImageViewInfo, ImageViewInfoBuilder},
        instance::Instance,
        physical_device::{PhysicalDevice, QueueFamily, QueueFamilyProperties},
    },
    ash::{self, vk},
};

use std::{
    error::Error,
    fmt::{Display, Formatter},
};

/// Describes the failure of a driver operation.
///
/// Construction of any driver object either fully succeeds or fails with one
/// of these values; no partially-initialized object is ever returned.
#[derive(Debug)]
pub enum DriverError {
    /// A requested view or subresource range is invalid for its image.
    Configuration,

    /// The memory allocator was unable to satisfy the request.
    Allocation,

    /// A native driver call failed; the result code is surfaced unmodified.
    Device(vk::Result),
}

impl Display for DriverError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for DriverError {}
