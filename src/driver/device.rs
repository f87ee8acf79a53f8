use {
    super::{DriverError, Instance, PhysicalDevice},
    ash::vk,
    derive_builder::{Builder, UninitializedFieldError},
    gpu_allocator::{
        vulkan::{Allocator, AllocatorCreateDesc},
        AllocatorDebugSettings,
    },
    log::{trace, warn},
    std::{
        fmt::{Debug, Formatter},
        iter::empty,
        mem::ManuallyDrop,
        ops::Deref,
        sync::Arc,
        thread::panicking,
    },
};

#[cfg(feature = "parking_lot")]
use parking_lot::Mutex;

#[cfg(not(feature = "parking_lot"))]
use std::sync::Mutex;

/// Opaque handle to a logical device object.
///
/// `Device` automatically dereferences to [`ash::Device`], so native functions may be called
/// directly on a value of this type; the methods of `Device` itself are associated functions to
/// avoid name clashes.
pub struct Device {
    pub(super) allocator: ManuallyDrop<Mutex<Allocator>>,

    device: ash::Device,

    /// Vulkan instance pointer, which includes useful functions.
    pub instance: Arc<Instance>,

    /// The physical device, which contains useful property and limit data.
    pub physical_device: PhysicalDevice,
}

impl Device {
    /// Constructs a new device without any presentation support.
    ///
    /// Selects the highest-scoring physical device available and creates a single
    /// graphics/compute queue on it.
    #[profiling::function]
    pub fn create_headless(info: impl Into<DeviceInfo>) -> Result<Self, DriverError> {
        let info: DeviceInfo = info.into();

        trace!("create_headless");

        let instance = Arc::new(Instance::create(info.debug, empty())?);
        let physical_device = Instance::physical_devices(&instance)?
            .into_iter()
            // If there are multiple devices with the same score, `max_by_key` would choose the
            // last, and we want to preserve the driver-reported order.
            .rev()
            .max_by_key(PhysicalDevice::score_device_type)
            .ok_or(DriverError::Device(vk::Result::ERROR_INITIALIZATION_FAILED))?;

        Self::create(&instance, physical_device, info)
    }

    /// Constructs a new device using an already-selected physical device.
    #[profiling::function]
    pub fn create(
        instance: &Arc<Instance>,
        physical_device: PhysicalDevice,
        info: impl Into<DeviceInfo>,
    ) -> Result<Self, DriverError> {
        let info: DeviceInfo = info.into();
        let instance = Arc::clone(instance);
        let queue_family = PhysicalDevice::queue_families(&physical_device)
            .find(|queue_family| {
                queue_family
                    .props
                    .queue_flags
                    .contains(vk::QueueFlags::GRAPHICS | vk::QueueFlags::COMPUTE)
            })
            .ok_or_else(|| {
                warn!("no suitable queue family found");

                DriverError::Device(vk::Result::ERROR_INITIALIZATION_FAILED)
            })?;
        let queue_priorities = [1.0];
        let queue_info = vk::DeviceQueueCreateInfo::default()
            .queue_family_index(queue_family.idx)
            .queue_priorities(&queue_priorities);
        let queue_infos = [queue_info];
        let device_info = vk::DeviceCreateInfo::default().queue_create_infos(&queue_infos);
        let device = unsafe {
            instance
                .create_device(*physical_device, &device_info, None)
                .map_err(|err| {
                    warn!("unable to create device: {err}");

                    DriverError::Device(err)
                })?
        };
        let allocator = Allocator::new(&AllocatorCreateDesc {
            instance: (*instance).clone(),
            device: device.clone(),
            physical_device: *physical_device,
            debug_settings: AllocatorDebugSettings {
                log_leaks_on_shutdown: info.debug,
                log_memory_information: info.debug,
                log_allocations: info.debug,
                ..Default::default()
            },
            buffer_device_address: false,
            allocation_sizes: Default::default(),
        })
        .map_err(|err| {
            warn!("unable to create allocator: {err}");

            unsafe {
                device.destroy_device(None);
            }

            DriverError::Allocation
        })?;

        Ok(Self {
            allocator: ManuallyDrop::new(Mutex::new(allocator)),
            device,
            instance,
            physical_device,
        })
    }

    /// Lists the physical device's format capabilities.
    pub fn format_properties(this: &Self, fmt: vk::Format) -> vk::FormatProperties {
        unsafe {
            this.instance
                .get_physical_device_format_properties(*this.physical_device, fmt)
        }
    }

    /// Lists the physical device's capabilities for images of the given configuration.
    pub fn image_format_properties(
        this: &Self,
        fmt: vk::Format,
        ty: vk::ImageType,
        tiling: vk::ImageTiling,
        usage: vk::ImageUsageFlags,
        flags: vk::ImageCreateFlags,
    ) -> Result<vk::ImageFormatProperties, DriverError> {
        unsafe {
            this.instance
                .get_physical_device_image_format_properties(
                    *this.physical_device,
                    fmt,
                    ty,
                    tiling,
                    usage,
                    flags,
                )
                .map_err(DriverError::Device)
        }
    }
}

impl Debug for Device {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Device")
    }
}

impl Deref for Device {
    type Target = ash::Device;

    fn deref(&self) -> &Self::Target {
        &self.device
    }
}

impl Drop for Device {
    fn drop(&mut self) {
        // When panicking we leak the allocator so it does not complain about leaked resources
        if panicking() {
            return;
        }

        if let Err(err) = unsafe { self.device.device_wait_idle() } {
            warn!("device_wait_idle() failed: {err}");
        }

        unsafe {
            ManuallyDrop::drop(&mut self.allocator);
            self.device.destroy_device(None);
        }
    }
}

/// Information used to create a [`Device`] instance.
#[derive(Builder, Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[builder(
    build_fn(private, name = "fallible_build", error = "DeviceInfoBuilderError"),
    derive(Clone, Copy, Debug),
    pattern = "owned"
)]
#[non_exhaustive]
pub struct DeviceInfo {
    /// Enables the validation layer and debug message logging.
    #[builder(default)]
    pub debug: bool,
}

impl DeviceInfo {
    /// Converts a `DeviceInfo` into a `DeviceInfoBuilder`.
    #[inline(always)]
    pub fn to_builder(self) -> DeviceInfoBuilder {
        DeviceInfoBuilder {
            debug: Some(self.debug),
        }
    }
}

impl From<DeviceInfoBuilder> for DeviceInfo {
    fn from(info: DeviceInfoBuilder) -> Self {
        info.build()
    }
}

impl DeviceInfoBuilder {
    /// Builds a new `DeviceInfo`.
    #[inline(always)]
    pub fn build(self) -> DeviceInfo {
        match self.fallible_build() {
            Err(DeviceInfoBuilderError(err)) => panic!("{err}"),
            Ok(info) => info,
        }
    }
}

#[derive(Debug)]
struct DeviceInfoBuilderError(UninitializedFieldError);

impl From<UninitializedFieldError> for DeviceInfoBuilderError {
    fn from(err: UninitializedFieldError) -> Self {
        Self(err)
    }
}
