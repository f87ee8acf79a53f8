use {
    super::Instance,
    ash::vk,
    std::{
        ffi::CStr,
        fmt::{Debug, Formatter},
        ops::Deref,
    },
};

/// A queue family together with its index on the physical device.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct QueueFamily {
    /// Index of this family within the device's queue family array.
    pub idx: u32,

    /// Properties of this queue family.
    pub props: QueueFamilyProperties,
}

/// Describes the queues of a single queue family.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct QueueFamilyProperties {
    /// Capabilities of the queues in this family.
    pub queue_flags: vk::QueueFlags,

    /// Number of queues in this family.
    pub queue_count: u32,
}

/// Structure which describes one of the physical devices available to an [`Instance`].
#[derive(Clone)]
pub struct PhysicalDevice {
    /// Memory heaps and memory types available on the device.
    pub mem_props: vk::PhysicalDeviceMemoryProperties,

    physical_device: vk::PhysicalDevice,

    /// Basic device properties such as limits and device type.
    pub props: vk::PhysicalDeviceProperties,

    queue_families: Vec<QueueFamily>,
}

impl PhysicalDevice {
    pub(super) fn new(instance: &Instance, physical_device: vk::PhysicalDevice) -> Self {
        let mem_props = unsafe { instance.get_physical_device_memory_properties(physical_device) };
        let props = unsafe { instance.get_physical_device_properties(physical_device) };
        let queue_families =
            unsafe { instance.get_physical_device_queue_family_properties(physical_device) }
                .into_iter()
                .enumerate()
                .map(|(idx, props)| QueueFamily {
                    idx: idx as _,
                    props: QueueFamilyProperties {
                        queue_flags: props.queue_flags,
                        queue_count: props.queue_count,
                    },
                })
                .collect();

        Self {
            mem_props,
            physical_device,
            props,
            queue_families,
        }
    }

    /// Returns the queue families available on this device.
    pub fn queue_families(this: &Self) -> impl Iterator<Item = QueueFamily> + '_ {
        this.queue_families.iter().copied()
    }

    pub(super) fn score_device_type(this: &Self) -> usize {
        match this.props.device_type {
            vk::PhysicalDeviceType::DISCRETE_GPU => 1000,
            vk::PhysicalDeviceType::INTEGRATED_GPU => 200,
            vk::PhysicalDeviceType::VIRTUAL_GPU => 1,
            _ => 0,
        }
    }
}

impl Debug for PhysicalDevice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        unsafe {
            write!(
                f,
                "{:?} ({:?})",
                CStr::from_ptr(self.props.device_name.as_ptr()),
                self.props.device_type
            )
        }
    }
}

impl Deref for PhysicalDevice {
    type Target = vk::PhysicalDevice;

    fn deref(&self) -> &Self::Target {
        &self.physical_device
    }
}
