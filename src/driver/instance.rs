use {
    super::{physical_device::PhysicalDevice, DriverError},
    ash::{ext, vk, Entry},
    log::{debug, error, trace, warn},
    std::{
        ffi::{c_void, CStr, CString},
        fmt::{Debug, Formatter},
        ops::Deref,
        os::raw::c_char,
        thread::panicking,
    },
};

unsafe extern "system" fn vulkan_debug_callback(
    severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    _ty: vk::DebugUtilsMessageTypeFlagsEXT,
    callback_data: *const vk::DebugUtilsMessengerCallbackDataEXT<'_>,
    _user_data: *mut c_void,
) -> vk::Bool32 {
    if panicking() || callback_data.is_null() {
        return vk::FALSE;
    }

    let message = unsafe { (*callback_data).p_message };

    if message.is_null() {
        return vk::FALSE;
    }

    let message = unsafe { CStr::from_ptr(message) }.to_string_lossy();

    if severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::ERROR) {
        error!("🆘 {message}");
    } else if severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::WARNING) {
        warn!("{message}");
    } else {
        debug!("{message}");
    }

    vk::FALSE
}

/// There is no global state in Vulkan and all per-application state is stored in a `VkInstance`
/// object.
///
/// Creating an `Instance` initializes the Vulkan library and allows the application to pass
/// information about itself to the implementation.
pub struct Instance {
    debug_utils: Option<(ext::debug_utils::Instance, vk::DebugUtilsMessengerEXT)>,
    pub(super) entry: Entry,
    instance: ash::Instance,
}

impl Instance {
    /// Creates a new Vulkan instance.
    ///
    /// When `debug` is enabled the Khronos validation layer and a debug-utils messenger which
    /// forwards validation messages to the [`log`] facade are installed.
    #[profiling::function]
    pub fn create<'a>(
        debug: bool,
        required_extensions: impl Iterator<Item = &'a CStr>,
    ) -> Result<Self, DriverError> {
        let entry = unsafe {
            Entry::load().map_err(|err| {
                error!("Vulkan driver not found: {err}");

                DriverError::Device(vk::Result::ERROR_INITIALIZATION_FAILED)
            })?
        };
        let instance_extensions = required_extensions
            .map(|ext| ext.as_ptr())
            .chain(debug.then_some(ext::debug_utils::NAME.as_ptr()))
            .collect::<Box<[_]>>();
        let layer_names = Self::layer_names(debug);
        let layer_names = layer_names
            .iter()
            .map(|layer_name| layer_name.as_ptr())
            .collect::<Vec<*const c_char>>();
        let app_info = vk::ApplicationInfo::default().api_version(vk::API_VERSION_1_2);
        let instance_info = vk::InstanceCreateInfo::default()
            .application_info(&app_info)
            .enabled_layer_names(&layer_names)
            .enabled_extension_names(&instance_extensions);
        let instance = unsafe {
            entry.create_instance(&instance_info, None).map_err(|err| {
                if debug {
                    warn!("debug may only be enabled with a valid Vulkan SDK installation");
                }

                error!("unable to create Vulkan instance: {err}");

                DriverError::Device(err)
            })?
        };

        trace!("created a Vulkan instance");

        let debug_utils = if debug {
            let debug_utils = ext::debug_utils::Instance::new(&entry, &instance);
            let messenger_info = vk::DebugUtilsMessengerCreateInfoEXT::default()
                .message_severity(
                    vk::DebugUtilsMessageSeverityFlagsEXT::ERROR
                        | vk::DebugUtilsMessageSeverityFlagsEXT::WARNING,
                )
                .message_type(
                    vk::DebugUtilsMessageTypeFlagsEXT::GENERAL
                        | vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE
                        | vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION,
                )
                .pfn_user_callback(Some(vulkan_debug_callback));
            let messenger = unsafe {
                debug_utils
                    .create_debug_utils_messenger(&messenger_info, None)
                    .map_err(|err| {
                        warn!("unable to create debug messenger: {err}");

                        DriverError::Device(err)
                    })?
            };

            Some((debug_utils, messenger))
        } else {
            None
        };

        Ok(Self {
            debug_utils,
            entry,
            instance,
        })
    }

    /// Returns the `ash` entrypoint for Vulkan functions.
    pub fn entry(this: &Self) -> &Entry {
        &this.entry
    }

    /// Returns `true` if this instance was created with debug layers enabled.
    pub fn is_debug(this: &Self) -> bool {
        this.debug_utils.is_some()
    }

    fn layer_names(debug: bool) -> Vec<CString> {
        let mut res = vec![];

        if debug {
            res.push(CString::new("VK_LAYER_KHRONOS_validation").unwrap());
        }

        res
    }

    /// Returns the available physical devices of this instance.
    #[profiling::function]
    pub fn physical_devices(this: &Self) -> Result<Vec<PhysicalDevice>, DriverError> {
        let physical_devices = unsafe {
            this.enumerate_physical_devices().map_err(|err| {
                error!("unable to enumerate physical devices: {err}");

                DriverError::Device(err)
            })?
        };

        Ok(physical_devices
            .into_iter()
            .map(|physical_device| PhysicalDevice::new(this, physical_device))
            .collect())
    }
}

impl Debug for Instance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Instance")
    }
}

impl Deref for Instance {
    type Target = ash::Instance;

    fn deref(&self) -> &Self::Target {
        &self.instance
    }
}

impl Drop for Instance {
    #[profiling::function]
    fn drop(&mut self) {
        if panicking() {
            return;
        }

        unsafe {
            if let Some((debug_utils, messenger)) = self.debug_utils.take() {
                debug_utils.destroy_debug_utils_messenger(messenger, None);
            }

            self.instance.destroy_instance(None);
        }
    }
}
