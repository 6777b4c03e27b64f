//! Thin and safe OpenCL bindings.
//!
//! Raw handles from the C ABI are wrapped in nominal zero-cost newtypes
//! with driver reference counts tied to `Clone` and `Drop`. Every native
//! status code is bridged into a `Result`, and info queries return typed
//! values decoded per attribute rather than raw buffers.
//!
//! The driver library is loaded dynamically on first use; building this
//! crate does not require an OpenCL runtime to be installed.
//!
//! ## Example
//!
//! ```rust,no_run
//! use cl_bind as core;
//!
//! fn main() -> core::Result<()> {
//!     let platform = core::get_platform_ids()?[0];
//!     let device = core::get_device_ids(platform, None, None)?[0];
//!     let context = core::create_context(
//!         Some(&core::ContextProperties::new().platform(platform)),
//!         &[device],
//!     )?;
//!     let queue = core::create_command_queue(&context, device, None)?;
//!
//!     if let Some(name) = core::get_device_info(device, core::DeviceInfo::Name, false)? {
//!         println!("device: {}", name);
//!     }
//!
//!     core::finish(&queue)?;
//!     Ok(())
//! }
//! ```

use std::fmt;

use bitflags::bitflags;

pub mod error;
pub mod ffi;
pub mod functions;
pub mod types;
pub mod util;

pub use crate::error::{ApiError, ApiWrapperError, DecodeError, Error, LoadingError,
    ProgramBuildError, Result};
pub use crate::ffi::{cl_context_properties, OpenClRuntime};
pub use crate::functions::*;
pub use crate::types::abs::{CommandQueue, Context, DeviceId, Event, Kernel, Mem, PlatformId,
    Program, Sampler};
pub use crate::types::enums::{AddressingMode, CommandExecutionStatus, CommandQueueInfo,
    ContextInfo, DeviceInfo, EventInfo, FilterMode, ImageInfo, InfoType, InfoValue, KernelArg,
    KernelInfo, MemInfo, PlatformInfo, ProfilingInfo, ProgramBuildInfo, ProgramInfo,
    SamplerInfo, Status};
pub use crate::util::UtilError;

/// The maximum number of devices ever requested from a single platform when
/// the caller does not specify a limit.
pub const DEVICES_MAX: u32 = 64;

/// A plain-old-data scalar type accepted as buffer element or kernel
/// argument.
///
/// ### Safety
///
/// Implementors must have no padding, no invalid bit patterns, and a layout
/// identical to the matching OpenCL C scalar type.
pub unsafe trait OclScl:
    fmt::Debug + Clone + Copy + Default + PartialEq + Send + Sync + 'static
{
}

unsafe impl OclScl for u8 {}
unsafe impl OclScl for i8 {}
unsafe impl OclScl for u16 {}
unsafe impl OclScl for i16 {}
unsafe impl OclScl for u32 {}
unsafe impl OclScl for i32 {}
unsafe impl OclScl for u64 {}
unsafe impl OclScl for i64 {}
unsafe impl OclScl for f32 {}
unsafe impl OclScl for f64 {}

bitflags! {
    /// cl_device_type - bitfield
    pub struct DeviceType: u64 {
        const DEFAULT = ffi::CL_DEVICE_TYPE_DEFAULT;
        const CPU = ffi::CL_DEVICE_TYPE_CPU;
        const GPU = ffi::CL_DEVICE_TYPE_GPU;
        const ACCELERATOR = ffi::CL_DEVICE_TYPE_ACCELERATOR;
        const CUSTOM = ffi::CL_DEVICE_TYPE_CUSTOM;
        const ALL = ffi::CL_DEVICE_TYPE_ALL;
    }
}

impl Default for DeviceType {
    fn default() -> DeviceType {
        DeviceType::ALL
    }
}

bitflags! {
    /// cl_command_queue_properties - bitfield
    pub struct CommandQueueProperties: u64 {
        const OUT_OF_ORDER_EXEC_MODE_ENABLE = ffi::CL_QUEUE_OUT_OF_ORDER_EXEC_MODE_ENABLE;
        const PROFILING_ENABLE = ffi::CL_QUEUE_PROFILING_ENABLE;
    }
}

bitflags! {
    /// cl_mem_flags - bitfield
    pub struct MemFlags: u64 {
        const READ_WRITE = ffi::CL_MEM_READ_WRITE;
        const WRITE_ONLY = ffi::CL_MEM_WRITE_ONLY;
        const READ_ONLY = ffi::CL_MEM_READ_ONLY;
        const USE_HOST_PTR = ffi::CL_MEM_USE_HOST_PTR;
        const ALLOC_HOST_PTR = ffi::CL_MEM_ALLOC_HOST_PTR;
        const COPY_HOST_PTR = ffi::CL_MEM_COPY_HOST_PTR;
        const HOST_WRITE_ONLY = ffi::CL_MEM_HOST_WRITE_ONLY;
        const HOST_READ_ONLY = ffi::CL_MEM_HOST_READ_ONLY;
        const HOST_NO_ACCESS = ffi::CL_MEM_HOST_NO_ACCESS;
    }
}

impl Default for MemFlags {
    fn default() -> MemFlags {
        MemFlags::READ_WRITE
    }
}

/// Context creation properties, assembled into the null-terminated
/// `(key, value)` list the C API expects.
#[derive(Debug, Clone, Default)]
pub struct ContextProperties {
    platform: Option<PlatformId>,
}

impl ContextProperties {
    pub fn new() -> ContextProperties {
        ContextProperties { platform: None }
    }

    /// Specifies the platform to create the context on.
    pub fn platform(mut self, platform: PlatformId) -> ContextProperties {
        self.platform = Some(platform);
        self
    }

    /// Assembles the raw property list, always null-terminated.
    pub fn to_raw(&self) -> Vec<cl_context_properties> {
        let mut raw = Vec::with_capacity(3);
        if let Some(platform) = self.platform {
            raw.push(ffi::CL_CONTEXT_PLATFORM);
            raw.push(platform.as_ptr() as cl_context_properties);
        }
        raw.push(0);
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_properties_raw_list_is_null_terminated() {
        let empty = ContextProperties::new().to_raw();
        assert_eq!(empty, vec![0]);

        let platform = unsafe { PlatformId::from_raw(0x1000 as *mut _) };
        let raw = ContextProperties::new().platform(platform).to_raw();
        assert_eq!(raw.len(), 3);
        assert_eq!(raw[0], ffi::CL_CONTEXT_PLATFORM);
        assert_eq!(raw[1], 0x1000);
        assert_eq!(raw[2], 0);
    }

    #[test]
    fn device_type_default_covers_all() {
        assert_eq!(DeviceType::default(), DeviceType::ALL);
        assert!(DeviceType::ALL.contains(DeviceType::GPU | DeviceType::CPU));
    }
}
