//! Raw OpenCL C ABI: type aliases, constants, and the dynamically loaded
//! function table.
//!
//! Types and values mirror the Khronos `cl.h`/`cl_platform.h` headers
//! exactly. The driver library itself is resolved at run time with
//! platform-standard dynamic library loading rather than at link time, so
//! building (and unit testing) this crate does not require an OpenCL
//! runtime to be installed.

#![allow(non_camel_case_types, non_snake_case)]

use std::env;
use std::ffi::OsStr;

use libloading::Library;
use once_cell::sync::OnceCell;

pub use libc::{c_char, c_void, size_t};

pub type cl_int = i32;
pub type cl_uint = u32;
pub type cl_ulong = u64;
pub type cl_bool = cl_uint;
pub type cl_bitfield = cl_ulong;

pub type cl_platform_id = *mut c_void;
pub type cl_device_id = *mut c_void;
pub type cl_context = *mut c_void;
pub type cl_command_queue = *mut c_void;
pub type cl_mem = *mut c_void;
pub type cl_program = *mut c_void;
pub type cl_kernel = *mut c_void;
pub type cl_event = *mut c_void;
pub type cl_sampler = *mut c_void;

pub type cl_platform_info = cl_uint;
pub type cl_device_info = cl_uint;
pub type cl_device_type = cl_bitfield;
pub type cl_context_info = cl_uint;
pub type cl_context_properties = isize;
pub type cl_command_queue_info = cl_uint;
pub type cl_command_queue_properties = cl_bitfield;
pub type cl_mem_info = cl_uint;
pub type cl_mem_flags = cl_bitfield;
pub type cl_image_info = cl_uint;
pub type cl_sampler_info = cl_uint;
pub type cl_addressing_mode = cl_uint;
pub type cl_filter_mode = cl_uint;
pub type cl_program_info = cl_uint;
pub type cl_program_build_info = cl_uint;
pub type cl_kernel_info = cl_uint;
pub type cl_event_info = cl_uint;
pub type cl_profiling_info = cl_uint;

pub const CL_FALSE: cl_bool = 0;
pub const CL_TRUE: cl_bool = 1;

pub const CL_CONTEXT_PLATFORM: cl_context_properties = 0x1084;

// cl_device_type bits:
pub const CL_DEVICE_TYPE_DEFAULT: cl_bitfield = 1 << 0;
pub const CL_DEVICE_TYPE_CPU: cl_bitfield = 1 << 1;
pub const CL_DEVICE_TYPE_GPU: cl_bitfield = 1 << 2;
pub const CL_DEVICE_TYPE_ACCELERATOR: cl_bitfield = 1 << 3;
pub const CL_DEVICE_TYPE_CUSTOM: cl_bitfield = 1 << 4;
pub const CL_DEVICE_TYPE_ALL: cl_bitfield = 0xFFFF_FFFF;

// cl_command_queue_properties bits:
pub const CL_QUEUE_OUT_OF_ORDER_EXEC_MODE_ENABLE: cl_bitfield = 1 << 0;
pub const CL_QUEUE_PROFILING_ENABLE: cl_bitfield = 1 << 1;

// cl_mem_flags bits:
pub const CL_MEM_READ_WRITE: cl_bitfield = 1 << 0;
pub const CL_MEM_WRITE_ONLY: cl_bitfield = 1 << 1;
pub const CL_MEM_READ_ONLY: cl_bitfield = 1 << 2;
pub const CL_MEM_USE_HOST_PTR: cl_bitfield = 1 << 3;
pub const CL_MEM_ALLOC_HOST_PTR: cl_bitfield = 1 << 4;
pub const CL_MEM_COPY_HOST_PTR: cl_bitfield = 1 << 5;
pub const CL_MEM_HOST_WRITE_ONLY: cl_bitfield = 1 << 7;
pub const CL_MEM_HOST_READ_ONLY: cl_bitfield = 1 << 8;
pub const CL_MEM_HOST_NO_ACCESS: cl_bitfield = 1 << 9;

// cl_addressing_mode:
pub const CL_ADDRESS_NONE: cl_uint = 0x1130;
pub const CL_ADDRESS_CLAMP_TO_EDGE: cl_uint = 0x1131;
pub const CL_ADDRESS_CLAMP: cl_uint = 0x1132;
pub const CL_ADDRESS_REPEAT: cl_uint = 0x1133;
pub const CL_ADDRESS_MIRRORED_REPEAT: cl_uint = 0x1134;

// cl_filter_mode:
pub const CL_FILTER_NEAREST: cl_uint = 0x1140;
pub const CL_FILTER_LINEAR: cl_uint = 0x1141;

// Command execution status:
pub const CL_COMPLETE: cl_int = 0x0;
pub const CL_RUNNING: cl_int = 0x1;
pub const CL_SUBMITTED: cl_int = 0x2;
pub const CL_QUEUED: cl_int = 0x3;

pub type CreateContextCallbackFn =
    extern "C" fn(*const c_char, *const c_void, size_t, *mut c_void);
pub type BuildProgramCallbackFn = extern "C" fn(cl_program, *mut c_void);

/// The resolved OpenCL entry points.
///
/// One pointer per native function used anywhere in this crate. The library
/// handle is kept alive alongside the pointers copied out of it.
pub struct OpenClRuntime {
    _lib: Library,

    pub clGetPlatformIDs:
        unsafe extern "C" fn(cl_uint, *mut cl_platform_id, *mut cl_uint) -> cl_int,
    pub clGetPlatformInfo: unsafe extern "C" fn(
        cl_platform_id,
        cl_platform_info,
        size_t,
        *mut c_void,
        *mut size_t,
    ) -> cl_int,
    pub clGetDeviceIDs: unsafe extern "C" fn(
        cl_platform_id,
        cl_device_type,
        cl_uint,
        *mut cl_device_id,
        *mut cl_uint,
    ) -> cl_int,
    pub clGetDeviceInfo:
        unsafe extern "C" fn(cl_device_id, cl_device_info, size_t, *mut c_void, *mut size_t)
            -> cl_int,

    pub clCreateContext: unsafe extern "C" fn(
        *const cl_context_properties,
        cl_uint,
        *const cl_device_id,
        Option<CreateContextCallbackFn>,
        *mut c_void,
        *mut cl_int,
    ) -> cl_context,
    pub clRetainContext: unsafe extern "C" fn(cl_context) -> cl_int,
    pub clReleaseContext: unsafe extern "C" fn(cl_context) -> cl_int,
    pub clGetContextInfo:
        unsafe extern "C" fn(cl_context, cl_context_info, size_t, *mut c_void, *mut size_t)
            -> cl_int,

    pub clCreateCommandQueue: unsafe extern "C" fn(
        cl_context,
        cl_device_id,
        cl_command_queue_properties,
        *mut cl_int,
    ) -> cl_command_queue,
    pub clRetainCommandQueue: unsafe extern "C" fn(cl_command_queue) -> cl_int,
    pub clReleaseCommandQueue: unsafe extern "C" fn(cl_command_queue) -> cl_int,
    pub clGetCommandQueueInfo: unsafe extern "C" fn(
        cl_command_queue,
        cl_command_queue_info,
        size_t,
        *mut c_void,
        *mut size_t,
    ) -> cl_int,

    pub clCreateBuffer:
        unsafe extern "C" fn(cl_context, cl_mem_flags, size_t, *mut c_void, *mut cl_int) -> cl_mem,
    pub clRetainMemObject: unsafe extern "C" fn(cl_mem) -> cl_int,
    pub clReleaseMemObject: unsafe extern "C" fn(cl_mem) -> cl_int,
    pub clGetMemObjectInfo:
        unsafe extern "C" fn(cl_mem, cl_mem_info, size_t, *mut c_void, *mut size_t) -> cl_int,
    pub clGetImageInfo:
        unsafe extern "C" fn(cl_mem, cl_image_info, size_t, *mut c_void, *mut size_t) -> cl_int,

    pub clCreateSampler: unsafe extern "C" fn(
        cl_context,
        cl_bool,
        cl_addressing_mode,
        cl_filter_mode,
        *mut cl_int,
    ) -> cl_sampler,
    pub clRetainSampler: unsafe extern "C" fn(cl_sampler) -> cl_int,
    pub clReleaseSampler: unsafe extern "C" fn(cl_sampler) -> cl_int,
    pub clGetSamplerInfo:
        unsafe extern "C" fn(cl_sampler, cl_sampler_info, size_t, *mut c_void, *mut size_t)
            -> cl_int,

    pub clCreateProgramWithSource: unsafe extern "C" fn(
        cl_context,
        cl_uint,
        *const *const c_char,
        *const size_t,
        *mut cl_int,
    ) -> cl_program,
    pub clRetainProgram: unsafe extern "C" fn(cl_program) -> cl_int,
    pub clReleaseProgram: unsafe extern "C" fn(cl_program) -> cl_int,
    pub clBuildProgram: unsafe extern "C" fn(
        cl_program,
        cl_uint,
        *const cl_device_id,
        *const c_char,
        Option<BuildProgramCallbackFn>,
        *mut c_void,
    ) -> cl_int,
    pub clGetProgramInfo:
        unsafe extern "C" fn(cl_program, cl_program_info, size_t, *mut c_void, *mut size_t)
            -> cl_int,
    pub clGetProgramBuildInfo: unsafe extern "C" fn(
        cl_program,
        cl_device_id,
        cl_program_build_info,
        size_t,
        *mut c_void,
        *mut size_t,
    ) -> cl_int,

    pub clCreateKernel:
        unsafe extern "C" fn(cl_program, *const c_char, *mut cl_int) -> cl_kernel,
    pub clRetainKernel: unsafe extern "C" fn(cl_kernel) -> cl_int,
    pub clReleaseKernel: unsafe extern "C" fn(cl_kernel) -> cl_int,
    pub clGetKernelInfo:
        unsafe extern "C" fn(cl_kernel, cl_kernel_info, size_t, *mut c_void, *mut size_t)
            -> cl_int,
    pub clSetKernelArg:
        unsafe extern "C" fn(cl_kernel, cl_uint, size_t, *const c_void) -> cl_int,

    pub clEnqueueReadBuffer: unsafe extern "C" fn(
        cl_command_queue,
        cl_mem,
        cl_bool,
        size_t,
        size_t,
        *mut c_void,
        cl_uint,
        *const cl_event,
        *mut cl_event,
    ) -> cl_int,
    pub clEnqueueWriteBuffer: unsafe extern "C" fn(
        cl_command_queue,
        cl_mem,
        cl_bool,
        size_t,
        size_t,
        *const c_void,
        cl_uint,
        *const cl_event,
        *mut cl_event,
    ) -> cl_int,
    pub clEnqueueNDRangeKernel: unsafe extern "C" fn(
        cl_command_queue,
        cl_kernel,
        cl_uint,
        *const size_t,
        *const size_t,
        *const size_t,
        cl_uint,
        *const cl_event,
        *mut cl_event,
    ) -> cl_int,

    pub clWaitForEvents: unsafe extern "C" fn(cl_uint, *const cl_event) -> cl_int,
    pub clGetEventInfo:
        unsafe extern "C" fn(cl_event, cl_event_info, size_t, *mut c_void, *mut size_t) -> cl_int,
    pub clCreateUserEvent: unsafe extern "C" fn(cl_context, *mut cl_int) -> cl_event,
    pub clSetUserEventStatus: unsafe extern "C" fn(cl_event, cl_int) -> cl_int,
    pub clRetainEvent: unsafe extern "C" fn(cl_event) -> cl_int,
    pub clReleaseEvent: unsafe extern "C" fn(cl_event) -> cl_int,
    pub clGetEventProfilingInfo:
        unsafe extern "C" fn(cl_event, cl_profiling_info, size_t, *mut c_void, *mut size_t)
            -> cl_int,

    pub clFlush: unsafe extern "C" fn(cl_command_queue) -> cl_int,
    pub clFinish: unsafe extern "C" fn(cl_command_queue) -> cl_int,
}

// Raw function pointers are inert data; thread safety is the driver's
// concern once they are called.
unsafe impl Send for OpenClRuntime {}
unsafe impl Sync for OpenClRuntime {}

#[cfg(target_os = "linux")]
const LIBRARY_CANDIDATES: &[&str] = &["libOpenCL.so.1", "libOpenCL.so"];
#[cfg(target_os = "windows")]
const LIBRARY_CANDIDATES: &[&str] = &["OpenCL.dll"];
#[cfg(target_os = "macos")]
const LIBRARY_CANDIDATES: &[&str] =
    &["/System/Library/Frameworks/OpenCL.framework/OpenCL"];
#[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
const LIBRARY_CANDIDATES: &[&str] = &["libOpenCL.so"];

fn open_library() -> Result<Library, libloading::Error> {
    // `OPENCL_LIBRARY` overrides the platform-standard names.
    if let Some(path) = env::var_os("OPENCL_LIBRARY") {
        return unsafe { Library::new(OsStr::new(&path)) };
    }

    let mut last_err = None;
    for name in LIBRARY_CANDIDATES {
        match unsafe { Library::new(name) } {
            Ok(lib) => return Ok(lib),
            Err(err) => last_err = Some(err),
        }
    }

    // `LIBRARY_CANDIDATES` is never empty.
    Err(last_err.unwrap())
}

unsafe fn symbol<T: Copy>(lib: &Library, name: &[u8]) -> Result<T, libloading::Error> {
    lib.get::<T>(name).map(|sym| *sym)
}

fn load_runtime() -> Result<OpenClRuntime, libloading::Error> {
    let lib = open_library()?;

    macro_rules! bind {
        ($name:ident) => {
            unsafe { symbol(&lib, concat!(stringify!($name), "\0").as_bytes())? }
        };
    }

    Ok(OpenClRuntime {
        clGetPlatformIDs: bind!(clGetPlatformIDs),
        clGetPlatformInfo: bind!(clGetPlatformInfo),
        clGetDeviceIDs: bind!(clGetDeviceIDs),
        clGetDeviceInfo: bind!(clGetDeviceInfo),
        clCreateContext: bind!(clCreateContext),
        clRetainContext: bind!(clRetainContext),
        clReleaseContext: bind!(clReleaseContext),
        clGetContextInfo: bind!(clGetContextInfo),
        clCreateCommandQueue: bind!(clCreateCommandQueue),
        clRetainCommandQueue: bind!(clRetainCommandQueue),
        clReleaseCommandQueue: bind!(clReleaseCommandQueue),
        clGetCommandQueueInfo: bind!(clGetCommandQueueInfo),
        clCreateBuffer: bind!(clCreateBuffer),
        clRetainMemObject: bind!(clRetainMemObject),
        clReleaseMemObject: bind!(clReleaseMemObject),
        clGetMemObjectInfo: bind!(clGetMemObjectInfo),
        clGetImageInfo: bind!(clGetImageInfo),
        clCreateSampler: bind!(clCreateSampler),
        clRetainSampler: bind!(clRetainSampler),
        clReleaseSampler: bind!(clReleaseSampler),
        clGetSamplerInfo: bind!(clGetSamplerInfo),
        clCreateProgramWithSource: bind!(clCreateProgramWithSource),
        clRetainProgram: bind!(clRetainProgram),
        clReleaseProgram: bind!(clReleaseProgram),
        clBuildProgram: bind!(clBuildProgram),
        clGetProgramInfo: bind!(clGetProgramInfo),
        clGetProgramBuildInfo: bind!(clGetProgramBuildInfo),
        clCreateKernel: bind!(clCreateKernel),
        clRetainKernel: bind!(clRetainKernel),
        clReleaseKernel: bind!(clReleaseKernel),
        clGetKernelInfo: bind!(clGetKernelInfo),
        clSetKernelArg: bind!(clSetKernelArg),
        clEnqueueReadBuffer: bind!(clEnqueueReadBuffer),
        clEnqueueWriteBuffer: bind!(clEnqueueWriteBuffer),
        clEnqueueNDRangeKernel: bind!(clEnqueueNDRangeKernel),
        clWaitForEvents: bind!(clWaitForEvents),
        clGetEventInfo: bind!(clGetEventInfo),
        clCreateUserEvent: bind!(clCreateUserEvent),
        clSetUserEventStatus: bind!(clSetUserEventStatus),
        clRetainEvent: bind!(clRetainEvent),
        clReleaseEvent: bind!(clReleaseEvent),
        clGetEventProfilingInfo: bind!(clGetEventProfilingInfo),
        clFlush: bind!(clFlush),
        clFinish: bind!(clFinish),
        _lib: lib,
    })
}

static RUNTIME: OnceCell<Result<OpenClRuntime, libloading::Error>> = OnceCell::new();

/// Returns the process-wide OpenCL function table, loading the driver
/// library on first use.
///
/// The result of the first load attempt (success or failure) is cached for
/// the life of the process.
pub fn runtime() -> Result<&'static OpenClRuntime, crate::Error> {
    match RUNTIME.get_or_init(load_runtime) {
        Ok(rt) => Ok(rt),
        Err(err) => Err(crate::error::LoadingError::from(err).into()),
    }
}

/// Returns `true` if an OpenCL driver library could be resolved.
pub fn is_available() -> bool {
    runtime().is_ok()
}
