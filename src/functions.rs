//! Thin safe wrappers for the OpenCL function calls.
//!
//! Each wrapper resolves the dynamically loaded function table, performs any
//! pre-call validation that can be done without touching the driver, makes
//! the call, and converts the returned status code into a `Result`. Info
//! queries all funnel through one generic two-phase routine; the
//! per-category getters differ only in the native entry point they close
//! over and the decode table they consult.

use std::collections::BTreeMap;
use std::ffi::CString;
use std::mem;
use std::ptr;
use std::thread;
use std::time::Duration;

use num_traits::FromPrimitive;

use crate::error::{ApiError, ApiWrapperError, DecodeError, ProgramBuildError,
    Result as OclCoreResult};
use crate::ffi::{self, c_char, c_void, cl_bool, cl_context_properties, cl_event, cl_int,
    cl_uint, size_t, CL_FALSE, CL_TRUE};
use crate::types::abs::{CommandQueue, Context, DeviceId, Event, Kernel, Mem, PlatformId,
    Program, Sampler};
use crate::types::enums::{AddressingMode, CommandExecutionStatus, CommandQueueInfo,
    ContextInfo, DeviceInfo, EventInfo, FilterMode, ImageInfo, InfoType, InfoValue,
    KernelArg, KernelInfo, MemInfo, PlatformInfo, ProfilingInfo, ProgramBuildInfo,
    ProgramInfo, SamplerInfo, Status};
use crate::{CommandQueueProperties, ContextProperties, DeviceType, MemFlags, OclScl,
    DEVICES_MAX};

const SUCCESS: cl_int = Status::CL_SUCCESS as cl_int;
const INVALID_VALUE: cl_int = Status::CL_INVALID_VALUE as cl_int;
const PLATFORM_NOT_FOUND_KHR: cl_int = Status::CL_PLATFORM_NOT_FOUND_KHR as cl_int;
const BUILD_PROGRAM_FAILURE: cl_int = Status::CL_BUILD_PROGRAM_FAILURE as cl_int;

// ICD loaders can report an empty platform list transiently while vendor
// drivers register themselves.
const PLATFORM_IDS_ATTEMPT_TIMEOUT_MS: u64 = 2000;
const PLATFORM_IDS_ATTEMPT_INTERVAL_MS: u64 = 100;

/// Evaluates `errcode` and returns an `Err` with a failed-call breakdown if
/// it is not `CL_SUCCESS`.
fn eval_errcode<T, S: Into<String>>(
    errcode: cl_int,
    result: T,
    fn_name: &'static str,
    fn_info: Option<S>,
) -> OclCoreResult<T> {
    if errcode == SUCCESS {
        Ok(result)
    } else {
        Err(ApiError::new(errcode, fn_name, fn_info).into())
    }
}

//============================================================================
//============================ INFO QUERY CORE ===============================
//============================================================================

/// Runs the two-phase size-probe/fetch protocol against any native
/// `clGet...Info` entry point.
///
/// `call` is invoked as `(param_value_size, param_value, param_value_size_ret)`.
/// A reported size of zero means the attribute does not exist for this
/// object and yields `Ok(None)`. When `silent` is set, a `CL_INVALID_VALUE`
/// status from either phase is treated the same way (the attribute belongs
/// to a newer API level than the driver); every other failure status is an
/// error regardless.
///
/// The byte count written during the fetch phase is authoritative and the
/// returned buffer is truncated to it.
fn get_info_bytes<F>(
    fn_name: &'static str,
    fn_info: Option<String>,
    silent: bool,
    mut call: F,
) -> OclCoreResult<Option<Vec<u8>>>
where
    F: FnMut(size_t, *mut c_void, *mut size_t) -> cl_int,
{
    let mut size: size_t = 0;
    let errcode = call(0, ptr::null_mut(), &mut size);
    if errcode != SUCCESS {
        if silent && errcode == INVALID_VALUE {
            return Ok(None);
        }
        return Err(ApiError::new(errcode, fn_name, fn_info).into());
    }
    if size == 0 {
        return Ok(None);
    }

    let mut bytes = vec![0u8; size];
    let mut written: size_t = 0;
    let errcode = call(size, bytes.as_mut_ptr() as *mut c_void, &mut written);
    if errcode != SUCCESS {
        if silent && errcode == INVALID_VALUE {
            return Ok(None);
        }
        return Err(ApiError::new(errcode, fn_name, fn_info).into());
    }
    if written == 0 {
        return Ok(None);
    }

    bytes.truncate(written);
    Ok(Some(bytes))
}

//============================================================================
//============================= PLATFORM APIS ================================
//============================================================================

/// Returns a list of available platforms.
///
/// Waits out a transient `CL_PLATFORM_NOT_FOUND_KHR` from the ICD loader
/// before giving up on it.
pub fn get_platform_ids() -> OclCoreResult<Vec<PlatformId>> {
    let rt = ffi::runtime()?;
    let mut num_platforms: cl_uint = 0;

    let mut errcode =
        unsafe { (rt.clGetPlatformIDs)(0, ptr::null_mut(), &mut num_platforms) };
    let mut waited_ms = 0u64;
    while errcode == PLATFORM_NOT_FOUND_KHR {
        if waited_ms >= PLATFORM_IDS_ATTEMPT_TIMEOUT_MS {
            return Err(ApiWrapperError::GetPlatformIdsPlatformListUnavailable(
                PLATFORM_IDS_ATTEMPT_TIMEOUT_MS / 1000,
            )
            .into());
        }
        thread::sleep(Duration::from_millis(PLATFORM_IDS_ATTEMPT_INTERVAL_MS));
        waited_ms += PLATFORM_IDS_ATTEMPT_INTERVAL_MS;
        errcode = unsafe { (rt.clGetPlatformIDs)(0, ptr::null_mut(), &mut num_platforms) };
    }
    eval_errcode(errcode, (), "clGetPlatformIDs", None::<String>)?;

    if num_platforms == 0 {
        return Ok(Vec::new());
    }

    let mut ids: Vec<*mut c_void> = vec![ptr::null_mut(); num_platforms as usize];
    let errcode =
        unsafe { (rt.clGetPlatformIDs)(num_platforms, ids.as_mut_ptr(), ptr::null_mut()) };
    eval_errcode(errcode, (), "clGetPlatformIDs", None::<String>)?;

    Ok(ids
        .into_iter()
        .map(|ptr| unsafe { PlatformId::from_raw(ptr) })
        .collect())
}

/// Returns one platform attribute, decoded per its documented shape.
///
/// `Ok(None)` means the attribute does not exist at the driver's API level.
/// See [`get_info_bytes`] for the `silent` contract.
pub fn get_platform_info(
    platform: PlatformId,
    request: PlatformInfo,
    silent: bool,
) -> OclCoreResult<Option<InfoValue>> {
    let rt = ffi::runtime()?;
    let bytes = get_info_bytes(
        "clGetPlatformInfo",
        Some(format!("{:?}", request)),
        silent,
        |size, value, size_ret| unsafe {
            (rt.clGetPlatformInfo)(platform.as_ptr(), request as u32, size, value, size_ret)
        },
    )?;
    match bytes {
        Some(bytes) => request.value_type().decode(bytes),
        None => Ok(None),
    }
}

/// Queries every known platform attribute, skipping the ones this driver
/// does not understand.
pub fn get_all_platform_info(
    platform: PlatformId,
) -> OclCoreResult<BTreeMap<PlatformInfo, InfoValue>> {
    let mut map = BTreeMap::new();
    for &request in PlatformInfo::ALL {
        if let Some(value) = get_platform_info(platform, request, true)? {
            map.insert(request, value);
        }
    }
    Ok(map)
}

//============================================================================
//============================== DEVICE APIS =================================
//============================================================================

/// Returns a list of available devices for a particular platform.
pub fn get_device_ids(
    platform: PlatformId,
    device_types: Option<DeviceType>,
    devices_max: Option<u32>,
) -> OclCoreResult<Vec<DeviceId>> {
    let rt = ffi::runtime()?;
    let device_types = device_types.unwrap_or(DeviceType::ALL);
    let devices_max = match devices_max {
        Some(0) => return Err(ApiWrapperError::GetDeviceIdsDevicesMaxZero.into()),
        Some(d) => d,
        None => DEVICES_MAX,
    };

    let mut ids: Vec<*mut c_void> = vec![ptr::null_mut(); devices_max as usize];
    let mut num_devices: cl_uint = 0;
    let errcode = unsafe {
        (rt.clGetDeviceIDs)(
            platform.as_ptr(),
            device_types.bits(),
            devices_max,
            ids.as_mut_ptr(),
            &mut num_devices,
        )
    };
    eval_errcode(errcode, (), "clGetDeviceIDs", None::<String>)?;

    ids.truncate(num_devices as usize);
    Ok(ids
        .into_iter()
        .map(|ptr| unsafe { DeviceId::from_raw(ptr) })
        .collect())
}

/// Returns one device attribute, decoded per its documented shape.
///
/// `DeviceInfo::MaxWorkItemSizes` has no self-describing length; its element
/// count is taken from a companion `MaxWorkItemDimensions` query and the
/// two must agree.
pub fn get_device_info(
    device: DeviceId,
    request: DeviceInfo,
    silent: bool,
) -> OclCoreResult<Option<InfoValue>> {
    let rt = ffi::runtime()?;
    let bytes = get_info_bytes(
        "clGetDeviceInfo",
        Some(format!("{:?}", request)),
        silent,
        |size, value, size_ret| unsafe {
            (rt.clGetDeviceInfo)(device.as_ptr(), request as u32, size, value, size_ret)
        },
    )?;
    let bytes = match bytes {
        Some(bytes) => bytes,
        None => return Ok(None),
    };

    match request.value_type() {
        InfoType::WorkItemSizes => {
            let dims = match get_device_info(device, DeviceInfo::MaxWorkItemDimensions, silent)? {
                Some(InfoValue::Uint(dims)) => dims,
                _ => return Err(DecodeError::CompanionMismatch.into()),
            };
            InfoType::decode_work_item_sizes(bytes, dims).map(Some)
        }
        value_type => value_type.decode(bytes),
    }
}

/// Queries every known device attribute, skipping the ones this driver
/// does not understand.
pub fn get_all_device_info(device: DeviceId) -> OclCoreResult<BTreeMap<DeviceInfo, InfoValue>> {
    let mut map = BTreeMap::new();
    for &request in DeviceInfo::ALL {
        if let Some(value) = get_device_info(device, request, true)? {
            map.insert(request, value);
        }
    }
    Ok(map)
}

//============================================================================
//============================== CONTEXT APIS ================================
//============================================================================

/// Creates a context for one or more devices.
pub fn create_context(
    properties: Option<&ContextProperties>,
    device_ids: &[DeviceId],
) -> OclCoreResult<Context> {
    if device_ids.is_empty() {
        return Err(ApiWrapperError::CreateContextNoDevicesSpecified.into());
    }
    let rt = ffi::runtime()?;

    let props_raw: Option<Vec<cl_context_properties>> =
        properties.map(ContextProperties::to_raw);
    let props_ptr = props_raw
        .as_ref()
        .map(|p| p.as_ptr())
        .unwrap_or(ptr::null());

    let mut errcode: cl_int = 0;
    let context_ptr = unsafe {
        (rt.clCreateContext)(
            props_ptr,
            device_ids.len() as cl_uint,
            device_ids.as_ptr() as *const *mut c_void,
            None,
            ptr::null_mut(),
            &mut errcode,
        )
    };
    eval_errcode(errcode, context_ptr, "clCreateContext", None::<String>)
        .map(|ptr| unsafe { Context::from_raw_create_ptr(ptr) })
}

pub unsafe fn retain_context(context: &Context) -> OclCoreResult<()> {
    let rt = ffi::runtime()?;
    eval_errcode(
        (rt.clRetainContext)(context.as_ptr()),
        (),
        "clRetainContext",
        None::<String>,
    )
}

pub unsafe fn release_context(context: &Context) -> OclCoreResult<()> {
    let rt = ffi::runtime()?;
    eval_errcode(
        (rt.clReleaseContext)(context.as_ptr()),
        (),
        "clReleaseContext",
        None::<String>,
    )
}

/// Returns one context attribute, decoded per its documented shape.
pub fn get_context_info(
    context: &Context,
    request: ContextInfo,
    silent: bool,
) -> OclCoreResult<Option<InfoValue>> {
    let rt = ffi::runtime()?;
    let bytes = get_info_bytes(
        "clGetContextInfo",
        Some(format!("{:?}", request)),
        silent,
        |size, value, size_ret| unsafe {
            (rt.clGetContextInfo)(context.as_ptr(), request as u32, size, value, size_ret)
        },
    )?;
    match bytes {
        Some(bytes) => request.value_type().decode(bytes),
        None => Ok(None),
    }
}

pub fn get_all_context_info(
    context: &Context,
) -> OclCoreResult<BTreeMap<ContextInfo, InfoValue>> {
    let mut map = BTreeMap::new();
    for &request in ContextInfo::ALL {
        if let Some(value) = get_context_info(context, request, true)? {
            map.insert(request, value);
        }
    }
    Ok(map)
}

//============================================================================
//=========================== COMMAND QUEUE APIS =============================
//============================================================================

/// Creates a command queue on the specified device.
pub fn create_command_queue(
    context: &Context,
    device: DeviceId,
    properties: Option<CommandQueueProperties>,
) -> OclCoreResult<CommandQueue> {
    let rt = ffi::runtime()?;
    let properties = properties.unwrap_or_else(CommandQueueProperties::empty);

    let mut errcode: cl_int = 0;
    let queue_ptr = unsafe {
        (rt.clCreateCommandQueue)(
            context.as_ptr(),
            device.as_ptr(),
            properties.bits(),
            &mut errcode,
        )
    };
    eval_errcode(errcode, queue_ptr, "clCreateCommandQueue", None::<String>)
        .map(|ptr| unsafe { CommandQueue::from_raw_create_ptr(ptr) })
}

pub unsafe fn retain_command_queue(queue: &CommandQueue) -> OclCoreResult<()> {
    let rt = ffi::runtime()?;
    eval_errcode(
        (rt.clRetainCommandQueue)(queue.as_ptr()),
        (),
        "clRetainCommandQueue",
        None::<String>,
    )
}

pub unsafe fn release_command_queue(queue: &CommandQueue) -> OclCoreResult<()> {
    let rt = ffi::runtime()?;
    eval_errcode(
        (rt.clReleaseCommandQueue)(queue.as_ptr()),
        (),
        "clReleaseCommandQueue",
        None::<String>,
    )
}

pub fn get_command_queue_info(
    queue: &CommandQueue,
    request: CommandQueueInfo,
    silent: bool,
) -> OclCoreResult<Option<InfoValue>> {
    let rt = ffi::runtime()?;
    let bytes = get_info_bytes(
        "clGetCommandQueueInfo",
        Some(format!("{:?}", request)),
        silent,
        |size, value, size_ret| unsafe {
            (rt.clGetCommandQueueInfo)(queue.as_ptr(), request as u32, size, value, size_ret)
        },
    )?;
    match bytes {
        Some(bytes) => request.value_type().decode(bytes),
        None => Ok(None),
    }
}

pub fn get_all_command_queue_info(
    queue: &CommandQueue,
) -> OclCoreResult<BTreeMap<CommandQueueInfo, InfoValue>> {
    let mut map = BTreeMap::new();
    for &request in CommandQueueInfo::ALL {
        if let Some(value) = get_command_queue_info(queue, request, true)? {
            map.insert(request, value);
        }
    }
    Ok(map)
}

/// Blocks until all previously queued commands have completed.
pub fn finish(queue: &CommandQueue) -> OclCoreResult<()> {
    let rt = ffi::runtime()?;
    let errcode = unsafe { (rt.clFinish)(queue.as_ptr()) };
    eval_errcode(errcode, (), "clFinish", None::<String>)
}

/// Issues all previously queued commands to the device.
pub fn flush(queue: &CommandQueue) -> OclCoreResult<()> {
    let rt = ffi::runtime()?;
    let errcode = unsafe { (rt.clFlush)(queue.as_ptr()) };
    eval_errcode(errcode, (), "clFlush", None::<String>)
}

//============================================================================
//=========================== MEMORY OBJECT APIS =============================
//============================================================================

/// Creates a buffer sized for `len` elements of `T`, optionally pre-filled
/// from `data`.
///
/// ### Safety
///
/// When `flags` contains `USE_HOST_PTR`, the driver may continue referencing
/// `data`'s memory after this call returns; the caller is responsible for
/// keeping it alive and unmoved for the life of the buffer.
pub unsafe fn create_buffer<T: OclScl>(
    context: &Context,
    flags: MemFlags,
    len: usize,
    data: Option<&[T]>,
) -> OclCoreResult<Mem> {
    let rt = ffi::runtime()?;

    let host_ptr = match data {
        Some(data) => {
            if data.len() != len {
                return Err(ApiWrapperError::CreateBufferDataLengthMismatch.into());
            }
            data.as_ptr() as *mut c_void
        }
        None => ptr::null_mut(),
    };

    let mut errcode: cl_int = 0;
    let buf_ptr = (rt.clCreateBuffer)(
        context.as_ptr(),
        flags.bits(),
        len * mem::size_of::<T>(),
        host_ptr,
        &mut errcode,
    );
    eval_errcode(errcode, buf_ptr, "clCreateBuffer", None::<String>)
        .map(|ptr| Mem::from_raw_create_ptr(ptr))
}

pub unsafe fn retain_mem_object(mem: &Mem) -> OclCoreResult<()> {
    let rt = ffi::runtime()?;
    eval_errcode(
        (rt.clRetainMemObject)(mem.as_ptr()),
        (),
        "clRetainMemObject",
        None::<String>,
    )
}

pub unsafe fn release_mem_object(mem: &Mem) -> OclCoreResult<()> {
    let rt = ffi::runtime()?;
    eval_errcode(
        (rt.clReleaseMemObject)(mem.as_ptr()),
        (),
        "clReleaseMemObject",
        None::<String>,
    )
}

pub fn get_mem_object_info(
    mem: &Mem,
    request: MemInfo,
    silent: bool,
) -> OclCoreResult<Option<InfoValue>> {
    let rt = ffi::runtime()?;
    let bytes = get_info_bytes(
        "clGetMemObjectInfo",
        Some(format!("{:?}", request)),
        silent,
        |size, value, size_ret| unsafe {
            (rt.clGetMemObjectInfo)(mem.as_ptr(), request as u32, size, value, size_ret)
        },
    )?;
    match bytes {
        Some(bytes) => request.value_type().decode(bytes),
        None => Ok(None),
    }
}

pub fn get_all_mem_object_info(mem: &Mem) -> OclCoreResult<BTreeMap<MemInfo, InfoValue>> {
    let mut map = BTreeMap::new();
    for &request in MemInfo::ALL {
        if let Some(value) = get_mem_object_info(mem, request, true)? {
            map.insert(request, value);
        }
    }
    Ok(map)
}

/// Returns one image attribute. Only meaningful for memory objects created
/// as images.
pub fn get_image_info(
    mem: &Mem,
    request: ImageInfo,
    silent: bool,
) -> OclCoreResult<Option<InfoValue>> {
    let rt = ffi::runtime()?;
    let bytes = get_info_bytes(
        "clGetImageInfo",
        Some(format!("{:?}", request)),
        silent,
        |size, value, size_ret| unsafe {
            (rt.clGetImageInfo)(mem.as_ptr(), request as u32, size, value, size_ret)
        },
    )?;
    match bytes {
        Some(bytes) => request.value_type().decode(bytes),
        None => Ok(None),
    }
}

pub fn get_all_image_info(mem: &Mem) -> OclCoreResult<BTreeMap<ImageInfo, InfoValue>> {
    let mut map = BTreeMap::new();
    for &request in ImageInfo::ALL {
        if let Some(value) = get_image_info(mem, request, true)? {
            map.insert(request, value);
        }
    }
    Ok(map)
}

//============================================================================
//============================== SAMPLER APIS ================================
//============================================================================

/// Creates a sampler.
pub fn create_sampler(
    context: &Context,
    normalize_coords: bool,
    addressing_mode: AddressingMode,
    filter_mode: FilterMode,
) -> OclCoreResult<Sampler> {
    let rt = ffi::runtime()?;
    let mut errcode: cl_int = 0;
    let sampler_ptr = unsafe {
        (rt.clCreateSampler)(
            context.as_ptr(),
            normalize_coords as cl_bool,
            addressing_mode as u32,
            filter_mode as u32,
            &mut errcode,
        )
    };
    eval_errcode(errcode, sampler_ptr, "clCreateSampler", None::<String>)
        .map(|ptr| unsafe { Sampler::from_raw_create_ptr(ptr) })
}

pub unsafe fn retain_sampler(sampler: &Sampler) -> OclCoreResult<()> {
    let rt = ffi::runtime()?;
    eval_errcode(
        (rt.clRetainSampler)(sampler.as_ptr()),
        (),
        "clRetainSampler",
        None::<String>,
    )
}

pub unsafe fn release_sampler(sampler: &Sampler) -> OclCoreResult<()> {
    let rt = ffi::runtime()?;
    eval_errcode(
        (rt.clReleaseSampler)(sampler.as_ptr()),
        (),
        "clReleaseSampler",
        None::<String>,
    )
}

pub fn get_sampler_info(
    sampler: &Sampler,
    request: SamplerInfo,
    silent: bool,
) -> OclCoreResult<Option<InfoValue>> {
    let rt = ffi::runtime()?;
    let bytes = get_info_bytes(
        "clGetSamplerInfo",
        Some(format!("{:?}", request)),
        silent,
        |size, value, size_ret| unsafe {
            (rt.clGetSamplerInfo)(sampler.as_ptr(), request as u32, size, value, size_ret)
        },
    )?;
    match bytes {
        Some(bytes) => request.value_type().decode(bytes),
        None => Ok(None),
    }
}

pub fn get_all_sampler_info(
    sampler: &Sampler,
) -> OclCoreResult<BTreeMap<SamplerInfo, InfoValue>> {
    let mut map = BTreeMap::new();
    for &request in SamplerInfo::ALL {
        if let Some(value) = get_sampler_info(sampler, request, true)? {
            map.insert(request, value);
        }
    }
    Ok(map)
}

//============================================================================
//============================== PROGRAM APIS ================================
//============================================================================

/// Creates a program from one or more source strings.
pub fn create_program_with_source(
    context: &Context,
    src_strings: &[CString],
) -> OclCoreResult<Program> {
    if src_strings.is_empty() {
        return Err(ApiWrapperError::CreateProgramWithSourceSourcesLenZero.into());
    }
    let rt = ffi::runtime()?;

    // Lengths exclude the trailing nul; the driver accepts either
    // convention but explicit lengths keep embedded data intact.
    let lengths: Vec<size_t> = src_strings.iter().map(|s| s.as_bytes().len()).collect();
    let ptrs: Vec<*const c_char> = src_strings.iter().map(|s| s.as_ptr()).collect();

    let mut errcode: cl_int = 0;
    let program_ptr = unsafe {
        (rt.clCreateProgramWithSource)(
            context.as_ptr(),
            src_strings.len() as cl_uint,
            ptrs.as_ptr(),
            lengths.as_ptr(),
            &mut errcode,
        )
    };
    eval_errcode(errcode, program_ptr, "clCreateProgramWithSource", None::<String>)
        .map(|ptr| unsafe { Program::from_raw_create_ptr(ptr) })
}

pub unsafe fn retain_program(program: &Program) -> OclCoreResult<()> {
    let rt = ffi::runtime()?;
    eval_errcode(
        (rt.clRetainProgram)(program.as_ptr()),
        (),
        "clRetainProgram",
        None::<String>,
    )
}

pub unsafe fn release_program(program: &Program) -> OclCoreResult<()> {
    let rt = ffi::runtime()?;
    eval_errcode(
        (rt.clReleaseProgram)(program.as_ptr()),
        (),
        "clReleaseProgram",
        None::<String>,
    )
}

/// Builds a program for the given devices.
///
/// On a build failure the accumulated device build logs are fetched and
/// returned in the error instead of the bare status code.
pub fn build_program(
    program: &Program,
    device_ids: Option<&[DeviceId]>,
    options: &CString,
) -> OclCoreResult<()> {
    let rt = ffi::runtime()?;

    let (num_devices, device_ptr) = match device_ids {
        Some(ids) if !ids.is_empty() => {
            (ids.len() as cl_uint, ids.as_ptr() as *const *mut c_void)
        }
        _ => (0, ptr::null()),
    };

    let errcode = unsafe {
        (rt.clBuildProgram)(
            program.as_ptr(),
            num_devices,
            device_ptr,
            options.as_ptr(),
            None,
            ptr::null_mut(),
        )
    };

    if errcode == BUILD_PROGRAM_FAILURE {
        let device_ids = match device_ids {
            Some(ids) => ids.to_vec(),
            None => program_devices(program)?,
        };
        program_build_err(program, &device_ids)
    } else {
        eval_errcode(errcode, (), "clBuildProgram", None::<String>)
    }
}

/// The devices a program is associated with, for build log retrieval.
fn program_devices(program: &Program) -> OclCoreResult<Vec<DeviceId>> {
    match get_program_info(program, ProgramInfo::Devices, false) {
        Ok(Some(InfoValue::Devices(devices))) => Ok(devices),
        Ok(_) => Ok(Vec::new()),
        Err(err) => Err(ProgramBuildError::InfoResult(Box::new(err)).into()),
    }
}

/// Collects the build logs for `device_ids` and returns the failure they
/// describe. Always an `Err` once the driver has rejected a build.
pub fn program_build_err(program: &Program, device_ids: &[DeviceId]) -> OclCoreResult<()> {
    if device_ids.is_empty() {
        return Err(ProgramBuildError::DeviceListEmpty.into());
    }

    let mut logs = Vec::with_capacity(device_ids.len());
    for &device_id in device_ids {
        match get_program_build_info(program, device_id, ProgramBuildInfo::BuildLog, false) {
            Ok(Some(InfoValue::String(log))) => logs.push(log),
            Ok(_) => (),
            Err(err) => return Err(ProgramBuildError::InfoResult(Box::new(err)).into()),
        }
    }

    Err(build_failure_err(&logs))
}

/// The failure to report for a rejected build: the first non-empty log, or
/// the bare `CL_BUILD_PROGRAM_FAILURE` status when every log is empty. The
/// native failure is never discarded.
fn build_failure_err(logs: &[String]) -> crate::Error {
    for log in logs {
        let log = log.trim();
        if !log.is_empty() {
            return ProgramBuildError::BuildLog(log.into()).into();
        }
    }
    ApiError::new(BUILD_PROGRAM_FAILURE, "clBuildProgram", None::<String>).into()
}

pub fn get_program_info(
    program: &Program,
    request: ProgramInfo,
    silent: bool,
) -> OclCoreResult<Option<InfoValue>> {
    let rt = ffi::runtime()?;
    let bytes = get_info_bytes(
        "clGetProgramInfo",
        Some(format!("{:?}", request)),
        silent,
        |size, value, size_ret| unsafe {
            (rt.clGetProgramInfo)(program.as_ptr(), request as u32, size, value, size_ret)
        },
    )?;
    match bytes {
        Some(bytes) => request.value_type().decode(bytes),
        None => Ok(None),
    }
}

pub fn get_all_program_info(
    program: &Program,
) -> OclCoreResult<BTreeMap<ProgramInfo, InfoValue>> {
    let mut map = BTreeMap::new();
    for &request in ProgramInfo::ALL {
        // Binaries require caller-arranged pointers; never bulk-queried.
        if request == ProgramInfo::Binaries {
            continue;
        }
        if let Some(value) = get_program_info(program, request, true)? {
            map.insert(request, value);
        }
    }
    Ok(map)
}

pub fn get_program_build_info(
    program: &Program,
    device: DeviceId,
    request: ProgramBuildInfo,
    silent: bool,
) -> OclCoreResult<Option<InfoValue>> {
    let rt = ffi::runtime()?;
    let bytes = get_info_bytes(
        "clGetProgramBuildInfo",
        Some(format!("{:?}", request)),
        silent,
        |size, value, size_ret| unsafe {
            (rt.clGetProgramBuildInfo)(
                program.as_ptr(),
                device.as_ptr(),
                request as u32,
                size,
                value,
                size_ret,
            )
        },
    )?;
    match bytes {
        Some(bytes) => request.value_type().decode(bytes),
        None => Ok(None),
    }
}

pub fn get_all_program_build_info(
    program: &Program,
    device: DeviceId,
) -> OclCoreResult<BTreeMap<ProgramBuildInfo, InfoValue>> {
    let mut map = BTreeMap::new();
    for &request in ProgramBuildInfo::ALL {
        if let Some(value) = get_program_build_info(program, device, request, true)? {
            map.insert(request, value);
        }
    }
    Ok(map)
}

//============================================================================
//============================== KERNEL APIS =================================
//============================================================================

/// Creates a kernel from a built program.
pub fn create_kernel(program: &Program, name: &str) -> OclCoreResult<Kernel> {
    let rt = ffi::runtime()?;
    let c_name = CString::new(name)?;

    let mut errcode: cl_int = 0;
    let kernel_ptr =
        unsafe { (rt.clCreateKernel)(program.as_ptr(), c_name.as_ptr(), &mut errcode) };
    eval_errcode(errcode, kernel_ptr, "clCreateKernel", Some(name))
        .map(|ptr| unsafe { Kernel::from_raw_create_ptr(ptr) })
}

pub unsafe fn retain_kernel(kernel: &Kernel) -> OclCoreResult<()> {
    let rt = ffi::runtime()?;
    eval_errcode(
        (rt.clRetainKernel)(kernel.as_ptr()),
        (),
        "clRetainKernel",
        None::<String>,
    )
}

pub unsafe fn release_kernel(kernel: &Kernel) -> OclCoreResult<()> {
    let rt = ffi::runtime()?;
    eval_errcode(
        (rt.clReleaseKernel)(kernel.as_ptr()),
        (),
        "clReleaseKernel",
        None::<String>,
    )
}

/// Sets one kernel argument.
///
/// The byte size handed to the driver is computed from the argument variant
/// itself: pointer width for memory objects, `size_of::<T>()` per element
/// for scalars and vectors, and the requested scratch size for local
/// allocations.
pub fn set_kernel_arg<T: OclScl>(
    kernel: &Kernel,
    arg_index: u32,
    arg: KernelArg<T>,
) -> OclCoreResult<()> {
    let rt = ffi::runtime()?;

    let (arg_size, arg_value): (size_t, *const c_void) = match arg {
        KernelArg::Mem(mem) => (
            mem::size_of::<*mut c_void>(),
            mem as *const Mem as *const c_void,
        ),
        KernelArg::Scalar(ref scalar) => {
            (mem::size_of::<T>(), scalar as *const T as *const c_void)
        }
        KernelArg::Vector(vector) => (
            vector.len() * mem::size_of::<T>(),
            vector.as_ptr() as *const c_void,
        ),
        KernelArg::Local(len) => (len * mem::size_of::<T>(), ptr::null()),
        KernelArg::UnsafePointer { size, value } => (size, value),
    };

    let errcode =
        unsafe { (rt.clSetKernelArg)(kernel.as_ptr(), arg_index, arg_size, arg_value) };
    eval_errcode(
        errcode,
        (),
        "clSetKernelArg",
        Some(format!("index: {}", arg_index)),
    )
}

pub fn get_kernel_info(
    kernel: &Kernel,
    request: KernelInfo,
    silent: bool,
) -> OclCoreResult<Option<InfoValue>> {
    let rt = ffi::runtime()?;
    let bytes = get_info_bytes(
        "clGetKernelInfo",
        Some(format!("{:?}", request)),
        silent,
        |size, value, size_ret| unsafe {
            (rt.clGetKernelInfo)(kernel.as_ptr(), request as u32, size, value, size_ret)
        },
    )?;
    match bytes {
        Some(bytes) => request.value_type().decode(bytes),
        None => Ok(None),
    }
}

pub fn get_all_kernel_info(kernel: &Kernel) -> OclCoreResult<BTreeMap<KernelInfo, InfoValue>> {
    let mut map = BTreeMap::new();
    for &request in KernelInfo::ALL {
        if let Some(value) = get_kernel_info(kernel, request, true)? {
            map.insert(request, value);
        }
    }
    Ok(map)
}

//============================================================================
//============================== EVENT APIS ==================================
//============================================================================

fn wait_list_ptrs(wait_list: Option<&[Event]>) -> (cl_uint, *const cl_event) {
    match wait_list {
        Some(list) if !list.is_empty() => {
            (list.len() as cl_uint, list.as_ptr() as *const cl_event)
        }
        _ => (0, ptr::null()),
    }
}

/// Blocks until all `events` are complete.
pub fn wait_for_events(events: &[Event]) -> OclCoreResult<()> {
    if events.is_empty() {
        return Ok(());
    }
    let rt = ffi::runtime()?;
    let errcode = unsafe {
        (rt.clWaitForEvents)(events.len() as cl_uint, events.as_ptr() as *const cl_event)
    };
    eval_errcode(errcode, (), "clWaitForEvents", None::<String>)
}

pub fn get_event_info(
    event: &Event,
    request: EventInfo,
    silent: bool,
) -> OclCoreResult<Option<InfoValue>> {
    let rt = ffi::runtime()?;
    let bytes = get_info_bytes(
        "clGetEventInfo",
        Some(format!("{:?}", request)),
        silent,
        |size, value, size_ret| unsafe {
            (rt.clGetEventInfo)(event.as_ptr(), request as u32, size, value, size_ret)
        },
    )?;
    match bytes {
        Some(bytes) => request.value_type().decode(bytes),
        None => Ok(None),
    }
}

pub fn get_all_event_info(event: &Event) -> OclCoreResult<BTreeMap<EventInfo, InfoValue>> {
    let mut map = BTreeMap::new();
    for &request in EventInfo::ALL {
        if let Some(value) = get_event_info(event, request, true)? {
            map.insert(request, value);
        }
    }
    Ok(map)
}

/// Returns an event's current execution status.
///
/// A negative status means the command terminated abnormally and is
/// reported as the API error it carries.
pub fn get_event_status(event: &Event) -> OclCoreResult<CommandExecutionStatus> {
    event_status_from_info(get_event_info(event, EventInfo::CommandExecutionStatus, false)?)
}

fn event_status_from_info(info: Option<InfoValue>) -> OclCoreResult<CommandExecutionStatus> {
    let raw = match info {
        Some(InfoValue::Int(raw)) => raw,
        _ => return Err(DecodeError::EventStatusShape.into()),
    };

    if raw < 0 {
        return Err(ApiError::new(raw, "clGetEventInfo", Some("command terminated")).into());
    }
    CommandExecutionStatus::from_i32(raw)
        .ok_or_else(|| format!("unknown event execution status: {}", raw).into())
}

/// Creates a user event, initially in the submitted state.
pub fn create_user_event(context: &Context) -> OclCoreResult<Event> {
    let rt = ffi::runtime()?;
    let mut errcode: cl_int = 0;
    let event_ptr = unsafe { (rt.clCreateUserEvent)(context.as_ptr(), &mut errcode) };
    eval_errcode(errcode, event_ptr, "clCreateUserEvent", None::<String>)
        .map(|ptr| unsafe { Event::from_raw_create_ptr(ptr) })
}

/// Transitions a user event. Only `Complete` is a legal target state.
pub fn set_user_event_status(
    event: &Event,
    status: CommandExecutionStatus,
) -> OclCoreResult<()> {
    let rt = ffi::runtime()?;
    let errcode = unsafe { (rt.clSetUserEventStatus)(event.as_ptr(), status as cl_int) };
    eval_errcode(errcode, (), "clSetUserEventStatus", None::<String>)
}

pub unsafe fn retain_event(event: &Event) -> OclCoreResult<()> {
    let rt = ffi::runtime()?;
    eval_errcode(
        (rt.clRetainEvent)(event.as_ptr()),
        (),
        "clRetainEvent",
        None::<String>,
    )
}

pub unsafe fn release_event(event: &Event) -> OclCoreResult<()> {
    let rt = ffi::runtime()?;
    eval_errcode(
        (rt.clReleaseEvent)(event.as_ptr()),
        (),
        "clReleaseEvent",
        None::<String>,
    )
}

/// Returns one profiling counter for an event. Requires the queue to have
/// been created with profiling enabled.
pub fn get_event_profiling_info(
    event: &Event,
    request: ProfilingInfo,
    silent: bool,
) -> OclCoreResult<Option<InfoValue>> {
    let rt = ffi::runtime()?;
    let bytes = get_info_bytes(
        "clGetEventProfilingInfo",
        Some(format!("{:?}", request)),
        silent,
        |size, value, size_ret| unsafe {
            (rt.clGetEventProfilingInfo)(event.as_ptr(), request as u32, size, value, size_ret)
        },
    )?;
    match bytes {
        Some(bytes) => request.value_type().decode(bytes),
        None => Ok(None),
    }
}

pub fn get_all_event_profiling_info(
    event: &Event,
) -> OclCoreResult<BTreeMap<ProfilingInfo, InfoValue>> {
    let mut map = BTreeMap::new();
    for &request in ProfilingInfo::ALL {
        if let Some(value) = get_event_profiling_info(event, request, true)? {
            map.insert(request, value);
        }
    }
    Ok(map)
}

//============================================================================
//============================== ENQUEUE APIS ================================
//============================================================================

/// Enqueues a read from device memory into `data`.
///
/// ### Safety
///
/// When `block` is `false` the driver writes into `data` asynchronously;
/// the caller must keep the slice alive and unaliased until the returned
/// event completes.
pub unsafe fn enqueue_read_buffer<T: OclScl>(
    queue: &CommandQueue,
    buffer: &Mem,
    block: bool,
    offset: usize,
    data: &mut [T],
    wait_list: Option<&[Event]>,
) -> OclCoreResult<Event> {
    let rt = ffi::runtime()?;
    let (num_wait, wait_ptr) = wait_list_ptrs(wait_list);
    let mut new_event: cl_event = ptr::null_mut();

    let errcode = (rt.clEnqueueReadBuffer)(
        queue.as_ptr(),
        buffer.as_ptr(),
        if block { CL_TRUE } else { CL_FALSE },
        offset * mem::size_of::<T>(),
        data.len() * mem::size_of::<T>(),
        data.as_mut_ptr() as *mut c_void,
        num_wait,
        wait_ptr,
        &mut new_event,
    );
    eval_errcode(errcode, (), "clEnqueueReadBuffer", None::<String>)?;
    Ok(Event::from_raw_create_ptr(new_event))
}

/// Enqueues a write from `data` into device memory.
///
/// ### Safety
///
/// When `block` is `false` the driver reads from `data` asynchronously; the
/// caller must keep the slice alive and unmodified until the returned event
/// completes.
pub unsafe fn enqueue_write_buffer<T: OclScl>(
    queue: &CommandQueue,
    buffer: &Mem,
    block: bool,
    offset: usize,
    data: &[T],
    wait_list: Option<&[Event]>,
) -> OclCoreResult<Event> {
    let rt = ffi::runtime()?;
    let (num_wait, wait_ptr) = wait_list_ptrs(wait_list);
    let mut new_event: cl_event = ptr::null_mut();

    let errcode = (rt.clEnqueueWriteBuffer)(
        queue.as_ptr(),
        buffer.as_ptr(),
        if block { CL_TRUE } else { CL_FALSE },
        offset * mem::size_of::<T>(),
        data.len() * mem::size_of::<T>(),
        data.as_ptr() as *const c_void,
        num_wait,
        wait_ptr,
        &mut new_event,
    );
    eval_errcode(errcode, (), "clEnqueueWriteBuffer", None::<String>)?;
    Ok(Event::from_raw_create_ptr(new_event))
}

/// Validates the dimension arguments for a kernel enqueue without touching
/// the driver.
fn check_work_dims(
    work_dims: u32,
    global_work_offset: Option<&[usize]>,
    global_work_size: &[usize],
    local_work_size: Option<&[usize]>,
) -> OclCoreResult<()> {
    if work_dims < 1 || work_dims > 3 {
        return Err(ApiWrapperError::KernelWorkDimsOutOfRange(work_dims).into());
    }
    if global_work_size.len() != work_dims as usize {
        return Err(ApiWrapperError::KernelGlobalWorkSizeMismatch {
            work_dims,
            len: global_work_size.len(),
        }
        .into());
    }
    if let Some(local) = local_work_size {
        if local.len() != work_dims as usize {
            return Err(ApiWrapperError::KernelLocalWorkSizeMismatch {
                work_dims,
                len: local.len(),
            }
            .into());
        }
    }
    if let Some(offset) = global_work_offset {
        if offset.len() != work_dims as usize {
            return Err(ApiWrapperError::KernelGlobalWorkOffsetMismatch {
                work_dims,
                len: offset.len(),
            }
            .into());
        }
    }
    Ok(())
}

/// Enqueues an n-dimensional kernel launch.
///
/// ### Safety
///
/// All memory objects set as arguments on `kernel` must remain valid until
/// the returned event completes.
pub unsafe fn enqueue_kernel(
    queue: &CommandQueue,
    kernel: &Kernel,
    work_dims: u32,
    global_work_offset: Option<&[usize]>,
    global_work_size: &[usize],
    local_work_size: Option<&[usize]>,
    wait_list: Option<&[Event]>,
) -> OclCoreResult<Event> {
    check_work_dims(work_dims, global_work_offset, global_work_size, local_work_size)?;
    let rt = ffi::runtime()?;
    let (num_wait, wait_ptr) = wait_list_ptrs(wait_list);
    let mut new_event: cl_event = ptr::null_mut();

    let offset_ptr = global_work_offset
        .map(|o| o.as_ptr())
        .unwrap_or(ptr::null());
    let local_ptr = local_work_size.map(|l| l.as_ptr()).unwrap_or(ptr::null());

    let errcode = (rt.clEnqueueNDRangeKernel)(
        queue.as_ptr(),
        kernel.as_ptr(),
        work_dims,
        offset_ptr,
        global_work_size.as_ptr(),
        local_ptr,
        num_wait,
        wait_ptr,
        &mut new_event,
    );
    eval_errcode(errcode, (), "clEnqueueNDRangeKernel", None::<String>)?;
    Ok(Event::from_raw_create_ptr(new_event))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Responders standing in for a native clGet...Info entry point.

    fn respond_fixed(reported: usize, payload: &'static [u8]) -> impl FnMut(
        size_t,
        *mut c_void,
        *mut size_t,
    ) -> cl_int {
        move |size, value, size_ret| {
            if size == 0 {
                unsafe { *size_ret = reported };
            } else {
                let n = payload.len().min(size);
                unsafe {
                    ptr::copy_nonoverlapping(payload.as_ptr(), value as *mut u8, n);
                    *size_ret = n;
                }
            }
            SUCCESS
        }
    }

    #[test]
    fn info_query_zero_probe_size_means_absent() {
        let result = get_info_bytes("clGetPlatformInfo", None, false, |_, _, size_ret| {
            unsafe { *size_ret = 0 };
            SUCCESS
        })
        .unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn info_query_silent_suppresses_invalid_value_only() {
        let silent =
            get_info_bytes("clGetDeviceInfo", None, true, |_, _, _| INVALID_VALUE).unwrap();
        assert_eq!(silent, None);

        // The same status is an error when not silent.
        let loud =
            get_info_bytes("clGetDeviceInfo", None, false, |_, _, _| INVALID_VALUE)
                .unwrap_err();
        assert_eq!(loud.api_status(), Some(Status::CL_INVALID_VALUE));

        // Silent mode never swallows other failures.
        let out_of_resources = Status::CL_OUT_OF_RESOURCES as cl_int;
        let err = get_info_bytes("clGetDeviceInfo", None, true, |_, _, _| out_of_resources)
            .unwrap_err();
        assert_eq!(err.api_status(), Some(Status::CL_OUT_OF_RESOURCES));
    }

    #[test]
    fn info_query_fetch_count_is_authoritative() {
        // The probe over-reports; the fetch writes fewer bytes and the
        // buffer must shrink to match.
        let bytes = get_info_bytes(
            "clGetPlatformInfo",
            None,
            false,
            respond_fixed(16, b"OpenCL 1.2\0"),
        )
        .unwrap()
        .unwrap();
        assert_eq!(bytes.len(), 11);
        assert_eq!(&bytes[..10], b"OpenCL 1.2");
    }

    #[test]
    fn info_query_probe_failure_skips_fetch() {
        let mut calls = 0;
        let err = get_info_bytes("clGetContextInfo", None, false, |size, _, _| {
            calls += 1;
            assert_eq!(size, 0);
            Status::CL_INVALID_CONTEXT as cl_int
        })
        .unwrap_err();
        assert_eq!(calls, 1);
        assert_eq!(err.api_status(), Some(Status::CL_INVALID_CONTEXT));
    }

    #[test]
    fn info_query_decodes_through_attribute_table() {
        let bytes = get_info_bytes(
            "clGetPlatformInfo",
            None,
            false,
            respond_fixed(12, b"FULL_PROFILE"),
        )
        .unwrap()
        .unwrap();
        let decoded = PlatformInfo::Profile.value_type().decode(bytes).unwrap();
        assert_eq!(decoded, Some(InfoValue::String("FULL_PROFILE".into())));
    }

    #[test]
    fn work_dim_validation() {
        let global = [64usize, 64];

        assert!(check_work_dims(2, None, &global, None).is_ok());
        assert!(check_work_dims(2, Some(&[0, 0]), &global, Some(&[8, 8])).is_ok());

        let err = check_work_dims(0, None, &global, None).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::ApiWrapper(ApiWrapperError::KernelWorkDimsOutOfRange(0))
        ));
        assert!(check_work_dims(4, None, &[1, 2, 3, 4], None).is_err());

        // Mismatched lengths per parameter.
        assert!(matches!(
            check_work_dims(3, None, &global, None).unwrap_err(),
            crate::Error::ApiWrapper(ApiWrapperError::KernelGlobalWorkSizeMismatch {
                work_dims: 3,
                len: 2,
            })
        ));
        assert!(check_work_dims(2, None, &global, Some(&[8])).is_err());
        assert!(check_work_dims(2, Some(&[0]), &global, None).is_err());
    }

    #[test]
    fn wait_list_ptrs_null_for_empty() {
        assert_eq!(wait_list_ptrs(None), (0, ptr::null()));
        assert_eq!(wait_list_ptrs(Some(&[])), (0, ptr::null()));
    }

    #[test]
    fn build_failure_keeps_status_when_logs_are_empty() {
        // A driver that rejects a build without writing a log must still
        // surface the failure status, never success.
        let err = build_failure_err(&[]);
        assert_eq!(err.api_status(), Some(Status::CL_BUILD_PROGRAM_FAILURE));

        let logs = vec![String::new(), "  \n\t".to_string()];
        let err = build_failure_err(&logs);
        assert_eq!(err.api_status(), Some(Status::CL_BUILD_PROGRAM_FAILURE));
    }

    #[test]
    fn build_failure_prefers_a_nonempty_log() {
        let logs = vec![String::new(), "error: undefined symbol 'foo'".to_string()];
        match build_failure_err(&logs) {
            crate::Error::ProgramBuild(ProgramBuildError::BuildLog(log)) => {
                assert!(log.contains("undefined symbol"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn event_status_decoding() {
        assert_eq!(
            event_status_from_info(Some(InfoValue::Int(0))).unwrap(),
            CommandExecutionStatus::Complete
        );
        assert_eq!(
            event_status_from_info(Some(InfoValue::Int(3))).unwrap(),
            CommandExecutionStatus::Queued
        );

        // Negative means the command terminated abnormally; the code rides
        // along in the error.
        let raw = Status::CL_EXEC_STATUS_ERROR_FOR_EVENTS_IN_WAIT_LIST as i32;
        let err = event_status_from_info(Some(InfoValue::Int(raw))).unwrap_err();
        assert_eq!(
            err.api_status(),
            Some(Status::CL_EXEC_STATUS_ERROR_FOR_EVENTS_IN_WAIT_LIST)
        );

        // Anything but an Int is a shape failure.
        assert!(matches!(
            event_status_from_info(Some(InfoValue::Uint(0))).unwrap_err(),
            crate::Error::Decode(DecodeError::EventStatusShape)
        ));
        assert!(matches!(
            event_status_from_info(None).unwrap_err(),
            crate::Error::Decode(DecodeError::EventStatusShape)
        ));
    }
}
