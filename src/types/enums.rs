//! Enumerators: native status codes, per-category attribute enums with
//! their exact ABI values, and the decoded info value sum type.
//!
//! The attribute codes are cross-reference keys into the native library and
//! must match the Khronos header byte for byte. Each attribute enum carries
//! a decode-strategy table (`value_type`) consumed by the generic two-phase
//! query in `functions`; attributes without a modeled decode rule map to
//! `InfoType::Bytes` and come back as the raw buffer — the deliberate
//! forward-compatible fallback.

use std::fmt;

use crate::error::{DecodeError, Result as OclCoreResult};
use crate::ffi::{
    c_void, cl_command_queue, cl_context, cl_device_id, cl_mem, cl_platform_id, cl_program,
    size_t,
};
use crate::types::abs::{CommandQueue, Context, DeviceId, Mem, PlatformId, Program};
use crate::util;
use crate::OclScl;

/// An OpenCL API status code.
#[allow(non_camel_case_types)]
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, num_derive::FromPrimitive)]
pub enum Status {
    CL_SUCCESS = 0,
    CL_DEVICE_NOT_FOUND = -1,
    CL_DEVICE_NOT_AVAILABLE = -2,
    CL_COMPILER_NOT_AVAILABLE = -3,
    CL_MEM_OBJECT_ALLOCATION_FAILURE = -4,
    CL_OUT_OF_RESOURCES = -5,
    CL_OUT_OF_HOST_MEMORY = -6,
    CL_PROFILING_INFO_NOT_AVAILABLE = -7,
    CL_MEM_COPY_OVERLAP = -8,
    CL_IMAGE_FORMAT_MISMATCH = -9,
    CL_IMAGE_FORMAT_NOT_SUPPORTED = -10,
    CL_BUILD_PROGRAM_FAILURE = -11,
    CL_MAP_FAILURE = -12,
    CL_MISALIGNED_SUB_BUFFER_OFFSET = -13,
    CL_EXEC_STATUS_ERROR_FOR_EVENTS_IN_WAIT_LIST = -14,
    CL_COMPILE_PROGRAM_FAILURE = -15,
    CL_LINKER_NOT_AVAILABLE = -16,
    CL_LINK_PROGRAM_FAILURE = -17,
    CL_DEVICE_PARTITION_FAILED = -18,
    CL_KERNEL_ARG_INFO_NOT_AVAILABLE = -19,
    CL_INVALID_VALUE = -30,
    CL_INVALID_DEVICE_TYPE = -31,
    CL_INVALID_PLATFORM = -32,
    CL_INVALID_DEVICE = -33,
    CL_INVALID_CONTEXT = -34,
    CL_INVALID_QUEUE_PROPERTIES = -35,
    CL_INVALID_COMMAND_QUEUE = -36,
    CL_INVALID_HOST_PTR = -37,
    CL_INVALID_MEM_OBJECT = -38,
    CL_INVALID_IMAGE_FORMAT_DESCRIPTOR = -39,
    CL_INVALID_IMAGE_SIZE = -40,
    CL_INVALID_SAMPLER = -41,
    CL_INVALID_BINARY = -42,
    CL_INVALID_BUILD_OPTIONS = -43,
    CL_INVALID_PROGRAM = -44,
    CL_INVALID_PROGRAM_EXECUTABLE = -45,
    CL_INVALID_KERNEL_NAME = -46,
    CL_INVALID_KERNEL_DEFINITION = -47,
    CL_INVALID_KERNEL = -48,
    CL_INVALID_ARG_INDEX = -49,
    CL_INVALID_ARG_VALUE = -50,
    CL_INVALID_ARG_SIZE = -51,
    CL_INVALID_KERNEL_ARGS = -52,
    CL_INVALID_WORK_DIMENSION = -53,
    CL_INVALID_WORK_GROUP_SIZE = -54,
    CL_INVALID_WORK_ITEM_SIZE = -55,
    CL_INVALID_GLOBAL_OFFSET = -56,
    CL_INVALID_EVENT_WAIT_LIST = -57,
    CL_INVALID_EVENT = -58,
    CL_INVALID_OPERATION = -59,
    CL_INVALID_GL_OBJECT = -60,
    CL_INVALID_BUFFER_SIZE = -61,
    CL_INVALID_MIP_LEVEL = -62,
    CL_INVALID_GLOBAL_WORK_SIZE = -63,
    CL_INVALID_PROPERTY = -64,
    CL_INVALID_IMAGE_DESCRIPTOR = -65,
    CL_INVALID_COMPILER_OPTIONS = -66,
    CL_INVALID_LINKER_OPTIONS = -67,
    CL_INVALID_DEVICE_PARTITION_COUNT = -68,
    CL_PLATFORM_NOT_FOUND_KHR = -1001,
}

/// A command's execution status.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, num_derive::FromPrimitive)]
pub enum CommandExecutionStatus {
    Complete = 0,
    Running = 1,
    Submitted = 2,
    Queued = 3,
}

/// cl_addressing_mode
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    None = 0x1130,
    ClampToEdge = 0x1131,
    Clamp = 0x1132,
    Repeat = 0x1133,
    MirroredRepeat = 0x1134,
}

/// cl_filter_mode
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterMode {
    Nearest = 0x1140,
    Linear = 0x1141,
}

/// The decode strategy for an attribute: how the raw byte buffer returned
/// by an info query is to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoType {
    /// 4 bytes, value exactly 0 or 1.
    Bool,
    Int,
    Uint,
    Ulong,
    /// Pointer-width unsigned integer.
    Size,
    /// Null/space padded text.
    String,
    /// Raw buffer, unmodified.
    Bytes,
    Platform,
    Device,
    /// Consecutive pointer-width slots reinterpreted as device ids.
    Devices,
    Context,
    Queue,
    Program,
    Mem,
    /// Pointer-width slots, one per element.
    Sizes,
    /// Pointer-width slots; count comes from a companion attribute
    /// (`DeviceInfo::MaxWorkItemDimensions`).
    WorkItemSizes,
}

/// A decoded attribute value.
///
/// Callers pattern-match on the variant promised by the attribute's
/// [`InfoType`] instead of downcasting.
#[derive(Debug, Clone, PartialEq)]
pub enum InfoValue {
    Bool(bool),
    Int(i32),
    Uint(u32),
    Ulong(u64),
    Size(usize),
    String(String),
    Bytes(Vec<u8>),
    Platform(PlatformId),
    Device(DeviceId),
    Devices(Vec<DeviceId>),
    Context(Context),
    Queue(CommandQueue),
    Program(Program),
    Mem(Mem),
    Sizes(Vec<usize>),
}

impl InfoType {
    /// Interprets `bytes` according to this strategy.
    ///
    /// Fixed-width strategies fail loudly on a length mismatch;
    /// `WorkItemSizes` must go through
    /// [`InfoType::decode_work_item_sizes`] instead since its length is
    /// determined by a companion attribute.
    ///
    /// A null nested handle decodes as `Ok(None)` (absent): drivers
    /// legitimately return one for attributes like a user event's queue or
    /// a root device's parent, and retaining a null handle would turn a
    /// valid answer into a driver error.
    pub fn decode(self, bytes: Vec<u8>) -> OclCoreResult<Option<InfoValue>> {
        let value = match self {
            InfoType::Bool => {
                if bytes.len() != 4 {
                    return Err(DecodeError::BoolWidth { found: bytes.len() }.into());
                }
                match unsafe { util::bytes_into::<u32>(bytes)? } {
                    0 => InfoValue::Bool(false),
                    1 => InfoValue::Bool(true),
                    found => return Err(DecodeError::BoolValue { found }.into()),
                }
            }
            InfoType::Int => InfoValue::Int(unsafe { util::bytes_into::<i32>(bytes)? }),
            InfoType::Uint => InfoValue::Uint(unsafe { util::bytes_into::<u32>(bytes)? }),
            InfoType::Ulong => InfoValue::Ulong(unsafe { util::bytes_into::<u64>(bytes)? }),
            InfoType::Size => InfoValue::Size(unsafe { util::bytes_into::<usize>(bytes)? }),
            InfoType::String => InfoValue::String(util::bytes_into_string(bytes)?),
            InfoType::Bytes => InfoValue::Bytes(bytes),
            InfoType::Platform => {
                let ptr = unsafe { util::bytes_into::<cl_platform_id>(bytes)? };
                if ptr.is_null() {
                    return Ok(None);
                }
                InfoValue::Platform(unsafe { PlatformId::from_raw(ptr) })
            }
            InfoType::Device => {
                let ptr = unsafe { util::bytes_into::<cl_device_id>(bytes)? };
                if ptr.is_null() {
                    return Ok(None);
                }
                InfoValue::Device(unsafe { DeviceId::from_raw(ptr) })
            }
            InfoType::Devices => {
                let ptrs = unsafe { util::bytes_into_vec::<cl_device_id>(bytes)? };
                InfoValue::Devices(
                    ptrs.into_iter()
                        .map(|ptr| unsafe { DeviceId::from_raw(ptr) })
                        .collect(),
                )
            }
            InfoType::Context => {
                let ptr = unsafe { util::bytes_into::<cl_context>(bytes)? };
                if ptr.is_null() {
                    return Ok(None);
                }
                InfoValue::Context(unsafe { Context::from_raw_copied_ptr(ptr)? })
            }
            InfoType::Queue => {
                let ptr = unsafe { util::bytes_into::<cl_command_queue>(bytes)? };
                if ptr.is_null() {
                    return Ok(None);
                }
                InfoValue::Queue(unsafe { CommandQueue::from_raw_copied_ptr(ptr)? })
            }
            InfoType::Program => {
                let ptr = unsafe { util::bytes_into::<cl_program>(bytes)? };
                if ptr.is_null() {
                    return Ok(None);
                }
                InfoValue::Program(unsafe { Program::from_raw_copied_ptr(ptr)? })
            }
            InfoType::Mem => {
                let ptr = unsafe { util::bytes_into::<cl_mem>(bytes)? };
                if ptr.is_null() {
                    return Ok(None);
                }
                InfoValue::Mem(unsafe { Mem::from_raw_copied_ptr(ptr)? })
            }
            InfoType::Sizes => {
                InfoValue::Sizes(unsafe { util::bytes_into_vec::<usize>(bytes)? })
            }
            InfoType::WorkItemSizes => return Err(DecodeError::CompanionMismatch.into()),
        };

        Ok(Some(value))
    }

    /// Decodes a size array whose element count was reported by a companion
    /// attribute query.
    pub fn decode_work_item_sizes(bytes: Vec<u8>, dims: u32) -> OclCoreResult<InfoValue> {
        let sizes = unsafe { util::bytes_into_vec::<usize>(bytes)? };
        if sizes.len() != dims as usize {
            return Err(DecodeError::WorkItemSizesLen {
                expected: dims,
                found: sizes.len(),
            }
            .into());
        }
        Ok(InfoValue::Sizes(sizes))
    }
}

impl fmt::Display for InfoValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            InfoValue::Bool(v) => write!(f, "{}", v),
            InfoValue::Int(v) => write!(f, "{}", v),
            InfoValue::Uint(v) => write!(f, "{}", v),
            InfoValue::Ulong(v) => write!(f, "{}", v),
            InfoValue::Size(v) => write!(f, "{}", v),
            InfoValue::String(ref v) => write!(f, "{}", v),
            InfoValue::Bytes(ref v) => write!(f, "{:?}", v),
            InfoValue::Platform(v) => write!(f, "{:?}", v),
            InfoValue::Device(v) => write!(f, "{:?}", v),
            InfoValue::Devices(ref v) => write!(f, "{:?}", v),
            InfoValue::Context(ref v) => write!(f, "{:?}", v),
            InfoValue::Queue(ref v) => write!(f, "{:?}", v),
            InfoValue::Program(ref v) => write!(f, "{:?}", v),
            InfoValue::Mem(ref v) => write!(f, "{:?}", v),
            InfoValue::Sizes(ref v) => write!(f, "{:?}", v),
        }
    }
}

/// cl_platform_info
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlatformInfo {
    Profile = 0x0900,
    Version = 0x0901,
    Name = 0x0902,
    Vendor = 0x0903,
    Extensions = 0x0904,
}

impl PlatformInfo {
    pub const ALL: &'static [PlatformInfo] = &[
        PlatformInfo::Profile,
        PlatformInfo::Version,
        PlatformInfo::Name,
        PlatformInfo::Vendor,
        PlatformInfo::Extensions,
    ];

    pub fn value_type(self) -> InfoType {
        // Every platform attribute is a padded string.
        InfoType::String
    }
}

/// cl_device_info
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeviceInfo {
    Type = 0x1000,
    VendorId = 0x1001,
    MaxComputeUnits = 0x1002,
    MaxWorkItemDimensions = 0x1003,
    MaxWorkGroupSize = 0x1004,
    MaxWorkItemSizes = 0x1005,
    PreferredVectorWidthChar = 0x1006,
    PreferredVectorWidthShort = 0x1007,
    PreferredVectorWidthInt = 0x1008,
    PreferredVectorWidthLong = 0x1009,
    PreferredVectorWidthFloat = 0x100A,
    PreferredVectorWidthDouble = 0x100B,
    MaxClockFrequency = 0x100C,
    AddressBits = 0x100D,
    MaxReadImageArgs = 0x100E,
    MaxWriteImageArgs = 0x100F,
    MaxMemAllocSize = 0x1010,
    Image2dMaxWidth = 0x1011,
    Image2dMaxHeight = 0x1012,
    Image3dMaxWidth = 0x1013,
    Image3dMaxHeight = 0x1014,
    Image3dMaxDepth = 0x1015,
    ImageSupport = 0x1016,
    MaxParameterSize = 0x1017,
    MaxSamplers = 0x1018,
    MemBaseAddrAlign = 0x1019,
    MinDataTypeAlignSize = 0x101A,
    SingleFpConfig = 0x101B,
    GlobalMemCacheType = 0x101C,
    GlobalMemCachelineSize = 0x101D,
    GlobalMemCacheSize = 0x101E,
    GlobalMemSize = 0x101F,
    MaxConstantBufferSize = 0x1020,
    MaxConstantArgs = 0x1021,
    LocalMemType = 0x1022,
    LocalMemSize = 0x1023,
    ErrorCorrectionSupport = 0x1024,
    ProfilingTimerResolution = 0x1025,
    EndianLittle = 0x1026,
    Available = 0x1027,
    CompilerAvailable = 0x1028,
    ExecutionCapabilities = 0x1029,
    QueueProperties = 0x102A,
    Name = 0x102B,
    Vendor = 0x102C,
    DriverVersion = 0x102D,
    Profile = 0x102E,
    Version = 0x102F,
    Extensions = 0x1030,
    Platform = 0x1031,
    DoubleFpConfig = 0x1032,
    HalfFpConfig = 0x1033,
    PreferredVectorWidthHalf = 0x1034,
    HostUnifiedMemory = 0x1035,
    NativeVectorWidthChar = 0x1036,
    NativeVectorWidthShort = 0x1037,
    NativeVectorWidthInt = 0x1038,
    NativeVectorWidthLong = 0x1039,
    NativeVectorWidthFloat = 0x103A,
    NativeVectorWidthDouble = 0x103B,
    NativeVectorWidthHalf = 0x103C,
    OpenclCVersion = 0x103D,
    LinkerAvailable = 0x103E,
    BuiltInKernels = 0x103F,
    ImageMaxBufferSize = 0x1040,
    ImageMaxArraySize = 0x1041,
    ParentDevice = 0x1042,
    PartitionMaxSubDevices = 0x1043,
    PartitionProperties = 0x1044,
    PartitionAffinityDomain = 0x1045,
    PartitionType = 0x1046,
    ReferenceCount = 0x1047,
    PreferredInteropUserSync = 0x1048,
    PrintfBufferSize = 0x1049,
    ImagePitchAlignment = 0x104A,
    ImageBaseAddressAlignment = 0x104B,
}

impl DeviceInfo {
    pub const ALL: &'static [DeviceInfo] = &[
        DeviceInfo::Type,
        DeviceInfo::VendorId,
        DeviceInfo::MaxComputeUnits,
        DeviceInfo::MaxWorkItemDimensions,
        DeviceInfo::MaxWorkGroupSize,
        DeviceInfo::MaxWorkItemSizes,
        DeviceInfo::PreferredVectorWidthChar,
        DeviceInfo::PreferredVectorWidthShort,
        DeviceInfo::PreferredVectorWidthInt,
        DeviceInfo::PreferredVectorWidthLong,
        DeviceInfo::PreferredVectorWidthFloat,
        DeviceInfo::PreferredVectorWidthDouble,
        DeviceInfo::MaxClockFrequency,
        DeviceInfo::AddressBits,
        DeviceInfo::MaxReadImageArgs,
        DeviceInfo::MaxWriteImageArgs,
        DeviceInfo::MaxMemAllocSize,
        DeviceInfo::Image2dMaxWidth,
        DeviceInfo::Image2dMaxHeight,
        DeviceInfo::Image3dMaxWidth,
        DeviceInfo::Image3dMaxHeight,
        DeviceInfo::Image3dMaxDepth,
        DeviceInfo::ImageSupport,
        DeviceInfo::MaxParameterSize,
        DeviceInfo::MaxSamplers,
        DeviceInfo::MemBaseAddrAlign,
        DeviceInfo::MinDataTypeAlignSize,
        DeviceInfo::SingleFpConfig,
        DeviceInfo::GlobalMemCacheType,
        DeviceInfo::GlobalMemCachelineSize,
        DeviceInfo::GlobalMemCacheSize,
        DeviceInfo::GlobalMemSize,
        DeviceInfo::MaxConstantBufferSize,
        DeviceInfo::MaxConstantArgs,
        DeviceInfo::LocalMemType,
        DeviceInfo::LocalMemSize,
        DeviceInfo::ErrorCorrectionSupport,
        DeviceInfo::ProfilingTimerResolution,
        DeviceInfo::EndianLittle,
        DeviceInfo::Available,
        DeviceInfo::CompilerAvailable,
        DeviceInfo::ExecutionCapabilities,
        DeviceInfo::QueueProperties,
        DeviceInfo::Name,
        DeviceInfo::Vendor,
        DeviceInfo::DriverVersion,
        DeviceInfo::Profile,
        DeviceInfo::Version,
        DeviceInfo::Extensions,
        DeviceInfo::Platform,
        DeviceInfo::DoubleFpConfig,
        DeviceInfo::HalfFpConfig,
        DeviceInfo::PreferredVectorWidthHalf,
        DeviceInfo::HostUnifiedMemory,
        DeviceInfo::NativeVectorWidthChar,
        DeviceInfo::NativeVectorWidthShort,
        DeviceInfo::NativeVectorWidthInt,
        DeviceInfo::NativeVectorWidthLong,
        DeviceInfo::NativeVectorWidthFloat,
        DeviceInfo::NativeVectorWidthDouble,
        DeviceInfo::NativeVectorWidthHalf,
        DeviceInfo::OpenclCVersion,
        DeviceInfo::LinkerAvailable,
        DeviceInfo::BuiltInKernels,
        DeviceInfo::ImageMaxBufferSize,
        DeviceInfo::ImageMaxArraySize,
        DeviceInfo::ParentDevice,
        DeviceInfo::PartitionMaxSubDevices,
        DeviceInfo::PartitionProperties,
        DeviceInfo::PartitionAffinityDomain,
        DeviceInfo::PartitionType,
        DeviceInfo::ReferenceCount,
        DeviceInfo::PreferredInteropUserSync,
        DeviceInfo::PrintfBufferSize,
        DeviceInfo::ImagePitchAlignment,
        DeviceInfo::ImageBaseAddressAlignment,
    ];

    pub fn value_type(self) -> InfoType {
        match self {
            DeviceInfo::Type => InfoType::Ulong,
            DeviceInfo::VendorId => InfoType::Uint,
            DeviceInfo::MaxComputeUnits => InfoType::Uint,
            DeviceInfo::MaxWorkItemDimensions => InfoType::Uint,
            DeviceInfo::MaxWorkGroupSize => InfoType::Size,
            DeviceInfo::MaxWorkItemSizes => InfoType::WorkItemSizes,
            DeviceInfo::PreferredVectorWidthChar
            | DeviceInfo::PreferredVectorWidthShort
            | DeviceInfo::PreferredVectorWidthInt
            | DeviceInfo::PreferredVectorWidthLong
            | DeviceInfo::PreferredVectorWidthFloat
            | DeviceInfo::PreferredVectorWidthDouble
            | DeviceInfo::PreferredVectorWidthHalf
            | DeviceInfo::NativeVectorWidthChar
            | DeviceInfo::NativeVectorWidthShort
            | DeviceInfo::NativeVectorWidthInt
            | DeviceInfo::NativeVectorWidthLong
            | DeviceInfo::NativeVectorWidthFloat
            | DeviceInfo::NativeVectorWidthDouble
            | DeviceInfo::NativeVectorWidthHalf => InfoType::Uint,
            DeviceInfo::MaxClockFrequency => InfoType::Uint,
            DeviceInfo::AddressBits => InfoType::Uint,
            DeviceInfo::MaxReadImageArgs => InfoType::Uint,
            DeviceInfo::MaxWriteImageArgs => InfoType::Uint,
            DeviceInfo::MaxMemAllocSize => InfoType::Ulong,
            DeviceInfo::Image2dMaxWidth
            | DeviceInfo::Image2dMaxHeight
            | DeviceInfo::Image3dMaxWidth
            | DeviceInfo::Image3dMaxHeight
            | DeviceInfo::Image3dMaxDepth => InfoType::Size,
            DeviceInfo::ImageSupport => InfoType::Bool,
            DeviceInfo::MaxParameterSize => InfoType::Size,
            DeviceInfo::MaxSamplers => InfoType::Uint,
            DeviceInfo::MemBaseAddrAlign => InfoType::Uint,
            DeviceInfo::MinDataTypeAlignSize => InfoType::Uint,
            DeviceInfo::SingleFpConfig => InfoType::Ulong,
            DeviceInfo::GlobalMemCacheType => InfoType::Uint,
            DeviceInfo::GlobalMemCachelineSize => InfoType::Uint,
            DeviceInfo::GlobalMemCacheSize => InfoType::Ulong,
            DeviceInfo::GlobalMemSize => InfoType::Ulong,
            DeviceInfo::MaxConstantBufferSize => InfoType::Ulong,
            DeviceInfo::MaxConstantArgs => InfoType::Uint,
            DeviceInfo::LocalMemType => InfoType::Uint,
            DeviceInfo::LocalMemSize => InfoType::Ulong,
            DeviceInfo::ErrorCorrectionSupport => InfoType::Bool,
            DeviceInfo::ProfilingTimerResolution => InfoType::Size,
            DeviceInfo::EndianLittle => InfoType::Bool,
            DeviceInfo::Available => InfoType::Bool,
            DeviceInfo::CompilerAvailable => InfoType::Bool,
            DeviceInfo::ExecutionCapabilities => InfoType::Ulong,
            DeviceInfo::QueueProperties => InfoType::Ulong,
            DeviceInfo::Name
            | DeviceInfo::Vendor
            | DeviceInfo::DriverVersion
            | DeviceInfo::Profile
            | DeviceInfo::Version
            | DeviceInfo::Extensions
            | DeviceInfo::OpenclCVersion
            | DeviceInfo::BuiltInKernels => InfoType::String,
            DeviceInfo::Platform => InfoType::Platform,
            DeviceInfo::DoubleFpConfig => InfoType::Ulong,
            DeviceInfo::HalfFpConfig => InfoType::Ulong,
            DeviceInfo::HostUnifiedMemory => InfoType::Bool,
            DeviceInfo::LinkerAvailable => InfoType::Bool,
            DeviceInfo::ImageMaxBufferSize => InfoType::Size,
            DeviceInfo::ImageMaxArraySize => InfoType::Size,
            DeviceInfo::ParentDevice => InfoType::Device,
            DeviceInfo::PartitionMaxSubDevices => InfoType::Uint,
            // Partition property lists are arrays of intptr-width enum
            // codes; no decode rule is modeled for them yet.
            DeviceInfo::PartitionProperties | DeviceInfo::PartitionType => InfoType::Bytes,
            DeviceInfo::PartitionAffinityDomain => InfoType::Ulong,
            DeviceInfo::ReferenceCount => InfoType::Uint,
            DeviceInfo::PreferredInteropUserSync => InfoType::Bool,
            DeviceInfo::PrintfBufferSize => InfoType::Size,
            DeviceInfo::ImagePitchAlignment => InfoType::Uint,
            DeviceInfo::ImageBaseAddressAlignment => InfoType::Uint,
        }
    }
}

/// cl_context_info
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContextInfo {
    ReferenceCount = 0x1080,
    Devices = 0x1081,
    Properties = 0x1082,
    NumDevices = 0x1083,
}

impl ContextInfo {
    pub const ALL: &'static [ContextInfo] = &[
        ContextInfo::ReferenceCount,
        ContextInfo::Devices,
        ContextInfo::Properties,
        ContextInfo::NumDevices,
    ];

    pub fn value_type(self) -> InfoType {
        match self {
            ContextInfo::ReferenceCount => InfoType::Uint,
            ContextInfo::Devices => InfoType::Devices,
            // A null-terminated property list; shape depends on the
            // properties used at creation.
            ContextInfo::Properties => InfoType::Bytes,
            ContextInfo::NumDevices => InfoType::Uint,
        }
    }
}

/// cl_command_queue_info
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommandQueueInfo {
    Context = 0x1090,
    Device = 0x1091,
    ReferenceCount = 0x1092,
    Properties = 0x1093,
}

impl CommandQueueInfo {
    pub const ALL: &'static [CommandQueueInfo] = &[
        CommandQueueInfo::Context,
        CommandQueueInfo::Device,
        CommandQueueInfo::ReferenceCount,
        CommandQueueInfo::Properties,
    ];

    pub fn value_type(self) -> InfoType {
        match self {
            CommandQueueInfo::Context => InfoType::Context,
            CommandQueueInfo::Device => InfoType::Device,
            CommandQueueInfo::ReferenceCount => InfoType::Uint,
            CommandQueueInfo::Properties => InfoType::Ulong,
        }
    }
}

/// cl_mem_info
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MemInfo {
    Type = 0x1100,
    Flags = 0x1101,
    Size = 0x1102,
    HostPtr = 0x1103,
    MapCount = 0x1104,
    ReferenceCount = 0x1105,
    Context = 0x1106,
    AssociatedMemobject = 0x1107,
    Offset = 0x1108,
}

impl MemInfo {
    pub const ALL: &'static [MemInfo] = &[
        MemInfo::Type,
        MemInfo::Flags,
        MemInfo::Size,
        MemInfo::HostPtr,
        MemInfo::MapCount,
        MemInfo::ReferenceCount,
        MemInfo::Context,
        MemInfo::AssociatedMemobject,
        MemInfo::Offset,
    ];

    pub fn value_type(self) -> InfoType {
        match self {
            MemInfo::Type => InfoType::Uint,
            MemInfo::Flags => InfoType::Ulong,
            MemInfo::Size => InfoType::Size,
            // Host and associated-object pointers may legitimately be null;
            // returned raw rather than wrapped.
            MemInfo::HostPtr | MemInfo::AssociatedMemobject => InfoType::Bytes,
            MemInfo::MapCount => InfoType::Uint,
            MemInfo::ReferenceCount => InfoType::Uint,
            MemInfo::Context => InfoType::Context,
            MemInfo::Offset => InfoType::Size,
        }
    }
}

/// cl_image_info
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ImageInfo {
    Format = 0x1110,
    ElementSize = 0x1111,
    RowPitch = 0x1112,
    SlicePitch = 0x1113,
    Width = 0x1114,
    Height = 0x1115,
    Depth = 0x1116,
}

impl ImageInfo {
    pub const ALL: &'static [ImageInfo] = &[
        ImageInfo::Format,
        ImageInfo::ElementSize,
        ImageInfo::RowPitch,
        ImageInfo::SlicePitch,
        ImageInfo::Width,
        ImageInfo::Height,
        ImageInfo::Depth,
    ];

    pub fn value_type(self) -> InfoType {
        match self {
            ImageInfo::Format => InfoType::Bytes,
            ImageInfo::ElementSize
            | ImageInfo::RowPitch
            | ImageInfo::SlicePitch
            | ImageInfo::Width
            | ImageInfo::Height
            | ImageInfo::Depth => InfoType::Size,
        }
    }
}

/// cl_sampler_info
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SamplerInfo {
    ReferenceCount = 0x1150,
    Context = 0x1151,
    NormalizedCoords = 0x1152,
    AddressingMode = 0x1153,
    FilterMode = 0x1154,
}

impl SamplerInfo {
    pub const ALL: &'static [SamplerInfo] = &[
        SamplerInfo::ReferenceCount,
        SamplerInfo::Context,
        SamplerInfo::NormalizedCoords,
        SamplerInfo::AddressingMode,
        SamplerInfo::FilterMode,
    ];

    pub fn value_type(self) -> InfoType {
        match self {
            SamplerInfo::ReferenceCount => InfoType::Uint,
            SamplerInfo::Context => InfoType::Context,
            SamplerInfo::NormalizedCoords => InfoType::Bool,
            SamplerInfo::AddressingMode => InfoType::Uint,
            SamplerInfo::FilterMode => InfoType::Uint,
        }
    }
}

/// cl_program_info
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProgramInfo {
    ReferenceCount = 0x1160,
    Context = 0x1161,
    NumDevices = 0x1162,
    Devices = 0x1163,
    Source = 0x1164,
    BinarySizes = 0x1165,
    Binaries = 0x1166,
    NumKernels = 0x1167,
    KernelNames = 0x1168,
}

impl ProgramInfo {
    pub const ALL: &'static [ProgramInfo] = &[
        ProgramInfo::ReferenceCount,
        ProgramInfo::Context,
        ProgramInfo::NumDevices,
        ProgramInfo::Devices,
        ProgramInfo::Source,
        ProgramInfo::BinarySizes,
        ProgramInfo::Binaries,
        ProgramInfo::NumKernels,
        ProgramInfo::KernelNames,
    ];

    pub fn value_type(self) -> InfoType {
        match self {
            ProgramInfo::ReferenceCount => InfoType::Uint,
            ProgramInfo::Context => InfoType::Context,
            ProgramInfo::NumDevices => InfoType::Uint,
            ProgramInfo::Devices => InfoType::Devices,
            ProgramInfo::Source => InfoType::String,
            ProgramInfo::BinarySizes => InfoType::Sizes,
            // An array of host pointers the caller must pre-arrange; no
            // decode rule is modeled.
            ProgramInfo::Binaries => InfoType::Bytes,
            ProgramInfo::NumKernels => InfoType::Size,
            ProgramInfo::KernelNames => InfoType::String,
        }
    }
}

/// cl_program_build_info
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProgramBuildInfo {
    BuildStatus = 0x1181,
    BuildOptions = 0x1182,
    BuildLog = 0x1183,
    BinaryType = 0x1184,
}

impl ProgramBuildInfo {
    pub const ALL: &'static [ProgramBuildInfo] = &[
        ProgramBuildInfo::BuildStatus,
        ProgramBuildInfo::BuildOptions,
        ProgramBuildInfo::BuildLog,
        ProgramBuildInfo::BinaryType,
    ];

    pub fn value_type(self) -> InfoType {
        match self {
            ProgramBuildInfo::BuildStatus => InfoType::Int,
            ProgramBuildInfo::BuildOptions => InfoType::String,
            ProgramBuildInfo::BuildLog => InfoType::String,
            ProgramBuildInfo::BinaryType => InfoType::Uint,
        }
    }
}

/// cl_kernel_info
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KernelInfo {
    FunctionName = 0x1190,
    NumArgs = 0x1191,
    ReferenceCount = 0x1192,
    Context = 0x1193,
    Program = 0x1194,
    Attributes = 0x1195,
}

impl KernelInfo {
    pub const ALL: &'static [KernelInfo] = &[
        KernelInfo::FunctionName,
        KernelInfo::NumArgs,
        KernelInfo::ReferenceCount,
        KernelInfo::Context,
        KernelInfo::Program,
        KernelInfo::Attributes,
    ];

    pub fn value_type(self) -> InfoType {
        match self {
            KernelInfo::FunctionName => InfoType::String,
            KernelInfo::NumArgs => InfoType::Uint,
            KernelInfo::ReferenceCount => InfoType::Uint,
            KernelInfo::Context => InfoType::Context,
            KernelInfo::Program => InfoType::Program,
            KernelInfo::Attributes => InfoType::String,
        }
    }
}

/// cl_event_info
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventInfo {
    CommandQueue = 0x11D0,
    CommandType = 0x11D1,
    ReferenceCount = 0x11D2,
    CommandExecutionStatus = 0x11D3,
    Context = 0x11D4,
}

impl EventInfo {
    pub const ALL: &'static [EventInfo] = &[
        EventInfo::CommandQueue,
        EventInfo::CommandType,
        EventInfo::ReferenceCount,
        EventInfo::CommandExecutionStatus,
        EventInfo::Context,
    ];

    pub fn value_type(self) -> InfoType {
        match self {
            EventInfo::CommandQueue => InfoType::Queue,
            EventInfo::CommandType => InfoType::Uint,
            EventInfo::ReferenceCount => InfoType::Uint,
            EventInfo::CommandExecutionStatus => InfoType::Int,
            EventInfo::Context => InfoType::Context,
        }
    }
}

/// cl_profiling_info
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProfilingInfo {
    Queued = 0x1280,
    Submit = 0x1281,
    Start = 0x1282,
    End = 0x1283,
}

impl ProfilingInfo {
    pub const ALL: &'static [ProfilingInfo] = &[
        ProfilingInfo::Queued,
        ProfilingInfo::Submit,
        ProfilingInfo::Start,
        ProfilingInfo::End,
    ];

    pub fn value_type(self) -> InfoType {
        // Profiling counters are 64-bit device timestamps.
        InfoType::Ulong
    }
}

/// Kernel argument option type.
///
/// The same logical set-argument operation accepts a memory object handle,
/// a scalar of any supported width, a slice of scalars, or a local-memory
/// size; the byte size passed to the native call is computed from the
/// variant itself, never guessed.
///
/// The type argument `T` is ignored for `Mem` and `UnsafePointer`.
#[derive(Debug)]
pub enum KernelArg<'a, T: OclScl> {
    Mem(&'a Mem),
    Scalar(T),
    Vector(&'a [T]),
    /// Length in multiples of `T` (not bytes); allocates device-local
    /// scratch memory, no host data is passed.
    Local(usize),
    /// `size`: size in bytes. Only use this if you know exactly what you
    /// are doing: the pointer must reference host memory laid out for the
    /// kernel parameter, not a wrapper object.
    UnsafePointer { size: size_t, value: *const c_void },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ne_bytes_u32(val: u32) -> Vec<u8> {
        val.to_ne_bytes().to_vec()
    }

    #[test]
    fn bool_decode_accepts_only_zero_and_one() {
        assert_eq!(
            InfoType::Bool.decode(ne_bytes_u32(1)).unwrap(),
            Some(InfoValue::Bool(true))
        );
        assert_eq!(
            InfoType::Bool.decode(ne_bytes_u32(0)).unwrap(),
            Some(InfoValue::Bool(false))
        );

        let err = InfoType::Bool.decode(ne_bytes_u32(2)).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Decode(DecodeError::BoolValue { found: 2 })
        ));
    }

    #[test]
    fn bool_decode_requires_four_bytes() {
        let err = InfoType::Bool.decode(vec![1u8]).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Decode(DecodeError::BoolWidth { found: 1 })
        ));

        let err = InfoType::Bool.decode(vec![1u8, 0, 0, 0, 0, 0, 0, 0]).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Decode(DecodeError::BoolWidth { found: 8 })
        ));
    }

    #[test]
    fn string_decode_trims_padding() {
        let decoded = InfoType::String
            .decode(b"NVIDIA CUDA \0\0".to_vec())
            .unwrap();
        assert_eq!(decoded, Some(InfoValue::String("NVIDIA CUDA".into())));
    }

    #[test]
    fn fixed_width_decode_rejects_wrong_lengths() {
        assert!(InfoType::Uint.decode(vec![0u8; 8]).is_err());
        assert!(InfoType::Ulong.decode(vec![0u8; 4]).is_err());
    }

    #[test]
    fn unmodeled_attribute_falls_back_to_raw_bytes() {
        let raw = vec![0xDEu8, 0xAD, 0xBE];
        assert_eq!(
            DeviceInfo::PartitionProperties
                .value_type()
                .decode(raw.clone())
                .unwrap(),
            Some(InfoValue::Bytes(raw))
        );
    }

    #[test]
    fn null_nested_handles_decode_as_absent() {
        let null_ptr = (0usize).to_ne_bytes().to_vec();

        // Owned categories must not retain a null handle; a user event's
        // queue attribute is the canonical case.
        assert_eq!(InfoType::Queue.decode(null_ptr.clone()).unwrap(), None);
        assert_eq!(InfoType::Context.decode(null_ptr.clone()).unwrap(), None);
        assert_eq!(InfoType::Program.decode(null_ptr.clone()).unwrap(), None);
        assert_eq!(InfoType::Mem.decode(null_ptr.clone()).unwrap(), None);

        // Non-owned ids follow the same absence rule (a root device has a
        // null parent).
        assert_eq!(InfoType::Device.decode(null_ptr.clone()).unwrap(), None);
        assert_eq!(InfoType::Platform.decode(null_ptr).unwrap(), None);

        let real_ptr = (0x40usize).to_ne_bytes().to_vec();
        match InfoType::Device.decode(real_ptr).unwrap() {
            Some(InfoValue::Device(device)) => assert_eq!(device.as_ptr() as usize, 0x40),
            other => panic!("unexpected decode result: {:?}", other),
        }
    }

    #[test]
    fn size_array_decode_splits_pointer_width_slots() {
        let mut bytes = Vec::new();
        for val in &[64usize, 32, 16] {
            bytes.extend_from_slice(&val.to_ne_bytes());
        }
        let decoded = InfoType::decode_work_item_sizes(bytes, 3).unwrap();
        assert_eq!(decoded, InfoValue::Sizes(vec![64, 32, 16]));
    }

    #[test]
    fn size_array_decode_rejects_companion_mismatch() {
        let mut bytes = Vec::new();
        for val in &[64usize, 32] {
            bytes.extend_from_slice(&val.to_ne_bytes());
        }
        let err = InfoType::decode_work_item_sizes(bytes, 3).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Decode(DecodeError::WorkItemSizesLen {
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn size_array_decode_rejects_ragged_buffers() {
        let bytes = vec![0u8; std::mem::size_of::<usize>() * 2 + 3];
        assert!(InfoType::decode_work_item_sizes(bytes, 3).is_err());
    }

    #[test]
    fn device_array_decode() {
        let fake_ids = [0x10usize, 0x20, 0x30];
        let mut bytes = Vec::new();
        for id in &fake_ids {
            bytes.extend_from_slice(&id.to_ne_bytes());
        }
        match InfoType::Devices.decode(bytes).unwrap() {
            Some(InfoValue::Devices(devices)) => {
                assert_eq!(devices.len(), 3);
                assert_eq!(devices[1].as_ptr() as usize, 0x20);
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn status_round_trips_from_raw_codes() {
        use num_traits::FromPrimitive;
        assert_eq!(Status::from_i32(0), Some(Status::CL_SUCCESS));
        assert_eq!(Status::from_i32(-30), Some(Status::CL_INVALID_VALUE));
        assert_eq!(Status::from_i32(-1001), Some(Status::CL_PLATFORM_NOT_FOUND_KHR));
        assert_eq!(Status::from_i32(-9999), None);
    }
}
