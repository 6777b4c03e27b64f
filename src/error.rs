//! Standard error type for cl-bind.

use std::fmt;

use num_traits::FromPrimitive;

use crate::util::UtilError;
use crate::Status;

/// cl-bind result type.
pub type Result<T> = ::std::result::Result<T, Error>;

static SDK_DOCS_URL_PRE: &str = "https://www.khronos.org/registry/cl/sdk/1.2/docs/man/xhtml/";
static SDK_DOCS_URL_SUF: &str = ".html#errors";

/// A failed native call.
///
/// Carries the raw status code returned by the driver, the name of the
/// native function that returned it, and optional call detail. Status codes
/// without a known symbolic name are preserved as-is.
pub struct ApiError {
    code: i32,
    fn_name: &'static str,
    fn_info: Option<String>,
}

impl ApiError {
    pub fn new<S: Into<String>>(code: i32, fn_name: &'static str, fn_info: Option<S>) -> ApiError {
        ApiError {
            code,
            fn_name,
            fn_info: fn_info.map(|s| s.into()),
        }
    }

    /// The symbolic status, if the code is one the binding knows about.
    pub fn status(&self) -> Option<Status> {
        Status::from_i32(self.code)
    }

    /// The raw status code as returned by the driver.
    pub fn code(&self) -> i32 {
        self.code
    }

    /// The native function that failed.
    pub fn fn_name(&self) -> &'static str {
        self.fn_name
    }
}

impl std::error::Error for ApiError {}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let fn_info_string = match self.fn_info {
            Some(ref fn_info) => format!(" (\"{}\")", fn_info),
            None => String::with_capacity(0),
        };

        match self.status() {
            Some(status) => write!(
                f,
                "Error executing function: {}{}: {:?} ({}). See: {}{}{}",
                self.fn_name,
                fn_info_string,
                status,
                self.code,
                SDK_DOCS_URL_PRE,
                self.fn_name,
                SDK_DOCS_URL_SUF
            ),
            None => write!(
                f,
                "Error executing function: {}{}: unknown status code ({})",
                self.fn_name, fn_info_string, self.code
            ),
        }
    }
}

impl fmt::Debug for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// The OpenCL driver library could not be loaded or a symbol was missing.
#[derive(Debug, thiserror::Error)]
#[error("Unable to load the OpenCL driver library: {0}")]
pub struct LoadingError(String);

impl From<&libloading::Error> for LoadingError {
    fn from(err: &libloading::Error) -> LoadingError {
        LoadingError(err.to_string())
    }
}

/// An internal-consistency failure while decoding an info query result.
///
/// Raised when the byte buffer returned by the driver contradicts the
/// attribute's documented shape. Never coerced or truncated silently.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Boolean attribute has byte length {found}; expected exactly 4.")]
    BoolWidth { found: usize },
    #[error("Boolean attribute has value {found}; expected exactly 0 or 1.")]
    BoolValue { found: u32 },
    #[error(
        "Companion attribute reported {expected} work-item dimensions but the \
        buffer holds {found}."
    )]
    WorkItemSizesLen { expected: u32, found: usize },
    #[error("Companion attribute query returned an unexpected value.")]
    CompanionMismatch,
    #[error("Event execution status attribute has an unexpected shape.")]
    EventStatusShape,
}

/// An error caused by pre-call argument validation.
#[derive(Debug, thiserror::Error)]
pub enum ApiWrapperError {
    #[error("Unable to get platform id list after {0} seconds of waiting.")]
    GetPlatformIdsPlatformListUnavailable(u64),
    #[error("`devices_max` can not be zero.")]
    GetDeviceIdsDevicesMaxZero,
    #[error("No devices specified.")]
    CreateContextNoDevicesSpecified,
    #[error("Buffer length and data length do not match.")]
    CreateBufferDataLengthMismatch,
    #[error("`work_dims` must be between 1 and 3 (got {0}).")]
    KernelWorkDimsOutOfRange(u32),
    #[error(
        "Global work size has {len} dimensions but `work_dims` is {work_dims}."
    )]
    KernelGlobalWorkSizeMismatch { work_dims: u32, len: usize },
    #[error(
        "Local work size has {len} dimensions but `work_dims` is {work_dims}."
    )]
    KernelLocalWorkSizeMismatch { work_dims: u32, len: usize },
    #[error(
        "Global work offset has {len} dimensions but `work_dims` is {work_dims}."
    )]
    KernelGlobalWorkOffsetMismatch { work_dims: u32, len: usize },
    #[error("Length of 'sources' must be greater than zero.")]
    CreateProgramWithSourceSourcesLenZero,
}

/// An OpenCL program build error.
#[derive(Debug, thiserror::Error)]
pub enum ProgramBuildError {
    #[error("Device list is empty. Aborting build.")]
    DeviceListEmpty,
    #[error("Program build failure:\n\n{0}")]
    BuildLog(String),
    #[error("{0}")]
    InfoResult(Box<Error>),
}

/// An enum one of several error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // String: An arbitrary error:
    #[error("{0}")]
    String(String),
    // FfiNul: Ffi string conversion error:
    #[error("{0}")]
    FfiNul(#[from] ::std::ffi::NulError),
    // FromUtf8: String conversion error:
    #[error("{0}")]
    FromUtf8(#[from] ::std::string::FromUtf8Error),
    // Loading: driver library resolution failure:
    #[error("{0}")]
    Loading(#[from] LoadingError),
    // Util:
    #[error("{0}")]
    Util(#[from] UtilError),
    // Api:
    #[error("{0}")]
    Api(ApiError),
    // Decode:
    #[error("{0}")]
    Decode(#[from] DecodeError),
    // ApiWrapper:
    #[error("{0}")]
    ApiWrapper(#[from] ApiWrapperError),
    // ProgramBuild:
    #[error("{0}")]
    ProgramBuild(#[from] ProgramBuildError),
}

impl Error {
    /// Returns the error status code for `Api` variants.
    pub fn api_status(&self) -> Option<Status> {
        match *self {
            Error::Api(ref err) => err.status(),
            _ => None,
        }
    }
}

impl<'a> From<&'a str> for Error {
    fn from(desc: &'a str) -> Self {
        Error::String(String::from(desc))
    }
}

impl From<String> for Error {
    fn from(desc: String) -> Self {
        Error::String(desc)
    }
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Error::Api(err)
    }
}
