//! Abstract data type wrappers.
//!
//! One nominal newtype per OpenCL handle category, all `#[repr(transparent)]`
//! over the raw pointer so a `*const Wrapper` is a `*const cl_xxx`. Distinct
//! types keep a device id from ever being handed to a context call; the
//! compiler does the checking the raw ABI cannot.
//!
//! `PlatformId` and `DeviceId` have no retain/release in the supported API
//! level and are plain `Copy` values. The remaining seven categories own one
//! slot of the native reference count each: construction from a
//! `clCreate...` pointer adopts the implicit initial reference,
//! `from_raw_copied_ptr` retains to co-own, `Clone` retains, and `Drop`
//! releases exactly once. Move semantics make a double release
//! unrepresentable.

use std::ptr;

use crate::error::Result as OclResult;
use crate::ffi::{
    cl_command_queue, cl_context, cl_device_id, cl_event, cl_kernel, cl_mem, cl_platform_id,
    cl_program, cl_sampler,
};
use crate::functions;

/// cl_platform_id
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Hash, Eq)]
pub struct PlatformId(cl_platform_id);

impl PlatformId {
    /// Creates a new `PlatformId` wrapper from a raw pointer.
    ///
    /// ### Safety
    ///
    /// `ptr` must be a platform id obtained from the driver.
    pub unsafe fn from_raw(ptr: cl_platform_id) -> PlatformId {
        PlatformId(ptr)
    }

    /// Returns an invalid `PlatformId` used for initializing data structures
    /// meant to be filled with valid ones.
    pub unsafe fn null() -> PlatformId {
        PlatformId(ptr::null_mut())
    }

    /// Returns a pointer.
    pub fn as_ptr(&self) -> cl_platform_id {
        self.0
    }
}

unsafe impl Send for PlatformId {}
unsafe impl Sync for PlatformId {}

impl PartialEq<PlatformId> for PlatformId {
    fn eq(&self, other: &PlatformId) -> bool {
        self.0 == other.0
    }
}

/// cl_device_id
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Hash, Eq)]
pub struct DeviceId(cl_device_id);

impl DeviceId {
    /// Creates a new `DeviceId` wrapper from a raw pointer.
    ///
    /// ### Safety
    ///
    /// `ptr` must be a device id obtained from the driver.
    pub unsafe fn from_raw(ptr: cl_device_id) -> DeviceId {
        DeviceId(ptr)
    }

    /// Returns an invalid `DeviceId` used for initializing data structures
    /// meant to be filled with valid ones.
    pub unsafe fn null() -> DeviceId {
        DeviceId(ptr::null_mut())
    }

    /// Returns a pointer.
    pub fn as_ptr(&self) -> cl_device_id {
        self.0
    }
}

unsafe impl Send for DeviceId {}
unsafe impl Sync for DeviceId {}

impl PartialEq<DeviceId> for DeviceId {
    fn eq(&self, other: &DeviceId) -> bool {
        self.0 == other.0
    }
}

/// cl_context
#[repr(transparent)]
#[derive(Debug)]
pub struct Context(cl_context);

impl Context {
    /// Only call this when passing **the original** newly created pointer
    /// directly from `clCreate...`. Do not use this to clone or copy.
    pub unsafe fn from_raw_create_ptr(ptr: cl_context) -> Context {
        Context(ptr)
    }

    /// Only call this when passing a copied pointer such as from a
    /// `clGet*****Info` function. Retains to co-own the handle.
    pub unsafe fn from_raw_copied_ptr(ptr: cl_context) -> OclResult<Context> {
        let copy = Context(ptr);
        functions::retain_context(&copy)?;
        Ok(copy)
    }

    /// Returns a pointer, do not store it.
    pub fn as_ptr(&self) -> cl_context {
        self.0
    }
}

unsafe impl Send for Context {}
unsafe impl Sync for Context {}

impl Clone for Context {
    fn clone(&self) -> Context {
        unsafe { functions::retain_context(self).unwrap() };
        Context(self.0)
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        // The driver's count is authoritative; a failure here means the
        // handle is already gone and there is nothing left to release.
        unsafe { functions::release_context(self).ok() };
    }
}

impl PartialEq<Context> for Context {
    fn eq(&self, other: &Context) -> bool {
        self.0 == other.0
    }
}

/// cl_command_queue
#[repr(transparent)]
#[derive(Debug)]
pub struct CommandQueue(cl_command_queue);

impl CommandQueue {
    /// Only call this when passing **the original** newly created pointer
    /// directly from `clCreate...`. Do not use this to clone or copy.
    pub unsafe fn from_raw_create_ptr(ptr: cl_command_queue) -> CommandQueue {
        CommandQueue(ptr)
    }

    /// Only call this when passing a copied pointer such as from a
    /// `clGet*****Info` function. Retains to co-own the handle.
    pub unsafe fn from_raw_copied_ptr(ptr: cl_command_queue) -> OclResult<CommandQueue> {
        let copy = CommandQueue(ptr);
        functions::retain_command_queue(&copy)?;
        Ok(copy)
    }

    /// Returns a pointer, do not store it.
    pub fn as_ptr(&self) -> cl_command_queue {
        self.0
    }
}

unsafe impl Send for CommandQueue {}
unsafe impl Sync for CommandQueue {}

impl Clone for CommandQueue {
    fn clone(&self) -> CommandQueue {
        unsafe { functions::retain_command_queue(self).unwrap() };
        CommandQueue(self.0)
    }
}

impl Drop for CommandQueue {
    fn drop(&mut self) {
        unsafe { functions::release_command_queue(self).ok() };
    }
}

impl PartialEq<CommandQueue> for CommandQueue {
    fn eq(&self, other: &CommandQueue) -> bool {
        self.0 == other.0
    }
}

/// cl_mem
#[repr(transparent)]
#[derive(Debug)]
pub struct Mem(cl_mem);

impl Mem {
    /// Only call this when passing **the original** newly created pointer
    /// directly from `clCreate...`. Do not use this to clone or copy.
    pub unsafe fn from_raw_create_ptr(ptr: cl_mem) -> Mem {
        Mem(ptr)
    }

    /// Only call this when passing a copied pointer such as from a
    /// `clGet*****Info` function. Retains to co-own the handle.
    pub unsafe fn from_raw_copied_ptr(ptr: cl_mem) -> OclResult<Mem> {
        let copy = Mem(ptr);
        functions::retain_mem_object(&copy)?;
        Ok(copy)
    }

    /// Returns a pointer, do not store it.
    pub fn as_ptr(&self) -> cl_mem {
        self.0
    }
}

unsafe impl Send for Mem {}
unsafe impl Sync for Mem {}

impl Clone for Mem {
    fn clone(&self) -> Mem {
        unsafe { functions::retain_mem_object(self).unwrap() };
        Mem(self.0)
    }
}

impl Drop for Mem {
    fn drop(&mut self) {
        unsafe { functions::release_mem_object(self).ok() };
    }
}

impl PartialEq<Mem> for Mem {
    fn eq(&self, other: &Mem) -> bool {
        self.0 == other.0
    }
}

/// cl_program
#[repr(transparent)]
#[derive(Debug)]
pub struct Program(cl_program);

impl Program {
    /// Only call this when passing **the original** newly created pointer
    /// directly from `clCreate...`. Do not use this to clone or copy.
    pub unsafe fn from_raw_create_ptr(ptr: cl_program) -> Program {
        Program(ptr)
    }

    /// Only call this when passing a copied pointer such as from a
    /// `clGet*****Info` function. Retains to co-own the handle.
    pub unsafe fn from_raw_copied_ptr(ptr: cl_program) -> OclResult<Program> {
        let copy = Program(ptr);
        functions::retain_program(&copy)?;
        Ok(copy)
    }

    /// Returns a pointer, do not store it.
    pub fn as_ptr(&self) -> cl_program {
        self.0
    }
}

unsafe impl Send for Program {}
unsafe impl Sync for Program {}

impl Clone for Program {
    fn clone(&self) -> Program {
        unsafe { functions::retain_program(self).unwrap() };
        Program(self.0)
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { functions::release_program(self).ok() };
    }
}

impl PartialEq<Program> for Program {
    fn eq(&self, other: &Program) -> bool {
        self.0 == other.0
    }
}

/// cl_kernel
#[repr(transparent)]
#[derive(Debug)]
pub struct Kernel(cl_kernel);

impl Kernel {
    /// Only call this when passing **the original** newly created pointer
    /// directly from `clCreate...`. Do not use this to clone or copy.
    pub unsafe fn from_raw_create_ptr(ptr: cl_kernel) -> Kernel {
        Kernel(ptr)
    }

    /// Only call this when passing a copied pointer. Retains to co-own the
    /// handle.
    pub unsafe fn from_raw_copied_ptr(ptr: cl_kernel) -> OclResult<Kernel> {
        let copy = Kernel(ptr);
        functions::retain_kernel(&copy)?;
        Ok(copy)
    }

    /// Returns a pointer, do not store it.
    pub fn as_ptr(&self) -> cl_kernel {
        self.0
    }
}

unsafe impl Send for Kernel {}
unsafe impl Sync for Kernel {}

impl Clone for Kernel {
    fn clone(&self) -> Kernel {
        unsafe { functions::retain_kernel(self).unwrap() };
        Kernel(self.0)
    }
}

impl Drop for Kernel {
    fn drop(&mut self) {
        unsafe { functions::release_kernel(self).ok() };
    }
}

impl PartialEq<Kernel> for Kernel {
    fn eq(&self, other: &Kernel) -> bool {
        self.0 == other.0
    }
}

/// cl_event
#[repr(transparent)]
#[derive(Debug)]
pub struct Event(cl_event);

impl Event {
    /// Only call this when passing **the original** newly created pointer
    /// directly from an enqueue call or `clCreateUserEvent`. Do not use this
    /// to clone or copy.
    pub unsafe fn from_raw_create_ptr(ptr: cl_event) -> Event {
        Event(ptr)
    }

    /// Only call this when passing a copied pointer. Retains to co-own the
    /// handle.
    pub unsafe fn from_raw_copied_ptr(ptr: cl_event) -> OclResult<Event> {
        let copy = Event(ptr);
        functions::retain_event(&copy)?;
        Ok(copy)
    }

    /// Returns a pointer, do not store it.
    pub fn as_ptr(&self) -> cl_event {
        self.0
    }

    /// Returns `true` if this event has not yet been filled in by an
    /// enqueue call.
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

unsafe impl Send for Event {}
unsafe impl Sync for Event {}

impl Clone for Event {
    fn clone(&self) -> Event {
        unsafe { functions::retain_event(self).unwrap() };
        Event(self.0)
    }
}

impl Drop for Event {
    fn drop(&mut self) {
        if !self.0.is_null() {
            unsafe { functions::release_event(self).ok() };
        }
    }
}

impl PartialEq<Event> for Event {
    fn eq(&self, other: &Event) -> bool {
        self.0 == other.0
    }
}

/// cl_sampler
#[repr(transparent)]
#[derive(Debug)]
pub struct Sampler(cl_sampler);

impl Sampler {
    /// Only call this when passing **the original** newly created pointer
    /// directly from `clCreate...`. Do not use this to clone or copy.
    pub unsafe fn from_raw_create_ptr(ptr: cl_sampler) -> Sampler {
        Sampler(ptr)
    }

    /// Only call this when passing a copied pointer. Retains to co-own the
    /// handle.
    pub unsafe fn from_raw_copied_ptr(ptr: cl_sampler) -> OclResult<Sampler> {
        let copy = Sampler(ptr);
        functions::retain_sampler(&copy)?;
        Ok(copy)
    }

    /// Returns a pointer, do not store it.
    pub fn as_ptr(&self) -> cl_sampler {
        self.0
    }
}

unsafe impl Send for Sampler {}
unsafe impl Sync for Sampler {}

impl Clone for Sampler {
    fn clone(&self) -> Sampler {
        unsafe { functions::retain_sampler(self).unwrap() };
        Sampler(self.0)
    }
}

impl Drop for Sampler {
    fn drop(&mut self) {
        unsafe { functions::release_sampler(self).ok() };
    }
}

impl PartialEq<Sampler> for Sampler {
    fn eq(&self, other: &Sampler) -> bool {
        self.0 == other.0
    }
}
