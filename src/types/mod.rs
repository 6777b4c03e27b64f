//! Data types shuttled between the safe surface and the native library.

pub mod abs;
pub mod enums;
