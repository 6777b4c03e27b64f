//! Raw byte conversion functions used by info result decoding.
//!
//! Every conversion checks the source length against the destination width
//! and fails loudly on a mismatch; a driver returning a buffer of an
//! unexpected size must never be silently truncated or zero-extended.

use std::mem;
use std::ptr;
use std::string::FromUtf8Error;

/// An error caused by a utility function.
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
    #[error(
        "The size of the source byte slice ({src} bytes) does not match \
        the size of the destination type ({dst} bytes)."
    )]
    BytesTo { src: usize, dst: usize },
    #[error(
        "The size of the source byte vector ({src} bytes) does not match \
        the size of the destination type ({dst} bytes)."
    )]
    BytesInto { src: usize, dst: usize },
    #[error(
        "The size of the source byte vector ({src} bytes) is not evenly \
        divisible by the size of the destination type ({dst} bytes)."
    )]
    BytesIntoVec { src: usize, dst: usize },
    #[error(
        "The size of the source byte slice ({src} bytes) is not evenly \
        divisible by the size of the destination type ({dst} bytes)."
    )]
    BytesToVec { src: usize, dst: usize },
    #[error("Unable to convert bytes into string: {0}")]
    BytesIntoString(#[from] FromUtf8Error),
}

/// Copies a slice of bytes to a new value of arbitrary type.
///
/// ### Safety
///
/// The byte pattern must be a valid `T`.
pub unsafe fn bytes_to<T>(bytes: &[u8]) -> Result<T, UtilError> {
    if mem::size_of::<T>() == bytes.len() {
        let mut new_val = mem::MaybeUninit::<T>::uninit();
        ptr::copy(bytes.as_ptr(), new_val.as_mut_ptr() as *mut u8, bytes.len());
        Ok(new_val.assume_init())
    } else {
        Err(UtilError::BytesTo {
            src: bytes.len(),
            dst: mem::size_of::<T>(),
        })
    }
}

/// Converts a vector of bytes into a value of arbitrary type.
///
/// ### Safety
///
/// The byte pattern must be a valid `T`.
pub unsafe fn bytes_into<T>(vec: Vec<u8>) -> Result<T, UtilError> {
    if mem::size_of::<T>() == vec.len() {
        let mut new_val = mem::MaybeUninit::<T>::uninit();
        ptr::copy(vec.as_ptr(), new_val.as_mut_ptr() as *mut u8, vec.len());
        Ok(new_val.assume_init())
    } else {
        Err(UtilError::BytesInto {
            src: vec.len(),
            dst: mem::size_of::<T>(),
        })
    }
}

/// Copies a slice of bytes into a vector of arbitrary type.
///
/// ### Safety
///
/// Each size-of-`T` chunk of the slice must be a valid `T`.
pub unsafe fn bytes_to_vec<T>(bytes: &[u8]) -> Result<Vec<T>, UtilError> {
    if bytes.len() % mem::size_of::<T>() == 0 {
        let new_len = bytes.len() / mem::size_of::<T>();
        let mut new_vec: Vec<T> = Vec::with_capacity(new_len);
        ptr::copy(
            bytes.as_ptr(),
            new_vec.as_mut_ptr() as *mut _ as *mut u8,
            bytes.len(),
        );
        new_vec.set_len(new_len);
        Ok(new_vec)
    } else {
        Err(UtilError::BytesToVec {
            src: bytes.len(),
            dst: mem::size_of::<T>(),
        })
    }
}

/// Converts a vector of bytes into a vector of arbitrary type.
///
/// ### Safety
///
/// Each size-of-`T` chunk of the vector must be a valid `T`.
pub unsafe fn bytes_into_vec<T>(vec: Vec<u8>) -> Result<Vec<T>, UtilError> {
    bytes_to_vec(&vec)
}

/// Converts a byte vector into a string, trimming trailing space and null
/// padding characters.
///
/// Info strings are frequently over-allocated and padded by drivers; the
/// padding is not part of the value.
pub fn bytes_into_string(mut bytes: Vec<u8>) -> Result<String, UtilError> {
    while let Some(&b) = bytes.last() {
        if b == 0 || b == b' ' {
            bytes.pop();
        } else {
            break;
        }
    }

    String::from_utf8(bytes).map_err(UtilError::BytesIntoString)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_to_checks_width() {
        let bytes = [1u8, 0, 0, 0];
        let val: u32 = unsafe { bytes_to(&bytes).unwrap() };
        assert_eq!(val, 1);

        let res: Result<u64, _> = unsafe { bytes_to(&bytes) };
        assert!(matches!(res, Err(UtilError::BytesTo { src: 4, dst: 8 })));
    }

    #[test]
    fn bytes_to_vec_rejects_ragged_lengths() {
        let bytes = vec![0u8; mem::size_of::<usize>() * 2 + 1];
        let res: Result<Vec<usize>, _> = unsafe { bytes_to_vec(&bytes) };
        assert!(matches!(res, Err(UtilError::BytesToVec { .. })));
    }

    #[test]
    fn bytes_into_vec_splits_slots() {
        let mut bytes = Vec::new();
        for val in &[7usize, 8, 9] {
            bytes.extend_from_slice(&val.to_ne_bytes());
        }
        let vals: Vec<usize> = unsafe { bytes_into_vec(bytes).unwrap() };
        assert_eq!(vals, vec![7, 8, 9]);
    }

    #[test]
    fn string_trailing_padding_is_trimmed() {
        let padded = b"OpenCL 1.2  \0\0\0".to_vec();
        assert_eq!(bytes_into_string(padded).unwrap(), "OpenCL 1.2");

        // Interior and leading characters are untouched.
        let interior = b" a b\0".to_vec();
        assert_eq!(bytes_into_string(interior).unwrap(), " a b");
    }
}
