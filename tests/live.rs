//! Smoke tests against a real driver.
//!
//! Every test returns early when no OpenCL library can be resolved on the
//! host, so the suite passes on machines without a driver installed.

use std::ffi::CString;

use cl_bind as core;
use cl_bind::{
    CommandQueueProperties, ContextProperties, DeviceInfo, InfoValue, KernelArg, MemFlags,
    PlatformInfo,
};

const SRC: &str = r#"
    __kernel void add(__global float* buffer, float scalar) {
        buffer[get_global_id(0)] += scalar;
    }
"#;

fn first_device() -> Option<(core::PlatformId, core::DeviceId)> {
    if !core::ffi::is_available() {
        return None;
    }
    let platforms = core::get_platform_ids().unwrap();
    for platform in platforms {
        let devices = core::get_device_ids(platform, None, None).unwrap();
        if let Some(&device) = devices.first() {
            return Some((platform, device));
        }
    }
    None
}

#[test]
fn platform_and_device_enumeration() {
    let (platform, device) = match first_device() {
        Some(pair) => pair,
        None => return,
    };

    // Every conforming platform reports a profile and a version string.
    match core::get_platform_info(platform, PlatformInfo::Profile, false).unwrap() {
        Some(InfoValue::String(profile)) => assert!(!profile.is_empty()),
        other => panic!("unexpected profile result: {:?}", other),
    }

    let all = core::get_all_platform_info(platform).unwrap();
    assert!(all.contains_key(&PlatformInfo::Version));
    assert!(all.contains_key(&PlatformInfo::Name));

    match core::get_device_info(device, DeviceInfo::Name, false).unwrap() {
        Some(InfoValue::String(name)) => assert!(!name.is_empty()),
        other => panic!("unexpected device name result: {:?}", other),
    }
}

#[test]
fn work_item_sizes_agree_with_dimension_count() {
    let (_, device) = match first_device() {
        Some(pair) => pair,
        None => return,
    };

    let dims = match core::get_device_info(device, DeviceInfo::MaxWorkItemDimensions, false)
        .unwrap()
    {
        Some(InfoValue::Uint(dims)) => dims,
        other => panic!("unexpected dims result: {:?}", other),
    };
    assert!(dims >= 1);

    match core::get_device_info(device, DeviceInfo::MaxWorkItemSizes, false).unwrap() {
        Some(InfoValue::Sizes(sizes)) => assert_eq!(sizes.len(), dims as usize),
        other => panic!("unexpected sizes result: {:?}", other),
    }
}

#[test]
fn bulk_device_info_skips_unsupported_attributes() {
    let (_, device) = match first_device() {
        Some(pair) => pair,
        None => return,
    };

    let all = core::get_all_device_info(device).unwrap();
    // A conforming 1.x driver understands at least the 1.0 attribute set.
    assert!(all.contains_key(&DeviceInfo::Type));
    assert!(all.contains_key(&DeviceInfo::MaxComputeUnits));
    assert!(all.contains_key(&DeviceInfo::GlobalMemSize));
}

#[test]
fn buffer_kernel_round_trip() {
    let (platform, device) = match first_device() {
        Some(pair) => pair,
        None => return,
    };

    let context = core::create_context(
        Some(&ContextProperties::new().platform(platform)),
        &[device],
    )
    .unwrap();
    let queue = core::create_command_queue(
        &context,
        device,
        Some(CommandQueueProperties::PROFILING_ENABLE),
    )
    .unwrap();

    let len = 1 << 10;
    let host = vec![1.0f32; len];
    let buffer = unsafe {
        core::create_buffer(
            &context,
            MemFlags::READ_WRITE | MemFlags::COPY_HOST_PTR,
            len,
            Some(&host),
        )
        .unwrap()
    };

    let src = CString::new(SRC).unwrap();
    let program = core::create_program_with_source(&context, &[src]).unwrap();
    core::build_program(&program, Some(&[device]), &CString::new("").unwrap()).unwrap();
    let kernel = core::create_kernel(&program, "add").unwrap();

    core::set_kernel_arg::<f32>(&kernel, 0, KernelArg::Mem(&buffer)).unwrap();
    core::set_kernel_arg(&kernel, 1, KernelArg::Scalar(41.0f32)).unwrap();

    let kernel_event = unsafe {
        core::enqueue_kernel(&queue, &kernel, 1, None, &[len], None, None).unwrap()
    };

    // The read waits on the kernel via the event list, not via a flush.
    let mut result = vec![0.0f32; len];
    let read_event = unsafe {
        core::enqueue_read_buffer(
            &queue,
            &buffer,
            true,
            0,
            &mut result,
            Some(&[kernel_event]),
        )
        .unwrap()
    };

    core::wait_for_events(&[read_event]).unwrap();
    assert!(result.iter().all(|&x| x == 42.0));

    core::finish(&queue).unwrap();
}

#[test]
fn clone_and_drop_balance_driver_reference_counts() {
    let (platform, device) = match first_device() {
        Some(pair) => pair,
        None => return,
    };

    let context = core::create_context(
        Some(&ContextProperties::new().platform(platform)),
        &[device],
    )
    .unwrap();

    let count_before = match core::get_context_info(
        &context,
        core::ContextInfo::ReferenceCount,
        false,
    )
    .unwrap()
    {
        Some(InfoValue::Uint(count)) => count,
        other => panic!("unexpected refcount result: {:?}", other),
    };

    {
        let _clone_a = context.clone();
        let _clone_b = context.clone();
        let count_inside = match core::get_context_info(
            &context,
            core::ContextInfo::ReferenceCount,
            false,
        )
        .unwrap()
        {
            Some(InfoValue::Uint(count)) => count,
            other => panic!("unexpected refcount result: {:?}", other),
        };
        assert_eq!(count_inside, count_before + 2);
    }

    let count_after = match core::get_context_info(
        &context,
        core::ContextInfo::ReferenceCount,
        false,
    )
    .unwrap()
    {
        Some(InfoValue::Uint(count)) => count,
        other => panic!("unexpected refcount result: {:?}", other),
    };
    assert_eq!(count_after, count_before);
}

#[test]
fn over_release_surfaces_the_invalid_handle_status() {
    let (platform, device) = match first_device() {
        Some(pair) => pair,
        None => return,
    };

    let context = core::create_context(
        Some(&ContextProperties::new().platform(platform)),
        &[device],
    )
    .unwrap();
    let queue = core::create_command_queue(&context, device, None).unwrap();

    unsafe {
        // One retain, then release down past zero. The driver owns the
        // count; the release beyond it must come back as a status, not a
        // crash.
        core::retain_command_queue(&queue).unwrap();
        core::release_command_queue(&queue).unwrap();
        core::release_command_queue(&queue).unwrap();

        let err = core::release_command_queue(&queue).unwrap_err();
        assert_eq!(
            err.api_status(),
            Some(core::Status::CL_INVALID_COMMAND_QUEUE)
        );
    }

    // The handle is already gone; Drop must not release it again.
    std::mem::forget(queue);
}

#[test]
fn user_event_gates_queued_work() {
    let (platform, device) = match first_device() {
        Some(pair) => pair,
        None => return,
    };

    let context = core::create_context(
        Some(&ContextProperties::new().platform(platform)),
        &[device],
    )
    .unwrap();
    let queue = core::create_command_queue(&context, device, None).unwrap();

    let gate = core::create_user_event(&context).unwrap();
    let data = vec![7u32; 16];
    let buffer = unsafe {
        core::create_buffer::<u32>(&context, MemFlags::READ_WRITE, 16, None).unwrap()
    };

    let write_event = unsafe {
        core::enqueue_write_buffer(&queue, &buffer, false, 0, &data, Some(&[gate.clone()]))
            .unwrap()
    };
    core::flush(&queue).unwrap();

    core::set_user_event_status(&gate, core::CommandExecutionStatus::Complete).unwrap();
    core::wait_for_events(&[write_event]).unwrap();

    let mut readback = vec![0u32; 16];
    unsafe {
        core::enqueue_read_buffer(&queue, &buffer, true, 0, &mut readback, None).unwrap();
    }
    assert_eq!(readback, data);
}
