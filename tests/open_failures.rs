// SPDX-License-Identifier: MPL-2.0
// SPDX-FileCopyrightText: Copyright 2024 Ian McIntyre

//! Failed opens surface the platform's own error codes, and leave no
//! kernel object behind.

use std::ffi::CString;

use named_sem::semaphore::{self, OpenErrorKind, OpenFlags, Semaphore};

fn fresh_name(tag: &str) -> CString {
    CString::new(format!("/named-sem-{}-{tag}", std::process::id())).unwrap()
}

#[test]
fn missing_name_is_not_found() {
    let name = fresh_name("missing");

    let err = Semaphore::open(&name, OpenFlags::open_existing(), 0, 0).unwrap_err();
    assert_eq!(err.kind(), OpenErrorKind::NotFound);
    assert_eq!(err.raw_os_error(), Some(libc::ENOENT));
}

#[test]
fn overlong_name_is_invalid() {
    let name = CString::new(format!("/{}", "x".repeat(semaphore::NAME_MAX + 64))).unwrap();

    let err = Semaphore::open(&name, OpenFlags::create(), 0o600, 0).unwrap_err();
    assert_eq!(err.kind(), OpenErrorKind::InvalidName);
    assert_eq!(err.raw_os_error(), Some(libc::ENAMETOOLONG));
}

#[test]
fn oversized_initial_value_is_invalid() {
    let name = fresh_name("value");

    // u32::MAX exceeds SEM_VALUE_MAX on every supported platform.
    let err = Semaphore::open(&name, OpenFlags::create(), 0o600, u32::MAX).unwrap_err();
    assert_eq!(err.kind(), OpenErrorKind::InvalidArgument);
    assert_eq!(err.raw_os_error(), Some(libc::EINVAL));

    // The failed create left nothing bound to the name.
    let err = Semaphore::open(&name, OpenFlags::open_existing(), 0, 0).unwrap_err();
    assert_eq!(err.kind(), OpenErrorKind::NotFound);
}

#[test]
fn error_converts_into_io_error() {
    let name = fresh_name("io");

    let err = Semaphore::open(&name, OpenFlags::open_existing(), 0, 0).unwrap_err();
    let io: std::io::Error = err.into();
    assert_eq!(io.raw_os_error(), Some(libc::ENOENT));
}
