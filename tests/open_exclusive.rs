// SPDX-License-Identifier: MPL-2.0
// SPDX-FileCopyrightText: Copyright 2024 Ian McIntyre

//! Exclusive creation claims a name exactly once, until the name is
//! unlinked.

use std::ffi::CString;

use named_sem::semaphore::{OpenErrorKind, OpenFlags, Semaphore};

#[test]
fn second_exclusive_create_fails() {
    let name = CString::new(format!("/named-sem-{}-excl", std::process::id())).unwrap();

    let first = Semaphore::open(&name, OpenFlags::create_exclusive(), 0o600, 0);
    assert!(first.is_ok());

    let err = Semaphore::open(&name, OpenFlags::create_exclusive(), 0o600, 0).unwrap_err();
    assert_eq!(err.kind(), OpenErrorKind::AlreadyExists);
    assert_eq!(err.raw_os_error(), Some(libc::EEXIST));

    assert_eq!(unsafe { libc::sem_unlink(name.as_ptr()) }, 0);

    // Unlinking frees the name for a new exclusive creator.
    let again = Semaphore::open(&name, OpenFlags::create_exclusive(), 0o600, 0);
    assert!(again.is_ok());

    assert_eq!(unsafe { libc::sem_unlink(name.as_ptr()) }, 0);
}
