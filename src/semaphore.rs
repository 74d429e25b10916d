// SPDX-License-Identifier: MPL-2.0
// SPDX-FileCopyrightText: Copyright 2024 Ian McIntyre

//! Named semaphore services.
//!
//! A [`Semaphore`] is a handle to a counting semaphore in the platform's
//! named-semaphore namespace. [`Semaphore::open`] looks a name up in that
//! namespace and, depending on [`OpenFlags`], opens the existing object or
//! creates a new one that every process supplying the same name can reach.
//!
//! # Examples
//!
//! Create a semaphore if it's absent, with an initial count of one.
//!
//! ```no_run
//! use named_sem::semaphore::{OpenFlags, Semaphore};
//!
//! # fn main() -> Result<(), named_sem::semaphore::OpenError> {
//! let sem = Semaphore::open(c"/printer", OpenFlags::create(), 0o600, 1)?;
//! # let _ = sem;
//! # Ok(()) }
//! ```
//!
//! Open a semaphore that some other process must already have created.
//!
//! ```no_run
//! use named_sem::semaphore::{OpenErrorKind, OpenFlags, Semaphore};
//!
//! match Semaphore::open(c"/printer", OpenFlags::open_existing(), 0, 0) {
//!     Ok(sem) => { /* wait and post through sem.as_ptr() */ }
//!     Err(err) if err.kind() == OpenErrorKind::NotFound => {
//!         // Nobody has created it yet.
//!     }
//!     Err(err) => panic!("{err}"),
//! }
//! ```

use core::ffi::{c_int, c_uint, CStr};
use core::ptr::NonNull;
use std::io;

use thiserror::Error;

/// Maximum length of a semaphore name, in bytes.
///
/// The count covers the name as handed to [`Semaphore::open`], leading slash
/// included, nul terminator excluded. This is 31 bytes on Apple platforms and
/// 251 bytes elsewhere.
///
/// The platform rejects longer names with [`OpenErrorKind::InvalidName`];
/// checking against this constant first saves the round trip into the kernel.
pub const NAME_MAX: usize = if cfg!(target_vendor = "apple") { 31 } else { 251 };

/// How [`Semaphore::open`] resolves a name.
///
/// This wraps the platform flag word that the open call recognizes. For
/// convenience, use [`open_existing()`](Self::open_existing),
/// [`create()`](Self::create), or
/// [`create_exclusive()`](Self::create_exclusive).
///
/// The bits travel to the platform unmodified, so any other combination the
/// platform accepts can be expressed through the public field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct OpenFlags(pub c_int);

impl OpenFlags {
    /// Open a semaphore that already exists.
    ///
    /// The open fails with [`OpenErrorKind::NotFound`] if the name is
    /// unbound. The mode and initial value given to [`Semaphore::open`] are
    /// ignored by the platform.
    pub const fn open_existing() -> Self {
        Self(0)
    }

    /// Create the semaphore if the name is unbound, open it otherwise.
    ///
    /// When several callers race this on one name, the platform guarantees
    /// that exactly one of them creates the object and the rest open it.
    pub const fn create() -> Self {
        Self(libc::O_CREAT)
    }

    /// Create the semaphore, failing if the name is already bound.
    ///
    /// The open fails with [`OpenErrorKind::AlreadyExists`] if the name is
    /// taken.
    pub const fn create_exclusive() -> Self {
        Self(libc::O_CREAT | libc::O_EXCL)
    }

    /// Returns `true` if these flags may create a new semaphore.
    pub const fn is_create(self) -> bool {
        self.0 & libc::O_CREAT != 0
    }

    /// Returns `true` if these flags demand to be the creator.
    pub const fn is_exclusive(self) -> bool {
        self.0 & libc::O_EXCL != 0
    }
}

impl From<OpenFlags> for c_int {
    fn from(flags: OpenFlags) -> Self {
        flags.0
    }
}

/// An error when opening a named semaphore.
///
/// The wrapped cause is exactly what the platform reported; nothing is
/// translated or recovered locally. Use [`kind`](Self::kind) for a coarse
/// classification, or [`raw_os_error`](Self::raw_os_error) for the exact
/// platform error code.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct OpenError(io::Error);

impl OpenError {
    fn last_os_error() -> Self {
        Self(io::Error::last_os_error())
    }

    /// Classify the platform error.
    ///
    /// The classification is a convenience; the raw code from
    /// [`raw_os_error`](Self::raw_os_error) stays authoritative.
    pub fn kind(&self) -> OpenErrorKind {
        match self.0.raw_os_error() {
            Some(libc::ENAMETOOLONG) => OpenErrorKind::InvalidName,
            Some(libc::EEXIST) => OpenErrorKind::AlreadyExists,
            Some(libc::ENOENT) => OpenErrorKind::NotFound,
            Some(libc::EACCES) => OpenErrorKind::PermissionDenied,
            Some(libc::EMFILE | libc::ENFILE | libc::ENOSPC | libc::ENOMEM) => {
                OpenErrorKind::ResourceLimit
            }
            Some(libc::EINVAL) => OpenErrorKind::InvalidArgument,
            _ => OpenErrorKind::Other,
        }
    }

    /// The error code reported by the platform.
    pub fn raw_os_error(&self) -> Option<c_int> {
        self.0.raw_os_error()
    }
}

impl From<OpenError> for io::Error {
    fn from(err: OpenError) -> Self {
        err.0
    }
}

/// Why a named semaphore failed to open.
///
/// Each variant covers one or more platform error codes; see
/// [`OpenError::kind`] for the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OpenErrorKind {
    /// The name is malformed or exceeds [`NAME_MAX`].
    InvalidName,

    /// Exclusive creation was requested, but the name is already bound.
    AlreadyExists,

    /// No creation was requested, and the name is unbound.
    NotFound,

    /// The caller may not open the semaphore under the requested mode.
    PermissionDenied,

    /// A process-wide or system-wide limit on semaphores or descriptors is
    /// exhausted.
    ResourceLimit,

    /// The initial value or the flags are outside the platform-accepted
    /// range.
    InvalidArgument,

    /// The platform reported a code outside the classified set.
    Other,
}

/// A handle to a named POSIX semaphore.
///
/// Obtain one with [`open`](Self::open). The semaphore itself is a kernel
/// object shared by every process that opens the same name; the handle is a
/// reference to it, valid until the process exits or the caller closes it
/// through the platform API.
///
/// Waiting and posting are not wrapped here. Feed [`as_ptr`](Self::as_ptr)
/// to the platform's wait and post calls. The handle has no drop behavior,
/// and copies of it alias the same kernel object.
///
/// # FFI
///
/// `Semaphore` is transparently a non-null `*mut libc::sem_t`.
#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct Semaphore(NonNull<libc::sem_t>);

//
// On Send and Sync safety of Semaphore
// ------------------------------------
//
// The pointee is a kernel-managed object. The platform performs all count
// manipulation and waiter bookkeeping behind its own internal locking, and
// this crate never reads or writes through the pointer. A copy of the handle
// on another thread is no different from another process holding its own
// handle to the same name, which the namespace is defined to support.
//

/// Safety: see above.
unsafe impl Send for Semaphore {}

/// Safety: see above.
unsafe impl Sync for Semaphore {}

impl Semaphore {
    /// Create or open the named semaphore `name`.
    ///
    /// `flags` selects between opening the existing object and creating a
    /// new one; see [`OpenFlags`]. `mode` gives the file-style permission
    /// bits, and `value` the initial count, for a newly created semaphore.
    /// Both are always handed to the platform, which reads them only when the
    /// create bit is set.
    ///
    /// The call is synchronous and does not wait on the semaphore's count; it
    /// returns once the namespace lookup (and possible creation) completes.
    /// On failure the platform's error comes back unchanged. In particular,
    /// the name's length is not checked locally, so validate against
    /// [`NAME_MAX`] first if the kernel round trip for an overlong name
    /// matters to you.
    pub fn open(
        name: &CStr,
        flags: OpenFlags,
        mode: libc::mode_t,
        value: u32,
    ) -> Result<Self, OpenError> {
        // Safety: `name` is nul-terminated and outlives the call. The callee
        // is variadic, so the trailing arguments are subject to default
        // argument promotion: the mode travels as c_uint, and the count
        // already is one.
        let sem = unsafe { libc::sem_open(name.as_ptr(), flags.0, c_uint::from(mode), value) };

        if core::ptr::eq(sem, libc::SEM_FAILED) {
            return Err(OpenError::last_os_error());
        }

        // SEM_FAILED is a null pointer on some platforms, making this check
        // an alias of the one above.
        NonNull::new(sem).map(Self).ok_or_else(OpenError::last_os_error)
    }

    /// The raw semaphore pointer.
    ///
    /// Pass this to the platform's wait, post, and close calls. The pointer
    /// stays valid for as long as the underlying object remains open in this
    /// process.
    pub const fn as_ptr(self) -> *mut libc::sem_t {
        self.0.as_ptr()
    }
}
