// SPDX-License-Identifier: MPL-2.0
// SPDX-FileCopyrightText: Copyright 2024 Ian McIntyre

//! Named POSIX semaphores with a fixed-arity open.
//!
//! A named semaphore is a counting semaphore that lives in a system-wide
//! namespace, keyed by a string. Every process that opens the same name
//! reaches the same kernel object, which makes named semaphores a building
//! block for cross-process synchronization.
//!
//! The platform's creation/open call is variadic: the permission mode and the
//! initial count are trailing arguments that the platform only reads when the
//! flags request creation. Variadic native functions cannot be called through
//! many binding layers, so this crate exposes the call with exactly four
//! parameters and always supplies the trailing two. Nothing is reinterpreted,
//! defaulted, or validated locally; the platform ignores the trailing
//! arguments whenever the create bit is unset.
//!
//! # Getting started
//!
//! Open a semaphore, creating it with one available count if nobody else has.
//!
//! ```no_run
//! use named_sem::semaphore::{OpenFlags, Semaphore};
//!
//! # fn main() -> Result<(), named_sem::semaphore::OpenError> {
//! let sem = Semaphore::open(c"/jobs", OpenFlags::create(), 0o600, 1)?;
//!
//! // The handle drives the rest of the platform's semaphore family.
//! let rc = unsafe { libc::sem_trywait(sem.as_ptr()) };
//! assert_eq!(rc, 0);
//! # Ok(()) }
//! ```
//!
//! # Design
//!
//! The crate is a leaf over the operating system's semaphore namespace. It
//! holds no state, caches nothing, and never retries; when several callers
//! race a create-if-absent open of one name, the platform resolves the race
//! atomically (exactly one caller creates, the rest open the existing
//! object). Failures surface the platform's error code unchanged; see
//! [`semaphore::OpenError`].
//!
//! Wait, post, close, and unlink are deliberately not wrapped. The
//! [`Semaphore`](semaphore::Semaphore) handle exposes its raw pointer so
//! callers can reach those calls directly, and dropping a handle releases
//! nothing.

#![warn(
    elided_lifetimes_in_paths,
    explicit_outlives_requirements,
    let_underscore_drop,
    missing_docs,
    semicolon_in_expressions_from_macros,
    single_use_lifetimes,
    trivial_numeric_casts,
    unsafe_op_in_unsafe_fn,
    unreachable_pub,
    unused_qualifications,
    clippy::cast_possible_truncation,
    clippy::map_unwrap_or,
    clippy::manual_assert,
    clippy::missing_safety_doc,
    clippy::ref_as_ptr,
    clippy::redundant_closure_for_method_calls,
    clippy::semicolon_if_nothing_returned,
    clippy::single_match_else,
    clippy::undocumented_unsafe_blocks,
    clippy::used_underscore_binding
)]
#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

pub mod semaphore;
