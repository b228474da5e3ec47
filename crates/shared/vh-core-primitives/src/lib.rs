//! Core primitives for block header hashing: headers, solution descriptors and PBaaS pre-headers

#![no_std]
#![warn(rust_2018_idioms, missing_debug_implementations, missing_docs)]

pub mod block;
pub mod compact_size;
pub mod hashes;
pub mod solutions;

extern crate alloc;

const _: () = {
    assert!(
        size_of::<usize>() >= size_of::<u32>(),
        "Must be at least 32-bit platform"
    );
};
