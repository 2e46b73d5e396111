// Copyright (c) 2025 Kasbuku Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The ledger query engine: pure, synchronous functions over an in-memory
//! snapshot of transactions. No I/O, no shared state; callers re-invoke it
//! on every fresh snapshot from the store.

pub mod aggregate;
pub mod filter;
pub mod report;
