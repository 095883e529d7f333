/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![doc = include_str!("../README.md")]
#![deny(unstable_features)]
#![deny(trivial_casts)]
#![deny(unconditional_recursion)]
#![deny(clippy::empty_loop)]
#![deny(unreachable_code)]
#![deny(unreachable_patterns)]
#![deny(unused_macro_rules)]
#![deny(unused_doc_comments)]

#[macro_use]
pub mod utils;

pub mod graphs;
pub mod sssp;
pub mod traits;

pub mod prelude {
    pub use crate::graphs::prelude::*;
    pub use crate::sssp::*;
    pub use crate::thread_pool;
    pub use crate::traits::*;
}
