/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Traits abstracting arc weights and their atomic counterparts.
//!
//! Shortest-path computations are generic in the weight type through the
//! [`Weight`] trait, which is implemented for `i32` and `f32`. Tentative
//! distances are updated concurrently with compare-and-swap operations on the
//! [associated atomic type](Weight::Atomic): `i32` maps to
//! [`AtomicI32`](core::sync::atomic::AtomicI32), whereas `f32` maps to
//! [`AtomicF32`](atomic_float::AtomicF32), which performs compare-and-swap on
//! the underlying bit pattern. Distances are nonnegative and never NaN, so
//! bit-pattern equality coincides with floating-point equality on every value
//! a computation can store.

use atomic_float::AtomicF32;
use core::fmt::{Debug, Display};
use core::sync::atomic::{AtomicI32, Ordering};

/// Atomic access to a weight slot.
///
/// The operations mirror those of the standard atomic types; only the subset
/// needed by shortest-path computations is exposed.
pub trait AtomicWeight<W>: Send + Sync {
    /// Creates a new atomic slot holding `value`.
    fn new(value: W) -> Self;

    /// Loads the current value.
    fn load(&self, order: Ordering) -> W;

    /// Stores `value`.
    fn store(&self, value: W, order: Ordering);

    /// Stores `new` if the current value is `current`, returning the previous
    /// value on success and the actual value on failure.
    ///
    /// As with the standard atomic types, this operation may fail spuriously
    /// and should be used in a loop.
    fn compare_exchange_weak(
        &self,
        current: W,
        new: W,
        success: Ordering,
        failure: Ordering,
    ) -> Result<W, W>;

    /// Consumes the slot and returns the contained value.
    fn into_inner(self) -> W;
}

impl AtomicWeight<i32> for AtomicI32 {
    #[inline(always)]
    fn new(value: i32) -> Self {
        AtomicI32::new(value)
    }

    #[inline(always)]
    fn load(&self, order: Ordering) -> i32 {
        AtomicI32::load(self, order)
    }

    #[inline(always)]
    fn store(&self, value: i32, order: Ordering) {
        AtomicI32::store(self, value, order)
    }

    #[inline(always)]
    fn compare_exchange_weak(
        &self,
        current: i32,
        new: i32,
        success: Ordering,
        failure: Ordering,
    ) -> Result<i32, i32> {
        AtomicI32::compare_exchange_weak(self, current, new, success, failure)
    }

    #[inline(always)]
    fn into_inner(self) -> i32 {
        AtomicI32::into_inner(self)
    }
}

impl AtomicWeight<f32> for AtomicF32 {
    #[inline(always)]
    fn new(value: f32) -> Self {
        AtomicF32::new(value)
    }

    #[inline(always)]
    fn load(&self, order: Ordering) -> f32 {
        AtomicF32::load(self, order)
    }

    #[inline(always)]
    fn store(&self, value: f32, order: Ordering) {
        AtomicF32::store(self, value, order)
    }

    #[inline(always)]
    fn compare_exchange_weak(
        &self,
        current: f32,
        new: f32,
        success: Ordering,
        failure: Ordering,
    ) -> Result<f32, f32> {
        AtomicF32::compare_exchange_weak(self, current, new, success, failure)
    }

    #[inline(always)]
    fn into_inner(self) -> f32 {
        AtomicF32::into_inner(self)
    }
}

/// A nonnegative arc weight.
///
/// Distances that are still unknown are represented by the sentinel
/// [`INF`](Weight::INF), defined as half of the maximum value of the type:
/// this way the sum of a real distance and of an arc weight can never reach
/// the sentinel, and [`add_saturating`](Weight::add_saturating) guarantees
/// that sums cannot wrap around even for adversarial weights.
pub trait Weight:
    Copy + Send + Sync + PartialOrd + Debug + Display + 'static
{
    /// The zero weight (the distance of the source from itself).
    const ZERO: Self;

    /// The unit weight (the smallest weight generated by random graphs).
    const ONE: Self;

    /// The sentinel for “no path yet”: half of the maximum value of the type.
    const INF: Self;

    /// The atomic type used for concurrently updated distance slots.
    type Atomic: AtomicWeight<Self>;

    /// Creates a new atomic slot holding `value`.
    fn new_atomic(value: Self) -> Self::Atomic {
        <Self::Atomic as AtomicWeight<Self>>::new(value)
    }

    /// Adds `rhs` to `self`, saturating at [`INF`](Weight::INF).
    ///
    /// The result is exact whenever both operands are below the sentinel and
    /// their sum is, too; a saturated result can never win a relaxation, so
    /// unreachable vertices keep the sentinel.
    fn add_saturating(self, rhs: Self) -> Self;

    /// Returns ⌊`self` / `delta`⌋, the index of the bucket of width `delta`
    /// containing `self`.
    fn bucket_index(self, delta: Self) -> usize;

    /// Returns `delta` · `bucket`, the smallest distance falling in the bucket
    /// of the given index, saturating at the maximum value of the type.
    fn bucket_start(bucket: usize, delta: Self) -> Self;
}

impl Weight for i32 {
    const ZERO: i32 = 0;
    const ONE: i32 = 1;
    const INF: i32 = i32::MAX / 2;

    type Atomic = AtomicI32;

    #[inline(always)]
    fn add_saturating(self, rhs: i32) -> i32 {
        (self as i64 + rhs as i64).min(Self::INF as i64) as i32
    }

    #[inline(always)]
    fn bucket_index(self, delta: i32) -> usize {
        (self / delta) as usize
    }

    #[inline(always)]
    fn bucket_start(bucket: usize, delta: i32) -> i32 {
        (delta as i64 * bucket as i64).min(i32::MAX as i64) as i32
    }
}

impl Weight for f32 {
    const ZERO: f32 = 0.0;
    const ONE: f32 = 1.0;
    const INF: f32 = f32::MAX / 2.0;

    type Atomic = AtomicF32;

    #[inline(always)]
    fn add_saturating(self, rhs: f32) -> f32 {
        (self + rhs).min(Self::INF)
    }

    #[inline(always)]
    fn bucket_index(self, delta: f32) -> usize {
        (self / delta) as usize
    }

    #[inline(always)]
    fn bucket_start(bucket: usize, delta: f32) -> f32 {
        delta * bucket as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_saturating() {
        assert_eq!(2_i32.add_saturating(3), 5);
        assert_eq!(i32::INF.add_saturating(i32::MAX), i32::INF);
        assert_eq!((i32::INF - 1).add_saturating(1), i32::INF);
        assert_eq!(2.0_f32.add_saturating(3.0), 5.0);
        assert_eq!(f32::INF.add_saturating(f32::MAX), f32::INF);
    }

    #[test]
    fn test_bucket_index() {
        assert_eq!(0_i32.bucket_index(5), 0);
        assert_eq!(4_i32.bucket_index(5), 0);
        assert_eq!(5_i32.bucket_index(5), 1);
        assert_eq!(9.9_f32.bucket_index(5.0), 1);
        assert_eq!(10.0_f32.bucket_index(5.0), 2);
    }

    #[test]
    fn test_float_cas() {
        let a = AtomicF32::new(10.0);
        while AtomicWeight::compare_exchange_weak(
            &a,
            10.0,
            2.5,
            Ordering::Relaxed,
            Ordering::Relaxed,
        )
        .is_err()
        {}
        assert_eq!(AtomicWeight::load(&a, Ordering::Relaxed), 2.5);
        // A stale expected value reports the actual one.
        assert_eq!(
            AtomicWeight::compare_exchange_weak(
                &a,
                10.0,
                1.0,
                Ordering::Relaxed,
                Ordering::Relaxed
            ),
            Err(2.5)
        );
    }
}
