/*!
# Edge Weights

Weighted algorithms (shortest paths, spanning trees) read a numeric weight from every
edge property. Any property type implementing [`Weighted`] can be used; all primitive
numbers are weights of themselves, so `Graph<V, (), i64>` is a weighted graph out of the box.
*/

use std::{
    fmt::Debug,
    ops::{Add, Sub},
};

use num::{Bounded, Zero};

/// Numeric value usable as an edge weight or path length.
///
/// Only a partial order is required so that floating point weights can be used.
pub trait Weight:
    Copy + PartialOrd + Debug + Zero + Bounded + Add<Output = Self> + Sub<Output = Self>
{
    /// Returns *true* if the weight is strictly smaller than zero
    fn is_negative(&self) -> bool {
        *self < Self::zero()
    }

    /// Adds two weights, clamping the result to `[min_value(), max_value()]`
    fn saturating_sum(self, other: Self) -> Self {
        if other.is_negative() && self < Self::min_value() - other {
            Self::min_value()
        } else if other > Self::zero() && self > Self::max_value() - other {
            Self::max_value()
        } else {
            self + other
        }
    }
}

impl<W> Weight for W where
    W: Copy + PartialOrd + Debug + Zero + Bounded + Add<Output = W> + Sub<Output = W>
{
}

/// An edge property that exposes a numeric weight
pub trait Weighted {
    type Weight: Weight;

    /// Returns the weight of the edge carrying this property
    fn weight(&self) -> Self::Weight;
}

macro_rules! impl_weighted_primitive {
    ($($t:ty),*) => {
        $(
            impl Weighted for $t {
                type Weight = $t;

                #[inline]
                fn weight(&self) -> $t {
                    *self
                }
            }
        )*
    };
}

impl_weighted_primitive!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
