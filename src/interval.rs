//! Scalar intervals.
//!
//! [`Interval`] describes a range of primitive scalars from an infimum to a
//! supremum, each end either open or closed. The scattering configuration
//! uses closed intervals to bound its random draws.

use core::fmt;

/// Primitive scalar usable as an interval endpoint.
pub trait Scalar: Copy + PartialOrd + fmt::Debug {
    /// Whether the type is an integer type.
    const INTEGRAL: bool;

    /// Smallest representable value greater than `self` (in the direction
    /// of `toward`), used to turn an open endpoint into a minimum/maximum.
    fn step_toward(self, toward: Self) -> Self;

    fn to_f64(self) -> f64;
}

impl Scalar for u32 {
    const INTEGRAL: bool = true;

    fn step_toward(self, toward: Self) -> Self {
        if toward > self {
            self + 1
        } else {
            self - 1
        }
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Scalar for i32 {
    const INTEGRAL: bool = true;

    fn step_toward(self, toward: Self) -> Self {
        if toward > self {
            self + 1
        } else {
            self - 1
        }
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Scalar for f64 {
    const INTEGRAL: bool = false;

    fn step_toward(self, toward: Self) -> Self {
        next_after(self, toward)
    }

    fn to_f64(self) -> f64 {
        self
    }
}

/// C-style `nextafter` for finite inputs.
fn next_after(x: f64, toward: f64) -> f64 {
    if x.is_nan() || toward.is_nan() {
        return f64::NAN;
    }
    if x == toward {
        return toward;
    }
    if x == 0.0 {
        let tiny = f64::from_bits(1);
        return if toward > 0.0 { tiny } else { -tiny };
    }
    let bits = x.to_bits();
    let up = (toward > x) == (x > 0.0);
    f64::from_bits(if up { bits + 1 } else { bits - 1 })
}

/// Whether an interval endpoint belongs to the interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointInclusion {
    Open,
    Closed,
}

/// Interval of primitive scalars `T`.
///
/// Endpoints are stored sorted, so `Interval::closed(3, 1)` is `[1, 3]`.
#[derive(Clone, Copy, PartialEq)]
pub struct Interval<T: Scalar> {
    inf: T,
    sup: T,
    inf_inclusion: EndpointInclusion,
    sup_inclusion: EndpointInclusion,
}

impl<T: Scalar> Interval<T> {
    /// Interval between `a` and `b` with the given endpoint inclusions. The
    /// inclusions refer to the smaller and the larger value, respectively.
    pub fn new(
        a: T,
        b: T,
        inf_inclusion: EndpointInclusion,
        sup_inclusion: EndpointInclusion,
    ) -> Self {
        let (inf, sup) = if b < a { (b, a) } else { (a, b) };
        Self {
            inf,
            sup,
            inf_inclusion,
            sup_inclusion,
        }
    }

    /// Closed interval `[a, b]`.
    pub fn closed(a: T, b: T) -> Self {
        Self::new(a, b, EndpointInclusion::Closed, EndpointInclusion::Closed)
    }

    /// Open interval `(a, b)`.
    pub fn open(a: T, b: T) -> Self {
        Self::new(a, b, EndpointInclusion::Open, EndpointInclusion::Open)
    }

    /// Closed interval containing only `value`.
    pub fn point(value: T) -> Self {
        Self::closed(value, value)
    }

    /// Empty interval `(v, v)`.
    pub fn empty(v: T) -> Self {
        Self::open(v, v)
    }

    #[inline]
    pub fn inf(&self) -> T {
        self.inf
    }

    #[inline]
    pub fn sup(&self) -> T {
        self.sup
    }

    #[inline]
    pub fn inf_included(&self) -> bool {
        self.inf_inclusion == EndpointInclusion::Closed
    }

    #[inline]
    pub fn sup_included(&self) -> bool {
        self.sup_inclusion == EndpointInclusion::Closed
    }

    /// Whether the interval contains no value at all.
    pub fn is_empty(&self) -> bool {
        if self.inf == self.sup {
            return !self.inf_included() || !self.sup_included();
        }
        if !self.inf_included() && !self.sup_included() {
            // (a, b) is empty if nothing fits between a and b.
            return self.inf.step_toward(self.sup) == self.sup;
        }
        false
    }

    pub fn contains(&self, value: T) -> bool {
        let above = if self.inf_included() {
            value >= self.inf
        } else {
            value > self.inf
        };
        let below = if self.sup_included() {
            value <= self.sup
        } else {
            value < self.sup
        };
        above && below
    }

    /// Intersection of `self` and `other`. Disjoint intervals yield an
    /// empty interval.
    pub fn intersection_with(&self, other: &Interval<T>) -> Interval<T> {
        let inf = if self.inf > other.inf { self.inf } else { other.inf };
        let sup = if self.sup < other.sup { self.sup } else { other.sup };
        if inf > sup {
            return Self::empty(inf);
        }
        let inclusion = |v: T| {
            if self.contains(v) && other.contains(v) {
                EndpointInclusion::Closed
            } else {
                EndpointInclusion::Open
            }
        };
        Self::new(inf, sup, inclusion(inf), inclusion(sup))
    }

    pub fn intersects(&self, other: &Interval<T>) -> bool {
        !self.intersection_with(other).is_empty()
    }

    /// Smallest value in the interval, `None` if empty.
    pub fn min(&self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        if self.inf_included() {
            Some(self.inf)
        } else {
            Some(self.inf.step_toward(self.sup))
        }
    }

    /// Largest value in the interval, `None` if empty.
    pub fn max(&self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        if self.sup_included() {
            Some(self.sup)
        } else {
            Some(self.sup.step_toward(self.inf))
        }
    }

    /// Linear interpolation between [`Interval::min`] (`t = 0`) and
    /// [`Interval::max`] (`t = 1`). `None` if empty.
    pub fn value_at(&self, t: f64) -> Option<f64> {
        let min = self.min()?.to_f64();
        let max = self.max()?.to_f64();
        Some((1.0 - t) * min + t * max)
    }

    /// Inverse of [`Interval::value_at`]. `None` if the interval is empty or
    /// holds a single value.
    pub fn parametric_value(&self, x: T) -> Option<f64> {
        let min = self.min()?.to_f64();
        let max = self.max()?.to_f64();
        if min == max {
            return None;
        }
        Some((x.to_f64() - min) / (max - min))
    }

    /// `value` clamped to `[min, max]`. `None` if empty.
    pub fn clamp(&self, value: T) -> Option<T> {
        let min = self.min()?;
        let max = self.max()?;
        Some(if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        })
    }

    /// Whether `self` lies entirely within `other`. Empty intervals are
    /// contained in everything.
    pub fn is_subset_of(&self, other: &Interval<T>) -> bool {
        match (self.min(), self.max()) {
            (Some(min), Some(max)) => other.contains(min) && other.contains(max),
            _ => true,
        }
    }
}

impl<T: Scalar> fmt::Debug for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:?}, {:?}{}",
            if self.inf_included() { '[' } else { '(' },
            self.inf,
            self.sup,
            if self.sup_included() { ']' } else { ')' }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
