use std::cmp::Ordering;

use super::DomainId;
use super::IntegerVariable;
use super::MarginalVariable;
use crate::engine::DomainError;
use crate::engine::Domains;
use crate::engine::EmptyDomain;
use crate::math::num_ext::NumExt;

/// Models `y = scale * x + offset` by expressing the domain of `y` as a transformation of the domain
/// of `x`.
///
/// A view can only be obtained through constructors which check that the transformed initial bounds
/// of `x` fit in an `i32`; a restore never widens a domain beyond its initial bounds, so every value
/// the view can produce fits as well.
#[derive(Clone, Copy, Hash, Eq, PartialEq)]
pub struct AffineView {
    inner: DomainId,
    scale: i32,
    offset: i32,
}

enum Rounding {
    Up,
    Down,
}

impl AffineView {
    pub(crate) fn new(
        inner: DomainId,
        scale: i32,
        offset: i32,
        domains: &Domains,
    ) -> Result<AffineView, DomainError> {
        AffineView::checked(
            inner,
            i64::from(scale),
            i64::from(offset),
            domains,
        )
    }

    /// The view `scale * self`.
    pub fn scaled(&self, scale: i32, domains: &Domains) -> Result<AffineView, DomainError> {
        AffineView::checked(
            self.inner,
            i64::from(self.scale) * i64::from(scale),
            i64::from(self.offset) * i64::from(scale),
            domains,
        )
    }

    /// The view `self + offset`.
    pub fn offset(&self, offset: i32, domains: &Domains) -> Result<AffineView, DomainError> {
        AffineView::checked(
            self.inner,
            i64::from(self.scale),
            i64::from(self.offset) + i64::from(offset),
            domains,
        )
    }

    pub fn inner(&self) -> DomainId {
        self.inner
    }

    fn checked(
        inner: DomainId,
        scale: i64,
        offset: i64,
        domains: &Domains,
    ) -> Result<AffineView, DomainError> {
        if scale == 0 {
            return Err(DomainError::ZeroScale);
        }

        let lower_bound = domains.initial_lower_bound(inner);
        let upper_bound = domains.initial_upper_bound(inner);
        let overflow = DomainError::IntegerOverflow {
            scale,
            offset,
            lower_bound,
            upper_bound,
        };

        let scale = i32::try_from(scale).map_err(|_| overflow)?;
        let offset = i32::try_from(offset).map_err(|_| overflow)?;
        let view = AffineView {
            inner,
            scale,
            offset,
        };
        let _ = view.checked_map(lower_bound).ok_or(overflow)?;
        let _ = view.checked_map(upper_bound).ok_or(overflow)?;

        Ok(view)
    }

    fn checked_map(&self, value: i32) -> Option<i32> {
        self.scale
            .checked_mul(value)
            .and_then(|scaled| scaled.checked_add(self.offset))
    }

    fn map(&self, value: i32) -> i32 {
        self.scale * value + self.offset
    }

    /// Apply the inverse transformation of this view on a value, to go from the value in the domain
    /// of `self` to a value in the domain of `self.inner`.
    fn invert(&self, value: i32, rounding: Rounding) -> i64 {
        let inverted_translation = i64::from(value) - i64::from(self.offset);

        match rounding {
            Rounding::Up => <i64 as NumExt>::div_ceil(inverted_translation, i64::from(self.scale)),
            Rounding::Down => {
                <i64 as NumExt>::div_floor(inverted_translation, i64::from(self.scale))
            }
        }
    }

    /// The value of `self.inner` which maps onto `value`, if there is one.
    fn exact_inverse(&self, value: i32) -> Option<i32> {
        let translated = i64::from(value) - i64::from(self.offset);
        if translated % i64::from(self.scale) != 0 {
            return None;
        }
        i32::try_from(translated / i64::from(self.scale)).ok()
    }

    fn set_inner_lower_bound(&self, domains: &mut Domains, bound: i64) -> Result<(), EmptyDomain> {
        match i32::try_from(bound) {
            Ok(bound) => self.inner.set_lower_bound(domains, bound),
            Err(_) if bound > 0 => Err(EmptyDomain),
            Err(_) => Ok(()),
        }
    }

    fn set_inner_upper_bound(&self, domains: &mut Domains, bound: i64) -> Result<(), EmptyDomain> {
        match i32::try_from(bound) {
            Ok(bound) => self.inner.set_upper_bound(domains, bound),
            Err(_) if bound < 0 => Err(EmptyDomain),
            Err(_) => Ok(()),
        }
    }
}

impl IntegerVariable for AffineView {
    fn lower_bound(&self, domains: &Domains) -> i32 {
        if self.scale < 0 {
            self.map(self.inner.upper_bound(domains))
        } else {
            self.map(self.inner.lower_bound(domains))
        }
    }

    fn upper_bound(&self, domains: &Domains) -> i32 {
        if self.scale < 0 {
            self.map(self.inner.lower_bound(domains))
        } else {
            self.map(self.inner.upper_bound(domains))
        }
    }

    fn size(&self, domains: &Domains) -> usize {
        self.inner.size(domains)
    }

    fn contains(&self, domains: &Domains, value: i32) -> bool {
        self.exact_inverse(value)
            .is_some_and(|inverted| self.inner.contains(domains, inverted))
    }

    fn assign(&self, domains: &mut Domains, value: i32) -> Result<(), EmptyDomain> {
        match self.exact_inverse(value) {
            Some(inverted) => self.inner.assign(domains, inverted),
            None => Err(EmptyDomain),
        }
    }

    fn remove(&self, domains: &mut Domains, value: i32) -> Result<(), EmptyDomain> {
        match self.exact_inverse(value) {
            Some(inverted) => self.inner.remove(domains, inverted),
            None => Ok(()),
        }
    }

    fn set_lower_bound(&self, domains: &mut Domains, value: i32) -> Result<(), EmptyDomain> {
        if self.scale >= 0 {
            self.set_inner_lower_bound(domains, self.invert(value, Rounding::Up))
        } else {
            self.set_inner_upper_bound(domains, self.invert(value, Rounding::Down))
        }
    }

    fn set_upper_bound(&self, domains: &mut Domains, value: i32) -> Result<(), EmptyDomain> {
        if self.scale >= 0 {
            self.set_inner_upper_bound(domains, self.invert(value, Rounding::Down))
        } else {
            self.set_inner_lower_bound(domains, self.invert(value, Rounding::Up))
        }
    }
}

impl MarginalVariable for AffineView {
    fn max_marginal(&self, domains: &Domains) -> f64 {
        self.inner.max_marginal(domains)
    }

    fn value_with_max_marginal(&self, domains: &Domains) -> i32 {
        self.map(self.inner.value_with_max_marginal(domains))
    }
}

impl std::fmt::Debug for AffineView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.scale == -1 {
            write!(f, "-")?;
        } else if self.scale != 1 {
            write!(f, "{} * ", self.scale)?;
        }

        write!(f, "({:?})", self.inner)?;

        match self.offset.cmp(&0) {
            Ordering::Less => write!(f, " - {}", -i64::from(self.offset))?,
            Ordering::Equal => {}
            Ordering::Greater => write!(f, " + {}", self.offset)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SearchContext;

    #[test]
    fn bounds_are_mapped_through_a_negative_scale() {
        let mut domains = Domains::default();
        let x = domains.new_bounded_integer(1, 4);
        let view = domains.affine_view(x, -2, 3).expect("no overflow");

        assert_eq!(-5, view.lower_bound(&domains));
        assert_eq!(1, view.upper_bound(&domains));
        assert!(view.contains(&domains, -3));
        assert!(!view.contains(&domains, -2));
    }

    #[test]
    fn bound_updates_are_rounded_towards_the_inner_domain() {
        let mut domains = Domains::default();
        let x = domains.new_bounded_integer(0, 10);
        let view = domains.affine_view(x, 3, 0).expect("no overflow");

        view.set_lower_bound(&mut domains, 4).expect("non-empty");
        view.set_upper_bound(&mut domains, 20).expect("non-empty");

        assert_eq!(2, domains.lower_bound(x));
        assert_eq!(6, domains.upper_bound(x));
        assert_eq!(Err(EmptyDomain), view.assign(&mut domains, 10));
    }

    #[test]
    fn offset_view_beyond_the_representable_range_is_rejected() {
        let mut domains = Domains::default();
        let x = domains.new_bounded_integer(i32::MAX - 5, i32::MAX);

        let result = domains.affine_view(x, 1, 10);

        assert!(matches!(result, Err(DomainError::IntegerOverflow { .. })));
    }

    #[test]
    fn scale_overflowing_a_small_domain_is_rejected() {
        let mut domains = Domains::default();
        let x = domains.new_bounded_integer(-1, 2);

        let result = domains.affine_view(x, i32::MAX, 0);

        assert!(matches!(result, Err(DomainError::IntegerOverflow { .. })));
    }

    #[test]
    fn views_are_checked_against_the_bounds_a_restore_brings_back() {
        let mut domains = Domains::default();
        let x = domains.new_bounded_integer(0, 1000);

        let _ = domains.state_manager_mut().checkpoint();
        domains.set_upper_bound(x, 1).expect("non-empty");

        let result = domains.affine_view(x, i32::MAX / 2, 0);
        assert!(matches!(result, Err(DomainError::IntegerOverflow { .. })));

        let view = domains.affine_view(x, 1 << 20, 0).expect("no overflow");
        domains.state_manager_mut().restore_to_checkpoint();
        assert_eq!(1000 << 20, view.upper_bound(&domains));
    }

    #[test]
    fn composed_scale_overflow_is_rejected() {
        let mut domains = Domains::default();
        let x = domains.new_bounded_integer(-1, 1);
        let view = domains.affine_view(x, 1 << 20, 0).expect("no overflow");

        let result = view.scaled(1 << 12, &domains);

        assert!(matches!(result, Err(DomainError::IntegerOverflow { .. })));
    }

    #[test]
    fn zero_scale_is_rejected() {
        let mut domains = Domains::default();
        let x = domains.new_bounded_integer(0, 1);

        assert_eq!(Err(DomainError::ZeroScale), domains.affine_view(x, 0, 1));
    }

    #[test]
    fn offsets_compose() {
        let mut domains = Domains::default();
        let x = domains.new_bounded_integer(0, 3);
        let view = domains
            .affine_view(x, 1, 2)
            .and_then(|view| view.offset(-5, &domains))
            .expect("no overflow");

        assert_eq!(-3, view.lower_bound(&domains));
        assert_eq!(0, view.upper_bound(&domains));
        assert_eq!("(x0) - 3", format!("{view:?}"));
    }
}
