//! Numeric ranges `[begin : step : end]`.

use std::cmp::Ordering;
use std::fmt;

use crate::number::write_number;

/// Step count reported for ranges that never terminate in practice
/// (zero step, or an infinite bound).
pub const RANGE_UNBOUNDED: u32 = u32::MAX;

/// Largest range a single string expansion (`chr`) will walk.
pub const MAX_RANGE_STEPS: u32 = 10_000;

/// Arithmetic progression from `begin` towards `end` by `step`.
///
/// Immutable once built. The number of produced values is a pure function
/// of the three fields; see [`RangeValue::num_values`].
#[derive(Clone, Copy, Debug)]
pub struct RangeValue {
    begin: f64,
    step: f64,
    end: f64,
}

impl RangeValue {
    /// Range with the default step of 1.
    pub fn new(begin: f64, end: f64) -> Self {
        RangeValue {
            begin,
            step: 1.0,
            end,
        }
    }

    pub fn with_step(begin: f64, step: f64, end: f64) -> Self {
        RangeValue { begin, step, end }
    }

    pub fn begin_value(&self) -> f64 {
        self.begin
    }

    pub fn step_value(&self) -> f64 {
        self.step
    }

    pub fn end_value(&self) -> f64 {
        self.end
    }

    /// Number of values the range produces.
    ///
    /// Rules, first match wins:
    /// 1. any field NaN → 0
    /// 2. step points away from `end` → 0
    /// 3. `begin == end` or infinite step → 1
    /// 4. infinite bound or zero step → [`RANGE_UNBOUNDED`]
    /// 5. `floor(next_up((end - begin) / step)) + 1`, clamped
    ///
    /// The nudge in rule 5 keeps a quotient such as `2.9999999999999996`
    /// from dropping the final boundary value.
    pub fn num_values(&self) -> u32 {
        let RangeValue { begin, step, end } = *self;
        if begin.is_nan() || step.is_nan() || end.is_nan() {
            return 0;
        }
        if (step < 0.0 && begin < end) || (step >= 0.0 && begin > end) {
            return 0;
        }
        if begin == end || step.is_infinite() {
            return 1;
        }
        if begin.is_infinite() || end.is_infinite() || step == 0.0 {
            return RANGE_UNBOUNDED;
        }

        let steps = next_toward_unbounded((end - begin) / step);
        if steps >= f64::from(RANGE_UNBOUNDED) {
            return RANGE_UNBOUNDED;
        }
        // In range: 0 <= steps < u32::MAX.
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "bounds checked above; truncation is the intended floor"
        )]
        let whole = steps as u32;
        whole.saturating_add(1)
    }

    /// Whether the range produces no values.
    pub fn is_empty(&self) -> bool {
        self.num_values() == 0
    }

    /// Forward iterator over the produced values.
    pub fn iter(&self) -> RangeIter<'_> {
        RangeIter::new(self)
    }

    /// Value at `index`, computed from scratch as `begin + step * index`.
    fn value_at(&self, index: u32) -> f64 {
        self.begin + self.step * f64::from(index)
    }
}

/// One representable step from `quotient` toward [`RANGE_UNBOUNDED`].
fn next_toward_unbounded(quotient: f64) -> f64 {
    let target = f64::from(RANGE_UNBOUNDED);
    if quotient.is_nan() || quotient == target {
        quotient
    } else if quotient > target {
        // Also maps +inf to the largest finite value; still above target.
        f64::from_bits(quotient.to_bits() - 1)
    } else if quotient == 0.0 {
        f64::from_bits(1)
    } else if quotient > 0.0 {
        f64::from_bits(quotient.to_bits() + 1)
    } else {
        f64::from_bits(quotient.to_bits() - 1)
    }
}

impl PartialEq for RangeValue {
    fn eq(&self, other: &Self) -> bool {
        let (n1, n2) = (self.num_values(), other.num_values());
        if n1 == 0 || n2 == 0 {
            return n1 == n2;
        }
        self.begin == other.begin && self.step == other.step && n1 == n2
    }
}

impl PartialOrd for RangeValue {
    /// Empty ranges sort first; otherwise compare begin, then step, then
    /// the number of values.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let (n1, n2) = (self.num_values(), other.num_values());
        match (n1, n2) {
            (0, 0) => return Some(Ordering::Equal),
            (0, _) => return Some(Ordering::Less),
            (_, 0) => return Some(Ordering::Greater),
            _ => {}
        }
        match self.begin.partial_cmp(&other.begin)? {
            Ordering::Equal => {}
            ordering => return Some(ordering),
        }
        match self.step.partial_cmp(&other.step)? {
            Ordering::Equal => Some(n1.cmp(&n2)),
            ordering => Some(ordering),
        }
    }
}

impl fmt::Display for RangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        write_number(f, self.begin)?;
        f.write_str(" : ")?;
        write_number(f, self.step)?;
        f.write_str(" : ")?;
        write_number(f, self.end)?;
        f.write_str("]")
    }
}

/// Iterator state: still producing, or past the last value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum IterState {
    Running,
    Done,
}

/// Forward iterator over a [`RangeValue`].
///
/// Each value is recomputed from the step index rather than accumulated,
/// so long ranges do not drift.
#[derive(Clone, Debug)]
pub struct RangeIter<'a> {
    range: &'a RangeValue,
    value: f64,
    index: u32,
    num_values: u32,
    state: IterState,
}

impl<'a> RangeIter<'a> {
    fn new(range: &'a RangeValue) -> Self {
        let mut iter = RangeIter {
            range,
            value: range.begin,
            index: 0,
            num_values: range.num_values(),
            state: IterState::Running,
        };
        iter.update_state();
        iter
    }

    /// Iterator positioned past the last value of `range`.
    pub fn end(range: &'a RangeValue) -> Self {
        let num_values = range.num_values();
        RangeIter {
            range,
            value: range.value_at(num_values),
            index: num_values,
            num_values,
            state: IterState::Done,
        }
    }

    /// Whether the iterator has produced its last value.
    pub fn is_done(&self) -> bool {
        self.state == IterState::Done
    }

    fn update_state(&mut self) {
        let r = self.range;
        if r.step == 0.0 || self.index >= self.num_values {
            self.state = IterState::Done;
        }
        if r.begin.is_nan() || r.step.is_nan() || r.end.is_nan() {
            self.state = IterState::Done;
            self.index = self.num_values;
        }
    }
}

impl Iterator for RangeIter<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.state == IterState::Done {
            return None;
        }
        let current = self.value;
        self.index = self.index.saturating_add(1);
        self.value = self.range.value_at(self.index);
        self.update_state();
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.state == IterState::Done {
            return (0, Some(0));
        }
        let remaining = usize::try_from(self.num_values - self.index).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl PartialEq for RangeIter<'_> {
    /// Running iterators match on their current value; finished iterators
    /// match each other. Both must come from equal ranges.
    fn eq(&self, other: &Self) -> bool {
        if self.state != other.state || self.range != other.range {
            return false;
        }
        match self.state {
            IterState::Running => self.value == other.value,
            IterState::Done => true,
        }
    }
}

#[cfg(test)]
mod tests;
