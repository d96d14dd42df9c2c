/*!
Resolution of a civil datetime to an instant by walking offsets.

An offset oracle can only answer "what is the offset at this instant?"
Turning a civil reading back into an instant means finding an instant `t`
such that `t + offset(t)` equals the reading. There may be zero such
instants (a gap) or more than one (an overlap).

The search brackets the reading by the largest offsets seen in practice
(`-12:00` and `+14:00`), then walks forward through the bracket in steps no
larger than the granularity of the offsets at either end. The first match
wins, which picks the earlier instant in an overlap. In a gap, the first
instant whose local reading is past the target wins, which moves the reading
forward by the length of the gap.
*/

use crate::{
    error::{tz::Error as E, Error},
    tz::offset::Offset,
    util::common::SECONDS_PER_HOUR,
};

/// The maximum number of offsets inspected while walking the bracket.
///
/// The bracket is 26 hours wide and the finest step is 15 minutes, so a
/// well behaved oracle never needs more than 105 steps.
pub(crate) const MAX_RESOLVE_STEPS: usize = 128;

/// Returns the epoch second of the instant at which the civil reading
/// `target` (given as epoch seconds, as if the reading were in UTC) is
/// observed.
///
/// `offset_at` reports the offset observed at an epoch second.
pub(crate) fn resolve(
    target: i64,
    mut offset_at: impl FnMut(i64) -> Result<Offset, Error>,
) -> Result<i64, Error> {
    let start = target - 14 * SECONDS_PER_HOUR;
    let end = target + 12 * SECONDS_PER_HOUR;
    let first = offset_at(start)?;
    let last = offset_at(end)?;
    let step = first.granularity().min(last.granularity());

    let mut t = start;
    let mut offset = first;
    let mut prev: Option<Offset> = None;
    for _ in 0..MAX_RESOLVE_STEPS {
        let local = t + i64::from(offset.seconds());
        if local == target {
            if first != last {
                trace!(
                    "resolved civil reading {target} near a transition \
                     to offset {offset} at epoch second {t}",
                );
            }
            return Ok(t);
        }
        if local > target {
            return passed(target, t, offset, prev, &mut offset_at);
        }
        prev = Some(offset);
        t += step;
        offset = offset_at(t)?;
    }
    warn!(
        "gave up resolving civil reading {target} after \
         {MAX_RESOLVE_STEPS} steps of {step} seconds",
    );
    Err(Error::from(E::ResolveStepLimit { steps: MAX_RESOLVE_STEPS }))
}

/// Handles the step at which the derived local reading first moves past the
/// target without ever having been equal to it.
///
/// This is either a gap, or an offset that is not a multiple of the step
/// (like local mean time). The latter is recognized by checking whether the
/// exact candidate implied by an offset actually observes that offset.
fn passed(
    target: i64,
    t: i64,
    offset: Offset,
    prev: Option<Offset>,
    offset_at: &mut impl FnMut(i64) -> Result<Offset, Error>,
) -> Result<i64, Error> {
    if let Some(prev) = prev {
        let candidate = target - i64::from(prev.seconds());
        if candidate < t && offset_at(candidate)? == prev {
            return Ok(candidate);
        }
    }
    let candidate = target - i64::from(offset.seconds());
    if candidate != t && offset_at(candidate)? == offset {
        return Ok(candidate);
    }
    trace!(
        "civil reading {target} falls in a gap, \
         moving forward to offset {offset} at epoch second {t}",
    );
    Ok(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn off(seconds: i32) -> Offset {
        Offset::new(seconds).unwrap()
    }

    /// A zone that switches from `before` to `after` at `at`.
    fn transition(
        at: i64,
        before: i32,
        after: i32,
    ) -> impl FnMut(i64) -> Result<Offset, Error> {
        move |t| Ok(off(if t < at { before } else { after }))
    }

    #[test]
    fn constant_offsets() {
        for seconds in [0, -3 * 3_600, 14 * 3_600, -12 * 3_600, 20_700] {
            let got = resolve(1_000_000, |_| Ok(off(seconds))).unwrap();
            assert_eq!(got, 1_000_000 - i64::from(seconds));
        }
    }

    #[test]
    fn gap_moves_forward() {
        // Clocks go from -03:00 to -02:00 at epoch second 0, so local
        // readings in [-3h, -2h) do not exist.
        let target = -3 * 3_600 + 1_800;
        let got = resolve(target, transition(0, -10_800, -7_200)).unwrap();
        assert_eq!(got, 1_800);
    }

    #[test]
    fn overlap_picks_earlier() {
        // Clocks go from -02:00 to -03:00 at epoch second 0, so local
        // readings in [-3h, -2h) happen twice.
        let target = -3 * 3_600 + 1_800;
        let got = resolve(target, transition(0, -7_200, -10_800)).unwrap();
        assert_eq!(got, target + 7_200);
    }

    #[test]
    fn half_hour_gap() {
        let target = 37_800 + 600;
        let got = resolve(target, transition(0, 37_800, 39_600)).unwrap();
        assert_eq!(got, 600);
    }

    #[test]
    fn local_mean_time_is_exact() {
        // -03:06:28 then -03:00 at epoch second 0.
        let lmt = -(3 * 3_600 + 6 * 60 + 28);
        let target = -86_400;
        let got = resolve(target, transition(0, lmt, -10_800)).unwrap();
        assert_eq!(got, target - i64::from(lmt));

        let target = 86_400;
        let got = resolve(target, transition(0, lmt, -10_800)).unwrap();
        assert_eq!(got, target + 10_800);
    }

    #[test]
    fn step_limit() {
        // An offset that falls as fast as the walk advances keeps the
        // derived local reading just short of the target forever.
        let err = resolve(0, |t| {
            let seconds = (-t - 900).clamp(-64_800, 64_800);
            Ok(off(i32::try_from(seconds).unwrap()))
        })
        .unwrap_err();
        insta::assert_snapshot!(
            err,
            @"gave up searching for a matching offset after 128 steps",
        );
    }
}
