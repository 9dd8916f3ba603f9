//! Keyframe bracket selection.
//!
//! Given the keyframe timestamps of a clip and a playback time, finds the
//! `(previous, next)` keyframe pair with
//! `previous.time <= time < next.time`, plus the progression between them.
//!
//! Edge policy:
//! - before the first keyframe, both ends resolve to the first keyframe;
//! - at or after the last keyframe, both ends resolve to the last keyframe.
//!
//! In both cases the progression is 0, so the boundary pose is reproduced
//! exactly.

/// How many keyframes the cursor scans linearly before falling back to a
/// binary search.
const MAX_SCAN_OFFSET: usize = 3;

/// Pair of keyframe indices surrounding a playback time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
    pub previous: usize,
    pub next: usize,
}

impl Bracket {
    #[inline]
    #[must_use]
    pub fn single(index: usize) -> Self {
        Self {
            previous: index,
            next: index,
        }
    }

    /// Fraction of the way from `previous` to `next` at `time`, in `[0, 1]`.
    ///
    /// Zero when both keyframes share a timestamp.
    #[must_use]
    pub fn progression(&self, times: &[f32], time: f32) -> f32 {
        let t0 = times[self.previous];
        let span = times[self.next] - t0;
        if span > 0.0 {
            ((time - t0) / span).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Remembers the last bracket so that sequential playback finds the next one
/// in O(1).
#[derive(Debug, Clone, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

impl KeyframeCursor {
    pub fn reset(&mut self) {
        self.last_index = 0;
    }
}

/// Stateless bracket lookup (binary search).
///
/// # Panics
///
/// If `times` is empty.
#[must_use]
pub fn find_bracket(times: &[f32], time: f32) -> Bracket {
    if let Some(bracket) = boundary_bracket(times, time) {
        return bracket;
    }
    interior_bracket(times, time)
}

/// Bracket lookup that starts from `cursor` and scans a few keyframes forward
/// (normal playback) or backward (loop wrap) before falling back to a binary
/// search. Updates `cursor`.
///
/// # Panics
///
/// If `times` is empty.
pub fn find_bracket_with_cursor(times: &[f32], time: f32, cursor: &mut KeyframeCursor) -> Bracket {
    if let Some(bracket) = boundary_bracket(times, time) {
        cursor.last_index = bracket.previous;
        return bracket;
    }

    // From here on times[0] <= time < times[last], so previous lies in [0, last).
    let last = times.len() - 1;
    let i = cursor.last_index.min(last - 1);

    let found = if time >= times[i] {
        // Forward: first idx whose right edge lies beyond `time`.
        (i..last)
            .take(MAX_SCAN_OFFSET + 1)
            .find(|&idx| time < times[idx + 1])
    } else {
        // Backward: time < times[i] already holds, look for the left edge.
        (1..=MAX_SCAN_OFFSET)
            .take_while(|&offset| offset <= i)
            .map(|offset| i - offset)
            .find(|&idx| time >= times[idx])
    };

    let bracket = match found {
        Some(previous) => Bracket {
            previous,
            next: previous + 1,
        },
        None => interior_bracket(times, time),
    };

    cursor.last_index = bracket.previous;
    bracket
}

fn boundary_bracket(times: &[f32], time: f32) -> Option<Bracket> {
    assert!(!times.is_empty(), "clip has no keyframes");

    let last = times.len() - 1;
    // NaN compares false both ways; pin it to the first keyframe.
    if time.is_nan() || time < times[0] {
        Some(Bracket::single(0))
    } else if time >= times[last] {
        Some(Bracket::single(last))
    } else {
        None
    }
}

fn interior_bracket(times: &[f32], time: f32) -> Bracket {
    // First index with times[idx] > time; at least 1 since times[0] <= time.
    let next = times.partition_point(|&t| t <= time).max(1);
    Bracket {
        previous: next - 1,
        next,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMES: [f32; 5] = [0.0, 1.0, 2.0, 3.0, 4.0];

    #[test]
    fn interior_time_brackets_neighbours() {
        assert_eq!(find_bracket(&TIMES, 1.5), Bracket { previous: 1, next: 2 });
        assert_eq!(find_bracket(&TIMES, 2.0), Bracket { previous: 2, next: 3 });
    }

    #[test]
    fn boundaries_collapse_to_one_keyframe() {
        let times = [0.5, 1.0];
        assert_eq!(find_bracket(&times, 0.2), Bracket::single(0));
        assert_eq!(find_bracket(&times, 1.0), Bracket::single(1));
        assert_eq!(find_bracket(&times, 7.0), Bracket::single(1));
        assert_eq!(find_bracket(&times, 0.2).progression(&times, 0.2), 0.0);
    }

    #[test]
    fn single_keyframe_clip() {
        let times = [0.0];
        assert_eq!(find_bracket(&times, 0.0), Bracket::single(0));
        assert_eq!(find_bracket(&times, 3.0), Bracket::single(0));
    }

    #[test]
    fn duplicate_timestamps_pick_the_later_keyframe() {
        let times = [0.0, 1.0, 1.0, 2.0];
        let bracket = find_bracket(&times, 1.0);
        assert_eq!(bracket, Bracket { previous: 2, next: 3 });
        assert_eq!(bracket.progression(&times, 1.0), 0.0);
    }

    #[test]
    fn progression_is_fraction_of_interval() {
        let times = [0.0, 2.0];
        let bracket = find_bracket(&times, 0.5);
        assert!((bracket.progression(&times, 0.5) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn cursor_matches_binary_search_forward_and_backward() {
        let times = [0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];
        let mut cursor = KeyframeCursor::default();

        // Forward sweep, then a wrap back to the start, then a large jump.
        let samples = (0..=60)
            .map(|i| i as f32 * 0.0175)
            .chain([0.05, 0.95, 0.42, 0.41, 0.0, 1.5]);
        for time in samples {
            let expected = find_bracket(&times, time);
            let actual = find_bracket_with_cursor(&times, time, &mut cursor);
            assert_eq!(expected, actual, "time={time}");
            assert_eq!(cursor.last_index, expected.previous);
        }
    }

    #[test]
    fn nan_time_resolves_to_first_keyframe() {
        let mut cursor = KeyframeCursor::default();
        assert_eq!(find_bracket(&TIMES, f32::NAN), Bracket::single(0));
        assert_eq!(find_bracket(&[0.0], f32::NAN), Bracket::single(0));
        assert_eq!(
            find_bracket_with_cursor(&TIMES, f32::NAN, &mut cursor),
            Bracket::single(0)
        );
        assert_eq!(Bracket::single(0).progression(&TIMES, f32::NAN), 0.0);
    }
}
