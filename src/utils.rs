//! Assorted utilities and helpers.

/// Argmax over `(key, score)` pairs that keeps the *first* maximum.
///
/// A candidate replaces the current best only if its score is strictly
/// greater, so on ties the earliest candidate in iteration order wins. The
/// first candidate is always accepted, which means a run of all-zero scores
/// still yields the first key. Returns `None` only for an empty iterator.
///
/// Decoding outputs on tied probabilities depend on this exact rule; callers
/// must feed candidates in a fixed order (sorted label order in this crate).
#[inline]
pub fn first_strict_max<K, I>(candidates: I) -> Option<(K, f64)>
where
    I: IntoIterator<Item = (K, f64)>,
{
    let mut best: Option<(K, f64)> = None;
    for (key, score) in candidates {
        let replace = match best {
            None => true,
            Some((_, b)) => score > b,
        };
        if replace {
            best = Some((key, score));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::first_strict_max;

    #[test]
    fn empty_is_none() {
        assert_eq!(first_strict_max(std::iter::empty::<(usize, f64)>()), None);
    }

    #[test]
    fn ties_keep_earliest() {
        let got = first_strict_max([(0, 0.3), (1, 0.5), (2, 0.5), (3, 0.1)]);
        assert_eq!(got, Some((1, 0.5)));
    }

    #[test]
    fn all_zero_picks_first() {
        let got = first_strict_max([(7, 0.0), (8, 0.0), (9, 0.0)]);
        assert_eq!(got, Some((7, 0.0)));
    }

    #[test]
    fn strictly_greater_later_value_wins() {
        let got = first_strict_max([(0, 0.1), (1, 0.1), (2, 0.1000001)]);
        assert_eq!(got, Some((2, 0.1000001)));
    }

    #[test]
    fn nan_never_displaces_a_number() {
        let got = first_strict_max([(0, 0.2), (1, f64::NAN)]);
        assert_eq!(got, Some((0, 0.2)));
    }
}
