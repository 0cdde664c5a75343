use super::model::{Cycle, Segment};

/// Pair segments (1,2), (3,4), … into cycles numbered from 1.
///
/// An odd trailing segment has no partner and is dropped.
pub fn build_cycles(segments: Vec<Segment>) -> Vec<Cycle> {
    if segments.len() % 2 == 1 {
        if let Some(last) = segments.last() {
            log::warn!("Dropping unpaired trailing segment {}", last.index);
        }
    }

    let mut cycles = Vec::with_capacity(segments.len() / 2);
    let mut iter = segments.into_iter();
    while let (Some(forward), Some(reverse)) = (iter.next(), iter.next()) {
        cycles.push(Cycle::new(cycles.len() + 1, forward, reverse));
    }
    log::debug!("Built {} cycles", cycles.len());
    cycles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RawSample;

    fn segments(n: usize) -> Vec<Segment> {
        (1..=n)
            .map(|index| Segment {
                index,
                samples: vec![RawSample::new(index as f64, 0.0)],
            })
            .collect()
    }

    #[test]
    fn produces_floor_half_cycles() {
        for n in 2..=9 {
            assert_eq!(build_cycles(segments(n)).len(), n / 2, "n = {n}");
        }
    }

    #[test]
    fn pairs_consecutive_segments() {
        let cycles = build_cycles(segments(5));
        let pairs: Vec<(usize, usize, usize)> = cycles
            .iter()
            .map(|c| (c.index, c.forward.index, c.reverse.index))
            .collect();
        assert_eq!(pairs, vec![(1, 1, 2), (2, 3, 4)]);
        assert!(cycles.iter().all(|c| c.area.is_none() && c.exclusion.is_none()));
    }
}
