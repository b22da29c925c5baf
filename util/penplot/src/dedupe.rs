use itertools::Itertools;

use crate::stroke::Stroke;

/// Drops every stroke whose text was already seen, keeping first occurrences in order.
pub fn dedupe(strokes: impl IntoIterator<Item = Stroke>) -> impl Iterator<Item = Stroke> {
    strokes.into_iter().unique_by(Stroke::fingerprint)
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use crate::stroke::{test::segment, Orientation};
    use crate::coordinates::Point;

    use super::*;

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let strokes = vec![
            segment((0.0, 0.0), (1.0, 0.0)),
            segment((5.0, 5.0), (6.0, 5.0)),
            segment((0.0, 0.0), (1.0, 0.0)),
            segment((2.0, 2.0), (3.0, 2.0)),
            segment((5.0, 5.0), (6.0, 5.0)),
        ];
        let result: Vec<_> = dedupe(strokes).collect();
        let starts: Vec<_> = result.iter().map(|stroke| stroke.start(Orientation::Forward)).collect();
        assert_eq!(starts, vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0), Point::new(2.0, 2.0)]);
        let fingerprints: HashSet<_> = result.iter().map(Stroke::fingerprint).collect();
        assert_eq!(fingerprints.len(), result.len());
    }
    #[test]
    fn test_reversed_copy_is_distinct() {
        let strokes = vec![
            segment((0.0, 0.0), (4.0, 0.0)),
            segment((4.0, 0.0), (0.0, 0.0)),
        ];
        assert_eq!(dedupe(strokes).count(), 2);
    }
}
