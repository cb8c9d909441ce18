//! Precision-recall curve and area under it
//!
//! Matches the semantics of the standard PR-curve routine: pairs are ranked
//! by descending predicted score, precision and recall are evaluated at
//! every distinct threshold, the curve starts at `(recall=0, precision=1)`,
//! and the area is the trapezoidal integral of precision over recall.

/// Area under the precision-recall curve for labeled, scored pairs.
///
/// Returns 0 when there are no positive labels (recall is undefined there).
pub fn precision_recall_auc(labels: &[bool], scores: &[f64]) -> f64 {
    debug_assert_eq!(labels.len(), scores.len());

    let total_positives = labels.iter().filter(|&&label| label).count();
    if total_positives == 0 {
        return 0.0;
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // Curve from the highest threshold down; recall grows monotonically.
    let mut points: Vec<(f64, f64)> = vec![(0.0, 1.0)];
    let mut true_positives = 0usize;
    let mut predicted_positives = 0usize;

    let mut i = 0;
    while i < order.len() {
        // All pairs tied at one score cross the threshold together.
        let threshold = scores[order[i]];
        while i < order.len() && scores[order[i]] == threshold {
            predicted_positives += 1;
            if labels[order[i]] {
                true_positives += 1;
            }
            i += 1;
        }
        let precision = true_positives as f64 / predicted_positives as f64;
        let recall = true_positives as f64 / total_positives as f64;
        points.push((recall, precision));
    }

    let mut area = 0.0;
    for pair in points.windows(2) {
        let (r0, p0) = pair[0];
        let (r1, p1) = pair[1];
        area += (r1 - r0) * (p0 + p1) / 2.0;
    }
    area
}
