//! Property-based tests for threshold filtering, DBSCAN and cluster mapping
//!
//! **Feature: hic-longrange, Property 4, 5, 6, 7: 聚类正确性**

use hic_longrange::core::{
    dbscan, filter_by_threshold, map_clusters, BinTable, DistanceMatrix, FilteredPoint,
    SparseMatrix, NOISE,
};
use proptest::prelude::*;

/// Z-score with some non-finite values mixed in
fn arb_zscore() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => -5.0f64..5.0,
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
    ]
}

/// Z-scored matrix with unique coordinates in arbitrary order
fn arb_zscored() -> impl Strategy<Value = SparseMatrix> {
    (1usize..=16).prop_flat_map(|dim| {
        prop::collection::vec((0..dim, 0..dim, arb_zscore()), 0..48).prop_map(move |triplets| {
            let mut seen = std::collections::HashSet::new();
            let unique: Vec<_> = triplets
                .into_iter()
                .filter(|&(r, c, _)| seen.insert((r, c)))
                .collect();
            let rows = unique.iter().map(|t| t.0).collect();
            let cols = unique.iter().map(|t| t.1).collect();
            let values = unique.iter().map(|t| t.2).collect();
            SparseMatrix::from_parts(dim, rows, cols, values).expect("valid parts")
        })
    })
}

fn arb_points() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((0u8..20, 0u8..20), 0..40)
        .prop_map(|v| v.into_iter().map(|(r, c)| (r as f64, c as f64)).collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// **Property 4: 阈值过滤只保留有限且不低于阈值的点**
    #[test]
    fn prop_filter_keeps_finite_above_threshold(
        zscored in arb_zscored(),
        threshold in -3.0f64..3.0,
    ) {
        let kept = filter_by_threshold(&zscored, threshold);
        for p in &kept {
            prop_assert!(p.zscore.is_finite());
            prop_assert!(p.zscore >= threshold);
        }
        let expected = zscored
            .values()
            .iter()
            .filter(|z| z.is_finite() && **z >= threshold)
            .count();
        prop_assert_eq!(kept.len(), expected);
    }

    /// **Property 5: 阈值单调性**
    ///
    /// Raising the threshold never adds survivors.
    #[test]
    fn prop_filter_monotonic(
        zscored in arb_zscored(),
        low in -3.0f64..3.0,
        delta in 0.0f64..3.0,
    ) {
        let loose = filter_by_threshold(&zscored, low);
        let strict = filter_by_threshold(&zscored, low + delta);
        for p in &strict {
            prop_assert!(loose.iter().any(|q| q.row == p.row && q.col == p.col));
        }
    }

    /// **Property 6: DBSCAN 标签范围与数量守恒**
    #[test]
    fn prop_dbscan_labels_in_range(
        points in arb_points(),
        eps in 0.5f64..4.0,
        min_samples in 1usize..6,
    ) {
        let distances = DistanceMatrix::euclidean(&points);
        let assignment = dbscan(&distances, eps, min_samples);
        prop_assert_eq!(assignment.len(), points.len());

        let n = assignment.n_clusters() as i32;
        for &label in assignment.labels() {
            prop_assert!(label == NOISE || (0..n).contains(&label));
        }
        let sizes = assignment.cluster_sizes();
        prop_assert_eq!(sizes.len(), assignment.n_clusters());
        prop_assert!(sizes.iter().all(|&s| s > 0));
        prop_assert_eq!(sizes.iter().sum::<usize>() + assignment.noise_count(), points.len());
    }

    /// With `min_samples == 1` every point is a core point.
    #[test]
    fn prop_dbscan_min_samples_one_has_no_noise(points in arb_points(), eps in 0.5f64..4.0) {
        let assignment = dbscan(&DistanceMatrix::euclidean(&points), eps, 1);
        prop_assert_eq!(assignment.noise_count(), 0);
    }

    /// Points in the same cluster are chained by steps of at most eps.
    #[test]
    fn prop_dbscan_clusters_are_eps_connected(
        points in arb_points(),
        eps in 0.5f64..4.0,
        min_samples in 1usize..6,
    ) {
        let distances = DistanceMatrix::euclidean(&points);
        let assignment = dbscan(&distances, eps, min_samples);
        for (i, &label) in assignment.labels().iter().enumerate() {
            if label == NOISE || assignment.cluster_sizes()[label as usize] == 1 {
                continue;
            }
            let has_close_member = assignment
                .labels()
                .iter()
                .enumerate()
                .any(|(j, &other)| j != i && other == label && distances.get(i, j) <= eps);
            prop_assert!(has_close_member);
        }
    }

    /// **Property 7: 映射只输出非噪声点，且保持输入顺序**
    #[test]
    fn prop_mapping_skips_noise(
        points in arb_points(),
        eps in 0.5f64..4.0,
        min_samples in 1usize..6,
    ) {
        let filtered: Vec<FilteredPoint> = points
            .iter()
            .map(|&(r, c)| FilteredPoint { row: r as usize, col: c as usize, zscore: 3.0 })
            .collect();
        let distances = DistanceMatrix::euclidean(&points);
        let assignment = dbscan(&distances, eps, min_samples);
        let bins = BinTable::uniform(&[("chr1", 2000)], 100);

        let records = map_clusters(&filtered, &assignment, &bins).unwrap();
        prop_assert_eq!(records.len(), points.len() - assignment.noise_count());

        let expected: Vec<(u64, u64, usize)> = filtered
            .iter()
            .zip(assignment.labels())
            .filter(|(_, &label)| label != NOISE)
            .map(|(p, &label)| (p.row as u64 * 100, p.col as u64 * 100, label as usize))
            .collect();
        let actual: Vec<(u64, u64, usize)> = records
            .iter()
            .map(|r| (r.start_x, r.start_y, r.cluster_id))
            .collect();
        prop_assert_eq!(actual, expected);
    }
}
