//! Property tests for the utilization analyzer invariants.

use pagegen_content::UtilizationAnalyzer;
use pagegen_core::types::{ContentPayload, Feature, Stat};
use proptest::prelude::*;

fn arbitrary_payload() -> impl Strategy<Value = ContentPayload> {
    (
        proptest::collection::vec(("[a-zA-Z ]{0,30}", proptest::option::of("[a-zA-Z ]{0,40}")), 0..5),
        proptest::collection::vec(("[a-zA-Z ]{1,20}", "[0-9]{1,4}%?"), 0..5),
    )
        .prop_map(|(features, stats)| ContentPayload {
            features: features
                .into_iter()
                .map(|(title, description)| Feature { title, description })
                .collect(),
            stats: stats.into_iter().map(|(label, value)| Stat { label, value }).collect(),
            ..Default::default()
        })
}

proptest! {
    #[test]
    fn utilization_rate_always_in_unit_interval(
        payload in arbitrary_payload(),
        artifact in "[ -~]{0,200}",
    ) {
        let report = UtilizationAnalyzer::new().analyze(&payload, &artifact);
        prop_assert!((0.0..=1.0).contains(&report.utilization_rate));
        prop_assert!(report.used_elements <= report.total_elements);
        prop_assert_eq!(
            report.total_elements - report.used_elements,
            report.missing_elements.len()
        );
    }

    #[test]
    fn empty_payload_never_passes(artifact in "[ -~]{0,200}") {
        let report = UtilizationAnalyzer::new().analyze(&ContentPayload::default(), &artifact);
        prop_assert_eq!(report.utilization_rate, 0.0);
        prop_assert!(!report.passed);
    }
}
