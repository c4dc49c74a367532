//! Dashboard statistics.

use std::collections::HashSet;

use serde::Serialize;

use crate::student::{Status, StudentRecord};

/// Aggregate statistics over a set of records.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Number of records.
    pub total: usize,
    /// Records with status "Passed".
    pub passed: usize,
    /// Records with status "Conditional".
    pub conditional: usize,
    /// Records with status "At Risk".
    pub at_risk: usize,
    /// Mean of the numeric grades; `0` when there are none.
    pub average_grade: f64,
    /// Records whose grade is not a number, left out of the average.
    pub ungraded: usize,
}

/// One bar of the per-status chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    /// Status label.
    pub status: Status,
    /// Records with that status.
    pub count: usize,
}

impl Summary {
    /// Counts for the three recognized statuses, in display order.
    #[must_use]
    pub fn status_counts(&self) -> Vec<StatusCount> {
        Status::ALL
            .into_iter()
            .map(|status| {
                let count = match status {
                    Status::Passed => self.passed,
                    Status::Conditional => self.conditional,
                    Status::AtRisk => self.at_risk,
                    Status::Unrecognized(_) => 0,
                };
                StatusCount { status, count }
            })
            .collect()
    }

    /// Average rounded to two decimals, as shown on the dashboard.
    #[must_use]
    pub fn rounded_average(&self) -> f64 {
        (self.average_grade * 100.0).round() / 100.0
    }
}

/// Summarize `records`.
///
/// Unrecognized statuses count toward `total` only.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize<'a, I>(records: I) -> Summary
where
    I: IntoIterator<Item = &'a StudentRecord>,
{
    let mut summary = Summary::default();
    let mut sum = 0.0;
    let mut graded = 0usize;

    for record in records {
        summary.total += 1;
        match record.status {
            Status::Passed => summary.passed += 1,
            Status::Conditional => summary.conditional += 1,
            Status::AtRisk => summary.at_risk += 1,
            Status::Unrecognized(_) => {}
        }
        match record.grade.value() {
            Some(grade) => {
                sum += grade;
                graded += 1;
            }
            None => summary.ungraded += 1,
        }
    }

    if graded > 0 {
        summary.average_grade = sum / graded as f64;
    }
    summary
}

/// Unique sections in first-seen order.
#[must_use]
pub fn distinct_sections<'a, I>(records: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a StudentRecord>,
{
    let mut seen = HashSet::new();
    records
        .into_iter()
        .map(|r| r.section.as_str())
        .filter(|section| seen.insert(*section))
        .collect()
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::report::{filter, search, GradeRange, ReportFilter};
    use crate::student::NewStudent;
    use proptest::prelude::*;

    fn arb_status() -> impl Strategy<Value = Status> {
        prop_oneof![
            Just(Status::Passed),
            Just(Status::Conditional),
            Just(Status::AtRisk),
        ]
    }

    fn arb_records() -> impl Strategy<Value = Vec<StudentRecord>> {
        prop::collection::vec(("[a-zA-Z]{1,8}", "[A-C]", 0.0f64..100.0, arb_status()), 0..50)
            .prop_map(|rows| {
                rows.into_iter()
                    .zip(1i64..)
                    .map(|((name, section, grade, status), id)| {
                        StudentRecord::new(id, NewStudent::new(name, section, grade, status))
                    })
                    .collect()
            })
    }

    proptest! {
        /// Property: per-status counts add up to the total.
        #[test]
        fn prop_status_counts_sum_to_total(records in arb_records()) {
            let summary = summarize(&records);
            prop_assert_eq!(summary.passed + summary.conditional + summary.at_risk, summary.total);
            prop_assert_eq!(summary.total, records.len());
        }

        /// Property: the average lies within the grade range of the input.
        #[test]
        fn prop_average_is_bounded(records in arb_records()) {
            let summary = summarize(&records);
            let min = records.iter().filter_map(|r| r.grade.value()).fold(f64::INFINITY, f64::min);
            let max = records.iter().filter_map(|r| r.grade.value()).fold(f64::NEG_INFINITY, f64::max);
            if records.is_empty() {
                prop_assert!(summary.average_grade.abs() < f64::EPSILON);
            } else {
                prop_assert!(summary.average_grade >= min - 1e-9);
                prop_assert!(summary.average_grade <= max + 1e-9);
            }
        }

        /// Property: filtering yields an ordered subsequence of matching records.
        #[test]
        fn prop_filter_is_ordered_subsequence(records in arb_records(), bucket in 0usize..4) {
            let range = GradeRange::ALL[bucket];
            let kept = filter(&records, &ReportFilter::all().with_grade(range));

            let expected: Vec<_> = records
                .iter()
                .filter(|r| r.grade.value().is_some_and(|g| range.contains(g)))
                .collect();
            prop_assert_eq!(kept, expected);
        }

        /// Property: every section filter result belongs to a distinct section.
        #[test]
        fn prop_sections_partition_records(records in arb_records()) {
            let total: usize = distinct_sections(&records)
                .into_iter()
                .map(|section| filter(&records, &ReportFilter::all().with_section(section)).len())
                .sum();
            prop_assert_eq!(total, records.len());
        }

        /// Property: search never returns more than it was given and is case-blind.
        #[test]
        fn prop_search_ignores_case(records in arb_records(), needle in "[a-z]{0,2}") {
            let lower = search(&records, &needle);
            let upper = search(&records, &needle.to_uppercase());
            prop_assert!(lower.len() <= records.len());
            prop_assert_eq!(lower, upper);
        }
    }
}
