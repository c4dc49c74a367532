//! Record filtering and name search.
//!
//! Each filter dimension is either [`All`](StatusFilter::All), spelled
//! `"All"` on the wire, or a single exact or range match. A record passes a
//! [`ReportFilter`] only when it passes every dimension.

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::student::{Status, StudentRecord};

/// Sentinel meaning "match everything" for any filter dimension.
pub const ALL: &str = "All";

/// Status dimension of a report filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Match every record.
    #[default]
    All,
    /// Match records with exactly this status.
    Only(Status),
}

impl StatusFilter {
    /// Returns true if `record` passes this filter.
    ///
    /// An unrecognized stored status never passes [`StatusFilter::Only`].
    #[must_use]
    pub fn matches(&self, record: &StudentRecord) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => &record.status == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL {
            return Ok(Self::All);
        }
        Status::from_str(s)
            .map(Self::Only)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "status".into(),
                reason: format!("must be All, Passed, Conditional or At Risk (got '{s}')"),
            })
    }
}

/// Section dimension of a report filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SectionFilter {
    /// Match every record.
    #[default]
    All,
    /// Match records in exactly this section.
    Only(String),
}

impl SectionFilter {
    /// Returns true if `record` passes this filter.
    #[must_use]
    pub fn matches(&self, record: &StudentRecord) -> bool {
        match self {
            Self::All => true,
            Self::Only(section) => &record.section == section,
        }
    }
}

impl FromStr for SectionFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == ALL {
            Self::All
        } else {
            Self::Only(s.to_string())
        })
    }
}

/// One of the four fixed grade buckets.
///
/// Buckets are closed intervals with integer bounds, so fractional grades
/// between two buckets (89.5, say) fall in neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradeRange {
    /// `[90, 100]`.
    Top,
    /// `[85, 89]`.
    High,
    /// `[75, 84]`.
    Mid,
    /// `[0, 74]`.
    Low,
}

impl GradeRange {
    /// All buckets, highest first.
    pub const ALL: [Self; 4] = [Self::Top, Self::High, Self::Mid, Self::Low];

    /// Inclusive lower and upper bound.
    #[must_use]
    pub const fn bounds(self) -> (f64, f64) {
        match self {
            Self::Top => (90.0, 100.0),
            Self::High => (85.0, 89.0),
            Self::Mid => (75.0, 84.0),
            Self::Low => (0.0, 74.0),
        }
    }

    /// Wire value, e.g. `"90-100"`.
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Top => "90-100",
            Self::High => "85-89",
            Self::Mid => "75-84",
            Self::Low => "0-74",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Top => "90\u{2013}100",
            Self::High => "85\u{2013}89",
            Self::Mid => "75\u{2013}84",
            Self::Low => "Below 75",
        }
    }

    /// Returns true if `grade` lies inside the bucket.
    #[must_use]
    pub fn contains(self, grade: f64) -> bool {
        let (min, max) = self.bounds();
        (min..=max).contains(&grade)
    }
}

impl fmt::Display for GradeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for GradeRange {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|range| range.value() == s)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "grade".into(),
                reason: format!("must be All, 90-100, 85-89, 75-84 or 0-74 (got '{s}')"),
            })
    }
}

/// Grade dimension of a report filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradeFilter {
    /// Match every record, numeric grade or not.
    #[default]
    All,
    /// Match records whose grade parses and lies in the bucket.
    Range(GradeRange),
}

impl GradeFilter {
    /// Returns true if `record` passes this filter.
    ///
    /// A non-numeric grade never falls inside a bounded range.
    #[must_use]
    pub fn matches(&self, record: &StudentRecord) -> bool {
        match self {
            Self::All => true,
            Self::Range(range) => record.grade.value().is_some_and(|g| range.contains(g)),
        }
    }
}

impl FromStr for GradeFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Range)
        }
    }
}

/// Combined status, section and grade filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportFilter {
    /// Status dimension.
    pub status: StatusFilter,
    /// Section dimension.
    pub section: SectionFilter,
    /// Grade dimension.
    pub grade: GradeFilter,
}

impl ReportFilter {
    /// A filter that matches every record.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Build from the three raw wire values. `None` means `"All"`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidValue`] for an unknown status or
    /// grade bucket.
    pub fn parse(
        status: Option<&str>,
        section: Option<&str>,
        grade: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            status: status.map_or(Ok(StatusFilter::All), str::parse)?,
            section: section
                .filter(|s| *s != ALL)
                .map_or(SectionFilter::All, |s| SectionFilter::Only(s.to_string())),
            grade: grade.map_or(Ok(GradeFilter::All), str::parse)?,
        })
    }

    /// Set the status dimension.
    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = StatusFilter::Only(status);
        self
    }

    /// Set the section dimension.
    #[must_use]
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = SectionFilter::Only(section.into());
        self
    }

    /// Set the grade dimension.
    #[must_use]
    pub const fn with_grade(mut self, range: GradeRange) -> Self {
        self.grade = GradeFilter::Range(range);
        self
    }

    /// Returns true if `record` passes every dimension.
    #[must_use]
    pub fn matches(&self, record: &StudentRecord) -> bool {
        self.status.matches(record) && self.section.matches(record) && self.grade.matches(record)
    }
}

/// Records passing `filter`, in input order.
#[must_use]
pub fn filter<'a, I>(records: I, filter: &ReportFilter) -> Vec<&'a StudentRecord>
where
    I: IntoIterator<Item = &'a StudentRecord>,
{
    records.into_iter().filter(|r| filter.matches(r)).collect()
}

/// Records whose name contains `needle`, ignoring case. An empty needle
/// matches everything.
#[must_use]
pub fn search<'a, I>(records: I, needle: &str) -> Vec<&'a StudentRecord>
where
    I: IntoIterator<Item = &'a StudentRecord>,
{
    let needle = needle.to_lowercase();
    records
        .into_iter()
        .filter(|r| r.name.to_lowercase().contains(&needle))
        .collect()
}
