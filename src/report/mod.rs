//! Reporting and aggregation.
//!
//! Pure functions over a slice of [`StudentRecord`](crate::student::StudentRecord)s
//! as handed back by a store:
//! - [`filter`]: status, section and grade-bucket filtering
//! - [`search`]: case-insensitive name search
//! - [`summarize`]: totals, per-status counts and the average grade
//! - [`distinct_sections`]: section choices for filter controls
//!
//! Nothing here caches or touches a store. Results borrow from the input and
//! keep its order.
//!
//! # Example
//!
//! ```
//! use student_records::report::{filter, summarize, GradeRange, ReportFilter};
//! use student_records::student::{NewStudent, Status, StudentRecord};
//!
//! let records = vec![
//!     StudentRecord::new(1, NewStudent::new("Anna", "A", 90.0, Status::Passed)),
//!     StudentRecord::new(2, NewStudent::new("Juan", "A", 70.0, Status::AtRisk)),
//! ];
//!
//! let summary = summarize(&records);
//! assert_eq!(summary.total, 2);
//! assert!((summary.average_grade - 80.0).abs() < f64::EPSILON);
//!
//! let top = filter(&records, &ReportFilter::all().with_grade(GradeRange::Top));
//! assert_eq!(top.len(), 1);
//! ```

mod filter;
mod summary;

pub use filter::{
    filter, search, GradeFilter, GradeRange, ReportFilter, SectionFilter, StatusFilter, ALL,
};
pub use summary::{distinct_sections, summarize, StatusCount, Summary};
