//! Sequential batch driver.
//!
//! Rows are processed strictly in input order: each row's domain check must
//! see every domain learned by the rows before it.

use std::collections::BTreeMap;
use std::fmt;

use tracing::info;

use crate::domain::{DomainSet, ResolveMx};
use crate::pipeline::{EmailRecord, Pipeline};
use crate::probe::MailboxProbe;
use crate::status::{StatusCode, Verdict};

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedRecord {
    pub record: EmailRecord,
    pub status: StatusCode,
    pub suggestion: Option<String>,
}

impl AnnotatedRecord {
    pub fn new(record: EmailRecord, verdict: Verdict) -> Self {
        Self {
            record,
            status: verdict.status,
            suggestion: verdict.suggestion,
        }
    }

    pub fn status_code(&self) -> u8 {
        self.status.code()
    }

    pub fn status_label(&self) -> &'static str {
        self.status.label()
    }

    pub fn suggestion_or_empty(&self) -> &str {
        self.suggestion.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone)]
pub struct BatchResult {
    pub rows: Vec<AnnotatedRecord>,
    /// Allowlist after the run, including domains learned along the way.
    pub valid_domains: DomainSet,
}

impl BatchResult {
    pub fn summary(&self) -> BatchSummary {
        BatchSummary::from_rows(&self.rows)
    }
}

/// Row counts per status.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub by_status: BTreeMap<StatusCode, usize>,
}

impl BatchSummary {
    pub fn from_rows(rows: &[AnnotatedRecord]) -> Self {
        let mut summary = Self::default();
        for row in rows {
            summary.total += 1;
            *summary.by_status.entry(row.status).or_default() += 1;
        }
        summary
    }

    pub fn count(&self, status: StatusCode) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rows: {}", self.total)?;
        for (status, count) in &self.by_status {
            writeln!(f, "  [{}] {}: {}", status.code(), status.label(), count)?;
        }
        Ok(())
    }
}

/// Run every record through `pipeline`, threading the allowlist from one row
/// to the next.
pub fn process_batch<I, R, P>(
    records: I,
    mut valid_domains: DomainSet,
    pipeline: &Pipeline<'_, R, P>,
) -> BatchResult
where
    I: IntoIterator<Item = EmailRecord>,
    R: ResolveMx + ?Sized,
    P: MailboxProbe,
{
    let known_before = valid_domains.len();
    let mut rows = Vec::new();
    for record in records {
        let verdict = pipeline.check(&record, &mut valid_domains);
        rows.push(AnnotatedRecord::new(record, verdict));
    }

    let result = BatchResult {
        rows,
        valid_domains,
    };
    let summary = result.summary();
    info!(
        rows = summary.total,
        exists = summary.count(StatusCode::Exists),
        learned_domains = result.valid_domains.len() - known_before,
        "batch processed"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DisposableDomains;
    use crate::pipeline::tests::{FixedResolver, ScriptedProbe};
    use crate::probe::MailboxStatus;

    fn rec(surname: &str, given: &str, email: Option<&str>) -> EmailRecord {
        EmailRecord::new(surname, given, email.map(str::to_string))
    }

    #[test]
    fn annotates_every_row_in_order() {
        let disposable: DisposableDomains = ["knowndisposable.com"].into_iter().collect();
        let resolver = FixedResolver::new(&[]);
        let probe = ScriptedProbe::new(&[
            ("paul.martin@gmail.com", MailboxStatus::Exists),
            ("jane.doe@gmail.com", MailboxStatus::Exists),
        ]);
        let pipeline = Pipeline::new(&disposable, &resolver, &probe);
        let valid: DomainSet = ["gmail.com"].into_iter().collect();

        let result = process_batch(
            vec![
                rec("Martin", "Paul", None),
                rec("Martin", "Paul", Some("not-an-email")),
                rec("Martin", "Paul", Some("user@knowndisposable.com")),
                rec("Doe", "Jane", Some("jane.doe@gmaill.com")),
                rec("Martin", "Paul", Some("paul.martin@gmail.com")),
            ],
            valid,
            &pipeline,
        );

        let got: Vec<(u8, &str, &str)> = result
            .rows
            .iter()
            .map(|r| (r.status_code(), r.status_label(), r.suggestion_or_empty()))
            .collect();
        assert_eq!(
            got,
            vec![
                (1, "Email is empty", ""),
                (2, "Email syntax is incorrect", ""),
                (3, "Email is disposable", ""),
                (4, "Email domain does not exist", "jane.doe@gmail.com"),
                (0, "Email exists", ""),
            ]
        );
        let summary = result.summary();
        assert_eq!(summary.total, 5);
        assert_eq!(summary.count(StatusCode::Exists), 1);
        assert_eq!(summary.count(StatusCode::MailboxNotFound), 0);
        insta::assert_snapshot!(summary.to_string(), @r"
        rows: 5
          [0] Email exists: 1
          [1] Email is empty: 1
          [2] Email syntax is incorrect: 1
          [3] Email is disposable: 1
          [4] Email domain does not exist: 1
        ");
    }

    #[test]
    fn learned_domain_is_visible_to_later_rows() {
        let disposable = DisposableDomains::default();
        let resolver = FixedResolver::new(&["newcorp.io"]);
        let probe = ScriptedProbe::new(&[]);
        let pipeline = Pipeline::new(&disposable, &resolver, &probe);

        let result = process_batch(
            vec![
                rec("A", "B", Some("a@newcorp.io")),
                // one edit away from the domain learned on the row above
                rec("A", "B", Some("a@newcorp.iu")),
            ],
            DomainSet::new(),
            &pipeline,
        );
        assert_eq!(result.valid_domains.as_slice(), ["newcorp.io"]);
        assert_eq!(result.rows[1].status, StatusCode::DomainNotFound);
        assert_eq!(result.rows[1].suggestion.as_deref(), Some("a@newcorp.io"));
    }

    #[test]
    fn rerun_with_same_allowlist_is_stable() {
        let disposable = DisposableDomains::default();
        let resolver = FixedResolver::new(&[]);
        let probe = ScriptedProbe::new(&[("a@gmail.com", MailboxStatus::Exists)]);
        let pipeline = Pipeline::new(&disposable, &resolver, &probe);
        let valid: DomainSet = ["gmail.com"].into_iter().collect();
        let input = vec![
            rec("A", "B", Some("a@gmail.com")),
            rec("A", "B", Some("b@gmail.com")),
        ];

        let first = process_batch(input.clone(), valid.clone(), &pipeline);
        let second = process_batch(input, valid.clone(), &pipeline);
        let codes = |r: &BatchResult| r.rows.iter().map(|row| row.status).collect::<Vec<_>>();
        assert_eq!(codes(&first), codes(&second));
        assert_eq!(first.valid_domains, valid);
    }
}
