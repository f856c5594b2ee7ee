use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use super::{EmailRecord, Pipeline};
use crate::domain::{DisposableDomains, DomainSet, ResolveMx};
use crate::probe::{MailboxProbe, MailboxStatus};
use crate::status::{StatusCode, Verdict};

pub(crate) struct FixedResolver {
    live: HashSet<String>,
}

impl FixedResolver {
    pub(crate) fn new(live: &[&str]) -> Self {
        Self {
            live: live.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl ResolveMx for FixedResolver {
    fn resolve_mx(&self, domain: &str) -> bool {
        self.live.contains(domain)
    }
}

/// Answers from a script; anything unscripted is `Unverifiable`.
pub(crate) struct ScriptedProbe {
    answers: HashMap<String, MailboxStatus>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedProbe {
    pub(crate) fn new(answers: &[(&str, MailboxStatus)]) -> Self {
        Self {
            answers: answers
                .iter()
                .map(|(email, status)| (email.to_string(), *status))
                .collect(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl MailboxProbe for ScriptedProbe {
    fn probe(&self, email: &str) -> MailboxStatus {
        self.calls.borrow_mut().push(email.to_string());
        self.answers
            .get(email)
            .copied()
            .unwrap_or(MailboxStatus::Unverifiable)
    }
}

fn record(email: &str) -> EmailRecord {
    EmailRecord::new("Doe", "Jane", Some(email.to_string()))
}

fn known() -> DomainSet {
    ["gmail.com", "orange.fr"].into_iter().collect()
}

struct Fixture {
    disposable: DisposableDomains,
    resolver: FixedResolver,
}

impl Fixture {
    fn new(live: &[&str]) -> Self {
        Self {
            disposable: ["yopmail.com"].into_iter().collect(),
            resolver: FixedResolver::new(live),
        }
    }

    fn run(&self, probe: &ScriptedProbe, email: &str, valid: &mut DomainSet) -> Verdict {
        Pipeline::new(&self.disposable, &self.resolver, probe).check(&record(email), valid)
    }
}

#[test]
fn missing_or_blank_email_is_empty() {
    let fx = Fixture::new(&[]);
    let probe = ScriptedProbe::new(&[]);
    let pipeline = Pipeline::new(&fx.disposable, &fx.resolver, &probe);
    let mut valid = known();

    let none = EmailRecord::new("Martin", "Paul", None);
    assert_eq!(pipeline.check(&none, &mut valid), Verdict::new(StatusCode::Empty));
    let blank = EmailRecord::new("Martin", "Paul", Some("  ".into()));
    assert_eq!(pipeline.check(&blank, &mut valid), Verdict::new(StatusCode::Empty));
    assert!(probe.calls().is_empty());
}

#[test]
fn bad_syntax_stops_early() {
    let fx = Fixture::new(&[]);
    let probe = ScriptedProbe::new(&[]);
    let verdict = fx.run(&probe, "not-an-email", &mut known());
    assert_eq!(verdict, Verdict::new(StatusCode::BadSyntax));
    assert!(probe.calls().is_empty());
}

#[test]
fn disposable_domain_is_reported() {
    let fx = Fixture::new(&[]);
    let probe = ScriptedProbe::new(&[]);
    let verdict = fx.run(&probe, "user@yopmail.com", &mut known());
    assert_eq!(verdict.status, StatusCode::Disposable);
    assert!(probe.calls().is_empty());
}

#[test]
fn domain_typo_suggests_probed_correction() {
    let fx = Fixture::new(&[]);
    let probe = ScriptedProbe::new(&[("jane.doe@gmail.com", MailboxStatus::Exists)]);
    let verdict = fx.run(&probe, "jane.doe@gmaill.com", &mut known());
    assert_eq!(verdict.status, StatusCode::DomainNotFound);
    assert_eq!(verdict.suggestion.as_deref(), Some("jane.doe@gmail.com"));
    assert_eq!(probe.calls(), vec!["jane.doe@gmail.com".to_string()]);
}

#[test]
fn unverifiable_correction_is_still_suggested() {
    let fx = Fixture::new(&[]);
    let probe = ScriptedProbe::new(&[]);
    let verdict = fx.run(&probe, "jane.doe@gmaill.com", &mut known());
    assert_eq!(verdict.suggestion.as_deref(), Some("jane.doe@gmail.com"));
}

#[test]
fn rejected_correction_is_dropped() {
    let fx = Fixture::new(&[]);
    let probe = ScriptedProbe::new(&[("jane.doe@gmail.com", MailboxStatus::MailboxNotFound)]);
    let verdict = fx.run(&probe, "jane.doe@gmaill.com", &mut known());
    assert_eq!(verdict, Verdict::new(StatusCode::DomainNotFound));
}

#[test]
fn unknown_domain_without_candidate_terminates() {
    let fx = Fixture::new(&[]);
    let probe = ScriptedProbe::new(&[]);
    let verdict = fx.run(&probe, "jane.doe@zzzz.io", &mut known());
    assert_eq!(verdict, Verdict::new(StatusCode::DomainNotFound));
    assert!(probe.calls().is_empty());
}

#[test]
fn live_domain_is_learned_and_probed() {
    let fx = Fixture::new(&["newcorp.io"]);
    let probe = ScriptedProbe::new(&[("jane.doe@newcorp.io", MailboxStatus::Exists)]);
    let mut valid = known();
    let verdict = fx.run(&probe, "jane.doe@newcorp.io", &mut valid);
    assert_eq!(verdict, Verdict::new(StatusCode::Exists));
    assert!(valid.contains("newcorp.io"));
}

#[test]
fn service_syntax_rejection_maps_to_bad_syntax() {
    let fx = Fixture::new(&[]);
    let probe = ScriptedProbe::new(&[("jane@gmail.com", MailboxStatus::SyntaxRejected)]);
    let verdict = fx.run(&probe, "jane@gmail.com", &mut known());
    assert_eq!(verdict, Verdict::new(StatusCode::BadSyntax));
}

#[test]
fn unverifiable_mailbox() {
    let fx = Fixture::new(&[]);
    let probe = ScriptedProbe::new(&[]);
    let verdict = fx.run(&probe, "jane@gmail.com", &mut known());
    assert_eq!(verdict, Verdict::new(StatusCode::Unverifiable));
}

#[test]
fn missing_mailbox_suggests_name_based_prefix() {
    let fx = Fixture::new(&[]);
    let probe = ScriptedProbe::new(&[
        ("jane.deo@gmail.com", MailboxStatus::MailboxNotFound),
        ("jane.doe@gmail.com", MailboxStatus::Exists),
    ]);
    let verdict = fx.run(&probe, "jane.deo@gmail.com", &mut known());
    assert_eq!(verdict.status, StatusCode::MailboxNotFound);
    assert_eq!(verdict.suggestion.as_deref(), Some("jane.doe@gmail.com"));
}

#[test]
fn missing_mailbox_suggestion_requires_confirmed_existence() {
    let fx = Fixture::new(&[]);
    let probe = ScriptedProbe::new(&[("jane.deo@gmail.com", MailboxStatus::MailboxNotFound)]);
    let verdict = fx.run(&probe, "jane.deo@gmail.com", &mut known());
    assert_eq!(verdict, Verdict::new(StatusCode::MailboxNotFound));
    assert_eq!(probe.calls().len(), 2);
}

#[test]
fn missing_mailbox_without_candidate_skips_second_probe() {
    let fx = Fixture::new(&[]);
    let probe = ScriptedProbe::new(&[("contact@gmail.com", MailboxStatus::MailboxNotFound)]);
    let verdict = fx.run(&probe, "contact@gmail.com", &mut known());
    assert_eq!(verdict, Verdict::new(StatusCode::MailboxNotFound));
    assert_eq!(probe.calls(), vec!["contact@gmail.com".to_string()]);
}
