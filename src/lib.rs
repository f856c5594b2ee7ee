#![forbid(unsafe_code)]
//! mailvet_lib — triage de lots d'adresses e-mail (syntaxe, domaine, jetable,
//! boîte) avec suggestions de correction.

pub mod batch;
pub mod correct;
pub mod domain;
pub mod files;
pub mod pipeline;
pub mod probe;
pub mod status;
pub mod syntax;

pub use batch::{AnnotatedRecord, BatchResult, BatchSummary, process_batch};
pub use correct::{similarity, suggest_domain, suggest_prefix};
pub use domain::{
    DisposableDomains, DnsOptions, DnsResolver, DomainCheck, DomainSet, Error as MxError,
    MxRecord, MxStatus, ResolveMx, classify_domain, prune_domains,
};
pub use files::{
    CsvLayout, EmailTable, FileError, read_list, read_records, write_annotated, write_list,
};
pub use pipeline::{EmailRecord, Pipeline};
pub use probe::{
    MailboxProbe, MailboxStatus, ProbeError, ProbeOptions, UserAgentPool, WebProbe,
    classify_indicators,
};
pub use status::{StatusCode, Verdict};
pub use syntax::{EmailParts, is_syntactically_valid, split_email};
