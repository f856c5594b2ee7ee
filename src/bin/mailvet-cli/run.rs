use std::fs;

use anyhow::{Context, Result};
use tracing::info;

use mailvet_lib::{
    DisposableDomains, DnsResolver, DomainSet, EmailRecord, Pipeline, UserAgentPool, WebProbe,
    process_batch, prune_domains, read_list, read_records, write_annotated, write_list,
};

use crate::args::{CheckArgs, ListArgs, NetArgs, RunArgs};
use crate::output;

struct Collaborators {
    valid: DomainSet,
    disposable: DisposableDomains,
    resolver: DnsResolver,
    prober: WebProbe,
}

fn load(lists: &ListArgs, net: &NetArgs, revalidate: bool) -> Result<Collaborators> {
    let known = read_list(&lists.known_domains_path())?;
    let disposable: DisposableDomains = read_list(&lists.disposable_domains_path())?
        .into_iter()
        .collect();
    let agents = UserAgentPool::new(read_list(&lists.user_agents_path())?)
        .context("load user agents")?;

    let resolver = DnsResolver::new(&net.dns_options()).context("init DNS resolver")?;
    let prober = WebProbe::new(agents, net.probe_options()).context("init HTTP client")?;

    let valid = if revalidate {
        prune_domains(known.iter().map(String::as_str), &resolver)
    } else {
        known.into_iter().collect()
    };
    info!(
        known_domains = valid.len(),
        disposable_domains = disposable.len(),
        "reference lists loaded"
    );

    Ok(Collaborators {
        valid,
        disposable,
        resolver,
        prober,
    })
}

pub fn run_batch(args: &RunArgs) -> Result<()> {
    let layout = args.layout()?;
    let emails = args.emails_path();
    let out = args.out_path();

    let Collaborators {
        valid,
        disposable,
        resolver,
        prober,
    } = load(&args.lists, &args.net, args.revalidate_known)?;

    let mut table = read_records(&emails, &layout)?;
    let records = std::mem::take(&mut table.records);
    info!(rows = records.len(), path = %emails.display(), "processing batch");

    let known_before = valid.len();
    let pipeline = Pipeline::new(&disposable, &resolver, prober);
    let result = process_batch(records, valid, &pipeline);

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }
    write_annotated(&out, layout.delimiter, &table, &result.rows)?;
    write_list(&args.lists.known_domains_path(), result.valid_domains.iter())?;

    output::print_batch(&result, result.valid_domains.len() - known_before, &out, &args.format)
}

pub fn run_check(args: &CheckArgs) -> Result<()> {
    let Collaborators {
        mut valid,
        disposable,
        resolver,
        prober,
    } = load(&args.lists, &args.net, false)?;

    let record = EmailRecord::new(
        args.surname.as_str(),
        args.given_name.as_str(),
        Some(args.email.clone()),
    );
    let verdict = Pipeline::new(&disposable, &resolver, prober).check(&record, &mut valid);
    output::print_verdict(&args.email, &verdict, &args.format)
}
