use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use mailvet_lib::probe::DEFAULT_PROBE_URL;
use mailvet_lib::{CsvLayout, DnsOptions, ProbeOptions};

#[derive(Parser)]
#[command(name = "mailvet-cli", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,

    /// filtre de logs par défaut (RUST_LOG a priorité)
    #[arg(long, env = "MAILVET_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// ajoute les logs à ce fichier au lieu de stderr
    #[arg(long, env = "MAILVET_LOG_FILE", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// traite un fichier CSV complet et met à jour la liste des domaines connus
    Run(RunArgs),
    /// vérifie une seule adresse (la liste des domaines n'est pas persistée)
    Check(CheckArgs),
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub lists: ListArgs,

    #[command(flatten)]
    pub net: NetArgs,

    /// CSV d'entrée (défaut: <data-dir>/input/email.csv)
    #[arg(long)]
    pub emails: Option<PathBuf>,

    /// CSV annoté (défaut: <data-dir>/output/email_checked.csv)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// séparateur CSV
    #[arg(long, default_value_t = ';')]
    pub delimiter: char,

    #[arg(long, default_value = "NOM")]
    pub surname_column: String,

    #[arg(long, default_value = "PRENOM")]
    pub given_name_column: String,

    #[arg(long, default_value = "EMAIL")]
    pub email_column: String,

    /// revérifie chaque domaine connu via DNS avant le traitement
    #[arg(long)]
    pub revalidate_known: bool,

    /// résumé: human|json
    #[arg(long, default_value = "human")]
    pub format: String,
}

#[derive(Args)]
pub struct CheckArgs {
    pub email: String,

    #[arg(long, default_value = "")]
    pub surname: String,

    #[arg(long, default_value = "")]
    pub given_name: String,

    #[command(flatten)]
    pub lists: ListArgs,

    #[command(flatten)]
    pub net: NetArgs,

    /// format: human|json
    #[arg(long, default_value = "human")]
    pub format: String,
}

#[derive(Args)]
pub struct ListArgs {
    /// racine des fichiers de données
    #[arg(long, env = "MAILVET_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    #[arg(long)]
    pub known_domains: Option<PathBuf>,

    #[arg(long)]
    pub disposable_domains: Option<PathBuf>,

    #[arg(long)]
    pub user_agents: Option<PathBuf>,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

impl ListArgs {
    fn input(&self, explicit: &Option<PathBuf>, name: &str) -> PathBuf {
        explicit
            .clone()
            .unwrap_or_else(|| self.data_dir.join("input").join(name))
    }

    pub fn known_domains_path(&self) -> PathBuf {
        self.input(&self.known_domains, "known_domains.txt")
    }

    pub fn disposable_domains_path(&self) -> PathBuf {
        self.input(&self.disposable_domains, "disposable_domains.txt")
    }

    pub fn user_agents_path(&self) -> PathBuf {
        self.input(&self.user_agents, "user_agents.txt")
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[derive(Args)]
pub struct NetArgs {
    /// timeout d'une requête DNS (ms)
    #[arg(long, env = "MAILVET_DNS_TIMEOUT_MS", default_value_t = 5_000)]
    pub dns_timeout_ms: u64,

    /// timeout d'une requête au service de vérification (ms)
    #[arg(long, env = "MAILVET_PROBE_TIMEOUT_MS", default_value_t = 15_000)]
    pub probe_timeout_ms: u64,

    /// URL du service de vérification
    #[arg(long, env = "MAILVET_PROBE_URL", default_value = DEFAULT_PROBE_URL)]
    pub probe_url: String,
}

impl NetArgs {
    pub fn dns_options(&self) -> DnsOptions {
        DnsOptions {
            timeout_ms: self.dns_timeout_ms,
            ..DnsOptions::default()
        }
    }

    pub fn probe_options(&self) -> ProbeOptions {
        ProbeOptions {
            url: self.probe_url.clone(),
            timeout_ms: self.probe_timeout_ms,
            ..ProbeOptions::default()
        }
    }
}

impl RunArgs {
    pub fn emails_path(&self) -> PathBuf {
        self.emails
            .clone()
            .unwrap_or_else(|| self.lists.data_dir().join("input").join("email.csv"))
    }

    pub fn out_path(&self) -> PathBuf {
        self.out.clone().unwrap_or_else(|| {
            self.lists
                .data_dir()
                .join("output")
                .join("email_checked.csv")
        })
    }

    pub fn layout(&self) -> Result<CsvLayout> {
        if !self.delimiter.is_ascii() {
            bail!("--delimiter must be a single ASCII character");
        }
        Ok(CsvLayout {
            delimiter: self.delimiter as u8,
            surname_column: self.surname_column.clone(),
            given_name_column: self.given_name_column.clone(),
            email_column: self.email_column.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn default_paths_follow_data_dir() {
        let cli = <Cli as Parser>::try_parse_from(["mailvet-cli", "run", "--data-dir", "/srv/d"])
            .expect("valid arguments");
        let Commands::Run(args) = cli.cmd else {
            panic!("expected run subcommand");
        };
        assert_eq!(args.emails_path(), PathBuf::from("/srv/d/input/email.csv"));
        assert_eq!(
            args.out_path(),
            PathBuf::from("/srv/d/output/email_checked.csv")
        );
        assert_eq!(
            args.lists.known_domains_path(),
            PathBuf::from("/srv/d/input/known_domains.txt")
        );
        assert_eq!(args.layout().unwrap().delimiter, b';');
    }
}
