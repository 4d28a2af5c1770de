//! dynip - tiny dynamic DNS updater.

use clap::Parser;
use dynip::config::{Config, Credentials};
use dynip::resolver::IpResolver;
use dynip::runner::{run, RunOptions};
use dynip::updater::DynDnsUpdater;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dynip")]
#[command(about = "Update a dynamic DNS record when the public IP changes")]
#[command(version, disable_help_flag = true)]
struct Cli {
    /// Credentials as `user:pass`, or a bare token
    #[arg(short, long, env = "DYNIP_AUTH", hide_env_values = true)]
    auth: String,

    /// Dynamic DNS update URL
    #[arg(short, long)]
    update_url: String,

    /// Where to keep state between runs
    #[arg(short, long, default_value = "./dynip.state")]
    state_file: PathBuf,

    /// Hostname to update (repeatable)
    #[arg(short = 'h', long = "host", required = true)]
    hosts: Vec<String>,

    /// Refresh the record after this many days even if the IP is unchanged
    #[arg(short, long, default_value_t = 4)]
    days: u32,

    /// Update even if nothing changed
    #[arg(short, long, overrides_with = "no_force")]
    force: bool,

    #[arg(long, overrides_with = "force", hide = true)]
    no_force: bool,

    /// Verbose logging
    #[arg(short = 'D', long, overrides_with = "no_debug")]
    debug: bool,

    #[arg(long, overrides_with = "debug", hide = true)]
    no_debug: bool,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print help
    #[arg(long, action = clap::ArgAction::Help)]
    help: Option<bool>,
}

impl Cli {
    fn force(&self) -> bool {
        self.force && !self.no_force
    }

    fn debug(&self) -> bool {
        self.debug && !self.no_debug
    }
}

fn init_logging(debug: bool) {
    let default = if debug { "dynip=debug,info" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug());

    let config = Config::load(cli.config.clone())?;

    let resolver = IpResolver::with_urls(config.checkip_urls.clone(), config.checkip_timeout())?;
    let updater = DynDnsUpdater::new(
        cli.update_url.clone(),
        Credentials::parse(&cli.auth),
        config.update_timeout(),
    )?;

    let options = RunOptions {
        state_file: cli.state_file.clone(),
        hosts: cli.hosts.clone(),
        staleness_days: cli.days,
        force: cli.force(),
    };

    let outcome = run(&options, &resolver, &updater).await?;
    if !outcome.success {
        std::process::exit(outcome.exit_code());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["dynip", "-a", "user:pass", "-u", "http://dyn.example/update"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["-h", "home.example.com"]);
        assert_eq!(cli.state_file, PathBuf::from("./dynip.state"));
        assert_eq!(cli.days, 4);
        assert!(!cli.force());
        assert!(!cli.debug());
        assert_eq!(cli.hosts, vec!["home.example.com"]);
    }

    #[test]
    fn test_repeated_hosts() {
        let cli = parse(&["-h", "a.example.com", "--host", "b.example.com"]);
        assert_eq!(cli.hosts, vec!["a.example.com", "b.example.com"]);
    }

    #[test]
    fn test_days_and_debug_have_distinct_short_flags() {
        let cli = parse(&["-h", "a.example.com", "-d", "7", "-D"]);
        assert_eq!(cli.days, 7);
        assert!(cli.debug());
    }

    #[test]
    fn test_last_force_flag_wins() {
        assert!(!parse(&["-h", "a", "--force", "--no-force"]).force());
        assert!(parse(&["-h", "a", "--no-force", "-f"]).force());
    }

    #[test]
    fn test_last_debug_flag_wins() {
        assert!(!parse(&["-h", "a", "--debug", "--no-debug"]).debug());
        assert!(parse(&["-h", "a", "--no-debug", "--debug"]).debug());
    }

    #[test]
    fn test_auth_reads_environment() {
        let command = Cli::command();
        let auth = command
            .get_arguments()
            .find(|arg| arg.get_id() == "auth")
            .unwrap();

        assert_eq!(auth.get_env(), Some(std::ffi::OsStr::new("DYNIP_AUTH")));
    }

    #[test]
    fn test_host_is_required() {
        let result = Cli::try_parse_from(["dynip", "-a", "x", "-u", "http://dyn.example/update"]);
        assert!(result.is_err());
    }
}
