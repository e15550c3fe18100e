//! CLI for subrock.

mod banner;

use clap::{ArgAction, Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use subrock_core::client::CurlClient;
use subrock_core::config::{self, ConfigSource, SubrockConfig};
use subrock_core::logging;
use subrock_core::persist::{OutputFormat, SaveOptions};
use subrock_core::render::RenderMode;
use subrock_core::runner::{self, RunOptions};
use subrock_core::targets::TargetSource;

/// `-o/--output` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    Json,
    Html,
    Txt,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Json => OutputFormat::Json,
            OutputArg::Html => OutputFormat::Html,
            OutputArg::Txt => OutputFormat::Txt,
        }
    }
}

/// Fetch and print URLs by domain.
#[derive(Debug, Parser)]
#[command(name = "subrock", version)]
#[command(about = "Fetch and print URLs by domain from the Cavalier OSINT API", long_about = None)]
pub struct Cli {
    /// Single domain to fetch.
    pub domain: Option<String>,

    /// Single URL to fetch.
    #[arg(short = 'u', long = "url", value_name = "URL")]
    pub url: Option<String>,

    /// File containing a list of domains or URLs to fetch, one per line.
    #[arg(short = 'l', long = "list", value_name = "FILE")]
    pub list: Option<PathBuf>,

    /// Save results in this format as `<target>_urls.<format>`.
    #[arg(short = 'o', long = "output", value_enum)]
    pub output: Option<OutputArg>,

    /// Print the full data as indented JSON instead of one URL per line.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Check that the target answers HTTP 200 before fetching (`-ck` also works).
    #[arg(short = 'c', short_alias = 'k', long, action = ArgAction::Count)]
    pub check: u8,

    /// Directory for saved files.
    #[arg(short = 'd', long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Do not replace an existing output file.
    #[arg(long)]
    pub no_clobber: bool,

    /// Append log lines to this file instead of the configured one.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Read configuration from this file instead of ~/.config/subrock/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Do not print the start-up banner.
    #[arg(long)]
    pub no_banner: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            mode: RenderMode::from_verbose(self.verbose),
            output: self.output.map(OutputFormat::from),
            check: self.check > 0,
            save: SaveOptions {
                dir: self.output_dir.clone(),
                overwrite: !self.no_clobber,
            },
        }
    }

    pub fn target_source(&self) -> TargetSource {
        TargetSource::select(self.domain.clone(), self.url.clone(), self.list.clone())
    }

    /// Load config (falling back to defaults) and apply command-line overrides.
    ///
    /// Runs before logging is initialized; the returned source (or error) is
    /// logged by the caller afterwards.
    fn load_config(&self) -> (SubrockConfig, anyhow::Result<ConfigSource>) {
        let loaded = match &self.config {
            Some(path) => {
                config::load_from_path(path).map(|cfg| (cfg, ConfigSource::Loaded(path.clone())))
            }
            None => config::load_or_init(),
        };
        let (mut cfg, source) = match loaded {
            Ok((cfg, source)) => (cfg, Ok(source)),
            Err(e) => (SubrockConfig::default(), Err(e)),
        };
        if let Some(path) = &self.log_file {
            cfg.logging.file = path.clone();
        }
        (cfg, source)
    }

    pub fn run(self) {
        // Logging is not up yet; a banner that cannot be written is dropped.
        let banner_written = if self.no_banner {
            Ok(())
        } else {
            banner::print_banner(&mut io::stderr().lock())
        };

        let (cfg, config_source) = self.load_config();

        // Logging as early as the log path is known.
        if let Err(e) = logging::init_logging(&cfg.logging) {
            logging::init_logging_stderr(&cfg.logging);
            tracing::warn!("file logging unavailable, using stderr: {:#}", e);
        }
        match config_source {
            Ok(ConfigSource::Created(path)) => {
                tracing::info!("created default config at {}", path.display())
            }
            Ok(ConfigSource::Loaded(path)) => {
                tracing::debug!("loaded config from {}", path.display())
            }
            Err(e) => {
                tracing::warn!("using default config: {:#}", e);
                eprintln!("subrock: using default config: {:#}", e);
            }
        }
        if let Err(e) = banner_written {
            tracing::debug!("could not print banner: {}", e);
        }
        tracing::debug!("loaded config: {:?}", cfg);

        let client = match CurlClient::from_config(&cfg) {
            Ok(client) => client,
            Err(e) => {
                tracing::error!("cannot use API endpoint {}: {}", cfg.api_endpoint, e);
                println!("Cannot use API endpoint {}: {}", cfg.api_endpoint, e);
                return;
            }
        };

        let stdout = io::stdout();
        let mut out = stdout.lock();
        let written = runner::run(&client, &self.target_source(), &self.run_options(), &mut out)
            .and_then(|_| out.flush().map_err(anyhow::Error::from));
        if let Err(e) = written {
            // stdout is gone (e.g. closed pipe); the log is the only place left to report it.
            tracing::error!("could not write results: {:#}", e);
        }
    }
}
