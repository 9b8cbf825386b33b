//! The CLI interface for autolayout
//!
//! Use the `--help` flag to see the available options.
use std::io::Write;
use std::path::PathBuf;

use autolayout::{
    Config, FileLidProbe, LogFile, Notifier, NotifySend, Pipeline, Resolution,
    ResolutionPreference, Silent, Xrandr,
};
use color_eyre::eyre::Result;
use structopt::StructOpt;

/// CLI arguments
#[derive(StructOpt, Debug)]
#[structopt(
    name = "autolayout",
    about = "Lays out connected monitors left to right for the current dock and lid state."
)]
struct Opts {
    /// Mode to use on every output that advertises it
    #[structopt(long, default_value = "2560x1440")]
    preferred: String,
    /// Mode to use when the preferred one is not advertised
    #[structopt(long, default_value = "1920x1080")]
    fallback: String,
    /// Width assumed for outputs left on `--auto`
    #[structopt(long, default_value = "1920")]
    default_width: u32,
    /// Output name of the laptop panel; may be given several times, first match wins
    #[structopt(long = "laptop", number_of_values = 1)]
    laptop_outputs: Vec<String>,
    /// Lid state file; may be given several times, first readable wins
    #[structopt(long = "lid-file", number_of_values = 1, parse(from_os_str))]
    lid_files: Vec<PathBuf>,
    /// File the run log is appended to
    #[structopt(long, parse(from_os_str))]
    log_file: Option<PathBuf>,
    /// Print the xrandr command instead of running it
    #[structopt(short = "n", long)]
    dry_run: bool,
    /// Do not send a desktop notification
    #[structopt(long)]
    no_notify: bool,
    /// Output debug info
    #[structopt(short, long)]
    verbose: bool,
}

impl Opts {
    fn into_config(self) -> Config {
        let mut config = Config {
            preference: ResolutionPreference::new(self.preferred, self.fallback),
            default_width: self.default_width,
            dry_run: self.dry_run,
            notify: !self.no_notify,
            ..Config::default()
        };
        if !self.laptop_outputs.is_empty() {
            config.laptop_outputs = self.laptop_outputs;
        }
        if !self.lid_files.is_empty() {
            config.lid_files = self.lid_files;
        }
        if let Some(log_file) = self.log_file {
            config.log_file = log_file;
        }
        config
    }
}

/// Entry point for `autolayout`.
fn main() -> Result<()> {
    color_eyre::install()?;

    let opts = Opts::from_args();
    let log_level = if opts.verbose {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Info
    };
    let config = opts.into_config();

    let (target, open_error) = match LogFile::open(&config.log_file) {
        Ok(target) => (target, None),
        Err(e) => (LogFile::stderr_only(), Some(e)),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level.as_str()))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                buf.timestamp_seconds(),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(target)))
        .init();

    if let Some(e) = open_error {
        log::warn!(
            "Cannot open log file {}, logging to stderr only: {}",
            config.log_file.display(),
            e
        );
    }
    log::debug!("Config: {:?}", config);
    for mode in [&config.preference.preferred, &config.preference.fallback] {
        if let Err(e) = mode.parse::<Resolution>() {
            log::warn!("{:?} is not a <width>x<height> mode: {}", mode, e);
        }
    }

    let backend = Xrandr::default();
    let lid_probe = FileLidProbe::new(config.lid_files.clone());
    let notifier: Box<dyn Notifier> = if config.notify {
        Box::new(NotifySend)
    } else {
        Box::new(Silent)
    };

    let report = Pipeline::new(&config, &backend, &lid_probe, notifier.as_ref()).run()?;
    if !report.applied {
        println!("{}", report.command);
    }

    Ok(())
}
