use std::{env, path::Path};

use log::LevelFilter;
use terra_tour_derive::{CliOptions, CliValue, KvDisplay};

use crate::{Error, Result};

/// Runtime options: which problem to solve and where results and logs go.
#[derive(Clone, Debug, CliOptions, KvDisplay)]
pub struct SolverOptions {
    /// Problem to solve. Required; there is no default mode.
    #[cli(long = "mode", short = 'm', parse_with = "parse_mode")]
    #[kv(skip)]
    pub mode: Option<Mode>,
    #[cli(long = "log-level", parse_with = "LogLevel::parse")]
    pub log_level: LogLevel,
    #[cli(long = "log-format", parse_with = "LogFormat::parse")]
    pub log_format: LogFormat,
    /// Prefix log lines with a millisecond timestamp.
    pub log_timestamp: bool,
    /// Log destination. Empty or `-` means stderr.
    #[cli(long = "log-output")]
    pub log_output: String,
    /// Point source. Empty or `-` means stdin.
    #[cli(long = "input")]
    pub input: String,
    /// Result destination. Empty or `-` means stdout.
    #[cli(long = "output")]
    pub output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "mode")]
pub enum Mode {
    /// Terrain-constrained minimum spanning tree.
    #[cli(name = "MST", alias = "spanning")]
    Mst,
    /// Cheapest-insertion tour.
    #[cli(name = "FASTTSP", alias = "fast", alias = "heuristic")]
    FastTsp,
    /// Branch-and-bound optimal tour.
    #[cli(name = "OPTTSP", alias = "opt", alias = "exact")]
    OptTsp,
}

impl Mode {
    fn summary(self) -> &'static str {
        match self {
            Self::Mst => "minimum spanning tree; land and sea only meet at the coast",
            Self::FastTsp => "fast cheapest-insertion tour",
            Self::OptTsp => "optimal tour by branch and bound",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-level")]
pub enum LogLevel {
    Error,
    #[cli(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-format")]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            mode: None,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: false,
            log_output: String::new(),
            input: String::new(),
            output: String::new(),
        }
    }
}

impl SolverOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::Help(Self::usage()));
            }

            if let Some(raw_name) = arg.strip_prefix("--") {
                if raw_name.is_empty() {
                    return Err(Error::invalid_input(format!(
                        "Invalid option name: {arg}\n\n{}",
                        Self::usage()
                    )));
                }

                let (name, value) = Self::split_arg(raw_name, &mut args);
                if options.apply_cli_option(&name, value.clone())? {
                    continue;
                }
                options.apply_flag(&name, value)?;
                continue;
            }

            if let Some(cluster) = arg.strip_prefix('-')
                && let Some(flag) = cluster.chars().next()
            {
                let Some(long) = Self::long_for_short(flag) else {
                    return Err(Error::invalid_input(format!(
                        "Unknown option: -{flag}\n\n{}",
                        Self::usage()
                    )));
                };
                let attached = &cluster[flag.len_utf8()..];
                let value = if attached.is_empty() {
                    args.next_if(|next| !next.starts_with('-') || next == "-")
                } else {
                    Some(attached.strip_prefix('=').unwrap_or(attached).to_string())
                };
                options.apply_cli_option(long, value)?;
                continue;
            }

            return Err(Error::invalid_input(format!(
                "Unexpected argument: {arg}\n\n{}",
                Self::usage()
            )));
        }

        options.mode()?;
        Ok(options)
    }

    fn apply_flag(&mut self, name: &str, value: Option<String>) -> Result<()> {
        match name {
            "log-timestamp" => {
                self.log_timestamp = match value {
                    Some(v) => parse_bool(name, &v)?,
                    None => true,
                };
            }
            "no-log-timestamp" => {
                if value.is_some() {
                    return Err(Error::invalid_input(format!(
                        "Flag --{name} does not take a value"
                    )));
                }
                self.log_timestamp = false;
            }
            _ => {
                return Err(Error::invalid_input(format!(
                    "Unknown option: --{name}\n\n{}",
                    Self::usage()
                )));
            }
        }
        Ok(())
    }

    pub fn usage() -> String {
        let modes = Mode::expected();
        let mode_lines: String = [Mode::Mst, Mode::FastTsp, Mode::OptTsp]
            .into_iter()
            .map(|mode| format!("  {:<9}{}\n", mode.as_str(), mode.summary()))
            .collect();

        format!(
            "Usage:\n  \
             terra-tour --mode <{modes}> [options] < points.txt\n  \
             terra-tour -m {opt} --input points.txt --output tour.txt\n\n\
             Modes:\n{mode_lines}\n\
             Options:\n  \
             -m, --mode <{modes}>\n  \
             --input <path>\n  \
             --output <path>\n  \
             --log-level <{levels}>\n  \
             --log-format <{formats}>\n  \
             --log-timestamp[=<bool>]\n  \
             --no-log-timestamp\n  \
             --log-output <path>\n  \
             -h, --help\n\n\
             Input: a point count followed by that many integer `x y` pairs.\n",
            opt = Mode::OptTsp,
            levels = LogLevel::expected(),
            formats = LogFormat::expected(),
        )
    }

    /// The selected mode, or the configuration error for a run without one.
    pub fn mode(&self) -> Result<Mode> {
        self.mode
            .ok_or_else(|| Error::invalid_input(format!("No mode specified\n\n{}", Self::usage())))
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        optional_path(&self.log_output)
    }

    pub fn output_path(&self) -> Option<&Path> {
        optional_path(&self.output)
    }

    pub fn input_path(&self) -> Option<&Path> {
        optional_path(&self.input)
    }
}

fn optional_path(raw: &str) -> Option<&Path> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        None
    } else {
        Some(Path::new(raw))
    }
}

fn parse_mode(raw: &str) -> Result<Option<Mode>> {
    Mode::parse(raw).map(Some)
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::invalid_input(format!(
            "Invalid boolean for --{name}: {value} (expected true/false)"
        ))),
    }
}
