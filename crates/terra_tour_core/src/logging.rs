use std::{fmt, fs::File, io::Write};

use env_logger::{Builder, Target, WriteStyle};
use log::Level;

use crate::options::{LogFormat, SolverOptions};
use crate::{Error, Result};

/// Installs the global logger described by `options`.
///
/// Result blocks go to stdout (or `--output`), so log lines never share a
/// stream with them unless the caller points `--log-output` at the same file.
pub fn init_logger(options: &SolverOptions) -> Result<()> {
    let log_format = options.log_format;
    let log_timestamp = options.log_timestamp;

    let mut builder = Builder::new();
    builder
        .filter_level(options.log_level.to_filter())
        .write_style(WriteStyle::Never)
        .format(move |buf, record| {
            if log_timestamp {
                write!(buf, "{} ", buf.timestamp_millis())?;
            }
            writeln!(
                buf,
                "{}",
                render_line(log_format, record.level(), record.target(), record.args())
            )
        });

    match options.log_output_path() {
        Some(log_path) => {
            let log_file = File::create(log_path).map_err(|e| {
                Error::other(format!(
                    "failed to create log output file {}: {e}",
                    log_path.display()
                ))
            })?;
            builder.target(Target::Pipe(Box::new(log_file)));
        }
        None => {
            builder.target(Target::Stderr);
        }
    }

    builder
        .try_init()
        .map_err(|e| Error::other(format!("logger init failed: {e}")))
}

fn render_line(format: LogFormat, level: Level, target: &str, args: &fmt::Arguments<'_>) -> String {
    match format {
        LogFormat::Compact => format!("{} {args}", level_tag(level)),
        LogFormat::Pretty => format!("{} [{}] {args}", level_tag(level), short_target(target)),
    }
}

/// `terra_tour_core::algo::branch_bound` -> `branch_bound`.
fn short_target(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::{level_tag, render_line, short_target};
    use crate::options::LogFormat;

    #[test]
    fn level_tags_are_upper_case_names() {
        assert_eq!(level_tag(Level::Error), "ERROR");
        assert_eq!(level_tag(Level::Warn), "WARN");
        assert_eq!(level_tag(Level::Trace), "TRACE");
    }

    #[test]
    fn short_target_keeps_last_module_segment() {
        assert_eq!(
            short_target("terra_tour_core::algo::branch_bound"),
            "branch_bound"
        );
        assert_eq!(short_target("main"), "main");
    }

    #[test]
    fn compact_lines_omit_the_target() {
        let line = render_line(
            LogFormat::Compact,
            Level::Info,
            "terra_tour_core::algo::spanning",
            &format_args!("spanning: complete n={}", 3),
        );
        assert_eq!(line, "INFO spanning: complete n=3");
    }

    #[test]
    fn pretty_lines_include_the_short_target() {
        let line = render_line(
            LogFormat::Pretty,
            Level::Debug,
            "terra_tour_core::algo::insertion",
            &format_args!("insertion: point={}", 7),
        );
        assert_eq!(line, "DEBUG [insertion] insertion: point=7");
    }
}
