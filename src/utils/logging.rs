//! Log output shared by the `hide-npng` and `web_server` binaries.
//!
//! Library code only uses the `log` macros; a binary calls [`init_logger`]
//! once at startup.

use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

/// Initialize the logging system with timestamp, level, source location and message.
///
/// INFO by default; `RUST_LOG` overrides the level.
/// Format: `[YYYY-mm-dd HH:MM:SS] [LEVEL] [file:line] message`
pub fn init_logger() {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] [{}:{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
}
