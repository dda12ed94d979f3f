use std::io::{self, Write};

use flexi_logger::{DeferredNow, style};
use log::{Level, Record};

/// Bare message for `info`, coloured level prefix for everything else.
pub fn cli_format(w: &mut dyn Write, _now: &mut DeferredNow, record: &Record) -> io::Result<()> {
    let level = record.level();
    if level == Level::Info {
        return write!(w, "{}", record.args());
    }
    write!(
        w,
        "{}: {}",
        style(level).paint(level.as_str().to_lowercase()),
        record.args()
    )
}
