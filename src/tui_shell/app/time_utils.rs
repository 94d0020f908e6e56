use time::macros::format_description;

use super::*;

pub(in crate::tui_shell) fn fmt_ts_ui(ts: &OffsetDateTime) -> String {
    ts.format(format_description!("[hour]:[minute]:[second]Z"))
        .unwrap_or_else(|_| "--:--:--".to_string())
}
