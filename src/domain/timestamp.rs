use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

/// Layout of `notes.created_at`, e.g. `2026-10-16 09:30:00`.
pub const CREATED_AT_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Local wall-clock time in the note timestamp layout. Falls back to UTC when
/// the local offset cannot be determined.
pub fn now_local_timestamp() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    format_timestamp(now)
}

pub fn format_timestamp(value: OffsetDateTime) -> String {
    value
        .format(CREATED_AT_FORMAT)
        .unwrap_or_else(|_| value.unix_timestamp().to_string())
}
