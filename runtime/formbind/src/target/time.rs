use jiff::Timestamp;
use jiff::civil::{Date, DateTime, Time};
use jiff::tz::TimeZone;

use super::{Bindable, Kind};
use crate::coerce::Leaf;
use crate::errors::FieldError;

/// The `strptime` formats accepted for [`Timestamp`] leaves, in the order they are tried.
///
/// The last two carry no offset and are interpreted as UTC.
pub const TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S.%f %z",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d",
];

impl Bindable for Timestamp {
    fn kind(&self) -> Kind {
        Kind::Timestamp
    }

    fn type_name(&self) -> &'static str {
        "Timestamp"
    }

    fn assign(&mut self, values: &[String], leaf: &Leaf<'_>) {
        let Some(first) = values.first() else {
            return;
        };
        match parse_timestamp(first) {
            Ok(timestamp) => *self = timestamp,
            Err(e) => leaf.report(Some(first), e),
        }
    }
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<Timestamp, FieldError> {
    let [with_offset, date_time, date] = TIMESTAMP_FORMATS;
    Timestamp::strptime(with_offset, raw)
        .or_else(|_| {
            DateTime::strptime(date_time, raw)?
                .to_zoned(TimeZone::UTC)
                .map(|zoned| zoned.timestamp())
        })
        .or_else(|_| {
            Date::strptime(date, raw)?
                .to_datetime(Time::midnight())
                .to_zoned(TimeZone::UTC)
                .map(|zoned| zoned.timestamp())
        })
        .map_err(|source| FieldError::TimestampFormat { source })
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::parse_timestamp;
    use crate::coerce::Leaf;
    use crate::diagnostic::CollectingSink;
    use crate::errors::FieldError;
    use crate::target::Bindable;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn with_offset() {
        assert_eq!(
            parse_timestamp("2021-05-01 10:20:30.250 +0200").unwrap(),
            ts("2021-05-01T08:20:30.25Z")
        );
    }

    #[test]
    fn date_time_is_utc() {
        assert_eq!(
            parse_timestamp("2021-05-01 10:20:30").unwrap(),
            ts("2021-05-01T10:20:30Z")
        );
    }

    #[test]
    fn date_only_is_utc_midnight() {
        assert_eq!(
            parse_timestamp("2021-05-01").unwrap(),
            ts("2021-05-01T00:00:00Z")
        );
    }

    #[test]
    fn unknown_formats_are_reported() {
        let sink = CollectingSink::new();
        let mut t = Timestamp::UNIX_EPOCH;
        t.assign(&["01/05/2021".to_owned()], &Leaf::new("created_at", &sink));
        assert_eq!(t, Timestamp::UNIX_EPOCH);
        assert!(matches!(
            sink.take()[0].error,
            FieldError::TimestampFormat { .. }
        ));
    }
}
