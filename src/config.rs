use crate::RecordType;
use chrono::{DateTime, FixedOffset, Local, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use std::path::{Path, PathBuf};

/// Time zone that request dates are interpreted in
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(try_from = "String")]
pub enum Zone {
    /// The system's local time zone (daylight saving time aware)
    #[default]
    Local,

    /// A fixed UTC offset
    Fixed(FixedOffset),
}

impl Zone {
    /// Resolves a wall clock time in this zone.
    ///
    /// If the time is ambiguous (DST fold), `earliest` picks which of both to use.
    /// Returns `None` if the time does not exist (DST gap).
    pub(crate) fn resolve(
        &self,
        naive: &NaiveDateTime,
        earliest: bool,
    ) -> Option<DateTime<FixedOffset>> {
        fn pick<Tz: TimeZone>(
            result: LocalResult<DateTime<Tz>>,
            earliest: bool,
        ) -> Option<DateTime<FixedOffset>> {
            let dt = if earliest {
                result.earliest()
            } else {
                result.latest()
            };
            dt.map(|dt| dt.fixed_offset())
        }

        match self {
            Self::Local => pick(Local.from_local_datetime(naive), earliest),
            Self::Fixed(offset) => pick(offset.from_local_datetime(naive), earliest),
        }
    }
}

impl std::str::FromStr for Zone {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "local" => Ok(Self::Local),
            "utc" | "UTC" | "Z" => Ok(Self::Fixed(Utc.fix())),
            offset => offset
                .parse::<FixedOffset>()
                .map(Self::Fixed)
                .map_err(|_| crate::Error::InvalidConfig(format!("invalid time zone: {s:?}"))),
        }
    }
}

impl TryFrom<String> for Zone {
    type Error = crate::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Application configuration, usually loaded from a JSON file
///
/// ```json
/// {
///   "path": "/var/lib/glucostat",
///   "cache_size_mib": 64,
///   "timezone": "+02:00",
///   "record_type": 0
/// }
/// ```
///
/// Every field is optional.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Folder of the reading store
    pub path: PathBuf,

    /// Block cache size of the reading store in MiB
    pub cache_size_mib: u64,

    /// Time zone for request dates
    pub timezone: Zone,

    /// Record type that is summarized
    pub record_type: RecordType,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".glucostat"),
            cache_size_mib: 64,
            timezone: Zone::Local,
            record_type: RecordType::HISTORIC,
        }
    }
}

impl Config {
    /// Loads the configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, or is not a valid configuration.
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        log::debug!("loading config from {path:?}");

        let data = std::fs::read(path)?;
        let config = serde_json::from_slice(&data)?;

        Ok(config)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use test_log::test;

    #[test]
    fn zone_from_str() {
        assert_eq!(Zone::Local, "local".parse().unwrap());
        assert_eq!(
            Zone::Fixed(FixedOffset::east_opt(0).unwrap()),
            "UTC".parse().unwrap()
        );
        assert_eq!(
            Zone::Fixed(FixedOffset::east_opt(2 * 3_600).unwrap()),
            "+02:00".parse().unwrap()
        );
        assert_eq!(
            Zone::Fixed(FixedOffset::west_opt(5 * 3_600 + 30 * 60).unwrap()),
            "-05:30".parse().unwrap()
        );
        assert!("mars/olympus".parse::<Zone>().is_err());
    }

    #[test]
    fn zone_resolve_fixed() {
        let zone: Zone = "+02:00".parse().unwrap();
        let naive = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        let dt = zone.resolve(&naive, true).unwrap();
        assert_eq!("2024-05-01T00:00:00+02:00", dt.to_rfc3339());
        assert_eq!(dt, zone.resolve(&naive, false).unwrap());
    }

    #[test]
    fn config_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(Config::default(), config);
        assert_eq!(64, config.cache_size_mib);
        assert_eq!(RecordType::HISTORIC, config.record_type);
    }

    #[test]
    fn config_load() -> crate::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.json");

        let mut file = std::fs::File::create(&path)?;
        write!(
            file,
            r#"{{ "path": "data", "cache_size_mib": 16, "timezone": "+01:00", "record_type": 1 }}"#
        )?;
        drop(file);

        let config = Config::load(&path)?;
        assert_eq!(PathBuf::from("data"), config.path);
        assert_eq!(16, config.cache_size_mib);
        assert_eq!(
            Zone::Fixed(FixedOffset::east_opt(3_600).unwrap()),
            config.timezone
        );
        assert_eq!(RecordType(1), config.record_type);

        Ok(())
    }

    #[test]
    fn config_rejects_bad_zone() {
        let result = serde_json::from_str::<Config>(r#"{ "timezone": "nowhere" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn config_missing_file() {
        assert!(matches!(
            Config::load("/definitely/not/here.json"),
            Err(crate::Error::Io(_))
        ));
    }
}
