use chrono::{DateTime, Duration, FixedOffset, Local, Timelike};
use clap::{Parser, Subcommand};
use glucostat::{Config, GlucoseService, Reading, ReadingStore, Record, RecordType, Summarizer};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

const MAX_SEED_DAYS: i64 = 3_650;

/// Glucose readings, summarized by time of day
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 5th/95th percentile and average per 5-minute slot, as JSON
    Summary {
        /// First day (YYYY-MM-DD)
        from: String,

        /// Last day (YYYY-MM-DD), inclusive
        to: String,

        /// Include the sorted readings of every slot
        #[arg(long)]
        readings: bool,
    },

    /// Readings with a value, as JSON
    Raw {
        /// First day (YYYY-MM-DD)
        from: String,

        /// Last day (YYYY-MM-DD), inclusive
        to: String,
    },

    /// First and last reading per sensor device, as JSON
    Serials,

    /// Writes synthetic readings (every 15 minutes) for the last days
    Seed {
        /// Number of days to generate (1-3650)
        #[arg(
            long,
            default_value_t = 14,
            value_parser = clap::value_parser!(i64).range(1..=MAX_SEED_DAYS),
        )]
        days: i64,

        /// Serial number of the simulated device
        #[arg(long, default_value = "0M0000SEED0")]
        serial: String,
    },
}

fn main() -> glucostat::Result<()> {
    env_logger::builder()
        .filter_module("lsm_tree", log::LevelFilter::Warn)
        .filter_module("fjall", log::LevelFilter::Warn)
        .filter_module("glucostat", log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let store = ReadingStore::builder()
        .cache_size_mib(config.cache_size_mib)
        .open(&config.path)?;

    let service = GlucoseService::new(store)
        .zone(config.timezone)
        .record_type(config.record_type);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Summary { from, to, readings } => {
            let summarizer = Summarizer::new().include_readings(readings);
            let summary = service.summary_with(&from, &to, &summarizer)?;
            serde_json::to_writer_pretty(&mut out, &summary)?;
        }
        Command::Raw { from, to } => {
            let raw = service.raw(&from, &to)?;
            serde_json::to_writer_pretty(&mut out, &raw)?;
        }
        Command::Serials => {
            let serials = service.serials()?;
            serde_json::to_writer_pretty(&mut out, &serials)?;
        }
        Command::Seed { days, serial } => {
            seed(service.source(), days, &serial, config.record_type)?;
            return Ok(());
        }
    }

    writeln!(out)?;

    Ok(())
}

/// Generates a plausible daily glucose curve with some noise and sensor gaps.
fn seed(
    store: &ReadingStore,
    days: i64,
    serial: &str,
    record_type: RecordType,
) -> glucostat::Result<()> {
    use rand::Rng;

    let mut rng = rand::thread_rng();

    let now: DateTime<FixedOffset> = Local::now().fixed_offset();
    let start = now - Duration::days(days);

    let start_time = Instant::now();

    let records = (0..days * 96)
        .map(|idx| {
            let timestamp = start + Duration::minutes(idx * 15);

            // Higher after meals (~8:00, ~13:00, ~19:00), low at night
            let base: i64 = match timestamp.hour() {
                0..=5 => 95,
                8 | 9 | 13 | 14 | 19 | 20 => 165,
                _ => 120,
            };

            let value = if rng.gen_bool(0.02) {
                None
            } else {
                Some(base + rng.gen_range(-25..=25))
            };

            Record {
                serial_number: serial.to_owned(),
                record_type,
                reading: Reading::new(timestamp, value),
            }
        })
        .collect::<Vec<_>>();

    store.insert_batch(&records)?;

    log::info!(
        "seeded {} readings for {serial:?} in {:?}",
        records.len(),
        start_time.elapsed()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn seed_days_in_range() {
        let args = Args::try_parse_from(["glucostat", "seed", "--days", "30"]);
        assert!(matches!(
            args.map(|a| a.command),
            Ok(Command::Seed { days: 30, .. })
        ));

        let args = Args::try_parse_from(["glucostat", "seed"]);
        assert!(matches!(
            args.map(|a| a.command),
            Ok(Command::Seed { days: 14, .. })
        ));
    }

    #[test]
    fn seed_days_out_of_range() {
        for days in ["0", "-1", "3651", "9223372036854775807"] {
            assert!(Args::try_parse_from(["glucostat", "seed", "--days", days]).is_err());
        }
    }

    #[test]
    fn args_are_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
