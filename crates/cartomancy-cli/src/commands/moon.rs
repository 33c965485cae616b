use chrono::{DateTime, NaiveTime, TimeZone, Utc};

use cartomancy_core::{moon_phase_with_sign, Config};

use super::{parse_date, CliResult};

pub fn run(date: Option<String>, config: Config, now: DateTime<Utc>) -> CliResult {
    let zone = config.calendar.zone();
    let (at, day) = match date {
        Some(raw) => {
            let day = parse_date(&raw)?;
            (Utc.from_utc_datetime(&day.and_time(NaiveTime::default())), day)
        }
        None => (now, zone.date_of(now)),
    };
    println!("{}", moon_phase_with_sign(at, day));
    Ok(())
}
