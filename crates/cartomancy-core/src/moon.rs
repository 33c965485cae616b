//! Approximate lunar phase and sun sign.
//!
//! Both are simple calendar approximations: the phase assumes a fixed
//! 29.53-day synodic month from a known new moon, and the sign splits the
//! year into twelve equal slices starting at Capricorn.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

const LUNAR_CYCLE_DAYS: f64 = 29.53;
const MS_PER_DAY: f64 = 86_400_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoonPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    /// Phase for a position in the cycle, `0.0 <= fraction < 1.0`.
    pub fn from_fraction(fraction: f64) -> Self {
        match fraction {
            f if !(0.0625..0.9375).contains(&f) => MoonPhase::NewMoon,
            f if f < 0.1875 => MoonPhase::WaxingCrescent,
            f if f < 0.3125 => MoonPhase::FirstQuarter,
            f if f < 0.4375 => MoonPhase::WaxingGibbous,
            f if f < 0.5625 => MoonPhase::FullMoon,
            f if f < 0.6875 => MoonPhase::WaningGibbous,
            f if f < 0.8125 => MoonPhase::LastQuarter,
            _ => MoonPhase::WaningCrescent,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::FullMoon => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        }
    }
}

impl std::fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZodiacSign {
    Capricorn,
    Aquarius,
    Pisces,
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
        }
    }
}

impl std::fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn reference_new_moon() -> DateTime<Utc> {
    // 2024-01-11 11:57 UTC
    Utc.with_ymd_and_hms(2024, 1, 11, 11, 57, 0)
        .single()
        .unwrap_or_default()
}

/// Position in the lunar cycle at `at`, in `[0, 1)`.
pub fn phase_fraction(at: DateTime<Utc>) -> f64 {
    let elapsed_days = (at - reference_new_moon()).num_milliseconds() as f64 / MS_PER_DAY;
    elapsed_days.rem_euclid(LUNAR_CYCLE_DAYS) / LUNAR_CYCLE_DAYS
}

pub fn moon_phase(at: DateTime<Utc>) -> MoonPhase {
    MoonPhase::from_fraction(phase_fraction(at))
}

/// Sign for `date`, by twelfths of the year.
pub fn zodiac_sign(date: NaiveDate) -> ZodiacSign {
    let index = (date.ordinal() as usize * 12 / 365).min(11);
    ZodiacSign::ALL[index]
}

/// E.g. "Full Moon in Leo".
pub fn moon_phase_with_sign(at: DateTime<Utc>, date: NaiveDate) -> String {
    format!("{} in {}", moon_phase(at), zodiac_sign(date))
}
