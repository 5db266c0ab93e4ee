// ── Schedule domain types ──
//
// Weekly schedules address one-hour slots numbered 1..=168, Monday 00:00
// first. The router exchanges slot numbers as strings (`{"Id": "12"}`).

use std::fmt;
use std::str::FromStr;

use livebox_api::codec::flexible;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use strum::{Display, EnumString};

use crate::error::ScheduleError;

const HOURS_PER_DAY: u8 = 24;
const SLOTS_PER_WEEK: u8 = 168;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// ISO day number, Monday = 1.
    pub const fn number(self) -> u8 {
        match self {
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
            Self::Saturday => 6,
            Self::Sunday => 7,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(usize::from(index)))
            .copied()
    }
}

/// One hour of the week, `(day - 1) * 24 + hour + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScheduleId(u8);

impl ScheduleId {
    pub const MONDAY_MIDNIGHT: Self = Self::literal(1);
    pub const SUNDAY_LAST_HOUR: Self = Self::literal(SLOTS_PER_WEEK);

    /// Checked constructor for compile-time constants.
    ///
    /// # Panics
    ///
    /// When `raw` is outside `1..=168`.
    pub const fn literal(raw: u8) -> Self {
        assert!(
            raw >= 1 && raw <= SLOTS_PER_WEEK,
            "Invalid schedule ID. Must be between 1 and 168."
        );
        Self(raw)
    }

    pub fn new(raw: i64) -> Result<Self, ScheduleError> {
        u8::try_from(raw)
            .ok()
            .filter(|id| (1..=SLOTS_PER_WEEK).contains(id))
            .map(Self)
            .ok_or(ScheduleError::InvalidId(raw))
    }

    /// Slot for `hour` (0-23) of `day`.
    pub fn from_day_hour(day: Weekday, hour: i64) -> Result<Self, ScheduleError> {
        let hour = u8::try_from(hour)
            .ok()
            .filter(|h| *h < HOURS_PER_DAY)
            .ok_or(ScheduleError::InvalidHour(hour))?;
        Ok(Self((day.number() - 1) * HOURS_PER_DAY + hour + 1))
    }

    /// The 24 slots of `day`, midnight first.
    pub fn all_hours(day: Weekday) -> Vec<Self> {
        let first = (day.number() - 1) * HOURS_PER_DAY + 1;
        (first..first + HOURS_PER_DAY).map(Self).collect()
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub fn day(self) -> Weekday {
        let index = usize::from((self.0 - 1) / HOURS_PER_DAY);
        Weekday::ALL[index]
    }

    pub const fn hour(self) -> u8 {
        (self.0 - 1) % HOURS_PER_DAY
    }
}

impl TryFrom<i64> for ScheduleId {
    type Error = ScheduleError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl FromStr for ScheduleId {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: i64 = s.parse().map_err(|_| ScheduleError::Unparsable(s.to_owned()))?;
        Self::new(raw)
    }
}

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hour = self.hour();
        write!(f, "{} {hour:02}:00-{:02}:00", self.day(), hour + 1)
    }
}

impl Serialize for ScheduleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ScheduleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let raw: i64 = flexible::coerce(value.clone())
            .ok_or_else(|| de::Error::custom(ScheduleError::Unparsable(value.to_string())))?;
        Self::new(raw).map_err(de::Error::custom)
    }
}

/// One scheduled slot as exchanged with the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(rename = "Id")]
    pub id: ScheduleId,
}

pub type Schedules = Vec<Schedule>;

impl Schedule {
    pub fn new(id: ScheduleId) -> Self {
        Self { id }
    }

    pub fn at(day: Weekday, hour: i64) -> Result<Self, ScheduleError> {
        ScheduleId::from_day_hour(day, hour).map(Self::new)
    }
}

impl From<ScheduleId> for Schedule {
    fn from(id: ScheduleId) -> Self {
        Self::new(id)
    }
}
