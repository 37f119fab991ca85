use bitfield::bitfield;
#[cfg(feature = "chrono")]
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use derive_more::{From, Into};

bitfield! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, From, Into)]
    pub struct Date(u16);
    year_offset, set_year_offset: 15, 9;
    pub month, set_month: 8, 5;
    pub day, set_day: 4, 0;
}

impl Date {
    pub fn new(year: u16, month: u16, day: u16) -> Self {
        let mut date = Self::default();
        date.set_year_offset(year.saturating_sub(1980));
        date.set_month(month);
        date.set_day(day);
        date
    }

    pub fn year(&self) -> u16 {
        self.year_offset() + 1980
    }
}

bitfield! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, From, Into)]
    pub struct Time(u16);
    pub hour, set_hour: 15, 11;
    pub minute, set_minute: 10, 5;
    double_second, set_double_second: 4, 0;
}

impl Time {
    pub fn new(hour: u16, minute: u16, second: u16) -> Self {
        let mut time = Self::default();
        time.set_hour(hour);
        time.set_minute(minute);
        time.set_double_second(second / 2);
        time
    }

    pub fn second(&self) -> u16 {
        self.double_second() * 2
    }
}

/// Timestamp of a directory record, stored as is and never interpreted
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DateTime {
    pub date: Date,
    pub time: Time,
    /// Units of 10 milliseconds, 0..=199, only creation time carries it
    pub fine: u8,
}

impl DateTime {
    pub fn new(date: Date, time: Time) -> Self {
        Self { date, time, fine: 0 }
    }

    pub fn millisecond(&self) -> u32 {
        self.fine as u32 * 10
    }
}

#[cfg(feature = "chrono")]
impl DateTime {
    /// None if fields do not form a valid date and time, e.g. an all zero timestamp
    pub fn naive(&self) -> Option<NaiveDateTime> {
        let (year, month, day) = (self.date.year(), self.date.month(), self.date.day());
        let date = NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)?;
        let (hour, minute) = (self.time.hour() as u32, self.time.minute() as u32);
        let second = self.time.second() as u32 + self.millisecond() / 1000;
        let time = NaiveTime::from_hms_milli_opt(hour, minute, second, self.millisecond() % 1000)?;
        Some(NaiveDateTime::new(date, time))
    }
}
