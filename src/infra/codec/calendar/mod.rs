//! Gregorian calendar helpers used when the bridge fills date fields.
use crate::error::CalendarError;

const DAYS_IN_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Leap years: divisible by 4, except centuries not divisible by 400.
pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`.
pub fn days_in_month(year: u16, month: u8) -> Result<u8, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth { month });
    }
    let days = DAYS_IN_MONTH[usize::from(month - 1)];
    Ok(if month == 2 && is_leap_year(year) {
        days + 1
    } else {
        days
    })
}

/// Day of the year, 1 on January 1st.
pub fn day_of_year(year: u16, month: u8, day: u8) -> Result<u16, CalendarError> {
    let month_len = days_in_month(year, month)?;
    if day == 0 || day > month_len {
        return Err(CalendarError::InvalidDay { day, month });
    }

    let mut doy = u16::from(day);
    for previous in 1..month {
        doy += u16::from(days_in_month(year, previous)?);
    }
    Ok(doy)
}
