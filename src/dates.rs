use chrono::NaiveDate;
use thiserror::Error;

/// Dates cross the API boundary as `mm-dd-yyyy`.
pub const DATE_FORMAT: &str = "%m-%d-%Y";

#[derive(Debug, Error)]
#[error("invalid date '{value}', expected mm-dd-yyyy")]
pub struct DateFormatError {
    pub value: String,
    #[source]
    source: chrono::ParseError,
}

pub fn parse_date(value: &str) -> Result<NaiveDate, DateFormatError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| DateFormatError {
        value: value.to_string(),
        source,
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
