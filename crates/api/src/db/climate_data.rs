use async_trait::async_trait;
use serde::ser::{Serialize, SerializeMap, Serializer};
use sqlx::{sqlite::SqliteConnectOptions, Connection, SqliteConnection};
use time::{format_description::BorrowedFormatItem, macros::format_description, Duration};

/// The only date shape stored in the dataset, `YYYY-MM-DD`
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query climate database: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Failed to format date string: {0}")]
    DateFormat(#[from] time::error::Format),
    #[error("The date {input} is not a valid date in YYYY-MM-DD format.")]
    InvalidDate {
        input: String,
        #[source]
        source: time::error::Parse,
    },
    #[error("The date {date} was not found. Please select a date between {first} and {last}.")]
    StartOutOfBounds {
        date: String,
        first: String,
        last: String,
    },
    #[error("The dates {start} or {end} were not found. Please select dates between {first} and {last}.")]
    RangeOutOfBounds {
        start: String,
        end: String,
        first: String,
        last: String,
    },
    #[error("No temperature observations were recorded between {start} and {end}.")]
    EmptyRange { start: String, end: String },
    #[error("The measurement table contains no observations")]
    EmptyDataset,
}

/// One (date, precipitation) pair. Serializes as a single-entry JSON
/// object keyed by the date, e.g. `{"2016-08-24": 0.08}`. A day where
/// the gauge reported nothing serializes with a `null` value.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecipitationReading {
    pub date: String,
    pub prcp: Option<f64>,
}

impl Serialize for PrecipitationReading {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.date, &self.prcp)?;
        map.end()
    }
}

/// One (date, temperature) pair, serialized like [`PrecipitationReading`]
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureReading {
    pub date: String,
    pub tobs: f64,
}

impl Serialize for TemperatureReading {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.date, &self.tobs)?;
        map.end()
    }
}

/// Aggregate temperature figures over a date range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

/// First and last observation dates in the dataset, fixed for the
/// lifetime of the service
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetBounds {
    pub first: String,
    pub last: String,
}

impl DatasetBounds {
    /// Inclusive containment check. ISO dates compare lexically in the
    /// same order the calendar does.
    pub fn contains(&self, date: &str) -> bool {
        self.first.as_str() <= date && date <= self.last.as_str()
    }
}

/// Caller-supplied aggregation window. `end` of `None` means "through
/// the last date in the dataset".
#[derive(Debug, Clone, PartialEq)]
pub struct DateRange {
    pub start: String,
    pub end: Option<String>,
}

#[async_trait]
pub trait ClimateData: Sync + Send {
    /// Dataset date bounds, computed once at startup
    fn dataset_bounds(&self) -> DatasetBounds;
    async fn all_precipitation(&self) -> Result<Vec<PrecipitationReading>, Error>;
    async fn distinct_stations(&self) -> Result<Vec<String>, Error>;
    /// Temperature readings in the 365-day window ending at the last
    /// observation date
    async fn last_year_observations(&self) -> Result<Vec<TemperatureReading>, Error>;
    /// Min/max/avg temperature over `range`, validated against the
    /// dataset bounds
    async fn temperature_stats(&self, range: &DateRange) -> Result<TemperatureStats, Error>;
}

#[derive(Debug)]
pub struct ClimateAccess {
    options: SqliteConnectOptions,
    bounds: DatasetBounds,
}

impl ClimateAccess {
    /// Opens the dataset and determines its date bounds. Fails when the
    /// file is missing or the measurement table is empty.
    pub async fn new(database: &str) -> Result<Self, Error> {
        let options = SqliteConnectOptions::new()
            .filename(database)
            .read_only(true);

        let mut conn = SqliteConnection::connect_with(&options).await?;
        let (first, last) = sqlx::query_as::<_, (Option<String>, Option<String>)>(
            "SELECT MIN(date), MAX(date) FROM measurement",
        )
        .fetch_one(&mut conn)
        .await?;

        match (first, last) {
            (Some(first), Some(last)) => Ok(Self {
                options,
                bounds: DatasetBounds { first, last },
            }),
            _ => Err(Error::EmptyDataset),
        }
    }

    /// Creates a fresh connection per query, dropped on every exit path,
    /// so no handle is held open between requests
    async fn open_connection(&self) -> Result<SqliteConnection, Error> {
        Ok(SqliteConnection::connect_with(&self.options).await?)
    }

    fn check_bounds(&self, range: &DateRange) -> Result<(), Error> {
        match &range.end {
            None => {
                if !self.bounds.contains(&range.start) {
                    return Err(Error::StartOutOfBounds {
                        date: range.start.clone(),
                        first: self.bounds.first.clone(),
                        last: self.bounds.last.clone(),
                    });
                }
            }
            Some(end) => {
                if !self.bounds.contains(&range.start) || !self.bounds.contains(end) {
                    return Err(Error::RangeOutOfBounds {
                        start: range.start.clone(),
                        end: end.clone(),
                        first: self.bounds.first.clone(),
                        last: self.bounds.last.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn parse_date(input: &str) -> Result<time::Date, Error> {
    time::Date::parse(input, DATE_FORMAT).map_err(|source| Error::InvalidDate {
        input: input.to_owned(),
        source,
    })
}

/// Start of the 365-day window ending at `last`, leap years included
fn window_start(last: &str) -> Result<String, Error> {
    let last = parse_date(last)?;
    Ok((last - Duration::days(365)).format(DATE_FORMAT)?)
}

#[async_trait]
impl ClimateData for ClimateAccess {
    fn dataset_bounds(&self) -> DatasetBounds {
        self.bounds.clone()
    }

    async fn all_precipitation(&self) -> Result<Vec<PrecipitationReading>, Error> {
        let mut conn = self.open_connection().await?;
        let rows =
            sqlx::query_as::<_, (String, Option<f64>)>("SELECT date, prcp FROM measurement")
                .fetch_all(&mut conn)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(date, prcp)| PrecipitationReading { date, prcp })
            .collect())
    }

    async fn distinct_stations(&self) -> Result<Vec<String>, Error> {
        let mut conn = self.open_connection().await?;
        let rows = sqlx::query_as::<_, (String,)>("SELECT DISTINCT station FROM measurement")
            .fetch_all(&mut conn)
            .await?;

        Ok(rows.into_iter().map(|(station,)| station).collect())
    }

    async fn last_year_observations(&self) -> Result<Vec<TemperatureReading>, Error> {
        let window_start = window_start(&self.bounds.last)?;

        let mut conn = self.open_connection().await?;
        let rows = sqlx::query_as::<_, (String, f64)>(
            "SELECT date, tobs FROM measurement WHERE date >= ? AND date <= ?",
        )
        .bind(window_start.as_str())
        .bind(self.bounds.last.as_str())
        .fetch_all(&mut conn)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(date, tobs)| TemperatureReading { date, tobs })
            .collect())
    }

    async fn temperature_stats(&self, range: &DateRange) -> Result<TemperatureStats, Error> {
        parse_date(&range.start)?;
        if let Some(end) = &range.end {
            parse_date(end)?;
        }
        self.check_bounds(range)?;

        let end = range
            .end
            .clone()
            .unwrap_or_else(|| self.bounds.last.clone());

        let mut conn = self.open_connection().await?;
        let (min, max, avg) = sqlx::query_as::<_, (Option<f64>, Option<f64>, Option<f64>)>(
            "SELECT MIN(tobs), MAX(tobs), AVG(tobs) FROM measurement WHERE date >= ? AND date <= ?",
        )
        .bind(range.start.as_str())
        .bind(end.as_str())
        .fetch_one(&mut conn)
        .await?;

        // Aggregates over zero rows come back NULL
        match (min, max, avg) {
            (Some(min), Some(max), Some(avg)) => Ok(TemperatureStats { min, max, avg }),
            _ => Err(Error::EmptyRange {
                start: range.start.clone(),
                end,
            }),
        }
    }
}
