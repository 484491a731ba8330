use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Field name the month key is serialized under in dense report records.
/// Chart consumers use it as the x-axis data key.
pub const MONTH_KEY_FIELD: &str = "yearMonth";

/// Calendar month in canonical `YYYY-MM` form.
///
/// Ordering is chronological, which is also the lexicographic order of the
/// rendered keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Build a month key; `None` unless the year renders as four digits and
    /// the month is 1-12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(0..=9999).contains(&year) || !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }

    /// Month containing the given date; `None` for years outside 0-9999
    pub fn from_date(date: NaiveDate) -> Option<Self> {
        Self::new(date.year(), date.month())
    }

    /// Strict parse of a `YYYY-MM` string. Anything else (including
    /// `YYYY-M`, trailing days, or whitespace) is rejected.
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return None;
        }
        if !bytes[..4].iter().chain(&bytes[5..]).all(u8::is_ascii_digit) {
            return None;
        }
        let year = s[..4].parse::<i32>().ok()?;
        let month = s[5..].parse::<u32>().ok()?;
        Self::new(year, month)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Shift by a signed number of months
    pub fn offset(&self, months: i32) -> Option<Self> {
        let index = self.year as i64 * 12 + (self.month as i64 - 1) + months as i64;
        let year = index.div_euclid(12);
        let month = index.rem_euclid(12) + 1;
        Self::new(i32::try_from(year).ok()?, month as u32)
    }

    pub fn next(&self) -> Option<Self> {
        self.offset(1)
    }

    pub fn previous(&self) -> Option<Self> {
        self.offset(-1)
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        match self.next() {
            Some(next) => next.first_day()?.pred_opt(),
            // December 9999 has no successor key
            None => NaiveDate::from_ymd_opt(self.year, 12, 31),
        }
    }

    /// Whether a date falls inside this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = MonthKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| MonthKeyParseError(s.to_string()))
    }
}

impl TryFrom<String> for MonthKey {
    type Error = MonthKeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthKeyParseError(pub String);

impl fmt::Display for MonthKeyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid month key '{}', expected YYYY-MM", self.0)
    }
}

impl std::error::Error for MonthKeyParseError {}

/// Identifier of a pivot dimension: numeric for expense categories, text for
/// book genres
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DimensionKey {
    Id(i64),
    Name(String),
}

impl fmt::Display for DimensionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionKey::Id(id) => write!(f, "{}", id),
            DimensionKey::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<i64> for DimensionKey {
    fn from(id: i64) -> Self {
        DimensionKey::Id(id)
    }
}

impl From<i32> for DimensionKey {
    fn from(id: i32) -> Self {
        DimensionKey::Id(id as i64)
    }
}

impl From<&str> for DimensionKey {
    fn from(name: &str) -> Self {
        DimensionKey::Name(name.to_string())
    }
}

impl From<String> for DimensionKey {
    fn from(name: String) -> Self {
        DimensionKey::Name(name)
    }
}

/// A secondary grouping axis (expense category, book genre).
/// The display name becomes a field key of every dense record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    pub id: DimensionKey,
    #[serde(alias = "name")]
    pub display_name: String,
}

impl Dimension {
    pub fn new(id: impl Into<DimensionKey>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// One row of a month-by-dimension reporting query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAggregateRow {
    /// Month bucket, expected as `YYYY-MM`
    #[serde(alias = "yearMonth")]
    pub bucket_key: String,
    #[serde(alias = "categoryId", alias = "genre")]
    pub dimension_key: DimensionKey,
    #[serde(alias = "price", alias = "count")]
    pub value: f64,
}

impl RawAggregateRow {
    pub fn new(bucket_key: impl Into<String>, dimension_key: impl Into<DimensionKey>, value: f64) -> Self {
        Self {
            bucket_key: bucket_key.into(),
            dimension_key: dimension_key.into(),
            value,
        }
    }
}

/// One row of a single-series monthly query (books read, total spend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCountRow {
    #[serde(alias = "bucketKey")]
    pub year_month: String,
    #[serde(alias = "price", alias = "total", alias = "value")]
    pub count: f64,
}

impl MonthlyCountRow {
    pub fn new(year_month: impl Into<String>, count: f64) -> Self {
        Self {
            year_month: year_month.into(),
            count,
        }
    }
}

/// Expense sum for a single day (`YYYY-MM-DD`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotalRow {
    pub date_used: String,
    pub price: f64,
}

impl DailyTotalRow {
    pub fn new(date_used: impl Into<String>, price: f64) -> Self {
        Self {
            date_used: date_used.into(),
            price,
        }
    }
}

/// One gap-filled month: the month key plus one value per active dimension.
///
/// Serialized flat, e.g. `{"yearMonth":"2024-01","Food":500.0,"Transport":0.0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseReportRecord {
    #[serde(rename = "yearMonth")]
    pub month_key: MonthKey,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl DenseReportRecord {
    pub fn get(&self, display_name: &str) -> Option<f64> {
        self.values.get(display_name).copied()
    }

    /// Number of fields the record carries when serialized (dimensions plus
    /// the month key)
    pub fn field_count(&self) -> usize {
        self.values.len() + 1
    }

    /// Sum across all dimensions of this month
    pub fn total(&self) -> f64 {
        self.values.values().sum()
    }
}

/// One gap-filled month of a single-series report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    #[serde(rename = "yearMonth")]
    pub month_key: MonthKey,
    pub value: f64,
}

/// Which reporting query a request is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    /// Expense sum per (month, category)
    SpendingByCategoryByMonth,
    /// Books read per month
    BookCountByMonth,
    /// Expense sum per month
    SpendingTotalByMonth,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportKind::SpendingByCategoryByMonth => "spending-by-category-by-month",
            ReportKind::BookCountByMonth => "book-count-by-month",
            ReportKind::SpendingTotalByMonth => "spending-total-by-month",
        };
        f.write_str(name)
    }
}

/// First day of the week for calendar grids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(&self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }
}

/// Configuration for report generation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Trailing months ending at the anchor month, inclusive
    pub window_size: u32,
    /// Append the month after the anchor to every window
    pub include_next_month: bool,
    pub week_starts_on: WeekStart,
    pub currency_symbol: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            window_size: 12,
            include_next_month: true,
            week_starts_on: WeekStart::Sunday,
            currency_symbol: "₩".to_string(),
        }
    }
}

/// Request for a monthly report. Unset fields fall back to `ReportConfig`
/// and the current date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub anchor: Option<NaiveDate>,
    pub window_size: Option<u32>,
    pub include_next_month: Option<bool>,
}

/// Month-by-category report ready for a stacked bar chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReportResponse {
    pub kind: ReportKind,
    pub window: Vec<MonthKey>,
    pub dimensions: Vec<Dimension>,
    pub records: Vec<DenseReportRecord>,
    /// Month containing the anchor date
    pub current_month: MonthKey,
    pub current_month_total: f64,
    pub year_to_date_total: f64,
    /// Per-dimension sum across the whole window
    pub dimension_totals: BTreeMap<String, f64>,
}

/// Single-series monthly report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesReportResponse {
    pub kind: ReportKind,
    pub window: Vec<MonthKey>,
    pub points: Vec<SeriesPoint>,
    pub current_month: MonthKey,
    pub current_month_total: f64,
    pub year_to_date_total: f64,
}

/// Per-day expense totals covering a month's calendar grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCalendarResponse {
    pub month: MonthKey,
    pub range_start: NaiveDate,
    pub range_end: NaiveDate,
    pub daily_totals: BTreeMap<NaiveDate, f64>,
    /// Sum of the days inside `month` only (padding days excluded)
    pub month_total: f64,
}

/// How far through the calendar year a moment is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearProgress {
    pub year: i32,
    /// Elapsed share of the year in percent, two decimals
    pub percentage: f64,
    pub elapsed_days: i64,
    pub remaining_days: i64,
}
