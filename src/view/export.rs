//! CSV export of the cached dataset

use chrono::NaiveDate;

use crate::error::BeanError;
use crate::store::beans::BeanRecord;

/// Export column headers, in table order
pub const CSV_HEADERS: [&str; 6] = [
    "ID",
    "Bean Class",
    "Area",
    "Perimeter",
    "Major Axis Length",
    "Minor Axis Length",
];

/// Render the cache as CSV, one row per record in cache order (not the
/// filtered/sorted view). Values are raw, not display-formatted.
pub fn export_csv(cache: &[BeanRecord]) -> Result<String, BeanError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;
    for bean in cache {
        writer.write_record(&[
            bean.id.to_string(),
            bean.bean_class.clone(),
            bean.area.to_string(),
            bean.perimeter.to_string(),
            bean.major_axis_length.to_string(),
            bean.minor_axis_length.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| BeanError::Internal(format!("CSV flush failed: {}", e)))?;

    String::from_utf8(bytes).map_err(|e| BeanError::Internal(format!("CSV not UTF-8: {}", e)))
}

/// Export filename stamped with a date
pub fn export_filename(date: NaiveDate) -> String {
    format!("beans_export_{}.csv", date.format("%Y-%m-%d"))
}

/// Default export filename, stamped with today's local date
pub fn default_filename() -> String {
    export_filename(chrono::Local::now().date_naive())
}
