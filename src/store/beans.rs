//! Bean CRUD operations

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::error::BeanError;

/// Known bean classes in the dataset. Listed in CLI help, not enforced by
/// the store.
pub const BEAN_CLASSES: [&str; 7] = [
    "DERMASON", "SIRA", "SEKER", "HOROZ", "CALI", "BARBUNYA", "BOMBAY",
];

/// One dry-bean sample as stored in the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeanRecord {
    pub id: i64,
    pub bean_class: String,

    pub area: f64,
    pub perimeter: f64,
    pub major_axis_length: f64,
    pub minor_axis_length: f64,

    pub aspect_ratio: Option<f64>,
    pub eccentricity: Option<f64>,
    pub convex_area: Option<f64>,
    pub equiv_diameter: Option<f64>,
    pub extent: Option<f64>,
    pub solidity: Option<f64>,
    pub roundness: Option<f64>,
    pub compactness: Option<f64>,
    pub shape_factor1: Option<f64>,
    pub shape_factor2: Option<f64>,
    pub shape_factor3: Option<f64>,
    pub shape_factor4: Option<f64>,

    pub image_url: Option<String>,

    pub created_at: String,
    pub updated_at: String,
}

impl BeanRecord {
    fn from_row(row: &Row) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            bean_class: row.get("bean_class")?,
            area: row.get("area")?,
            perimeter: row.get("perimeter")?,
            major_axis_length: row.get("major_axis_length")?,
            minor_axis_length: row.get("minor_axis_length")?,
            aspect_ratio: row.get("aspect_ratio")?,
            eccentricity: row.get("eccentricity")?,
            convex_area: row.get("convex_area")?,
            equiv_diameter: row.get("equiv_diameter")?,
            extent: row.get("extent")?,
            solidity: row.get("solidity")?,
            roundness: row.get("roundness")?,
            compactness: row.get("compactness")?,
            shape_factor1: row.get("shape_factor1")?,
            shape_factor2: row.get("shape_factor2")?,
            shape_factor3: row.get("shape_factor3")?,
            shape_factor4: row.get("shape_factor4")?,
            image_url: row.get("image_url")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// Input for creating or replacing a bean; the store assigns id and timestamps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeanInput {
    pub bean_class: String,

    pub area: f64,
    pub perimeter: f64,
    pub major_axis_length: f64,
    pub minor_axis_length: f64,

    #[serde(default)]
    pub aspect_ratio: Option<f64>,
    #[serde(default)]
    pub eccentricity: Option<f64>,
    #[serde(default)]
    pub convex_area: Option<f64>,
    #[serde(default)]
    pub equiv_diameter: Option<f64>,
    #[serde(default)]
    pub extent: Option<f64>,
    #[serde(default)]
    pub solidity: Option<f64>,
    #[serde(default)]
    pub roundness: Option<f64>,
    #[serde(default)]
    pub compactness: Option<f64>,
    #[serde(default)]
    pub shape_factor1: Option<f64>,
    #[serde(default)]
    pub shape_factor2: Option<f64>,
    #[serde(default)]
    pub shape_factor3: Option<f64>,
    #[serde(default)]
    pub shape_factor4: Option<f64>,

    #[serde(default)]
    pub image_url: Option<String>,
}

impl BeanInput {
    /// Presence and NaN check on the required fields. Runs on the client
    /// before submission and on the server before any write.
    pub fn validate(&self) -> Result<(), BeanError> {
        if self.bean_class.trim().is_empty() {
            return Err(BeanError::Validation("bean_class is required".to_string()));
        }

        let core = [
            ("area", self.area),
            ("perimeter", self.perimeter),
            ("major_axis_length", self.major_axis_length),
            ("minor_axis_length", self.minor_axis_length),
        ];
        for (name, value) in core {
            if !value.is_finite() {
                return Err(BeanError::Validation(format!(
                    "{} must be a finite number",
                    name
                )));
            }
        }

        Ok(())
    }
}

/// List all beans in id order
pub fn list_beans(conn: &Connection) -> Result<Vec<BeanRecord>, BeanError> {
    let mut stmt = conn
        .prepare("SELECT * FROM dry_beans ORDER BY id")
        .map_err(|e| BeanError::Database(format!("Prepare failed: {}", e)))?;

    let rows = stmt
        .query_map([], |row| BeanRecord::from_row(row))
        .map_err(|e| BeanError::Database(format!("Query failed: {}", e)))?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| BeanError::Database(format!("Row parse failed: {}", e)))
}

/// Get a bean by id
pub fn get_bean(conn: &Connection, id: i64) -> Result<Option<BeanRecord>, BeanError> {
    let mut stmt = conn
        .prepare("SELECT * FROM dry_beans WHERE id = ?")
        .map_err(|e| BeanError::Database(format!("Prepare failed: {}", e)))?;

    let mut rows = stmt
        .query(params![id])
        .map_err(|e| BeanError::Database(format!("Query failed: {}", e)))?;

    match rows
        .next()
        .map_err(|e| BeanError::Database(format!("Row fetch failed: {}", e)))?
    {
        Some(row) => {
            let bean = BeanRecord::from_row(row)
                .map_err(|e| BeanError::Database(format!("Row parse failed: {}", e)))?;
            Ok(Some(bean))
        }
        None => Ok(None),
    }
}

/// Create a bean; the store assigns the id
pub fn create_bean(conn: &Connection, input: &BeanInput) -> Result<BeanRecord, BeanError> {
    conn.execute(
        r#"
        INSERT INTO dry_beans (
            bean_class, area, perimeter, major_axis_length, minor_axis_length,
            aspect_ratio, eccentricity, convex_area, equiv_diameter,
            extent, solidity, roundness, compactness,
            shape_factor1, shape_factor2, shape_factor3, shape_factor4,
            image_url
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
        params![
            input.bean_class,
            input.area,
            input.perimeter,
            input.major_axis_length,
            input.minor_axis_length,
            input.aspect_ratio,
            input.eccentricity,
            input.convex_area,
            input.equiv_diameter,
            input.extent,
            input.solidity,
            input.roundness,
            input.compactness,
            input.shape_factor1,
            input.shape_factor2,
            input.shape_factor3,
            input.shape_factor4,
            input.image_url,
        ],
    )
    .map_err(|e| BeanError::Database(format!("Insert failed: {}", e)))?;

    let id = conn.last_insert_rowid();

    get_bean(conn, id)?
        .ok_or_else(|| BeanError::Internal("Bean not found after insert".to_string()))
}

/// Replace all fields of a bean. Returns None when the id does not exist.
///
/// This is a full replace, not a merge: optionals absent from the input
/// overwrite stored values with NULL.
pub fn update_bean(
    conn: &Connection,
    id: i64,
    input: &BeanInput,
) -> Result<Option<BeanRecord>, BeanError> {
    let changed = conn
        .execute(
            r#"
            UPDATE dry_beans SET
                bean_class = ?, area = ?, perimeter = ?,
                major_axis_length = ?, minor_axis_length = ?,
                aspect_ratio = ?, eccentricity = ?, convex_area = ?,
                equiv_diameter = ?, extent = ?, solidity = ?,
                roundness = ?, compactness = ?,
                shape_factor1 = ?, shape_factor2 = ?, shape_factor3 = ?, shape_factor4 = ?,
                image_url = ?,
                updated_at = strftime('%Y-%m-%d %H:%M:%f', 'now')
            WHERE id = ?
            "#,
            params![
                input.bean_class,
                input.area,
                input.perimeter,
                input.major_axis_length,
                input.minor_axis_length,
                input.aspect_ratio,
                input.eccentricity,
                input.convex_area,
                input.equiv_diameter,
                input.extent,
                input.solidity,
                input.roundness,
                input.compactness,
                input.shape_factor1,
                input.shape_factor2,
                input.shape_factor3,
                input.shape_factor4,
                input.image_url,
                id,
            ],
        )
        .map_err(|e| BeanError::Database(format!("Update failed: {}", e)))?;

    if changed == 0 {
        Ok(None)
    } else {
        get_bean(conn, id)
    }
}

/// Delete a bean. Returns true when a row was removed.
pub fn delete_bean(conn: &Connection, id: i64) -> Result<bool, BeanError> {
    let changes = conn
        .execute("DELETE FROM dry_beans WHERE id = ?", params![id])
        .map_err(|e| BeanError::Database(format!("Delete failed: {}", e)))?;

    Ok(changes > 0)
}

/// Result of a bulk insert
#[derive(Debug, Clone, Serialize)]
pub struct BulkResult {
    pub inserted: u64,
    pub errors: Vec<String>,
}

/// Bulk insert beans (for seeding). Invalid rows are collected as errors
/// rather than aborting the whole batch.
pub fn bulk_create_beans(
    conn: &mut Connection,
    inputs: Vec<BeanInput>,
) -> Result<BulkResult, BeanError> {
    let tx = conn
        .transaction()
        .map_err(|e| BeanError::Database(format!("Transaction failed: {}", e)))?;

    let mut inserted = 0u64;
    let mut errors = vec![];

    for (index, input) in inputs.into_iter().enumerate() {
        if let Err(e) = input.validate() {
            errors.push(format!("row {}: {}", index + 1, e));
            continue;
        }

        let result = tx.execute(
            r#"
            INSERT INTO dry_beans (
                bean_class, area, perimeter, major_axis_length, minor_axis_length,
                aspect_ratio, eccentricity, convex_area, equiv_diameter,
                extent, solidity, roundness, compactness,
                shape_factor1, shape_factor2, shape_factor3, shape_factor4,
                image_url
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                input.bean_class,
                input.area,
                input.perimeter,
                input.major_axis_length,
                input.minor_axis_length,
                input.aspect_ratio,
                input.eccentricity,
                input.convex_area,
                input.equiv_diameter,
                input.extent,
                input.solidity,
                input.roundness,
                input.compactness,
                input.shape_factor1,
                input.shape_factor2,
                input.shape_factor3,
                input.shape_factor4,
                input.image_url,
            ],
        );

        match result {
            Ok(_) => inserted += 1,
            Err(e) => errors.push(format!("row {}: {}", index + 1, e)),
        }
    }

    tx.commit()
        .map_err(|e| BeanError::Database(format!("Commit failed: {}", e)))?;

    Ok(BulkResult { inserted, errors })
}
