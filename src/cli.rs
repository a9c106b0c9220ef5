//! Command-line interface
//!
//! Client subcommands talk to a running API server and render the same
//! views the browser dashboard shows: the paginated table, the per-bean
//! detail card, summary stats, the class-distribution chart, and the CSV
//! export. `seed` is the exception: it loads rows straight into the
//! database file.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use tracing::info;

use crate::client::BeanClient;
use crate::config::Config;
use crate::error::BeanError;
use crate::store::beans::{self, BeanInput, BeanRecord};
use crate::store::BeanDb;
use crate::view::{
    export, format_number, format_optional, share_percent, ClassCount, PageView, SortDirection,
    SortKey, ViewSession,
};

/// Bar width of the widest class in the terminal chart
const CHART_WIDTH: usize = 40;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API server (the default when no command is given)
    Serve,

    /// List beans as a filtered, sorted, paginated table
    List {
        /// Search term matched against every field
        #[arg(short, long, default_value = "")]
        search: String,

        /// Sort column (id, class, area, perimeter, major_axis, minor_axis)
        #[arg(long, default_value = "id")]
        sort: String,

        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,

        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// Show full details for one bean
    Show {
        /// Bean id
        id: i64,
    },

    /// Add a new bean
    Add {
        #[command(flatten)]
        fields: BeanFields,
    },

    /// Replace all fields of an existing bean
    Edit {
        /// Bean id
        id: i64,

        #[command(flatten)]
        fields: BeanFields,
    },

    /// Delete a bean
    Remove {
        /// Bean id
        id: i64,
    },

    /// Summary statistics over the full dataset
    Stats,

    /// Class-distribution bar chart
    Chart,

    /// Export the dataset to CSV
    Export {
        /// Output file (defaults to beans_export_<date>.csv)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Bulk-load beans from a CSV file directly into the database
    Seed {
        /// CSV file with the export column layout
        #[arg(short, long)]
        file: PathBuf,
    },
}

/// Bean fields shared by add and edit
#[derive(Debug, Args)]
pub struct BeanFields {
    #[arg(long = "class", help = class_help())]
    pub bean_class: String,

    #[arg(long)]
    pub area: f64,

    #[arg(long)]
    pub perimeter: f64,

    #[arg(long = "major-axis")]
    pub major_axis_length: f64,

    #[arg(long = "minor-axis")]
    pub minor_axis_length: f64,

    #[arg(long)]
    pub aspect_ratio: Option<f64>,
    #[arg(long)]
    pub eccentricity: Option<f64>,
    #[arg(long)]
    pub convex_area: Option<f64>,
    #[arg(long)]
    pub equiv_diameter: Option<f64>,
    #[arg(long)]
    pub extent: Option<f64>,
    #[arg(long)]
    pub solidity: Option<f64>,
    #[arg(long)]
    pub roundness: Option<f64>,
    #[arg(long)]
    pub compactness: Option<f64>,
    #[arg(long)]
    pub shape_factor1: Option<f64>,
    #[arg(long)]
    pub shape_factor2: Option<f64>,
    #[arg(long)]
    pub shape_factor3: Option<f64>,
    #[arg(long)]
    pub shape_factor4: Option<f64>,

    /// Image URL for the detail view
    #[arg(long)]
    pub image_url: Option<String>,
}

/// Help text for `--class`, listing the dataset's known classes
fn class_help() -> String {
    format!("Bean class ({})", beans::BEAN_CLASSES.join(", "))
}

impl BeanFields {
    fn into_input(self) -> BeanInput {
        BeanInput {
            bean_class: self.bean_class,
            area: self.area,
            perimeter: self.perimeter,
            major_axis_length: self.major_axis_length,
            minor_axis_length: self.minor_axis_length,
            aspect_ratio: self.aspect_ratio,
            eccentricity: self.eccentricity,
            convex_area: self.convex_area,
            equiv_diameter: self.equiv_diameter,
            extent: self.extent,
            solidity: self.solidity,
            roundness: self.roundness,
            compactness: self.compactness,
            shape_factor1: self.shape_factor1,
            shape_factor2: self.shape_factor2,
            shape_factor3: self.shape_factor3,
            shape_factor4: self.shape_factor4,
            image_url: self.image_url,
        }
    }
}

/// Execute a client command and return its printable output
pub async fn execute_command(config: &Config, command: Commands) -> Result<String, BeanError> {
    let client = BeanClient::new(config.client.api_url.clone());
    let mut session = ViewSession::new(client);

    match command {
        Commands::Serve => Err(BeanError::Internal(
            "serve is handled by the main loop".to_string(),
        )),

        Commands::List {
            search,
            sort,
            desc,
            page,
        } => {
            let sort_key: SortKey = sort.parse().map_err(BeanError::Validation)?;

            session.reload().await?;
            session.state.set_search(search);
            session.state.sort_key = sort_key;
            session.state.sort_dir = if desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            session.state.set_page(page);

            Ok(render_table(&session.page()))
        }

        Commands::Show { id } => {
            let bean = session.fetch(id).await?;
            Ok(render_detail(&bean))
        }

        Commands::Add { fields } => {
            let bean = session.create(&fields.into_input()).await?;
            Ok(format!("Added bean {} ({})", bean.id, bean.bean_class))
        }

        Commands::Edit { id, fields } => {
            let bean = session.update(id, &fields.into_input()).await?;
            Ok(format!("Updated bean {} ({})", bean.id, bean.bean_class))
        }

        Commands::Remove { id } => {
            session.delete(id).await?;
            Ok(format!("Deleted bean {}", id))
        }

        Commands::Stats => {
            session.reload().await?;
            let stats = session.stats();
            Ok(format!(
                "Total beans:       {}\nDistinct classes:  {}\nAverage area:      {}\nAverage perimeter: {}",
                stats.total_beans,
                stats.distinct_classes,
                format_optional(stats.avg_area),
                format_optional(stats.avg_perimeter),
            ))
        }

        Commands::Chart => {
            session.reload().await?;
            let dist = session.class_distribution();
            Ok(render_chart(&dist, session.cache().len()))
        }

        Commands::Export { out } => {
            session.reload().await?;
            let csv = session.export_csv()?;
            let path = out.unwrap_or_else(|| PathBuf::from(export::default_filename()));
            std::fs::write(&path, csv)?;
            Ok(format!(
                "Exported {} beans to {}",
                session.cache().len(),
                path.display()
            ))
        }

        Commands::Seed { file } => {
            let inputs = read_seed_file(&file)?;
            let db = BeanDb::open(&config.database.path)?;
            let result = db.with_conn_mut(|conn| beans::bulk_create_beans(conn, inputs))?;
            info!(inserted = result.inserted, "Seed complete");

            let mut out = format!("Inserted {} beans", result.inserted);
            for error in &result.errors {
                out.push_str(&format!("\nskipped {}", error));
            }
            Ok(out)
        }
    }
}

/// Parse a seed CSV with the export column layout. An ID column is accepted
/// and ignored; the store assigns fresh ids.
fn read_seed_file(path: &Path) -> Result<Vec<BeanInput>, BeanError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let column = |names: &[&str]| -> Option<usize> {
        headers.iter().position(|h| {
            names
                .iter()
                .any(|n| h.trim().eq_ignore_ascii_case(n))
        })
    };

    let class_col = column(&["Bean Class", "bean_class"])
        .ok_or_else(|| BeanError::Validation("seed file has no Bean Class column".to_string()))?;
    let area_col = column(&["Area"])
        .ok_or_else(|| BeanError::Validation("seed file has no Area column".to_string()))?;
    let perimeter_col = column(&["Perimeter"])
        .ok_or_else(|| BeanError::Validation("seed file has no Perimeter column".to_string()))?;
    let major_col = column(&["Major Axis Length", "major_axis_length"]).ok_or_else(|| {
        BeanError::Validation("seed file has no Major Axis Length column".to_string())
    })?;
    let minor_col = column(&["Minor Axis Length", "minor_axis_length"]).ok_or_else(|| {
        BeanError::Validation("seed file has no Minor Axis Length column".to_string())
    })?;

    let mut inputs = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let number = |col: usize| -> Result<f64, BeanError> {
            record
                .get(col)
                .unwrap_or("")
                .trim()
                .parse::<f64>()
                .map_err(|_| {
                    BeanError::Validation(format!("row {}: not a number", index + 2))
                })
        };

        inputs.push(BeanInput {
            bean_class: record.get(class_col).unwrap_or("").trim().to_string(),
            area: number(area_col)?,
            perimeter: number(perimeter_col)?,
            major_axis_length: number(major_col)?,
            minor_axis_length: number(minor_col)?,
            ..Default::default()
        });
    }

    Ok(inputs)
}

fn render_table(page: &PageView) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:>6}  {:<10} {:>14} {:>14} {:>14} {:>14}\n",
        "ID", "Class", "Area", "Perimeter", "Major Axis", "Minor Axis"
    ));

    for bean in &page.rows {
        out.push_str(&format!(
            "{:>6}  {:<10} {:>14} {:>14} {:>14} {:>14}\n",
            bean.id,
            bean.bean_class,
            format_number(bean.area),
            format_number(bean.perimeter),
            format_number(bean.major_axis_length),
            format_number(bean.minor_axis_length),
        ));
    }

    out.push_str(&format!(
        "\nShowing {} of {} entries (page {} of {})",
        page.rows.len(),
        page.total_rows,
        page.page,
        page.total_pages
    ));

    if page.has_prev() || page.has_next() {
        out.push_str(&format!(
            "  [{}prev | next{}]",
            if page.has_prev() { "<" } else { " " },
            if page.has_next() { ">" } else { " " }
        ));
    }

    out
}

fn render_detail(bean: &BeanRecord) -> String {
    let mut out = String::new();

    out.push_str(&format!("Bean #{}\n", bean.id));
    out.push_str(&format!("  Class:             {}\n", bean.bean_class));
    out.push_str(&format!(
        "  Area:              {}\n",
        format_number(bean.area)
    ));
    out.push_str(&format!(
        "  Perimeter:         {}\n",
        format_number(bean.perimeter)
    ));
    out.push_str(&format!(
        "  Major axis length: {}\n",
        format_number(bean.major_axis_length)
    ));
    out.push_str(&format!(
        "  Minor axis length: {}\n",
        format_number(bean.minor_axis_length)
    ));

    let extended = [
        ("Aspect ratio", bean.aspect_ratio),
        ("Eccentricity", bean.eccentricity),
        ("Convex area", bean.convex_area),
        ("Equiv diameter", bean.equiv_diameter),
        ("Extent", bean.extent),
        ("Solidity", bean.solidity),
        ("Roundness", bean.roundness),
        ("Compactness", bean.compactness),
        ("Shape factor 1", bean.shape_factor1),
        ("Shape factor 2", bean.shape_factor2),
        ("Shape factor 3", bean.shape_factor3),
        ("Shape factor 4", bean.shape_factor4),
    ];
    for (label, value) in extended {
        out.push_str(&format!("  {:<18} {}\n", format!("{}:", label), format_optional(value)));
    }

    if let Some(url) = &bean.image_url {
        out.push_str(&format!("  Image:             {}\n", url));
    }
    out.push_str(&format!("  Created:           {}\n", bean.created_at));
    out.push_str(&format!("  Updated:           {}", bean.updated_at));

    out
}

fn render_chart(dist: &[ClassCount], total: usize) -> String {
    if dist.is_empty() {
        return "No beans in database".to_string();
    }

    let max = dist.iter().map(|c| c.count).max().unwrap_or(0);
    let mut out = String::new();

    for entry in dist {
        let width = if max == 0 {
            0
        } else {
            (entry.count * CHART_WIDTH).div_ceil(max)
        };
        out.push_str(&format!(
            "{:<10} {} {} ({:.1}%)\n",
            entry.label,
            "#".repeat(width),
            entry.count,
            share_percent(entry.count, total)
        ));
    }

    out.pop();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::pipeline;

    fn bean(id: i64, class: &str) -> BeanRecord {
        BeanRecord {
            id,
            bean_class: class.to_string(),
            area: 28395.0,
            perimeter: 610.291,
            major_axis_length: 208.178,
            minor_axis_length: 173.889,
            aspect_ratio: None,
            eccentricity: None,
            convex_area: None,
            equiv_diameter: None,
            extent: None,
            solidity: None,
            roundness: None,
            compactness: None,
            shape_factor1: None,
            shape_factor2: None,
            shape_factor3: None,
            shape_factor4: None,
            image_url: None,
            created_at: "2026-01-01 00:00:00.000".to_string(),
            updated_at: "2026-01-01 00:00:00.000".to_string(),
        }
    }

    #[test]
    fn class_help_lists_every_known_class() {
        let help = class_help();
        for class in beans::BEAN_CLASSES {
            assert!(help.contains(class), "help text missing {}", class);
        }
    }

    #[test]
    fn table_reports_visible_and_total_counts() {
        let cache: Vec<_> = (1..=25).map(|i| bean(i, "SEKER")).collect();
        let view = pipeline::paginate(cache, 3);
        let table = render_table(&view);
        assert!(table.contains("Showing 5 of 25 entries (page 3 of 3)"));
    }

    #[test]
    fn chart_shows_counts_and_shares() {
        let dist = vec![
            ClassCount { label: "SEKER".into(), count: 3 },
            ClassCount { label: "BOMBAY".into(), count: 1 },
        ];
        let chart = render_chart(&dist, 4);
        assert!(chart.contains("SEKER"));
        assert!(chart.contains("3 (75.0%)"));
        assert!(chart.contains("1 (25.0%)"));
    }

    #[test]
    fn detail_marks_missing_descriptors() {
        let detail = render_detail(&bean(1, "SEKER"));
        assert!(detail.contains("Bean #1"));
        assert!(detail.contains("28,395.00"));
        assert!(detail.contains("N/A"));
    }
}
