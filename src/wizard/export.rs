use chrono::Local;
use log::info;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use snafu::{ensure, ResultExt};

use std::path::Path;

use stakeholder_rating::{Quadrant, ResponseRecord, INTEREST_QUESTIONS, POWER_QUESTIONS};

use crate::wizard::{EmptyExportSnafu, WizardResult, WritingExcelSnafu};

pub const BASE_COLUMNS: [&str; 7] = [
    "Organisation",
    "Rater_Name",
    "Sector",
    "Subject_Area",
    "Type_of_Organisation",
    "Geographical_Scope",
    "Description",
];

pub const DERIVED_COLUMNS: [&str; 5] = [
    "Power_Score",
    "Interest_Score",
    "Combined_Average_Score",
    "Combined_Total_Score",
    "Strategic_Engagement_Quadrant",
];

const QUESTION_COUNT: usize = POWER_QUESTIONS.len() + INTEREST_QUESTIONS.len();
const COLUMN_COUNT: usize = BASE_COLUMNS.len() + QUESTION_COUNT + DERIVED_COLUMNS.len();

/// The artifact name embeds a minute-resolution timestamp so that repeated
/// downloads do not collide.
pub fn timestamped_file_name(prefix: &str) -> String {
    format!("{}_{}.xlsx", prefix, Local::now().format("%Y%m%d_%H%M"))
}

/// Writes the two-sheet ratings workbook. Refuses to produce an artifact
/// for an empty record sequence.
pub fn write_ratings_workbook(records: &[ResponseRecord], path: &Path) -> WizardResult<()> {
    ensure!(!records.is_empty(), EmptyExportSnafu);
    let mut workbook = Workbook::new();
    fill_workbook(&mut workbook, records).context(WritingExcelSnafu {
        path: path.display().to_string(),
    })?;
    workbook.save(path).context(WritingExcelSnafu {
        path: path.display().to_string(),
    })?;
    info!(
        "write_ratings_workbook: {} records written to {}",
        records.len(),
        path.display()
    );
    Ok(())
}

fn fill_workbook(workbook: &mut Workbook, records: &[ResponseRecord]) -> Result<(), XlsxError> {
    let header_format = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Ratings")?;
    let mut col: u16 = 0;
    for name in BASE_COLUMNS {
        sheet.write_string_with_format(0, col, name, &header_format)?;
        col += 1;
    }
    for q in POWER_QUESTIONS.iter().chain(INTEREST_QUESTIONS.iter()) {
        sheet.write_string_with_format(0, col, q.id, &header_format)?;
        col += 1;
    }
    for name in DERIVED_COLUMNS {
        sheet.write_string_with_format(0, col, name, &header_format)?;
        col += 1;
    }
    for (row_idx, record) in records.iter().enumerate() {
        write_record(sheet, (row_idx + 1) as u32, record)?;
    }

    let legend = workbook.add_worksheet();
    legend.set_name("Quadrant Mapping")?;
    legend.write_string_with_format(0, 0, "Strategic Quadrant", &header_format)?;
    legend.write_string_with_format(0, 1, "Score (Combined Avg)", &header_format)?;
    for (idx, quadrant) in Quadrant::ALL.iter().enumerate() {
        let row = (idx + 1) as u32;
        legend.write_string(row, 0, quadrant.label())?;
        legend.write_string(row, 1, quadrant.score_range())?;
    }
    Ok(())
}

fn write_record(sheet: &mut Worksheet, row: u32, record: &ResponseRecord) -> Result<(), XlsxError> {
    sheet.write_string(row, 0, &record.organisation)?;
    sheet.write_string(row, 1, &record.rater_name)?;
    match &record.fields {
        Some(fields) => {
            sheet.write_string(row, 2, &fields.sector)?;
            sheet.write_string(row, 3, &fields.subject_area)?;
            sheet.write_string(row, 4, &fields.organisation_type)?;
            sheet.write_string(row, 5, &fields.geographical_scope)?;
            sheet.write_string(row, 6, &fields.description)?;
            let mut col: u16 = BASE_COLUMNS.len() as u16;
            for (_, raw) in fields.answers.iter() {
                sheet.write_string(row, col, raw)?;
                col += 1;
            }
            write_opt_number(sheet, row, col, fields.power_score)?;
            write_opt_number(sheet, row, col + 1, fields.interest_score)?;
            write_opt_number(sheet, row, col + 2, fields.combined_average)?;
            write_opt_number(sheet, row, col + 3, fields.combined_total)?;
            let label = fields.quadrant.map(|q| q.label()).unwrap_or("");
            sheet.write_string(row, col + 4, label)?;
        }
        None => {
            // Skipped organisation: every column still present, all blank.
            for col in 2..COLUMN_COUNT as u16 {
                sheet.write_string(row, col, "")?;
            }
        }
    }
    Ok(())
}

fn write_opt_number(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<f64>,
) -> Result<(), XlsxError> {
    match value {
        Some(v) => sheet.write_number(row, col, v)?,
        None => sheet.write_string(row, col, "")?,
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::WizardError;
    use calamine::{open_workbook, DataType, Reader, Xlsx};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use stakeholder_rating::{Submission, Wizard};

    fn cell_text(cell: &DataType) -> String {
        match cell {
            DataType::String(s) => s.clone(),
            DataType::Float(f) => format!("{}", f),
            DataType::Int(i) => i.to_string(),
            DataType::Empty => String::new(),
            other => format!("{:?}", other),
        }
    }

    fn submission(value: &str) -> Submission {
        let mut answers: HashMap<String, String> = HashMap::new();
        for q in POWER_QUESTIONS.iter().chain(INTEREST_QUESTIONS.iter()) {
            answers.insert(q.id.to_string(), value.to_string());
        }
        Submission {
            sector: "Third Sector".to_string(),
            subject_area: "Food".to_string(),
            organisation_type: "Charity/Not for Profit".to_string(),
            geographical_scope: "Regional".to_string(),
            description: "A community group.".to_string(),
            answers,
        }
    }

    fn sample_records() -> Vec<ResponseRecord> {
        let orgs = vec!["Alpha".to_string(), "Beta".to_string(), "Gamma".to_string()];
        let mut wizard = Wizard::new(orgs).unwrap();
        wizard.start("Jo");
        wizard.skip().unwrap();
        wizard.submit(&submission("8")).unwrap();
        wizard.submit(&submission("5")).unwrap();
        wizard.session().records().to_vec()
    }

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("stakerate_export_tests");
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn empty_session_is_refused() {
        let err = write_ratings_workbook(&[], &temp_path("never_written.xlsx")).unwrap_err();
        assert!(matches!(err, WizardError::EmptyExport {}));
    }

    #[test]
    fn file_name_embeds_a_minute_timestamp() {
        let name = timestamped_file_name("stakeholder_ratings");
        assert!(name.starts_with("stakeholder_ratings_"));
        assert!(name.ends_with(".xlsx"));
        // prefix + _YYYYMMDD_HHMM + extension
        assert_eq!(name.len(), "stakeholder_ratings_".len() + 13 + ".xlsx".len());
    }

    #[test]
    fn workbook_round_trip() {
        let path = temp_path("round_trip.xlsx");
        let records = sample_records();
        write_ratings_workbook(&records, &path).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        assert_eq!(
            workbook.sheet_names().to_vec(),
            vec!["Ratings".to_string(), "Quadrant Mapping".to_string()]
        );

        let ratings = workbook.worksheet_range("Ratings").unwrap().unwrap();
        let rows: Vec<Vec<String>> = ratings
            .rows()
            .map(|r| r.iter().map(cell_text).collect())
            .collect();
        // Header plus one row per record.
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].len(), COLUMN_COUNT);
        assert_eq!(rows[0][0], "Organisation");
        assert_eq!(rows[0][7], "p_influence");
        assert_eq!(rows[0][COLUMN_COUNT - 1], "Strategic_Engagement_Quadrant");

        // The skipped record only carries the two name columns.
        assert_eq!(rows[1][0], "Alpha");
        assert_eq!(rows[1][1], "Jo");
        assert_eq!(rows[1][2], "");
        assert_eq!(rows[1][COLUMN_COUNT - 1], "");

        // Rated records carry scores and quadrants in processing order.
        assert_eq!(rows[2][0], "Beta");
        assert_eq!(rows[2][COLUMN_COUNT - 5], "8");
        assert_eq!(rows[2][COLUMN_COUNT - 1], "Manage Closely");
        assert_eq!(rows[3][0], "Gamma");
        assert_eq!(rows[3][COLUMN_COUNT - 2], "10");
        assert_eq!(rows[3][COLUMN_COUNT - 1], "Keep Informed");

        let legend = workbook.worksheet_range("Quadrant Mapping").unwrap().unwrap();
        let legend_rows: Vec<Vec<String>> = legend
            .rows()
            .map(|r| r.iter().map(cell_text).collect())
            .collect();
        assert_eq!(legend_rows.len(), 5);
        assert_eq!(legend_rows[1], vec!["Manage Closely".to_string(), "8–10".to_string()]);
        assert_eq!(legend_rows[4], vec!["Monitor".to_string(), "<3".to_string()]);
    }
}
