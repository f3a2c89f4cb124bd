use log::{debug, info};

use snafu::{ensure, OptionExt, ResultExt};

use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::wizard::{EmptyExcelSnafu, NoOrganisationsSnafu, OpeningExcelSnafu, WizardResult};

/// Ordered fallback for locating the organisation-name column in the header
/// row. The first header cell that matches one of these labels wins; when
/// none matches, the first column is used.
pub const ORGANISATION_COLUMN_PRIORITY: [&str; 2] = ["Organisation Names", "Organisation"];

/// Reads the organisation list, once, at startup.
///
/// The rest of the program only ever sees the returned ordered list of
/// names: empty cells are dropped, other cells are coerced to text and the
/// source row order is preserved.
pub fn read_organisations(path: &str, worksheet_name: Option<&str>) -> WizardResult<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = match worksheet_name {
        Some(name) => workbook
            .worksheet_range(name)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })?,
    };

    let header = wrange.rows().next().context(EmptyExcelSnafu { path })?;
    debug!("read_organisations: header: {:?}", header);
    let col = organisation_column(header);
    debug!("read_organisations: using column {}", col);

    let mut iter = wrange.rows();
    iter.next();
    let mut orgs: Vec<String> = Vec::new();
    for row in iter {
        if let Some(name) = cell_to_text(row.get(col)) {
            if !name.is_empty() {
                orgs.push(name);
            }
        }
    }
    ensure!(!orgs.is_empty(), NoOrganisationsSnafu { path });
    info!("read_organisations: {} names read from {}", orgs.len(), path);
    Ok(orgs)
}

fn organisation_column(header: &[DataType]) -> usize {
    for wanted in ORGANISATION_COLUMN_PRIORITY {
        let found = header
            .iter()
            .position(|cell| matches!(cell, DataType::String(s) if s == wanted));
        if let Some(idx) = found {
            return idx;
        }
    }
    0
}

fn cell_to_text(cell: Option<&DataType>) -> Option<String> {
    match cell? {
        DataType::String(s) => Some(s.trim().to_string()),
        DataType::Float(f) => Some(format!("{}", f)),
        DataType::Int(i) => Some(i.to_string()),
        DataType::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
