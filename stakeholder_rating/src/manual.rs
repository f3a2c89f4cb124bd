/*!

This is the long-form manual for `stakeholder_rating` and `stakerate`.

## The flow

A run walks one rater through a fixed list of organisations. For every
organisation the rater either skips it or fills in a full rating:

* four categorical selections (sector, subject area, organisation type,
  geographical scope),
* one answer per Likert question (4 Power questions, 6 Interest questions,
  each on a 1-10 scale),
* an optional free-text description.

A submission with any required field left blank is re-displayed with the
entered values preserved; nothing is recorded and the cursor does not move.
A skip records a row holding only the organisation and rater names.

Once the last organisation is processed the session is complete and the
results are exported as an Excel workbook.

## Scoring

For each rated organisation:

* `Power_Score` is the mean of the Power answers that parse as numbers;
* `Interest_Score` is the mean of the parseable Interest answers;
* `Combined_Average_Score` and `Combined_Total_Score` are the mean and sum
  of the two axis scores, and are only defined when both axes are;
* the `Strategic_Engagement_Quadrant` is derived from the combined average:

|Combined average|Quadrant|
|---|---|
| 8-10 | Manage Closely |
| 6-<8 | Keep Satisfied |
| 3-<6 | Keep Informed |
| <3 | Monitor |

An answer that does not parse as a number is quietly excluded from the
mean. All stored scores are rounded to 2 decimal places.

## Input format

The organisation list is read from an Excel (.xlsx) workbook, one
organisation name per row. The reader looks for a header column named
`Organisation Names`, then `Organisation`, and otherwise falls back to the
first column. Empty cells are dropped and the row order of the file is the
presentation order of the wizard.

## Output format

The export is a two-sheet workbook named
`<prefix>_<YYYYMMDD_HHMM>.xlsx`:

* `Ratings` holds one row per organisation with the categorical fields,
  the raw answers (one column per question id) and the five derived
  fields. Skipped organisations keep every column present with blank
  values.
* `Quadrant Mapping` is a fixed four-row legend mapping each quadrant to
  its combined-average range.

Exporting is refused when the session holds no records.

## Configuration

`stakerate` accepts a configuration file in JSON with the following
optional keys, all overridable on the command line:

* `organisationsFile` (string): path of the organisation list workbook.
* `excelWorksheetName` (string): the worksheet holding the organisation
  names. The first worksheet is used when not provided.
* `outputDirectory` (string): where the export is written.
* `filePrefix` (string): the file-name prefix of the export.
* `raterName` (string): skips the rater-name prompt.

*/
