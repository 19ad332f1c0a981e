//! Document reading and writing.
//!
//! Workbooks (`.xlsx`, first worksheet) and UTF-8 CSV files share one
//! [`Document`] model; the format is picked from the file extension. Reading
//! types each cell; writing renders cells back in the same canonical form so a
//! document that was read and written unchanged keeps its cell values. Column
//! order is preserved both ways.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Workbook, XlsxError};

use caseview_model::{CellValue, Document, DocumentFormat, RawRecord, format_numeric};

use crate::error::{IngestError, Result};

/// Largest magnitude below which every integer is exact in an `f64`.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Format of the document at `path`, from its extension.
pub fn document_format(path: &Path) -> Result<DocumentFormat> {
    DocumentFormat::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })
}

/// Reads a single-sheet document with one header row.
///
/// Header names must be unique.
pub fn read_document(path: &Path) -> Result<Document> {
    let format = document_format(path)?;
    let document = match format {
        DocumentFormat::Xlsx => read_xlsx(path)?,
        DocumentFormat::Csv => read_csv(path)?,
    };

    tracing::debug!(
        path = %path.display(),
        format = %format,
        columns = document.columns.len(),
        rows = document.row_count(),
        "read document"
    );
    Ok(document)
}

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Checks a header row and starts a document with it.
fn start_document(path: &Path, columns: Vec<String>) -> Result<Document> {
    if columns.is_empty() || columns.iter().all(|name| name.trim().is_empty()) {
        return Err(IngestError::EmptyDocument {
            path: path.to_path_buf(),
        });
    }
    let document = Document::new(columns);
    check_unique_columns(path, &document)?;
    Ok(document)
}

fn check_unique_columns(path: &Path, document: &Document) -> Result<()> {
    let duplicates = document.duplicate_columns();
    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(IngestError::DuplicateColumns {
            path: path.to_path_buf(),
            columns: duplicates,
        })
    }
}

fn read_csv(path: &Path) -> Result<Document> {
    let file = open_file(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(BufReader::new(file));

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| csv_parse_error(path, &e))?
        .iter()
        .enumerate()
        .map(|(position, name)| {
            // Skip BOM if present
            if position == 0 {
                name.strip_prefix('\u{feff}').unwrap_or(name).to_string()
            } else {
                name.to_string()
            }
        })
        .collect();

    let mut document = start_document(path, columns)?;
    for record_result in reader.records() {
        let record = record_result.map_err(|e| csv_parse_error(path, &e))?;
        let row = RawRecord::from_pairs(
            document
                .columns
                .iter()
                .cloned()
                .zip(record.iter().map(CellValue::parse)),
        );
        document.push_row(row);
    }
    Ok(document)
}

fn read_xlsx(path: &Path) -> Result<Document> {
    let file = open_file(path)?;
    let mut workbook: Xlsx<_> =
        Xlsx::new(BufReader::new(file)).map_err(|e| xlsx_read_error(path, &e))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| xlsx_read_error(path, &e))?,
        None => {
            return Err(IngestError::EmptyDocument {
                path: path.to_path_buf(),
            });
        }
    };

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Err(IngestError::EmptyDocument {
            path: path.to_path_buf(),
        });
    };
    let columns = header
        .iter()
        .map(|cell| xlsx_cell(cell).to_text_lossy())
        .collect();

    let mut document = start_document(path, columns)?;
    for cells in rows {
        let row = RawRecord::from_pairs(
            document
                .columns
                .iter()
                .cloned()
                .zip(cells.iter().map(xlsx_cell)),
        );
        document.push_row(row);
    }
    Ok(document)
}

/// Types a worksheet cell.
///
/// Workbooks store every number as a float; integral values are read back
/// as integers so `1` in a workbook and `1` in a CSV file type the same.
fn xlsx_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Missing,
        Data::String(text) if text.is_empty() => CellValue::Missing,
        Data::String(text) => CellValue::Text(text.clone()),
        Data::Bool(value) => CellValue::Bool(*value),
        Data::Int(value) => CellValue::Int(*value),
        Data::Float(value) if value.fract() == 0.0 && value.abs() < EXACT_INTEGER_LIMIT => {
            CellValue::Int(*value as i64)
        }
        Data::Float(value) => CellValue::Float(*value),
        other => CellValue::Text(other.to_string()),
    }
}

/// Renders a document in the format named by `path`'s extension.
///
/// Lists are written as JSON string arrays. In CSV booleans are `True`/`False`,
/// numbers carry no trailing zeros and missing values are empty cells; in a
/// workbook they become native boolean, number and blank cells.
pub fn encode_document(document: &Document, path: &Path) -> Result<Vec<u8>> {
    check_unique_columns(path, document)?;
    match document_format(path)? {
        DocumentFormat::Xlsx => encode_xlsx(document, path),
        DocumentFormat::Csv => encode_csv(document, path),
    }
}

fn encode_csv(document: &Document, path: &Path) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(&document.columns)
        .map_err(|e| csv_write_error(path, &e))?;

    for row in &document.rows {
        let mut fields = Vec::with_capacity(document.columns.len());
        for column in &document.columns {
            let cell = row.get(column).unwrap_or(&CellValue::Missing);
            let field = render_cell(cell).map_err(|e| IngestError::CsvWrite {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            fields.push(field);
        }
        writer
            .write_record(&fields)
            .map_err(|e| csv_write_error(path, &e))?;
    }

    writer.into_inner().map_err(|e| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: e.into_error(),
    })
}

fn encode_xlsx(document: &Document, path: &Path) -> Result<Vec<u8>> {
    let write_error = |e: XlsxError| xlsx_write_error(path, &e.to_string());

    // Fixed creation time so the document properties do not change between runs.
    let created = ExcelDateTime::from_ymd(2000, 1, 1).map_err(write_error)?;
    let mut workbook = Workbook::new();
    workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));
    let worksheet = workbook.add_worksheet();

    for (position, name) in document.columns.iter().enumerate() {
        let col = column_number(path, position)?;
        worksheet
            .write_string(0, col, name.as_str())
            .map_err(write_error)?;
    }

    for (offset, row) in document.rows.iter().enumerate() {
        let row_num = u32::try_from(offset + 1)
            .map_err(|_| xlsx_write_error(path, "too many rows for a worksheet"))?;
        for (position, column) in document.columns.iter().enumerate() {
            let col = column_number(path, position)?;
            let written = match row.get(column).unwrap_or(&CellValue::Missing) {
                CellValue::Missing => continue,
                CellValue::Bool(value) => worksheet.write_boolean(row_num, col, *value),
                CellValue::Int(value) => worksheet.write_number(row_num, col, *value as f64),
                CellValue::Float(value) => worksheet.write_number(row_num, col, *value),
                CellValue::Text(text) => worksheet.write_string(row_num, col, text.as_str()),
                CellValue::List(items) => {
                    let encoded = serde_json::to_string(items)
                        .map_err(|e| xlsx_write_error(path, &e.to_string()))?;
                    worksheet.write_string(row_num, col, encoded.as_str())
                }
            };
            written.map_err(write_error)?;
        }
    }

    workbook.save_to_buffer().map_err(write_error)
}

fn column_number(path: &Path, position: usize) -> Result<u16> {
    u16::try_from(position).map_err(|_| xlsx_write_error(path, "too many columns for a worksheet"))
}

/// Writes a document, replacing any existing file at `path`.
///
/// The format follows `path`'s extension. The bytes go to a temporary sibling
/// first and are renamed into place, so a failed write never leaves a
/// truncated document behind. Returns the bytes written.
pub fn write_document(document: &Document, path: &Path) -> Result<Vec<u8>> {
    let bytes = encode_document(document, path)?;
    let temp_path = temp_sibling(path);

    fs::write(&temp_path, &bytes).map_err(|e| IngestError::FileWrite {
        path: temp_path.clone(),
        source: e,
    })?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(IngestError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        });
    }

    tracing::debug!(
        path = %path.display(),
        bytes = bytes.len(),
        rows = document.row_count(),
        "wrote document"
    );
    Ok(bytes)
}

fn render_cell(cell: &CellValue) -> serde_json::Result<String> {
    Ok(match cell {
        CellValue::Missing => String::new(),
        CellValue::Bool(true) => "True".to_string(),
        CellValue::Bool(false) => "False".to_string(),
        CellValue::Int(value) => value.to_string(),
        CellValue::Float(value) => format_numeric(*value),
        CellValue::Text(text) => text.clone(),
        CellValue::List(items) => serde_json::to_string(items)?,
    })
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp"))
}

fn csv_parse_error(path: &Path, err: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn csv_write_error(path: &Path, err: &csv::Error) -> IngestError {
    IngestError::CsvWrite {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn xlsx_read_error(path: &Path, err: &impl std::fmt::Display) -> IngestError {
    IngestError::XlsxRead {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn xlsx_write_error(path: &Path, message: &str) -> IngestError {
    IngestError::XlsxWrite {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}
