use crate::application::ports::{ContentExtractor, ExtractionError};
use crate::domain::{ExtractedContent, Handling};

const COLUMN_GAP: &str = "  ";
const MISSING_VALUE: &str = "NaN";

/// Parses comma-separated data and renders it as an aligned table with a
/// leading row index.
#[derive(Debug, Default)]
pub struct CsvAdapter;

impl CsvAdapter {
    pub fn new() -> Self {
        Self
    }

    fn parse(data: &[u8], filename: &str) -> Result<(Vec<String>, Vec<Vec<String>>), ExtractionError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(data);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| malformed(filename, &e))?
            .iter()
            .map(str::to_string)
            .collect();

        if headers.is_empty() || headers.iter().all(String::is_empty) {
            return Err(ExtractionError::Malformed(
                filename.to_string(),
                "No columns to parse from file".to_string(),
            ));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| malformed(filename, &e))?;

            // Short rows are padded with missing values; long rows are an error.
            if record.len() > headers.len() {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                return Err(ExtractionError::Malformed(
                    filename.to_string(),
                    format!(
                        "row {line}: expected {} fields, saw {}",
                        headers.len(),
                        record.len()
                    ),
                ));
            }

            let mut row: Vec<String> = record
                .iter()
                .map(|cell| {
                    if cell.is_empty() {
                        MISSING_VALUE.to_string()
                    } else {
                        cell.to_string()
                    }
                })
                .collect();
            row.resize(headers.len(), MISSING_VALUE.to_string());
            rows.push(row);
        }

        Ok((headers, rows))
    }
}

fn malformed(filename: &str, error: &csv::Error) -> ExtractionError {
    let reason = match error.position() {
        Some(position) => format!("row {}: {}", position.line(), error),
        None => error.to_string(),
    };
    ExtractionError::Malformed(filename.to_string(), reason)
}

fn width(cell: &str) -> usize {
    cell.chars().count()
}

/// Right-aligns every column, including the unnamed index column, and joins
/// columns with two spaces.
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let index_width = rows
        .len()
        .checked_sub(1)
        .map(|last| last.to_string().len())
        .unwrap_or(0);

    let column_widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(column, header)| {
            rows.iter()
                .filter_map(|row| row.get(column))
                .map(|cell| width(cell))
                .chain(std::iter::once(width(header)))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render_line = |index: &str, cells: &[String]| -> String {
        let mut line = format!("{index:>index_width$}");
        for (cell, column_width) in cells.iter().zip(&column_widths) {
            line.push_str(COLUMN_GAP);
            let padding = column_width.saturating_sub(width(cell));
            line.extend(std::iter::repeat_n(' ', padding));
            line.push_str(cell);
        }
        line.trim_end().to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(render_line("", headers));
    for (index, row) in rows.iter().enumerate() {
        lines.push(render_line(&index.to_string(), row));
    }

    lines.join("\n")
}

impl ContentExtractor for CsvAdapter {
    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    fn extract(
        &self,
        data: &[u8],
        filename: &str,
        handling: Handling,
    ) -> Result<ExtractedContent, ExtractionError> {
        if handling != Handling::Tabular {
            return Err(ExtractionError::UnsupportedHandling(handling.to_string()));
        }

        let (headers, rows) = Self::parse(data, filename)?;
        let text = render_table(&headers, &rows);

        tracing::debug!(rows = rows.len(), columns = headers.len(), "CSV parsed");

        Ok(ExtractedContent::from_text(text)
            .with_metadata("rows", rows.len())
            .with_metadata("columns", headers))
    }
}
