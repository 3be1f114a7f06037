use std::mem::take;

/// One parsed line of the export, positionally aligned with the header.
pub type Row = Vec<String>;

const DELIMITER: char = ',';
const QUOTE: char = '"';

/// Parse comma separated text into rows of fields.
///
/// Quoted fields may contain commas and line feeds; a doubled quote inside a
/// quoted field is one literal quote. Carriage returns are dropped wherever
/// they occur. The final row is emitted even without a trailing line feed,
/// so empty input yields a single row holding one empty field.
pub fn parse_rows(text: &str) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\r' {
            continue;
        }

        if in_quotes {
            if ch == QUOTE {
                if chars.peek() == Some(&QUOTE) {
                    chars.next();
                    field.push(QUOTE);
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
            continue;
        }

        match ch {
            QUOTE => in_quotes = true,
            DELIMITER => row.push(take(&mut field)),
            '\n' => {
                row.push(take(&mut field));
                rows.push(take(&mut row));
            }
            _ => field.push(ch),
        }
    }

    // Unterminated quotes still flush whatever was collected.
    row.push(field);
    rows.push(row);

    rows
}
