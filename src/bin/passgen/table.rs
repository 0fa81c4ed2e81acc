use std::fmt::{self, Display};
use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

/// Write `rows` as a left-aligned table with a header and a divider line.
pub(crate) fn display_table<Row: TableDisplay>(
    rows: &[Row],
    mut output: impl Write,
) -> io::Result<()> {
    let column_count = Row::columns();
    let mut column_widths = (0..column_count)
        .map(|column_index| Row::column_name(column_index).width())
        .collect::<Vec<_>>();

    let cells = rows
        .iter()
        .map(|row| {
            (0..column_count)
                .map(|column_index| row.cell(column_index))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    for row in &cells {
        for (width, cell) in column_widths.iter_mut().zip(row) {
            *width = std::cmp::max(cell.width(), *width);
        }
    }

    output_row(&mut output, &column_widths, |column_index| {
        Padded(Row::column_name(column_index), column_widths[column_index])
    })?;
    output_row(&mut output, &column_widths, |column_index| {
        Divider(column_widths[column_index])
    })?;
    for row in &cells {
        output_row(&mut output, &column_widths, |column_index| {
            Padded(&row[column_index], column_widths[column_index])
        })?;
    }

    Ok(())
}

pub(crate) trait TableDisplay {
    fn columns() -> usize;
    fn column_name(column_index: usize) -> &'static str;
    fn cell(&self, column_index: usize) -> String;
}

fn output_row<F, D>(
    mut output: impl Write,
    column_widths: &[usize],
    get_column_display: F,
) -> io::Result<()>
where
    D: Display,
    F: Fn(usize) -> D,
{
    let last = column_widths.len().saturating_sub(1);
    let mut line = String::new();
    for column_index in 0..column_widths.len() {
        if column_index > 0 {
            line.push_str("  ");
        }
        line.push_str(&get_column_display(column_index).to_string());
        if column_index == last {
            // No trailing padding on the last column.
            let trimmed = line.trim_end().len();
            line.truncate(trimmed);
        }
    }
    writeln!(&mut output, "{}", line)
}

struct Divider(usize);

impl Display for Divider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.0 {
            write!(f, "─")?;
        }
        Ok(())
    }
}

struct Padded<'a>(&'a str, usize);

impl Display for Padded<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let padding = self.1.saturating_sub(self.0.width());
        write!(f, "{}", self.0)?;
        for _ in 0..padding {
            write!(f, " ")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, &'static str);

    impl TableDisplay for Row {
        fn columns() -> usize {
            2
        }

        fn column_name(column_index: usize) -> &'static str {
            match column_index {
                0 => "Name",
                _ => "Value",
            }
        }

        fn cell(&self, column_index: usize) -> String {
            match column_index {
                0 => self.0.to_owned(),
                _ => self.1.to_owned(),
            }
        }
    }

    #[test]
    fn pads_columns_to_widest_cell() {
        let mut out = Vec::new();
        display_table(&[Row("a", "1"), Row("longer", "22")], &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(
            out,
            "Name    Value\n\
             ──────  ─────\n\
             a       1\n\
             longer  22\n"
        );
    }

    #[test]
    fn header_only_when_empty() {
        let mut out = Vec::new();
        display_table::<Row>(&[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Name  Value\n────  ─────\n");
    }
}
