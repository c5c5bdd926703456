//! Shared worksheet styling for the generated workbooks.

use rust_xlsxwriter::{Format, Worksheet};

use crate::error::Result;

pub(crate) fn title_format(size: f64) -> Format {
    Format::new().set_bold().set_font_size(size)
}

pub(crate) fn bold() -> Format {
    Format::new().set_bold()
}

/// Bold header cells across `row`, widening each column to `width`.
pub(crate) fn write_header_row(
    worksheet: &mut Worksheet,
    row: u32,
    headers: &[&str],
    width: f64,
) -> Result<()> {
    let format = bold();
    for (col, header) in (0u16..).zip(headers) {
        worksheet.write_string_with_format(row, col, *header, &format)?;
        worksheet.set_column_width(col, width)?;
    }
    Ok(())
}
