//! Whitespace-aligned ASCII table, one row per point.

use std::io::Write;

use crate::quantities::{MeasurementData, XUnit, YUnit};

use super::ExportError;

/// Column header line (without the leading `#`).
pub fn header(data: &MeasurementData, x_unit: XUnit, y_unit: YUnit) -> String {
    let intensity = match y_unit {
        YUnit::Cps => "CPS",
        YUnit::Counts => "Counts",
    };
    let axes = match (data, x_unit) {
        (MeasurementData::Line { .. }, XUnit::Deg) => "2Theta_deg",
        (MeasurementData::Line { .. }, XUnit::Reciprocal) => "Qz_inv_nm",
        (MeasurementData::Map { .. }, XUnit::Deg) => "2Theta_deg  omega_deg",
        (MeasurementData::Map { .. }, XUnit::Reciprocal) => "Qx_inv_nm  Qz_inv_nm",
    };
    format!("{axes}  {intensity}")
}

/// Scientific notation with a signed, at-least-two-digit exponent (`1.23450e+03`).
pub fn format_sci(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let raw = format!("{value:.precision$e}");
    match raw.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => raw,
    }
}

/// Write `data` as an ASC table.
pub fn write_asc<W: Write>(
    mut out: W,
    data: &MeasurementData,
    x_unit: XUnit,
    y_unit: YUnit,
) -> Result<(), ExportError> {
    writeln!(out, "#{}", header(data, x_unit, y_unit))?;
    match data {
        MeasurementData::Line { x, y } => {
            for (xv, yv) in x.iter().zip(y) {
                writeln!(out, "{:<13.5}{:<10}", xv, format_sci(*yv, 5))?;
            }
        }
        MeasurementData::Map { x, y, z } => {
            for ((xr, yr), zr) in x.iter().zip(y).zip(z) {
                for ((xv, yv), zv) in xr.iter().zip(yr).zip(zr) {
                    writeln!(out, "{:<13.5}{:<11.5}{:<10}", xv, yv, format_sci(*zv, 5))?;
                }
            }
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_sci_matches_printf() {
        assert_eq!(format_sci(1234.5, 5), "1.23450e+03");
        assert_eq!(format_sci(0.00012, 2), "1.20e-04");
        assert_eq!(format_sci(0.0, 1), "0.0e+00");
        assert_eq!(format_sci(2.5e120, 1), "2.5e+120");
    }

    #[test]
    fn test_line_table() {
        let data = MeasurementData::Line {
            x: vec![10.0, 10.5],
            y: vec![100.0, 2.5],
        };
        let mut buf = Vec::new();
        write_asc(&mut buf, &data, XUnit::Deg, YUnit::Counts).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "#2Theta_deg  Counts");
        assert_eq!(lines[1], "10.00000     1.00000e+02");
        assert_eq!(lines[2], "10.50000     2.50000e+00");
    }

    #[test]
    fn test_map_table_is_row_major() {
        let data = MeasurementData::Map {
            x: vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            y: vec![vec![0.5, 0.5], vec![0.75, 0.75]],
            z: vec![vec![1.0, 2.0], vec![3.0, 4.0]],
        };
        let mut buf = Vec::new();
        write_asc(&mut buf, &data, XUnit::Reciprocal, YUnit::Cps).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "#Qx_inv_nm  Qz_inv_nm  CPS");
        assert_eq!(lines[3], "3.00000      0.75000    3.00000e+00");
    }
}
