/*
    Nyx, blazing fast astrodynamics
    Copyright (C) 2018-onwards Christopher Rabotin <christopher.rabotin@gmail.com>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use super::{data_lines, parse_f64, read_table, InputOutputError, MalformedTableSnafu};
use crate::cosmic::eop::EopRecord;
use crate::cosmic::EopTable;
use snafu::prelude::*;
use std::path::Path;

/// Number of columns of the IERS C04 table: year, month, day, MJD, x, y, UT1-UTC, LOD, dPsi, dEps, dX, dY, TAI-UTC.
const EOP_COLUMNS: usize = 13;

impl EopTable {
    /// Loads an IERS Earth orientation parameters file, optionally gzip compressed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, InputOutputError> {
        let path_str = path.as_ref().display().to_string();
        let contents = read_table(&path)?;
        let me = Self::from_text(&contents, &path_str)?;
        let (start, end) = me.coverage();
        info!("{path_str} loaded: {} days from MJD {start} to MJD {end}", me.len());
        Ok(me)
    }

    pub(crate) fn from_text(contents: &str, path: &str) -> Result<Self, InputOutputError> {
        let mut records = Vec::new();
        for (lno, line) in data_lines(contents) {
            let values = line
                .split_whitespace()
                .map(parse_f64)
                .collect::<Option<Vec<f64>>>()
                .context(MalformedTableSnafu {
                    path,
                    line: lno,
                    msg: "invalid number",
                })?;
            ensure!(
                values.len() >= EOP_COLUMNS,
                MalformedTableSnafu {
                    path,
                    line: lno,
                    msg: format!("expected {EOP_COLUMNS} columns, found {}", values.len())
                }
            );
            records.push(EopRecord {
                mjd: values[3],
                x_pole: values[4],
                y_pole: values[5],
                ut1_utc: values[6],
                lod: values[7],
                dpsi: values[8],
                deps: values[9],
                dx_pole: values[10],
                dy_pole: values[11],
                tai_utc: values[12],
            });
        }

        Self::new(records).map_err(|e| InputOutputError::MissingData {
            which: format!("{path}: {e}"),
        })
    }
}
