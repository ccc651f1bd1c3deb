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
use crate::cosmic::ephemeris::DE430_RECORD_LEN;
use crate::cosmic::De430;
use snafu::prelude::*;
use std::path::Path;

impl De430 {
    /// Loads the DE430 Chebyshev coefficients: whitespace separated values, 1020 per record, and
    /// records may span several lines. The file may be gzip compressed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, InputOutputError> {
        let path_str = path.as_ref().display().to_string();
        let contents = read_table(&path)?;
        let me = Self::from_text(&contents, &path_str)?;
        let (start, end) = me.coverage();
        info!(
            "{path_str} loaded: {} records from JD {start} to JD {end}",
            me.len()
        );
        Ok(me)
    }

    pub(crate) fn from_text(contents: &str, path: &str) -> Result<Self, InputOutputError> {
        let mut records = Vec::new();
        let mut current = Vec::with_capacity(DE430_RECORD_LEN);
        let mut last_line = 0;

        for (lno, line) in data_lines(contents) {
            last_line = lno;
            for token in line.split_whitespace() {
                let value = parse_f64(token).context(MalformedTableSnafu {
                    path,
                    line: lno,
                    msg: format!("invalid Chebyshev coefficient `{token}`"),
                })?;
                current.push(value);
                if current.len() == DE430_RECORD_LEN {
                    records.push(std::mem::replace(
                        &mut current,
                        Vec::with_capacity(DE430_RECORD_LEN),
                    ));
                }
            }
        }

        ensure!(
            current.is_empty(),
            MalformedTableSnafu {
                path,
                line: last_line,
                msg: format!(
                    "last record has {} values instead of {DE430_RECORD_LEN}",
                    current.len()
                )
            }
        );

        Self::new(records).map_err(|e| InputOutputError::MalformedTable {
            path: path.to_string(),
            line: last_line,
            msg: e.to_string(),
        })
    }
}

#[cfg(test)]
mod ut_ephem_loader {
    use super::*;

    fn record(jd_start: f64) -> String {
        let mut values = vec![jd_start, jd_start + 32.0];
        values.extend((2..DE430_RECORD_LEN).map(|i| i as f64 * 1e-3));
        // Split each record on several lines, as in the JPL ASCII files
        values
            .chunks(3)
            .map(|chunk| {
                chunk
                    .iter()
                    .map(|v| format!("{v:E}"))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn records_over_many_lines() {
        let contents = format!("{}\n{}\n", record(2_449_744.5), record(2_449_776.5));
        let ephem = De430::from_text(&contents, "de430.txt").unwrap();
        assert_eq!(ephem.len(), 2);
        assert_eq!(ephem.coverage(), (2_449_744.5, 2_449_808.5));
    }

    #[test]
    fn truncated_file() {
        let mut contents = record(2_449_744.5);
        contents.push_str("\n1.0 2.0\n");
        assert!(matches!(
            De430::from_text(&contents, "de430.txt"),
            Err(InputOutputError::MalformedTable { .. })
        ));
        assert!(matches!(
            De430::from_text("1.0 abc\n", "de430.txt"),
            Err(InputOutputError::MalformedTable { line: 1, .. })
        ));
        assert!(De430::from_text("", "de430.txt").is_err());
    }
}
