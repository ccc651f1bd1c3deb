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

use super::{read_table, InputOutputError, MalformedTableSnafu};
use crate::cosmic::mjday;
use crate::od::measurement::Observation;
use crate::time::{Epoch, Unit};
use snafu::prelude::*;
use std::fmt;
use std::path::Path;

/// Byte ranges of the fixed columns of a GEOS-3 tracking line.
const YEAR: (usize, usize) = (0, 4);
const MONTH: (usize, usize) = (5, 7);
const DAY: (usize, usize) = (8, 10);
const HOUR: (usize, usize) = (12, 14);
const MINUTE: (usize, usize) = (15, 17);
const SECOND: (usize, usize) = (18, 24);
const AZIMUTH_DEG: (usize, usize) = (25, 33);
const ELEVATION_DEG: (usize, usize) = (35, 43);
const RANGE_KM: (usize, usize) = (44, 53);

/// A tracking arc: the observations of one station, sorted by increasing epoch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackingArc {
    /// Name of the file this arc was loaded from
    pub source: String,
    pub observations: Vec<Observation>,
}

impl TrackingArc {
    /// Loads a GEOS-3 tracking file, optionally gzip compressed.
    ///
    /// Each line holds the UTC date and time, the azimuth and the elevation in degrees, and the
    /// range in kilometers, in fixed columns.
    pub fn from_geos3<P: AsRef<Path>>(path: P) -> Result<Self, InputOutputError> {
        let path_str = path.as_ref().display().to_string();
        let contents = read_table(&path)?;
        let me = Self::from_geos3_text(&contents, &path_str)?;
        info!("{me}");
        Ok(me)
    }

    pub(crate) fn from_geos3_text(contents: &str, path: &str) -> Result<Self, InputOutputError> {
        let mut observations: Vec<Observation> = Vec::new();
        for (idx, line) in contents.lines().enumerate() {
            let line = line.trim_end();
            if line.trim().is_empty() {
                continue;
            }
            let obs = parse_geos3_line(line, path, idx + 1)?;
            if let Some(prev) = observations.last() {
                ensure!(
                    obs.mjd_utc > prev.mjd_utc,
                    MalformedTableSnafu {
                        path,
                        line: idx + 1,
                        msg: format!("epoch {} does not follow {}", obs.epoch, prev.epoch)
                    }
                );
            }
            observations.push(obs);
        }

        ensure!(
            !observations.is_empty(),
            super::MissingDataSnafu {
                which: format!("{path}: no observations")
            }
        );

        Ok(Self {
            source: path.to_string(),
            observations,
        })
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Epoch of the first observation
    pub fn start_epoch(&self) -> Option<Epoch> {
        self.observations.first().map(|obs| obs.epoch)
    }

    /// Epoch of the last observation
    pub fn end_epoch(&self) -> Option<Epoch> {
        self.observations.last().map(|obs| obs.epoch)
    }
}

impl fmt::Display for TrackingArc {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.start_epoch(), self.end_epoch()) {
            (Some(start), Some(end)) => write!(
                f,
                "{}: {} observations from {start} to {end} ({})",
                self.source,
                self.len(),
                end - start
            ),
            _ => write!(f, "{}: empty tracking arc", self.source),
        }
    }
}

fn field<'a>(
    line: &'a str,
    (start, end): (usize, usize),
    path: &str,
    lno: usize,
) -> Result<&'a str, InputOutputError> {
    // A trailing field may be shorter than its column width
    line.get(start..end.min(line.len()))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .context(MalformedTableSnafu {
            path,
            line: lno,
            msg: format!("missing columns {start} to {end}"),
        })
}

fn parse_geos3_line(line: &str, path: &str, lno: usize) -> Result<Observation, InputOutputError> {
    let number = |bounds: (usize, usize)| -> Result<f64, InputOutputError> {
        let token = field(line, bounds, path, lno)?;
        token.parse::<f64>().ok().context(MalformedTableSnafu {
            path,
            line: lno,
            msg: format!("invalid number `{token}`"),
        })
    };
    let integer = |bounds: (usize, usize)| -> Result<u8, InputOutputError> {
        let token = field(line, bounds, path, lno)?;
        token.parse::<u8>().ok().context(MalformedTableSnafu {
            path,
            line: lno,
            msg: format!("invalid integer `{token}`"),
        })
    };

    let year_token = field(line, YEAR, path, lno)?;
    let year = year_token.parse::<i32>().ok().context(MalformedTableSnafu {
        path,
        line: lno,
        msg: format!("invalid year `{year_token}`"),
    })?;
    let month = integer(MONTH)?;
    let day = integer(DAY)?;
    let hour = integer(HOUR)?;
    let minute = integer(MINUTE)?;
    let second = number(SECOND)?;

    let epoch = Epoch::maybe_from_gregorian_utc(year, month, day, hour, minute, 0, 0)
        .map_err(|e| InputOutputError::MalformedTable {
            path: path.to_string(),
            line: lno,
            msg: format!("invalid date: {e}"),
        })?
        + second * Unit::Second;

    Ok(Observation {
        epoch,
        mjd_utc: mjday(year, month, day, hour, minute, second),
        azimuth: number(AZIMUTH_DEG)?.to_radians(),
        elevation: number(ELEVATION_DEG)?.to_radians(),
        range: number(RANGE_KM)? * 1e3,
    })
}
