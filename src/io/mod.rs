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

use flate2::read::GzDecoder;
use hifitime::Duration;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde::{Serialize, Serializer};
use snafu::prelude::*;
use std::fmt::Debug;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

/// Loads the GGM03S spherical harmonic coefficients, optionally gzip compressed.
pub mod gravity;
/// Loads the DE430 Chebyshev coefficients.
pub mod ephemeris;
/// Loads the IERS Earth orientation parameters.
pub mod eop;
/// Reads the GEOS-3 tracking data (azimuth, elevation, range) from Kaena Point.
pub mod tracking_data;
/// The YAML configuration of an orbit determination run.
pub mod scenario;
/// Exports the filter estimates to CSV.
pub mod estimates;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConfigError {
    #[snafu(display("failed to read configuration file: {source}"), context(false))]
    ReadError { source: io::Error },

    #[snafu(display("failed to parse YAML configuration file: {source}"))]
    ParseError { source: serde_yaml::Error },

    #[snafu(display("invalid configuration: {msg}"))]
    InvalidConfig { msg: String },
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum InputOutputError {
    #[snafu(display("{action} encountered i/o error: {source}"))]
    StdIOError {
        source: io::Error,
        action: &'static str,
    },
    #[snafu(display("missing required data {which}"))]
    MissingData { which: String },
    #[snafu(display("{path}:{line}: {msg}"))]
    MalformedTable {
        path: String,
        line: usize,
        msg: String,
    },
    #[snafu(display("CSV error: {source}"))]
    Csv { source: csv::Error },
}

pub trait ConfigRepr: Debug + Sized + Serialize + DeserializeOwned {
    /// Builds the configuration representation from the path to a yaml
    fn load<P>(path: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        serde_yaml::from_reader(reader).context(ParseSnafu)
    }

    /// Builds "Self" from the provided string of a yaml
    fn loads(data: &str) -> Result<Self, ConfigError> {
        debug!("Loading YAML:\n{data}");
        serde_yaml::from_str(data).context(ParseSnafu)
    }

    /// Builds a sequence of "Selves" from the provided string of a yaml
    fn loads_many(data: &str) -> Result<Vec<Self>, ConfigError> {
        debug!("Loading YAML:\n{data}");
        serde_yaml::from_str(data).context(ParseSnafu)
    }
}

pub(crate) fn duration_to_str<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("{duration}"))
}

/// A deserializer from Duration string
pub(crate) fn duration_from_str<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    // implementation of the custom deserialization function
    let s = String::deserialize(deserializer)?;
    Duration::from_str(&s).map_err(serde::de::Error::custom)
}

/// Reads the whole text file, decompressing it first if its extension is `gz`.
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<String, InputOutputError> {
    let path = path.as_ref();
    let file = File::open(path).context(StdIOSnafu {
        action: "opening table",
    })?;

    let mut contents = String::new();
    if path.extension().is_some_and(|ext| ext == "gz") {
        GzDecoder::new(file)
            .read_to_string(&mut contents)
            .context(StdIOSnafu {
                action: "decompressing table",
            })?;
    } else {
        BufReader::new(file)
            .read_to_string(&mut contents)
            .context(StdIOSnafu {
                action: "reading table",
            })?;
    }
    Ok(contents)
}

/// Parses a float, accepting the Fortran `D` exponent marker.
pub(crate) fn parse_f64(token: &str) -> Option<f64> {
    if token.contains(['D', 'd']) {
        f64::from_str(&token.replace(['D', 'd'], "E")).ok()
    } else {
        f64::from_str(token).ok()
    }
}

/// Data lines of a table with their one-based line number: blank and `#` comment lines are skipped.
pub(crate) fn data_lines(contents: &str) -> impl Iterator<Item = (usize, &str)> {
    contents
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}
