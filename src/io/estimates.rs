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

use super::{CsvSnafu, InputOutputError, StdIOSnafu};
use crate::od::measurement::MeasurementType;
use crate::od::process::Estimate;
use crate::time::Epoch;
use serde_derive::{Deserialize, Serialize};
use snafu::ResultExt;
use std::fs;
use std::path::Path;
use typed_builder::TypedBuilder;

/// Configuration for exporting the estimates to CSV.
#[derive(Clone, Debug, Default, Serialize, Deserialize, TypedBuilder)]
#[builder(doc)]
pub struct ExportCfg {
    /// Measurement types to export, defaults to all of them.
    #[builder(default, setter(strip_option))]
    pub kinds: Option<Vec<MeasurementType>>,
    /// Start epoch to export, defaults to the first estimate
    #[builder(default, setter(strip_option))]
    pub start_epoch: Option<Epoch>,
    /// End epoch to export, defaults to the last estimate
    #[builder(default, setter(strip_option))]
    pub end_epoch: Option<Epoch>,
}

impl ExportCfg {
    fn keeps(&self, est: &Estimate) -> bool {
        self.kinds
            .as_ref()
            .map_or(true, |kinds| kinds.contains(&est.kind))
            && self.start_epoch.map_or(true, |start| est.epoch >= start)
            && self.end_epoch.map_or(true, |end| est.epoch <= end)
    }
}

#[derive(Serialize)]
struct EstimateRow {
    epoch: String,
    mjd_utc: f64,
    kind: String,
    observed: f64,
    computed: f64,
    residual: f64,
    x_m: f64,
    y_m: f64,
    z_m: f64,
    vx_m_s: f64,
    vy_m_s: f64,
    vz_m_s: f64,
    cx_x: f64,
    cy_y: f64,
    cz_z: f64,
    cvx_vx: f64,
    cvy_vy: f64,
    cvz_vz: f64,
}

impl From<&Estimate> for EstimateRow {
    fn from(est: &Estimate) -> Self {
        let diag = est.covar.diagonal();
        Self {
            epoch: format!("{}", est.epoch),
            mjd_utc: est.mjd_utc,
            kind: format!("{}", est.kind),
            observed: est.observed,
            computed: est.computed,
            residual: est.residual(),
            x_m: est.state[0],
            y_m: est.state[1],
            z_m: est.state[2],
            vx_m_s: est.state[3],
            vy_m_s: est.state[4],
            vz_m_s: est.state[5],
            cx_x: diag[0],
            cy_y: diag[1],
            cz_z: diag[2],
            cvx_vx: diag[3],
            cvy_vy: diag[4],
            cvz_vz: diag[5],
        }
    }
}

/// Writes one CSV row per scalar measurement update, and returns the number of rows written.
pub fn export_estimates<P: AsRef<Path>>(
    path: P,
    estimates: &[Estimate],
    cfg: &ExportCfg,
) -> Result<usize, InputOutputError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context(StdIOSnafu {
            action: "creating output directory",
        })?;
    }

    let mut wtr = csv::Writer::from_path(path).context(CsvSnafu)?;
    let mut count = 0;
    for est in estimates.iter().filter(|est| cfg.keeps(est)) {
        wtr.serialize(EstimateRow::from(est)).context(CsvSnafu)?;
        count += 1;
    }
    wtr.flush().context(StdIOSnafu {
        action: "flushing estimates",
    })?;

    info!("{count} estimates written to {}", path.display());
    Ok(count)
}
