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

extern crate geos3_od;
extern crate log;
extern crate pretty_env_logger;

use geos3_od::io::estimates::{export_estimates, ExportCfg};
use geos3_od::io::scenario::ScenarioConfig;
use geos3_od::io::ConfigRepr;
use geos3_od::GeosError;
use log::{info, warn};
use std::env::{args, set_var, var};

const LOG_VAR: &str = "GEOS3_LOG";

fn main() -> Result<(), GeosError> {
    if var(LOG_VAR).is_err() {
        set_var(LOG_VAR, "INFO");
    }

    if pretty_env_logger::try_init_custom_env(LOG_VAR).is_err() {
        println!("could not init logger");
    }

    // Optional scenario file, otherwise the GEOS-3 reference run
    let scenario = match args().nth(1) {
        Some(path) => {
            info!("Loading scenario `{path}`");
            ScenarioConfig::load(&path)?
        }
        None => ScenarioConfig::default(),
    };

    let odp = scenario.build_process()?;
    let arc = scenario.load_tracking()?;
    odp.validate(&arc.observations)?;
    info!("{odp}");

    let solution = odp.run(&arc.observations)?;
    info!("{solution}");

    match scenario.truth_state() {
        Some(truth) => print!("{}", solution.report(&truth)),
        None => warn!("no reference state in the scenario: estimation error not reported"),
    }

    if let Some(output) = &scenario.output {
        export_estimates(output, &solution.estimates, &ExportCfg::default())?;
    }

    Ok(())
}
