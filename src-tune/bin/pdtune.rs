//! pdtune - PD controller gain tuning by differential evolution
//!
//! Copyright (C) 2025 Pierre Aubert pierre(at)spinorama(dot)org
//!
//! This program is free software: you can redistribute it and/or modify
//! it under the terms of the GNU General Public License as published by
//! the Free Software Foundation, either version 3 of the License, or
//! (at your option) any later version.
//!
//! This program is distributed in the hope that it will be useful,
//! but WITHOUT ANY WARRANTY; without even the implied warranty of
//! MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//! GNU General Public License for more details.
//!
//! You should have received a copy of the GNU General Public License
//! along with this program.  If not, see <https://www.gnu.org/licenses/>.

use clap::Parser;
use pdtune::cli::Args;
use pdtune::{LogProgress, PdTuner, RunOutputs};
use std::error::Error;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.tuning_config()?;
    let tuner = PdTuner::new(config)?;
    let outputs = RunOutputs::from_args(&args)?;

    let report = tuner.optimize(Arc::new(LogProgress))?;
    log::info!("{} plant evaluations", report.evaluations);

    outputs.save(&report)?;
    Ok(())
}
