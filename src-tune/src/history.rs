use std::fs::File;
use std::io::Write;
use std::path::Path;

use pdtune_de::DEHistory;
use pdtune_plant::GainPair;
use serde::{Deserialize, Serialize};

use crate::TuneError;

/// Best `kp`, `kd` and fitness at the end of each generation (0-based index)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GainHistory {
    pub kp: Vec<f64>,
    pub kd: Vec<f64>,
    pub fitness: Vec<f64>,
}

/// One CSV line; `generation` is 1-based to match progress output.
#[derive(Debug, Serialize, Deserialize)]
struct HistoryRow {
    generation: usize,
    kp: f64,
    kd: f64,
    fitness: f64,
}

impl From<&DEHistory> for GainHistory {
    fn from(h: &DEHistory) -> Self {
        Self {
            kp: h.x.column(0).to_vec(),
            kd: h.x.column(1).to_vec(),
            fitness: h.fun.to_vec(),
        }
    }
}

impl GainHistory {
    pub fn len(&self) -> usize {
        self.fitness.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fitness.is_empty()
    }

    /// Best gains and fitness recorded for 0-based `generation`
    pub fn get(&self, generation: usize) -> Option<(GainPair, f64)> {
        let kp = *self.kp.get(generation)?;
        let kd = *self.kd.get(generation)?;
        let fitness = *self.fitness.get(generation)?;
        Some((GainPair::new(kp, kd), fitness))
    }

    /// Write `generation,kp,kd,fitness` rows
    pub fn write_csv(&self, path: &Path) -> Result<(), TuneError> {
        self.write_csv_to(File::create(path)?)
    }

    /// Same as [`GainHistory::write_csv`] into an already opened writer
    pub fn write_csv_to<W: Write>(&self, writer: W) -> Result<(), TuneError> {
        let mut wtr = csv::Writer::from_writer(writer);
        for g in 0..self.len() {
            wtr.serialize(HistoryRow {
                generation: g + 1,
                kp: self.kp[g],
                kd: self.kd[g],
                fitness: self.fitness[g],
            })?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Read a file produced by [`GainHistory::write_csv`]
    pub fn read_csv(path: &Path) -> Result<Self, TuneError> {
        let mut rdr = csv::Reader::from_path(path)?;
        let mut history = GainHistory::default();
        for row in rdr.deserialize() {
            let row: HistoryRow = row?;
            history.kp.push(row.kp);
            history.kd.push(row.kd);
            history.fitness.push(row.fitness);
        }
        Ok(history)
    }
}
