//! File formats around the engine: instance JSON in, result JSON and
//! per-generation score CSV out.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use csv::WriterBuilder;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, ValidationError};
use crate::model::entity::{Id, Score};
use crate::model::group::Partition;
use crate::model::instance::ProblemInstance;

/// Instance file layout. The Polish key names of older data files are
/// accepted as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceFile {
    #[serde(alias = "liczba_osob")]
    pub person_count: usize,
    #[serde(alias = "liczba_stolow")]
    pub table_count: usize,
    #[serde(alias = "poziomy_sympatii")]
    pub affinity: Vec<Vec<Score>>,
}

impl InstanceFile {
    pub fn into_instance(self) -> Result<ProblemInstance, ValidationError> {
        ProblemInstance::new(self.person_count, self.table_count, self.affinity)
    }
}

impl From<&ProblemInstance> for InstanceFile {
    fn from(instance: &ProblemInstance) -> Self {
        InstanceFile {
            person_count: instance.person_count(),
            table_count: instance.table_count(),
            affinity: instance.affinity().rows().map(<[Score]>::to_vec).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatingResult {
    pub tables: Vec<Vec<Id>>,
    pub score: Option<Score>,
}

impl From<&Partition> for SeatingResult {
    fn from(partition: &Partition) -> Self {
        SeatingResult {
            tables: partition.tables().map(<[Id]>::to_vec).collect(),
            score: partition.score(),
        }
    }
}

/// Mean score of every generation, in the order they were reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressLog {
    entries: Vec<(usize, Score)>,
}

#[derive(Serialize)]
struct ScoreRow {
    generation: usize,
    mean_score: Score,
}

impl ProgressLog {
    pub fn record(&mut self, generation: usize, mean_score: Score) {
        self.entries.push((generation, mean_score));
    }

    pub fn entries(&self) -> &[(usize, Score)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn read_instance<R: Read>(reader: R) -> Result<ProblemInstance> {
    let file: InstanceFile = serde_json::from_reader(reader)?;
    Ok(file.into_instance()?)
}

pub fn load_instance(path: &Path) -> Result<ProblemInstance> {
    let file = File::open(path).map_err(|source| Error::Open { path: path.to_path_buf(), source })?;
    read_instance(BufReader::new(file))
}

pub fn write_instance<W: Write>(writer: W, instance: &ProblemInstance) -> Result<()> {
    serde_json::to_writer_pretty(writer, &InstanceFile::from(instance))?;
    Ok(())
}

pub fn save_instance(path: &Path, instance: &ProblemInstance) -> Result<()> {
    let mut writer = create(path)?;
    write_instance(&mut writer, instance)?;
    writer.flush()?;
    Ok(())
}

pub fn write_result<W: Write>(writer: W, partition: &Partition) -> Result<()> {
    serde_json::to_writer_pretty(writer, &SeatingResult::from(partition))?;
    Ok(())
}

pub fn save_result(path: &Path, partition: &Partition) -> Result<()> {
    let mut writer = create(path)?;
    write_result(&mut writer, partition)?;
    writer.flush()?;
    Ok(())
}

/// `;`-separated, mean scores rounded to four decimals.
pub fn write_scores<W: Write>(writer: W, log: &ProgressLog) -> Result<()> {
    let mut writer = WriterBuilder::new().delimiter(b';').from_writer(writer);
    for &(generation, mean_score) in log.entries() {
        writer.serialize(ScoreRow { generation, mean_score: round4(mean_score) })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_scores(path: &Path, log: &ProgressLog) -> Result<()> {
    write_scores(create(path)?, log)
}

pub(crate) fn round4(value: Score) -> Score {
    (value * 10_000.0).round() / 10_000.0
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|source| Error::Create { path: path.to_path_buf(), source })?;
    Ok(BufWriter::new(file))
}
