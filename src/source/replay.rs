//! 記録済みランドマークの再生 (JSON Lines)
//!
//! 1行1フレーム。人物なしは `null`、それ以外はランドマーク名 → `{x, y, z, visibility}`。
//! 記録にないランドマークは可視度0として扱う。

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Write};
use std::path::Path;

use super::{LandmarkSource, Observation};
use crate::pose::{Landmark, Pose};

type FrameRecord = Option<HashMap<String, Landmark>>;

pub struct ReplaySource<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl ReplaySource<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open landmark recording {}", path.display()))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> ReplaySource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl<R: BufRead> LandmarkSource for ReplaySource<R> {
    fn next_observation(&mut self) -> Result<Option<Observation>> {
        for line in self.lines.by_ref() {
            self.line_no += 1;
            let line = line.with_context(|| format!("Failed to read line {}", self.line_no))?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let record: FrameRecord = serde_json::from_str(line)
                .with_context(|| format!("Malformed frame at line {}", self.line_no))?;
            let observation = match record {
                None => Observation::NoPerson,
                Some(named) => Observation::Landmarks(
                    Pose::from_named(&named).with_context(|| format!("Invalid frame at line {}", self.line_no))?,
                ),
            };
            return Ok(Some(observation));
        }
        Ok(None)
    }
}

/// 観測を1行として書き出す
pub fn write_observation<W: Write>(writer: &mut W, observation: &Observation) -> Result<()> {
    let record: FrameRecord = match observation {
        Observation::NoPerson => None,
        Observation::Landmarks(pose) => Some(pose.to_named()),
    };
    serde_json::to_writer(&mut *writer, &record)?;
    writer.write_all(b"\n")?;
    Ok(())
}
