//! The fixed list of clue scenes to generate.

use crate::error::{ClueGenError, Result};
use std::collections::HashSet;
use std::path::{Component, Path};

/// One image to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Job {
    /// Short identifier, unique within the list.
    pub id: &'static str,
    /// Output file name relative to the output directory.
    pub filename: &'static str,
    /// Free-text scene description.
    pub scene: &'static str,
}

static CLUE_JOBS: [Job; 5] = [
    Job {
        id: "01",
        filename: "clue-01.png",
        scene: "Chris and Kimberly smiling at each other with tiny floating hearts, \
                affectionate and playful.",
    },
    Job {
        id: "02",
        filename: "clue-02.png",
        scene: "Chris creating a gift with craft materials on a table while smiling, \
                Kimberly admiring him nearby.",
    },
    Job {
        id: "03",
        filename: "clue-03.png",
        scene: "Chris playfully hiding behind the side of a couch with a mischievous smile.",
    },
    Job {
        id: "04",
        filename: "clue-04.png",
        scene: "Chris and Kimberly sitting together watching TV on a cozy couch, \
                cute and relaxed.",
    },
    Job {
        id: "05",
        filename: "clue-05.png",
        scene: "Chris playfully hiding under a wooden table in side view, \
                table above and Chris crouched below the tabletop.",
    },
];

/// Returns the clue jobs in processing order.
pub fn jobs() -> &'static [Job] {
    &CLUE_JOBS
}

/// Checks that ids and filenames are unique and that every filename stays
/// inside the output directory.
pub fn validate_jobs(jobs: &[Job]) -> Result<()> {
    let mut ids = HashSet::new();
    let mut filenames = HashSet::new();

    for job in jobs {
        if job.id.is_empty() {
            return Err(ClueGenError::InvalidJob("job with empty id".into()));
        }
        if !ids.insert(job.id) {
            return Err(ClueGenError::InvalidJob(format!(
                "duplicate job id {}",
                job.id
            )));
        }
        if !filenames.insert(job.filename) {
            return Err(ClueGenError::InvalidJob(format!(
                "duplicate filename {}",
                job.filename
            )));
        }
        validate_filename(job.filename)
            .map_err(|reason| ClueGenError::InvalidJob(format!("clue {}: {reason}", job.id)))?;
    }

    Ok(())
}

fn validate_filename(filename: &str) -> std::result::Result<(), String> {
    if filename.is_empty() {
        return Err("empty filename".into());
    }
    let path = Path::new(filename);
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => return Err("filename must not contain '..'".into()),
            Component::RootDir | Component::Prefix(_) => {
                return Err("filename must be relative".into())
            }
        }
    }
    Ok(())
}
