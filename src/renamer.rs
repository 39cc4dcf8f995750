//! Renames the files of one book directory to `001.mp3`, `002.mp3`, ...
//! in file-name order, the layout the player reads tracks from.

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::RenameError;

const CONFIRMATION: &str = "yes";

/// Target name of the `index`-th file (zero based).
pub fn track_file_name(index: usize) -> String {
    format!("{:03}.mp3", index + 1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameStep {
    pub from: PathBuf,
    pub to: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct RenamePlan {
    steps: Vec<RenameStep>,
}

impl RenamePlan {
    /// Regular files of `dir` sorted by name; subdirectories are left alone.
    pub fn for_dir(dir: &Path) -> Result<Self, RenameError> {
        if !dir.is_dir() {
            return Err(RenameError::NotADirectory(dir.to_path_buf()));
        }
        let io_err = |source: std::io::Error| RenameError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            if entry.file_type().map_err(io_err)?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        let steps = files
            .into_iter()
            .enumerate()
            .map(|(i, from)| RenameStep {
                to: dir.join(track_file_name(i)),
                from,
            })
            .collect();
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[RenameStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Moves every file through a temporary name first, so a target that is
    /// still some other file's current name is never overwritten.
    pub fn apply(&self) -> Result<usize, RenameError> {
        let mut staged = Vec::new();
        for (i, step) in self.steps.iter().enumerate() {
            if step.from == step.to {
                continue;
            }
            let tmp = step.to.with_file_name(format!(".bookreader-rename-{i}.tmp"));
            rename(&step.from, &tmp)?;
            staged.push((tmp, &step.to));
        }
        for (tmp, to) in &staged {
            rename(tmp, to)?;
        }
        tracing::info!(renamed = staged.len(), "book files renamed");
        Ok(staged.len())
    }
}

fn rename(from: &Path, to: &Path) -> Result<(), RenameError> {
    fs::rename(from, to).map_err(|source| RenameError::Io {
        path: from.to_path_buf(),
        source,
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RenameOptions {
    /// List the new names and stop.
    pub dry_run: bool,
    /// Skip the confirmation prompt.
    pub assume_yes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed(usize),
    Listed,
    Aborted,
    Empty,
}

/// Lists `old >>> new` for every file, asks for a typed "yes" on `input`
/// and renames.
pub fn run(
    dir: &Path,
    options: RenameOptions,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<RenameOutcome, RenameError> {
    let plan = RenamePlan::for_dir(dir)?;
    if plan.is_empty() {
        writeln!(out, "No files in {}", dir.display())?;
        return Ok(RenameOutcome::Empty);
    }

    for step in plan.steps() {
        writeln!(out, "{} >>> {}", display_name(&step.from), display_name(&step.to))?;
    }
    if options.dry_run {
        return Ok(RenameOutcome::Listed);
    }

    if !options.assume_yes {
        write!(out, "Type \"{CONFIRMATION}\" to accept these file names: ")?;
        out.flush()?;
        let mut answer = String::new();
        input.read_line(&mut answer)?;
        if answer.trim() != CONFIRMATION {
            writeln!(out, "Aborted, nothing renamed.")?;
            tracing::info!(dir = %dir.display(), "rename aborted");
            return Ok(RenameOutcome::Aborted);
        }
    }

    let renamed = plan.apply()?;
    writeln!(out, "Done, {renamed} files renamed.")?;
    Ok(RenameOutcome::Renamed(renamed))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
