use crate::error::GitResult;
use serde::{Deserialize, Serialize};

pub const REFS_HEADS: &str = "refs/heads/";
pub const REFS_TAGS: &str = "refs/tags/";

/// Short name of a head or tag refspec; anything else comes back unchanged
pub fn ref_short_name(refspec: &str) -> &str {
    if let Some(name) = refspec.strip_prefix(REFS_HEADS) {
        name
    } else if let Some(name) = refspec.strip_prefix(REFS_TAGS) {
        name
    } else {
        refspec
    }
}

/// Commit ID from `show-ref --verify` output: the token before the first space
pub fn parse_verify_output(output: &str) -> String {
    output
        .split(' ')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Parse `show-ref` output, one `<sha> <refspec>` per line.
///
/// Lines that do not split into exactly two fields are dropped.
pub fn parse_show_ref(output: &str) -> GitResult<Vec<Reference>> {
    let mut refs = Vec::new();

    for line in output.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if let &[id, refspec] = fields.as_slice() {
            refs.push(Reference {
                id: id.to_string(),
                refspec: refspec.to_string(),
            });
        }
    }

    Ok(refs)
}

/// Where the diff-stat scan currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatScan {
    Files,
    Summary,
}

/// Parse `git diff --stat` output.
///
/// Per-file lines are read until the first non-empty line without a `|`;
/// that line becomes the summary and nothing after it is examined.
pub fn parse_diff_stat(output: &str) -> GitResult<DiffStat> {
    let mut stat = DiffStat::default();
    let mut state = StatScan::Files;

    for line in output.lines() {
        if state == StatScan::Summary {
            break;
        }

        match line.split_once('|') {
            Some((path, _)) => stat.changes.push(FileChange {
                path: path.trim_matches(' ').to_string(),
                is_binary: line.contains("| Bin"),
            }),
            None if line.is_empty() => {}
            None => {
                stat.summary = line.trim_matches(' ').to_string();
                state = StatScan::Summary;
            }
        }
    }

    Ok(stat)
}

/// A git reference as listed by `show-ref`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub id: String,
    pub refspec: String,
}

impl Reference {
    pub fn short_name(&self) -> &str {
        ref_short_name(&self.refspec)
    }
}

/// One file entry of a diff-stat block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub path: String,
    pub is_binary: bool,
}

/// Parsed diff-stat block: file entries in output order plus the summary line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStat {
    pub changes: Vec<FileChange>,
    pub summary: String,
}
