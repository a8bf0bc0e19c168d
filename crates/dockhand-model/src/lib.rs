#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Classification of one physical Dockerfile line. Only the keywords the
/// check catalog cares about get their own variant; everything else is
/// `Other` but still carries its raw text through whole-line scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionKind {
    From,
    Run,
    Copy,
    Add,
    Arg,
    User,
    Other,
}

impl InstructionKind {
    /// Exact, case-sensitive keyword match. Lowercase spellings are `Other`.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "FROM" => Self::From,
            "RUN" => Self::Run,
            "COPY" => Self::Copy,
            "ADD" => Self::Add,
            "ARG" => Self::Arg,
            "USER" => Self::User,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::From => "FROM",
            Self::Run => "RUN",
            Self::Copy => "COPY",
            Self::Add => "ADD",
            Self::Arg => "ARG",
            Self::User => "USER",
            Self::Other => "OTHER",
        }
    }
}

/// One classified physical line. `line` is 1-based over the source text,
/// `raw` is the whitespace-trimmed full line, `args` the trimmed remainder
/// after the first token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub kind: InstructionKind,
    pub line: usize,
    pub raw: String,
    pub args: String,
}

impl Instruction {
    pub fn arg_tokens(&self) -> impl Iterator<Item = &str> {
        self.args.split_whitespace()
    }
}

/// Ordered instruction sequence for one recipe. Built once per analysis and
/// never mutated afterward; comments and blank lines never appear here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dockerfile {
    pub instructions: Vec<Instruction>,
}

impl Dockerfile {
    /// Number of build stages, i.e. `FROM` instructions.
    pub fn stage_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|ins| ins.kind == InstructionKind::From)
            .count()
    }

    pub fn instructions_of(&self, kind: InstructionKind) -> impl Iterator<Item = &Instruction> {
        self.instructions.iter().filter(move |ins| ins.kind == kind)
    }
}

/// One entry of an image build history. `size_bytes` is optional on input:
/// metadata-only history rows carry no size and are skipped by the
/// summarizer. The aliases accept container-engine history spelling
/// (`CreatedBy`/`Size`) directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerRecord {
    #[serde(default, alias = "CreatedBy")]
    pub command: String,
    #[serde(default, alias = "Size")]
    pub size_bytes: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerLine {
    pub command: String,
    pub size_bytes: u64,
    pub human_size: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeReport {
    pub total_bytes: u64,
    pub layers: Vec<LayerLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub source: String,
    pub suggestions: Vec<String>,
}

pub fn analysis_report_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "dockhand analysis report",
        "type": "object",
        "required": ["source", "suggestions"],
        "properties": {
            "source": {"type": "string"},
            "suggestions": {"type": "array", "items": {"type": "string"}}
        }
    })
}

pub fn size_report_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "dockhand size report",
        "type": "object",
        "required": ["total_bytes", "layers"],
        "properties": {
            "total_bytes": {"type": "integer", "minimum": 0},
            "layers": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["command", "size_bytes", "human_size"],
                    "properties": {
                        "command": {"type": "string"},
                        "size_bytes": {"type": "integer", "minimum": 0},
                        "human_size": {"type": "string"}
                    }
                }
            }
        }
    })
}
