use std::collections::BTreeSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use dockhand_model::AnalysisReport;

use crate::checks::{catalog, Check, CheckContext};
use crate::dockerfile;
use crate::ports::Fs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    SourceNotFound(PathBuf),
    SourceRead { path: PathBuf, detail: String },
}

impl std::fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SourceNotFound(path) => {
                write!(f, "Dockerfile not found at {}", path.display())
            }
            Self::SourceRead { path, detail } => {
                write!(f, "cannot read {} ({detail})", path.display())
            }
        }
    }
}

impl std::error::Error for AnalyzeError {}

/// Where the recipe came from and what the build-context checks may read.
/// Both fields are `None` for pure-text analysis.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeRequest {
    pub recipe_dir: Option<PathBuf>,
    pub context_root: Option<PathBuf>,
}

impl AnalyzeRequest {
    /// Request for a recipe loaded from `path`: the ignore-file lookup uses
    /// the recipe's directory and COPY sources resolve against
    /// `context_root`, defaulting to that same directory.
    pub fn for_file(path: &Path, context_root: Option<PathBuf>) -> Self {
        let recipe_dir = path.parent().map(|dir| {
            if dir.as_os_str().is_empty() {
                PathBuf::from(".")
            } else {
                dir.to_path_buf()
            }
        });
        let context_root = context_root.or_else(|| recipe_dir.clone());
        Self {
            recipe_dir,
            context_root,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub id: &'static str,
    pub name: &'static str,
    pub message: &'static str,
    pub triggered: bool,
}

/// Runs every entry in catalog order. A panicking predicate degrades to
/// "not triggered" and never aborts the run.
pub fn evaluate(checks: &[Check], ctx: &CheckContext<'_>) -> Vec<CheckOutcome> {
    checks
        .iter()
        .map(|check| {
            let triggered = catch_unwind(AssertUnwindSafe(|| (check.eval)(ctx))).unwrap_or(false);
            CheckOutcome {
                id: check.id,
                name: check.name,
                message: check.message,
                triggered,
            }
        })
        .collect()
}

pub fn analyze_outcomes(fs: &dyn Fs, text: &str, request: &AnalyzeRequest) -> Vec<CheckOutcome> {
    let model = dockerfile::parse(text);
    let ctx = CheckContext {
        model: &model,
        fs,
        recipe_dir: request.recipe_dir.as_deref(),
        context_root: request.context_root.as_deref(),
    };
    evaluate(&catalog(), &ctx)
}

/// Messages of triggered outcomes, deduplicated and sorted by byte order.
pub fn collect_suggestions(outcomes: &[CheckOutcome]) -> Vec<String> {
    let mut messages = BTreeSet::new();
    for outcome in outcomes {
        if outcome.triggered {
            messages.insert(outcome.message.to_string());
        }
    }
    messages.into_iter().collect()
}

pub fn analyze_text(fs: &dyn Fs, text: &str, request: &AnalyzeRequest) -> Vec<String> {
    collect_suggestions(&analyze_outcomes(fs, text, request))
}

pub fn load_source(fs: &dyn Fs, path: &Path) -> Result<String, AnalyzeError> {
    if !fs.exists(Path::new("."), path) {
        return Err(AnalyzeError::SourceNotFound(path.to_path_buf()));
    }
    fs.read_text(Path::new("."), path)
        .map_err(|err| AnalyzeError::SourceRead {
            path: path.to_path_buf(),
            detail: err.to_string(),
        })
}

/// One-call entry for file-based analysis. A missing path is the only
/// propagated analysis failure; everything downstream of a successful read
/// is infallible.
pub fn analyze_file(
    fs: &dyn Fs,
    path: &Path,
    context_root: Option<PathBuf>,
) -> Result<AnalysisReport, AnalyzeError> {
    let text = load_source(fs, path)?;
    let request = AnalyzeRequest::for_file(path, context_root);
    let suggestions = analyze_text(fs, &text, &request);
    Ok(AnalysisReport {
        source: path.display().to_string(),
        suggestions,
    })
}
