// SPDX-License-Identifier: Apache-2.0
//! The fixed check catalog. Every entry couples a stable id, a short name,
//! the canonical suggestion message, and a predicate over one parsed
//! recipe. Messages are the engine's output and must stay byte-exact.

use std::collections::BTreeSet;
use std::path::Path;

use dockhand_model::{Dockerfile, Instruction};
use regex::Regex;

use crate::ports::Fs;

mod build_context;
mod instruction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    /// Evaluated from the instruction model alone.
    Static,
    /// Additionally reads the local build context (ignore file, COPY sources).
    BuildContext,
}

impl CheckKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::BuildContext => "build_context",
        }
    }
}

pub type CheckFn = fn(&CheckContext<'_>) -> bool;

/// Inputs one evaluation sees. `recipe_dir` is where the sibling
/// `.dockerignore` is looked up; `context_root` is what COPY sources
/// resolve against. Either may be absent (pure-text analysis), in which
/// case the build-context checks behave as over an empty directory.
pub struct CheckContext<'a> {
    pub model: &'a Dockerfile,
    pub fs: &'a dyn Fs,
    pub recipe_dir: Option<&'a Path>,
    pub context_root: Option<&'a Path>,
}

#[derive(Debug, Clone, Copy)]
pub struct Check {
    pub id: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub message: &'static str,
    pub kind: CheckKind,
    pub eval: CheckFn,
}

pub fn catalog() -> Vec<Check> {
    vec![
        Check {
            id: "DF-001",
            name: "base_image",
            title: "Heavyweight base image",
            message: "Consider using a lighter base image (e.g., alpine, slim versions)",
            kind: CheckKind::Static,
            eval: instruction::heavy_base_image,
        },
        Check {
            id: "DF-002",
            name: "run_count",
            title: "Excessive RUN layers",
            message: "Combine multiple RUN statements to reduce image layers",
            kind: CheckKind::Static,
            eval: instruction::excessive_run_count,
        },
        Check {
            id: "DF-003",
            name: "missing_dockerignore",
            title: "Missing .dockerignore",
            message: "Add a .dockerignore file to exclude unnecessary files",
            kind: CheckKind::BuildContext,
            eval: build_context::missing_dockerignore,
        },
        Check {
            id: "DF-004",
            name: "large_copy_sources",
            title: "Large COPY sources",
            message: "Avoid copying large unnecessary files into the image",
            kind: CheckKind::BuildContext,
            eval: build_context::large_copy_sources,
        },
        Check {
            id: "DF-005",
            name: "multi_stage_opportunity",
            title: "Build tools without a multi-stage build",
            message: "Use multi-stage builds to separate build and runtime environments",
            kind: CheckKind::Static,
            eval: instruction::multi_stage_opportunity,
        },
        Check {
            id: "DF-006",
            name: "unpinned_packages",
            title: "Unpinned package versions",
            message: "Pin package versions to ensure consistent builds",
            kind: CheckKind::Static,
            eval: instruction::unpinned_packages,
        },
        Check {
            id: "DF-007",
            name: "layer_ordering",
            title: "Cache-unfriendly layer ordering",
            message: "Optimize layer ordering to improve cache utilization",
            kind: CheckKind::Static,
            eval: instruction::cache_unfriendly_ordering,
        },
        Check {
            id: "DF-008",
            name: "add_over_copy",
            title: "ADD where COPY suffices",
            message: "Prefer COPY over ADD unless URL fetching is required",
            kind: CheckKind::Static,
            eval: instruction::add_over_copy,
        },
        Check {
            id: "DF-009",
            name: "root_user",
            title: "Container runs as root",
            message: "Run container as non-root user for improved security",
            kind: CheckKind::Static,
            eval: instruction::missing_user,
        },
        Check {
            id: "DF-010",
            name: "duplicate_commands",
            title: "Duplicate commands",
            message: "Remove duplicate commands to reduce layer count",
            kind: CheckKind::Static,
            eval: instruction::duplicate_commands,
        },
        Check {
            id: "DF-011",
            name: "dockerignore_coverage",
            title: "Sparse .dockerignore coverage",
            message: "Improve .dockerignore with common exclusion patterns",
            kind: CheckKind::BuildContext,
            eval: build_context::sparse_dockerignore,
        },
        Check {
            id: "DF-012",
            name: "unused_build_args",
            title: "Unused build arguments",
            message: "Remove unused ARG declarations to reduce complexity",
            kind: CheckKind::Static,
            eval: instruction::unused_build_args,
        },
        Check {
            id: "DF-013",
            name: "dev_dependencies",
            title: "Development dependencies in the final image",
            message: "Remove development dependencies from production image",
            kind: CheckKind::Static,
            eval: instruction::dev_dependencies,
        },
    ]
}

/// Source tokens of a COPY instruction: leading `--` flags are skipped,
/// `--from=` stage copies contribute no local sources, a JSON-array form is
/// read as its string elements, and the last remaining token is the
/// destination. Fewer than two tokens means no sources.
pub fn copy_sources(ins: &Instruction) -> Vec<String> {
    let args = ins.args.trim();
    let mut tokens: Vec<String> = Vec::new();
    if args.starts_with('[') {
        if let Ok(serde_json::Value::Array(items)) = serde_json::from_str(args) {
            for item in items {
                if let serde_json::Value::String(token) = item {
                    tokens.push(token);
                }
            }
        }
    } else {
        for token in ins.arg_tokens() {
            if token.starts_with("--") {
                if token.starts_with("--from=") {
                    return Vec::new();
                }
                continue;
            }
            tokens.push(token.to_string());
        }
    }
    if tokens.len() < 2 {
        return Vec::new();
    }
    tokens.pop();
    tokens
}

/// Structural validation of the catalog itself; asserted by tests so a
/// drifting entry fails fast.
pub fn lint_catalog(checks: &[Check]) -> Vec<String> {
    let mut lints = Vec::new();
    let id_re = match Regex::new(r"^DF-[0-9]{3}$") {
        Ok(value) => value,
        Err(err) => {
            lints.push(format!("check id regex failed to compile: {err}"));
            return lints;
        }
    };
    let name_re = match Regex::new(r"^[a-z][a-z0-9_]*$") {
        Ok(value) => value,
        Err(err) => {
            lints.push(format!("check name regex failed to compile: {err}"));
            return lints;
        }
    };

    let mut ids = BTreeSet::new();
    let mut names = BTreeSet::new();
    let mut messages = BTreeSet::new();
    for check in checks {
        if !id_re.is_match(check.id) {
            lints.push(format!("`{}` does not match the DF-NNN id format", check.id));
        }
        if !ids.insert(check.id) {
            lints.push(format!("duplicate check id `{}`", check.id));
        }
        if !name_re.is_match(check.name) {
            lints.push(format!(
                "{}: name `{}` is not lower_snake",
                check.id, check.name
            ));
        }
        if !names.insert(check.name) {
            lints.push(format!("duplicate check name `{}`", check.name));
        }
        if check.title.trim().is_empty() {
            lints.push(format!("{}: empty title", check.id));
        }
        if check.message.trim().is_empty() {
            lints.push(format!("{}: empty message", check.id));
        }
        if !messages.insert(check.message) {
            lints.push(format!("duplicate check message `{}`", check.message));
        }
    }
    lints
}
