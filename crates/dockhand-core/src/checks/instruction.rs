// SPDX-License-Identifier: Apache-2.0
//! Predicates evaluated from the instruction model alone.

use std::collections::BTreeSet;

use dockhand_model::{Instruction, InstructionKind};
use regex::Regex;

use super::CheckContext;

const HEAVY_BASES: [&str; 4] = ["ubuntu", "debian", "node", "python"];

const BUILD_TOOL_MARKERS: [&str; 6] = [
    "gcc",
    "make",
    "maven",
    "gradle",
    "npm install",
    "pip install",
];

const DEV_DEPENDENCY_MARKERS: [&str; 4] = ["dev-dependencies", "--dev", "debug", "testing"];

/// Package-manager install patterns paired with the pin syntax that
/// silences them. Case-sensitive on purpose: `apt-get install` is not
/// claimed by the `apt` rule.
const PACKAGE_PIN_RULES: [(&str, &str); 2] = [
    (r"(apt|apk|yum|dnf)\s+install", r"=\d+"),
    (r"(pip|pip3|npm|yarn|gem)\s+install", r"==|@"),
];

fn matches(pattern: &str, text: &str) -> bool {
    match Regex::new(pattern) {
        Ok(re) => re.is_match(text),
        Err(_) => false,
    }
}

/// Image reference of a FROM instruction: the first argument token that is
/// not a `--`-prefixed flag such as `--platform=...`.
fn from_image_ref(ins: &Instruction) -> Option<&str> {
    ins.arg_tokens().find(|token| !token.starts_with("--"))
}

pub(super) fn heavy_base_image(ctx: &CheckContext<'_>) -> bool {
    ctx.model
        .instructions_of(InstructionKind::From)
        .filter_map(from_image_ref)
        .any(|reference| {
            let reference = reference.to_lowercase();
            HEAVY_BASES.iter().any(|base| {
                reference
                    .strip_prefix(base)
                    .map_or(false, |rest| rest.is_empty() || rest.starts_with(':'))
            })
        })
}

pub(super) fn excessive_run_count(ctx: &CheckContext<'_>) -> bool {
    ctx.model.instructions_of(InstructionKind::Run).count() > 5
}

pub(super) fn multi_stage_opportunity(ctx: &CheckContext<'_>) -> bool {
    ctx.model.stage_count() < 2
        && ctx.model.instructions_of(InstructionKind::Run).any(|ins| {
            let raw = ins.raw.to_lowercase();
            BUILD_TOOL_MARKERS.iter().any(|marker| raw.contains(marker))
        })
}

pub(super) fn unpinned_packages(ctx: &CheckContext<'_>) -> bool {
    ctx.model.instructions_of(InstructionKind::Run).any(|ins| {
        PACKAGE_PIN_RULES
            .iter()
            .any(|(tool, pin)| matches(tool, &ins.raw) && !matches(pin, &ins.raw))
    })
}

/// One boolean folded left to right: a `COPY` of the whole context sets it,
/// any later `RUN` while it is set triggers.
pub(super) fn cache_unfriendly_ordering(ctx: &CheckContext<'_>) -> bool {
    let mut copied_context = false;
    for ins in &ctx.model.instructions {
        match ins.kind {
            InstructionKind::Copy if ins.raw.contains(". .") => copied_context = true,
            InstructionKind::Run if copied_context => return true,
            _ => {}
        }
    }
    false
}

pub(super) fn add_over_copy(ctx: &CheckContext<'_>) -> bool {
    ctx.model
        .instructions_of(InstructionKind::Add)
        .any(|ins| !matches(r"(https?://|\.tar\.|\.zip$)", &ins.raw))
}

pub(super) fn missing_user(ctx: &CheckContext<'_>) -> bool {
    ctx.model
        .instructions_of(InstructionKind::User)
        .next()
        .is_none()
}

pub(super) fn duplicate_commands(ctx: &CheckContext<'_>) -> bool {
    let mut seen = BTreeSet::new();
    ctx.model
        .instructions
        .iter()
        .filter(|ins| {
            matches!(
                ins.kind,
                InstructionKind::Run | InstructionKind::Copy | InstructionKind::Add
            )
        })
        .any(|ins| !seen.insert(ins.raw.as_str()))
}

/// Declared name of an `ARG` instruction: the first argument token up to an
/// optional `=`. A bare `ARG` declares nothing.
fn declared_arg_name(ins: &Instruction) -> Option<&str> {
    let token = ins.arg_tokens().next()?;
    let name = token.split('=').next().unwrap_or_default().trim();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

pub(super) fn unused_build_args(ctx: &CheckContext<'_>) -> bool {
    let declared: BTreeSet<&str> = ctx
        .model
        .instructions_of(InstructionKind::Arg)
        .filter_map(declared_arg_name)
        .collect();
    if declared.is_empty() {
        return false;
    }
    let Ok(reference_re) = Regex::new(r"\$\{?(\w+)") else {
        return false;
    };
    let mut referenced: BTreeSet<&str> = BTreeSet::new();
    for ins in &ctx.model.instructions {
        for caps in reference_re.captures_iter(&ins.raw) {
            if let Some(name) = caps.get(1) {
                referenced.insert(name.as_str());
            }
        }
    }
    !declared.is_subset(&referenced)
}

pub(super) fn dev_dependencies(ctx: &CheckContext<'_>) -> bool {
    ctx.model.stage_count() < 2
        && ctx.model.instructions_of(InstructionKind::Run).any(|ins| {
            let raw = ins.raw.to_lowercase();
            DEV_DEPENDENCY_MARKERS
                .iter()
                .any(|marker| raw.contains(marker))
        })
}
