// SPDX-License-Identifier: Apache-2.0
//! Predicates that read the local build context. Missing context and
//! unreadable files degrade to "not triggered"; only DF-003 treats an
//! absent recipe directory as a finding.

use std::path::Path;

use dockhand_model::InstructionKind;

use super::{copy_sources, CheckContext};

const IGNORE_FILE: &str = ".dockerignore";

const IGNORE_MARKERS: [&str; 4] = [".git", "node_modules", ".env", "tmp"];

const LARGE_SOURCE_BYTES: u64 = 50 * 1024 * 1024;

pub(super) fn missing_dockerignore(ctx: &CheckContext<'_>) -> bool {
    match ctx.recipe_dir {
        Some(dir) => !ctx.fs.exists(dir, Path::new(IGNORE_FILE)),
        None => true,
    }
}

pub(super) fn sparse_dockerignore(ctx: &CheckContext<'_>) -> bool {
    let Some(dir) = ctx.recipe_dir else {
        return false;
    };
    let path = Path::new(IGNORE_FILE);
    if !ctx.fs.exists(dir, path) {
        return false;
    }
    match ctx.fs.read_text(dir, path) {
        Ok(content) => {
            let content = content.to_lowercase();
            IGNORE_MARKERS
                .iter()
                .any(|marker| !content.contains(marker))
        }
        Err(_) => false,
    }
}

pub(super) fn large_copy_sources(ctx: &CheckContext<'_>) -> bool {
    let Some(root) = ctx.context_root else {
        return false;
    };
    ctx.model
        .instructions_of(InstructionKind::Copy)
        .any(|ins| {
            copy_sources(ins).iter().any(|source| {
                let path = Path::new(source);
                ctx.fs.is_file(root, path)
                    && ctx
                        .fs
                        .file_size(root, path)
                        .map_or(false, |size| size > LARGE_SOURCE_BYTES)
            })
        })
}
