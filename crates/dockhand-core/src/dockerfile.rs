// SPDX-License-Identifier: Apache-2.0

use dockhand_model::{Dockerfile, Instruction, InstructionKind};

/// Classifies each physical line independently. Comments and blank lines
/// are dropped; continuation bodies are not joined, so a line ending in a
/// backslash is followed by `Other` lines that still participate in
/// whole-line scans. Any input is accepted.
pub fn parse(text: &str) -> Dockerfile {
    let mut instructions = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (keyword, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (trimmed, ""),
        };
        instructions.push(Instruction {
            kind: InstructionKind::from_keyword(keyword),
            line: idx + 1,
            raw: trimmed.to_string(),
            args: rest.to_string(),
        });
    }
    Dockerfile { instructions }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_comments_and_blank_lines() {
        let model = parse("# build recipe\n\nFROM alpine\n   \n# user\nUSER app\n");
        assert_eq!(model.instructions.len(), 2);
        assert_eq!(model.instructions[0].kind, InstructionKind::From);
        assert_eq!(model.instructions[1].kind, InstructionKind::User);
    }

    #[test]
    fn line_numbers_are_one_based_over_physical_lines() {
        let model = parse("# header\nFROM alpine\n\nRUN make\n");
        assert_eq!(model.instructions[0].line, 2);
        assert_eq!(model.instructions[1].line, 4);
    }

    #[test]
    fn lowercase_keywords_classify_as_other() {
        let model = parse("from alpine\nFROM alpine\n");
        assert_eq!(model.instructions[0].kind, InstructionKind::Other);
        assert_eq!(model.instructions[1].kind, InstructionKind::From);
        assert_eq!(model.stage_count(), 1);
    }

    #[test]
    fn splits_keyword_from_args() {
        let model = parse("COPY  src/  /app/src\nRUN\n");
        assert_eq!(model.instructions[0].raw, "COPY  src/  /app/src");
        assert_eq!(model.instructions[0].args, "src/  /app/src");
        assert_eq!(model.instructions[1].args, "");
    }

    #[test]
    fn continuation_bodies_stay_separate_lines() {
        let model = parse("RUN apt-get update && \\\n    apt-get install -y curl\n");
        assert_eq!(model.instructions.len(), 2);
        assert_eq!(model.instructions[0].kind, InstructionKind::Run);
        assert_eq!(model.instructions[1].kind, InstructionKind::Other);
        assert_eq!(model.instructions[1].raw, "apt-get install -y curl");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed_into_raw() {
        let model = parse("   USER app   \n");
        assert_eq!(model.instructions[0].raw, "USER app");
        assert_eq!(model.instructions[0].args, "app");
    }
}
