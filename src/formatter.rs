// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent Formatter: turns raw screen text into clean message content.
//!
//! Dispatch is table-driven rather than a type hierarchy: [`rules_for`]
//! looks up a static [`FormatRules`] entry keyed by [`AgentType`] and
//! applies the shared cleanup pipeline followed by that entry's
//! agent-specific touches.

use crate::config::AgentType;

/// Per-agent formatting rules.
struct FormatRules {
    /// Line prefix marking the trailing input-prompt region to strip.
    prompt_marker: &'static str,
    /// Agent-specific cleanup applied after the shared rules.
    strip_spinners: bool,
}

const GENERIC_RULES: FormatRules = FormatRules { prompt_marker: "> ", strip_spinners: false };
const CLAUDE_RULES: FormatRules = FormatRules { prompt_marker: "\u{2771} ", strip_spinners: true };

fn rules_for(agent_type: AgentType) -> &'static FormatRules {
    match agent_type {
        AgentType::Claude => &CLAUDE_RULES,
        AgentType::Generic => &GENERIC_RULES,
    }
}

/// Braille spinner glyphs used by common REPL progress indicators
/// (U+2800..U+28FF).
fn is_spinner_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| ('\u{2800}'..='\u{28FF}').contains(&c) || c.is_whitespace())
}

/// A line consisting solely of box-drawing characters and whitespace is
/// purely chrome and carries no content.
fn is_box_drawing_chrome(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed.chars().all(|c| {
            matches!(c, '─' | '│' | '┌' | '┐' | '└' | '┘' | '├' | '┤' | '┬' | '┴' | '┼' | '╭' | '╮' | '╰' | '╯' | '═' | '║' | '━' | '┃')
                || c.is_whitespace()
        })
}

/// Format a raw screen snapshot's text into clean agent message content,
/// per the shared rules plus the agent type's own table entry.
pub fn format_reply(text: &str, agent_type: AgentType) -> String {
    let rules = rules_for(agent_type);
    let mut lines: Vec<&str> = text.lines().collect();

    // Remove the trailing input-prompt region: the last non-blank line, if
    // it begins with this agent's prompt marker.
    while let Some(last) = lines.last() {
        if last.trim().is_empty() {
            lines.pop();
            continue;
        }
        break;
    }
    if lines.last().is_some_and(|l| l.trim_start().starts_with(rules.prompt_marker)) {
        lines.pop();
    }

    // The reply region lives below the last echoed user-input line: a PTY
    // echoes back whatever was submitted at the previous prompt, so a line
    // beginning with this agent's prompt marker is that echo, not a reply.
    // Everything up to and including it is chrome, not content.
    if let Some(echo_idx) = lines.iter().rposition(|l| l.trim_start().starts_with(rules.prompt_marker)) {
        lines = lines.split_off(echo_idx + 1);
    }

    let mut cleaned: Vec<&str> = Vec::with_capacity(lines.len());
    for line in lines {
        if is_box_drawing_chrome(line) {
            continue;
        }
        if rules.strip_spinners && is_spinner_line(line) {
            continue;
        }
        cleaned.push(line);
    }

    // Trim trailing empty lines left after chrome/spinner removal.
    while cleaned.last().is_some_and(|l| l.trim().is_empty()) {
        cleaned.pop();
    }

    // Collapse runs of >=2 blank lines to a single blank line.
    let mut out: Vec<&str> = Vec::with_capacity(cleaned.len());
    let mut blank_run = 0usize;
    for line in cleaned {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push(line);
    }

    out.join("\n")
}

#[cfg(test)]
#[path = "formatter_tests.rs"]
mod tests;
