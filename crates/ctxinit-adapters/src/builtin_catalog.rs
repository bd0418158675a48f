//! The built-in template catalog: every file ctxinit manages, with its
//! placeholder-bearing content and flags.
//!
//! Layout: one short router (`AGENTS.md`) plus thin per-agent pointer files,
//! with the real context under `docs/`. Agents that only read their own
//! file still end up at the same shared documents.

use ctxinit_core::{
    domain::{RelativePath, TemplateCatalog, TemplateFile},
    error::CtxResult,
};

const AGENTS: &str = r#"# Agent Instructions

This file routes coding agents to the project's shared context. Keep it
short; the details live in `docs/`.

## Read These First

1. [docs/PROJECT.md](docs/PROJECT.md) - what this project is, its stack, and how to build it
2. [docs/CONVENTIONS.md](docs/CONVENTIONS.md) - code style and team standards
3. [docs/TODO.md](docs/TODO.md) - current work and what is next
4. [docs/DECISIONS.md](docs/DECISIONS.md) - durable decisions and their rationale

## Ground Rules

- Prefer small, reversible changes
- Ask before destructive actions
- Provide copy-paste commands
- State assumptions
"#;

const CLAUDE: &str = r#"# Claude Instructions

Read [AGENTS.md](AGENTS.md) first. It routes to the shared project context
under `docs/`. Keep agent-specific notes here only when they genuinely
differ from the shared instructions.
"#;

const GEMINI: &str = r#"# Gemini Instructions

Read [AGENTS.md](AGENTS.md) first. It routes to the shared project context
under `docs/`. Keep agent-specific notes here only when they genuinely
differ from the shared instructions.
"#;

const GITIGNORE: &str = r#"# Dependencies and build output
node_modules/
target/
dist/
build/
__pycache__/
*.pyc

# Environment
.env
.env.local

# Editors
.idea/
*.swp
.DS_Store
"#;

const PROJECT: &str = r#"# Project

## Purpose

TBD (Describe what this project is for and expected outcomes)

## Stack

- **Language(s):** {{LANGUAGE}}
- **Runtime:** {{RUNTIME}}
- **Key dependencies:** TBD

## Commands

- Setup: {{SETUP_COMMAND}}
- Build: {{BUILD_COMMAND}}
- Test: {{TEST_COMMAND}}
- Lint/Format: {{LINT_COMMAND}}
- Run: {{RUN_COMMAND}}

## Constraints

- Document non-negotiable constraints here.
- List security/compliance/performance boundaries.
- Note delivery deadlines or operational limits.
"#;

const CONVENTIONS: &str = r#"# Conventions

## Code Style

- TBD (formatter, linter, and the settings that are not defaults)

## Naming

- TBD (casing, file layout, test naming)

## Reviews and Commits

- TBD (branch naming, commit message format, review expectations)
"#;

const TODO: &str = r#"# TODO

## In Progress
- Fill `docs/PROJECT.md` with real stack and command details.

## Next
- Fill `docs/CONVENTIONS.md` with concrete team standards.
- Review generated agent router files and customize as needed.

## Blocked
- (none)

## Done
- Scaffolded agent context files.
"#;

const DECISIONS: &str = r#"# Decisions

Use one ADR-lite entry per durable decision.

## Entry Format
- Date: YYYY-MM-DD
- Decision: Short statement
- Rationale: Why this choice was made
- Alternatives: Options considered and why they were not selected

## Entries
- Date: TBD
- Decision: Adopt a shared routing layout for agent context.
- Rationale: A single source of truth (AGENTS.md + docs/*) that all coding agents can share.
- Alternatives: Per-agent full instructions; rejected due to drift risk and maintenance overhead.
"#;

const CURSOR_RULES: &str = r#"---
description: Project context routing
alwaysApply: true
---

Read AGENTS.md at the repository root first. It routes to the shared
project context in docs/ (PROJECT.md, CONVENTIONS.md, TODO.md,
DECISIONS.md). Follow those documents over ad-hoc assumptions.
"#;

const COPILOT: &str = r#"# Copilot Instructions

Read AGENTS.md at the repository root first. It routes to the shared
project context under docs/. Follow docs/CONVENTIONS.md for style and
docs/PROJECT.md for build and test commands.
"#;

/// Build the validated built-in catalog.
pub fn builtin_catalog() -> CtxResult<TemplateCatalog> {
    let files = vec![
        TemplateFile::new("AGENTS.md", AGENTS).minimal(),
        TemplateFile::new("CLAUDE.md", CLAUDE).minimal(),
        TemplateFile::new("GEMINI.md", GEMINI),
        // Users customize .gitignore heavily; clobbering it would lose
        // their changes, so it is preserved and excluded from removal.
        TemplateFile::new(".gitignore", GITIGNORE)
            .preserved()
            .not_removable(),
        TemplateFile::new("docs/PROJECT.md", PROJECT).minimal(),
        TemplateFile::new("docs/CONVENTIONS.md", CONVENTIONS).minimal(),
        TemplateFile::new("docs/TODO.md", TODO),
        TemplateFile::new("docs/DECISIONS.md", DECISIONS),
        TemplateFile::new(".cursor/rules/project.mdc", CURSOR_RULES),
        TemplateFile::new(".github/copilot-instructions.md", COPILOT),
    ];

    let catalog = TemplateCatalog::new(
        files,
        RelativePath::new("AGENTS.md"),
        // Deepest first, so nested managed dirs empty out before parents.
        vec![
            RelativePath::new("docs"),
            RelativePath::new(".cursor/rules"),
            RelativePath::new(".cursor"),
        ],
    )?;
    Ok(catalog)
}
