//! Prompt contracts — declarative schemas of the sections an analysis
//! completion is expected to contain.
//!
//! A contract names, in order, every section the prompt asks the model to
//! emit: the stable section id, the human-readable header token the model
//! must reproduce, and the expected body shape. Exactly one section carries
//! the numeric ATS score. The section set is fixed at construction; the
//! parser either yields a value for every id or reports a failure — never a
//! partial mapping.
//!
//! One preset exists per prompt template the service actually ships. The
//! calling front-end picks the preset matching the prompt it wants sent and
//! receives sections keyed by that preset's ids.

use serde::Serialize;

/// Expected shape of a section body. Drives the format exemplar rendered
/// into the prompt; the parser itself only treats the score section
/// specially and accepts arbitrary text everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyShape {
    /// Free-form `- ...` bulleted lines.
    Bullets,
    /// `1. ...` numbered lines.
    Numbered,
    /// A single `NN/100` value on its own line.
    Score,
    /// One `Component: N/M` line per weighted scoring criterion.
    SubScores,
}

/// One expected section: stable id, header token, body shape.
#[derive(Debug, Clone, Serialize)]
pub struct SectionSpec {
    pub id: &'static str,
    /// Header text as the prompt prints it (matched case-insensitively,
    /// without the surrounding delimiter).
    pub header: &'static str,
    /// Singular noun used in the prompt's body exemplars ("Strength 1").
    pub exemplar: &'static str,
    pub shape: BodyShape,
}

/// A fixed, named specification of the sections one prompt template asks for.
#[derive(Debug, Clone, Serialize)]
pub struct PromptContract {
    pub name: &'static str,
    /// Token that wraps every header line in the model's reply (e.g. `**`).
    pub delimiter: &'static str,
    pub sections: &'static [SectionSpec],
    /// Id of the section holding the mandatory `NN/100` score.
    pub score_section: &'static str,
}

impl PromptContract {
    /// Resolves a de-delimited, trimmed header text to its section, ignoring
    /// ASCII case. `None` means the header is well-formed but unknown.
    pub fn section_for_header(&self, text: &str) -> Option<&SectionSpec> {
        self.sections
            .iter()
            .find(|s| s.header.eq_ignore_ascii_case(text))
    }

    /// The section carrying the numeric score.
    pub fn score_spec(&self) -> Option<&SectionSpec> {
        self.sections.iter().find(|s| s.id == self.score_section)
    }

    /// The sub-score breakdown section, if this contract has one.
    pub fn breakdown_spec(&self) -> Option<&SectionSpec> {
        self.sections.iter().find(|s| s.shape == BodyShape::SubScores)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Presets — one per shipped prompt template
// ────────────────────────────────────────────────────────────────────────────

const STANDARD_SECTIONS: &[SectionSpec] = &[
    SectionSpec {
        id: "strengths",
        header: "STRENGTHS",
        exemplar: "Strength",
        shape: BodyShape::Bullets,
    },
    SectionSpec {
        id: "weaknesses",
        header: "WEAKNESSES",
        exemplar: "Weakness",
        shape: BodyShape::Bullets,
    },
    SectionSpec {
        id: "required_improvements",
        header: "REQUIRED IMPROVEMENTS",
        exemplar: "Improvement",
        shape: BodyShape::Numbered,
    },
    SectionSpec {
        id: "ats_score",
        header: "ATS SCORE",
        exemplar: "Score",
        shape: BodyShape::Score,
    },
    SectionSpec {
        id: "reasoning",
        header: "REASONING",
        exemplar: "Reason",
        shape: BodyShape::Bullets,
    },
];

const DETAILED_SECTIONS: &[SectionSpec] = &[
    SectionSpec {
        id: "strengths",
        header: "Strengths:",
        exemplar: "Strength",
        shape: BodyShape::Bullets,
    },
    SectionSpec {
        id: "weaknesses",
        header: "Weaknesses:",
        exemplar: "Weakness",
        shape: BodyShape::Bullets,
    },
    SectionSpec {
        id: "required_improvements",
        header: "Required Improvements:",
        exemplar: "Improvement",
        shape: BodyShape::Numbered,
    },
    SectionSpec {
        id: "ats_score",
        header: "ATS Score:",
        exemplar: "Score",
        shape: BodyShape::Score,
    },
    SectionSpec {
        id: "reasoning",
        header: "Reasoning:",
        exemplar: "Reason",
        shape: BodyShape::Bullets,
    },
    SectionSpec {
        id: "suggested_improvements",
        header: "Suggested Improvements:",
        exemplar: "Suggestion",
        shape: BodyShape::Numbered,
    },
];

const BREAKDOWN_SECTIONS: &[SectionSpec] = &[
    SectionSpec {
        id: "missing_skills",
        header: "MISSING SKILLS",
        exemplar: "Skill",
        shape: BodyShape::Bullets,
    },
    SectionSpec {
        id: "recommendations",
        header: "RECOMMENDATIONS",
        exemplar: "Recommendation",
        shape: BodyShape::Bullets,
    },
    SectionSpec {
        id: "ats_breakdown",
        header: "ATS BREAKDOWN",
        exemplar: "Component",
        shape: BodyShape::SubScores,
    },
    SectionSpec {
        id: "ats_score",
        header: "ATS SCORE",
        exemplar: "Score",
        shape: BodyShape::Score,
    },
];

/// Five narrative sections with upper-case `**HEADER**` tokens. The default.
pub fn standard() -> PromptContract {
    PromptContract {
        name: "standard",
        delimiter: "**",
        sections: STANDARD_SECTIONS,
        score_section: "ats_score",
    }
}

/// Title-case `**Header:**` tokens plus a trailing suggestions section.
pub fn detailed() -> PromptContract {
    PromptContract {
        name: "detailed",
        delimiter: "**",
        sections: DETAILED_SECTIONS,
        score_section: "ats_score",
    }
}

/// Skills-gap sections plus a per-criterion score breakdown.
pub fn breakdown() -> PromptContract {
    PromptContract {
        name: "breakdown",
        delimiter: "**",
        sections: BREAKDOWN_SECTIONS,
        score_section: "ats_score",
    }
}

/// All shipped presets, in the order they are advertised to front-ends.
pub fn presets() -> Vec<PromptContract> {
    vec![standard(), detailed(), breakdown()]
}

/// Looks up a preset by name.
pub fn by_name(name: &str) -> Option<PromptContract> {
    presets().into_iter().find(|c| c.name == name)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_preset_has_a_score_section() {
        for contract in presets() {
            let spec = contract
                .score_spec()
                .unwrap_or_else(|| panic!("{} lacks its score section", contract.name));
            assert_eq!(spec.shape, BodyShape::Score);
        }
    }

    #[test]
    fn test_every_preset_has_unique_section_ids() {
        for contract in presets() {
            let mut ids: Vec<_> = contract.sections.iter().map(|s| s.id).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(
                ids.len(),
                contract.sections.len(),
                "duplicate section id in {}",
                contract.name
            );
        }
    }

    #[test]
    fn test_section_for_header_is_case_insensitive() {
        let contract = standard();
        let spec = contract.section_for_header("required improvements").unwrap();
        assert_eq!(spec.id, "required_improvements");
        let spec = contract.section_for_header("Ats Score").unwrap();
        assert_eq!(spec.id, "ats_score");
    }

    #[test]
    fn test_section_for_header_rejects_unknown() {
        let contract = standard();
        assert!(contract.section_for_header("EXTRA NOTES").is_none());
    }

    #[test]
    fn test_detailed_headers_carry_trailing_colon() {
        let contract = detailed();
        let spec = contract.section_for_header("strengths:").unwrap();
        assert_eq!(spec.id, "strengths");
        // Without the colon the header does not match — the colon is part of
        // the token the prompt instructs the model to reproduce.
        assert!(contract.section_for_header("strengths").is_none());
    }

    #[test]
    fn test_breakdown_preset_exposes_subscore_section() {
        let contract = breakdown();
        let spec = contract.breakdown_spec().unwrap();
        assert_eq!(spec.id, "ats_breakdown");
        assert!(standard().breakdown_spec().is_none());
    }

    #[test]
    fn test_by_name_resolves_all_presets() {
        for contract in presets() {
            assert!(by_name(contract.name).is_some());
        }
        assert!(by_name("nonexistent").is_none());
    }
}
