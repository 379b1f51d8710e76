// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt for all resume analysis calls.
pub const ANALYST_SYSTEM: &str = "You are an expert ATS analyzer. \
    You evaluate resumes against target job titles the way applicant \
    tracking software does: keywords, structure, and relevance. \
    You follow the requested output format to the letter.";

/// Instruction appended after every format block. The parser keys on the
/// header tokens, so the model must reproduce them byte-for-byte.
pub const EXACT_FORMAT_INSTRUCTION: &str = "\
    Reproduce the section headers EXACTLY as written above, each on its own \
    line, including the surrounding markers. \
    Put all section content on the lines following its header. \
    Do NOT add sections beyond those listed. \
    Do NOT add any text before the first header.";
