/// Which derived artifact a generation request is asking for.
///
/// `Combined` is the template-selection default: an unrecognized mode
/// string renders the combined template rather than failing, and its
/// output surfaces in the `combined` result field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    Summary,
    ContinuationContext,
    Readme,
    Combined,
}

impl GenerationMode {
    /// Parse a wire-format mode string. Unknown strings fall back to
    /// [`GenerationMode::Combined`]; this is a deliberate default, not
    /// an error path.
    pub fn parse(mode: &str) -> Self {
        match mode {
            "summary" => Self::Summary,
            "continuation-context" => Self::ContinuationContext,
            "readme" => Self::Readme,
            _ => Self::Combined,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::ContinuationContext => "continuation-context",
            Self::Readme => "readme",
            Self::Combined => "combined",
        }
    }

    /// Upstream response-length cap for this mode, in tokens.
    pub fn response_token_limit(&self) -> u32 {
        match self {
            Self::Summary => 512,
            _ => 2048,
        }
    }
}

const SUMMARY_INSTRUCTIONS: &str = "\
You are reviewing an AI-assisted coding session. Below you will find the \
chat transcript of the session and the code it produced. Write a terse \
summary of the session in 2-3 sentences: what was built, the approach \
taken, and anything left unfinished. Plain prose only, no headings and \
no bullet points.";

const CONTINUATION_INSTRUCTIONS: &str = "\
You are preparing a continuation context document for an AI-assisted \
coding session, so that a future session can pick up exactly where this \
one left off. Below you will find the chat transcript of the session and \
the code it produced. Produce a structured document with these sections:

## Goal
What the session set out to accomplish.

## Current State
What exists now, including the shape of the code below.

## Key Decisions
Design and implementation choices made during the session, with the \
reasoning captured in the transcript.

## Next Steps
Concrete remaining work, in priority order.";

const CONTINUATION_FORMAT: &str = "\
Format the document in Markdown using exactly the four section headings \
above, in that order. Refer to specific functions and files from the \
code where relevant.";

const README_INSTRUCTIONS: &str = "\
You are writing a handoff README for an AI-assisted coding session. \
Below you will find the chat transcript of the session and the code it \
produced. Tell the story of the session as a narrative: what was asked \
for, how the solution evolved, and where it ended up. Where the \
transcript carries timestamps, anchor the narrative to them.";

const README_FORMAT: &str = "\
Return Markdown beginning with a top-level title naming the project, \
followed by the narrative in chronological order, and close with a short \
section describing how to run or use the resulting code.";

const COMBINED_INSTRUCTIONS: &str = "\
You are reviewing an AI-assisted coding session. Below you will find the \
chat transcript of the session and the code it produced. Describe the \
session and its outcome: summarize what was built, explain the structure \
of the resulting code, and note anything a reader would need to continue \
the work.";

/// Render the prompt for one generation request.
///
/// Pure string assembly over its three inputs: the transcript and code
/// body are interpolated verbatim, with no escaping or truncation. Every
/// template follows the same structure of instructions, a `---`
/// separator, the transcript, another separator, the code, and for some
/// modes trailing formatting instructions.
pub fn compose(mode: GenerationMode, chat_text: &str, code_text: &str) -> String {
    let (instructions, format_hint) = match mode {
        GenerationMode::Summary => (SUMMARY_INSTRUCTIONS, None),
        GenerationMode::ContinuationContext => {
            (CONTINUATION_INSTRUCTIONS, Some(CONTINUATION_FORMAT))
        }
        GenerationMode::Readme => (README_INSTRUCTIONS, Some(README_FORMAT)),
        GenerationMode::Combined => (COMBINED_INSTRUCTIONS, None),
    };

    let mut parts = vec![
        instructions.to_string(),
        "---".to_string(),
        format!("Chat transcript:\n{chat_text}"),
        "---".to_string(),
        format!("Code:\n{code_text}"),
    ];

    if let Some(hint) = format_hint {
        parts.push(hint.to_string());
    }

    parts.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHAT: &str = "We built a parser together.";
    const CODE: &str = "export function parse(input) { return input.trim(); }";

    #[test]
    fn test_compose_is_deterministic() {
        for mode in [
            GenerationMode::Summary,
            GenerationMode::ContinuationContext,
            GenerationMode::Readme,
            GenerationMode::Combined,
        ] {
            assert_eq!(compose(mode, CHAT, CODE), compose(mode, CHAT, CODE));
        }
    }

    #[test]
    fn test_compose_interpolates_both_bodies_verbatim() {
        let prompt = compose(GenerationMode::Summary, CHAT, CODE);
        assert!(prompt.contains(&format!("Chat transcript:\n{CHAT}")));
        assert!(prompt.contains(&format!("Code:\n{CODE}")));
    }

    #[test]
    fn test_compose_structure() {
        let prompt = compose(GenerationMode::ContinuationContext, CHAT, CODE);

        assert!(prompt.starts_with(CONTINUATION_INSTRUCTIONS));
        assert_eq!(prompt.matches("\n\n---\n\n").count(), 2);

        let transcript_at = prompt.find(CHAT).unwrap();
        let code_at = prompt.find(CODE).unwrap();
        assert!(transcript_at < code_at);
        assert!(prompt.ends_with(CONTINUATION_FORMAT));
    }

    #[test]
    fn test_templates_differ_by_mode() {
        let summary = compose(GenerationMode::Summary, CHAT, CODE);
        let continuation = compose(GenerationMode::ContinuationContext, CHAT, CODE);
        let readme = compose(GenerationMode::Readme, CHAT, CODE);
        let combined = compose(GenerationMode::Combined, CHAT, CODE);

        assert_ne!(summary, continuation);
        assert_ne!(summary, readme);
        assert_ne!(summary, combined);
        assert_ne!(continuation, readme);
        assert_ne!(continuation, combined);
        assert_ne!(readme, combined);
    }

    #[test]
    fn test_special_characters_pass_through_unescaped() {
        let code = r#"const re = /"---"\n/g; let s = `${a} & <b>`;"#;
        let prompt = compose(GenerationMode::Readme, CHAT, code);
        assert!(prompt.contains(code));
    }

    #[test]
    fn test_parse_known_modes() {
        assert_eq!(GenerationMode::parse("summary"), GenerationMode::Summary);
        assert_eq!(
            GenerationMode::parse("continuation-context"),
            GenerationMode::ContinuationContext
        );
        assert_eq!(GenerationMode::parse("readme"), GenerationMode::Readme);
    }

    #[test]
    fn test_parse_falls_back_to_combined() {
        assert_eq!(GenerationMode::parse("outline"), GenerationMode::Combined);
        assert_eq!(GenerationMode::parse(""), GenerationMode::Combined);
        // Parsing is exact-match: casing is not normalized.
        assert_eq!(GenerationMode::parse("Summary"), GenerationMode::Combined);
    }

    #[test]
    fn test_response_token_limits() {
        assert_eq!(GenerationMode::Summary.response_token_limit(), 512);
        assert_eq!(GenerationMode::ContinuationContext.response_token_limit(), 2048);
        assert_eq!(GenerationMode::Readme.response_token_limit(), 2048);
        assert_eq!(GenerationMode::Combined.response_token_limit(), 2048);
    }
}
