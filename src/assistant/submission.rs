//! Parses user input into commands or answers.

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// An answer to the current step, or a follow-up once the flow is done.
    UserInput { content: String },
    /// Leave the current persona and show the selector.
    Menu,
    /// Jump straight to another persona (`/switch research`).
    Switch { target: String },
    /// Start the current flow over.
    Reset,
    /// Print the transcript so far.
    Transcript,
    Help,
    Quit,
}

/// Parses message content into a Submission.
pub struct SubmissionParser;

impl SubmissionParser {
    pub fn parse(content: &str) -> Submission {
        let lower = content.trim().to_lowercase();

        if let Some(rest) = lower.strip_prefix("/switch") {
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                return Submission::Switch {
                    target: rest.trim().to_string(),
                };
            }
        }

        match lower.as_str() {
            "/menu" | "/back" => Submission::Menu,
            "/reset" | "/restart" => Submission::Reset,
            "/transcript" | "/history" => Submission::Transcript,
            "/help" | "/?" => Submission::Help,
            "/quit" | "/exit" => Submission::Quit,
            _ => Submission::UserInput {
                content: content.to_string(),
            },
        }
    }
}

/// Resolve a numeric shortcut (`"2"` → second option). Anything else is
/// returned unchanged.
pub fn resolve_option<'a>(input: &'a str, options: &'a [String]) -> &'a str {
    let trimmed = input.trim();
    match trimmed.parse::<usize>() {
        Ok(n) if (1..=options.len()).contains(&n) => options[n - 1].as_str(),
        _ => input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_case_insensitively() {
        assert_eq!(SubmissionParser::parse("/MENU"), Submission::Menu);
        assert_eq!(SubmissionParser::parse(" /reset "), Submission::Reset);
        assert_eq!(SubmissionParser::parse("/history"), Submission::Transcript);
        assert_eq!(SubmissionParser::parse("/?"), Submission::Help);
        assert_eq!(SubmissionParser::parse("/exit"), Submission::Quit);
    }

    #[test]
    fn switch_takes_a_target() {
        assert_eq!(
            SubmissionParser::parse("/switch Research"),
            Submission::Switch {
                target: "research".to_string()
            }
        );
        assert_eq!(
            SubmissionParser::parse("/SWITCH   ai chat "),
            Submission::Switch {
                target: "ai chat".to_string()
            }
        );
        assert_eq!(
            SubmissionParser::parse("/switch"),
            Submission::Switch {
                target: String::new()
            }
        );
        assert_eq!(
            SubmissionParser::parse("/switcheroo"),
            Submission::UserInput {
                content: "/switcheroo".to_string()
            }
        );
    }

    #[test]
    fn everything_else_is_input_verbatim() {
        assert_eq!(
            SubmissionParser::parse("  Goa "),
            Submission::UserInput {
                content: "  Goa ".to_string()
            }
        );
        assert_eq!(
            SubmissionParser::parse("/menu please"),
            Submission::UserInput {
                content: "/menu please".to_string()
            }
        );
    }

    #[test]
    fn numeric_shortcuts() {
        let options = vec!["Goa".to_string(), "Paris".to_string()];
        assert_eq!(resolve_option("1", &options), "Goa");
        assert_eq!(resolve_option(" 2 ", &options), "Paris");
        assert_eq!(resolve_option("3", &options), "3");
        assert_eq!(resolve_option("0", &options), "0");
        assert_eq!(resolve_option("Bali", &options), "Bali");
        assert_eq!(resolve_option("1", &[]), "1");
    }
}
