//! Keyword-matching assistant. Prompts are lower-cased and checked against an
//! ordered list of rules; the first rule that fires picks the reply.

pub mod arithmetic;

use chrono::{Local, NaiveTime};

pub const GREETING: &str = "Hello 👋! I’m Matty-AI, how can I help you today?";
pub const IDENTITY: &str = "My name is Matty-AI 🤖, your AI assistant.";
pub const CREATOR: &str = "I was created as part of the **Matty-AI project** 💡.";
pub const SELF_DESCRIPTION: &str =
    "Matty-AI is a lightweight AI assistant 🤖 built to answer basic questions.";
pub const FEATURES: &str =
    "I can greet you, tell the time, share about myself, and solve basic math 🧮.";
pub const APOLOGY: &str = "Sorry 😅, I couldn’t calculate that.";
pub const FAREWELL: &str = "Goodbye 👋! Come back anytime!";
pub const FALLBACK: &str = "Hmm 🤔 I don’t know that yet, but soon I’ll get smarter!";

const OPERATORS: [char; 4] = ['+', '-', '*', '/'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Greeting,
    Identity,
    Time,
    Creator,
    SelfDescription,
    Features,
    Arithmetic,
    Farewell,
    Fallback,
}

impl Rule {
    /// Picks the first rule whose trigger occurs in the lower-cased prompt.
    pub fn classify(prompt: &str) -> Self {
        let has = |needle: &str| prompt.contains(needle);

        if has("hello") {
            Self::Greeting
        } else if has("your name") {
            Self::Identity
        } else if has("time") {
            Self::Time
        } else if has("who created you") || has("developer") {
            Self::Creator
        } else if has("what is matty-ai") {
            Self::SelfDescription
        } else if has("features") {
            Self::Features
        } else if prompt.contains(OPERATORS) {
            Self::Arithmetic
        } else if has("goodbye") || has("bye") {
            Self::Farewell
        } else {
            Self::Fallback
        }
    }
}

/// Replies to `prompt` using the local wall clock for time questions.
pub fn respond(prompt: &str) -> String {
    respond_at(prompt, Local::now().time())
}

pub fn respond_at(prompt: &str, now: NaiveTime) -> String {
    let prompt = prompt.to_lowercase();

    match Rule::classify(&prompt) {
        Rule::Greeting => GREETING.to_string(),
        Rule::Identity => IDENTITY.to_string(),
        Rule::Time => format!("The current time is {} ⏰", now.format("%H:%M:%S")),
        Rule::Creator => CREATOR.to_string(),
        Rule::SelfDescription => SELF_DESCRIPTION.to_string(),
        Rule::Features => FEATURES.to_string(),
        Rule::Arithmetic => match arithmetic::evaluate(prompt.trim()) {
            Ok(value) => format!("The result is {} ✅", format_number(value)),
            Err(e) => {
                tracing::debug!("arithmetic prompt rejected: {e}");
                APOLOGY.to_string()
            }
        },
        Rule::Farewell => FAREWELL.to_string(),
        Rule::Fallback => FALLBACK.to_string(),
    }
}

fn format_number(value: f64) -> String {
    // Adding zero folds -0.0 into 0.0.
    format!("{}", value + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 34, 56).unwrap()
    }

    #[test]
    fn greeting_wins_regardless_of_case() {
        assert_eq!(respond_at("HeLLo there", noon()), GREETING);
        assert_eq!(respond_at("hello, what time is it?", noon()), GREETING);
    }

    #[test]
    fn rules_fire_in_order() {
        assert_eq!(respond_at("what's your name?", noon()), IDENTITY);
        assert_eq!(
            respond_at("what time is it", noon()),
            "The current time is 12:34:56 ⏰"
        );
        assert_eq!(respond_at("Who created you?", noon()), CREATOR);
        assert_eq!(respond_at("are you a developer", noon()), CREATOR);
        assert_eq!(respond_at("What is Matty-AI", noon()), SELF_DESCRIPTION);
        assert_eq!(respond_at("list your features", noon()), FEATURES);
        assert_eq!(respond_at("ok bye", noon()), FAREWELL);
        assert_eq!(respond_at("tell me a joke", noon()), FALLBACK);
        assert_eq!(respond_at("", noon()), FALLBACK);
    }

    #[test]
    fn evaluates_arithmetic() {
        assert_eq!(respond_at("2+2", noon()), "The result is 4 ✅");
        assert!(respond_at("2+2", noon()).contains('4'));
        assert_eq!(respond_at(" 7 / 2 ", noon()), "The result is 3.5 ✅");
        assert_eq!(respond_at("(1 + 2) * -3", noon()), "The result is -9 ✅");
        assert_eq!(respond_at("0 * -1", noon()), "The result is 0 ✅");
    }

    #[test]
    fn malformed_arithmetic_apologises() {
        assert_eq!(respond_at("2 +", noon()), APOLOGY);
        assert_eq!(respond_at("1/0", noon()), APOLOGY);
        assert_eq!(respond_at("import os; os.system('rm -rf /')", noon()), APOLOGY);
        assert_eq!(respond_at("good-bye", noon()), APOLOGY);
    }

    #[test]
    fn classify_exposes_rule() {
        assert_eq!(Rule::classify("3*3"), Rule::Arithmetic);
        assert_eq!(Rule::classify("goodbye"), Rule::Farewell);
    }
}
