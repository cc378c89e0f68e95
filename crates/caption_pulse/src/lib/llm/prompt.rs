use std::sync::LazyLock;

use regex::{Captures, Regex};

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(title|transcript|language)\}").unwrap());

/// Extra instruction appended when a title mentions one of `keywords`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusRule {
    pub keywords: Vec<String>,
    pub appendix: String,
}

impl FocusRule {
    pub fn new<'a>(keywords: impl IntoIterator<Item = &'a str>, appendix: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into_iter().map(str::to_lowercase).collect(),
            appendix: appendix.into(),
        }
    }

    fn matches(&self, lowercase_title: &str) -> bool {
        self.keywords.iter().any(|k| lowercase_title.contains(k.as_str()))
    }
}

/// Renders the summarization prompt for a video.
///
/// Focus rules are checked in order and only the first match is applied.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    template: String,
    language: String,
    rules: Vec<FocusRule>,
}

impl PromptBuilder {
    const SUMMARY_TEMPLATE: &str = include_str!("./prompts/summary_0.txt");
    pub const DEFAULT_LANGUAGE: &str = "Simplified Chinese";

    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            language: Self::DEFAULT_LANGUAGE.into(),
            rules: Vec::new(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_rule(mut self, rule: FocusRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[FocusRule] {
        &self.rules
    }

    pub fn render(&self, title: &str, transcript: &str) -> String {
        // single pass so placeholders inside the title or transcript stay literal
        let mut prompt = PLACEHOLDER_RE
            .replace_all(&self.template, |caps: &Captures| match &caps[1] {
                "title" => title.to_string(),
                "transcript" => transcript.to_string(),
                _ => self.language.clone(),
            })
            .into_owned();

        let lowercase_title = title.to_lowercase();
        if let Some(rule) = self.rules.iter().find(|r| r.matches(&lowercase_title)) {
            prompt.push_str("\n\n**Special focus:** ");
            prompt.push_str(&rule.appendix);
        }

        prompt
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(Self::SUMMARY_TEMPLATE)
            .with_rule(FocusRule::new(
                ["git", "github"],
                "Git commands, GitHub features, version control concepts",
            ))
            .with_rule(FocusRule::new(
                ["linux", "command"],
                "Linux command syntax, option explanations, usage scenarios",
            ))
            .with_rule(FocusRule::new(
                ["programming", "code"],
                "Programming concepts, code examples, best practices",
            ))
    }
}
