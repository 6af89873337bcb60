//! Advisor prompt selection and response cleanup.
//!

use minijinja::context;

/// Prompt skeleton for questions about validating a business idea.
const IDEA_VALIDATION_TEMPLATE: &str = r#"You are an experienced startup advisor specializing in idea validation. Analyze the following business idea and provide structured feedback in these sections:

Market Opportunity:
Target Market:
Competitive Analysis:
Potential Challenges:
Unique Value Proposition:
Next Steps:

Question: {{ message }}"#;

/// Prompt skeleton for questions about strategy and company building.
const STRATEGY_ADVICE_TEMPLATE: &str = r#"You are a strategic startup advisor with expertise in company building. Provide detailed guidance for the following question, structured in these sections:

Strategic Analysis:
Resource Allocation:
Growth Opportunities:
Risk Assessment:
Implementation Plan:
Key Metrics:

Question: {{ message }}"#;

/// Fallback prompt skeleton for everything else a solo founder may ask.
const FOUNDER_SUPPORT_TEMPLATE: &str = r#"You are a solo founder mentor specializing in founder well-being and success. Address the following concern with practical advice, structured in these sections:

Problem Analysis:
Immediate Actions:
Long-term Solutions:
Resource Recommendations:
Support Network:
Success Metrics:

Question: {{ message }}"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    IdeaValidation,
    StrategyAdvice,
    FounderSupport,
}

impl PromptKind {
    fn template_name(self) -> &'static str {
        match self {
            PromptKind::IdeaValidation => "idea_validation",
            PromptKind::StrategyAdvice => "strategy_advice",
            PromptKind::FounderSupport => "founder_support",
        }
    }
}

/// Picks the prompt template for a message.
///
/// Keyword tests run against the lower-cased message, first match wins:
/// idea-validation keywords take priority over strategy keywords, and
/// founder support is the fallback when nothing matches.
pub fn classify_message(message: &str) -> PromptKind {
    let message = message.to_lowercase();

    if message.contains("validate") || message.contains("idea") || message.contains("market") {
        PromptKind::IdeaValidation
    } else if message.contains("strategy") || message.contains("plan") || message.contains("growth")
    {
        PromptKind::StrategyAdvice
    } else {
        PromptKind::FounderSupport
    }
}

/// The three advisor prompt skeletons, each with a single `message` placeholder.
pub struct PromptLibrary {
    env: minijinja::Environment<'static>,
}

impl PromptLibrary {
    pub fn new() -> PromptLibrary {
        let mut env = minijinja::Environment::new();
        env.add_template("idea_validation", IDEA_VALIDATION_TEMPLATE)
            .expect("idea validation template must parse");
        env.add_template("strategy_advice", STRATEGY_ADVICE_TEMPLATE)
            .expect("strategy advice template must parse");
        env.add_template("founder_support", FOUNDER_SUPPORT_TEMPLATE)
            .expect("founder support template must parse");

        PromptLibrary { env }
    }

    pub fn render(&self, kind: PromptKind, message: &str) -> Result<String, minijinja::Error> {
        let template = self.env.get_template(kind.template_name())?;
        template.render(context! { message })
    }
}

impl Default for PromptLibrary {
    fn default() -> Self {
        PromptLibrary::new()
    }
}

/// Cleans up raw generated text before it is stored or shown.
///
/// Strips markup characters, trims every line and drops blank ones. Running
/// the result through this function again returns it unchanged.
pub fn format_response(raw: &str) -> String {
    raw.replace(['#', '*', '•', '-'], "")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
