//! Prompt templates for the report LLM

use minijinja::{Environment, context};

/// System prompt: fixes the six report sections
pub const REPORT_SYSTEM_PROMPT: &str = "You are a pragmatic stock analyst. \
Return concise markdown with sections: Summary, Financial View, Filing View, \
Risks, Catalysts, Recommendation (Buy/Hold/Sell with confidence).";

const REPORT_USER_TEMPLATE: &str = "Analyze ticker {{ ticker }} using this context:\n\n\
{{ context }}\n\nKeep the answer practical and short.";

/// Render the user message for one report
pub fn report_user_prompt(ticker: &str, research_context: &str) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("report.user", REPORT_USER_TEMPLATE)?;
    env.get_template("report.user")?
        .render(context! { ticker => ticker, context => research_context })
}
