/// Prompt that makes a text generator emit blocks the parser understands.
const PROMPT_TEMPLATE: &str = "\
Please list them in the following format (one person per section):
* First Name: [First Name]
* Last Name: [Last Name]
* Job Title: [Job Title]
* Phone: [Phone Number]
* Email: [Email Address]

If any information is not available, please write \"Not listed\".
Please use this format exactly.";

/// Strategy for printing the expected contact block format.
#[derive(Debug, Clone, Copy)]
pub struct TemplateStrategy;

impl super::CommandStrategy for TemplateStrategy {
    type Input = ();

    fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        println!("Use this prompt when generating the contact column:\n");
        println!("{PROMPT_TEMPLATE}");
        println!();
        println!("✅ One contact per section");
        println!("✅ Use consistent labels");
        println!("✅ Avoid freeform text or summaries");
        Ok(())
    }
}
