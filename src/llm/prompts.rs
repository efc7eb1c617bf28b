//! Prompt templates for commit message and PR documentation generation.

use crate::data::{CommitContext, Lang, PrContext};

/// System prompt for commit message generation.
pub const COMMIT_SYSTEM_PROMPT: &str = r#"You are an expert software engineer writing git commit messages. You will receive the staged diff of a repository, the current branch name, and optionally a short log of recent commits for context.

Write a commit message for the staged changes:
1. Base the message on the ACTUAL CODE CHANGES in the diff, not on file paths or branch names.
2. Follow conventional commit format: <type>(<scope>): <description>.
3. Use imperative mood ("add" not "added" or "adds") and lowercase descriptions.
4. Keep the subject line under 72 characters.
5. Add a short body only when the change needs explanation beyond the subject.

Respond with the commit message text only. No markdown fences, no commentary."#;

/// System prompt for pull request documentation generation.
pub const PR_SYSTEM_PROMPT: &str = r#"You are an expert software engineer writing pull request documentation. You will receive the diff between two branches and optionally a short log of recent commits for context.

Write a PR title and description:
1. Base both on the ACTUAL CODE CHANGES in the diff.
2. The title must be concise, at most 60 characters, and describe the overall change.
3. The description is markdown: open with a short summary paragraph, then a bullet list of notable changes.
4. Mention breaking changes explicitly if the diff shows any.

Respond with a JSON object with exactly two keys, "title" and "body". No text outside the JSON."#;

/// Returns the language instruction appended to user prompts.
fn lang_instruction(lang: Lang) -> &'static str {
    match lang {
        Lang::En => "Write the output in English.",
        Lang::Es => "Write the output in Spanish.",
    }
}

/// Builds the user prompt for commit message generation.
pub fn commit_user_prompt(context: &CommitContext) -> String {
    let mut prompt = format!(
        "Current branch: {}\n\nStaged diff:\n```diff\n{}\n```\n",
        context.branch_name, context.diff
    );

    if let Some(history) = &context.commit_history {
        if !history.is_empty() {
            prompt.push_str(&format!("\nRecent commits for context:\n{history}\n"));
        }
    }

    prompt.push('\n');
    prompt.push_str(lang_instruction(context.lang));
    prompt
}

/// Builds the user prompt for PR documentation generation.
pub fn pr_user_prompt(context: &PrContext) -> String {
    let mut prompt = format!(
        "Source branch: {}\nTarget branch: {}\n\nDiff:\n```diff\n{}\n```\n",
        context.from_branch, context.to_branch, context.diff
    );

    if let Some(history) = &context.commit_history {
        if !history.is_empty() {
            prompt.push_str(&format!("\nRecent commits for context:\n{history}\n"));
        }
    }

    prompt.push('\n');
    prompt.push_str(lang_instruction(context.lang));
    prompt
}
