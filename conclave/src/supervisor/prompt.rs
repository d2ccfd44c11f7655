//! Supervisor system prompt.

/// Prompt asking the model to pick the next worker; `{members}` is the roster.
pub const SUPERVISOR_PROMPT: &str = "You are a supervisor tasked with managing a conversation between the \
following workers: {members}. Given the following user request, respond with the worker to act next. \
Each worker will perform a task and respond with their results and status. When finished, respond with FINISH.";

/// Output contract appended to the prompt; `{options}` lists `FINISH` and the roster.
pub const ROUTING_INSTRUCTION: &str = "Reply with a JSON object of the form {\"next\": \"<option>\"} \
where <option> is exactly one of: {options}. Do not add any other text.";

/// Full system prompt for a roster.
pub fn supervisor_system_prompt(members: &[String], options: &[String]) -> String {
    format!(
        "{}\n\n{}",
        SUPERVISOR_PROMPT.replace("{members}", &members.join(", ")),
        ROUTING_INSTRUCTION.replace("{options}", &options.join(", "))
    )
}
