//! Instruction templates sent to the completion service.
//!
//! Both templates end with the operator's text verbatim. No escaping or
//! injection hardening is applied.

/// Worked examples for the twist prompt: (operator text, expected reply).
pub const TWIST_EXAMPLES: [(&str, &str); 5] = [
    (
        "작은 원을 그려줘",
        r#"{"twist": {"linear": {"x": 1.5, "y": 0.0, "z": 0.0}, "angular": {"x": 0.0, "y": 0.0, "z": 1.5}}, "duration": 4.2}"#,
    ),
    (
        "천천히 큰 원을 그려줘",
        r#"{"twist": {"linear": {"x": 1.0, "y": 0.0, "z": 0.0}, "angular": {"x": 0.0, "y": 0.0, "z": 0.5}}, "duration": 12.0}"#,
    ),
    (
        "반시계 방향으로 두 바퀴 돌아줘",
        r#"{"twist": {"linear": {"x": 2.0, "y": 0.0, "z": 0.0}, "angular": {"x": 0.0, "y": 0.0, "z": 2.0}}, "duration": 6.28}"#,
    ),
    (
        "앞으로 가",
        r#"{"twist": {"linear": {"x": 1.0, "y": 0.0, "z": 0.0}, "angular": {"x": 0.0, "y": 0.0, "z": 0.0}}, "duration": 1.0}"#,
    ),
    (
        "별 하나 그려줘",
        r#"{"twist": {"linear": {"x": 1.5, "y": 0.0, "z": 0.0}, "angular": {"x": 0.0, "y": 0.0, "z": 2.0}}, "duration": 6.5}"#,
    ),
];

/// Prompt asking for a twist plus duration as a single JSON object.
pub fn twist_prompt(text: &str) -> String {
    let mut prompt = String::from(
        "You are an agent controlling a ROS 2 turtle robot.\n\
         Convert the user's command into a Twist message and a duration in seconds.\n\
         Reply with JSON only, in exactly this format:\n\
         {\"twist\": {\"linear\": {\"x\": float, \"y\": float, \"z\": float}, \"angular\": {\"x\": float, \"y\": float, \"z\": float}}, \"duration\": float}\n\
         Examples:\n",
    );
    for (command, reply) in TWIST_EXAMPLES {
        prompt.push_str(&format!("\"{command}\" -> {reply}\n"));
    }
    prompt.push_str(&format!("Command: {text}"));
    prompt
}

/// Prompt asking for a one-word motion class.
pub fn classify_prompt(text: &str) -> String {
    format!(
        "Convert the user's command into exactly one of these actions, answering with the single word only:\n\
         - forward\n- backward\n- left\n- right\n- stop\n\n\
         Answer unknown for anything else.\n\
         Command: {text}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply::parse_twist_reply;

    #[test]
    fn test_twist_prompt_ends_with_command() {
        let prompt = twist_prompt("앞으로 가");
        assert!(prompt.ends_with("Command: 앞으로 가"));
        assert!(prompt.contains("\"duration\": float"));
        for (command, _) in TWIST_EXAMPLES {
            assert!(prompt.contains(command));
        }
    }

    #[test]
    fn test_examples_are_valid_replies() {
        // The model copies the examples' shape, so they must parse themselves
        for (command, reply) in TWIST_EXAMPLES {
            assert!(
                parse_twist_reply(reply).is_ok(),
                "example for '{command}' does not parse"
            );
        }
    }

    #[test]
    fn test_classify_prompt_lists_actions() {
        let prompt = classify_prompt("go ahead");
        for word in ["forward", "backward", "left", "right", "stop", "unknown"] {
            assert!(prompt.contains(word));
        }
        assert!(prompt.ends_with("Command: go ahead"));
    }
}
