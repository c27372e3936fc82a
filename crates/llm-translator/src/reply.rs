//! Parsing of completion replies.
//!
//! The twist reply must be exactly one JSON object (surrounding whitespace is
//! ignored):
//!
//! ```text
//! {"twist": {"linear": {"x", "y", "z"}, "angular": {"x", "y", "z"}}, "duration": number}
//! ```
//!
//! Absent vector components read as 0.0 and an absent `duration` as
//! [`DEFAULT_DURATION_S`]. A present value that is not a number (including
//! `null`) is a schema error.

use crate::{Result, TranslateError};
use cmd_vel::{EmissionRequest, MotionCommand, Vector3};
use serde_json::{Map, Value};

/// Duration used when the reply omits `duration`
pub const DEFAULT_DURATION_S: f64 = 3.0;

pub fn parse_twist_reply(reply: &str) -> Result<EmissionRequest> {
    let value: Value = serde_json::from_str(reply.trim())?;
    let root = value
        .as_object()
        .ok_or_else(|| TranslateError::Schema("reply is not a JSON object".to_string()))?;

    let twist = object_field(root, "twist")?;
    let linear = vector(object_field(twist, "linear")?, "linear")?;
    let angular = vector(object_field(twist, "angular")?, "angular")?;

    let duration_s = match root.get("duration") {
        None => DEFAULT_DURATION_S,
        Some(v) => v
            .as_f64()
            .ok_or_else(|| TranslateError::Schema("`duration` is not a number".to_string()))?,
    };

    Ok(EmissionRequest::new(
        MotionCommand::new(linear, angular),
        duration_s,
    ))
}

fn object_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a Map<String, Value>> {
    match obj.get(key) {
        Some(Value::Object(inner)) => Ok(inner),
        Some(_) => Err(TranslateError::Schema(format!("`{key}` is not an object"))),
        None => Err(TranslateError::Schema(format!("missing `{key}`"))),
    }
}

fn vector(obj: &Map<String, Value>, name: &str) -> Result<Vector3> {
    let axis = |key: &str| -> Result<f64> {
        match obj.get(key) {
            None => Ok(0.0),
            Some(v) => v.as_f64().ok_or_else(|| {
                TranslateError::Schema(format!("`{name}.{key}` is not a number"))
            }),
        }
    };
    Ok(Vector3::new(axis("x")?, axis("y")?, axis("z")?))
}

/// Map a short-answer reply onto a [`crate::DiscreteAction`].
///
/// Case, surrounding whitespace, quotes and a trailing period are ignored;
/// anything else that is not one of the known words is `Unknown`.
pub fn parse_discrete_reply(reply: &str) -> crate::DiscreteAction {
    use crate::DiscreteAction;

    let word = reply
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '`')
        .trim_end_matches('.')
        .trim()
        .to_lowercase();
    DiscreteAction::ALL
        .into_iter()
        .find(|action| action.as_str() == word)
        .unwrap_or(DiscreteAction::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiscreteAction;

    #[test]
    fn test_full_reply() {
        let req = parse_twist_reply(
            r#"{"twist": {"linear": {"x": 1.5, "y": -0.25, "z": 0.1}, "angular": {"x": 0.2, "y": 0.3, "z": 1.5}}, "duration": 4.2}"#,
        )
        .unwrap();
        assert_eq!(req.command.linear, Vector3::new(1.5, -0.25, 0.1));
        assert_eq!(req.command.angular, Vector3::new(0.2, 0.3, 1.5));
        assert_eq!(req.duration_s, 4.2);
    }

    #[test]
    fn test_missing_leaves_default_to_zero() {
        let req = parse_twist_reply(
            r#"{"twist": {"linear": {"x": 2}, "angular": {}}, "duration": 1}"#,
        )
        .unwrap();
        assert_eq!(req.command.linear, Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(req.command.angular, Vector3::ZERO);
        assert_eq!(req.duration_s, 1.0);
    }

    #[test]
    fn test_missing_duration_defaults() {
        let req = parse_twist_reply(
            "\n  {\"twist\": {\"linear\": {\"x\": 1.0}, \"angular\": {\"z\": 0.5}}}  \n",
        )
        .unwrap();
        assert_eq!(req.duration_s, DEFAULT_DURATION_S);
        assert_eq!(req.command.angular.z, 0.5);
    }

    #[test]
    fn test_extra_keys_are_ignored() {
        let req = parse_twist_reply(
            r#"{"twist": {"linear": {"x": 1.0, "w": 9}, "angular": {}}, "duration": 2.0, "note": "ok"}"#,
        )
        .unwrap();
        assert_eq!(req.command.linear.x, 1.0);
    }

    #[test]
    fn test_malformed_replies_are_rejected() {
        let cases = [
            "not json",
            "",
            r#"{"twist": {"linear": {"x": 1.0}, "angular": {}}"#,
            r#"{"linear": {"x": 1.0}, "angular": {}, "duration": 1.0}"#,
            r#"{"twist": {"angular": {}}, "duration": 1.0}"#,
            r#"{"twist": {"linear": {"x": "fast"}, "angular": {}}, "duration": 1.0}"#,
            r#"{"twist": {"linear": {"x": null}, "angular": {}}, "duration": 1.0}"#,
            r#"{"twist": {"linear": [1, 0, 0], "angular": {}}, "duration": 1.0}"#,
            r#"{"twist": {"linear": {}, "angular": {}}, "duration": "3s"}"#,
            r#"[{"linear": {}, "angular": {}}, 1.0]"#,
            "```json\n{\"twist\": {\"linear\": {}, \"angular\": {}}}\n```",
            r#"{"twist": {"linear": {}, "angular": {}}} {"twist": {"linear": {}, "angular": {}}}"#,
        ];
        for reply in cases {
            assert!(
                parse_twist_reply(reply).is_err(),
                "expected rejection for {reply:?}"
            );
        }
    }

    #[test]
    fn test_error_kinds() {
        assert!(matches!(
            parse_twist_reply("not json"),
            Err(TranslateError::Json(_))
        ));
        assert!(matches!(
            parse_twist_reply(r#"{"duration": 1.0}"#),
            Err(TranslateError::Schema(_))
        ));
    }

    #[test]
    fn test_discrete_reply() {
        assert_eq!(parse_discrete_reply("forward"), DiscreteAction::Forward);
        assert_eq!(parse_discrete_reply("  Left.\n"), DiscreteAction::Left);
        assert_eq!(parse_discrete_reply("\"STOP\""), DiscreteAction::Stop);
        assert_eq!(parse_discrete_reply("backward"), DiscreteAction::Backward);
        assert_eq!(parse_discrete_reply("go right please"), DiscreteAction::Unknown);
        assert_eq!(parse_discrete_reply(""), DiscreteAction::Unknown);
    }
}
