// Unit tests for input message construction
//
// UNIT UNDER TEST: Message / MessageRole
//
// BUSINESS RESPONSIBILITY:
//   - Lenient text-to-message parsing: JSON messages pass through,
//     everything else becomes a user message

use crate::messages::{Message, MessageRole};

mod from_text_tests {
    use super::*;

    #[test]
    fn plain_text_becomes_user_message() {
        let message = Message::from_text("Explain lifetimes.");

        assert_eq!(message.role, MessageRole::User);
        assert_eq!(message.content, "Explain lifetimes.");
    }

    #[test]
    fn json_message_is_honored() {
        let message = Message::from_text(r#"{"role": "system", "content": "Be terse."}"#);

        assert_eq!(message.role, MessageRole::System);
        assert_eq!(message.content, "Be terse.");
    }

    #[test]
    fn json_with_unknown_role_falls_back_to_user() {
        // Invalid role makes the whole text an ordinary prompt.
        let text = r#"{"role": "tool", "content": "x"}"#;
        let message = Message::from_text(text);

        assert_eq!(message.role, MessageRole::User);
        assert_eq!(message.content, text);
    }

    #[test]
    fn json_missing_content_falls_back_to_user() {
        let text = r#"{"role": "user"}"#;
        let message = Message::from_text(text);

        assert_eq!(message.role, MessageRole::User);
        assert_eq!(message.content, text);
    }

    #[test]
    fn non_object_json_falls_back_to_user() {
        let message = Message::from_text("[1, 2, 3]");
        assert_eq!(message.role, MessageRole::User);
        assert_eq!(message.content, "[1, 2, 3]");
    }
}

mod batch_tests {
    use super::*;

    #[test]
    fn from_texts_converts_each_item() {
        let messages = Message::from_texts([
            r#"{"role": "system", "content": "Be terse."}"#,
            "What is a trait object?",
        ]);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(messages[1].content, "What is a trait object?");
    }

    #[test]
    fn from_texts_handles_empty_input() {
        let messages = Message::from_texts(Vec::<String>::new());
        assert!(messages.is_empty());
    }
}

mod serde_tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_value(Message::assistant("ok")).expect("serialization failed");
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], "ok");
    }

    #[test]
    fn role_display_matches_wire_form() {
        assert_eq!(MessageRole::System.to_string(), "system");
        assert_eq!(MessageRole::User.to_string(), "user");
        assert_eq!(MessageRole::Assistant.to_string(), "assistant");
    }
}
