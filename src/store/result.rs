use derive_more::Display;
use serde::Serialize;

use super::node::Node;

/// The verb an [`OpResult`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    #[display("get")]
    Get,
    #[display("set")]
    Set,
    #[display("update")]
    Update,
    #[display("create")]
    Create,
    #[display("delete")]
    Delete,
}

/// Outcome record of one store operation: the action, the node after it,
/// and the node before it. Immutable once built; `clone()` is a deep copy,
/// so retained results never alias live store state.
///
/// For deletes there is no post-operation state, so both fields carry the
/// last observable snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpResult {
    action: Action,
    #[serde(rename = "node")]
    curr_node: Node,
    #[serde(rename = "prevNode", skip_serializing_if = "Option::is_none")]
    prev_node: Option<Node>,
}

impl OpResult {
    pub(crate) fn new(action: Action, curr_node: Node) -> Self {
        OpResult {
            action,
            curr_node,
            prev_node: None,
        }
    }

    pub(crate) fn with_prev(action: Action, curr_node: Node, prev_node: Node) -> Self {
        debug_assert_eq!(curr_node.key(), prev_node.key());
        OpResult {
            action,
            curr_node,
            prev_node: Some(prev_node),
        }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// State after the operation (last pre-removal state for deletes).
    pub fn curr_node(&self) -> &Node {
        &self.curr_node
    }

    /// State before the operation; `None` when the key was fresh.
    pub fn prev_node(&self) -> Option<&Node> {
        self.prev_node.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Action::Get, "get")]
    #[case(Action::Set, "set")]
    #[case(Action::Update, "update")]
    #[case(Action::Create, "create")]
    #[case(Action::Delete, "delete")]
    fn actions_display_as_lowercase_verbs(#[case] action: Action, #[case] verb: &str) {
        assert_eq!(action.to_string(), verb);
        assert_eq!(
            serde_json::to_string(&action).expect("serialization failed"),
            format!("\"{verb}\"")
        );
    }

    #[test]
    fn clone_is_independent_of_the_original() {
        let result = OpResult::with_prev(
            Action::Update,
            Node::new_file("/a", Some("new".to_string())),
            Node::new_file("/a", Some("old".to_string())),
        );
        let cloned = result.clone();
        drop(result);

        assert_eq!(cloned.action(), Action::Update);
        assert_eq!(cloned.curr_node().value(), Some("new"));
        assert_eq!(cloned.prev_node().and_then(Node::value), Some("old"));
    }

    #[test]
    fn serializes_with_result_field_names() {
        let fresh = OpResult::new(
            Action::Create,
            Node::new_file("/a", Some("v".to_string())),
        );
        assert_eq!(
            serde_json::to_string(&fresh).expect("serialization failed"),
            r#"{"action":"create","node":{"key":"/a","dir":false,"value":"v"}}"#
        );

        let update = OpResult::with_prev(
            Action::Update,
            Node::new_file("/a", Some("new".to_string())),
            Node::new_file("/a", Some("old".to_string())),
        );
        assert_eq!(
            serde_json::to_string(&update).expect("serialization failed"),
            concat!(
                r#"{"action":"update","node":{"key":"/a","dir":false,"value":"new"},"#,
                r#""prevNode":{"key":"/a","dir":false,"value":"old"}}"#
            )
        );
    }
}
