use serde::{Deserialize, Serialize};

/// One post as returned by the remote endpoint.
/// The shape is dictated by the API; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::Post;

    #[test]
    fn deserializes_remote_shape() {
        let raw = r#"[
            {"userId": 1, "id": 1, "title": "sunt aut facere", "body": "quia et suscipit\nsuscipit"},
            {"userId": 2, "id": 11, "title": "et ea vero", "body": "delectus", "extra": true}
        ]"#;
        let posts: Vec<Post> = serde_json::from_str(raw).unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].user_id, 1);
        assert_eq!(posts[0].body, "quia et suscipit\nsuscipit");
        assert_eq!(posts[1].id, 11);
        assert_eq!(posts[1].title, "et ea vero");
    }

    #[test]
    fn rejects_missing_title() {
        let raw = r#"{"userId": 1, "id": 1, "body": "x"}"#;
        assert!(serde_json::from_str::<Post>(raw).is_err());
    }
}
