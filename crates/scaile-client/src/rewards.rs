//! Contributor reward endpoints.

use reqwest::Method;
use serde_json::Value;

use crate::client::Body;
use crate::{Filters, Result, ScaileClient};

/// Calculate and distribute contributor rewards.
#[derive(Debug, Clone)]
pub struct Rewards {
    client: ScaileClient,
}

impl Rewards {
    pub(crate) fn new(client: ScaileClient) -> Self {
        Self { client }
    }

    /// Calculates the rewards earned by a contributor.
    pub async fn calculate(&self, project_id: &str, contributor_id: &str) -> Result<Value> {
        self.client
            .send(
                Method::GET,
                &[
                    "projects",
                    project_id,
                    "contributors",
                    contributor_id,
                    "rewards",
                    "calculate",
                ],
                None,
                Body::Empty,
            )
            .await
    }

    /// Distributes rewards to contributors.
    pub async fn distribute(&self, project_id: &str, distribution: &Value) -> Result<Value> {
        self.client
            .send(
                Method::POST,
                &["projects", project_id, "rewards", "distribute"],
                None,
                Body::Json(distribution),
            )
            .await
    }

    /// Returns the reward history of a contributor.
    pub async fn contributor_rewards(
        &self,
        project_id: &str,
        contributor_id: &str,
    ) -> Result<Value> {
        self.client
            .send(
                Method::GET,
                &["projects", project_id, "contributors", contributor_id, "rewards"],
                None,
                Body::Empty,
            )
            .await
    }

    /// Lists all rewards of a project, optionally narrowed by query filters.
    pub async fn list(&self, project_id: &str, filters: Option<&Filters>) -> Result<Value> {
        self.client
            .send(
                Method::GET,
                &["projects", project_id, "rewards"],
                filters,
                Body::Empty,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_server::spawn_test_server;

    #[tokio::test]
    async fn test_calculate_path() {
        let rewards = spawn_test_server().await.rewards();

        let echo = rewards.calculate("p1", "c7").await.unwrap();
        assert_eq!(echo["method"], "GET");
        assert_eq!(echo["path"], "/projects/p1/contributors/c7/rewards/calculate");
    }

    #[tokio::test]
    async fn test_distribute_posts_body() {
        let rewards = spawn_test_server().await.rewards();

        let echo = rewards
            .distribute("p1", &json!({"c7": 10}))
            .await
            .unwrap();
        assert_eq!(echo["method"], "POST");
        assert_eq!(echo["path"], "/projects/p1/rewards/distribute");
        assert_eq!(echo["body"], r#"{"c7":10}"#);
    }

    #[tokio::test]
    async fn test_history_and_list() {
        let rewards = spawn_test_server().await.rewards();

        let echo = rewards.contributor_rewards("p1", "c7").await.unwrap();
        assert_eq!(echo["path"], "/projects/p1/contributors/c7/rewards");

        let filters = Filters::from([("from".to_owned(), "2024-01-01".to_owned())]);
        let echo = rewards.list("p1", Some(&filters)).await.unwrap();
        assert_eq!(echo["path"], "/projects/p1/rewards");
        assert_eq!(echo["query"], "from=2024-01-01");
    }
}
