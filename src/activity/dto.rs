use serde::Serialize;

use super::services::ActivityView;
use crate::users::repo_types::PublicUser;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: PublicUser,
    pub activities: Vec<ActivityView>,
}
