use async_trait::async_trait;

use collegia_core::AppResult;
use collegia_domain::{DeptId, HodProfile};

/// Repository port resolving which department a head-of-department
/// identity administers.
///
/// Every mutating or ownership-sensitive path consults this port before
/// touching department-scoped rows.
#[async_trait]
pub trait DepartmentDirectory: Send + Sync {
    /// Resolves the department administered by the given head identity,
    /// or `None` when the identity has no administered department
    /// (stale session, data inconsistency).
    async fn resolve_owned_dept(&self, hod_id: &str) -> AppResult<Option<DeptId>>;

    /// Returns the headship profile for the given head identity.
    async fn find_hod_profile(&self, hod_id: &str) -> AppResult<Option<HodProfile>>;
}
