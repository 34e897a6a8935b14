use crate::authz::types::{AccessDecision, Resource, Sensitivity};
use crate::claims::Identity;

pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_EMPLOYEE: &str = "employee";

/// What a matched tier may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visibility {
    Everything,
    PublicOnly,
}

impl Visibility {
    fn allows(self, sensitivity: Sensitivity) -> bool {
        match self {
            Visibility::Everything => true,
            Visibility::PublicOnly => sensitivity == Sensitivity::Public,
        }
    }
}

/// Access tiers in priority order. The first tier whose role the identity
/// holds wins; roles are not combined additively, so an identity holding
/// both `manager` and `employee` decides as `manager`.
const TIERS: &[(&str, Visibility)] = &[
    (ROLE_MANAGER, Visibility::Everything),
    (ROLE_EMPLOYEE, Visibility::PublicOnly),
];

/// The role tier the identity falls into, if any. Used for request logging.
pub fn access_tier(identity: &Identity) -> Option<&'static str> {
    TIERS
        .iter()
        .find(|(role, _)| identity.roles.contains(*role))
        .map(|(role, _)| *role)
}

/// Compute which catalog entries `identity` may see.
///
/// Pure and total: every `(identity, catalog)` pair maps to exactly one
/// decision, with no I/O, no shared state, and no failure mode. Empty role
/// sets and empty catalogs are valid inputs producing empty results. The
/// visible set is always a subsequence of `catalog` in catalog order.
pub fn decide(identity: &Identity, catalog: &[Resource]) -> AccessDecision {
    let tier = TIERS
        .iter()
        .find(|(role, _)| identity.roles.contains(*role));

    let visible: Vec<Resource> = match tier {
        Some((_, visibility)) => catalog
            .iter()
            .filter(|resource| visibility.allows(resource.sensitivity))
            .cloned()
            .collect(),
        None => Vec::new(),
    };

    let count = visible.len();
    AccessDecision { visible, count }
}
