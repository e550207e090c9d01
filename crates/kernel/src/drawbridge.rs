//! Drawbridge: per-model authorization gate with DashMap-based caching.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An action a viewer may perform on a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Manage,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Ability::Manage => "manage",
            Ability::Create => "create",
            Ability::Update => "update",
            Ability::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// The requesting user, reduced to the roles they hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewer {
    roles: BTreeSet<String>,
}

impl Viewer {
    /// A viewer with no roles.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_roles<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            roles: roles
                .into_iter()
                .map(Into::<String>::into)
                .filter(|r| !r.is_empty())
                .collect(),
        }
    }

    /// Parse a comma-separated role list (e.g. a request header value).
    pub fn from_header_value(value: &str) -> Self {
        Self::with_roles(value.split(',').map(str::trim))
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    pub fn is_anonymous(&self) -> bool {
        self.roles.is_empty()
    }

    /// Role names in sorted order, used as the decision cache key.
    fn cache_key(&self) -> Vec<String> {
        self.roles.iter().cloned().collect()
    }
}

/// Authorization gate consulted before showing or serving a resource.
pub trait Drawbridge: Send + Sync {
    /// Whether `viewer` may perform `ability` on instances of `model`.
    fn allows(&self, viewer: &Viewer, ability: Ability, model: &str) -> bool;
}

impl<F> Drawbridge for F
where
    F: Fn(&Viewer, Ability, &str) -> bool + Send + Sync,
{
    fn allows(&self, viewer: &Viewer, ability: Ability, model: &str) -> bool {
        self(viewer, ability, model)
    }
}

/// A configured policy: which roles hold each ability on a model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyDefinition {
    pub model: String,
    pub manage: Vec<String>,
    pub create: Vec<String>,
    pub update: Vec<String>,
    pub delete: Vec<String>,
}

impl PolicyDefinition {
    fn roles_for(&self, ability: Ability) -> &[String] {
        match ability {
            Ability::Manage => &self.manage,
            Ability::Create => &self.create,
            Ability::Update => &self.update,
            Ability::Delete => &self.delete,
        }
    }
}

/// Compiled policy for one model.
#[derive(Debug, Clone, Default)]
struct Policy {
    grants: HashMap<Ability, HashSet<String>>,
}

impl Policy {
    fn from_definition(def: &PolicyDefinition) -> Self {
        let mut grants = HashMap::new();
        for ability in [
            Ability::Manage,
            Ability::Create,
            Ability::Update,
            Ability::Delete,
        ] {
            let roles: HashSet<String> = def.roles_for(ability).iter().cloned().collect();
            if !roles.is_empty() {
                grants.insert(ability, roles);
            }
        }
        Self { grants }
    }

    fn allows(&self, viewer: &Viewer, ability: Ability) -> bool {
        self.grants
            .get(&ability)
            .is_some_and(|roles| roles.iter().any(|r| viewer.has_role(r)))
    }
}

/// Configuration-driven Drawbridge.
///
/// Models without a registered policy are open to every viewer. Models with
/// a policy grant an ability only to the roles listed for it.
#[derive(Clone)]
pub struct PolicyDrawbridge {
    inner: Arc<PolicyDrawbridgeInner>,
}

struct PolicyDrawbridgeInner {
    /// model -> policy
    policies: HashMap<String, Policy>,

    /// (roles, ability, model) -> decision
    decisions: DashMap<(Vec<String>, Ability, String), bool>,

    /// Maximum number of cached decisions before the cache is flushed.
    capacity: usize,
}

/// Default bound on cached decisions.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

impl PolicyDrawbridge {
    /// Build a drawbridge from policy definitions.
    ///
    /// A later definition for the same model replaces an earlier one.
    pub fn new(definitions: &[PolicyDefinition]) -> Self {
        Self::with_cache_capacity(definitions, DEFAULT_CACHE_CAPACITY)
    }

    /// Build a drawbridge that caches at most `capacity` decisions.
    ///
    /// Role sets come from request headers, so the cache is flushed once it
    /// reaches `capacity` instead of growing with every distinct header.
    pub fn with_cache_capacity(definitions: &[PolicyDefinition], capacity: usize) -> Self {
        let policies = definitions
            .iter()
            .map(|def| (def.model.clone(), Policy::from_definition(def)))
            .collect::<HashMap<_, _>>();

        debug!(policies = policies.len(), "drawbridge policies loaded");

        Self {
            inner: Arc::new(PolicyDrawbridgeInner {
                policies,
                decisions: DashMap::new(),
                capacity,
            }),
        }
    }

    /// Whether a policy is registered for `model`.
    pub fn has_policy(&self, model: &str) -> bool {
        self.inner.policies.contains_key(model)
    }

    /// Invalidate the entire decision cache.
    pub fn invalidate_all(&self) {
        self.inner.decisions.clear();
    }

    /// Get the number of cached decisions (for monitoring).
    pub fn cache_size(&self) -> usize {
        self.inner.decisions.len()
    }
}

impl Drawbridge for PolicyDrawbridge {
    fn allows(&self, viewer: &Viewer, ability: Ability, model: &str) -> bool {
        let key = (viewer.cache_key(), ability, model.to_string());

        if let Some(cached) = self.inner.decisions.get(&key) {
            return *cached;
        }

        let allowed = match self.inner.policies.get(model) {
            Some(policy) => policy.allows(viewer, ability),
            None => true,
        };

        debug!(%ability, model, allowed, "drawbridge decision");
        if self.inner.capacity == 0 {
            return allowed;
        }
        if self.inner.decisions.len() >= self.inner.capacity {
            debug!(
                capacity = self.inner.capacity,
                "drawbridge cache full, flushing"
            );
            self.inner.decisions.clear();
        }
        self.inner.decisions.insert(key, allowed);
        allowed
    }
}

impl fmt::Debug for PolicyDrawbridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyDrawbridge")
            .field("policies", &self.inner.policies.len())
            .field("cache_size", &self.inner.decisions.len())
            .field("capacity", &self.inner.capacity)
            .finish()
    }
}
