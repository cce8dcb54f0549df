//! Agent, group and public access, read from and written to ACLs.
//!
//! The `get_*_access` functions look at a resource with its ACLs:
//! its own ACL when known, the default rules of its fallback ACL otherwise,
//! and return `None` when neither is available.
use crate::rules::{actor_access, set_actor_access, AccessScope, ActorKind};
use crate::{AclDataset, Result, WithAcl};
use solid_dataset::{Access, HasResourceInfo};
use solid_term::ns::foaf;

fn effective_access<T: HasResourceInfo>(
    resource: &WithAcl<T>,
    actor: &str,
    kind: ActorKind,
) -> Option<Access> {
    if let Some(acl) = resource.resource_acl() {
        return Some(actor_access(acl, actor, kind, AccessScope::Resource));
    }
    resource
        .fallback_acl()
        .map(|acl| actor_access(acl, actor, kind, AccessScope::Default))
}

/// The access of `agent` (a WebID) to `resource`.
pub fn get_agent_access<T: HasResourceInfo>(resource: &WithAcl<T>, agent: &str) -> Option<Access> {
    effective_access(resource, agent, ActorKind::Agent)
}

/// The access of the members of `group` to `resource`.
pub fn get_group_access<T: HasResourceInfo>(resource: &WithAcl<T>, group: &str) -> Option<Access> {
    effective_access(resource, group, ActorKind::Group)
}

/// The access of everyone to `resource`.
pub fn get_public_access<T: HasResourceInfo>(resource: &WithAcl<T>) -> Option<Access> {
    effective_access(resource, foaf::Agent, ActorKind::Class)
}

/// The access `acl` grants to `agent` on the governed resource.
pub fn get_agent_resource_access(acl: &AclDataset, agent: &str) -> Access {
    actor_access(acl, agent, ActorKind::Agent, AccessScope::Resource)
}

/// The access `acl` grants to `agent` on the children of the governed container.
pub fn get_agent_default_access(acl: &AclDataset, agent: &str) -> Access {
    actor_access(acl, agent, ActorKind::Agent, AccessScope::Default)
}

/// The access `acl` grants to the members of `group` on the governed resource.
pub fn get_group_resource_access(acl: &AclDataset, group: &str) -> Access {
    actor_access(acl, group, ActorKind::Group, AccessScope::Resource)
}

/// The access `acl` grants to the members of `group` on the children of the governed container.
pub fn get_group_default_access(acl: &AclDataset, group: &str) -> Access {
    actor_access(acl, group, ActorKind::Group, AccessScope::Default)
}

/// The access `acl` grants to everyone on the governed resource.
pub fn get_public_resource_access(acl: &AclDataset) -> Access {
    actor_access(acl, foaf::Agent, ActorKind::Class, AccessScope::Resource)
}

/// The access `acl` grants to everyone on the children of the governed container.
pub fn get_public_default_access(acl: &AclDataset) -> Access {
    actor_access(acl, foaf::Agent, ActorKind::Class, AccessScope::Default)
}

/// Copy of `acl` granting exactly `access` to `agent` on the governed resource.
pub fn set_agent_resource_access(acl: &AclDataset, agent: &str, access: Access) -> Result<AclDataset> {
    set_actor_access(acl, access, ActorKind::Agent, AccessScope::Resource, agent)
}

/// Copy of `acl` granting exactly `access` to `agent` on the children of the governed container.
pub fn set_agent_default_access(acl: &AclDataset, agent: &str, access: Access) -> Result<AclDataset> {
    set_actor_access(acl, access, ActorKind::Agent, AccessScope::Default, agent)
}

/// Copy of `acl` granting exactly `access` to the members of `group` on the governed resource.
pub fn set_group_resource_access(acl: &AclDataset, group: &str, access: Access) -> Result<AclDataset> {
    set_actor_access(acl, access, ActorKind::Group, AccessScope::Resource, group)
}

/// Copy of `acl` granting exactly `access` to the members of `group`
/// on the children of the governed container.
pub fn set_group_default_access(acl: &AclDataset, group: &str, access: Access) -> Result<AclDataset> {
    set_actor_access(acl, access, ActorKind::Group, AccessScope::Default, group)
}

/// Copy of `acl` granting exactly `access` to everyone on the governed resource.
pub fn set_public_resource_access(acl: &AclDataset, access: Access) -> Result<AclDataset> {
    set_actor_access(acl, access, ActorKind::Class, AccessScope::Resource, foaf::Agent)
}

/// Copy of `acl` granting exactly `access` to everyone on the children of the governed container.
pub fn set_public_default_access(acl: &AclDataset, access: Access) -> Result<AclDataset> {
    set_actor_access(acl, access, ActorKind::Class, AccessScope::Default, foaf::Agent)
}
