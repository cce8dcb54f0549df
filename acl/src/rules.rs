//! The rule engine: rules are the `acl:Authorization` Things of an ACL.
//!
//! Updates follow one discipline:
//! an actor is first removed from every rule it shares with other actors
//! (or other targets), then granted its new access through a rule of its own,
//! and finally the rules left without target, mode or actor are pruned.
use crate::{AclDataset, Result};
use solid_dataset::thing::Objects;
use solid_dataset::{Access, SolidDataset, Thing, ThingQuery};
use solid_term::ns::{acl, rdf};

/// The IRIs of the four access modes.
pub const ACCESS_MODES: [&str; 4] = [acl::Read, acl::Append, acl::Write, acl::Control];

/// Whether a rule grants access to a resource itself,
/// or to the resources a container will contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessScope {
    /// `acl:accessTo`
    Resource,
    /// `acl:default`, also matched by the legacy `acl:defaultForNew`.
    Default,
}

impl AccessScope {
    /// The predicate naming the targets of a rule in this scope.
    pub fn predicate(self) -> &'static str {
        match self {
            AccessScope::Resource => acl::accessTo,
            AccessScope::Default => acl::default,
        }
    }
}

/// How a rule names the actors it grants access to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActorKind {
    /// `acl:agent`: a WebID.
    Agent,
    /// `acl:agentGroup`: a group of WebIDs.
    Group,
    /// `acl:agentClass`: a class of agents, e.g. `foaf:Agent` for everyone.
    Class,
    /// `acl:origin`: an application origin.
    Origin,
}

impl ActorKind {
    /// All actor kinds.
    pub const ALL: [ActorKind; 4] = [
        ActorKind::Agent,
        ActorKind::Class,
        ActorKind::Group,
        ActorKind::Origin,
    ];

    /// The predicate naming actors of this kind.
    pub fn predicate(self) -> &'static str {
        match self {
            ActorKind::Agent => acl::agent,
            ActorKind::Group => acl::agentGroup,
            ActorKind::Class => acl::agentClass,
            ActorKind::Origin => acl::origin,
        }
    }
}

/// The IRI values of `property` on `thing`.
pub(crate) fn iris<'a>(thing: &'a Thing, property: &str) -> &'a [String] {
    thing
        .objects(property)
        .map(|objects| objects.named_nodes.as_slice())
        .unwrap_or_default()
}

fn has_iri(thing: &Thing, property: &str, iri: &str) -> bool {
    iris(thing, property).iter().any(|i| i == iri)
}

/// Whether `thing` has type `acl:Authorization`.
pub fn is_acl_rule(thing: &Thing) -> bool {
    has_iri(thing, rdf::type_, acl::Authorization)
}

/// The rules of `acl`.
pub fn acl_rules(acl: &SolidDataset) -> Vec<&Thing> {
    acl.get_thing_all(&ThingQuery::new())
        .into_iter()
        .filter(|thing| is_acl_rule(thing))
        .collect()
}

/// Whether `rule` applies to `resource` in `scope`.
pub fn applies_to(rule: &Thing, resource: &str, scope: AccessScope) -> bool {
    match scope {
        AccessScope::Resource => has_iri(rule, acl::accessTo, resource),
        AccessScope::Default => {
            has_iri(rule, acl::default, resource) || has_iri(rule, acl::defaultForNew, resource)
        }
    }
}

/// The rules among `rules` that apply to `resource` in `scope`.
pub fn rules_for_resource<'a>(
    rules: &[&'a Thing],
    resource: &str,
    scope: AccessScope,
) -> Vec<&'a Thing> {
    rules
        .iter()
        .copied()
        .filter(|rule| applies_to(rule, resource, scope))
        .collect()
}

/// The rules among `rules` naming `actor` as an actor of kind `kind`.
pub fn rules_for_actor<'a>(rules: &[&'a Thing], actor: &str, kind: ActorKind) -> Vec<&'a Thing> {
    rules
        .iter()
        .copied()
        .filter(|rule| has_iri(rule, kind.predicate(), actor))
        .collect()
}

/// The access granted by `rule`; write access implies append access.
pub fn rule_access(rule: &Thing) -> Access {
    let modes = iris(rule, acl::mode);
    let has = |mode: &str| modes.iter().any(|m| m == mode);
    let write = has(acl::Write);
    Access {
        read: has(acl::Read),
        append: write || has(acl::Append),
        write,
        control: has(acl::Control),
    }
}

/// The union of `accesses`; write access implies append access.
///
/// ```
/// # use solid_acl::{Access, rules::combine_access_modes};
/// let write_only = Access { write: true, ..Access::NONE };
/// let combined = combine_access_modes([write_only, Access::NONE]);
/// assert_eq!(combined, Access { append: true, write: true, ..Access::NONE });
/// ```
pub fn combine_access_modes(accesses: impl IntoIterator<Item = Access>) -> Access {
    accesses.into_iter().fold(Access::NONE, |acc, current| {
        let write = acc.write || current.write;
        Access {
            read: acc.read || current.read,
            append: write || acc.append || current.append,
            write,
            control: acc.control || current.control,
        }
    })
}

/// The combined access granted to `actor` on the governed resource of `acl`, in `scope`.
pub fn actor_access(acl: &AclDataset, actor: &str, kind: ActorKind, scope: AccessScope) -> Access {
    let rules = acl_rules(acl.dataset());
    let in_scope = rules_for_resource(&rules, acl.access_to(), scope);
    combine_access_modes(
        rules_for_actor(&in_scope, actor, kind)
            .into_iter()
            .map(rule_access),
    )
}

/// Whether all values of `objects` are IRIs among `allowed`.
fn only_iris_among(objects: &Objects, allowed: &[&str]) -> bool {
    objects.literals.values().all(Vec::is_empty)
        && objects.lang_strings.values().all(Vec::is_empty)
        && objects.blank_nodes.is_empty()
        && objects
            .named_nodes
            .iter()
            .all(|iri| allowed.contains(&iri.as_str()))
}

/// Whether every statement about `rule` belongs to the ACL vocabulary.
fn has_only_acl_statements(rule: &Thing) -> bool {
    rule.predicates()
        .iter()
        .all(|(property, objects)| match property.as_str() {
            rdf::type_ => only_iris_among(objects, &[acl::Authorization]),
            acl::mode => only_iris_among(objects, &ACCESS_MODES),
            acl::accessTo
            | acl::default
            | acl::defaultForNew
            | acl::agent
            | acl::agentGroup
            | acl::agentClass
            | acl::origin => true,
            _ => objects.is_empty(),
        })
}

/// Whether `rule` grants nothing and says nothing else,
/// i.e. can be removed without loss.
///
/// A rule grants nothing when it lacks a target, a mode,
/// or an agent, group or class.
pub fn is_empty_rule(rule: &Thing) -> bool {
    if !has_only_acl_statements(rule) {
        return false;
    }
    let lacks = |properties: &[&str]| properties.iter().all(|p| iris(rule, p).is_empty());
    lacks(&[acl::accessTo, acl::default, acl::defaultForNew])
        || lacks(&[acl::mode])
        || lacks(&[acl::agent, acl::agentGroup, acl::agentClass])
}

/// Copy of `acl` without its [empty](is_empty_rule) rules.
pub fn remove_empty_rules(acl: &SolidDataset) -> Result<SolidDataset> {
    let mut pruned = acl.clone();
    for rule in acl_rules(acl).into_iter().filter(|rule| is_empty_rule(rule)) {
        log::trace!("pruning empty rule {}", rule.url());
        pruned = pruned.remove_thing(rule)?;
    }
    Ok(pruned)
}

/// A new rule granting `access`, with no target nor actor yet.
///
/// Append is left out when write is granted, as write implies it.
pub fn initialise_rule(access: Access) -> Result<Thing> {
    let mut rule = Thing::create().set_url(rdf::type_, acl::Authorization)?;
    let modes = [
        (access.read, acl::Read),
        (access.append && !access.write, acl::Append),
        (access.write, acl::Write),
        (access.control, acl::Control),
    ];
    for (granted, mode) in modes {
        if granted {
            rule = rule.add_url(acl::mode, mode)?;
        }
    }
    Ok(rule)
}

/// A new rule with the same targets, actors and modes as `rule`, and nothing else.
pub fn duplicate_rule(rule: &Thing) -> Result<Thing> {
    let mut copy = Thing::create().set_url(rdf::type_, acl::Authorization)?;
    let copied = [
        acl::accessTo,
        acl::default,
        acl::defaultForNew,
        acl::agent,
        acl::agentGroup,
        acl::agentClass,
        acl::origin,
        acl::mode,
    ];
    for property in copied {
        for iri in iris(rule, property) {
            copy = copy.add_url(property, iri)?;
        }
    }
    Ok(copy)
}

/// Split `rule` so that it no longer applies to `actor` on `resource` in `scope`.
///
/// Returns `rule` without `actor`,
/// and a copy of `rule` restricted to `actor` and to the targets other than `resource`
/// (that copy may be [empty](is_empty_rule)).
/// Returns `None` if `rule` does not name `actor`.
pub fn remove_actor_from_rule(
    rule: &Thing,
    actor: &str,
    kind: ActorKind,
    resource: &str,
    scope: AccessScope,
) -> Result<Option<(Thing, Thing)>> {
    if !has_iri(rule, kind.predicate(), actor) {
        return Ok(None);
    }
    let without_actor = rule.remove_url(kind.predicate(), actor)?;
    let mut for_other_targets = duplicate_rule(rule)?.remove_url(scope.predicate(), resource)?;
    if scope == AccessScope::Default {
        for_other_targets = for_other_targets.remove_url(acl::defaultForNew, resource)?;
    }
    for_other_targets = for_other_targets.set_url(kind.predicate(), actor)?;
    for other in ActorKind::ALL.into_iter().filter(|k| *k != kind) {
        for_other_targets = for_other_targets.remove_all(other.predicate())?;
    }
    Ok(Some((without_actor, for_other_targets)))
}

/// Copy of `acl` where `actor` is granted exactly `access`
/// on the governed resource, in `scope`.
pub fn set_actor_access(
    acl: &AclDataset,
    access: Access,
    kind: ActorKind,
    scope: AccessScope,
    actor: &str,
) -> Result<AclDataset> {
    let resource = acl.access_to();
    let mut dataset = acl.dataset().clone();
    let rules: Vec<Thing> = acl
        .dataset()
        .get_thing_all(&ThingQuery::new())
        .into_iter()
        .cloned()
        .collect();
    for rule in &rules {
        if let Some((without_actor, for_other_targets)) =
            remove_actor_from_rule(rule, actor, kind, resource, scope)?
        {
            dataset = dataset
                .set_thing(&without_actor)?
                .set_thing(&for_other_targets)?;
        }
    }
    let new_rule = initialise_rule(access)?
        .set_url(scope.predicate(), resource)?
        .set_url(kind.predicate(), actor)?;
    log::debug!("granting {access:?} on {resource} ({scope:?}) to {actor}");
    let dataset = dataset.set_thing(&new_rule)?;
    Ok(acl.with_dataset(remove_empty_rules(&dataset)?))
}
