// this module is transparently re-exported by its parent `lib`
use crate::{AclError, Result};
use solid_dataset::{HasResourceInfo, ResourceInfo, SolidDataset};
use solid_term::ns::acp;

/// An ACL resource, with the URL of the resource it governs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AclDataset {
    dataset: SolidDataset,
    access_to: String,
}

impl AclDataset {
    /// Wrap `dataset`, the ACL of the resource at `access_to`.
    pub fn new(dataset: SolidDataset, access_to: impl Into<String>) -> Self {
        AclDataset {
            dataset,
            access_to: access_to.into(),
        }
    }

    /// The rules, as a dataset.
    pub fn dataset(&self) -> &SolidDataset {
        &self.dataset
    }

    /// The URL of the governed resource.
    pub fn access_to(&self) -> &str {
        &self.access_to
    }

    /// Unwrap the dataset.
    pub fn into_dataset(self) -> SolidDataset {
        self.dataset
    }

    /// Copy of this ACL with its rules replaced by `dataset`.
    pub fn with_dataset(&self, dataset: SolidDataset) -> AclDataset {
        AclDataset {
            dataset,
            access_to: self.access_to.clone(),
        }
    }
}

impl HasResourceInfo for AclDataset {
    fn resource_info(&self) -> Option<&ResourceInfo> {
        self.dataset.resource_info()
    }
}

/// The ACLs known for a resource.
///
/// At most one of them is set:
/// the fallback ACL is only looked for when the resource has no ACL of its own.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccessControlList {
    /// The ACL of the resource itself.
    pub resource_acl: Option<AclDataset>,
    /// The ACL of the closest ancestor container that has one,
    /// whose default rules apply to the resource.
    pub fallback_acl: Option<AclDataset>,
}

/// A resource together with its ACLs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithAcl<T> {
    resource: T,
    acl: AccessControlList,
}

impl<T: HasResourceInfo> WithAcl<T> {
    /// Attach `acl` to `resource`.
    pub fn new(resource: T, acl: AccessControlList) -> Self {
        WithAcl { resource, acl }
    }

    /// The resource.
    pub fn resource(&self) -> &T {
        &self.resource
    }

    /// The ACLs of the resource.
    pub fn acl(&self) -> &AccessControlList {
        &self.acl
    }

    /// Detach the resource from its ACLs.
    pub fn into_inner(self) -> T {
        self.resource
    }

    /// Whether the ACL of the resource itself is known,
    /// and really is the one advertised by the resource.
    pub fn has_resource_acl(&self) -> bool {
        let Some(acl) = &self.acl.resource_acl else {
            return false;
        };
        let advertised = self
            .resource
            .resource_info()
            .and_then(|info| info.acl_url.as_deref());
        self.resource.source_url() == Some(acl.access_to())
            && advertised.is_some()
            && advertised == acl.source_url()
    }

    /// The ACL of the resource itself, if [known](Self::has_resource_acl).
    pub fn resource_acl(&self) -> Option<&AclDataset> {
        if self.has_resource_acl() {
            self.acl.resource_acl.as_ref()
        } else {
            None
        }
    }

    /// Whether the ACL of an ancestor container applies to the resource.
    pub fn has_fallback_acl(&self) -> bool {
        self.acl.fallback_acl.is_some()
    }

    /// The ACL of the closest ancestor container that has one.
    pub fn fallback_acl(&self) -> Option<&AclDataset> {
        self.acl.fallback_acl.as_ref()
    }
}

impl<T: HasResourceInfo> HasResourceInfo for WithAcl<T> {
    fn resource_info(&self) -> Option<&ResourceInfo> {
        self.resource.resource_info()
    }
}

/// Whether the URL of the ACL of `resource` is known.
pub fn has_accessible_acl(resource: &impl HasResourceInfo) -> bool {
    resource
        .resource_info()
        .is_some_and(ResourceInfo::has_accessible_acl)
}

/// An empty ACL for `target`, to be saved at the ACL URL it advertises.
pub fn create_acl(target: &impl HasResourceInfo) -> Result<AclDataset> {
    let info = target.resource_info().ok_or(AclError::UnknownResource)?;
    let acl_url = info
        .acl_url
        .as_deref()
        .ok_or_else(|| AclError::NoAccessibleAcl(info.source_iri.clone()))?;
    let dataset = SolidDataset::new().with_resource_info(ResourceInfo::new(acl_url));
    Ok(AclDataset::new(dataset, info.source_iri.as_str()))
}

/// Whether `resource` is an Access Control Resource,
/// i.e. is linked with `rel="type"` to `acp:AccessControlResource`.
pub fn is_acr(resource: &impl HasResourceInfo) -> bool {
    resource.resource_info().is_some_and(|info| {
        info.linked_resource_url_all("type")
            .iter()
            .any(|t| t == acp::AccessControlResource)
    })
}

/// The path of the container of the resource at `path`.
///
/// ```
/// # use solid_acl::container_path;
/// assert_eq!(container_path("/movies/alien.ttl"), "/movies/");
/// assert_eq!(container_path("/movies/"), "/");
/// ```
pub fn container_path(path: &str) -> String {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    match trimmed.rfind('/') {
        Some(i) => format!("{}/", &path[..i]),
        None => "/".to_string(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_case::test_case;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    const RESOURCE: &str = "https://pod.example/movies/alien.ttl";
    const ACL: &str = "https://pod.example/movies/alien.ttl.acl";

    fn fetched(acl_url: Option<&str>) -> SolidDataset {
        let mut info = ResourceInfo::new(RESOURCE);
        info.acl_url = acl_url.map(str::to_string);
        SolidDataset::new().with_resource_info(info)
    }

    #[test_case("/movies/alien.ttl", "/movies/")]
    #[test_case("/movies/", "/")]
    #[test_case("/a/b/c/", "/a/b/")]
    #[test_case("/a", "/")]
    fn container_paths(path: &str, expected: &str) {
        assert_eq!(container_path(path), expected);
    }

    #[test]
    fn create_acl_for_resource() -> TestResult {
        let acl = create_acl(&fetched(Some(ACL)))?;
        assert_eq!(acl.access_to(), RESOURCE);
        assert_eq!(acl.source_url(), Some(ACL));
        assert!(acl.dataset().graph(&solid_dataset::GraphKey::Default).is_none());
        Ok(())
    }

    #[test]
    fn create_acl_without_acl_url() {
        assert_eq!(
            create_acl(&fetched(None)),
            Err(AclError::NoAccessibleAcl(RESOURCE.into()))
        );
        assert_eq!(create_acl(&SolidDataset::new()), Err(AclError::UnknownResource));
    }

    #[test]
    fn resource_acl_must_match_resource() -> TestResult {
        let resource = fetched(Some(ACL));
        let acl = create_acl(&resource)?;
        let with_acl = WithAcl::new(
            resource.clone(),
            AccessControlList {
                resource_acl: Some(acl.clone()),
                fallback_acl: None,
            },
        );
        assert!(with_acl.has_resource_acl());
        assert!(with_acl.resource_acl().is_some());
        assert!(!with_acl.has_fallback_acl());

        let other = AclDataset::new(acl.dataset().clone(), "https://pod.example/other");
        let with_other = WithAcl::new(
            resource,
            AccessControlList {
                resource_acl: Some(other),
                fallback_acl: None,
            },
        );
        assert!(!with_other.has_resource_acl());
        assert!(with_other.resource_acl().is_none());
        Ok(())
    }

    #[test]
    fn acr_detection() {
        let mut info = ResourceInfo::new(ACL);
        assert!(!is_acr(&info));
        info.linked_resources
            .insert("type".into(), vec![acp::AccessControlResource.into()]);
        assert!(is_acr(&info));
    }
}
