//! Metadata about the resource a dataset was fetched from or saved to.
use std::collections::BTreeMap;

/// The access modes granted to someone on a resource.
///
/// `write` implies `append` wherever an `Access` is derived from server data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Access {
    /// May read the resource.
    pub read: bool,
    /// May add data to the resource.
    pub append: bool,
    /// May modify or delete the resource.
    pub write: bool,
    /// May read and modify the access rules of the resource.
    pub control: bool,
}

impl Access {
    /// No access at all.
    pub const NONE: Access = Access {
        read: false,
        append: false,
        write: false,
        control: false,
    };

    /// Every access mode.
    pub const ALL: Access = Access {
        read: true,
        append: true,
        write: true,
        control: true,
    };
}

/// The access modes advertised by the `WAC-Allow` header of a response.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WacPermissions {
    /// Access of the authenticated user.
    pub user: Access,
    /// Access of everyone.
    pub public: Access,
}

/// What a response told us about a resource.
///
/// It is derived from one response and never updated afterwards;
/// a new request yields a new `ResourceInfo`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceInfo {
    /// The URL of the resource.
    pub source_iri: String,
    /// Whether the resource is anything but an RDF document.
    pub is_raw_data: bool,
    /// The `Content-Type` of the resource, if known.
    pub content_type: Option<String>,
    /// The targets of the `Link` header, resolved against `source_iri`, keyed by relation type.
    pub linked_resources: BTreeMap<String, Vec<String>>,
    /// The URL of the ACL of the resource, if exactly one was advertised.
    pub acl_url: Option<String>,
    /// The parsed `WAC-Allow` header, if any.
    pub permissions: Option<WacPermissions>,
}

impl ResourceInfo {
    /// Metadata of an RDF document at `source_iri`, with nothing else known.
    pub fn new(source_iri: impl Into<String>) -> Self {
        ResourceInfo {
            source_iri: source_iri.into(),
            ..Default::default()
        }
    }

    /// The URL of the resource.
    pub fn source_url(&self) -> &str {
        &self.source_iri
    }

    /// The `Content-Type` of the resource, if known.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// The URLs linked from the resource with relation type `rel`.
    pub fn linked_resource_url_all(&self, rel: &str) -> &[String] {
        self.linked_resources
            .get(rel)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether the URL of the ACL of this resource is known.
    pub fn has_accessible_acl(&self) -> bool {
        self.acl_url.is_some()
    }
}

/// Values that may carry [`ResourceInfo`]:
/// datasets, and the metadata themselves.
pub trait HasResourceInfo {
    /// The resource metadata, if any.
    fn resource_info(&self) -> Option<&ResourceInfo>;

    /// The URL of the resource, if known.
    fn source_url(&self) -> Option<&str> {
        self.resource_info().map(ResourceInfo::source_url)
    }
}

impl HasResourceInfo for ResourceInfo {
    fn resource_info(&self) -> Option<&ResourceInfo> {
        Some(self)
    }
}
