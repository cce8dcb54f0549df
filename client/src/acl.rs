//! Fetching and saving the Web Access Control lists of resources.
use crate::fetch::Fetcher;
use crate::resource_info::ResourceInfoOptions;
use crate::{ClientError, Result, SolidClient};
use solid_acl::{
    container_path, has_accessible_acl, is_acr, AccessControlList, AclDataset, AclError, WithAcl,
};
use solid_dataset::{HasResourceInfo, ResourceInfo, SolidDataset};
use url::Url;

impl<F: Fetcher> SolidClient<F> {
    /// Fetch the dataset at `url` together with its ACLs.
    pub fn get_solid_dataset_with_acl(&self, url: &str) -> Result<WithAcl<SolidDataset>> {
        let dataset = self.get_solid_dataset(url)?;
        let acl = self.fetch_acl(&dataset)?;
        Ok(WithAcl::new(dataset, acl))
    }

    /// Fetch the metadata of the resource at `url` together with its ACLs.
    pub fn get_resource_info_with_acl(
        &self,
        url: &str,
        options: &ResourceInfoOptions,
    ) -> Result<WithAcl<ResourceInfo>> {
        let info = self.get_resource_info(url, options)?;
        let acl = self.fetch_acl(&info)?;
        Ok(WithAcl::new(info, acl))
    }

    /// The ACLs that apply to `resource`.
    ///
    /// The ACL of the resource itself is used if it can be fetched;
    /// otherwise the closest ancestor container with an ACL provides the fallback ACL.
    /// A resource governed by Access Control Policies has no ACL.
    pub fn fetch_acl(&self, resource: &impl HasResourceInfo) -> Result<AccessControlList> {
        if !has_accessible_acl(resource) {
            return Ok(AccessControlList::default());
        }
        let acl = self
            .fetch_resource_acl(resource)
            .and_then(|resource_acl| match resource_acl {
                Some(acl) => Ok(AccessControlList {
                    resource_acl: Some(acl),
                    fallback_acl: None,
                }),
                None => Ok(AccessControlList {
                    resource_acl: None,
                    fallback_acl: self.fetch_fallback_acl(resource)?,
                }),
            });
        match acl {
            Err(ClientError::Acl(err @ AclError::AclIsAcr { .. })) => {
                log::warn!("{err}");
                Ok(AccessControlList::default())
            }
            other => other,
        }
    }

    /// The ACL of `resource` itself, `None` if it cannot be fetched.
    fn fetch_resource_acl(&self, resource: &impl HasResourceInfo) -> Result<Option<AclDataset>> {
        let Some(info) = resource.resource_info() else {
            return Ok(None);
        };
        let Some(acl_url) = info.acl_url.as_deref() else {
            return Ok(None);
        };
        let dataset = match self.get_solid_dataset(acl_url) {
            Ok(dataset) => dataset,
            Err(err) => {
                log::debug!("no ACL for {}: {err}", info.source_url());
                return Ok(None);
            }
        };
        if is_acr(&dataset) {
            return Err(AclError::AclIsAcr {
                resource: info.source_iri.clone(),
                acl: acl_url.to_string(),
            }
            .into());
        }
        Ok(Some(AclDataset::new(dataset, info.source_iri.as_str())))
    }

    /// The ACL of the closest ancestor container of `resource` that has one.
    fn fetch_fallback_acl(&self, resource: &impl HasResourceInfo) -> Result<Option<AclDataset>> {
        let Some(source) = resource.source_url() else {
            return Ok(None);
        };
        let mut url = Url::parse(source).map_err(|err| ClientError::InvalidUrl {
            url: source.to_string(),
            source: err,
        })?;
        if url.path() == "/" {
            return Ok(None);
        }
        let path = container_path(url.path());
        url.set_path(&path);
        url.set_query(None);
        url.set_fragment(None);
        let container = self.get_resource_info(url.as_str(), &ResourceInfoOptions::new())?;
        if !container.has_accessible_acl() {
            return Ok(None);
        }
        match self.fetch_resource_acl(&container)? {
            Some(acl) => Ok(Some(acl)),
            None => self.fetch_fallback_acl(&container),
        }
    }

    /// Store `acl` as the ACL of `resource`.
    ///
    /// The returned ACL governs `resource`, and has been saved like any dataset
    /// (see [`save_solid_dataset_at`](Self::save_solid_dataset_at)).
    pub fn save_acl_for(
        &self,
        resource: &impl HasResourceInfo,
        acl: &AclDataset,
    ) -> Result<AclDataset> {
        let info = resource.resource_info().ok_or(AclError::UnknownResource)?;
        let acl_url = info
            .acl_url
            .as_deref()
            .ok_or_else(|| AclError::NoAccessibleAcl(info.source_iri.clone()))?;
        let saved = self.save_solid_dataset_at(acl_url, acl.dataset())?;
        Ok(AclDataset::new(saved, info.source_iri.as_str()))
    }
}
