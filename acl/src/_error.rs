use solid_dataset::ThingError;

/// Type alias for `Result` with default error `AclError`.
pub type Result<T, E = AclError> = std::result::Result<T, E>;

/// An error raised while handling an access control list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AclError {
    /// The resource does not advertise the URL of its ACL.
    #[error("Could not determine the location of the ACL for the Resource at [{0}]; possibly the current user does not have Control access to that Resource.")]
    NoAccessibleAcl(String),
    /// The resource has not been fetched from, or saved to, a server.
    #[error("The Resource has no known URL, so its ACL cannot be located.")]
    UnknownResource,
    /// The resource linked as ACL is an Access Control Resource.
    #[error("[{resource}] is governed by Access Control Policies in [{acl}] rather than by Web Access Control.")]
    AclIsAcr {
        /// The governed resource.
        resource: String,
        /// The Access Control Resource.
        acl: String,
    },
    /// A rule could not be built or stored.
    #[error(transparent)]
    Thing(#[from] ThingError),
}
