//! Standard and commonly used namespaces.
//!
//! Each term is a `&'static str` holding the full IRI;
//! `NamedNode::new(acl::Read)` turns it into a term.

#[macro_use]
mod _macro;

/// The standard `rdf:` namespace.
pub mod rdf {
    namespace!(
        "http://www.w3.org/1999/02/22-rdf-syntax-ns#",
        langString;
        type_, "type"
    );
}

/// The standard `xsd:` namespace.
pub mod xsd {
    namespace!(
        "http://www.w3.org/2001/XMLSchema#",
        boolean,
        date,
        dateTime,
        decimal,
        integer,
        string,
        time
    );
}

/// The Web Access Control namespace.
pub mod acl {
    namespace!(
        "http://www.w3.org/ns/auth/acl#",
        Authorization,
        AuthenticatedAgent,
        accessTo,
        agent,
        agentGroup,
        agentClass,
        default,
        defaultForNew,
        mode,
        origin,
        Read,
        Append,
        Write,
        Control
    );
}

/// The Linked Data Platform namespace.
pub mod ldp {
    namespace!(
        "http://www.w3.org/ns/ldp#",
        BasicContainer,
        Container,
        Resource,
        contains
    );
}

/// The Friend of a Friend namespace.
pub mod foaf {
    namespace!(
        "http://xmlns.com/foaf/0.1/",
        Agent,
        primaryTopic,
        isPrimaryTopicOf
    );
}

/// The Access Control Policy namespace.
pub mod acp {
    namespace!(
        "http://www.w3.org/ns/solid/acp#",
        AccessControlResource,
        accessControl,
        apply,
        Policy,
        Rule
    );
}
