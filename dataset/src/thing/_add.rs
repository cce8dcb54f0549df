// Adders and setters of Thing.
//
// `set_x` is `remove_all` followed by `add_x`.
use super::{is_valid_url, property_iri, BlankNodeObject, Thing};
use crate::literal::{
    serialize_boolean, serialize_datetime, serialize_decimal, serialize_integer,
};
use crate::{Result, ThingError};
use chrono::{DateTime, Utc};
use solid_term::ns::xsd;
use solid_term::{BlankNode, Literal};

impl Thing {
    /// Add `url` as a value of `property`.
    ///
    /// `url` may be a string, a [`NamedNode`](solid_term::NamedNode)
    /// or another [`Thing`] (including a local one, which will be resolved when saved).
    pub fn add_url(&self, property: impl AsRef<str>, url: impl AsRef<str>) -> Result<Thing> {
        let property = property_iri(property.as_ref())?;
        let url = url.as_ref();
        if !is_valid_url(url) {
            return Err(ThingError::ValidValueUrlExpected(url.to_string()));
        }
        Ok(self.update_objects(property, |objects| objects.named_nodes.push(url.to_string())))
    }

    /// Add a literal with lexical form `lexical` and datatype `datatype` to `property`.
    pub fn add_literal_of_type(
        &self,
        property: impl AsRef<str>,
        lexical: impl Into<String>,
        datatype: &str,
    ) -> Result<Thing> {
        let property = property_iri(property.as_ref())?;
        let lexical = lexical.into();
        Ok(self.update_objects(property, |objects| {
            objects
                .literals
                .entry(datatype.to_string())
                .or_default()
                .push(lexical)
        }))
    }

    /// Add `literal` as a value of `property`.
    pub fn add_literal(&self, property: impl AsRef<str>, literal: Literal) -> Result<Thing> {
        match literal.language() {
            Some(locale) => self.add_string_with_locale(property, literal.lexical(), locale),
            None => self.add_literal_of_type(property, literal.lexical(), literal.datatype().iri()),
        }
    }

    /// Add a reference to the blank node `node` as a value of `property`.
    pub fn add_blank_node(&self, property: impl AsRef<str>, node: BlankNode) -> Result<Thing> {
        let property = property_iri(property.as_ref())?;
        Ok(self.update_objects(property, |objects| {
            objects
                .blank_nodes
                .push(BlankNodeObject::Reference(format!("_:{}", node.id())))
        }))
    }

    /// Add a boolean value to `property`.
    pub fn add_boolean(&self, property: impl AsRef<str>, value: bool) -> Result<Thing> {
        self.add_literal_of_type(property, serialize_boolean(value), xsd::boolean)
    }

    /// Add a datetime value to `property`.
    pub fn add_datetime(&self, property: impl AsRef<str>, value: &DateTime<Utc>) -> Result<Thing> {
        self.add_literal_of_type(property, serialize_datetime(value), xsd::dateTime)
    }

    /// Add a decimal value to `property`.
    pub fn add_decimal(&self, property: impl AsRef<str>, value: f64) -> Result<Thing> {
        self.add_literal_of_type(property, serialize_decimal(value), xsd::decimal)
    }

    /// Add an integer value to `property`.
    pub fn add_integer(&self, property: impl AsRef<str>, value: i64) -> Result<Thing> {
        self.add_literal_of_type(property, serialize_integer(value), xsd::integer)
    }

    /// Add an `xsd:string` value to `property`.
    pub fn add_string_no_locale(&self, property: impl AsRef<str>, value: &str) -> Result<Thing> {
        self.add_literal_of_type(property, value, xsd::string)
    }

    /// Add a string tagged with `locale` to `property`.
    ///
    /// Locales are stored lower-cased.
    pub fn add_string_with_locale(
        &self,
        property: impl AsRef<str>,
        value: &str,
        locale: &str,
    ) -> Result<Thing> {
        let property = property_iri(property.as_ref())?;
        Ok(self.update_objects(property, |objects| {
            objects
                .lang_strings
                .entry(locale.to_lowercase())
                .or_default()
                .push(value.to_string())
        }))
    }

    /// Replace all values of `property` by `url`.
    pub fn set_url(&self, property: impl AsRef<str>, url: impl AsRef<str>) -> Result<Thing> {
        let property = property.as_ref();
        let url = url.as_ref();
        if !is_valid_url(url) {
            return Err(ThingError::ValidValueUrlExpected(url.to_string()));
        }
        self.remove_all(property)?.add_url(property, url)
    }

    /// Replace all values of `property` by `literal`.
    pub fn set_literal(&self, property: impl AsRef<str>, literal: Literal) -> Result<Thing> {
        let property = property.as_ref();
        self.remove_all(property)?.add_literal(property, literal)
    }

    /// Replace all values of `property` by a boolean.
    pub fn set_boolean(&self, property: impl AsRef<str>, value: bool) -> Result<Thing> {
        let property = property.as_ref();
        self.remove_all(property)?.add_boolean(property, value)
    }

    /// Replace all values of `property` by a datetime.
    pub fn set_datetime(&self, property: impl AsRef<str>, value: &DateTime<Utc>) -> Result<Thing> {
        let property = property.as_ref();
        self.remove_all(property)?.add_datetime(property, value)
    }

    /// Replace all values of `property` by a decimal.
    pub fn set_decimal(&self, property: impl AsRef<str>, value: f64) -> Result<Thing> {
        let property = property.as_ref();
        self.remove_all(property)?.add_decimal(property, value)
    }

    /// Replace all values of `property` by an integer.
    pub fn set_integer(&self, property: impl AsRef<str>, value: i64) -> Result<Thing> {
        let property = property.as_ref();
        self.remove_all(property)?.add_integer(property, value)
    }

    /// Replace all values of `property` by an `xsd:string`.
    pub fn set_string_no_locale(&self, property: impl AsRef<str>, value: &str) -> Result<Thing> {
        let property = property.as_ref();
        self.remove_all(property)?.add_string_no_locale(property, value)
    }

    /// Replace all values of `property` by a string tagged with `locale`.
    pub fn set_string_with_locale(
        &self,
        property: impl AsRef<str>,
        value: &str,
        locale: &str,
    ) -> Result<Thing> {
        let property = property.as_ref();
        self.remove_all(property)?
            .add_string_with_locale(property, value, locale)
    }
}
