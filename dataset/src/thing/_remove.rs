// Removers of Thing.
use super::{is_valid_url, property_iri, Thing};
use crate::literal::{
    deserialize_boolean, deserialize_datetime, deserialize_decimal, deserialize_integer,
};
use crate::{Result, ThingError};
use chrono::{DateTime, Utc};
use solid_term::ns::xsd;
use solid_term::Literal;

impl Thing {
    /// Remove every value of `property`.
    pub fn remove_all(&self, property: impl AsRef<str>) -> Result<Thing> {
        let property = property_iri(property.as_ref())?;
        if !self.predicates.contains_key(property) {
            return Ok(self.clone());
        }
        let mut predicates = (*self.predicates).clone();
        predicates.remove(property);
        Ok(self.with_predicates(predicates))
    }

    /// Remove `url` from the values of `property`.
    ///
    /// URLs are compared case-insensitively.
    pub fn remove_url(&self, property: impl AsRef<str>, url: impl AsRef<str>) -> Result<Thing> {
        let property = property_iri(property.as_ref())?;
        let url = url.as_ref();
        if !is_valid_url(url) {
            return Err(ThingError::ValidValueUrlExpected(url.to_string()));
        }
        let url = url.to_lowercase();
        Ok(self.update_objects(property, |objects| {
            objects.named_nodes.retain(|iri| iri.to_lowercase() != url)
        }))
    }

    /// Remove the literals of type `datatype` for which `matches` holds
    /// from the values of `property`.
    pub fn remove_literal_of_type(
        &self,
        property: impl AsRef<str>,
        datatype: &str,
        matches: impl Fn(&str) -> bool,
    ) -> Result<Thing> {
        let property = property_iri(property.as_ref())?;
        let concerned = self
            .objects(property)
            .is_some_and(|objects| objects.literals.contains_key(datatype));
        if !concerned {
            return Ok(self.clone());
        }
        Ok(self.update_objects(property, |objects| {
            if let Some(values) = objects.literals.get_mut(datatype) {
                values.retain(|lex| !matches(lex));
                if values.is_empty() {
                    objects.literals.remove(datatype);
                }
            }
        }))
    }

    /// Remove `literal` from the values of `property`.
    pub fn remove_literal(&self, property: impl AsRef<str>, literal: &Literal) -> Result<Thing> {
        match literal.language() {
            Some(locale) => self.remove_string_with_locale(property, literal.lexical(), locale),
            None => self.remove_literal_of_type(property, literal.datatype().iri(), |lex| {
                lex == literal.lexical()
            }),
        }
    }

    /// Remove the boolean `value` from the values of `property`.
    pub fn remove_boolean(&self, property: impl AsRef<str>, value: bool) -> Result<Thing> {
        self.remove_literal_of_type(property, xsd::boolean, |lex| {
            deserialize_boolean(lex) == Some(value)
        })
    }

    /// Remove the datetime `value` from the values of `property`.
    pub fn remove_datetime(&self, property: impl AsRef<str>, value: &DateTime<Utc>) -> Result<Thing> {
        self.remove_literal_of_type(property, xsd::dateTime, |lex| {
            deserialize_datetime(lex).as_ref() == Some(value)
        })
    }

    /// Remove the decimal `value` from the values of `property`.
    pub fn remove_decimal(&self, property: impl AsRef<str>, value: f64) -> Result<Thing> {
        self.remove_literal_of_type(property, xsd::decimal, |lex| {
            deserialize_decimal(lex) == Some(value)
        })
    }

    /// Remove the integer `value` from the values of `property`.
    pub fn remove_integer(&self, property: impl AsRef<str>, value: i64) -> Result<Thing> {
        self.remove_literal_of_type(property, xsd::integer, |lex| {
            deserialize_integer(lex) == Some(value)
        })
    }

    /// Remove the `xsd:string` `value` from the values of `property`.
    pub fn remove_string_no_locale(&self, property: impl AsRef<str>, value: &str) -> Result<Thing> {
        self.remove_literal_of_type(property, xsd::string, |lex| lex == value)
    }

    /// Remove `value` tagged with `locale` (compared case-insensitively) from the values of `property`.
    pub fn remove_string_with_locale(
        &self,
        property: impl AsRef<str>,
        value: &str,
        locale: &str,
    ) -> Result<Thing> {
        let property = property_iri(property.as_ref())?;
        let locale = locale.to_lowercase();
        let concerned = self
            .objects(property)
            .is_some_and(|objects| objects.lang_strings.contains_key(&locale));
        if !concerned {
            return Ok(self.clone());
        }
        Ok(self.update_objects(property, |objects| {
            if let Some(values) = objects.lang_strings.get_mut(&locale) {
                values.retain(|lex| lex != value);
                if values.is_empty() {
                    objects.lang_strings.remove(&locale);
                }
            }
        }))
    }
}

#[cfg(test)]
mod test {
    use crate::*;
    use solid_term::ns::xsd;
    use solid_term::{Literal, NamedNode};

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    const FRIEND: &str = "http://xmlns.com/foaf/0.1/knows";
    const RATING: &str = "https://schema.org/ratingValue";

    #[test]
    fn remove_all_drops_the_property() -> TestResult {
        let thing = Thing::create()
            .add_integer(RATING, 3)?
            .add_string_no_locale(RATING, "three")?;
        let removed = thing.remove_all(RATING)?;
        assert!(removed.objects(RATING).is_none());
        assert!(removed.is_empty());
        assert!(!thing.is_empty());
        Ok(())
    }

    #[test]
    fn removing_a_missing_property_changes_nothing() -> TestResult {
        let thing = Thing::create().add_integer(RATING, 3)?;
        assert!(thing.remove_all(FRIEND)?.ptr_eq(&thing));
        assert!(thing.remove_integer(FRIEND, 3)?.ptr_eq(&thing));
        Ok(())
    }

    #[test]
    fn urls_are_removed_case_insensitively() -> TestResult {
        let thing = Thing::create()
            .add_url(FRIEND, "https://Alice.example/profile#me")?
            .add_url(FRIEND, "https://bob.example/profile#me")?;
        let thing = thing.remove_url(FRIEND, "https://alice.example/profile#me")?;
        assert_eq!(thing.get_url_all(FRIEND)?, ["https://bob.example/profile#me"]);
        Ok(())
    }

    #[test]
    fn typed_values_are_compared_by_value() -> TestResult {
        let thing = Thing::create()
            .add_literal(RATING, Literal::new_dt("+3", NamedNode::new(xsd::integer)))?
            .add_integer(RATING, 4)?;
        let thing = thing.remove_integer(RATING, 3)?;
        assert_eq!(thing.get_integer_all(RATING)?, vec![4]);
        Ok(())
    }

    #[test]
    fn strings_with_locale() -> TestResult {
        let name = "https://schema.org/name";
        let thing = Thing::create()
            .add_string_with_locale(name, "Alien", "en")?
            .add_string_with_locale(name, "Alien", "fr")?;
        let thing = thing.remove_string_with_locale(name, "Alien", "EN")?;
        assert!(thing.get_string_with_locale_all(name, "en")?.is_empty());
        assert_eq!(thing.get_string_with_locale_all(name, "fr")?, ["Alien"]);
        let thing = thing.remove_literal(name, &Literal::new_lang("Alien", "fr"))?;
        assert!(thing.objects(name).is_none());
        Ok(())
    }

    #[test]
    fn invalid_url_value() {
        assert_eq!(
            Thing::create().remove_url(FRIEND, "bob"),
            Err(ThingError::ValidValueUrlExpected("bob".into()))
        );
    }
}
