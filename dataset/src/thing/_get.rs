// Getters of Thing, grouped here to keep `thing.rs` short.
use super::{property_iri, BlankNodeObject, Objects, Thing};
use crate::literal::{
    deserialize_boolean, deserialize_datetime, deserialize_decimal, deserialize_integer,
};
use crate::local::{is_local_node_iri, local_node_name};
use crate::Result;
use chrono::{DateTime, Utc};
use solid_term::ns::xsd;
use solid_term::{DataFactory, Literal, NamedNode, Term};

impl Thing {
    fn objects_of(&self, property: &str) -> Result<Option<&Objects>> {
        Ok(self.objects(property_iri(property)?))
    }

    /// The first URL value of `property`.
    ///
    /// A value that is a local node is returned as `#name`.
    pub fn get_url(&self, property: impl AsRef<str>) -> Result<Option<String>> {
        Ok(self.get_url_all(property)?.into_iter().next())
    }

    /// All URL values of `property`; local nodes are returned as `#name`.
    pub fn get_url_all(&self, property: impl AsRef<str>) -> Result<Vec<String>> {
        let Some(objects) = self.objects_of(property.as_ref())? else {
            return Ok(vec![]);
        };
        Ok(objects
            .named_nodes
            .iter()
            .map(|iri| {
                if is_local_node_iri(iri) {
                    format!("#{}", local_node_name(iri))
                } else {
                    iri.clone()
                }
            })
            .collect())
    }

    /// All URL values of `property`, as [`NamedNode`]s.
    pub fn get_named_node_all(&self, property: impl AsRef<str>) -> Result<Vec<NamedNode>> {
        Ok(self
            .get_url_all(property)?
            .into_iter()
            .map(NamedNode::new)
            .collect())
    }

    /// The lexical forms of the values of `property` with datatype `datatype`.
    pub fn get_literal_all_of_type(
        &self,
        property: impl AsRef<str>,
        datatype: &str,
    ) -> Result<Vec<String>> {
        Ok(self
            .objects_of(property.as_ref())?
            .and_then(|objects| objects.literals.get(datatype))
            .cloned()
            .unwrap_or_default())
    }

    fn get_first_of_type<T>(
        &self,
        property: impl AsRef<str>,
        datatype: &str,
        deserialize: impl Fn(&str) -> Option<T>,
    ) -> Result<Option<T>> {
        let lexical = self
            .objects_of(property.as_ref())?
            .and_then(|objects| objects.literals.get(datatype))
            .and_then(|values| values.first());
        Ok(lexical.and_then(|lex| deserialize(lex)))
    }

    fn get_all_of_type<T>(
        &self,
        property: impl AsRef<str>,
        datatype: &str,
        deserialize: impl Fn(&str) -> Option<T>,
    ) -> Result<Vec<T>> {
        Ok(self
            .get_literal_all_of_type(property, datatype)?
            .iter()
            .filter_map(|lex| deserialize(lex))
            .collect())
    }

    /// The first boolean value of `property`.
    ///
    /// `None` if there is none, or if its lexical form is not a valid boolean.
    pub fn get_boolean(&self, property: impl AsRef<str>) -> Result<Option<bool>> {
        self.get_first_of_type(property, xsd::boolean, deserialize_boolean)
    }

    /// All valid boolean values of `property`.
    pub fn get_boolean_all(&self, property: impl AsRef<str>) -> Result<Vec<bool>> {
        self.get_all_of_type(property, xsd::boolean, deserialize_boolean)
    }

    /// The first datetime value of `property`.
    pub fn get_datetime(&self, property: impl AsRef<str>) -> Result<Option<DateTime<Utc>>> {
        self.get_first_of_type(property, xsd::dateTime, deserialize_datetime)
    }

    /// All valid datetime values of `property`.
    pub fn get_datetime_all(&self, property: impl AsRef<str>) -> Result<Vec<DateTime<Utc>>> {
        self.get_all_of_type(property, xsd::dateTime, deserialize_datetime)
    }

    /// The first decimal value of `property`.
    pub fn get_decimal(&self, property: impl AsRef<str>) -> Result<Option<f64>> {
        self.get_first_of_type(property, xsd::decimal, deserialize_decimal)
    }

    /// All valid decimal values of `property`.
    pub fn get_decimal_all(&self, property: impl AsRef<str>) -> Result<Vec<f64>> {
        self.get_all_of_type(property, xsd::decimal, deserialize_decimal)
    }

    /// The first integer value of `property`.
    pub fn get_integer(&self, property: impl AsRef<str>) -> Result<Option<i64>> {
        self.get_first_of_type(property, xsd::integer, deserialize_integer)
    }

    /// All valid integer values of `property`.
    pub fn get_integer_all(&self, property: impl AsRef<str>) -> Result<Vec<i64>> {
        self.get_all_of_type(property, xsd::integer, deserialize_integer)
    }

    /// The first `xsd:string` value of `property`.
    pub fn get_string_no_locale(&self, property: impl AsRef<str>) -> Result<Option<String>> {
        self.get_first_of_type(property, xsd::string, |lex| Some(lex.to_string()))
    }

    /// All `xsd:string` values of `property`.
    pub fn get_string_no_locale_all(&self, property: impl AsRef<str>) -> Result<Vec<String>> {
        self.get_literal_all_of_type(property, xsd::string)
    }

    /// The first value of `property` tagged with `locale` (compared case-insensitively).
    pub fn get_string_with_locale(
        &self,
        property: impl AsRef<str>,
        locale: &str,
    ) -> Result<Option<String>> {
        Ok(self
            .get_string_with_locale_all(property, locale)?
            .into_iter()
            .next())
    }

    /// All values of `property` tagged with `locale` (compared case-insensitively).
    pub fn get_string_with_locale_all(
        &self,
        property: impl AsRef<str>,
        locale: &str,
    ) -> Result<Vec<String>> {
        Ok(self
            .objects_of(property.as_ref())?
            .and_then(|objects| objects.lang_strings.get(&locale.to_lowercase()))
            .cloned()
            .unwrap_or_default())
    }

    /// All literal values of `property`:
    /// language-tagged strings first, then the others grouped by datatype.
    pub fn get_literal_all(&self, property: impl AsRef<str>) -> Result<Vec<Literal>> {
        let Some(objects) = self.objects_of(property.as_ref())? else {
            return Ok(vec![]);
        };
        let lang_strings = objects.lang_strings.iter().flat_map(|(locale, values)| {
            values
                .iter()
                .map(move |lex| Literal::new_lang(lex.as_str(), locale.as_str()))
        });
        let others = objects.literals.iter().flat_map(|(datatype, values)| {
            values
                .iter()
                .map(move |lex| Literal::new_dt(lex.as_str(), NamedNode::new(datatype.as_str())))
        });
        Ok(lang_strings.chain(others).collect())
    }

    /// All values of `property` as terms:
    /// IRIs first, then literals, then blank nodes.
    ///
    /// A blank node described inline gets a fresh identifier,
    /// only meaningful within the returned list.
    pub fn get_term_all(&self, property: impl AsRef<str>) -> Result<Vec<Term>> {
        let property = property.as_ref();
        let mut terms: Vec<Term> = self
            .get_named_node_all(property)?
            .into_iter()
            .map(Term::from)
            .collect();
        terms.extend(self.get_literal_all(property)?.into_iter().map(Term::from));
        if let Some(objects) = self.objects(property) {
            let factory = DataFactory::new();
            terms.extend(objects.blank_nodes.iter().map(|blank| {
                let id = match blank {
                    BlankNodeObject::Reference(id) => id.strip_prefix("_:"),
                    BlankNodeObject::Inline(_) => None,
                };
                Term::from(factory.blank_node(id))
            }));
        }
        Ok(terms)
    }
}
