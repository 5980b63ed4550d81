use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An attribute-bearing node such as `<call static="Math::max">`.
///
/// Elements are read from YAML or JSON documents shaped like
/// `{ name, attributes: { key: value }, text, children: [...] }`; every field
/// except `name` is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Tag name used to pick a renderer (e.g. `call`, `argument`).
    pub name: String,
    /// Attribute values in document order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
    /// Literal text content.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Child elements in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Returns the raw attribute value, even when it is empty.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Returns the attribute value or `default` when the attribute is absent.
    pub fn attribute_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.attribute(key).unwrap_or(default)
    }

    /// Returns the attribute value only when it is present and non-empty.
    pub fn non_empty_attribute(&self, key: &str) -> Option<&str> {
        self.attribute(key).filter(|value| !value.is_empty())
    }

    /// Direct children with the given tag name, in document order.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_element_document_from_yaml() {
        let document = r#"
name: call
attributes:
  static: "Math::max"
children:
  - name: argument
    text: "3"
  - name: note
    text: ignored
  - name: argument
    attributes:
      data: user.age
"#;
        let element: Element = serde_yaml::from_str(document).expect("element");
        assert_eq!(element.attribute("static"), Some("Math::max"));
        let arguments: Vec<&Element> = element.children_named("argument").collect();
        assert_eq!(arguments.len(), 2);
        assert_eq!(arguments[0].text, "3");
        assert_eq!(arguments[1].attribute("data"), Some("user.age"));
    }

    #[test]
    fn attribute_accessors_distinguish_empty_and_absent() {
        let element = Element::new("call").with_attribute("data", "").with_attribute("name", "widget");
        assert_eq!(element.attribute("data"), Some(""));
        assert_eq!(element.non_empty_attribute("data"), None);
        assert_eq!(element.attribute_or("method", "render"), "render");
        assert_eq!(element.attribute_or("name", "fallback"), "widget");
        assert_eq!(element.attribute("static"), None);
    }
}
