//! Owned XML tree of a job configuration.

/// Top-level items outside the root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Misc {
    DocType(String),
    Comment(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
    CData(String),
    Comment(String),
}

impl XmlNode {
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    pub prolog: Vec<Misc>,
    pub root: XmlElement,
    pub epilog: Vec<Misc>,
}

impl XmlDocument {
    pub fn new(root: XmlElement) -> Self {
        Self {
            prolog: Vec::new(),
            root,
            epilog: Vec::new(),
        }
    }

    /// Number of elements called `name`, the root included.
    pub fn count(&self, name: &str) -> usize {
        usize::from(self.root.name == name) + self.root.count_descendants(name)
    }

    /// First element called `name` in document order, the root included.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut XmlElement> {
        if self.root.name == name {
            Some(&mut self.root)
        } else {
            self.root.find_descendant_mut(name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace the value of `key`, or append it when absent.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn clear_attributes(&mut self) {
        self.attributes.clear();
    }

    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    pub fn count_descendants(&self, name: &str) -> usize {
        self.elements()
            .map(|el| usize::from(el.name == name) + el.count_descendants(name))
            .sum()
    }

    pub fn find_descendant_mut(&mut self, name: &str) -> Option<&mut XmlElement> {
        for child in &mut self.children {
            if let XmlNode::Element(el) = child {
                if el.name == name {
                    return Some(el);
                }
                if let Some(found) = el.find_descendant_mut(name) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Remove every descendant called `name`; returns how many went.
    pub fn remove_descendants(&mut self, name: &str) -> usize {
        let before = self.children.len();
        self.children
            .retain(|node| !matches!(node, XmlNode::Element(el) if el.name == name));
        let mut removed = before - self.children.len();
        for child in &mut self.children {
            if let XmlNode::Element(el) = child {
                removed += el.remove_descendants(name);
            }
        }
        removed
    }

    /// Keep only the first descendant called `name` in document order.
    ///
    /// Returns `false` when there was none to keep.
    pub fn retain_first_descendant(&mut self, name: &str) -> bool {
        let mut seen = false;
        self.retain_first_inner(name, &mut seen);
        seen
    }

    fn retain_first_inner(&mut self, name: &str, seen: &mut bool) {
        let mut kept = Vec::with_capacity(self.children.len());
        for node in self.children.drain(..) {
            match node {
                XmlNode::Element(el) if el.name == name && *seen => {}
                XmlNode::Element(mut el) => {
                    if el.name == name {
                        *seen = true;
                    }
                    el.retain_first_inner(name, seen);
                    kept.push(XmlNode::Element(el));
                }
                other => kept.push(other),
            }
        }
        self.children = kept;
    }

    /// Rename every descendant `<element Name="from">` to `to`.
    ///
    /// Each renamed element is preceded by two comments: `note`, and the
    /// element as it would look with `Name` set to `suggestion`. Returns how
    /// many elements were renamed.
    pub fn rename_references(
        &mut self,
        element: &str,
        from: &str,
        to: &str,
        note: &str,
        mut suggestion: impl FnMut(&XmlElement) -> String,
    ) -> usize {
        self.rename_inner(element, from, to, note, &mut suggestion)
    }

    fn rename_inner(
        &mut self,
        element: &str,
        from: &str,
        to: &str,
        note: &str,
        suggestion: &mut dyn FnMut(&XmlElement) -> String,
    ) -> usize {
        let mut renamed = 0;
        let mut out = Vec::with_capacity(self.children.len());
        for node in self.children.drain(..) {
            match node {
                XmlNode::Element(mut el) => {
                    if el.name == element && el.attr("Name") == Some(from) {
                        el.set_attr("Name", to);
                        out.push(XmlNode::Comment(note.to_string()));
                        out.push(XmlNode::Comment(suggestion(&el)));
                        renamed += 1;
                    }
                    renamed += el.rename_inner(element, from, to, note, suggestion);
                    out.push(XmlNode::Element(el));
                }
                other => out.push(other),
            }
        }
        self.children = out;
        renamed
    }
}
