//! Reading and writing the job configuration tree with `quick-xml`.

use std::borrow::Cow;
use std::fmt;

use quick_xml::{
    Reader, Writer,
    events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::domain::{
    error::DomainError,
    job_config::tree::{Misc, XmlDocument, XmlElement, XmlNode},
};

const INDENT_WIDTH: usize = 2;

fn malformed(reason: impl fmt::Display) -> DomainError {
    DomainError::MalformedDocument {
        reason: reason.to_string(),
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn element_from(start: &BytesStart<'_>) -> Result<XmlElement, DomainError> {
    let mut element = XmlElement::new(lossy(start.name().as_ref()));
    for attr in start.attributes() {
        let attr = attr.map_err(malformed)?;
        let value = attr
            .unescape_value()
            .map(Cow::into_owned)
            .unwrap_or_else(|_| lossy(&attr.value));
        element
            .attributes
            .push((lossy(attr.key.as_ref()), value));
    }
    Ok(element)
}

#[derive(Default)]
struct TreeBuilder {
    stack: Vec<XmlElement>,
    root: Option<XmlElement>,
    prolog: Vec<Misc>,
    epilog: Vec<Misc>,
}

impl TreeBuilder {
    fn attach(&mut self, node: XmlNode) -> Result<(), DomainError> {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
            return Ok(());
        }
        match node {
            XmlNode::Element(el) => {
                if self.root.is_some() {
                    return Err(malformed("more than one root element"));
                }
                self.root = Some(el);
            }
            XmlNode::Comment(text) => {
                let misc = Misc::Comment(text);
                if self.root.is_some() {
                    self.epilog.push(misc);
                } else {
                    self.prolog.push(misc);
                }
            }
            // Stray top-level text carries no meaning.
            XmlNode::Text(_) | XmlNode::CData(_) => {}
        }
        Ok(())
    }

    fn finish(self) -> Result<XmlDocument, DomainError> {
        if let Some(open) = self.stack.last() {
            return Err(malformed(format!("element <{}> is never closed", open.name)));
        }
        let root = self.root.ok_or_else(|| malformed("document has no root element"))?;
        Ok(XmlDocument {
            prolog: self.prolog,
            root,
            epilog: self.epilog,
        })
    }
}

/// Parse a complete document.
///
/// Whitespace-only text is dropped; the XML declaration and processing
/// instructions are not kept since the writer emits its own declaration.
pub fn parse_document(text: &str) -> Result<XmlDocument, DomainError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);
    let mut builder = TreeBuilder::default();

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(start) => builder.stack.push(element_from(&start)?),
            Event::Empty(start) => builder.attach(XmlNode::Element(element_from(&start)?))?,
            Event::End(_) => {
                let el = builder
                    .stack
                    .pop()
                    .ok_or_else(|| malformed("unexpected closing tag"))?;
                builder.attach(XmlNode::Element(el))?;
            }
            Event::Text(text) => {
                let value = text
                    .unescape()
                    .map(Cow::into_owned)
                    .unwrap_or_else(|_| lossy(&text));
                if !value.trim().is_empty() {
                    builder.attach(XmlNode::Text(value))?;
                }
            }
            Event::CData(data) => builder.attach(XmlNode::CData(lossy(&data)))?,
            Event::Comment(comment) => builder.attach(XmlNode::Comment(lossy(&comment)))?,
            Event::DocType(doctype) => {
                builder
                    .prolog
                    .push(Misc::DocType(lossy(&doctype).trim().to_string()));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    builder.finish()
}

fn write_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    element: &XmlElement,
) -> Result<(), DomainError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(malformed);
    }

    writer.write_event(Event::Start(start)).map_err(malformed)?;
    for child in &element.children {
        match child {
            XmlNode::Element(el) => write_element(writer, el)?,
            XmlNode::Text(text) => writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(malformed)?,
            XmlNode::CData(data) => writer
                .write_event(Event::CData(BytesCData::new(data.as_str())))
                .map_err(malformed)?,
            XmlNode::Comment(text) => writer
                .write_event(Event::Comment(BytesText::from_escaped(text.as_str())))
                .map_err(malformed)?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(malformed)
}

fn write_misc<W: std::io::Write>(writer: &mut Writer<W>, misc: &Misc) -> Result<(), DomainError> {
    let event = match misc {
        Misc::DocType(text) => Event::DocType(BytesText::from_escaped(text.as_str())),
        Misc::Comment(text) => Event::Comment(BytesText::from_escaped(text.as_str())),
    };
    writer.write_event(event).map_err(malformed)
}

/// Serialize with a UTF-8 declaration and two-space indentation.
pub fn write_document(doc: &XmlDocument) -> Result<String, DomainError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_WIDTH);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(malformed)?;
    for misc in &doc.prolog {
        write_misc(&mut writer, misc)?;
    }
    write_element(&mut writer, &doc.root)?;
    for misc in &doc.epilog {
        write_misc(&mut writer, misc)?;
    }

    let text = String::from_utf8(writer.into_inner()).map_err(malformed)?;
    Ok(strip_blank_lines(&text))
}

/// One element on a single line, as it appears inside a comment.
pub fn inline_element(element: &XmlElement) -> Result<String, DomainError> {
    let mut writer = Writer::new(Vec::new());
    write_element(&mut writer, element)?;
    String::from_utf8(writer.into_inner()).map_err(malformed)
}

/// Drop whitespace-only lines and end with a newline.
pub fn strip_blank_lines(text: &str) -> String {
    let mut out: String = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE JobConfiguration PUBLIC "" "JobConfig.dtd">
<!-- top comment -->
<JobConfiguration JobName="FirstCycleJob" OutputLevel="DEBUG">

  <!-- library comment -->
  <Library Name="libSFrameUser"/>

  <Cycle Name="FirstCycle">
    <UserConfig>
      <Item Name="Text" Value="a &amp; b"/>
    </UserConfig>
  </Cycle>
</JobConfiguration>
"#;

    #[test]
    fn parses_prolog_and_tree() {
        let doc = parse_document(SAMPLE).unwrap();
        assert_eq!(
            doc.prolog,
            vec![
                Misc::DocType(r#"JobConfiguration PUBLIC "" "JobConfig.dtd""#.into()),
                Misc::Comment(" top comment ".into()),
            ]
        );
        assert_eq!(doc.root.name, "JobConfiguration");
        assert_eq!(doc.root.attr("OutputLevel"), Some("DEBUG"));
        assert_eq!(doc.count("Item"), 1);
        assert_eq!(
            doc.root.children[0],
            XmlNode::Comment(" library comment ".into())
        );
    }

    #[test]
    fn attribute_values_are_unescaped_and_escaped_again() {
        let mut doc = parse_document(SAMPLE).unwrap();
        assert_eq!(doc.find_mut("Item").unwrap().attr("Value"), Some("a & b"));

        let text = write_document(&doc).unwrap();
        assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
        assert!(text.contains("<!DOCTYPE JobConfiguration PUBLIC \"\" \"JobConfig.dtd\">"));
        assert!(text.contains("Value=\"a &amp; b\""));
        assert!(text.contains("  <Library Name=\"libSFrameUser\"/>"));
        assert!(!text.lines().any(|l| l.trim().is_empty()));
    }

    #[test]
    fn rejects_broken_documents() {
        assert!(parse_document("<a><b></a>").is_err());
        assert!(parse_document("").is_err());
        assert!(parse_document("<a/><b/>").is_err());
    }

    #[test]
    fn inline_element_is_single_line() {
        let el = XmlElement::new("Library").with_attr("Name", "libSFrameMetaTools");
        assert_eq!(
            inline_element(&el).unwrap(),
            r#"<Library Name="libSFrameMetaTools"/>"#
        );
    }

    #[test]
    fn strip_blank_lines_removes_whitespace_lines() {
        assert_eq!(strip_blank_lines("a\n  \n\nb"), "a\nb\n");
    }
}
