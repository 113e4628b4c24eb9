//! `roxmltree`-backed SVG validator

use super::{ShapeKind, StructuralValidator, ValidatorError};
use roxmltree::{Document, Node, ParsingOptions};

/// XML namespace every SVG element must live in
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Validator that parses documents as XML and checks SVG structure
///
/// A document is valid when:
/// - it is UTF-8 and well-formed XML (a DOCTYPE is allowed)
/// - the root element is `<svg>` in the [`SVG_NAMESPACE`]
/// - `rect` `width`/`height` and `circle` `r`, when present, are non-negative lengths
/// - every `path` carries a `d` attribute
///
/// Only elements in the SVG namespace are counted; a `<rect>` from a foreign
/// namespace embedded in the document is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgStructuralValidator;

impl SvgStructuralValidator {
    /// Creates a new validator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn parse(document: &[u8]) -> Result<Document<'_>, String> {
        let text = std::str::from_utf8(document).map_err(|e| e.to_string())?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let mut options = ParsingOptions::default();
        options.allow_dtd = true;

        Document::parse_with_options(text, options).map_err(|e| e.to_string())
    }

    fn is_svg_element(node: &Node<'_, '_>, name: &str) -> bool {
        node.is_element()
            && node.tag_name().name() == name
            && node.tag_name().namespace() == Some(SVG_NAMESPACE)
    }

    fn check_structure(doc: &Document<'_>) -> Result<(), String> {
        let root = doc.root_element();
        if !Self::is_svg_element(&root, "svg") {
            return Err(format!(
                "root element is <{}>, expected <svg> in {SVG_NAMESPACE}",
                root.tag_name().name()
            ));
        }

        for node in root.descendants().filter(|n| n.is_element()) {
            if node.tag_name().namespace() != Some(SVG_NAMESPACE) {
                continue;
            }
            match node.tag_name().name() {
                "rect" => {
                    check_length(&node, "width")?;
                    check_length(&node, "height")?;
                }
                "circle" => check_length(&node, "r")?,
                "path" if node.attribute("d").is_none() => {
                    return Err("<path> without a d attribute".to_string());
                }
                _ => {}
            }
        }

        Ok(())
    }
}

/// Parses the numeric part of an SVG length (`"10"`, `"2.5px"`, `"50%"`)
fn parse_length(value: &str) -> Option<f64> {
    let numeric = value
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%');
    numeric.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn check_length(node: &Node<'_, '_>, attribute: &str) -> Result<(), String> {
    let Some(value) = node.attribute(attribute) else {
        return Ok(());
    };
    match parse_length(value) {
        Some(length) if length >= 0.0 => Ok(()),
        _ => Err(format!(
            "<{}> has invalid {attribute}={value:?}",
            node.tag_name().name()
        )),
    }
}

impl StructuralValidator for SvgStructuralValidator {
    fn validate(&self, document: &[u8]) -> Result<bool, ValidatorError> {
        let verdict = Self::parse(document).and_then(|doc| Self::check_structure(&doc));
        if let Err(reason) = &verdict {
            tracing::debug!(%reason, "document failed structural validation");
        }
        Ok(verdict.is_ok())
    }

    fn count(&self, kind: ShapeKind, document: &[u8]) -> Result<usize, ValidatorError> {
        let doc =
            Self::parse(document).map_err(|reason| ValidatorError::Unparseable { kind, reason })?;

        Ok(doc
            .descendants()
            .filter(|node| Self::is_svg_element(node, kind.element_name()))
            .count())
    }

    fn name(&self) -> &'static str {
        "roxmltree SVG validator"
    }
}
