// Error type shared by every subsystem in the crate.

use std::fmt;

use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// No global `window` object. Nothing works without one.
    NoWindow,
    /// The window exists but has no document attached.
    NoDocument,
    /// A required element was not found by id or selector.
    MissingElement(String),
    /// An element was found but is not the DOM class we need.
    WrongElementType { selector: String, expected: &'static str },
    /// The canvas refused to hand out a 2d context.
    NoCanvasContext,
    /// A JS call failed; the thrown value is stringified here.
    Js(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NoWindow => write!(f, "no global window object"),
            Error::NoDocument => write!(f, "window has no document"),
            Error::MissingElement(sel) => write!(f, "element not found: {}", sel),
            Error::WrongElementType { selector, expected } => {
                write!(f, "element {} is not a {}", selector, expected)
            }
            Error::NoCanvasContext => write!(f, "2d canvas context unavailable"),
            Error::Js(detail) => write!(f, "js call failed: {}", detail),
        }
    }
}

impl std::error::Error for Error {}

impl From<JsValue> for Error {
    fn from(value: JsValue) -> Self {
        let detail = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        Error::Js(detail)
    }
}

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn display_names_the_missing_element() {
        let err = Error::MissingElement("#particleCanvas".to_string());
        assert_eq!(err.to_string(), "element not found: #particleCanvas");
    }

    #[test]
    fn display_names_the_expected_type() {
        let err = Error::WrongElementType {
            selector: "#contactForm".to_string(),
            expected: "HtmlFormElement",
        };
        assert_eq!(err.to_string(), "element #contactForm is not a HtmlFormElement");
    }
}
