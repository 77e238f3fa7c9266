//! Query predicates.
//!
//! Predicates are encoded in the content API's bracket syntax, e.g.
//! `[[at(document.type, "post")][at(my.post.uid, "hello")]]`.

use std::fmt::Write;

/// A single query predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Predicate {
    /// Document is of the given custom type.
    DocumentType(String),
    /// Document has the given internal ID.
    DocumentId(String),
    /// Document of `doc_type` has the given UID.
    Uid { doc_type: String, uid: String },
}

impl Predicate {
    fn write(&self, out: &mut String) {
        let _ = match self {
            Self::DocumentType(doc_type) => {
                write!(out, "[at(document.type, \"{}\")]", quote(doc_type))
            }
            Self::DocumentId(id) => write!(out, "[at(document.id, \"{}\")]", quote(id)),
            Self::Uid { doc_type, uid } => {
                write!(out, "[at(my.{doc_type}.uid, \"{}\")]", quote(uid))
            }
        };
    }
}

/// Encode predicates as a single `q` parameter value.
pub(crate) fn encode(predicates: &[Predicate]) -> String {
    let mut out = String::from("[");
    for predicate in predicates {
        predicate.write(&mut out);
    }
    out.push(']');
    out
}

/// Escape backslashes and double quotes inside a predicate string literal.
fn quote(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
