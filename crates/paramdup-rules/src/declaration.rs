//! Owned views of PHP declarations and their parameters
//!
//! A `Parameter` keeps the verbatim source text of the parameter so that a
//! duplicate reproduces attributes, modifiers, type and default exactly as
//! written, including any formatting inside them.

use std::ops::Range;

use mago_span::{HasSpan, Span};
use mago_syntax::ast::{FunctionLikeParameter, FunctionLikeParameterList};
use paramdup_core::{span_text, DeclarationKind};

/// A single parameter of a function-like declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    text: String,
    name_range: Range<usize>,
    /// Attribute lists such as `#[SensitiveParameter]`, verbatim
    pub attributes: Vec<String>,
    /// Modifiers such as `public` or `readonly`, verbatim
    pub modifiers: Vec<String>,
    /// Type hint, verbatim
    pub hint: Option<String>,
    /// `&` before the variable
    pub by_reference: bool,
    /// `...` before the variable
    pub variadic: bool,
    /// Default value expression, verbatim (without the `=`)
    pub default: Option<String>,
    /// Location in the parsed source; `None` for synthesized parameters
    pub span: Option<Span>,
}

impl Parameter {
    /// Build a parameter from its parsed form
    pub fn from_ast(param: &FunctionLikeParameter<'_>, source: &str) -> Self {
        let span = param.span();
        let base = span.start.offset as usize;
        let variable = param.variable.span();
        // Skip the `$` sigil
        let name_range =
            (variable.start.offset as usize + 1 - base)..(variable.end.offset as usize - base);

        Self {
            text: span_text(source, span).to_string(),
            name_range,
            attributes: param
                .attribute_lists
                .iter()
                .map(|list| span_text(source, list.span()).to_string())
                .collect(),
            modifiers: param
                .modifiers
                .iter()
                .map(|modifier| span_text(source, modifier.span()).to_string())
                .collect(),
            hint: param
                .hint
                .as_ref()
                .map(|hint| span_text(source, hint.span()).to_string()),
            by_reference: param.ampersand.is_some(),
            variadic: param.ellipsis.is_some(),
            default: param
                .default_value
                .as_ref()
                .map(|default| span_text(source, default.value.span()).to_string()),
            span: Some(span),
        }
    }

    /// The variable name without `$`
    pub fn name(&self) -> &str {
        &self.text[self.name_range.clone()]
    }

    /// The full parameter as it appears in source
    pub fn text(&self) -> &str {
        &self.text
    }

    /// A copy of this parameter under a different name
    ///
    /// Everything other than the name is carried over unchanged. The copy has
    /// no source location.
    pub fn with_name(&self, name: &str) -> Self {
        let mut text = String::with_capacity(self.text.len() + name.len());
        text.push_str(&self.text[..self.name_range.start]);
        text.push_str(name);
        text.push_str(&self.text[self.name_range.end..]);

        Self {
            text,
            name_range: self.name_range.start..self.name_range.start + name.len(),
            attributes: self.attributes.clone(),
            modifiers: self.modifiers.clone(),
            hint: self.hint.clone(),
            by_reference: self.by_reference,
            variadic: self.variadic,
            default: self.default.clone(),
            span: None,
        }
    }
}

/// A method or function together with its parameter list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub span: Span,
}

impl Declaration {
    pub fn from_ast(
        kind: DeclarationKind,
        name: Span,
        span: Span,
        parameter_list: &FunctionLikeParameterList<'_>,
        source: &str,
    ) -> Self {
        Self {
            kind,
            name: span_text(source, name).to_string(),
            parameters: parameter_list
                .parameters
                .iter()
                .map(|param| Parameter::from_ast(param, source))
                .collect(),
            span,
        }
    }
}
