//! Rule: duplicate the only parameter of a single-parameter method
//!
//! Example:
//! ```php
//! // Before
//! class Test {
//!     function foo(int $param) { }
//! }
//!
//! // After
//! class Test {
//!     function foo(int $param, int $param1) { }
//! }
//! ```
//!
//! The duplicate keeps the original's attributes, modifiers, type,
//! by-reference marker and default value. Its name comes from
//! [`suggest_name`], confirmed through a [`NameConfirmer`].

use mago_span::Span;
use mago_syntax::ast::{FunctionLikeParameterList, Program};
use paramdup_core::{visit, DeclarationKind, DeclarationVisitor, Edit};

use crate::confirm::NameConfirmer;
use crate::declaration::Declaration;
use crate::naming::suggest_name;

/// One parameter duplication found in a file
#[derive(Debug, Clone)]
pub struct Duplication {
    pub kind: DeclarationKind,
    /// Name of the enclosing method or function
    pub declaration: String,
    pub old_name: String,
    pub new_name: String,
    /// Replaces the original parameter with `original, duplicate`
    pub edit: Edit,
}

struct DeclarationCollector {
    declarations: Vec<Declaration>,
}

impl<'a> DeclarationVisitor<'a> for DeclarationCollector {
    fn visit_declaration(
        &mut self,
        kind: DeclarationKind,
        name: Span,
        span: Span,
        parameters: &FunctionLikeParameterList<'a>,
        source: &str,
    ) {
        self.declarations
            .push(Declaration::from_ast(kind, name, span, parameters, source));
    }
}

/// All function-like declarations of a program, in source order
pub fn collect_declarations(program: &Program<'_>, source: &str) -> Vec<Declaration> {
    let mut collector = DeclarationCollector {
        declarations: Vec::new(),
    };
    visit(&mut collector, program, source);
    collector.declarations
}

/// Rewrites declarations that have exactly one parameter
pub struct SingleParamDuplicator<C> {
    confirmer: C,
    include_functions: bool,
}

impl<C: NameConfirmer> SingleParamDuplicator<C> {
    /// A duplicator for methods only
    pub fn new(confirmer: C) -> Self {
        Self {
            confirmer,
            include_functions: false,
        }
    }

    /// Also rewrite named functions, not only methods
    pub fn include_functions(mut self, include: bool) -> Self {
        self.include_functions = include;
        self
    }

    /// Whether declarations of this kind are rewritten by [`check`](Self::check)
    pub fn applies_to(&self, kind: DeclarationKind) -> bool {
        match kind {
            DeclarationKind::Method => true,
            DeclarationKind::Function => self.include_functions,
        }
    }

    /// Produce the rewritten form of `declaration`
    ///
    /// A declaration without exactly one parameter comes back as an equal
    /// copy. Otherwise the result holds the original parameter followed by its
    /// duplicate. A variadic parameter cannot be followed by another one, so
    /// that case is also left as is.
    pub fn rewrite(&mut self, declaration: &Declaration) -> Declaration {
        let [original] = declaration.parameters.as_slice() else {
            return declaration.clone();
        };

        if original.variadic {
            tracing::warn!(
                declaration = %declaration.name,
                parameter = original.name(),
                "skipping variadic parameter, nothing may follow it"
            );
            return declaration.clone();
        }

        let suggested = suggest_name(original.name());
        let new_name = self
            .confirmer
            .confirm(original.name(), &declaration.name, &suggested);

        tracing::debug!(
            declaration = %declaration.name,
            old = original.name(),
            new = %new_name,
            "duplicating parameter"
        );

        let duplicate = original.with_name(&new_name);
        let mut rewritten = declaration.clone();
        rewritten.parameters.push(duplicate);
        rewritten
    }

    /// Find every applicable declaration in `program` and compute its duplication
    pub fn check(&mut self, program: &Program<'_>, source: &str) -> Vec<Duplication> {
        let mut duplications = Vec::new();
        for declaration in collect_declarations(program, source) {
            if !self.applies_to(declaration.kind) {
                continue;
            }
            if let Some(duplication) = self.duplication(&declaration) {
                duplications.push(duplication);
            }
        }
        duplications
    }

    fn duplication(&mut self, declaration: &Declaration) -> Option<Duplication> {
        if declaration.parameters.len() != 1 {
            return None;
        }

        let rewritten = self.rewrite(declaration);
        let [original, duplicate] = rewritten.parameters.as_slice() else {
            return None;
        };
        let span = original.span?;

        let edit = Edit::new(
            span,
            format!("{}, {}", original.text(), duplicate.text()),
            format!(
                "Duplicate parameter ${} of {} {}() as ${}",
                original.name(),
                declaration.kind.as_str(),
                declaration.name,
                duplicate.name()
            ),
        );

        Some(Duplication {
            kind: declaration.kind,
            declaration: declaration.name.clone(),
            old_name: original.name().to_string(),
            new_name: duplicate.name().to_string(),
            edit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::{from_fn, AcceptSuggestion};
    use bumpalo::Bump;
    use mago_database::file::FileId;
    use paramdup_core::apply_edits;

    fn check_php_with<C: NameConfirmer>(
        source: &str,
        duplicator: &mut SingleParamDuplicator<C>,
    ) -> Vec<Duplication> {
        let arena = Bump::new();
        let file_id = FileId::new("test.php");
        let (program, _) = mago_syntax::parser::parse_file_content(&arena, file_id, source);
        duplicator.check(program, source)
    }

    fn check_php(source: &str) -> Vec<Duplication> {
        check_php_with(source, &mut SingleParamDuplicator::new(AcceptSuggestion))
    }

    fn transform(source: &str) -> String {
        let edits: Vec<Edit> = check_php(source).into_iter().map(|d| d.edit).collect();
        apply_edits(source, &edits).unwrap()
    }

    fn declarations(source: &str) -> Vec<Declaration> {
        let arena = Bump::new();
        let file_id = FileId::new("test.php");
        let (program, _) = mago_syntax::parser::parse_file_content(&arena, file_id, source);
        collect_declarations(program, source)
    }

    fn single_declaration(source: &str) -> Declaration {
        let mut decls = declarations(source);
        assert_eq!(decls.len(), 1);
        decls.remove(0)
    }

    // ==================== Rewrite Contract ====================

    #[test]
    fn test_rewrite_no_parameters_is_unchanged() {
        let decl = single_declaration("<?php class T { public function foo() { } }");
        let result = SingleParamDuplicator::new(AcceptSuggestion).rewrite(&decl);
        assert_eq!(result, decl);
        assert!(result.parameters.is_empty());
    }

    #[test]
    fn test_rewrite_two_parameters_is_unchanged() {
        let decl = single_declaration("<?php class T { public function foo(int $value1, string $value2) { } }");
        let result = SingleParamDuplicator::new(AcceptSuggestion).rewrite(&decl);
        assert_eq!(result, decl);
        assert_eq!(result.parameters.len(), 2);
    }

    #[test]
    fn test_rewrite_single_parameter_appends_duplicate() {
        let decl = single_declaration("<?php class T { public function foo(int $value) { } }");
        let result = SingleParamDuplicator::new(AcceptSuggestion).rewrite(&decl);

        assert_eq!(result.parameters.len(), 2);
        assert_eq!(result.parameters[0], decl.parameters[0]);
        assert_eq!(result.parameters[1].name(), "value1");
        assert_eq!(result.parameters[1].hint.as_deref(), Some("int"));
        assert_eq!(result.name, decl.name);

        // The input declaration is not modified
        assert_eq!(decl.parameters.len(), 1);
    }

    #[test]
    fn test_rewrite_is_not_applied_twice() {
        let decl = single_declaration("<?php class T { public function foo(int $value) { } }");
        let mut duplicator = SingleParamDuplicator::new(AcceptSuggestion);
        let once = duplicator.rewrite(&decl);
        let twice = duplicator.rewrite(&once);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_rewrite_carries_default_and_reference() {
        let decl = single_declaration("<?php class T { public function foo(int &$value = 42) { } }");
        let result = SingleParamDuplicator::new(AcceptSuggestion).rewrite(&decl);

        let (first, second) = (&result.parameters[0], &result.parameters[1]);
        assert_eq!(first.default.as_deref(), Some("42"));
        assert!(first.by_reference);
        assert_eq!(second.default.as_deref(), Some("42"));
        assert!(second.by_reference);
        assert_eq!(second.name(), "value1");
    }

    #[test]
    fn test_rewrite_carries_attributes_and_modifiers() {
        let decl = single_declaration(
            "<?php class T { public function __construct(#[Inject] protected readonly Logger $logger) { } }",
        );
        let result = SingleParamDuplicator::new(AcceptSuggestion).rewrite(&decl);

        let (first, second) = (&result.parameters[0], &result.parameters[1]);
        assert_eq!(first.attributes, second.attributes);
        assert_eq!(second.modifiers, vec!["protected", "readonly"]);
        assert_eq!(second.hint.as_deref(), Some("Logger"));
    }

    #[test]
    fn test_rewrite_skips_variadic() {
        let decl = single_declaration("<?php class T { public function foo(string ...$parts) { } }");
        let mut calls = 0;
        let result = SingleParamDuplicator::new(from_fn(|_: &str, _: &str, s: &str| {
            calls += 1;
            s.to_string()
        }))
        .rewrite(&decl);
        assert_eq!(result, decl);
        assert_eq!(calls, 0);
    }

    // ==================== End-to-End Transformation ====================

    #[test]
    fn test_adds_new_parameter_when_single_parameter() {
        let source = r#"<?php
class Test {
    function foo(int $param) { }
}
"#;
        let expected = r#"<?php
class Test {
    function foo(int $param, int $param1) { }
}
"#;
        assert_eq!(transform(source), expected);
    }

    #[test]
    fn test_does_not_modify_multiple_parameters() {
        let source = r#"<?php
class Test {
    function foo(int $x, int $y) { }
}
"#;
        assert!(check_php(source).is_empty());
        assert_eq!(transform(source), source);
    }

    #[test]
    fn test_does_not_modify_method_without_parameters() {
        let source = r#"<?php
class Test {
    function foo() { }
}
"#;
        assert_eq!(transform(source), source);
    }

    #[test]
    fn test_adds_new_parameter_when_multiple_methods() {
        let source = r#"<?php
class Test {
    function foo(int $param) { }
    function bar(int $param) { }
}
"#;
        let expected = r#"<?php
class Test {
    function foo(int $param, int $param1) { }
    function bar(int $param, int $param1) { }
}
"#;
        assert_eq!(transform(source), expected);
    }

    #[test]
    fn test_suggests_incremented_numeric_suffix() {
        let source = "<?php class Test { function foo(int $x2) { } }";
        assert_eq!(
            transform(source),
            "<?php class Test { function foo(int $x2, int $x3) { } }"
        );
    }

    #[test]
    fn test_suggests_next_letter_for_single_letter() {
        let source = "<?php class Test { function foo(int $a) { } }";
        assert_eq!(
            transform(source),
            "<?php class Test { function foo(int $a, int $b) { } }"
        );
    }

    #[test]
    fn test_suggests_appended_1_for_other_names() {
        let source = "<?php class Test { function foo(int $value) { } }";
        assert_eq!(
            transform(source),
            "<?php class Test { function foo(int $value, int $value1) { } }"
        );
    }

    #[test]
    fn test_default_value_preserved_on_both() {
        let source = "<?php class T { public function foo(int $value = 42) { } }";
        assert_eq!(
            transform(source),
            "<?php class T { public function foo(int $value = 42, int $value1 = 42) { } }"
        );
    }

    #[test]
    fn test_reference_modifier_preserved_on_both() {
        let source = "<?php class T { public function foo(array &$items) { } }";
        assert_eq!(
            transform(source),
            "<?php class T { public function foo(array &$items, array &$items1) { } }"
        );
    }

    #[test]
    fn test_attribute_preserved_on_both() {
        let source = "<?php class T { public function foo(#[SensitiveParameter] string $value) { } }";
        assert_eq!(
            transform(source),
            "<?php class T { public function foo(#[SensitiveParameter] string $value, #[SensitiveParameter] string $value1) { } }"
        );
    }

    #[test]
    fn test_complex_type_preserved() {
        let source = "<?php class T { public function foo(array|\\Countable|null $data) { } }";
        assert_eq!(
            transform(source),
            "<?php class T { public function foo(array|\\Countable|null $data, array|\\Countable|null $data1) { } }"
        );
    }

    #[test]
    fn test_untyped_parameter() {
        let source = "<?php class T { function foo($x) { } }";
        assert_eq!(transform(source), "<?php class T { function foo($x, $y) { } }");
    }

    #[test]
    fn test_trailing_comma_stays_at_end() {
        let source = "<?php class T { function foo(int $x,) { } }";
        assert_eq!(
            transform(source),
            "<?php class T { function foo(int $x, int $y,) { } }"
        );
    }

    #[test]
    fn test_trailing_comment_stays_after_duplicate() {
        let source = r#"<?php
class T {
    function foo(
        int $count // how many
    ) { }
}
"#;
        let expected = r#"<?php
class T {
    function foo(
        int $count, int $count1 // how many
    ) { }
}
"#;
        assert_eq!(transform(source), expected);
    }

    #[test]
    fn test_interface_and_abstract_methods() {
        let source = r#"<?php
interface Shape { public function scale(float $f); }
abstract class Base { abstract protected function load(string $path); }
"#;
        let expected = r#"<?php
interface Shape { public function scale(float $f, float $g); }
abstract class Base { abstract protected function load(string $path, string $path1); }
"#;
        assert_eq!(transform(source), expected);
    }

    #[test]
    fn test_second_pass_changes_nothing() {
        let source = "<?php class T { function foo(int $value) { } }";
        let once = transform(source);
        assert!(check_php(&once).is_empty());
        assert_eq!(transform(&once), once);
    }

    #[test]
    fn test_method_inside_declare_block() {
        let source = "<?php declare(ticks=1) { class A { function foo(int $x) {} } }";
        assert_eq!(
            transform(source),
            "<?php declare(ticks=1) { class A { function foo(int $x, int $y) {} } }"
        );
    }

    #[test]
    fn test_method_of_class_declared_in_closure() {
        let source = "<?php $f = function () { class Inner { function foo(int $x) {} } };";
        assert_eq!(
            transform(source),
            "<?php $f = function () { class Inner { function foo(int $x, int $y) {} } };"
        );
    }

    #[test]
    fn test_anonymous_class_method() {
        let source = "<?php $o = new class { public function foo(int $x) {} };";
        assert_eq!(
            transform(source),
            "<?php $o = new class { public function foo(int $x, int $y) {} };"
        );
    }

    #[test]
    fn test_anonymous_class_nested_in_method() {
        let source = r#"<?php
class Factory {
    public function make(): object {
        return new class { function run(string $s) {} };
    }
}
"#;
        let expected = r#"<?php
class Factory {
    public function make(): object {
        return new class { function run(string $s, string $t) {} };
    }
}
"#;
        assert_eq!(transform(source), expected);
    }

    #[test]
    fn test_anonymous_class_method_in_arrow_function() {
        let source = "<?php $make = fn() => new class { function run(string $name) {} };";
        let found = check_php(source);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, DeclarationKind::Method);
        assert_eq!(found[0].declaration, "run");
        assert_eq!(found[0].new_name, "name1");
    }

    // ==================== Declaration Kinds ====================

    #[test]
    fn test_functions_skipped_by_default() {
        let source = "<?php function helper(int $x) { }";
        assert!(check_php(source).is_empty());
    }

    #[test]
    fn test_functions_included_when_enabled() {
        let source = "<?php function helper(int $x) { }";
        let mut duplicator = SingleParamDuplicator::new(AcceptSuggestion).include_functions(true);
        let found = check_php_with(source, &mut duplicator);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, DeclarationKind::Function);
        let edits: Vec<Edit> = found.into_iter().map(|d| d.edit).collect();
        assert_eq!(
            apply_edits(source, &edits).unwrap(),
            "<?php function helper(int $x, int $y) { }"
        );
    }

    #[test]
    fn test_applies_to() {
        let methods_only = SingleParamDuplicator::new(AcceptSuggestion);
        assert!(methods_only.applies_to(DeclarationKind::Method));
        assert!(!methods_only.applies_to(DeclarationKind::Function));

        let both = SingleParamDuplicator::new(AcceptSuggestion).include_functions(true);
        assert!(both.applies_to(DeclarationKind::Function));
    }

    // ==================== Confirmation ====================

    #[test]
    fn test_confirmer_receives_names_and_decides() {
        let source = "<?php class Test { function foo(int $param) { } }";
        let mut seen = Vec::new();
        let found = {
            let mut duplicator =
                SingleParamDuplicator::new(from_fn(|old: &str, decl: &str, suggested: &str| {
                    seen.push((old.to_string(), decl.to_string(), suggested.to_string()));
                    "other".to_string()
                }));
            check_php_with(source, &mut duplicator)
        };

        assert_eq!(
            seen,
            vec![("param".to_string(), "foo".to_string(), "param1".to_string())]
        );
        assert_eq!(found[0].new_name, "other");
        assert_eq!(found[0].old_name, "param");
        assert_eq!(found[0].declaration, "foo");
        assert_eq!(found[0].edit.replacement, "int $param, int $other");
    }

    #[test]
    fn test_confirmer_called_in_source_order() {
        let source = r#"<?php
class A {
    function first($a) { }
    function skipped($a, $b) { }
    function second($b) { }
}
"#;
        let mut order = Vec::new();
        {
            let mut duplicator =
                SingleParamDuplicator::new(from_fn(|_: &str, decl: &str, suggested: &str| {
                    order.push(decl.to_string());
                    suggested.to_string()
                }));
            check_php_with(source, &mut duplicator);
        }
        assert_eq!(order, vec!["first", "second"]);
    }

    #[test]
    fn test_edit_message() {
        let found = check_php("<?php class Test { function foo(int $param) { } }");
        assert_eq!(
            found[0].edit.message,
            "Duplicate parameter $param of method foo() as $param1"
        );
    }
}
