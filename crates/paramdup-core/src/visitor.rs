//! Declaration walker for PHP syntax trees
//!
//! Finds every function-like declaration (methods and named functions)
//! wherever PHP allows one: at statement level, inside `declare` blocks and
//! control flow, inside closure and arrow-function bodies, and as members of
//! anonymous classes. Implementors only provide `visit_declaration`; the
//! default methods handle traversal.

use mago_span::{HasSpan, Span};
use mago_syntax::ast::*;

/// The kind of declaration a parameter list belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// A method of a class, interface, trait, enum or anonymous class
    Method,
    /// A named function declared with `function name(...)`
    Function,
}

impl DeclarationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Method => "method",
            DeclarationKind::Function => "function",
        }
    }
}

/// Trait for visiting function-like declarations in a PHP AST
pub trait DeclarationVisitor<'a> {
    /// Called once per declaration, in source order.
    ///
    /// `name` is the span of the declaration's identifier and `span` covers
    /// the whole declaration.
    fn visit_declaration(
        &mut self,
        kind: DeclarationKind,
        name: Span,
        span: Span,
        parameters: &FunctionLikeParameterList<'a>,
        source: &str,
    );

    /// Visit a program (entry point)
    fn visit_program(&mut self, program: &Program<'a>, source: &str) {
        for stmt in program.statements.iter() {
            self.traverse_statement(stmt, source);
        }
    }

    /// Traverse a statement and the declarations nested in it
    fn traverse_statement(&mut self, stmt: &Statement<'a>, source: &str) {
        match stmt {
            Statement::Function(func) => {
                self.visit_declaration(
                    DeclarationKind::Function,
                    func.name.span(),
                    func.span(),
                    &func.parameter_list,
                    source,
                );
                self.traverse_block(&func.body, source);
            }
            Statement::Class(class) => {
                for member in class.members.iter() {
                    self.traverse_class_like_member(member, source);
                }
            }
            Statement::Interface(iface) => {
                for member in iface.members.iter() {
                    self.traverse_class_like_member(member, source);
                }
            }
            Statement::Trait(tr) => {
                for member in tr.members.iter() {
                    self.traverse_class_like_member(member, source);
                }
            }
            Statement::Enum(enum_def) => {
                for member in enum_def.members.iter() {
                    self.traverse_class_like_member(member, source);
                }
            }
            Statement::Namespace(ns) => {
                let statements = match &ns.body {
                    NamespaceBody::Implicit(body) => &body.statements,
                    NamespaceBody::BraceDelimited(body) => &body.statements,
                };
                for inner in statements.iter() {
                    self.traverse_statement(inner, source);
                }
            }
            Statement::Declare(declare) => match &declare.body {
                DeclareBody::Statement(inner) => self.traverse_statement(inner, source),
                DeclareBody::ColonDelimited(block) => {
                    for inner in block.statements.iter() {
                        self.traverse_statement(inner, source);
                    }
                }
            },
            Statement::Block(block) => {
                self.traverse_block(block, source);
            }
            Statement::If(if_stmt) => {
                self.traverse_expression(&if_stmt.condition, source);
                self.traverse_if_body(&if_stmt.body, source);
            }
            Statement::Foreach(foreach) => {
                self.traverse_expression(&foreach.expression, source);
                match &foreach.body {
                    ForeachBody::Statement(inner) => self.traverse_statement(inner, source),
                    ForeachBody::ColonDelimited(block) => {
                        for inner in block.statements.iter() {
                            self.traverse_statement(inner, source);
                        }
                    }
                }
            }
            Statement::For(for_stmt) => {
                for expr in for_stmt.initializations.iter() {
                    self.traverse_expression(expr, source);
                }
                for expr in for_stmt.conditions.iter() {
                    self.traverse_expression(expr, source);
                }
                for expr in for_stmt.increments.iter() {
                    self.traverse_expression(expr, source);
                }
                match &for_stmt.body {
                    ForBody::Statement(inner) => self.traverse_statement(inner, source),
                    ForBody::ColonDelimited(block) => {
                        for inner in block.statements.iter() {
                            self.traverse_statement(inner, source);
                        }
                    }
                }
            }
            Statement::While(while_stmt) => {
                self.traverse_expression(&while_stmt.condition, source);
                match &while_stmt.body {
                    WhileBody::Statement(inner) => self.traverse_statement(inner, source),
                    WhileBody::ColonDelimited(block) => {
                        for inner in block.statements.iter() {
                            self.traverse_statement(inner, source);
                        }
                    }
                }
            }
            Statement::DoWhile(do_while) => {
                self.traverse_statement(&do_while.statement, source);
                self.traverse_expression(&do_while.condition, source);
            }
            Statement::Try(try_stmt) => {
                self.traverse_block(&try_stmt.block, source);
                for catch in try_stmt.catch_clauses.iter() {
                    self.traverse_block(&catch.block, source);
                }
                if let Some(finally) = &try_stmt.finally_clause {
                    self.traverse_block(&finally.block, source);
                }
            }
            Statement::Switch(switch) => {
                self.traverse_expression(&switch.expression, source);
                match &switch.body {
                    SwitchBody::BraceDelimited(block) => {
                        for case in block.cases.iter() {
                            for inner in case.statements().iter() {
                                self.traverse_statement(inner, source);
                            }
                        }
                    }
                    SwitchBody::ColonDelimited(block) => {
                        for case in block.cases.iter() {
                            for inner in case.statements().iter() {
                                self.traverse_statement(inner, source);
                            }
                        }
                    }
                }
            }
            Statement::Expression(expr_stmt) => {
                self.traverse_expression(expr_stmt.expression, source);
            }
            Statement::Return(ret) => {
                if let Some(expr) = &ret.value {
                    self.traverse_expression(expr, source);
                }
            }
            Statement::Echo(echo) => {
                for expr in echo.values.iter() {
                    self.traverse_expression(expr, source);
                }
            }
            _ => {}
        }
    }

    fn traverse_block(&mut self, block: &Block<'a>, source: &str) {
        for inner in block.statements.iter() {
            self.traverse_statement(inner, source);
        }
    }

    /// Traverse an if body, including elseif/else branches
    fn traverse_if_body(&mut self, body: &IfBody<'a>, source: &str) {
        match body {
            IfBody::Statement(stmt_body) => {
                self.traverse_statement(stmt_body.statement, source);
                for else_if in stmt_body.else_if_clauses.iter() {
                    self.traverse_expression(&else_if.condition, source);
                    self.traverse_statement(else_if.statement, source);
                }
                if let Some(else_clause) = &stmt_body.else_clause {
                    self.traverse_statement(else_clause.statement, source);
                }
            }
            IfBody::ColonDelimited(block) => {
                for inner in block.statements.iter() {
                    self.traverse_statement(inner, source);
                }
                for else_if in block.else_if_clauses.iter() {
                    self.traverse_expression(&else_if.condition, source);
                    for inner in else_if.statements.iter() {
                        self.traverse_statement(inner, source);
                    }
                }
                if let Some(else_clause) = &block.else_clause {
                    for inner in else_clause.statements.iter() {
                        self.traverse_statement(inner, source);
                    }
                }
            }
        }
    }

    /// Report a method, then descend into its body
    fn traverse_class_like_member(&mut self, member: &ClassLikeMember<'a>, source: &str) {
        if let ClassLikeMember::Method(method) = member {
            self.visit_declaration(
                DeclarationKind::Method,
                method.name.span(),
                method.span(),
                &method.parameter_list,
                source,
            );
            if let MethodBody::Concrete(body) = &method.body {
                self.traverse_block(body, source);
            }
        }
    }

    /// Traverse an expression, looking for closures, arrow functions and
    /// anonymous classes that may hold declarations
    fn traverse_expression(&mut self, expr: &Expression<'a>, source: &str) {
        match expr {
            Expression::AnonymousClass(anonymous) => {
                if let Some(arguments) = &anonymous.argument_list {
                    self.traverse_arguments(arguments, source);
                }
                for member in anonymous.members.iter() {
                    self.traverse_class_like_member(member, source);
                }
            }
            Expression::Closure(closure) => {
                self.traverse_block(&closure.body, source);
            }
            Expression::ArrowFunction(arrow) => {
                self.traverse_expression(arrow.expression, source);
            }
            Expression::Instantiation(inst) => {
                self.traverse_expression(inst.class, source);
                if let Some(arguments) = &inst.argument_list {
                    self.traverse_arguments(arguments, source);
                }
            }
            Expression::Call(call) => match call {
                Call::Function(call) => {
                    self.traverse_expression(call.function, source);
                    self.traverse_arguments(&call.argument_list, source);
                }
                Call::Method(call) => {
                    self.traverse_expression(call.object, source);
                    self.traverse_arguments(&call.argument_list, source);
                }
                Call::NullSafeMethod(call) => {
                    self.traverse_expression(call.object, source);
                    self.traverse_arguments(&call.argument_list, source);
                }
                Call::StaticMethod(call) => {
                    self.traverse_expression(call.class, source);
                    self.traverse_arguments(&call.argument_list, source);
                }
            },
            Expression::Parenthesized(paren) => {
                self.traverse_expression(&paren.expression, source);
            }
            Expression::Assignment(assign) => {
                self.traverse_expression(&assign.lhs, source);
                self.traverse_expression(&assign.rhs, source);
            }
            Expression::Binary(binary) => {
                self.traverse_expression(&binary.lhs, source);
                self.traverse_expression(&binary.rhs, source);
            }
            Expression::UnaryPrefix(unary) => {
                self.traverse_expression(&unary.operand, source);
            }
            Expression::UnaryPostfix(unary) => {
                self.traverse_expression(&unary.operand, source);
            }
            Expression::Conditional(cond) => {
                self.traverse_expression(&cond.condition, source);
                if let Some(then_expr) = &cond.then {
                    self.traverse_expression(then_expr, source);
                }
                self.traverse_expression(&cond.r#else, source);
            }
            Expression::Array(array) => {
                for element in array.elements.iter() {
                    match element {
                        ArrayElement::KeyValue(kv) => {
                            self.traverse_expression(&kv.key, source);
                            self.traverse_expression(&kv.value, source);
                        }
                        ArrayElement::Value(val) => {
                            self.traverse_expression(&val.value, source);
                        }
                        ArrayElement::Variadic(var) => {
                            self.traverse_expression(&var.value, source);
                        }
                        _ => {}
                    }
                }
            }
            Expression::ArrayAccess(access) => {
                self.traverse_expression(&access.array, source);
                self.traverse_expression(&access.index, source);
            }
            Expression::Match(match_expr) => {
                self.traverse_expression(match_expr.expression, source);
                for arm in match_expr.arms.iter() {
                    match arm {
                        MatchArm::Expression(arm) => {
                            for condition in arm.conditions.iter() {
                                self.traverse_expression(condition, source);
                            }
                            self.traverse_expression(arm.expression, source);
                        }
                        MatchArm::Default(arm) => {
                            self.traverse_expression(arm.expression, source);
                        }
                    }
                }
            }
            Expression::Throw(throw) => {
                self.traverse_expression(throw.exception, source);
            }
            _ => {}
        }
    }

    fn traverse_arguments(&mut self, arguments: &ArgumentList<'a>, source: &str) {
        for argument in arguments.arguments.iter() {
            let value = match argument {
                Argument::Positional(pos) => &pos.value,
                Argument::Named(named) => &named.value,
            };
            self.traverse_expression(value, source);
        }
    }
}

/// Helper function to run a visitor on a program
pub fn visit<'a, V: DeclarationVisitor<'a>>(visitor: &mut V, program: &Program<'a>, source: &str) {
    visitor.visit_program(program, source);
}
