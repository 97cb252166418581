//! Renderer from derived artifacts to Java source text.
//!
//! Output is a pure function of the artifact and the [`RenderConfig`]:
//! no timestamps, no hash-ordered iteration. Collaborator classes are
//! imported and referred to by simple name unless that name is already
//! taken, in which case the qualified name is written out.
//!
//! # Example
//!
//! ```
//! use crosscut_emit::render::render;
//! use crosscut_foundation::QualifiedName;
//! use crosscut_synthesis::{ConcernKind, DerivedArtifact, Origin};
//!
//! let artifact = DerivedArtifact {
//!     name: QualifiedName::parse("com.acme.Empty"),
//!     origin: Origin {
//!         kind: ConcernKind::MutualExclusion,
//!         source: QualifiedName::parse("com.acme.Base"),
//!     },
//!     doc: Vec::new(),
//!     supertype: Some(QualifiedName::parse("com.acme.Base")),
//!     interfaces: Vec::new(),
//!     members: Vec::new(),
//! };
//! let source = render(&artifact);
//! assert!(source.contains("package com.acme;"));
//! assert!(source.contains("public class Empty extends Base {\n}\n"));
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use crosscut_foundation::QualifiedName;
use crosscut_model::Visibility;
use crosscut_synthesis::{
    ConstructorSpec, DerivedArtifact, Expr, Member, MethodSpec, Param, Receiver, Stmt, TypeName,
};
use serde::{Deserialize, Serialize};

/// Package whose types never need importing.
const IMPLICIT_PACKAGE: &str = "java.lang";

/// Configuration for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct RenderConfig {
    /// Number of spaces for each indentation level.
    pub indent_width: usize,
    /// Comment placed at the top of every unit, one `//` line per text line.
    pub header: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            header: "Generated by crosscut. Do not edit.".to_string(),
        }
    }
}

impl RenderConfig {
    /// Sets the indentation width.
    #[must_use]
    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }

    /// Sets the header comment.
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }
}

/// Render an artifact with the default configuration.
#[must_use]
pub fn render(artifact: &DerivedArtifact) -> String {
    render_with_config(artifact, &RenderConfig::default())
}

/// Render an artifact with custom configuration.
#[must_use]
pub fn render_with_config(artifact: &DerivedArtifact, config: &RenderConfig) -> String {
    let mut renderer = Renderer::new(config, Imports::resolve(artifact));
    renderer.artifact(artifact);
    renderer.output
}

// =============================================================================
// Imports
// =============================================================================

/// How each referenced class is spelled in one unit.
#[derive(Debug, Default)]
struct Imports {
    simple: BTreeMap<QualifiedName, String>,
    declarations: BTreeSet<String>,
}

impl Imports {
    fn resolve(artifact: &DerivedArtifact) -> Self {
        let mut referenced = BTreeSet::new();
        referenced.extend(artifact.supertype.iter().cloned());
        referenced.extend(artifact.interfaces.iter().cloned());
        let mut written = BTreeSet::new();
        for member in &artifact.members {
            collect_member(member, &mut referenced, &mut written);
        }

        let mut imports = Self::default();
        let mut claimed: BTreeMap<String, QualifiedName> = BTreeMap::new();
        claimed.insert(artifact.name.simple_name().to_string(), artifact.name.clone());

        for name in referenced {
            let simple = name.simple_name().to_string();
            if claimed.get(&simple).is_some_and(|owner| owner != &name) {
                continue;
            }
            // Source type text is emitted verbatim and keeps its own meaning.
            if written.contains(&simple) && name.package() != artifact.name.package() {
                continue;
            }
            let implicit = name.package() == IMPLICIT_PACKAGE
                || name.package() == artifact.name.package()
                || name.in_default_package();
            if !implicit {
                imports.declarations.insert(name.to_string());
            }
            claimed.insert(simple.clone(), name.clone());
            imports.simple.insert(name, simple);
        }
        imports
    }

    fn name(&self, name: &QualifiedName) -> String {
        self.simple
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }
}

fn collect_member(
    member: &Member,
    out: &mut BTreeSet<QualifiedName>,
    written: &mut BTreeSet<String>,
) {
    let (params, throws, body, returns) = match member {
        Member::Constructor(c) => (&c.params, &c.throws, &c.body, None),
        Member::Method(m) => (&m.params, &m.throws, &m.body, Some(&m.returns)),
    };
    let types = params
        .iter()
        .map(|p| &p.ty)
        .chain(throws)
        .chain(returns);
    for ty in types {
        collect_type(ty, out, written);
    }
    for stmt in body {
        collect_stmt(stmt, out, written);
    }
}

/// Records class names, and the leading identifier of every name in
/// verbatim source text.
fn collect_type(ty: &TypeName, out: &mut BTreeSet<QualifiedName>, written: &mut BTreeSet<String>) {
    match ty {
        TypeName::Class(name) => {
            out.insert(name.clone());
        }
        TypeName::Source(text) => {
            let names = text
                .as_str()
                .split(|c: char| !(c.is_alphanumeric() || matches!(c, '_' | '$' | '.')))
                .filter_map(|path| path.split('.').next())
                .filter(|head| !head.is_empty());
            written.extend(names.map(str::to_string));
        }
    }
}

fn collect_stmt(stmt: &Stmt, out: &mut BTreeSet<QualifiedName>, written: &mut BTreeSet<String>) {
    match stmt {
        Stmt::Expr(e) | Stmt::Return(e) => collect_expr(e, out),
        Stmt::Let { ty, value, .. } => {
            collect_type(ty, out, written);
            collect_expr(value, out);
        }
        Stmt::TryFinally { body, finally } => {
            for s in body.iter().chain(finally) {
                collect_stmt(s, out, written);
            }
        }
    }
}

fn collect_expr(expr: &Expr, out: &mut BTreeSet<QualifiedName>) {
    match expr {
        Expr::Ident(_) | Expr::Str(_) | Expr::Int(_) | Expr::Raw(_) => {}
        Expr::Call { receiver, args, .. } => {
            match receiver {
                Receiver::Super => {}
                Receiver::Class(name) => {
                    out.insert(name.clone());
                }
                Receiver::Value(inner) => collect_expr(inner, out),
            }
            for arg in args {
                collect_expr(arg, out);
            }
        }
        Expr::SuperInit(args) => {
            for arg in args {
                collect_expr(arg, out);
            }
        }
        Expr::Lambda(body) => collect_expr(body, out),
        Expr::Constant { owner, .. } => {
            out.insert(owner.clone());
        }
    }
}

// =============================================================================
// Renderer
// =============================================================================

/// Renderer state.
struct Renderer<'c> {
    config: &'c RenderConfig,
    imports: Imports,
    output: String,
    indent_level: usize,
}

impl<'c> Renderer<'c> {
    fn new(config: &'c RenderConfig, imports: Imports) -> Self {
        Self {
            config,
            imports,
            output: String::new(),
            indent_level: 0,
        }
    }

    fn artifact(&mut self, artifact: &DerivedArtifact) {
        for line in self.config.header.lines() {
            self.comment_line(line);
        }
        self.comment_line(&format!("Source: {}", artifact.origin.source));
        self.output.push('\n');

        if !artifact.name.in_default_package() {
            let _ = writeln!(self.output, "package {};\n", artifact.name.package());
        }
        if !self.imports.declarations.is_empty() {
            for import in &self.imports.declarations {
                let _ = writeln!(self.output, "import {import};");
            }
            self.output.push('\n');
        }

        if !artifact.doc.is_empty() {
            self.output.push_str("/**\n");
            for line in &artifact.doc {
                self.line_raw(&format!(" * {line}"));
            }
            self.output.push_str(" */\n");
        }

        let mut decl = format!("public class {}", artifact.name.simple_name());
        if let Some(supertype) = &artifact.supertype {
            let _ = write!(decl, " extends {}", self.imports.name(supertype));
        }
        if !artifact.interfaces.is_empty() {
            let interfaces: Vec<String> = artifact
                .interfaces
                .iter()
                .map(|i| self.imports.name(i))
                .collect();
            let _ = write!(decl, " implements {}", interfaces.join(", "));
        }
        self.line(&format!("{decl} {{"));

        self.indent_level += 1;
        for (i, member) in artifact.members.iter().enumerate() {
            if i > 0 {
                self.output.push('\n');
            }
            match member {
                Member::Constructor(c) => self.constructor(artifact.name.simple_name(), c),
                Member::Method(m) => self.method(m),
            }
        }
        self.indent_level -= 1;
        self.line("}");
    }

    fn constructor(&mut self, class_name: &str, ctor: &ConstructorSpec) {
        let signature = format!(
            "{}{class_name}({}){}",
            visibility_prefix(ctor.visibility),
            self.params(&ctor.params),
            self.throws(&ctor.throws)
        );
        self.block(&signature, &ctor.body);
    }

    fn method(&mut self, method: &MethodSpec) {
        if method.is_override {
            self.line("@Override");
        }
        let type_params = if method.type_params.is_empty() {
            String::new()
        } else {
            format!("<{}> ", method.type_params.join(", "))
        };
        let signature = format!(
            "{}{type_params}{} {}({}){}",
            visibility_prefix(method.visibility),
            self.type_name(&method.returns),
            method.name,
            self.params(&method.params),
            self.throws(&method.throws)
        );
        self.block(&signature, &method.body);
    }

    fn block(&mut self, opener: &str, body: &[Stmt]) {
        self.line(&format!("{opener} {{"));
        self.indent_level += 1;
        for stmt in body {
            self.stmt(stmt);
        }
        self.indent_level -= 1;
        self.line("}");
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expr(e) => {
                let text = self.expr(e);
                self.line(&format!("{text};"));
            }
            Stmt::Let { ty, name, value } => {
                let text = format!("{} {name} = {};", self.type_name(ty), self.expr(value));
                self.line(&text);
            }
            Stmt::Return(e) => {
                let text = self.expr(e);
                self.line(&format!("return {text};"));
            }
            Stmt::TryFinally { body, finally } => {
                self.line("try {");
                self.indent_level += 1;
                for s in body {
                    self.stmt(s);
                }
                self.indent_level -= 1;
                self.line("} finally {");
                self.indent_level += 1;
                for s in finally {
                    self.stmt(s);
                }
                self.indent_level -= 1;
                self.line("}");
            }
        }
    }

    fn expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Ident(name) => name.clone(),
            Expr::Str(s) => string_literal(s),
            Expr::Int(n) => int_literal(*n),
            Expr::Raw(text) => text.clone(),
            Expr::Call {
                receiver,
                method,
                args,
            } => {
                let receiver = match receiver {
                    Receiver::Super => "super".to_string(),
                    Receiver::Class(name) => self.imports.name(name),
                    Receiver::Value(inner) => self.expr(inner),
                };
                format!("{receiver}.{method}({})", self.args(args))
            }
            Expr::SuperInit(args) => format!("super({})", self.args(args)),
            Expr::Lambda(body) => format!("() -> {}", self.expr(body)),
            Expr::Constant { owner, name } => format!("{}.{name}", self.imports.name(owner)),
        }
    }

    fn args(&self, args: &[Expr]) -> String {
        args.iter()
            .map(|a| self.expr(a))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn params(&self, params: &[Param]) -> String {
        params
            .iter()
            .map(|p| format!("{} {}", self.type_name(&p.ty), p.name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn throws(&self, throws: &[TypeName]) -> String {
        if throws.is_empty() {
            return String::new();
        }
        let names: Vec<String> = throws.iter().map(|t| self.type_name(t)).collect();
        format!(" throws {}", names.join(", "))
    }

    fn type_name(&self, ty: &TypeName) -> String {
        match ty {
            TypeName::Source(text) => text.as_str().to_string(),
            TypeName::Class(name) => self.imports.name(name),
        }
    }

    fn comment_line(&mut self, text: &str) {
        if text.is_empty() {
            self.output.push_str("//\n");
        } else {
            let _ = writeln!(self.output, "// {text}");
        }
    }

    fn line(&mut self, text: &str) {
        let width = self.indent_level * self.config.indent_width;
        let _ = writeln!(self.output, "{:width$}{text}", "");
    }

    fn line_raw(&mut self, text: &str) {
        self.output.push_str(text.trim_end());
        self.output.push('\n');
    }
}

fn visibility_prefix(visibility: Visibility) -> String {
    visibility
        .keyword()
        .map(|k| format!("{k} "))
        .unwrap_or_default()
}

/// `int` literals as-is; anything wider gets an `L` suffix.
fn int_literal(n: i64) -> String {
    if i32::try_from(n).is_ok() {
        n.to_string()
    } else {
        format!("{n}L")
    }
}

fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
