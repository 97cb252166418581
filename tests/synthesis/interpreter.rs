//! A tiny interpreter for synthesized method bodies.
//!
//! Calls on `super` echo their arguments back (or throw, on request).
//! Every other call is recorded by method name and returns nothing.

use std::collections::HashMap;

use crosscut_synthesis::{Expr, MethodSpec, Receiver, Stmt};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Unit,
    Int(i64),
    Str(String),
    Echo(Vec<Value>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Next,
    Return(Value),
    Throw,
}

#[derive(Debug, Default)]
pub struct Machine {
    env: HashMap<String, Value>,
    pub events: Vec<String>,
    pub super_args: Option<Vec<Value>>,
    pub super_throws: bool,
}

impl Machine {
    pub fn throwing() -> Self {
        Self {
            super_throws: true,
            ..Self::default()
        }
    }

    /// Binds `args` to the method's parameters and runs its body.
    pub fn invoke(&mut self, method: &MethodSpec, args: &[Value]) -> Flow {
        assert_eq!(method.params.len(), args.len());
        for (param, arg) in method.params.iter().zip(args) {
            self.env.insert(param.name.clone(), arg.clone());
        }
        self.block(&method.body)
    }

    pub fn position(&self, event: &str) -> Option<usize> {
        self.events.iter().position(|e| e == event)
    }

    fn block(&mut self, stmts: &[Stmt]) -> Flow {
        for stmt in stmts {
            match self.stmt(stmt) {
                Flow::Next => {}
                other => return other,
            }
        }
        Flow::Next
    }

    fn stmt(&mut self, stmt: &Stmt) -> Flow {
        match stmt {
            Stmt::Expr(e) => match self.eval(e) {
                Some(_) => Flow::Next,
                None => Flow::Throw,
            },
            Stmt::Let { name, value, .. } => match self.eval(value) {
                Some(v) => {
                    self.env.insert(name.clone(), v);
                    Flow::Next
                }
                None => Flow::Throw,
            },
            Stmt::Return(e) => match self.eval(e) {
                Some(v) => Flow::Return(v),
                None => Flow::Throw,
            },
            Stmt::TryFinally { body, finally } => {
                let outcome = self.block(body);
                match self.block(finally) {
                    Flow::Next => outcome,
                    abrupt => abrupt,
                }
            }
        }
    }

    /// `None` means the expression threw.
    fn eval(&mut self, expr: &Expr) -> Option<Value> {
        match expr {
            Expr::Ident(name) => Some(self.env.get(name).cloned().unwrap_or(Value::Unit)),
            Expr::Str(s) | Expr::Raw(s) => Some(Value::Str(s.clone())),
            Expr::Int(n) => Some(Value::Int(*n)),
            Expr::Call {
                receiver,
                method,
                args,
            } => {
                let args = args
                    .iter()
                    .map(|a| self.eval(a))
                    .collect::<Option<Vec<_>>>()?;
                match receiver {
                    Receiver::Super => {
                        self.events.push(format!("super.{method}"));
                        self.super_args = Some(args.clone());
                        if self.super_throws {
                            None
                        } else {
                            Some(Value::Echo(args))
                        }
                    }
                    Receiver::Class(_) | Receiver::Value(_) => {
                        self.events.push(method.clone());
                        Some(Value::Unit)
                    }
                }
            }
            Expr::SuperInit(_) | Expr::Lambda(_) | Expr::Constant { .. } => Some(Value::Unit),
        }
    }
}
