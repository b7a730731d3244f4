//! SQL to query envelope compiler used by the integration tests.
//!
//! Handles the subset of SQL the rewrite scenarios need: a single SELECT with
//! function calls, comparisons, HAVING, ORDER BY and LIMIT. Function names
//! are canonicalized the way the broker's compiler does.

use common_error::{TrellisError, TrellisResult};
use sqlparser::ast::{
    BinaryOperator, Distinct, Expr, FunctionArg, FunctionArgExpr, FunctionArguments, LimitClause,
    ObjectName, ObjectNamePart, OrderByKind, Query, SelectItem, SetExpr, Statement, UnaryOperator,
    Value as SqlValue, ValueWithSpan,
};
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;
use trellis_core::Value;
use trellis_logical::expr::builtin;
use trellis_logical::{Expression, OrderByItem, QueryEnvelope, canonical_name};

/// Compile one SELECT statement.
pub fn compile_sql(sql: &str) -> TrellisResult<QueryEnvelope> {
    let statements = Parser::parse_sql(&GenericDialect {}, sql)
        .map_err(|err| TrellisError::invalid_query(err.to_string()))?;

    let [Statement::Query(query)] = statements.as_slice() else {
        return Err(TrellisError::invalid_query(
            "expected exactly one SELECT statement",
        ));
    };
    compile_query(query)
}

/// Compile, panicking on failure.
pub fn compile(sql: &str) -> QueryEnvelope {
    match compile_sql(sql) {
        Ok(query) => query,
        Err(err) => panic!("failed to compile {sql:?}: {err}"),
    }
}

fn compile_query(query: &Query) -> TrellisResult<QueryEnvelope> {
    let SetExpr::Select(select) = query.body.as_ref() else {
        return Err(TrellisError::invalid_query("expected a plain SELECT"));
    };

    let mut select_list = select
        .projection
        .iter()
        .map(compile_select_item)
        .collect::<TrellisResult<Vec<_>>>()?;

    if matches!(select.distinct, Some(Distinct::Distinct)) {
        select_list = vec![Expression::function("distinct", select_list)];
    }

    let mut envelope = QueryEnvelope::new(select_list)?;

    if let Some(having) = &select.having {
        envelope = envelope.with_having(compile_expr(having)?);
    }

    if let Some(order_by) = &query.order_by {
        if let OrderByKind::Expressions(items) = &order_by.kind {
            for item in items {
                let expr = compile_expr(&item.expr)?;
                let item = if item.options.asc == Some(false) {
                    OrderByItem::desc(expr)
                } else {
                    OrderByItem::asc(expr)
                };
                envelope = envelope.with_order_by(item);
            }
        }
    }

    if let Some(LimitClause::LimitOffset {
        limit: Some(limit), ..
    }) = &query.limit_clause
    {
        envelope = envelope.with_limit(compile_limit(limit)?);
    }

    Ok(envelope)
}

fn compile_select_item(item: &SelectItem) -> TrellisResult<Expression> {
    match item {
        SelectItem::UnnamedExpr(expr) | SelectItem::ExprWithAlias { expr, .. } => {
            compile_expr(expr)
        }
        SelectItem::Wildcard(_) => Ok(Expression::identifier("*")),
        other => Err(TrellisError::invalid_query(format!(
            "unsupported select item: {other}"
        ))),
    }
}

fn compile_limit(expr: &Expr) -> TrellisResult<u64> {
    match expr {
        Expr::Value(ValueWithSpan {
            value: SqlValue::Number(number, _),
            ..
        }) => number
            .parse()
            .map_err(|_| TrellisError::invalid_query(format!("invalid limit: {number}"))),
        other => Err(TrellisError::invalid_query(format!(
            "unsupported limit: {other}"
        ))),
    }
}

fn compile_expr(expr: &Expr) -> TrellisResult<Expression> {
    match expr {
        Expr::Identifier(ident) => Ok(Expression::identifier(ident.value.clone())),
        Expr::CompoundIdentifier(parts) => parts
            .last()
            .map(|ident| Expression::identifier(ident.value.clone()))
            .ok_or_else(|| TrellisError::invalid_query("empty compound identifier")),
        Expr::Nested(inner) => compile_expr(inner),
        Expr::Value(value) => compile_value(&value.value).map(Expression::Literal),
        Expr::UnaryOp {
            op: UnaryOperator::Not,
            expr,
        } => Ok(Expression::function(builtin::NOT, vec![compile_expr(expr)?])),
        Expr::UnaryOp {
            op: UnaryOperator::Minus,
            expr,
        } => match compile_expr(expr)? {
            Expression::Literal(Value::Int64(v)) => Ok(Expression::literal(-v)),
            Expression::Literal(Value::Float64(v)) => Ok(Expression::literal(-v)),
            other => Ok(Expression::function("minus", vec![Expression::literal(0i64), other])),
        },
        Expr::BinaryOp { left, op, right } => Ok(Expression::function(
            binary_operator_name(op)?,
            vec![compile_expr(left)?, compile_expr(right)?],
        )),
        Expr::Function(function) => {
            let operands = match &function.args {
                FunctionArguments::None => Vec::new(),
                FunctionArguments::List(list) => list
                    .args
                    .iter()
                    .map(compile_function_arg)
                    .collect::<TrellisResult<Vec<_>>>()?,
                _ => return Err(TrellisError::invalid_query("subquery arguments")),
            };
            Ok(Expression::function(
                canonical_name(&function_name(&function.name)?),
                operands,
            ))
        }
        other => Err(TrellisError::invalid_query(format!(
            "unsupported expression: {other}"
        ))),
    }
}

fn compile_function_arg(arg: &FunctionArg) -> TrellisResult<Expression> {
    match arg {
        FunctionArg::Unnamed(FunctionArgExpr::Expr(expr)) => compile_expr(expr),
        FunctionArg::Unnamed(FunctionArgExpr::Wildcard) => Ok(Expression::identifier("*")),
        other => Err(TrellisError::invalid_query(format!(
            "unsupported function argument: {other}"
        ))),
    }
}

fn function_name(name: &ObjectName) -> TrellisResult<String> {
    name.0
        .last()
        .and_then(ObjectNamePart::as_ident)
        .map(|ident| ident.value.clone())
        .ok_or_else(|| TrellisError::invalid_query(format!("unsupported function name: {name}")))
}

fn compile_value(value: &SqlValue) -> TrellisResult<Value> {
    match value {
        SqlValue::Number(number, _) => number
            .parse::<i64>()
            .map(Value::Int64)
            .or_else(|_| number.parse::<f64>().map(Value::Float64))
            .map_err(|_| TrellisError::invalid_query(format!("invalid number: {number}"))),
        SqlValue::SingleQuotedString(s) | SqlValue::DoubleQuotedString(s) => {
            Ok(Value::String(s.clone()))
        }
        SqlValue::Boolean(b) => Ok(Value::Bool(*b)),
        SqlValue::Null => Ok(Value::Null),
        other => Err(TrellisError::invalid_query(format!(
            "unsupported literal: {other}"
        ))),
    }
}

fn binary_operator_name(op: &BinaryOperator) -> TrellisResult<&'static str> {
    let name = match op {
        BinaryOperator::Eq => builtin::EQUALS,
        BinaryOperator::NotEq => builtin::NOT_EQUALS,
        BinaryOperator::Gt => builtin::GREATER_THAN,
        BinaryOperator::GtEq => builtin::GREATER_THAN_OR_EQUAL,
        BinaryOperator::Lt => builtin::LESS_THAN,
        BinaryOperator::LtEq => builtin::LESS_THAN_OR_EQUAL,
        BinaryOperator::And => builtin::AND,
        BinaryOperator::Or => builtin::OR,
        BinaryOperator::Plus => "plus",
        BinaryOperator::Minus => "minus",
        BinaryOperator::Multiply => "times",
        BinaryOperator::Divide => "divide",
        other => {
            return Err(TrellisError::invalid_query(format!(
                "unsupported operator: {other}"
            )));
        }
    };
    Ok(name)
}
