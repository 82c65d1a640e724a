//! Rule-to-plan compilation: index selection and join-graph construction.
//!
//! ## Design
//!
//! Each rule becomes a scan over whichever index puts that rule's bound
//! slots in its key prefix, projected down to the rule's variables. Scans
//! that share a variable alias are then merged pairwise into inner joins
//! until a single connected plan remains; rules that share no variable with
//! the rest are a compile error rather than an implicit cross product.
//! Finally the caller's output pattern narrows the joined plan to the
//! requested variables, in order.

use factdb_core::{Tuple, Value};
use factdb_engine::IndexKind;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::plan::{PlanNode, OBJECT, PREDICATE, SUBJECT};
use crate::query::Pattern;
use crate::rule::{Rule, Term};
use crate::var::Var;

/// Compiles a pattern and rule set into one logical plan.
///
/// Bound subjects must already be entity ids; ident names are resolved by
/// the caller before compilation.
pub(crate) fn compile(pattern: &Pattern, rules: &[Rule]) -> Result<PlanNode> {
    check_alias_uniqueness(pattern, rules)?;

    let mut nodes = Vec::with_capacity(rules.len());
    for rule in rules {
        if let Some(node) = compile_rule(rule)? {
            nodes.push(node);
        }
    }

    let joined = join_fixpoint(nodes)?;
    project_pattern(pattern, joined)
}

/// Rejects queries where one display alias names two distinct variables.
///
/// Aliases are the join and projection keys, so a collision would silently
/// conflate unrelated variables.
fn check_alias_uniqueness(pattern: &Pattern, rules: &[Rule]) -> Result<()> {
    let mut seen: FxHashMap<String, u64> = FxHashMap::default();
    let rule_vars = rules.iter().flat_map(|rule| {
        [rule.subject(), rule.predicate(), rule.object()]
            .into_iter()
            .filter_map(Term::as_var)
    });
    for var in rule_vars.chain(pattern.vars().iter()) {
        let alias = var.alias();
        match seen.get(&alias) {
            Some(&id) if id != var.id() => {
                return Err(Error::DuplicateAlias { alias });
            }
            _ => {
                seen.insert(alias, var.id());
            }
        }
    }
    Ok(())
}

/// Selects an index, prefix, and projection for one rule.
///
/// Returns `None` for a fully bound rule: it constrains nothing and produces
/// no columns, so it is dropped without checking that the triple exists.
fn compile_rule(rule: &Rule) -> Result<Option<PlanNode>> {
    check_distinct_vars(rule)?;

    match (rule.subject(), rule.predicate(), rule.object()) {
        (Term::Value(_), Term::Value(_), Term::Value(_)) => Ok(None),

        // Free subject: the POS key holds both bound slots.
        (Term::Var(s), Term::Value(p), Term::Value(o)) => {
            let scan = scan(
                IndexKind::Pos,
                vec![predicate_value(p, rule)?, o.clone()],
            );
            Ok(Some(project(scan, vec![(SUBJECT, s)])))
        }

        // Free subject and object: walk one predicate through PSO.
        (Term::Var(s), Term::Value(p), Term::Var(o)) => {
            let scan = scan(IndexKind::Pso, vec![predicate_value(p, rule)?]);
            Ok(Some(project(scan, vec![(SUBJECT, s), (OBJECT, o)])))
        }

        // Free predicate with a bound object: no index leads with
        // (subject, object), so scan the subject and filter on the object.
        (Term::Value(s), Term::Var(p), Term::Value(o)) => {
            let scan = scan(IndexKind::Spo, vec![subject_value(s, rule)?]);
            let filtered = PlanNode::Filter {
                source: Box::new(scan),
                column: object_column(IndexKind::Spo),
                value: o.clone(),
            };
            Ok(Some(project(filtered, vec![(PREDICATE, p)])))
        }

        // Free predicate and object: everything known about one subject.
        (Term::Value(s), Term::Var(p), Term::Var(o)) => {
            let scan = scan(IndexKind::Spo, vec![subject_value(s, rule)?]);
            Ok(Some(project(scan, vec![(PREDICATE, p), (OBJECT, o)])))
        }

        // Free object only: the SPO key holds both bound slots.
        (Term::Value(s), Term::Value(p), Term::Var(o)) => {
            let scan = scan(
                IndexKind::Spo,
                vec![subject_value(s, rule)?, predicate_value(p, rule)?],
            );
            Ok(Some(project(scan, vec![(OBJECT, o)])))
        }

        (Term::Var(_), Term::Var(_), _) => Err(Error::UnsupportedRuleShape {
            reason: format!("subject and predicate are both unbound in {rule}"),
        }),
    }
}

/// A rule may use each variable in only one position.
fn check_distinct_vars(rule: &Rule) -> Result<()> {
    let vars: Vec<&Var> = [rule.subject(), rule.predicate(), rule.object()]
        .into_iter()
        .filter_map(Term::as_var)
        .collect();
    for (i, var) in vars.iter().enumerate() {
        if vars[i + 1..].contains(var) {
            return Err(Error::UnsupportedRuleShape {
                reason: format!("variable ?{} appears in more than one position of {rule}", var),
            });
        }
    }
    Ok(())
}

fn subject_value(value: &Value, rule: &Rule) -> Result<Value> {
    match value {
        Value::UInt(_) => Ok(value.clone()),
        Value::Ref(id) => Ok(Value::UInt(id.as_u64())),
        _ => Err(Error::UnsupportedRuleShape {
            reason: format!("subject of {rule} must be an entity id"),
        }),
    }
}

fn predicate_value(value: &Value, rule: &Rule) -> Result<Value> {
    match value {
        Value::String(_) => Ok(value.clone()),
        _ => Err(Error::UnsupportedRuleShape {
            reason: format!("predicate of {rule} must be a string"),
        }),
    }
}

/// Position of the object column within an index's scan layout.
fn object_column(index: IndexKind) -> usize {
    match index {
        IndexKind::Spo | IndexKind::Pso => 2,
        IndexKind::Pos => 1,
    }
}

fn scan(index: IndexKind, prefix: Vec<Value>) -> PlanNode {
    PlanNode::Scan {
        index,
        prefix: Tuple::new(prefix),
    }
}

fn project(source: PlanNode, columns: Vec<(&str, &Var)>) -> PlanNode {
    PlanNode::Project {
        source: Box::new(source),
        projections: columns
            .into_iter()
            .map(|(src, var)| (src.to_string(), var.alias()))
            .collect(),
    }
}

/// Greedily merges nodes that share an output alias until no pair does.
///
/// Each merge joins on the first shared alias and restarts the pairwise
/// scan. Worst case is cubic in the number of rules, which stays small.
fn join_fixpoint(mut nodes: Vec<PlanNode>) -> Result<PlanNode> {
    while let Some((i, j, left_key, right_key)) = find_shared_alias(&nodes) {
        let right = nodes.remove(j);
        let left = nodes.remove(i);
        nodes.push(PlanNode::Join {
            left: Box::new(left),
            right: Box::new(right),
            left_key,
            right_key,
        });
    }
    match nodes.len() {
        0 => Err(Error::EmptyPlan),
        1 => Ok(nodes.swap_remove(0)),
        _ => Err(Error::CartesianJoinNotPermitted),
    }
}

fn find_shared_alias(nodes: &[PlanNode]) -> Option<(usize, usize, usize, usize)> {
    for i in 0..nodes.len() {
        let left_aliases = nodes[i].output_aliases();
        for j in (i + 1)..nodes.len() {
            let right_aliases = nodes[j].output_aliases();
            for (left_key, alias) in left_aliases.iter().enumerate() {
                if let Some(right_key) = right_aliases.iter().position(|a| a == alias) {
                    return Some((i, j, left_key, right_key));
                }
            }
        }
    }
    None
}

/// Narrows the joined plan to the pattern's variables, in declared order.
fn project_pattern(pattern: &Pattern, source: PlanNode) -> Result<PlanNode> {
    let available = source.output_aliases();
    let mut projections = Vec::with_capacity(pattern.vars().len());
    for var in pattern.vars() {
        let alias = var.alias();
        if !available.iter().any(|a| *a == alias) {
            return Err(Error::UnknownVariable { alias });
        }
        projections.push((alias.clone(), alias));
    }
    Ok(PlanNode::Project {
        source: Box::new(source),
        projections,
    })
}

// ========================================
// Tests
// ========================================
