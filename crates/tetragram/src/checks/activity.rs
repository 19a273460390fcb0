//! Checks for activity diagrams and their flow edges.

use tetragram_core::ast::Reference;
use tetragram_core::{Document, NodeData, NodeId};

use crate::checks::{check_duplicate_names, check_endpoint};
use crate::error::{Diagnostic, DiagnosticCode, DiagnosticCollector};
use crate::scope;

/// Validate one activity diagram: activity name uniqueness and task name
/// uniqueness within each activity (tasks of different activities may
/// share names).
pub fn check_activity_diagram(doc: &Document, id: NodeId, out: &mut DiagnosticCollector) {
    let NodeData::ActivityDiagram(diagram) = doc.data(id) else {
        return;
    };

    check_duplicate_names(
        doc,
        &diagram.activities,
        "activity",
        DiagnosticCode::E400,
        out,
    );

    for &activity in &diagram.activities {
        let NodeData::Activity(a) = doc.data(activity) else {
            continue;
        };
        check_duplicate_names(doc, &a.tasks, "task", DiagnosticCode::E401, out);
    }
}

/// Validate one control-flow edge.
pub fn check_flow(doc: &Document, id: NodeId, out: &mut DiagnosticCollector) {
    let NodeData::Flow(flow) = doc.data(id) else {
        return;
    };
    check_edge(doc, id, &flow.source, &flow.target, flow.count, "flow", out);
}

/// Validate one data-flow edge.
pub fn check_data_flow(doc: &Document, id: NodeId, out: &mut DiagnosticCollector) {
    let NodeData::DataFlow(flow) = doc.data(id) else {
        return;
    };
    check_edge(
        doc,
        id,
        &flow.source,
        &flow.target,
        flow.count,
        "data flow",
        out,
    );
}

/// Endpoint membership and count-range checks shared by both edge kinds.
///
/// Endpoints must resolve to a task of some activity of the nearest
/// enclosing activity diagram; without such a diagram the membership
/// check is skipped. The count range is local to the edge and is checked
/// either way.
fn check_edge(
    doc: &Document,
    id: NodeId,
    source: &Reference,
    target: &Reference,
    count: Option<NodeId>,
    noun: &str,
    out: &mut DiagnosticCollector,
) {
    if let Some(enclosing) = scope::enclosing_activity_diagram(doc, id) {
        if let NodeData::ActivityDiagram(diagram) = doc.data(enclosing) {
            let is_task = |node: NodeId| {
                diagram.activities.iter().any(|&activity| match doc.data(activity) {
                    NodeData::Activity(a) => a.tasks.contains(&node),
                    _ => false,
                })
            };
            check_endpoint(
                id,
                source,
                &is_task,
                &format!("{noun} source"),
                "not a task of this diagram",
                DiagnosticCode::E402,
                out,
            );
            check_endpoint(
                id,
                target,
                &is_task,
                &format!("{noun} target"),
                "not a task of this diagram",
                DiagnosticCode::E402,
                out,
            );
        }
    }

    if let Some(range_id) = count {
        check_count_range(doc, range_id, noun, out);
    }
}

/// Flag a negative minimum or a maximum below the minimum, targeting the
/// range node itself. A bound that is not a valid integer literal is the
/// producer's defect and is skipped.
fn check_count_range(doc: &Document, id: NodeId, noun: &str, out: &mut DiagnosticCollector) {
    let NodeData::CountRange(range) = doc.data(id) else {
        return;
    };
    let Ok(minimum) = range.minimum.parse::<i64>() else {
        return;
    };

    if minimum < 0 {
        out.emit(
            Diagnostic::error(id, format!("{noun} count minimum cannot be negative"))
                .with_code(DiagnosticCode::E403)
                .with_label(doc.span(id), "negative minimum"),
        );
    }
    if let Some(max_literal) = &range.maximum {
        if let Ok(maximum) = max_literal.parse::<i64>() {
            if maximum < minimum {
                out.emit(
                    Diagnostic::error(
                        id,
                        format!("{noun} count maximum {maximum} is below the minimum {minimum}"),
                    )
                    .with_code(DiagnosticCode::E404)
                    .with_label(doc.span(id), "inverted range"),
                );
            }
        }
    }
}
