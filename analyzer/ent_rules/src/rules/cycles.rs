//! Static-utility dependency cycle finder (EC0301).
//!
//! Static utility classes call each other freely, and a cycle among them
//! means no reload or initialization order can be correct. Per-file
//! callbacks record caller-invokes-callee edges concurrently; finalization
//! runs once, strictly after every file has been visited, prunes the
//! acyclic fringe and enumerates cycles by DFS.
//!
//! Enumeration runs one DFS per surviving root, so a maximal simple cycle
//! is found at least once per root; overlapping cycles sharing nodes can
//! in principle be reported redundantly. A canonical-rotation dedup keeps
//! each distinct cycle to a single diagnostic.

use dashmap::DashMap;
use ent_diagnostic::{DiagnosticRecord, RuleCode};
use ent_ir::{Invocation, Name, SemanticModel, SourceSpan};
use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};

use crate::classify::is_static_utility;
use crate::config::RuleScope;
use crate::context::RuleContext;

pub const SCOPE: RuleScope = RuleScope::all();

/// One recorded call site on an edge.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct CallSiteRef {
    /// Interned source text of the invocation.
    pub text: Name,
    pub span: SourceSpan,
}

/// Callers of one callee, with every call site per caller.
type CalleeBucket = FxHashMap<Name, Vec<CallSiteRef>>;

/// The whole-compilation dependency multigraph over static utilities.
///
/// Keyed callee-first: insertion locks exactly the bucket of the callee
/// being recorded (the `DashMap` entry guard), never the whole map, so
/// concurrent per-file callbacks on unrelated callees do not contend.
/// Populated during the parallel phase, finalized once, then discarded.
pub struct DependencyGraph {
    edges: DashMap<Name, CalleeBucket, FxBuildHasher>,
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        DependencyGraph {
            edges: DashMap::with_hasher(FxBuildHasher),
        }
    }

    /// Record an invocation, if both ends are static utilities.
    ///
    /// Self-edges are never recorded: a utility calling itself is
    /// recursion, not an initialization-order hazard.
    pub fn record(&self, model: &dyn SemanticModel, inv: &Invocation) {
        if inv.caller == inv.callee {
            return;
        }
        let both_static = model.type_decl(inv.caller).is_some_and(is_static_utility)
            && model.type_decl(inv.callee).is_some_and(is_static_utility);
        if !both_static {
            return;
        }
        self.edges
            .entry(inv.callee)
            .or_default()
            .entry(inv.caller)
            .or_default()
            .push(CallSiteRef {
                text: inv.text,
                span: inv.span,
            });
    }

    /// Number of distinct (caller, callee) edges recorded.
    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(|bucket| bucket.len()).sum()
    }

    /// Find and report every cycle. Runs once, after all per-file
    /// callbacks have completed.
    pub fn finalize(&self, cx: &RuleContext<'_>) {
        // Snapshot into caller -> [(callee, first site)] adjacency. The
        // graph is ours alone now; the host guarantees the parallel phase
        // has joined.
        let mut adjacency: FxHashMap<Name, Vec<(Name, CallSiteRef)>> = FxHashMap::default();
        let mut nodes: FxHashSet<Name> = FxHashSet::default();
        for bucket in self.edges.iter() {
            let callee = *bucket.key();
            nodes.insert(callee);
            for (&caller, sites) in bucket.value() {
                nodes.insert(caller);
                // Multigraph edges collapse to the first recorded site for
                // reporting; the cycle itself is what matters.
                if let Some(&site) = sites.first() {
                    adjacency.entry(caller).or_default().push((callee, site));
                }
            }
        }

        let alive = prune_fringe(&adjacency, nodes);
        if alive.is_empty() {
            return;
        }

        // Deterministic traversal order: sort survivors and successors by
        // their resolved names, not by interner-assigned ids.
        let mut roots: Vec<Name> = alive.iter().copied().collect();
        roots.sort_by_key(|&n| cx.display(n));
        for successors in adjacency.values_mut() {
            successors.sort_by_key(|&(n, _)| cx.display(n));
        }

        tracing::debug!(survivors = roots.len(), "enumerating utility cycles");

        let mut reported: FxHashSet<Vec<Name>> = FxHashSet::default();
        for &root in &roots {
            enumerate_cycles_from(cx, &adjacency, &alive, root, &mut reported);
        }
    }
}

/// Strip nodes with no incoming or no outgoing edges among the remaining
/// set, to a fixed point. Whatever survives sits on at least one cycle
/// candidate.
fn prune_fringe(
    adjacency: &FxHashMap<Name, Vec<(Name, CallSiteRef)>>,
    mut alive: FxHashSet<Name>,
) -> FxHashSet<Name> {
    loop {
        let mut incoming: FxHashSet<Name> = FxHashSet::default();
        let mut outgoing: FxHashSet<Name> = FxHashSet::default();
        for (&caller, successors) in adjacency {
            if !alive.contains(&caller) {
                continue;
            }
            for &(callee, _) in successors {
                if alive.contains(&callee) {
                    outgoing.insert(caller);
                    incoming.insert(callee);
                }
            }
        }
        let before = alive.len();
        alive.retain(|n| incoming.contains(n) && outgoing.contains(n));
        if alive.len() == before {
            return alive;
        }
    }
}

/// DFS from `root` with an explicit recursion stack; reaching a node
/// already on the stack closes a cycle.
fn enumerate_cycles_from(
    cx: &RuleContext<'_>,
    adjacency: &FxHashMap<Name, Vec<(Name, CallSiteRef)>>,
    alive: &FxHashSet<Name>,
    root: Name,
    reported: &mut FxHashSet<Vec<Name>>,
) {
    struct Frame {
        node: Name,
        next: usize,
    }

    let mut stack = vec![Frame { node: root, next: 0 }];
    let mut path = vec![root];
    let mut on_path: FxHashSet<Name> = std::iter::once(root).collect();
    let mut finished: FxHashSet<Name> = FxHashSet::default();

    while let Some(frame) = stack.last_mut() {
        let successors = adjacency.get(&frame.node).map_or(&[][..], Vec::as_slice);
        if frame.next < successors.len() {
            let (succ, _) = successors[frame.next];
            frame.next += 1;
            if !alive.contains(&succ) {
                continue;
            }
            if on_path.contains(&succ) {
                // Cycle closed: everything from succ's position on the
                // path, plus the back edge.
                if let Some(start) = path.iter().position(|&n| n == succ) {
                    let cycle = path[start..].to_vec();
                    if reported.insert(canonical_rotation(&cycle)) {
                        report_cycle(cx, adjacency, &cycle);
                    }
                }
            } else if !finished.contains(&succ) {
                stack.push(Frame { node: succ, next: 0 });
                on_path.insert(succ);
                path.push(succ);
            }
        } else {
            finished.insert(frame.node);
            on_path.remove(&frame.node);
            path.pop();
            stack.pop();
        }
    }
}

/// Rotate a cycle so its smallest node comes first, giving one key per
/// distinct cycle regardless of which DFS root discovered it.
fn canonical_rotation(cycle: &[Name]) -> Vec<Name> {
    let Some(min_idx) = (0..cycle.len()).min_by_key(|&i| cycle[i].raw()) else {
        return Vec::new();
    };
    let mut rotated = Vec::with_capacity(cycle.len());
    rotated.extend_from_slice(&cycle[min_idx..]);
    rotated.extend_from_slice(&cycle[..min_idx]);
    rotated
}

/// EC0301 with the full path in call order and each edge's call-site text.
fn report_cycle(
    cx: &RuleContext<'_>,
    adjacency: &FxHashMap<Name, Vec<(Name, CallSiteRef)>>,
    cycle: &[Name],
) {
    let site_for = |from: Name, to: Name| -> Option<CallSiteRef> {
        adjacency
            .get(&from)?
            .iter()
            .find(|&&(callee, _)| callee == to)
            .map(|&(_, site)| site)
    };

    let mut description = String::new();
    let mut spans: Vec<SourceSpan> = Vec::new();
    for (i, &node) in cycle.iter().enumerate() {
        let next = cycle[(i + 1) % cycle.len()];
        if i == 0 {
            description.push_str(cx.display(node));
        }
        if let Some(site) = site_for(node, next) {
            description.push_str(&format!(
                " -> {} (via `{}`)",
                cx.display(next),
                cx.display(site.text)
            ));
            spans.push(site.span);
        } else {
            description.push_str(&format!(" -> {}", cx.display(next)));
        }
    }

    let mut record = DiagnosticRecord::error(
        RuleCode::EC0301,
        spans.first().copied().unwrap_or(SourceSpan::DUMMY),
    )
    .with_arg(description);
    for &span in spans.iter().skip(1) {
        record = record.with_span(span);
    }
    cx.report(record);
}
