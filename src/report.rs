//! Reporting utilities over the graph read surface: textual dumps,
//! per-level statistics, mermaid diagrams and JSONL export. Nothing in
//! the core calls into this module.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::error::Error;
use std::hash::BuildHasherDefault;
use std::io::Write;
use std::rc::Rc;

use hashbrown::{HashMap as HbHashMap, HashSet as HbHashSet};
use serde::Serialize;

use crate::state::{GameState, StateRef};

type FastHasher = BuildHasherDefault<ahash::AHasher>;
type NodeId = *const RefCell<GameState>;

/// Per-level census of the materialized graph.
///
/// `total_states` counts state references (one per path reaching the
/// level), `unique_states` counts distinct node objects; the gap is the
/// work saved by layer canonicalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelStats {
    pub depth: usize,
    pub total_states: u64,
    pub unique_states: usize,
}

pub fn level_stats(root: &StateRef) -> Vec<LevelStats> {
    let mut stats = Vec::new();
    let mut level: HbHashMap<NodeId, (StateRef, u64), FastHasher> =
        HbHashMap::with_hasher(FastHasher::default());
    level.insert(Rc::as_ptr(root), (Rc::clone(root), 1));
    let mut depth = 0usize;
    while !level.is_empty() {
        let total: u64 = level.values().map(|(_, freq)| *freq).sum();
        stats.push(LevelStats {
            depth,
            total_states: total,
            unique_states: level.len(),
        });
        let mut next: HbHashMap<NodeId, (StateRef, u64), FastHasher> =
            HbHashMap::with_hasher(FastHasher::default());
        for (node, freq) in level.values() {
            if let Some(kids) = node.borrow().children.as_ref() {
                for child in kids {
                    let entry = next
                        .entry(Rc::as_ptr(child))
                        .or_insert_with(|| (Rc::clone(child), 0));
                    entry.1 += freq;
                }
            }
        }
        level = next;
        depth += 1;
    }
    stats
}

/// Markdown table over [`level_stats`] output.
pub fn write_level_stats(stats: &[LevelStats], out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "| Level | Total States | Unique States |")?;
    writeln!(out, "|------:|-------------:|--------------:|")?;
    for s in stats {
        writeln!(
            out,
            "| {:>5} | {:>12} | {:>13} |",
            s.depth, s.total_states, s.unique_states
        )?;
    }
    Ok(())
}

/// ASCII rendition of the graph. Shared children are printed once per
/// referencing parent, so output grows with path count, not node count;
/// intended for short sequences.
pub fn render_tree(node: &StateRef, out: &mut dyn Write) -> std::io::Result<()> {
    render_tree_inner(node, out, "", true)
}

fn render_tree_inner(
    node: &StateRef,
    out: &mut dyn Write,
    prefix: &str,
    is_last: bool,
) -> std::io::Result<()> {
    let connector = if is_last { "└── " } else { "├── " };
    writeln!(out, "{prefix}{connector}{}", node.borrow())?;
    let kids = node.borrow().children.clone().unwrap_or_default();
    let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
    for (i, child) in kids.iter().enumerate() {
        render_tree_inner(child, out, &child_prefix, i + 1 == kids.len())?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct ExportLine {
    depth: usize,
    sequence: String,
    score_player1: i32,
    score_player2: i32,
    terminal: bool,
    children: usize,
}

/// One JSON line per distinct node per level, breadth-first. Returns the
/// number of lines written.
pub fn export_jsonl(root: &StateRef, out: &mut dyn Write) -> Result<usize, Box<dyn Error>> {
    let mut lines = 0usize;
    let mut level: Vec<StateRef> = vec![Rc::clone(root)];
    let mut depth = 0usize;
    while !level.is_empty() {
        let mut next: Vec<StateRef> = Vec::new();
        let mut seen: HbHashSet<NodeId, FastHasher> = HbHashSet::with_hasher(FastHasher::default());
        for node in &level {
            let n = node.borrow();
            let line = ExportLine {
                depth,
                sequence: n.sequence.to_string(),
                score_player1: n.score_player1,
                score_player2: n.score_player2,
                terminal: n.is_terminal(),
                children: n.children.as_ref().map_or(0, Vec::len),
            };
            let json = serde_json::to_string(&line)?;
            out.write_all(json.as_bytes())?;
            out.write_all(b"\n")?;
            lines += 1;
            if let Some(kids) = n.children.as_ref() {
                for child in kids {
                    if seen.insert(Rc::as_ptr(child)) {
                        next.push(Rc::clone(child));
                    }
                }
            }
        }
        level = next;
        depth += 1;
    }
    Ok(lines)
}

/// Mermaid `graph TD` diagram: one declaration per distinct node, one
/// edge per child reference.
pub fn render_mermaid(root: &StateRef, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "graph TD")?;
    let mut ids: HbHashMap<NodeId, usize, FastHasher> =
        HbHashMap::with_hasher(FastHasher::default());
    let mut queue: VecDeque<StateRef> = VecDeque::new();
    ids.insert(Rc::as_ptr(root), 0);
    let mut next_id = 1usize;
    {
        let r = root.borrow();
        writeln!(
            out,
            "    n0[\"{} | {}:{}\"]",
            r.sequence, r.score_player1, r.score_player2
        )?;
    }
    queue.push_back(Rc::clone(root));
    while let Some(node) = queue.pop_front() {
        let from = ids[&Rc::as_ptr(&node)];
        let kids = node.borrow().children.clone().unwrap_or_default();
        for child in kids {
            let ptr = Rc::as_ptr(&child);
            let to = match ids.get(&ptr) {
                Some(id) => *id,
                None => {
                    let id = next_id;
                    next_id += 1;
                    ids.insert(ptr, id);
                    {
                        let c = child.borrow();
                        writeln!(
                            out,
                            "    n{id}[\"{} | {}:{}\"]",
                            c.sequence, c.score_player1, c.score_player2
                        )?;
                    }
                    queue.push_back(Rc::clone(&child));
                    id
                }
            };
            writeln!(out, "    n{from} --> n{to}")?;
        }
    }
    Ok(())
}
