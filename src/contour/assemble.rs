//! Joining contour segments into polylines.
//!
//! Nodes and polylines live in arenas and refer to each other by index.
//! A node has at most two neighbours, so every polyline is a simple path
//! between its two end nodes; a closed polyline repeats its first point at
//! its end. Open ends are indexed by position, which turns every new
//! segment into a constant time operation.

use std::collections::HashMap;

use super::conrec::Pt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Key(u64, u64);

impl Key {
    fn of(p: Pt) -> Key {
        // adding 0.0 turns -0.0 into 0.0
        Key((p.0 + 0.0).to_bits(), (p.1 + 0.0).to_bits())
    }
}

#[derive(Debug, Clone)]
struct Node {
    pt: Pt,
    links: [Option<usize>; 2],
}

#[derive(Debug, Clone)]
struct Line {
    ends: [usize; 2],
    alive: bool,
}

/// An assembled polyline. Closed polylines don't repeat their first point.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Polyline {
    pub points: Vec<Pt>,
    pub closed: bool,
}

#[derive(Debug, Default)]
pub(super) struct Assembler {
    nodes: Vec<Node>,
    lines: Vec<Line>,
    /// Line owning each open end
    ends: HashMap<Key, usize>,
}

impl Assembler {
    pub(super) fn add(&mut self, p0: Pt, p1: Pt) {
        let (k0, k1) = (Key::of(p0), Key::of(p1));
        if k0 == k1 {
            return;
        }
        match (self.ends.get(&k0).copied(), self.ends.get(&k1).copied()) {
            (None, None) => {
                let a = self.node(p0);
                let b = self.node(p1);
                self.link(a, b);
                let line = self.lines.len();
                self.lines.push(Line {
                    ends: [a, b],
                    alive: true,
                });
                self.ends.insert(k0, line);
                self.ends.insert(k1, line);
            }
            (Some(line), None) => self.extend(line, k0, p1, k1),
            (None, Some(line)) => self.extend(line, k1, p0, k0),
            (Some(a), Some(b)) if a == b => self.close(a),
            (Some(a), Some(b)) => self.join(a, k0, b, k1),
        }
    }

    fn node(&mut self, pt: Pt) -> usize {
        self.nodes.push(Node {
            pt,
            links: [None, None],
        });
        self.nodes.len() - 1
    }

    fn link(&mut self, a: usize, b: usize) {
        for (n, other) in [(a, b), (b, a)] {
            let links = &mut self.nodes[n].links;
            if links[0].is_none() {
                links[0] = Some(other);
            } else {
                links[1] = Some(other);
            }
        }
    }

    fn end_slot(&self, line: usize, key: Key) -> usize {
        let first = self.lines[line].ends[0];
        if Key::of(self.nodes[first].pt) == key { 0 } else { 1 }
    }

    fn extend(&mut self, line: usize, at: Key, pt: Pt, key: Key) {
        let slot = self.end_slot(line, at);
        let end = self.lines[line].ends[slot];
        let n = self.node(pt);
        self.link(end, n);
        self.lines[line].ends[slot] = n;
        self.ends.remove(&at);
        self.ends.insert(key, line);
    }

    fn close(&mut self, line: usize) {
        let [a, b] = self.lines[line].ends;
        if self.nodes[a].links.contains(&Some(b)) {
            // the same segment again on a single segment line
            return;
        }
        let first = self.nodes[a].pt;
        let n = self.node(first);
        self.link(b, n);
        self.lines[line].ends[1] = n;
        self.ends.remove(&Key::of(first));
        self.ends.remove(&Key::of(self.nodes[b].pt));
    }

    fn join(&mut self, a: usize, ka: Key, b: usize, kb: Key) {
        let sa = self.end_slot(a, ka);
        let sb = self.end_slot(b, kb);
        let ea = self.lines[a].ends[sa];
        let eb = self.lines[b].ends[sb];
        self.link(ea, eb);
        let far = self.lines[b].ends[1 - sb];
        self.lines[a].ends[sa] = far;
        self.lines[b].alive = false;
        self.ends.remove(&ka);
        self.ends.remove(&kb);
        self.ends.insert(Key::of(self.nodes[far].pt), a);
    }

    fn walk(&self, line: &Line) -> Vec<Pt> {
        let mut pts = Vec::new();
        let mut prev = None;
        let mut cur = Some(line.ends[0]);
        while let Some(c) = cur {
            let node = &self.nodes[c];
            pts.push(node.pt);
            let next = node.links.iter().flatten().copied().find(|n| Some(*n) != prev);
            prev = Some(c);
            cur = next;
        }
        pts
    }

    /// The assembled polylines. Loops through a repeated vertex are cut
    /// out as separate closed polylines.
    pub(super) fn finish(&self) -> Vec<Polyline> {
        let mut out = Vec::new();
        for line in self.lines.iter().filter(|l| l.alive) {
            let (rest, loops) = excise_loops(self.walk(line));
            out.extend(loops.into_iter().map(|points| Polyline {
                points,
                closed: true,
            }));
            if rest.len() >= 2 {
                out.push(Polyline {
                    points: rest,
                    closed: false,
                });
            }
        }
        out
    }
}

fn excise_loops(pts: Vec<Pt>) -> (Vec<Pt>, Vec<Vec<Pt>>) {
    let mut rest: Vec<Pt> = Vec::with_capacity(pts.len());
    let mut seen: HashMap<Key, usize> = HashMap::new();
    let mut loops = Vec::new();
    for p in pts {
        let key = Key::of(p);
        if let Some(&j) = seen.get(&key) {
            let lp: Vec<Pt> = rest.drain(j..).collect();
            for q in &lp {
                seen.remove(&Key::of(*q));
            }
            if lp.len() >= 3 {
                loops.push(lp);
            }
        }
        seen.insert(key, rest.len());
        rest.push(p);
    }
    (rest, loops)
}
